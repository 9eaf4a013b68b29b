//! Portal database layer.
//!
//! SQLite connection management and schema migrations. Favorites are the
//! only persisted collection; settings live in a JSON file.
//!
//! ```no_run
//! use portal_browser::database::Database;
//!
//! let db = Database::open("portal.db").expect("failed to open database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
