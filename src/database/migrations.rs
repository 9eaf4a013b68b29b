//! Schema migrations.
//!
//! Applied versions are recorded in `schema_version`; `run_all` only applies
//! the ones above the recorded maximum.

use rusqlite::{params, Connection};

/// Latest schema the code expects. Bump together with a new `MIGRATIONS` entry.
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

type Migration = fn(&Connection) -> Result<(), rusqlite::Error>;

const MIGRATIONS: &[(i32, &str, Migration)] = &[
    (1, "favorites", create_favorites),
    (2, "playtime", create_playtime),
];

/// Highest applied version, 0 for a fresh database.
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT IFNULL(MAX(version), 0) FROM schema_version", [], |row| {
        row.get(0)
    })
    .unwrap_or(0)
}

/// Brings the schema up to [`CURRENT_SCHEMA_VERSION`]. Safe on every startup.
pub fn run_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         CREATE TABLE IF NOT EXISTS schema_version (
             version INTEGER PRIMARY KEY,
             applied_at INTEGER NOT NULL,
             description TEXT NOT NULL
         );",
    )?;

    let applied = get_schema_version(conn);
    for (version, description, migrate) in MIGRATIONS {
        if *version <= applied {
            continue;
        }
        migrate(conn)?;
        let applied_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
            params![version, applied_at, description],
        )?;
        log::debug!("[DB] applied migration {} ({})", version, description);
    }

    Ok(())
}

/// Favorites, one row per (kind, id). `seq` breaks `added_at` ties.
fn create_favorites(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS favorites (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            kind TEXT NOT NULL CHECK (kind IN ('games', 'apps', 'movies')),
            id TEXT NOT NULL,
            name TEXT NOT NULL,
            img TEXT,
            url TEXT,
            added_at INTEGER NOT NULL,
            UNIQUE (kind, id)
        );

        CREATE INDEX IF NOT EXISTS idx_favorites_added ON favorites(added_at, seq);
        ",
    )
}

/// Playtime: one totals row (`id = 1`) holding the running activity, plus one
/// counter per activity. `first_visit` is the UTC date the row was created.
fn create_playtime(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS playtime (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            total_ms INTEGER NOT NULL DEFAULT 0,
            sessions INTEGER NOT NULL DEFAULT 0,
            first_visit TEXT NOT NULL,
            activity TEXT NOT NULL DEFAULT 'idle',
            activity_start INTEGER NOT NULL DEFAULT 0
        );
        INSERT OR IGNORE INTO playtime (id, first_visit) VALUES (1, date('now'));

        CREATE TABLE IF NOT EXISTS playtime_breakdown (
            activity TEXT PRIMARY KEY
                CHECK (activity IN ('games', 'apps', 'movies', 'browsing', 'idle')),
            ms INTEGER NOT NULL DEFAULT 0
        );
        INSERT OR IGNORE INTO playtime_breakdown (activity)
            VALUES ('games'), ('apps'), ('movies'), ('browsing'), ('idle');
        ",
    )
}
