// Portal shared type definitions
// Each submodule defines types used across the crate.

pub mod errors;
pub mod favorite;
pub mod frame;
pub mod playtime;
pub mod settings;
pub mod tab;
