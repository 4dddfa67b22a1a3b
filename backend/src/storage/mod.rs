//! Storage layer: abstraction traits and the SQLite backend.

pub mod sqlite;
pub mod traits;
