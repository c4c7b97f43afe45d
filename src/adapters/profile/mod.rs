//! Profile store adapters.
//!
//! Implementations of the ProfileStore port:
//! - `InMemoryProfileStore`: map-backed store for tests and embedding
//! - `JsonFileProfileStore`: one JSON file per user, the hand-off format of
//!   the attribute-extraction pipeline

mod in_memory;
mod json_file;

pub use in_memory::InMemoryProfileStore;
pub use json_file::JsonFileProfileStore;
