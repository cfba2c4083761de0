//! Project state storage adapters.

mod json;
mod memory;

pub use json::{JsonProjectStore, STATE_FILE};
pub use memory::MemoryProjectStore;
