// Utils compartidos

pub mod constants;
pub mod storage;
pub mod time;

pub use constants::*;
pub use storage::{BrowserStorage, KeyValueStore, MemoryStorage};
pub use time::{format_local, format_relative};
