pub mod memory_cache;
pub mod sqlite_cache;

pub use memory_cache::MemoryCacheStorage;
pub use sqlite_cache::SqliteCacheStorage;
