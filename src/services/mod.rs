pub mod cache;
pub mod storage;

pub use cache::CacheService;
pub use storage::StorageService;
