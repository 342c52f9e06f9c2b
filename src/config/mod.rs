pub mod redis;
pub mod settings;
pub mod storage;
