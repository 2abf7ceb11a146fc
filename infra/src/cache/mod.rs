//! Cache module for Redis-backed storage
//!
//! Provides a retrying Redis client and the Redis verification store.

pub mod redis_client;
pub mod verification_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use verification_store::RedisVerificationStore;

// Re-export commonly used types
pub use jt_shared::config::CacheConfig;
