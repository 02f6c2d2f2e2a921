//! Cache module for session bookkeeping
//!
//! Provides the Redis client with connection retry, the Redis-backed session
//! store, and an in-process store with the same expiry semantics.

pub mod memory_store;
pub mod redis_client;
pub mod session_store;

pub use memory_store::InMemorySessionStore;
pub use redis_client::RedisClient;
pub use session_store::RedisSessionStore;

// Re-export commonly used types
pub use ts_shared::config::cache::CacheConfig;
