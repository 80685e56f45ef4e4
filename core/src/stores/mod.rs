//! Concrete store implementations.
//!
//! - [`session_redis`]: ephemeral session storage in Redis (TTL-based).
//! - [`postgres`]: durable stores in PostgreSQL (feature `postgres`).

pub mod session_redis;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use session_redis::RedisSessionStore;

#[cfg(feature = "postgres")]
pub use postgres::{
    PostgresAccountStore, PostgresFollowStore, PostgresPlanStore, PostgresSubscriptionStore,
};
