//! Store provider traits.
//!
//! This module defines traits for every storage dependency of the platform
//! core. Services depend on these traits only; the binary picks concrete
//! implementations (PostgreSQL, Redis) and tests pick the in-memory mocks.
//!
//! Cross-request invariants live HERE, not in service code: pair-uniqueness
//! of subscriptions and follows is enforced by the store (a uniqueness
//! constraint or a single guarded step), never by a check-then-insert in a
//! caller, because concurrent requests would race such a check.

pub mod account;
pub mod follow;
pub mod plan;
pub mod session;
pub mod subscription;

pub use account::AccountStore;
pub use follow::FollowStore;
pub use plan::PlanStore;
pub use session::SessionStore;
pub use subscription::{ActivationOutcome, SubscriptionStore};
