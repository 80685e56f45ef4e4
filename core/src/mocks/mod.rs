//! Mock store implementations for testing.
//!
//! Simple in-memory implementations of every provider trait, for unit and
//! integration tests. Each store serializes access through one mutex, which
//! also makes its conditional writes atomic the way the real stores'
//! constraints do.

pub mod account;
pub mod follow;
pub mod plan;
pub mod session;
pub mod subscription;

pub use account::MockAccountStore;
pub use follow::MockFollowStore;
pub use plan::MockPlanStore;
pub use session::MockSessionStore;
pub use subscription::MockSubscriptionStore;
