//! # Stride Core
//!
//! Domain model and services for the Stride platform: trainers publish
//! priced plans with an access window, users subscribe to individual plans,
//! and users follow trainers to receive a personalized feed.
//!
//! The heart of the crate is the entitlement engine: one policy deciding,
//! for any (viewer, plan) pair, whether full content is visible, and one
//! projection shaping every plan response accordingly. Every surface
//! (catalog listing, single-plan fetch, feed, trainer profile) goes through
//! it; none re-derives access or selects fields on its own.
//!
//! ## Architecture
//!
//! ```text
//! request ─→ IdentityResolver ─→ Viewer
//!                                  │
//!              ┌───────────────────┼──────────────────┐
//!              ▼                   ▼                  ▼
//!         PlanCatalog      SubscriptionLedger    FollowGraph
//!              │                   │                  │
//!              └────────→ EntitlementEngine ←── FeedComposer
//!                                  │
//!                              PlanView
//! ```
//!
//! Services are `Clone` bundles of store handles; all storage goes through
//! the provider traits in [`providers`], with PostgreSQL/Redis
//! implementations in [`stores`] and in-memory mocks in [`mocks`].

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod catalog;
pub mod config;
pub mod entitlement;
pub mod error;
pub mod feed;
pub mod follow;
pub mod identity;
pub mod ledger;
pub mod providers;
pub mod state;
pub mod stores;
pub mod views;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use catalog::{NewPlan, PlanCatalog, PlanPatch};
pub use config::PlatformConfig;
pub use entitlement::EntitlementEngine;
pub use error::{PlatformError, Result};
pub use feed::FeedComposer;
pub use follow::FollowGraph;
pub use identity::IdentityResolver;
pub use ledger::{SubscribeOutcome, SubscriptionLedger};
pub use state::{
    Account, AuthSession, Follow, Plan, PlanId, Role, SessionToken, Subscription,
    SubscriptionId, SubscriptionStatus, TrainerSummary, UserId, Viewer,
};
pub use views::{
    FeedItem, FollowedTrainer, PlanRecord, PlanView, SubscriptionView, TrainerListing,
    TrainerProfile,
};
