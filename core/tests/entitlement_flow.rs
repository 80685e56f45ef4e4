//! End-to-end entitlement scenario over the in-memory stores.
//!
//! Follows one plan from publication through anonymous preview,
//! subscription, feed annotation and ownership enforcement.

#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::{Duration, Utc};
use stride_core::mocks::{
    MockAccountStore, MockFollowStore, MockPlanStore, MockSubscriptionStore,
};
use stride_core::{
    Account, EntitlementEngine, FeedComposer, FollowGraph, NewPlan, PlanCatalog, PlanView,
    PlatformError, Role, SubscriptionLedger, UserId, Viewer,
};

struct Platform {
    catalog: PlanCatalog<MockPlanStore, MockAccountStore, MockSubscriptionStore, MockFollowStore>,
    ledger: SubscriptionLedger<MockPlanStore, MockSubscriptionStore, MockAccountStore>,
    graph: FollowGraph<MockAccountStore, MockFollowStore>,
    feed: FeedComposer<MockPlanStore, MockFollowStore, MockSubscriptionStore, MockAccountStore>,
    accounts: MockAccountStore,
}

fn platform() -> Platform {
    let plans = MockPlanStore::new();
    let accounts = MockAccountStore::new();
    let subscriptions = MockSubscriptionStore::new();
    let follows = MockFollowStore::new();
    let graph = FollowGraph::new(accounts.clone(), follows.clone());

    Platform {
        catalog: PlanCatalog::new(
            plans.clone(),
            accounts.clone(),
            subscriptions.clone(),
            follows.clone(),
        ),
        ledger: SubscriptionLedger::new(plans.clone(), subscriptions.clone(), accounts.clone()),
        graph: graph.clone(),
        feed: FeedComposer::new(
            plans.clone(),
            graph,
            EntitlementEngine::new(subscriptions.clone()),
            accounts.clone(),
        ),
        accounts,
    }
}

fn seed_account(accounts: &MockAccountStore, name: &str, role: Role) -> UserId {
    accounts
        .seed(Account {
            id: UserId::new(),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            role,
            created_at: Utc::now(),
        })
        .unwrap()
}

#[tokio::test]
async fn plan_lifecycle_from_preview_to_subscribed_feed() {
    let platform = platform();
    let trainer = seed_account(&platform.accounts, "taylor", Role::Trainer);
    let user = seed_account(&platform.accounts, "robin", Role::User);

    // Trainer publishes a plan.
    let record = platform
        .catalog
        .create(
            trainer,
            NewPlan {
                title: "5K Plan".to_string(),
                description: "Couch to 5K in eight weeks".to_string(),
                price: 20.0,
                duration_days: 30,
            },
        )
        .await
        .unwrap();

    // Anonymous listing: preview only (title, price, trainer); nothing gated.
    let listing = platform.catalog.list(&Viewer::Anonymous).await.unwrap();
    assert_eq!(listing.len(), 1);
    match &listing[0] {
        PlanView::Preview {
            title,
            price,
            trainer: summary,
            has_access,
            ..
        } => {
            assert_eq!(title, "5K Plan");
            assert!((price - 20.0).abs() < f64::EPSILON);
            assert_eq!(summary.as_ref().unwrap().id, trainer);
            assert!(!has_access);
        }
        PlanView::Full { .. } => panic!("anonymous viewer must not get the full view"),
    }

    // User subscribes: a 30-day window from purchase.
    let viewer = Viewer::Authenticated {
        id: user,
        role: Role::User,
    };
    let outcome = platform.ledger.subscribe(user, record.id).await.unwrap();
    assert!(outcome.is_created());
    let view = outcome.view();
    assert_eq!(view.expires_at - view.purchased_at, Duration::days(30));

    // Fetching the plan again now yields the full projection.
    let fetched = platform.catalog.get(&viewer, record.id).await.unwrap();
    match fetched {
        PlanView::Full {
            ref description,
            duration_days,
            ..
        } => {
            assert_eq!(description, "Couch to 5K in eight weeks");
            assert_eq!(duration_days, 30);
        }
        PlanView::Preview { .. } => panic!("subscriber must get the full view"),
    }

    // Follow the trainer; the feed includes the plan marked subscribed.
    platform.graph.follow(user, trainer).await.unwrap();
    let feed = platform.feed.compose(&viewer).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].plan.id(), record.id);
    assert!(feed[0].is_subscribed);

    // The trainer profile reports the follow and projects per viewer.
    let profile = platform
        .catalog
        .trainer_profile(&viewer, trainer)
        .await
        .unwrap();
    assert!(profile.is_following);
    assert!(profile.plans[0].has_access());

    let anonymous_profile = platform
        .catalog
        .trainer_profile(&Viewer::Anonymous, trainer)
        .await
        .unwrap();
    assert!(!anonymous_profile.is_following);
    assert!(!anonymous_profile.plans[0].has_access());
}

#[tokio::test]
async fn non_owner_mutations_are_forbidden_and_leave_the_plan_intact() {
    let platform = platform();
    let owner = seed_account(&platform.accounts, "taylor", Role::Trainer);
    let other = seed_account(&platform.accounts, "casey", Role::Trainer);

    let record = platform
        .catalog
        .create(
            owner,
            NewPlan {
                title: "Tempo Block".to_string(),
                description: "Four weeks of tempo work".to_string(),
                price: 15.0,
                duration_days: 28,
            },
        )
        .await
        .unwrap();

    let update = platform
        .catalog
        .update(
            other,
            record.id,
            stride_core::PlanPatch {
                title: Some("Stolen".to_string()),
                ..stride_core::PlanPatch::default()
            },
        )
        .await;
    assert!(matches!(update, Err(PlatformError::Forbidden(_))));

    let delete = platform.catalog.delete(other, record.id).await;
    assert!(matches!(delete, Err(PlatformError::Forbidden(_))));

    let view = platform
        .catalog
        .get(&Viewer::Anonymous, record.id)
        .await
        .unwrap();
    assert!(matches!(view, PlanView::Preview { ref title, .. } if title == "Tempo Block"));
}

#[tokio::test]
async fn deleting_a_plan_revokes_every_subscription() {
    let platform = platform();
    let trainer = seed_account(&platform.accounts, "taylor", Role::Trainer);
    let first = seed_account(&platform.accounts, "robin", Role::User);
    let second = seed_account(&platform.accounts, "jamie", Role::User);

    let record = platform
        .catalog
        .create(
            trainer,
            NewPlan {
                title: "Hill Repeats".to_string(),
                description: "Six weeks of hills".to_string(),
                price: 10.0,
                duration_days: 42,
            },
        )
        .await
        .unwrap();

    platform.ledger.subscribe(first, record.id).await.unwrap();
    platform.ledger.subscribe(second, record.id).await.unwrap();

    platform.catalog.delete(trainer, record.id).await.unwrap();

    assert!(!platform.ledger.is_active(first, record.id).await.unwrap());
    assert!(!platform.ledger.is_active(second, record.id).await.unwrap());
    assert!(platform.ledger.list_for_user(first).await.unwrap().is_empty());
}
