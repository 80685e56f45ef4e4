//! HTTP surface tests over the in-memory stores.
//!
//! Each test boots the full router with mock stores, seeds accounts and
//! sessions directly, and drives the API the way a client would.

#![allow(clippy::unwrap_used)]

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use stride_core::mocks::{
    MockAccountStore, MockFollowStore, MockPlanStore, MockSessionStore, MockSubscriptionStore,
};
use stride_core::providers::SessionStore as _;
use stride_core::{Account, AuthSession, Role, UserId};
use stride_web::{platform_router, AppState};

struct TestPlatform {
    server: TestServer,
    accounts: MockAccountStore,
    sessions: MockSessionStore,
}

impl TestPlatform {
    fn new() -> Self {
        let plans = MockPlanStore::new();
        let subscriptions = MockSubscriptionStore::new();
        let follows = MockFollowStore::new();
        let accounts = MockAccountStore::new();
        let sessions = MockSessionStore::new();

        let state = AppState::new(
            plans,
            subscriptions,
            follows,
            accounts.clone(),
            sessions.clone(),
        );
        let server = TestServer::new(platform_router(state)).unwrap();

        Self {
            server,
            accounts,
            sessions,
        }
    }

    fn seed_account(&self, name: &str, role: Role) -> UserId {
        self.accounts
            .seed(Account {
                id: UserId::new(),
                name: name.to_string(),
                email: format!("{name}@example.com"),
                role,
                created_at: Utc::now(),
            })
            .unwrap()
    }

    async fn login(&self, user_id: UserId) -> String {
        let session = AuthSession::issue(user_id, Duration::hours(24));
        self.sessions
            .put(&session, Duration::hours(24))
            .await
            .unwrap();
        session.token.0.to_string()
    }
}

fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    )
}

async fn create_plan(platform: &TestPlatform, token: &str, title: &str) -> Value {
    let (name, value) = bearer(token);
    let response = platform
        .server
        .post("/plans")
        .add_header(name, value)
        .json(&json!({
            "title": title,
            "description": "Couch to 5K in eight weeks",
            "price": 20.0,
            "duration": 30,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn anonymous_listing_shows_previews_only() {
    let platform = TestPlatform::new();
    let trainer = platform.seed_account("taylor", Role::Trainer);
    let token = platform.login(trainer).await;
    create_plan(&platform, &token, "5K Plan").await;

    let response = platform.server.get("/plans").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let listing = body.as_array().unwrap();
    assert_eq!(listing.len(), 1);

    let entry = listing[0].as_object().unwrap();
    assert_eq!(entry.get("title"), Some(&json!("5K Plan")));
    assert_eq!(entry.get("hasAccess"), Some(&json!(false)));
    assert_eq!(entry["trainer"]["name"], json!("taylor"));

    // Gated fields are structurally absent, not null.
    assert!(!entry.contains_key("description"));
    assert!(!entry.contains_key("duration"));
    assert!(!entry.contains_key("createdAt"));
}

#[tokio::test]
async fn subscriber_sees_full_plan_and_feed_marks_it() {
    let platform = TestPlatform::new();
    let trainer = platform.seed_account("taylor", Role::Trainer);
    let user = platform.seed_account("robin", Role::User);
    let trainer_token = platform.login(trainer).await;
    let user_token = platform.login(user).await;

    let plan = create_plan(&platform, &trainer_token, "5K Plan").await;
    let plan_id = plan["id"].as_str().unwrap().to_string();

    // Subscribe: 201, window of 30 days.
    let (name, value) = bearer(&user_token);
    let response = platform
        .server
        .post(&format!("/subscriptions/{plan_id}"))
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::CREATED);
    let subscription = response.json::<Value>();
    assert_eq!(subscription["status"], json!("active"));
    assert_eq!(subscription["plan"]["hasAccess"], json!(true));

    // Subscribing again while live: 400 with the conflict code.
    let (name, value) = bearer(&user_token);
    let response = platform
        .server
        .post(&format!("/subscriptions/{plan_id}"))
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], json!("CONFLICT"));

    // The plan now reads full for the subscriber.
    let (name, value) = bearer(&user_token);
    let response = platform
        .server
        .get(&format!("/plans/{plan_id}"))
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["description"], json!("Couch to 5K in eight weeks"));
    assert_eq!(body["duration"], json!(30));

    // Follow the trainer; the feed carries the plan marked subscribed.
    let (name, value) = bearer(&user_token);
    platform
        .server
        .post(&format!("/trainers/{}/follow", trainer.0))
        .add_header(name, value)
        .await
        .assert_status_ok();

    let (name, value) = bearer(&user_token);
    let response = platform.server.get("/feed").add_header(name, value).await;
    response.assert_status_ok();
    let feed = response.json::<Value>();
    let items = feed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["isSubscribed"], json!(true));
    assert_eq!(items[0]["hasAccess"], json!(true));

    // my-subscriptions lists the record with its plan populated.
    let (name, value) = bearer(&user_token);
    let response = platform
        .server
        .get("/subscriptions/my-subscriptions")
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let subscriptions = response.json::<Value>();
    assert_eq!(subscriptions.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn feed_requires_authentication() {
    let platform = TestPlatform::new();

    let response = platform.server.get("/feed").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    // A malformed credential downgrades to anonymous, which this surface
    // rejects the same way.
    let (name, value) = bearer("garbage-token");
    let response = platform.server.get("/feed").add_header(name, value).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_credential_still_serves_public_reads() {
    let platform = TestPlatform::new();
    let trainer = platform.seed_account("taylor", Role::Trainer);
    let token = platform.login(trainer).await;
    create_plan(&platform, &token, "5K Plan").await;

    let (name, value) = bearer("not-a-real-token");
    let response = platform.server.get("/plans").add_header(name, value).await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["hasAccess"], json!(false));
}

#[tokio::test]
async fn plan_creation_is_trainer_only_and_validated() {
    let platform = TestPlatform::new();
    let user = platform.seed_account("robin", Role::User);
    let user_token = platform.login(user).await;

    // Anonymous: 401.
    let response = platform
        .server
        .post("/plans")
        .json(&json!({"title": "x", "description": "y", "price": 1.0, "duration": 1}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    // Authenticated non-trainer: 403.
    let (name, value) = bearer(&user_token);
    let response = platform
        .server
        .post("/plans")
        .add_header(name, value)
        .json(&json!({"title": "x", "description": "y", "price": 1.0, "duration": 1}))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // Trainer with a missing field: 400 with field context.
    let trainer = platform.seed_account("taylor", Role::Trainer);
    let trainer_token = platform.login(trainer).await;
    let (name, value) = bearer(&trainer_token);
    let response = platform
        .server
        .post("/plans")
        .add_header(name, value)
        .json(&json!({"title": "x", "description": "y", "price": 1.0}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["message"].as_str().unwrap().contains("duration"));
}

#[tokio::test]
async fn ownership_gates_update_and_delete() {
    let platform = TestPlatform::new();
    let owner = platform.seed_account("taylor", Role::Trainer);
    let other = platform.seed_account("casey", Role::Trainer);
    let owner_token = platform.login(owner).await;
    let other_token = platform.login(other).await;

    let plan = create_plan(&platform, &owner_token, "5K Plan").await;
    let plan_id = plan["id"].as_str().unwrap().to_string();

    // Non-owner update: 403.
    let (name, value) = bearer(&other_token);
    let response = platform
        .server
        .put(&format!("/plans/{plan_id}"))
        .add_header(name, value)
        .json(&json!({"title": "Hijacked"}))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // Non-owner delete: 403.
    let (name, value) = bearer(&other_token);
    let response = platform
        .server
        .delete(&format!("/plans/{plan_id}"))
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // Owner patch with explicit zero price: applied.
    let (name, value) = bearer(&owner_token);
    let response = platform
        .server
        .put(&format!("/plans/{plan_id}"))
        .add_header(name, value)
        .json(&json!({"price": 0.0}))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["price"], json!(0.0));
    assert_eq!(body["title"], json!("5K Plan"));

    // Blanking a text field: 400, not a silent no-op.
    let (name, value) = bearer(&owner_token);
    let response = platform
        .server
        .put(&format!("/plans/{plan_id}"))
        .add_header(name, value)
        .json(&json!({"title": ""}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Owner delete: 200; the plan is gone.
    let (name, value) = bearer(&owner_token);
    platform
        .server
        .delete(&format!("/plans/{plan_id}"))
        .add_header(name, value)
        .await
        .assert_status_ok();

    let response = platform.server.get(&format!("/plans/{plan_id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trainer_profile_reports_follow_state_and_projects_plans() {
    let platform = TestPlatform::new();
    let trainer = platform.seed_account("taylor", Role::Trainer);
    let user = platform.seed_account("robin", Role::User);
    let trainer_token = platform.login(trainer).await;
    let user_token = platform.login(user).await;

    create_plan(&platform, &trainer_token, "5K Plan").await;

    // Anonymous profile: previews, not following.
    let response = platform.server.get(&format!("/trainers/{}", trainer.0)).await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["trainer"]["name"], json!("taylor"));
    assert_eq!(body["isFollowing"], json!(false));
    assert_eq!(body["plans"][0]["hasAccess"], json!(false));
    assert!(!body["plans"][0]
        .as_object()
        .unwrap()
        .contains_key("description"));

    // A user profile is 404: only trainer accounts have profiles.
    let response = platform.server.get(&format!("/trainers/{}", user.0)).await;
    response.assert_status(StatusCode::NOT_FOUND);

    // Follow, then the profile reflects it.
    let (name, value) = bearer(&user_token);
    let response = platform
        .server
        .post(&format!("/trainers/{}/follow", trainer.0))
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Followed successfully")
    );

    let (name, value) = bearer(&user_token);
    let response = platform
        .server
        .get(&format!("/trainers/{}", trainer.0))
        .add_header(name, value)
        .await;
    assert_eq!(response.json::<Value>()["isFollowing"], json!(true));

    // Duplicate follow: 400. Self-follow: 400. Unknown trainer: 404.
    let (name, value) = bearer(&user_token);
    let response = platform
        .server
        .post(&format!("/trainers/{}/follow", trainer.0))
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let (name, value) = bearer(&trainer_token);
    let response = platform
        .server
        .post(&format!("/trainers/{}/follow", trainer.0))
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let (name, value) = bearer(&user_token);
    let response = platform
        .server
        .post(&format!("/trainers/{}/follow", UserId::new().0))
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    // Following list carries the trainer summary.
    let (name, value) = bearer(&user_token);
    let response = platform
        .server
        .get("/trainers/following/list")
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let list = response.json::<Value>();
    assert_eq!(list[0]["trainer"]["name"], json!("taylor"));

    // Unfollow, then unfollowing again is 404.
    let (name, value) = bearer(&user_token);
    platform
        .server
        .delete(&format!("/trainers/{}/follow", trainer.0))
        .add_header(name, value)
        .await
        .assert_status_ok();

    let (name, value) = bearer(&user_token);
    let response = platform
        .server
        .delete(&format!("/trainers/{}/follow", trainer.0))
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trainer_directory_lists_trainers_only() {
    let platform = TestPlatform::new();
    platform.seed_account("taylor", Role::Trainer);
    platform.seed_account("robin", Role::User);

    let response = platform.server.get("/trainers").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let listing = body.as_array().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0]["name"], json!("taylor"));
}

#[tokio::test]
async fn unknown_plan_is_not_found() {
    let platform = TestPlatform::new();
    let response = platform
        .server
        .get(&format!("/plans/{}", uuid::Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}
