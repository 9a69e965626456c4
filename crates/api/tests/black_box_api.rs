use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::{Value, json};

use campusconnect_api::app::build_app;
use campusconnect_api::config::AppConfig;
use campusconnect_store::Store;

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(store: Store) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let config = AppConfig {
            jwt_secret: JWT_SECRET.to_string(),
            cookie_name: "cc_session".to_string(),
            bind: String::new(),
            secure_cookies: false,
        };
        let app = build_app(config, store);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn login(client: &reqwest::Client, base: &str, email: &str, password: &str) -> Value {
    let res = client
        .post(format!("{base}/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

async fn demo_token(client: &reqwest::Client, base: &str, role: &str) -> String {
    let body = login(
        client,
        base,
        &format!("{role}@campusconnect.demo"),
        &format!("{role}123"),
    )
    .await;
    body["token"].as_str().unwrap().to_string()
}

async fn register(
    client: &reqwest::Client,
    base: &str,
    name: &str,
    email: &str,
    role: &str,
) -> Value {
    let res = client
        .post(format!("{base}/auth/register"))
        .json(&json!({
            "name": name,
            "email": email,
            "password": "password123",
            "role": role,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[derive(serde::Serialize)]
struct ForeignClaims {
    sub: String,
    email: String,
    role: String,
    name: String,
    iat: i64,
    exp: i64,
}

fn mint_token(secret: &str, ttl: ChronoDuration) -> String {
    let now = Utc::now();
    let claims = ForeignClaims {
        sub: "demo-admin".to_string(),
        email: "admin@campusconnect.demo".to_string(),
        role: "admin".to_string(),
        name: "Demo Admin".to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

// -------------------------
// Gate behavior
// -------------------------

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn(Store::in_memory()).await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_endpoints_reject_missing_and_bad_tokens() {
    let srv = TestServer::spawn(Store::in_memory()).await;
    let client = reqwest::Client::new();

    // Missing token.
    let res = client
        .get(format!("{}/auth/me", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());

    // Garbage token.
    let res = client
        .get(format!("{}/auth/me", srv.base_url))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Token signed with a different secret.
    let foreign = mint_token("some-other-secret", ChronoDuration::minutes(10));
    let res = client
        .get(format!("{}/auth/me", srv.base_url))
        .bearer_auth(foreign)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Expired token with the right secret.
    let expired = mint_token(JWT_SECRET, ChronoDuration::minutes(-10));
    let res = client
        .get(format!("{}/auth/me", srv.base_url))
        .bearer_auth(expired)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

// -------------------------
// Registration and sessions
// -------------------------

#[tokio::test]
async fn register_sets_cookie_and_me_works_via_cookie() {
    let srv = TestServer::spawn(Store::in_memory()).await;
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    let body = register(&client, &srv.base_url, "Alice", "alice@x.edu", "student").await;
    assert_eq!(body["success"], json!(true));
    assert!(body["token"].is_string());
    assert!(body["user"].get("passwordHash").is_none());
    assert_eq!(body["user"]["email"], "alice@x.edu");

    // The cookie set at registration authenticates /auth/me on its own.
    let res = client
        .get(format!("{}/auth/me", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let me: Value = res.json().await.unwrap();
    assert_eq!(me["isDemo"], json!(false));
    assert_eq!(me["user"]["name"], "Alice");
}

#[tokio::test]
async fn register_validation_and_conflicts() {
    let srv = TestServer::spawn(Store::in_memory()).await;
    let client = reqwest::Client::new();

    // Short password.
    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({"name": "A", "email": "a@x.edu", "password": "short", "role": "student"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Invalid role.
    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({"name": "A", "email": "a@x.edu", "password": "password123", "role": "professor"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Duplicate email is a conflict (case-insensitive, emails are lowercased).
    register(&client, &srv.base_url, "A", "dup@x.edu", "student").await;
    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({"name": "B", "email": "DUP@x.edu", "password": "password123", "role": "student"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn demo_logins_resolve_synthetic_identities() {
    let srv = TestServer::spawn(Store::in_memory()).await;
    let client = reqwest::Client::new();

    for role in ["student", "faculty", "admin"] {
        let body = login(
            &client,
            &srv.base_url,
            &format!("{role}@campusconnect.demo"),
            &format!("{role}123"),
        )
        .await;
        assert_eq!(body["user"]["id"], json!(format!("demo-{role}")));
        assert_eq!(body["user"]["role"], json!(role));

        let token = body["token"].as_str().unwrap();
        let res = client
            .get(format!("{}/auth/me", srv.base_url))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let me: Value = res.json().await.unwrap();
        assert_eq!(me["isDemo"], json!(true));
    }

    // Demo email with the wrong password never falls through to the store.
    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({"email": "student@campusconnect.demo", "password": "wrong"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

// -------------------------
// Authorization policy
// -------------------------

#[tokio::test]
async fn role_gating_is_enforced() {
    let srv = TestServer::spawn(Store::in_memory()).await;
    let client = reqwest::Client::new();
    let student = demo_token(&client, &srv.base_url, "student").await;
    let faculty = demo_token(&client, &srv.base_url, "faculty").await;

    // Students cannot create courses.
    let res = client
        .post(format!("{}/courses", srv.base_url))
        .bearer_auth(&student)
        .json(&json!({"code": "cs-101", "title": "Intro", "description": "Basics"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Faculty can.
    let res = client
        .post(format!("{}/courses", srv.base_url))
        .bearer_auth(&faculty)
        .json(&json!({"code": "cs-101", "title": "Intro", "description": "Basics"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["course"]["code"], "CS-101");

    // Duplicate course code conflicts.
    let res = client
        .post(format!("{}/courses", srv.base_url))
        .bearer_auth(&faculty)
        .json(&json!({"code": "CS-101", "title": "Again", "description": "Dup"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // User management is admin-only.
    let res = client
        .get(format!("{}/users", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let admin = demo_token(&client, &srv.base_url, "admin").await;
    let res = client
        .get(format!("{}/users", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn admins_cannot_delete_or_deactivate_themselves() {
    let srv = TestServer::spawn(Store::in_memory()).await;
    let client = reqwest::Client::new();

    let body = register(&client, &srv.base_url, "Root", "root@x.edu", "admin").await;
    let token = body["token"].as_str().unwrap().to_string();
    let own_id = body["user"]["id"].as_str().unwrap().to_string();

    let res = client
        .delete(format!("{}/users/{own_id}", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .patch(format!("{}/users/{own_id}/active", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({"isActive": false}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Deactivating someone else works, and blocks their login.
    let other = register(&client, &srv.base_url, "Sam", "sam@x.edu", "student").await;
    let other_id = other["user"]["id"].as_str().unwrap();
    let res = client
        .patch(format!("{}/users/{other_id}/active", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({"isActive": false}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({"email": "sam@x.edu", "password": "password123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

// -------------------------
// Events and RSVPs
// -------------------------

async fn create_event(
    client: &reqwest::Client,
    base: &str,
    token: &str,
    title: &str,
    max_attendees: Option<u32>,
) -> Value {
    let res = client
        .post(format!("{base}/events"))
        .bearer_auth(token)
        .json(&json!({
            "title": title,
            "description": "desc",
            "date": Utc::now() + ChronoDuration::days(5),
            "location": "Hall",
            "isPublic": true,
            "maxAttendees": max_attendees,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn event_listing_is_anonymous_and_approved_only() {
    let srv = TestServer::spawn(Store::in_memory()).await;
    let client = reqwest::Client::new();
    let admin = demo_token(&client, &srv.base_url, "admin").await;
    let faculty = demo_token(&client, &srv.base_url, "faculty").await;

    // Admin events are live immediately; faculty events await approval.
    create_event(&client, &srv.base_url, &admin, "Open Day", None).await;
    let pending = create_event(&client, &srv.base_url, &faculty, "Seminar", None).await;
    let pending_id = pending["event"]["id"].as_str().unwrap();

    let res = reqwest::get(format!("{}/events", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    let titles: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Open Day"]);

    // The unapproved event is invisible anonymously.
    let res = reqwest::get(format!("{}/events/{pending_id}", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn organizers_see_their_own_pending_events() {
    let srv = TestServer::spawn(Store::in_memory()).await;
    let client = reqwest::Client::new();

    let body = register(&client, &srv.base_url, "Prof", "prof@x.edu", "faculty").await;
    let organizer = body["token"].as_str().unwrap().to_string();

    let pending = create_event(&client, &srv.base_url, &organizer, "Colloquium", None).await;
    assert_eq!(pending["event"]["approved"], json!(false));
    let pending_id = pending["event"]["id"].as_str().unwrap();

    // The organizer's authenticated list and single read include the
    // pending event.
    let res = client
        .get(format!("{}/events", srv.base_url))
        .bearer_auth(&organizer)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    let titles: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Colloquium"]);

    let res = client
        .get(format!("{}/events/{pending_id}", srv.base_url))
        .bearer_auth(&organizer)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Admins see it too; other authenticated callers and anonymous
    // readers do not.
    let admin = demo_token(&client, &srv.base_url, "admin").await;
    let res = client
        .get(format!("{}/events/{pending_id}", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let student = demo_token(&client, &srv.base_url, "student").await;
    let res = client
        .get(format!("{}/events/{pending_id}", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = reqwest::get(format!("{}/events/{pending_id}", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn past_dated_event_creation_is_rejected() {
    let srv = TestServer::spawn(Store::in_memory()).await;
    let client = reqwest::Client::new();
    let admin = demo_token(&client, &srv.base_url, "admin").await;

    let res = client
        .post(format!("{}/events", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({
            "title": "Yesterday",
            "description": "late",
            "date": Utc::now() - ChronoDuration::days(1),
            "location": "Hall",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "event date must be in the future");
}

#[tokio::test]
async fn rsvp_failure_matrix() {
    let srv = TestServer::spawn(Store::in_memory()).await;
    let client = reqwest::Client::new();
    let admin = demo_token(&client, &srv.base_url, "admin").await;
    let faculty = demo_token(&client, &srv.base_url, "faculty").await;
    let student = demo_token(&client, &srv.base_url, "student").await;

    // Unapproved event rejects RSVPs.
    let pending = create_event(&client, &srv.base_url, &faculty, "Pending", None).await;
    let pending_id = pending["event"]["id"].as_str().unwrap();
    let res = client
        .post(format!("{}/events/{pending_id}/rsvp", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "event is not approved");

    // Capacity-1 event: first RSVP lands, second hits the cap, repeat is a
    // duplicate, cancel-without-RSVP is rejected.
    let small = create_event(&client, &srv.base_url, &admin, "Small", Some(1)).await;
    let small_id = small["event"]["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/events/{small_id}/rsvp", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/events/{small_id}/rsvp", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "already registered for this event");

    let res = client
        .post(format!("{}/events/{small_id}/rsvp", srv.base_url))
        .bearer_auth(&faculty)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "event is at capacity");

    let res = client
        .delete(format!("{}/events/{small_id}/rsvp", srv.base_url))
        .bearer_auth(&faculty)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not registered for this event");

    // Canceling frees the slot.
    let res = client
        .delete(format!("{}/events/{small_id}/rsvp", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let res = client
        .post(format!("{}/events/{small_id}/rsvp", srv.base_url))
        .bearer_auth(&faculty)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

// -------------------------
// Groups
// -------------------------

#[tokio::test]
async fn group_membership_rules() {
    let srv = TestServer::spawn(Store::in_memory()).await;
    let client = reqwest::Client::new();
    let student = demo_token(&client, &srv.base_url, "student").await;
    let faculty = demo_token(&client, &srv.base_url, "faculty").await;

    // Public group: creator is the sole initial member.
    let res = client
        .post(format!("{}/groups", srv.base_url))
        .bearer_auth(&student)
        .json(&json!({"name": "Chess Club", "description": "Chess", "isPublic": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    let group_id = body["group"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["group"]["members"], json!(["demo-student"]));

    // Creator joining again is a duplicate.
    let res = client
        .post(format!("{}/groups/{group_id}/join", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Public join is a direct add.
    let res = client
        .post(format!("{}/groups/{group_id}/join", srv.base_url))
        .bearer_auth(&faculty)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "joined group");

    // Creator can never leave; other members can.
    let res = client
        .post(format!("{}/groups/{group_id}/leave", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "group creators cannot leave their own group");

    let res = client
        .post(format!("{}/groups/{group_id}/leave", srv.base_url))
        .bearer_auth(&faculty)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Private group: join enqueues a request, repeat is rejected.
    let res = client
        .post(format!("{}/groups", srv.base_url))
        .bearer_auth(&faculty)
        .json(&json!({"name": "Committee", "description": "Private", "isPublic": false}))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    let private_id = body["group"]["id"].as_str().unwrap().to_string();

    let res = client
        .post(format!("{}/groups/{private_id}/join", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "join request submitted");

    let res = client
        .post(format!("{}/groups/{private_id}/join", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "join request already pending");
}

// -------------------------
// Notifications
// -------------------------

#[tokio::test]
async fn notification_read_markers_are_per_caller() {
    let srv = TestServer::spawn(Store::in_memory()).await;
    let client = reqwest::Client::new();
    let faculty = demo_token(&client, &srv.base_url, "faculty").await;
    let student = demo_token(&client, &srv.base_url, "student").await;
    let admin = demo_token(&client, &srv.base_url, "admin").await;

    let res = client
        .post(format!("{}/notifications", srv.base_url))
        .bearer_auth(&faculty)
        .json(&json!({"title": "Exam moved", "message": "Now Friday", "roles": ["student"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    let id = body["notification"]["id"].as_str().unwrap().to_string();

    // Role broadcast reaches students, not admins.
    let res = client
        .get(format!("{}/notifications", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["read"], json!(false));

    let res = client
        .get(format!("{}/notifications", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());

    // Mark read: the unread filter hides it; unread restores it.
    let res = client
        .post(format!("{}/notifications/{id}/read", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/notifications?unread=true", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());

    let res = client
        .post(format!("{}/notifications/{id}/unread", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/notifications?unread=true", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

// -------------------------
// Pagination
// -------------------------

#[tokio::test]
async fn pagination_metadata_is_uniform() {
    let srv = TestServer::spawn(Store::in_memory()).await;
    let client = reqwest::Client::new();
    let admin = demo_token(&client, &srv.base_url, "admin").await;

    for i in 0..5 {
        create_event(&client, &srv.base_url, &admin, &format!("Event {i}"), None).await;
    }

    let res = reqwest::get(format!("{}/events?limit=2&page=3", srv.base_url))
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["total"], json!(5));
    assert_eq!(body["pagination"]["pages"], json!(3));
    assert_eq!(body["pagination"]["page"], json!(3));

    // Page beyond the last: empty items, same metadata.
    let res = reqwest::get(format!("{}/events?limit=2&page=9", srv.base_url))
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["pages"], json!(3));
}

// -------------------------
// Degraded mode
// -------------------------

#[tokio::test]
async fn degraded_mode_serves_samples_only_where_allowed() {
    let srv = TestServer::spawn(Store::unavailable()).await;
    let client = reqwest::Client::new();

    // Demo login never touches the store.
    let student = demo_token(&client, &srv.base_url, "student").await;

    // The three read-heavy lists degrade to the fixed dataset.
    for path in ["/events", "/assignments", "/notifications"] {
        let res = client
            .get(format!("{}{path}", srv.base_url))
            .bearer_auth(&student)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{path} should degrade");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["degraded"], json!(true), "{path} should flag degraded");
        assert!(!body["items"].as_array().unwrap().is_empty());
    }

    // Everything else reports the outage.
    let res = client
        .get(format!("{}/courses", srv.base_url))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({"name": "A", "email": "a@x.edu", "password": "password123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    // Non-demo login cannot verify credentials without the store.
    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({"email": "real@x.edu", "password": "password123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    // Degradation never masks authorization: student course creation is
    // still forbidden, not degraded.
    let res = client
        .post(format!("{}/courses", srv.base_url))
        .bearer_auth(&student)
        .json(&json!({"code": "cs-1", "title": "T", "description": "D"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}
