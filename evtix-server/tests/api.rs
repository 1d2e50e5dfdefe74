use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use evtix_core::config::{AuthConfig, BookingConfig, ServerConfig, SharedConfig};
use evtix_core::entities::UserRole;
use evtix_core::entities::user::{InsertUser, User};
use evtix_core::store::{MemoryTicketStore, TicketStore};
use evtix_sdk::objects::ws::WsServerMessage;
use evtix_sdk::token::SessionToken;
use evtix_server::server::build_router;
use evtix_server::state::AppState;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &[u8] = b"integration-secret";

struct TestApp {
    router: Router,
    store: Arc<MemoryTicketStore>,
    state: AppState,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(MemoryTicketStore::new());
        let config = SharedConfig::new(
            ServerConfig {
                listen: SocketAddr::from(([127, 0, 0, 1], 0)),
                allowed_origins: Vec::new(),
            },
            AuthConfig::new(SECRET.to_vec(), 3600),
            BookingConfig::default(),
        );
        let state = AppState::new(store.clone(), config);
        let router = build_router(state.clone(), &[]);
        Self {
            router,
            store,
            state,
        }
    }

    /// Insert a user directly and sign a token for them.
    async fn user(&self, email: &str, role: UserRole) -> (User, String) {
        let user = self
            .store
            .insert_user(InsertUser {
                name: email.split('@').next().unwrap_or(email).to_string(),
                email: email.to_string(),
                password_hash: "unused".to_string(),
                role,
            })
            .await
            .unwrap();
        let token = SessionToken::new(user.id, 3600).sign(SECRET);
        (user, token)
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn create_event(&self, token: &str, price: i64, ticket_limit: i32) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/events",
                Some(token),
                Some(json!({
                    "title": "Rust Conf",
                    "description": "Two days of talks",
                    "category": "Technology",
                    "location": "Lisbon",
                    "date": "2026-12-03",
                    "time": "09:00",
                    "price": price,
                    "ticketLimit": ticket_limit
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }
}

#[tokio::test]
async fn health_reports_version() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn register_login_and_me() {
    let app = TestApp::new();
    let (status, registered) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Grace",
                "email": "Grace@Example.com",
                "password": "correct-horse",
                "role": "organizer"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{registered}");
    assert_eq!(registered["user"]["email"], "grace@example.com");
    assert_eq!(registered["user"]["role"], "organizer");

    let (status, duplicate) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Grace again",
                "email": "grace@example.com",
                "password": "correct-horse"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(duplicate["message"].is_string());

    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "grace@example.com", "password": "wrong-horse"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, session) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "grace@example.com", "password": "correct-horse"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = session["token"].as_str().unwrap();

    let (status, me) = app.send(Method::GET, "/api/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], registered["user"]["id"]);
}

#[tokio::test]
async fn admin_cannot_self_register() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Root",
                "email": "root@example.com",
                "password": "secret-pass",
                "role": "admin"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());

    let (status, _) = app
        .send(Method::GET, "/api/auth/me", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = SessionToken::new(Uuid::now_v7(), 3600).sign(b"wrong-secret");
    let (status, _) = app
        .send(Method::GET, "/api/bookings/my-bookings", Some(&forged), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn event_lifecycle_and_permissions() {
    let app = TestApp::new();
    let (organizer, org_token) = app.user("olga@example.com", UserRole::Organizer).await;
    let (_, rival_token) = app.user("rita@example.com", UserRole::Organizer).await;
    let (_, user_token) = app.user("uma@example.com", UserRole::User).await;

    let (status, _) = app
        .send(
            Method::POST,
            "/api/events",
            Some(&user_token),
            Some(json!({
                "title": "x", "description": "y", "category": "Music",
                "location": "z", "date": "2026-12-03", "time": "noon", "ticketLimit": 5
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let event = app.create_event(&org_token, 40, 100).await;
    let id = event["id"].as_str().unwrap().to_string();
    assert_eq!(event["soldTickets"], 0);
    assert_eq!(event["remainingTickets"], 100);
    assert_eq!(event["organizer"], organizer.id.to_string());

    let (status, detail) = app
        .send(Method::GET, &format!("/api/events/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["organizer"]["email"], "olga@example.com");

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/events/{id}"),
            Some(&rival_token),
            Some(json!({"title": "Hijacked"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app
        .send(Method::DELETE, &format!("/api/events/{id}"), Some(&rival_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = app
        .send(
            Method::PUT,
            &format!("/api/events/{id}"),
            Some(&org_token),
            Some(json!({"title": "Rust Conf 2026", "soldTickets": 99})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Rust Conf 2026");
    assert_eq!(updated["soldTickets"], 0);

    let (status, mine) = app
        .send(Method::GET, "/api/events/my-events", Some(&rival_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().map(Vec::len), Some(0));

    let (status, deleted) = app
        .send(Method::DELETE, &format!("/api/events/{id}"), Some(&org_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], id.as_str());

    let (status, _) = app
        .send(Method::GET, &format!("/api/events/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn booking_flow() {
    let app = TestApp::new();
    let (_, org_token) = app.user("olga@example.com", UserRole::Organizer).await;
    let (_, user_token) = app.user("uma@example.com", UserRole::User).await;
    let event = app.create_event(&org_token, 250, 5).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    let (status, booking) = app
        .send(
            Method::POST,
            "/api/bookings",
            Some(&user_token),
            Some(json!({"eventId": event_id, "tickets": 3})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{booking}");
    assert_eq!(booking["totalAmount"], "750");
    assert_eq!(booking["status"], "confirmed");
    assert_eq!(booking["event"], event_id.as_str());

    let (status, refused) = app
        .send(
            Method::POST,
            "/api/bookings",
            Some(&user_token),
            Some(json!({"eventId": event_id, "tickets": 3})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(refused["message"].as_str().unwrap().contains('2'));

    for tickets in [0, -2] {
        let (status, _) = app
            .send(
                Method::POST,
                "/api/bookings",
                Some(&user_token),
                Some(json!({"eventId": event_id, "tickets": tickets})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = app
        .send(
            Method::POST,
            "/api/bookings",
            Some(&user_token),
            Some(json!({"eventId": Uuid::now_v7(), "tickets": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/bookings",
            Some(&org_token),
            Some(json!({"eventId": event_id, "tickets": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, event) = app
        .send(Method::GET, &format!("/api/events/{event_id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(event["soldTickets"], 3);
    assert_eq!(event["remainingTickets"], 2);
}

#[tokio::test]
async fn my_bookings_survive_event_deletion() {
    let app = TestApp::new();
    let (_, org_token) = app.user("olga@example.com", UserRole::Organizer).await;
    let (_, user_token) = app.user("uma@example.com", UserRole::User).await;
    let event = app.create_event(&org_token, 10, 5).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .send(
            Method::POST,
            "/api/bookings",
            Some(&user_token),
            Some(json!({"eventId": event_id, "tickets": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, listed) = app
        .send(Method::GET, "/api/bookings/my-bookings", Some(&user_token), None)
        .await;
    assert_eq!(listed[0]["event"]["title"], "Rust Conf");

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/events/{event_id}"),
            Some(&org_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, listed) = app
        .send(Method::GET, "/api/bookings/my-bookings", Some(&user_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert!(listed[0]["event"].is_null());
}

#[tokio::test]
async fn organizer_stats_shape() {
    let app = TestApp::new();
    let (_, org_token) = app.user("olga@example.com", UserRole::Organizer).await;
    let (_, user_token) = app.user("uma@example.com", UserRole::User).await;

    let (status, empty) = app
        .send(Method::GET, "/api/bookings/organizer-stats", Some(&org_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["salesVolume"].as_array().map(Vec::len), Some(30));
    assert_eq!(empty["categoryDistribution"], json!([]));

    let event = app.create_event(&org_token, 20, 10).await;
    let (status, _) = app
        .send(
            Method::POST,
            "/api/bookings",
            Some(&user_token),
            Some(json!({"eventId": event["id"], "tickets": 2})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, stats) = app
        .send(Method::GET, "/api/bookings/organizer-stats", Some(&org_token), None)
        .await;
    let days = stats["salesVolume"].as_array().unwrap();
    assert_eq!(days.len(), 30);
    assert_eq!(days[29]["amount"], "40");
    assert_eq!(
        stats["categoryDistribution"],
        json!([{"category": "Technology", "count": 2}])
    );

    let (status, _) = app
        .send(Method::GET, "/api/bookings/organizer-stats", Some(&user_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn successful_booking_reaches_ws_subscribers() {
    let app = TestApp::new();
    let (_, org_token) = app.user("olga@example.com", UserRole::Organizer).await;
    let (_, user_token) = app.user("uma@example.com", UserRole::User).await;
    let event = app.create_event(&org_token, 5, 4).await;
    let event_id: Uuid = event["id"].as_str().unwrap().parse().unwrap();
    let mut updates = app.state.notifier.subscribe();

    let (status, _) = app
        .send(
            Method::POST,
            "/api/bookings",
            Some(&user_token),
            Some(json!({"eventId": event_id, "tickets": 4})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let update = updates.recv().await.unwrap();
    let frame = serde_json::to_value(WsServerMessage::from(update)).unwrap();
    assert_eq!(
        frame,
        json!({
            "type": "update_seats",
            "eventId": event_id,
            "soldTickets": 4,
            "remainingTickets": 0
        })
    );

    let (status, _) = app
        .send(
            Method::POST,
            "/api/bookings",
            Some(&user_token),
            Some(json!({"eventId": event_id, "tickets": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(updates.try_recv().is_err());
}

#[tokio::test]
async fn malformed_requests_are_json_validation_errors() {
    let app = TestApp::new();
    let (_, attendee) = app.user("ada@example.com", UserRole::User).await;
    let (_, organizer) = app.user("olga@example.com", UserRole::Organizer).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/bookings",
            Some(&attendee),
            Some(json!({ "eventId": "nope", "tickets": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string(), "{body}");

    let event = app.create_event(&organizer, 10, 5).await;
    let (status, body) = app
        .send(
            Method::POST,
            "/api/bookings",
            Some(&attendee),
            Some(json!({ "eventId": event["id"], "tickets": 1.5 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string(), "{body}");

    let (status, body) = app
        .send(Method::GET, "/api/events/not-a-uuid", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string(), "{body}");

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/events/not-a-uuid",
            Some(&organizer),
            Some(json!({ "title": "Renamed" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string(), "{body}");
}
