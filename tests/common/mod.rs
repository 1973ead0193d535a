// tests/common/mod.rs
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, State},
    http::{Request, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, post},
};
use recruit_admin::{
    api::HttpRecruitingApi,
    config::Config,
    session::Session,
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

pub const TOKEN: &str = "test-admin-token";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "secret";

/// One request seen by the fake API.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: String,
    pub path: String,
    pub body: Value,
    /// Answered by an injected fault instead of the handler.
    pub faulted: bool,
}

impl Call {
    pub fn route(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

struct Fault {
    path: String,
    successes_left: usize,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<Call>,
    tests: Vec<Value>,
    next_id: i64,
    fault: Option<Fault>,
}

/// In-memory stand-in for the Recruiting API admin endpoints.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// `"METHOD /path"` of every request, in arrival order.
    pub fn routes(&self) -> Vec<String> {
        self.calls().iter().map(Call::route).collect()
    }

    /// Lets `successes` requests to `path` through, then answers 500.
    pub fn fail_after(&self, path: &str, successes: usize) {
        self.state.lock().unwrap().fault = Some(Fault {
            path: path.to_string(),
            successes_left: successes,
        });
    }

    pub fn seed_tests(&self, count: usize) {
        for i in 0..count {
            let title = format!("Seeded {} {}", i + 1, &uuid::Uuid::new_v4().to_string()[..8]);
            self.insert_test(&json!({
                "title": title,
                "tech_field": "Rust",
                "description": "seeded",
            }));
        }
    }

    /// Row as older backend data has it: no title.
    pub fn seed_untitled_test(&self) {
        self.insert_test(&json!({ "tech_field": "Rust", "description": "legacy" }));
    }

    pub fn test_count(&self) -> usize {
        self.state.lock().unwrap().tests.len()
    }

    fn next_id(&self) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        state.next_id
    }

    fn insert_test(&self, body: &Value) -> Value {
        let id = self.next_id();
        let row = json!({
            "id": id,
            "title": body["title"],
            "tech_field": body["tech_field"],
            "description": body["description"],
            "created_at": "2026-01-01T09:30:00",
            "updated_at": "2026-01-01T09:30:00",
        });
        self.state.lock().unwrap().tests.push(row.clone());
        row
    }
}

pub struct TestApp {
    pub address: String,
    pub fake: FakeApi,
}

impl TestApp {
    pub fn config(&self) -> Config {
        Config::for_base_url(&self.address).expect("Invalid test address")
    }

    pub fn admin_api(&self) -> HttpRecruitingApi {
        self.api_for(Session::admin(TOKEN))
    }

    pub fn api_with_token(&self, token: &str) -> HttpRecruitingApi {
        self.api_for(Session::admin(token))
    }

    pub fn api_for(&self, session: Session) -> HttpRecruitingApi {
        HttpRecruitingApi::new(&self.config(), session).expect("Failed to build client")
    }
}

/// Spawns the fake API on a random port.
pub async fn spawn_api() -> TestApp {
    let fake = FakeApi::default();

    let protected = Router::new()
        .route("/admin/tests", post(create_test).get(list_tests))
        .route("/admin/tests/{id}", delete(delete_test))
        .route("/admin/dsa-questions", post(create_child))
        .route("/admin/quiz-questions", post(create_child))
        .route("/admin/quiz-options", post(create_child))
        .route("/admin/interview-questions", post(create_child))
        .route_layer(middleware::from_fn(auth_middleware));

    let app = Router::new()
        .merge(protected)
        .route("/admin/login", post(login))
        .layer(middleware::from_fn_with_state(fake.clone(), record_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp { address, fake }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

async fn auth_middleware(req: Request<Body>, next: Next) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(TOKEN) => next.run(req).await,
        Some(_) => detail(StatusCode::UNAUTHORIZED, "Invalid token"),
        None => detail(StatusCode::UNAUTHORIZED, "Not authenticated"),
    }
}

/// Logs every request and applies the injected fault, if any.
async fn record_middleware(State(fake): State<FakeApi>, req: Request<Body>, next: Next) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(_) => return detail(StatusCode::BAD_REQUEST, "Unreadable body"),
    };
    let path = parts.uri.path().to_string();

    let faulted = {
        let mut state = fake.state.lock().unwrap();
        let faulted = match state.fault.as_mut() {
            Some(fault) if fault.path == path => {
                if fault.successes_left == 0 {
                    true
                } else {
                    fault.successes_left -= 1;
                    false
                }
            }
            _ => false,
        };
        state.calls.push(Call {
            method: parts.method.to_string(),
            path,
            body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
            faulted,
        });
        faulted
    };

    if faulted {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "Injected failure");
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == ADMIN_EMAIL && body["password"] == ADMIN_PASSWORD {
        Json(json!({ "access_token": TOKEN, "token_type": "bearer" })).into_response()
    } else {
        detail(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

async fn create_test(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Response {
    for field in ["title", "tech_field", "description"] {
        if body[field].as_str().is_none_or(str::is_empty) {
            return detail(StatusCode::UNPROCESSABLE_ENTITY, &format!("{} is required", field));
        }
    }
    (StatusCode::CREATED, Json(fake.insert_test(&body))).into_response()
}

async fn list_tests(State(fake): State<FakeApi>) -> Json<Vec<Value>> {
    Json(fake.state.lock().unwrap().tests.clone())
}

/// Answers a missing id with 200 and an `error` field, as the real backend does.
async fn delete_test(State(fake): State<FakeApi>, Path(id): Path<i64>) -> Json<Value> {
    let mut state = fake.state.lock().unwrap();
    let before = state.tests.len();
    state.tests.retain(|t| t["id"] != id);
    if state.tests.len() == before {
        Json(json!({ "error": "Test not found" }))
    } else {
        Json(json!({ "message": "Test deleted successfully" }))
    }
}

async fn create_child(State(fake): State<FakeApi>, Json(mut body): Json<Value>) -> Response {
    let id = fake.next_id();
    if let Some(object) = body.as_object_mut() {
        object.insert("id".to_string(), json!(id));
    }
    (StatusCode::CREATED, Json(body)).into_response()
}
