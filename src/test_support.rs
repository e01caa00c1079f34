use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
    app::build_app,
    auth::session::SessionKeys,
    memory::{MemoryRecipeStore, MemoryUserStore},
    state::AppState,
};

/// Router over in-memory stores, with the stores kept for assertions.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub users: Arc<MemoryUserStore>,
    pub recipes: Arc<MemoryRecipeStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    /// `name=value` pair of the `Set-Cookie` header, if one was sent.
    pub cookie: Option<String>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(MemoryUserStore::default());
        let recipes = Arc::new(MemoryRecipeStore::new(users.clone()));
        let state = AppState::fake(users.clone(), recipes.clone());
        let router = build_app(state.clone());
        Self {
            router,
            state,
            users,
            recipes,
        }
    }

    /// Signs up and returns the session cookie pair.
    pub async fn signup(&self, username: &str, password: &str) -> String {
        let res = call(
            self,
            json_request(
                "POST",
                "/signup",
                None,
                json!({"username": username, "password": password}),
            ),
        )
        .await;
        assert_eq!(res.status, StatusCode::CREATED);
        res.cookie.expect("signup sets a session cookie")
    }

    /// Validly signed session cookie for a user id that was never stored.
    pub fn orphan_cookie(&self) -> String {
        let keys = SessionKeys::from(&self.state.config.session);
        let set = keys.set_cookie(Uuid::new_v4()).unwrap();
        cookie_from(set.to_str().unwrap())
    }
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = if body.is_null() {
        Body::empty()
    } else {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(body.to_string())
    };
    builder.body(body).unwrap()
}

pub fn cookie_from(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or("").trim().to_string()
}

pub async fn call(app: &TestApp, req: Request<Body>) -> TestResponse {
    let res = app.router.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(cookie_from);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    TestResponse {
        status,
        body,
        cookie,
    }
}
