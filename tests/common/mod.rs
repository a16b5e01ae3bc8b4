#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use instructor_led::instructor_auth::Role;
use instructor_led::instructor_config::{CorsConfig, JwtConfig};
use instructor_led::instructor_core::password::hash_password_with_cost;
use instructor_led::instructor_db::Store;
use instructor_led::instructor_models::users::{NewUser, User};
use instructor_led::router::init_router;
use instructor_led::state::AppState;

pub const TEST_PASSWORD: &str = "testpass123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new("instructor-led", "test_secret_key_for_testing_purposes", 24)
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn store(&self) -> &Store {
        &self.state.store
    }

    pub fn token_for(&self, user: &User) -> String {
        self.state.tokens.issue(user.id, user.role).unwrap()
    }

    /// Sends one request and decodes the JSON body (`Null` when there is none).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, body)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }
}

pub fn setup_test_app() -> TestApp {
    let state = AppState::new(Store::in_memory(), &test_jwt_config(), CorsConfig::default());
    TestApp {
        router: init_router(state.clone()),
        state,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

/// Inserts a user with [`TEST_PASSWORD`], hashed at the lowest bcrypt cost.
pub async fn create_test_user(store: &Store, email: &str, role: Role) -> User {
    store
        .users
        .create(NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password: hash_password_with_cost(TEST_PASSWORD, 4).unwrap(),
            role,
        })
        .await
        .unwrap()
}

/// Creates a user with a fresh email and returns it with a token.
pub async fn login_as(app: &TestApp, role: Role) -> (User, String) {
    let user = create_test_user(app.store(), &generate_unique_email(), role).await;
    let token = app.token_for(&user);
    (user, token)
}
