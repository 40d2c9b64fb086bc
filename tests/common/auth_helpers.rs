//! Authentication test helpers
//!
//! Register accounts through the public API and attach their tokens to
//! requests.

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use devconnect::backend::middleware::AUTH_HEADER;
use serde_json::{json, Value};

/// Registered account
pub struct TestUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Attach `token` as the session header
pub fn authed(request: TestRequest, token: &str) -> TestRequest {
    request.add_header(
        HeaderName::from_static(AUTH_HEADER),
        HeaderValue::from_str(token).expect("token is a valid header value"),
    )
}

/// Register a user and resolve its id
pub async fn register_user(server: &TestServer, name: &str, email: &str, password: &str) -> TestUser {
    let response = server
        .post("/api/users")
        .json(&json!({ "name": name, "email": email, "password": password }))
        .await;
    response.assert_status_ok();
    let token = response.json::<Value>()["token"]
        .as_str()
        .expect("token in response")
        .to_string();

    let me = authed(server.get("/api/auth"), &token).await;
    me.assert_status_ok();
    let id = me.json::<Value>()["id"].as_str().expect("id").to_string();

    TestUser {
        id,
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        token,
    }
}

/// Register a user with a unique email
pub async fn create_unique_test_user(server: &TestServer, name: &str) -> TestUser {
    let email = format!("test_{}@example.com", uuid::Uuid::new_v4().simple());
    register_user(server, name, &email, "test_password_123").await
}

/// Create the minimal valid profile for `user`
pub async fn create_profile(server: &TestServer, user: &TestUser) -> Value {
    let response = authed(server.post("/api/profile"), &user.token)
        .json(&json!({ "status": "Developer", "skills": "rust, sql" }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

/// Create a post as `user`, returning its id
pub async fn create_post(server: &TestServer, user: &TestUser, text: &str) -> String {
    let response = authed(server.post("/api/posts"), &user.token)
        .json(&json!({ "text": text }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["id"].as_str().expect("post id").to_string()
}
