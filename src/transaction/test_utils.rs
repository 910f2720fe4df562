//! Shared helpers for the transaction endpoint tests.

use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_test::TestServer;
use jsonwebtoken::DecodingKey;
use serde_json::json;

use crate::{
    auth::{COOKIE_TOKEN, decode_token},
    user::UserID,
};

/// The token secret every endpoint test server is created with.
pub(crate) const TEST_SECRET: &str = "foobar";

/// A logged-in test user: the session cookie plus the user's ID.
pub(crate) struct TestSession {
    /// The session token cookie returned at log-in.
    pub cookie: Cookie<'static>,
    /// The ID the server assigned to the user.
    pub user_id: UserID,
}

/// Register `name` with a fixed password, log them in, and hand back the
/// session.
pub(crate) async fn create_user_and_log_in(server: &TestServer, name: &str) -> TestSession {
    server
        .post("/api/auth/register")
        .json(&json!({
            "name": name,
            "password": "hunter2",
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "name": name,
            "password": "hunter2",
        }))
        .await;

    response.assert_status_ok();

    let cookie = response.cookie(COOKIE_TOKEN);
    let user_id = decode_token(
        cookie.value(),
        &DecodingKey::from_secret(TEST_SECRET.as_ref()),
    )
    .expect("Could not decode the session token issued at log-in");

    TestSession { cookie, user_id }
}
