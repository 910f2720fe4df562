//! Defines functions for carrying the session token in a cookie.

use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};

use crate::Error;

/// The name of the cookie holding the session token.
pub(crate) const COOKIE_TOKEN: &str = "session_token";

/// Add the session token cookie to the cookie jar, indicating that a user is
/// logged in and authenticated.
///
/// The cookie carries no expiry attribute of its own: the token embeds its
/// expiry, and verification rejects the token once that passes.
///
/// Returns the cookie jar with the cookie added.
pub(crate) fn set_session_cookie(jar: CookieJar, token: String) -> CookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict),
    )
}

/// Get the session token from the cookie jar.
///
/// # Errors
///
/// Returns [Error::NoToken] if the session cookie is not in the jar.
pub(crate) fn get_token_from_cookies(jar: &CookieJar) -> Result<String, Error> {
    jar.get(COOKIE_TOKEN)
        .map(|cookie| cookie.value_trimmed().to_owned())
        .ok_or(Error::NoToken)
}
