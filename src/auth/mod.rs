//! User authentication: session tokens, the session cookie, the access gate
//! middleware, and the registration and log-in endpoints.

mod cookie;
mod log_in;
mod middleware;
mod password;
mod register;
mod token;

pub use log_in::{Credentials, LoginResponse, post_log_in};
pub use middleware::{AuthState, auth_guard};
pub use password::PasswordHash;
pub use register::{RegisterData, register_user};
pub use token::Claims;

#[cfg(test)]
pub(crate) use cookie::COOKIE_TOKEN;

#[cfg(test)]
pub(crate) use token::decode_token;
