//! Issues and verifies the signed session tokens that prove a user's identity
//! between requests.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, user::UserID};

/// How long a session token remains valid after issuance.
///
/// There is no refresh or revocation: once issued, a token is good for the
/// full hour regardless of later credential changes.
pub(crate) const TOKEN_DURATION: Duration = Duration::hours(1);

/// The contents of a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The expiry time of the token as a unix timestamp.
    pub exp: usize,
    /// The time the token was issued as a unix timestamp.
    pub iat: usize,
    /// The ID of the user the token was issued to.
    pub user_id: UserID,
}

/// Create a signed session token asserting `user_id`, expiring
/// [TOKEN_DURATION] from now.
///
/// # Errors
///
/// Returns [Error::TokenCreation] if the token could not be signed.
pub(crate) fn encode_token(
    user_id: UserID,
    encoding_key: &EncodingKey,
) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        exp: (now + TOKEN_DURATION).unix_timestamp() as usize,
        iat: now.unix_timestamp() as usize,
        user_id,
    };

    encode(&Header::default(), &claims, encoding_key).map_err(|error| {
        tracing::error!("Error encoding session token: {error}");
        Error::TokenCreation
    })
}

/// Check the signature and expiry of `token` and return the user ID it asserts.
///
/// # Errors
///
/// Returns [Error::InvalidToken] for a bad signature, a malformed payload, or
/// an expired token. The caller cannot tell these apart.
pub(crate) fn decode_token(token: &str, decoding_key: &DecodingKey) -> Result<UserID, Error> {
    decode::<Claims>(token, decoding_key, &Validation::default())
        .map(|token_data| token_data.claims.user_id)
        .map_err(|_| Error::InvalidToken)
}
