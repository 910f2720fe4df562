//! Implements a struct that holds the state of the API server.

use std::sync::{Arc, Mutex};

use jsonwebtoken::{DecodingKey, EncodingKey};
use rusqlite::Connection;

use crate::{Error, db::initialize, pagination::PaginationConfig};

/// The signing and verification keys for session tokens.
#[derive(Clone)]
pub(crate) struct TokenKeys {
    /// The key for signing new session tokens.
    pub encoding_key: EncodingKey,
    /// The key for verifying session token signatures.
    pub decoding_key: DecodingKey,
}

impl TokenKeys {
    /// Derive both keys from a shared `secret`.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }
}

/// The state of the API server.
#[derive(Clone)]
pub struct AppState {
    pub(crate) token_keys: TokenKeys,

    /// The config that controls how to page lists of data.
    pub pagination_config: PaginationConfig,

    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the
    /// domain models. `token_secret` is used to sign and verify session tokens.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        token_secret: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            token_keys: TokenKeys::from_secret(token_secret),
            pagination_config,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
