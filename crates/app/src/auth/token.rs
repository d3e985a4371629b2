//! Bearer token handling.
//!
//! The API token is kept in device storage and attached to every request as
//! `Authorization: Bearer <token>`.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroize;

use crate::storage::{AUTH_TOKEN_KEY, DeviceStorage, StorageError};

/// Errors from parsing or storing a bearer token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token was blank.
    #[error("bearer token is empty")]
    Empty,

    /// Token had whitespace inside it.
    #[error("bearer token contains whitespace")]
    Whitespace,

    /// Device storage failed.
    #[error("failed to access stored token")]
    Storage(#[from] StorageError),
}

/// An API bearer token.
///
/// The secret is zeroed on drop and never shown by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    secret: String,
}

impl BearerToken {
    /// Validate and wrap a raw token. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or contains inner whitespace.
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(TokenError::Empty);
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(TokenError::Whitespace);
        }

        Ok(Self {
            secret: trimmed.to_string(),
        })
    }

    /// The raw token, for the `Authorization` header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(**redacted**)")?;
        Ok(())
    }
}

impl Drop for BearerToken {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

/// Load the stored token, if any.
///
/// # Errors
///
/// Returns an error if storage cannot be read or the stored value is not a
/// valid token.
pub async fn load_token(storage: &dyn DeviceStorage) -> Result<Option<BearerToken>, TokenError> {
    match storage.get(AUTH_TOKEN_KEY).await? {
        Some(raw) => BearerToken::parse(&raw).map(Some),
        None => Ok(None),
    }
}

/// Persist `token` for later sessions.
///
/// # Errors
///
/// Returns an error if storage cannot be written.
pub async fn store_token(
    storage: &dyn DeviceStorage,
    token: &BearerToken,
) -> Result<(), TokenError> {
    storage.set(AUTH_TOKEN_KEY, token.expose()).await?;

    Ok(())
}

/// Forget the stored token.
///
/// # Errors
///
/// Returns an error if storage cannot be written.
pub async fn forget_token(storage: &dyn DeviceStorage) -> Result<(), TokenError> {
    storage.remove(AUTH_TOKEN_KEY).await?;

    Ok(())
}
