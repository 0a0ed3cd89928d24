//! # Access Tokens
//!
//! Opaque bearer tokens of the form `<account_id>.<secret>`.
//!
//! The secret is a random v4 UUID rendered without hyphens. Only its BLAKE3
//! digest is persisted on the account; the plain token is shown once, at
//! registration. Digest comparison is left to the caller so it can be done
//! in constant time.

use crate::types::AccountId;

/// A freshly issued token and the digest to store.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Full bearer token handed to the client.
    pub token: String,
    /// BLAKE3 digest of the secret part.
    pub digest: [u8; 32],
}

/// Issue a new token for `account`.
#[must_use]
pub fn issue(account: AccountId) -> IssuedToken {
    let secret = uuid::Uuid::new_v4().simple().to_string();
    IssuedToken {
        token: format!("{}.{}", account.0, secret),
        digest: digest(&secret),
    }
}

/// Split a bearer token into its account id and secret.
///
/// Returns `None` for anything that is not `<u64>.<non-empty secret>`.
#[must_use]
pub fn parse(token: &str) -> Option<(AccountId, &str)> {
    let (id, secret) = token.split_once('.')?;
    if secret.is_empty() {
        return None;
    }
    let id = id.parse::<u64>().ok()?;
    Some((AccountId(id), secret))
}

/// BLAKE3 digest of a token secret.
#[must_use]
pub fn digest(secret: &str) -> [u8; 32] {
    *blake3::hash(secret.as_bytes()).as_bytes()
}
