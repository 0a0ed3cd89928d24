//! # Authentication Module
//!
//! Per-account bearer tokens for the LifeOS HTTP API.
//!
//! ## Usage
//!
//! `POST /api/auth/register` returns a token of the form
//! `<account_id>.<secret>`. Send it on every other `/api` request:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! Only a BLAKE3 digest of the secret is stored; the presented secret is
//! hashed and compared against it in constant time.

use super::AppState;
use super::error::ApiError;
use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use lifeos_core::{AccountId, LifeError, RedbStore, credentials};
use subtle::ConstantTimeEq;

// =============================================================================
// TOKEN VERIFICATION
// =============================================================================

/// Resolve a presented token to its account.
///
/// Returns `Ok(None)` for malformed tokens, unknown accounts and wrong
/// secrets alike. Storage failures are passed through.
pub fn authenticate(store: &RedbStore, token: &str) -> Result<Option<AccountId>, LifeError> {
    let Some((id, secret)) = credentials::parse(token) else {
        return Ok(None);
    };

    let account = match store.read(|r| r.account(id)) {
        Ok(account) => account,
        Err(LifeError::NotFound { .. }) => return Ok(None),
        Err(err) => return Err(err),
    };

    let presented = credentials::digest(secret);
    let matches: bool = presented.ct_eq(&account.token_hash).into();
    Ok(matches.then_some(id))
}

/// Bearer token middleware for the `/api` routes.
///
/// On success the caller's `AccountId` is inserted into the request
/// extensions for handlers to pick up.
pub async fn require_account(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(header_value) = auth_header else {
        tracing::warn!(
            event = "auth_failure",
            reason = "missing_authorization_header",
            "Missing Authorization header"
        );
        return Err(ApiError(LifeError::Unauthorized));
    };

    let token = header_value.strip_prefix("Bearer ").unwrap_or(header_value);
    match authenticate(&state.store, token.trim())? {
        Some(account) => {
            request.extensions_mut().insert(account);
            Ok(next.run(request).await)
        }
        None => {
            tracing::warn!(
                event = "auth_failure",
                reason = "invalid_token",
                "Authentication failed: invalid token"
            );
            Err(ApiError(LifeError::Unauthorized))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use lifeos_core::Clock;
    use lifeos_core::services::register;

    #[test]
    fn issued_token_authenticates() {
        let store = RedbStore::in_memory().expect("store");
        let registration = register(&store, &Clock::System, "Ada", "ada@example.com")
            .expect("register");

        let account = authenticate(&store, &registration.token).expect("lookup");
        assert_eq!(account, Some(registration.account.id));
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let store = RedbStore::in_memory().expect("store");
        let registration = register(&store, &Clock::System, "Ada", "ada@example.com")
            .expect("register");
        let id = registration.account.id;

        for token in [
            format!("{id}.not-the-secret"),
            format!("{}.{}", id.0 + 1, "whatever"),
            "garbage".to_string(),
            String::new(),
        ] {
            assert_eq!(authenticate(&store, &token).expect("lookup"), None, "{token}");
        }
    }
}
