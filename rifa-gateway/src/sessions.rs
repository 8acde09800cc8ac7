//! In-memory admin session registry.
//!
//! A successful login mints an opaque token; privileged requests present it
//! as a `Bearer` token and logout removes it. Tokens do not expire.

use std::{collections::HashMap, sync::RwLock, time::Instant};

use axum::http::{header, HeaderMap};
use uuid::Uuid;

/// Thread-safe registry of live admin tokens.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    tokens: RwLock<HashMap<Uuid, Instant>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new admin token. Password verification is the caller's job.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned (a previous thread
    /// panicked while holding the write lock).
    pub fn login(&self) -> Uuid {
        let token = Uuid::new_v4();
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.tokens
            .write()
            .expect("session registry write lock poisoned")
            .insert(token, Instant::now());
        token
    }

    /// Remove a token. Returns `true` if it was live.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn logout(&self, token: Uuid) -> bool {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let removed = self
            .tokens
            .write()
            .expect("session registry write lock poisoned")
            .remove(&token);
        removed.is_some()
    }

    /// Return `true` if `token` identifies a live admin session.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn is_admin(&self, token: Uuid) -> bool {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let tokens = self.tokens.read().expect("session registry read lock poisoned");
        tokens.contains_key(&token)
    }
}

/// Extract the admin token from an `Authorization: Bearer <uuid>` header.
///
/// Returns `None` for a missing header, a non-bearer scheme, or a value
/// that is not a UUID.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| Uuid::parse_str(token.trim()).ok())
}
