//! Persistence seam for the Supabase session tokens.

use crate::lock;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Tokens issued by `/auth/v1/token`, kept across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds after which the access token is rejected.
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl StoredSession {
    /// True when the access token expires within `margin_secs` of `now`.
    /// A session without an expiry never counts as expiring.
    pub fn expires_within(&self, now: i64, margin_secs: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at - margin_secs <= now)
    }
}

/// Where the adapter keeps its tokens between runs.
#[async_trait(?Send)]
pub trait SessionStorage {
    async fn load(&self) -> Option<StoredSession>;
    async fn save(&self, session: &StoredSession);
    async fn clear(&self);
}

/// Process-local storage. Clones share the same slot, so a second adapter
/// built on a clone sees what the first one saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<StoredSession>>>,
}

impl MemoryStorage {
    pub fn seeded(session: StoredSession) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(session))),
        }
    }

    pub fn current(&self) -> Option<StoredSession> {
        lock(&self.slot).clone()
    }
}

#[async_trait(?Send)]
impl SessionStorage for MemoryStorage {
    async fn load(&self) -> Option<StoredSession> {
        self.current()
    }

    async fn save(&self, session: &StoredSession) {
        *lock(&self.slot) = Some(session.clone());
    }

    async fn clear(&self) {
        lock(&self.slot).take();
    }
}
