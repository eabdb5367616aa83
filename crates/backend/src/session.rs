//! Epoch-guarded session state.
//!
//! The store does no I/O. Callers start a profile fetch with the ticket
//! returned by [`SessionStore::begin`] and hand the result to
//! [`SessionStore::complete`]; results for an identity that has since been
//! replaced are dropped.

use shared_types::{Identity, Profile, SessionSnapshot};

/// Proof that a profile fetch was started for a particular epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
    user_id: String,
}

impl FetchTicket {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug)]
pub struct SessionStore {
    identity: Option<Identity>,
    profile: Option<Profile>,
    loading: bool,
    epoch: u64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Empty store at process start, still loading.
    pub fn new() -> Self {
        Self {
            identity: None,
            profile: None,
            loading: true,
            epoch: 0,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            identity: self.identity.clone(),
            profile: self.profile.clone(),
            loading: self.loading,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Replace the identity.
    ///
    /// `None` clears the session and resolves loading. A different user drops
    /// the old profile and goes back to loading; the same user keeps the
    /// current profile visible while it is re-fetched. Any in-flight fetch is
    /// invalidated either way.
    pub fn begin(&mut self, identity: Option<Identity>) -> Option<FetchTicket> {
        self.epoch += 1;
        let Some(identity) = identity else {
            self.identity = None;
            self.profile = None;
            self.loading = false;
            return None;
        };

        let same_user = self.identity.as_ref().is_some_and(|cur| cur.id == identity.id);
        if !same_user {
            self.profile = None;
        }
        self.loading = self.profile.is_none();

        let ticket = FetchTicket {
            epoch: self.epoch,
            user_id: identity.id.clone(),
        };
        self.identity = Some(identity);
        Some(ticket)
    }

    /// Apply a profile fetch result. Returns false when the ticket is stale
    /// and the result was discarded.
    pub fn complete<E>(&mut self, ticket: &FetchTicket, result: Result<Profile, E>) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.profile = result.ok();
        self.loading = false;
        true
    }
}
