//! Contract with the external authentication backend.

use crate::error::BackendResult;
use crate::lock;
use async_trait::async_trait;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::stream::{FusedStream, Stream};
use shared_types::{Identity, ProfileRecord, Role, SignUpRequest, UserSummary};
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, Mutex, Weak};
use std::task::{Context, Poll};

/// Backend-pushed change to the authentication state.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(Identity),
    SignedOut,
    TokenRefreshed(Identity),
}

impl AuthEvent {
    /// Identity carried by the event; `None` means nobody is signed in.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthEvent::SignedIn(i) | AuthEvent::TokenRefreshed(i) => Some(i),
            AuthEvent::SignedOut => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AuthEvent::SignedIn(_) => "SIGNED_IN",
            AuthEvent::SignedOut => "SIGNED_OUT",
            AuthEvent::TokenRefreshed(_) => "TOKEN_REFRESHED",
        }
    }
}

/// Everything the session layer needs from the identity provider and the
/// `profiles` / `user_roles` tables.
///
/// Futures are not `Send`: the browser HTTP client is single-threaded.
#[async_trait(?Send)]
pub trait AuthBackend {
    /// Session persisted by the backend, if any.
    async fn get_session(&self) -> BackendResult<Option<Identity>>;

    /// Register for auth-state notifications. Dropping the subscription
    /// unregisters it.
    fn subscribe(&self) -> Subscription;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Identity>;

    /// Create an account. The new user is not signed in.
    async fn sign_up(&self, request: &SignUpRequest) -> BackendResult<Identity>;

    async fn sign_out(&self) -> BackendResult<()>;

    async fn fetch_profile(&self, user_id: &str) -> BackendResult<ProfileRecord>;

    /// Raw role string from `user_roles`; `None` when the user has no row.
    async fn fetch_user_role(&self, user_id: &str) -> BackendResult<Option<String>>;

    async fn verify_email(&self, token: &str) -> BackendResult<()>;

    async fn resend_verification(&self, email: &str) -> BackendResult<()>;

    async fn list_users(&self) -> BackendResult<Vec<UserSummary>>;

    async fn update_user_role(&self, user_id: &str, role: Role) -> BackendResult<()>;
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    senders: HashMap<u64, UnboundedSender<AuthEvent>>,
}

/// Fan-out of auth events to live subscriptions.
#[derive(Clone, Default)]
pub struct AuthEventHub {
    inner: Arc<Mutex<HubInner>>,
}

impl AuthEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded();
        let id = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.senders.insert(id, tx);
            id
        };
        tracing::debug!(subscription = id, "auth subscription registered");
        Subscription {
            id,
            receiver: rx,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every subscriber, pruning closed ones.
    pub fn emit(&self, event: AuthEvent) {
        let mut inner = lock(&self.inner);
        tracing::debug!(event = event.name(), subscribers = inner.senders.len(), "auth event");
        inner
            .senders
            .retain(|_, tx| tx.unbounded_send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).senders.len()
    }
}

/// Live registration for auth events, consumed as a [`Stream`].
pub struct Subscription {
    id: u64,
    receiver: UnboundedReceiver<AuthEvent>,
    hub: Weak<Mutex<HubInner>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Explicit teardown; equivalent to dropping.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            lock(&hub).senders.remove(&self.id);
            tracing::debug!(subscription = self.id, "auth subscription removed");
        }
    }
}

impl Stream for Subscription {
    type Item = AuthEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().receiver).poll_next(cx)
    }
}

impl FusedStream for Subscription {
    fn is_terminated(&self) -> bool {
        self.receiver.is_terminated()
    }
}
