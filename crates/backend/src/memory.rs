//! In-process backend used for the demo mode and for tests.

use crate::backend::{AuthBackend, AuthEvent, AuthEventHub, Subscription};
use crate::error::{BackendError, BackendResult};
use crate::lock;
use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::{Map, Value};
use shared_types::{Identity, ProfileRecord, Role, SignUpRequest, UserSummary};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

pub const DEMO_PASSWORD: &str = "password123";

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    identity: Identity,
    password: String,
    profile: ProfileRecord,
    /// `user_roles` row; `None` when the user has none.
    role: Option<String>,
    verification_token: Option<String>,
}

#[derive(Default)]
struct MemoryState {
    accounts: Vec<Account>,
    current: Option<String>,
    offline: bool,
    failing_profiles: HashSet<String>,
    failing_roles: HashSet<String>,
    profile_gates: HashMap<String, VecDeque<oneshot::Receiver<()>>>,
}

impl MemoryState {
    fn find(&self, user_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.identity.id == user_id)
    }

    fn find_mut(&mut self, user_id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.identity.id == user_id)
    }

    fn find_by_email_mut(&mut self, email: &str) -> Option<&mut Account> {
        let email = email.trim();
        self.accounts
            .iter_mut()
            .find(|a| a.identity.email.eq_ignore_ascii_case(email))
    }

    fn ensure_online(&self) -> BackendResult<()> {
        if self.offline {
            return Err(BackendError::Network("backend unreachable".into()));
        }
        Ok(())
    }
}

/// Accounts, profiles and roles held in memory, with hooks for injecting
/// failures and holding profile fetches open.
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
    hub: AuthEventHub,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded with one verified account per role, all using [`DEMO_PASSWORD`].
    pub fn with_demo_accounts() -> Self {
        let backend = Self::new();
        for (id, email, name, role) in [
            ("demo-citizen", "citizen@example.com", "Budi Santoso", Role::Citizen),
            ("demo-secretary", "secretary@example.com", "Raden Ayu", Role::Secretary),
            ("demo-village-head", "villagehead@example.com", "Haji Soeharto", Role::VillageHead),
            ("demo-super-admin", "admin@example.com", "Admin Desa", Role::SuperAdmin),
        ] {
            backend.insert(id, email, DEMO_PASSWORD, name, Some(role.as_str()), true);
        }
        backend
    }

    fn insert(
        &self,
        id: &str,
        email: &str,
        password: &str,
        name: &str,
        role: Option<&str>,
        verified: bool,
    ) {
        let account = Account {
            identity: Identity {
                id: id.to_string(),
                email: email.to_string(),
                email_verified: verified,
            },
            password: password.to_string(),
            profile: ProfileRecord {
                id: id.to_string(),
                role: role.map(str::to_string),
                name: Some(name.to_string()),
                avatar_url: None,
                extra: Map::new(),
            },
            role: role.map(str::to_string),
            verification_token: (!verified).then(new_token),
        };
        lock(&self.state).accounts.push(account);
    }

    /// Add a verified account. `role` is stored verbatim in both the profile
    /// and the role table, so unrecognized strings can be exercised.
    pub fn add_account(&self, email: &str, password: &str, name: &str, role: Option<&str>) -> String {
        let id = format!("user-{}", uuid::Uuid::new_v4());
        self.insert(&id, email, password, name, role, true);
        id
    }

    /// Treat `user_id` as already signed in, as if a session were persisted.
    pub fn seed_session(&self, user_id: &str) {
        lock(&self.state).current = Some(user_id.to_string());
    }

    pub fn user_id_for(&self, email: &str) -> Option<String> {
        lock(&self.state)
            .find_by_email_mut(email)
            .map(|a| a.identity.id.clone())
    }

    pub fn fail_profile_fetch(&self, user_id: &str) {
        lock(&self.state).failing_profiles.insert(user_id.to_string());
    }

    pub fn fail_role_fetch(&self, user_id: &str) {
        lock(&self.state).failing_roles.insert(user_id.to_string());
    }

    /// Make the next profile fetch for `user_id` wait until the returned
    /// sender fires (or is dropped).
    pub fn hold_profile_fetch(&self, user_id: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        lock(&self.state)
            .profile_gates
            .entry(user_id.to_string())
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn set_offline(&self, offline: bool) {
        lock(&self.state).offline = offline;
    }

    /// Push an auth event as if the backend had raised it.
    pub fn emit(&self, event: AuthEvent) {
        self.hub.emit(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.hub.subscriber_count()
    }

    pub fn verification_token_for(&self, email: &str) -> Option<String> {
        lock(&self.state)
            .find_by_email_mut(email)
            .and_then(|a| a.verification_token.clone())
    }

    pub fn current_user(&self) -> Option<String> {
        lock(&self.state).current.clone()
    }
}

fn new_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[async_trait(?Send)]
impl AuthBackend for MemoryBackend {
    async fn get_session(&self) -> BackendResult<Option<Identity>> {
        let state = lock(&self.state);
        state.ensure_online()?;
        Ok(state
            .current
            .as_deref()
            .and_then(|id| state.find(id))
            .map(|a| a.identity.clone()))
    }

    fn subscribe(&self) -> Subscription {
        self.hub.subscribe()
    }

    #[tracing::instrument(skip(self, password))]
    async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Identity> {
        let identity = {
            let mut state = lock(&self.state);
            state.ensure_online()?;
            let account = state
                .find_by_email_mut(email)
                .filter(|a| a.password == password)
                .ok_or(BackendError::InvalidCredentials)?;
            if !account.identity.email_verified {
                return Err(BackendError::EmailNotConfirmed);
            }
            let identity = account.identity.clone();
            state.current = Some(identity.id.clone());
            identity
        };
        self.hub.emit(AuthEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    async fn sign_up(&self, request: &SignUpRequest) -> BackendResult<Identity> {
        {
            let mut state = lock(&self.state);
            state.ensure_online()?;
            if state.find_by_email_mut(&request.email).is_some() {
                return Err(BackendError::Http {
                    status: 422,
                    message: "User already registered".into(),
                });
            }
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BackendError::Http {
                status: 422,
                message: format!("Password should be at least {MIN_PASSWORD_LEN} characters"),
            });
        }

        let id = format!("user-{}", uuid::Uuid::new_v4());
        self.insert(
            &id,
            request.email.trim(),
            &request.password,
            &request.display_name,
            Some(Role::Citizen.as_str()),
            false,
        );
        tracing::info!(user_id = %id, "account created, awaiting verification");
        Ok(Identity {
            id,
            email: request.email.trim().to_string(),
            email_verified: false,
        })
    }

    async fn sign_out(&self) -> BackendResult<()> {
        {
            let mut state = lock(&self.state);
            state.ensure_online()?;
            state.current = None;
        }
        self.hub.emit(AuthEvent::SignedOut);
        Ok(())
    }

    async fn fetch_profile(&self, user_id: &str) -> BackendResult<ProfileRecord> {
        let gate = lock(&self.state)
            .profile_gates
            .get_mut(user_id)
            .and_then(VecDeque::pop_front);
        if let Some(gate) = gate {
            // A dropped sender releases the fetch too.
            let _ = gate.await;
        }

        let state = lock(&self.state);
        state.ensure_online()?;
        if state.failing_profiles.contains(user_id) {
            return Err(BackendError::Http {
                status: 500,
                message: "profile lookup failed".into(),
            });
        }
        state
            .find(user_id)
            .map(|a| a.profile.clone())
            .ok_or_else(|| BackendError::NotFound(format!("profile {user_id}")))
    }

    async fn fetch_user_role(&self, user_id: &str) -> BackendResult<Option<String>> {
        let state = lock(&self.state);
        state.ensure_online()?;
        if state.failing_roles.contains(user_id) {
            return Err(BackendError::Http {
                status: 500,
                message: "role lookup failed".into(),
            });
        }
        state
            .find(user_id)
            .map(|a| a.role.clone())
            .ok_or_else(|| BackendError::NotFound(format!("user {user_id}")))
    }

    async fn verify_email(&self, token: &str) -> BackendResult<()> {
        let mut state = lock(&self.state);
        state.ensure_online()?;
        let account = state
            .accounts
            .iter_mut()
            .find(|a| a.verification_token.as_deref() == Some(token))
            .ok_or_else(|| BackendError::NotFound("verification token".into()))?;
        account.identity.email_verified = true;
        account.verification_token = None;
        tracing::info!(user_id = %account.identity.id, "email verified");
        Ok(())
    }

    async fn resend_verification(&self, email: &str) -> BackendResult<()> {
        let mut state = lock(&self.state);
        state.ensure_online()?;
        // Unknown or already verified addresses succeed silently.
        if let Some(account) = state
            .find_by_email_mut(email)
            .filter(|a| !a.identity.email_verified)
        {
            account.verification_token = Some(new_token());
        }
        Ok(())
    }

    async fn list_users(&self) -> BackendResult<Vec<UserSummary>> {
        let state = lock(&self.state);
        state.ensure_online()?;
        Ok(state
            .accounts
            .iter()
            .map(|a| {
                let mut record = a.profile.clone();
                record
                    .extra
                    .insert("email".into(), Value::String(a.identity.email.clone()));
                record
                    .extra
                    .insert("verified".into(), Value::Bool(a.identity.email_verified));
                UserSummary::from_record(record)
            })
            .collect())
    }

    async fn update_user_role(&self, user_id: &str, role: Role) -> BackendResult<()> {
        let mut state = lock(&self.state);
        state.ensure_online()?;
        let account = state
            .find_mut(user_id)
            .ok_or_else(|| BackendError::NotFound(format!("user {user_id}")))?;
        account.role = Some(role.as_str().to_string());
        account.profile.role = Some(role.as_str().to_string());
        Ok(())
    }
}
