//! Supabase adapter: GoTrue for authentication, PostgREST for the
//! `profiles` and `user_roles` tables.

use crate::backend::{AuthBackend, AuthEvent, AuthEventHub, Subscription};
use crate::error::{BackendError, BackendResult};
use crate::lock;
use crate::storage::{MemoryStorage, SessionStorage, StoredSession};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use shared_types::{BackendConfig, Identity, ProfileRecord, Role, SignUpRequest, UserSummary};
use std::sync::{Arc, Mutex};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
/// Access tokens this close to expiry are refreshed before use.
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, Deserialize)]
struct GoTrueUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_confirmed_at: Option<String>,
}

impl From<GoTrueUser> for Identity {
    fn from(user: GoTrueUser) -> Self {
        Identity {
            id: user.id,
            email: user.email.unwrap_or_default(),
            email_verified: user.email_confirmed_at.is_some(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: GoTrueUser,
}

impl TokenResponse {
    fn into_parts(self, now: i64) -> (StoredSession, Identity) {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now + secs));
        let session = StoredSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
        };
        (session, Identity::from(self.user))
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// `/signup` returns a bare user when confirmation is required and a full
/// session when the project auto-confirms.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(GoTrueUser),
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    #[serde(default)]
    role: Option<String>,
}

/// Union of the GoTrue and PostgREST error bodies.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl ErrorBody {
    fn text(&self) -> Option<&str> {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error_description.as_deref())
            .or(self.error.as_deref())
    }
}

/// Map a non-success response body onto the error taxonomy.
fn classify(status: StatusCode, body: &str, single_object: bool) -> BackendError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .text()
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string());

    match parsed.error_code.as_deref() {
        Some("invalid_credentials") => return BackendError::InvalidCredentials,
        Some("email_not_confirmed") => return BackendError::EmailNotConfirmed,
        _ => {}
    }
    if message.contains("Invalid login credentials") {
        return BackendError::InvalidCredentials;
    }
    if message.contains("Email not confirmed") {
        return BackendError::EmailNotConfirmed;
    }
    if single_object && status == StatusCode::NOT_ACCEPTABLE {
        return BackendError::NotFound(message);
    }
    BackendError::Http {
        status: status.as_u16(),
        message,
    }
}

pub struct SupabaseBackend {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    /// Tokens of the signed-in user, mirrored into `storage`.
    session: Mutex<Option<StoredSession>>,
    storage: Arc<dyn SessionStorage>,
    hub: AuthEventHub,
}

impl SupabaseBackend {
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(BackendError::Config("backend.url is not set".into()));
        }
        if config.anon_key.trim().is_empty() {
            return Err(BackendError::Config("backend.anon_key is not set".into()));
        }

        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(config.request_timeout_secs));
        let client = builder
            .build()
            .map_err(|e| BackendError::Config(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            anon_key: config.anon_key.trim().to_string(),
            session: Mutex::new(None),
            storage: Arc::new(MemoryStorage::default()),
            hub: AuthEventHub::new(),
        })
    }

    /// Keep tokens in `storage` so a later process can pick the session up.
    pub fn with_storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.storage = storage;
        self
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, path)
    }

    fn access_token(&self) -> Option<String> {
        lock(&self.session).as_ref().map(|s| s.access_token.clone())
    }

    /// Tokens held in memory, falling back to storage on first use.
    async fn held_session(&self) -> Option<StoredSession> {
        let held = lock(&self.session).clone();
        if held.is_some() {
            return held;
        }
        let stored = self.storage.load().await?;
        tracing::debug!("session tokens loaded from storage");
        *lock(&self.session) = Some(stored.clone());
        Some(stored)
    }

    /// Request carrying the project key, authorized as the signed-in user
    /// when there is one and as the anonymous role otherwise.
    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let bearer = self.access_token().unwrap_or_else(|| self.anon_key.clone());
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    async fn send(&self, request: RequestBuilder, single_object: bool) -> BackendResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = classify(status, &body, single_object);
        tracing::warn!(status = status.as_u16(), error = %err, "supabase request failed");
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        single_object: bool,
    ) -> BackendResult<T> {
        let response = self.send(request, single_object).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn store_session(&self, token: TokenResponse) -> Identity {
        let (session, identity) = token.into_parts(now());
        self.storage.save(&session).await;
        *lock(&self.session) = Some(session);
        identity
    }

    async fn clear_session(&self) -> bool {
        let held = lock(&self.session).take().is_some();
        self.storage.clear().await;
        held
    }

    /// Exchange a refresh token for a new access token.
    async fn refresh(&self, refresh_token: &str) -> BackendResult<Identity> {
        let request = self
            .client
            .post(self.auth_url("token?grant_type=refresh_token"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(&json!({ "refresh_token": refresh_token }));
        let token: TokenResponse = self.send_json(request, false).await?;
        let identity = self.store_session(token).await;
        tracing::info!(user_id = %identity.id, "access token refreshed");
        self.hub.emit(AuthEvent::TokenRefreshed(identity.clone()));
        Ok(identity)
    }

    /// `Ok(None)` when the refresh token was rejected and the session ended.
    async fn refresh_or_end(&self, refresh_token: &str) -> BackendResult<Option<Identity>> {
        match self.refresh(refresh_token).await {
            Ok(identity) => Ok(Some(identity)),
            Err(BackendError::Http { status: 400 | 401 | 403, .. }) => {
                tracing::warn!("refresh token rejected, session ended");
                if self.clear_session().await {
                    self.hub.emit(AuthEvent::SignedOut);
                }
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Refresh ahead of expiry before a data request.
    async fn ensure_fresh(&self) -> BackendResult<()> {
        let Some(session) = self.held_session().await else {
            return Ok(());
        };
        if !session.expires_within(now(), REFRESH_MARGIN_SECS) {
            return Ok(());
        }
        match session.refresh_token.as_deref() {
            Some(refresh_token) => self.refresh_or_end(refresh_token).await.map(|_| ()),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl AuthBackend for SupabaseBackend {
    /// Picks up stored tokens, refreshing an expiring access token, and
    /// confirms the result with GoTrue. A token that is rejected and cannot
    /// be refreshed clears the session.
    async fn get_session(&self) -> BackendResult<Option<Identity>> {
        let Some(session) = self.held_session().await else {
            return Ok(None);
        };
        if let Some(refresh_token) = session.refresh_token.as_deref() {
            if session.expires_within(now(), REFRESH_MARGIN_SECS) {
                return self.refresh_or_end(refresh_token).await;
            }
        }
        let request = self.request(Method::GET, self.auth_url("user"));
        match self.send_json::<GoTrueUser>(request, false).await {
            Ok(user) => Ok(Some(Identity::from(user))),
            Err(BackendError::Http { status: 401 | 403, .. }) => match session.refresh_token.as_deref() {
                Some(refresh_token) => self.refresh_or_end(refresh_token).await,
                None => {
                    self.clear_session().await;
                    Ok(None)
                }
            },
            Err(e) => Err(e),
        }
    }

    fn subscribe(&self) -> Subscription {
        self.hub.subscribe()
    }

    #[tracing::instrument(skip(self, password))]
    async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Identity> {
        let request = self
            .request(Method::POST, self.auth_url("token?grant_type=password"))
            .json(&json!({ "email": email, "password": password }));
        let token: TokenResponse = self.send_json(request, false).await?;
        let identity = self.store_session(token).await;
        tracing::info!(user_id = %identity.id, "signed in");
        self.hub.emit(AuthEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    async fn sign_up(&self, request: &SignUpRequest) -> BackendResult<Identity> {
        let body = json!({
            "email": request.email,
            "password": request.password,
            "data": { "name": request.display_name },
        });
        let http = self.request(Method::POST, self.auth_url("signup")).json(&body);
        let identity = match self.send_json::<SignUpResponse>(http, false).await? {
            SignUpResponse::Session(token) => Identity::from(token.user),
            SignUpResponse::User(user) => Identity::from(user),
        };
        tracing::info!(user_id = %identity.id, "account created");
        Ok(identity)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        let result = match self.held_session().await {
            Some(_) => self
                .send(self.request(Method::POST, self.auth_url("logout")), false)
                .await
                .map(|_| ()),
            None => Ok(()),
        };
        // The local token is gone whether or not the server acknowledged.
        if self.clear_session().await {
            self.hub.emit(AuthEvent::SignedOut);
        }
        result
    }

    async fn fetch_profile(&self, user_id: &str) -> BackendResult<ProfileRecord> {
        self.ensure_fresh().await?;
        let url = self.rest_url(&format!(
            "profiles?id=eq.{}&select=*",
            urlencode(user_id)
        ));
        let request = self
            .request(Method::GET, url)
            .header("Accept", SINGLE_OBJECT);
        self.send_json(request, true).await
    }

    async fn fetch_user_role(&self, user_id: &str) -> BackendResult<Option<String>> {
        self.ensure_fresh().await?;
        let url = self.rest_url(&format!(
            "user_roles?user_id=eq.{}&select=role",
            urlencode(user_id)
        ));
        let request = self
            .request(Method::GET, url)
            .header("Accept", SINGLE_OBJECT);
        match self.send_json::<RoleRow>(request, true).await {
            Ok(row) => Ok(row.role),
            Err(BackendError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn verify_email(&self, token: &str) -> BackendResult<()> {
        let request = self
            .request(Method::POST, self.auth_url("verify"))
            .json(&json!({ "type": "signup", "token_hash": token }));
        self.send(request, false).await.map(|_| ())
    }

    async fn resend_verification(&self, email: &str) -> BackendResult<()> {
        let request = self
            .request(Method::POST, self.auth_url("resend"))
            .json(&json!({ "type": "signup", "email": email }));
        self.send(request, false).await.map(|_| ())
    }

    async fn list_users(&self) -> BackendResult<Vec<UserSummary>> {
        self.ensure_fresh().await?;
        let request = self.request(Method::GET, self.rest_url("profiles?select=*"));
        let records: Vec<ProfileRecord> = self.send_json(request, false).await?;
        Ok(records.into_iter().map(UserSummary::from_record).collect())
    }

    async fn update_user_role(&self, user_id: &str, role: Role) -> BackendResult<()> {
        self.ensure_fresh().await?;
        let request = self
            .request(Method::POST, self.rest_url("user_roles?on_conflict=user_id"))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&json!({ "user_id": user_id, "role": role.as_str() }));
        self.send(request, false).await.map(|_| ())
    }
}

fn urlencode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
