//! Session lifecycle on top of an [`AuthBackend`].
//!
//! Every user-facing operation resolves to an [`Outcome`]: where to navigate
//! and what notice to show. Backend failures are logged and turned into
//! notices here; nothing propagates to the rendering layer.

use crate::backend::{AuthBackend, AuthEvent, Subscription};
use crate::lock;
use crate::session::{FetchTicket, SessionStore};
use futures::{FutureExt, Stream, StreamExt};
use shared_types::routes::{self, LOGIN};
use shared_types::{AppError, Identity, Notice, Profile, Role, SessionSnapshot, SignUpRequest, UserSummary};
use std::sync::{Arc, Mutex};

const SIGN_IN_FAILED: &str = "Terjadi kesalahan saat login. Silakan coba lagi.";
const SIGN_UP_FAILED: &str = "Terjadi kesalahan saat registrasi. Silakan coba lagi.";
const PROFILE_FAILED: &str = "Profil pengguna tidak dapat dimuat.";
const RESTORE_FAILED: &str = "Sesi tidak dapat dipulihkan. Silakan login kembali.";

/// Externally visible effect of a session operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub navigate: Option<String>,
    pub notice: Option<Notice>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn navigate(path: impl Into<String>) -> Self {
        Self {
            navigate: Some(path.into()),
            notice: None,
        }
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            navigate: None,
            notice: Some(notice),
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// UI request processed by [`SessionService::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    SignIn {
        email: String,
        password: String,
        /// Location the guard recorded before sending the user to sign in.
        redirect: Option<String>,
    },
    SignUp(SignUpRequest),
    SignOut,
}

type Observer = Box<dyn Fn(&SessionSnapshot)>;

pub struct SessionService {
    backend: Arc<dyn AuthBackend>,
    store: Mutex<SessionStore>,
    observer: Option<Observer>,
}

impl SessionService {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            backend,
            store: Mutex::new(SessionStore::new()),
            observer: None,
        }
    }

    /// Call `observer` with a fresh snapshot after every store mutation.
    pub fn with_observer(mut self, observer: impl Fn(&SessionSnapshot) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn backend(&self) -> &Arc<dyn AuthBackend> {
        &self.backend
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        lock(&self.store).snapshot()
    }

    /// Register for backend auth events. The returned subscription is the
    /// lifetime handle: dropping it unregisters.
    pub fn init(&self) -> Subscription {
        self.backend.subscribe()
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut SessionStore) -> R) -> R {
        let (result, snapshot) = {
            let mut store = lock(&self.store);
            let result = f(&mut store);
            (result, store.snapshot())
        };
        if let Some(observer) = &self.observer {
            observer(&snapshot);
        }
        result
    }

    /// Fetch the profile for `ticket` and apply it unless superseded.
    /// Returns whether the fetch itself succeeded.
    async fn load_profile(&self, ticket: FetchTicket) -> bool {
        let result = match self.backend.fetch_profile(ticket.user_id()).await {
            Ok(record) => {
                if record.has_unrecognized_role() {
                    tracing::warn!(
                        user_id = ticket.user_id(),
                        role = record.role.as_deref().unwrap_or_default(),
                        "unrecognized role on profile, treating as citizen"
                    );
                }
                Ok(Profile::from(record))
            }
            Err(e) => {
                tracing::error!(error = %e, user_id = ticket.user_id(), "Failed to fetch profile");
                Err(e)
            }
        };
        let ok = result.is_ok();
        let applied = self.mutate(|store| store.complete(&ticket, result));
        if !applied {
            tracing::debug!(
                user_id = ticket.user_id(),
                epoch = ticket.epoch(),
                "discarding superseded profile fetch"
            );
        }
        ok
    }

    /// Replace the identity and fetch its profile. Returns false only when a
    /// fetch was needed and failed.
    async fn replace_identity(&self, identity: Option<Identity>) -> bool {
        match self.mutate(|store| store.begin(identity)) {
            Some(ticket) => self.load_profile(ticket).await,
            None => true,
        }
    }

    /// Pick up a session the backend already holds.
    pub async fn restore(&self) -> Outcome {
        match self.backend.get_session().await {
            Ok(identity) => {
                tracing::info!(restored = identity.is_some(), "session restore");
                if self.replace_identity(identity).await {
                    Outcome::none()
                } else {
                    Outcome::notice(Notice::error(PROFILE_FAILED))
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to restore session");
                self.replace_identity(None).await;
                Outcome::notice(Notice::error(RESTORE_FAILED))
            }
        }
    }

    /// React to a backend-pushed auth change.
    pub async fn apply_auth_event(&self, event: AuthEvent) -> Outcome {
        tracing::debug!(event = event.name(), "applying auth event");
        if self.replace_identity(event.identity().cloned()).await {
            Outcome::none()
        } else {
            Outcome::notice(Notice::error(PROFILE_FAILED))
        }
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str, redirect: Option<&str>) -> Outcome {
        let identity = match self.backend.sign_in_with_password(email, password).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, "sign in rejected");
                let err = AppError::from(e);
                return Outcome::notice(
                    Notice::error("Login gagal").with_description(err.user_message(SIGN_IN_FAILED)),
                );
            }
        };

        let profile_loaded = self.replace_identity(Some(identity.clone())).await;

        let role = match self.backend.fetch_user_role(&identity.id).await {
            Ok(Some(raw)) => {
                let role = Role::parse(&raw);
                if role.is_none() {
                    tracing::warn!(user_id = %identity.id, role = %raw, "unrecognized role, treating as citizen");
                }
                Some(role.unwrap_or_default())
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!(error = %e, user_id = %identity.id, "Failed to fetch user role");
                None
            }
        };

        let destination = routes::post_login_destination(role, redirect);
        tracing::info!(user_id = %identity.id, destination = %destination, "signed in");
        let notice = if profile_loaded {
            Notice::success("Login berhasil!").with_description("Selamat datang kembali.")
        } else {
            Notice::info("Login berhasil!").with_description(PROFILE_FAILED)
        };
        Outcome::navigate(destination).with_notice(notice)
    }

    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn sign_up(&self, request: &SignUpRequest) -> Outcome {
        if let Err(err) = validate_sign_up(request) {
            return Outcome::notice(Notice::error("Registrasi gagal").with_description(err.message));
        }
        match self.backend.sign_up(request).await {
            Ok(_) => Outcome::navigate(routes::verification_sent_for(request.email.trim()))
                .with_notice(
                    Notice::success("Registrasi berhasil!")
                        .with_description("Silakan periksa email Anda untuk verifikasi."),
                ),
            Err(e) => {
                tracing::error!(error = %e, "Sign up failed");
                let err = AppError::from(e);
                Outcome::notice(Notice::error("Registrasi gagal").with_description(sign_up_message(&err)))
            }
        }
    }

    /// Clears the local session even when the backend call fails.
    pub async fn sign_out(&self) -> Outcome {
        let result = self.backend.sign_out().await;
        self.replace_identity(None).await;
        match result {
            Ok(()) => Outcome::navigate(LOGIN).with_notice(Notice::success("Logout berhasil")),
            Err(e) => {
                tracing::error!(error = %e, "Sign out failed on backend, local session cleared");
                Outcome::navigate(LOGIN).with_notice(
                    Notice::error("Logout gagal")
                        .with_description(AppError::from(e).user_message("Sesi lokal telah dihapus.")),
                )
            }
        }
    }

    pub async fn verify_email(&self, token: Option<&str>) -> Result<(), AppError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::validation("Token verifikasi tidak ditemukan"))?;
        self.backend.verify_email(token).await.map_err(|e| {
            tracing::error!(error = %e, "Email verification failed");
            AppError::from(e)
        })
    }

    pub async fn resend_verification(&self, email: &str) -> Result<(), AppError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::validation("Email tidak ditemukan"));
        }
        self.backend.resend_verification(email).await.map_err(|e| {
            tracing::error!(error = %e, "Resending verification failed");
            AppError::from(e)
        })
    }

    pub async fn list_users(&self) -> Result<Vec<UserSummary>, AppError> {
        self.backend.list_users().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list users");
            AppError::from(e)
        })
    }

    /// Change a user's role. Only a super admin may do this; changing one's
    /// own role re-fetches the profile.
    pub async fn update_user_role(&self, user_id: &str, role: Role) -> Result<(), AppError> {
        let snapshot = self.snapshot();
        if snapshot.role() != Some(Role::SuperAdmin) {
            return Err(AppError::forbidden("Hanya Super Admin yang dapat mengubah peran"));
        }
        self.backend.update_user_role(user_id, role).await.map_err(|e| {
            tracing::error!(error = %e, user_id, "Failed to update user role");
            AppError::from(e)
        })?;
        tracing::info!(user_id, role = %role, "user role updated");

        if let Some(own) = snapshot.identity.filter(|i| i.id == user_id) {
            self.replace_identity(Some(own)).await;
        }
        Ok(())
    }

    pub async fn handle(&self, command: SessionCommand) -> Outcome {
        match command {
            SessionCommand::SignIn {
                email,
                password,
                redirect,
            } => self.sign_in(&email, &password, redirect.as_deref()).await,
            SessionCommand::SignUp(request) => self.sign_up(&request).await,
            SessionCommand::SignOut => self.sign_out().await,
        }
    }

    /// Restore, then serve auth events and commands one at a time until the
    /// command stream closes. `events` is dropped on return.
    ///
    /// Events raised by the backend while a command runs describe the command
    /// just handled and are discarded once it returns. Pending events win over
    /// pending commands; whatever is still queued when commands close is
    /// applied before returning.
    pub async fn run<E, C, F>(&self, events: E, commands: C, mut on_outcome: F)
    where
        E: Stream<Item = AuthEvent> + Unpin,
        C: Stream<Item = SessionCommand> + Unpin,
        F: FnMut(Outcome),
    {
        let mut events = events.fuse();
        let mut commands = commands.fuse();

        on_outcome(self.restore().await);
        discard_echoes(&mut events);

        loop {
            futures::select_biased! {
                event = events.next() => match event {
                    Some(event) => on_outcome(self.apply_auth_event(event).await),
                    None => tracing::debug!("auth event stream ended"),
                },
                command = commands.next() => match command {
                    Some(command) => {
                        on_outcome(self.handle(command).await);
                        discard_echoes(&mut events);
                    }
                    None => break,
                },
                complete => break,
            }
        }

        while let Some(Some(event)) = events.next().now_or_never() {
            on_outcome(self.apply_auth_event(event).await);
        }

        tracing::info!("session loop stopped");
    }
}

fn validate_sign_up(request: &SignUpRequest) -> Result<(), AppError> {
    if request.display_name.trim().is_empty() {
        return Err(AppError::validation("Nama lengkap wajib diisi"));
    }
    if !request.email.contains('@') {
        return Err(AppError::validation("Format email tidak valid"));
    }
    if request.password.is_empty() {
        return Err(AppError::validation("Kata sandi wajib diisi"));
    }
    Ok(())
}

/// Drop events already queued; they were raised by the operation that just
/// finished and the session already reflects them.
fn discard_echoes<E: Stream<Item = AuthEvent> + Unpin>(events: &mut E) {
    while let Some(Some(event)) = events.next().now_or_never() {
        tracing::debug!(event = event.name(), "dropping event raised by the last operation");
    }
}

/// Registration failures with known backend wording get Indonesian text.
fn sign_up_message(err: &AppError) -> String {
    let message = err.message.as_str();
    if message.contains("already registered") {
        return "Email sudah terdaftar. Silakan gunakan email lain atau masuk.".to_string();
    }
    if let Some(rest) = message.strip_prefix("Password should be at least ") {
        let count: String = rest.chars().take_while(char::is_ascii_digit).collect();
        if !count.is_empty() {
            return format!("Kata sandi minimal {count} karakter.");
        }
    }
    err.user_message(SIGN_UP_FAILED)
}
