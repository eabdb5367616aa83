use backend::{SessionCommand, SessionService};
use dioxus::prelude::*;
use shared_types::{Role, SessionSnapshot};
use std::rc::Rc;

/// Global authentication state.
///
/// `session` mirrors the service's store; it is written only by the store
/// observer.
#[derive(Clone, Copy)]
pub struct AuthState {
    pub session: Signal<SessionSnapshot>,
    /// True from submitting a session command until its outcome arrives.
    pub busy: Signal<bool>,
    pub service: CopyValue<Rc<SessionService>>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    pub fn service(&self) -> Rc<SessionService> {
        self.service.cloned()
    }

    /// Hand `command` to the session loop and mark the session busy.
    pub fn send(&mut self, command: SessionCommand) {
        match try_consume_context::<Coroutine<SessionCommand>>() {
            Some(commands) => {
                self.busy.set(true);
                commands.send(command);
            }
            None => tracing::error!("session loop is not running; command dropped"),
        }
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// The signed-in user's resolved role, if any.
pub fn use_role() -> Option<Role> {
    let auth = use_auth();
    let role = auth.session.read().role();
    role
}
