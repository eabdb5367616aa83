pub mod backend;
pub mod config;
pub mod error;
pub mod memory;
pub mod service;
pub mod session;
pub mod storage;
pub mod supabase;

pub use backend::{AuthBackend, AuthEvent, AuthEventHub, Subscription};
pub use error::{BackendError, BackendResult};
pub use memory::{MemoryBackend, DEMO_PASSWORD};
pub use service::{Outcome, SessionCommand, SessionService};
pub use session::{FetchTicket, SessionStore};
pub use storage::{MemoryStorage, SessionStorage, StoredSession};
pub use supabase::SupabaseBackend;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock ignoring poisoning; guarded state stays consistent between statements.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
