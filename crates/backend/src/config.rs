use crate::backend::AuthBackend;
use crate::error::{BackendError, BackendResult};
use crate::memory::MemoryBackend;
use crate::storage::SessionStorage;
use crate::supabase::SupabaseBackend;
use shared_types::{AppConfig, BackendMode};
use std::sync::{Arc, OnceLock};

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// `config.toml` from the repository root, baked in at build time so the
/// web target needs no filesystem.
const EMBEDDED_CONFIG: &str = include_str!("../../../config.toml");

pub fn parse_config(contents: &str) -> BackendResult<AppConfig> {
    toml::from_str(contents).map_err(|e| BackendError::Config(e.to_string()))
}

/// Overlay environment values onto `config`. `lookup` returns the value of
/// a variable if set.
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(mode) = lookup("LAPOR_BACKEND_MODE") {
        match BackendMode::parse(&mode) {
            Some(mode) => config.backend.mode = mode,
            None => tracing::warn!(value = %mode, "ignoring unknown LAPOR_BACKEND_MODE"),
        }
    }
    if let Some(url) = lookup("SUPABASE_URL") {
        config.backend.url = url;
    }
    if let Some(key) = lookup("SUPABASE_ANON_KEY") {
        config.backend.anon_key = key;
    }
    if let Some(secs) = lookup("LAPOR_REQUEST_TIMEOUT_SECS") {
        match secs.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => config.backend.request_timeout_secs = secs,
            _ => tracing::warn!(value = %secs, "ignoring invalid LAPOR_REQUEST_TIMEOUT_SECS"),
        }
    }
}

/// Values captured from the build environment, for targets without a
/// process environment at runtime.
fn build_env(key: &str) -> Option<&'static str> {
    match key {
        "LAPOR_BACKEND_MODE" => option_env!("LAPOR_BACKEND_MODE"),
        "SUPABASE_URL" => option_env!("SUPABASE_URL"),
        "SUPABASE_ANON_KEY" => option_env!("SUPABASE_ANON_KEY"),
        "LAPOR_REQUEST_TIMEOUT_SECS" => option_env!("LAPOR_REQUEST_TIMEOUT_SECS"),
        _ => None,
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| build_env(key).map(str::to_string))
        .filter(|v| !v.trim().is_empty())
}

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env file loaded");
    }
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {}

/// Parse the embedded config and apply environment overrides. Safe to call
/// multiple times; only the first call has effect.
///
/// An unparseable embedded file falls back to defaults (demo mode).
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        load_dotenv();
        let mut config = parse_config(EMBEDDED_CONFIG).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to parse config.toml, using defaults");
            AppConfig::default()
        });
        apply_env_overrides(&mut config, env_lookup);
        tracing::info!(mode = ?config.backend.mode, "backend configuration loaded");
        config
    })
}

/// Construct the backend selected by `config`. Supabase keeps its tokens in
/// `storage`.
pub fn build_backend(
    config: &AppConfig,
    storage: Arc<dyn SessionStorage>,
) -> BackendResult<Arc<dyn AuthBackend>> {
    match config.backend.mode {
        BackendMode::Demo => Ok(Arc::new(MemoryBackend::with_demo_accounts())),
        BackendMode::Supabase => Ok(Arc::new(
            SupabaseBackend::new(&config.backend)?.with_storage(storage),
        )),
    }
}
