use serde::{Deserialize, Serialize};

/// Which backend implementation the app talks to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// In-memory backend seeded with the demo accounts.
    #[default]
    Demo,
    /// Hosted Supabase project (GoTrue + PostgREST).
    Supabase,
}

impl BackendMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demo" => Some(BackendMode::Demo),
            "supabase" => Some(BackendMode::Supabase),
            _ => None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

/// `[backend]` table of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    #[serde(default)]
    pub mode: BackendMode,
    /// Project URL, e.g. `https://xyz.supabase.co`. Unused in demo mode.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub anon_key: String,
    /// Per-request timeout on native targets.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::default(),
            url: String::new(),
            anon_key: String::new(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
}
