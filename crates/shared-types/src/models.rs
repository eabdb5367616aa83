use crate::role::Role;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Signed-in backend user, mirrored read-only for the life of a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
}

/// Row from the backend `profiles` table as it arrives on the wire.
///
/// `role` is whatever the backend stored (possibly missing); it is only
/// narrowed when converted into a [`Profile`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// All other backend-defined columns.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileRecord {
    /// True when the stored role is present but not one of the four known roles.
    pub fn has_unrecognized_role(&self) -> bool {
        matches!(self.role.as_deref(), Some(r) if !r.trim().is_empty() && Role::parse(r).is_none())
    }
}

/// Application profile with a validated role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Profile {
    pub fn with_role(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            name: None,
            avatar_url: None,
            extra: Map::new(),
        }
    }
}

impl From<ProfileRecord> for Profile {
    /// Missing or unrecognized roles become Citizen.
    fn from(record: ProfileRecord) -> Self {
        let role = record
            .role
            .as_deref()
            .map(Role::from_str_or_default)
            .unwrap_or_default();
        Self {
            id: record.id,
            role,
            name: record.name,
            avatar_url: record.avatar_url,
            extra: record.extra,
        }
    }
}

/// Point-in-time view of the session store, handed to readers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
    pub profile: Option<Profile>,
    pub loading: bool,
}

impl SessionSnapshot {
    /// Initial state at process start: nothing known yet.
    pub fn loading() -> Self {
        Self {
            identity: None,
            profile: None,
            loading: true,
        }
    }

    /// Resolved state with nobody signed in.
    pub fn signed_out() -> Self {
        Self {
            identity: None,
            profile: None,
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|p| p.role)
    }

    /// Name to greet the user with: profile name, then email, then a generic label.
    pub fn display_name(&self) -> String {
        self.profile
            .as_ref()
            .and_then(|p| p.name.clone())
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.identity.as_ref().map(|i| i.email.clone()))
            .unwrap_or_else(|| "Pengguna".to_string())
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::loading()
    }
}

/// Row in the super-admin user management table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UserSummary {
    /// Build a table row from a profile record. Email and verification live in
    /// backend-defined columns when the profile table carries them.
    pub fn from_record(record: ProfileRecord) -> Self {
        let email = record
            .extra
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let verified = record
            .extra
            .get("verified")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let profile = Profile::from(record);
        Self {
            name: profile.name.clone().unwrap_or_else(|| email.clone()),
            id: profile.id,
            email,
            role: profile.role,
            verified,
            avatar_url: profile.avatar_url,
        }
    }
}

/// Sign-up form payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Transient user-facing message (rendered as a toast).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notice {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: None,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
