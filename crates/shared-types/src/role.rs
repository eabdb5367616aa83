use serde::{Deserialize, Serialize};
use std::fmt;

/// Portal role. Closed set; free-form backend strings are narrowed with
/// [`Role::parse`] or [`Role::from_str_or_default`] before they go anywhere else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Citizen,
    Secretary,
    VillageHead,
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Citizen,
        Role::Secretary,
        Role::VillageHead,
        Role::SuperAdmin,
    ];

    /// Strict parse of a backend role string. Case and surrounding
    /// whitespace are ignored; anything else outside the four roles is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "citizen" => Some(Role::Citizen),
            "secretary" => Some(Role::Secretary),
            "village_head" => Some(Role::VillageHead),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// Parse a backend role string. Unknown or empty values default to Citizen.
    pub fn from_str_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Wire form, as stored in the `profiles` and `user_roles` tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Secretary => "secretary",
            Role::VillageHead => "village_head",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Display label shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Citizen => "Masyarakat",
            Role::Secretary => "Sekretaris Desa",
            Role::VillageHead => "Kepala Desa",
            Role::SuperAdmin => "Super Admin",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Role::Citizen => 1,
            Role::Secretary => 1 << 1,
            Role::VillageHead => 1 << 2,
            Role::SuperAdmin => 1 << 3,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of roles a route or action accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);

    pub const fn only(role: Role) -> Self {
        RoleSet(role.bit())
    }

    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        RoleSet(bits)
    }

    pub const fn with(self, role: Role) -> Self {
        RoleSet(self.0 | role.bit())
    }

    pub const fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        RoleSet::only(role)
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        RoleSet::of(&roles)
    }
}

impl From<&[Role]> for RoleSet {
    fn from(roles: &[Role]) -> Self {
        RoleSet::of(roles)
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(RoleSet::EMPTY, RoleSet::with)
    }
}
