//! Read visibility derived from the caller's role.

use serde::{Deserialize, Serialize};

/// Role established by the authentication layer in front of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Which banners a read is allowed to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// End-user reads: inactive banners are invisible
    ActiveOnly,
    /// Administrative reads: ground truth regardless of state
    Any,
}

impl Visibility {
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::User => Self::ActiveOnly,
            Role::Admin => Self::Any,
        }
    }

    /// The `is_active` constraint a store read should apply.
    pub const fn active_filter(self) -> Option<bool> {
        match self {
            Self::ActiveOnly => Some(true),
            Self::Any => None,
        }
    }

    /// Only active banners are ever written to the content cache.
    pub const fn is_cache_eligible(self) -> bool {
        matches!(self, Self::ActiveOnly)
    }
}
