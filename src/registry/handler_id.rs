//! # Handler Identity
//!
//! Role-tagged identifiers for registered handlers.
//!
//! An id is the role prefix (`S` for sources, `T` for targets) followed by a
//! decimal sequence number. The sequence is owned by one [`IdAllocator`] and
//! shared by both roles, so ids are ordered by registration time whatever
//! their role. Ids are never handed out twice by the same allocator.

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Which side of an interaction a handler sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Source,
    Target,
}

impl Role {
    /// Single-character id prefix for this role
    pub const fn prefix(self) -> char {
        match self {
            Role::Source => 'S',
            Role::Target => 'T',
        }
    }

    pub fn from_prefix(prefix: char) -> Option<Role> {
        match prefix {
            'S' => Some(Role::Source),
            'T' => Some(Role::Target),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Source => write!(f, "source"),
            Role::Target => write!(f, "target"),
        }
    }
}

/// Opaque identifier handed back by the registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerId(String);

impl HandlerId {
    fn new(role: Role, sequence: u64) -> Self {
        Self(format!("{}{}", role.prefix(), sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the role from the id's leading character
    pub fn role(&self) -> Result<Role> {
        self.0
            .chars()
            .next()
            .and_then(Role::from_prefix)
            .ok_or_else(|| RegistryError::UnknownPrefix(self.0.clone()))
    }

    /// True when the id is shaped as an id of `role`
    pub fn has_role(&self, role: Role) -> bool {
        matches!(self.role(), Ok(r) if r == role)
    }
}

impl std::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HandlerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HandlerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for HandlerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Monotonic id source owned by a single registry
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next id for `role`
    pub fn next_id(&self, role: Role) -> HandlerId {
        let sequence = self.next.fetch_add(1, Ordering::Relaxed);
        HandlerId::new(role, sequence)
    }

    /// Role encoded in `id`; fails for ids outside the prefix scheme
    pub fn role_of(&self, id: &HandlerId) -> Result<Role> {
        id.role()
    }
}
