//! Channel permission overwrites.
//!
//! An overwrite layers an allow set and a deny set on top of the permissions a
//! member derives from their roles. A permission is never in both sets; when
//! raw input says otherwise, deny wins.

use super::catalog::{Permission, PermissionSet};
use super::level::PermissionLevel;
use crate::snowflake::Snowflake;

/// Who an overwrite applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "id", rename_all = "snake_case")
)]
pub enum OverwriteTarget {
    /// Every member holding the role. A role id equal to the guild id is the
    /// `@everyone` role.
    Role(Snowflake),
    /// A single member.
    Member(Snowflake),
}

impl OverwriteTarget {
    #[must_use]
    pub const fn id(self) -> Snowflake {
        match self {
            Self::Role(id) | Self::Member(id) => id,
        }
    }

    /// Whether this targets the `@everyone` role of `guild_id`.
    #[must_use]
    pub const fn is_everyone(self, guild_id: Snowflake) -> bool {
        matches!(self, Self::Role(id) if id.get() == guild_id.get())
    }
}

/// Allow/deny pair for one role or member in one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawOverwrite")
)]
pub struct PermissionOverwrite {
    #[cfg_attr(feature = "serde", serde(flatten))]
    target: OverwriteTarget,
    allow: PermissionSet,
    deny: PermissionSet,
}

impl PermissionOverwrite {
    /// An overwrite that leaves every permission unset.
    #[must_use]
    pub const fn new(target: OverwriteTarget) -> Self {
        Self {
            target,
            allow: PermissionSet::NONE,
            deny: PermissionSet::NONE,
        }
    }

    /// Build from stored allow/deny integers.
    ///
    /// Unknown bits are masked and any bit present in both is kept only in
    /// `deny`.
    #[must_use]
    pub const fn from_raw(target: OverwriteTarget, allow: u64, deny: u64) -> Self {
        Self::from_sets(
            target,
            PermissionSet::from_raw(allow),
            PermissionSet::from_raw(deny),
        )
    }

    /// Build from allow/deny sets. A permission in both ends up denied.
    #[must_use]
    pub const fn from_sets(
        target: OverwriteTarget,
        allow: PermissionSet,
        deny: PermissionSet,
    ) -> Self {
        Self {
            target,
            allow: allow.difference(deny),
            deny,
        }
    }

    #[must_use]
    pub const fn target(&self) -> OverwriteTarget {
        self.target
    }

    /// Explicitly granted permissions.
    #[must_use]
    pub const fn allow(&self) -> PermissionSet {
        self.allow
    }

    /// Explicitly revoked permissions.
    #[must_use]
    pub const fn deny(&self) -> PermissionSet {
        self.deny
    }

    /// Whether the overwrite changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.deny.is_empty()
    }

    /// State of a single permission in this overwrite.
    #[must_use]
    pub const fn level(&self, permission: Permission) -> PermissionLevel {
        if self.allow.has_flag(permission) {
            PermissionLevel::Allowed
        } else if self.deny.has_flag(permission) {
            PermissionLevel::Denied
        } else {
            PermissionLevel::Unset
        }
    }

    /// Copy of this overwrite with `permission` moved to `level`.
    #[must_use]
    pub const fn with_level(self, permission: Permission, level: PermissionLevel) -> Self {
        let bit = PermissionSet::from_permission(permission);
        let allow = self.allow.difference(bit);
        let deny = self.deny.difference(bit);

        let (allow, deny) = match level {
            PermissionLevel::Allowed => (allow.union(bit), deny),
            PermissionLevel::Denied => (allow, deny.union(bit)),
            PermissionLevel::Unset => (allow, deny),
        };

        Self {
            target: self.target,
            allow,
            deny,
        }
    }

    /// Apply this overwrite to a baseline: revoke `deny`, then grant `allow`.
    #[must_use]
    pub const fn apply(&self, base: PermissionSet) -> PermissionSet {
        base.difference(self.deny).union(self.allow)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawOverwrite {
    #[serde(flatten)]
    target: OverwriteTarget,
    allow: PermissionSet,
    deny: PermissionSet,
}

#[cfg(feature = "serde")]
impl From<RawOverwrite> for PermissionOverwrite {
    fn from(raw: RawOverwrite) -> Self {
        Self::from_sets(raw.target, raw.allow, raw.deny)
    }
}
