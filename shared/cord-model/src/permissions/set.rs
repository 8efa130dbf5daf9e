//! Permission set operations.
//!
//! `PermissionSet` itself is generated by the catalog; this module adds
//! construction from permissions, set algebra, the toggle operator, and the
//! permission checks. Every operation here goes through
//! [`PermissionSet::from_raw`], so no result can carry a bit outside the
//! catalog.
//!
//! Two kinds of check exist:
//! - `has_flag` tests the raw bit.
//! - `has_permission`, `has_any_permission` and `has_all_permissions` treat
//!   [`Permission::Administrator`] as granting everything. The administrator
//!   bit is only ever consulted at query time; it is never expanded into the
//!   stored bits.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub, SubAssign};

use super::catalog::{Permission, PermissionSet};

impl PermissionSet {
    /// Permissions that only make sense in text channels.
    pub const TEXT: Self = Self::CREATE_INSTANT_INVITE
        .union(Self::MANAGE_CHANNELS)
        .union(Self::ADD_REACTIONS)
        .union(Self::VIEW_CHANNEL)
        .union(Self::SEND_MESSAGES)
        .union(Self::SEND_TTS_MESSAGES)
        .union(Self::MANAGE_MESSAGES)
        .union(Self::EMBED_LINKS)
        .union(Self::ATTACH_FILES)
        .union(Self::READ_MESSAGE_HISTORY)
        .union(Self::MENTION_EVERYONE)
        .union(Self::USE_EXTERNAL_EMOJIS)
        .union(Self::MANAGE_ROLES)
        .union(Self::MANAGE_WEBHOOKS)
        .union(Self::USE_APPLICATION_COMMANDS)
        .union(Self::MANAGE_THREADS)
        .union(Self::CREATE_PUBLIC_THREADS)
        .union(Self::CREATE_PRIVATE_THREADS)
        .union(Self::USE_EXTERNAL_STICKERS)
        .union(Self::SEND_MESSAGES_IN_THREADS);

    /// Permissions that only make sense in voice channels.
    pub const VOICE: Self = Self::CREATE_INSTANT_INVITE
        .union(Self::MANAGE_CHANNELS)
        .union(Self::PRIORITY_SPEAKER)
        .union(Self::STREAM)
        .union(Self::VIEW_CHANNEL)
        .union(Self::CONNECT)
        .union(Self::SPEAK)
        .union(Self::MUTE_MEMBERS)
        .union(Self::DEAFEN_MEMBERS)
        .union(Self::MOVE_MEMBERS)
        .union(Self::USE_VOICE_ACTIVITY)
        .union(Self::MANAGE_ROLES)
        .union(Self::MANAGE_EVENTS)
        .union(Self::USE_EMBEDDED_ACTIVITIES);

    /// Permissions a guild may require multi-factor auth for.
    pub const ELEVATED: Self = Self::KICK_MEMBERS
        .union(Self::BAN_MEMBERS)
        .union(Self::ADMINISTRATOR)
        .union(Self::MANAGE_CHANNELS)
        .union(Self::MANAGE_GUILD)
        .union(Self::MANAGE_MESSAGES)
        .union(Self::MANAGE_ROLES)
        .union(Self::MANAGE_WEBHOOKS)
        .union(Self::MANAGE_GUILD_EXPRESSIONS)
        .union(Self::MANAGE_THREADS)
        .union(Self::MODERATE_MEMBERS);

    // === Construction ===

    /// Build a set containing exactly the given permissions.
    ///
    /// Listing a permission more than once has no further effect.
    #[must_use]
    pub fn from_permissions<I>(permissions: I) -> Self
    where
        I: IntoIterator<Item = Permission>,
    {
        permissions
            .into_iter()
            .fold(Self::NONE, |acc, p| acc.union(Self::from_permission(p)))
    }

    /// Build a set containing a single permission.
    #[must_use]
    pub const fn from_permission(permission: Permission) -> Self {
        Self::from_raw(permission.mask())
    }

    // === Set algebra ===

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self::from_raw(self.to_raw() | other.to_raw())
    }

    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self::from_raw(self.to_raw() & other.to_raw())
    }

    /// Permissions in `self` but not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self::from_raw(self.to_raw() & !other.to_raw())
    }

    /// Permissions in exactly one of the two sets.
    #[must_use]
    pub const fn symmetric_difference(self, other: Self) -> Self {
        Self::from_raw(self.to_raw() ^ other.to_raw())
    }

    /// Every catalog permission not in `self`.
    #[must_use]
    pub const fn complement(self) -> Self {
        Self::from_raw(!self.to_raw())
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.to_raw() == 0
    }

    /// Whether every permission in `other` is also in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.to_raw() & other.to_raw() == other.to_raw()
    }

    /// Whether the two sets share at least one permission.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.to_raw() & other.to_raw() != 0
    }

    // === Toggle ===

    /// Flip each listed permission in turn.
    ///
    /// A permission listed twice is flipped twice and ends up unchanged.
    #[must_use]
    pub fn toggled<I>(self, permissions: I) -> Self
    where
        I: IntoIterator<Item = Permission>,
    {
        permissions
            .into_iter()
            .fold(self, |acc, p| acc.symmetric_difference(Self::from_permission(p)))
    }

    // === Checks ===

    /// Raw bit test. Does not apply the administrator override.
    #[must_use]
    pub const fn has_flag(self, permission: Permission) -> bool {
        self.to_raw() & permission.mask() != 0
    }

    /// Whether the administrator bit is set.
    #[must_use]
    pub const fn is_administrator(self) -> bool {
        self.has_flag(Permission::Administrator)
    }

    /// Check a single permission, honouring the administrator override.
    ///
    /// # Examples
    ///
    /// ```
    /// use cord_model::permissions::{Permission, PermissionSet};
    ///
    /// let admin = PermissionSet::ADMINISTRATOR;
    /// assert!(admin.has_permission(Permission::BanMembers));
    /// assert!(!admin.has_flag(Permission::BanMembers));
    /// ```
    #[must_use]
    pub const fn has_permission(self, permission: Permission) -> bool {
        self.is_administrator() || self.has_flag(permission)
    }

    /// True if at least one permission in `required` is held.
    ///
    /// An administrator passes even when `required` is empty; anyone else
    /// fails on an empty requirement.
    #[must_use]
    pub const fn has_any_permission(self, required: Self) -> bool {
        self.is_administrator() || self.intersects(required)
    }

    /// True if every permission in `required` is held.
    ///
    /// An empty requirement is always satisfied.
    #[must_use]
    pub const fn has_all_permissions(self, required: Self) -> bool {
        self.is_administrator() || self.contains(required)
    }

    /// Permissions present in this set, in bit order.
    pub fn permissions(self) -> impl Iterator<Item = Permission> {
        Permission::ALL
            .iter()
            .copied()
            .filter(move |p| self.has_flag(*p))
    }
}

macro_rules! set_operator {
    ($op:ident, $method:ident, $assign_op:ident, $assign_method:ident, $set_fn:ident) => {
        impl $op for PermissionSet {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                self.$set_fn(rhs)
            }
        }

        impl $assign_op for PermissionSet {
            fn $assign_method(&mut self, rhs: Self) {
                *self = self.$set_fn(rhs);
            }
        }
    };
}

set_operator!(BitOr, bitor, BitOrAssign, bitor_assign, union);
set_operator!(BitAnd, bitand, BitAndAssign, bitand_assign, intersection);
set_operator!(BitXor, bitxor, BitXorAssign, bitxor_assign, symmetric_difference);
set_operator!(Sub, sub, SubAssign, sub_assign, difference);

impl Not for PermissionSet {
    type Output = Self;

    fn not(self) -> Self {
        self.complement()
    }
}

impl Default for PermissionSet {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<Permission> for PermissionSet {
    fn from(permission: Permission) -> Self {
        Self::from_permission(permission)
    }
}

impl From<u64> for PermissionSet {
    fn from(value: u64) -> Self {
        Self::from_raw(value)
    }
}

impl From<PermissionSet> for u64 {
    fn from(set: PermissionSet) -> Self {
        set.to_raw()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self::from_permissions(iter)
    }
}

impl std::fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_raw())
    }
}

// Human-readable formats get a decimal string so the full 64-bit range
// survives JSON number handling on the other end; integers are accepted too.
// Binary formats get a plain `u64`.
#[cfg(feature = "serde")]
impl serde::Serialize for PermissionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::serde_util::serialize_u64(self, self.to_raw(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PermissionSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::serde_util::deserialize_u64(deserializer, "a permission bitfield").map(Self::from_raw)
    }
}
