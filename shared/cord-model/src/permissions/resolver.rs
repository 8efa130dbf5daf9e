//! Permission resolution logic.
//!
//! Computes effective permissions for a member in a guild/channel context.
//! Administrator is honoured by the checks, never by filling in bits: a
//! resolved set keeps exactly the bits its roles and overwrites produced.

use super::catalog::{Permission, PermissionSet};
use super::overwrite::{OverwriteTarget, PermissionOverwrite};
use super::role::GuildRole;
use crate::snowflake::Snowflake;

/// Compute guild-wide permissions for a member.
///
/// Resolution order:
/// 1. Guild owner has all permissions
/// 2. Start with @everyone role permissions
/// 3. Add permissions from assigned roles
#[tracing::instrument(level = "trace", skip_all, fields(%user_id, roles = roles.len()))]
pub fn compute_base_permissions(
    user_id: Snowflake,
    guild_owner_id: Snowflake,
    everyone_permissions: PermissionSet,
    roles: &[GuildRole],
) -> PermissionSet {
    if guild_owner_id == user_id {
        return PermissionSet::ALL;
    }

    roles
        .iter()
        .fold(everyone_permissions, |acc, role| acc | role.permissions)
}

/// Apply a channel's overwrites to a member's base permissions.
///
/// Overwrites are applied in three layers, each on top of the previous:
/// 1. The `@everyone` overwrite (role id equal to the guild id)
/// 2. All of the member's role overwrites together: denies first, then allows
/// 3. The overwrite targeting the member directly
///
/// Administrators skip overwrites entirely.
#[tracing::instrument(level = "trace", skip_all, fields(%guild_id, %user_id))]
pub fn compute_channel_permissions(
    base: PermissionSet,
    guild_id: Snowflake,
    user_id: Snowflake,
    role_ids: &[Snowflake],
    overwrites: &[PermissionOverwrite],
) -> PermissionSet {
    if base.is_administrator() {
        return base;
    }

    let mut perms = base;

    if let Some(everyone) = overwrites
        .iter()
        .find(|o| o.target().is_everyone(guild_id))
    {
        perms = everyone.apply(perms);
    }

    let mut role_allow = PermissionSet::NONE;
    let mut role_deny = PermissionSet::NONE;
    for ovr in overwrites {
        if ovr.target().is_everyone(guild_id) {
            continue;
        }
        if let OverwriteTarget::Role(role_id) = ovr.target() {
            if role_ids.contains(&role_id) {
                role_allow |= ovr.allow();
                role_deny |= ovr.deny();
            }
        }
    }
    perms = (perms - role_deny) | role_allow;

    if let Some(member) = overwrites
        .iter()
        .find(|o| o.target() == OverwriteTarget::Member(user_id))
    {
        perms = member.apply(perms);
    }

    perms
}

/// Require every permission in `required`.
///
/// On failure the error carries the permissions that were missing.
pub const fn require_permissions(
    permissions: PermissionSet,
    required: PermissionSet,
) -> Result<(), PermissionError> {
    if permissions.has_all_permissions(required) {
        Ok(())
    } else {
        Err(PermissionError::MissingPermissions(
            required.difference(permissions),
        ))
    }
}

/// Whether an actor may edit a role and, optionally, set its permissions.
///
/// A higher position is a higher rank. The edit is allowed when:
/// 1. the actor holds `MANAGE_ROLES` (administrators always do)
/// 2. the target ranks strictly below the actor's highest role
/// 3. `new_permissions` adds nothing the actor lacks; administrators skip
///    this check
pub fn can_manage_role(
    actor_permissions: PermissionSet,
    actor_highest_position: i32,
    target_role_position: i32,
    new_permissions: Option<PermissionSet>,
) -> Result<(), PermissionError> {
    if !actor_permissions.has_permission(Permission::ManageRoles) {
        tracing::debug!("role edit rejected: missing MANAGE_ROLES");
        return Err(PermissionError::MissingPermissions(
            PermissionSet::MANAGE_ROLES,
        ));
    }

    if target_role_position >= actor_highest_position {
        tracing::debug!(
            actor_highest_position,
            target_role_position,
            "role edit rejected: hierarchy"
        );
        return Err(PermissionError::RoleHierarchy {
            actor_position: actor_highest_position,
            target_position: target_role_position,
        });
    }

    if let Some(new_perms) = new_permissions {
        if !actor_permissions.is_administrator() {
            let escalation = new_perms - actor_permissions;
            if !escalation.is_empty() {
                tracing::debug!(escalation = %escalation, "role edit rejected: escalation");
                return Err(PermissionError::CannotEscalate(escalation));
            }
        }
    }

    Ok(())
}

/// Permission check errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    /// The actor lacks the listed permissions.
    #[error("Missing permissions: {0:?}")]
    MissingPermissions(PermissionSet),

    /// The target role does not rank below the actor.
    #[error("Role at position {target_position} does not rank below actor position {actor_position}")]
    RoleHierarchy {
        actor_position: i32,
        target_position: i32,
    },

    /// A non-administrator tried to hand out permissions it does not hold.
    #[error("Role permissions exceed the actor's own: {0:?}")]
    CannotEscalate(PermissionSet),
}
