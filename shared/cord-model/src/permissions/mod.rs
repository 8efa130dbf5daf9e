//! Permission types and utilities.
//!
//! - [`PermissionSet`]: bitfield of granted permissions with
//!   administrator-aware checks
//! - [`PermissionOverwrite`]: per-channel allow/deny layer for a role or member
//! - [`resolver`]: turns roles and overwrites into effective permissions

pub mod catalog;
pub mod level;
pub mod overwrite;
pub mod resolver;
pub mod role;
pub mod set;

pub use catalog::{Permission, PermissionSet};
pub use level::PermissionLevel;
pub use overwrite::{OverwriteTarget, PermissionOverwrite};
pub use resolver::{
    can_manage_role, compute_base_permissions, compute_channel_permissions, require_permissions,
    PermissionError,
};
pub use role::GuildRole;
