//! Guild role as seen by permission resolution.

use super::catalog::PermissionSet;
use crate::snowflake::{Identifiable, Snowflake};

/// A guild role and the permissions it grants.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuildRole {
    pub id: Snowflake,
    pub name: String,
    pub permissions: PermissionSet,
    /// Higher position means higher rank. `@everyone` sits at 0.
    pub position: i32,
}

impl GuildRole {
    #[must_use]
    pub fn new(
        id: Snowflake,
        name: impl Into<String>,
        permissions: PermissionSet,
        position: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            permissions,
            position,
        }
    }
}

impl Identifiable for GuildRole {
    fn id(&self) -> Snowflake {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_at_comes_from_id() {
        let role = GuildRole::new(
            Snowflake::new(175_928_847_299_117_063),
            "Helpers",
            PermissionSet::NONE,
            1,
        );
        assert_eq!(role.created_at(), role.id.created_at());
        assert_eq!(role.created_at().timestamp_millis(), 1_462_015_105_796);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_wire_form() {
        let role = GuildRole::new(
            Snowflake::new(41_771_983_423_143_937),
            "Mods",
            PermissionSet::KICK_MEMBERS,
            3,
        );
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(
            json,
            r#"{"id":"41771983423143937","name":"Mods","permissions":"2","position":3}"#
        );
        assert_eq!(serde_json::from_str::<GuildRole>(&json).unwrap(), role);
    }
}
