//! Per-permission state inside an overwrite.

/// How an overwrite treats one permission.
///
/// Not to be confused with [`PermissionSet`](super::PermissionSet): a set holds
/// many permissions, a level describes exactly one of them within a single
/// overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PermissionLevel {
    /// Explicitly granted.
    Allowed,
    /// Explicitly revoked.
    Denied,
    /// Falls through to the role-derived baseline.
    #[default]
    Unset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unset() {
        assert_eq!(PermissionLevel::default(), PermissionLevel::Unset);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&PermissionLevel::Denied).unwrap();
        assert_eq!(json, "\"denied\"");

        let level: PermissionLevel = serde_json::from_str("\"unset\"").unwrap();
        assert_eq!(level, PermissionLevel::Unset);
    }
}
