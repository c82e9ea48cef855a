use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

/// The kind of account a user holds
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[cfg_attr(feature = "database", derive(sea_orm::DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    #[cfg_attr(feature = "database", sea_orm(string_value = "student"))]
    Student,
    #[cfg_attr(feature = "database", sea_orm(string_value = "parent"))]
    Parent,
    #[cfg_attr(feature = "database", sea_orm(string_value = "admin"))]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    pub fn all() -> Vec<Role> {
        Role::iter().collect()
    }

    /// Whether an account with this role may be created through public registration
    pub fn is_self_assignable(&self) -> bool {
        !matches!(self, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trips_through_strings() {
        for role in Role::all() {
            assert_eq!(Role::from_str(role.as_str()), Ok(role));
        }
        assert!(Role::from_str("teacher").is_err());
    }

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Parent).unwrap(), "\"parent\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_only_admin_is_reserved() {
        assert!(Role::Student.is_self_assignable());
        assert!(Role::Parent.is_self_assignable());
        assert!(!Role::Admin.is_self_assignable());
        assert_eq!(Role::default(), Role::Student);
    }
}
