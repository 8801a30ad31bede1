//! Portal roles.

use crate::error::ParseKeyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The role a directory record carries.
///
/// Every user has exactly one role, fixed at directory load time. The
/// role alone decides which routes a signed-in user may reach; there
/// are no per-user grants layered on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Parent,
    Student,
}

impl Role {
    /// Returns the lowercase wire name of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Parent => "parent",
            Role::Student => "student",
        }
    }

    /// Returns true for roles whose results views operate on dependents
    /// rather than on the signed-in user themselves.
    #[must_use]
    pub fn is_guardian(&self) -> bool {
        matches!(self, Role::Parent)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "parent" => Ok(Role::Parent),
            "student" => Ok(Role::Student),
            other => Err(ParseKeyError::new(
                "Role",
                format!("unknown role {other:?}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_roundtrip_through_strings() {
        for role in [Role::Admin, Role::Staff, Role::Parent, Role::Student] {
            let parsed: Role = role.as_str().parse().expect("parse role");
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        let role: Role = "ADMIN".parse().expect("parse role");
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn parse_rejects_unknown_role() {
        let err = "teacher".parse::<Role>().unwrap_err();
        assert_eq!(err.key_type, "Role");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Role::Parent).expect("serialize");
        assert_eq!(json, "\"parent\"");
        let parsed: Role = serde_json::from_str("\"student\"").expect("deserialize");
        assert_eq!(parsed, Role::Student);
    }

    #[test]
    fn only_parents_are_guardians() {
        assert!(Role::Parent.is_guardian());
        assert!(!Role::Admin.is_guardian());
        assert!(!Role::Staff.is_guardian());
        assert!(!Role::Student.is_guardian());
    }
}
