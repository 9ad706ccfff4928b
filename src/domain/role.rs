//! User roles
//!
//! The role set is closed: every `users.role` column value is one of these
//! three literals. Gate configuration is expressed in terms of this enum, so
//! a required-role set can never name a role that no user can hold.

use serde::{Deserialize, Serialize};

/// Marketplace role carried by every user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Role {
    Buyer,
    Seller,
    Admin,
}

impl Role {
    /// All known roles, in ascending privilege order.
    pub const ALL: [Role; 3] = [Role::Buyer, Role::Seller, Role::Admin];

    /// Parse a role literal as attached by the identity collaborator.
    ///
    /// Unknown literals yield `None` rather than an error: an unrecognized
    /// role must never match a required-role set, and must never crash the
    /// request.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "BUYER" => Some(Role::Buyer),
            "SELLER" => Some(Role::Seller),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Wire literal for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "BUYER",
            Role::Seller => "SELLER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_literals() {
        assert_eq!(Role::parse("BUYER"), Some(Role::Buyer));
        assert_eq!(Role::parse("SELLER"), Some(Role::Seller));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
    }

    #[test]
    fn test_parse_unknown_literals_fail_closed() {
        assert_eq!(Role::parse("AGENT"), None);
        assert_eq!(Role::parse("USER"), None);
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_serde_literals() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        let role: Role = serde_json::from_str("\"SELLER\"").unwrap();
        assert_eq!(role, Role::Seller);
    }
}
