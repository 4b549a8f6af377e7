use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Role of a user, persisted by name in `users.user_role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    #[sea_orm(string_value = "USER")]
    User,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

impl UserRole {
    /// Granted authority name for this role.
    pub fn authority(&self) -> &'static str {
        match self {
            UserRole::User => "ROLE_USER",
            UserRole::Admin => "ROLE_ADMIN",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorities_are_prefixed() {
        assert_eq!(UserRole::User.authority(), "ROLE_USER");
        assert_eq!(UserRole::Admin.authority(), "ROLE_ADMIN");
    }

    #[test]
    fn stored_value_matches_name() {
        assert_eq!(UserRole::Admin.to_value(), "ADMIN".to_string());
        assert_eq!(UserRole::try_from_value(&"USER".to_string()).unwrap(), UserRole::User);
        assert!(UserRole::try_from_value(&"ROOT".to_string()).is_err());
    }

    #[test]
    fn serde_uses_upper_case() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
        let r: UserRole = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(r, UserRole::User);
    }

    #[test]
    fn default_is_user() {
        assert_eq!(UserRole::default(), UserRole::User);
    }
}
