use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Authorization role attached to every user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Trainer,
    Participant,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Trainer, Role::Participant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Trainer => "TRAINER",
            Role::Participant => "PARTICIPANT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "TRAINER" => Ok(Role::Trainer),
            "PARTICIPANT" => Ok(Role::Participant),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""ADMIN""#);
        assert_eq!(
            serde_json::to_string(&Role::Participant).unwrap(),
            r#""PARTICIPANT""#
        );
    }

    #[test]
    fn test_role_deserialize_rejects_other_casing() {
        assert!(serde_json::from_str::<Role>(r#""trainer""#).is_err());
        assert_eq!(
            serde_json::from_str::<Role>(r#""TRAINER""#).unwrap(),
            Role::Trainer
        );
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" Trainer ".parse::<Role>().unwrap(), Role::Trainer);
        assert!("student".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_display_matches_as_str() {
        for role in Role::ALL {
            assert_eq!(role.to_string(), role.as_str());
        }
    }
}
