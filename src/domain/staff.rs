//! Staff user domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{ROLE_ADMIN, ROLE_MANAGER, ROLE_OPERATOR, ROLE_SUPER_ADMIN, VALID_ROLES};
use crate::errors::AppError;

/// Staff roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    SuperAdmin,
    Admin,
    Manager,
    Operator,
}

impl StaffRole {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::SuperAdmin => ROLE_SUPER_ADMIN,
            StaffRole::Admin => ROLE_ADMIN,
            StaffRole::Manager => ROLE_MANAGER,
            StaffRole::Operator => ROLE_OPERATOR,
        }
    }
}

impl FromStr for StaffRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ROLE_SUPER_ADMIN => Ok(StaffRole::SuperAdmin),
            ROLE_ADMIN => Ok(StaffRole::Admin),
            ROLE_MANAGER => Ok(StaffRole::Manager),
            ROLE_OPERATOR => Ok(StaffRole::Operator),
            other => Err(AppError::validation(format!(
                "Invalid role: {}. Expected one of: {}",
                other,
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

impl From<StaffRole> for String {
    fn from(role: StaffRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff user domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUser {
    pub id: i32,
    pub full_name: String,
    pub phone: String,
    /// Legacy rows created before staff login existed have no login.
    pub login: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub role: StaffRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated data for a new staff account
#[derive(Debug, Clone)]
pub struct NewStaffUser {
    pub full_name: String,
    pub phone: String,
    pub role: StaffRole,
    pub login: String,
    pub password: String,
}

/// Validated replacement data for a staff account.
///
/// `login` and `password` are `None` when the request left them empty,
/// which keeps the stored values.
#[derive(Debug, Clone)]
pub struct StaffUserChanges {
    pub full_name: String,
    pub phone: String,
    pub role: StaffRole,
    pub login: Option<String>,
    pub password: Option<String>,
}

/// Raw staff fields as submitted by a caller, before validation.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct StaffUserDraft {
    /// Full name
    #[serde(default)]
    #[validate(length(max = 255, message = "Full name is too long"))]
    #[schema(example = "Anna Petrova")]
    pub full_name: String,
    /// Contact phone
    #[serde(default)]
    #[validate(length(max = 64, message = "Phone is too long"))]
    #[schema(example = "+7 900 000-00-00")]
    pub phone: String,
    /// One of super_admin, admin, manager, operator
    #[serde(default)]
    #[schema(example = "manager")]
    pub role: String,
    /// Login used for staff sign-in
    #[serde(default)]
    #[validate(length(max = 64, message = "Login is too long"))]
    #[schema(example = "anna")]
    pub login: String,
    /// Plain password; empty on update keeps the current one
    #[serde(default)]
    #[validate(length(max = 128, message = "Password is too long"))]
    #[schema(example = "s3cret")]
    pub password: String,
}

impl StaffUserDraft {
    fn required_fields(&self) -> Result<(String, String, StaffRole), AppError> {
        let full_name = self.full_name.trim();
        let phone = self.phone.trim();
        let role = self.role.trim();

        if full_name.is_empty() || phone.is_empty() || role.is_empty() {
            return Err(AppError::validation("Full name, phone and role are required"));
        }

        Ok((full_name.to_string(), phone.to_string(), role.parse()?))
    }

    /// Validate for account creation; login and password are mandatory.
    pub fn into_new(self) -> Result<NewStaffUser, AppError> {
        let (full_name, phone, role) = self.required_fields()?;
        let login = normalize_login(&self.login);

        if login.is_empty() || self.password.trim().is_empty() {
            return Err(AppError::validation("Login and password are required"));
        }

        Ok(NewStaffUser {
            full_name,
            phone,
            role,
            login,
            password: self.password,
        })
    }

    /// Validate for update; empty login/password mean "keep current".
    pub fn into_changes(self) -> Result<StaffUserChanges, AppError> {
        let (full_name, phone, role) = self.required_fields()?;
        let login = Some(normalize_login(&self.login)).filter(|l| !l.is_empty());
        let password = Some(self.password).filter(|p| !p.trim().is_empty());

        Ok(StaffUserChanges {
            full_name,
            phone,
            role,
            login,
            password,
        })
    }
}

/// Logins are compared trimmed and case-insensitively.
pub fn normalize_login(login: &str) -> String {
    login.trim().to_lowercase()
}

/// Staff user response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StaffUserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Anna Petrova")]
    pub full_name: String,
    #[schema(example = "+7 900 000-00-00")]
    pub phone: String,
    #[schema(example = "anna")]
    pub login: Option<String>,
    pub role: StaffRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StaffUser> for StaffUserResponse {
    fn from(user: StaffUser) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            phone: user.phone,
            login: user.login,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> StaffUserDraft {
        StaffUserDraft {
            full_name: " Anna ".to_string(),
            phone: "123".to_string(),
            role: "manager".to_string(),
            login: " Anna ".to_string(),
            password: "pw".to_string(),
        }
    }

    #[test]
    fn test_role_round_trip_names() {
        for name in crate::config::VALID_ROLES {
            let role: StaffRole = name.parse().unwrap();
            assert_eq!(role.as_str(), *name);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        match "root".parse::<StaffRole>() {
            Err(AppError::Validation(msg)) => {
                assert!(msg.starts_with("Invalid role: root"));
                assert!(msg.contains("super_admin, admin, manager, operator"));
            }
            other => panic!("unexpected: {:?}", other),
        }
        let mut d = draft();
        d.role = "owner".to_string();
        assert!(matches!(d.into_new(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_new_requires_credentials() {
        let mut d = draft();
        d.password = String::new();
        assert!(d.into_new().is_err());
    }

    #[test]
    fn test_new_normalizes() {
        let new = draft().into_new().unwrap();
        assert_eq!(new.full_name, "Anna");
        assert_eq!(new.login, "anna");
        assert_eq!(new.role, StaffRole::Manager);
    }

    #[test]
    fn test_changes_keep_empty_credentials() {
        let mut d = draft();
        d.login = "  ".to_string();
        d.password = String::new();
        let changes = d.into_changes().unwrap();
        assert!(changes.login.is_none());
        assert!(changes.password.is_none());
    }

    #[test]
    fn test_changes_require_name_phone_role() {
        let mut d = draft();
        d.phone = String::new();
        assert!(matches!(d.into_changes(), Err(AppError::Validation(_))));
    }
}
