//! Client domain entity: self-registered customers of the public site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::staff::normalize_login;
use crate::errors::{AppError, AppResult};

/// Client domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Registration fields as submitted
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ClientRegistration {
    #[serde(default)]
    #[validate(length(max = 255, message = "Full name is too long"))]
    #[schema(example = "Ann")]
    pub full_name: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "Email is too long"))]
    #[schema(example = "ann@x.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 64, message = "Phone is too long"))]
    #[schema(example = "+7 900 000-00-00")]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 64, message = "Login is too long"))]
    #[schema(example = "ann1")]
    pub login: String,
    #[serde(default)]
    #[validate(length(max = 128, message = "Password is too long"))]
    #[schema(example = "secret")]
    pub password: String,
}

impl ClientRegistration {
    pub fn into_new(self) -> AppResult<NewClient> {
        NewClient::parse(
            &self.full_name,
            &self.email,
            &self.phone,
            &self.login,
            &self.password,
        )
    }
}

/// Normalized registration data
#[derive(Debug, Clone)]
pub struct NewClient {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub login: String,
    pub password: String,
}

impl NewClient {
    /// Trim every field, lower-case email and login, and require
    /// name, email, login and password.
    pub fn parse(
        full_name: &str,
        email: &str,
        phone: &str,
        login: &str,
        password: &str,
    ) -> AppResult<Self> {
        let full_name = full_name.trim().to_string();
        let email = email.trim().to_lowercase();
        let phone = phone.trim().to_string();
        let login = normalize_login(login);
        let password = password.trim().to_string();

        if full_name.is_empty() || email.is_empty() || login.is_empty() || password.is_empty() {
            return Err(AppError::validation(
                "Full name, email, login and password are required",
            ));
        }

        Ok(Self {
            full_name,
            email,
            phone,
            login,
            password,
        })
    }
}

/// Public client profile (never carries the hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ClientProfile {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ann")]
    pub full_name: String,
    #[schema(example = "ann@x.com")]
    pub email: String,
    #[schema(example = "+7 900 000-00-00")]
    pub phone: String,
    #[schema(example = "ann1")]
    pub login: String,
}

impl From<Client> for ClientProfile {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            full_name: client.full_name,
            email: client.email,
            phone: client.phone,
            login: client.login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let c = NewClient::parse(" Ann ", " Ann@X.com ", " 1 ", " Ann1 ", " secret ").unwrap();
        assert_eq!(c.full_name, "Ann");
        assert_eq!(c.email, "ann@x.com");
        assert_eq!(c.phone, "1");
        assert_eq!(c.login, "ann1");
        assert_eq!(c.password, "secret");
    }

    #[test]
    fn test_phone_is_optional() {
        assert!(NewClient::parse("Ann", "ann@x.com", "", "ann1", "secret").is_ok());
    }

    #[test]
    fn test_required_fields() {
        assert!(NewClient::parse("", "ann@x.com", "", "ann1", "secret").is_err());
        assert!(NewClient::parse("Ann", " ", "", "ann1", "secret").is_err());
        assert!(NewClient::parse("Ann", "ann@x.com", "", "", "secret").is_err());
        assert!(NewClient::parse("Ann", "ann@x.com", "", "ann1", "  ").is_err());
    }
}
