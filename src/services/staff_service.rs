//! Staff service - staff account administration and staff sign-in.
//!
//! Every mutation is gated through `domain::access`; the caller's role is
//! whatever the transport layer resolved for the request.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{
    authorize, normalize_login, Password, StaffOperation, StaffRole, StaffUser, StaffUserDraft,
    StaffUserResponse,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Staff user id
    pub sub: i32,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Role carried by the token; `None` if it is not a known role.
    pub fn staff_role(&self) -> Option<StaffRole> {
        self.role.parse().ok()
    }
}

/// Staff sign-in result
#[derive(Debug, Serialize, ToSchema)]
pub struct StaffSession {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
    pub user: StaffUserResponse,
}

/// Staff service trait for dependency injection.
#[async_trait]
pub trait StaffService: Send + Sync {
    /// All staff accounts, newest first. Open to every caller.
    async fn list(&self) -> AppResult<Vec<StaffUser>>;

    async fn create(&self, caller: Option<StaffRole>, draft: StaffUserDraft)
        -> AppResult<StaffUser>;

    /// Overwrite name, phone and role; login and password only when given.
    async fn update(
        &self,
        caller: Option<StaffRole>,
        id: i32,
        draft: StaffUserDraft,
    ) -> AppResult<StaffUser>;

    async fn delete(&self, caller: Option<StaffRole>, id: i32) -> AppResult<()>;

    /// Check credentials and issue an access token.
    async fn login(&self, login: &str, password: &str) -> AppResult<StaffSession>;

    /// Verify a token issued by [`StaffService::login`].
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(user: &StaffUser, config: &Config) -> AppResult<StaffSession> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(StaffSession {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
        user: StaffUserResponse::from(user.clone()),
    })
}

/// Verify a staff token against `config`'s secret.
pub fn verify_token(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of StaffService using Unit of Work.
pub struct StaffManager<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> StaffManager<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> StaffService for StaffManager<U> {
    async fn list(&self) -> AppResult<Vec<StaffUser>> {
        self.uow.staff().list().await
    }

    async fn create(
        &self,
        caller: Option<StaffRole>,
        draft: StaffUserDraft,
    ) -> AppResult<StaffUser> {
        authorize(caller, StaffOperation::Create)?;

        let user = draft.into_new()?;
        let password_hash = Password::new(&user.password)?.into_string();

        let created = with_transaction!(self.uow, |ctx| {
            let staff = ctx.staff();
            if staff.find_by_login(&user.login).await?.is_some() {
                return Err(AppError::conflict("Login"));
            }
            staff.create(user, password_hash).await
        })
        .map_err(|e| match e {
            AppError::Conflict(_) => AppError::conflict("Login"),
            other => other,
        })?;

        tracing::info!(user_id = created.id, role = %created.role, "Staff user created");
        Ok(created)
    }

    async fn update(
        &self,
        caller: Option<StaffRole>,
        id: i32,
        draft: StaffUserDraft,
    ) -> AppResult<StaffUser> {
        authorize(caller, StaffOperation::Update)?;

        let changes = draft.into_changes()?;
        let password_hash = match &changes.password {
            Some(password) => Some(Password::new(password)?.into_string()),
            None => None,
        };

        let updated = with_transaction!(self.uow, |ctx| {
            let staff = ctx.staff();
            if let Some(login) = &changes.login {
                if let Some(holder) = staff.find_by_login(login).await? {
                    if holder.id != id {
                        return Err(AppError::conflict("Login"));
                    }
                }
            }
            staff.update(id, changes, password_hash).await
        })
        .map_err(|e| match e {
            AppError::Conflict(_) => AppError::conflict("Login"),
            other => other,
        })?;

        tracing::info!(user_id = updated.id, role = %updated.role, "Staff user updated");
        Ok(updated)
    }

    async fn delete(&self, caller: Option<StaffRole>, id: i32) -> AppResult<()> {
        authorize(caller, StaffOperation::Delete)?;

        let released = with_transaction!(self.uow, |ctx| {
            let released = ctx.bookings().clear_assignee(id).await?;
            if ctx.staff().delete(id).await? == 0 {
                return Err(AppError::NotFound);
            }
            Ok(released)
        })?;

        tracing::info!(user_id = id, released, "Staff user deleted");
        Ok(())
    }

    async fn login(&self, login: &str, password: &str) -> AppResult<StaffSession> {
        let login = normalize_login(login);
        if login.is_empty() || password.is_empty() {
            return Err(AppError::validation("Login and password are required"));
        }

        let user = self.uow.staff().find_by_login(&login).await?;
        let stored = user.as_ref().and_then(|u| u.password_hash.as_deref());

        if !Password::verify_optional(stored, password) {
            tracing::debug!(login = %login, "Staff sign-in rejected");
            return Err(AppError::InvalidCredentials);
        }

        let user = user.ok_or(AppError::InvalidCredentials)?;
        tracing::info!(user_id = user.id, "Staff signed in");
        generate_token(&user, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockStaffRepository;
    use crate::services::test_support::TestUnitOfWork;

    const SECRET: &str = "test-secret-key-that-is-long-enough!!";

    fn staff_user(role: StaffRole, password: Option<&str>) -> StaffUser {
        StaffUser {
            id: 4,
            full_name: "Anna".into(),
            phone: "1".into(),
            login: Some("anna".into()),
            password_hash: password.map(|p| Password::new(p).unwrap().into_string()),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(repo: MockStaffRepository) -> StaffManager<impl UnitOfWork> {
        let uow = TestUnitOfWork {
            staff: Some(repo),
            ..Default::default()
        };
        StaffManager::new(Arc::new(uow.build()), Config::new(None, SECRET).unwrap())
    }

    fn draft() -> StaffUserDraft {
        StaffUserDraft {
            full_name: "Anna".into(),
            phone: "1".into(),
            role: "manager".into(),
            login: "anna".into(),
            password: "pw".into(),
        }
    }

    #[tokio::test]
    async fn test_non_super_admin_cannot_mutate() {
        let service = service(MockStaffRepository::new());

        for role in [
            None,
            Some(StaffRole::Admin),
            Some(StaffRole::Manager),
            Some(StaffRole::Operator),
        ] {
            assert!(matches!(
                service.create(role, draft()).await,
                Err(AppError::Forbidden)
            ));
            assert!(matches!(
                service.update(role, 1, StaffUserDraft::default()).await,
                Err(AppError::Forbidden)
            ));
            assert!(matches!(service.delete(role, 1).await, Err(AppError::Forbidden)));
        }
    }

    #[tokio::test]
    async fn test_delete_requires_super_admin() {
        let result = service(MockStaffRepository::new())
            .delete(Some(StaffRole::Manager), 9)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_role() {
        let mut bad = draft();
        bad.role = "owner".into();

        let result = service(MockStaffRepository::new())
            .create(Some(StaffRole::SuperAdmin), bad)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let mut repo = MockStaffRepository::new();
        repo.expect_find_by_login()
            .withf(|login| login == "anna")
            .returning(|_| Ok(Some(staff_user(StaffRole::Manager, Some("pw")))));

        let service = service(repo);
        let session = service.login("Anna", "pw").await.unwrap();
        assert_eq!(session.token_type, "Bearer");
        assert_eq!(session.user.id, 4);

        let claims = service.verify_token(&session.access_token).unwrap();
        assert_eq!(claims.sub, 4);
        assert_eq!(claims.staff_role(), Some(StaffRole::Manager));
    }

    #[tokio::test]
    async fn test_login_without_stored_password_fails() {
        let mut repo = MockStaffRepository::new();
        repo.expect_find_by_login()
            .returning(|_| Ok(Some(staff_user(StaffRole::Admin, None))));

        let result = service(repo).login("anna", "anything").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let service = service(MockStaffRepository::new());
        assert!(matches!(service.verify_token("not-a-jwt"), Err(AppError::Jwt(_))));
    }
}
