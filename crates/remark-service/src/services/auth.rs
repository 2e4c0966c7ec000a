//! Authentication service
//!
//! Handles registration, login, token refresh, bearer-token resolution and
//! the startup admin account.

use remark_common::auth::verify_or_reject;
use remark_common::{AppError, BootstrapAdminConfig};
use remark_core::entities::{Role, User};
use remark_core::{ActorContext, DomainError};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::user::AccountFields;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new USER account
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let fields = AccountFields::collect(
            request.login,
            request.password,
            request.password_confirmation,
            request.full_name,
            request.email,
        )?;

        if self.ctx.user_repo().email_exists(&fields.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let user = self
            .ctx
            .user_repo()
            .create(&fields.into_new_user(Role::User)?)
            .await?;

        info!(user_id = %user.id, "User registered successfully");

        self.issue_tokens(user)
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        verify_or_reject(&request.password, &password_hash).map_err(|e| {
            warn!(user_id = %user.id, "Login failed: invalid password");
            ServiceError::from(e)
        })?;

        info!(user_id = %user.id, "User logged in successfully");

        self.issue_tokens(user)
    }

    /// Trade a refresh token for a new pair
    ///
    /// The account must still exist.
    #[instrument(skip(self, request))]
    pub async fn refresh_token(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let (user_id, pair) = self
            .ctx
            .jwt_service()
            .refresh_tokens(&request.refresh_token)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        info!(user_id = %user_id, "Tokens refreshed");

        Ok(AuthResponse::new(
            pair.access_token,
            pair.refresh_token,
            pair.expires_in,
            UserResponse::from(user),
        ))
    }

    /// Resolve a bearer access token to the acting user
    ///
    /// The role comes from the store, not the token, so a demotion applies to
    /// tokens issued before it.
    pub async fn authenticate(&self, access_token: &str) -> ServiceResult<ActorContext> {
        let claims = self.ctx.jwt_service().validate_access_token(access_token)?;
        let user_id = claims.user_id()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        Ok(ActorContext::from(&user))
    }

    /// Create the configured admin account unless its email is already taken
    ///
    /// Returns whether an account was created.
    #[instrument(skip(self, admin), fields(email = %admin.email))]
    pub async fn ensure_bootstrap_admin(&self, admin: &BootstrapAdminConfig) -> ServiceResult<bool> {
        if self.ctx.user_repo().email_exists(&admin.email).await? {
            info!("Bootstrap admin already present");
            return Ok(false);
        }

        let fields = AccountFields::collect(
            Some(admin.login.clone()),
            Some(admin.password.clone()),
            Some(admin.password.clone()),
            Some(admin.login.clone()),
            Some(admin.email.clone()),
        )?;

        let user = self
            .ctx
            .user_repo()
            .create(&fields.into_new_user(Role::Admin)?)
            .await?;

        info!(user_id = %user.id, "Bootstrap admin created");

        Ok(true)
    }

    fn issue_tokens(&self, user: User) -> ServiceResult<AuthResponse> {
        let pair = self.ctx.jwt_service().generate_token_pair(user.id)?;

        Ok(AuthResponse::new(
            pair.access_token,
            pair.refresh_token,
            pair.expires_in,
            UserResponse::from(user),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{seed_user, Fixture};
    use remark_core::traits::UserRepository;

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            login: Some("newbie".into()),
            password: Some("long-enough-pw".into()),
            password_confirmation: Some("long-enough-pw".into()),
            full_name: Some("New Bie".into()),
            email: Some(email.into()),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let fx = Fixture::new();
        let service = AuthService::new(&fx.ctx);

        let registered = service
            .register(register_request("newbie@example.com"))
            .await
            .unwrap();
        assert_eq!(registered.user.role, Role::User);
        assert_eq!(registered.token_type, "Bearer");

        let logged_in = service
            .login(LoginRequest {
                email: "newbie@example.com".into(),
                password: "long-enough-pw".into(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);

        let actor = service.authenticate(&logged_in.access_token).await.unwrap();
        assert_eq!(actor.id, registered.user.id);
        assert_eq!(actor.role, Role::User);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let fx = Fixture::new();
        let service = AuthService::new(&fx.ctx);

        service
            .register(register_request("dup@example.com"))
            .await
            .unwrap();
        let err = service
            .register(register_request("dup@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Email is already taken");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let fx = Fixture::new();
        let service = AuthService::new(&fx.ctx);
        service
            .register(register_request("pw@example.com"))
            .await
            .unwrap();

        let err = service
            .login(LoginRequest {
                email: "pw@example.com".into(),
                password: "wrong-password".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_authenticate_reads_current_role() {
        let fx = Fixture::new();
        let user = seed_user(&fx.store, "promoted", Role::User).await;
        let pair = fx.ctx.jwt_service().generate_token_pair(user.id).unwrap();

        fx.store.update_role(user.id, Role::Admin).await.unwrap();

        let actor = AuthService::new(&fx.ctx)
            .authenticate(&pair.access_token)
            .await
            .unwrap();
        assert!(actor.is_admin());
    }

    #[tokio::test]
    async fn test_authenticate_deleted_user_is_unauthorized() {
        let fx = Fixture::new();
        let user = seed_user(&fx.store, "gone", Role::User).await;
        let pair = fx.ctx.jwt_service().generate_token_pair(user.id).unwrap();
        fx.store.delete_cascade(user.id).await.unwrap();

        let err = AuthService::new(&fx.ctx)
            .authenticate(&pair.access_token)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_refresh_token() {
        let fx = Fixture::new();
        let user = seed_user(&fx.store, "refresher", Role::User).await;
        let pair = fx.ctx.jwt_service().generate_token_pair(user.id).unwrap();
        let service = AuthService::new(&fx.ctx);

        let refreshed = service
            .refresh_token(RefreshTokenRequest {
                refresh_token: pair.refresh_token.clone(),
            })
            .await
            .unwrap();
        assert_eq!(refreshed.user.id, user.id);

        // An access token is not accepted as a refresh token
        let err = service
            .refresh_token(RefreshTokenRequest {
                refresh_token: pair.access_token,
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_bootstrap_admin_is_idempotent() {
        let fx = Fixture::new();
        let config = BootstrapAdminConfig {
            email: "root@example.com".into(),
            password: "bootstrap-pw".into(),
            login: "root".into(),
        };
        let service = AuthService::new(&fx.ctx);

        assert!(service.ensure_bootstrap_admin(&config).await.unwrap());
        assert!(!service.ensure_bootstrap_admin(&config).await.unwrap());

        let admin = fx
            .store
            .find_by_email("root@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
    }
}
