//! User service
//!
//! Admin-side user management: listing, creation, role changes and deletion
//! with the cascade over comments and reactions.

use remark_common::auth::hash_password;
use remark_core::entities::{NewUser, Role, User};
use remark_core::policy::{AuthorizationGate, Requirement};
use remark_core::{ActorContext, DomainError, EntityId};
use tracing::{info, instrument};
use validator::ValidateEmail;

use crate::dto::{
    CreateUserRequest, MessageResponse, UpdateUserRequest, UserMutationResponse, UserResponse,
    UserSummaryResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const FORBIDDEN_MESSAGE: &str = "Forbidden: insufficient rights";

const INVALID_EMAIL_MESSAGE: &str = "Invalid email format";

/// Account fields that passed the presence, confirmation and email checks
pub(crate) struct AccountFields {
    pub login: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
}

impl AccountFields {
    /// Check that every field is present, the confirmation matches and the
    /// email is well formed
    pub(crate) fn collect(
        login: Option<String>,
        password: Option<String>,
        password_confirmation: Option<String>,
        full_name: Option<String>,
        email: Option<String>,
    ) -> ServiceResult<Self> {
        let (Some(login), Some(password), Some(full_name), Some(email)) = (
            present(login),
            present(password),
            present(full_name),
            present(email),
        ) else {
            return Err(ServiceError::validation(
                "Email, password, login, and full name are required",
            ));
        };

        if password_confirmation.as_deref() != Some(password.as_str()) {
            return Err(DomainError::PasswordMismatch.into());
        }

        let email = email.trim().to_string();
        if !email.validate_email() {
            return Err(ServiceError::validation(INVALID_EMAIL_MESSAGE));
        }

        Ok(Self {
            login: login.trim().to_string(),
            password,
            full_name: full_name.trim().to_string(),
            email,
        })
    }

    /// Hash the password and build the row to insert
    pub(crate) fn into_new_user(self, role: Role) -> ServiceResult<NewUser> {
        let password_hash =
            hash_password(&self.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(NewUser {
            login: self.login,
            full_name: self.full_name,
            email: self.email,
            role,
            password_hash,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List every user as `{id, email, role}`
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> ServiceResult<Vec<UserSummaryResponse>> {
        let users = self.ctx.user_repo().find_all().await?;

        if users.is_empty() {
            return Err(DomainError::NoUsersFound.into());
        }

        Ok(users.iter().map(UserSummaryResponse::from).collect())
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: EntityId) -> ServiceResult<UserResponse> {
        Ok(UserResponse::from(self.load(user_id).await?))
    }

    /// Create a user on behalf of an admin
    #[instrument(skip(self, request), fields(actor_id = %actor.id))]
    pub async fn create_user(
        &self,
        actor: &ActorContext,
        request: CreateUserRequest,
    ) -> ServiceResult<UserMutationResponse> {
        AuthorizationGate::require(actor, &Requirement::admin_only(), FORBIDDEN_MESSAGE)?;

        let fields = AccountFields::collect(
            request.login,
            request.password,
            request.password_confirmation,
            request.full_name,
            request.email,
        )?;

        let role = match present(request.role) {
            Some(raw) => raw.parse::<Role>()?,
            None => Role::User,
        };

        if self.ctx.user_repo().email_exists(&fields.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let user = self
            .ctx
            .user_repo()
            .create(&fields.into_new_user(role)?)
            .await?;

        info!(user_id = %user.id, role = %user.role, "User created");

        Ok(UserMutationResponse {
            message: "User created successfully".to_string(),
            user: UserResponse::from(user),
        })
    }

    /// Change a user's role
    ///
    /// An absent role leaves the user untouched.
    #[instrument(skip(self, request), fields(actor_id = %actor.id))]
    pub async fn update_user(
        &self,
        actor: &ActorContext,
        user_id: EntityId,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserMutationResponse> {
        let role = present(request.role)
            .map(|raw| raw.parse::<Role>())
            .transpose()?;

        let user = self.load(user_id).await?;
        AuthorizationGate::require(actor, &Requirement::admin_only(), FORBIDDEN_MESSAGE)?;

        let Some(role) = role else {
            return Ok(UserMutationResponse {
                message: "No changes applied".to_string(),
                user: UserResponse::from(user),
            });
        };

        let user = self
            .ctx
            .user_repo()
            .update_role(user_id, role)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        info!(user_id = %user.id, role = %user.role, "User role updated");

        Ok(UserMutationResponse {
            message: "User role updated successfully".to_string(),
            user: UserResponse::from(user),
        })
    }

    /// Delete a user with their comments and every reaction tied to either
    #[instrument(skip(self), fields(actor_id = %actor.id))]
    pub async fn delete_user(
        &self,
        actor: &ActorContext,
        user_id: EntityId,
    ) -> ServiceResult<MessageResponse> {
        self.load(user_id).await?;
        AuthorizationGate::require(actor, &Requirement::admin_only(), FORBIDDEN_MESSAGE)?;

        if !self.ctx.user_repo().delete_cascade(user_id).await? {
            return Err(DomainError::UserNotFound.into());
        }

        info!(user_id = %user_id, "User deleted with related data");

        Ok(MessageResponse::new("User and related data deleted successfully"))
    }

    async fn load(&self, user_id: EntityId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound.into())
    }
}
