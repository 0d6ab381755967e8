use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument, warn};

use crate::dto::user_dto::{
    AdminCreateUserRequest, AdminUpdateUserRequest, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse, UserView,
};
use crate::model::user::{User, UserRole};
use crate::repository::profile_repo::ProfileRepository;
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use crate::util::jwt::{TokenIssuer, TokenPair};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

#[async_trait]
pub trait UserService: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, ServiceError>;
    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ServiceError>;
    async fn refresh_token(&self, refresh_token: String) -> Result<TokenPair, ServiceError>;

    // Admin-only operations; the router gates them behind the admin middleware
    async fn list_users(&self) -> Result<Vec<UserView>, ServiceError>;
    async fn create_user(&self, request: AdminCreateUserRequest) -> Result<UserView, ServiceError>;
    async fn update_user(
        &self,
        id: &str,
        request: AdminUpdateUserRequest,
    ) -> Result<UserView, ServiceError>;
    async fn delete_user(&self, id: &str) -> Result<(), ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
    pub profile_repo: Arc<dyn ProfileRepository>,
    pub token_issuer: Arc<dyn TokenIssuer>,
}

impl UserServiceImpl {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        profile_repo: Arc<dyn ProfileRepository>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            user_repo,
            profile_repo,
            token_issuer,
        }
    }

    /// Role string from a self-registration. An absent or empty role means
    /// public_visitor; staff and admin accounts are only created through the
    /// admin surface.
    fn parse_public_role(role: Option<&str>) -> Result<UserRole, ServiceError> {
        let role = match role.map(str::trim) {
            None | Some("") => return Ok(UserRole::PublicVisitor),
            Some(role) => role,
        };
        match UserRole::parse(role) {
            Some(UserRole::Admin) | Some(UserRole::Staff) | None => Err(
                ServiceError::validation_field("role", "Choose a valid account type."),
            ),
            Some(role) => Ok(role),
        }
    }

    fn parse_any_role(role: &str) -> Result<UserRole, ServiceError> {
        UserRole::parse(role)
            .ok_or_else(|| ServiceError::validation_field("role", "Unknown role."))
    }

    fn check_university_rule(
        role: UserRole,
        university_name: &Option<String>,
    ) -> Result<(), ServiceError> {
        if role.requires_university()
            && university_name.as_deref().map_or(true, |u| u.trim().is_empty())
        {
            return Err(ServiceError::MissingField("university_name"));
        }
        Ok(())
    }

    fn parse_object_id(id: &str) -> Result<ObjectId, ServiceError> {
        ObjectId::parse_str(id)
            .map_err(|_| ServiceError::NotFound(format!("User not found: {}", id)))
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, ServiceError> {
        info!("Registering new user");

        let role = Self::parse_public_role(request.role.as_deref())?;
        Self::check_university_rule(role, &request.university_name)?;

        let email = request.email.trim().to_lowercase();
        if self.user_repo.find_by_email(&email).await?.is_some() {
            warn!("Registration rejected: email already in use");
            return Err(ServiceError::DuplicateEmail);
        }

        let hash = PasswordUtilsImpl::hash_password(&request.password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        let user = User {
            id: None,
            username: request.username.trim().to_string(),
            email,
            password_hash: hash,
            role,
            phone_number: request.phone_number,
            university_name: request.university_name,
            created_at: None,
            updated_at: None,
        };

        let inserted = self.user_repo.insert(user).await.map_err(|e| {
            error!("Failed to insert user: {}", e);
            ServiceError::from(e)
        })?;

        info!("User registered successfully");
        Ok(RegisterResponse {
            redirect: inserted.role.redirect_path().to_string(),
            user: UserView::from_user(&inserted),
        })
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ServiceError> {
        info!("Authenticating user");

        let email = request.email.trim().to_lowercase();
        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                // Pay the hash cost anyway so the response time does not
                // distinguish unknown emails from wrong passwords
                PasswordUtilsImpl::verify_dummy(&request.password);
                warn!("Login failed: unknown email");
                return Err(ServiceError::InvalidCredentials);
            }
        };

        let verified = PasswordUtilsImpl::verify_password(&request.password, &user.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !verified {
            warn!("Login failed: wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        let user_id = user.id.map(|id| id.to_hex()).unwrap_or_default();
        let tokens = self
            .token_issuer
            .generate_token_pair(&user_id, &user.email, user.role.as_str())
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;

        info!("User authenticated successfully");
        Ok(LoginResponse {
            redirect: user.role.redirect_path().to_string(),
            user: UserView::from_user(&user),
            tokens,
        })
    }

    #[instrument(skip(self, refresh_token))]
    async fn refresh_token(&self, refresh_token: String) -> Result<TokenPair, ServiceError> {
        let claims = self
            .token_issuer
            .validate_refresh_token(&refresh_token)
            .map_err(|_| ServiceError::Unauthenticated)?;

        // The account must still exist; deleted users do not get new tokens
        let user_id = Self::parse_object_id(&claims.sub)
            .map_err(|_| ServiceError::Unauthenticated)?;
        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(ServiceError::Unauthenticated)?;

        let tokens = self
            .token_issuer
            .generate_token_pair(&claims.sub, &user.email, user.role.as_str())
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;

        info!("Token pair refreshed for user: {}", claims.sub);
        Ok(tokens)
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserView>, ServiceError> {
        let users = self.user_repo.list().await?;
        Ok(users.iter().map(UserView::from_user).collect())
    }

    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    async fn create_user(&self, request: AdminCreateUserRequest) -> Result<UserView, ServiceError> {
        info!("Admin creating user");

        if request.password != request.confirm_password {
            return Err(ServiceError::validation_field(
                "confirm_password",
                "Passwords do not match.",
            ));
        }

        let role = Self::parse_any_role(&request.role)?;
        Self::check_university_rule(role, &request.university_name)?;

        let email = request.email.trim().to_lowercase();
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::DuplicateEmail);
        }

        let hash = PasswordUtilsImpl::hash_password(&request.password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        let user = User {
            id: None,
            username: request.username.trim().to_string(),
            email,
            password_hash: hash,
            role,
            phone_number: request.phone_number,
            university_name: request.university_name,
            created_at: None,
            updated_at: None,
        };

        let inserted = self.user_repo.insert(user).await?;
        info!("Admin created user successfully");
        Ok(UserView::from_user(&inserted))
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update_user(
        &self,
        id: &str,
        request: AdminUpdateUserRequest,
    ) -> Result<UserView, ServiceError> {
        let user_id = Self::parse_object_id(id)?;
        let mut user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User not found: {}", id)))?;

        if let Some(username) = request.username {
            user.username = username.trim().to_string();
        }
        if let Some(email) = request.email {
            let email = email.trim().to_lowercase();
            if email != user.email {
                if self.user_repo.find_by_email(&email).await?.is_some() {
                    return Err(ServiceError::DuplicateEmail);
                }
                user.email = email;
            }
        }
        if let Some(role) = request.role {
            user.role = Self::parse_any_role(&role)?;
        }
        if let Some(phone_number) = request.phone_number {
            user.phone_number = Some(phone_number);
        }
        if let Some(university_name) = request.university_name {
            user.university_name = Some(university_name);
        }
        Self::check_university_rule(user.role, &user.university_name)?;

        let updated = self.user_repo.update(user_id, user).await?;
        info!("Admin updated user successfully");
        Ok(UserView::from_user(&updated))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_user(&self, id: &str) -> Result<(), ServiceError> {
        let user_id = Self::parse_object_id(id)?;
        self.user_repo.delete(user_id).await?;
        // The profile rides along with the account
        self.profile_repo.delete_by_user(&user_id).await?;
        info!("Admin deleted user successfully");
        Ok(())
    }
}
