use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::admin_user_conf::AdminUserConfig;
use crate::config::app_conf::AppConfig;
use crate::config::email_conf::EmailConfig;
use crate::config::jwt_conf::JwtConfig;
use crate::config::minio_conf::MinioConfig;
use crate::config::mongo_conf::MongoConfig;
use crate::middlewares::admin_middleware::AdminAuthState;
use crate::middlewares::auth_middleware::AuthState;
use crate::model::user::{User, UserRole};
use crate::repository::event_repo::MongoEventRepository;
use crate::repository::profile_repo::MongoProfileRepository;
use crate::repository::submission_repo::MongoSubmissionRepository;
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::router::{
    admin_router, contact_router, event_router, health_router, profile_router, submission_router,
    user_router,
};
use crate::service::contact_service::ContactServiceImpl;
use crate::service::event_service::EventServiceImpl;
use crate::service::profile_service::ProfileServiceImpl;
use crate::service::review_service::ReviewServiceImpl;
use crate::service::submission_service::SubmissionServiceImpl;
use crate::service::user_service::UserServiceImpl;
use crate::util::email::SmtpEmailService;
use crate::util::jwt::TokenIssuerImpl;
use crate::util::minio::MinioService;
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};
use crate::util::policy::AccessPolicy;

pub struct App {
    config: AppConfig,
    router: Router,
    pub user_service: Arc<UserServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();

        let jwt_config = JwtConfig::from_env().expect("JWT config error");
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");
        let minio_config = MinioConfig::from_env().expect("MinIO config error");
        let email_config = EmailConfig::from_env().expect("Email config error");

        let user_repo = Arc::new(
            MongoUserRepository::new(&mongo_config)
                .await
                .expect("User repo error"),
        );
        let profile_repo = Arc::new(
            MongoProfileRepository::new(&mongo_config)
                .await
                .expect("Profile repo error"),
        );
        let submission_repo = Arc::new(
            MongoSubmissionRepository::new(&mongo_config)
                .await
                .expect("Submission repo error"),
        );
        let event_repo = Arc::new(
            MongoEventRepository::new(&mongo_config)
                .await
                .expect("Event repo error"),
        );

        let token_issuer = Arc::new(TokenIssuerImpl::new(jwt_config));
        let blob_storage = Arc::new(
            MinioService::new(minio_config)
                .await
                .expect("MinIO service error"),
        );
        let email_service =
            Arc::new(SmtpEmailService::new(email_config).expect("Email service error"));
        let policy = AccessPolicy::new();

        let user_service = Arc::new(UserServiceImpl::new(
            user_repo.clone(),
            profile_repo.clone(),
            token_issuer.clone(),
        ));
        let profile_service = Arc::new(ProfileServiceImpl::new(
            profile_repo.clone(),
            user_repo.clone(),
            blob_storage.clone(),
        ));
        let submission_service = Arc::new(SubmissionServiceImpl::new(
            submission_repo.clone(),
            profile_repo.clone(),
            blob_storage.clone(),
        ));
        let review_service = Arc::new(ReviewServiceImpl::new(
            submission_repo,
            user_repo,
            blob_storage,
            policy,
        ));
        let event_service = Arc::new(EventServiceImpl::new(event_repo));
        let contact_service = Arc::new(ContactServiceImpl::new(email_service));

        let auth_state = Arc::new(AuthState {
            token_issuer: token_issuer.clone(),
        });
        let admin_state = Arc::new(AdminAuthState {
            token_issuer,
            policy,
        });

        let router = Router::new()
            .merge(user_router(user_service.clone()))
            .merge(profile_router(profile_service, auth_state.clone()))
            .merge(submission_router(submission_service, auth_state))
            .merge(event_router(event_service, admin_state.clone()))
            .merge(admin_router(review_service, user_service.clone(), admin_state))
            .merge(contact_router(contact_service))
            .merge(health_router());

        let app = App {
            config,
            router,
            user_service,
        };
        app.create_first_admin_user().await;
        app
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(
            self.config.host.parse().expect("Invalid host"),
            self.config.port,
        );
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router)
            .await
            .expect("Failed to start server");
    }

    /// Bootstrap the first admin account from environment configuration.
    /// Idempotent: an existing account with the same email wins.
    async fn create_first_admin_user(&self) {
        let admin_conf = match AdminUserConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                warn!("Admin user config not loaded: {e}");
                return;
            }
        };

        let user_repo = self.user_service.user_repo.clone();
        match user_repo.find_by_email(&admin_conf.email).await {
            Ok(Some(_)) => {
                info!("Admin user already exists, skipping creation.");
                return;
            }
            Ok(None) => {}
            Err(e) => {
                error!("Failed to check for existing admin user: {e}");
                return;
            }
        }

        let password_hash = match PasswordUtilsImpl::hash_password(&admin_conf.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to hash admin password: {e}");
                return;
            }
        };

        let user = User {
            id: None,
            username: admin_conf.username.clone(),
            email: admin_conf.email.to_lowercase(),
            password_hash,
            role: UserRole::Admin,
            phone_number: None,
            university_name: None,
            created_at: None,
            updated_at: None,
        };
        match user_repo.insert(user).await {
            Ok(_) => info!("First admin user created."),
            Err(e) => error!("Failed to create admin user: {e}"),
        }
    }
}
