use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::dto::contact_dto::ContactRequest;
use crate::util::email::SmtpEmailService;
use crate::util::error::ServiceError;

#[async_trait]
pub trait ContactService: Send + Sync {
    async fn relay(&self, request: ContactRequest) -> Result<(), ServiceError>;
}

pub struct ContactServiceImpl {
    pub email_service: Arc<SmtpEmailService>,
}

impl ContactServiceImpl {
    pub fn new(email_service: Arc<SmtpEmailService>) -> Self {
        Self { email_service }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    #[instrument(skip(self, request), fields(from = %request.email))]
    async fn relay(&self, request: ContactRequest) -> Result<(), ServiceError> {
        info!("Relaying contact form message");
        self.email_service
            .send_contact_email(
                &request.name,
                &request.email,
                &request.subject,
                &request.message,
            )
            .await
            .map_err(|e| {
                error!("Failed to relay contact message: {}", e);
                ServiceError::InternalError(format!("Email relay failed: {}", e))
            })?;
        info!("Contact form message relayed");
        Ok(())
    }
}
