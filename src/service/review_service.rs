use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::dto::submission_dto::{admin_view, AdminSubmissionView};
use crate::model::submission::{ReviewAction, Submission};
use crate::repository::submission_repo::SubmissionRepository;
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use crate::util::jwt::Claims;
use crate::util::minio::BlobStorage;
use crate::util::policy::AccessPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub total_users: u64,
    pub total_submissions: u64,
    pub pending_count: u64,
    pub pending: Vec<AdminSubmissionView>,
}

#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Admin landing page: counters plus the review queue
    async fn dashboard(&self, claims: &Claims) -> Result<DashboardResponse, ServiceError>;
    async fn list_pending(&self, claims: &Claims)
        -> Result<Vec<AdminSubmissionView>, ServiceError>;
    /// Apply an approve/reject decision to a pending submission. At most
    /// one of two concurrent decisions can succeed.
    async fn decide(
        &self,
        claims: &Claims,
        id: &str,
        action: &str,
        feedback: Option<String>,
    ) -> Result<AdminSubmissionView, ServiceError>;
}

pub struct ReviewServiceImpl {
    pub submission_repo: Arc<dyn SubmissionRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub blob_storage: Arc<dyn BlobStorage>,
    pub policy: AccessPolicy,
}

impl ReviewServiceImpl {
    pub fn new(
        submission_repo: Arc<dyn SubmissionRepository>,
        user_repo: Arc<dyn UserRepository>,
        blob_storage: Arc<dyn BlobStorage>,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            submission_repo,
            user_repo,
            blob_storage,
            policy,
        }
    }

    async fn to_admin_view(&self, submission: &Submission) -> AdminSubmissionView {
        let owner_name = match self.user_repo.find_by_id(&submission.owner_id).await {
            Ok(Some(user)) => user.username,
            // A deleted owner should not break the review queue
            _ => "Unknown".to_string(),
        };
        let file_url = self.blob_storage.download_link(&submission.file_ref);
        let cover_url = submission
            .cover_ref
            .as_deref()
            .map(|object_name| self.blob_storage.download_link(object_name));
        admin_view(submission, owner_name, file_url, cover_url)
    }

    async fn pending_views(&self) -> Result<Vec<AdminSubmissionView>, ServiceError> {
        let pending = self.submission_repo.list_pending().await?;
        let mut views = Vec::with_capacity(pending.len());
        for submission in &pending {
            views.push(self.to_admin_view(submission).await);
        }
        Ok(views)
    }
}

#[async_trait]
impl ReviewService for ReviewServiceImpl {
    #[instrument(skip(self, claims), fields(user = %claims.sub))]
    async fn dashboard(&self, claims: &Claims) -> Result<DashboardResponse, ServiceError> {
        self.policy.require_staff_or_admin(claims)?;

        let total_users = self.user_repo.count().await?;
        let total_submissions = self.submission_repo.count().await?;
        let pending_count = self.submission_repo.count_pending().await?;
        let pending = self.pending_views().await?;

        Ok(DashboardResponse {
            total_users,
            total_submissions,
            pending_count,
            pending,
        })
    }

    #[instrument(skip(self, claims), fields(user = %claims.sub))]
    async fn list_pending(
        &self,
        claims: &Claims,
    ) -> Result<Vec<AdminSubmissionView>, ServiceError> {
        self.policy.require_staff_or_admin(claims)?;
        self.pending_views().await
    }

    #[instrument(skip(self, claims, feedback), fields(user = %claims.sub, id = %id, action = %action))]
    async fn decide(
        &self,
        claims: &Claims,
        id: &str,
        action: &str,
        feedback: Option<String>,
    ) -> Result<AdminSubmissionView, ServiceError> {
        self.policy.require_staff_or_admin(claims)?;

        let submission_id = ObjectId::parse_str(id)
            .map_err(|_| ServiceError::NotFound(format!("Submission not found: {}", id)))?;
        let action = ReviewAction::parse(action)
            .ok_or_else(|| ServiceError::InvalidAction(format!("Unknown action: {}", action)))?;

        let mut submission = self
            .submission_repo
            .find_by_id(&submission_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Submission not found: {}", id)))?;

        // Dry-run the transition on the fetched copy first; a submission
        // that is not pending fails here without touching the store
        submission
            .apply_review(action, &feedback.unwrap_or_default())
            .map_err(|e| ServiceError::InvalidAction(e.to_string()))?;

        // The conditional update only matches a still-pending document, so
        // a concurrent decision that got there first makes this a no-op
        let updated = self
            .submission_repo
            .apply_decision(&submission_id, submission.status, &submission.feedback)
            .await?;

        match updated {
            Some(updated) => {
                info!("Review decision applied");
                Ok(self.to_admin_view(&updated).await)
            }
            None => {
                warn!("Review decision lost a race or target no longer pending");
                Err(ServiceError::InvalidAction(
                    "Submission is no longer pending".to_string(),
                ))
            }
        }
    }
}
