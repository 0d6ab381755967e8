use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::dto::submission_dto::{
    owner_view, public_view, FileUpload, OwnerSubmissionView, PublicSubmissionView, UploadRequest,
};
use crate::model::submission::{self, Submission, SubmissionStatus};
use crate::repository::profile_repo::ProfileRepository;
use crate::repository::submission_repo::SubmissionRepository;
use crate::util::error::ServiceError;
use crate::util::jwt::Claims;
use crate::util::minio::BlobStorage;

#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Upload a new publication. It enters the review queue as pending.
    async fn create(
        &self,
        claims: &Claims,
        request: UploadRequest,
        file: FileUpload,
        cover: Option<FileUpload>,
    ) -> Result<OwnerSubmissionView, ServiceError>;
    async fn my_uploads(&self, claims: &Claims) -> Result<Vec<OwnerSubmissionView>, ServiceError>;
    /// Public catalog: approved submissions only, newest first
    async fn public_list(&self) -> Result<Vec<PublicSubmissionView>, ServiceError>;
    /// Public detail page. Anything not approved reads as absent.
    async fn public_detail(&self, id: &str) -> Result<PublicSubmissionView, ServiceError>;
}

pub struct SubmissionServiceImpl {
    pub submission_repo: Arc<dyn SubmissionRepository>,
    pub profile_repo: Arc<dyn ProfileRepository>,
    pub blob_storage: Arc<dyn BlobStorage>,
}

impl SubmissionServiceImpl {
    pub fn new(
        submission_repo: Arc<dyn SubmissionRepository>,
        profile_repo: Arc<dyn ProfileRepository>,
        blob_storage: Arc<dyn BlobStorage>,
    ) -> Self {
        Self {
            submission_repo,
            profile_repo,
            blob_storage,
        }
    }

    fn object_name(prefix: &str, filename: &str) -> String {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        format!("{}/{}{}", prefix, Uuid::new_v4(), extension)
    }

    fn links(&self, submission: &Submission) -> (String, Option<String>) {
        let file_url = self.blob_storage.download_link(&submission.file_ref);
        let cover_url = submission
            .cover_ref
            .as_deref()
            .map(|object_name| self.blob_storage.download_link(object_name));
        (file_url, cover_url)
    }
}

#[async_trait]
impl SubmissionService for SubmissionServiceImpl {
    #[instrument(skip(self, claims, request, file, cover), fields(user = %claims.sub, title = %request.title))]
    async fn create(
        &self,
        claims: &Claims,
        request: UploadRequest,
        file: FileUpload,
        cover: Option<FileUpload>,
    ) -> Result<OwnerSubmissionView, ServiceError> {
        info!("Creating submission");

        let owner_id =
            ObjectId::parse_str(&claims.sub).map_err(|_| ServiceError::Unauthenticated)?;

        // Uploads are gated on a complete profile
        let profile = self.profile_repo.find_by_user(&owner_id).await?;
        if !profile.map(|p| p.profile_complete).unwrap_or(false) {
            warn!("Upload rejected: profile incomplete");
            return Err(ServiceError::Forbidden);
        }

        // Degree works carry their university; checked before any blob is
        // written so a rejected request leaves no orphaned objects
        if submission::requires_university(&request.submission_type)
            && request
                .university
                .as_deref()
                .map_or(true, |u| u.trim().is_empty())
        {
            return Err(ServiceError::MissingField("university"));
        }

        let file_ref = Self::object_name("files", &file.filename);
        self.blob_storage
            .put_object(&file_ref, file.content, Some(&file.content_type))
            .await
            .map_err(|e| {
                error!("Failed to upload submission file: {}", e);
                ServiceError::InternalError(format!("File upload failed: {}", e))
            })?;

        let cover_ref = match cover {
            Some(cover) => {
                let object_name = Self::object_name("covers", &cover.filename);
                if let Err(e) = self
                    .blob_storage
                    .put_object(&object_name, cover.content, Some(&cover.content_type))
                    .await
                {
                    // Roll back the already-written file so the failed
                    // request leaves nothing behind
                    error!("Failed to upload cover image: {}", e);
                    let _ = self.blob_storage.remove_object(&file_ref).await;
                    return Err(ServiceError::InternalError(format!(
                        "Cover upload failed: {}",
                        e
                    )));
                }
                Some(object_name)
            }
            None => None,
        };

        let submission = Submission {
            id: None,
            owner_id,
            title: request.title.trim().to_string(),
            authors: request.authors.trim().to_string(),
            year: request.year,
            description: request.description.trim().to_string(),
            submission_type: request.submission_type.trim().to_lowercase(),
            university: request.university,
            file_ref,
            cover_ref,
            status: SubmissionStatus::Pending,
            feedback: String::new(),
            uploaded_at: String::new(),
        };

        let inserted = self.submission_repo.insert(submission).await?;
        let (file_url, cover_url) = self.links(&inserted);

        info!("Submission created and queued for review");
        Ok(owner_view(&inserted, file_url, cover_url))
    }

    #[instrument(skip(self, claims), fields(user = %claims.sub))]
    async fn my_uploads(&self, claims: &Claims) -> Result<Vec<OwnerSubmissionView>, ServiceError> {
        let owner_id =
            ObjectId::parse_str(&claims.sub).map_err(|_| ServiceError::Unauthenticated)?;
        let submissions = self.submission_repo.list_by_owner(&owner_id).await?;
        Ok(submissions
            .iter()
            .map(|s| {
                let (file_url, cover_url) = self.links(s);
                owner_view(s, file_url, cover_url)
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn public_list(&self) -> Result<Vec<PublicSubmissionView>, ServiceError> {
        let submissions = self.submission_repo.list_approved().await?;
        Ok(submissions
            .iter()
            .map(|s| {
                let (file_url, cover_url) = self.links(s);
                public_view(s, file_url, cover_url)
            })
            .collect())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn public_detail(&self, id: &str) -> Result<PublicSubmissionView, ServiceError> {
        let submission_id = ObjectId::parse_str(id)
            .map_err(|_| ServiceError::NotFound(format!("Publication not found: {}", id)))?;
        let submission = self
            .submission_repo
            .find_approved_by_id(&submission_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Publication not found: {}", id)))?;
        let (file_url, cover_url) = self.links(&submission);
        Ok(public_view(&submission, file_url, cover_url))
    }
}
