use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::submission::Submission;

/// In-memory multipart file as received by the upload handlers
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
    pub size: usize,
}

// --- Validated DTOs for request validation ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadRequest {
    #[validate(length(min = 2, max = 300))]
    pub title: String,

    #[validate(length(min = 2, max = 500))]
    pub authors: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: u32,

    #[validate(length(min = 2, max = 5000))]
    pub description: String,

    /// thesis, masters, bachelor, article, report, ...
    #[validate(length(min = 2, max = 50))]
    pub submission_type: String,

    #[validate(length(min = 2, max = 200))]
    pub university: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewDecisionRequest {
    /// "approve" or "reject"
    #[validate(length(min = 2, max = 20))]
    pub action: String,

    #[validate(length(max = 5000))]
    pub feedback: Option<String>,
}

// --- Response projections ---

/// Owner's view of their own submission. Includes status and feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerSubmissionView {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub year: u32,
    pub description: String,
    pub submission_type: String,
    pub university: Option<String>,
    pub status: String,
    pub feedback: String,
    pub file_url: String,
    pub cover_url: Option<String>,
    pub uploaded_at: String,
}

/// Catalog view for visitors. Review state never leaks here: only
/// approved submissions are projected through this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicSubmissionView {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub year: u32,
    pub description: String,
    pub submission_type: String,
    pub university: Option<String>,
    pub file_url: String,
    pub cover_url: Option<String>,
}

/// Review-queue view. Adds the owner's display name for the admin table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSubmissionView {
    pub id: String,
    pub owner_id: String,
    pub owner_name: String,
    pub title: String,
    pub authors: String,
    pub year: u32,
    pub description: String,
    pub submission_type: String,
    pub university: Option<String>,
    pub status: String,
    pub feedback: String,
    pub file_url: String,
    pub cover_url: Option<String>,
    pub uploaded_at: String,
}

pub fn owner_view(
    submission: &Submission,
    file_url: String,
    cover_url: Option<String>,
) -> OwnerSubmissionView {
    OwnerSubmissionView {
        id: submission.id.map(|id| id.to_hex()).unwrap_or_default(),
        title: submission.title.clone(),
        authors: submission.authors.clone(),
        year: submission.year,
        description: submission.description.clone(),
        submission_type: submission.submission_type.clone(),
        university: submission.university.clone(),
        status: submission.status.as_str().to_string(),
        feedback: submission.feedback.clone(),
        file_url,
        cover_url,
        uploaded_at: submission.uploaded_at.clone(),
    }
}

pub fn public_view(
    submission: &Submission,
    file_url: String,
    cover_url: Option<String>,
) -> PublicSubmissionView {
    PublicSubmissionView {
        id: submission.id.map(|id| id.to_hex()).unwrap_or_default(),
        title: submission.title.clone(),
        authors: submission.authors.clone(),
        year: submission.year,
        description: submission.description.clone(),
        submission_type: submission.submission_type.clone(),
        university: submission.university.clone(),
        file_url,
        cover_url,
    }
}

pub fn admin_view(
    submission: &Submission,
    owner_name: String,
    file_url: String,
    cover_url: Option<String>,
) -> AdminSubmissionView {
    AdminSubmissionView {
        id: submission.id.map(|id| id.to_hex()).unwrap_or_default(),
        owner_id: submission.owner_id.to_hex(),
        owner_name,
        title: submission.title.clone(),
        authors: submission.authors.clone(),
        year: submission.year,
        description: submission.description.clone(),
        submission_type: submission.submission_type.clone(),
        university: submission.university.clone(),
        status: submission.status.as_str().to_string(),
        feedback: submission.feedback.clone(),
        file_url,
        cover_url,
        uploaded_at: submission.uploaded_at.clone(),
    }
}
