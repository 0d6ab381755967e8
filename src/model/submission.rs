use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Review lifecycle states. `Draft` is declared but dormant: no flow
/// currently creates one or transitions into or out of it; it is reserved
/// for an explicit save-as-draft action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Draft => "draft",
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
        }
    }
}

/// Closed set of reviewer decisions. Anything outside this set must be
/// rejected at the boundary before it reaches the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
        }
    }

    pub fn parse(s: &str) -> Option<ReviewAction> {
        match s {
            "approve" => Some(ReviewAction::Approve),
            "reject" => Some(ReviewAction::Reject),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("Cannot {action} a submission in state {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

/// An uploaded work (thesis, paper, book) owned by its creating user and
/// reviewed by admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub owner_id: ObjectId,
    pub title: String,
    pub authors: String,
    pub year: u32,
    pub description: String,
    pub submission_type: String,
    pub university: Option<String>,
    /// Blob store reference for the document
    pub file_ref: String,
    /// Blob store reference for the cover image
    pub cover_ref: Option<String>,
    pub status: SubmissionStatus,
    /// Reviewer feedback; only meaningful when rejected, cleared on approval
    pub feedback: String,
    pub uploaded_at: String,
}

/// Submission types that imply a university affiliation
pub fn requires_university(submission_type: &str) -> bool {
    matches!(submission_type, "thesis" | "masters" | "bachelor")
}

impl Submission {
    /// Apply a reviewer decision. Only `pending` submissions accept one;
    /// approved and rejected are terminal, and drafts are not reviewable.
    /// Approving clears feedback, rejecting records the supplied text
    /// (which may be empty).
    pub fn apply_review(
        &mut self,
        action: ReviewAction,
        feedback: &str,
    ) -> Result<(), LifecycleError> {
        if self.status != SubmissionStatus::Pending {
            return Err(LifecycleError::InvalidTransition {
                from: self.status.as_str(),
                action: action.as_str(),
            });
        }
        match action {
            ReviewAction::Approve => {
                self.status = SubmissionStatus::Approved;
                self.feedback.clear();
            }
            ReviewAction::Reject => {
                self.status = SubmissionStatus::Rejected;
                self.feedback = feedback.to_string();
            }
        }
        Ok(())
    }
}
