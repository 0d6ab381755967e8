mod common;

use std::sync::Arc;

use bson::oid::ObjectId;
use common::{
    claims_for, pending_submission, InMemoryBlobStorage, InMemoryProfileRepository,
    InMemorySubmissionRepository,
};
use openscholar_backend::dto::submission_dto::{FileUpload, UploadRequest};
use openscholar_backend::model::profile::ResearcherProfile;
use openscholar_backend::model::submission::SubmissionStatus;
use openscholar_backend::model::user::UserRole;
use openscholar_backend::repository::profile_repo::ProfileRepository;
use openscholar_backend::repository::submission_repo::SubmissionRepository;
use openscholar_backend::service::submission_service::{SubmissionService, SubmissionServiceImpl};
use openscholar_backend::util::error::ServiceError;
use openscholar_backend::util::jwt::Claims;

struct TestContext {
    service: SubmissionServiceImpl,
    submission_repo: Arc<InMemorySubmissionRepository>,
    profile_repo: Arc<InMemoryProfileRepository>,
    blob_storage: Arc<InMemoryBlobStorage>,
}

fn setup() -> TestContext {
    let submission_repo = Arc::new(InMemorySubmissionRepository::default());
    let profile_repo = Arc::new(InMemoryProfileRepository::default());
    let blob_storage = Arc::new(InMemoryBlobStorage::default());
    let service = SubmissionServiceImpl::new(
        submission_repo.clone(),
        profile_repo.clone(),
        blob_storage.clone(),
    );
    TestContext {
        service,
        submission_repo,
        profile_repo,
        blob_storage,
    }
}

async fn seed_complete_profile(ctx: &TestContext, user_id: ObjectId) {
    let mut profile = ResearcherProfile::empty(user_id);
    profile.profile_complete = true;
    ctx.profile_repo.insert(profile).await.unwrap();
}

fn owner_claims(user_id: &ObjectId) -> Claims {
    claims_for(user_id, "owner@example.com", UserRole::Researcher)
}

fn upload_request(submission_type: &str) -> UploadRequest {
    UploadRequest {
        title: "A Study of Things".to_string(),
        authors: "A. Author, B. Author".to_string(),
        year: 2024,
        description: "An in-depth study.".to_string(),
        submission_type: submission_type.to_string(),
        university: None,
    }
}

fn pdf_upload() -> FileUpload {
    FileUpload {
        filename: "study.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        content: vec![1, 2, 3],
        size: 3,
    }
}

fn cover_upload() -> FileUpload {
    FileUpload {
        filename: "cover.png".to_string(),
        content_type: "image/png".to_string(),
        content: vec![4, 5, 6],
        size: 3,
    }
}

#[tokio::test]
async fn test_upload_enters_review_queue_as_pending() {
    let ctx = setup();
    let user_id = ObjectId::new();
    seed_complete_profile(&ctx, user_id).await;

    let view = ctx
        .service
        .create(
            &owner_claims(&user_id),
            upload_request("article"),
            pdf_upload(),
            Some(cover_upload()),
        )
        .await
        .unwrap();

    assert_eq!(view.status, "pending");
    assert_eq!(view.feedback, "");
    assert!(view.file_url.starts_with("http://blobs.test/files/"));
    assert!(view.file_url.ends_with(".pdf"));
    assert!(view
        .cover_url
        .as_deref()
        .unwrap()
        .starts_with("http://blobs.test/covers/"));

    // Both blobs were written
    assert_eq!(ctx.blob_storage.objects.lock().unwrap().len(), 2);
    assert_eq!(ctx.submission_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_upload_blocked_without_complete_profile() {
    let ctx = setup();
    let user_id = ObjectId::new();
    // No profile at all
    let err = ctx
        .service
        .create(
            &owner_claims(&user_id),
            upload_request("article"),
            pdf_upload(),
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::Forbidden);

    // Incomplete profile
    ctx.profile_repo
        .insert(ResearcherProfile::empty(user_id))
        .await
        .unwrap();
    let err = ctx
        .service
        .create(
            &owner_claims(&user_id),
            upload_request("article"),
            pdf_upload(),
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::Forbidden);

    // Nothing persisted, nothing uploaded
    assert_eq!(ctx.submission_repo.count().await.unwrap(), 0);
    assert!(ctx.blob_storage.objects.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_thesis_requires_university() {
    let ctx = setup();
    let user_id = ObjectId::new();
    seed_complete_profile(&ctx, user_id).await;

    for submission_type in ["thesis", "masters", "bachelor"] {
        let err = ctx
            .service
            .create(
                &owner_claims(&user_id),
                upload_request(submission_type),
                pdf_upload(),
                None,
            )
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::MissingField("university"));
    }

    // The failed attempts wrote nothing
    assert_eq!(ctx.submission_repo.count().await.unwrap(), 0);
    assert!(ctx.blob_storage.objects.lock().unwrap().is_empty());

    // A retry with the university supplied succeeds
    let mut request = upload_request("thesis");
    request.university = Some("State University".to_string());
    let view = ctx
        .service
        .create(&owner_claims(&user_id), request, pdf_upload(), None)
        .await
        .unwrap();
    assert_eq!(view.status, "pending");
    assert_eq!(view.university.as_deref(), Some("State University"));
}

#[tokio::test]
async fn test_my_uploads_shows_all_own_statuses() {
    let ctx = setup();
    let user_id = ObjectId::new();
    let other_id = ObjectId::new();

    ctx.submission_repo
        .insert(pending_submission(user_id, "mine pending"))
        .await
        .unwrap();
    let mut rejected = pending_submission(user_id, "mine rejected");
    rejected.status = SubmissionStatus::Rejected;
    rejected.feedback = "Needs work".to_string();
    ctx.submission_repo.insert(rejected).await.unwrap();
    ctx.submission_repo
        .insert(pending_submission(other_id, "not mine"))
        .await
        .unwrap();

    let uploads = ctx
        .service
        .my_uploads(&owner_claims(&user_id))
        .await
        .unwrap();
    assert_eq!(uploads.len(), 2);
    assert!(uploads.iter().all(|u| u.title.starts_with("mine")));
    let rejected_view = uploads.iter().find(|u| u.status == "rejected").unwrap();
    assert_eq!(rejected_view.feedback, "Needs work");
}

#[tokio::test]
async fn test_public_list_only_approved() {
    let ctx = setup();
    let owner_id = ObjectId::new();

    ctx.submission_repo
        .insert(pending_submission(owner_id, "still pending"))
        .await
        .unwrap();
    let mut approved = pending_submission(owner_id, "published");
    approved.status = SubmissionStatus::Approved;
    ctx.submission_repo.insert(approved).await.unwrap();
    let mut rejected = pending_submission(owner_id, "bounced");
    rejected.status = SubmissionStatus::Rejected;
    ctx.submission_repo.insert(rejected).await.unwrap();

    let catalog = ctx.service.public_list().await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].title, "published");
}

#[tokio::test]
async fn test_public_detail_hides_unapproved() {
    let ctx = setup();
    let owner_id = ObjectId::new();

    let pending = ctx
        .submission_repo
        .insert(pending_submission(owner_id, "still pending"))
        .await
        .unwrap();
    let mut approved = pending_submission(owner_id, "published");
    approved.status = SubmissionStatus::Approved;
    let approved = ctx.submission_repo.insert(approved).await.unwrap();

    // Approved is readable
    let view = ctx
        .service
        .public_detail(&approved.id.unwrap().to_hex())
        .await
        .unwrap();
    assert_eq!(view.title, "published");

    // Pending reads as absent, exactly like a missing id
    let err = ctx
        .service
        .public_detail(&pending.id.unwrap().to_hex())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = ctx
        .service
        .public_detail(&ObjectId::new().to_hex())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    // Malformed ids read the same way
    let err = ctx.service.public_detail("not-an-id").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
