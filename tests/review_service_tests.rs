mod common;

use std::sync::Arc;

use bson::oid::ObjectId;
use common::{
    claims_for, pending_submission, test_user, InMemoryBlobStorage, InMemorySubmissionRepository,
    InMemoryUserRepository,
};
use openscholar_backend::model::submission::SubmissionStatus;
use openscholar_backend::model::user::UserRole;
use openscholar_backend::repository::submission_repo::SubmissionRepository;
use openscholar_backend::repository::user_repo::UserRepository;
use openscholar_backend::service::review_service::{ReviewService, ReviewServiceImpl};
use openscholar_backend::util::error::ServiceError;
use openscholar_backend::util::jwt::Claims;
use openscholar_backend::util::policy::AccessPolicy;

struct TestContext {
    service: ReviewServiceImpl,
    submission_repo: Arc<InMemorySubmissionRepository>,
    user_repo: Arc<InMemoryUserRepository>,
}

fn setup() -> TestContext {
    let submission_repo = Arc::new(InMemorySubmissionRepository::default());
    let user_repo = Arc::new(InMemoryUserRepository::default());
    let blob_storage = Arc::new(InMemoryBlobStorage::default());
    let service = ReviewServiceImpl::new(
        submission_repo.clone(),
        user_repo.clone(),
        blob_storage,
        AccessPolicy::new(),
    );
    TestContext {
        service,
        submission_repo,
        user_repo,
    }
}

fn admin_claims() -> Claims {
    claims_for(&ObjectId::new(), "admin@example.com", UserRole::Admin)
}

async fn seed_owner(ctx: &TestContext) -> ObjectId {
    let user = ctx
        .user_repo
        .insert(test_user("owner", "owner@example.com", UserRole::Researcher))
        .await
        .unwrap();
    user.id.unwrap()
}

#[tokio::test]
async fn test_approve_clears_feedback() {
    let ctx = setup();
    let owner_id = seed_owner(&ctx).await;
    let mut submission = pending_submission(owner_id, "Paper");
    submission.feedback = "old note".to_string();
    let inserted = ctx.submission_repo.insert(submission).await.unwrap();
    let id = inserted.id.unwrap().to_hex();

    let view = ctx
        .service
        .decide(&admin_claims(), &id, "approve", Some("ignored".to_string()))
        .await
        .unwrap();

    assert_eq!(view.status, "approved");
    assert_eq!(view.feedback, "");
    assert_eq!(view.owner_name, "owner");
}

#[tokio::test]
async fn test_reject_records_feedback() {
    let ctx = setup();
    let owner_id = seed_owner(&ctx).await;
    let inserted = ctx
        .submission_repo
        .insert(pending_submission(owner_id, "Paper"))
        .await
        .unwrap();
    let id = inserted.id.unwrap().to_hex();

    let view = ctx
        .service
        .decide(
            &admin_claims(),
            &id,
            "reject",
            Some("Needs more citations".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(view.status, "rejected");
    assert_eq!(view.feedback, "Needs more citations");
}

#[tokio::test]
async fn test_reject_without_feedback() {
    let ctx = setup();
    let owner_id = seed_owner(&ctx).await;
    let inserted = ctx
        .submission_repo
        .insert(pending_submission(owner_id, "Paper"))
        .await
        .unwrap();
    let id = inserted.id.unwrap().to_hex();

    let view = ctx
        .service
        .decide(&admin_claims(), &id, "reject", None)
        .await
        .unwrap();
    assert_eq!(view.status, "rejected");
    assert_eq!(view.feedback, "");
}

#[tokio::test]
async fn test_decide_on_non_pending_is_invalid_action() {
    let ctx = setup();
    let owner_id = seed_owner(&ctx).await;
    let mut submission = pending_submission(owner_id, "Paper");
    submission.status = SubmissionStatus::Approved;
    let inserted = ctx.submission_repo.insert(submission).await.unwrap();
    let id = inserted.id.unwrap().to_hex();

    let err = ctx
        .service
        .decide(&admin_claims(), &id, "reject", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidAction(_)));

    // State is untouched
    let stored = ctx
        .submission_repo
        .find_by_id(&inserted.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, SubmissionStatus::Approved);
}

#[tokio::test]
async fn test_second_decision_loses() {
    let ctx = setup();
    let owner_id = seed_owner(&ctx).await;
    let inserted = ctx
        .submission_repo
        .insert(pending_submission(owner_id, "Paper"))
        .await
        .unwrap();
    let id = inserted.id.unwrap().to_hex();

    ctx.service
        .decide(&admin_claims(), &id, "approve", None)
        .await
        .unwrap();
    let err = ctx
        .service
        .decide(&admin_claims(), &id, "reject", Some("too late".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidAction(_)));

    let stored = ctx
        .submission_repo
        .find_by_id(&inserted.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, SubmissionStatus::Approved);
    assert_eq!(stored.feedback, "");
}

#[tokio::test]
async fn test_unknown_action_rejected() {
    let ctx = setup();
    let owner_id = seed_owner(&ctx).await;
    let inserted = ctx
        .submission_repo
        .insert(pending_submission(owner_id, "Paper"))
        .await
        .unwrap();
    let id = inserted.id.unwrap().to_hex();

    let err = ctx
        .service
        .decide(&admin_claims(), &id, "publish", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidAction(_)));
}

#[tokio::test]
async fn test_decide_unknown_submission() {
    let ctx = setup();
    let err = ctx
        .service
        .decide(&admin_claims(), &ObjectId::new().to_hex(), "approve", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_non_admin_cannot_decide() {
    let ctx = setup();
    let owner_id = seed_owner(&ctx).await;
    let inserted = ctx
        .submission_repo
        .insert(pending_submission(owner_id, "Paper"))
        .await
        .unwrap();
    let id = inserted.id.unwrap().to_hex();

    let claims = claims_for(&owner_id, "owner@example.com", UserRole::Researcher);
    let err = ctx
        .service
        .decide(&claims, &id, "approve", None)
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::Forbidden);

    // Owners cannot approve their own work; state is untouched
    let stored = ctx
        .submission_repo
        .find_by_id(&inserted.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, SubmissionStatus::Pending);
}

#[tokio::test]
async fn test_pending_queue_is_oldest_first() {
    let ctx = setup();
    let owner_id = seed_owner(&ctx).await;
    for title in ["first", "second", "third"] {
        ctx.submission_repo
            .insert(pending_submission(owner_id, title))
            .await
            .unwrap();
    }

    let queue = ctx.service.list_pending(&admin_claims()).await.unwrap();
    let titles: Vec<&str> = queue.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_dashboard_counts() {
    let ctx = setup();
    let owner_id = seed_owner(&ctx).await;

    ctx.submission_repo
        .insert(pending_submission(owner_id, "pending one"))
        .await
        .unwrap();
    ctx.submission_repo
        .insert(pending_submission(owner_id, "pending two"))
        .await
        .unwrap();
    let mut approved = pending_submission(owner_id, "already approved");
    approved.status = SubmissionStatus::Approved;
    ctx.submission_repo.insert(approved).await.unwrap();

    let dashboard = ctx.service.dashboard(&admin_claims()).await.unwrap();
    assert_eq!(dashboard.total_users, 1);
    assert_eq!(dashboard.total_submissions, 3);
    assert_eq!(dashboard.pending_count, 2);
    assert_eq!(dashboard.pending.len(), 2);
}

#[tokio::test]
async fn test_dashboard_requires_admin() {
    let ctx = setup();
    let claims = claims_for(&ObjectId::new(), "user@example.com", UserRole::Researcher);
    assert_eq!(
        ctx.service.dashboard(&claims).await.unwrap_err(),
        ServiceError::Forbidden
    );
}
