use crate::config::mongo_conf::MongoConfig;
use crate::model::submission::{Submission, SubmissionStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::StreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use tracing::{error, info};

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn insert(&self, submission: Submission) -> RepositoryResult<Submission>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Submission>>;
    async fn find_approved_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Submission>>;
    async fn list_by_owner(&self, owner_id: &ObjectId) -> RepositoryResult<Vec<Submission>>;
    async fn list_approved(&self) -> RepositoryResult<Vec<Submission>>;
    async fn list_pending(&self) -> RepositoryResult<Vec<Submission>>;
    async fn count(&self) -> RepositoryResult<u64>;
    async fn count_pending(&self) -> RepositoryResult<u64>;
    /// Atomically apply a review decision to a still-pending submission.
    /// Returns None when the submission is no longer pending (or gone), so
    /// concurrent decisions cannot both win.
    async fn apply_decision(
        &self,
        id: &ObjectId,
        status: SubmissionStatus,
        feedback: &str,
    ) -> RepositoryResult<Option<Submission>>;
}

pub struct MongoSubmissionRepository {
    collection: mongodb::Collection<Submission>,
}

impl MongoSubmissionRepository {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        use mongodb::{
            options::{ClientOptions, Credential, ResolverConfig},
            Client,
        };
        let mut client_options =
            ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare())
                .await?;
        client_options.app_name = Some("OpenScholarBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout =
            Some(std::time::Duration::from_secs(config.connection_timeout_secs));
        if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
            client_options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            );
        }
        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);
        let collection = db.collection::<Submission>("submissions");
        Ok(MongoSubmissionRepository { collection })
    }

    async fn find_many(
        &self,
        filter: Document,
        sort: Document,
    ) -> RepositoryResult<Vec<Submission>> {
        let options = FindOptions::builder().sort(sort).build();
        let mut cursor = self
            .collection
            .find(filter, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list submissions: {}", e)))?;
        let mut submissions = Vec::new();
        while let Some(submission) = cursor.next().await {
            match submission {
                Ok(s) => submissions.push(s),
                Err(e) => {
                    error!("Failed to deserialize submission: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize submission: {}",
                        e
                    )));
                }
            }
        }
        Ok(submissions)
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    #[tracing::instrument(skip(self, submission), fields(title = %submission.title))]
    async fn insert(&self, mut submission: Submission) -> RepositoryResult<Submission> {
        submission.id = Some(ObjectId::new());
        submission.uploaded_at = chrono::Utc::now().to_rfc3339();
        let result = self.collection.insert_one(submission.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Submission created successfully");
                Ok(submission)
            }
            Err(e) => {
                error!("Failed to create submission: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Submission>> {
        let filter = doc! { "_id": id };
        let submission = self.collection.find_one(filter, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to find submission by id: {}", e))
        })?;
        Ok(submission)
    }

    async fn find_approved_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Submission>> {
        let filter = doc! { "_id": id, "status": SubmissionStatus::Approved.as_str() };
        let submission = self.collection.find_one(filter, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to find approved submission: {}", e))
        })?;
        Ok(submission)
    }

    async fn list_by_owner(&self, owner_id: &ObjectId) -> RepositoryResult<Vec<Submission>> {
        self.find_many(doc! { "owner_id": owner_id }, doc! { "uploaded_at": -1 })
            .await
    }

    async fn list_approved(&self) -> RepositoryResult<Vec<Submission>> {
        self.find_many(
            doc! { "status": SubmissionStatus::Approved.as_str() },
            doc! { "uploaded_at": -1 },
        )
        .await
    }

    async fn list_pending(&self) -> RepositoryResult<Vec<Submission>> {
        // Oldest first so the review queue is worked in arrival order
        self.find_many(
            doc! { "status": SubmissionStatus::Pending.as_str() },
            doc! { "uploaded_at": 1 },
        )
        .await
    }

    async fn count(&self) -> RepositoryResult<u64> {
        self.collection
            .count_documents(None, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count submissions: {}", e)))
    }

    async fn count_pending(&self) -> RepositoryResult<u64> {
        self.collection
            .count_documents(
                doc! { "status": SubmissionStatus::Pending.as_str() },
                None,
            )
            .await
            .map_err(|e| {
                RepositoryError::database(format!("Failed to count pending submissions: {}", e))
            })
    }

    #[tracing::instrument(skip(self), fields(id = %id, status = ?status))]
    async fn apply_decision(
        &self,
        id: &ObjectId,
        status: SubmissionStatus,
        feedback: &str,
    ) -> RepositoryResult<Option<Submission>> {
        // The filter pins the current status to pending, making the
        // transition a single compare-and-set on the server
        let filter = doc! { "_id": id, "status": SubmissionStatus::Pending.as_str() };
        let update = doc! { "$set": { "status": status.as_str(), "feedback": feedback } };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let updated = self
            .collection
            .find_one_and_update(filter, update, options)
            .await
            .map_err(|e| {
                error!("Failed to apply review decision: {}", e);
                RepositoryError::database(format!("Failed to apply review decision: {}", e))
            })?;
        if updated.is_some() {
            info!("Review decision applied for submission: {}", id);
        }
        Ok(updated)
    }
}
