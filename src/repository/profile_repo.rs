use crate::config::mongo_conf::MongoConfig;
use crate::model::profile::ResearcherProfile;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn insert(&self, profile: ResearcherProfile) -> RepositoryResult<ResearcherProfile>;
    async fn update(&self, id: ObjectId, profile: ResearcherProfile)
        -> RepositoryResult<ResearcherProfile>;
    async fn find_by_user(&self, user_id: &ObjectId) -> RepositoryResult<Option<ResearcherProfile>>;
    async fn delete_by_user(&self, user_id: &ObjectId) -> RepositoryResult<()>;
}

pub struct MongoProfileRepository {
    collection: mongodb::Collection<ResearcherProfile>,
}

impl MongoProfileRepository {
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
        let collection = db.collection::<ResearcherProfile>("profiles");
        Ok(MongoProfileRepository { collection })
    }
}

#[async_trait]
impl ProfileRepository for MongoProfileRepository {
    async fn insert(&self, mut profile: ResearcherProfile) -> RepositoryResult<ResearcherProfile> {
        use chrono::Utc;
        profile.id = Some(ObjectId::new());
        let now = Utc::now().to_rfc3339();
        profile.created_at = Some(now.clone());
        profile.updated_at = Some(now);
        let result = self.collection.insert_one(profile.clone(), None).await;
        match result {
            Ok(_) => Ok(profile),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }

    async fn update(
        &self,
        id: ObjectId,
        mut profile: ResearcherProfile,
    ) -> RepositoryResult<ResearcherProfile> {
        profile.updated_at = Some(chrono::Utc::now().to_rfc3339());
        let filter = doc! { "_id": id };
        let mut doc = bson::to_document(&profile).map_err(|e| {
            RepositoryError::serialization(format!("Failed to serialize profile: {}", e))
        })?;
        doc.remove("_id");
        let update = doc! { "$set": doc };
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => Ok(profile),
            Ok(_) => Err(RepositoryError::not_found(format!(
                "No profile found to update for ID: {}",
                id
            ))),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }

    async fn find_by_user(
        &self,
        user_id: &ObjectId,
    ) -> RepositoryResult<Option<ResearcherProfile>> {
        let filter = doc! { "user_id": user_id };
        let profile = self.collection.find_one(filter, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to find profile by user: {}", e))
        })?;
        Ok(profile)
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> RepositoryResult<()> {
        let filter = doc! { "user_id": user_id };
        // Deleting a user without a profile is not an error
        self.collection
            .delete_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to delete profile: {}", e)))?;
        Ok(())
    }
}
