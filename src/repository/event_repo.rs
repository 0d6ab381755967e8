use crate::config::mongo_conf::MongoConfig;
use crate::model::event::Event;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn insert(&self, event: Event) -> RepositoryResult<Event>;
    async fn update(&self, id: ObjectId, event: Event) -> RepositoryResult<Event>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Event>>;
    async fn list_all(&self) -> RepositoryResult<Vec<Event>>;
    async fn list_upcoming(&self, now: &str) -> RepositoryResult<Vec<Event>>;
}

pub struct MongoEventRepository {
    collection: mongodb::Collection<Event>,
}

impl MongoEventRepository {
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
        let collection = db.collection::<Event>("events");
        Ok(MongoEventRepository { collection })
    }

    async fn find_many(&self, filter: Option<Document>, sort: Document) -> RepositoryResult<Vec<Event>> {
        let options = FindOptions::builder().sort(sort).build();
        let mut cursor = self
            .collection
            .find(filter, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list events: {}", e)))?;
        let mut events = Vec::new();
        while let Some(event) = cursor.next().await {
            match event {
                Ok(e) => events.push(e),
                Err(e) => {
                    error!("Failed to deserialize event: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize event: {}",
                        e
                    )));
                }
            }
        }
        Ok(events)
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    async fn insert(&self, mut event: Event) -> RepositoryResult<Event> {
        use chrono::Utc;
        event.id = Some(ObjectId::new());
        let now = Utc::now().to_rfc3339();
        event.created_at = Some(now.clone());
        event.updated_at = Some(now);
        let result = self.collection.insert_one(event.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Event created successfully");
                Ok(event)
            }
            Err(e) => {
                error!("Failed to create event: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn update(&self, id: ObjectId, mut event: Event) -> RepositoryResult<Event> {
        event.updated_at = Some(chrono::Utc::now().to_rfc3339());
        let filter = doc! { "_id": id };
        let mut doc = bson::to_document(&event)
            .map_err(|e| RepositoryError::serialization(format!("Failed to serialize event: {}", e)))?;
        doc.remove("_id");
        let update = doc! { "$set": doc };
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => Ok(event),
            Ok(_) => Err(RepositoryError::not_found(format!(
                "No event found to update for ID: {}",
                id
            ))),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let filter = doc! { "_id": id };
        let result = self.collection.delete_one(filter, None).await;
        match result {
            Ok(delete_result) if delete_result.deleted_count > 0 => {
                info!("Event deleted for ID: {}", id);
                Ok(())
            }
            Ok(_) => Err(RepositoryError::not_found(format!(
                "No event found to delete for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to delete event: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Event>> {
        let filter = doc! { "_id": id };
        let event = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find event by id: {}", e)))?;
        Ok(event)
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Event>> {
        self.find_many(None, doc! { "date": -1 }).await
    }

    async fn list_upcoming(&self, now: &str) -> RepositoryResult<Vec<Event>> {
        // Dates are RFC 3339 UTC strings, so a lexicographic comparison
        // matches chronological order
        self.find_many(Some(doc! { "date": { "$gte": now } }), doc! { "date": 1 })
            .await
    }
}
