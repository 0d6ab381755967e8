use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::event_dto::{CreateEventRequest, EventView, UpdateEventRequest};
use crate::model::event::Event;
use crate::repository::event_repo::EventRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait EventService: Send + Sync {
    /// Upcoming events for the public page, soonest first
    async fn public_events(&self) -> Result<Vec<EventView>, ServiceError>;

    // Admin-only operations; the router gates them behind the admin middleware
    async fn list_events(&self) -> Result<Vec<EventView>, ServiceError>;
    async fn create_event(&self, request: CreateEventRequest) -> Result<EventView, ServiceError>;
    async fn update_event(
        &self,
        id: &str,
        request: UpdateEventRequest,
    ) -> Result<EventView, ServiceError>;
    async fn delete_event(&self, id: &str) -> Result<(), ServiceError>;
}

pub struct EventServiceImpl {
    pub event_repo: Arc<dyn EventRepository>,
}

impl EventServiceImpl {
    pub fn new(event_repo: Arc<dyn EventRepository>) -> Self {
        Self { event_repo }
    }

    fn parse_object_id(id: &str) -> Result<ObjectId, ServiceError> {
        ObjectId::parse_str(id)
            .map_err(|_| ServiceError::NotFound(format!("Event not found: {}", id)))
    }

    /// Dates are stored as RFC 3339 UTC strings; reject anything that does
    /// not parse so the range queries stay meaningful
    fn normalize_date(date: &str) -> Result<String, ServiceError> {
        chrono::DateTime::parse_from_rfc3339(date)
            .map(|d| d.with_timezone(&Utc).to_rfc3339())
            .map_err(|_| {
                ServiceError::validation_field("date", "Expected an RFC 3339 timestamp.")
            })
    }
}

#[async_trait]
impl EventService for EventServiceImpl {
    #[instrument(skip(self))]
    async fn public_events(&self) -> Result<Vec<EventView>, ServiceError> {
        let now = Utc::now().to_rfc3339();
        let events = self.event_repo.list_upcoming(&now).await?;
        Ok(events.iter().map(EventView::from_event).collect())
    }

    #[instrument(skip(self))]
    async fn list_events(&self) -> Result<Vec<EventView>, ServiceError> {
        let events = self.event_repo.list_all().await?;
        Ok(events.iter().map(EventView::from_event).collect())
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    async fn create_event(&self, request: CreateEventRequest) -> Result<EventView, ServiceError> {
        let event = Event {
            id: None,
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            date: Self::normalize_date(&request.date)?,
            location: request.location.trim().to_string(),
            link: request.link,
            created_at: None,
            updated_at: None,
        };
        let inserted = self.event_repo.insert(event).await?;
        info!("Event created");
        Ok(EventView::from_event(&inserted))
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update_event(
        &self,
        id: &str,
        request: UpdateEventRequest,
    ) -> Result<EventView, ServiceError> {
        let event_id = Self::parse_object_id(id)?;
        let mut event = self
            .event_repo
            .find_by_id(&event_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Event not found: {}", id)))?;

        if let Some(title) = request.title {
            event.title = title.trim().to_string();
        }
        if let Some(description) = request.description {
            event.description = description.trim().to_string();
        }
        if let Some(date) = request.date {
            event.date = Self::normalize_date(&date)?;
        }
        if let Some(location) = request.location {
            event.location = location.trim().to_string();
        }
        if let Some(link) = request.link {
            event.link = Some(link);
        }

        let updated = self.event_repo.update(event_id, event).await?;
        info!("Event updated");
        Ok(EventView::from_event(&updated))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_event(&self, id: &str) -> Result<(), ServiceError> {
        let event_id = Self::parse_object_id(id)?;
        self.event_repo.delete(event_id).await?;
        info!("Event deleted");
        Ok(())
    }
}
