use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::event::Event;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 2, max = 200))]
    pub title: String,

    #[validate(length(min = 2, max = 5000))]
    pub description: String,

    /// RFC 3339 UTC timestamp
    #[validate(length(min = 10, max = 40))]
    pub date: String,

    #[validate(length(min = 2, max = 200))]
    pub location: String,

    #[validate(url)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 2, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 2, max = 5000))]
    pub description: Option<String>,

    #[validate(length(min = 10, max = 40))]
    pub date: Option<String>,

    #[validate(length(min = 2, max = 200))]
    pub location: Option<String>,

    #[validate(url)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub link: Option<String>,
}

impl EventView {
    pub fn from_event(event: &Event) -> Self {
        EventView {
            id: event.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date.clone(),
            location: event.location.clone(),
            link: event.link.clone(),
        }
    }
}
