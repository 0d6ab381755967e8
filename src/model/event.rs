use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Portal event (conference, defense, workshop). Dates are stored as UTC
/// RFC 3339 strings so lexicographic comparison matches chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    /// Direct link to the event page (registration form, meeting room)
    pub link: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
