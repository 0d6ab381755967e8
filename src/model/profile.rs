use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::model::user::User;

/// Researcher profile, one-to-one with a user account. The completeness
/// flag gates document uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearcherProfile {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub national_id: String,
    pub age: Option<u32>,
    pub phone: String,
    pub degree: String,
    pub university: String,
    /// Blob store reference for the profile image
    pub profile_image: Option<String>,
    /// Derived; recomputed on every save, never stored stale
    pub profile_complete: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl ResearcherProfile {
    pub fn empty(user_id: ObjectId) -> Self {
        ResearcherProfile {
            id: None,
            user_id,
            national_id: String::new(),
            age: None,
            phone: String::new(),
            degree: String::new(),
            university: String::new(),
            profile_image: None,
            profile_complete: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Recompute the completeness flag from the current field values.
    /// Required: username, email, phone, degree, age, national_id, plus the
    /// university affiliation when the account role demands one.
    pub fn recompute_complete(&mut self, user: &User) {
        let mut complete = !user.username.is_empty()
            && !user.email.is_empty()
            && !self.phone.is_empty()
            && !self.degree.is_empty()
            && self.age.map_or(false, |a| a > 0)
            && !self.national_id.is_empty();

        if user.role.requires_university() {
            complete = complete && !self.university.is_empty();
        }

        self.profile_complete = complete;
    }
}
