use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::profile::ResearcherProfile;
use crate::model::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 50))]
    pub national_id: Option<String>,

    #[validate(range(min = 16, max = 120))]
    pub age: Option<u32>,

    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub degree: Option<String>,

    #[validate(length(min = 2, max = 200))]
    pub university: Option<String>,
}

/// Profile merged with the account fields the frontend shows alongside it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
    pub role: String,
    pub national_id: String,
    pub age: Option<u32>,
    pub phone: String,
    pub degree: String,
    pub university: String,
    pub profile_image: Option<String>,
    pub profile_complete: bool,
}

impl ProfileResponse {
    pub fn from_parts(user: &User, profile: &ResearcherProfile, image_url: Option<String>) -> Self {
        ProfileResponse {
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            national_id: profile.national_id.clone(),
            age: profile.age,
            phone: profile.phone.clone(),
            degree: profile.degree.clone(),
            university: profile.university.clone(),
            profile_image: image_url,
            profile_complete: profile.profile_complete,
        }
    }
}
