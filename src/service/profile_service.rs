use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::dto::profile_dto::{ProfileResponse, UpdateProfileRequest};
use crate::dto::submission_dto::FileUpload;
use crate::model::profile::ResearcherProfile;
use crate::model::user::User;
use crate::repository::profile_repo::ProfileRepository;
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use crate::util::jwt::Claims;
use crate::util::minio::BlobStorage;

#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Fetch the caller's profile, creating an empty one on first access
    async fn me(&self, claims: &Claims) -> Result<ProfileResponse, ServiceError>;
    async fn update(
        &self,
        claims: &Claims,
        request: UpdateProfileRequest,
        image: Option<FileUpload>,
    ) -> Result<ProfileResponse, ServiceError>;
}

pub struct ProfileServiceImpl {
    pub profile_repo: Arc<dyn ProfileRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub blob_storage: Arc<dyn BlobStorage>,
}

impl ProfileServiceImpl {
    pub fn new(
        profile_repo: Arc<dyn ProfileRepository>,
        user_repo: Arc<dyn UserRepository>,
        blob_storage: Arc<dyn BlobStorage>,
    ) -> Self {
        Self {
            profile_repo,
            user_repo,
            blob_storage,
        }
    }

    async fn load_user(&self, claims: &Claims) -> Result<(ObjectId, User), ServiceError> {
        let user_id =
            ObjectId::parse_str(&claims.sub).map_err(|_| ServiceError::Unauthenticated)?;
        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(ServiceError::Unauthenticated)?;
        Ok((user_id, user))
    }

    async fn load_or_create_profile(
        &self,
        user_id: ObjectId,
    ) -> Result<ResearcherProfile, ServiceError> {
        match self.profile_repo.find_by_user(&user_id).await? {
            Some(profile) => Ok(profile),
            None => {
                info!("Creating empty profile for user: {}", user_id);
                let profile = self
                    .profile_repo
                    .insert(ResearcherProfile::empty(user_id))
                    .await?;
                Ok(profile)
            }
        }
    }

    fn response(&self, user: &User, profile: &ResearcherProfile) -> ProfileResponse {
        let image_url = profile
            .profile_image
            .as_deref()
            .map(|object_name| self.blob_storage.download_link(object_name));
        ProfileResponse::from_parts(user, profile, image_url)
    }
}

#[async_trait]
impl ProfileService for ProfileServiceImpl {
    #[instrument(skip(self, claims), fields(user = %claims.sub))]
    async fn me(&self, claims: &Claims) -> Result<ProfileResponse, ServiceError> {
        let (user_id, user) = self.load_user(claims).await?;
        let mut profile = self.load_or_create_profile(user_id).await?;

        // Keep the stored flag honest even if account fields changed since
        // the last profile save
        let was_complete = profile.profile_complete;
        profile.recompute_complete(&user);
        if profile.profile_complete != was_complete {
            if let Some(id) = profile.id {
                profile = self.profile_repo.update(id, profile).await?;
            }
        }

        Ok(self.response(&user, &profile))
    }

    #[instrument(skip(self, claims, request, image), fields(user = %claims.sub))]
    async fn update(
        &self,
        claims: &Claims,
        request: UpdateProfileRequest,
        image: Option<FileUpload>,
    ) -> Result<ProfileResponse, ServiceError> {
        info!("Updating profile");
        let (user_id, user) = self.load_user(claims).await?;
        let mut profile = self.load_or_create_profile(user_id).await?;

        if let Some(national_id) = request.national_id {
            profile.national_id = national_id.trim().to_string();
        }
        if let Some(age) = request.age {
            profile.age = Some(age);
        }
        if let Some(phone) = request.phone {
            profile.phone = phone.trim().to_string();
        }
        if let Some(degree) = request.degree {
            profile.degree = degree.trim().to_string();
        }
        if let Some(university) = request.university {
            profile.university = university.trim().to_string();
        }

        if let Some(image) = image {
            let extension = std::path::Path::new(&image.filename)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{}", e))
                .unwrap_or_default();
            let object_name = format!("avatars/{}{}", Uuid::new_v4(), extension);
            self.blob_storage
                .put_object(&object_name, image.content, Some(&image.content_type))
                .await
                .map_err(|e| {
                    error!("Failed to upload profile image: {}", e);
                    ServiceError::InternalError(format!("Image upload failed: {}", e))
                })?;
            // Old image becomes garbage; best-effort cleanup
            if let Some(old) = profile.profile_image.replace(object_name) {
                let _ = self.blob_storage.remove_object(&old).await;
            }
        }

        profile.recompute_complete(&user);

        let profile_id = profile
            .id
            .ok_or_else(|| ServiceError::InternalError("Profile missing id".to_string()))?;
        let updated = self.profile_repo.update(profile_id, profile).await?;

        info!("Profile updated successfully");
        Ok(self.response(&user, &updated))
    }
}
