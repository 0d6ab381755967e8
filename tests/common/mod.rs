//! In-memory fakes for the repository and blob-storage seams, so service
//! tests run without a live MongoDB or MinIO.

#![allow(dead_code)]

use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use openscholar_backend::model::event::Event;
use openscholar_backend::model::profile::ResearcherProfile;
use openscholar_backend::model::submission::{Submission, SubmissionStatus};
use openscholar_backend::model::user::{User, UserRole};
use openscholar_backend::repository::event_repo::EventRepository;
use openscholar_backend::repository::profile_repo::ProfileRepository;
use openscholar_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use openscholar_backend::repository::submission_repo::SubmissionRepository;
use openscholar_backend::repository::user_repo::UserRepository;
use openscholar_backend::util::jwt::Claims;
use openscholar_backend::util::minio::{BlobStorage, MinioError};

// --- Builders ---

pub fn test_user(username: &str, email: &str, role: UserRole) -> User {
    User {
        id: None,
        username: username.to_string(),
        email: email.to_lowercase(),
        password_hash: String::new(),
        role,
        phone_number: None,
        university_name: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn claims_for(user_id: &ObjectId, email: &str, role: UserRole) -> Claims {
    Claims {
        sub: user_id.to_hex(),
        email: email.to_string(),
        role: role.as_str().to_string(),
        iat: 0,
        exp: i64::MAX,
        token_type: "access".to_string(),
        jti: "test".to_string(),
    }
}

pub fn pending_submission(owner_id: ObjectId, title: &str) -> Submission {
    Submission {
        id: None,
        owner_id,
        title: title.to_string(),
        authors: "A. Author".to_string(),
        year: 2024,
        description: "A test submission".to_string(),
        submission_type: "article".to_string(),
        university: None,
        file_ref: "files/test.pdf".to_string(),
        cover_ref: None,
        status: SubmissionStatus::Pending,
        feedback: String::new(),
        uploaded_at: String::new(),
    }
}

// --- User repository ---

#[derive(Default)]
pub struct InMemoryUserRepository {
    pub users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::already_exists("Duplicate key: email"));
        }
        user.id = Some(ObjectId::new());
        user.created_at = Some("2026-01-01T00:00:00Z".to_string());
        user.updated_at = user.created_at.clone();
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: ObjectId, user: User) -> RepositoryResult<User> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == Some(id)) {
            Some(existing) => {
                *existing = user.clone();
                existing.id = Some(id);
                Ok(existing.clone())
            }
            None => Err(RepositoryError::not_found(format!(
                "No user found to update for ID: {}",
                id
            ))),
        }
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != Some(id));
        if users.len() == before {
            return Err(RepositoryError::not_found(format!(
                "No user found to delete for ID: {}",
                id
            )));
        }
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == Some(*id))
            .cloned())
    }

    async fn list(&self) -> RepositoryResult<Vec<User>> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }
}

// --- Profile repository ---

#[derive(Default)]
pub struct InMemoryProfileRepository {
    pub profiles: Mutex<Vec<ResearcherProfile>>,
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn insert(&self, mut profile: ResearcherProfile) -> RepositoryResult<ResearcherProfile> {
        profile.id = Some(ObjectId::new());
        self.profiles.lock().unwrap().push(profile.clone());
        Ok(profile)
    }

    async fn update(
        &self,
        id: ObjectId,
        profile: ResearcherProfile,
    ) -> RepositoryResult<ResearcherProfile> {
        let mut profiles = self.profiles.lock().unwrap();
        match profiles.iter_mut().find(|p| p.id == Some(id)) {
            Some(existing) => {
                *existing = profile.clone();
                existing.id = Some(id);
                Ok(existing.clone())
            }
            None => Err(RepositoryError::not_found(format!(
                "No profile found to update for ID: {}",
                id
            ))),
        }
    }

    async fn find_by_user(
        &self,
        user_id: &ObjectId,
    ) -> RepositoryResult<Option<ResearcherProfile>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == *user_id)
            .cloned())
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> RepositoryResult<()> {
        self.profiles
            .lock()
            .unwrap()
            .retain(|p| p.user_id != *user_id);
        Ok(())
    }
}

// --- Submission repository ---

#[derive(Default)]
pub struct InMemorySubmissionRepository {
    pub submissions: Mutex<Vec<Submission>>,
    seq: AtomicU64,
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn insert(&self, mut submission: Submission) -> RepositoryResult<Submission> {
        submission.id = Some(ObjectId::new());
        // Monotonic fake timestamps keep ordering assertions deterministic
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        submission.uploaded_at = format!("2026-01-01T00:00:{:02}Z", seq);
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(submission)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Submission>> {
        Ok(self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == Some(*id))
            .cloned())
    }

    async fn find_approved_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Submission>> {
        Ok(self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == Some(*id) && s.status == SubmissionStatus::Approved)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &ObjectId) -> RepositoryResult<Vec<Submission>> {
        let mut matching: Vec<Submission> = self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.owner_id == *owner_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(matching)
    }

    async fn list_approved(&self) -> RepositoryResult<Vec<Submission>> {
        let mut matching: Vec<Submission> = self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.status == SubmissionStatus::Approved)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(matching)
    }

    async fn list_pending(&self) -> RepositoryResult<Vec<Submission>> {
        let mut matching: Vec<Submission> = self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.status == SubmissionStatus::Pending)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at));
        Ok(matching)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.submissions.lock().unwrap().len() as u64)
    }

    async fn count_pending(&self) -> RepositoryResult<u64> {
        Ok(self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.status == SubmissionStatus::Pending)
            .count() as u64)
    }

    async fn apply_decision(
        &self,
        id: &ObjectId,
        status: SubmissionStatus,
        feedback: &str,
    ) -> RepositoryResult<Option<Submission>> {
        let mut submissions = self.submissions.lock().unwrap();
        match submissions
            .iter_mut()
            .find(|s| s.id == Some(*id) && s.status == SubmissionStatus::Pending)
        {
            Some(submission) => {
                submission.status = status;
                submission.feedback = feedback.to_string();
                Ok(Some(submission.clone()))
            }
            None => Ok(None),
        }
    }
}

// --- Event repository ---

#[derive(Default)]
pub struct InMemoryEventRepository {
    pub events: Mutex<Vec<Event>>,
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn insert(&self, mut event: Event) -> RepositoryResult<Event> {
        event.id = Some(ObjectId::new());
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn update(&self, id: ObjectId, event: Event) -> RepositoryResult<Event> {
        let mut events = self.events.lock().unwrap();
        match events.iter_mut().find(|e| e.id == Some(id)) {
            Some(existing) => {
                *existing = event.clone();
                existing.id = Some(id);
                Ok(existing.clone())
            }
            None => Err(RepositoryError::not_found(format!(
                "No event found to update for ID: {}",
                id
            ))),
        }
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| e.id != Some(id));
        if events.len() == before {
            return Err(RepositoryError::not_found(format!(
                "No event found to delete for ID: {}",
                id
            )));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Event>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == Some(*id))
            .cloned())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Event>> {
        let mut events = self.events.lock().unwrap().clone();
        events.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(events)
    }

    async fn list_upcoming(&self, now: &str) -> RepositoryResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.date.as_str() >= now)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(events)
    }
}

// --- Blob storage ---

#[derive(Default)]
pub struct InMemoryBlobStorage {
    pub objects: Mutex<Vec<String>>,
    pub removed: Mutex<Vec<String>>,
}

#[async_trait]
impl BlobStorage for InMemoryBlobStorage {
    async fn put_object(
        &self,
        object_name: &str,
        _data: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<(), MinioError> {
        self.objects.lock().unwrap().push(object_name.to_string());
        Ok(())
    }

    async fn remove_object(&self, object_name: &str) -> Result<(), MinioError> {
        self.objects.lock().unwrap().retain(|o| o != object_name);
        self.removed.lock().unwrap().push(object_name.to_string());
        Ok(())
    }

    fn download_link(&self, object_name: &str) -> String {
        format!("http://blobs.test/{}", object_name)
    }
}
