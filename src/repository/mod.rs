pub mod event_repo;
pub mod profile_repo;
pub mod repository_error;
pub mod submission_repo;
pub mod user_repo;

pub use event_repo::{EventRepository, MongoEventRepository};
pub use profile_repo::{MongoProfileRepository, ProfileRepository};
pub use repository_error::{RepositoryError, RepositoryResult};
pub use submission_repo::{MongoSubmissionRepository, SubmissionRepository};
pub use user_repo::{MongoUserRepository, UserRepository};
