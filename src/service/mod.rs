pub mod contact_service;
pub mod event_service;
pub mod profile_service;
pub mod review_service;
pub mod submission_service;
pub mod user_service;

pub use contact_service::{ContactService, ContactServiceImpl};
pub use event_service::{EventService, EventServiceImpl};
pub use profile_service::{ProfileService, ProfileServiceImpl};
pub use review_service::{ReviewService, ReviewServiceImpl};
pub use submission_service::{SubmissionService, SubmissionServiceImpl};
pub use user_service::{UserService, UserServiceImpl};
