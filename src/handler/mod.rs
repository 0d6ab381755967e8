pub mod admin_handler;
pub mod contact_handler;
pub mod event_handler;
pub mod profile_handler;
pub mod submission_handler;
pub mod user_handler;
