pub mod event;
pub mod profile;
pub mod submission;
pub mod user;
