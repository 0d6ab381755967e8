pub mod contact_dto;
pub mod event_dto;
pub mod profile_dto;
pub mod submission_dto;
pub mod user_dto;
