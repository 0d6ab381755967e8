use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Closed set of account roles. `Admin` and `Staff` are only assignable
/// through the admin surface or the bootstrap config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Researcher,
    University,
    ConfOrganizer,
    PublicVisitor,
    Admin,
    Staff,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Researcher => "researcher",
            UserRole::University => "university",
            UserRole::ConfOrganizer => "conf_organizer",
            UserRole::PublicVisitor => "public_visitor",
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
        }
    }

    pub fn parse(s: &str) -> Option<UserRole> {
        match s {
            "researcher" => Some(UserRole::Researcher),
            "university" => Some(UserRole::University),
            "conf_organizer" => Some(UserRole::ConfOrganizer),
            "public_visitor" => Some(UserRole::PublicVisitor),
            "admin" => Some(UserRole::Admin),
            "staff" => Some(UserRole::Staff),
            _ => None,
        }
    }

    pub fn is_staff_or_admin(self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Staff)
    }

    /// Whether accounts with this role must carry a university affiliation
    pub fn requires_university(self) -> bool {
        matches!(self, UserRole::University)
    }

    /// Post-login destination. Closed table over the role set; visitors are
    /// the default bucket.
    pub fn redirect_path(self) -> &'static str {
        match self {
            UserRole::Admin | UserRole::Staff => "/admin-dashboard",
            UserRole::Researcher => "/researcher",
            UserRole::University => "/university",
            UserRole::ConfOrganizer => "/organizer",
            UserRole::PublicVisitor => "/visitor",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub username: String,
    /// Stored lowercased; uniqueness is case-insensitive
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub phone_number: Option<String>,
    pub university_name: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
