/// Data models for users and projects
///
/// Plain records owned by the in-memory stores in `crate::core`.

use chrono::NaiveDate;
use serde::Serialize;

/// Registered user
#[derive(Debug, Clone)]
pub struct User {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String, // Argon2id PHC string
    pub phone: String,
}

impl User {
    /// Public view of the user, without credentials
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// What the rest of the app gets to see about a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Raw registration input, exactly as typed
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

/// Stable project identifier, assigned at creation and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(pub u64);

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Crowdfunding campaign
#[derive(Debug, Clone)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub details: String,
    pub target: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub owner_email: String,
}

impl Project {
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner_email == email
    }

    /// Replace every editable field at once
    pub(crate) fn apply(&mut self, draft: ProjectDraft) {
        self.title = draft.title;
        self.details = draft.details;
        self.target = draft.target;
        self.start_date = draft.start_date;
        self.end_date = draft.end_date;
    }
}

/// Fully validated project fields, ready to be stored
///
/// Built by `ProjectDraft::parse`, so holding one means every field check
/// already passed and `start_date < end_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub details: String,
    pub target: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One line of the project listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub index: usize, // 1-based display index
    pub title: String,
    pub target: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Result of listing projects
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    /// Nothing stored yet
    Empty,
    Projects(Vec<ProjectSummary>),
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }

    pub fn summaries(&self) -> &[ProjectSummary] {
        match self {
            Listing::Empty => &[],
            Listing::Projects(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_profile_leaves_out_hash() {
        let user = User {
            email: "ann@x.com".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            phone: "01012345678".to_string(),
        };

        let profile = user.profile();
        assert_eq!(profile.email, "ann@x.com");
        assert_eq!(profile.first_name, "Ann");
        assert_eq!(profile.last_name, "Lee");
        assert!(!format!("{:?}", profile).contains("argon2id"));
    }

    #[test]
    fn test_project_apply_replaces_all_fields() {
        let mut project = Project {
            id: ProjectId(1),
            title: "Old".to_string(),
            details: "old details".to_string(),
            target: 10.0,
            start_date: date("2025-01-01"),
            end_date: date("2025-02-01"),
            owner_email: "ann@x.com".to_string(),
        };

        project.apply(ProjectDraft {
            title: "New".to_string(),
            details: "new details".to_string(),
            target: 99.5,
            start_date: date("2025-03-01"),
            end_date: date("2025-04-01"),
        });

        assert_eq!(project.title, "New");
        assert_eq!(project.details, "new details");
        assert_eq!(project.target, 99.5);
        assert_eq!(project.start_date, date("2025-03-01"));
        assert_eq!(project.end_date, date("2025-04-01"));
        assert_eq!(project.id, ProjectId(1));
        assert!(project.is_owned_by("ann@x.com"));
    }

    #[test]
    fn test_project_dates_serialize_as_iso() {
        let summary = ProjectSummary {
            index: 1,
            title: "Well".to_string(),
            target: 500.0,
            start_date: date("2024-02-29"),
            end_date: date("2024-03-01"),
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"2024-02-29\""));
    }

    #[test]
    fn test_listing_helpers() {
        assert!(Listing::Empty.is_empty());
        assert!(Listing::Empty.summaries().is_empty());
        assert_eq!(ProjectId(4).to_string(), "#4");
    }
}
