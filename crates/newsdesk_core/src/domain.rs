//! crates/newsdesk_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Represents a registered reader - used throughout the app.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: Option<String>,
    pub payment_method: Option<String>,
}

// Only used internally for login - contains the stored credential.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub country: Option<String>,
    pub payment_method: Option<String>,
}

/// The profile captured at registration time. The password arrives here
/// already hashed; the raw secret never crosses the port boundary.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub country: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub payment_method: Option<String>,
}

/// A persisted summary of one catalog document, kept as history.
#[derive(Debug, Clone)]
pub struct SummaryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub source_text: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// A persisted translation of one catalog document, kept as history.
#[derive(Debug, Clone)]
pub struct TranslationRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub original_text: String,
    pub translated_text: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

/// The two-valued voice selector for speech synthesis. Anything that is
/// not "Male" falls into the default branch, matching the catalog UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceChoice {
    Male,
    Female,
}

impl VoiceChoice {
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("male") {
            VoiceChoice::Male
        } else {
            VoiceChoice::Female
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VoiceChoice::Male => "male",
            VoiceChoice::Female => "female",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_selector_defaults_to_female() {
        assert_eq!(VoiceChoice::from_label("Male"), VoiceChoice::Male);
        assert_eq!(VoiceChoice::from_label("MALE"), VoiceChoice::Male);
        assert_eq!(VoiceChoice::from_label("Female"), VoiceChoice::Female);
        assert_eq!(VoiceChoice::from_label("robot"), VoiceChoice::Female);
        assert_eq!(VoiceChoice::from_label(""), VoiceChoice::Female);
    }
}
