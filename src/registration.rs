//! Registrant records and their public projection.
//!
//! A [`Registration`] is created exactly once per successful submission and is
//! never updated or deleted. The public "wall of signatures" only ever sees
//! the [`Signature`] projection, which carries no email address. Keeping the
//! projection as its own type means a field added to [`Registration`] later
//! stays private unless it is deliberately added here too.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a [`Registration`]. No email, ever.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Registration> for Signature {
    fn from(registration: &Registration) -> Self {
        Self {
            id: registration.id.clone(),
            name: registration.name.clone(),
            created_at: registration.created_at,
        }
    }
}

impl Registration {
    /// Builds a record from raw form input.
    ///
    /// Name is trimmed, email is trimmed and lower-cased. Either field being
    /// empty after trimming rejects the submission before anything is stored.
    pub fn from_submission(name: &str, email: &str) -> Result<Self, AppError> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() || email.is_empty() {
            return Err(AppError::Validation(
                "Name and email are required".to_string(),
            ));
        }

        Ok(Self {
            id: next_id(),
            name: name.to_string(),
            email: email.to_lowercase(),
            created_at: Utc::now(),
        })
    }
}

// Millisecond epoch as an opaque string, same scheme the landing page has
// used since launch. Time-derived, so ordering is only monotonic-ish.
fn next_id() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_name_and_lowercases_email() {
        let registration = Registration::from_submission("  Ana Díaz ", "ANA@Example.com ").unwrap();

        assert_eq!(registration.name, "Ana Díaz");
        assert_eq!(registration.email, "ana@example.com");
        assert!(!registration.id.is_empty());
    }

    #[test]
    fn rejects_blank_name() {
        let result = Registration::from_submission("   ", "a@b.com");

        match result {
            Err(AppError::Validation(message)) => assert!(message.contains("required")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_blank_email() {
        assert!(Registration::from_submission("Ana", "").is_err());
    }

    #[test]
    fn signature_never_carries_email() {
        let registration = Registration::from_submission("Ana", "ana@example.com").unwrap();
        let signature = Signature::from(&registration);

        let json = serde_json::to_value(&signature).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();

        assert!(!keys.iter().any(|k| k.as_str() == "email"));
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["id"], registration.id);
        assert!(json["createdAt"].is_string());
    }
}
