//! Candidate domain model.
//!
//! # Responsibility
//! - Define the persisted candidate record and its id-less draft form.
//! - Own the ordering rule used by the favorites short-list.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changes afterwards.
//! - Required text fields are non-blank once a draft passed validation.
//! - `date_of_birth` is kept verbatim as `DD/MM/YYYY` text.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Store-assigned identifier for a candidate row.
pub type CandidateId = i64;

/// Candidate data that has not been persisted yet.
///
/// Produced by validation and consumed by `insert`; the store turns it into a
/// [`CandidateRecord`] by assigning an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateDraft {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    /// `DD/MM/YYYY`, stored as typed by the user.
    pub date_of_birth: String,
    /// Non-negative yearly salary expectation.
    #[serde(default)]
    pub expected_salary: f64,
    #[serde(default)]
    pub notes: String,
    /// Opaque reference owned by the photo subsystem.
    #[serde(default)]
    pub profile_photo_ref: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl CandidateDraft {
    /// Attaches a store-assigned id.
    pub fn into_record(self, id: CandidateId) -> CandidateRecord {
        CandidateRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            email: self.email,
            date_of_birth: self.date_of_birth,
            expected_salary: self.expected_salary,
            notes: self.notes,
            profile_photo_ref: self.profile_photo_ref,
            is_favorite: self.is_favorite,
        }
    }
}

/// One persisted candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub date_of_birth: String,
    pub expected_salary: f64,
    pub notes: String,
    pub profile_photo_ref: Option<String>,
    pub is_favorite: bool,
}

impl CandidateRecord {
    /// Returns a copy with the favorite flag flipped and every other field kept.
    pub fn with_favorite_toggled(&self) -> Self {
        Self {
            is_favorite: !self.is_favorite,
            ..self.clone()
        }
    }

    /// Case-insensitive substring match on first or last name.
    ///
    /// `needle_lowercase` must already be lowercased by the caller.
    pub fn name_contains(&self, needle_lowercase: &str) -> bool {
        self.first_name.to_lowercase().contains(needle_lowercase)
            || self.last_name.to_lowercase().contains(needle_lowercase)
    }
}

/// Favorites order: last name, then first name, case-insensitive; id breaks ties.
pub fn favorite_order(left: &CandidateRecord, right: &CandidateRecord) -> Ordering {
    left.last_name
        .to_lowercase()
        .cmp(&right.last_name.to_lowercase())
        .then_with(|| {
            left.first_name
                .to_lowercase()
                .cmp(&right.first_name.to_lowercase())
        })
        .then_with(|| left.id.cmp(&right.id))
}
