//! Candidate form validation.
//!
//! # Responsibility
//! - Turn raw form strings into a well-formed [`CandidateDraft`].
//! - Report every failing required field at once.
//!
//! # Invariants
//! - First name, last name, phone, email and date of birth are never blank in
//!   a returned draft.
//! - A blank email reports `Required` only, never `InvalidFormat` as well.
//! - Unparsable salary text becomes `0.0`; it is not a validation failure.

use crate::model::candidate::CandidateDraft;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandidateInput<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone_number: &'a str,
    pub email: &'a str,
    pub date_of_birth: &'a str,
    pub salary_text: &'a str,
    pub notes: &'a str,
    /// Reference resolved by the photo subsystem; never inspected here.
    pub profile_photo_ref: Option<&'a str>,
}

/// Fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CandidateField {
    FirstName,
    LastName,
    PhoneNumber,
    Email,
    DateOfBirth,
}

impl CandidateField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::PhoneNumber => "phone_number",
            Self::Email => "email",
            Self::DateOfBirth => "date_of_birth",
        }
    }
}

/// Why one field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidFormat,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::InvalidFormat => write!(f, "invalid format"),
        }
    }
}

/// Per-field validation failures; never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<CandidateField, FieldError>,
}

impl FieldErrors {
    pub fn get(&self, field: CandidateField) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: CandidateField) -> bool {
        self.errors.contains_key(&field)
    }

    /// Failing fields in declaration order.
    pub fn fields(&self) -> Vec<CandidateField> {
        self.errors.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CandidateField, FieldError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn insert(&mut self, field: CandidateField, error: FieldError) {
        self.errors.insert(field, error);
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {error}", field.as_str())?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

/// Returns whether `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Parses salary text, falling back to `0.0` for anything that is not a
/// finite non-negative decimal.
pub fn parse_salary(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

/// Validates raw form input and builds a trimmed draft.
///
/// The draft starts as not-favorite; edit flows decide the final flag.
pub fn validate_and_build(input: &CandidateInput<'_>) -> Result<CandidateDraft, FieldErrors> {
    let mut errors = FieldErrors::default();

    let required = [
        (CandidateField::FirstName, input.first_name),
        (CandidateField::LastName, input.last_name),
        (CandidateField::PhoneNumber, input.phone_number),
        (CandidateField::Email, input.email),
        (CandidateField::DateOfBirth, input.date_of_birth),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.insert(field, FieldError::Required);
        }
    }

    if !errors.contains(CandidateField::Email) && !is_valid_email(input.email) {
        errors.insert(CandidateField::Email, FieldError::InvalidFormat);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CandidateDraft {
        first_name: input.first_name.trim().to_string(),
        last_name: input.last_name.trim().to_string(),
        phone_number: input.phone_number.trim().to_string(),
        email: input.email.trim().to_string(),
        date_of_birth: input.date_of_birth.trim().to_string(),
        expected_salary: parse_salary(input.salary_text),
        notes: input.notes.trim().to_string(),
        profile_photo_ref: input.profile_photo_ref.map(str::to_string),
        is_favorite: false,
    })
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, parse_salary};

    #[test]
    fn accepts_conventional_addresses() {
        for email in [
            "jean.dupont@email.com",
            "first+tag@sub.domain.org",
            "a_b-c@x.io",
            "UPPER@CASE.FR",
        ] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "invalid-email",
            "missing-at.com",
            "user@domain",
            "user@domain.c",
            "user@domain.c0m",
            "@domain.com",
            "user name@domain.com",
            "user@domain.com ",
            "",
        ] {
            assert!(!is_valid_email(email), "{email:?} should be invalid");
        }
    }

    #[test]
    fn salary_falls_back_to_zero() {
        assert_eq!(parse_salary("45000"), 45000.0);
        assert_eq!(parse_salary(" 38000.50 "), 38000.5);
        assert_eq!(parse_salary("abc"), 0.0);
        assert_eq!(parse_salary(""), 0.0);
        assert_eq!(parse_salary("-10"), 0.0);
        assert_eq!(parse_salary("NaN"), 0.0);
        assert_eq!(parse_salary("inf"), 0.0);
    }
}
