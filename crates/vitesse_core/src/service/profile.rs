//! Derived values shown on the candidate detail screen.
//!
//! Only the numbers are computed here; turning them into localized text is a
//! client concern.

use crate::model::candidate::CandidateRecord;
use chrono::{Datelike, NaiveDate};

/// Fixed conversion rate used for the secondary salary figure.
pub const EUR_TO_GBP_RATE: f64 = 0.855;

const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";

/// Detail projection of one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateProfile {
    pub record: CandidateRecord,
    /// Whole years since birth; `None` when the stored date does not parse.
    pub age_years: Option<u32>,
    pub expected_salary_gbp: f64,
}

impl CandidateProfile {
    pub fn build(record: CandidateRecord, today: NaiveDate) -> Self {
        let age_years = age_on(&record.date_of_birth, today);
        let expected_salary_gbp = record.expected_salary * EUR_TO_GBP_RATE;
        Self {
            record,
            age_years,
            expected_salary_gbp,
        }
    }
}

/// Age in whole years on `today` for a `DD/MM/YYYY` birth date.
///
/// Birth dates in the future yield `Some(0)`.
pub fn age_on(date_of_birth: &str, today: NaiveDate) -> Option<u32> {
    let born = NaiveDate::parse_from_str(date_of_birth.trim(), BIRTH_DATE_FORMAT).ok()?;
    if born >= today {
        return Some(0);
    }

    let mut years = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}
