//! Demonstration data set for first-ever startup.
//!
//! Seeding is a convenience for fresh installs, never part of the store
//! contract; `CoreConfig::seed_demo_data = false` turns it off.

use crate::model::candidate::CandidateDraft;
use crate::repo::candidate_repo::{RepoError, RepoResult};
use crate::store::CandidateStore;

const DEMO_CANDIDATES_JSON: &str = include_str!("demo_candidates.json");

/// Parses the embedded demonstration candidates.
pub fn demo_candidates() -> RepoResult<Vec<CandidateDraft>> {
    serde_json::from_str(DEMO_CANDIDATES_JSON)
        .map_err(|err| RepoError::InvalidData(format!("embedded demo candidates: {err}")))
}

/// Inserts the demonstration candidates in one transaction.
///
/// Returns the number of inserted rows.
pub fn seed_demo_candidates(store: &CandidateStore) -> RepoResult<usize> {
    let drafts = demo_candidates()?;
    let ids = store.insert_batch(&drafts)?;
    Ok(ids.len())
}

#[cfg(test)]
mod tests {
    use super::demo_candidates;

    #[test]
    fn embedded_demo_data_is_well_formed() {
        let drafts = demo_candidates().expect("demo json should parse");
        assert_eq!(drafts.len(), 8);
        assert_eq!(drafts.iter().filter(|draft| draft.is_favorite).count(), 2);
        assert!(drafts.iter().all(|draft| !draft.first_name.trim().is_empty()
            && !draft.last_name.trim().is_empty()
            && !draft.email.trim().is_empty()
            && draft.expected_salary > 0.0));
    }
}
