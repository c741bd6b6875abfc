//! Candidate use-case service.
//!
//! # Responsibility
//! - Validate raw form input before anything reaches storage.
//! - Orchestrate save/edit/remove/toggle-favorite through a repository.
//!
//! # Invariants
//! - Validation failures never reach the repository.
//! - Records passed in by callers are never mutated; updated values are returned.
//! - Store failures are surfaced unchanged in meaning; there are no retries.

use crate::model::candidate::{CandidateDraft, CandidateId, CandidateRecord};
use crate::repo::candidate_repo::{CandidateRepository, RepoError};
use crate::service::validation::{validate_and_build, CandidateInput, FieldErrors};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for candidate use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// One or more form fields were rejected.
    Validation(FieldErrors),
    /// Target candidate does not exist.
    NotFound(CandidateId),
    /// The storage medium failed; the attempted operation did not apply.
    Storage(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "invalid candidate: {errors}"),
            Self::NotFound(id) => write!(f, "candidate not found: {id}"),
            Self::Storage(err) => write!(f, "candidate storage failure: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

/// Candidate service facade over a repository implementation.
pub struct CandidateService<R: CandidateRepository> {
    repo: R,
}

impl<R: CandidateRepository> CandidateService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates raw form input; see [`validate_and_build`].
    pub fn validate_and_build(
        &self,
        input: &CandidateInput<'_>,
    ) -> Result<CandidateDraft, FieldErrors> {
        validate_and_build(input)
    }

    /// Persists a validated draft and returns it with its new id.
    pub fn save(&self, draft: &CandidateDraft) -> ServiceResult<CandidateRecord> {
        let id = self.repo.insert(draft).map_err(|err| {
            warn!("event=candidate_save module=service status=error error={err}");
            ServiceError::from(err)
        })?;
        info!("event=candidate_save module=service status=ok id={id}");
        Ok(draft.clone().into_record(id))
    }

    /// Replaces every field of candidate `id` with `draft`.
    ///
    /// The stored favorite flag is kept unless `favorite_override` is set.
    pub fn edit(
        &self,
        id: CandidateId,
        draft: &CandidateDraft,
        favorite_override: Option<bool>,
    ) -> ServiceResult<CandidateRecord> {
        let record = self
            .repo
            .update_from_draft(id, draft, favorite_override)
            .map_err(|err| {
                warn!("event=candidate_edit module=service status=error id={id} error={err}");
                ServiceError::from(err)
            })?;

        info!("event=candidate_edit module=service status=ok id={id}");
        Ok(record)
    }

    /// Deletes a candidate; deleting an already removed one succeeds.
    pub fn remove(&self, record: &CandidateRecord) -> ServiceResult<()> {
        self.repo.delete(record).map_err(|err| {
            warn!(
                "event=candidate_remove module=service status=error id={} error={err}",
                record.id
            );
            ServiceError::from(err)
        })?;
        info!("event=candidate_remove module=service status=ok id={}", record.id);
        Ok(())
    }

    /// Flips the favorite flag, persists it and returns the new record.
    pub fn toggle_favorite(&self, record: &CandidateRecord) -> ServiceResult<CandidateRecord> {
        let updated = record.with_favorite_toggled();
        self.repo.update(&updated).map_err(|err| {
            warn!(
                "event=candidate_toggle_favorite module=service status=error id={} error={err}",
                record.id
            );
            ServiceError::from(err)
        })?;
        info!(
            "event=candidate_toggle_favorite module=service status=ok id={} is_favorite={}",
            updated.id, updated.is_favorite
        );
        Ok(updated)
    }

    /// Gets one candidate by id.
    pub fn get(&self, id: CandidateId) -> ServiceResult<Option<CandidateRecord>> {
        Ok(self.repo.get_by_id(id)?)
    }

    /// Add-form flow: validate, then save.
    pub fn add_candidate(&self, input: &CandidateInput<'_>) -> ServiceResult<CandidateRecord> {
        let draft = validate_and_build(input)?;
        self.save(&draft)
    }

    /// Edit-form flow: validate, then replace candidate `id`.
    pub fn edit_candidate(
        &self,
        id: CandidateId,
        input: &CandidateInput<'_>,
        favorite_override: Option<bool>,
    ) -> ServiceResult<CandidateRecord> {
        let draft = validate_and_build(input)?;
        self.edit(id, &draft, favorite_override)
    }
}
