//! Core domain logic for the Vitesse candidate directory.
//!
//! Storage, validation and the reactive list derivation live here; screens,
//! pickers and formatting belong to the host application.

pub mod config;
pub mod db;
pub mod directory;
pub mod display;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use directory::{DirectoryError, DirectoryViewState};
pub use display::{derive_displayed, DisplayFilter, DisplayInput, DisplayQuery, DisplayTab};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::candidate::{CandidateDraft, CandidateId, CandidateRecord};
pub use repo::candidate_repo::{
    CandidateRepository, RepoError, RepoResult, SqliteCandidateRepository,
};
pub use service::candidate_service::{CandidateService, ServiceError, ServiceResult};
pub use service::profile::{age_on, CandidateProfile, EUR_TO_GBP_RATE};
pub use service::validation::{
    is_valid_email, parse_salary, validate_and_build, CandidateField, CandidateInput, FieldError,
    FieldErrors,
};
pub use store::{CandidateStore, CandidateStream};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
