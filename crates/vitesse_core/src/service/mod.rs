//! Core use-case services.
//!
//! # Responsibility
//! - Turn raw form input into validated candidate drafts.
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep UI layers decoupled from storage details.

pub mod candidate_service;
pub mod profile;
pub mod validation;
