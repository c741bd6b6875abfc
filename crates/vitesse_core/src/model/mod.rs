//! Domain model for the candidate directory.
//!
//! # Invariants
//! - Every stored candidate is identified by a store-assigned `CandidateId`.
//! - Deletion is a hard delete; there are no tombstones or history rows.

pub mod candidate;
