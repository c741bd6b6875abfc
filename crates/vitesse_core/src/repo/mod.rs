//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the candidate data access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Repositories never validate user input; the service does that first.

pub mod candidate_repo;
