//! Record Store: durable candidate table plus live result streams.
//!
//! # Responsibility
//! - Own the SQLite connection for one directory session.
//! - Serialize every statement through one lock.
//! - Publish full replacement snapshots of the "all" and "favorites" queries
//!   after each write.
//!
//! # Invariants
//! - Each live stream is created once per store and shared by all subscribers.
//! - A stream with no live receivers is not re-queried until someone subscribes.

mod candidate_store;
pub mod seed;

pub use candidate_store::{CandidateStore, CandidateStream};
