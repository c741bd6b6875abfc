//! Display Filter Engine.
//!
//! # Responsibility
//! - Derive the displayed candidate list from the "all" snapshot, the
//!   "favorites" snapshot and the active [`DisplayQuery`].
//!
//! # Invariants
//! - Derivation is pure: no I/O and no shared state.
//! - Every input change goes through [`DisplayFilter::apply`], which always
//!   re-derives and republishes.

mod filter;

pub use filter::{derive_displayed, DisplayFilter, DisplayInput, DisplayQuery, DisplayTab};
