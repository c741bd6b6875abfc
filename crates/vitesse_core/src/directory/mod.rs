//! Directory View-State: the list screen's session object.
//!
//! # Responsibility
//! - Hold the current tab, search text and loading flag.
//! - Feed store stream updates and user query changes into one
//!   [`crate::display::DisplayFilter`].
//!
//! # Invariants
//! - Tab and search changes are re-derived before `set_*` returns.
//! - Store snapshots and query changes go through the same locked filter.
//! - Dropping the view state stops its task and releases its store subscriptions.

mod view_state;

pub use view_state::{DirectoryError, DirectoryViewState};
