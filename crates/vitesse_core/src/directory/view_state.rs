//! Directory session: live store snapshots plus tab and search state.

use crate::display::{DisplayFilter, DisplayInput, DisplayQuery, DisplayTab};
use crate::model::candidate::CandidateRecord;
use crate::repo::candidate_repo::RepoError;
use crate::store::{CandidateStore, CandidateStream};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub enum DirectoryError {
    /// Subscribing to the store streams failed.
    Store(RepoError),
    /// The session can no longer apply changes.
    Closed,
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Closed => write!(f, "directory session is closed"),
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Closed => None,
        }
    }
}

impl From<RepoError> for DirectoryError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

/// Handle to a running directory session.
///
/// Tab and search changes are applied on the caller's thread; the session task
/// only feeds store snapshots into the same filter.
pub struct DirectoryViewState {
    filter: Arc<Mutex<DisplayFilter>>,
    displayed: watch::Receiver<Vec<CandidateRecord>>,
    loading: watch::Receiver<bool>,
    task: JoinHandle<()>,
}

impl DirectoryViewState {
    /// Subscribes to the store streams and starts the session task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(store: &CandidateStore) -> Result<Self, DirectoryError> {
        let all_rx = store.stream_all()?;
        let favorites_rx = store.stream_favorites()?;

        let filter = DisplayFilter::new();
        let displayed = filter.subscribe();
        let filter = Arc::new(Mutex::new(filter));
        let (loading_tx, loading) = watch::channel(true);

        let task = tokio::spawn(run_directory_loop(
            Arc::clone(&filter),
            all_rx,
            favorites_rx,
            loading_tx,
        ));
        info!("event=directory_open module=directory status=ok");

        Ok(Self {
            filter,
            displayed,
            loading,
            task,
        })
    }

    /// Switches the tab; the displayed list is re-derived before this returns.
    pub fn set_tab(&self, tab: DisplayTab) -> Result<(), DirectoryError> {
        apply_input(&self.filter, DisplayInput::Tab(tab))
    }

    /// Replaces the search text; the displayed list is re-derived before this returns.
    pub fn set_search_text(&self, text: impl Into<String>) -> Result<(), DirectoryError> {
        apply_input(&self.filter, DisplayInput::SearchText(text.into()))
    }

    /// Tab and search text the displayed list was derived from.
    pub fn query(&self) -> Result<DisplayQuery, DirectoryError> {
        let filter = lock_filter(&self.filter)?;
        Ok(filter.query().clone())
    }

    /// Receiver for the displayed list; the UI observes this one channel.
    pub fn displayed(&self) -> watch::Receiver<Vec<CandidateRecord>> {
        self.displayed.clone()
    }

    /// Latest displayed list.
    pub fn current(&self) -> Vec<CandidateRecord> {
        self.displayed.borrow().clone()
    }

    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.clone()
    }

    /// `true` until the first store snapshots have been applied.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Waits until the first snapshots have been applied.
    pub async fn wait_until_loaded(&self) -> Result<(), DirectoryError> {
        let mut loading = self.loading.clone();
        loading
            .wait_for(|is_loading| !*is_loading)
            .await
            .map(|_| ())
            .map_err(|_| DirectoryError::Closed)
    }
}

impl Drop for DirectoryViewState {
    fn drop(&mut self) {
        self.task.abort();
        debug!("event=directory_close module=directory status=ok");
    }
}

fn lock_filter(
    filter: &Mutex<DisplayFilter>,
) -> Result<MutexGuard<'_, DisplayFilter>, DirectoryError> {
    filter.lock().map_err(|_| DirectoryError::Closed)
}

fn apply_input(filter: &Mutex<DisplayFilter>, input: DisplayInput) -> Result<(), DirectoryError> {
    lock_filter(filter)?.apply(input);
    Ok(())
}

async fn run_directory_loop(
    filter: Arc<Mutex<DisplayFilter>>,
    mut all_rx: CandidateStream,
    mut favorites_rx: CandidateStream,
    loading_tx: watch::Sender<bool>,
) {
    let all = all_rx.borrow_and_update().clone();
    let favorites = favorites_rx.borrow_and_update().clone();
    let loaded = apply_input(&filter, DisplayInput::AllRecords(all))
        .and_then(|()| apply_input(&filter, DisplayInput::FavoriteRecords(favorites)));
    if loaded.is_err() {
        error!("event=directory_loop module=directory status=error error=filter_poisoned");
        return;
    }
    loading_tx.send_replace(false);

    let mut all_open = true;
    let mut favorites_open = true;

    while all_open || favorites_open {
        let applied = tokio::select! {
            changed = all_rx.changed(), if all_open => match changed {
                Ok(()) => {
                    let records = all_rx.borrow_and_update().clone();
                    apply_input(&filter, DisplayInput::AllRecords(records))
                }
                Err(_) => {
                    warn!("event=directory_stream module=directory status=closed stream=all");
                    all_open = false;
                    Ok(())
                }
            },

            changed = favorites_rx.changed(), if favorites_open => match changed {
                Ok(()) => {
                    let records = favorites_rx.borrow_and_update().clone();
                    apply_input(&filter, DisplayInput::FavoriteRecords(records))
                }
                Err(_) => {
                    warn!("event=directory_stream module=directory status=closed stream=favorites");
                    favorites_open = false;
                    Ok(())
                }
            },
        };

        if applied.is_err() {
            error!("event=directory_loop module=directory status=error error=filter_poisoned");
            break;
        }
    }

    debug!("event=directory_loop module=directory status=stopped");
}
