//! Shared candidate store: serialized writes and live list streams.

use crate::config::CoreConfig;
use crate::db::open_db_with_report;
use crate::model::candidate::{CandidateDraft, CandidateId, CandidateRecord};
use crate::repo::candidate_repo::{
    CandidateRepository, RepoError, RepoResult, SqliteCandidateRepository,
};
use crate::store::seed::seed_demo_candidates;
use log::{debug, error, info, warn};
use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;
use tokio::sync::watch;

/// Live subscription to one candidate query.
///
/// `borrow()` yields the latest full snapshot; `changed().await` resolves after
/// the store published a replacement.
pub type CandidateStream = watch::Receiver<Vec<CandidateRecord>>;

struct StoreState {
    conn: Connection,
    all_stale: bool,
    favorites_stale: bool,
}

/// Candidate store shared by the service and every directory view.
///
/// Construct one per application session and hand it out behind an `Arc`.
pub struct CandidateStore {
    state: Mutex<StoreState>,
    all_tx: watch::Sender<Vec<CandidateRecord>>,
    favorites_tx: watch::Sender<Vec<CandidateRecord>>,
}

impl CandidateStore {
    /// Opens the configured database and seeds demo data on first creation.
    pub fn open(config: &CoreConfig) -> RepoResult<Self> {
        let (conn, report) = open_db_with_report(config.db_path.as_deref())?;
        let store = Self::from_connection(conn)?;

        if config.seed_demo_data && report.created_schema() {
            let seeded = seed_demo_candidates(&store)?;
            info!("event=store_seed module=store status=ok count={seeded}");
        } else {
            debug!(
                "event=store_seed module=store status=skipped enabled={} created_schema={}",
                config.seed_demo_data,
                report.created_schema()
            );
        }

        Ok(store)
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> RepoResult<Self> {
        let (all, favorites) = {
            let repo = SqliteCandidateRepository::new(&conn);
            (repo.list_all()?, repo.list_favorites()?)
        };
        let (all_tx, _) = watch::channel(all);
        let (favorites_tx, _) = watch::channel(favorites);

        Ok(Self {
            state: Mutex::new(StoreState {
                conn,
                all_stale: false,
                favorites_stale: false,
            }),
            all_tx,
            favorites_tx,
        })
    }

    /// Subscribes to all candidates ordered by ascending id.
    pub fn stream_all(&self) -> RepoResult<CandidateStream> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        if state.all_stale {
            let records = SqliteCandidateRepository::new(&state.conn).list_all()?;
            self.all_tx.send_replace(records);
            state.all_stale = false;
        }
        Ok(self.all_tx.subscribe())
    }

    /// Subscribes to favorite candidates in last-name, first-name order.
    pub fn stream_favorites(&self) -> RepoResult<CandidateStream> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        if state.favorites_stale {
            let records = SqliteCandidateRepository::new(&state.conn).list_favorites()?;
            self.favorites_tx.send_replace(records);
            state.favorites_stale = false;
        }
        Ok(self.favorites_tx.subscribe())
    }

    /// Number of live subscribers per stream as `(all, favorites)`.
    pub fn subscriber_counts(&self) -> (usize, usize) {
        (
            self.all_tx.receiver_count(),
            self.favorites_tx.receiver_count(),
        )
    }

    /// Number of stored candidates.
    pub fn count(&self) -> RepoResult<u64> {
        let state = self.lock()?;
        SqliteCandidateRepository::new(&state.conn).count()
    }

    /// Inserts several drafts in one transaction and publishes once.
    pub fn insert_batch(&self, drafts: &[CandidateDraft]) -> RepoResult<Vec<CandidateId>> {
        let started_at = Instant::now();
        let mut guard = self.lock()?;
        let state = &mut *guard;

        let tx = state.conn.transaction()?;
        let ids = {
            let repo = SqliteCandidateRepository::new(&tx);
            drafts
                .iter()
                .map(|draft| repo.insert(draft))
                .collect::<RepoResult<Vec<_>>>()
        };
        let ids = match ids {
            Ok(ids) => ids,
            Err(err) => {
                error!(
                    "event=candidate_insert_batch module=store status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                return Err(err);
            }
        };
        tx.commit()?;

        self.publish(state);
        info!(
            "event=candidate_insert_batch module=store status=ok count={} duration_ms={}",
            ids.len(),
            started_at.elapsed().as_millis()
        );
        Ok(ids)
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|_| RepoError::Unavailable("candidate store lock poisoned"))
    }

    /// Runs one write under the store lock and republishes both streams on success.
    fn write<T>(
        &self,
        event: &'static str,
        op: impl FnOnce(&SqliteCandidateRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let mut guard = self.lock()?;
        let state = &mut *guard;

        let result = op(&SqliteCandidateRepository::new(&state.conn));
        match result {
            Ok(value) => {
                self.publish(state);
                info!(
                    "event={event} module=store status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                let error_code = if err.is_storage_error() {
                    "storage_failed"
                } else {
                    "not_found"
                };
                warn!(
                    "event={event} module=store status=error duration_ms={} error_code={error_code} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    /// Pushes fresh snapshots to streams that have receivers.
    ///
    /// A failed refresh leaves the stream stale instead of failing the write
    /// that already committed.
    fn publish(&self, state: &mut StoreState) {
        let repo = SqliteCandidateRepository::new(&state.conn);

        if self.all_tx.receiver_count() == 0 {
            state.all_stale = true;
        } else {
            match repo.list_all() {
                Ok(records) => {
                    self.all_tx.send_replace(records);
                    state.all_stale = false;
                }
                Err(err) => {
                    state.all_stale = true;
                    error!("event=stream_publish module=store status=error stream=all error={err}");
                }
            }
        }

        if self.favorites_tx.receiver_count() == 0 {
            state.favorites_stale = true;
        } else {
            match repo.list_favorites() {
                Ok(records) => {
                    self.favorites_tx.send_replace(records);
                    state.favorites_stale = false;
                }
                Err(err) => {
                    state.favorites_stale = true;
                    error!(
                        "event=stream_publish module=store status=error stream=favorites error={err}"
                    );
                }
            }
        }
    }
}

impl CandidateRepository for CandidateStore {
    fn insert(&self, draft: &CandidateDraft) -> RepoResult<CandidateId> {
        let id = self.write("candidate_insert", |repo| repo.insert(draft))?;
        debug!("event=candidate_insert module=store status=ok id={id}");
        Ok(id)
    }

    fn get_by_id(&self, id: CandidateId) -> RepoResult<Option<CandidateRecord>> {
        let state = self.lock()?;
        SqliteCandidateRepository::new(&state.conn).get_by_id(id)
    }

    fn update(&self, record: &CandidateRecord) -> RepoResult<()> {
        self.write("candidate_update", |repo| repo.update(record))?;
        debug!("event=candidate_update module=store status=ok id={}", record.id);
        Ok(())
    }

    fn update_from_draft(
        &self,
        id: CandidateId,
        draft: &CandidateDraft,
        favorite_override: Option<bool>,
    ) -> RepoResult<CandidateRecord> {
        let record = self.write("candidate_update", |repo| {
            repo.update_from_draft(id, draft, favorite_override)
        })?;
        debug!(
            "event=candidate_update module=store status=ok id={id} is_favorite={}",
            record.is_favorite
        );
        Ok(record)
    }

    fn delete_by_id(&self, id: CandidateId) -> RepoResult<()> {
        self.write("candidate_delete", |repo| repo.delete_by_id(id))?;
        debug!("event=candidate_delete module=store status=ok id={id}");
        Ok(())
    }

    fn list_all(&self) -> RepoResult<Vec<CandidateRecord>> {
        let state = self.lock()?;
        SqliteCandidateRepository::new(&state.conn).list_all()
    }

    fn list_favorites(&self) -> RepoResult<Vec<CandidateRecord>> {
        let state = self.lock()?;
        SqliteCandidateRepository::new(&state.conn).list_favorites()
    }
}
