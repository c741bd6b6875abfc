//! Candidate repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and the two list queries over the `candidates` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `update` is a whole-row replace and reports `NotFound` for unknown ids.
//! - `update_from_draft` reads and writes the favorite flag in one statement.
//! - `delete` of an unknown id succeeds without touching any row.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::candidate::{favorite_order, CandidateDraft, CandidateId, CandidateRecord};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

const CANDIDATE_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    phone_number,
    email,
    date_of_birth,
    expected_salary,
    notes,
    profile_photo_ref,
    is_favorite
FROM candidates";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for candidate persistence and query operations.
///
/// Everything except `NotFound` is a storage failure from the caller's point
/// of view.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(CandidateId),
    InvalidData(String),
    /// The storage medium cannot be reached, e.g. a poisoned connection lock.
    Unavailable(&'static str),
}

impl RepoError {
    /// Returns `true` for failures of the underlying medium.
    pub fn is_storage_error(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "candidate not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted candidate data: {message}"),
            Self::Unavailable(reason) => write!(f, "candidate storage unavailable: {reason}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for candidate storage.
pub trait CandidateRepository {
    fn insert(&self, draft: &CandidateDraft) -> RepoResult<CandidateId>;
    fn get_by_id(&self, id: CandidateId) -> RepoResult<Option<CandidateRecord>>;
    fn update(&self, record: &CandidateRecord) -> RepoResult<()>;
    /// Replaces every field of `id` with `draft`.
    ///
    /// The favorite flag becomes `favorite_override` when set and otherwise keeps
    /// its stored value, decided atomically with the write.
    fn update_from_draft(
        &self,
        id: CandidateId,
        draft: &CandidateDraft,
        favorite_override: Option<bool>,
    ) -> RepoResult<CandidateRecord>;
    fn delete_by_id(&self, id: CandidateId) -> RepoResult<()>;
    /// All candidates by ascending id.
    fn list_all(&self) -> RepoResult<Vec<CandidateRecord>>;
    /// Favorite candidates in [`favorite_order`].
    fn list_favorites(&self) -> RepoResult<Vec<CandidateRecord>>;

    fn delete(&self, record: &CandidateRecord) -> RepoResult<()> {
        self.delete_by_id(record.id)
    }
}

impl<R: CandidateRepository + ?Sized> CandidateRepository for Arc<R> {
    fn insert(&self, draft: &CandidateDraft) -> RepoResult<CandidateId> {
        (**self).insert(draft)
    }

    fn get_by_id(&self, id: CandidateId) -> RepoResult<Option<CandidateRecord>> {
        (**self).get_by_id(id)
    }

    fn update(&self, record: &CandidateRecord) -> RepoResult<()> {
        (**self).update(record)
    }

    fn update_from_draft(
        &self,
        id: CandidateId,
        draft: &CandidateDraft,
        favorite_override: Option<bool>,
    ) -> RepoResult<CandidateRecord> {
        (**self).update_from_draft(id, draft, favorite_override)
    }

    fn delete_by_id(&self, id: CandidateId) -> RepoResult<()> {
        (**self).delete_by_id(id)
    }

    fn list_all(&self) -> RepoResult<Vec<CandidateRecord>> {
        (**self).list_all()
    }

    fn list_favorites(&self) -> RepoResult<Vec<CandidateRecord>> {
        (**self).list_favorites()
    }
}

/// SQLite-backed candidate repository over a borrowed, migrated connection.
pub struct SqliteCandidateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCandidateRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Number of stored candidates.
    pub fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM candidates;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }

    fn query_records(&self, sql: &str) -> RepoResult<Vec<CandidateRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_candidate_row(row)?);
        }
        Ok(records)
    }
}

impl CandidateRepository for SqliteCandidateRepository<'_> {
    fn insert(&self, draft: &CandidateDraft) -> RepoResult<CandidateId> {
        self.conn.execute(
            "INSERT INTO candidates (
                first_name,
                last_name,
                phone_number,
                email,
                date_of_birth,
                expected_salary,
                notes,
                profile_photo_ref,
                is_favorite
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                draft.first_name.as_str(),
                draft.last_name.as_str(),
                draft.phone_number.as_str(),
                draft.email.as_str(),
                draft.date_of_birth.as_str(),
                draft.expected_salary,
                draft.notes.as_str(),
                draft.profile_photo_ref.as_deref(),
                bool_to_int(draft.is_favorite),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_by_id(&self, id: CandidateId) -> RepoResult<Option<CandidateRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CANDIDATE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_candidate_row(row)?));
        }

        Ok(None)
    }

    fn update(&self, record: &CandidateRecord) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE candidates
             SET
                first_name = ?1,
                last_name = ?2,
                phone_number = ?3,
                email = ?4,
                date_of_birth = ?5,
                expected_salary = ?6,
                notes = ?7,
                profile_photo_ref = ?8,
                is_favorite = ?9
             WHERE id = ?10;",
            params![
                record.first_name.as_str(),
                record.last_name.as_str(),
                record.phone_number.as_str(),
                record.email.as_str(),
                record.date_of_birth.as_str(),
                record.expected_salary,
                record.notes.as_str(),
                record.profile_photo_ref.as_deref(),
                bool_to_int(record.is_favorite),
                record.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(record.id));
        }

        Ok(())
    }

    fn update_from_draft(
        &self,
        id: CandidateId,
        draft: &CandidateDraft,
        favorite_override: Option<bool>,
    ) -> RepoResult<CandidateRecord> {
        let stored_flag: Option<i64> = self
            .conn
            .query_row(
                "UPDATE candidates
                 SET
                    first_name = ?1,
                    last_name = ?2,
                    phone_number = ?3,
                    email = ?4,
                    date_of_birth = ?5,
                    expected_salary = ?6,
                    notes = ?7,
                    profile_photo_ref = ?8,
                    is_favorite = COALESCE(?9, is_favorite)
                 WHERE id = ?10
                 RETURNING is_favorite;",
                params![
                    draft.first_name.as_str(),
                    draft.last_name.as_str(),
                    draft.phone_number.as_str(),
                    draft.email.as_str(),
                    draft.date_of_birth.as_str(),
                    draft.expected_salary,
                    draft.notes.as_str(),
                    draft.profile_photo_ref.as_deref(),
                    favorite_override.map(bool_to_int),
                    id,
                ],
                |row| row.get(0),
            )
            .optional()?;

        let stored_flag = stored_flag.ok_or(RepoError::NotFound(id))?;
        let mut record = draft.clone().into_record(id);
        record.is_favorite = int_to_bool(stored_flag, id)?;
        Ok(record)
    }

    fn delete_by_id(&self, id: CandidateId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM candidates WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn list_all(&self) -> RepoResult<Vec<CandidateRecord>> {
        self.query_records(&format!("{CANDIDATE_SELECT_SQL} ORDER BY id ASC;"))
    }

    fn list_favorites(&self) -> RepoResult<Vec<CandidateRecord>> {
        // NOCASE only folds ASCII; the final order is settled in Rust.
        let mut favorites = self.query_records(&format!(
            "{CANDIDATE_SELECT_SQL}
             WHERE is_favorite = 1
             ORDER BY last_name COLLATE NOCASE ASC, first_name COLLATE NOCASE ASC, id ASC;"
        ))?;
        favorites.sort_by(favorite_order);
        Ok(favorites)
    }
}

fn parse_candidate_row(row: &Row<'_>) -> RepoResult<CandidateRecord> {
    let id: CandidateId = row.get("id")?;

    let is_favorite = int_to_bool(row.get("is_favorite")?, id)?;

    let expected_salary: f64 = row.get("expected_salary")?;
    if !expected_salary.is_finite() || expected_salary < 0.0 {
        return Err(RepoError::InvalidData(format!(
            "invalid expected_salary `{expected_salary}` for candidate {id}"
        )));
    }

    Ok(CandidateRecord {
        id,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        phone_number: row.get("phone_number")?,
        email: row.get("email")?,
        date_of_birth: row.get("date_of_birth")?,
        expected_salary,
        notes: row.get("notes")?,
        profile_photo_ref: row.get("profile_photo_ref")?,
        is_favorite,
    })
}

fn int_to_bool(value: i64, id: CandidateId) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid is_favorite value `{other}` for candidate {id}"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
