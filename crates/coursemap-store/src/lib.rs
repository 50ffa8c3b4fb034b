//! Coursemap Storage Layer
//!
//! Implements the CourseRepository and StatusStore traits on SQLite.
//!
//! # Architecture
//!
//! - `courses(id, title, raw_data)` mirrors the hosted catalog table: the
//!   scraper's JSON object is stored verbatim and converted to strict domain
//!   records on read
//! - `course_status` persists the student's declared statuses
//! - Catalog files in the scraper's `master_courses.json` format are imported
//!   with [`SqliteStore::import_catalog`]
//! - `programs` holds degree programs (`programs2.json`), each a named list
//!   of course codes usable as roadmap roots
//!
//! # Examples
//!
//! ```no_run
//! use coursemap_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for catalog operations
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod program;

pub use catalog::CatalogEntry;
pub use program::{program_course_ids, program_from_raw, Program};

use catalog::{entry_from_raw, record_from_raw, CatalogHeader};
use coursemap_domain::traits::{CourseRepository, StatusStore};
use coursemap_domain::{CourseId, CourseRecord, Status};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// SQLite's historical bound on host parameters per statement
const MAX_PARAMS_PER_QUERY: usize = 900;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Catalog JSON could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Outcome of a catalog import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Courses inserted or updated
    pub imported: usize,

    /// Entries rejected, with the reason for each
    pub skipped: Vec<String>,
}

/// One row of a catalog listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSummary {
    /// Course id
    pub id: CourseId,

    /// Course title
    pub title: String,
}

/// One page of a catalog listing or search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursePage {
    /// Courses on this page, ordered by id
    pub courses: Vec<CourseSummary>,

    /// Matching courses across all pages
    pub total: usize,

    /// 1-based page number
    pub page: usize,

    /// Courses per page
    pub page_size: usize,
}

impl CoursePage {
    /// Number of pages needed for `total` matches
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size.max(1))
    }
}

/// SQLite-based course catalog and status store
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Import a JSON array of scraped course objects
    ///
    /// Existing courses are replaced. Entries without a usable `code` are
    /// skipped and reported; the rest are written in a single transaction.
    pub fn import_catalog(&mut self, json: &str) -> Result<ImportReport, StoreError> {
        let entries: Vec<serde_json::Value> = serde_json::from_str(json)?;
        self.import_entries(&entries)
    }

    /// Import already parsed course objects
    pub fn import_entries(&mut self, entries: &[serde_json::Value]) -> Result<ImportReport, StoreError> {
        let mut report = ImportReport::default();
        let tx = self.conn.transaction()?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO courses (id, title, raw_data) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET title = excluded.title, raw_data = excluded.raw_data",
            )?;

            for (index, entry) in entries.iter().enumerate() {
                let header = match CatalogHeader::deserialize(entry) {
                    Ok(header) => header,
                    Err(e) => {
                        tracing::warn!("Skipping catalog entry {}: {}", index, e);
                        report.skipped.push(format!("entry {}: {}", index, e));
                        continue;
                    }
                };
                let id = match CourseId::parse(&header.code) {
                    Ok(id) => id,
                    Err(e) => {
                        tracing::warn!("Skipping catalog entry {}: {}", index, e);
                        report.skipped.push(format!("entry {}: {}", index, e));
                        continue;
                    }
                };

                stmt.execute(params![id.as_str(), header.title.trim(), entry.to_string()])?;
                report.imported += 1;
            }
        }

        tx.commit()?;
        tracing::info!(
            "Imported {} course(s), skipped {}",
            report.imported,
            report.skipped.len()
        );
        Ok(report)
    }

    /// Import a program file: a JSON object mapping program name to
    /// `{ courses, total_units, department }`
    ///
    /// Existing programs with the same name are replaced.
    pub fn import_programs(&mut self, json: &str) -> Result<ImportReport, StoreError> {
        let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut report = ImportReport::default();
        let tx = self.conn.transaction()?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO programs (name, faculty, total_units, courses) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(name) DO UPDATE SET faculty = excluded.faculty,
                     total_units = excluded.total_units, courses = excluded.courses",
            )?;

            for (name, raw) in &entries {
                let program = match program_from_raw(name, raw) {
                    Ok(program) => program,
                    Err(e) => {
                        tracing::warn!("Skipping program {:?}: {}", name, e);
                        report.skipped.push(format!("program {:?}: {}", name, e));
                        continue;
                    }
                };
                let courses: Vec<&str> = program.course_ids.iter().map(CourseId::as_str).collect();

                stmt.execute(params![
                    program.name,
                    program.faculty,
                    program.total_units,
                    serde_json::to_string(&courses)?
                ])?;
                report.imported += 1;
            }
        }

        tx.commit()?;
        tracing::info!(
            "Imported {} program(s), skipped {}",
            report.imported,
            report.skipped.len()
        );
        Ok(report)
    }

    /// Programs ordered by name, optionally restricted to one faculty
    pub fn list_programs(&self, faculty: Option<&str>) -> Result<Vec<Program>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, faculty, total_units, courses FROM programs
             WHERE ?1 IS NULL OR faculty = ?1
             ORDER BY name",
        )?;
        let rows = stmt
            .query_map(params![faculty], program_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows.into_iter().map(program_from_row).collect())
    }

    /// Look up one program by exact name
    pub fn get_program(&self, name: &str) -> Result<Option<Program>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT name, faculty, total_units, courses FROM programs WHERE name = ?1",
                params![name.trim()],
                program_row,
            )
            .optional()?;

        Ok(row.map(program_from_row))
    }

    /// Page through the catalog ordered by id, optionally filtered by a
    /// case-insensitive substring of the id or title
    pub fn search_courses(
        &self,
        query: Option<&str>,
        page: usize,
        page_size: usize,
    ) -> Result<CoursePage, StoreError> {
        if page == 0 || page_size == 0 {
            return Err(StoreError::InvalidData(format!(
                "page {} with size {}: both must be at least 1",
                page, page_size
            )));
        }

        let pattern = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", escape_like(q)));
        let filter = "?1 IS NULL OR id LIKE ?1 ESCAPE '\\' OR title LIKE ?1 ESCAPE '\\'";

        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM courses WHERE {}", filter),
            params![pattern],
            |row| row.get(0),
        )?;

        let offset = (page - 1) * page_size;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, title FROM courses WHERE {} ORDER BY id LIMIT ?2 OFFSET ?3",
            filter
        ))?;
        let rows = stmt
            .query_map(params![pattern, page_size as i64, offset as i64], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let courses = rows
            .into_iter()
            .filter_map(|(id, title)| match CourseId::parse(&id) {
                Ok(id) => Some(CourseSummary { id, title }),
                Err(e) => {
                    tracing::warn!("Skipping course row {:?}: {}", id, e);
                    None
                }
            })
            .collect();

        Ok(CoursePage {
            courses,
            total: total as usize,
            page,
            page_size,
        })
    }

    /// Get one course with its display fields
    pub fn get_course(&self, id: &CourseId) -> Result<Option<CatalogEntry>, StoreError> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT title, raw_data FROM courses WHERE id = ?1",
                params![id.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((title, raw_data)) = row else {
            return Ok(None);
        };
        let raw: serde_json::Value = serde_json::from_str(&raw_data)
            .map_err(|e| StoreError::InvalidData(format!("raw_data for {}: {}", id, e)))?;

        Ok(Some(entry_from_raw(id.clone(), title, &raw)))
    }

    /// Number of courses in the catalog
    pub fn course_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM courses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Expected course codes that are not in the catalog, in input order
    pub fn missing_courses(&self, expected: &[CourseId]) -> Result<Vec<CourseId>, StoreError> {
        let wanted: BTreeSet<CourseId> = expected.iter().cloned().collect();
        let present: BTreeSet<CourseId> = self
            .lookup_rows(&wanted)?
            .into_iter()
            .map(|(id, _)| id)
            .collect();

        let mut missing: Vec<CourseId> = Vec::new();
        for id in expected {
            if !present.contains(id) && !missing.contains(id) {
                missing.push(id.clone());
            }
        }
        Ok(missing)
    }

    /// Load the records for `ids`, skipping rows that fail validation
    pub fn fetch_records(&self, ids: &BTreeSet<CourseId>) -> Result<Vec<CourseRecord>, StoreError> {
        let records = self
            .lookup_rows(ids)?
            .into_iter()
            .filter_map(|(id, raw_data)| match serde_json::from_str::<serde_json::Value>(&raw_data) {
                Ok(raw) => Some(record_from_raw(id, &raw)),
                Err(e) => {
                    tracing::warn!("Skipping course {}: malformed raw_data ({})", id, e);
                    None
                }
            })
            .collect();
        Ok(records)
    }

    /// `(id, raw_data)` rows for the requested ids
    fn lookup_rows(&self, ids: &BTreeSet<CourseId>) -> Result<Vec<(CourseId, String)>, StoreError> {
        let ids: Vec<&str> = ids.iter().map(CourseId::as_str).collect();
        let mut rows = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(MAX_PARAMS_PER_QUERY) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!("SELECT id, raw_data FROM courses WHERE id IN ({})", placeholders);

            let mut stmt = self.conn.prepare(&sql)?;
            let found = stmt
                .query_map(params_from_iter(chunk.iter()), |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;

            for (id, raw_data) in found {
                match CourseId::parse(&id) {
                    Ok(id) => rows.push((id, raw_data)),
                    Err(e) => tracing::warn!("Skipping course row {:?}: {}", id, e),
                }
            }
        }

        Ok(rows)
    }
}

impl CourseRepository for SqliteStore {
    type Error = StoreError;

    async fn fetch(&self, ids: &BTreeSet<CourseId>) -> Result<Vec<CourseRecord>, StoreError> {
        self.fetch_records(ids)
    }
}

impl StatusStore for SqliteStore {
    type Error = StoreError;

    fn load_statuses(&self) -> Result<HashMap<CourseId, Status>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT course_id, status FROM course_status")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut statuses = HashMap::with_capacity(rows.len());
        for (id, status) in rows {
            match (CourseId::parse(&id), Status::parse(&status)) {
                (Ok(id), Some(status)) => {
                    statuses.insert(id, status);
                }
                _ => tracing::warn!("Ignoring stored status {:?} for {:?}", status, id),
            }
        }
        Ok(statuses)
    }

    fn save_statuses(&mut self, delta: &HashMap<CourseId, Status>) -> Result<(), StoreError> {
        let now = current_timestamp() as i64;
        let tx = self.conn.transaction()?;

        {
            let mut upsert = tx.prepare(
                "INSERT INTO course_status (course_id, status, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(course_id) DO UPDATE SET status = excluded.status, updated_at = excluded.updated_at",
            )?;
            let mut delete = tx.prepare("DELETE FROM course_status WHERE course_id = ?1")?;

            for (id, status) in delta {
                match status {
                    Status::NotStarted => {
                        delete.execute(params![id.as_str()])?;
                    }
                    Status::Passed | Status::Failed => {
                        upsert.execute(params![id.as_str(), status.as_str(), now])?;
                    }
                }
            }
        }

        tx.commit()?;
        tracing::debug!("Saved {} status change(s)", delta.len());
        Ok(())
    }

    fn clear_status(&mut self, id: &CourseId) -> Result<bool, StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM course_status WHERE course_id = ?1", params![id.as_str()])?;
        Ok(changed > 0)
    }
}

type ProgramRow = (String, Option<String>, f64, String);

fn program_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProgramRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn program_from_row((name, faculty, total_units, courses): ProgramRow) -> Program {
    let codes: Vec<String> = serde_json::from_str(&courses).unwrap_or_else(|e| {
        tracing::warn!("Program {:?}: malformed course list ({})", name, e);
        Vec::new()
    });
    let course_ids = codes
        .iter()
        .filter_map(|code| CourseId::parse(code).ok())
        .collect();

    Program {
        name,
        faculty,
        total_units,
        course_ids,
    }
}

/// Escape `%`, `_` and the escape character for a LIKE pattern
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Current timestamp in seconds since Unix epoch
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
