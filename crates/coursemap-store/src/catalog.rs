//! Conversion from the scraper's loosely typed course JSON to domain records
//!
//! Catalog rows are validated here, at the repository boundary. Malformed
//! prerequisite entries are dropped with a warning rather than passed on to
//! the graph.

use coursemap_domain::{CourseId, CourseRecord};
use serde::Deserialize;
use serde_json::Value;

/// Display-side view of one imported course
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Id and direct prerequisites
    pub record: CourseRecord,

    /// Course title
    pub title: String,

    /// Study level, e.g. "Undergraduate"
    pub level: Option<String>,

    /// Unit value
    pub units: Option<f64>,

    /// Course description
    pub description: Option<String>,

    /// Prerequisite rule as written in the handbook
    pub prerequisites_text: Option<String>,

    /// Courses that cannot be taken together with this one
    pub incompatible_ids: Vec<CourseId>,
}

/// Fields every catalog object must carry to be imported
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogHeader {
    pub code: String,
    #[serde(default)]
    pub title: String,
}

/// Build a course record from a stored `raw_data` object
pub fn record_from_raw(id: CourseId, raw: &Value) -> CourseRecord {
    let prerequisite_ids = id_list(&id, raw, "prerequisites_list");
    CourseRecord::new(id, prerequisite_ids)
}

/// Build a catalog entry from a stored row
pub fn entry_from_raw(id: CourseId, title: String, raw: &Value) -> CatalogEntry {
    let incompatible_ids = id_list(&id, raw, "incompatible_list");

    CatalogEntry {
        title,
        level: text_field(raw, "level"),
        units: raw.get("units").and_then(Value::as_f64),
        description: text_field(raw, "description"),
        prerequisites_text: text_field(raw, "prerequisites_text"),
        incompatible_ids,
        record: record_from_raw(id, raw),
    }
}

fn text_field(raw: &Value, field: &str) -> Option<String> {
    raw.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Read a list of course ids, dropping malformed entries
fn id_list(course: &CourseId, raw: &Value, field: &str) -> Vec<CourseId> {
    let items = match raw.get(field) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            tracing::warn!("{}: {} is not a list ({}), treating as empty", course, field, other);
            return Vec::new();
        }
    };

    let mut ids: Vec<CourseId> = Vec::with_capacity(items.len());
    for item in items {
        let parsed = item.as_str().map(CourseId::parse);
        match parsed {
            Some(Ok(id)) => {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
            _ => tracing::warn!("{}: dropping malformed {} entry {}", course, field, item),
        }
    }
    ids
}
