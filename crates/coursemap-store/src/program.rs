//! Degree programs: named presets of course codes
//!
//! Program files map a program name to its course list, unit total and
//! owning department, as produced by the handbook scraper (`programs2.json`).

use coursemap_domain::CourseId;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// One degree program
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Program name, e.g. "Bachelor of Computer Science"
    pub name: String,

    /// Owning faculty or department
    pub faculty: Option<String>,

    /// Units required to graduate
    pub total_units: f64,

    /// Course codes the program lists, in file order
    pub course_ids: Vec<CourseId>,
}

#[derive(Debug, Deserialize)]
struct ProgramFields {
    #[serde(default)]
    courses: Vec<Value>,
    #[serde(default)]
    total_units: Option<f64>,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    faculty: Option<String>,
}

/// Parse one `name -> fields` entry of a program file
pub fn program_from_raw(name: &str, raw: &Value) -> Result<Program, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("empty program name".to_string());
    }

    let fields = ProgramFields::deserialize(raw).map_err(|e| format!("{}: {}", name, e))?;

    let mut course_ids: Vec<CourseId> = Vec::with_capacity(fields.courses.len());
    for item in &fields.courses {
        match item.as_str().map(CourseId::parse) {
            Some(Ok(id)) => {
                if !course_ids.contains(&id) {
                    course_ids.push(id);
                }
            }
            _ => tracing::warn!("{}: dropping malformed course entry {}", name, item),
        }
    }

    Ok(Program {
        name: name.to_string(),
        faculty: fields
            .faculty
            .or(fields.department)
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty()),
        total_units: fields.total_units.unwrap_or(0.0),
        course_ids,
    })
}

/// Every distinct course code listed by any program
pub fn program_course_ids(programs: &[Program]) -> BTreeSet<CourseId> {
    programs
        .iter()
        .flat_map(|p| p.course_ids.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_program_from_raw() {
        let raw = json!({
            "courses": ["CSSE1001", "MATH1061", 7, "CSSE1001"],
            "total_units": 48,
            "department": "Engineering, Architecture and Information Technology",
        });
        let program = program_from_raw(" Bachelor of Computer Science ", &raw).unwrap();

        assert_eq!(program.name, "Bachelor of Computer Science");
        assert_eq!(program.total_units, 48.0);
        assert_eq!(
            program.faculty.as_deref(),
            Some("Engineering, Architecture and Information Technology")
        );
        assert_eq!(program.course_ids, vec![CourseId::new("CSSE1001"), CourseId::new("MATH1061")]);
    }

    #[test]
    fn test_program_defaults() {
        let program = program_from_raw("Diploma", &json!({})).unwrap();
        assert!(program.course_ids.is_empty());
        assert_eq!(program.total_units, 0.0);
        assert_eq!(program.faculty, None);
    }

    #[test]
    fn test_program_rejects_bad_shape() {
        assert!(program_from_raw("", &json!({})).is_err());
        assert!(program_from_raw("Diploma", &json!(["CSSE1001"])).is_err());
        assert!(program_from_raw("Diploma", &json!({ "courses": "CSSE1001" })).is_err());
    }

    #[test]
    fn test_program_course_ids() {
        let a = program_from_raw("A", &json!({ "courses": ["MATH1061", "CSSE1001"] })).unwrap();
        let b = program_from_raw("B", &json!({ "courses": ["CSSE1001", "INFS1200"] })).unwrap();

        let ids: Vec<String> = program_course_ids(&[a, b]).into_iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["CSSE1001", "INFS1200", "MATH1061"]);
    }
}
