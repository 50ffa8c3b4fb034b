//! Missing-course check implementation.

use crate::cli::MissingArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use coursemap_domain::CourseId;
use coursemap_engine::sorted;
use coursemap_store::{program_course_ids, program_from_raw, SqliteStore};
use serde_json::Value;
use std::fs;

/// Execute the missing command.
///
/// Reads the expected course codes, either a JSON array of codes or a
/// program file, and reports in canonical order those the catalog does not
/// contain.
pub fn execute_missing(args: MissingArgs, store: &SqliteStore, formatter: &Formatter) -> Result<Vec<CourseId>> {
    let json_data = fs::read_to_string(&args.file)?;
    let expected = expected_codes(&serde_json::from_str(&json_data)?)?;

    let mut missing = sorted(store.missing_courses(&expected)?);
    missing.dedup();

    if let Some(output) = &args.output {
        let names: Vec<&str> = missing.iter().map(CourseId::as_str).collect();
        fs::write(output, serde_json::to_string_pretty(&names)?)?;
        tracing::info!("Saved {} missing code(s) to {}", missing.len(), output.display());
    }

    println!("{}", formatter.format_missing(expected.len(), &missing)?);

    Ok(missing)
}

fn expected_codes(data: &Value) -> Result<Vec<CourseId>> {
    match data {
        Value::Array(codes) => codes
            .iter()
            .map(|code| {
                code.as_str()
                    .ok_or_else(|| CliError::InvalidInput(format!("expected a course code, found {}", code)))
                    .and_then(|code| CourseId::parse(code).map_err(CliError::InvalidInput))
            })
            .collect(),
        Value::Object(entries) => {
            let programs: Vec<_> = entries
                .iter()
                .filter_map(|(name, raw)| match program_from_raw(name, raw) {
                    Ok(program) => Some(program),
                    Err(e) => {
                        tracing::warn!("Skipping program {:?}: {}", name, e);
                        None
                    }
                })
                .collect();
            Ok(program_course_ids(&programs).into_iter().collect())
        }
        _ => Err(CliError::InvalidInput(
            "expected a JSON array of course codes or a program file".to_string(),
        )),
    }
}
