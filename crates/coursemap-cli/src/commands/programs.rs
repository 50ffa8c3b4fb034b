//! Programs command implementation.

use crate::cli::ProgramsArgs;
use crate::error::Result;
use crate::output::Formatter;
use coursemap_store::{Program, SqliteStore};

/// Execute the programs command.
pub fn execute_programs(args: ProgramsArgs, store: &SqliteStore, formatter: &Formatter) -> Result<Vec<Program>> {
    let programs = store.list_programs(args.faculty.as_deref())?;

    println!("{}", formatter.format_programs(&programs)?);

    Ok(programs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_programs_by_faculty() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        store
            .import_programs(
                r#"{
                    "Bachelor of Science": {"courses": ["MATH1051"], "total_units": 48, "department": "Science"},
                    "Bachelor of Computer Science": {"courses": ["CSSE1001"], "total_units": 48, "department": "EAIT"},
                    "Bachelor of Mathematics": {"courses": ["MATH1051", "MATH1061"], "department": "Science"}
                }"#,
            )
            .unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let all = execute_programs(ProgramsArgs { faculty: None }, &store, &formatter).unwrap();
        assert_eq!(all.len(), 3);

        let science = execute_programs(ProgramsArgs { faculty: Some("Science".to_string()) }, &store, &formatter).unwrap();
        let names: Vec<&str> = science.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bachelor of Mathematics", "Bachelor of Science"]);
    }
}
