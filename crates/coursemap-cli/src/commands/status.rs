//! Status management command implementation.

use crate::cli::{StatusAction, StatusArgs};
use crate::error::Result;
use crate::output::Formatter;
use coursemap_domain::traits::StatusStore;
use coursemap_store::SqliteStore;
use std::collections::HashMap;

/// Execute the status command.
pub fn execute_status(args: StatusArgs, store: &mut SqliteStore, formatter: &Formatter) -> Result<()> {
    match args.action {
        StatusAction::List => {
            let statuses = store.load_statuses()?;
            println!("{}", formatter.format_statuses(&statuses)?);
        }

        StatusAction::Set { id, status } => {
            store.save_statuses(&HashMap::from([(id.clone(), status)]))?;
            println!("{}", formatter.success(&format!("{} set to {}", id, status)));
        }

        StatusAction::Clear { id } => {
            if store.clear_status(&id)? {
                println!("{}", formatter.success(&format!("Cleared status of {}", id)));
            } else {
                println!("{}", formatter.info(&format!("{} had no recorded status", id)));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use coursemap_domain::{CourseId, Status};

    #[test]
    fn test_set_and_clear() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let id = CourseId::new("MATH1061");

        let set = StatusArgs {
            action: StatusAction::Set { id: id.clone(), status: Status::Failed },
        };
        execute_status(set, &mut store, &formatter).unwrap();
        assert_eq!(store.load_statuses().unwrap().get(&id), Some(&Status::Failed));

        let clear = StatusArgs { action: StatusAction::Clear { id: id.clone() } };
        execute_status(clear, &mut store, &formatter).unwrap();
        assert!(store.load_statuses().unwrap().is_empty());
    }

    #[test]
    fn test_set_not_started_removes() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let id = CourseId::new("MATH1061");

        for status in [Status::Passed, Status::NotStarted] {
            let args = StatusArgs {
                action: StatusAction::Set { id: id.clone(), status },
            };
            execute_status(args, &mut store, &formatter).unwrap();
        }
        assert!(store.load_statuses().unwrap().is_empty());
    }
}
