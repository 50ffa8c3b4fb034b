//! Pass command implementation.

use crate::cli::PassArgs;
use crate::error::Result;
use crate::output::Formatter;
use coursemap_domain::traits::StatusStore;
use coursemap_domain::{CourseId, Status};
use coursemap_engine::{CancellationToken, Roadmap};
use coursemap_store::SqliteStore;
use std::collections::HashMap;

/// Execute the pass command.
///
/// Marks the course and every prerequisite below it as passed. Returns the
/// status delta that was (or, with `--dry-run`, would have been) saved.
pub async fn execute_pass(
    args: PassArgs,
    store: &mut SqliteStore,
    cancel: &CancellationToken,
    formatter: &Formatter,
) -> Result<HashMap<CourseId, Status>> {
    let roadmap = Roadmap::build(&*store, [args.id.clone()], cancel).await?;
    if !roadmap.missing_roots().is_empty() {
        tracing::warn!("{} is not in the catalog; marking it alone", args.id);
    }

    let delta = roadmap.mark_passed(&args.id);

    if !args.dry_run {
        store.save_statuses(&delta)?;
    }

    if formatter.is_table() {
        let verb = if args.dry_run { "Would mark" } else { "Marked" };
        println!("{}", formatter.success(&format!("{} {} course(s) as passed", verb, delta.len())));
    }
    println!("{}", formatter.format_statuses(&delta)?);

    Ok(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn seeded_store() -> SqliteStore {
        let mut store = SqliteStore::new(":memory:").unwrap();
        store
            .import_catalog(
                r#"[
                    {"code": "A1000", "prerequisites_list": ["B1000", "C1000"]},
                    {"code": "B1000", "prerequisites_list": ["D1000"]},
                    {"code": "C1000"},
                    {"code": "D1000"}
                ]"#,
            )
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_pass_cascades_and_saves() {
        let mut store = seeded_store();
        store
            .save_statuses(&HashMap::from([(CourseId::new("D1000"), Status::Failed)]))
            .unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let args = PassArgs { id: CourseId::new("A1000"), dry_run: false };
        let delta = execute_pass(args, &mut store, &CancellationToken::new(), &formatter)
            .await
            .unwrap();

        assert_eq!(delta.len(), 4);
        let saved = store.load_statuses().unwrap();
        assert_eq!(saved.len(), 4);
        assert!(saved.values().all(|s| *s == Status::Passed));
    }

    #[tokio::test]
    async fn test_pass_dry_run_saves_nothing() {
        let mut store = seeded_store();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let args = PassArgs { id: CourseId::new("B1000"), dry_run: true };
        let delta = execute_pass(args, &mut store, &CancellationToken::new(), &formatter)
            .await
            .unwrap();

        assert_eq!(delta.len(), 2);
        assert!(store.load_statuses().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pass_unknown_course() {
        let mut store = seeded_store();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let args = PassArgs { id: CourseId::new("ZZZZ9999"), dry_run: false };
        let delta = execute_pass(args, &mut store, &CancellationToken::new(), &formatter)
            .await
            .unwrap();

        assert_eq!(delta, HashMap::from([(CourseId::new("ZZZZ9999"), Status::Passed)]));
    }
}
