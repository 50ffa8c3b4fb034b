//! Closure command implementation.

use crate::cli::RootsArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use coursemap_domain::CourseId;
use coursemap_engine::{CancellationToken, ClosureBuilder, Graph};
use coursemap_store::SqliteStore;

/// Execute the closure command.
pub async fn execute_closure(
    args: RootsArgs,
    store: &SqliteStore,
    cancel: &CancellationToken,
    formatter: &Formatter,
) -> Result<Graph> {
    let roots = resolve_roots(args, store)?;
    let mut builder = ClosureBuilder::new(store).with_cancellation(cancel.clone());
    let graph = builder.build(roots).await?;

    let stats = builder.stats();
    tracing::info!(
        "Closure of {} course(s) built in {} round(s), {} id(s) requested, {} record(s) returned",
        graph.len(),
        stats.rounds,
        stats.requested,
        stats.returned
    );

    println!("{}", formatter.format_closure(&graph)?);

    Ok(graph)
}

/// Course ids given on the command line plus those of `--program`
pub(crate) fn resolve_roots(args: RootsArgs, store: &SqliteStore) -> Result<Vec<CourseId>> {
    let mut roots = args.ids;

    if let Some(name) = &args.program {
        let program = store
            .get_program(name)?
            .ok_or_else(|| CliError::UnknownProgram(name.clone()))?;
        tracing::info!("Program {:?} lists {} course(s)", program.name, program.course_ids.len());
        roots.extend(program.course_ids);
    }

    Ok(roots)
}
