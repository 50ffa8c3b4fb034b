//! Roadmap command implementation.

use crate::cli::RootsArgs;
use crate::commands::closure::resolve_roots;
use crate::error::Result;
use crate::output::Formatter;
use coursemap_domain::traits::StatusStore;
use coursemap_engine::{CancellationToken, Roadmap, RoadmapView};
use coursemap_store::SqliteStore;

/// Execute the roadmap command.
pub async fn execute_roadmap(
    args: RootsArgs,
    store: &SqliteStore,
    cancel: &CancellationToken,
    formatter: &Formatter,
) -> Result<RoadmapView> {
    let roots = resolve_roots(args, store)?;
    let roadmap = Roadmap::build(store, roots, cancel).await?;

    let missing = roadmap.missing_roots();
    if !missing.is_empty() && formatter.is_table() {
        let names: Vec<&str> = missing.iter().map(|id| id.as_str()).collect();
        eprintln!("{}", formatter.warning(&format!("Not in catalog: {}", names.join(", "))));
    }

    let user_status = store.load_statuses()?;
    let view = roadmap.view(&user_status);

    println!("{}", formatter.format_roadmap(&view)?);

    Ok(view)
}
