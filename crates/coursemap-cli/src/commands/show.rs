//! Show command implementation.

use crate::cli::ShowArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use coursemap_store::SqliteStore;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    let entry = store
        .get_course(&args.id)?
        .ok_or_else(|| CliError::UnknownCourse(args.id.to_string()))?;

    println!("{}", formatter.format_course(&entry)?);

    Ok(())
}
