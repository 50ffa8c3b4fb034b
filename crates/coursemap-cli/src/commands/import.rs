//! Import command implementation.

use crate::cli::ImportArgs;
use crate::error::Result;
use crate::output::Formatter;
use coursemap_store::{ImportReport, SqliteStore};
use std::fs;

/// Execute the import command.
pub fn execute_import(args: ImportArgs, store: &mut SqliteStore, formatter: &Formatter) -> Result<ImportReport> {
    let json_data = fs::read_to_string(&args.file)?;
    let report = if args.programs {
        store.import_programs(&json_data)?
    } else {
        store.import_catalog(&json_data)?
    };

    println!("{}", formatter.format_import(&report)?);

    Ok(report)
}
