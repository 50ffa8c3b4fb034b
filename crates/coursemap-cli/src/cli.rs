//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use coursemap_domain::{CourseId, Status};
use std::path::PathBuf;

/// Coursemap CLI - Explore course prerequisite roadmaps.
#[derive(Debug, Parser)]
#[command(name = "coursemap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog database path
    #[arg(short, long, global = true, env = "COURSEMAP_DATABASE")]
    pub database: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import a scraped catalog (master_courses.json) or program file
    Import(ImportArgs),

    /// Show one course
    Show(ShowArgs),

    /// Search the catalog by code or title
    Search(SearchArgs),

    /// List the catalog a page at a time
    List(PageArgs),

    /// List degree programs
    Programs(ProgramsArgs),

    /// List the prerequisite closure of one or more courses
    Closure(RootsArgs),

    /// Show the roadmap with effective statuses
    Roadmap(RootsArgs),

    /// Mark a course and all of its prerequisites as passed
    Pass(PassArgs),

    /// Manage declared course statuses
    Status(StatusArgs),

    /// Report expected course codes that are not in the catalog
    Missing(MissingArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// JSON file containing an array of course objects
    pub file: PathBuf,

    /// The file is a program file (programs2.json) instead of a catalog
    #[arg(long)]
    pub programs: bool,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Course code
    #[arg(value_parser = parse_course_id)]
    pub id: CourseId,
}

/// Root courses for closure and roadmap.
#[derive(Debug, Parser)]
pub struct RootsArgs {
    /// Course codes to expand
    #[arg(required_unless_present = "program", value_parser = parse_course_id)]
    pub ids: Vec<CourseId>,

    /// Also expand every course listed by this program
    #[arg(short, long)]
    pub program: Option<String>,
}

/// Paging options for catalog listings.
#[derive(Debug, Clone, Copy, Parser)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Courses per page
    #[arg(long, default_value = "12", value_parser = clap::value_parser!(u32).range(1..=500))]
    pub page_size: u32,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Text to look for in course codes and titles
    pub text: String,

    #[command(flatten)]
    pub paging: PageArgs,
}

/// Arguments for the programs command.
#[derive(Debug, Parser)]
pub struct ProgramsArgs {
    /// Only list programs of this faculty
    #[arg(long)]
    pub faculty: Option<String>,
}

/// Arguments for the pass command.
#[derive(Debug, Parser)]
pub struct PassArgs {
    /// Course code
    #[arg(value_parser = parse_course_id)]
    pub id: CourseId,

    /// Print the changes without saving them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for status management.
#[derive(Debug, Parser)]
pub struct StatusArgs {
    #[command(subcommand)]
    pub action: StatusAction,
}

/// Status management actions.
#[derive(Debug, Subcommand)]
pub enum StatusAction {
    /// List declared statuses
    List,

    /// Declare the status of one course
    Set {
        /// Course code
        #[arg(value_parser = parse_course_id)]
        id: CourseId,
        /// not_started, passed or failed
        status: Status,
    },

    /// Forget the declared status of one course
    Clear {
        /// Course code
        #[arg(value_parser = parse_course_id)]
        id: CourseId,
    },
}

/// Arguments for the missing command.
#[derive(Debug, Parser)]
pub struct MissingArgs {
    /// JSON array of expected course codes, or a program file whose
    /// listed courses are the expected codes
    pub file: PathBuf,

    /// Write the missing codes to this file as a JSON array
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for config management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the configuration in effect
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_course_id(s: &str) -> Result<CourseId, String> {
    CourseId::parse(s)
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
