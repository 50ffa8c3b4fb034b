//! Command implementations.

pub mod browse;
pub mod closure;
pub mod config;
pub mod import;
pub mod missing;
pub mod pass;
pub mod programs;
pub mod roadmap;
pub mod show;
pub mod status;

pub use self::browse::{execute_list, execute_search};
pub use self::closure::execute_closure;
pub use self::config::execute_config;
pub use self::import::execute_import;
pub use self::missing::execute_missing;
pub use self::pass::execute_pass;
pub use self::programs::execute_programs;
pub use self::roadmap::execute_roadmap;
pub use self::show::execute_show;
pub use self::status::execute_status;
