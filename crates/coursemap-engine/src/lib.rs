//! Coursemap Engine
//!
//! The prerequisite-graph engine behind the course roadmap.
//!
//! # Overview
//!
//! - **Closure**: expand root courses into every course they transitively
//!   require, one repository round per newly discovered layer
//! - **Status**: compute effective statuses, propagating failures to every
//!   dependent as `Blocked`
//! - **Cascade**: marking a course passed marks all of its prerequisites passed
//! - **Reduce**: drop edges implied by longer paths so the diagram stays legible
//! - **Sort**: canonical `PREFIX + DIGITS` ordering for reproducible output
//!
//! Only the closure builder touches the repository. Everything else is a pure
//! function over an immutable [`Graph`].
//!
//! # Usage
//!
//! ```no_run
//! use coursemap_domain::{CourseId, Status};
//! use coursemap_domain::traits::CourseRepository;
//! use coursemap_engine::{CancellationToken, Roadmap};
//! use std::collections::HashMap;
//!
//! # async fn demo<R: CourseRepository>(repo: &R) -> Result<(), coursemap_engine::ClosureError<R::Error>> {
//! let cancel = CancellationToken::new();
//! let roadmap = Roadmap::build(repo, [CourseId::new("COMP3506")], &cancel).await?;
//!
//! let mut statuses: HashMap<CourseId, Status> = HashMap::new();
//! statuses.extend(roadmap.mark_passed(&CourseId::new("CSSE2002")));
//!
//! let view = roadmap.view(&statuses);
//! for node in &view.nodes {
//!     println!("{} {}", node.id, node.status);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cancel;
mod error;

pub mod cascade;
pub mod closure;
pub mod graph;
pub mod reduce;
pub mod roadmap;
pub mod sort;
pub mod status;
pub mod walk;

pub use cancel::CancellationToken;
pub use cascade::{cascade_passed, merge_statuses};
pub use closure::{build_closure, ClosureBuilder, ClosureStats};
pub use error::ClosureError;
pub use graph::Graph;
pub use reduce::reduce;
pub use roadmap::{NodeView, Roadmap, RoadmapView};
pub use sort::{canonical_cmp, sorted};
pub use status::resolve_effective_statuses;
pub use walk::CycleEdge;
