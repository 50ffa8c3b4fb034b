//! Coursemap Domain Layer
//!
//! This crate contains the core value types for Coursemap's prerequisite
//! planner. It has no runtime dependencies and defines the concepts and
//! trait interfaces that the engine, store and CLI layers depend upon.
//!
//! ## Key Concepts
//!
//! - **CourseId**: Opaque course code such as `COMP3506`
//! - **CourseRecord**: A course and the ids of its direct prerequisites
//! - **Status**: What the student declared (not started / passed / failed)
//! - **EffectiveStatus**: What is displayed once ancestor failures are applied
//! - **Edge**: "prerequisite must be completed before dependent"
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Value types only, no I/O
//! - Trait definitions for the catalog and status storage boundaries

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod course;
pub mod edge;
pub mod status;
pub mod traits;

// Re-exports for convenience
pub use course::{CourseId, CourseRecord};
pub use edge::Edge;
pub use status::{EffectiveStatus, Status};
