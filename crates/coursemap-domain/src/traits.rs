//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the planning engine and the
//! catalog/status infrastructure. Implementations live in other crates.

use crate::{CourseId, CourseRecord, Status};
use std::collections::{BTreeSet, HashMap};

/// Trait for looking up course records by id
///
/// Implemented by the infrastructure layer (coursemap-store)
#[allow(async_fn_in_trait)]
pub trait CourseRepository {
    /// Error type for transport or storage failures
    type Error;

    /// Fetch the records for the given ids
    ///
    /// Unknown ids are simply absent from the result; only transport or
    /// storage faults are errors.
    async fn fetch(&self, ids: &BTreeSet<CourseId>) -> Result<Vec<CourseRecord>, Self::Error>;
}

/// Trait for persisting the student's declared statuses
///
/// Implemented by the infrastructure layer (coursemap-store)
pub trait StatusStore {
    /// Error type for store operations
    type Error;

    /// Load every declared status
    fn load_statuses(&self) -> Result<HashMap<CourseId, Status>, Self::Error>;

    /// Merge a status delta into the stored map
    fn save_statuses(&mut self, delta: &HashMap<CourseId, Status>) -> Result<(), Self::Error>;

    /// Remove a declared status, returning whether one existed
    fn clear_status(&mut self, id: &CourseId) -> Result<bool, Self::Error>;
}
