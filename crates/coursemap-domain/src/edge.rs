//! Edge module - prerequisite ordering between two courses

use super::CourseId;

/// A directed prerequisite edge
///
/// `from` must be completed before `to`. Edges exist implicitly in each
/// record's prerequisite list until a reduced edge set is materialized for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    /// The prerequisite course
    pub from: CourseId,

    /// The course that requires it
    pub to: CourseId,
}

impl Edge {
    /// Create a new edge
    pub fn new(from: CourseId, to: CourseId) -> Self {
        Self { from, to }
    }
}
