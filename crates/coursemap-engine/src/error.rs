//! Error types for engine operations

use thiserror::Error;

/// Errors that can abort a closure build
///
/// Every other engine operation is total over its inputs.
#[derive(Error, Debug)]
pub enum ClosureError<E> {
    /// The course repository could not answer a batch
    #[error("Course fetch failed: {0}")]
    Fetch(E),

    /// The build was cancelled before it completed
    #[error("Closure build cancelled")]
    Cancelled,
}
