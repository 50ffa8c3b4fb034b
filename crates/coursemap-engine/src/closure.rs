//! Closure builder: expands root courses into every transitively required course

use crate::cancel::CancellationToken;
use crate::error::ClosureError;
use crate::graph::Graph;
use crate::walk::Prerequisites;
use coursemap_domain::traits::CourseRepository;
use coursemap_domain::CourseId;
use std::collections::{BTreeSet, HashSet};

/// Counters collected during one closure build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureStats {
    /// Number of repository calls made
    pub rounds: usize,

    /// Distinct ids requested from the repository
    pub requested: usize,

    /// Records the repository returned (including ones already known)
    pub returned: usize,
}

/// Breadth-first closure builder over a course repository
///
/// Each round takes the whole pending queue as one batch and awaits the
/// repository before deciding what to enqueue next, so there is never more
/// than one fetch outstanding. Every distinct id is requested at most once.
///
/// # Examples
///
/// ```no_run
/// # async fn demo<R: coursemap_domain::traits::CourseRepository>(repo: &R)
/// # -> Result<(), coursemap_engine::ClosureError<R::Error>> {
/// use coursemap_domain::CourseId;
/// use coursemap_engine::ClosureBuilder;
///
/// let mut builder = ClosureBuilder::new(repo);
/// let graph = builder.build([CourseId::new("COMP3506")]).await?;
/// println!("{} courses in {} rounds", graph.len(), builder.stats().rounds);
/// # Ok(())
/// # }
/// ```
pub struct ClosureBuilder<'r, R> {
    repo: &'r R,
    cancel: CancellationToken,
    stats: ClosureStats,
}

impl<'r, R> ClosureBuilder<'r, R>
where
    R: CourseRepository,
{
    /// Create a builder over the given repository
    pub fn new(repo: &'r R) -> Self {
        Self {
            repo,
            cancel: CancellationToken::new(),
            stats: ClosureStats::default(),
        }
    }

    /// Use `cancel` to abort the build between rounds
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Counters from the most recent build
    pub fn stats(&self) -> &ClosureStats {
        &self.stats
    }

    /// Expand `root_ids` into the full prerequisite closure
    ///
    /// Stops when the queue is empty or a round returns no records. A failed
    /// fetch aborts the build and nothing collected so far is returned.
    pub async fn build<I>(&mut self, root_ids: I) -> Result<Graph, ClosureError<R::Error>>
    where
        I: IntoIterator<Item = CourseId>,
    {
        self.stats = ClosureStats::default();

        let mut graph = Graph::new();
        let mut requested: HashSet<CourseId> = HashSet::new();
        let mut queue: BTreeSet<CourseId> = root_ids.into_iter().collect();

        while !queue.is_empty() {
            if self.cancel.is_cancelled() {
                tracing::info!("Closure build cancelled after {} rounds", self.stats.rounds);
                return Err(ClosureError::Cancelled);
            }

            let batch = std::mem::take(&mut queue);
            self.stats.rounds += 1;
            self.stats.requested += batch.len();
            requested.extend(batch.iter().cloned());

            tracing::debug!(
                "Closure round {}: fetching {} course(s)",
                self.stats.rounds,
                batch.len()
            );

            let records = self
                .repo
                .fetch(&batch)
                .await
                .map_err(ClosureError::Fetch)?;
            self.stats.returned += records.len();

            if records.is_empty() {
                break;
            }

            for record in records {
                let id = record.id.clone();
                if !graph.insert(record) {
                    continue;
                }
                for prerequisite in graph.prerequisites_of(&id) {
                    if !graph.contains(prerequisite) && !requested.contains(prerequisite) {
                        queue.insert(prerequisite.clone());
                    }
                }
            }
        }

        tracing::info!(
            "Closure complete: {} course(s) in {} round(s)",
            graph.len(),
            self.stats.rounds
        );

        Ok(graph)
    }
}

/// Expand `root_ids` into the full prerequisite closure
///
/// Convenience wrapper around [`ClosureBuilder`].
pub async fn build_closure<R, I>(
    repo: &R,
    root_ids: I,
    cancel: &CancellationToken,
) -> Result<Graph, ClosureError<R::Error>>
where
    R: CourseRepository,
    I: IntoIterator<Item = CourseId>,
{
    ClosureBuilder::new(repo)
        .with_cancellation(cancel.clone())
        .build(root_ids)
        .await
}
