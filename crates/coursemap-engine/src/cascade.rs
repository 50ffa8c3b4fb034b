//! Cascade planner: marking a course passed marks everything it requires

use crate::graph::Graph;
use crate::walk::breadth_first;
use coursemap_domain::{CourseId, Status};
use std::collections::HashMap;

/// Status delta for marking `start` as `Passed`
///
/// The delta contains `start` and every course it transitively requires, all
/// mapped to `Passed`. Prerequisites missing from the graph are included but
/// cannot be expanded further. The planner never touches stored statuses;
/// merge the delta with [`merge_statuses`] or a
/// [`StatusStore`](coursemap_domain::traits::StatusStore).
///
/// # Examples
///
/// ```
/// use coursemap_domain::{CourseId, CourseRecord, Status};
/// use coursemap_engine::{cascade_passed, Graph};
///
/// let graph = Graph::from_records([
///     CourseRecord::new(CourseId::new("COMP2048"), vec![CourseId::new("COMP1100")]),
///     CourseRecord::standalone(CourseId::new("COMP1100")),
/// ]);
/// let delta = cascade_passed(&graph, &CourseId::new("COMP2048"));
/// assert_eq!(delta.len(), 2);
/// assert_eq!(delta[&CourseId::new("COMP1100")], Status::Passed);
/// ```
pub fn cascade_passed(graph: &Graph, start: &CourseId) -> HashMap<CourseId, Status> {
    let delta: HashMap<CourseId, Status> = breadth_first(graph, start)
        .into_iter()
        .map(|id| (id, Status::Passed))
        .collect();

    tracing::debug!("Cascade from {} marks {} course(s) passed", start, delta.len());
    delta
}

/// Overlay `delta` onto `base`, returning the merged map
pub fn merge_statuses(
    base: &HashMap<CourseId, Status>,
    delta: &HashMap<CourseId, Status>,
) -> HashMap<CourseId, Status> {
    let mut merged = base.clone();
    merged.extend(delta.iter().map(|(id, status)| (id.clone(), *status)));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursemap_domain::CourseRecord;

    fn graph(entries: &[(&str, &[&str])]) -> Graph {
        Graph::from_records(entries.iter().map(|(id, prerequisites)| {
            CourseRecord::new(
                CourseId::new(*id),
                prerequisites.iter().map(|p| CourseId::new(*p)).collect(),
            )
        }))
    }

    fn ids(delta: &HashMap<CourseId, Status>) -> Vec<String> {
        let mut ids: Vec<String> = delta.keys().map(|id| id.to_string()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_cascade_marks_all_prerequisites() {
        let g = graph(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &[]), ("D", &[])]);
        let delta = cascade_passed(&g, &CourseId::new("A"));

        assert_eq!(ids(&delta), ["A", "B", "C", "D"]);
        assert!(delta.values().all(|s| *s == Status::Passed));
    }

    #[test]
    fn test_cascade_does_not_touch_dependents() {
        let g = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &[])]);
        let delta = cascade_passed(&g, &CourseId::new("B"));
        assert_eq!(ids(&delta), ["B", "C"]);
    }

    #[test]
    fn test_cascade_is_cycle_safe() {
        let g = graph(&[("A", &["B"]), ("B", &["A"])]);
        let delta = cascade_passed(&g, &CourseId::new("A"));
        assert_eq!(ids(&delta), ["A", "B"]);
    }

    #[test]
    fn test_cascade_includes_dangling_and_unknown_start() {
        let g = graph(&[("A", &["GONE"])]);
        assert_eq!(ids(&cascade_passed(&g, &CourseId::new("A"))), ["A", "GONE"]);
        assert_eq!(ids(&cascade_passed(&g, &CourseId::new("ZZZ"))), ["ZZZ"]);
    }

    #[test]
    fn test_merge_overrides_base() {
        let base: HashMap<CourseId, Status> = [
            (CourseId::new("A"), Status::Failed),
            (CourseId::new("X"), Status::Failed),
        ]
        .into_iter()
        .collect();
        let delta: HashMap<CourseId, Status> =
            [(CourseId::new("A"), Status::Passed)].into_iter().collect();

        let merged = merge_statuses(&base, &delta);
        assert_eq!(merged[&CourseId::new("A")], Status::Passed);
        assert_eq!(merged[&CourseId::new("X")], Status::Failed);
    }
}
