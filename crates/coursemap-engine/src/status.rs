//! Status resolver: effective status with blocked propagation
//!
//! A course is `Blocked` whenever any direct prerequisite resolves to
//! `Failed` or `Blocked`. This overrides the student's own mark, including an
//! explicit `Passed`, so a later failure upstream invalidates a downstream
//! pass immediately. The override is preserved as-is pending product
//! confirmation.

use crate::graph::Graph;
use crate::walk::Prerequisites;
use coursemap_domain::{CourseId, EffectiveStatus, Status};
use std::collections::HashMap;

#[derive(Clone, Copy)]
enum Mark {
    InProgress,
    Resolved(EffectiveStatus),
}

/// Compute the effective status of every course in `graph`
///
/// Courses absent from `user_status` are `NotStarted`. Prerequisites that are
/// not in the graph contribute their plain declared status. On cyclic data a
/// prerequisite that is still being resolved also contributes its plain
/// declared status, which guarantees termination.
///
/// The walk uses an explicit stack and visits courses in canonical order, so
/// the result does not depend on map iteration order.
pub fn resolve_effective_statuses(
    graph: &Graph,
    user_status: &HashMap<CourseId, Status>,
) -> HashMap<CourseId, EffectiveStatus> {
    let declared = |id: &CourseId| -> EffectiveStatus {
        user_status.get(id).copied().unwrap_or_default().into()
    };

    let roots = graph.sorted_ids();
    let mut marks: HashMap<&CourseId, Mark> = HashMap::with_capacity(graph.len());

    for root in &roots {
        if marks.contains_key(root) {
            continue;
        }
        marks.insert(root, Mark::InProgress);
        let mut stack: Vec<(&CourseId, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let prerequisites = graph.prerequisites_of(node);

            if let Some(next) = prerequisites.get(frame.1) {
                frame.1 += 1;
                if graph.contains(next) && !marks.contains_key(next) {
                    marks.insert(next, Mark::InProgress);
                    stack.push((next, 0));
                }
                continue;
            }

            let blocked = prerequisites.iter().any(|p| {
                let status = match marks.get(p) {
                    Some(Mark::Resolved(status)) => *status,
                    Some(Mark::InProgress) => {
                        tracing::debug!("Cycle through {} while resolving {}", p, node);
                        declared(p)
                    }
                    None => declared(p),
                };
                status.blocks_dependents()
            });

            let status = if blocked {
                EffectiveStatus::Blocked
            } else {
                declared(node)
            };
            marks.insert(node, Mark::Resolved(status));
            stack.pop();
        }
    }

    marks
        .into_iter()
        .filter_map(|(id, mark)| match mark {
            Mark::Resolved(status) => Some((id.clone(), status)),
            Mark::InProgress => None,
        })
        .collect()
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

    fn statuses(entries: &[(&str, Status)]) -> HashMap<CourseId, Status> {
        entries
            .iter()
            .map(|(id, status)| (CourseId::new(*id), *status))
            .collect()
    }

    fn get(resolved: &HashMap<CourseId, EffectiveStatus>, id: &str) -> EffectiveStatus {
        resolved[&CourseId::new(id)]
    }

    #[test]
    fn test_failure_blocks_dependents() {
        let g = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &[])]);
        let resolved = resolve_effective_statuses(&g, &statuses(&[("C", Status::Failed)]));

        assert_eq!(get(&resolved, "C"), EffectiveStatus::Failed);
        assert_eq!(get(&resolved, "B"), EffectiveStatus::Blocked);
        assert_eq!(get(&resolved, "A"), EffectiveStatus::Blocked);
    }

    #[test]
    fn test_blocked_overrides_declared_pass() {
        let g = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &[])]);
        let user = statuses(&[
            ("A", Status::Passed),
            ("B", Status::Passed),
            ("C", Status::Failed),
        ]);
        let resolved = resolve_effective_statuses(&g, &user);

        assert_eq!(get(&resolved, "A"), EffectiveStatus::Blocked);
        assert_eq!(get(&resolved, "B"), EffectiveStatus::Blocked);
    }

    #[test]
    fn test_declared_status_without_failures() {
        let g = graph(&[("A", &["B"]), ("B", &[])]);
        let resolved = resolve_effective_statuses(&g, &statuses(&[("B", Status::Passed)]));

        assert_eq!(get(&resolved, "A"), EffectiveStatus::NotStarted);
        assert_eq!(get(&resolved, "B"), EffectiveStatus::Passed);
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn test_dangling_prerequisite_uses_declared_status() {
        let g = graph(&[("A", &["GONE"])]);

        let resolved = resolve_effective_statuses(&g, &statuses(&[("GONE", Status::Failed)]));
        assert_eq!(get(&resolved, "A"), EffectiveStatus::Blocked);

        let resolved = resolve_effective_statuses(&g, &HashMap::new());
        assert_eq!(get(&resolved, "A"), EffectiveStatus::NotStarted);
    }

    #[test]
    fn test_cycle_terminates_with_declared_fallback() {
        let g = graph(&[("A", &["B"]), ("B", &["A"])]);
        let resolved = resolve_effective_statuses(&g, &statuses(&[("A", Status::Failed)]));

        // A is resolved first (canonical order); B sees A in progress and
        // uses A's declared Failed, then A sees B Blocked.
        assert_eq!(get(&resolved, "B"), EffectiveStatus::Blocked);
        assert_eq!(get(&resolved, "A"), EffectiveStatus::Blocked);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let ids: Vec<String> = (0..20_000).map(|i| format!("C{}", i)).collect();
        let g = Graph::from_records(ids.iter().enumerate().map(|(i, id)| {
            let prerequisites = ids.get(i + 1).map(|p| vec![CourseId::new(p.as_str())]);
            CourseRecord::new(CourseId::new(id.as_str()), prerequisites.unwrap_or_default())
        }));
        let user = statuses(&[("C19999", Status::Failed)]);

        let resolved = resolve_effective_statuses(&g, &user);
        assert_eq!(get(&resolved, "C0"), EffectiveStatus::Blocked);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let g = graph(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &[]), ("D", &[])]);
        let user = statuses(&[("D", Status::Failed), ("C", Status::Passed)]);

        let first = resolve_effective_statuses(&g, &user);
        let second = resolve_effective_statuses(&g, &user);
        assert_eq!(first, second);
    }
}
