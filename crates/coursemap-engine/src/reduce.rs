//! Transitive reduction of the prerequisite edge set for display
//!
//! A direct edge `course -> p` is dropped when `course` still reaches `p`
//! without it. On an acyclic graph this is exactly the set of edges where
//! another direct prerequisite `q` of the same course already reaches `p`,
//! and the result is the unique transitive reduction.

use crate::sort::sorted;
use crate::walk::can_reach;
use coursemap_domain::CourseId;
use std::collections::HashMap;

/// Remove edges implied by longer prerequisite paths
///
/// Edges are examined one at a time, courses in canonical order and each
/// course's prerequisites in input order, and each is checked against the
/// graph with every earlier removal already applied. Every removal keeps the
/// reachability of the graph before it, so the "X is required before Y"
/// relation is preserved on cyclic input too. Inside a cycle the edges kept
/// depend on that fixed order. The kept prerequisites of each course stay in
/// input order; repeated entries and self-loops are dropped.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use coursemap_domain::CourseId;
/// use coursemap_engine::reduce;
///
/// let id = |s: &str| CourseId::new(s);
/// let edges: HashMap<CourseId, Vec<CourseId>> = HashMap::from([
///     (id("HUMN3300"), vec![id("HUMN3100"), id("HUMN2200")]),
///     (id("HUMN3100"), vec![id("HUMN2200")]),
/// ]);
///
/// let reduced = reduce(&edges);
/// assert_eq!(reduced[&id("HUMN3300")], vec![id("HUMN3100")]);
/// assert_eq!(reduced[&id("HUMN3100")], vec![id("HUMN2200")]);
/// ```
pub fn reduce(edges: &HashMap<CourseId, Vec<CourseId>>) -> HashMap<CourseId, Vec<CourseId>> {
    let mut reduced = edges.clone();
    let mut removed = 0usize;

    for course in sorted(edges.keys().cloned()) {
        for prerequisite in &edges[&course] {
            let Some(list) = reduced.get_mut(&course) else {
                continue;
            };
            let Some(position) = list.iter().position(|p| p == prerequisite) else {
                continue;
            };
            let edge = list.remove(position);

            if can_reach(&reduced, &course, &edge) {
                removed += 1;
            } else if let Some(list) = reduced.get_mut(&course) {
                list.insert(position, edge);
            }
        }
    }

    tracing::debug!("Transitive reduction removed {} edge(s)", removed);
    reduced
}
