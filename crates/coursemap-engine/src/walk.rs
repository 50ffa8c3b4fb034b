//! Shared traversal over prerequisite edges
//!
//! Every engine component walks the graph through these helpers, each with
//! its own visited set, so malformed cyclic catalogs always terminate.
//! [`find_cycle_edges`] reports cycles without failing so callers can warn
//! about them.

use crate::graph::Graph;
use coursemap_domain::CourseId;
use std::collections::{HashMap, HashSet, VecDeque};

/// Adjacency from a course to its direct prerequisites
pub trait Prerequisites {
    /// Direct prerequisites of `id`, empty when `id` is unknown
    fn prerequisites_of(&self, id: &CourseId) -> &[CourseId];
}

impl Prerequisites for Graph {
    fn prerequisites_of(&self, id: &CourseId) -> &[CourseId] {
        self.get(id)
            .map(|record| record.prerequisite_ids.as_slice())
            .unwrap_or(&[])
    }
}

impl Prerequisites for HashMap<CourseId, Vec<CourseId>> {
    fn prerequisites_of(&self, id: &CourseId) -> &[CourseId] {
        self.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Whether `target` is reachable from `start` by following prerequisite edges
///
/// A node always reaches itself.
pub fn can_reach<P>(adjacency: &P, start: &CourseId, target: &CourseId) -> bool
where
    P: Prerequisites + ?Sized,
{
    let mut visited: HashSet<&CourseId> = HashSet::new();
    let mut stack: Vec<&CourseId> = vec![start];

    while let Some(node) = stack.pop() {
        if node == target {
            return true;
        }
        if !visited.insert(node) {
            continue;
        }
        stack.extend(
            adjacency
                .prerequisites_of(node)
                .iter()
                .filter(|p| !visited.contains(p)),
        );
    }

    false
}

/// Every id reachable from `start`, in breadth-first order, starting with `start`
pub fn breadth_first<P>(adjacency: &P, start: &CourseId) -> Vec<CourseId>
where
    P: Prerequisites + ?Sized,
{
    let mut visited: HashSet<&CourseId> = HashSet::from([start]);
    let mut queue: VecDeque<&CourseId> = VecDeque::from([start]);
    let mut order = Vec::new();

    while let Some(node) = queue.pop_front() {
        order.push(node.clone());
        for prerequisite in adjacency.prerequisites_of(node) {
            if visited.insert(prerequisite) {
                queue.push_back(prerequisite);
            }
        }
    }

    order
}

/// An edge that closes a cycle in the prerequisite relation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CycleEdge {
    /// Course whose prerequisite list contains the offending entry
    pub course: CourseId,

    /// Prerequisite that leads back to `course`
    pub prerequisite: CourseId,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Colour {
    InProgress,
    Done,
}

/// Find the back edges of a depth-first walk started from each root in order
///
/// An empty result means the part of the graph reachable from `roots` is
/// acyclic. Passing roots in canonical order makes the report reproducible.
pub fn find_cycle_edges<P>(adjacency: &P, roots: &[CourseId]) -> Vec<CycleEdge>
where
    P: Prerequisites + ?Sized,
{
    let mut colour: HashMap<&CourseId, Colour> = HashMap::new();
    let mut cycles = Vec::new();

    for root in roots {
        if colour.contains_key(root) {
            continue;
        }
        colour.insert(root, Colour::InProgress);
        let mut stack: Vec<(&CourseId, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let Some(next) = adjacency.prerequisites_of(node).get(frame.1) else {
                colour.insert(node, Colour::Done);
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match colour.get(next) {
                Some(Colour::InProgress) => cycles.push(CycleEdge {
                    course: node.clone(),
                    prerequisite: next.clone(),
                }),
                Some(Colour::Done) => {}
                None => {
                    colour.insert(next, Colour::InProgress);
                    stack.push((next, 0));
                }
            }
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency(edges: &[(&str, &[&str])]) -> HashMap<CourseId, Vec<CourseId>> {
        edges
            .iter()
            .map(|(id, prerequisites)| {
                (
                    CourseId::new(*id),
                    prerequisites.iter().map(|p| CourseId::new(*p)).collect(),
                )
            })
            .collect()
    }

    fn id(s: &str) -> CourseId {
        CourseId::new(s)
    }

    #[test]
    fn test_can_reach_follows_chain() {
        let map = adjacency(&[("A", &["B"]), ("B", &["C"])]);
        assert!(can_reach(&map, &id("A"), &id("C")));
        assert!(!can_reach(&map, &id("C"), &id("A")));
        assert!(can_reach(&map, &id("B"), &id("B")));
    }

    #[test]
    fn test_can_reach_terminates_on_cycle() {
        let map = adjacency(&[("A", &["B"]), ("B", &["A"])]);
        assert!(can_reach(&map, &id("A"), &id("B")));
        assert!(!can_reach(&map, &id("A"), &id("Z")));
    }

    #[test]
    fn test_breadth_first_order() {
        let map = adjacency(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &["D"])]);
        assert_eq!(breadth_first(&map, &id("A")), vec![id("A"), id("B"), id("C"), id("D")]);
    }

    #[test]
    fn test_breadth_first_unknown_start() {
        let map = adjacency(&[]);
        assert_eq!(breadth_first(&map, &id("X")), vec![id("X")]);
    }

    #[test]
    fn test_find_cycle_edges() {
        let map = adjacency(&[("A", &["B"]), ("B", &["C"]), ("C", &["A"])]);
        let cycles = find_cycle_edges(&map, &[id("A")]);
        assert_eq!(
            cycles,
            vec![CycleEdge {
                course: id("C"),
                prerequisite: id("A"),
            }]
        );
    }

    #[test]
    fn test_find_cycle_edges_self_loop_and_acyclic() {
        let looped = adjacency(&[("A", &["A"])]);
        assert_eq!(find_cycle_edges(&looped, &[id("A")]).len(), 1);

        let diamond = adjacency(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &["D"])]);
        assert!(find_cycle_edges(&diamond, &[id("A"), id("B")]).is_empty());
    }
}
