//! Roadmap facade: one closure plus everything the presentation layer draws

use crate::cancel::CancellationToken;
use crate::cascade::cascade_passed;
use crate::closure::build_closure;
use crate::error::ClosureError;
use crate::graph::Graph;
use crate::reduce::reduce;
use crate::sort::{canonical_cmp, sorted};
use crate::status::resolve_effective_statuses;
use crate::walk::{find_cycle_edges, CycleEdge};
use coursemap_domain::traits::CourseRepository;
use coursemap_domain::{CourseId, Edge, EffectiveStatus, Status};
use std::collections::HashMap;

/// The prerequisite closure of a set of root courses
///
/// Built once, then queried for views as the declared statuses change.
#[derive(Debug, Clone)]
pub struct Roadmap {
    roots: Vec<CourseId>,
    graph: Graph,
}

/// One course as displayed on the roadmap
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    /// Course id
    pub id: CourseId,

    /// Status after blocked propagation
    pub status: EffectiveStatus,

    /// Status the student declared
    pub declared: Status,

    /// Prerequisites kept after transitive reduction, in canonical order
    pub prerequisites: Vec<CourseId>,
}

/// Everything needed to render a roadmap, in canonical order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoadmapView {
    /// Courses in canonical order
    pub nodes: Vec<NodeView>,

    /// Reduced edges, ordered by dependent then prerequisite
    pub edges: Vec<Edge>,

    /// Prerequisites the catalog never returned
    pub dangling: Vec<CourseId>,

    /// Edges that close a cycle in the catalog data
    pub cycles: Vec<CycleEdge>,
}

impl RoadmapView {
    /// Effective status of `id`, if it is on the roadmap
    pub fn status_of(&self, id: &CourseId) -> Option<EffectiveStatus> {
        self.nodes.iter().find(|n| &n.id == id).map(|n| n.status)
    }

    /// Number of courses with the given effective status
    pub fn count(&self, status: EffectiveStatus) -> usize {
        self.nodes.iter().filter(|n| n.status == status).count()
    }
}

impl Roadmap {
    /// Build the closure of `roots` from the repository
    pub async fn build<R, I>(
        repo: &R,
        roots: I,
        cancel: &CancellationToken,
    ) -> Result<Self, ClosureError<R::Error>>
    where
        R: CourseRepository,
        I: IntoIterator<Item = CourseId>,
    {
        let roots = sorted(roots);
        let graph = build_closure(repo, roots.iter().cloned(), cancel).await?;
        Ok(Self::from_graph(roots, graph))
    }

    /// Wrap an already built graph
    pub fn from_graph(roots: Vec<CourseId>, graph: Graph) -> Self {
        let mut roots = sorted(roots);
        roots.dedup();
        Self { roots, graph }
    }

    /// Root courses, in canonical order
    pub fn roots(&self) -> &[CourseId] {
        &self.roots
    }

    /// Root courses the catalog does not know
    pub fn missing_roots(&self) -> Vec<CourseId> {
        self.roots
            .iter()
            .filter(|id| !self.graph.contains(id))
            .cloned()
            .collect()
    }

    /// The underlying closure
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Transitively reduced edges, ordered by dependent then prerequisite
    pub fn reduced_edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = reduce(&self.graph.prerequisite_map())
            .into_iter()
            .flat_map(|(to, prerequisites)| {
                prerequisites
                    .into_iter()
                    .map(move |from| Edge::new(from, to.clone()))
            })
            .collect();
        edges.sort_by(|a, b| canonical_cmp(&a.to, &b.to).then_with(|| canonical_cmp(&a.from, &b.from)));
        edges
    }

    /// Cycles in the closure, reported without failing
    pub fn cycles(&self) -> Vec<CycleEdge> {
        find_cycle_edges(&self.graph, &self.graph.sorted_ids())
    }

    /// Status delta for marking `id` as passed
    pub fn mark_passed(&self, id: &CourseId) -> HashMap<CourseId, Status> {
        cascade_passed(&self.graph, id)
    }

    /// Build the display view for the given declared statuses
    pub fn view(&self, user_status: &HashMap<CourseId, Status>) -> RoadmapView {
        let effective = resolve_effective_statuses(&self.graph, user_status);
        let edges = self.reduced_edges();

        let mut prerequisites: HashMap<&CourseId, Vec<CourseId>> = HashMap::new();
        for edge in &edges {
            prerequisites.entry(&edge.to).or_default().push(edge.from.clone());
        }

        let nodes = self
            .graph
            .sorted_ids()
            .into_iter()
            .map(|id| NodeView {
                status: effective.get(&id).copied().unwrap_or_default(),
                declared: user_status.get(&id).copied().unwrap_or_default(),
                prerequisites: prerequisites.remove(&id).unwrap_or_default(),
                id,
            })
            .collect();

        let cycles = self.cycles();
        if !cycles.is_empty() {
            tracing::warn!("Catalog contains {} prerequisite cycle(s)", cycles.len());
        }

        RoadmapView {
            nodes,
            edges,
            dangling: self.graph.dangling_prerequisites(),
            cycles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursemap_domain::CourseRecord;

    fn roadmap(roots: &[&str], entries: &[(&str, &[&str])]) -> Roadmap {
        let graph = Graph::from_records(entries.iter().map(|(id, prerequisites)| {
            CourseRecord::new(
                CourseId::new(*id),
                prerequisites.iter().map(|p| CourseId::new(*p)).collect(),
            )
        }));
        Roadmap::from_graph(roots.iter().map(|r| CourseId::new(*r)).collect(), graph)
    }

    fn id(s: &str) -> CourseId {
        CourseId::new(s)
    }

    #[test]
    fn test_view_orders_nodes_and_reduces_edges() {
        let map = roadmap(
            &["COMP3506"],
            &[
                ("COMP3506", &["CSSE2002", "CSSE1001"]),
                ("CSSE2002", &["CSSE1001"]),
                ("CSSE1001", &[]),
            ],
        );

        let view = map.view(&HashMap::new());
        let order: Vec<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, ["COMP3506", "CSSE1001", "CSSE2002"]);
        assert_eq!(
            view.edges,
            vec![
                Edge::new(id("CSSE2002"), id("COMP3506")),
                Edge::new(id("CSSE1001"), id("CSSE2002")),
            ]
        );
        assert_eq!(view.nodes[0].prerequisites, vec![id("CSSE2002")]);
        assert!(view.cycles.is_empty());
    }

    #[test]
    fn test_view_reports_blocked_and_declared() {
        let map = roadmap(&["A1"], &[("A1", &["B1"]), ("B1", &[])]);
        let user: HashMap<CourseId, Status> =
            [(id("A1"), Status::Passed), (id("B1"), Status::Failed)].into_iter().collect();

        let view = map.view(&user);
        assert_eq!(view.status_of(&id("A1")), Some(EffectiveStatus::Blocked));
        assert_eq!(view.nodes[0].declared, Status::Passed);
        assert_eq!(view.count(EffectiveStatus::Failed), 1);
    }

    #[test]
    fn test_mark_passed_then_view() {
        let map = roadmap(&["A1"], &[("A1", &["B1"]), ("B1", &["C1"]), ("C1", &[])]);
        let delta = map.mark_passed(&id("A1"));

        let view = map.view(&delta);
        assert_eq!(view.count(EffectiveStatus::Passed), 3);
    }

    #[test]
    fn test_missing_roots_and_dangling() {
        let map = roadmap(&["A1", "NOPE1", "A1"], &[("A1", &["GONE1"])]);
        assert_eq!(map.roots(), &[id("A1"), id("NOPE1")]);
        assert_eq!(map.missing_roots(), vec![id("NOPE1")]);
        assert_eq!(map.view(&HashMap::new()).dangling, vec![id("GONE1")]);
    }

    #[test]
    fn test_cycles_are_reported() {
        let map = roadmap(&["A1"], &[("A1", &["B1"]), ("B1", &["A1"])]);
        let view = map.view(&HashMap::new());
        assert_eq!(view.cycles.len(), 1);
        assert_eq!(view.nodes.len(), 2);
    }
}
