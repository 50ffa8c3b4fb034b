//! Prerequisite graph built by the closure builder

use crate::sort::{canonical_cmp, sorted};
use coursemap_domain::{CourseId, CourseRecord, Edge};
use std::collections::{BTreeSet, HashMap};

/// Read-only map from course id to course record
///
/// Every key was returned by the course repository. Prerequisite lists may
/// still name ids that are not keys; those are dangling prerequisites and are
/// tolerated everywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    courses: HashMap<CourseId, CourseRecord>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from records; the first record for an id wins
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CourseRecord>,
    {
        let mut graph = Self::new();
        for record in records {
            graph.insert(record);
        }
        graph
    }

    /// Insert a record unless its id is already present
    ///
    /// Returns `true` when the record was inserted.
    pub(crate) fn insert(&mut self, record: CourseRecord) -> bool {
        if self.courses.contains_key(&record.id) {
            return false;
        }
        self.courses.insert(record.id.clone(), record);
        true
    }

    /// Get a record by id
    pub fn get(&self, id: &CourseId) -> Option<&CourseRecord> {
        self.courses.get(id)
    }

    /// Whether the graph contains `id`
    pub fn contains(&self, id: &CourseId) -> bool {
        self.courses.contains_key(id)
    }

    /// Number of courses
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the graph has no courses
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Iterate over the ids in unspecified order
    pub fn ids(&self) -> impl Iterator<Item = &CourseId> {
        self.courses.keys()
    }

    /// All ids in canonical order
    pub fn sorted_ids(&self) -> Vec<CourseId> {
        sorted(self.courses.keys().cloned())
    }

    /// Direct prerequisites of `id` that are present in the graph
    pub fn resolved_prerequisites(&self, id: &CourseId) -> Vec<&CourseId> {
        self.get(id)
            .map(|record| {
                record
                    .prerequisite_ids
                    .iter()
                    .filter(|p| self.contains(p))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Drawable direct edges as a `course -> prerequisites` map
    ///
    /// Dangling prerequisites are dropped and duplicate entries collapsed;
    /// list order follows the catalog order.
    pub fn prerequisite_map(&self) -> HashMap<CourseId, Vec<CourseId>> {
        self.courses
            .keys()
            .map(|id| {
                let mut prerequisites: Vec<CourseId> = Vec::new();
                for p in self.resolved_prerequisites(id) {
                    if !prerequisites.contains(p) {
                        prerequisites.push(p.clone());
                    }
                }
                (id.clone(), prerequisites)
            })
            .collect()
    }

    /// Drawable direct edges, ordered canonically by dependent then prerequisite
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .prerequisite_map()
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

    /// Prerequisite ids referenced by some record but absent from the graph
    pub fn dangling_prerequisites(&self) -> Vec<CourseId> {
        let dangling: BTreeSet<&CourseId> = self
            .courses
            .values()
            .flat_map(|record| record.prerequisite_ids.iter())
            .filter(|p| !self.contains(p))
            .collect();
        sorted(dangling.into_iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, prerequisites: &[&str]) -> CourseRecord {
        CourseRecord::new(
            CourseId::new(id),
            prerequisites.iter().map(|p| CourseId::new(*p)).collect(),
        )
    }

    #[test]
    fn test_first_record_wins() {
        let graph = Graph::from_records([record("A1", &["B1"]), record("A1", &[])]);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get(&CourseId::new("A1")).unwrap().prerequisite_ids.len(), 1);
    }

    #[test]
    fn test_edges_skip_dangling_prerequisites() {
        let graph = Graph::from_records([record("A1", &["B1", "GONE1"]), record("B1", &[])]);

        let edges = graph.edges();
        assert_eq!(edges, vec![Edge::new(CourseId::new("B1"), CourseId::new("A1"))]);
        assert_eq!(graph.dangling_prerequisites(), vec![CourseId::new("GONE1")]);
    }

    #[test]
    fn test_prerequisite_map_collapses_duplicates() {
        let graph = Graph::from_records([record("A1", &["B1", "B1"]), record("B1", &[])]);
        let map = graph.prerequisite_map();
        assert_eq!(map[&CourseId::new("A1")], vec![CourseId::new("B1")]);
        assert!(map[&CourseId::new("B1")].is_empty());
    }

    #[test]
    fn test_sorted_ids_are_canonical() {
        let graph = Graph::from_records([
            record("MATH1051", &[]),
            record("COMP3506", &[]),
            record("COMP1001", &[]),
        ]);
        let ids: Vec<String> = graph.sorted_ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, ["COMP1001", "COMP3506", "MATH1051"]);
    }
}
