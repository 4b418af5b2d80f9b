use indexmap::{IndexMap, IndexSet};

use super::query::FilteredResult;

/// Layout distance for a confidence score. Non-positive or missing scores
/// fall back to a neutral distance of 1.0.
pub fn distance_for(score: Option<f64>) -> f64 {
    match score {
        Some(score) if score > 0.0 => 1.0 / score,
        _ => 1.0,
    }
}

/// Unordered protein pair; the two ids are stored sorted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    low: String,
    high: String,
}

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.to_owned(),
            high: high.to_owned(),
        }
    }

    pub fn ids(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeRecord {
    pub distance: f64,
    pub score: Option<f64>,
}

impl EdgeRecord {
    pub fn from_score(score: Option<f64>) -> Self {
        Self {
            distance: distance_for(score),
            score,
        }
    }
}

/// Undirected weighted interaction graph. Nodes and edges iterate in first
/// insertion order so layouts seeded identically come out identical.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionGraph {
    nodes: IndexSet<String>,
    edges: IndexMap<PairKey, EdgeRecord>,
}

impl InteractionGraph {
    pub fn add_node(&mut self, id: &str) -> usize {
        if let Some(index) = self.nodes.get_index_of(id) {
            return index;
        }
        self.nodes.insert_full(id.to_owned()).0
    }

    /// Inserts or replaces the edge for the pair; the latest record wins.
    /// Self pairs only register the node.
    pub fn upsert_edge(&mut self, a: &str, b: &str, record: EdgeRecord) {
        self.add_node(a);
        self.add_node(b);
        if a == b {
            return;
        }
        self.edges.insert(PairKey::new(a, b), record);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    pub fn edges(&self) -> impl Iterator<Item = (&PairKey, &EdgeRecord)> {
        self.edges.iter()
    }

    pub fn edge(&self, a: &str, b: &str) -> Option<&EdgeRecord> {
        self.edges.get(&PairKey::new(a, b))
    }

    /// Edges as node index pairs, in edge insertion order.
    pub fn indexed_edges(&self) -> Vec<(usize, usize, EdgeRecord)> {
        self.edges
            .iter()
            .filter_map(|(key, record)| {
                let (a, b) = key.ids();
                Some((self.node_index(a)?, self.node_index(b)?, *record))
            })
            .collect()
    }
}

pub fn build(rows: &FilteredResult<'_>) -> InteractionGraph {
    let mut graph = InteractionGraph::default();
    for row in rows.iter() {
        graph.upsert_edge(
            &row.protein_a,
            &row.protein_b,
            EdgeRecord::from_score(row.score),
        );
    }
    graph
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;
    use crate::ppi::{Dataset, Query, filter};

    #[test]
    fn pair_key_ignores_orientation() {
        assert_eq!(PairKey::new("P2", "P1"), PairKey::new("P1", "P2"));
        assert_eq!(PairKey::new("P2", "P1").ids(), ("P1", "P2"));
    }

    #[test]
    fn distance_is_inverse_score_with_fallback() {
        assert!((distance_for(Some(0.5)) - 2.0).abs() < 1e-12);
        assert_eq!(distance_for(Some(0.0)), 1.0);
        assert_eq!(distance_for(Some(-0.3)), 1.0);
        assert_eq!(distance_for(None), 1.0);
    }

    #[test]
    fn distance_decreases_as_score_grows() {
        let scores = [0.05, 0.2, 0.5, 0.7, 0.9, 0.999, 1.0];
        for pair in scores.windows(2) {
            assert!(distance_for(Some(pair[0])) > distance_for(Some(pair[1])));
        }
    }

    #[test]
    fn later_rows_overwrite_the_same_pair() {
        let dataset = Dataset::from_triples(&[("P1", "P2", 0.5), ("P2", "P1", 0.9)]);
        let graph = build(&filter(&dataset, &Query::Empty));

        assert_eq!(graph.edge_count(), 1);
        let edge = graph.edge("P1", "P2").unwrap();
        assert_eq!(edge.score, Some(0.9));
        assert!((edge.distance - 1.0 / 0.9).abs() < 1e-12);
    }

    #[test]
    fn zero_score_uses_fallback_distance() {
        let dataset = Dataset::from_triples(&[("P1", "P2", 0.0)]);
        let graph = build(&filter(&dataset, &Query::Empty));

        let edge = graph.edge("P1", "P2").unwrap();
        assert_eq!(edge.distance, 1.0);
        assert!(edge.distance.is_finite());
    }

    #[test]
    fn empty_rows_build_an_empty_graph() {
        let dataset = Dataset::from_triples(&[("P1", "P2", 0.8)]);
        let graph = build(&filter(&dataset, &Query::SingleProtein("P9".to_owned())));

        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn self_interaction_adds_node_without_edge() {
        let dataset = Dataset::from_triples(&[("P1", "P1", 0.7)]);
        let graph = build(&filter(&dataset, &Query::Empty));

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn nodes_keep_first_appearance_order() {
        let dataset =
            Dataset::from_triples(&[("P3", "P1", 0.7), ("P2", "P3", 0.8), ("P1", "P4", 0.9)]);
        let graph = build(&filter(&dataset, &Query::Empty));

        assert_eq!(
            graph.nodes().collect::<Vec<_>>(),
            ["P3", "P1", "P2", "P4"]
        );
        let endpoints = graph
            .indexed_edges()
            .iter()
            .map(|(a, b, _)| (*a, *b))
            .collect::<Vec<_>>();
        assert_eq!(endpoints, [(1, 0), (2, 0), (1, 3)]);
    }

    proptest! {
        #[test]
        fn node_set_is_the_union_of_endpoints(
            triples in prop::collection::vec(
                (
                    prop::sample::select(vec!["A", "B", "C", "D", "E"]),
                    prop::sample::select(vec!["A", "B", "C", "D", "E"]),
                    0.0f64..=1.0,
                ),
                0..30,
            ),
            focus in prop::sample::select(vec!["A", "C", "E", "Z"]),
        ) {
            let dataset = Dataset::from_triples(&triples);
            let rows = filter(&dataset, &Query::SingleProtein(focus.to_owned()));
            let graph = build(&rows);

            let expected = rows
                .iter()
                .flat_map(|row| [row.protein_a.as_str(), row.protein_b.as_str()])
                .collect::<BTreeSet<_>>();
            let actual = graph.nodes().collect::<BTreeSet<_>>();
            prop_assert_eq!(actual, expected);
            prop_assert!(graph.edge_count() <= rows.len());
        }
    }
}
