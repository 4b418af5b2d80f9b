use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ppi::InteractionGraph;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_ITERATIONS: usize = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    pub seed: u64,
    pub iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Node positions normalized into `[-1, 1]` on both axes, in graph node order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    positions: IndexMap<String, Vec2>,
}

impl Layout {
    pub fn position(&self, id: &str) -> Option<Vec2> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec2)> {
        self.positions
            .iter()
            .map(|(id, position)| (id.as_str(), *position))
    }
}

pub fn layout(graph: &InteractionGraph, seed: u64) -> Layout {
    layout_with(
        graph,
        &LayoutConfig {
            seed,
            ..LayoutConfig::default()
        },
    )
}

/// Spring layout where each edge rests longer the larger its distance, so
/// confident interactions end up close together. Zero and one node graphs
/// never reach the solver.
pub fn layout_with(graph: &InteractionGraph, config: &LayoutConfig) -> Layout {
    let ids = graph.nodes().collect::<Vec<_>>();
    let positions = match ids.len() {
        0 => Vec::new(),
        1 => vec![Vec2::ZERO],
        n => {
            let edges = graph
                .indexed_edges()
                .into_iter()
                .map(|(from, to, record)| (from, to, edge_weight(record.distance)))
                .collect::<Vec<_>>();
            normalize(spring_positions(n, &edges, config))
        }
    };

    Layout {
        positions: ids.into_iter().map(str::to_owned).zip(positions).collect(),
    }
}

/// Spring softness for an edge. Grows with the distance without bound so every
/// score keeps its own pull; unusable distances fall back to neutral.
fn edge_weight(distance: f64) -> f32 {
    let weight = distance as f32;
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        1.0
    }
}

fn spring_positions(n: usize, edges: &[(usize, usize, f32)], config: &LayoutConfig) -> Vec<Vec2> {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let base_radius = (n as f32).sqrt() * 120.0;
    let mut positions = (0..n)
        .map(|_| {
            let angle = rng.random_range(0.0..TAU);
            let radius = base_radius * rng.random_range(0.05_f32..1.0).sqrt();
            vec2(angle.cos(), angle.sin()) * radius
        })
        .collect::<Vec<_>>();

    let area = (base_radius * 2.0).powi(2);
    let k = (area / n as f32).sqrt().max(24.0);
    let mut temperature = (k * 2.5).max(60.0);

    for _ in 0..config.iterations {
        let mut disp = vec![Vec2::ZERO; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = positions[i] - positions[j];
                let distance = delta.length().max(0.5);
                let direction = delta / distance;

                let force = (k * k) / distance;
                disp[i] += direction * force;
                disp[j] -= direction * force;
            }
        }

        for &(from, to, weight) in edges {
            if from >= n || to >= n || from == to {
                continue;
            }

            let delta = positions[from] - positions[to];
            let distance = delta.length().max(0.5);
            let direction = delta / distance;

            let force = (distance * distance) / (k * weight);
            disp[from] -= direction * force;
            disp[to] += direction * force;
        }

        for i in 0..n {
            disp[i] -= positions[i] * 0.002;
        }

        for i in 0..n {
            let d = disp[i];
            let length = d.length();
            if length > 0.0 {
                positions[i] += d / length * length.min(temperature);
            }
        }

        temperature *= 0.97;
        if temperature < 0.5 {
            break;
        }
    }

    positions
}

fn normalize(mut positions: Vec<Vec2>) -> Vec<Vec2> {
    if positions.is_empty() {
        return positions;
    }

    let mut centroid = Vec2::ZERO;
    for position in &positions {
        centroid += *position;
    }
    centroid /= positions.len() as f32;

    let mut extent = 0.0_f32;
    for position in &mut positions {
        *position -= centroid;
        extent = extent.max(position.x.abs()).max(position.y.abs());
    }

    if extent > f32::EPSILON {
        for position in &mut positions {
            *position /= extent;
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ppi::{Dataset, Query, build, filter};

    fn graph(triples: &[(&str, &str, f64)]) -> InteractionGraph {
        let dataset = Dataset::from_triples(triples);
        build(&filter(&dataset, &Query::Empty))
    }

    #[test]
    fn same_seed_gives_identical_layout() {
        let graph = graph(&[
            ("P1", "P2", 0.95),
            ("P2", "P3", 0.6),
            ("P3", "P4", 0.75),
            ("P4", "P1", 0.3),
            ("P2", "P5", 0.9),
        ]);

        let first = layout(&graph, DEFAULT_SEED);
        let second = layout(&graph, DEFAULT_SEED);
        assert_eq!(first, second);
        for ((_, a), (_, b)) in first.iter().zip(second.iter()) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
        }
    }

    #[test]
    fn different_seeds_start_differently() {
        let graph = graph(&[("P1", "P2", 0.95), ("P2", "P3", 0.6), ("P3", "P1", 0.7)]);
        assert_ne!(layout(&graph, 1), layout(&graph, 2));
    }

    #[test]
    fn empty_graph_has_empty_layout() {
        assert!(layout(&InteractionGraph::default(), DEFAULT_SEED).is_empty());
    }

    #[test]
    fn single_node_sits_at_origin() {
        let graph = graph(&[("P1", "P1", 0.8)]);
        let placed = layout(&graph, DEFAULT_SEED);

        assert_eq!(placed.len(), 1);
        assert_eq!(placed.position("P1"), Some(Vec2::ZERO));
    }

    #[test]
    fn positions_are_finite_and_normalized() {
        let graph = graph(&[
            ("A", "B", 0.99),
            ("A", "C", 0.01),
            ("B", "C", 0.0),
            ("C", "D", 0.5),
            ("E", "F", 0.7),
        ]);
        let placed = layout(&graph, 7);

        assert_eq!(placed.len(), graph.node_count());
        for (_, position) in placed.iter() {
            assert!(position.x.is_finite() && position.y.is_finite());
            assert!(position.x.abs() <= 1.0 + 1e-5);
            assert!(position.y.abs() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn confident_edges_pull_nodes_closer() {
        let graph = graph(&[("HUB", "STRONG", 0.99), ("HUB", "WEAK", 0.1)]);
        let placed = layout(&graph, DEFAULT_SEED);

        let hub = placed.position("HUB").unwrap();
        let strong = placed.position("STRONG").unwrap();
        let weak = placed.position("WEAK").unwrap();
        assert!((hub - strong).length() < (hub - weak).length());
    }

    #[test]
    fn weak_scores_keep_distinct_pulls() {
        let graph = graph(&[("HUB", "A", 0.08), ("HUB", "B", 0.01)]);
        let placed = layout(&graph, DEFAULT_SEED);

        let hub = placed.position("HUB").unwrap();
        let a = placed.position("A").unwrap();
        let b = placed.position("B").unwrap();
        assert!((hub - a).length() < (hub - b).length());
    }

    #[test]
    fn edge_weight_is_monotone_and_guarded() {
        assert!(edge_weight(1.0 / 0.08) < edge_weight(1.0 / 0.01));
        assert!(edge_weight(50.0) < edge_weight(500.0));
        assert_eq!(edge_weight(f64::INFINITY), 1.0);
        assert_eq!(edge_weight(f64::NAN), 1.0);
        assert_eq!(edge_weight(0.0), 1.0);
    }

    #[test]
    fn zero_iterations_still_places_every_node() {
        let graph = graph(&[("P1", "P2", 0.9), ("P3", "P4", 0.9)]);
        let placed = layout_with(
            &graph,
            &LayoutConfig {
                seed: 3,
                iterations: 0,
            },
        );

        assert_eq!(placed.len(), 4);
    }
}
