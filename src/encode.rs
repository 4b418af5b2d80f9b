use eframe::egui::{Color32, Vec2};
use rand::seq::IndexedRandom;

use crate::layout::Layout;
use crate::ppi::{FilteredResult, InteractionGraph};

pub const HIGH_THRESHOLD: f64 = 0.9;
pub const MEDIUM_THRESHOLD: f64 = 0.7;

pub const NODE_COLOR: Color32 = Color32::from_rgb(0x1f, 0x78, 0xb4);
pub const NODE_RADIUS: f32 = 14.0;

const DECORATIVE_PALETTE: [Color32; 12] = [
    Color32::from_rgb(0xae, 0xd6, 0xf1),
    Color32::from_rgb(0xd4, 0xef, 0xdf),
    Color32::from_rgb(0xfa, 0xd7, 0xa0),
    Color32::from_rgb(0xf5, 0xb7, 0xb1),
    Color32::from_rgb(0xd7, 0xbd, 0xe2),
    Color32::from_rgb(0xa3, 0xe4, 0xd7),
    Color32::from_rgb(0xf9, 0xe7, 0x9f),
    Color32::from_rgb(0xe8, 0xda, 0xef),
    Color32::from_rgb(0xd5, 0xf5, 0xe3),
    Color32::from_rgb(0xfc, 0xf3, 0xcf),
    Color32::from_rgb(0xfa, 0xdb, 0xd8),
    Color32::from_rgb(0xeb, 0xde, 0xf0),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorBucket {
    High,
    Medium,
    Low,
}

impl ColorBucket {
    /// Lower bounds are inclusive: 0.9 is high, 0.7 is medium. Rows without a
    /// usable score land in the low bucket.
    pub fn for_score(score: Option<f64>) -> Self {
        match score {
            Some(score) if score >= HIGH_THRESHOLD => Self::High,
            Some(score) if score >= MEDIUM_THRESHOLD => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            Self::High => Color32::from_rgb(0xff, 0x69, 0xb4),
            Self::Medium => Color32::from_rgb(0x34, 0x98, 0xdb),
            Self::Low => Color32::from_rgb(0x9b, 0x59, 0xb6),
        }
    }

    pub fn width(self) -> f32 {
        match self {
            Self::High => 3.0,
            Self::Medium => 2.0,
            Self::Low => 1.2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high (>= 0.9)",
            Self::Medium => "medium (0.7 - 0.9)",
            Self::Low => "low (< 0.7)",
        }
    }
}

pub fn score_label(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{score:.2}"),
        None => "n/a".to_owned(),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeColoring {
    #[default]
    Uniform,
    /// Random pastel per node, redrawn on every encode. Purely cosmetic and
    /// not reproducible; nothing may depend on the chosen colors.
    Decorative,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisualNode {
    pub id: String,
    pub position: Vec2,
    pub color: Color32,
    pub radius: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisualEdge {
    pub from: usize,
    pub to: usize,
    pub score: Option<f64>,
    pub distance: f64,
    pub bucket: ColorBucket,
    pub width: f32,
    pub label: String,
}

/// One bar of the score chart, one per filtered row.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreBar {
    pub label: String,
    pub score: Option<f64>,
    pub bucket: ColorBucket,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualGraph {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
    pub bars: Vec<ScoreBar>,
}

impl VisualGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&VisualNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edge_between(&self, a: &str, b: &str) -> Option<&VisualEdge> {
        self.edges.iter().find(|edge| {
            let from = self.nodes[edge.from].id.as_str();
            let to = self.nodes[edge.to].id.as_str();
            (from == a && to == b) || (from == b && to == a)
        })
    }
}

pub fn encode(
    graph: &InteractionGraph,
    layout: &Layout,
    rows: &FilteredResult<'_>,
    coloring: NodeColoring,
) -> VisualGraph {
    let mut rng = rand::rng();
    let nodes = graph
        .nodes()
        .map(|id| {
            let color = match coloring {
                NodeColoring::Uniform => NODE_COLOR,
                NodeColoring::Decorative => DECORATIVE_PALETTE
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(NODE_COLOR),
            };
            VisualNode {
                id: id.to_owned(),
                position: layout.position(id).unwrap_or(Vec2::ZERO),
                color,
                radius: NODE_RADIUS,
            }
        })
        .collect();

    let edges = graph
        .indexed_edges()
        .into_iter()
        .map(|(from, to, record)| {
            let bucket = ColorBucket::for_score(record.score);
            VisualEdge {
                from,
                to,
                score: record.score,
                distance: record.distance,
                bucket,
                width: bucket.width(),
                label: score_label(record.score),
            }
        })
        .collect();

    let bars = rows
        .iter()
        .map(|row| ScoreBar {
            label: format!("{} ↔ {}", row.protein_a, row.protein_b),
            score: row.score,
            bucket: ColorBucket::for_score(row.score),
        })
        .collect();

    VisualGraph { nodes, edges, bars }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DEFAULT_SEED, layout};
    use crate::ppi::{Dataset, Query, build, filter};

    #[test]
    fn bucket_boundaries() {
        assert_eq!(ColorBucket::for_score(Some(0.9)), ColorBucket::High);
        assert_eq!(ColorBucket::for_score(Some(0.8999)), ColorBucket::Medium);
        assert_eq!(ColorBucket::for_score(Some(0.7)), ColorBucket::Medium);
        assert_eq!(ColorBucket::for_score(Some(0.6999)), ColorBucket::Low);
        assert_eq!(ColorBucket::for_score(Some(1.0)), ColorBucket::High);
        assert_eq!(ColorBucket::for_score(None), ColorBucket::Low);
    }

    #[test]
    fn labels_use_two_decimals() {
        assert_eq!(score_label(Some(0.956)), "0.96");
        assert_eq!(score_label(Some(0.7)), "0.70");
        assert_eq!(score_label(None), "n/a");
    }

    #[test]
    fn encodes_edges_nodes_and_bars() {
        let dataset = Dataset::from_triples(&[("P1", "P2", 0.95), ("P2", "P3", 0.6)]);
        let rows = filter(&dataset, &Query::SingleProtein("P2".to_owned()));
        let graph = build(&rows);
        let placed = layout(&graph, DEFAULT_SEED);

        let visual = encode(&graph, &placed, &rows, NodeColoring::Uniform);

        assert_eq!(visual.nodes.len(), 3);
        assert!(visual.nodes.iter().all(|node| node.color == NODE_COLOR));
        assert!(visual.nodes.iter().all(|node| node.radius == NODE_RADIUS));
        assert_eq!(
            visual.node("P1").map(|node| node.position),
            placed.position("P1")
        );

        let strong = visual.edge_between("P1", "P2").unwrap();
        assert_eq!(strong.bucket, ColorBucket::High);
        assert_eq!(strong.label, "0.95");
        assert_eq!(strong.width, 3.0);
        assert_eq!(
            visual.edge_between("P3", "P2").unwrap().bucket,
            ColorBucket::Low
        );

        assert_eq!(visual.bars.len(), 2);
        assert_eq!(visual.bars[0].label, "P1 ↔ P2");
    }

    #[test]
    fn decorative_colors_come_from_the_palette() {
        let dataset = Dataset::from_triples(&[("P1", "P2", 0.95), ("P2", "P3", 0.6)]);
        let rows = filter(&dataset, &Query::Empty);
        let graph = build(&rows);
        let placed = layout(&graph, DEFAULT_SEED);

        let visual = encode(&graph, &placed, &rows, NodeColoring::Decorative);

        assert!(
            visual
                .nodes
                .iter()
                .all(|node| DECORATIVE_PALETTE.contains(&node.color))
        );
    }
}
