use tracing::debug;

use crate::encode::{NodeColoring, VisualGraph, encode};
use crate::layout::{LayoutConfig, layout_with};
use crate::ppi::{Dataset, FilteredResult, InteractionGraph, Query, build, filter};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub layout: LayoutConfig,
    pub coloring: NodeColoring,
}

impl PipelineOptions {
    /// Same options with the spring simulation skipped. Nodes keep their seeded
    /// starting spots, which is all a view that never draws them needs.
    pub fn without_layout(self) -> Self {
        Self {
            layout: LayoutConfig {
                iterations: 0,
                ..self.layout
            },
            ..self
        }
    }
}

/// Everything derived from one query. Discarded when the next query runs.
#[derive(Clone, Debug)]
pub struct QueryView<'a> {
    pub rows: FilteredResult<'a>,
    pub graph: InteractionGraph,
    pub visual: VisualGraph,
}

#[derive(Clone, Debug)]
pub enum QueryOutcome<'a> {
    /// Nothing matched; callers show an empty-state notice.
    Empty,
    Ready(QueryView<'a>),
}

impl<'a> QueryOutcome<'a> {
    pub fn view(&self) -> Option<&QueryView<'a>> {
        match self {
            Self::Empty => None,
            Self::Ready(view) => Some(view),
        }
    }
}

/// Runs filter, graph build, layout and encoding for one query.
pub fn handle_query<'a>(
    dataset: &'a Dataset,
    query: &Query,
    options: &PipelineOptions,
) -> QueryOutcome<'a> {
    let rows = filter(dataset, query);
    if rows.is_empty() {
        debug!(query = %query.describe(), "query matched no interactions");
        return QueryOutcome::Empty;
    }

    let graph = build(&rows);
    let layout = layout_with(&graph, &options.layout);
    let visual = encode(&graph, &layout, &rows, options.coloring);
    debug!(
        query = %query.describe(),
        rows = rows.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "query evaluated"
    );

    QueryOutcome::Ready(QueryView {
        rows,
        graph,
        visual,
    })
}
