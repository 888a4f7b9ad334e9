//! Applied → status flow for Sankey-style diagrams.

use std::fmt;

use serde::Serialize;

use super::analytics::tally;
use super::domain::{status_key, ApplicationRecord};

/// Source node of every flow edge.
pub const FLOW_SOURCE: &str = "Applied";

/// Diagram label for the `Applied → Applied` target, so the two nodes stay apart.
pub const APPLIED_TARGET_LABEL: &str = "Applied/No update yet";

/// One weighted `Applied → status` link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowEdge {
    pub source: String,
    pub target: String,
    pub weight: u64,
}

impl fmt::Display for FlowEdge {
    /// SankeyMATIC flow line: `Applied [3] Rejected`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.source, self.weight, self.target)
    }
}

/// Count records per trimmed status, one edge per distinct status in first-seen order.
pub fn summarize_flow(records: &[ApplicationRecord]) -> Vec<FlowEdge> {
    let statuses = records
        .iter()
        .map(|record| status_key(record.status.as_deref()));

    tally(statuses)
        .into_iter()
        .map(|(target, count)| FlowEdge {
            source: FLOW_SOURCE.to_string(),
            target,
            weight: count as u64,
        })
        .collect()
}

/// Plain-text export, one flow line per edge. Empty when there are no edges.
pub fn to_text(edges: &[FlowEdge]) -> String {
    edges
        .iter()
        .map(FlowEdge::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Node/link shape consumed by Sankey renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowDiagram {
    pub labels: Vec<String>,
    pub links: Vec<FlowLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: u64,
}

impl FlowDiagram {
    /// Build the diagram; `None` when there is nothing to draw.
    pub fn from_edges(edges: &[FlowEdge]) -> Option<Self> {
        if edges.is_empty() {
            return None;
        }

        let mut diagram = Self {
            labels: vec![FLOW_SOURCE.to_string()],
            links: Vec::with_capacity(edges.len()),
        };

        for edge in edges {
            let source = diagram.node(&edge.source);
            let target_label = if edge.target == FLOW_SOURCE {
                APPLIED_TARGET_LABEL
            } else {
                edge.target.as_str()
            };
            let target = diagram.node(target_label);
            diagram.links.push(FlowLink {
                source,
                target,
                value: edge.weight,
            });
        }

        Some(diagram)
    }

    fn node(&mut self, label: &str) -> usize {
        if let Some(idx) = self.labels.iter().position(|existing| existing == label) {
            return idx;
        }
        self.labels.push(label.to_string());
        self.labels.len() - 1
    }
}

/// Everything a flow view needs: raw edges, the diagram shape, and the text export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowReport {
    pub edges: Vec<FlowEdge>,
    pub diagram: Option<FlowDiagram>,
    pub text: String,
}

impl FlowReport {
    pub fn from_records(records: &[ApplicationRecord]) -> Self {
        let edges = summarize_flow(records);
        let diagram = FlowDiagram::from_edges(&edges);
        let text = to_text(&edges);
        Self {
            edges,
            diagram,
            text,
        }
    }
}
