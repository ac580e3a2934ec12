// SPDX-License-Identifier: MIT OR Apache-2.0
//! Standalone SVG rendering of a project.
//!
//! Produces a self-contained document: embedded style rules, a grid
//! background, a directional arrowhead marker, one `<path>` per edge
//! and one `<g>` per node, plus a title/timestamp footer. Edges are
//! drawn first so nodes sit on top of them.

use chrono::{NaiveDate, Utc};
use lineage_editor_graph::{Node, NodeKind, Project, SourceSystem, TargetSystem};

/// Rendered node width
pub const NODE_WIDTH: f32 = 180.0;
/// Rendered node height
pub const NODE_HEIGHT: f32 = 80.0;
/// Padding around the diagram bounding box
pub const PADDING: f32 = 50.0;

/// Error rendering a project to SVG
#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    /// Nothing to draw: the user should add nodes first
    #[error("no nodes to export; add some nodes to the flow first")]
    EmptyDiagram,
}

/// Render a project to a standalone SVG document.
///
/// Fails without producing output when the node collection is empty.
pub fn to_svg(project: &Project) -> Result<String, SvgError> {
    to_svg_dated(project, Utc::now().date_naive())
}

/// Render with an explicit generation date in the footer
pub fn to_svg_dated(project: &Project, date: NaiveDate) -> Result<String, SvgError> {
    let graph = &project.graph;
    if graph.node_count() == 0 {
        return Err(SvgError::EmptyDiagram);
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for node in graph.nodes() {
        min_x = min_x.min(node.position.x);
        min_y = min_y.min(node.position.y);
        max_x = max_x.max(node.position.x + NODE_WIDTH);
        max_y = max_y.max(node.position.y + NODE_HEIGHT);
    }
    min_x -= PADDING;
    min_y -= PADDING;
    max_x += PADDING;
    max_y += PADDING;
    let width = max_x - min_x;
    let height = max_y - min_y;

    let mut svg = format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{width}" height="{height}" viewBox="{min_x} {min_y} {width} {height}"
     xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
  <defs>
    <style>
      .node-text {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; font-size: 14px; font-weight: 600; }}
      .node-subtext {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; font-size: 11px; opacity: 0.7; }}
      .edge-path {{ stroke-width: 2; fill: none; }}
    </style>
    <marker id="arrowhead" markerWidth="10" markerHeight="7" refX="9" refY="3.5" orient="auto">
      <polygon points="0 0, 10 3.5, 0 7" fill="#6b7280" />
    </marker>
    <pattern id="grid" width="20" height="20" patternUnits="userSpaceOnUse">
      <path d="M 20 0 L 0 0 0 20" fill="none" stroke="#e2e8f0" stroke-width="0.5"/>
    </pattern>
  </defs>
  <rect x="{min_x}" y="{min_y}" width="{width}" height="{height}" fill="#f8fafc" stroke="#e2e8f0" stroke-width="1"/>
  <rect x="{min_x}" y="{min_y}" width="{width}" height="{height}" fill="url(#grid)" opacity="0.5"/>
"##
    );

    for edge in graph.edges() {
        let (Some(source), Some(target)) = (graph.node(edge.source), graph.node(edge.target))
        else {
            continue;
        };
        // Source's right mid-edge to target's left mid-edge.
        let sx = source.position.x + NODE_WIDTH;
        let sy = source.position.y + NODE_HEIGHT / 2.0;
        let tx = target.position.x;
        let ty = target.position.y + NODE_HEIGHT / 2.0;
        let cx = sx + (tx - sx) * 0.5;

        svg.push_str(&format!(
            "  <path d=\"M {sx} {sy} C {cx} {sy}, {cx} {ty}, {tx} {ty}\" \
             class=\"edge-path\" stroke=\"{stroke}\" marker-end=\"url(#arrowhead)\"/>\n",
            stroke = edge.color,
        ));
    }

    for node in graph.nodes() {
        let x = node.position.x;
        let y = node.position.y;
        let (fill, stroke) = node_palette(node);

        svg.push_str(&format!(
            r##"  <g>
    <rect x="{x}" y="{y}" width="{NODE_WIDTH}" height="{NODE_HEIGHT}" fill="{fill}" stroke="{stroke}" stroke-width="2" rx="8"/>
    <text x="{label_x}" y="{label_y}" class="node-text" fill="#1f2937">{label}</text>
    <text x="{label_x}" y="{type_y}" class="node-subtext" fill="#6b7280">{type_label}</text>
    <text x="{label_x}" y="{layer_y}" class="node-subtext" fill="#6b7280">{layer} Layer</text>
  </g>
"##,
            label_x = x + 12.0,
            label_y = y + 25.0,
            type_y = y + 45.0,
            layer_y = y + 60.0,
            label = escape_text(&node.label),
            type_label = escape_text(&node.kind.type_label()),
            layer = node.layer.as_str(),
        ));
    }

    svg.push_str(&format!(
        r#"  <text x="{title_x}" y="{title_y}" style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; font-size: 18px; font-weight: bold; fill: #1f2937;">{title}</text>
  <text x="{title_x}" y="{sub_y}" style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; font-size: 12px; fill: #6b7280;">Generated on {date}</text>
</svg>"#,
        title_x = min_x + 20.0,
        title_y = min_y + 30.0,
        sub_y = min_y + 50.0,
        title = escape_text(&project.name),
    ));

    Ok(svg)
}

/// Fill and stroke colors keyed by node kind/system
fn node_palette(node: &Node) -> (&'static str, &'static str) {
    match &node.kind {
        NodeKind::Source { system, .. } => match system {
            SourceSystem::Teradata => ("#fed7aa", "#fb923c"),
            SourceSystem::Postgres => ("#dbeafe", "#60a5fa"),
            SourceSystem::Synapse => ("#e9d5ff", "#a78bfa"),
        },
        NodeKind::Target { system, .. } => match system {
            TargetSystem::Databricks => ("#fecaca", "#f87171"),
            TargetSystem::Sql => ("#dcfce7", "#4ade80"),
            TargetSystem::Postgres => ("#dbeafe", "#60a5fa"),
        },
        NodeKind::Transform { .. } => ("#dbeafe", "#60a5fa"),
    }
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_editor_graph::{NodeTemplate, Position};

    #[test]
    fn test_empty_diagram_is_rejected() {
        let project = Project::new("Empty");
        assert!(matches!(to_svg(&project), Err(SvgError::EmptyDiagram)));
    }

    #[test]
    fn test_demo_project_renders_all_elements() {
        let svg = to_svg(&Project::demo()).unwrap();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<g>").count(), 4);
        assert_eq!(svg.matches("marker-end=\"url(#arrowhead)\"").count(), 3);
        assert!(svg.contains("url(#grid)"));
        assert!(svg.contains("Data Pipeline Flow"));
        assert!(svg.contains("Teradata Source"));
        assert!(svg.contains("Databricks Target"));
        assert!(svg.contains("bronze Layer"));
        // Edge colors come from the stored per-edge style.
        assert!(svg.contains("stroke=\"#10b981\""));
    }

    #[test]
    fn test_bounding_box_covers_nodes_with_padding() {
        let mut project = Project::new("Bounds");
        project
            .graph
            .spawn(NodeTemplate::Transform, Position::new(100.0, 200.0));

        let svg = to_svg(&project).unwrap();
        let view_box = format!(
            "viewBox=\"{} {} {} {}\"",
            100.0 - PADDING,
            200.0 - PADDING,
            NODE_WIDTH + 2.0 * PADDING,
            NODE_HEIGHT + 2.0 * PADDING,
        );
        assert!(svg.contains(&view_box), "missing {view_box}");
    }

    #[test]
    fn test_labels_are_escaped() {
        let mut project = Project::new("A <wild> & \"quoted\" name");
        let id = project
            .graph
            .spawn(NodeTemplate::Transform, Position::default());
        project.graph.node_mut(id).unwrap().label = "x < y & z".to_string();

        let svg = to_svg(&project).unwrap();
        assert!(svg.contains("x &lt; y &amp; z"));
        assert!(svg.contains("A &lt;wild&gt; &amp; &quot;quoted&quot; name"));
    }

    #[test]
    fn test_footer_shows_generation_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let mut project = Project::new("Dated");
        project.graph.spawn(NodeTemplate::Transform, Position::default());

        let svg = to_svg_dated(&project, date).unwrap();
        assert!(svg.contains("Generated on 2026-08-30"));
    }
}
