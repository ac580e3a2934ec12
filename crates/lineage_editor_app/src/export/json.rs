// SPDX-License-Identifier: MIT OR Apache-2.0
//! Persisted JSON document format.
//!
//! The on-disk shape is `{projectName, nodes, edges, timestamp,
//! version}`. The loader is lenient: any object carrying `nodes` and
//! `edges` arrays is accepted, everything else falls back to defaults.

use chrono::{DateTime, Utc};
use lineage_editor_graph::{Edge, Graph, Node, Project};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version tag written into saved documents
pub const FORMAT_VERSION: &str = "3.0";

/// Project name used when a loaded document has none
pub const FALLBACK_PROJECT_NAME: &str = "Loaded Project";

/// Error reading or writing a project document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The file is not a valid project document
    #[error("invalid project document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The file could not be read or written
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wire shape of a persisted project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDocument {
    /// Project name; optional on load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// All nodes
    pub nodes: Vec<Node>,
    /// All edges
    pub edges: Vec<Edge>,
    /// When the document was written; optional on load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Format version; optional on load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl FlowDocument {
    /// Snapshot a project into its wire shape, stamped with now
    pub fn from_project(project: &Project) -> Self {
        Self {
            project_name: Some(project.name.clone()),
            nodes: project.graph.nodes().cloned().collect(),
            edges: project.graph.edges().cloned().collect(),
            timestamp: Some(Utc::now()),
            version: Some(FORMAT_VERSION.to_string()),
        }
    }

    /// Rebuild a project from the wire shape, applying defaults
    pub fn into_project(self) -> Project {
        Project {
            name: self
                .project_name
                .unwrap_or_else(|| FALLBACK_PROJECT_NAME.to_string()),
            graph: Graph::from_parts(self.nodes, self.edges),
        }
    }
}

/// Serialize a project to its persisted JSON document
pub fn to_json(project: &Project) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(&FlowDocument::from_project(project))?)
}

/// Parse a persisted JSON document into a project.
///
/// Fails without producing a project on malformed JSON or when the
/// `nodes`/`edges` arrays are missing; the caller's state stays
/// untouched.
pub fn from_json(raw: &str) -> Result<Project, DocumentError> {
    let document: FlowDocument = serde_json::from_str(raw)?;
    Ok(document.into_project())
}

/// Write a project document to a file
pub fn save_to(project: &Project, path: &Path) -> Result<(), DocumentError> {
    std::fs::write(path, to_json(project)?)?;
    tracing::info!(path = %path.display(), "saved project document");
    Ok(())
}

/// Load a project document from a file
pub fn load_from(path: &Path) -> Result<Project, DocumentError> {
    let raw = std::fs::read_to_string(path)?;
    let project = from_json(&raw)?;
    tracing::info!(
        path = %path.display(),
        nodes = project.graph.node_count(),
        "loaded project document"
    );
    Ok(project)
}
