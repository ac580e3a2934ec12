// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the pipeline diagram model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of a node on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Position {
    /// Create a position from coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Medallion stage tag attached to a node for informational grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Raw ingested data
    Bronze,
    /// Cleaned and conformed data
    Silver,
    /// Curated, consumption-ready data
    Gold,
}

impl Layer {
    /// Lowercase tag as it appears in documents and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Bronze => "bronze",
            Layer::Silver => "silver",
            Layer::Gold => "gold",
        }
    }
}

/// Source system variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSystem {
    Teradata,
    Postgres,
    Synapse,
}

impl SourceSystem {
    /// Get display name for this system
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceSystem::Teradata => "Teradata",
            SourceSystem::Postgres => "PostgreSQL",
            SourceSystem::Synapse => "Synapse",
        }
    }

    /// Lowercase key used in drag payloads and default metadata
    pub fn key(&self) -> &'static str {
        match self {
            SourceSystem::Teradata => "teradata",
            SourceSystem::Postgres => "postgres",
            SourceSystem::Synapse => "synapse",
        }
    }
}

/// Target system variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSystem {
    Databricks,
    Sql,
    Postgres,
}

impl TargetSystem {
    /// Get display name for this system
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetSystem::Databricks => "Databricks",
            TargetSystem::Sql => "SQL Server",
            TargetSystem::Postgres => "PostgreSQL",
        }
    }

    /// Lowercase key used in drag payloads and default metadata
    pub fn key(&self) -> &'static str {
        match self {
            TargetSystem::Databricks => "databricks",
            TargetSystem::Sql => "sql",
            TargetSystem::Postgres => "postgres",
        }
    }
}

/// Connection metadata carried by source and target nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionDetails {
    /// Table read from or written to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Host name of the system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Database name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Port, where the system needs one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Column names, when known
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schema: Vec<String>,
}

/// Metadata carried by transform nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformDetails {
    /// Transformation logic as authored text (SQL, PySpark, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformation_logic: Option<String>,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Output column names, when known
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schema: Vec<String>,
}

/// Node kind with its kind-specific metadata
///
/// Modeled as a tagged union so each kind carries exactly the fields
/// that apply to it, rather than one loosely-typed metadata bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    /// Data source system
    Source {
        /// Which source system
        system: SourceSystem,
        /// Connection metadata
        details: ConnectionDetails,
    },
    /// Transformation step
    Transform {
        /// Transformation metadata
        details: TransformDetails,
    },
    /// Data target system
    Target {
        /// Which target system
        system: TargetSystem,
        /// Connection metadata
        details: ConnectionDetails,
    },
}

impl NodeKind {
    /// Human-readable label for the kind/system combination
    pub fn type_label(&self) -> String {
        match self {
            NodeKind::Source { system, .. } => format!("{} Source", system.display_name()),
            NodeKind::Transform { .. } => "Transform".to_string(),
            NodeKind::Target { system, .. } => format!("{} Target", system.display_name()),
        }
    }
}

/// A node instance in the diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Position on the canvas
    pub position: Position,
    /// Display label (can be customized)
    pub label: String,
    /// Medallion layer tag
    pub layer: Layer,
    /// Kind and kind-specific metadata
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    /// Create a node with explicit fields
    pub fn new(label: impl Into<String>, layer: Layer, kind: NodeKind, position: Position) -> Self {
        Self {
            id: NodeId::new(),
            position,
            label: label.into(),
            layer,
            kind,
        }
    }

    /// Merge a partial update into this node.
    ///
    /// Metadata fields that do not apply to the node's kind are ignored.
    pub fn apply(&mut self, patch: &NodePatch) {
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(layer) = patch.layer {
            self.layer = layer;
        }
        match &mut self.kind {
            NodeKind::Source { details, .. } | NodeKind::Target { details, .. } => {
                if let Some(v) = &patch.table_name {
                    details.table_name = Some(v.clone());
                }
                if let Some(v) = &patch.description {
                    details.description = Some(v.clone());
                }
                if let Some(v) = &patch.host {
                    details.host = Some(v.clone());
                }
                if let Some(v) = &patch.database {
                    details.database = Some(v.clone());
                }
                if let Some(v) = patch.port {
                    details.port = Some(v);
                }
                if let Some(v) = &patch.schema {
                    details.schema = v.clone();
                }
            }
            NodeKind::Transform { details } => {
                if let Some(v) = &patch.transformation_logic {
                    details.transformation_logic = Some(v.clone());
                }
                if let Some(v) = &patch.description {
                    details.description = Some(v.clone());
                }
                if let Some(v) = &patch.schema {
                    details.schema = v.clone();
                }
            }
        }
    }
}

/// Partial update applied to a node's label, layer, and metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodePatch {
    /// New display label
    pub label: Option<String>,
    /// New medallion layer
    pub layer: Option<Layer>,
    /// New table name (source/target nodes)
    pub table_name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New host (source/target nodes)
    pub host: Option<String>,
    /// New database (source/target nodes)
    pub database: Option<String>,
    /// New port (source/target nodes)
    pub port: Option<u16>,
    /// New transformation logic (transform nodes)
    pub transformation_logic: Option<String>,
    /// New schema column list
    pub schema: Option<Vec<String>>,
}

/// Palette entry instantiating a node with kind/system defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTemplate {
    /// Source node of the given system
    Source(SourceSystem),
    /// Transform node
    Transform,
    /// Target node of the given system
    Target(TargetSystem),
}

impl NodeTemplate {
    /// Instantiate a node at the given position with default label,
    /// layer, and metadata for the template's kind
    pub fn instantiate(&self, position: Position) -> Node {
        match self {
            NodeTemplate::Source(system) => Node::new(
                format!("New {} Source", system.display_name()),
                Layer::Bronze,
                NodeKind::Source {
                    system: *system,
                    details: ConnectionDetails {
                        description: Some(format!("New {} source system", system.key())),
                        table_name: Some(format!("{}_table", system.key())),
                        host: Some("localhost".to_string()),
                        database: Some("default_db".to_string()),
                        port: (*system == SourceSystem::Postgres).then_some(5432),
                        schema: Vec::new(),
                    },
                },
                position,
            ),
            NodeTemplate::Transform => Node::new(
                "New Transform",
                Layer::Silver,
                NodeKind::Transform {
                    details: TransformDetails {
                        description: Some("New data transformation".to_string()),
                        transformation_logic: Some(
                            "# Add your transformation logic here".to_string(),
                        ),
                        schema: Vec::new(),
                    },
                },
                position,
            ),
            NodeTemplate::Target(system) => Node::new(
                format!("New {} Target", system.display_name()),
                Layer::Gold,
                NodeKind::Target {
                    system: *system,
                    details: ConnectionDetails {
                        description: Some(format!("New {} target system", system.key())),
                        table_name: Some(format!("{}_target", system.key())),
                        host: Some("localhost".to_string()),
                        database: Some("target_db".to_string()),
                        port: None,
                        schema: Vec::new(),
                    },
                },
                position,
            ),
        }
    }
}
