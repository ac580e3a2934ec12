// SPDX-License-Identifier: MIT OR Apache-2.0
//! Project container: the unit of save/load/export.

use crate::edge::EdgeStyle;
use crate::graph::Graph;
use crate::node::{
    ConnectionDetails, Layer, Node, NodeKind, Position, SourceSystem, TargetSystem,
    TransformDetails,
};
use serde::{Deserialize, Serialize};

/// Default name for a freshly created project
pub const DEFAULT_PROJECT_NAME: &str = "New Project";

/// A named diagram: project name plus its graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project name
    pub name: String,
    /// Node/edge collections
    pub graph: Graph,
}

impl Project {
    /// Create a new empty project with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: Graph::new(),
        }
    }

    /// Seeded demo project: two sources feeding a transform that loads
    /// an analytics target
    pub fn demo() -> Self {
        let mut graph = Graph::new();

        let customers = graph.add_node(Node::new(
            "Customer Database",
            Layer::Bronze,
            NodeKind::Source {
                system: SourceSystem::Postgres,
                details: ConnectionDetails {
                    table_name: Some("customers".to_string()),
                    description: Some("Customer data from PostgreSQL database".to_string()),
                    host: Some("prod-db.company.com".to_string()),
                    database: Some("crm_db".to_string()),
                    port: Some(5432),
                    schema: Vec::new(),
                },
            },
            Position::new(50.0, 100.0),
        ));

        let sales = graph.add_node(Node::new(
            "Sales Data Warehouse",
            Layer::Bronze,
            NodeKind::Source {
                system: SourceSystem::Teradata,
                details: ConnectionDetails {
                    table_name: Some("sales_transactions".to_string()),
                    description: Some("Historical sales data from Teradata warehouse".to_string()),
                    host: Some("tdw-prod.company.com".to_string()),
                    database: Some("sales_dw".to_string()),
                    port: None,
                    schema: Vec::new(),
                },
            },
            Position::new(50.0, 250.0),
        ));

        let integration = graph.add_node(Node::new(
            "Data Integration",
            Layer::Silver,
            NodeKind::Transform {
                details: TransformDetails {
                    transformation_logic: Some(
                        "# Join customer and sales data\n\
                         df_integrated = df_customers.join(\n\
                         \x20   df_sales,\n\
                         \x20   df_customers.customer_id == df_sales.customer_id,\n\
                         \x20   'inner'\n\
                         )"
                            .to_string(),
                    ),
                    description: Some(
                        "Integrate customer and sales data with validation".to_string(),
                    ),
                    schema: Vec::new(),
                },
            },
            Position::new(400.0, 175.0),
        ));

        let analytics = graph.add_node(Node::new(
            "Analytics Platform",
            Layer::Gold,
            NodeKind::Target {
                system: TargetSystem::Databricks,
                details: ConnectionDetails {
                    table_name: Some("customer_analytics".to_string()),
                    description: Some("Processed data for analytics in Databricks".to_string()),
                    host: Some("databricks-workspace.company.com".to_string()),
                    database: Some("analytics_db".to_string()),
                    port: None,
                    schema: Vec::new(),
                },
            },
            Position::new(750.0, 175.0),
        ));

        let mut project = Self {
            name: "Data Pipeline Flow".to_string(),
            graph,
        };

        for (source, target, color) in [
            (customers, integration, "#10b981"),
            (sales, integration, "#f59e0b"),
            (integration, analytics, "#3b82f6"),
        ] {
            if let Ok(edge_id) = project.graph.connect(source, target) {
                if let Ok(color) = color.parse() {
                    project.graph.update_edge_style(edge_id, color, EdgeStyle::Curved);
                }
            }
        }

        project
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT_NAME)
    }
}
