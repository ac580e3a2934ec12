// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canonical graph state: node and edge collections with referential
//! integrity between them.

use crate::edge::{Color, Edge, EdgeId, EdgeStyle};
use crate::node::{Node, NodeId, NodePatch, NodeTemplate, Position};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The canonical node/edge collections of a diagram
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from loaded node and edge lists.
    ///
    /// Edges with a dangling endpoint are discarded so the referential
    /// integrity invariant holds from the start.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.nodes.insert(node.id, node);
        }
        for edge in edges {
            if graph.nodes.contains_key(&edge.source) && graph.nodes.contains_key(&edge.target) {
                graph.edges.insert(edge.id, edge);
            } else {
                tracing::warn!(edge = ?edge.id, "dropping edge with missing endpoint");
            }
        }
        graph
    }

    /// Add an existing node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Instantiate a palette template at the given position and add it
    pub fn spawn(&mut self, template: NodeTemplate, position: Position) -> NodeId {
        let node = template.instantiate(position);
        tracing::debug!(node = ?node.id, label = %node.label, "spawned node");
        self.add_node(node)
    }

    /// Merge a partial update into a node.
    ///
    /// Unknown ids are a silent no-op: they indicate a stale UI
    /// reference, not a user error. Returns whether a node was updated.
    pub fn update_node(&mut self, node_id: NodeId, patch: &NodePatch) -> bool {
        match self.nodes.get_mut(&node_id) {
            Some(node) => {
                node.apply(patch);
                true
            }
            None => {
                tracing::debug!(node = ?node_id, "update for unknown node ignored");
                false
            }
        }
    }

    /// Remove a node and every edge touching it
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.edges.retain(|_, e| !e.involves_node(node_id));
        self.nodes.shift_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Check whether a node exists
    pub fn contains_node(&self, node_id: NodeId) -> bool {
        self.nodes.contains_key(&node_id)
    }

    /// Get all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Connect two nodes with a default-styled edge.
    ///
    /// Rejected without creating an edge when either endpoint is
    /// missing.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> Result<EdgeId, ConnectError> {
        if !self.nodes.contains_key(&source) {
            return Err(ConnectError::NodeNotFound(source));
        }
        if !self.nodes.contains_key(&target) {
            return Err(ConnectError::NodeNotFound(target));
        }

        let edge = Edge::new(source, target);
        let id = edge.id;
        self.edges.insert(id, edge);
        Ok(id)
    }

    /// Restyle an edge. No-op if the edge is unknown; returns whether an
    /// edge was updated.
    pub fn update_edge_style(&mut self, edge_id: EdgeId, color: Color, style: EdgeStyle) -> bool {
        match self.edges.get_mut(&edge_id) {
            Some(edge) => {
                edge.color = color;
                edge.style = style;
                true
            }
            None => {
                tracing::debug!(edge = ?edge_id, "restyle for unknown edge ignored");
                false
            }
        }
    }

    /// Remove an edge
    pub fn remove_edge(&mut self, edge_id: EdgeId) -> Option<Edge> {
        self.edges.shift_remove(&edge_id)
    }

    /// Get an edge by ID
    pub fn edge(&self, edge_id: EdgeId) -> Option<&Edge> {
        self.edges.get(&edge_id)
    }

    /// Check whether an edge exists
    pub fn contains_edge(&self, edge_id: EdgeId) -> bool {
        self.edges.contains_key(&edge_id)
    }

    /// Get all edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Get edges touching a node
    pub fn edges_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.values().filter(move |e| e.involves_node(node_id))
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Error when creating an edge
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// One of the endpoints does not exist
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SourceSystem;

    fn two_node_graph() -> (Graph, NodeId, NodeId) {
        let mut graph = Graph::new();
        let a = graph.spawn(NodeTemplate::Source(SourceSystem::Postgres), Position::default());
        let b = graph.spawn(NodeTemplate::Transform, Position::new(400.0, 175.0));
        (graph, a, b)
    }

    #[test]
    fn test_delete_node_cascades_to_edges() {
        let (mut graph, a, b) = two_node_graph();
        graph.connect(a, b).unwrap();
        assert_eq!(graph.edge_count(), 1);

        graph.remove_node(a);
        assert_eq!(graph.node_count(), 1);
        assert!(graph.contains_node(b));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_connect_rejects_missing_endpoint() {
        let (mut graph, a, _) = two_node_graph();
        let missing = NodeId::new();
        assert!(graph.connect(missing, a).is_err());
        assert!(graph.connect(a, missing).is_err());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_edges_never_dangle_across_mutations() {
        let (mut graph, a, b) = two_node_graph();
        let c = graph.spawn(NodeTemplate::Transform, Position::new(100.0, 100.0));
        graph.connect(a, b).unwrap();
        graph.connect(b, c).unwrap();
        graph.connect(a, c).unwrap();

        graph.remove_node(b);
        for edge in graph.edges() {
            assert!(graph.contains_node(edge.source));
            assert!(graph.contains_node(edge.target));
        }
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_edges_for_node_lists_incident_edges() {
        let (mut graph, a, b) = two_node_graph();
        let c = graph.spawn(NodeTemplate::Transform, Position::new(100.0, 100.0));
        let ab = graph.connect(a, b).unwrap();
        let bc = graph.connect(b, c).unwrap();
        graph.connect(a, c).unwrap();

        let incident: Vec<_> = graph.edges_for_node(b).map(|e| e.id).collect();
        assert_eq!(incident, vec![ab, bc]);
        assert_eq!(graph.edges_for_node(c).count(), 2);
    }

    #[test]
    fn test_update_unknown_node_is_noop() {
        let (mut graph, _, _) = two_node_graph();
        let before = graph.clone();
        assert!(!graph.update_node(NodeId::new(), &NodePatch::default()));
        assert_eq!(graph, before);
    }

    #[test]
    fn test_update_edge_style() {
        let (mut graph, a, b) = two_node_graph();
        let edge_id = graph.connect(a, b).unwrap();

        let green: Color = "#10b981".parse().unwrap();
        assert!(graph.update_edge_style(edge_id, green, EdgeStyle::Step));
        let edge = graph.edge(edge_id).unwrap();
        assert_eq!(edge.color, green);
        assert_eq!(edge.style, EdgeStyle::Step);

        assert!(!graph.update_edge_style(EdgeId::new(), green, EdgeStyle::Straight));
    }

    #[test]
    fn test_from_parts_drops_dangling_edges() {
        let keep = NodeTemplate::Transform.instantiate(Position::default());
        let keep_id = keep.id;
        let gone = NodeTemplate::Transform.instantiate(Position::default());

        let good = Edge::new(keep_id, keep_id);
        let dangling = Edge::new(keep_id, gone.id);

        let graph = Graph::from_parts(vec![keep], vec![good.clone(), dangling]);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge(good.id));
    }
}
