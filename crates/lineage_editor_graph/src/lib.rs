// SPDX-License-Identifier: MIT OR Apache-2.0
//! Data-pipeline diagram model for Lineage Editor.
//!
//! This crate provides the canonical graph state behind the editor:
//! - Typed source/transform/target nodes with per-kind metadata
//! - Styled directed edges with referential integrity
//! - Palette templates for instantiating nodes with sensible defaults
//! - The project container used for save/load/export
//!
//! ## Architecture
//!
//! The model is a flat pair of id-keyed collections mutated through
//! direct operations. Every edge must reference existing nodes; deleting
//! a node cascades to its incident edges. Rendering and interaction
//! layers live elsewhere and only call the operations defined here.

pub mod edge;
pub mod graph;
pub mod node;
pub mod project;

pub use edge::{Color, Edge, EdgeId, EdgeStyle, ParseColorError};
pub use graph::{ConnectError, Graph};
pub use node::{
    ConnectionDetails, Layer, Node, NodeId, NodeKind, NodePatch, NodeTemplate, Position,
    SourceSystem, TargetSystem, TransformDetails,
};
pub use project::Project;
