// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor state management.
//!
//! This module contains the core editor state: the canonical project,
//! the selection/edit-mode controller, and the undo/redo wiring. Every
//! mutating operation schedules a debounced history snapshot so
//! rapid-fire UI updates coalesce into one settled state.

use crate::commands::EditorCommand;
use crate::history::HistoryStore;
use lineage_editor_graph::{
    Color, ConnectError, EdgeId, EdgeStyle, Node, NodeId, NodePatch, NodeTemplate, Position,
    Project,
};
use std::time::{Duration, Instant};

/// Delay before a settled snapshot is captured after a mutation
pub const SNAPSHOT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Inspector mode for a selected node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeInspector {
    /// Inspector shows the node read-only
    ReadOnly,
    /// Inspector edits a scratch copy of the node
    Editing(Node),
}

/// What is currently active for inspection/editing.
///
/// At most one inspector panel is open at a time: selecting a node
/// closes the edge panel and vice versa.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    /// Nothing selected
    #[default]
    Idle,
    /// A node is selected
    Node {
        /// Selected node
        id: NodeId,
        /// Read-only or editing a scratch copy
        inspector: NodeInspector,
    },
    /// An edge is selected (styling panel)
    Edge {
        /// Selected edge
        id: EdgeId,
    },
}

impl Selection {
    /// Selected node id, if a node is selected
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Selection::Node { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Selected edge id, if an edge is selected
    pub fn edge_id(&self) -> Option<EdgeId> {
        match self {
            Selection::Edge { id } => Some(*id),
            _ => None,
        }
    }
}

/// Main editor state
#[derive(Debug, Clone)]
pub struct EditorState {
    /// Canonical project state
    pub project: Project,
    /// Undo/redo history
    pub history: HistoryStore,
    selection: Selection,
    snapshot_due: Option<Instant>,
    dirty: bool,
}

impl EditorState {
    /// Create editor state around the given project
    pub fn new(project: Project) -> Self {
        Self {
            history: HistoryStore::new(project.clone()),
            project,
            selection: Selection::Idle,
            snapshot_due: None,
            dirty: false,
        }
    }

    /// Current selection
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether the project has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ---- selection / edit mode ----------------------------------------

    /// Handle a click on a node. Opens the node inspector, in edit mode
    /// when `auto_edit` is set, and closes any edge panel. Clicks on
    /// unknown ids are stale and ignored.
    pub fn select_node(&mut self, id: NodeId, auto_edit: bool) {
        let Some(node) = self.project.graph.node(id) else {
            tracing::debug!(node = ?id, "click on unknown node ignored");
            return;
        };
        let inspector = if auto_edit {
            NodeInspector::Editing(node.clone())
        } else {
            NodeInspector::ReadOnly
        };
        self.selection = Selection::Node { id, inspector };
    }

    /// Handle a click on an edge. Opens the styling panel and deselects
    /// any node.
    pub fn select_edge(&mut self, id: EdgeId) {
        if !self.project.graph.contains_edge(id) {
            tracing::debug!(edge = ?id, "click on unknown edge ignored");
            return;
        }
        self.selection = Selection::Edge { id };
    }

    /// Handle a click on empty canvas: close all panels
    pub fn clear_selection(&mut self) {
        self.selection = Selection::Idle;
    }

    /// Enter edit mode on the selected node, snapshotting its current
    /// fields into a scratch copy
    pub fn begin_edit(&mut self) {
        if let Selection::Node { id, inspector } = &mut self.selection {
            if matches!(inspector, NodeInspector::ReadOnly) {
                if let Some(node) = self.project.graph.node(*id) {
                    *inspector = NodeInspector::Editing(node.clone());
                }
            }
        }
    }

    /// Scratch copy under edit, for the inspector panel to mutate
    pub fn draft_mut(&mut self) -> Option<&mut Node> {
        match &mut self.selection {
            Selection::Node {
                inspector: NodeInspector::Editing(draft),
                ..
            } => Some(draft),
            _ => None,
        }
    }

    /// Commit the scratch copy back to the node and return to read-only
    /// inspection.
    ///
    /// The draft replaces the node's editable fields wholesale: a field
    /// the user cleared in the inspector stays cleared, which a partial
    /// merge could not express.
    pub fn commit_edit(&mut self) {
        let Selection::Node { id, inspector } = &mut self.selection else {
            return;
        };
        let NodeInspector::Editing(draft) = inspector else {
            return;
        };
        let draft = draft.clone();
        let id = *id;
        *inspector = NodeInspector::ReadOnly;
        if let Some(node) = self.project.graph.node_mut(id) {
            node.label = draft.label;
            node.layer = draft.layer;
            node.kind = draft.kind;
            self.schedule_snapshot();
        }
    }

    /// Discard the scratch copy without mutating the node
    pub fn cancel_edit(&mut self) {
        if let Selection::Node { inspector, .. } = &mut self.selection {
            if matches!(inspector, NodeInspector::Editing(_)) {
                *inspector = NodeInspector::ReadOnly;
            }
        }
    }

    // ---- graph mutations ----------------------------------------------

    /// Drop a palette template onto the canvas
    pub fn add_node(&mut self, template: NodeTemplate, position: Position) -> NodeId {
        let id = self.project.graph.spawn(template, position);
        self.schedule_snapshot();
        id
    }

    /// Merge a partial update into a node (silent no-op on unknown id)
    pub fn update_node(&mut self, id: NodeId, patch: &NodePatch) {
        if self.project.graph.update_node(id, patch) {
            self.schedule_snapshot();
        }
    }

    /// Delete a node, its incident edges, and its selection if any
    pub fn delete_node(&mut self, id: NodeId) {
        if self.project.graph.remove_node(id).is_none() {
            return;
        }
        if self.selection.node_id() == Some(id) {
            self.selection = Selection::Idle;
        }
        tracing::info!(node = ?id, "deleted node");
        self.schedule_snapshot();
    }

    /// Connect two nodes with a default-styled edge
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> Result<EdgeId, ConnectError> {
        let id = self.project.graph.connect(source, target)?;
        self.schedule_snapshot();
        Ok(id)
    }

    /// Restyle an edge (silent no-op on unknown id)
    pub fn update_edge_style(&mut self, id: EdgeId, color: Color, style: EdgeStyle) {
        if self.project.graph.update_edge_style(id, color, style) {
            self.schedule_snapshot();
        }
    }

    /// Delete an edge and its selection if any
    pub fn delete_edge(&mut self, id: EdgeId) {
        if self.project.graph.remove_edge(id).is_none() {
            return;
        }
        if self.selection.edge_id() == Some(id) {
            self.selection = Selection::Idle;
        }
        self.schedule_snapshot();
    }

    /// Rename the project
    pub fn rename_project(&mut self, name: impl Into<String>) {
        self.project.name = name.into();
        self.schedule_snapshot();
    }

    // ---- project lifecycle --------------------------------------------

    /// Start a fresh project: clears the graph, selection, and history
    pub fn new_project(&mut self, name: impl Into<String>) {
        self.project = Project::new(name);
        self.selection = Selection::Idle;
        self.history.clear();
        self.snapshot_due = None;
        self.dirty = false;
        tracing::info!(project = %self.project.name, "created new project");
    }

    /// Replace the canonical state with a loaded project, resetting
    /// selection and history
    pub fn load_project(&mut self, project: Project) {
        tracing::info!(
            project = %project.name,
            nodes = project.graph.node_count(),
            edges = project.graph.edge_count(),
            "loaded project"
        );
        self.project = project;
        self.selection = Selection::Idle;
        self.history.clear();
        self.snapshot_due = None;
        self.dirty = false;
    }

    // ---- undo / redo ---------------------------------------------------

    /// Restore the previous snapshot, replacing canonical state
    /// wholesale. Returns whether anything was restored.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Restore the next snapshot after an undo
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Dispatch a keyboard-driven command
    pub fn handle_command(&mut self, command: EditorCommand) {
        match command {
            EditorCommand::Undo => {
                self.undo();
            }
            EditorCommand::Redo => {
                self.redo();
            }
        }
    }

    fn restore(&mut self, snapshot: Project) {
        self.project = snapshot;
        // The restored state may not contain the selected id anymore.
        let stale = match &self.selection {
            Selection::Node { id, .. } => !self.project.graph.contains_node(*id),
            Selection::Edge { id } => !self.project.graph.contains_edge(*id),
            Selection::Idle => false,
        };
        if stale {
            self.selection = Selection::Idle;
        }
        self.snapshot_due = None;
    }

    // ---- snapshot scheduling ------------------------------------------

    /// Whether a debounced snapshot is pending
    pub fn snapshot_pending(&self) -> bool {
        self.snapshot_due.is_some()
    }

    /// Capture the pending snapshot once its deadline has passed.
    /// Called by the event loop; returns whether a snapshot was taken.
    pub fn poll_snapshot(&mut self, now: Instant) -> bool {
        match self.snapshot_due {
            Some(due) if due <= now => {
                self.snapshot_due = None;
                self.history.save_state(&self.project);
                true
            }
            _ => false,
        }
    }

    /// Capture any pending snapshot immediately
    pub fn flush_snapshot(&mut self) {
        if self.snapshot_due.take().is_some() {
            self.history.save_state(&self.project);
        }
    }

    fn schedule_snapshot(&mut self) {
        // Coalesce: pushing the deadline out replaces any pending one.
        self.snapshot_due = Some(Instant::now() + SNAPSHOT_DEBOUNCE);
        self.dirty = true;
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Project::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_editor_graph::SourceSystem;

    fn editor_with_two_nodes() -> (EditorState, NodeId, NodeId) {
        let mut editor = EditorState::default();
        let a = editor.add_node(
            NodeTemplate::Source(SourceSystem::Postgres),
            Position::new(50.0, 100.0),
        );
        let b = editor.add_node(NodeTemplate::Transform, Position::new(400.0, 175.0));
        editor.flush_snapshot();
        (editor, a, b)
    }

    #[test]
    fn test_delete_source_node_scenario() {
        let (mut editor, a, b) = editor_with_two_nodes();
        editor.connect(a, b).unwrap();

        editor.delete_node(a);
        assert_eq!(editor.project.graph.node_count(), 1);
        assert!(editor.project.graph.contains_node(b));
        assert_eq!(editor.project.graph.edge_count(), 0);
    }

    #[test]
    fn test_delete_selected_node_clears_selection() {
        let (mut editor, a, _) = editor_with_two_nodes();
        editor.select_node(a, false);
        assert_eq!(editor.selection().node_id(), Some(a));

        editor.delete_node(a);
        assert_eq!(*editor.selection(), Selection::Idle);
    }

    #[test]
    fn test_selection_is_mutually_exclusive() {
        let (mut editor, a, b) = editor_with_two_nodes();
        let edge = editor.connect(a, b).unwrap();

        editor.select_node(a, false);
        editor.select_edge(edge);
        assert_eq!(editor.selection().node_id(), None);
        assert_eq!(editor.selection().edge_id(), Some(edge));

        editor.select_node(b, false);
        assert_eq!(editor.selection().edge_id(), None);

        editor.clear_selection();
        assert_eq!(*editor.selection(), Selection::Idle);
    }

    #[test]
    fn test_click_with_auto_edit_opens_editor() {
        let (mut editor, a, _) = editor_with_two_nodes();
        editor.select_node(a, true);
        assert!(editor.draft_mut().is_some());
    }

    #[test]
    fn test_commit_edit_applies_draft() {
        let (mut editor, a, _) = editor_with_two_nodes();
        editor.select_node(a, false);
        editor.begin_edit();

        editor.draft_mut().unwrap().label = "Renamed Source".to_string();
        editor.commit_edit();

        assert_eq!(editor.project.graph.node(a).unwrap().label, "Renamed Source");
        assert!(matches!(
            editor.selection(),
            Selection::Node {
                inspector: NodeInspector::ReadOnly,
                ..
            }
        ));
    }

    #[test]
    fn test_commit_edit_keeps_cleared_fields_cleared() {
        use lineage_editor_graph::NodeKind;

        let (mut editor, a, _) = editor_with_two_nodes();
        editor.select_node(a, true);

        let draft = editor.draft_mut().unwrap();
        let NodeKind::Source { details, .. } = &mut draft.kind else {
            panic!("expected a source node");
        };
        assert!(details.description.is_some());
        details.description = None;
        editor.commit_edit();

        let NodeKind::Source { details, .. } = &editor.project.graph.node(a).unwrap().kind else {
            panic!("expected a source node");
        };
        assert_eq!(details.description, None);
    }

    #[test]
    fn test_rename_project_is_undoable() {
        let (mut editor, _, _) = editor_with_two_nodes();
        let original = editor.project.name.clone();

        editor.rename_project("Quarterly Lineage");
        assert_eq!(editor.project.name, "Quarterly Lineage");
        assert!(editor.snapshot_pending());
        editor.flush_snapshot();

        assert!(editor.undo());
        assert_eq!(editor.project.name, original);
        assert!(editor.redo());
        assert_eq!(editor.project.name, "Quarterly Lineage");
    }

    #[test]
    fn test_cancel_edit_discards_draft() {
        let (mut editor, a, _) = editor_with_two_nodes();
        let original = editor.project.graph.node(a).unwrap().label.clone();

        editor.select_node(a, true);
        editor.draft_mut().unwrap().label = "Scrapped".to_string();
        editor.cancel_edit();

        assert_eq!(editor.project.graph.node(a).unwrap().label, original);
        assert!(editor.draft_mut().is_none());
    }

    #[test]
    fn test_debounce_coalesces_rapid_mutations() {
        let (mut editor, a, b) = editor_with_two_nodes();
        let baseline = editor.history.len();

        editor.connect(a, b).unwrap();
        editor.update_node(a, &NodePatch { label: Some("x".into()), ..NodePatch::default() });
        editor.update_node(b, &NodePatch { label: Some("y".into()), ..NodePatch::default() });

        assert!(editor.snapshot_pending());
        assert!(!editor.poll_snapshot(Instant::now()));
        assert!(editor.poll_snapshot(Instant::now() + SNAPSHOT_DEBOUNCE));
        assert_eq!(editor.history.len(), baseline + 1);
        assert!(!editor.snapshot_pending());
    }

    #[test]
    fn test_undo_redo_replace_state_wholesale() {
        let (mut editor, a, b) = editor_with_two_nodes();
        editor.connect(a, b).unwrap();
        editor.flush_snapshot();

        assert!(editor.undo());
        assert_eq!(editor.project.graph.edge_count(), 0);

        assert!(editor.redo());
        assert_eq!(editor.project.graph.edge_count(), 1);
    }

    #[test]
    fn test_undo_drops_selection_of_vanished_node() {
        let (mut editor, _, _) = editor_with_two_nodes();
        let c = editor.add_node(NodeTemplate::Transform, Position::default());
        editor.flush_snapshot();
        editor.select_node(c, false);

        assert!(editor.undo());
        assert!(!editor.project.graph.contains_node(c));
        assert_eq!(*editor.selection(), Selection::Idle);
    }

    #[test]
    fn test_new_project_resets_everything() {
        let (mut editor, a, _) = editor_with_two_nodes();
        editor.select_node(a, false);

        editor.new_project("Fresh");
        assert_eq!(editor.project.name, "Fresh");
        assert_eq!(editor.project.graph.node_count(), 0);
        assert_eq!(*editor.selection(), Selection::Idle);
        assert!(!editor.history.can_undo());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_stale_clicks_are_ignored() {
        let (mut editor, a, _) = editor_with_two_nodes();
        editor.select_node(a, false);

        editor.select_node(NodeId::new(), true);
        assert_eq!(editor.selection().node_id(), Some(a));

        editor.select_edge(EdgeId::new());
        assert_eq!(editor.selection().node_id(), Some(a));
    }

    #[test]
    fn test_keyboard_chords_drive_undo_redo() {
        use crate::commands::{command_for_chord, KeyChord};

        let (mut editor, a, b) = editor_with_two_nodes();
        editor.connect(a, b).unwrap();
        editor.flush_snapshot();

        let undo = command_for_chord(KeyChord { key: 'z', ctrl_or_cmd: true, shift: false });
        editor.handle_command(undo.unwrap());
        assert_eq!(editor.project.graph.edge_count(), 0);

        let redo = command_for_chord(KeyChord { key: 'y', ctrl_or_cmd: true, shift: false });
        editor.handle_command(redo.unwrap());
        assert_eq!(editor.project.graph.edge_count(), 1);
    }

    #[test]
    fn test_connect_missing_endpoint_leaves_edges_unchanged() {
        let (mut editor, _, b) = editor_with_two_nodes();
        let missing = NodeId::new();
        assert!(editor.connect(missing, b).is_err());
        assert_eq!(editor.project.graph.edge_count(), 0);
        assert!(!editor.snapshot_pending());
    }
}
