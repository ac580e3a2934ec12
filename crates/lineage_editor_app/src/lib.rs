// SPDX-License-Identifier: MIT OR Apache-2.0
//! Lineage Editor core.
//!
//! The stateful heart of a data-pipeline diagram editor, kept free of
//! any rendering concerns:
//! - Bounded snapshot undo/redo history
//! - Editor state with the selection/edit-mode controller
//! - JSON document and SVG export adapters
//! - Keyboard and drag-payload command surface
//!
//! ## Architecture
//!
//! Rendering layers (canvas, panels, drag-and-drop wiring) are external
//! collaborators: they deliver click/drop/key events and in turn consume
//! the canonical state owned by [`state::EditorState`]. Everything here
//! runs single-threaded; mutations schedule a debounced history
//! snapshot that the event loop flushes by polling.

pub mod commands;
pub mod export;
pub mod history;
pub mod state;

pub use commands::{command_for_chord, DragPayload, EditorCommand, KeyChord};
pub use history::HistoryStore;
pub use state::{EditorState, NodeInspector, Selection};
