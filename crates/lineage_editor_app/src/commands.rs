// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command surface: keyboard chords and palette drag payloads.
//!
//! The rendering layer delivers raw key events and drag descriptors;
//! this module maps them onto editor commands and node templates.

use lineage_editor_graph::{NodeTemplate, SourceSystem, TargetSystem};
use serde::{Deserialize, Serialize};

/// A command the keyboard surface can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Undo the last settled mutation
    Undo,
    /// Redo the last undone mutation
    Redo,
}

/// A pressed key with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    /// The character key, case-insensitive
    pub key: char,
    /// Ctrl on Linux/Windows, Cmd on macOS
    pub ctrl_or_cmd: bool,
    /// Shift modifier
    pub shift: bool,
}

/// Map a key chord to an editor command.
///
/// Undo is Ctrl/Cmd+Z; redo is Ctrl/Cmd+Y or Ctrl/Cmd+Shift+Z.
pub fn command_for_chord(chord: KeyChord) -> Option<EditorCommand> {
    if !chord.ctrl_or_cmd {
        return None;
    }
    match (chord.key.to_ascii_lowercase(), chord.shift) {
        ('z', false) => Some(EditorCommand::Undo),
        ('z', true) | ('y', _) => Some(EditorCommand::Redo),
        _ => None,
    }
}

/// Kind tag carried by a palette drag payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    Source,
    Target,
    Transform,
}

/// Transient descriptor passed from the palette to the canvas at drop
/// time, as a small JSON key/value document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    /// Node kind being dragged
    pub node_type: PaletteKind,
    /// System variant for source/target kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
}

/// Error resolving a drag payload into a node template
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The payload was not valid JSON
    #[error("malformed drag payload: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Source/target payload without a system variant
    #[error("drag payload is missing a subtype")]
    MissingSubType,
    /// The system variant is not one the palette offers
    #[error("unknown drag payload subtype: {0:?}")]
    UnknownSubType(String),
}

impl DragPayload {
    /// Parse the raw drop descriptor
    pub fn parse(raw: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Resolve the payload into a palette template
    pub fn template(&self) -> Result<NodeTemplate, PayloadError> {
        match self.node_type {
            PaletteKind::Transform => Ok(NodeTemplate::Transform),
            PaletteKind::Source => match self.sub_type.as_deref() {
                Some("teradata") => Ok(NodeTemplate::Source(SourceSystem::Teradata)),
                Some("postgres") => Ok(NodeTemplate::Source(SourceSystem::Postgres)),
                Some("synapse") => Ok(NodeTemplate::Source(SourceSystem::Synapse)),
                Some(other) => Err(PayloadError::UnknownSubType(other.to_string())),
                None => Err(PayloadError::MissingSubType),
            },
            PaletteKind::Target => match self.sub_type.as_deref() {
                Some("databricks") => Ok(NodeTemplate::Target(TargetSystem::Databricks)),
                Some("sql") => Ok(NodeTemplate::Target(TargetSystem::Sql)),
                Some("postgres") => Ok(NodeTemplate::Target(TargetSystem::Postgres)),
                Some(other) => Err(PayloadError::UnknownSubType(other.to_string())),
                None => Err(PayloadError::MissingSubType),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(key: char, ctrl_or_cmd: bool, shift: bool) -> KeyChord {
        KeyChord { key, ctrl_or_cmd, shift }
    }

    #[test]
    fn test_undo_redo_chords() {
        assert_eq!(command_for_chord(chord('z', true, false)), Some(EditorCommand::Undo));
        assert_eq!(command_for_chord(chord('Z', true, false)), Some(EditorCommand::Undo));
        assert_eq!(command_for_chord(chord('z', true, true)), Some(EditorCommand::Redo));
        assert_eq!(command_for_chord(chord('y', true, false)), Some(EditorCommand::Redo));
    }

    #[test]
    fn test_unmodified_keys_are_not_commands() {
        assert_eq!(command_for_chord(chord('z', false, false)), None);
        assert_eq!(command_for_chord(chord('y', false, true)), None);
        assert_eq!(command_for_chord(chord('q', true, false)), None);
    }

    #[test]
    fn test_drag_payload_round_trip() {
        let payload = DragPayload::parse(r#"{"nodeType":"source","subType":"teradata"}"#).unwrap();
        assert_eq!(
            payload.template().unwrap(),
            NodeTemplate::Source(SourceSystem::Teradata)
        );

        let payload = DragPayload::parse(r#"{"nodeType":"transform"}"#).unwrap();
        assert_eq!(payload.template().unwrap(), NodeTemplate::Transform);
    }

    #[test]
    fn test_drag_payload_errors() {
        assert!(DragPayload::parse("not json").is_err());

        let payload = DragPayload::parse(r#"{"nodeType":"target"}"#).unwrap();
        assert!(matches!(payload.template(), Err(PayloadError::MissingSubType)));

        let payload = DragPayload::parse(r#"{"nodeType":"target","subType":"oracle"}"#).unwrap();
        assert!(matches!(payload.template(), Err(PayloadError::UnknownSubType(_))));
    }
}
