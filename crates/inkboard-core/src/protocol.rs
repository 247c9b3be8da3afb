//! Relay message contract and snapshot format.
//!
//! The relay fans every replicated command out to all participants in a
//! single global order; this module only defines the wire shapes and the
//! lenient decoding policy at that boundary. Transport and sequencing live
//! outside the engine.

use crate::stroke::Stroke;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A replicated drawing command, as carried by the relay.
///
/// The same four shapes travel in both directions:
/// `{"type":"stroke","stroke":{...}}`, `{"type":"undo"}`,
/// `{"type":"redo"}`, `{"type":"reset"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BoardCommand {
    Stroke { stroke: Stroke },
    Undo,
    Redo,
    Reset,
}

/// Errors produced while encoding or decoding relay payloads.
///
/// These never escape the engine: callers absorb them into no-ops or
/// default substitutions, so a drawing session never halts on bad input.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed command: {0}")]
    Command(#[source] serde_json::Error),
    #[error("malformed snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),
}

impl BoardCommand {
    /// Encode for the relay.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Command)
    }

    /// Decode a relay payload. Unknown command types fail here and are
    /// dropped (with a warning) by the caller.
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(json).map_err(ProtocolError::Command)
    }
}

/// A full drawing snapshot: the unit of join-time seeding and restore.
///
/// Late joiners receive one of these instead of a replay of historical
/// commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub strokes: Vec<Stroke>,
}

impl Snapshot {
    /// Parse serialized snapshot data, substituting an empty drawing when
    /// the payload is missing or malformed. Never fails: availability of
    /// the surface outranks strict validation.
    pub fn parse_or_empty(data: Option<&str>) -> Self {
        match data {
            None => Self::default(),
            Some(raw) => match serde_json::from_str(raw) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    log::warn!("discarding malformed snapshot: {err}");
                    Self::default()
                }
            },
        }
    }

    /// Encode for persistence or a joining peer.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{BrushKind, StrokePoint};

    #[test]
    fn test_command_wire_shapes() {
        assert_eq!(BoardCommand::Undo.to_json().unwrap(), r#"{"type":"undo"}"#);
        assert_eq!(BoardCommand::Redo.to_json().unwrap(), r#"{"type":"redo"}"#);
        assert_eq!(BoardCommand::Reset.to_json().unwrap(), r#"{"type":"reset"}"#);

        let mut stroke = Stroke::new("black", BrushKind::Pen, 8.0);
        stroke.push(StrokePoint::new(0.0, 0.0, 0.2));
        stroke.push(StrokePoint::new(1.0, 1.0, 0.2));
        let json = serde_json::to_value(BoardCommand::Stroke { stroke }).unwrap();
        assert_eq!(json["type"], "stroke");
        assert_eq!(json["stroke"]["brushKind"], "pen");
    }

    #[test]
    fn test_command_roundtrip() {
        let mut stroke = Stroke::new("#1f1f1f", BrushKind::Eraser, 30.0);
        stroke.push(StrokePoint::new(3.0, 4.0, 0.9));
        stroke.push(StrokePoint::new(5.0, 6.0, 0.4));
        let command = BoardCommand::Stroke { stroke };
        let decoded = BoardCommand::from_json(&command.to_json().unwrap()).unwrap();
        assert_eq!(decoded, command);
    }

    #[test]
    fn test_unknown_command_type_rejected() {
        assert!(BoardCommand::from_json(r#"{"type":"sparkle"}"#).is_err());
        assert!(BoardCommand::from_json("not json").is_err());
    }

    #[test]
    fn test_snapshot_parse_is_lenient() {
        assert_eq!(Snapshot::parse_or_empty(None), Snapshot::default());
        assert_eq!(Snapshot::parse_or_empty(Some("{broken")), Snapshot::default());
        assert_eq!(
            Snapshot::parse_or_empty(Some(r#"{"strokes":[]}"#)),
            Snapshot::default()
        );

        let parsed = Snapshot::parse_or_empty(Some(
            r#"{"strokes":[{"color":"black","brushKind":"pen","size":8.0,"points":[{"x":0.0,"y":0.0,"force":0.2},{"x":1.0,"y":1.0,"force":0.2}]}]}"#,
        ));
        assert_eq!(parsed.strokes.len(), 1);
        assert_eq!(parsed.strokes[0].brush, BrushKind::Pen);
    }
}
