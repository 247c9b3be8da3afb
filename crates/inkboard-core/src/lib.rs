//! Inkboard Core Library
//!
//! Platform-agnostic core data structures and logic for the Inkboard
//! collaborative drawing surface: the stroke model, the replicated
//! stroke log, the camera transform, input normalization, and the relay
//! message contract.

pub mod camera;
pub mod history;
pub mod input;
pub mod protocol;
pub mod stroke;

pub use camera::{Camera, Viewport};
pub use history::StrokeLog;
pub use input::{
    CanvasEvent, InputNormalizer, KeyEvent, Modifiers, PointerEvent, Touch, TouchEvent, TouchKind,
    WheelEvent,
};
pub use protocol::{BoardCommand, ProtocolError, Snapshot};
pub use stroke::{BrushKind, Stroke, StrokePoint};
