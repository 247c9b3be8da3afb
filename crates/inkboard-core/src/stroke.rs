//! Stroke data model.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Synthetic pressure used when the input device reports none.
///
/// Mice and pressure-blind touch screens all land on this value so their
/// strokes render with a consistent width.
pub const DEFAULT_FORCE: f64 = 0.2;

/// A single pressure-tagged sample of a stroke.
///
/// Coordinates are drawing-space (after the device-pixel-ratio and
/// pan/zoom inverse mapping); `force` is semantic pressure in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    pub force: f64,
}

impl StrokePoint {
    /// Create a sample, clamping force into [0, 1].
    pub fn new(x: f64, y: f64, force: f64) -> Self {
        Self {
            x,
            y,
            force: force.clamp(0.0, 1.0),
        }
    }

    /// The positional part of the sample.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<StrokePoint> for Point {
    fn from(point: StrokePoint) -> Self {
        point.position()
    }
}

/// Available brush kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BrushKind {
    #[default]
    Pen,
    Eraser,
}

impl BrushKind {
    /// Look up a brush kind by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pen" => Some(Self::Pen),
            "eraser" => Some(Self::Eraser),
            _ => None,
        }
    }

    /// Wire name for this brush kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Eraser => "eraser",
        }
    }
}

/// One continuous drawn gesture: style attributes plus the ordered samples.
///
/// Immutable once the owning gesture ends and the stroke is committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    #[serde(rename = "brushKind")]
    pub brush: BrushKind,
    pub size: f64,
    pub points: Vec<StrokePoint>,
}

impl Stroke {
    /// Start an empty stroke with the given style.
    pub fn new(color: impl Into<String>, brush: BrushKind, size: f64) -> Self {
        Self {
            color: color.into(),
            brush,
            size,
            points: Vec::new(),
        }
    }

    /// Append a sample to the stroke.
    pub fn push(&mut self, point: StrokePoint) {
        self.points.push(point);
    }

    /// Number of samples recorded so far.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the stroke has no samples at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A stroke needs at least two samples to draw anything; anything
    /// shorter is degenerate and is never committed.
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }
}
