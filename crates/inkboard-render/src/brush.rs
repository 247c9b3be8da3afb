//! Brush engine: turns stroke samples into scene drawing commands.

use crate::color::parse_color;
use crate::scene::{BLEND_DEST_OUT, Scene};
use inkboard_core::stroke::{BrushKind, Stroke, StrokePoint};
use kurbo::{Affine, BezPath, Circle, Point, Shape};
use peniko::Color;

/// Flattening tolerance for eraser discs.
const DISC_TOLERANCE: f64 = 0.1;

/// Pressure-to-width response curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressureCurve {
    /// Straight interpolation between the width bounds.
    #[default]
    Linear,
    /// Ease-out: 1 − (1 − force)². Width grows fast under light pressure
    /// and flattens out near full force.
    Decelerate,
}

impl PressureCurve {
    /// Map a force value in [0, 1] through the curve.
    pub fn apply(self, force: f64) -> f64 {
        let force = force.clamp(0.0, 1.0);
        match self {
            Self::Linear => force,
            Self::Decelerate => 1.0 - (1.0 - force).powi(2),
        }
    }
}

/// The running cursor a brush threads through a gesture.
///
/// `position` is where the last segment ended; `control` is the last raw
/// input sample, used as the next segment's control point. The value is
/// returned updated from every draw call rather than hiding inside the
/// brush, so replays cannot alias live state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushCursor {
    pub position: Point,
    pub control: Point,
}

/// A pen: quadratic-smoothed line segments with pressure-driven width.
#[derive(Debug, Clone, PartialEq)]
pub struct PenBrush {
    pub color: Color,
    pub min_width: f64,
    pub max_width: f64,
    pub curve: PressureCurve,
}

impl PenBrush {
    fn width(&self, force: f64) -> f64 {
        self.min_width + self.curve.apply(force) * (self.max_width - self.min_width)
    }
}

/// An eraser: subtractive discs of fixed radius, no smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EraserBrush {
    pub radius: f64,
}

/// The closed set of brushes; adding a kind means adding a variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    Pen(PenBrush),
    Eraser(EraserBrush),
}

impl Brush {
    /// Build the brush described by a stroke's style attributes.
    pub fn for_stroke(stroke: &Stroke) -> Self {
        match stroke.brush {
            BrushKind::Pen => Brush::Pen(PenBrush {
                color: parse_color(&stroke.color),
                min_width: 0.0,
                max_width: stroke.size,
                curve: PressureCurve::default(),
            }),
            BrushKind::Eraser => Brush::Eraser(EraserBrush {
                radius: stroke.size,
            }),
        }
    }

    /// Start a gesture: both cursor fields sit on the first sample.
    pub fn begin(&self, point: Point) -> BrushCursor {
        BrushCursor {
            position: point,
            control: point,
        }
    }

    /// Draw one segment toward `next`, returning the advanced cursor.
    ///
    /// The pen draws a quadratic from the current position to the midpoint
    /// of (control, next), with control as the curve's control point: one
    /// sample of latency traded for a continuous curve. The eraser stamps a
    /// disc at the sample itself; its cursor advances the same way so the
    /// two kinds replay identically.
    pub fn draw_segment(
        &self,
        cursor: BrushCursor,
        next: StrokePoint,
        transform: Affine,
        scene: &mut Scene,
    ) -> BrushCursor {
        let target = next.position();
        let mid = cursor.control.midpoint(target);
        match self {
            Brush::Pen(pen) => {
                let mut path = BezPath::new();
                path.move_to(cursor.position);
                path.quad_to(cursor.control, mid);
                scene.stroke(pen.width(next.force), transform, pen.color, path);
            }
            Brush::Eraser(eraser) => {
                let disc = Circle::new(target, eraser.radius).to_path(DISC_TOLERANCE);
                scene.fill(transform, Color::BLACK, BLEND_DEST_OUT, disc);
            }
        }
        BrushCursor {
            position: mid,
            control: target,
        }
    }

    /// Replay a committed stroke into the scene: seed the cursor on the
    /// first sample, then draw a segment for every following one. This
    /// path is also what live drawing uses, so a refresh reproduces the
    /// gesture exactly.
    pub fn replay(stroke: &Stroke, transform: Affine, scene: &mut Scene) {
        if !stroke.is_drawable() {
            return;
        }
        let brush = Brush::for_stroke(stroke);
        let mut cursor = brush.begin(stroke.points[0].position());
        for point in &stroke.points[1..] {
            cursor = brush.draw_segment(cursor, *point, transform, scene);
        }
    }
}
