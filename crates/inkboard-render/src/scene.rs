//! Retained display list shared with the embedding surface.

use kurbo::{Affine, BezPath, Size};
use peniko::{BlendMode, Color, Compose, Mix};

/// Blend used for ordinary painting.
pub const BLEND_OVER: BlendMode = BlendMode {
    mix: Mix::Normal,
    compose: Compose::SrcOver,
};

/// Subtractive blend used by the eraser: covered pixels are removed from
/// the surface rather than painted over.
pub const BLEND_DEST_OUT: BlendMode = BlendMode {
    mix: Mix::Normal,
    compose: Compose::DestOut,
};

/// One drawing operation.
///
/// Paths are drawing-space coordinates; `transform` maps them onto the
/// physical surface. Stroke widths are drawing-space units and scale with
/// the transform.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillPath {
        path: BezPath,
        transform: Affine,
        color: Color,
        blend: BlendMode,
    },
    StrokePath {
        path: BezPath,
        transform: Affine,
        color: Color,
        width: f64,
    },
}

/// A frame's worth of drawing commands for the backing surface.
///
/// The embedder replays the command list in order onto its real surface
/// after each event. Rebuilding from the same stroke log and camera always
/// yields an identical list, which is what makes full refreshes (undo,
/// redo, resize, pan, zoom) indistinguishable from live drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all commands and set the physical surface size. The embedder
    /// clears its surface when it sees a fresh list.
    pub fn reset(&mut self, size: Size) {
        self.size = size;
        self.commands.clear();
    }

    /// Physical surface size this scene was built for.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The retained commands, in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Whether the scene holds no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Record a filled path.
    pub fn fill(&mut self, transform: Affine, color: Color, blend: BlendMode, path: BezPath) {
        self.commands.push(DrawCommand::FillPath {
            path,
            transform,
            color,
            blend,
        });
    }

    /// Record a stroked path.
    pub fn stroke(&mut self, width: f64, transform: Affine, color: Color, path: BezPath) {
        self.commands.push(DrawCommand::StrokePath {
            path,
            transform,
            color,
            width,
        });
    }
}
