//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the drawing surface.
///
/// It composes panning (translation) and zooming (uniform scale) into a
/// single affine transform, converting between device coordinates and
/// drawing-space coordinates. The transform is always invertible because
/// zoom is clamped away from zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan).
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Camera {
    /// Create a new camera at the identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts drawing-space coordinates to device
    /// coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts device coordinates to drawing-space
    /// coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a device point to drawing-space coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a drawing-space point to device coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the camera by a delta in device coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given device point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        // Convert the pivot to drawing space before the zoom changes
        let world_point = self.screen_to_world(screen_point);

        self.zoom = new_zoom;

        // Adjust offset so world_point stays at screen_point
        let new_screen = self.world_to_screen(world_point);
        let correction = Vec2::new(
            screen_point.x - new_screen.x,
            screen_point.y - new_screen.y,
        );
        self.offset += correction;
    }

    /// Reset camera to the identity transform.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }
}

/// Layout size and device pixel ratio of the backing surface.
///
/// Raw input arrives in client (CSS-pixel) coordinates; the backing surface
/// is `scale_factor` times denser. That scaling is applied once, where raw
/// coordinates enter the input layer, before the pan/zoom transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Layout width in client pixels.
    pub width: f64,
    /// Layout height in client pixels.
    pub height: f64,
    /// Device pixel ratio.
    pub scale_factor: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            scale_factor: 1.0,
        }
    }
}

impl Viewport {
    /// Create a viewport; a non-finite or non-positive pixel ratio falls
    /// back to 1.0.
    pub fn new(width: f64, height: f64, scale_factor: f64) -> Self {
        let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        Self {
            width,
            height,
            scale_factor,
        }
    }

    /// Backing-surface dimensions in physical pixels.
    pub fn physical_size(&self) -> Size {
        Size::new(self.width * self.scale_factor, self.height * self.scale_factor)
    }

    /// Scale a client-coordinate point up to physical pixels.
    pub fn scale_point(&self, client: Point) -> Point {
        Point::new(client.x * self.scale_factor, client.y * self.scale_factor)
    }
}
