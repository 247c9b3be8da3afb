//! Full-frame scene building: reference grid plus stroke replay.

use crate::brush::Brush;
use crate::scene::{BLEND_OVER, Scene};
use inkboard_core::camera::{Camera, Viewport};
use inkboard_core::stroke::Stroke;
use kurbo::{BezPath, Point, Rect};
use peniko::Color;

/// Spacing of the reference dot grid, in drawing-space units.
pub const GRID_SPACING: f64 = 40.0;

const GRID_COLOR: Color = Color::from_rgba8(160, 160, 160, 70);
const DOT_HALF_SIZE: f64 = 1.5;

/// Everything a frame rebuild reads.
pub struct RenderContext<'a> {
    /// The visible strokes, in commit order.
    pub strokes: &'a [Stroke],
    /// Camera for the view transform.
    pub camera: &'a Camera,
    /// Backing-surface dimensions.
    pub viewport: Viewport,
}

/// Rebuild the scene from scratch: clear, reference grid, then every
/// visible stroke in order. Building twice from the same inputs yields an
/// identical command list.
pub fn build_scene(scene: &mut Scene, ctx: &RenderContext) {
    scene.reset(ctx.viewport.physical_size());
    let transform = ctx.camera.transform();
    render_grid_dots(scene, ctx);
    for stroke in ctx.strokes {
        Brush::replay(stroke, transform, scene);
    }
}

/// Drawing-space range covered by the viewport, snapped outward to grid
/// lines.
fn grid_bounds(ctx: &RenderContext) -> (f64, f64, f64, f64) {
    let size = ctx.viewport.physical_size();
    let world_tl = ctx.camera.screen_to_world(Point::ZERO);
    let world_br = ctx.camera.screen_to_world(Point::new(size.width, size.height));

    let start_x = (world_tl.x / GRID_SPACING).floor() * GRID_SPACING;
    let start_y = (world_tl.y / GRID_SPACING).floor() * GRID_SPACING;
    let end_x = (world_br.x / GRID_SPACING).ceil() * GRID_SPACING;
    let end_y = (world_br.y / GRID_SPACING).ceil() * GRID_SPACING;
    (start_x, start_y, end_x, end_y)
}

/// Render the dot grid, batched into a single fill. Dots are small squares;
/// cheaper than ellipses and indistinguishable at this size.
fn render_grid_dots(scene: &mut Scene, ctx: &RenderContext) {
    let (start_x, start_y, end_x, end_y) = grid_bounds(ctx);

    let mut path = BezPath::new();
    let mut x = start_x;
    while x <= end_x {
        let mut y = start_y;
        while y <= end_y {
            let rect = Rect::new(
                x - DOT_HALF_SIZE,
                y - DOT_HALF_SIZE,
                x + DOT_HALF_SIZE,
                y + DOT_HALF_SIZE,
            );
            path.move_to(Point::new(rect.x0, rect.y0));
            path.line_to(Point::new(rect.x1, rect.y0));
            path.line_to(Point::new(rect.x1, rect.y1));
            path.line_to(Point::new(rect.x0, rect.y1));
            path.close_path();
            y += GRID_SPACING;
        }
        x += GRID_SPACING;
    }

    scene.fill(ctx.camera.transform(), GRID_COLOR, BLEND_OVER, path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkboard_core::stroke::{BrushKind, StrokePoint};
    use kurbo::Vec2;

    fn stroke(x: f64) -> Stroke {
        let mut stroke = Stroke::new("black", BrushKind::Pen, 8.0);
        stroke.push(StrokePoint::new(x, 0.0, 0.2));
        stroke.push(StrokePoint::new(x, 10.0, 0.4));
        stroke
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let strokes = vec![stroke(1.0), stroke(2.0)];
        let mut camera = Camera::new();
        camera.pan(Vec2::new(12.0, -7.0));
        camera.zoom_at(Point::new(40.0, 40.0), 1.4);
        let ctx = RenderContext {
            strokes: &strokes,
            camera: &camera,
            viewport: Viewport::new(200.0, 100.0, 2.0),
        };

        let mut first = Scene::new();
        build_scene(&mut first, &ctx);
        let mut second = Scene::new();
        build_scene(&mut second, &ctx);

        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_scene_sized_to_physical_pixels() {
        let ctx = RenderContext {
            strokes: &[],
            camera: &Camera::new(),
            viewport: Viewport::new(400.0, 300.0, 2.0),
        };
        let mut scene = Scene::new();
        build_scene(&mut scene, &ctx);
        assert_eq!(scene.size(), kurbo::Size::new(800.0, 600.0));
    }

    #[test]
    fn test_grid_precedes_strokes() {
        let strokes = vec![stroke(0.0)];
        let ctx = RenderContext {
            strokes: &strokes,
            camera: &Camera::new(),
            viewport: Viewport::default(),
        };
        let mut scene = Scene::new();
        build_scene(&mut scene, &ctx);

        // first command is the batched grid fill, strokes follow
        assert!(matches!(
            scene.commands()[0],
            crate::scene::DrawCommand::FillPath { .. }
        ));
        assert!(scene.commands().len() > 1);
    }

    #[test]
    fn test_grid_covers_visible_world() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(-500.0, -500.0));
        let ctx = RenderContext {
            strokes: &[],
            camera: &camera,
            viewport: Viewport::new(100.0, 100.0, 1.0),
        };
        let (start_x, start_y, end_x, end_y) = grid_bounds(&ctx);
        assert!(start_x <= 500.0 && end_x >= 600.0);
        assert!(start_y <= 500.0 && end_y >= 600.0);
    }
}
