//! The drawing controller: applies canonical events, owns the shared log,
//! and bridges to the relay.

use inkboard_core::camera::{Camera, Viewport};
use inkboard_core::history::StrokeLog;
use inkboard_core::input::CanvasEvent;
use inkboard_core::protocol::{BoardCommand, Snapshot};
use inkboard_core::stroke::{BrushKind, DEFAULT_FORCE, Stroke, StrokePoint};
use inkboard_render::brush::{Brush, BrushCursor};
use inkboard_render::painter::{RenderContext, build_scene};
use inkboard_render::scene::Scene;
use kurbo::Point;

/// Default pen width, in drawing-space units.
const DEFAULT_PEN_SIZE: f64 = 8.0;
/// Default eraser disc radius.
const DEFAULT_ERASER_SIZE: f64 = 30.0;
const DEFAULT_COLOR: &str = "black";

/// The stroke currently being drawn, with its live brush state.
#[derive(Debug, Clone)]
struct LiveStroke {
    stroke: Stroke,
    brush: Brush,
    cursor: BrushCursor,
}

/// Owns one drawing surface's state and rendering pipeline.
///
/// All mutation enters through [`handle_event`](Self::handle_event) (local
/// input), [`apply_remote`](Self::apply_remote) (relay commands), or the
/// host-facing setters. Handlers are synchronous and never block; commands
/// are applied in arrival order with no local reordering. Malformed input
/// is absorbed — no method here fails outward.
pub struct BoardController {
    log: StrokeLog,
    camera: Camera,
    viewport: Viewport,
    scene: Scene,
    color: String,
    brush: BrushKind,
    pen_size: f64,
    eraser_size: f64,
    live: Option<LiveStroke>,
    outgoing: Vec<BoardCommand>,
}

impl BoardController {
    /// Create a controller over an empty drawing.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_snapshot(viewport, Snapshot::default())
    }

    /// Seed from a join-time snapshot; the whole snapshot is visible.
    pub fn with_snapshot(viewport: Viewport, snapshot: Snapshot) -> Self {
        let mut controller = Self {
            log: StrokeLog::from_snapshot(snapshot),
            camera: Camera::new(),
            viewport,
            scene: Scene::new(),
            color: DEFAULT_COLOR.to_string(),
            brush: BrushKind::Pen,
            pen_size: DEFAULT_PEN_SIZE,
            eraser_size: DEFAULT_ERASER_SIZE,
            live: None,
            outgoing: Vec::new(),
        };
        controller.rebuild();
        controller
    }

    // --- Canonical input events ---

    /// Apply one canonical event from the input normalizer.
    pub fn handle_event(&mut self, event: CanvasEvent) {
        match event {
            CanvasEvent::BeginStroke { position } => self.begin_stroke(position),
            CanvasEvent::MoveStroke { position, force } => self.move_stroke(position, force),
            CanvasEvent::EndStroke => self.end_stroke(),
            CanvasEvent::Undo => {
                self.log.undo();
                self.rebuild();
                self.outgoing.push(BoardCommand::Undo);
            }
            CanvasEvent::Redo => {
                self.log.redo();
                self.rebuild();
                self.outgoing.push(BoardCommand::Redo);
            }
            // view transforms are client-private and never replicated
            CanvasEvent::Pan { delta } => {
                self.camera.pan(delta);
                self.rebuild();
            }
            CanvasEvent::ZoomAt { factor, center } => {
                self.camera.zoom_at(center, factor);
                self.rebuild();
            }
        }
    }

    fn begin_stroke(&mut self, position: Point) {
        let world = self.camera.screen_to_world(position);
        let mut stroke = Stroke::new(self.color.clone(), self.brush, self.current_size());
        stroke.push(StrokePoint::new(world.x, world.y, DEFAULT_FORCE));
        let brush = Brush::for_stroke(&stroke);
        let cursor = brush.begin(world);
        self.live = Some(LiveStroke {
            stroke,
            brush,
            cursor,
        });
    }

    fn move_stroke(&mut self, position: Point, force: f64) {
        let world = self.camera.screen_to_world(position);
        let transform = self.camera.transform();
        if let Some(live) = &mut self.live {
            let point = StrokePoint::new(world.x, world.y, force);
            live.cursor = live
                .brush
                .draw_segment(live.cursor, point, transform, &mut self.scene);
            live.stroke.push(point);
        }
    }

    fn end_stroke(&mut self) {
        let Some(live) = self.live.take() else { return };
        if live.stroke.is_drawable() {
            self.log.append(live.stroke.clone());
            self.rebuild();
            self.outgoing.push(BoardCommand::Stroke {
                stroke: live.stroke,
            });
        }
        // a gesture that never got a second sample is dropped silently
    }

    // --- Relay bridge ---

    /// Apply a command that arrived from the relay.
    ///
    /// Identical to the local path except nothing is queued back out. The
    /// relay must not echo a sender's own command back to it: commands
    /// carry no identity, so an echoed stroke would be applied twice.
    pub fn apply_remote(&mut self, command: BoardCommand) {
        match command {
            BoardCommand::Stroke { stroke } => {
                if stroke.is_drawable() {
                    self.log.append(stroke);
                    self.rebuild();
                }
            }
            BoardCommand::Undo => {
                self.log.undo();
                self.rebuild();
            }
            BoardCommand::Redo => {
                self.log.redo();
                self.rebuild();
            }
            BoardCommand::Reset => {
                self.log.reset();
                self.camera.reset();
                self.rebuild();
            }
        }
    }

    /// Decode and apply a relay payload. Unknown or malformed commands are
    /// dropped with a warning.
    pub fn apply_remote_json(&mut self, payload: &str) {
        match BoardCommand::from_json(payload) {
            Ok(command) => self.apply_remote(command),
            Err(err) => log::warn!("ignoring unrecognized relay command: {err}"),
        }
    }

    /// Drain the commands queued for the relay, in emission order.
    pub fn take_outgoing(&mut self) -> Vec<BoardCommand> {
        std::mem::take(&mut self.outgoing)
    }

    /// Check whether any outbound commands are waiting.
    pub fn has_outgoing(&self) -> bool {
        !self.outgoing.is_empty()
    }

    // --- Host-facing surface ---

    /// Resize the backing surface. Idempotent and callable at any time,
    /// including before anything was drawn.
    pub fn resize(&mut self, width: f64, height: f64, scale_factor: f64) {
        self.viewport = Viewport::new(width, height, scale_factor);
        self.rebuild();
    }

    /// Clear the board for every participant.
    pub fn reset(&mut self) {
        self.log.reset();
        self.camera.reset();
        self.rebuild();
        self.outgoing.push(BoardCommand::Reset);
    }

    /// Select the brush for subsequent strokes.
    pub fn set_brush(&mut self, brush: BrushKind) {
        self.brush = brush;
    }

    /// Select the color for subsequent strokes.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    /// Set the size of the currently selected brush kind.
    pub fn set_size(&mut self, size: f64) {
        match self.brush {
            BrushKind::Pen => self.pen_size = size,
            BrushKind::Eraser => self.eraser_size = size,
        }
    }

    /// Generic option setter for host-page controls. Unknown options and
    /// values are no-ops.
    pub fn set_option(&mut self, name: &str, value: &str) {
        match name {
            "brush" => match BrushKind::from_name(value) {
                Some(kind) => self.set_brush(kind),
                None => log::warn!("unrecognized brush selected: {value}"),
            },
            "color" => self.set_color(value),
            "size" => match value.parse::<f64>() {
                Ok(size) if size.is_finite() && size > 0.0 => self.set_size(size),
                _ => log::warn!("unrecognized brush size: {value}"),
            },
            _ => log::warn!("unrecognized board option: {name}"),
        }
    }

    /// Export the visible drawing, for persistence or a joining peer.
    pub fn snapshot(&self) -> Snapshot {
        self.log.snapshot()
    }

    /// The retained scene for the embedder to present.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The stroke log.
    pub fn log(&self) -> &StrokeLog {
        &self.log
    }

    /// The view transform.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn current_size(&self) -> f64 {
        match self.brush {
            BrushKind::Pen => self.pen_size,
            BrushKind::Eraser => self.eraser_size,
        }
    }

    /// Full refresh: clear, reference grid, then replay every visible
    /// stroke in order.
    fn rebuild(&mut self) {
        build_scene(
            &mut self.scene,
            &RenderContext {
                strokes: self.log.visible_strokes(),
                camera: &self.camera,
                viewport: self.viewport,
            },
        );
    }
}
