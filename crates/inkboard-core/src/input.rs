//! Input normalization: raw device events to canonical canvas events.
//!
//! Mouse-class pointers, multi-touch contacts, the keyboard, and the wheel
//! all reduce to the same small event vocabulary. The normalizer owns the
//! per-source state machines and an explicit outgoing queue; it never
//! reaches past that queue into the rest of the engine.

use crate::stroke::DEFAULT_FORCE;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Synthetic pressure for mouse gestures (mice report none).
const MOUSE_FORCE: f64 = DEFAULT_FORCE;

/// Wheel delta divisor controlling zoom sensitivity.
const WHEEL_ZOOM_DIVISOR: f64 = 400.0;

/// A finger gesture whose terminal pinch scale stays within this band of
/// 1.0 is a tap, not a pinch.
const PINCH_TAP_TOLERANCE: f64 = 0.05;

/// Canonical events produced by the normalizer.
///
/// Positions are device pixels (client coordinates scaled by the device
/// pixel ratio); mapping into drawing space happens downstream in the
/// controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CanvasEvent {
    BeginStroke { position: Point },
    MoveStroke { position: Point, force: f64 },
    EndStroke,
    Undo,
    Redo,
    Pan { delta: Vec2 },
    ZoomAt { factor: f64, center: Point },
}

/// Modifier keys state, tracked continuously from key events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub meta: bool,
}

/// Raw mouse-class pointer events, in client coordinates relative to the
/// surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// The pointer left the surface mid-gesture; treated exactly like a
    /// release.
    Leave,
}

/// How the device classifies a touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchKind {
    Finger,
    Stylus,
}

/// One active touch contact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Touch {
    pub id: u64,
    pub kind: TouchKind,
    /// Client coordinates relative to the surface.
    pub position: Point,
    /// Device-reported pressure, if the contact supports it.
    pub force: Option<f64>,
}

/// Raw touch events. Each carries the full set of currently active
/// contacts, like a DOM `TouchEvent`'s `touches` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TouchEvent {
    Start { touches: Vec<Touch> },
    Move { touches: Vec<Touch> },
    End { touches: Vec<Touch> },
    Cancel,
}

/// Raw keyboard events. Key names follow the DOM convention
/// ("z", "Shift", "Meta").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// A wheel tick at a pointer position, in client coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WheelEvent {
    pub position: Point,
    pub delta: Vec2,
}

/// Mouse-class gesture state. The mode is chosen when the button goes down
/// and holds for the whole gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PointerMode {
    Idle,
    Draw,
    Pan { last: Point },
}

/// Touch gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TouchMode {
    Idle,
    /// A stylus contact is drawing; finger gestures are suppressed until it
    /// lifts.
    Stylus { id: u64 },
    /// Finger-only gesture: pan, pinch, or (resolved only at the end) a
    /// tap.
    Fingers(FingerGesture),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct FingerGesture {
    /// Centroid of the contacts, in device pixels.
    centroid: Point,
    /// Distance between the two contacts while exactly two are down.
    spread: Option<f64>,
    /// Product of every pinch ratio emitted so far.
    cumulative_scale: f64,
    /// Most simultaneous contacts seen during the gesture.
    max_count: usize,
}

/// Converts raw pointer, touch, keyboard, and wheel events into the
/// canonical vocabulary.
///
/// Emitted events accumulate on an internal queue drained with
/// [`take_events`](Self::take_events), in emission order.
#[derive(Debug, Clone)]
pub struct InputNormalizer {
    scale_factor: f64,
    modifiers: Modifiers,
    pointer: PointerMode,
    touch: TouchMode,
    events: Vec<CanvasEvent>,
}

impl Default for InputNormalizer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl InputNormalizer {
    /// Create a normalizer for a surface with the given device pixel ratio.
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor: if scale_factor.is_finite() && scale_factor > 0.0 {
                scale_factor
            } else {
                1.0
            },
            modifiers: Modifiers::default(),
            pointer: PointerMode::Idle,
            touch: TouchMode::Idle,
            events: Vec::new(),
        }
    }

    /// Update the device pixel ratio (the surface was resized or moved to
    /// another display).
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor.is_finite() && scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    /// Currently held modifier keys.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Drain the queued canonical events, in emission order.
    pub fn take_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    fn scale(&self, client: Point) -> Point {
        Point::new(client.x * self.scale_factor, client.y * self.scale_factor)
    }

    // --- Pointer (mouse-class) ---

    /// Process a mouse-class pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => {
                let position = self.scale(position);
                if self.modifiers.shift {
                    self.pointer = PointerMode::Pan { last: position };
                } else {
                    self.pointer = PointerMode::Draw;
                    self.events.push(CanvasEvent::BeginStroke { position });
                }
            }
            PointerEvent::Move { position } => {
                let position = self.scale(position);
                match self.pointer {
                    PointerMode::Draw => self.events.push(CanvasEvent::MoveStroke {
                        position,
                        force: MOUSE_FORCE,
                    }),
                    PointerMode::Pan { last } => {
                        self.pointer = PointerMode::Pan { last: position };
                        self.events.push(CanvasEvent::Pan {
                            delta: position - last,
                        });
                    }
                    PointerMode::Idle => {}
                }
            }
            PointerEvent::Up { .. } | PointerEvent::Leave => self.finish_pointer(),
        }
    }

    fn finish_pointer(&mut self) {
        if self.pointer == PointerMode::Draw {
            self.events.push(CanvasEvent::EndStroke);
        }
        self.pointer = PointerMode::Idle;
    }

    // --- Touch ---

    /// Process a touch event.
    pub fn handle_touch(&mut self, event: TouchEvent) {
        match event {
            TouchEvent::Start { touches } => self.touch_start(&touches),
            TouchEvent::Move { touches } => self.touch_move(&touches),
            TouchEvent::End { touches } => self.touch_end(&touches),
            TouchEvent::Cancel => self.touch_cancel(),
        }
    }

    fn touch_start(&mut self, touches: &[Touch]) {
        if matches!(self.touch, TouchMode::Stylus { .. }) {
            // fingers landing during a stylus gesture are ignored
            return;
        }

        if let Some(stylus) = touches.iter().find(|t| t.kind == TouchKind::Stylus) {
            // A stylus always draws; an in-flight finger gesture is
            // abandoned without becoming a tap.
            let position = self.scale(stylus.position);
            self.touch = TouchMode::Stylus { id: stylus.id };
            self.events.push(CanvasEvent::BeginStroke { position });
            return;
        }

        let fingers = self.finger_positions(touches);
        if fingers.is_empty() {
            return;
        }
        self.touch = match self.touch {
            TouchMode::Fingers(mut gesture) => {
                gesture.max_count = gesture.max_count.max(fingers.len());
                gesture.centroid = centroid(&fingers);
                gesture.spread = spread(&fingers);
                TouchMode::Fingers(gesture)
            }
            _ => TouchMode::Fingers(FingerGesture {
                centroid: centroid(&fingers),
                spread: spread(&fingers),
                cumulative_scale: 1.0,
                max_count: fingers.len(),
            }),
        };
    }

    fn touch_move(&mut self, touches: &[Touch]) {
        match self.touch {
            TouchMode::Stylus { id } => {
                if let Some(touch) = touches.iter().find(|t| t.id == id) {
                    let position = self.scale(touch.position);
                    let force = touch.force.unwrap_or(DEFAULT_FORCE).clamp(0.0, 1.0);
                    self.events.push(CanvasEvent::MoveStroke { position, force });
                }
            }
            TouchMode::Fingers(mut gesture) => {
                let fingers = self.finger_positions(touches);
                match fingers.len() {
                    0 => {}
                    1 => {
                        let next = centroid(&fingers);
                        let delta = next - gesture.centroid;
                        gesture.centroid = next;
                        gesture.spread = None;
                        self.events.push(CanvasEvent::Pan { delta });
                    }
                    2 => {
                        let next_centroid = centroid(&fingers);
                        let next_spread = spread(&fingers);
                        if let (Some(previous), Some(current)) = (gesture.spread, next_spread) {
                            if previous > f64::EPSILON {
                                let factor = current / previous;
                                gesture.cumulative_scale *= factor;
                                self.events.push(CanvasEvent::ZoomAt {
                                    factor,
                                    center: next_centroid,
                                });
                            }
                        }
                        gesture.centroid = next_centroid;
                        gesture.spread = next_spread;
                    }
                    _ => {
                        gesture.centroid = centroid(&fingers);
                        gesture.spread = None;
                    }
                }
                gesture.max_count = gesture.max_count.max(fingers.len());
                self.touch = TouchMode::Fingers(gesture);
            }
            TouchMode::Idle => {}
        }
    }

    fn touch_end(&mut self, remaining: &[Touch]) {
        match self.touch {
            TouchMode::Stylus { id } => {
                if !remaining.iter().any(|t| t.id == id) {
                    self.events.push(CanvasEvent::EndStroke);
                    self.touch = TouchMode::Idle;
                }
            }
            TouchMode::Fingers(mut gesture) => {
                let fingers = self.finger_positions(remaining);
                if fingers.is_empty() {
                    // Pinch versus tap is decided only here, by how far the
                    // cumulative scale drifted from 1.0.
                    if (gesture.cumulative_scale - 1.0).abs() <= PINCH_TAP_TOLERANCE {
                        match gesture.max_count {
                            2 => self.events.push(CanvasEvent::Undo),
                            3 => self.events.push(CanvasEvent::Redo),
                            _ => {}
                        }
                    }
                    self.touch = TouchMode::Idle;
                } else {
                    // Re-anchor on the remaining contacts so pan and pinch
                    // tracking do not jump.
                    gesture.centroid = centroid(&fingers);
                    gesture.spread = spread(&fingers);
                    self.touch = TouchMode::Fingers(gesture);
                }
            }
            TouchMode::Idle => {}
        }
    }

    fn touch_cancel(&mut self) {
        if matches!(self.touch, TouchMode::Stylus { .. }) {
            self.events.push(CanvasEvent::EndStroke);
        }
        // cancelled finger gestures never become taps
        self.touch = TouchMode::Idle;
    }

    fn finger_positions(&self, touches: &[Touch]) -> Vec<Point> {
        touches
            .iter()
            .filter(|t| t.kind == TouchKind::Finger)
            .map(|t| self.scale(t.position))
            .collect()
    }

    // --- Keyboard ---

    /// Process a keyboard event. Modifier state is tracked continuously;
    /// meta+z / meta+shift+z emit undo / redo, regardless of focus.
    pub fn handle_key(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Pressed(key) => match key.as_str() {
                "Shift" => self.modifiers.shift = true,
                "Meta" => self.modifiers.meta = true,
                _ if key.eq_ignore_ascii_case("z") && self.modifiers.meta => {
                    if self.modifiers.shift {
                        self.events.push(CanvasEvent::Redo);
                    } else {
                        self.events.push(CanvasEvent::Undo);
                    }
                }
                _ => {}
            },
            KeyEvent::Released(key) => match key.as_str() {
                "Shift" => self.modifiers.shift = false,
                "Meta" => self.modifiers.meta = false,
                _ => {}
            },
        }
    }

    // --- Wheel ---

    /// Process a wheel tick: zoom anchored at the cursor, with a fixed
    /// sensitivity divisor.
    pub fn handle_wheel(&mut self, event: WheelEvent) {
        let factor = (-event.delta.y / WHEEL_ZOOM_DIVISOR).exp();
        self.events.push(CanvasEvent::ZoomAt {
            factor,
            center: self.scale(event.position),
        });
    }
}

fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    (sum / points.len() as f64).to_point()
}

fn spread(points: &[Point]) -> Option<f64> {
    match points {
        [a, b] => Some(a.distance(*b)),
        _ => None,
    }
}
