//! The replicated stroke log with undo/redo.

use crate::protocol::Snapshot;
use crate::stroke::Stroke;

/// The shared append/undo/redo history whose visible prefix is the drawing.
///
/// `visible` counts how many strokes are currently shown. When it is less
/// than the stroke count, the tail can be redone; appending while such a
/// tail exists discards it for good. Every participant applies the same
/// command sequence in the same order (the relay's job), so all logs
/// converge to the same `strokes`/`visible` pair. Undo and redo are global,
/// not per-author: any participant can undo any stroke.
#[derive(Debug, Clone, Default)]
pub struct StrokeLog {
    strokes: Vec<Stroke>,
    visible: usize,
}

impl StrokeLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a log from a join-time snapshot; the whole snapshot is visible.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let visible = snapshot.strokes.len();
        Self {
            strokes: snapshot.strokes,
            visible,
        }
    }

    /// Commit a stroke. Any redo tail is truncated first, then the stroke
    /// becomes the last visible one. Never fails.
    pub fn append(&mut self, stroke: Stroke) {
        self.strokes.truncate(self.visible);
        self.strokes.push(stroke);
        self.visible = self.strokes.len();
    }

    /// Hide the most recent visible stroke. No-op when nothing is visible.
    pub fn undo(&mut self) {
        if self.visible > 0 {
            self.visible -= 1;
        }
    }

    /// Re-show the next hidden stroke. No-op when nothing is hidden.
    pub fn redo(&mut self) {
        if self.visible < self.strokes.len() {
            self.visible += 1;
        }
    }

    /// Clear the whole log. Irreversible.
    pub fn reset(&mut self) {
        self.strokes.clear();
        self.visible = 0;
    }

    /// The strokes that should currently be drawn, in commit order.
    pub fn visible_strokes(&self) -> &[Stroke] {
        &self.strokes[..self.visible]
    }

    /// Number of visible strokes.
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    /// Total strokes held, including any redo tail.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Whether the log holds no strokes at all.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Check if undo would change anything.
    pub fn can_undo(&self) -> bool {
        self.visible > 0
    }

    /// Check if redo would change anything.
    pub fn can_redo(&self) -> bool {
        self.visible < self.strokes.len()
    }

    /// Export the visible drawing as a snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            strokes: self.visible_strokes().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{BrushKind, StrokePoint};

    fn stroke(tag: f64) -> Stroke {
        let mut stroke = Stroke::new("black", BrushKind::Pen, 8.0);
        stroke.push(StrokePoint::new(tag, 0.0, 0.2));
        stroke.push(StrokePoint::new(tag, 1.0, 0.2));
        stroke
    }

    #[test]
    fn test_append_to_empty_log() {
        let mut log = StrokeLog::new();
        log.append(stroke(0.0));
        assert_eq!(log.len(), 1);
        assert_eq!(log.visible_count(), 1);
    }

    #[test]
    fn test_append_destroys_redo_tail() {
        let mut log = StrokeLog::new();
        log.append(stroke(1.0));
        log.append(stroke(2.0));
        log.append(stroke(3.0));
        log.undo();
        log.undo();
        assert_eq!(log.visible_count(), 1);

        let replacement = stroke(4.0);
        log.append(replacement.clone());
        assert_eq!(log.len(), 2);
        assert_eq!(log.visible_count(), 2);
        assert_eq!(log.visible_strokes()[1], replacement);

        // strokes 2 and 3 are unreachable now
        log.redo();
        assert_eq!(log.visible_count(), 2);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_undo_redo_inverse() {
        let mut log = StrokeLog::new();
        let committed = stroke(7.0);
        log.append(committed.clone());
        log.undo();
        assert!(log.visible_strokes().is_empty());
        log.redo();
        assert_eq!(log.visible_strokes(), &[committed]);
    }

    #[test]
    fn test_boundary_ops_are_noops() {
        let mut log = StrokeLog::new();
        log.undo();
        assert_eq!(log.visible_count(), 0);

        log.append(stroke(1.0));
        log.redo();
        assert_eq!(log.visible_count(), 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_invariant_under_random_sequences() {
        // splitmix32-style mixing for a deterministic operation stream
        let mut state = 0x9E3779B9u32;
        let mut next = move || {
            state = state.wrapping_mul(0x85EBCA6B).wrapping_add(1);
            let mut x = state;
            x ^= x >> 16;
            x = x.wrapping_mul(0xC2B2AE35);
            x ^= x >> 13;
            x
        };

        let mut log = StrokeLog::new();
        for i in 0..500 {
            match next() % 4 {
                0 => log.append(stroke(i as f64)),
                1 => log.undo(),
                2 => log.redo(),
                _ => {
                    if next() % 16 == 0 {
                        log.reset();
                    } else {
                        log.append(stroke(i as f64));
                    }
                }
            }
            assert!(log.visible_count() <= log.len());
            assert_eq!(log.visible_strokes().len(), log.visible_count());
        }
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut log = StrokeLog::new();
        log.append(stroke(1.0));
        log.append(stroke(2.0));
        log.undo();
        log.reset();
        assert!(log.is_empty());
        assert_eq!(log.visible_count(), 0);
        assert!(!log.can_undo());
        assert!(!log.can_redo());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut log = StrokeLog::new();
        log.append(stroke(1.0));
        log.append(stroke(2.0));
        log.undo();

        // only the visible prefix is exported
        let snapshot = log.snapshot();
        assert_eq!(snapshot.strokes.len(), 1);

        let seeded = StrokeLog::from_snapshot(snapshot);
        assert_eq!(seeded.visible_count(), 1);
        assert!(!seeded.can_redo());
    }
}
