//! Ball trail history for rendering

use glam::Vec2;

/// Fixed-length position history, newest first
#[derive(Debug, Clone)]
pub struct Trail {
    points: Vec<Vec2>,
    len: usize,
}

impl Trail {
    pub fn new(segments: usize) -> Self {
        let len = segments.max(1);
        Self {
            points: vec![Vec2::ZERO; len],
            len,
        }
    }

    /// Record the current ball position (call once per frame)
    pub fn record(&mut self, pos: Vec2) {
        self.points.insert(0, pos);
        self.points.truncate(self.len);
    }

    /// Collapse every segment onto `pos` (after a re-serve)
    pub fn reset(&mut self, pos: Vec2) {
        self.points.fill(pos);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Segments with their render scale; the head is full size
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        let n = self.len as f32;
        self.points
            .iter()
            .enumerate()
            .map(move |(i, &p)| (p, 1.0 - i as f32 / n))
    }
}
