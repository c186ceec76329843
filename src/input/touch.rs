//! Touch drag sampler
//!
//! A drag that starts in the player's region of the screen (right side by
//! default) becomes an axis: vertical drag distance relative to the viewport
//! height, scaled by a sensitivity. No discrete actions.

use super::InputSample;
use crate::config::TouchConfig;

/// Viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    pointer_id: i32,
    start_y: f32,
    start_axis: f32,
}

#[derive(Debug, Clone)]
pub struct TouchInput {
    sensitivity: f32,
    region_start: f32,
    drag: Option<Drag>,
    axis: f32,
}

impl TouchInput {
    pub fn new(config: &TouchConfig) -> Self {
        Self {
            sensitivity: config.sensitivity,
            region_start: config.active_region_start,
            drag: None,
            axis: 0.0,
        }
    }

    /// Returns true if the pointer started a drag
    pub fn pointer_down(&mut self, pointer_id: i32, x: f32, y: f32, viewport: Viewport) -> bool {
        if self.drag.is_some() || x < viewport.width * self.region_start {
            return false;
        }
        self.drag = Some(Drag {
            pointer_id,
            start_y: y,
            start_axis: self.axis,
        });
        true
    }

    pub fn pointer_move(&mut self, pointer_id: i32, y: f32, viewport: Viewport) {
        let Some(drag) = self.drag else { return };
        if drag.pointer_id != pointer_id || viewport.height <= 0.0 {
            return;
        }
        // Screen Y grows downward; dragging up is positive
        let dy_norm = (drag.start_y - y) / viewport.height;
        self.axis = (drag.start_axis + dy_norm * self.sensitivity).clamp(-1.0, 1.0);
    }

    /// Pointer up or cancel
    pub fn pointer_end(&mut self, pointer_id: i32) {
        if self.drag.is_some_and(|d| d.pointer_id == pointer_id) {
            self.drag = None;
            self.axis = 0.0;
        }
    }

    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    pub fn sample(&self) -> InputSample {
        if self.is_active() {
            InputSample::axis(self.axis)
        } else {
            InputSample::neutral()
        }
    }
}
