//! Edge detection for discrete buttons

/// Rising-edge detector for polled buttons (gamepads)
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    prev: bool,
}

impl EdgeDetector {
    /// Feed the current pressed state; true only on released -> pressed
    pub fn update(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.prev;
        self.prev = pressed;
        edge
    }

    pub fn reset(&mut self) {
        self.prev = false;
    }
}

/// Latches a key press from event callbacks until a tick consumes it.
///
/// Auto-repeat keydowns do not re-arm the latch, and a press released before
/// the next tick is still delivered once.
#[derive(Debug, Clone, Copy, Default)]
pub struct PressLatch {
    held: bool,
    pending: bool,
}

impl PressLatch {
    pub fn press(&mut self) {
        if !self.held {
            self.pending = true;
        }
        self.held = true;
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    /// Consume the pending press
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}
