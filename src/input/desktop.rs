//! Keyboard sampler
//!
//! W / ArrowUp moves up, S / ArrowDown moves down, C calibrates, R restarts.
//! K toggles board placement and P logs the current placement; those two
//! bypass the router and are read by the session every frame.

use super::edge::PressLatch;
use super::{DiscreteActions, InputSample};

/// Logical meaning of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Up,
    Down,
    Calibrate,
    Restart,
    TogglePlacement,
    LogPlacement,
}

/// Board placement keys pressed since the last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementActions {
    pub toggle: bool,
    pub log: bool,
}

impl KeyAction {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" | "W" | "ArrowUp" => Some(KeyAction::Up),
            "s" | "S" | "ArrowDown" => Some(KeyAction::Down),
            "c" | "C" => Some(KeyAction::Calibrate),
            "r" | "R" => Some(KeyAction::Restart),
            "k" | "K" => Some(KeyAction::TogglePlacement),
            "p" | "P" => Some(KeyAction::LogPlacement),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DesktopInput {
    up_held: bool,
    down_held: bool,
    /// Last-pressed direction wins: +1, -1 or 0
    axis: f32,
    calibrate: PressLatch,
    restart: PressLatch,
    toggle_placement: PressLatch,
    log_placement: PressLatch,
}

impl DesktopInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key is bound
    pub fn key_down(&mut self, key: &str) -> bool {
        let Some(action) = KeyAction::from_key(key) else {
            return false;
        };
        match action {
            KeyAction::Up => {
                self.up_held = true;
                self.axis = 1.0;
            }
            KeyAction::Down => {
                self.down_held = true;
                self.axis = -1.0;
            }
            KeyAction::Calibrate => self.calibrate.press(),
            KeyAction::Restart => self.restart.press(),
            KeyAction::TogglePlacement => self.toggle_placement.press(),
            KeyAction::LogPlacement => self.log_placement.press(),
        }
        true
    }

    /// Returns true if the key is bound
    pub fn key_up(&mut self, key: &str) -> bool {
        let Some(action) = KeyAction::from_key(key) else {
            return false;
        };
        match action {
            KeyAction::Up => {
                self.up_held = false;
                if self.axis > 0.0 {
                    self.axis = if self.down_held { -1.0 } else { 0.0 };
                }
            }
            KeyAction::Down => {
                self.down_held = false;
                if self.axis < 0.0 {
                    self.axis = if self.up_held { 1.0 } else { 0.0 };
                }
            }
            KeyAction::Calibrate => self.calibrate.release(),
            KeyAction::Restart => self.restart.release(),
            KeyAction::TogglePlacement => self.toggle_placement.release(),
            KeyAction::LogPlacement => self.log_placement.release(),
        }
        true
    }

    /// Drop all held keys (window lost focus, keyups will never arrive)
    pub fn release_all(&mut self) {
        self.up_held = false;
        self.down_held = false;
        self.axis = 0.0;
        self.calibrate.release();
        self.restart.release();
        self.toggle_placement.release();
        self.log_placement.release();
    }

    pub fn axis(&self) -> f32 {
        self.axis
    }

    /// Per-tick sample; consumes pending action presses
    pub fn sample(&mut self) -> InputSample {
        InputSample {
            move_y: Some(self.axis),
            actions: DiscreteActions {
                calibrate_pressed: self.calibrate.take(),
                restart_pressed: self.restart.take(),
            },
        }
    }

    /// Consumes pending placement key presses
    pub fn take_placement_actions(&mut self) -> PlacementActions {
        PlacementActions {
            toggle: self.toggle_placement.take(),
            log: self.log_placement.take(),
        }
    }
}
