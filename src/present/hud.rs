//! HUD text model: score line plus a timed message
//!
//! Drawing is left to the renderer; this only tracks what to show.

use crate::config::HudConfig;

#[derive(Debug, Clone)]
pub struct Hud {
    default_ms: u32,
    score_line: String,
    message: String,
    /// Seconds left before the message clears; 0 = shown until replaced
    remaining_sec: f32,
}

impl Hud {
    pub fn new(config: &HudConfig) -> Self {
        Self {
            default_ms: config.message_default_duration_ms,
            score_line: score_text(0, 0),
            message: "Welcome".to_string(),
            remaining_sec: 0.0,
        }
    }

    pub fn set_score(&mut self, ai: u32, player: u32) {
        self.score_line = score_text(ai, player);
    }

    /// Show `text` for `ms` milliseconds, or the configured default
    pub fn set_message(&mut self, text: &str, ms: Option<u32>) {
        self.message.clear();
        self.message.push_str(text);
        self.remaining_sec = ms.unwrap_or(self.default_ms) as f32 / 1000.0;
    }

    /// Count the message timer down; returns true when the message cleared
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining_sec <= 0.0 {
            return false;
        }
        self.remaining_sec -= dt;
        if self.remaining_sec <= 0.0 {
            self.remaining_sec = 0.0;
            self.message.clear();
            return true;
        }
        false
    }

    pub fn score_line(&self) -> &str {
        &self.score_line
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn score_text(ai: u32, player: u32) -> String {
    format!("AI {} : {} Player", ai, player)
}
