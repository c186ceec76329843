//! Audio system using Web Audio API
//!
//! Every cue is a short procedurally generated sine beep; see
//! `SoundName::tone` for the table.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::present::{SoundSink, Tone};
use crate::sim::SoundName;

/// Peak gain of a beep
const BEEP_PEAK: f32 = 0.08;
/// Envelope floor (exponential ramps can't reach zero)
const SILENT: f32 = 0.0001;
/// Attack time in seconds
const ATTACK_SEC: f64 = 0.01;

/// Beeper for the game's sound cues
pub struct AudioManager {
    ctx: Option<AudioContext>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx }
    }

    /// Resume audio context (required after user gesture)
    pub fn unlock(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Play a single tone
    pub fn beep(&self, tone: Tone) {
        let Some(ctx) = &self.ctx else { return };
        let Some((osc, gain)) = self.create_osc(ctx, tone.frequency_hz) else {
            return;
        };

        let t = ctx.current_time();
        let dur = tone.duration_sec as f64;
        gain.gain().set_value_at_time(SILENT, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(BEEP_PEAK, t + ATTACK_SEC)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(SILENT, t + dur)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + dur + 0.02).ok();
    }

    /// Create a sine oscillator routed through a fresh gain node
    fn create_osc(&self, ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}

impl SoundSink for AudioManager {
    fn play(&mut self, name: SoundName) {
        self.beep(name.tone());
    }
}
