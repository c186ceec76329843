//! Sound cue table and the sink the session plays cues through

use crate::sim::SoundName;

/// A short sine beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_sec: f32,
}

impl SoundName {
    pub fn tone(self) -> Tone {
        let (frequency_hz, duration_sec) = match self {
            SoundName::Paddle => (880.0, 0.05),
            SoundName::Wall => (660.0, 0.05),
            SoundName::Score => (520.0, 0.12),
            SoundName::GameOver => (220.0, 0.25),
            SoundName::Calibrate => (740.0, 0.08),
        };
        Tone {
            frequency_hz,
            duration_sec,
        }
    }
}

/// Anything that can play a cue
pub trait SoundSink {
    fn play(&mut self, name: SoundName);
}

/// Records cues in order
impl SoundSink for Vec<SoundName> {
    fn play(&mut self, name: SoundName) {
        self.push(name);
    }
}
