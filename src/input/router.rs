//! Picks the one sampler whose output drives this tick

use super::{InputSample, InputSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouterFlags {
    pub xr_presenting: bool,
    pub touch_active: bool,
}

/// This tick's sample from every sampler
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SourceSamples {
    pub xr: InputSample,
    pub touch: InputSample,
    pub desktop: InputSample,
}

impl SourceSamples {
    pub fn get(&self, source: InputSource) -> InputSample {
        match source {
            InputSource::Xr => self.xr,
            InputSource::Touch => self.touch,
            InputSource::Desktop => self.desktop,
        }
    }
}

/// XR while presenting, else touch while dragging, else desktop
pub fn select_source(flags: RouterFlags) -> InputSource {
    if flags.xr_presenting {
        InputSource::Xr
    } else if flags.touch_active {
        InputSource::Touch
    } else {
        InputSource::Desktop
    }
}

pub fn pick_input(flags: RouterFlags, samples: &SourceSamples) -> InputSample {
    samples.get(select_source(flags))
}
