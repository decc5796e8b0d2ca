//! Audio cue contracts and tone parameters for window-manager feedback sounds.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

/// Short UI feedback sounds requested by the desktop runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundCue {
    /// A window became visible.
    WindowOpen,
    /// A window was dismissed.
    WindowClose,
    /// An icon or control was activated.
    Tap,
    /// A desktop icon became selected.
    Select,
}

impl SoundCue {
    /// Stable token used in logs and diagnostics.
    pub const fn token(self) -> &'static str {
        match self {
            Self::WindowOpen => "window-open",
            Self::WindowClose => "window-close",
            Self::Tap => "tap",
            Self::Select => "select",
        }
    }

    /// Oscillator parameters used to synthesize the cue.
    pub const fn tone(self) -> ToneSpec {
        match self {
            Self::WindowOpen => ToneSpec {
                start_hz: 400.0,
                end_hz: Some(600.0),
                sweep_secs: 0.15,
                peak_gain: 0.15,
                attack_secs: 0.02,
                duration_secs: 0.2,
            },
            Self::WindowClose => ToneSpec {
                start_hz: 600.0,
                end_hz: Some(400.0),
                sweep_secs: 0.15,
                peak_gain: 0.15,
                attack_secs: 0.02,
                duration_secs: 0.2,
            },
            Self::Tap => ToneSpec {
                start_hz: 800.0,
                end_hz: None,
                sweep_secs: 0.0,
                peak_gain: 0.08,
                attack_secs: 0.005,
                duration_secs: 0.04,
            },
            Self::Select => ToneSpec {
                start_hz: 500.0,
                end_hz: None,
                sweep_secs: 0.0,
                peak_gain: 0.06,
                attack_secs: 0.01,
                duration_secs: 0.06,
            },
        }
    }
}

/// Sine-oscillator sweep with a linear attack and exponential release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    /// Starting frequency.
    pub start_hz: f32,
    /// Frequency reached after `sweep_secs`, or `None` for a flat tone.
    pub end_hz: Option<f32>,
    /// Length of the frequency sweep.
    pub sweep_secs: f64,
    /// Gain reached at the end of the attack.
    pub peak_gain: f32,
    /// Attack length.
    pub attack_secs: f64,
    /// Total tone length; the oscillator stops here.
    pub duration_secs: f64,
}

/// Gain the release ramps toward before the oscillator stops.
pub const RELEASE_FLOOR_GAIN: f32 = 0.01;

/// Host service for playing UI feedback sounds.
pub trait AudioCueService {
    /// Plays one cue. Failures are reported but never fatal to the caller.
    fn play_cue(&self, cue: SoundCue) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Silent audio service for unsupported targets.
pub struct NoopAudioCueService;

impl AudioCueService for NoopAudioCueService {
    fn play_cue(&self, _cue: SoundCue) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory audio service that records every requested cue.
pub struct MemoryAudioCueService {
    played: Rc<RefCell<Vec<SoundCue>>>,
}

impl MemoryAudioCueService {
    /// Returns the cues played so far, oldest first.
    pub fn played(&self) -> Vec<SoundCue> {
        self.played.borrow().clone()
    }
}

impl AudioCueService for MemoryAudioCueService {
    fn play_cue(&self, cue: SoundCue) -> Result<(), String> {
        self.played.borrow_mut().push(cue);
        Ok(())
    }
}
