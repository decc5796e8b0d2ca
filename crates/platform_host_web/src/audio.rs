//! Web Audio oscillator playback for window-manager feedback cues.
//!
//! One `AudioContext` is created lazily per thread and reused. Browsers keep it suspended until a
//! user gesture, so every playback first asks it to resume.

use platform_host::{AudioCueService, SoundCue};

#[derive(Debug, Clone, Copy, Default)]
/// Browser audio adapter synthesizing each cue with a sine oscillator and gain envelope.
pub struct WebAudioCueService;

impl AudioCueService for WebAudioCueService {
    fn play_cue(&self, cue: SoundCue) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            play_tone(cue.tone())
                .map_err(|err| format!("audio cue `{}` failed: {err:?}", cue.token()))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = cue;
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static AUDIO_CONTEXT: std::cell::RefCell<Option<web_sys::AudioContext>> =
        const { std::cell::RefCell::new(None) };
}

#[cfg(target_arch = "wasm32")]
fn audio_context() -> Result<web_sys::AudioContext, wasm_bindgen::JsValue> {
    AUDIO_CONTEXT.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(ctx) = slot.as_ref() {
            return Ok(ctx.clone());
        }
        let ctx = web_sys::AudioContext::new()?;
        *slot = Some(ctx.clone());
        Ok(ctx)
    })
}

#[cfg(target_arch = "wasm32")]
fn play_tone(tone: platform_host::ToneSpec) -> Result<(), wasm_bindgen::JsValue> {
    use platform_host::RELEASE_FLOOR_GAIN;
    use web_sys::{AudioContextState, OscillatorType};

    let ctx = audio_context()?;
    if ctx.state() == AudioContextState::Suspended {
        let _ = ctx.resume()?;
    }
    let now = ctx.current_time();

    let oscillator = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;
    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    oscillator.set_type(OscillatorType::Sine);
    let frequency = oscillator.frequency();
    frequency.set_value_at_time(tone.start_hz, now)?;
    if let Some(end_hz) = tone.end_hz {
        frequency.exponential_ramp_to_value_at_time(end_hz, now + tone.sweep_secs)?;
    }

    let envelope = gain.gain();
    envelope.set_value_at_time(0.0, now)?;
    envelope.linear_ramp_to_value_at_time(tone.peak_gain, now + tone.attack_secs)?;
    envelope.exponential_ramp_to_value_at_time(RELEASE_FLOOR_GAIN, now + tone.duration_secs)?;

    oscillator.start_with_when(now)?;
    oscillator.stop_with_when(now + tone.duration_secs)?;
    Ok(())
}
