//! Audio system using Web Audio API
//!
//! Procedurally generated cues, no sound files. The native build has no
//! audio backend and only logs which cue would have played.

use crate::Settings;
use crate::sim::{GameEvent, MusicTrack};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A cat came through the door
    Doorbell,
    /// Item picked up from a station or set down for a cat
    PickupOrDrop,
    /// Right order delivered
    Happy,
    /// Wrong order offered
    Rejected,
    /// A seated cat is getting impatient
    Meow,
    /// Session started
    GameplayJingle,
    /// Session ended
    GameOverJingle,
}

impl SoundEffect {
    /// The cue for a simulation event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Doorbell => SoundEffect::Doorbell,
            GameEvent::PickupOrDrop => SoundEffect::PickupOrDrop,
            GameEvent::Happy => SoundEffect::Happy,
            GameEvent::Rejected => SoundEffect::Rejected,
            GameEvent::Impatient { .. } => SoundEffect::Meow,
            GameEvent::Music(MusicTrack::Gameplay) => SoundEffect::GameplayJingle,
            GameEvent::Music(MusicTrack::GameOver) => SoundEffect::GameOverJingle,
        }
    }

    /// Music cues follow the music volume, everything else the sfx volume
    pub fn is_music(self) -> bool {
        matches!(
            self,
            SoundEffect::GameplayJingle | SoundEffect::GameOverJingle
        )
    }

    /// Volume to play this cue at
    pub fn volume(self, settings: &Settings) -> f32 {
        if self.is_music() {
            settings.effective_music_volume()
        } else {
            settings.effective_sfx_volume()
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(not(target_arch = "wasm32"))]
pub use native::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::Settings;
    use crate::sim::GameEvent;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        settings: Settings,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                settings: settings.clone(),
            }
        }

        /// Pick up new volumes or mute state
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.settings = settings.clone();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play the cue for a simulation event
        pub fn handle(&self, event: &GameEvent) {
            self.play(SoundEffect::for_event(event));
        }

        /// Play a sound cue
        pub fn play(&self, effect: SoundEffect) {
            let vol = effect.volume(&self.settings);
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Doorbell => self.play_doorbell(ctx, vol),
                SoundEffect::PickupOrDrop => self.play_clink(ctx, vol),
                SoundEffect::Happy => self.play_notes(
                    ctx,
                    vol * 0.25,
                    &[600.0, 800.0, 1000.0],
                    0.08,
                    OscillatorType::Sine,
                ),
                SoundEffect::Rejected => self.play_buzz(ctx, vol),
                SoundEffect::Meow => self.play_meow(ctx, vol),
                SoundEffect::GameplayJingle => self.play_notes(
                    ctx,
                    vol * 0.3,
                    &[523.0, 659.0, 784.0, 1046.0],
                    0.12,
                    OscillatorType::Triangle,
                ),
                SoundEffect::GameOverJingle => self.play_notes(
                    ctx,
                    vol * 0.3,
                    &[400.0, 350.0, 300.0, 200.0],
                    0.2,
                    OscillatorType::Sine,
                ),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// A run of short notes, `step` seconds apart
        fn play_notes(
            &self,
            ctx: &AudioContext,
            level: f32,
            freqs: &[f32],
            step: f64,
            osc_type: OscillatorType,
        ) {
            for (i, freq) in freqs.iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) else {
                    continue;
                };
                let t = ctx.current_time() + i as f64 * step;
                gain.gain().set_value_at_time(level, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + step * 1.8)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + step * 2.0).ok();
            }
        }

        /// Doorbell - ding dong
        fn play_doorbell(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [880.0, 660.0].iter().enumerate() {
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + i as f64 * 0.25;
                    gain.gain().set_value_at_time(vol * 0.35, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.45)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.5).ok();
                }
            }
        }

        /// Plate clink - short bright tap
        fn play_clink(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 1400.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.06)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.08).ok();
        }

        /// Wrong order - low grumble
        fn play_buzz(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(90.0, t + 0.25)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        /// Impatient meow - rise then fall
        fn play_meow(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 500.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(0.01, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(vol * 0.2, t + 0.08)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.frequency().set_value_at_time(500.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(900.0, t + 0.12)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(420.0, t + 0.4)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.45).ok();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::SoundEffect;
    use crate::Settings;
    use crate::sim::GameEvent;

    /// Headless stand-in, logs cues instead of playing them
    pub struct AudioManager {
        settings: Settings,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            Self {
                settings: settings.clone(),
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.settings = settings.clone();
        }

        pub fn resume(&self) {}

        pub fn handle(&self, event: &GameEvent) {
            self.play(SoundEffect::for_event(event));
        }

        pub fn play(&self, effect: SoundEffect) {
            let vol = effect.volume(&self.settings);
            if vol > 0.0 {
                log::debug!("Audio cue {:?} at volume {:.2}", effect, vol);
            }
        }
    }
}
