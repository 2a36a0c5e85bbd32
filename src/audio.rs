//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed. The
//! simulation never waits on any of this; a missing AudioContext just
//! means silence.

use web_sys::{
    AudioBufferSourceNode, AudioContext, BiquadFilterType, GainNode, OscillatorNode,
    OscillatorType,
};

use crate::sim::{GameEvent, WeaponKind};

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    ambient_source: Option<AudioBufferSourceNode>,
    /// Effective gains, pre-mixed with the master volume by the settings
    sfx_gain: f32,
    ambient_gain: f32,
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
        Self {
            ctx,
            ambient_source: None,
            sfx_gain: 0.5,
            ambient_gain: 0.08,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set the effective gains (see [`crate::Settings::effective_sfx_volume`])
    pub fn set_volumes(&mut self, sfx_gain: f32, ambient_gain: f32) {
        self.sfx_gain = sfx_gain.clamp(0.0, 1.0);
        self.ambient_gain = ambient_gain.clamp(0.0, 1.0);
    }

    /// React to one simulation event
    pub fn handle(&self, event: &GameEvent) {
        let vol = self.sfx_gain;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match event {
            GameEvent::Fired(kind) => self.play_shot(ctx, *kind, vol),
            GameEvent::Explosion => self.play_explosion(ctx, vol),
            GameEvent::GameOver => self.play_game_over(ctx, vol),
            GameEvent::HighScore(_) => {}
        }
    }

    /// Start the looping forest bed: a 2s random-walk noise buffer through
    /// a gentle bandpass. Idempotent; call on the first user gesture.
    pub fn start_ambient(&mut self) {
        if self.ambient_source.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        let sample_rate = ctx.sample_rate();
        let length = (2.0 * sample_rate) as u32;
        let Ok(buffer) = ctx.create_buffer(1, length, sample_rate) else {
            return;
        };

        let mut data = vec![0.0f32; length as usize];
        let mut v = 0.0f32;
        for sample in data.iter_mut() {
            v += (js_sys::Math::random() as f32 * 2.0 - 1.0) * 0.02;
            v *= 0.98;
            *sample = v;
        }
        if buffer.copy_to_channel(&data, 0).is_err() {
            return;
        }

        let Ok(source) = ctx.create_buffer_source() else {
            return;
        };
        source.set_buffer(Some(&buffer));
        source.set_loop(true);

        let Ok(bandpass) = ctx.create_biquad_filter() else {
            return;
        };
        bandpass.set_type(BiquadFilterType::Bandpass);
        bandpass.frequency().set_value(500.0);
        bandpass.q().set_value(0.4);

        let Ok(gain) = ctx.create_gain() else { return };
        gain.gain().set_value(self.ambient_gain);

        let wired = source.connect_with_audio_node(&bandpass).is_ok()
            && bandpass.connect_with_audio_node(&gain).is_ok()
            && gain.connect_with_audio_node(&ctx.destination()).is_ok();
        if wired && source.start().is_ok() {
            log::info!("Ambient bed started");
            self.ambient_source = Some(source);
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

    /// Weapon shot - a short descending square chirp, pitched per mode
    fn play_shot(&self, ctx: &AudioContext, kind: WeaponKind, vol: f32) {
        let (start_freq, end_freq, sweep, peak, decay) = match kind {
            WeaponKind::Normal => (1400.0, 700.0, 0.08, 0.25, 0.12),
            WeaponKind::Spread => (1500.0, 900.0, 0.07, 0.22, 0.12),
            WeaponKind::Heavy => (900.0, 380.0, 0.12, 0.28, 0.18),
        };

        let Some((osc, gain)) = self.create_osc(ctx, start_freq, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(start_freq, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(end_freq, t + sweep)
            .ok();
        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(vol * peak, t + 0.02)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + decay)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Enemy explosion - a lowpassed white-noise burst
    fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
        let sample_rate = ctx.sample_rate();
        let length = (0.3 * sample_rate) as u32;
        let Ok(buffer) = ctx.create_buffer(1, length, sample_rate) else {
            return;
        };

        let mut data = vec![0.0f32; length as usize];
        for sample in data.iter_mut() {
            *sample = js_sys::Math::random() as f32 * 2.0 - 1.0;
        }
        if buffer.copy_to_channel(&data, 0).is_err() {
            return;
        }

        let Ok(source) = ctx.create_buffer_source() else {
            return;
        };
        source.set_buffer(Some(&buffer));

        let Ok(lowpass) = ctx.create_biquad_filter() else {
            return;
        };
        lowpass.set_type(BiquadFilterType::Lowpass);
        lowpass.frequency().set_value(1600.0);

        let Ok(gain) = ctx.create_gain() else { return };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(vol * 0.35, t + 0.02)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + 0.3)
            .ok();

        let wired = source.connect_with_audio_node(&lowpass).is_ok()
            && lowpass.connect_with_audio_node(&gain).is_ok()
            && gain.connect_with_audio_node(&ctx.destination()).is_ok();
        if wired {
            source.start().ok();
        }
    }

    /// Game over - sad descending tones
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}
