//! Audio cues for simulation events
//!
//! The simulation only emits [`GameEvent`] values. This module maps them to
//! simple tones that an audio backend can synthesise; playing them is left to
//! whatever hosts the game.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Square,
    Sawtooth,
    Sine,
}

/// A single tone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub freq_hz: f32,
    pub duration_ms: u32,
    pub waveform: Waveform,
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Laser fired
    Laser,
    /// Enemy destroyed
    Explosion,
    /// Humanoid caught or delivered
    Rescue,
    /// Humanoid killed by a fall
    Death,
    /// Session over
    GameOver,
}

impl SoundEffect {
    /// Effect for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Fired => Some(SoundEffect::Laser),
            GameEvent::Exploded => Some(SoundEffect::Explosion),
            GameEvent::Rescued => Some(SoundEffect::Rescue),
            GameEvent::HumanoidDied => Some(SoundEffect::Death),
            GameEvent::GameOver(_) => Some(SoundEffect::GameOver),
        }
    }

    /// Tones to play, in order
    pub fn tones(self) -> Vec<Tone> {
        match self {
            SoundEffect::Laser => vec![tone(440.0, 100, Waveform::Square)],
            SoundEffect::Explosion => vec![tone(220.0, 400, Waveform::Sawtooth)],
            SoundEffect::Rescue => vec![tone(880.0, 200, Waveform::Sine)],
            SoundEffect::Death => vec![tone(150.0, 500, Waveform::Sawtooth)],
            SoundEffect::GameOver => [400.0, 350.0, 300.0, 200.0]
                .iter()
                .map(|&freq| tone(freq, 150, Waveform::Square))
                .collect(),
        }
    }
}

fn tone(freq_hz: f32, duration_ms: u32, waveform: Waveform) -> Tone {
    Tone {
        freq_hz,
        duration_ms,
        waveform,
    }
}

/// Volume state and the queue of effects waiting for the backend
#[derive(Debug, Clone)]
pub struct AudioQueue {
    master_volume: f32,
    muted: bool,
    queued: Vec<SoundEffect>,
}

impl Default for AudioQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioQueue {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            queued: Vec::new(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Queue the effects for one tick's events
    pub fn push_events(&mut self, events: &[GameEvent]) {
        if self.muted {
            return;
        }
        self.queued
            .extend(events.iter().filter_map(SoundEffect::for_event));
    }

    /// Hand the queued effects to the backend
    pub fn drain(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.queued)
    }
}
