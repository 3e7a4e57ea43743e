//! Audio engine contract
//!
//! The simulation only emits cues; the manager applies volume and mute and
//! hands them to a backend. Playback itself belongs to the host platform.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Looping music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicTrack {
    /// Ambient loop started with the gameplay scene
    Background,
}

impl MusicTrack {
    pub fn file_name(&self) -> &'static str {
        match self {
            MusicTrack::Background => "background-music-aac.caf",
        }
    }
}

/// Fire-and-forget sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player dragged
    Pew,
}

impl SoundEffect {
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Pew => "pew-pew-lei.caf",
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Start a track looping indefinitely at the given volume
    fn play_loop(&mut self, track: MusicTrack, volume: f32);
    /// Play a one-shot effect without waiting for it to finish
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only records cues in the log
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_loop(&mut self, track: MusicTrack, volume: f32) {
        log::info!("Music loop: {} (vol {:.2})", track.file_name(), volume);
    }

    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("Sound: {} (vol {:.2})", effect.file_name(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Create a manager using the volumes from `settings`
    pub fn from_settings(backend: Box<dyn AudioBackend>, settings: &Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_music_volume(settings.music_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Start a looping track
    pub fn play_music(&mut self, track: MusicTrack) {
        let vol = self.effective_volume(self.music_volume);
        if vol <= 0.0 {
            return;
        }
        self.backend.play_loop(track, vol);
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        self.backend.play_effect(effect, vol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum Cue {
        Loop(MusicTrack, f32),
        Effect(SoundEffect, f32),
    }

    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<Cue>>>);

    impl AudioBackend for Recorder {
        fn play_loop(&mut self, track: MusicTrack, volume: f32) {
            self.0.borrow_mut().push(Cue::Loop(track, volume));
        }

        fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
            self.0.borrow_mut().push(Cue::Effect(effect, volume));
        }
    }

    #[test]
    fn test_volume_scaling() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        audio.set_music_volume(1.0);

        audio.play(SoundEffect::Pew);
        audio.play_music(MusicTrack::Background);
        assert_eq!(
            *recorder.0.borrow(),
            vec![
                Cue::Effect(SoundEffect::Pew, 0.25),
                Cue::Loop(MusicTrack::Background, 0.5)
            ]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_muted(true);
        audio.play(SoundEffect::Pew);
        audio.play_music(MusicTrack::Background);
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn test_volume_is_clamped() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_master_volume(3.0);
        audio.set_sfx_volume(-1.0);
        audio.play(SoundEffect::Pew);
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn test_from_settings() {
        let recorder = Recorder::default();
        let settings = Settings {
            master_volume: 1.0,
            music_volume: 0.25,
            ..Settings::default()
        };
        let mut audio = AudioManager::from_settings(Box::new(recorder.clone()), &settings);
        audio.play_music(MusicTrack::Background);
        assert_eq!(
            *recorder.0.borrow(),
            vec![Cue::Loop(MusicTrack::Background, 0.25)]
        );
    }
}
