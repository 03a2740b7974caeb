use crate::config;
use log::warn;
use macroquad::audio::{PlaySoundParams, Sound, load_sound, play_sound, play_sound_once, set_sound_volume};
use std::path::Path;

pub struct AudioManager {
    music: Option<Sound>,
    blade_sound: Option<Sound>,
    heal_sound: Option<Sound>,
    win_sound: Option<Sound>,
    music_on: bool,
}

impl AudioManager {
    pub fn new() -> Self {
        AudioManager {
            music: None,
            blade_sound: None,
            heal_sound: None,
            win_sound: None,
            music_on: true,
        }
    }

    // Load all optional sound assets; missing files are skipped
    pub async fn load_assets(&mut self, assets_dir: &Path) {
        self.music = load_sound(&assets_dir.join("bgm.ogg").to_string_lossy())
            .await
            .map_err(|e| {
                warn!("Failed to load background music 'bgm.ogg': {}", e);
                e
            })
            .ok();

        self.blade_sound = load_sound(&assets_dir.join("blade.ogg").to_string_lossy())
            .await
            .map_err(|e| {
                warn!("Failed to load blade sound 'blade.ogg': {}", e);
                e
            })
            .ok();

        self.heal_sound = load_sound(&assets_dir.join("heal.ogg").to_string_lossy())
            .await
            .map_err(|e| {
                warn!("Failed to load heal sound 'heal.ogg': {}", e);
                e
            })
            .ok();

        self.win_sound = load_sound(&assets_dir.join("win.ogg").to_string_lossy())
            .await
            .map_err(|e| {
                warn!("Failed to load win sound 'win.ogg': {}", e);
                e
            })
            .ok();
    }

    /// Starts the looping background track at the configured volume.
    pub fn start_music(&self) {
        if let Some(ref sound) = self.music {
            play_sound(
                sound,
                PlaySoundParams {
                    looped: true,
                    volume: if self.music_on { config::MUSIC_VOLUME } else { 0.0 },
                },
            );
        }
    }

    pub fn music_enabled(&self) -> bool {
        self.music_on
    }

    /// Settings toggle. The looping track keeps playing at zero volume so
    /// switching back on resumes where it left off.
    pub fn toggle_music(&mut self) {
        self.music_on = !self.music_on;
        if let Some(ref sound) = self.music {
            set_sound_volume(sound, if self.music_on { config::MUSIC_VOLUME } else { 0.0 });
        }
    }

    // Play the blade pickup sound if loaded
    pub fn play_blade(&self) {
        if let Some(ref sound) = self.blade_sound {
            play_sound_once(sound);
        }
    }

    // Play the heal pickup sound if loaded
    pub fn play_heal(&self) {
        if let Some(ref sound) = self.heal_sound {
            play_sound_once(sound);
        }
    }

    // Play the win sound if loaded
    pub fn play_win(&self) {
        if let Some(ref sound) = self.win_sound {
            play_sound_once(sound);
        }
    }
}
