//! Game settings and preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Ambient forest bed volume (0.0 - 1.0)
    pub ambient_volume: f32,

    // === Visual ===
    /// Burst particle effects on enemy deaths
    pub particles: bool,
    /// Drifting ambient motes
    pub ambient_motes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.5,
            sfx_volume: 1.0,
            ambient_volume: 0.16,
            particles: true,
            ambient_motes: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "forest_ray_settings";

    /// Effective sound effect gain
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Effective ambient bed gain
    pub fn effective_ambient_volume(&self) -> f32 {
        (self.master_volume * self.ambient_volume).clamp(0.0, 1.0)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_gains_mix_master_volume() {
        let settings = Settings::default();
        assert!((settings.effective_sfx_volume() - 0.5).abs() < 0.001);
        assert!((settings.effective_ambient_volume() - 0.08).abs() < 0.001);
    }

    #[test]
    fn test_effective_gains_clamped() {
        let settings = Settings {
            master_volume: 3.0,
            sfx_volume: 2.0,
            ambient_volume: -1.0,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 1.0);
        assert_eq!(settings.effective_ambient_volume(), 0.0);
    }
}
