//! Persisted best score
//!
//! A single number in LocalStorage, read at session start and rewritten
//! only when beaten. Native builds keep the in-memory value.

use serde::{Deserialize, Serialize};

/// The persisted best score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "forest_ray_highscore";

    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Would this score replace the stored best?
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a new score; returns true when the best was beaten
    pub fn record(&mut self, score: u32) -> bool {
        if self.qualifies(score) {
            self.best = score;
            return true;
        }
        false
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(score) = serde_json::from_str::<HighScore>(&json) {
                    log::info!("Loaded high score: {}", score.best);
                    return score;
                }
            }
        }

        log::info!("No high score found, starting fresh");
        Self::new()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High score saved ({})", self.best);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
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
    fn test_record_keeps_best() {
        let mut hs = HighScore::new();
        assert!(hs.record(100));
        assert!(!hs.record(50));
        assert_eq!(hs.best, 100);
        assert!(hs.record(150));
        assert_eq!(hs.best, 150);
    }

    #[test]
    fn test_equal_score_does_not_qualify() {
        let mut hs = HighScore { best: 100 };
        assert!(!hs.qualifies(100));
        assert!(!hs.record(100));
    }
}
