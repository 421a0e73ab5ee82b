//! Best-score persistence and share message formatting
//!
//! One LocalStorage entry holding the best score ever achieved, stored as a
//! decimal string. Absent or unparsable values default to zero.

/// The persisted best score; monotonically non-decreasing across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore(u32);

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "diwali_best_score_v3";

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Record a session score. Returns true when it beats the stored best,
    /// in which case the new best is persisted.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.0 {
            self.0 = score;
            self.save();
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(text)) = storage.get_item(Self::STORAGE_KEY)
            && let Ok(best) = text.parse::<u32>()
        {
            log::info!("Loaded best score: {best}");
            return Self(best);
        }

        log::info!("No best score stored, starting at 0");
        Self(0)
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    fn save(&self) {
        if let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.0.to_string());
            log::info!("Best score saved: {}", self.0);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self(0)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save(&self) {
        // No-op for native
    }
}

/// Message used by the native share sheet and the clipboard fallback
pub fn share_text(score: u32, url: &str) -> String {
    format!("Happy Diwali! \u{1FA94} I scored {score}! Play here: {url}")
}
