/// Application configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PDF_PICKER_DATA_DIR";

/// Smallest accepted inline size limit (1 KiB).
const MIN_INLINE_LIMIT_BYTES: u64 = 1024;

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Keep opened files' bytes in the history so they can be reopened
    /// without the original file. Off by default to keep the store small.
    pub save_inline_content: bool,
    /// Files larger than this are remembered without their content even
    /// when `save_inline_content` is on.
    pub inline_content_limit_bytes: u64,
    /// Hand opened documents to the system viewer.
    pub launch_viewer: bool,
    /// Where the history store lives. Empty = platform default.
    pub data_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            save_inline_content: false,
            inline_content_limit_bytes: 8 * 1024 * 1024,
            launch_viewer: true,
            data_dir: String::new(),
        }
    }
}

impl AppConfig {
    /// Returns the config file path: exe directory + `pdf-picker.json`.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("pdf-picker.json")))
            .unwrap_or_else(|| PathBuf::from("pdf-picker.json"))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Don't overwrite a broken file
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Clamps values to valid ranges.
    pub fn sanitize(&mut self) {
        self.inline_content_limit_bytes = self
            .inline_content_limit_bytes
            .max(MIN_INLINE_LIMIT_BYTES);
        self.data_dir = self.data_dir.trim().to_string();
    }

    /// Inline size limit as a `usize`, saturating on narrow targets.
    pub fn inline_limit(&self) -> usize {
        usize::try_from(self.inline_content_limit_bytes).unwrap_or(usize::MAX)
    }
}

/// Resolves the data directory.
///
/// Resolution order:
/// 1. `PDF_PICKER_DATA_DIR` environment variable
/// 2. `data_dir` from the config, if non-empty
/// 3. `pdf-picker/` under the platform's local data directory
/// 4. `.data/` next to the executable
pub fn resolve_data_dir(config: &AppConfig) -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    if !config.data_dir.is_empty() {
        return PathBuf::from(&config.data_dir);
    }
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join("pdf-picker");
    }
    let exe = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
    exe.parent().unwrap_or(Path::new(".")).join(".data")
}
