// Settings persistence: global configuration stored in the platform
// config dir, e.g. ~/.config/slate/settings.json on Linux.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use slate_core::LanguageId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlateSettings {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub language_overrides: Vec<LanguageOverride>,
}

/// User mapping from a file extension to a language name, consulted
/// before the built-in detector (e.g. "pyi" → "python").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageOverride {
    pub extension: String,
    pub language: String,
}

impl SlateSettings {
    /// Resolve an override for `path`, if one matches its extension.
    pub fn language_for(&self, path: &str) -> Option<LanguageId> {
        let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
        self.language_overrides
            .iter()
            .find(|o| o.extension.eq_ignore_ascii_case(&ext))
            .and_then(|o| LanguageId::from_name(&o.language))
    }
}

fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("slate").join("settings.json"))
}

pub fn load_settings() -> SlateSettings {
    let path = match settings_path() {
        Some(p) => p,
        None => return SlateSettings::default(),
    };

    match std::fs::read_to_string(&path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                SlateSettings::default()
            }
        },
        Err(_) => SlateSettings::default(),
    }
}

pub fn save_settings(settings: &SlateSettings) {
    let path = match settings_path() {
        Some(p) => p,
        None => {
            log::warn!("Cannot determine settings path");
            return;
        }
    };

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create config dir {}: {}", parent.display(), e);
            return;
        }
    }

    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            log::error!("Failed to serialize settings: {}", e);
        }
    }
}
