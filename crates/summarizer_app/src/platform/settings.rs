use std::fs;
use std::path::Path;

use engine_logging::{engine_info, engine_warn};
use serde::{Deserialize, Serialize};
use summarizer_engine::{write_atomic, PersistError, DEFAULT_API_BASE};

pub const DEFAULT_SETTINGS_FILE: &str = ".summarizer_settings.ron";

/// Client-side settings persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default)]
    pub api_base: Option<String>,
}

pub(crate) fn load_settings(path: &Path) -> ClientSettings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ClientSettings::default();
        }
        Err(err) => {
            engine_warn!("Failed to read settings from {:?}: {}", path, err);
            return ClientSettings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            engine_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            engine_warn!("Failed to parse settings from {:?}: {}", path, err);
            ClientSettings::default()
        }
    }
}

pub(crate) fn save_settings(path: &Path, settings: &ClientSettings) -> anyhow::Result<()> {
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(settings, pretty)?;
    write_atomic(path, &content).map_err(|err: PersistError| {
        anyhow::anyhow!("failed to write settings to {}: {err}", path.display())
    })?;
    engine_info!("Saved settings to {:?}", path);
    Ok(())
}

/// Flag value, then persisted value, then the built-in default. Blank values
/// count as unset.
pub(crate) fn resolve_api_base(flag: Option<&str>, settings: &ClientSettings) -> String {
    [flag, settings.api_base.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
        .to_string()
}
