use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    /// Global pricing multiplier, used when neither `--base-ratio` nor
    /// `BASE_RATIO` is set. Kept raw so a bad value only resets the multiplier.
    #[serde(default)]
    pub(crate) base_ratio: Option<toml::Value>,
    /// Pricing table file replacing the builtin table
    #[serde(default)]
    pub(crate) pricing: Option<PathBuf>,
    #[serde(default)]
    pub(crate) pretty: bool,
}

impl Config {
    /// The configured multiplier as text, for [`GlobalMultiplier::resolve`].
    ///
    /// [`GlobalMultiplier::resolve`]: crate::pricing::GlobalMultiplier::resolve
    pub(crate) fn base_ratio(&self) -> Option<String> {
        self.base_ratio.as_ref().map(|value| match value {
            toml::Value::String(s) => s.clone(),
            toml::Value::Integer(i) => i.to_string(),
            toml::Value::Float(f) => f.to_string(),
            other => other.to_string(),
        })
    }

    /// Load from an explicit path, or the first parsable file in the default locations.
    pub(crate) fn load(explicit: Option<&Path>) -> Self {
        match explicit {
            Some(path) => Self::load_file(path).unwrap_or_default(),
            None => Self::get_config_paths()
                .iter()
                .filter(|path| path.exists())
                .find_map(|path| Self::load_file(path))
                .unwrap_or_default(),
        }
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read config");
                return None;
            }
        };
        match toml::from_str::<Config>(&content) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config");
                None
            }
        }
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/tokcost/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("tokcost").join("config.toml"));
        }

        // 2. macOS Application Support: ~/Library/Application Support/tokcost/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let macos_path = config_dir.join("tokcost").join("config.toml");
            if !paths.contains(&macos_path) {
                paths.push(macos_path);
            }
        }

        // 3. Home directory: ~/.tokcost.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".tokcost.toml"));
        }

        paths
    }
}
