// SPDX-License-Identifier: LGPL-3.0-only
use anyhow::Context;
use mx_core::config::MxConfig;
use mx_core::dnd::DragAxis;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

/// Name of the settings file looked up in the XDG directories.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Errors raised while reading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("failed to read settings file {path:?}")]
    Read {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The content is not valid settings TOML.
    #[error("failed to parse settings from {origin}")]
    Parse {
        /// The file name, or `<string>` for inline content.
        origin: String,
        /// The underlying error.
        #[source]
        source: toml::de::Error,
    },
    /// A value is out of range.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue {
        /// Dotted key of the setting.
        key: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Contents of a settings file. Every field is optional so files can be layered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    /// `[stage]` section.
    #[serde(default)]
    pub stage: StageSettings,
    /// `[drag]` section.
    #[serde(default)]
    pub drag: DragSettings,
    /// Any other sections are captured here
    #[serde(flatten)]
    pub other: HashMap<String, toml::Value>,
}

/// Stage settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StageSettings {
    /// Stage width in pixels.
    pub width: Option<f32>,
    /// Stage height in pixels.
    pub height: Option<f32>,
}

/// Draggable defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DragSettings {
    /// Drag threshold in pixels.
    pub threshold: Option<u32>,
    /// `none`, `x` or `y`.
    pub axis: Option<String>,
}

/// Registry for layered settings files.
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
    settings: Settings,
}

impl SettingsRegistry {
    /// Create an empty registry. Nothing is loaded until [Self::load] is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry and load the settings from the standard locations.
    pub fn from_xdg() -> anyhow::Result<Self> {
        let mut registry = Self::new();
        registry.load()?;
        Ok(registry)
    }

    /// Load settings from the standard locations in precedence order.
    ///
    /// Order (later overrides earlier):
    /// 1. System Data: /usr/share/mx/settings.toml (and XDG_DATA_DIRS)
    /// 2. System Config: /etc/xdg/mx/settings.toml (and XDG_CONFIG_DIRS)
    /// 3. User Config: ~/.config/mx/settings.toml (XDG_CONFIG_HOME)
    ///
    /// Unreadable or invalid files are reported and skipped.
    pub fn load(&mut self) -> anyhow::Result<()> {
        let xdg_dirs = BaseDirectories::with_prefix("mx").context("Failed to resolve XDG base directories")?;

        for path in Self::search_paths(&xdg_dirs) {
            if let Err(err) = self.load_file(&path) {
                log::warn!("Skipping settings: {:#}", anyhow::Error::new(err));
            }
        }

        Ok(())
    }

    /// Existing settings files, least significant first.
    fn search_paths(xdg_dirs: &BaseDirectories) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = xdg_dirs.find_data_files(SETTINGS_FILE).rev().collect();

        // The config search yields the user file first, so reversing puts it last.
        paths.extend(xdg_dirs.find_config_files(SETTINGS_FILE).rev());

        let user_path = xdg_dirs.get_config_home().join(SETTINGS_FILE);
        if user_path.exists() && !paths.contains(&user_path) {
            paths.push(user_path);
        }

        paths
    }

    /// Load and merge a single file.
    pub fn load_file(&mut self, path: &Path) -> Result<(), SettingsError> {
        log::info!("Loading settings from: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let loaded = parse(&content, &path.display().to_string())?;
        self.merge(loaded);
        Ok(())
    }

    /// Parse and merge inline TOML.
    pub fn load_str(&mut self, content: &str) -> Result<(), SettingsError> {
        let loaded = parse(content, "<string>")?;
        self.merge(loaded);
        Ok(())
    }

    /// Load several files in order. Each file reports its own result.
    pub fn load_from_paths(&mut self, paths: &[PathBuf]) -> Vec<anyhow::Result<()>> {
        paths
            .iter()
            .map(|path| {
                self.load_file(path)
                    .with_context(|| format!("Failed to load settings file {:?}", path))
            })
            .collect()
    }

    /// Forget everything and load the standard locations again.
    pub fn reload(&mut self) -> anyhow::Result<()> {
        self.settings = Settings::default();
        self.load()
    }

    /// Merge settings into the current ones, field by field.
    pub fn merge(&mut self, other: Settings) {
        // Stage
        if other.stage.width.is_some() {
            self.settings.stage.width = other.stage.width;
        }
        if other.stage.height.is_some() {
            self.settings.stage.height = other.stage.height;
        }

        // Drag
        if other.drag.threshold.is_some() {
            self.settings.drag.threshold = other.drag.threshold;
        }
        if other.drag.axis.is_some() {
            self.settings.drag.axis = other.drag.axis;
        }

        // Other
        self.settings.other.extend(other.other);
    }

    /// Get the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply the loaded settings on top of a configuration.
    ///
    /// Nothing is changed if any value is invalid.
    pub fn apply(&self, config: &mut MxConfig) -> Result<(), SettingsError> {
        let stage = &self.settings.stage;
        let mut size = config.stage.size;
        if let Some(width) = stage.width {
            size.x = check_extent("stage.width", width)?;
        }
        if let Some(height) = stage.height {
            size.y = check_extent("stage.height", height)?;
        }

        let axis = match &self.settings.drag.axis {
            Some(axis) => axis.parse::<DragAxis>().map_err(|_| SettingsError::InvalidValue {
                key: "drag.axis",
                value: axis.clone(),
            })?,
            None => config.drag.axis,
        };

        config.stage.size = size;
        config.drag.axis = axis;
        if let Some(threshold) = self.settings.drag.threshold {
            config.drag.threshold = threshold;
        }

        Ok(())
    }

    /// The default configuration with the loaded settings applied.
    pub fn to_config(&self) -> Result<MxConfig, SettingsError> {
        let mut config = MxConfig::default();
        self.apply(&mut config)?;
        Ok(config)
    }
}

fn parse(content: &str, origin: &str) -> Result<Settings, SettingsError> {
    toml::from_str(content).map_err(|source| SettingsError::Parse {
        origin: origin.to_string(),
        source,
    })
}

fn check_extent(key: &'static str, value: f32) -> Result<f32, SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SettingsError::InvalidValue {
            key,
            value: value.to_string(),
        })
    }
}
