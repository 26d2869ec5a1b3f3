use crate::config::{
    ProjectConfig, default_ignored_patterns, default_included_extensions, normalize_extensions,
    normalize_path,
};
use crate::error::{AppError, Result};
use log;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_DIR: &str = "projmap";
pub const SETTINGS_FILENAME: &str = "settings.toml";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoredSettings {
    #[serde(default = "default_ignored_patterns")]
    pub default_ignored_patterns: Vec<String>,
    #[serde(default = "default_included_extensions")]
    pub default_included_extensions: Vec<String>,
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectConfig>,
}

impl Default for StoredSettings {
    fn default() -> Self {
        Self {
            default_ignored_patterns: default_ignored_patterns(),
            default_included_extensions: default_included_extensions(),
            projects: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub ignored_patterns: Vec<String>,
    pub included_extensions: Vec<String>,
}

/// TOML-backed store for per-project configuration and defaults for new projects.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: StoredSettings,
}

impl SettingsStore {
    pub fn default_location() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILENAME))
            .ok_or_else(|| {
                AppError::Config("Could not determine the user configuration directory".to_string())
            })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_location()?)
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            log::debug!(
                "Settings file {} not found, starting from defaults",
                path.display()
            );
            return Ok(Self {
                path,
                settings: StoredSettings::default(),
            });
        }

        log::info!("Loading settings from: {}", path.display());
        let toml_content = fs::read_to_string(&path).map_err(|e| AppError::SettingsRead {
            path: path.clone(),
            source: e,
        })?;
        let settings = toml::from_str::<StoredSettings>(&toml_content).map_err(|e| {
            AppError::TomlParse(format!(
                "Error parsing settings file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self { path, settings })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn defaults(&self) -> Defaults {
        Defaults {
            ignored_patterns: self.settings.default_ignored_patterns.clone(),
            included_extensions: self.settings.default_included_extensions.clone(),
        }
    }

    /// Config stored for `dir`, or for the closest ancestor of `dir` that has one.
    pub fn project_config_for(&self, dir: &Path) -> Result<Option<ProjectConfig>> {
        let normalized = PathBuf::from(normalize_path(dir)?);
        for candidate in normalized.ancestors() {
            let key = crate::config::to_forward_slashes(candidate);
            if let Some(config) = self.settings.projects.get(&key) {
                log::debug!("Using stored project config registered for {}", key);
                return Ok(Some(config.clone().normalized()));
            }
        }
        log::debug!("No stored project config covers {}", normalized.display());
        Ok(None)
    }

    pub fn save_project_config(&mut self, config: &ProjectConfig) -> Result<()> {
        let key = normalize_path(&config.root_dir)?;
        log::info!("Saving project config for {}", key);
        self.settings.projects.insert(key, config.clone());
        self.persist()
    }

    pub fn update_defaults(
        &mut self,
        ignored_patterns: Option<Vec<String>>,
        included_extensions: Option<Vec<String>>,
    ) -> Result<()> {
        if let Some(patterns) = ignored_patterns {
            self.settings.default_ignored_patterns = patterns;
        }
        if let Some(extensions) = included_extensions {
            self.settings.default_included_extensions = normalize_extensions(extensions);
        }
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::DirCreation {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let toml_content = toml::to_string_pretty(&self.settings)?;
        fs::write(&self.path, toml_content).map_err(|e| AppError::SettingsWrite {
            path: self.path.clone(),
            source: e,
        })?;
        log::debug!("Settings written to {}", self.path.display());
        Ok(())
    }
}
