use std::{fs, io::ErrorKind, path::PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::settings::AppSettings;

/// JSON settings file. A missing file means defaults.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<AppSettings> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("invalid settings in {}", self.path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no settings at {}, using defaults", self.path.display());
                Ok(AppSettings::default())
            }
            Err(err) => {
                Err(err).with_context(|| format!("cannot read settings {}", self.path.display()))
            }
        }
    }

    /// Writes `settings` as pretty JSON, creating missing parent directories.
    pub fn save(&self, settings: &AppSettings) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("cannot create settings directory {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)
            .with_context(|| format!("cannot write settings {}", self.path.display()))?;
        info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
