//! Persisted user preferences: theme and last searched location.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{debug, warn};

use crate::model::{LocationQuery, Theme};

/// Key/value storage the widget keeps between sessions.
///
/// A missing value is `None`, never an empty string.
pub trait PreferenceStore: Send + Sync + std::fmt::Debug {
    fn theme(&self) -> Option<Theme>;
    fn set_theme(&self, theme: Theme) -> Result<()>;
    fn last_location(&self) -> Option<LocationQuery>;
    fn set_last_location(&self, location: &LocationQuery) -> Result<()>;
}

/// On-disk shape of the preferences file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Anything but `"light"` or `"dark"` reads back as no theme.
    #[serde(default, deserialize_with = "lenient_theme", skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,

    /// Stored as typed; a blank value reads back as no location.
    #[serde(
        rename = "lastLocation",
        default,
        deserialize_with = "lenient_location",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_location: Option<String>,
}

// Each key is read on its own, so a bad value in one never drops the other.
fn lenient_theme<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Theme>, D::Error> {
    Ok(Option::<toml::Value>::deserialize(de)?.and_then(|value| {
        let theme = value.as_str().and_then(Theme::parse);
        if theme.is_none() {
            warn!(%value, "Ignoring unknown theme in preferences");
        }
        theme
    }))
}

fn lenient_location<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<toml::Value>::deserialize(de)?.and_then(|value| match value {
        toml::Value::String(s) => Some(s),
        other => {
            warn!(value = %other, "Ignoring non-string lastLocation in preferences");
            None
        }
    }))
}

impl Preferences {
    fn location(&self) -> Option<LocationQuery> {
        self.last_location.as_deref().and_then(LocationQuery::parse)
    }
}

/// Preferences kept in a TOML file and written through on every change.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    current: Mutex<Preferences>,
}

impl FilePreferenceStore {
    /// Store in the platform data directory.
    pub fn open_default() -> Result<Self> {
        let path = crate::config::project_dirs()?.data_dir().join("prefs.toml");
        Ok(Self::open(path))
    }

    /// Read `path` once. A missing or unreadable file starts out empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match read_prefs(&path) {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Ignoring unreadable preferences file");
                Preferences::default()
            }
        };

        Self { path, current: Mutex::new(current) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(&self, apply: impl FnOnce(&mut Preferences)) -> Result<()> {
        let mut guard = self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        apply(&mut guard);
        write_prefs(&self.path, &guard)
    }

    fn snapshot(&self) -> Preferences {
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn theme(&self) -> Option<Theme> {
        self.snapshot().theme
    }

    fn set_theme(&self, theme: Theme) -> Result<()> {
        self.update(|p| p.theme = Some(theme))
    }

    fn last_location(&self) -> Option<LocationQuery> {
        self.snapshot().location()
    }

    fn set_last_location(&self, location: &LocationQuery) -> Result<()> {
        self.update(|p| p.last_location = Some(location.to_string()))
    }
}

fn read_prefs(path: &Path) -> Result<Preferences> {
    if !path.exists() {
        return Ok(Preferences::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read preferences file: {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse preferences file: {}", path.display()))
}

fn write_prefs(path: &Path, prefs: &Preferences) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create preferences directory: {}", parent.display())
        })?;
    }

    let toml = toml::to_string_pretty(prefs).context("Failed to serialize preferences to TOML")?;

    fs::write(path, toml)
        .with_context(|| format!("Failed to write preferences file: {}", path.display()))?;

    debug!(path = %path.display(), "Preferences saved");
    Ok(())
}

/// Preferences that live only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    current: Mutex<Preferences>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(prefs: Preferences) -> Self {
        Self { current: Mutex::new(prefs) }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Preferences> {
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn theme(&self) -> Option<Theme> {
        self.lock().theme
    }

    fn set_theme(&self, theme: Theme) -> Result<()> {
        self.lock().theme = Some(theme);
        Ok(())
    }

    fn last_location(&self) -> Option<LocationQuery> {
        self.lock().location()
    }

    fn set_last_location(&self, location: &LocationQuery) -> Result<()> {
        self.lock().last_location = Some(location.to_string());
        Ok(())
    }
}
