//! Operator UI preferences: theme and density, persisted as JSON.
//!
//! Preferences live in `ui_prefs.json` under the platform config dir. The
//! on-disk shape is versioned with string-encoded enums and every field
//! optional, so older or hand-edited files keep loading; anything
//! unreadable falls back to defaults. Writes go through a temp file and a
//! rename so a crash mid-save never leaves a truncated file behind.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Errors loading or saving preferences.
#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("preferences io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("preferences parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Color theme of the console surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stable lowercase name, used on disk and in status lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_theme_mode(value).ok_or_else(|| format!("unknown theme: {value}"))
    }
}

/// Row density of rendered lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Density {
    #[default]
    Comfortable,
    Compact,
}

impl Density {
    pub fn toggled(self) -> Self {
        match self {
            Self::Comfortable => Self::Compact,
            Self::Compact => Self::Comfortable,
        }
    }

    /// Stable lowercase name, used on disk and in status lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Comfortable => "comfortable",
            Self::Compact => "compact",
        }
    }
}

impl FromStr for Density {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_density(value).ok_or_else(|| format!("unknown density: {value}"))
    }
}

fn parse_theme_mode(value: &str) -> Option<ThemeMode> {
    match value.to_ascii_lowercase().as_str() {
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

fn parse_density(value: &str) -> Option<Density> {
    match value.to_ascii_lowercase().as_str() {
        "comfortable" => Some(Density::Comfortable),
        "compact" => Some(Density::Compact),
        _ => None,
    }
}

/// In-memory preferences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub theme: ThemeMode,
    pub density: Density,
}

/// On-disk shape.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PrefsFile {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    density: Option<String>,
}

const PREFS_VERSION: u32 = 1;
const PREFS_FILE_NAME: &str = "ui_prefs.json";

fn prefs_from_file(file: PrefsFile) -> UiPrefs {
    UiPrefs {
        theme: file
            .theme
            .as_deref()
            .and_then(parse_theme_mode)
            .unwrap_or_default(),
        density: file
            .density
            .as_deref()
            .and_then(parse_density)
            .unwrap_or_default(),
    }
}

fn prefs_to_file(prefs: UiPrefs) -> PrefsFile {
    PrefsFile {
        version: PREFS_VERSION,
        theme: Some(prefs.theme.as_str().to_string()),
        density: Some(prefs.density.as_str().to_string()),
    }
}

/// Default preferences path under the platform config dir.
pub fn default_prefs_path() -> Result<PathBuf, PrefsError> {
    let dirs =
        directories::ProjectDirs::from("", "", "cdeck").ok_or(PrefsError::NoConfigDir)?;
    Ok(dirs.config_dir().join(PREFS_FILE_NAME))
}

/// Load preferences. `Ok(None)` when the file does not exist yet.
pub fn load_prefs_from_path(path: &Path) -> Result<Option<UiPrefs>, PrefsError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)?;
    let file: PrefsFile = serde_json::from_str(&raw)?;
    Ok(Some(prefs_from_file(file)))
}

/// Save preferences atomically (temp file, then rename).
pub fn save_prefs_to_path(path: &Path, prefs: UiPrefs) -> Result<(), PrefsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    let payload = serde_json::to_vec_pretty(&prefs_to_file(prefs))?;
    std::fs::write(&tmp_path, payload)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Shared preference store.
///
/// Loads once at startup and persists on every change. Persistence
/// failures degrade to in-memory state with a warning; the operator's
/// session keeps working either way.
pub struct PrefsStore {
    path: Option<PathBuf>,
    state: RwLock<UiPrefs>,
}

impl PrefsStore {
    /// Open against the default path. A missing file means defaults; an
    /// unreadable one is reported and replaced on the next save.
    pub fn open_default() -> Self {
        match default_prefs_path() {
            Ok(path) => Self::open(path),
            Err(err) => {
                warn!(error = %err, "preference persistence disabled");
                Self::ephemeral(UiPrefs::default())
            }
        }
    }

    pub fn open(path: PathBuf) -> Self {
        let prefs = match load_prefs_from_path(&path) {
            Ok(Some(prefs)) => prefs,
            Ok(None) => UiPrefs::default(),
            Err(err) => {
                warn!(
                    error = %err,
                    path = %path.display(),
                    "ignoring unreadable preferences"
                );
                UiPrefs::default()
            }
        };
        Self {
            path: Some(path),
            state: RwLock::new(prefs),
        }
    }

    /// In-memory store that never touches disk.
    pub fn ephemeral(prefs: UiPrefs) -> Self {
        Self {
            path: None,
            state: RwLock::new(prefs),
        }
    }

    pub fn current(&self) -> UiPrefs {
        *self.state.read()
    }

    pub fn set(&self, prefs: UiPrefs) {
        *self.state.write() = prefs;
        self.persist(prefs);
    }

    /// Flip the theme, persist, and return the new mode.
    pub fn toggle_theme(&self) -> ThemeMode {
        let updated = {
            let mut state = self.state.write();
            state.theme = state.theme.toggled();
            *state
        };
        self.persist(updated);
        updated.theme
    }

    /// Flip the density, persist, and return the new density.
    pub fn toggle_density(&self) -> Density {
        let updated = {
            let mut state = self.state.write();
            state.density = state.density.toggled();
            *state
        };
        self.persist(updated);
        updated.density
    }

    fn persist(&self, prefs: UiPrefs) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(err) = save_prefs_to_path(path, prefs) {
            warn!(
                error = %err,
                path = %path.display(),
                "failed persisting preferences"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_prefs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_prefs.json");
        let prefs = UiPrefs {
            theme: ThemeMode::Dark,
            density: Density::Compact,
        };
        save_prefs_to_path(&path, prefs).unwrap();
        assert_eq!(load_prefs_from_path(&path).unwrap(), Some(prefs));
    }

    #[test]
    fn missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_prefs.json");
        assert_eq!(load_prefs_from_path(&path).unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_an_error_but_store_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_prefs_from_path(&path).is_err());

        let store = PrefsStore::open(path);
        assert_eq!(store.current(), UiPrefs::default());
    }

    #[test]
    fn unknown_enum_strings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_prefs.json");
        std::fs::write(
            &path,
            r#"{"version": 1, "theme": "solarized", "density": "dense"}"#,
        )
        .unwrap();
        assert_eq!(
            load_prefs_from_path(&path).unwrap(),
            Some(UiPrefs::default())
        );
    }

    #[test]
    fn toggles_persist_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_prefs.json");
        let store = PrefsStore::open(path.clone());

        assert_eq!(store.toggle_theme(), ThemeMode::Dark);
        assert_eq!(store.toggle_density(), Density::Compact);

        let reloaded = load_prefs_from_path(&path).unwrap().unwrap();
        assert_eq!(reloaded.theme, ThemeMode::Dark);
        assert_eq!(reloaded.density, Density::Compact);
    }

    #[test]
    fn ephemeral_store_never_writes() {
        let store = PrefsStore::ephemeral(UiPrefs::default());
        store.toggle_theme();
        assert_eq!(store.current().theme, ThemeMode::Dark);
    }

    #[test]
    fn saved_file_carries_the_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_prefs.json");
        save_prefs_to_path(&path, UiPrefs::default()).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["theme"], "light");
    }

    #[test]
    fn theme_and_density_parse_case_insensitively() {
        assert_eq!("DARK".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!("Compact".parse::<Density>().unwrap(), Density::Compact);
        assert!("solarized".parse::<ThemeMode>().is_err());
    }
}
