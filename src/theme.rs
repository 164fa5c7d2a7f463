use anyhow::{Context, Result};
use log::debug;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => anyhow::bail!("Unknown theme '{other}': expected 'dark' or 'light'"),
        }
    }
}

/// Session-scoped key/value file holding the chosen theme.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    #[must_use]
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(THEME_KEY),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored theme, if any. An unreadable or garbled value counts as unset.
    #[must_use]
    pub fn load(&self) -> Option<Theme> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(e) => {
                debug!("ignoring stored theme at {}: {e}", self.path.display());
                None
            }
        }
    }

    /// Stored theme, or the default when nothing was chosen this session.
    #[must_use]
    pub fn initial(&self) -> Theme {
        self.load().unwrap_or_default()
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory: {}", parent.display())
            })?;
        }
        fs::write(&self.path, theme.as_str())
            .with_context(|| format!("Failed to write theme to {}", self.path.display()))
    }
}
