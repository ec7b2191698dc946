use crossterm::style::Color;
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// The colour scheme of the hero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub(crate) fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub(crate) fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                background: Color::Rgb { r: 13, g: 17, b: 23 },
                foreground: Color::Rgb { r: 230, g: 237, b: 243 },
                muted: Color::Rgb { r: 139, g: 148, b: 158 },
                border: Color::Rgb { r: 48, g: 54, b: 61 },
                window: Color::Rgb { r: 22, g: 27, b: 34 },
                prompt: Color::Rgb { r: 63, g: 185, b: 80 },
                command: Color::Rgb { r: 230, g: 237, b: 243 },
                cursor: Color::Rgb { r: 88, g: 166, b: 255 },
                title_hues: (200.0, 280.0),
                title_lightness: 65.0,
            },
            Self::Light => Palette {
                background: Color::Rgb { r: 255, g: 255, b: 255 },
                foreground: Color::Rgb { r: 31, g: 35, b: 40 },
                muted: Color::Rgb { r: 101, g: 109, b: 118 },
                border: Color::Rgb { r: 208, g: 215, b: 222 },
                window: Color::Rgb { r: 36, g: 41, b: 47 },
                prompt: Color::Rgb { r: 46, g: 160, b: 67 },
                command: Color::Rgb { r: 240, g: 246, b: 252 },
                cursor: Color::Rgb { r: 9, g: 105, b: 218 },
                title_hues: (210.0, 290.0),
                title_lightness: 40.0,
            },
        }
    }
}

/// The colours used to draw the hero in a given theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    /// Background of the terminal window.
    pub window: Color,
    pub prompt: Color,
    pub command: Color,
    pub cursor: Color,
    /// The hue range the title gradient sweeps, left to right.
    pub title_hues: (f32, f32),
    pub title_lightness: f32,
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum ThemeError {
    #[error("failed to persist theme to {path}: {source}")]
    Persist { path: PathBuf, source: io::Error },
}

/// Remembers the last selected theme across runs.
#[derive(Clone, Debug)]
pub(crate) struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The store in the per-user data directory, if one can be determined.
    pub(crate) fn in_data_dir() -> Option<Self> {
        crate::config::project_dirs().map(|dirs| Self::new(dirs.data_dir().join("theme")))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted theme. Missing or unreadable values yield `None`.
    pub(crate) fn load(&self) -> Option<Theme> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to read persisted theme: {e}");
                return None;
            }
        };
        match contents.trim().parse() {
            Ok(theme) => Some(theme),
            Err(_) => {
                tracing::warn!(path = %self.path.display(), value = contents.trim(), "ignoring invalid persisted theme");
                None
            }
        }
    }

    pub(crate) fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        let persist = || -> io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, theme.to_string())
        };
        persist().map_err(|source| ThemeError::Persist { path: self.path.clone(), source })
    }
}

/// Pick the starting theme: an explicit choice wins over the persisted one.
pub(crate) fn resolve(explicit: Option<Theme>, configured: Option<Theme>, store: Option<&ThemeStore>) -> Theme {
    explicit.or(configured).or_else(|| store.and_then(ThemeStore::load)).unwrap_or_default()
}
