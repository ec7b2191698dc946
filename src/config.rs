use crate::{
    theme::Theme,
    typewriter::{CommandList, Cursor, DEFAULT_COMMANDS, Timings},
};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

const CONFIG_FILE_NAME: &str = "config.yaml";

/// The hero configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// The title shown at the top.
    pub title: String,

    /// The line shown under the title.
    pub subtitle: String,

    /// The prompt drawn before the typed command.
    pub prompt: String,

    /// Forces a theme, ignoring the one persisted by the last run.
    pub theme: Option<Theme>,

    /// Whether to render the title as a FIGlet banner.
    pub banner: bool,

    /// The commands to type, in order.
    pub commands: Vec<String>,

    pub timings: TimingsConfig,

    pub cursor: CursorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "gh-templates".into(),
            subtitle: "The fastest way to create professional GitHub templates for issues, PRs, licenses, and more"
                .into(),
            prompt: "$".into(),
            theme: None,
            banner: true,
            commands: DEFAULT_COMMANDS.iter().map(|c| c.to_string()).collect(),
            timings: Default::default(),
            cursor: Default::default(),
        }
    }
}

impl Config {
    pub(crate) fn command_list(&self) -> CommandList {
        CommandList::new(self.commands.iter().cloned())
    }

    pub(crate) fn timings(&self) -> Timings {
        Timings {
            typing: Duration::from_millis(self.timings.typing_delay_ms),
            hold: Duration::from_millis(self.timings.hold_delay_ms),
            clear: Duration::from_millis(self.timings.clear_delay_ms),
        }
    }

    pub(crate) fn cursor(&self) -> Cursor {
        let glyph = self.cursor.glyph.chars().next().unwrap_or(Cursor::default().glyph());
        Cursor::new(glyph, Duration::from_millis(self.cursor.blink_interval_ms))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timings.typing_delay_ms == 0 {
            return Err(ConfigError::Validation { message: "timings.typing_delay_ms must be greater than 0".into() });
        }
        let no_pauses = self.timings.hold_delay_ms == 0 && self.timings.clear_delay_ms == 0;
        if no_pauses && self.commands.iter().any(String::is_empty) {
            return Err(ConfigError::Validation {
                message: "an empty command needs timings.hold_delay_ms or timings.clear_delay_ms above 0".into(),
            });
        }
        if self.cursor.blink_interval_ms == 0 {
            return Err(ConfigError::Validation { message: "cursor.blink_interval_ms must be greater than 0".into() });
        }
        if self.cursor.glyph.chars().count() != 1 {
            return Err(ConfigError::Validation {
                message: format!("cursor.glyph must be a single character, got {:?}", self.cursor.glyph),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct TimingsConfig {
    /// Milliseconds between typed characters.
    pub typing_delay_ms: u64,

    /// Milliseconds a fully typed command is held.
    pub hold_delay_ms: u64,

    /// Milliseconds the clear phase lasts.
    pub clear_delay_ms: u64,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self { typing_delay_ms: 100, hold_delay_ms: 1000, clear_delay_ms: 2000 }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CursorConfig {
    pub glyph: String,

    pub blink_interval_ms: u64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self { glyph: "▌".into(), blink_interval_ms: 530 }
    }
}

/// Errors that can occur while loading the configuration.
#[derive(thiserror::Error, Debug)]
pub(crate) enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".into()))]
    Parse { line: Option<usize>, message: String },

    #[error("invalid config: {message}")]
    Validation { message: String },
}

/// Locates and loads the configuration file.
pub(crate) struct ConfigLoader {
    explicit: Option<PathBuf>,
    default_dir: Option<PathBuf>,
}

impl ConfigLoader {
    /// A loader reading `explicit` if given, the per-user config directory otherwise.
    pub(crate) fn new(explicit: Option<PathBuf>) -> Self {
        let default_dir = project_dirs().map(|dirs| dirs.config_dir().to_path_buf());
        Self { explicit, default_dir }
    }

    pub(crate) fn load(&self) -> Result<Config, ConfigError> {
        if let Some(path) = &self.explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.clone()));
            }
            return Self::load_file(path);
        }
        match self.default_dir.as_ref().map(|dir| dir.join(CONFIG_FILE_NAME)) {
            Some(path) if path.exists() => Self::load_file(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    fn load_file(path: &Path) -> Result<Config, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::parse(&contents)?;
        tracing::info!(path = %path.display(), commands = config.commands.len(), "loaded config");
        Ok(config)
    }

    fn parse(contents: &str) -> Result<Config, ConfigError> {
        // serde_yaml refuses an empty document; treat it as "all defaults"
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(contents)
            .map_err(|e| ConfigError::Parse { line: e.location().map(|l| l.line()), message: e.to_string() })?;
        config.validate()?;
        if config.commands.is_empty() {
            tracing::warn!("config has no commands, the prompt will stay empty");
        }
        Ok(config)
    }
}

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "gh-templates-hero")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.commands.len(), DEFAULT_COMMANDS.len());
        assert_eq!(config.timings(), Timings::default());
        assert_eq!(config.cursor(), Cursor::default());
        assert!(config.banner);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(ConfigLoader::parse("").expect("parse"), Config::default());
    }

    #[test]
    fn partial_config() {
        let config = ConfigLoader::parse(
            r#"
commands:
  - gh-templates issue list
theme: light
timings:
  hold_delay_ms: 10
"#,
        )
        .expect("parse");
        assert_eq!(config.commands, vec!["gh-templates issue list".to_string()]);
        assert_eq!(config.theme, Some(Theme::Light));
        assert_eq!(config.timings.hold_delay_ms, 10);
        assert_eq!(config.timings.typing_delay_ms, 100);
        assert_eq!(config.title, "gh-templates");
    }

    #[test]
    fn empty_command_list_is_allowed() {
        let config = ConfigLoader::parse("commands: []").expect("parse");
        assert!(config.command_list().is_empty());
    }

    #[rstest]
    #[case::zero_typing_delay("timings:\n  typing_delay_ms: 0")]
    #[case::zero_blink("cursor:\n  blink_interval_ms: 0")]
    #[case::long_glyph("cursor:\n  glyph: \"ab\"")]
    #[case::empty_glyph("cursor:\n  glyph: \"\"")]
    #[case::empty_command_without_pauses("commands: [\"a\", \"\"]\ntimings:\n  hold_delay_ms: 0\n  clear_delay_ms: 0")]
    fn validation_errors(#[case] contents: &str) {
        let result = ConfigLoader::parse(contents);
        assert!(matches!(result, Err(ConfigError::Validation { .. })), "{result:?}");
    }

    #[rstest]
    #[case::held("commands: [\"\"]\ntimings:\n  hold_delay_ms: 1\n  clear_delay_ms: 0")]
    #[case::cleared("commands: [\"\"]\ntimings:\n  hold_delay_ms: 0\n  clear_delay_ms: 1")]
    #[case::no_empty_command("commands: [\"a\"]\ntimings:\n  hold_delay_ms: 0\n  clear_delay_ms: 0")]
    fn zero_pauses_need_every_command_to_type(#[case] contents: &str) {
        let result = ConfigLoader::parse(contents);
        assert!(result.is_ok(), "{result:?}");
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let result = ConfigLoader::parse("title: x\nfoo: bar\n");
        let Err(ConfigError::Parse { message, .. }) = result else { panic!("expected parse error, got {result:?}") };
        assert!(message.contains("foo"), "{message}");
    }

    #[test]
    fn loads_explicit_file() {
        let file = write_config("prompt: \">\"\nbanner: false\n");
        let config = ConfigLoader::new(Some(file.path().to_path_buf())).load().expect("load");
        assert_eq!(config.prompt, ">");
        assert!(!config.banner);
    }

    #[test]
    fn missing_explicit_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nope.yaml");
        let result = ConfigLoader::new(Some(path.clone())).load();
        assert!(matches!(result, Err(ConfigError::NotFound(p)) if p == path));
    }

    #[test]
    fn missing_default_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let loader = ConfigLoader { explicit: None, default_dir: Some(dir.path().to_path_buf()) };
        assert_eq!(loader.load().expect("load"), Config::default());
    }

    #[test]
    fn reads_default_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join(CONFIG_FILE_NAME), "title: hello\n").expect("write");
        let loader = ConfigLoader { explicit: None, default_dir: Some(dir.path().to_path_buf()) };
        assert_eq!(loader.load().expect("load").title, "hello");
    }
}
