use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::prelude::*;

/// Environment variable consulted when `--config` is not given.
pub const CONFIG_ENV_VAR: &str = "NOVA_HIGHLIGHT_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HighlightConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub tokenize: TokenizeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Simple level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,

    /// Write logs to stderr. When disabled, nothing is logged.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,
}

const DEFAULT_LEVEL: &str = "warn";

/// Maps the configured level to `EnvFilter` directives. Level names are
/// case-insensitive there already; only the `warning` spelling needs help.
fn level_directives(level: &str) -> &str {
    match level.trim() {
        "" => DEFAULT_LEVEL,
        level if level.eq_ignore_ascii_case("warning") => "warn",
        level => level,
    }
}

impl LoggingConfig {
    fn default_level() -> String {
        DEFAULT_LEVEL.to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    /// Effective filter: the configured level with `RUST_LOG` appended when set.
    /// Unparsable directives fall back to the level alone, then to `warn`.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let level = level_directives(&self.level);
        let with_env = std::env::var("RUST_LOG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| format!("{level},{}", value.trim()));

        with_env
            .into_iter()
            .chain([level.to_owned()])
            .find_map(|directives| tracing_subscriber::EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| tracing_subscriber::EnvFilter::new(DEFAULT_LEVEL))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
        }
    }
}

/// What to do with a line the tokenizer rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// Stop at the failing line and report it.
    #[default]
    Fail,
    /// Render the failing line as one unstyled span and restart the next line
    /// at top level, the way an editor degrades.
    Plain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenizeConfig {
    #[serde(default)]
    pub on_error: OnError,

    /// File extensions (without the dot) visited by `check`.
    #[serde(default = "TokenizeConfig::default_extensions")]
    pub extensions: Vec<String>,
}

impl TokenizeConfig {
    fn default_extensions() -> Vec<String> {
        vec!["java".to_owned()]
    }

    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|want| want == ext))
    }
}

impl Default for TokenizeConfig {
    fn default() -> Self {
        Self {
            on_error: OnError::default(),
            extensions: Self::default_extensions(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` embeds a snippet of the input; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl HighlightConfig {
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    /// Load from `explicit`, else from [`CONFIG_ENV_VAR`], else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit.map(Path::to_path_buf).or_else(|| {
            std::env::var_os(CONFIG_ENV_VAR)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        });

        match path {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::default()),
        }
    }
}

/// Install the global tracing subscriber. Later calls are no-ops.
pub fn init_tracing(config: &LoggingConfig) {
    if !config.stderr {
        return;
    }

    let filter = config.env_filter();
    let result = if config.json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_filter(filter),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_filter(filter),
            )
            .try_init()
    };

    if let Err(err) = result {
        tracing::debug!(target: "nova.highlight.cli", error = %err, "tracing already initialized");
    }
}
