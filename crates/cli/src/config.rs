use std::path::PathBuf;

use reqtrack_core::RecordKind;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// List-view configuration loaded from environment variables.
///
/// Everything has a default, so the binary runs against the bundled mock
/// dataset with no configuration at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// JSON array of records; the bundled seed when unset.
    pub data_path: Option<PathBuf>,
    /// Which list page to render.
    pub kind: RecordKind,
    /// JSON view state (search, conditions, sort, hidden columns).
    pub view_path: Option<PathBuf>,
    /// JSON column table; the kind's default table when unset.
    pub columns_path: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default        |
    /// |--------------------|----------------|
    /// | `REQTRACK_DATA`    | bundled seed   |
    /// | `REQTRACK_KIND`    | `requirement`  |
    /// | `REQTRACK_VIEW`    | none           |
    /// | `REQTRACK_COLUMNS` | kind default   |
    ///
    /// `REQTRACK_LOG_FORMAT` (`pretty` or `json`) is read separately by
    /// [`LogFormat::from_env`], before logging starts.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let path = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };

        let kind = match lookup("REQTRACK_KIND") {
            Some(value) if !value.trim().is_empty() => RecordKind::from_str_value(value.trim())
                .map_err(|message| ConfigError::Invalid {
                    var: "REQTRACK_KIND",
                    message,
                })?,
            _ => RecordKind::Requirement,
        };

        Ok(Self {
            data_path: path("REQTRACK_DATA"),
            kind,
            view_path: path("REQTRACK_VIEW"),
            columns_path: path("REQTRACK_COLUMNS"),
        })
    }
}

/// Log line format for the stderr subscriber, from `REQTRACK_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines (default).
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup("REQTRACK_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => Ok(Self::Pretty),
            Some("json") => Ok(Self::Json),
            Some(other) => Err(ConfigError::Invalid {
                var: "REQTRACK_LOG_FORMAT",
                message: format!("'{other}' is not one of: pretty, json"),
            }),
        }
    }
}
