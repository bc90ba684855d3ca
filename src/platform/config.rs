// Rampart - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for Rampart data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/rampart/ or %APPDATA%\Rampart\)
    pub config_dir: PathBuf,

    /// User fixture directory (e.g. ~/.config/rampart/fixtures/)
    pub user_fixtures_dir: PathBuf,

    /// Data directory for the session file, logs, etc.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            // Fixtures live one level above config/ so the user-visible path is
            // %APPDATA%\Rampart\fixtures\ rather than the deeper
            // %APPDATA%\Rampart\config\fixtures\.
            let user_fixtures_dir = config_dir
                .parent()
                .unwrap_or(&config_dir)
                .join(constants::FIXTURES_DIR_NAME);
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                fixtures = %user_fixtures_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                user_fixtures_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                user_fixtures_dir: fallback.join(constants::FIXTURES_DIR_NAME),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[ingest]` section.
    pub ingest: IngestSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[ingest]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct IngestSection {
    /// Interval between simulated upload progress ticks in ms.
    pub tick_interval_ms: Option<u64>,
    /// Delay between upload completion and the fabricated verdict in ms.
    pub analysis_delay_ms: Option<u64>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Ingest --
    /// Interval between simulated upload progress ticks in ms.
    pub tick_interval_ms: u64,
    /// Delay before an analysing item receives its verdict in ms.
    pub analysis_delay_ms: u64,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: constants::UPLOAD_TICK_INTERVAL_MS,
            analysis_delay_ms: constants::ANALYSIS_DELAY_MS,
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// A missing file is a normal first run: returns defaults with no warnings.
/// Anything else is delegated to [`load_config_file`].
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    // The file lives one level above config/, next to fixtures/.
    let config_path = config_dir
        .parent()
        .unwrap_or(config_dir)
        .join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    load_config_file(&config_path)
}

/// Load and validate a specific config file (also used by `--config`).
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file is unreadable or unparseable, returns defaults with an error
/// warning -- the application still starts but the user is informed.
pub fn load_config_file(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all errors.
    let mut config = AppConfig::default();

    // -- Ingest: tick_interval_ms --
    if let Some(interval) = raw.ingest.tick_interval_ms {
        if (constants::MIN_UPLOAD_TICK_INTERVAL_MS..=constants::MAX_UPLOAD_TICK_INTERVAL_MS)
            .contains(&interval)
        {
            config.tick_interval_ms = interval;
        } else {
            warnings.push(format!(
                "[ingest] tick_interval_ms = {interval} is out of range ({}-{}). Using default ({}).",
                constants::MIN_UPLOAD_TICK_INTERVAL_MS,
                constants::MAX_UPLOAD_TICK_INTERVAL_MS,
                constants::UPLOAD_TICK_INTERVAL_MS,
            ));
        }
    }

    // -- Ingest: analysis_delay_ms --
    if let Some(delay) = raw.ingest.analysis_delay_ms {
        if (constants::MIN_ANALYSIS_DELAY_MS..=constants::MAX_ANALYSIS_DELAY_MS).contains(&delay) {
            config.analysis_delay_ms = delay;
        } else {
            warnings.push(format!(
                "[ingest] analysis_delay_ms = {delay} is out of range ({}-{}). Using default ({}).",
                constants::MIN_ANALYSIS_DELAY_MS,
                constants::MAX_ANALYSIS_DELAY_MS,
                constants::ANALYSIS_DELAY_MS,
            ));
        }
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(format!(
                "[ui] font_size = {size} is out of range ({}-{}). Using default ({}).",
                constants::MIN_FONT_SIZE,
                constants::MAX_FONT_SIZE,
                constants::DEFAULT_FONT_SIZE,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}
