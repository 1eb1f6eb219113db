use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::error;

const DEFAULT_PORT: u16 = 4310;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

// ─── ObservabilityConfig ──────────────────────────────────────────────────────

/// Daemon observability configuration (`[observability]` in config.toml).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log SQLite queries that exceed this threshold (milliseconds). Default: 100.
    /// Set to 0 to disable slow query logging.
    pub slow_query_threshold_ms: u64,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            slow_query_threshold_ms: 100,
        }
    }
}

// ─── TOML file layer ──────────────────────────────────────────────────────────

/// Optional settings read from `{data_dir}/config.toml`. Every field is
/// overridable by CLI flags / env vars.
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    port: Option<u16>,
    bind_address: Option<String>,
    log: Option<String>,
    /// "pretty" | "json"
    log_format: Option<String>,
    log_file: Option<PathBuf>,
    observability: Option<ObservabilityConfig>,
}

fn load_toml(data_dir: &Path) -> Option<TomlConfig> {
    let path = data_dir.join("config.toml");
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config.toml — using defaults");
            None
        }
    }
}

// ─── DaemonConfig ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub log: String,
    /// Bind address for the HTTP server (TASKD_BIND env var, default: "127.0.0.1").
    pub bind_address: String,
    /// Log output format: "pretty" (default) | "json".
    pub log_format: String,
    /// Write logs to this file path (rotated daily). None = stdout only.
    pub log_file: Option<PathBuf>,
    /// Observability: slow query threshold.
    pub observability: ObservabilityConfig,
}

impl DaemonConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file at `{data_dir}/config.toml`
    ///   3. Built-in defaults
    pub fn new(
        port: Option<u16>,
        data_dir: Option<PathBuf>,
        log: Option<String>,
        bind_address: Option<String>,
        log_file: Option<PathBuf>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);

        // Load TOML as the lowest-priority override layer
        let toml = load_toml(&data_dir).unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());
        let bind_address = bind_address
            .or(toml.bind_address)
            .unwrap_or_else(default_bind_address);
        let log_format = toml.log_format.unwrap_or_else(|| "pretty".to_string());
        let log_file = log_file.or(toml.log_file);
        let observability = toml.observability.unwrap_or_default();

        Self {
            port,
            data_dir,
            log,
            bind_address,
            log_format,
            log_file,
            observability,
        }
    }
}

fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/taskd
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("taskd");
        }
    }
    #[cfg(target_os = "linux")]
    {
        // $XDG_DATA_HOME/taskd or ~/.local/share/taskd
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("taskd");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".local").join("share").join("taskd");
        }
    }
    #[cfg(target_os = "windows")]
    {
        // %APPDATA%\taskd
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("taskd");
        }
    }
    PathBuf::from(".taskd")
}

// ─── Tests ────────────────────────────────────────────────────────────────────
