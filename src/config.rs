//! Runtime configuration for loan-approval-server.
//!
//! Configuration is loaded from an optional JSON file and then overridden by
//! command-line flags. Relative paths are resolved against the install
//! location, so the binary finds its model and front-end regardless of the
//! working directory it was started from.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "loan-approval-server", about = "Loan approval prediction server")]
pub struct Cli {
    /// Path to configuration file (JSON).
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// HTTP listen address (overrides the config file).
    #[arg(long)]
    pub listen: Option<String>,

    /// Path to the model artifact (overrides the config file).
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Directory holding the built front-end (overrides the config file).
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// The single origin allowed to make cross-origin requests.
    #[arg(long)]
    pub allowed_origin: Option<String>,

    /// Base directory for relative paths. Defaults to the executable's directory.
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,

    /// Model configuration.
    pub model: ModelConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address (e.g. "0.0.0.0:5000").
    pub listen: String,

    /// Origin allowed by the CORS layer.
    pub allowed_origin: String,

    /// Directory with the front-end bundle; `index.html` is the SPA fallback.
    pub static_dir: PathBuf,

    /// Report malformed applicant fields as 400 instead of 500.
    pub strict_client_errors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:5000".to_string(),
            allowed_origin: "http://localhost:5174".to_string(),
            static_dir: PathBuf::from("frontend/build"),
            strict_client_errors: false,
        }
    }
}

/// Model-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the JSON model artifact.
    pub model_path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model/logistic_model.json"),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let data = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&data)?;
            Ok(config)
        } else {
            tracing::warn!("Config file not found at {:?}, using defaults", path);
            Ok(Config::default())
        }
    }

    /// Apply command-line overrides.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(listen) = &cli.listen {
            self.server.listen = listen.clone();
        }
        if let Some(origin) = &cli.allowed_origin {
            self.server.allowed_origin = origin.clone();
        }
        if let Some(dir) = &cli.static_dir {
            self.server.static_dir = dir.clone();
        }
        if let Some(model) = &cli.model {
            self.model.model_path = model.clone();
        }
        self
    }

    /// Make every relative path absolute with respect to `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.server.static_dir = resolve(base, &self.server.static_dir);
        self.model.model_path = resolve(base, &self.model.model_path);
        self
    }
}

/// Directory relative paths are resolved against: `--base-dir` if given,
/// otherwise the directory containing the running executable.
pub fn install_dir(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(dir) = &cli.base_dir {
        return Ok(dir.clone());
    }
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow::anyhow!("executable path {} has no parent", exe.display()))
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
