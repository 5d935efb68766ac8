//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use fitment_lookup::HttpLookupClient;
use fitment_observability::{LogFormat, LogLevel, StructuredLogger};
use fitment_store::{FileJar, LedgerStore};
use fitment_widgets::FitmentConfig;

use crate::output::Output;

/// Config file names searched from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["fitment.toml", ".fitment.toml", "fitment.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Widget configuration.
    pub config: FitmentConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Cookie jar file.
    pub jar_path: PathBuf,
    /// Logger handed to the store, selector and lookup client.
    pub logger: StructuredLogger,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, jar: &str, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            let config = FitmentConfig::load(&path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?;
            (config, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (FitmentConfig::default(), None),
            }
        };

        let logger = StructuredLogger::new("fitment")
            .with_format(LogFormat::Human)
            .with_min_level(if output.is_verbose() {
                LogLevel::Debug
            } else {
                LogLevel::Warn
            });

        Ok(Self {
            jar_path: resolve(&cwd, jar),
            config,
            config_path,
            output,
            cwd,
            logger,
        })
    }

    /// Open the ledger store over the jar file.
    pub fn open_store(&self) -> Result<LedgerStore<FileJar>> {
        let jar = FileJar::open(&self.jar_path)
            .with_context(|| format!("Failed to open cookie jar: {}", self.jar_path.display()))?;
        self.output
            .debug(&format!("Using cookie jar {}", self.jar_path.display()));
        Ok(LedgerStore::new(
            jar,
            self.config.cookies.clone(),
            self.logger.clone(),
        ))
    }

    /// Build a lookup client from the configured API settings.
    pub fn lookup_client(&self) -> Result<HttpLookupClient> {
        let client = HttpLookupClient::new(&self.config.api)
            .context("Failed to build lookup client")?
            .with_logger(self.logger.clone());
        self.output
            .debug(&format!("Lookup API at {}", client.base_url()));
        Ok(client)
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<(FitmentConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                if let Ok(config) = FitmentConfig::load(&config_path) {
                    return Some((config, config_path));
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Resolve a path relative to the working directory.
fn resolve(cwd: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        cwd.join(path)
    }
}
