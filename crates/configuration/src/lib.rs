use crate::error::ConfigError;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{ColumnNames, Config, ReportSettings, ServerSettings};

/// Name of the configuration file looked up in the working directory when no
/// explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tradelens.toml";

/// Prefix of environment variables that override file settings,
/// e.g. `TRADELENS__REPORT__STAKE=250`.
pub const ENV_PREFIX: &str = "TRADELENS";

/// Command-line arguments shared by every binary that loads a `Config`.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// Path to a TOML configuration file. Defaults to `tradelens.toml` if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Loads the application configuration.
///
/// Built-in defaults are overlaid by the configuration file, then by `TRADELENS__*`
/// environment variables. When `path` is `None` the default file is optional;
/// an explicitly given file must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path.to_path_buf()).required(true),
        None => config::File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
    };

    let builder = config::Config::builder()
        .set_default("columns.market", "Mercado")?
        .set_default("columns.start_time", "Hora de inicio")?
        .set_default("columns.resolved_at", "Data da última resolução")?
        .set_default("columns.profit_loss", "Lucro/Perda (R$)")?
        .set_default("report.stake", "500.00")?
        .set_default("report.sport_prefix", "Futebol")?
        .set_default("report.top_teams", 5)?
        .set_default("report.cache_capacity", 16)?
        .set_default("server.addr", "127.0.0.1:3000")?
        .set_default("server.body_limit_bytes", 50 * 1024 * 1024)?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

/// Rejects settings that would make report generation meaningless.
fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.report.stake <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(format!(
            "report.stake must be positive, got {}",
            config.report.stake
        )));
    }
    if config.report.sport_prefix.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "report.sport_prefix must not be empty".to_string(),
        ));
    }
    if config.report.cache_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "report.cache_capacity must be at least 1".to_string(),
        ));
    }

    let columns = config.columns.required();
    for (i, name) in columns.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "column names must not be empty".to_string(),
            ));
        }
        if columns[..i].contains(name) {
            return Err(ConfigError::ValidationError(format!(
                "column '{name}' is mapped to more than one field"
            )));
        }
    }

    Ok(())
}
