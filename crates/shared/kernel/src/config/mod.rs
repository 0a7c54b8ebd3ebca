use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Custom error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(context))]
    Config {
        #[source]
        source: config::ConfigError,
        context: Option<Cow<'static, str>>,
    },
}

/// A reusable configuration loader that combines file-based settings with
/// environment overrides.
///
/// Layered strategy:
/// 1. **Base File**: Loads settings from a file (e.g., `server.toml`). If no
///    path is provided, it defaults to `"server"`. A missing file is not an
///    error; the type's own defaults apply.
/// 2. **Environment Overrides**: Overlays values from environment variables
///    prefixed with `ATLAS__`. Nested structures use double underscores
///    (e.g., `ATLAS__DATABASE__URL` maps to `database.url`).
///
/// # Errors
/// Returns [`ConfigError`] if the file or environment content does not match
/// the structure of type `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("server"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix("ATLAS").separator("__").convert_case(config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .map_err(|source| ConfigError::Config {
            source,
            context: Some("Failed to build config".into()),
        })?
        .try_deserialize::<T>()
        .map_err(|source| ConfigError::Config {
            source,
            context: Some("Failed to deserialize config".into()),
        })?;

    Ok(config)
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
