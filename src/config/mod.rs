mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./tubeprep.toml", "~/.config/tubeprep/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let ext = &config.conversion.normalized_extension;
    if ext.is_empty() {
        anyhow::bail!("conversion.normalized_extension cannot be empty");
    }
    if ext.contains('.') || ext.contains('/') || ext.contains('\\') {
        anyhow::bail!(
            "conversion.normalized_extension must be a bare extension like \"mp4\", got {:?}",
            ext
        );
    }

    config
        .extensions
        .validate()
        .context("Invalid [extensions] table")?;

    for path in [&config.tools.ffmpeg_path, &config.tools.ffprobe_path]
        .into_iter()
        .flatten()
    {
        if !path.exists() {
            tracing::warn!("Configured tool path does not exist: {:?}", path);
        }
    }

    Ok(())
}
