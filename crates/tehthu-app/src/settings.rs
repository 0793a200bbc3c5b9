use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tehthu_config::Config;

use crate::session::Session;

/// JSON config file (or defaults) with `TEHTHU_*` environment overrides on top
pub fn load_config(file: Option<&Path>) -> anyhow::Result<Config> {
    load_config_with(file, |key| std::env::var(key).ok())
}

pub fn load_config_with(
    file: Option<&Path>,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let mut config = match file {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            let data = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => Config::default(),
    };

    config.apply_vars(var);
    Ok(config)
}

/// Command line first, then config, then whatever loaded last time
pub fn choose_dictionary(
    from_cli: Option<PathBuf>,
    config: &Config,
    session: &Session,
) -> Option<PathBuf> {
    from_cli
        .or_else(|| config.dictionary.path.clone())
        .or_else(|| session.last_dictionary())
}
