//! Process configuration, supplied via flags or the environment.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::figma::DEFAULT_API_BASE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("figma file key is empty")]
    MissingFileKey,

    #[error("figma access token is empty")]
    MissingAccessToken,
}

#[derive(Debug, Parser)]
#[command(
    name = "figma-design-tokens",
    about = "Export Figma shared styles as theme token files"
)]
pub struct Config {
    /// Key of the Figma file to export styles from
    #[arg(long, env = "FIGMA_FILE_KEY")]
    pub file_key: String,

    /// Personal access token for the Figma API
    #[arg(long, env = "FIGMA_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// Directory the theme files are written under
    #[arg(long, env = "THEME_OUTPUT_DIR", default_value = "theme")]
    pub output_dir: PathBuf,

    /// Alternate API origin
    #[arg(long, env = "FIGMA_API_BASE", default_value = DEFAULT_API_BASE, hide = true)]
    pub api_base: String,
}

impl Config {
    /// Rejects blank credentials before any network call is made; a wrong
    /// token still surfaces later as an authorization failure from the API.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file_key.trim().is_empty() {
            return Err(ConfigError::MissingFileKey);
        }
        if self.access_token.trim().is_empty() {
            return Err(ConfigError::MissingAccessToken);
        }
        Ok(())
    }
}
