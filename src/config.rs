use anyhow::{Context, Result};
use std::{env, path::PathBuf};

use crate::reset::ResetOptions;

/// Command-line configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Options applied by the `reset` command
    pub reset: ResetConfig,

    /// Viewport size used by the `device` command when none is given
    pub viewport: ViewportConfig,
}

#[derive(Clone, Debug, Default)]
pub struct ResetConfig {
    pub options_path: Option<PathBuf>,
    pub options: ResetOptions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl AppConfig {
    /// Load and validate the configuration
    ///
    /// Unset variables fall back to defaults; set but invalid ones are errors.
    pub fn load() -> Result<Self> {
        let reset = ResetConfig::load()?;
        let viewport = ViewportConfig::load()?;

        Ok(Self { reset, viewport })
    }
}

impl ResetConfig {
    fn load() -> Result<Self> {
        let Ok(path) = env::var("RESET_OPTIONS_PATH") else {
            return Ok(Self::default());
        };

        let options_path = PathBuf::from(path);
        let options = ResetOptions::from_file(&options_path)
            .context("failed to load RESET_OPTIONS_PATH")?;

        Ok(Self {
            options_path: Some(options_path),
            options,
        })
    }
}

impl ViewportConfig {
    const DEFAULT_WIDTH: &str = "1920";
    const DEFAULT_HEIGHT: &str = "1080";

    fn load() -> Result<Self> {
        let width = env::var("VIEWPORT_WIDTH")
            .unwrap_or_else(|_| Self::DEFAULT_WIDTH.to_string())
            .parse::<f64>()
            .context("failed to parse VIEWPORT_WIDTH: invalid format")?;

        let height = env::var("VIEWPORT_HEIGHT")
            .unwrap_or_else(|_| Self::DEFAULT_HEIGHT.to_string())
            .parse::<f64>()
            .context("failed to parse VIEWPORT_HEIGHT: invalid format")?;

        Ok(Self { width, height })
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}
