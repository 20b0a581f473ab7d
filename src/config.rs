use std::path::Path;

use serde::Deserialize;

use thiserror::Error;

use crate::args::Args;
use crate::color::Color;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub clear_color: Color,
    pub vsync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clear_color: Color::default(),
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub maximized: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            maximized: true,
        }
    }
}

impl Config {
    pub fn parse(src: &str) -> Result<Self, ConfigError> {
        let config: Config = json5::from_str(src).map_err(ConfigError::Format)?;

        config.validate()
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let src = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        Self::parse(&src)
    }

    /// Defaults, then the config file if given, then command line overrides.
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => {
                log::info!("Reading config from {:?}", path);
                Self::load_from_path(path)?
            }
            None => Self::default(),
        };

        if let Some(width) = args.width {
            config.window.width = width;
        }

        if let Some(height) = args.height {
            config.window.height = height;
        }

        if args.windowed {
            config.window.maximized = false;
        }

        if args.no_vsync {
            config.vsync = false;
        }

        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::InvalidSize(
                self.window.width,
                self.window.height,
            ));
        }

        Ok(self)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(std::io::Error),
    #[error("Invalid config file: {0}")]
    Format(json5::Error),
    #[error("Invalid window size {0}x{1}")]
    InvalidSize(u32, u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_window() {
        let config = Config::resolve(&Args::default()).unwrap();

        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert!(config.window.maximized);
        assert!(config.vsync);
        assert_eq!(config.clear_color, Color::new(0.3, 0.5, 0.7, 1.0));
    }

    #[test]
    fn partial_file() {
        let config = Config::parse(
            r#"{
                // only some fields
                window: { width: 1024 },
                clear_color: { r: 0.0, g: 0.0, b: 0.0 },
            }"#,
        )
        .unwrap();

        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.clear_color, Color::new(0.0, 0.0, 0.0, 1.0));
        assert!(config.vsync);
    }

    #[test]
    fn malformed_file() {
        let res = Config::parse("{ window: ");
        assert!(matches!(res, Err(ConfigError::Format(_))));
    }

    #[test]
    fn zero_size_rejected() {
        let res = Config::parse("{ window: { height: 0 } }");
        assert!(matches!(res, Err(ConfigError::InvalidSize(800, 0))));
    }

    #[test]
    fn args_override() {
        let args = Args {
            width: Some(640),
            height: Some(480),
            windowed: true,
            no_vsync: true,
            ..Default::default()
        };

        let config = Config::resolve(&args).unwrap();

        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 480);
        assert!(!config.window.maximized);
        assert!(!config.vsync);
    }

    #[test]
    fn missing_file() {
        let args = Args {
            config: Some("/nonexistent/triangles.json5".into()),
            ..Default::default()
        };

        assert!(matches!(Config::resolve(&args), Err(ConfigError::Io(_))));
    }
}
