//! Configuration for fars.
//!
//! Values come from built-in defaults, optionally overridden by a TOML file:
//!
//! ```toml
//! data_dir = "/srv/fars"
//!
//! [map]
//! output = "maps/state.png"
//! width = 1600
//! height = 1200
//! ```

use std::path::PathBuf;

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default rendered map file name.
const MAP_FILE_NAME: &str = "fars_map.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarsConfig {
    /// Directory holding the `accident_<year>.csv.bz2` files.
    pub data_dir: PathBuf,
    /// State map rendering.
    pub map: MapConfig,
}

/// Rendering options for state maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Where the PNG is written.
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Dot radius in pixels.
    pub point_radius: u32,
    /// Open the rendered image with the system viewer.
    pub open_viewer: bool,
}

impl Default for FarsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            map: MapConfig::default(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(MAP_FILE_NAME),
            width: 1024,
            height: 768,
            point_radius: 1,
            open_viewer: false,
        }
    }
}

impl FarsConfig {
    /// Load configuration, merging `config_path` over the defaults when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or the result is invalid.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(FarsConfig::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        let config: FarsConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the renderer cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.map.width == 0 || self.map.height == 0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "map size must be non-zero, got {}x{}",
                    self.map.width, self.map.height
                ),
            });
        }
        if self.map.point_radius == 0 {
            return Err(Error::ConfigValidation {
                message: "map.point_radius must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
