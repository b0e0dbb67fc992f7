use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::crop::CropOptions;
use crate::error::{FitsViewError, Result};
use crate::normalize::NormalizationState;
use crate::render::Colormap;
use crate::roi::DisplayOrigin;

/// Display and export settings shared by the CLI and the GUI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub colormap: Colormap,
    #[serde(default)]
    pub origin: DisplayOrigin,
    #[serde(default)]
    pub normalization: NormalizationState,
    #[serde(default)]
    pub export: CropOptions,
}

impl ViewerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| FitsViewError::Config(e.to_string()))?;
        config.normalization.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FitsViewError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }
}
