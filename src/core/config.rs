//! Session configuration
//!
//! Everything a session needs from the outside world is collected into a
//! [`SessionConfig`] before the bootstrapper runs. The config can be built by
//! hand, deserialized from JSON, or read from a key lookup such as the process
//! environment. Core logic only ever sees the finished struct.

use crate::core::constants::{
    DEFAULT_STYLE_INDEX, PROGRAM_ENV_VAR, STYLE_ENV_VAR, TOKEN_ENV_VAR,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid session config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kind of view the session drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapKind {
    /// Flat, projected map
    Map,
    /// 3D globe
    Globe,
}

impl MapKind {
    /// Globes need polygon overlays rasterized up front.
    pub fn render_all_polygons(&self) -> bool {
        matches!(self, Self::Globe)
    }

    /// Whether a configured camera program is played for this kind of view.
    pub fn runs_camera_program(&self) -> bool {
        matches!(self, Self::Map)
    }
}

impl Default for MapKind {
    fn default() -> Self {
        Self::Map
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Tile service token. `None` is treated like the placeholder.
    pub token: Option<String>,
    /// Index into the style catalog
    pub style_index: usize,
    /// Optional camera program, e.g. `"35.66,139.835,0.025,0.0025,2,20"`
    pub camera_program: Option<String>,
}

impl SessionConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn with_style_index(mut self, style_index: usize) -> Self {
        self.style_index = style_index;
        self
    }

    pub fn with_camera_program(mut self, program: impl Into<String>) -> Self {
        self.camera_program = Some(program.into());
        self
    }

    /// Build a config from any key lookup.
    ///
    /// The style index is read as a number and truncated, so `"1.5"` selects
    /// index 1. Anything that is not a finite, non-negative number falls back
    /// to the default index rather than failing.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let style_index = lookup(STYLE_ENV_VAR)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite() && *value >= 0.0)
            .map(|value| value.trunc() as usize)
            .unwrap_or(DEFAULT_STYLE_INDEX);

        Self {
            token: lookup(TOKEN_ENV_VAR),
            style_index,
            camera_program: lookup(PROGRAM_ENV_VAR),
        }
    }

    /// Read `MAPTILER_TOKEN`, `MAPTILER_STYLE` and `MAPTILER_PROGRAM` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn token(&self) -> &str {
        self.token.as_deref().unwrap_or_default()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token: None,
            style_index: DEFAULT_STYLE_INDEX,
            camera_program: None,
        }
    }
}
