//! TOML run configuration shared by both binaries

use std::fs;
use std::path::Path;

use anyhow::Context;
use classifier::PipelineConfig;
use dataset::GenerationConfig;
use serde::{Deserialize, Serialize};

/// `[generation]` and `[evaluation]` tables; missing keys keep their defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub generation: GenerationConfig,
    pub evaluation: PipelineConfig,
}

impl RunConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read `path`, or fall back to defaults when no file is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
