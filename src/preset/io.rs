use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::{TelopError, TelopResult},
    preset::model::Preset,
};

impl Preset {
    /// Parse a preset document; missing style fields take their defaults.
    pub fn from_json_str(s: &str) -> TelopResult<Self> {
        serde_json::from_str(s).map_err(|e| TelopError::invalid_preset(e.to_string()))
    }

    /// Pretty JSON with non-ASCII text kept as-is.
    pub fn to_json_string_pretty(&self) -> TelopResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TelopError::invalid_preset(format!("serialize preset: {e}")))
    }
}

/// Read and parse the preset file at `path`.
#[tracing::instrument]
pub fn load_preset(path: &Path) -> TelopResult<Preset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read preset '{}'", path.display()))
        .map_err(|e| TelopError::invalid_preset(format!("{e:#}")))?;
    let preset = Preset::from_json_str(&text).map_err(|e| match e {
        TelopError::InvalidPreset(msg) => {
            TelopError::invalid_preset(format!("'{}': {msg}", path.display()))
        }
        other => other,
    })?;
    tracing::debug!(base_image = %preset.base_image.display(), "loaded preset");
    Ok(preset)
}

/// Write `preset` to `path` as one whole-file write.
#[tracing::instrument(skip(preset))]
pub fn save_preset(preset: &Preset, path: &Path) -> TelopResult<()> {
    let text = preset.to_json_string_pretty()?;
    std::fs::write(path, text)
        .with_context(|| format!("write preset '{}'", path.display()))
        .map_err(|e| TelopError::output_write(format!("{e:#}")))?;
    tracing::info!(path = %path.display(), "saved preset");
    Ok(())
}
