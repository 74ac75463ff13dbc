use std::path::PathBuf;

use crate::{
    foundation::core::{IPoint, Rgb8},
    schedule::labels::WEEK_DAYS,
};

fn default_font_size() -> u32 {
    72
}

fn default_fill() -> Rgb8 {
    Rgb8::WHITE
}

fn default_stroke_fill() -> Rgb8 {
    Rgb8::BLACK
}

fn default_stroke_width() -> u32 {
    2
}

fn default_line_spacing() -> u32 {
    8
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Font and paint settings shared by every telop in a session or preset.
///
/// Sizes are full-resolution pixels; preview rendering scales them down.
pub struct Style {
    /// Font family name as shown to the user.
    #[serde(default)]
    pub family: Option<String>,
    /// Font file resolved from `family`; must be loadable before rendering.
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_fill")]
    pub fill: Rgb8,
    #[serde(default = "default_stroke_fill")]
    pub stroke_fill: Rgb8,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: u32,
    #[serde(default = "default_line_spacing")]
    pub line_spacing: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            family: None,
            font_path: None,
            font_size: default_font_size(),
            fill: default_fill(),
            stroke_fill: default_stroke_fill(),
            stroke_width: default_stroke_width(),
            line_spacing: default_line_spacing(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Persisted, scale-independent weekly layout: base image, style and seven image-space anchors.
///
/// Positions serialize as plain `[x, y]` pairs, Monday first.
pub struct Preset {
    pub base_image: PathBuf,
    #[serde(default)]
    pub style: Style,
    pub positions: [IPoint; WEEK_DAYS],
}

#[cfg(test)]
#[path = "../../tests/unit/preset/model.rs"]
mod tests;
