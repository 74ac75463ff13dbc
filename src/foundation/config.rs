use std::path::PathBuf;

use chrono::{FixedOffset, Offset as _, Utc};

/// Runtime knobs shared by the preview renderer, font catalog and weekly generation.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Smallest font size used for preview rendering, in pixels.
    pub min_preview_font_px: u32,
    /// Straight RGBA fill for viewport areas not covered by the preview image.
    pub preview_background: [u8; 4],
    /// UTC offset (whole hours) of the reference zone used to resolve "today".
    pub tz_offset_hours: i32,
    /// Extra directories scanned for font files in addition to system fonts.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_preview_font_px: 8,
            preview_background: [0x2f, 0x2f, 0x2f, 0xff],
            tz_offset_hours: 9,
            font_dirs: Vec::new(),
        }
    }
}

impl Settings {
    /// Defaults overridden by `TELOP_*` environment variables.
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut out = Self::default();
        if let Some(px) = std::env::var("TELOP_MIN_PREVIEW_FONT_PX")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            out.min_preview_font_px = px;
        }
        if let Some(h) = std::env::var("TELOP_TZ_OFFSET_HOURS")
            .ok()
            .and_then(|v| v.trim().parse::<i32>().ok())
            .filter(|h| (-23..=23).contains(h))
        {
            out.tz_offset_hours = h;
        }
        if let Some(dirs) = std::env::var_os("TELOP_FONT_DIRS") {
            out.font_dirs = std::env::split_paths(&dirs)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }
        out
    }

    /// Reference zone as a fixed offset; falls back to UTC on an out-of-range value.
    pub fn reference_zone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.tz_offset_hours.saturating_mul(3600)).unwrap_or(Utc.fix())
    }
}
