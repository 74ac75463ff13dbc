use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::{TelopError, TelopResult};

/// Size-dependent text parameters, all in pixels of the target surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextMetricsParams {
    pub font_size: u32,
    pub line_spacing: u32,
    pub stroke_width: u32,
}

/// One glyph positioned relative to the top-left corner of the text box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedGlyph {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// Shaped, left-aligned, possibly multi-line text with its bounding box.
///
/// The renderer paints exactly these glyph positions, so measurement and drawing share one
/// layout.
#[derive(Clone)]
pub struct TextLayout {
    pub(crate) font: vello_cpu::peniko::FontData,
    pub(crate) glyphs: Vec<PlacedGlyph>,
    pub(crate) params: TextMetricsParams,
    width: u32,
    height: u32,
    line_count: usize,
}

impl std::fmt::Debug for TextLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayout")
            .field("glyphs", &self.glyphs.len())
            .field("params", &self.params)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("line_count", &self.line_count)
            .finish()
    }
}

impl TextLayout {
    /// Box width including stroke on both sides; never zero.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Box height including stroke on both sides; never zero.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn glyphs(&self) -> &[PlacedGlyph] {
        &self.glyphs
    }

    pub fn params(&self) -> TextMetricsParams {
        self.params
    }
}

struct LoadedFont {
    font_ctx: parley::FontContext,
    family: String,
    render_font: vello_cpu::peniko::FontData,
}

/// Stateful helper that loads font files once and builds [`TextLayout`]s from them.
///
/// Each font gets its own Parley font context so that two files sharing a family name never
/// shadow each other.
pub struct TextLayoutEngine {
    fonts: HashMap<PathBuf, LoadedFont>,
    layout_ctx: parley::LayoutContext<()>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Load (or reuse) the font at `path` and return its primary family name.
    pub fn load_font(&mut self, path: &Path) -> TelopResult<String> {
        self.ensure_font(path)?;
        Ok(self
            .fonts
            .get(path)
            .map(|f| f.family.clone())
            .unwrap_or_default())
    }

    fn ensure_font(&mut self, path: &Path) -> TelopResult<()> {
        if self.fonts.contains_key(path) {
            return Ok(());
        }

        let bytes = std::fs::read(path)
            .with_context(|| format!("read font '{}'", path.display()))
            .map_err(|e| TelopError::font_unavailable(format!("{e:#}")))?;

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            TelopError::font_unavailable(format!(
                "'{}' does not contain a parsable font",
                path.display()
            ))
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| {
                TelopError::font_unavailable(format!(
                    "font family in '{}' has no name",
                    path.display()
                ))
            })?
            .to_string();

        let render_font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        tracing::debug!(path = %path.display(), family = %family, "loaded font");
        self.fonts.insert(
            path.to_path_buf(),
            LoadedFont {
                font_ctx,
                family,
                render_font,
            },
        );
        Ok(())
    }

    /// Shape `text` with the font at `font_path`.
    ///
    /// Lines are separated by `\n` and stacked top to bottom; each line advances by its own
    /// height plus `line_spacing` plus `stroke_width`. Glyph outlines are offset by
    /// `stroke_width` so the stroke stays inside the box. Empty text (and empty lines) lay out
    /// as a single space so the box is never degenerate.
    pub fn layout(
        &mut self,
        text: &str,
        font_path: &Path,
        params: TextMetricsParams,
    ) -> TelopResult<TextLayout> {
        if params.font_size == 0 {
            return Err(TelopError::validation("font size must be > 0"));
        }
        self.ensure_font(font_path)?;
        let font = self
            .fonts
            .get_mut(font_path)
            .ok_or_else(|| TelopError::font_unavailable("font vanished from engine cache"))?;

        let stroke = params.stroke_width as f32;
        let spacing = params.line_spacing as f32;
        let size_px = params.font_size as f32;

        let mut glyphs = Vec::new();
        let mut top = stroke;
        let mut bottom = stroke;
        let mut max_width = 0.0f32;
        let lines = split_lines(text);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                top = bottom + spacing + stroke;
            }

            let mut builder =
                self.layout_ctx
                    .ranged_builder(&mut font.font_ctx, line, 1.0, true);
            builder.push_default(parley::style::StyleProperty::FontStack(
                parley::style::FontStack::Source(std::borrow::Cow::Owned(font.family.clone())),
            ));
            builder.push_default(parley::style::StyleProperty::FontSize(size_px));
            let mut line_layout: parley::Layout<()> = builder.build(line);
            line_layout.break_all_lines(None);

            for visual_line in line_layout.lines() {
                for item in visual_line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    glyphs.extend(run.positioned_glyphs().map(|g| PlacedGlyph {
                        id: g.id.into(),
                        x: stroke + g.x,
                        y: top + g.y,
                    }));
                }
            }

            max_width = max_width.max(line_layout.width());
            bottom = top + line_layout.height();
        }

        let width = (max_width + 2.0 * stroke).ceil().max(1.0) as u32;
        let height = (bottom + stroke).ceil().max(1.0) as u32;

        Ok(TextLayout {
            font: font.render_font.clone(),
            glyphs,
            params,
            width,
            height,
            line_count: lines.len(),
        })
    }

    /// Bounding box `(width, height)` of `text` as the renderer would paint it.
    pub fn measure(
        &mut self,
        text: &str,
        font_path: &Path,
        params: TextMetricsParams,
    ) -> TelopResult<(u32, u32)> {
        self.layout(text, font_path, params).map(|l| l.size())
    }
}

fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .map(|l| if l.is_empty() { " " } else { l })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
