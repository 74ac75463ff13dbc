use std::path::{Path, PathBuf};

use crate::{
    foundation::{
        core::{IPoint, PixelRect, Rgb8},
        error::{TelopError, TelopResult},
    },
    preset::model::Style,
    render::{composite::over_at, surface::Surface},
    text::layout::{TextLayout, TextLayoutEngine, TextMetricsParams},
    transform::viewport::ViewportTransform,
};

/// A [`Style`] with its font resolved and sizes fixed for one target surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderStyle {
    pub font_path: PathBuf,
    pub metrics: TextMetricsParams,
    pub fill: Rgb8,
    pub stroke_fill: Rgb8,
}

impl RenderStyle {
    /// Full-resolution style; fails when no font file has been resolved yet.
    pub fn full(style: &Style) -> TelopResult<Self> {
        let font_path = style
            .font_path
            .clone()
            .ok_or_else(|| TelopError::font_unavailable("no font selected"))?;
        Ok(Self {
            font_path,
            metrics: TextMetricsParams {
                font_size: style.font_size,
                line_spacing: style.line_spacing,
                stroke_width: style.stroke_width,
            },
            fill: style.fill,
            stroke_fill: style.stroke_fill,
        })
    }

    /// Preview style: every length multiplied by the preview scale and floored; the font size
    /// never drops below `min_font_px`.
    pub fn preview(style: &Style, view: &ViewportTransform, min_font_px: u32) -> TelopResult<Self> {
        let mut out = Self::full(style)?;
        out.metrics = TextMetricsParams {
            font_size: view.scale_length(style.font_size, min_font_px.max(1)),
            line_spacing: view.scale_length(style.line_spacing, 0),
            stroke_width: view.scale_length(style.stroke_width, 0),
        };
        Ok(out)
    }
}

/// Draws telops onto surfaces and measures them with the same layouts.
#[derive(Default)]
pub struct Renderer {
    engine: TextLayoutEngine,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the font at `path` ahead of time and return its family name.
    pub fn load_font(&mut self, path: &Path) -> TelopResult<String> {
        self.engine.load_font(path)
    }

    pub fn layout(&mut self, text: &str, style: &RenderStyle) -> TelopResult<TextLayout> {
        self.engine.layout(text, &style.font_path, style.metrics)
    }

    /// Bounding box size of `text` exactly as [`Renderer::draw`] lays it out.
    pub fn measure(&mut self, text: &str, style: &RenderStyle) -> TelopResult<(u32, u32)> {
        self.layout(text, style).map(|l| l.size())
    }

    /// Draw `text` with its box's top-left at `anchor`, compositing over existing pixels.
    ///
    /// Returns the box in surface coordinates.
    pub fn draw(
        &mut self,
        surface: &mut Surface,
        anchor: IPoint,
        text: &str,
        style: &RenderStyle,
    ) -> TelopResult<PixelRect> {
        let layout = self.layout(text, style)?;
        paint_layout(surface, anchor, &layout, style)?;
        Ok(PixelRect::from_origin_size(
            anchor,
            layout.width(),
            layout.height(),
        ))
    }

    /// Render `text` into its own transparent tile sized to the measured box.
    pub fn render_tile(&mut self, text: &str, style: &RenderStyle) -> TelopResult<Surface> {
        let layout = self.layout(text, style)?;
        let mut tile = Surface::new(layout.width(), layout.height());
        paint_layout(&mut tile, IPoint::default(), &layout, style)?;
        Ok(tile)
    }
}

/// Extra room around the box so glyph overhang is not clipped before compositing.
fn overhang_pad(layout: &TextLayout) -> u32 {
    (layout.params.font_size / 4).max(2)
}

fn paint_layout(
    surface: &mut Surface,
    anchor: IPoint,
    layout: &TextLayout,
    style: &RenderStyle,
) -> TelopResult<()> {
    let pad = overhang_pad(layout);
    let tile_w: u16 = (layout.width() + 2 * pad)
        .try_into()
        .map_err(|_| TelopError::validation("text tile width exceeds u16"))?;
    let tile_h: u16 = (layout.height() + 2 * pad)
        .try_into()
        .map_err(|_| TelopError::validation("text tile height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(tile_w, tile_h);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        f64::from(pad),
        f64::from(pad),
    )));

    let font_size = layout.params.font_size as f32;
    let glyphs = || {
        layout.glyphs.iter().map(|g| vello_cpu::Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        })
    };

    let stroke_width = layout.params.stroke_width;
    if stroke_width > 0 {
        // Centered stroke, so double the width to get `stroke_width` outside the outline.
        ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(2.0 * f64::from(stroke_width))
                .with_join(vello_cpu::kurbo::Join::Round),
        );
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            style.stroke_fill.r,
            style.stroke_fill.g,
            style.stroke_fill.b,
            255,
        ));
        ctx.glyph_run(&layout.font)
            .font_size(font_size)
            .stroke_glyphs(glyphs());
    }

    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        style.fill.r,
        style.fill.g,
        style.fill.b,
        255,
    ));
    ctx.glyph_run(&layout.font)
        .font_size(font_size)
        .fill_glyphs(glyphs());

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(tile_w, tile_h);
    ctx.render_to_pixmap(&mut pixmap);

    let tile = Surface::from_premul_rgba8(
        u32::from(tile_w),
        u32::from(tile_h),
        pixmap.data_as_u8_slice().to_vec(),
    )?;
    let pad = pad as i32;
    over_at(surface, &tile, anchor.offset(-pad, -pad));
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
