use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::{
    assets::{decode::load_base_image, fonts::FontResolver},
    foundation::{
        config::Settings,
        core::{IPoint, PixelRect, Rgb8, Size},
        error::{TelopError, TelopResult},
    },
    layout::auto::{DEFAULT_MARGIN, Orientation, auto_layout, single_anchor},
    preset::model::{Preset, Style},
    render::{composite::over_at, cpu::RenderStyle, cpu::Renderer, surface::Surface},
    schedule::labels::{WEEK_DAYS, monday_of, split_week_bodies, today_in, week_labels},
    session::hit::{Drag, hit_test},
    transform::viewport::ViewportTransform,
};

/// Text of the single telop before the user edits it.
pub const DEFAULT_SINGLE_TEXT: &str = "ここにテロップ\n(複数行可)";

/// Viewport edges smaller than this are treated as this size.
pub const MIN_VIEWPORT_EDGE: u32 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// One free telop.
    #[default]
    Single,
    /// Seven day telops driven by the week start and bodies.
    Weekly,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Weekly => "weekly",
        }
    }
}

/// One telop on the preview: text, active and auto anchors, and a cached preview bbox.
///
/// Any change to text or position drops the cached bbox; it is re-measured on demand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBlock {
    text: String,
    pos: IPoint,
    auto_pos: IPoint,
    bbox: Option<PixelRect>,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, pos: IPoint) -> Self {
        Self {
            text: text.into(),
            pos,
            auto_pos: pos,
            bbox: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Active anchor, preview space.
    pub fn pos(&self) -> IPoint {
        self.pos
    }

    pub fn auto_pos(&self) -> IPoint {
        self.auto_pos
    }

    /// Last measured box, or `None` when stale.
    pub fn cached_bbox(&self) -> Option<PixelRect> {
        self.bbox
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.bbox = None;
    }

    /// Manual move; the auto anchor is kept for [`TextBlock::reset`].
    pub fn move_to(&mut self, pos: IPoint) {
        self.pos = pos;
        self.bbox = None;
    }

    /// Overwrite both anchors with a layout-policy position.
    pub fn place_auto(&mut self, pos: IPoint) {
        self.pos = pos;
        self.auto_pos = pos;
        self.bbox = None;
    }

    pub fn reset(&mut self) {
        self.move_to(self.auto_pos);
    }

    fn invalidate(&mut self) {
        self.bbox = None;
    }
}

struct BaseImage {
    path: PathBuf,
    full: Surface,
    /// Base image resized to the current preview footprint.
    preview: Option<Surface>,
}

/// Editing state for one interactive session.
///
/// The interactive shell owns one value and calls into it for every event; nothing here touches
/// global or display state. Every fallible operation leaves the session unchanged on error.
pub struct Session {
    settings: Settings,
    mode: Mode,
    style: Style,
    base: Option<BaseImage>,
    viewport: Size,
    view: Option<ViewportTransform>,
    single: TextBlock,
    single_placed: bool,
    week: [TextBlock; WEEK_DAYS],
    week_bodies: [String; WEEK_DAYS],
    week_start: NaiveDate,
    orientation: Orientation,
    margin: u32,
    drag: Option<Drag>,
    active: Option<usize>,
    renderer: Renderer,
}

impl Session {
    /// Fresh session; the week starts on the Monday of today in the configured zone.
    pub fn new(settings: Settings, viewport: Size) -> Self {
        let week_start = monday_of(today_in(settings.reference_zone()));
        let week_bodies: [String; WEEK_DAYS] = Default::default();
        let labels = week_labels(week_start, &week_bodies);
        Self {
            settings,
            mode: Mode::default(),
            style: Style::default(),
            base: None,
            viewport: clamp_viewport(viewport),
            view: None,
            single: TextBlock::new(DEFAULT_SINGLE_TEXT, IPoint::default()),
            single_placed: false,
            week: labels.map(|l| TextBlock::new(l, IPoint::default())),
            week_bodies,
            week_start,
            orientation: Orientation::default(),
            margin: DEFAULT_MARGIN,
            drag: None,
            active: None,
            renderer: Renderer::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Current preview transform; `None` until a base image is loaded.
    pub fn view(&self) -> Option<&ViewportTransform> {
        self.view.as_ref()
    }

    pub fn base_image(&self) -> Option<&Surface> {
        self.base.as_ref().map(|b| &b.full)
    }

    pub fn base_image_path(&self) -> Option<&Path> {
        self.base.as_ref().map(|b| b.path.as_path())
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub fn week_bodies(&self) -> &[String; WEEK_DAYS] {
        &self.week_bodies
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    pub fn single_block(&self) -> &TextBlock {
        &self.single
    }

    pub fn week_blocks(&self) -> &[TextBlock; WEEK_DAYS] {
        &self.week
    }

    /// Blocks of the current mode, in draw order.
    pub fn blocks(&self) -> &[TextBlock] {
        match self.mode {
            Mode::Single => std::slice::from_ref(&self.single),
            Mode::Weekly => &self.week,
        }
    }

    fn blocks_mut(&mut self) -> &mut [TextBlock] {
        match self.mode {
            Mode::Single => std::slice::from_mut(&mut self.single),
            Mode::Weekly => &mut self.week,
        }
    }

    /// Block selected by the last pointer-down, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub(crate) fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    // ------------------------------------------------------------------ image & viewport

    /// Decode and adopt the base image at `path`.
    pub fn load_base_image(&mut self, path: &Path) -> TelopResult<()> {
        let surface = load_base_image(path)?;
        self.set_base_image(path.to_path_buf(), surface)
    }

    /// Adopt an already decoded base image.
    ///
    /// The single telop is placed at its default anchor on the first image only; weekly telops
    /// are auto-laid out on every image.
    pub fn set_base_image(&mut self, path: PathBuf, surface: Surface) -> TelopResult<()> {
        if surface.size().is_empty() {
            return Err(TelopError::image_load(format!(
                "'{}' has zero width or height",
                path.display()
            )));
        }
        let view = ViewportTransform::fit(self.viewport, surface.size())?;

        tracing::info!(
            path = %path.display(),
            width = surface.width(),
            height = surface.height(),
            scale = view.scale,
            "base image loaded"
        );
        self.base = Some(BaseImage {
            path,
            full: surface,
            preview: None,
        });
        self.view = Some(view);
        if !self.single_placed {
            self.single.place_auto(single_anchor(&view));
            self.single_placed = true;
        }
        self.single.invalidate();
        self.relayout_week();
        self.drag = None;
        self.active = None;
        Ok(())
    }

    /// New viewport size: re-fit the preview and re-run weekly auto-layout.
    ///
    /// Auto-layout overwrites both active and auto anchors, so manual weekly drags are lost.
    pub fn set_viewport(&mut self, viewport: Size) -> TelopResult<()> {
        let viewport = clamp_viewport(viewport);
        if let Some(base) = &self.base {
            let view = ViewportTransform::fit(viewport, base.full.size())?;
            self.view = Some(view);
        }
        self.viewport = viewport;
        self.single.invalidate();
        self.relayout_week();
        Ok(())
    }

    // ------------------------------------------------------------------ mode & text

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.drag = None;
            self.active = None;
        }
    }

    pub fn set_single_text(&mut self, text: impl Into<String>) {
        self.single.set_text(text);
    }

    /// Replace the week bodies with the lines of `block`, padded or truncated to seven.
    pub fn set_week_bodies(&mut self, block: &str) {
        self.week_bodies = split_week_bodies(block);
        self.regen_week_texts();
    }

    /// Any date is accepted; labels count days from it even when it is not a Monday.
    pub fn set_week_start(&mut self, week_start: NaiveDate) {
        self.week_start = week_start;
        self.regen_week_texts();
        self.relayout_week();
    }

    /// Reset the week start to the Monday of today in the configured zone.
    pub fn reset_week_start(&mut self) {
        let today = today_in(self.settings.reference_zone());
        self.set_week_start(monday_of(today));
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.relayout_week();
    }

    pub fn set_margin(&mut self, margin: u32) {
        self.margin = margin;
        self.relayout_week();
    }

    /// Move every block of the current mode back to its auto anchor.
    pub fn reset_positions(&mut self) {
        for block in self.blocks_mut() {
            block.reset();
        }
    }

    fn regen_week_texts(&mut self) {
        let labels = week_labels(self.week_start, &self.week_bodies);
        for (block, label) in self.week.iter_mut().zip(labels) {
            block.set_text(label);
        }
    }

    fn relayout_week(&mut self) {
        let Some(view) = self.view else {
            return;
        };
        let anchors = auto_layout(self.orientation, self.margin, &view);
        for (block, pos) in self.week.iter_mut().zip(anchors) {
            block.place_auto(pos);
        }
    }

    // ------------------------------------------------------------------ style

    /// Resolve `family` to a font file and make it current.
    ///
    /// Fails with `FontUnavailable` when the family is unknown or its file does not parse.
    pub fn select_family(
        &mut self,
        family: &str,
        resolver: &dyn FontResolver,
    ) -> TelopResult<PathBuf> {
        let path = resolver.resolve(family).ok_or_else(|| {
            TelopError::font_unavailable(format!("no font file for family '{family}'"))
        })?;
        self.renderer.load_font(&path)?;
        tracing::debug!(family, path = %path.display(), "font selected");
        self.style.family = Some(family.to_string());
        self.style.font_path = Some(path.clone());
        self.invalidate_all();
        Ok(path)
    }

    pub fn set_font_size(&mut self, font_size: u32) -> TelopResult<()> {
        if font_size == 0 {
            return Err(TelopError::validation("font size must be > 0"));
        }
        self.style.font_size = font_size;
        self.invalidate_all();
        Ok(())
    }

    pub fn set_fill(&mut self, fill: Rgb8) {
        self.style.fill = fill;
    }

    pub fn set_stroke_fill(&mut self, stroke_fill: Rgb8) {
        self.style.stroke_fill = stroke_fill;
    }

    pub fn set_stroke_width(&mut self, stroke_width: u32) {
        self.style.stroke_width = stroke_width;
        self.invalidate_all();
    }

    pub fn set_line_spacing(&mut self, line_spacing: u32) {
        self.style.line_spacing = line_spacing;
        self.invalidate_all();
    }

    fn invalidate_all(&mut self) {
        self.single.invalidate();
        for block in &mut self.week {
            block.invalidate();
        }
    }

    // ------------------------------------------------------------------ hit-testing & drag

    /// Preview boxes of the current blocks, re-measuring stale ones.
    ///
    /// Without a selected font each block gets a 1x1 box at its anchor, so hit-testing still
    /// falls back to the nearest anchor.
    pub fn bboxes(&mut self) -> TelopResult<Vec<PixelRect>> {
        let Some(view) = self.view else {
            return Ok(Vec::new());
        };
        let style = match self.style.font_path {
            Some(_) => Some(RenderStyle::preview(
                &self.style,
                &view,
                self.settings.min_preview_font_px,
            )?),
            None => None,
        };

        let blocks: &mut [TextBlock] = match self.mode {
            Mode::Single => std::slice::from_mut(&mut self.single),
            Mode::Weekly => &mut self.week,
        };
        let mut out = Vec::with_capacity(blocks.len());
        for block in blocks.iter_mut() {
            let bbox = match (block.bbox, &style) {
                (Some(b), _) => b,
                (None, Some(style)) => {
                    let (w, h) = self.renderer.measure(&block.text, style)?;
                    PixelRect::from_origin_size(block.pos, w, h)
                }
                (None, None) => PixelRect::from_origin_size(block.pos, 1, 1),
            };
            block.bbox = Some(bbox);
            out.push(bbox);
        }
        Ok(out)
    }

    /// Select the block under `p` (or nearest to it) and start dragging it.
    pub fn pointer_down(&mut self, p: IPoint) -> TelopResult<Option<usize>> {
        if self.base.is_none() {
            return Ok(None);
        }
        let boxes = self.bboxes()?;
        let hit = hit_test(&boxes, p);
        self.active = hit;
        self.drag = hit.map(|i| Drag::start(i, p, self.blocks()[i].pos));
        Ok(hit)
    }

    /// Move the dragged block so the grab offset stays under `p`. Returns whether it moved.
    pub fn pointer_drag(&mut self, p: IPoint) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let anchor = drag.anchor_for(p);
        match self.blocks_mut().get_mut(drag.index) {
            Some(block) => {
                block.move_to(anchor);
                true
            }
            None => false,
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    // ------------------------------------------------------------------ rendering

    /// Viewport-sized preview: background, scaled base image and every current block.
    ///
    /// Without a selected font the telops are skipped. Refreshes every block's bbox.
    #[tracing::instrument(skip(self))]
    pub fn render_preview(&mut self) -> TelopResult<Surface> {
        let mut surface = Surface::filled(
            self.viewport.width,
            self.viewport.height,
            self.settings.preview_background,
        );
        let (Some(view), Some(base)) = (self.view, self.base.as_mut()) else {
            return Ok(surface);
        };

        let scaled = Size::new(view.scaled.width.max(1), view.scaled.height.max(1));
        if base.preview.as_ref().is_none_or(|p| p.size() != scaled) {
            base.preview = Some(base.full.resized(scaled.width, scaled.height));
        }
        if let Some(preview) = &base.preview {
            over_at(&mut surface, preview, view.offset);
        }

        if self.style.font_path.is_none() {
            tracing::debug!("no font selected; preview shows the base image only");
            self.bboxes()?;
            return Ok(surface);
        }
        let style = RenderStyle::preview(&self.style, &view, self.settings.min_preview_font_px)?;
        let blocks: &mut [TextBlock] = match self.mode {
            Mode::Single => std::slice::from_mut(&mut self.single),
            Mode::Weekly => &mut self.week,
        };
        for block in blocks.iter_mut() {
            let rect = self
                .renderer
                .draw(&mut surface, block.pos, &block.text, &style)?;
            block.bbox = Some(rect);
        }
        Ok(surface)
    }

    /// Current blocks with anchors converted to image space.
    pub fn image_space_blocks(&self) -> TelopResult<Vec<(IPoint, String)>> {
        let view = self.require_view()?;
        Ok(self
            .blocks()
            .iter()
            .map(|b| (view.to_image_space(b.pos), b.text.clone()))
            .collect())
    }

    // ------------------------------------------------------------------ persistence

    /// Snapshot the weekly layout as a preset with image-space anchors.
    pub fn to_preset(&self) -> TelopResult<Preset> {
        let base = self
            .base
            .as_ref()
            .ok_or_else(|| TelopError::image_load("no base image loaded"))?;
        if self.mode != Mode::Weekly {
            return Err(TelopError::validation(
                "presets can only be saved in weekly mode",
            ));
        }
        if self.style.font_path.is_none() {
            return Err(TelopError::font_unavailable("no font selected"));
        }
        let view = self.require_view()?;
        Ok(Preset {
            base_image: base.path.clone(),
            style: self.style.clone(),
            positions: std::array::from_fn(|i| view.to_image_space(self.week[i].pos)),
        })
    }

    /// Write [`Session::to_preset`] to `path`.
    pub fn save_preset(&self, path: &Path) -> TelopResult<()> {
        let preset = self.to_preset()?;
        crate::preset::io::save_preset(&preset, path)
    }

    /// `<base stem>_<mode>.png`, or `output_<mode>.png` without a base image.
    pub fn suggest_filename(&self) -> String {
        let stem = self
            .base
            .as_ref()
            .and_then(|b| b.path.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        format!("{stem}_{}.png", self.mode.as_str())
    }

    fn require_view(&self) -> TelopResult<ViewportTransform> {
        self.view
            .ok_or_else(|| TelopError::image_load("no base image loaded"))
    }
}

fn clamp_viewport(viewport: Size) -> Size {
    Size::new(
        viewport.width.max(MIN_VIEWPORT_EDGE),
        viewport.height.max(MIN_VIEWPORT_EDGE),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
