use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::{
    assets::decode::{load_base_image, save_surface},
    foundation::{
        core::IPoint,
        error::{TelopError, TelopResult},
    },
    preset::{io::load_preset, model::Preset},
    render::{
        cpu::{RenderStyle, Renderer},
        surface::Surface,
    },
    schedule::labels::{WEEK_DAYS, week_labels},
    session::editor::Session,
};

/// Draw every `(anchor, text)` block onto `canvas` at full resolution.
pub fn render_blocks<'a, I>(
    renderer: &mut Renderer,
    mut canvas: Surface,
    style: &RenderStyle,
    blocks: I,
) -> TelopResult<Surface>
where
    I: IntoIterator<Item = (IPoint, &'a str)>,
{
    for (anchor, text) in blocks {
        renderer.draw(&mut canvas, anchor, text, style)?;
    }
    Ok(canvas)
}

/// Full-resolution copy of the session's base image with every current block drawn on it.
///
/// Preview anchors are converted to image space first.
#[tracing::instrument(skip(session))]
pub fn render_session(session: &mut Session) -> TelopResult<Surface> {
    let canvas = session
        .base_image()
        .cloned()
        .ok_or_else(|| TelopError::image_load("no base image loaded"))?;
    let style = RenderStyle::full(session.style())?;
    let blocks = session.image_space_blocks()?;
    tracing::debug!(blocks = blocks.len(), mode = session.mode().as_str(), "rendering export");
    render_blocks(
        session.renderer_mut(),
        canvas,
        &style,
        blocks.iter().map(|(p, t)| (*p, t.as_str())),
    )
}

/// Render the session at full resolution and write it to `out`.
pub fn export_session(session: &mut Session, out: &Path) -> TelopResult<()> {
    let image = render_session(session)?;
    save_surface(&image, out)
}

/// Draw `labels` at the preset's image-space anchors onto its base image.
#[tracing::instrument(skip(renderer, preset, labels), fields(base = %preset.base_image.display()))]
pub fn render_preset(
    renderer: &mut Renderer,
    preset: &Preset,
    base_dir: Option<&Path>,
    labels: &[String; WEEK_DAYS],
) -> TelopResult<Surface> {
    let style = RenderStyle::full(&preset.style)?;
    let canvas = load_base_image(&resolve_base_image(&preset.base_image, base_dir))?;
    render_blocks(
        renderer,
        canvas,
        &style,
        preset
            .positions
            .iter()
            .zip(labels)
            .map(|(p, l)| (*p, l.as_str())),
    )
}

/// Non-interactive weekly generation: load the preset, label the week, render and write.
#[tracing::instrument(skip(bodies))]
pub fn generate_weekly<S: AsRef<str>>(
    preset_path: &Path,
    out: &Path,
    bodies: &[S],
    week_start: NaiveDate,
) -> TelopResult<()> {
    let preset = load_preset(preset_path)?;
    let labels = week_labels(week_start, bodies);
    let mut renderer = Renderer::new();
    let image = render_preset(&mut renderer, &preset, preset_path.parent(), &labels)?;
    save_surface(&image, out)?;
    tracing::info!(out = %out.display(), %week_start, "weekly schedule generated");
    Ok(())
}

/// Relative base-image paths are tried as given first, then next to the preset file.
fn resolve_base_image(path: &Path, base_dir: Option<&Path>) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    match base_dir {
        Some(dir) if dir.join(path).exists() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
