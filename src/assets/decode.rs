use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::{TelopError, TelopResult},
    render::surface::Surface,
};

/// Decode encoded image bytes into a premultiplied surface.
pub fn decode_image(bytes: &[u8]) -> TelopResult<Surface> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| TelopError::image_load(format!("{e:#}")))?;
    Ok(Surface::from_rgba_image(dyn_img.to_rgba8()))
}

/// Read and decode the base image at `path`.
#[tracing::instrument]
pub fn load_base_image(path: &Path) -> TelopResult<Surface> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read image '{}'", path.display()))
        .map_err(|e| TelopError::image_load(format!("{e:#}")))?;
    let surface = decode_image(&bytes).map_err(|e| match e {
        TelopError::ImageLoadFailed(msg) => {
            TelopError::image_load(format!("'{}': {msg}", path.display()))
        }
        other => other,
    })?;
    tracing::debug!(
        width = surface.width(),
        height = surface.height(),
        "decoded base image"
    );
    Ok(surface)
}

/// Encode `surface` to `path`; the format follows the file extension.
///
/// Formats without an alpha channel (JPEG) get the alpha dropped after un-premultiplying.
#[tracing::instrument(skip(surface))]
pub fn save_surface(surface: &Surface, path: &Path) -> TelopResult<()> {
    let format = image::ImageFormat::from_path(path).map_err(|e| {
        TelopError::output_write(format!(
            "unsupported output format for '{}': {e}",
            path.display()
        ))
    })?;

    let rgba = surface.to_rgba_image();
    let result = match format {
        image::ImageFormat::Jpeg => image::DynamicImage::ImageRgba8(rgba)
            .to_rgb8()
            .save_with_format(path, format),
        _ => rgba.save_with_format(path, format),
    };
    result.map_err(|e| TelopError::output_write(format!("write '{}': {e}", path.display())))?;

    tracing::info!(path = %path.display(), "wrote image");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
