use crate::foundation::{
    core::{IPoint, Size},
    error::{TelopError, TelopResult},
};

/// Lower bound for the preview scale.
pub const MIN_PREVIEW_SCALE: f64 = 0.01;
/// Upper bound for the preview scale; previews never upscale.
pub const MAX_PREVIEW_SCALE: f64 = 1.0;

/// Mapping between preview space (viewport pixels) and image space (base-image pixels).
///
/// The base image is scaled uniformly to fit the viewport and centered with integer offsets.
/// Conversions truncate toward zero, so a preview-space point survives a round trip through
/// image space within one pixel; an image-space point survives within `ceil(1 / scale)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    /// Uniform scale in `[MIN_PREVIEW_SCALE, MAX_PREVIEW_SCALE]`.
    pub scale: f64,
    /// Top-left of the scaled image inside the viewport.
    pub offset: IPoint,
    /// Size of the scaled image in preview pixels.
    pub scaled: Size,
}

impl ViewportTransform {
    /// Fit `image` into `viewport`.
    pub fn fit(viewport: Size, image: Size) -> TelopResult<Self> {
        if image.is_empty() {
            return Err(TelopError::validation(
                "image dimensions must be non-zero to fit a viewport",
            ));
        }

        let sx = f64::from(viewport.width) / f64::from(image.width);
        let sy = f64::from(viewport.height) / f64::from(image.height);
        let scale = sx.min(sy).clamp(MIN_PREVIEW_SCALE, MAX_PREVIEW_SCALE);

        let scaled = Size::new(
            (f64::from(image.width) * scale) as u32,
            (f64::from(image.height) * scale) as u32,
        );
        let offset = IPoint::new(
            (i64::from(viewport.width) - i64::from(scaled.width)).div_euclid(2) as i32,
            (i64::from(viewport.height) - i64::from(scaled.height)).div_euclid(2) as i32,
        );

        Ok(Self {
            scale,
            offset,
            scaled,
        })
    }

    /// Identity mapping for rendering straight into image space.
    pub fn identity(image: Size) -> Self {
        Self {
            scale: 1.0,
            offset: IPoint::default(),
            scaled: image,
        }
    }

    pub fn to_image_space(&self, preview: IPoint) -> IPoint {
        IPoint::new(
            ((f64::from(preview.x) - f64::from(self.offset.x)) / self.scale) as i32,
            ((f64::from(preview.y) - f64::from(self.offset.y)) / self.scale) as i32,
        )
    }

    pub fn to_preview_space(&self, image: IPoint) -> IPoint {
        IPoint::new(
            (f64::from(image.x) * self.scale + f64::from(self.offset.x)) as i32,
            (f64::from(image.y) * self.scale + f64::from(self.offset.y)) as i32,
        )
    }

    /// Multiply a full-resolution length by the scale, flooring, with a lower bound.
    pub fn scale_length(&self, full: u32, min: u32) -> u32 {
        ((f64::from(full) * self.scale).floor() as u32).max(min)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/viewport.rs"]
mod tests;
