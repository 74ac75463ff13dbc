use crate::foundation::{
    core::Size,
    error::{TelopError, TelopResult},
};

/// Premultiplied RGBA8 pixel buffer that text is drawn onto.
///
/// Both the on-screen preview and the full-resolution export canvas are surfaces; the renderer
/// does not know which one it is drawing to.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Surface filled with one straight (non-premultiplied) RGBA color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let px = premultiply(rgba);
        let mut out = Self::new(width, height);
        for dst in out.data.chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
        out
    }

    /// Wrap straight RGBA8 bytes, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> TelopResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(TelopError::validation(
                "rgba8 byte length does not match surface dimensions",
            ));
        }
        premultiply_rgba8_in_place(&mut data);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap bytes that are already premultiplied.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> TelopResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(TelopError::validation(
                "rgba8 byte length does not match surface dimensions",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Convert back to a straight-alpha image for encoding.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    /// Resample to `width`x`height` with a Lanczos3 filter.
    pub fn resized(&self, width: u32, height: u32) -> Self {
        if width == self.width && height == self.height {
            return self.clone();
        }
        let straight = self.to_rgba_image();
        let out = image::imageops::resize(
            &straight,
            width.max(1),
            height.max(1),
            image::imageops::FilterType::Lanczos3,
        );
        Self::from_rgba_image(out)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Premultiplied bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

pub(crate) fn premultiply(rgba: [u8; 4]) -> [u8; 4] {
    let mut px = rgba;
    premultiply_rgba8_in_place(&mut px);
    px
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
