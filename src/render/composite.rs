use crate::{foundation::core::IPoint, render::surface::Surface};

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over on premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Composite `tile` onto `dst` with its top-left at `origin`, clipping to `dst`.
pub fn over_at(dst: &mut Surface, tile: &Surface, origin: IPoint) {
    let dst_w = i64::from(dst.width());
    let dst_h = i64::from(dst.height());
    let x_start = i64::from(origin.x).max(0);
    let y_start = i64::from(origin.y).max(0);
    let x_end = (i64::from(origin.x) + i64::from(tile.width())).min(dst_w);
    let y_end = (i64::from(origin.y) + i64::from(tile.height())).min(dst_h);
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    let tile_w = tile.width() as usize;
    let row_w = dst.width() as usize;
    let src = tile.data();
    let out = dst.data_mut();
    for y in y_start..y_end {
        let ty = (y - i64::from(origin.y)) as usize;
        for x in x_start..x_end {
            let tx = (x - i64::from(origin.x)) as usize;
            let si = (ty * tile_w + tx) * 4;
            let di = (y as usize * row_w + x as usize) * 4;
            let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
            let d = [out[di], out[di + 1], out[di + 2], out[di + 3]];
            out[di..di + 4].copy_from_slice(&over(d, s));
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
