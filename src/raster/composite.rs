use crate::foundation::error::{MapError, MapResult};
use crate::foundation::math::mul_div255;
use crate::raster::layer::RasterLayer;

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over for a single premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> MapResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(MapError::evaluation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Alpha-composite a `src_w × src_h` premultiplied tile onto `base` with its top-left at
/// `(x0, y0)`. The tile must lie entirely inside `base`.
pub fn overlay_at(
    base: &mut RasterLayer,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    x0: u32,
    y0: u32,
) -> MapResult<()> {
    let expected = (src_w as usize)
        .checked_mul(src_h as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| MapError::evaluation("overlay tile size overflow"))?;
    if src.len() != expected {
        return Err(MapError::evaluation(
            "overlay tile expects src matching width*height*4",
        ));
    }
    let fits_x = x0.checked_add(src_w).is_some_and(|r| r <= base.width);
    let fits_y = y0.checked_add(src_h).is_some_and(|b| b <= base.height);
    if !fits_x || !fits_y {
        return Err(MapError::evaluation(format!(
            "overlay tile {src_w}x{src_h} at ({x0},{y0}) exceeds {}x{} raster",
            base.width, base.height
        )));
    }

    let dst_row = base.width as usize * 4;
    let src_row = src_w as usize * 4;
    for row in 0..src_h as usize {
        let d_start = (y0 as usize + row) * dst_row + x0 as usize * 4;
        let s_start = row * src_row;
        over_in_place(
            &mut base.data[d_start..d_start + src_row],
            &src[s_start..s_start + src_row],
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
