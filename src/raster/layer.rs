use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{MapError, MapResult};

/// A `width × height` buffer of premultiplied RGBA8 pixels, row-major, 4 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterLayer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RasterLayer {
    /// Fully transparent layer.
    pub fn new(width: u32, height: u32) -> MapResult<Self> {
        Self::filled(width, height, Rgba8Premul::transparent())
    }

    /// Layer where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Rgba8Premul) -> MapResult<Self> {
        let len = byte_len(width, height)?;
        let px = color.to_array();
        let mut data = vec![0u8; len];
        if px != [0, 0, 0, 0] {
            for chunk in data.chunks_exact_mut(4) {
                chunk.copy_from_slice(&px);
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_premul_bytes(width: u32, height: u32, data: Vec<u8>) -> MapResult<Self> {
        if data.len() != byte_len(width, height)? {
            return Err(MapError::evaluation(
                "raster data length must equal width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn same_shape(&self, other: &RasterLayer) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[idx..idx + 4]);
        Some(px)
    }

    /// Overwrite a single pixel; coordinates outside the layer are ignored.
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Rgba8Premul) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = self.index(x as u32, y as u32);
        self.data[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Overwrite the half-open rectangle `[x0, x1) × [y0, y1)` with `color`, clipped to the layer.
    ///
    /// Returns the number of pixels written.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba8Premul) -> usize {
        let w = i64::from(self.width);
        let h = i64::from(self.height);
        let cx0 = x0.clamp(0, w);
        let cx1 = x1.clamp(0, w);
        let cy0 = y0.clamp(0, h);
        let cy1 = y1.clamp(0, h);
        if cx0 >= cx1 || cy0 >= cy1 {
            return 0;
        }

        let px = color.to_array();
        let row_bytes = self.width as usize * 4;
        for y in cy0 as usize..cy1 as usize {
            let row = &mut self.data[y * row_bytes..(y + 1) * row_bytes];
            for chunk in row[cx0 as usize * 4..cx1 as usize * 4].chunks_exact_mut(4) {
                chunk.copy_from_slice(&px);
            }
        }
        ((cx1 - cx0) * (cy1 - cy0)) as usize
    }

    /// Copy out the half-open region `[left, right) × [top, bottom)`.
    pub fn sub_layer(&self, left: u32, top: u32, right: u32, bottom: u32) -> MapResult<Self> {
        if left > right || top > bottom || right > self.width || bottom > self.height {
            return Err(MapError::evaluation(format!(
                "sub-layer ({left},{top})-({right},{bottom}) outside {}x{} raster",
                self.width, self.height
            )));
        }
        let out_w = right - left;
        let out_h = bottom - top;
        let mut data = Vec::with_capacity(byte_len(out_w, out_h)?);
        let row_bytes = self.width as usize * 4;
        for y in top as usize..bottom as usize {
            let start = y * row_bytes + left as usize * 4;
            data.extend_from_slice(&self.data[start..start + out_w as usize * 4]);
        }
        Ok(Self {
            width: out_w,
            height: out_h,
            data,
        })
    }

    /// Straight-alpha copy suitable for PNG encoding.
    pub fn to_rgba_image(&self) -> MapResult<image::RgbaImage> {
        let mut straight = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            straight.extend_from_slice(&unpremultiply([px[0], px[1], px[2], px[3]]));
        }
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| MapError::evaluation("rgba image buffer size mismatch"))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

fn byte_len(width: u32, height: u32) -> MapResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| MapError::evaluation("raster buffer size overflow"))
}

fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = px[3];
    match a {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let un = |c: u8| -> u8 {
                let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
                v.min(255) as u8
            };
            [un(px[0]), un(px[1]), un(px[2]), a]
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/layer.rs"]
mod tests;
