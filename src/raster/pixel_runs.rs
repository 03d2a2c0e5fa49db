use crate::foundation::core::Rgba8Premul;
use crate::raster::layer::RasterLayer;

/// One compressed run: `len` horizontally adjacent grid cells starting at `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRun {
    pub x: i64,
    pub y: i64,
    pub len: i64,
}

/// Group a flat `[x, y, len, x, y, len, ...]` list into runs.
///
/// A trailing incomplete triple is dropped.
pub fn parse_runs(flat: &[i64]) -> Vec<PixelRun> {
    let chunks = flat.chunks_exact(3);
    if !chunks.remainder().is_empty() {
        tracing::warn!(
            trailing = chunks.remainder().len(),
            "compressed pixel list length is not a multiple of 3"
        );
    }
    chunks
        .map(|c| PixelRun {
            x: c[0],
            y: c[1],
            len: c[2],
        })
        .collect()
}

/// Paint every run onto `layer` as `pixel_size`-scaled flat squares, clipped to the layer.
///
/// Returns the number of raster pixels written.
pub fn decode_runs(
    layer: &mut RasterLayer,
    runs: &[PixelRun],
    pixel_size: u32,
    color: Rgba8Premul,
) -> usize {
    let ps = i64::from(pixel_size);
    let mut written = 0usize;
    for run in runs {
        if run.len <= 0 {
            continue;
        }
        // A run is contiguous in raster space, so fill it as one rectangle.
        let x0 = run.x.saturating_mul(ps);
        let x1 = run.x.saturating_add(run.len).saturating_mul(ps);
        let y0 = run.y.saturating_mul(ps);
        let y1 = y0.saturating_add(ps);
        written += layer.fill_rect(x0, y0, x1, y1, color);
    }
    tracing::trace!(runs = runs.len(), written, "decoded pixel runs");
    written
}

#[cfg(test)]
#[path = "../../tests/unit/raster/pixel_runs.rs"]
mod tests;
