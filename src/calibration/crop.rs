use crate::foundation::error::{MapError, MapResult};
use crate::raster::layer::RasterLayer;

/// Half-open crop rectangle in full-raster pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    /// Square box centred on a `width × height` raster, sized `pct` percent of the shorter
    /// half-extent on each side of the centre.
    pub fn centered(width: u32, height: u32, pct: u32) -> MapResult<Self> {
        if pct == 0 || pct > 100 {
            return Err(MapError::validation(format!(
                "crop percentage must be in 1..=100, got {pct}"
            )));
        }
        let (cx, cy) = (width / 2, height / 2);
        let half = (u64::from(cx.min(cy)) * u64::from(pct) / 100) as u32;
        Ok(Self {
            left: cx - half,
            top: cy - half,
            right: cx + half,
            bottom: cy + half,
        })
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}

/// Crop `layer` to its centred box. Returns the cropped layer together with the box used.
pub fn crop_layer(layer: &RasterLayer, pct: u32) -> MapResult<(RasterLayer, CropBox)> {
    let crop = CropBox::centered(layer.width, layer.height, pct)?;
    let cropped = layer.sub_layer(crop.left, crop.top, crop.right, crop.bottom)?;
    tracing::debug!(?crop, width = cropped.width, height = cropped.height, "cropped raster");
    Ok((cropped, crop))
}

#[cfg(test)]
#[path = "../../tests/unit/calibration/crop.rs"]
mod tests;
