use crate::calibration::points::RotationAngle;
use crate::foundation::error::{MapError, MapResult};

/// Straight (non-premultiplied) RGBA colours for every map element.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MapPalette {
    /// Raster area outside the floor.
    pub background: [u8; 4],
    pub floor: [u8; 4],
    pub wall: [u8; 4],
    /// Active zone-clean polygons.
    pub zone_clean: [u8; 4],
    /// No-go and no-mop areas, virtual walls.
    pub no_go: [u8; 4],
    pub robot: [u8; 4],
    pub charger: [u8; 4],
    /// Travel path.
    #[serde(rename = "move")]
    pub travel_path: [u8; 4],
    pub predicted_path: [u8; 4],
}

impl Default for MapPalette {
    fn default() -> Self {
        Self {
            background: [0, 125, 255, 255],
            floor: [135, 206, 250, 255],
            wall: [255, 255, 0, 255],
            zone_clean: [0, 0, 255, 64],
            no_go: [255, 0, 0, 125],
            robot: [255, 255, 204, 255],
            charger: [255, 128, 0, 255],
            travel_path: [238, 247, 255, 255],
            predicted_path: [125, 125, 125, 255],
        }
    }
}

/// Render configuration. Every field has a default, so `{}` is a valid settings document.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub palette: MapPalette,
    /// Size of the centred crop, as a percentage of the shorter half-extent.
    pub crop_percentage: u32,
    pub rotation: RotationAngle,
    pub path_width: u32,
    pub predicted_path_width: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            palette: MapPalette::default(),
            crop_percentage: 25,
            rotation: RotationAngle::Deg0,
            path_width: 5,
            predicted_path_width: 2,
        }
    }
}

impl RenderSettings {
    pub fn from_json(text: &str) -> MapResult<Self> {
        let settings: Self =
            serde_json::from_str(text).map_err(|e| MapError::serde(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> MapResult<()> {
        if !(1..=100).contains(&self.crop_percentage) {
            return Err(MapError::validation(format!(
                "crop_percentage must be in 1..=100, got {}",
                self.crop_percentage
            )));
        }
        if self.path_width == 0 || self.predicted_path_width == 0 {
            return Err(MapError::validation("path widths must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/settings.rs"]
mod tests;
