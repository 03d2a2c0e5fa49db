use crate::calibration::crop::CropBox;
use crate::foundation::error::MapError;

/// Display rotation of the rendered map, in quarter turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum RotationAngle {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl RotationAngle {
    pub fn from_degrees(degrees: i64) -> Result<Self, MapError> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(MapError::InvalidRotation(other)),
        }
    }

    pub fn degrees(self) -> i64 {
        i64::from(self.quarter_turns()) * 90
    }

    pub fn quarter_turns(self) -> u8 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }
}

impl TryFrom<i64> for RotationAngle {
    type Error = MapError;

    fn try_from(degrees: i64) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

impl From<RotationAngle> for i64 {
    fn from(r: RotationAngle) -> Self {
        r.degrees()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct XY {
    pub x: i64,
    pub y: i64,
}

/// One correspondence between robot raster coordinates and cropped-image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CalibrationPoint {
    pub vacuum: XY,
    pub map: XY,
}

/// Four corner correspondences for `crop` under `rotation`.
///
/// Map corners are always TL, TR, BR, BL of the cropped image; the vacuum corners are the crop
/// box corners in the same order, rotated left one position per quarter turn.
pub fn calibration_points(crop: &CropBox, rotation: RotationAngle) -> [CalibrationPoint; 4] {
    let (l, t, r, b) = (
        i64::from(crop.left),
        i64::from(crop.top),
        i64::from(crop.right),
        i64::from(crop.bottom),
    );
    let (w, h) = (i64::from(crop.width()), i64::from(crop.height()));

    let mut vacuum = [
        XY { x: l, y: t },
        XY { x: r, y: t },
        XY { x: r, y: b },
        XY { x: l, y: b },
    ];
    vacuum.rotate_left(usize::from(rotation.quarter_turns()));
    let map = [
        XY { x: 0, y: 0 },
        XY { x: w, y: 0 },
        XY { x: w, y: h },
        XY { x: 0, y: h },
    ];

    std::array::from_fn(|i| CalibrationPoint {
        vacuum: vacuum[i],
        map: map[i],
    })
}

#[cfg(test)]
#[path = "../../tests/unit/calibration/points.rs"]
mod tests;
