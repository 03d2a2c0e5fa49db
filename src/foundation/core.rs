use crate::foundation::error::{MapError, MapResult};

pub use kurbo::Point;

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn from_straight(rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba;
        Self::from_straight_rgba(r, g, b, a)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Half-brightness, fully opaque variant of a straight RGBA colour.
///
/// Used for icon and zone outlines.
pub fn outline_of(rgba: [u8; 4]) -> [u8; 4] {
    [rgba[0] / 2, rgba[1] / 2, rgba[2] / 2, 255]
}

/// Raster dimensions declared by the map payload (`size.x`, `size.y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MapSize {
    pub width: u32,
    pub height: u32,
    pub center: (u32, u32),
}

impl MapSize {
    pub fn new(width: u32, height: u32) -> MapResult<Self> {
        if width == 0 || height == 0 {
            return Err(MapError::incomplete("map size must be > 0 in both axes"));
        }
        Ok(Self {
            width,
            height,
            center: (width / 2, height / 2),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
