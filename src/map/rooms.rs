use serde_json::Value;

use crate::map::entities::json_coord;
use crate::raster::pixel_runs::parse_runs;

/// A named segment layer reduced to its raster-space bounding box.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Room {
    pub id: String,
    pub name: Option<String>,
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    /// Clockwise from top-left.
    pub outline: [(i64, i64); 4],
    pub center: (i64, i64),
}

impl Room {
    /// Inclusive bounding-box containment.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }
}

/// Rooms from every top-level `MapLayer` that carries a `metaData.segmentId`.
///
/// Layers without any complete run are skipped.
pub fn extract_rooms(root: &Value, pixel_size: u32) -> Vec<Room> {
    let ps = i64::from(pixel_size);
    let Some(layers) = root.get("layers").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut rooms = Vec::new();
    for layer in layers {
        if layer.get("__class").and_then(Value::as_str) != Some("MapLayer") {
            continue;
        }
        let meta = layer.get("metaData");
        let Some(segment) = meta.and_then(|m| m.get("segmentId")).filter(|v| !v.is_null()) else {
            continue;
        };
        let id = segment
            .as_str()
            .map(str::to_owned)
            .unwrap_or_else(|| segment.to_string());
        let name = meta
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        let flat: Vec<i64> = layer
            .get("compressedPixels")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(json_coord).collect())
            .unwrap_or_default();
        let runs = parse_runs(&flat);
        let bounds = runs.iter().fold(None, |acc: Option<Bounds>, r| {
            let last_x = r.x.saturating_add((r.len - 1).max(0));
            Some(match acc {
                None => (r.x, r.y, last_x, r.y),
                Some((x0, y0, x1, y1)) => (x0.min(r.x), y0.min(r.y), x1.max(last_x), y1.max(r.y)),
            })
        });
        let Some((x_min, y_min, x_max, y_max)) = bounds else {
            tracing::debug!(room = %id, "segment layer has no pixels");
            continue;
        };

        let (left, top, right, bottom) = (
            x_min.saturating_mul(ps),
            y_min.saturating_mul(ps),
            x_max.saturating_mul(ps),
            y_max.saturating_mul(ps),
        );
        rooms.push(Room {
            id,
            name,
            left,
            top,
            right,
            bottom,
            outline: [(left, top), (right, top), (right, bottom), (left, bottom)],
            center: (midpoint(left, right), midpoint(top, bottom)),
        });
    }
    tracing::debug!(rooms = rooms.len(), "extracted rooms");
    rooms
}

type Bounds = (i64, i64, i64, i64);

fn midpoint(a: i64, b: i64) -> i64 {
    // Truncates toward zero like `(a + b) / 2` without the overflow.
    ((i128::from(a) + i128::from(b)) / 2) as i64
}

/// Remembers the last room the robot was seen in, which is checked before a full scan.
///
/// A miss keeps the remembered room; only [`RoomTracker::reset`] forgets it.
#[derive(Clone, Debug, Default)]
pub struct RoomTracker {
    last: Option<String>,
}

impl RoomTracker {
    pub fn locate<'r>(&mut self, rooms: &'r [Room], x: i64, y: i64) -> Option<&'r Room> {
        if let Some(last) = self.last.as_deref()
            && let Some(room) = rooms.iter().find(|r| r.id == last && r.contains(x, y))
        {
            return Some(room);
        }
        let found = rooms.iter().find(|r| r.contains(x, y));
        if let Some(room) = found {
            self.last = Some(room.id.clone());
        }
        found
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/map/rooms.rs"]
mod tests;
