use serde_json::Value;

use crate::draw::lines::GridPoint;
use crate::foundation::core::MapSize;
use crate::foundation::error::{MapError, MapResult};
use crate::foundation::math::Fnv1a64;
use crate::map::entities::{Entity, EntityClass, EntityGroups, extract_entities, json_coord};
use crate::raster::pixel_runs::{PixelRun, parse_runs};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RobotPosition {
    pub x: i64,
    pub y: i64,
    pub angle: f64,
    /// Name of the room containing the robot, or its segment id when the room is unnamed.
    pub in_room: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ChargerPosition {
    pub x: i64,
    pub y: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Obstacle {
    pub label: String,
    pub x: i64,
    pub y: i64,
}

/// Everything the renderer needs from one map payload, validated and typed.
#[derive(Clone, Debug, PartialEq)]
pub struct MapSnapshot {
    pub size: MapSize,
    pub pixel_size: u32,
    pub nonce: Option<String>,
    pub floor: Vec<PixelRun>,
    pub walls: Vec<PixelRun>,
    pub path: Vec<GridPoint>,
    pub predicted_path: Vec<GridPoint>,
    pub robot: RobotPosition,
    pub charger: Option<ChargerPosition>,
    pub go_to: Option<GridPoint>,
    pub active_zones: Vec<Vec<GridPoint>>,
    pub no_go_areas: Vec<Vec<GridPoint>>,
    pub no_mop_areas: Vec<Vec<GridPoint>>,
    pub virtual_walls: Vec<Vec<GridPoint>>,
    pub obstacles: Vec<Obstacle>,
}

impl MapSnapshot {
    /// Parse a map payload.
    ///
    /// Fails with [`MapError::IncompleteMap`] when `size`, `pixelSize`, the floor or wall layer,
    /// or the robot position is missing. Every other entity is optional.
    #[tracing::instrument(skip(root))]
    pub fn parse(root: &Value) -> MapResult<Self> {
        let size = MapSize::new(dimension(root, "x")?, dimension(root, "y")?)?;
        let pixel_size = root
            .get("pixelSize")
            .and_then(Value::as_u64)
            .filter(|&ps| ps > 0)
            .and_then(|ps| u32::try_from(ps).ok())
            .ok_or_else(|| MapError::incomplete("missing or invalid pixelSize"))?;

        let floor = layer_runs(root, 0, "floor")?;
        let walls = layer_runs(root, 1, "wall")?;

        let points = extract_entities(root, EntityClass::Point);
        let paths = extract_entities(root, EntityClass::Path);
        let polygons = extract_entities(root, EntityClass::Polygon);
        let lines = extract_entities(root, EntityClass::Line);

        let robot_entity = first_of(&points, "robot_position")
            .ok_or_else(|| MapError::incomplete("no robot_position entity"))?;
        let (x, y) = robot_entity
            .first_point()
            .ok_or_else(|| MapError::incomplete("robot_position has no coordinates"))?;
        let robot = RobotPosition {
            x,
            y,
            angle: robot_entity.angle().unwrap_or(0.0),
            in_room: None,
        };

        let charger = first_of(&points, "charger_location")
            .and_then(|e| e.first_point())
            .map(|(x, y)| ChargerPosition { x, y });
        let go_to = first_of(&points, "go_to_target").and_then(|e| e.first_point());

        let obstacles = points
            .get("obstacle")
            .into_iter()
            .flatten()
            .filter_map(|e| {
                let label = e.label()?;
                let (x, y) = e.first_point()?;
                Some(Obstacle {
                    label: label.to_owned(),
                    x,
                    y,
                })
            })
            .collect();

        let path = travel_path(root);
        let predicted_path = first_of(&paths, "predicted_path")
            .map(|e| e.points())
            .unwrap_or_default();

        let snapshot = Self {
            size,
            pixel_size,
            nonce: nonce(root),
            floor,
            walls,
            path,
            predicted_path,
            robot,
            charger,
            go_to,
            active_zones: all_points(&polygons, "active_zone"),
            no_go_areas: all_points(&polygons, "no_go_area"),
            no_mop_areas: all_points(&polygons, "no_mop_area"),
            virtual_walls: all_points(&lines, "virtual_wall"),
            obstacles,
        };
        tracing::debug!(
            width = size.width,
            height = size.height,
            pixel_size,
            floor_runs = snapshot.floor.len(),
            wall_runs = snapshot.walls.len(),
            path_points = snapshot.path.len(),
            "parsed map snapshot"
        );
        Ok(snapshot)
    }

    /// Fingerprint of every input that shapes the cached base layer.
    ///
    /// Robot, paths and the go-to target are not part of it.
    pub fn base_fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u64(u64::from(self.size.width));
        h.write_u64(u64::from(self.size.height));
        h.write_u64(u64::from(self.pixel_size));
        for (tag, runs) in [("floor", &self.floor), ("walls", &self.walls)] {
            h.write_str(tag);
            h.write_u64(runs.len() as u64);
            for r in runs {
                write_i64(&mut h, r.x);
                write_i64(&mut h, r.y);
                write_i64(&mut h, r.len);
            }
        }
        for (tag, shapes) in [
            ("active_zone", &self.active_zones),
            ("no_go_area", &self.no_go_areas),
            ("no_mop_area", &self.no_mop_areas),
            ("virtual_wall", &self.virtual_walls),
        ] {
            h.write_str(tag);
            h.write_u64(shapes.len() as u64);
            for shape in shapes {
                h.write_u64(shape.len() as u64);
                for &(x, y) in shape {
                    write_i64(&mut h, x);
                    write_i64(&mut h, y);
                }
            }
        }
        h.write_str("obstacle");
        h.write_u64(self.obstacles.len() as u64);
        for o in &self.obstacles {
            write_i64(&mut h, o.x);
            write_i64(&mut h, o.y);
        }
        match self.charger {
            Some(c) => {
                h.write_u8(1);
                write_i64(&mut h, c.x);
                write_i64(&mut h, c.y);
            }
            None => h.write_u8(0),
        }
        h.finish()
    }
}

fn write_i64(h: &mut Fnv1a64, v: i64) {
    h.write_u64(v as u64);
}

fn dimension(root: &Value, axis: &str) -> MapResult<u32> {
    root.get("size")
        .and_then(|s| s.get(axis))
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| MapError::incomplete(format!("missing or invalid size.{axis}")))
}

fn layer_runs(root: &Value, index: usize, what: &str) -> MapResult<Vec<PixelRun>> {
    let pixels = root
        .get("layers")
        .and_then(|l| l.get(index))
        .and_then(|l| l.get("compressedPixels"))
        .and_then(Value::as_array)
        .ok_or_else(|| {
            MapError::incomplete(format!("missing layers[{index}].compressedPixels ({what})"))
        })?;
    let flat: Vec<i64> = pixels.iter().filter_map(json_coord).collect();
    Ok(parse_runs(&flat))
}

fn travel_path(root: &Value) -> Vec<GridPoint> {
    root.get("entities")
        .and_then(|e| e.get(0))
        .and_then(|e| e.get("points"))
        .and_then(Value::as_array)
        .map(|items| {
            let flat: Vec<i64> = items.iter().filter_map(json_coord).collect();
            flat.chunks_exact(2).map(|c| (c[0], c[1])).collect()
        })
        .unwrap_or_default()
}

fn nonce(root: &Value) -> Option<String> {
    match root.get("metaData")?.get("nonce")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn first_of<'g, 'a>(groups: &'g EntityGroups<'a>, kind: &str) -> Option<&'g Entity<'a>> {
    groups.get(kind)?.first()
}

fn all_points(groups: &EntityGroups<'_>, kind: &str) -> Vec<Vec<GridPoint>> {
    groups
        .get(kind)
        .map(|es| es.iter().map(Entity::points).collect())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/map/snapshot.rs"]
mod tests;
