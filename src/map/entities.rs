//! Discovery of tagged map entities anywhere in a map payload.
//!
//! Entities are JSON objects carrying a `__class` discriminator. They can sit at any depth
//! (top-level `entities`, nested inside layers, wrapped in extra arrays), so extraction is a
//! full depth-first walk rather than a lookup.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::draw::lines::GridPoint;

/// Entity families distinguished by their `__class` tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityClass {
    Point,
    Path,
    Polygon,
    Line,
}

impl EntityClass {
    pub fn discriminator(self) -> &'static str {
        match self {
            Self::Point => "PointMapEntity",
            Self::Path => "PathMapEntity",
            Self::Polygon => "PolygonMapEntity",
            Self::Line => "LineMapEntity",
        }
    }
}

/// A borrowed view of one tagged entity object.
#[derive(Clone, Copy, Debug)]
pub struct Entity<'a> {
    pub class: EntityClass,
    pub kind: &'a str,
    pub raw: &'a Map<String, Value>,
}

impl<'a> Entity<'a> {
    /// Flat `points` list as integers; non-numeric entries are dropped.
    pub fn coords(&self) -> Vec<i64> {
        self.raw
            .get("points")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(json_coord).collect())
            .unwrap_or_default()
    }

    /// `points` grouped into `(x, y)` pairs. A dangling odd coordinate is ignored.
    pub fn points(&self) -> Vec<GridPoint> {
        self.coords()
            .chunks_exact(2)
            .map(|c| (c[0], c[1]))
            .collect()
    }

    pub fn first_point(&self) -> Option<GridPoint> {
        let coords = self.coords();
        match coords.as_slice() {
            [x, y, ..] => Some((*x, *y)),
            _ => None,
        }
    }

    pub fn angle(&self) -> Option<f64> {
        self.meta()?.get("angle")?.as_f64()
    }

    pub fn label(&self) -> Option<&'a str> {
        self.meta()?.get("label")?.as_str()
    }

    fn meta(&self) -> Option<&'a Map<String, Value>> {
        self.raw.get("metaData")?.as_object()
    }
}

/// Entities grouped by `type`, each bucket in discovery order.
pub type EntityGroups<'a> = BTreeMap<&'a str, Vec<Entity<'a>>>;

/// Collect every entity of `class` in `root`, depth-first, grouped by `type`.
///
/// Object members are visited in document order. Tagged objects without a string `type` are
/// skipped.
pub fn extract_entities(root: &Value, class: EntityClass) -> EntityGroups<'_> {
    let tag = class.discriminator();
    let mut groups = EntityGroups::new();
    walk_objects(root, &mut |obj| {
        if obj.get("__class").and_then(Value::as_str) != Some(tag) {
            return;
        }
        match obj.get("type").and_then(Value::as_str) {
            Some(kind) => groups.entry(kind).or_default().push(Entity {
                class,
                kind,
                raw: obj,
            }),
            None => tracing::trace!(class = tag, "skipping tagged entity without a type"),
        }
    });
    groups
}

/// Visit every object in `v`, parents before children. Arrays are visited in order.
pub(crate) fn walk_objects<'a>(v: &'a Value, visit: &mut impl FnMut(&'a Map<String, Value>)) {
    match v {
        Value::Object(map) => {
            visit(map);
            for child in map.values() {
                walk_objects(child, visit);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk_objects(item, visit);
            }
        }
        _ => {}
    }
}

/// Integer coordinate from a JSON number; fractional values are rounded.
pub(crate) fn json_coord(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_f64().map(|f| f.round() as i64))
}

#[cfg(test)]
#[path = "../../tests/unit/map/entities.rs"]
mod tests;
