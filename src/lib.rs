//! vacmap renders robot-vacuum floor-plan maps.
//!
//! A map payload is a JSON document with run-length encoded floor and wall layers plus tagged
//! entities (robot, charger, paths, zones) scattered anywhere in the tree. The engine turns it
//! into a cropped RGBA raster and the four calibration points a map card needs to relate image
//! pixels back to robot coordinates:
//!
//! - Configure a [`RenderSettings`]
//! - Create a [`MapRenderer`] and call [`MapRenderer::render`] once per payload
//! - Read the image and metadata from the returned [`MapRender`]
//!
//! The static base layer (floor, walls, charger, restricted areas) is cached for a short frame
//! window; only the go-to flag, paths and robot are redrawn on every call.
#![forbid(unsafe_code)]

mod calibration;
mod draw;
mod engine;
mod foundation;
mod map;
mod raster;

pub use crate::calibration::crop::{CropBox, crop_layer};
pub use crate::calibration::points::{CalibrationPoint, RotationAngle, XY, calibration_points};
pub use crate::draw::icons::{
    draw_battery_charger, draw_go_to_flag, draw_obstacles, draw_robot, draw_virtual_walls,
    draw_zone_clean,
};
pub use crate::draw::lines::{Bresenham, GridPoint, draw_lines};
pub use crate::engine::cache::{FrameCache, LAST_REUSE_FRAME};
pub use crate::engine::renderer::{MapRender, MapRenderer};
pub use crate::engine::settings::{MapPalette, RenderSettings};
pub use crate::foundation::core::{MapSize, Rgba8Premul, outline_of};
pub use crate::foundation::error::{MapError, MapResult};
pub use crate::map::entities::{Entity, EntityClass, EntityGroups, extract_entities};
pub use crate::map::rooms::{Room, RoomTracker, extract_rooms};
pub use crate::map::snapshot::{ChargerPosition, MapSnapshot, Obstacle, RobotPosition};
pub use crate::raster::layer::RasterLayer;
pub use crate::raster::pixel_runs::{PixelRun, decode_runs, parse_runs};
