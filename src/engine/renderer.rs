use serde_json::Value;

use crate::calibration::crop::{CropBox, crop_layer};
use crate::calibration::points::{CalibrationPoint, RotationAngle, calibration_points};
use crate::draw::icons::{
    draw_battery_charger, draw_go_to_flag, draw_obstacles, draw_robot, draw_virtual_walls,
    draw_zone_clean,
};
use crate::draw::lines::draw_lines;
use crate::engine::cache::FrameCache;
use crate::engine::settings::RenderSettings;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{MapError, MapResult};
use crate::map::rooms::{Room, RoomTracker, extract_rooms};
use crate::map::snapshot::{ChargerPosition, MapSnapshot, Obstacle, RobotPosition};
use crate::raster::layer::RasterLayer;
use crate::raster::pixel_runs::decode_runs;

/// Result of one render pass.
#[derive(Clone, Debug, serde::Serialize)]
pub struct MapRender {
    /// Cropped raster, premultiplied RGBA8.
    #[serde(skip)]
    pub image: RasterLayer,
    pub raster_size: (u32, u32),
    pub cropped_size: (u32, u32),
    pub crop: CropBox,
    pub calibration: [CalibrationPoint; 4],
    pub robot: RobotPosition,
    pub charger: Option<ChargerPosition>,
    pub nonce: Option<String>,
    pub rooms: Vec<Room>,
    pub obstacles: Vec<Obstacle>,
    /// Frame counter value this pass started from.
    pub frame_index: u8,
    pub base_rebuilt: bool,
}

/// Stateful map renderer. Owns the base-layer cache, so one instance serves one map stream.
#[derive(Debug)]
pub struct MapRenderer {
    settings: RenderSettings,
    cache: FrameCache,
    rooms: Vec<Room>,
    tracker: RoomTracker,
    last_crop: Option<CropBox>,
}

impl MapRenderer {
    pub fn new(settings: RenderSettings) -> MapResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            cache: FrameCache::new(),
            rooms: Vec::new(),
            tracker: RoomTracker::default(),
            last_crop: None,
        })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn cache(&self) -> &FrameCache {
        &self.cache
    }

    /// Drop the cached base layer, e.g. after the host saw rooms being edited.
    pub fn reset(&mut self) {
        self.cache.reset();
        self.tracker.reset();
    }

    /// Render one map payload.
    ///
    /// On [`MapError::IncompleteMap`] the cache is left untouched, so the host can keep showing
    /// the previous image and retry with the next payload.
    #[tracing::instrument(skip(self, root))]
    pub fn render(&mut self, root: &Value) -> MapResult<MapRender> {
        let snapshot = MapSnapshot::parse(root)?;
        let frame_index = self.cache.frame_counter();

        let settings = &self.settings;
        let (mut layer, base_rebuilt) = self
            .cache
            .base_for(snapshot.base_fingerprint(), || build_base(&snapshot, settings))?;
        if base_rebuilt {
            self.rooms = extract_rooms(root, snapshot.pixel_size);
        }

        draw_overlays(&mut layer, &snapshot, &self.settings)?;

        let mut robot = snapshot.robot.clone();
        robot.in_room = self
            .tracker
            .locate(&self.rooms, robot.x, robot.y)
            .map(|room| room.name.clone().unwrap_or_else(|| room.id.clone()));

        let (image, crop) = crop_layer(&layer, self.settings.crop_percentage)?;
        let calibration = calibration_points(&crop, self.settings.rotation);
        self.last_crop = Some(crop);

        tracing::debug!(frame_index, base_rebuilt, ?crop, "rendered map frame");
        Ok(MapRender {
            image,
            raster_size: (snapshot.size.width, snapshot.size.height),
            cropped_size: crop.size(),
            crop,
            calibration,
            robot,
            charger: snapshot.charger,
            nonce: snapshot.nonce,
            rooms: self.rooms.clone(),
            obstacles: snapshot.obstacles,
            frame_index,
            base_rebuilt,
        })
    }

    /// Calibration points of the most recent crop under an arbitrary rotation.
    pub fn calibration_data(&self, degrees: i64) -> MapResult<[CalibrationPoint; 4]> {
        let rotation = RotationAngle::from_degrees(degrees)?;
        let crop = self
            .last_crop
            .ok_or_else(|| MapError::evaluation("no frame has been rendered yet"))?;
        Ok(calibration_points(&crop, rotation))
    }
}

/// Floor, zones, walls, restricted areas, obstacles and charger on a background-filled raster.
fn build_base(snapshot: &MapSnapshot, settings: &RenderSettings) -> MapResult<RasterLayer> {
    let palette = &settings.palette;
    let mut layer = RasterLayer::filled(
        snapshot.size.width,
        snapshot.size.height,
        Rgba8Premul::from_straight(palette.background),
    )?;

    decode_runs(
        &mut layer,
        &snapshot.floor,
        snapshot.pixel_size,
        Rgba8Premul::from_straight(palette.floor),
    );
    draw_zone_clean(&mut layer, &snapshot.active_zones, palette.zone_clean)?;
    decode_runs(
        &mut layer,
        &snapshot.walls,
        snapshot.pixel_size,
        Rgba8Premul::from_straight(palette.wall),
    );

    let restricted: Vec<_> = snapshot
        .no_go_areas
        .iter()
        .chain(&snapshot.no_mop_areas)
        .cloned()
        .collect();
    draw_zone_clean(&mut layer, &restricted, palette.no_go)?;
    let [r, g, b, _] = palette.no_go;
    draw_virtual_walls(
        &mut layer,
        &snapshot.virtual_walls,
        Rgba8Premul::from_straight_rgba(r, g, b, 255),
    );
    let obstacles: Vec<_> = snapshot.obstacles.iter().map(|o| (o.x, o.y)).collect();
    draw_obstacles(&mut layer, &obstacles, palette.no_go)?;

    if let Some(charger) = snapshot.charger {
        draw_battery_charger(
            &mut layer,
            charger.x,
            charger.y,
            Rgba8Premul::from_straight(palette.charger),
        );
    }
    Ok(layer)
}

/// Per-frame overlays in z-order: go-to flag, predicted path, travel path, robot.
fn draw_overlays(
    layer: &mut RasterLayer,
    snapshot: &MapSnapshot,
    settings: &RenderSettings,
) -> MapResult<()> {
    let palette = &settings.palette;
    if let Some(target) = snapshot.go_to {
        draw_go_to_flag(layer, target)?;
    }
    draw_lines(
        layer,
        &snapshot.predicted_path,
        settings.predicted_path_width,
        Rgba8Premul::from_straight(palette.predicted_path),
    );
    draw_lines(
        layer,
        &snapshot.path,
        settings.path_width,
        Rgba8Premul::from_straight(palette.travel_path),
    );
    let robot = &snapshot.robot;
    draw_robot(layer, robot.x, robot.y, robot.angle, palette.robot)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/renderer.rs"]
mod tests;
