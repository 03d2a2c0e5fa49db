use crate::draw::lines::{GridPoint, draw_lines};
use crate::draw::shapes::ShapePainter;
use crate::foundation::core::{Point, Rgba8Premul, outline_of};
use crate::foundation::error::MapResult;
use crate::raster::layer::RasterLayer;

pub const ROBOT_RADIUS: i64 = 25;
const BIN_COVER_RADIUS: f64 = 24.0;
const LIDAR_RADIUS: f64 = 6.0;
const LIDAR_OFFSET: f64 = 15.0;
const BUTTON_RADIUS: f64 = 2.0;
const BUTTON_OFFSET: f64 = 20.0;

pub const CHARGER_WIDTH: i64 = 10;
pub const CHARGER_HEIGHT: i64 = 20;

const FLAG_SIZE: i64 = 40;
const FLAG_COLOR: [u8; 4] = [0, 255, 0, 127];
const POLE_COLOR: [u8; 4] = [0, 0, 255, 255];
const POLE_WIDTH: i64 = 3;

pub const VIRTUAL_WALL_WIDTH: u32 = 3;

pub const OBSTACLE_RADIUS: i64 = 5;

/// Robot icon centred on `(x, y)`: body disc, bin cover, lidar turret and button.
///
/// `angle_deg` is the reported heading. Sub-feature positions are truncated to whole pixels.
#[tracing::instrument(skip(layer))]
pub fn draw_robot(
    layer: &mut RasterLayer,
    x: i64,
    y: i64,
    angle_deg: f64,
    color: [u8; 4],
) -> MapResult<()> {
    let reach = ROBOT_RADIUS + 1;
    let Some(mut painter) = ShapePainter::for_region(
        layer,
        x.saturating_sub(reach),
        y.saturating_sub(reach),
        x.saturating_add(reach + 1),
        y.saturating_add(reach + 1),
    )?
    else {
        return Ok(());
    };

    let outline = outline_of(color);
    let (xf, yf) = (x as f64, y as f64);
    let center = Point::new(xf, yf);
    let r = ROBOT_RADIUS as f64;
    painter.fill_circle(center, r + 0.5, color);
    painter.stroke_circle(center, r, 1.0, outline);

    let a1 = (angle_deg - 80.0).to_radians();
    let a2 = (angle_deg + 80.0).to_radians();
    let cover_from = Point::new(
        (xf - BIN_COVER_RADIUS * a1.sin()).trunc(),
        (yf + BIN_COVER_RADIUS * a1.cos()).trunc(),
    );
    let cover_to = Point::new(
        (xf - BIN_COVER_RADIUS * a2.sin()).trunc(),
        (yf + BIN_COVER_RADIUS * a2.cos()).trunc(),
    );
    painter.stroke_line(cover_from, cover_to, 1.0, outline);

    let lidar = (angle_deg - 80.0 + 170.0).to_radians();
    let lidar_center = Point::new(
        (xf + LIDAR_OFFSET * lidar.cos()).trunc(),
        (yf + LIDAR_OFFSET * lidar.sin()).trunc(),
    );
    painter.fill_circle(lidar_center, LIDAR_RADIUS + 0.5, outline);

    let button_center = Point::new(
        (xf - BUTTON_OFFSET * lidar.cos()).trunc(),
        (yf - BUTTON_OFFSET * lidar.sin()).trunc(),
    );
    painter.fill_circle(button_center, BUTTON_RADIUS + 0.5, outline);

    painter.finish(layer)
}

/// Flat `10×20` charger block centred on `(x, y)`. Returns the pixels written.
pub fn draw_battery_charger(layer: &mut RasterLayer, x: i64, y: i64, color: Rgba8Premul) -> usize {
    let x0 = x.saturating_sub(CHARGER_WIDTH / 2);
    let y0 = y.saturating_sub(CHARGER_HEIGHT / 2);
    layer.fill_rect(
        x0,
        y0,
        x0.saturating_add(CHARGER_WIDTH),
        y0.saturating_add(CHARGER_HEIGHT),
        color,
    )
}

/// Go-to target marker: a translucent green pennant on a blue pole rooted at `center`.
pub fn draw_go_to_flag(layer: &mut RasterLayer, center: GridPoint) -> MapResult<()> {
    let (cx, cy) = center;
    let half = FLAG_SIZE / 2;
    let pole_half = POLE_WIDTH / 2;
    let Some(mut painter) = ShapePainter::for_region(
        layer,
        cx.saturating_sub(pole_half),
        cy.saturating_sub(half),
        cx.saturating_add(half + 1),
        cy.saturating_add(half + 1),
    )?
    else {
        return Ok(());
    };

    let top = cy - half;
    let pennant = [
        Point::new(cx as f64, cy as f64),
        Point::new((cx + half) as f64, (top + FLAG_SIZE / 4) as f64),
        Point::new(cx as f64, top as f64),
    ];
    painter.fill_polygon(&pennant, FLAG_COLOR);
    painter.fill_rect(
        (cx - pole_half) as f64,
        top as f64,
        (cx + pole_half + 1) as f64,
        (cy + half + 1) as f64,
        POLE_COLOR,
    );
    painter.finish(layer)
}

/// Fill and outline every zone polygon, last zone first, then composite the result.
pub fn draw_zone_clean(
    layer: &mut RasterLayer,
    zones: &[Vec<GridPoint>],
    color: [u8; 4],
) -> MapResult<()> {
    let Some((x0, y0, x1, y1)) = zones_bounds(zones) else {
        return Ok(());
    };
    let Some(mut painter) = ShapePainter::for_region(
        layer,
        x0.saturating_sub(1),
        y0.saturating_sub(1),
        x1.saturating_add(2),
        y1.saturating_add(2),
    )?
    else {
        return Ok(());
    };

    let outline = outline_of(color);
    for zone in zones.iter().rev() {
        let polygon: Vec<Point> = zone
            .iter()
            .map(|&(x, y)| Point::new(x as f64, y as f64))
            .collect();
        painter.fill_polygon(&polygon, color);
        painter.stroke_polygon(&polygon, 1.0, outline);
    }
    painter.finish(layer)
}

/// Virtual walls as flat 3px lines. Each wall is a point list, normally two endpoints.
pub fn draw_virtual_walls(
    layer: &mut RasterLayer,
    walls: &[Vec<GridPoint>],
    color: Rgba8Premul,
) -> usize {
    walls
        .iter()
        .map(|wall| draw_lines(layer, wall, VIRTUAL_WALL_WIDTH, color))
        .sum()
}

/// A filled disc of [`OBSTACLE_RADIUS`] for each obstacle position.
pub fn draw_obstacles(
    layer: &mut RasterLayer,
    positions: &[GridPoint],
    color: [u8; 4],
) -> MapResult<()> {
    let reach = OBSTACLE_RADIUS + 1;
    for &(x, y) in positions {
        let Some(mut painter) = ShapePainter::for_region(
            layer,
            x.saturating_sub(reach),
            y.saturating_sub(reach),
            x.saturating_add(reach + 1),
            y.saturating_add(reach + 1),
        )?
        else {
            continue;
        };
        painter.fill_circle(Point::new(x as f64, y as f64), OBSTACLE_RADIUS as f64, color);
        painter.finish(layer)?;
    }
    Ok(())
}

type Bounds = (i64, i64, i64, i64);

fn zones_bounds(zones: &[Vec<GridPoint>]) -> Option<Bounds> {
    zones
        .iter()
        .flatten()
        .fold(None, |acc: Option<Bounds>, &(x, y)| match acc {
            None => Some((x, y, x, y)),
            Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
        })
}

#[cfg(test)]
#[path = "../../tests/unit/draw/icons.rs"]
mod tests;
