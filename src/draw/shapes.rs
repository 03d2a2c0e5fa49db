//! Anti-aliased shape rasterisation backed by `vello_cpu`.
//!
//! Shapes are rendered into a tile that covers only their (clipped) bounding box and then
//! alpha-composited onto the target layer, so an icon on a large map never allocates a
//! map-sized pixmap.

use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::Point;
use crate::foundation::error::{MapError, MapResult};
use crate::raster::composite::overlay_at;
use crate::raster::layer::RasterLayer;

const TOLERANCE: f64 = 0.1;
const CLIP_MARGIN: f64 = 4.0;

pub(crate) struct ShapePainter {
    ctx: vello_cpu::RenderContext,
    origin: (u32, u32),
    width: u16,
    height: u16,
}

impl ShapePainter {
    /// Painter for the pixel region `[x0, x1) × [y0, y1)` clipped to `layer`.
    ///
    /// Returns `None` when nothing of the region is visible.
    pub(crate) fn for_region(
        layer: &RasterLayer,
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,
    ) -> MapResult<Option<Self>> {
        let cx0 = x0.clamp(0, i64::from(layer.width));
        let cy0 = y0.clamp(0, i64::from(layer.height));
        let cx1 = x1.clamp(0, i64::from(layer.width));
        let cy1 = y1.clamp(0, i64::from(layer.height));
        if cx0 >= cx1 || cy0 >= cy1 {
            return Ok(None);
        }

        let width: u16 = (cx1 - cx0)
            .try_into()
            .map_err(|_| MapError::evaluation("shape region width exceeds u16"))?;
        let height: u16 = (cy1 - cy0)
            .try_into()
            .map_err(|_| MapError::evaluation("shape region height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            -(cx0 as f64),
            -(cy0 as f64),
        )));
        Ok(Some(Self {
            ctx,
            origin: (cx0 as u32, cy0 as u32),
            width,
            height,
        }))
    }

    pub(crate) fn fill_polygon(&mut self, points: &[Point], rgba: [u8; 4]) {
        if points.len() < 3 {
            return;
        }
        let clipped = clip_polygon(points, self.clip_bounds());
        if clipped.len() < 3 {
            return;
        }
        self.set_color(rgba);
        self.ctx.fill_path(&polygon_path(&clipped));
    }

    pub(crate) fn stroke_polygon(&mut self, points: &[Point], width: f64, rgba: [u8; 4]) {
        if points.len() < 2 {
            return;
        }
        let clipped = clip_polygon(points, self.clip_bounds());
        if clipped.len() < 2 {
            return;
        }
        self.set_color(rgba);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&polygon_path(&clipped));
    }

    pub(crate) fn fill_circle(&mut self, center: Point, radius: f64, rgba: [u8; 4]) {
        self.set_color(rgba);
        let c = vello_cpu::kurbo::Circle::new(pixel_center(center), radius);
        self.ctx.fill_path(&c.to_path(TOLERANCE));
    }

    pub(crate) fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, rgba: [u8; 4]) {
        self.set_color(rgba);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        let c = vello_cpu::kurbo::Circle::new(pixel_center(center), radius);
        self.ctx.stroke_path(&c.to_path(TOLERANCE));
    }

    pub(crate) fn stroke_line(&mut self, from: Point, to: Point, width: f64, rgba: [u8; 4]) {
        self.set_color(rgba);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        let line = vello_cpu::kurbo::Line::new(pixel_center(from), pixel_center(to));
        self.ctx.stroke_path(&line.to_path(TOLERANCE));
    }

    /// Fill the pixel-aligned half-open rectangle `[x0, x1) × [y0, y1)`.
    pub(crate) fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, rgba: [u8; 4]) {
        self.set_color(rgba);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(x0, y0, x1, y1));
    }

    /// Rasterise everything recorded so far and composite it onto `layer`.
    pub(crate) fn finish(mut self, layer: &mut RasterLayer) -> MapResult<()> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        overlay_at(
            layer,
            pixmap.data_as_u8_slice(),
            u32::from(self.width),
            u32::from(self.height),
            self.origin.0,
            self.origin.1,
        )
    }

    /// Tile bounds in layer coordinates, grown so clip edges stay outside the visible tile
    /// even after stroking.
    fn clip_bounds(&self) -> (f64, f64, f64, f64) {
        let (ox, oy) = (f64::from(self.origin.0), f64::from(self.origin.1));
        (
            ox - CLIP_MARGIN,
            oy - CLIP_MARGIN,
            ox + f64::from(self.width) + CLIP_MARGIN,
            oy + f64::from(self.height) + CLIP_MARGIN,
        )
    }

    fn set_color(&mut self, [r, g, b, a]: [u8; 4]) {
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    }
}

// Integer map coordinates address pixels; shapes are placed on pixel centres.
fn pixel_center(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x + 0.5, p.y + 0.5)
}

fn polygon_path(points: &[Point]) -> vello_cpu::kurbo::BezPath {
    let mut path = vello_cpu::kurbo::BezPath::new();
    let mut iter = points.iter();
    if let Some(&first) = iter.next() {
        path.move_to(pixel_center(first));
        for &p in iter {
            path.line_to(pixel_center(p));
        }
        path.close_path();
    }
    path
}

/// Sutherland-Hodgman clip of a closed polygon to `(x_min, y_min, x_max, y_max)`.
fn clip_polygon(
    points: &[Point],
    (x_min, y_min, x_max, y_max): (f64, f64, f64, f64),
) -> Vec<Point> {
    let edges: [(fn(Point) -> f64, f64, bool); 4] = [
        (|p: Point| p.x, x_min, true),
        (|p: Point| p.x, x_max, false),
        (|p: Point| p.y, y_min, true),
        (|p: Point| p.y, y_max, false),
    ];

    let mut poly = points.to_vec();
    for (coord, edge, keep_above) in edges {
        let inside = |p: Point| {
            if keep_above {
                coord(p) >= edge
            } else {
                coord(p) <= edge
            }
        };
        let Some(&last) = poly.last() else {
            break;
        };
        let mut out = Vec::with_capacity(poly.len() + 2);
        let mut prev = last;
        for &cur in &poly {
            match (inside(prev), inside(cur)) {
                (true, true) => out.push(cur),
                (true, false) => out.push(crossing(prev, cur, coord, edge)),
                (false, true) => {
                    out.push(crossing(prev, cur, coord, edge));
                    out.push(cur);
                }
                (false, false) => {}
            }
            prev = cur;
        }
        poly = out;
    }
    poly
}

fn crossing(a: Point, b: Point, coord: fn(Point) -> f64, edge: f64) -> Point {
    let t = (edge - coord(a)) / (coord(b) - coord(a));
    a.lerp(b, t)
}

#[cfg(test)]
#[path = "../../tests/unit/draw/shapes.rs"]
mod tests;
