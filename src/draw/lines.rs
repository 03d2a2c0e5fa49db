use crate::foundation::core::Rgba8Premul;
use crate::raster::layer::RasterLayer;

/// Integer grid point in raster pixel coordinates.
pub type GridPoint = (i64, i64);

/// Integer Bresenham walk from `from` to `to`, both endpoints included.
///
/// Error terms are kept in `i128`, so any pair of `i64` endpoints is accepted.
#[derive(Clone, Debug)]
pub struct Bresenham {
    x: i64,
    y: i64,
    x1: i64,
    y1: i64,
    dx: i128,
    dy: i128,
    sx: i64,
    sy: i64,
    err: i128,
    done: bool,
}

impl Bresenham {
    pub fn new(from: GridPoint, to: GridPoint) -> Self {
        let (x0, y0) = from;
        let (x1, y1) = to;
        let dx = (i128::from(x1) - i128::from(x0)).abs();
        let dy = (i128::from(y1) - i128::from(y0)).abs();
        Self {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for Bresenham {
    type Item = GridPoint;

    fn next(&mut self) -> Option<GridPoint> {
        if self.done {
            return None;
        }
        let out = (self.x, self.y);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(out);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(out)
    }
}

/// Draw a polyline through `points`, stamping a `width × width` block of `color` at every
/// stepped pixel (block spans `[x, x+width) × [y, y+width)`), clipped to the layer.
///
/// Segments are first clipped to the region where a stamp can still touch the layer, so
/// far-off coordinates cost nothing. A single point draws one block. Returns the number of
/// stamps.
pub fn draw_lines(
    layer: &mut RasterLayer,
    points: &[GridPoint],
    width: u32,
    color: Rgba8Premul,
) -> usize {
    if width == 0 {
        return 0;
    }
    let w = i64::from(width);
    let (layer_w, layer_h) = (layer.width, layer.height);
    let mut stamps = 0usize;
    let mut stamp = |(x, y): GridPoint| {
        layer.fill_rect(x, y, x.saturating_add(w), y.saturating_add(w), color);
        stamps += 1;
    };

    match points {
        [] => {}
        [p] => stamp(*p),
        _ => {
            let bounds = (-w, -w, i64::from(layer_w), i64::from(layer_h));
            for seg in points.windows(2) {
                if let Some((a, b)) = clip_segment(seg[0], seg[1], bounds) {
                    Bresenham::new(a, b).for_each(&mut stamp);
                }
            }
        }
    }
    stamps
}

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const ABOVE: u8 = 4;
const BELOW: u8 = 8;

/// Clip `a → b` to the inclusive box `(x_min, y_min, x_max, y_max)` (Cohen-Sutherland).
///
/// Segments already inside are returned unchanged so their pixels match an unclipped walk.
fn clip_segment(
    a: GridPoint,
    b: GridPoint,
    (x_min, y_min, x_max, y_max): (i64, i64, i64, i64),
) -> Option<(GridPoint, GridPoint)> {
    let outcode = |(x, y): GridPoint| -> u8 {
        let mut code = 0;
        if x < x_min {
            code |= LEFT;
        } else if x > x_max {
            code |= RIGHT;
        }
        if y < y_min {
            code |= ABOVE;
        } else if y > y_max {
            code |= BELOW;
        }
        code
    };

    let (mut p, mut q) = (a, b);
    // Each pass pins one coordinate to an edge; four edges per endpoint bound the loop.
    for _ in 0..8 {
        let (cp, cq) = (outcode(p), outcode(q));
        if cp | cq == 0 {
            return Some((p, q));
        }
        if cp & cq != 0 {
            return None;
        }
        let out = if cp != 0 { cp } else { cq };
        let moved = if out & LEFT != 0 {
            (x_min, axis_at(p.1, q.1, p.0, q.0, x_min))
        } else if out & RIGHT != 0 {
            (x_max, axis_at(p.1, q.1, p.0, q.0, x_max))
        } else if out & ABOVE != 0 {
            (axis_at(p.0, q.0, p.1, q.1, y_min), y_min)
        } else {
            (axis_at(p.0, q.0, p.1, q.1, y_max), y_max)
        };
        if out == cp {
            p = moved;
        } else {
            q = moved;
        }
    }
    None
}

/// Coordinate on the `a` axis where the segment reaches `b_edge` on the `b` axis.
///
/// Exact while the intermediate product fits in `i128`.
fn axis_at(a0: i64, a1: i64, b0: i64, b1: i64, b_edge: i64) -> i64 {
    let da = i128::from(a1) - i128::from(a0);
    let db = i128::from(b1) - i128::from(b0);
    let num = i128::from(b_edge) - i128::from(b0);
    if db == 0 {
        return a0;
    }
    let offset = match da.checked_mul(num) {
        Some(prod) => div_round(prod, db),
        None => ((da as f64) * (num as f64) / (db as f64)).round() as i128,
    };
    i128::from(a0)
        .saturating_add(offset)
        .clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

fn div_round(n: i128, d: i128) -> i128 {
    let (q, r) = (n / d, n % d);
    if 2 * r.abs() >= d.abs() {
        q + n.signum() * d.signum()
    } else {
        q
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/lines.rs"]
mod tests;
