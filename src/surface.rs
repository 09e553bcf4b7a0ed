//! RGBA drawing surface.
//!
//! Paint calls (`fill_*`, `line`, `arc`) overwrite the covered pixels with
//! the given colour, alpha included. Only [`Surface::composite`] blends,
//! using straight-alpha source-over:
//!
//! ```text
//! a_out = a_s + a_d * (1 - a_s)
//! c_out = (c_s * a_s + c_d * a_d * (1 - a_s)) / a_out
//! ```
//!
//! Coverage is sampled at pixel centres `(x + 0.5, y + 0.5)`; shape boxes
//! are inclusive on both ends.

use crate::design::Rgba;
use image::RgbaImage;

pub type Point = (f32, f32);

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    img: RgbaImage,
}

impl Surface {
    /// Fully transparent `size`×`size` canvas.
    pub fn new(size: u32) -> Self {
        Self { img: RgbaImage::new(size, size) }
    }

    pub fn size(&self) -> u32 {
        self.img.width()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.img.get_pixel(x, y).0
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba) {
        let n = self.img.width() as i64;
        if x >= 0 && y >= 0 && x < n && y < n {
            self.img.put_pixel(x as u32, y as u32, image::Rgba(color));
        }
    }

    /// Pixel index range whose centres fall inside `[lo, hi]`.
    fn span(&self, lo: f32, hi: f32) -> std::ops::Range<u32> {
        let n = self.img.width() as f32;
        let start = (lo - 0.5).ceil().clamp(0.0, n) as u32;
        let end = ((hi - 0.5).floor() + 1.0).clamp(0.0, n) as u32;
        start..end.max(start)
    }

    pub fn fill_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
        for y in self.span(y0, y1) {
            for x in self.span(x0, x1) {
                self.img.put_pixel(x, y, image::Rgba(color));
            }
        }
    }

    /// Ellipse inscribed in the box `[x0, x1]×[y0, y1]`.
    pub fn fill_ellipse(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
        let cx = (x0 + x1) * 0.5;
        let cy = (y0 + y1) * 0.5;
        let rx = (x1 - x0) * 0.5;
        let ry = (y1 - y0) * 0.5;
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        for y in self.span(y0, y1) {
            for x in self.span(x0, x1) {
                let dx = (x as f32 + 0.5 - cx) / rx;
                let dy = (y as f32 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.img.put_pixel(x, y, image::Rgba(color));
                }
            }
        }
    }

    /// 1 px arc of the ellipse inscribed in the box. Angles in degrees,
    /// 0 at three o'clock, growing clockwise.
    pub fn arc(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, start_deg: f32, end_deg: f32, color: Rgba) {
        let cx = (x0 + x1) * 0.5;
        let cy = (y0 + y1) * 0.5;
        let rx = (x1 - x0) * 0.5;
        let ry = (y1 - y0) * 0.5;
        let sweep = end_deg - start_deg;
        if sweep <= 0.0 || rx < 0.0 || ry < 0.0 {
            return;
        }
        // ~2 samples per pixel of arc length
        let steps = ((sweep / 360.0) * std::f32::consts::TAU * rx.max(ry) * 2.0).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let a = (start_deg + sweep * i as f32 / steps as f32).to_radians();
            let px = cx + rx * a.cos();
            let py = cy + ry * a.sin();
            self.put(px.floor() as i64, py.floor() as i64, color);
        }
    }

    /// 1 px line (DDA).
    pub fn line(&mut self, p0: Point, p1: Point, color: Rgba) {
        let dx = p1.0 - p0.0;
        let dy = p1.1 - p0.1;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = p0.0 + dx * t;
            let y = p0.1 + dy * t;
            self.put(x.floor() as i64, y.floor() as i64, color);
        }
    }

    /// Line of the given pixel width with flat (butt) ends.
    pub fn thick_line(&mut self, p0: Point, p1: Point, width: f32, color: Rgba) {
        if width <= 1.0 {
            self.line(p0, p1, color);
            return;
        }
        let dx = p1.0 - p0.0;
        let dy = p1.1 - p0.1;
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            return;
        }
        let half = width * 0.5;
        let nx = -dy / len * half;
        let ny = dx / len * half;
        self.fill_polygon(&[
            (p0.0 + nx, p0.1 + ny),
            (p1.0 + nx, p1.1 + ny),
            (p1.0 - nx, p1.1 - ny),
            (p0.0 - nx, p0.1 - ny),
        ], color);
    }

    /// Fills a convex polygon (either winding).
    pub fn fill_polygon(&mut self, pts: &[Point], color: Rgba) {
        if pts.len() < 3 {
            return;
        }
        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for &(x, y) in pts {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        for y in self.span(min_y, max_y) {
            for x in self.span(min_x, max_x) {
                if point_in_convex(x as f32 + 0.5, y as f32 + 0.5, pts) {
                    self.img.put_pixel(x, y, image::Rgba(color));
                }
            }
        }
    }

    /// Straight edges as two overlapping rectangles, corners as four
    /// filled circles of `radius`.
    pub fn fill_rounded_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, radius: f32, color: Rgba) {
        let d = radius * 2.0;
        self.fill_rect(x0 + radius, y0, x1 - radius, y1, color);
        self.fill_rect(x0, y0 + radius, x1, y1 - radius, color);
        self.fill_ellipse(x0, y0, x0 + d, y0 + d, color);
        self.fill_ellipse(x1 - d, y0, x1, y0 + d, color);
        self.fill_ellipse(x0, y1 - d, x0 + d, y1, color);
        self.fill_ellipse(x1 - d, y1 - d, x1, y1, color);
    }

    /// Outline only: four quarter arcs joined by four straight edges.
    pub fn stroke_rounded_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, radius: f32, color: Rgba) {
        let d = radius * 2.0;
        self.arc(x0, y0, x0 + d, y0 + d, 180.0, 270.0, color);
        self.arc(x1 - d, y0, x1, y0 + d, 270.0, 360.0, color);
        self.arc(x0, y1 - d, x0 + d, y1, 90.0, 180.0, color);
        self.arc(x1 - d, y1 - d, x1, y1, 0.0, 90.0, color);
        self.line((x0 + radius, y0), (x1 - radius, y0), color);
        self.line((x0 + radius, y1), (x1 - radius, y1), color);
        self.line((x0, y0 + radius), (x0, y1 - radius), color);
        self.line((x1, y0 + radius), (x1, y1 - radius), color);
    }

    /// Source-over of `layer` onto `self`. Sizes must match; extra pixels
    /// of a larger layer are ignored.
    pub fn composite(&mut self, layer: &Surface) {
        let n = self.size().min(layer.size());
        for y in 0..n {
            for x in 0..n {
                let src = layer.img.get_pixel(x, y).0;
                if src[3] == 0 {
                    continue;
                }
                let dst = self.img.get_pixel(x, y).0;
                self.img.put_pixel(x, y, image::Rgba(source_over(src, dst)));
            }
        }
    }
}

/// Straight-alpha source-over of a single pixel.
pub fn source_over(src: Rgba, dst: Rgba) -> Rgba {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        let v = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

#[inline]
fn cross(ax: f32, ay: f32, bx: f32, by: f32) -> f32 { ax * by - ay * bx }

fn point_in_convex(px: f32, py: f32, pts: &[Point]) -> bool {
    let mut has_neg = false;
    let mut has_pos = false;
    for i in 0..pts.len() {
        let (x1, y1) = pts[i];
        let (x2, y2) = pts[(i + 1) % pts.len()];
        let c = cross(x2 - x1, y2 - y1, px - x1, py - y1);
        has_neg |= c < 0.0;
        has_pos |= c > 0.0;
    }
    !(has_neg && has_pos)
}
