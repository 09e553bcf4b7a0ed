use crate::design::IconDesign;
use crate::error::{IconError, Result};
use crate::surface::Surface;
use image::RgbaImage;

// Focus circle with pen: dark rounded badge, warm diagonal stroke, green dot with a soft glow
pub fn render(size: u32) -> Result<RgbaImage> {
    render_with(&IconDesign::default(), size)
}

/// Same as [`render`] for callers holding a signed size.
pub fn render_i64(size: i64) -> Result<RgbaImage> {
    if size <= 0 || size > u32::MAX as i64 {
        return Err(IconError::InvalidArgument(format!("icon size must be positive, got {}", size)));
    }
    render(size as u32)
}

pub fn render_with(design: &IconDesign, size: u32) -> Result<RgbaImage> {
    if size == 0 {
        return Err(IconError::InvalidArgument("icon size must be positive, got 0".into()));
    }
    let s = size as f32;
    let mut surface = Surface::new(size);

    // Badge
    let padding = s * design.padding;
    let corner = s * design.corner_radius;
    surface.fill_rounded_rect(padding, padding, s - padding, s - padding, corner, design.background);

    // Inset outline for a bit of depth
    let inner = padding + s * design.inner_inset;
    surface.stroke_rounded_rect(inner, inner, s - inner, s - inner, corner * design.inner_corner_scale, design.inner_outline);

    // Pen body
    let start = (s * design.pen_start.0, s * design.pen_start.1);
    let end = (s * design.pen_end.0, s * design.pen_end.1);
    surface.thick_line(start, end, design.pen_width_px(size) as f32, design.accent);

    // Pen tip. Not a true arrowhead; the vertex formula is part of the look.
    let tip = s * design.tip_size;
    let angle = (start.1 - end.1).atan2(start.0 - end.0);
    let tip_points = [
        (end.0 - tip * (angle - 0.5).cos(), end.1 - tip * (angle - 0.5).sin()),
        (end.0 - tip * (angle + 0.5).cos(), end.1 - tip * (angle + 0.5).sin()),
        (
            end.0 + tip * 0.5 * (angle + std::f32::consts::PI).cos(),
            end.1 + tip * 0.5 * (angle + std::f32::consts::PI).sin(),
        ),
    ];
    surface.fill_polygon(&tip_points, design.accent);

    paint_dot(&mut surface, design, size);
    paint_glow(&mut surface, design, size);

    log::debug!("rendered {}x{}", size, size);
    Ok(surface.into_image())
}

pub(crate) fn paint_dot(surface: &mut Surface, design: &IconDesign, size: u32) {
    let s = size as f32;
    let (cx, cy) = (s * design.dot_center.0, s * design.dot_center.1);
    let r = s * design.dot_radius;
    surface.fill_ellipse(cx - r, cy - r, cx + r, cy + r, design.focus_dot);
}

/// Each ring is drawn on its own transparent layer and composited over
/// the accumulated image.
pub(crate) fn paint_glow(surface: &mut Surface, design: &IconDesign, size: u32) {
    let s = size as f32;
    let (cx, cy) = (s * design.dot_center.0, s * design.dot_center.1);
    let base = s * design.dot_radius * design.glow_scale;
    for i in 0..design.glow_layers {
        let [r, g, b, _] = design.focus_dot;
        let color = [r, g, b, design.glow_alpha(i)];
        let radius = base + design.glow_step_px * i as f32;
        let mut layer = Surface::new(size);
        layer.fill_ellipse(cx - radius, cy - radius, cx + radius, cy + radius, color);
        surface.composite(&layer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_square_image_of_requested_size() {
        for size in [1u32, 2, 16, 30, 71, 128] {
            let img = render(size).unwrap();
            assert_eq!(img.dimensions(), (size, size));
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render(142).unwrap();
        let b = render(142).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn zero_and_negative_sizes_are_rejected() {
        assert!(matches!(render(0), Err(IconError::InvalidArgument(_))));
        assert!(matches!(render_i64(0), Err(IconError::InvalidArgument(_))));
        assert!(matches!(render_i64(-32), Err(IconError::InvalidArgument(_))));
        assert!(render_i64(32).is_ok());
    }

    #[test]
    fn square_corners_stay_transparent() {
        let size = 256;
        let img = render(size).unwrap();
        let d = IconDesign::default();
        let p = (size as f32 * d.padding).ceil() as u32 + 1;
        let q = size - 1 - p;
        for (x, y) in [(0, 0), (size - 1, 0), (0, size - 1), (size - 1, size - 1), (p, p), (q, p), (p, q), (q, q)] {
            assert_eq!(img.get_pixel(x, y).0[3], 0, "pixel ({}, {}) should be transparent", x, y);
        }
    }

    #[test]
    fn rounded_corners_are_filled_with_background() {
        for size in [128u32, 256, 512] {
            let img = render(size).unwrap();
            let d = IconDesign::default();
            let s = size as f32;
            let pad = s * d.padding;
            let r = s * d.corner_radius;
            let near = pad + r;
            let far = s - pad - r;
            // Horizontal nudge toward the outer edge keeps clear of the pen
            let probes = [
                (near - 0.4 * r, near),
                (far + 0.4 * r, near),
                (near - 0.4 * r, far),
                (far + 0.4 * r, far),
            ];
            for (x, y) in probes {
                let px = img.get_pixel(x as u32, y as u32).0;
                assert_eq!(px, d.background, "size {} probe ({}, {})", size, x, y);
            }
        }
    }

    #[test]
    fn badge_extent_scales_with_size() {
        for size in [100u32, 200, 400] {
            let img = render(size).unwrap();
            let mid = size / 2;
            let first = (0..size).find(|&x| img.get_pixel(x, mid).0[3] != 0).unwrap();
            let last = (0..size).rev().find(|&x| img.get_pixel(x, mid).0[3] != 0).unwrap();
            let pad = size as f32 * 0.10;
            assert!((first as f32 - pad).abs() <= 1.0, "left edge {} for size {}", first, size);
            assert!(((size - 1 - last) as f32 - pad).abs() <= 1.0, "right edge {} for size {}", last, size);
        }
    }

    #[test]
    fn dot_center_has_focus_colour() {
        let img = render(256).unwrap();
        let c = (256.0 * 0.55) as u32;
        // Glow shares the dot hue, so compositing it leaves the centre unchanged
        let px = img.get_pixel(c, c).0;
        assert_eq!(px[3], 255);
        assert_eq!(px[1], 222);
    }

    #[test]
    fn glow_opacity_falls_off_from_dot() {
        let d = IconDesign::default();
        let size = 200;
        let mut s = Surface::new(size);
        paint_dot(&mut s, &d, size);
        paint_glow(&mut s, &d, size);
        let cx = (size as f32 * d.dot_center.0) as u32;
        let cy = (size as f32 * d.dot_center.1) as u32;
        let rays: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
        for (dx, dy) in rays {
            let mut prev = 255u8;
            for step in 0..(size / 3) as i32 {
                let x = cx as i32 + dx * step;
                let y = cy as i32 + dy * step;
                let a = s.pixel(x as u32, y as u32)[3];
                assert!(a <= prev, "alpha rose from {} to {} at ({}, {})", prev, a, x, y);
                prev = a;
            }
            assert_eq!(prev, 0);
        }
    }

    #[test]
    fn glow_alone_stays_faint() {
        let d = IconDesign::default();
        let mut s = Surface::new(64);
        paint_glow(&mut s, &d, 64);
        let max = (0..64).flat_map(|y| (0..64).map(move |x| (x, y)))
            .map(|(x, y)| s.pixel(x, y)[3])
            .max()
            .unwrap();
        // 1 - (1-30/255)(1-20/255)(1-10/255) ≈ 0.217
        assert!(max > 0 && max <= 60, "max glow alpha {}", max);
    }
}
