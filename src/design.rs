//! Palette and proportional geometry of the Scribe icon.
//!
//! Every length is a fraction of the output size so the badge scales
//! uniformly from 16 px up to 1024 px.

pub type Rgba = [u8; 4];

#[derive(Debug, Clone, PartialEq)]
pub struct IconDesign {
    pub background: Rgba,
    pub accent: Rgba,
    pub focus_dot: Rgba,
    /// Semi-transparent white, kept with the palette but not painted.
    pub highlight: Rgba,
    pub inner_outline: Rgba,

    pub padding: f32,
    pub corner_radius: f32,
    pub inner_inset: f32,
    pub inner_corner_scale: f32,

    pub pen_start: (f32, f32),
    pub pen_end: (f32, f32),
    pub pen_width: f32,
    pub pen_min_width_px: u32,
    pub tip_size: f32,

    pub dot_center: (f32, f32),
    pub dot_radius: f32,

    pub glow_scale: f32,
    pub glow_layers: u8,
    pub glow_step_px: f32,
    pub glow_alpha_start: u8,
    pub glow_alpha_step: u8,
}

impl Default for IconDesign {
    fn default() -> Self {
        Self {
            background: [26, 26, 26, 255],   // #1a1a1a
            accent: [212, 165, 116, 255],    // #d4a574
            focus_dot: [74, 222, 128, 255],  // #4ade80
            highlight: [255, 255, 255, 40],
            inner_outline: [30, 30, 30, 255],

            padding: 0.10,
            corner_radius: 0.22,
            inner_inset: 0.02,
            inner_corner_scale: 0.9,

            pen_start: (0.25, 0.75),
            pen_end: (0.70, 0.30),
            pen_width: 0.08,
            pen_min_width_px: 3,
            tip_size: 0.08,

            dot_center: (0.55, 0.55),
            dot_radius: 0.06,

            glow_scale: 1.5,
            glow_layers: 3,
            glow_step_px: 2.0,
            glow_alpha_start: 30,
            glow_alpha_step: 10,
        }
    }
}

impl IconDesign {
    /// Alpha of glow layer `i`, clamped at zero.
    pub fn glow_alpha(&self, i: u8) -> u8 {
        self.glow_alpha_start
            .saturating_sub(self.glow_alpha_step.saturating_mul(i))
    }

    /// Stroke width in whole pixels, never thinner than the minimum.
    pub fn pen_width_px(&self, size: u32) -> u32 {
        ((size as f32 * self.pen_width) as u32).max(self.pen_min_width_px)
    }
}
