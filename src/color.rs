use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Bounds;

// ---------------------------------------------------------------------------
// Continuous colour scale: numeric value → Color32
// ---------------------------------------------------------------------------

/// Hue at the low end of the scale (violet).
const HUE_LOW: f32 = 265.0;
/// Hue at the high end of the scale (yellow).
const HUE_HIGH: f32 = 50.0;

/// Maps a numeric column (price) onto a violet → yellow gradient.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    min: f64,
    max: f64,
}

impl ColorScale {
    pub fn new(bounds: Bounds) -> Self {
        ColorScale {
            min: bounds.min,
            max: bounds.max,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Position of `value` on the scale, clamped to `0.0..=1.0`.
    /// A degenerate scale (min == max) puts everything in the middle.
    pub fn position(&self, value: f64) -> f32 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0) as f32
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        color_at(self.position(value))
    }

    /// `n` evenly spaced (value, colour) stops for drawing a colour bar.
    pub fn stops(&self, n: usize) -> Vec<(f64, Color32)> {
        if n < 2 {
            return vec![(self.min, color_at(0.0))];
        }
        (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                (self.min + t * (self.max - self.min), color_at(t as f32))
            })
            .collect()
    }
}

fn color_at(t: f32) -> Color32 {
    let hue = HUE_LOW + (HUE_HIGH - HUE_LOW) * t;
    let hsl = Hsl::new(hue, 0.8, 0.35 + 0.25 * t);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale() -> ColorScale {
        ColorScale::new(Bounds { min: 10.0, max: 30.0 })
    }

    #[test]
    fn endpoints_map_to_scale_ends() {
        let s = scale();
        assert_eq!(s.position(10.0), 0.0);
        assert_eq!(s.position(30.0), 1.0);
        assert_eq!(s.position(20.0), 0.5);
        assert_eq!(s.color_for(10.0), color_at(0.0));
        assert_eq!(s.color_for(30.0), color_at(1.0));
        assert_ne!(color_at(0.0), color_at(1.0));
    }

    #[test]
    fn out_of_range_values_clamp() {
        let s = scale();
        assert_eq!(s.position(-5.0), 0.0);
        assert_eq!(s.position(99.0), 1.0);
    }

    #[test]
    fn degenerate_scale_uses_midpoint() {
        let s = ColorScale::new(Bounds { min: 7.0, max: 7.0 });
        assert_eq!(s.position(7.0), 0.5);
    }

    #[test]
    fn stops_span_the_scale() {
        let stops = scale().stops(5);
        assert_eq!(stops.len(), 5);
        assert_eq!(stops[0].0, 10.0);
        assert_eq!(stops[4].0, 30.0);
    }
}
