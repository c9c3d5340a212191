//! Color utilities for the views

use egui::Color32;

/// Red-yellow-green diverging palette, red first
const RD_YL_GN: [(u8, u8, u8); 11] = [
    (165, 0, 38),
    (215, 48, 39),
    (244, 109, 67),
    (253, 174, 97),
    (254, 224, 139),
    (255, 255, 191),
    (217, 239, 139),
    (166, 217, 106),
    (102, 189, 99),
    (26, 152, 80),
    (0, 104, 55),
];

/// Fill of items without a usable value
pub const MISSING_COLOR: Color32 = Color32::from_rgb(160, 160, 160);

/// Reversed red-yellow-green ramp: cheap is green, expensive is red
pub fn price_per_area_color(t: f32) -> Color32 {
    if !t.is_finite() {
        return MISSING_COLOR;
    }
    let t = 1.0 - t.clamp(0.0, 1.0);

    let scaled = t * (RD_YL_GN.len() - 1) as f32;
    let i = (scaled.floor() as usize).min(RD_YL_GN.len() - 2);
    let s = scaled - i as f32;
    let (r0, g0, b0) = RD_YL_GN[i];
    let (r1, g1, b1) = RD_YL_GN[i + 1];
    let mix = |a: u8, b: u8| (a as f32 * (1.0 - s) + b as f32 * s).round() as u8;
    Color32::from_rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/// Color of `value` within `domain`
pub fn color_in_domain(value: f64, domain: (f64, f64)) -> Color32 {
    if !value.is_finite() {
        return MISSING_COLOR;
    }
    let (lo, hi) = domain;
    let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.5 };
    price_per_area_color(t as f32)
}

/// `color` faded to `opacity`
pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    color.gamma_multiply(opacity.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_ends() {
        assert_eq!(price_per_area_color(0.0), Color32::from_rgb(0, 104, 55));
        assert_eq!(price_per_area_color(1.0), Color32::from_rgb(165, 0, 38));
        assert_eq!(price_per_area_color(0.5), Color32::from_rgb(255, 255, 191));
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(price_per_area_color(-3.0), price_per_area_color(0.0));
        assert_eq!(price_per_area_color(7.0), price_per_area_color(1.0));
        assert_eq!(price_per_area_color(f32::NAN), MISSING_COLOR);
    }

    #[test]
    fn test_color_in_domain() {
        assert_eq!(color_in_domain(10.0, (10.0, 20.0)), price_per_area_color(0.0));
        assert_eq!(color_in_domain(5.0, (5.0, 5.0)), price_per_area_color(0.5));
        assert_eq!(color_in_domain(f64::NAN, (0.0, 1.0)), MISSING_COLOR);
    }
}
