use plotters::style::RGBColor;

/// Anchor colours of the sequential yellow-green-blue scale, light to dark.
const YLGNBU: [(u8, u8, u8); 9] = [
    (255, 255, 217),
    (237, 248, 177),
    (199, 233, 180),
    (127, 205, 187),
    (65, 182, 196),
    (29, 145, 192),
    (34, 94, 168),
    (37, 52, 148),
    (8, 29, 88),
];

/// Qualitative palette used for per-category boxes.
const SET2: [(u8, u8, u8); 8] = [
    (102, 194, 165),
    (252, 141, 98),
    (141, 160, 203),
    (231, 138, 195),
    (166, 216, 84),
    (255, 217, 47),
    (229, 196, 148),
    (179, 179, 179),
];

pub const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);
pub const CORAL: RGBColor = RGBColor(255, 127, 80);

/// Sample the yellow-green-blue scale at `t` in [0, 1]; out-of-range input is clamped.
pub fn ylgnbu(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (YLGNBU.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(YLGNBU.len() - 2);
    let frac = scaled - idx as f64;
    let (r0, g0, b0) = YLGNBU[idx];
    let (r1, g1, b1) = YLGNBU[idx + 1];
    RGBColor(lerp(r0, r1, frac), lerp(g0, g1, frac), lerp(b0, b1, frac))
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

/// Palette colour for the `i`-th category, cycling.
pub fn set2(i: usize) -> RGBColor {
    let (r, g, b) = SET2[i % SET2.len()];
    RGBColor(r, g, b)
}

/// Black or white, whichever reads better on `bg`.
pub fn text_on(bg: RGBColor) -> RGBColor {
    let RGBColor(r, g, b) = bg;
    let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    if luma > 140.0 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_endpoints() {
        assert_eq!(ylgnbu(0.0), RGBColor(255, 255, 217));
        assert_eq!(ylgnbu(1.0), RGBColor(8, 29, 88));
        assert_eq!(ylgnbu(-3.0), ylgnbu(0.0));
        assert_eq!(ylgnbu(7.0), ylgnbu(1.0));
        assert_eq!(ylgnbu(f64::NAN), ylgnbu(0.0));
    }

    #[test]
    fn scale_interpolates_between_anchors() {
        // halfway between anchors 0 and 1
        assert_eq!(ylgnbu(0.0625), RGBColor(246, 252, 197));
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(set2(0), set2(8));
        assert_ne!(set2(0), set2(1));
    }

    #[test]
    fn annotation_contrast() {
        assert_eq!(text_on(ylgnbu(0.0)), RGBColor(0, 0, 0));
        assert_eq!(text_on(ylgnbu(1.0)), RGBColor(255, 255, 255));
    }
}
