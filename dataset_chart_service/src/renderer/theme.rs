use plotters::prelude::*;

pub const BACKGROUND: RGBColor = RGBColor(26, 26, 26);
pub const TEXT_COLOR: RGBColor = RGBColor(230, 230, 230);
pub const GRID_COLOR: RGBColor = RGBColor(60, 60, 60);
pub const AXIS_COLOR: RGBColor = RGBColor(120, 120, 120);

pub const FONT_FAMILY: &str = "sans-serif";
pub const CAPTION_FONT_SIZE: f64 = 26.0;
pub const DESC_FONT_SIZE: f64 = 16.0;
pub const TICK_FONT_SIZE: f64 = 13.0;

/* Categorical palette for hue groups, repeated when there are more groups than colours */
const PALETTE: [RGBColor; 10] = [
    RGBColor(76, 114, 176),
    RGBColor(221, 132, 82),
    RGBColor(85, 168, 104),
    RGBColor(196, 78, 82),
    RGBColor(129, 114, 179),
    RGBColor(147, 120, 96),
    RGBColor(218, 139, 195),
    RGBColor(140, 140, 140),
    RGBColor(204, 185, 116),
    RGBColor(100, 181, 205),
];

/* Yellow-orange-red sequential map, low to high */
const YL_OR_RD: [RGBColor; 9] = [
    RGBColor(255, 255, 204),
    RGBColor(255, 237, 160),
    RGBColor(254, 217, 118),
    RGBColor(254, 178, 76),
    RGBColor(253, 141, 60),
    RGBColor(252, 78, 42),
    RGBColor(227, 26, 28),
    RGBColor(189, 0, 38),
    RGBColor(128, 0, 38),
];

pub fn series_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

#[doc = "Colour for `t` in `[0, 1]` on the yellow-orange-red map, linearly interpolated."]
pub fn heat_color(t: f64) -> RGBColor {
    let t: f64 = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled: f64 = t * (YL_OR_RD.len() - 1) as f64;
    let lower: usize = scaled.floor() as usize;
    let upper: usize = (lower + 1).min(YL_OR_RD.len() - 1);
    let weight: f64 = scaled - lower as f64;

    let lerp = |a: u8, b: u8| -> u8 { (a as f64 + (b as f64 - a as f64) * weight).round() as u8 };
    let (from, to) = (YL_OR_RD[lower], YL_OR_RD[upper]);

    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

pub fn caption_style() -> TextStyle<'static> {
    (FONT_FAMILY, CAPTION_FONT_SIZE).into_font().color(&TEXT_COLOR)
}

pub fn desc_style() -> TextStyle<'static> {
    (FONT_FAMILY, DESC_FONT_SIZE).into_font().color(&TEXT_COLOR)
}

pub fn tick_style() -> TextStyle<'static> {
    (FONT_FAMILY, TICK_FONT_SIZE).into_font().color(&TEXT_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_color_hits_both_ends() {
        assert_eq!(heat_color(0.0), YL_OR_RD[0]);
        assert_eq!(heat_color(1.0), YL_OR_RD[8]);
        assert_eq!(heat_color(f64::NAN), YL_OR_RD[0]);
    }

    #[test]
    fn palette_wraps_around() {
        assert_eq!(series_color(0), series_color(10));
        assert_ne!(series_color(0), series_color(1));
    }
}
