//! Color palettes and marker geometry for rendered charts.

use plotters::style::RGBColor;

use crate::domain::{LineKind, MarkerKind, PaletteKind};

pub const WARM: [RGBColor; 5] = [
    RGBColor(255, 107, 107),
    RGBColor(255, 142, 83),
    RGBColor(255, 179, 71),
    RGBColor(255, 201, 71),
    RGBColor(255, 217, 61),
];

pub const COOL: [RGBColor; 5] = [
    RGBColor(108, 92, 231),
    RGBColor(116, 185, 255),
    RGBColor(0, 184, 148),
    RGBColor(0, 206, 201),
    RGBColor(85, 163, 255),
];

pub const RAINBOW: [RGBColor; 5] = [
    RGBColor(255, 107, 107),
    RGBColor(255, 217, 61),
    RGBColor(107, 207, 127),
    RGBColor(78, 205, 196),
    RGBColor(162, 155, 254),
];

pub const MONO: [RGBColor; 5] = [
    RGBColor(46, 134, 171),
    RGBColor(72, 164, 219),
    RGBColor(105, 191, 252),
    RGBColor(125, 202, 255),
    RGBColor(145, 213, 255),
];

pub fn palette_colors(palette: PaletteKind) -> &'static [RGBColor; 5] {
    match palette {
        PaletteKind::Warm => &WARM,
        PaletteKind::Cool => &COOL,
        PaletteKind::Rainbow => &RAINBOW,
        PaletteKind::Mono => &MONO,
    }
}

/// Color for the `idx`-th series of a dataset; palettes wrap around.
pub fn series_color(palette: PaletteKind, idx: usize) -> RGBColor {
    let colors = palette_colors(palette);
    colors[idx % colors.len()]
}

/// Dash geometry `(dash length, gap)` in pixels, or `None` for a solid
/// stroke. Dotted renders as very short dashes; dash-dot as long dashes.
pub fn dash_pattern(line: LineKind) -> Option<(i32, i32)> {
    match line {
        LineKind::Solid | LineKind::None => None,
        LineKind::Dashed => Some((8, 4)),
        LineKind::DashDot => Some((14, 8)),
        LineKind::Dotted => Some((2, 4)),
    }
}

/// Vertex offsets (pixels, y-down) for polygon markers, or `None` when the
/// marker is a circle or absent and the renderer handles it directly.
pub fn polygon_offsets(marker: MarkerKind, r: i32) -> Option<Vec<(i32, i32)>> {
    match marker {
        MarkerKind::Circle | MarkerKind::None => None,
        MarkerKind::Square => Some(vec![(-r, -r), (r, -r), (r, r), (-r, r)]),
        MarkerKind::TriangleUp => Some(vec![(0, -r), (r, r), (-r, r)]),
        MarkerKind::TriangleDown => Some(vec![(0, r), (r, -r), (-r, -r)]),
        MarkerKind::Diamond => Some(vec![(0, -r), (r, 0), (0, r), (-r, 0)]),
        MarkerKind::Pentagon => Some(regular_polygon(5, r)),
        MarkerKind::Hexagon => Some(regular_polygon(6, r)),
        MarkerKind::Star => Some(star_polygon(r)),
    }
}

/// Regular n-gon with one vertex pointing up.
fn regular_polygon(sides: u32, r: i32) -> Vec<(i32, i32)> {
    (0..sides)
        .map(|i| vertex(-90.0 + 360.0 * f64::from(i) / f64::from(sides), f64::from(r)))
        .collect()
}

/// Five-pointed star: outer and inner radii alternating every 36 degrees.
fn star_polygon(r: i32) -> Vec<(i32, i32)> {
    (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 {
                f64::from(r)
            } else {
                f64::from(r) * 0.45
            };
            vertex(-90.0 + 36.0 * f64::from(i), radius)
        })
        .collect()
}

fn vertex(angle_deg: f64, radius: f64) -> (i32, i32) {
    let theta = angle_deg.to_radians();
    (
        (radius * theta.cos()).round() as i32,
        (radius * theta.sin()).round() as i32,
    )
}

/// Single-character stand-in for terminal and text renderings.
pub fn ascii_glyph(marker: MarkerKind) -> Option<char> {
    match marker {
        MarkerKind::Circle => Some('o'),
        MarkerKind::Square => Some('#'),
        MarkerKind::TriangleUp => Some('^'),
        MarkerKind::TriangleDown => Some('v'),
        MarkerKind::Diamond => Some('+'),
        MarkerKind::Pentagon => Some('p'),
        MarkerKind::Star => Some('*'),
        MarkerKind::Hexagon => Some('h'),
        MarkerKind::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps_past_five_series() {
        let a = series_color(PaletteKind::Warm, 0);
        let b = series_color(PaletteKind::Warm, 5);
        assert_eq!((a.0, a.1, a.2), (b.0, b.1, b.2));
        let c = series_color(PaletteKind::Cool, 2);
        assert_eq!((c.0, c.1, c.2), (0, 184, 148));
    }

    #[test]
    fn polygon_markers_have_expected_vertex_counts() {
        assert_eq!(polygon_offsets(MarkerKind::Square, 4).unwrap().len(), 4);
        assert_eq!(polygon_offsets(MarkerKind::Pentagon, 6).unwrap().len(), 5);
        assert_eq!(polygon_offsets(MarkerKind::Hexagon, 6).unwrap().len(), 6);
        assert_eq!(polygon_offsets(MarkerKind::Star, 8).unwrap().len(), 10);
        assert!(polygon_offsets(MarkerKind::Circle, 8).is_none());
        assert!(polygon_offsets(MarkerKind::None, 8).is_none());
    }

    #[test]
    fn polygon_markers_point_up() {
        let tri = polygon_offsets(MarkerKind::TriangleUp, 5).unwrap();
        assert_eq!(tri[0], (0, -5));
        let pent = polygon_offsets(MarkerKind::Pentagon, 8).unwrap();
        assert_eq!(pent[0], (0, -8));
    }

    #[test]
    fn dash_patterns_cover_non_solid_lines() {
        assert!(dash_pattern(LineKind::Solid).is_none());
        assert!(dash_pattern(LineKind::None).is_none());
        assert_eq!(dash_pattern(LineKind::Dashed), Some((8, 4)));
        assert!(dash_pattern(LineKind::Dotted).unwrap().0 < dash_pattern(LineKind::Dashed).unwrap().0);
    }
}
