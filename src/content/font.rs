//=========================================================================
// Segment Font
//=========================================================================
//
// Fourteen-segment vector glyphs, stroked through the canvas path API.
//
// Cell layout (unit cell, y grows downward):
// ```text
//    ─── A ───
//   │╲   │   ╱│
//   F H  I  J B
//   │  ╲ │ ╱  │
//    ─G1─ ─G2─
//   │  ╱ │ ╲  │
//   E K  L  M C
//   │╱   │   ╲│
//    ─── D ───
// ```
//
// Unsupported characters render as blanks; letters are case-insensitive.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::Point;

//=== Segments ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G1,
    G2,
    H,
    I,
    J,
    K,
    L,
    M,
}

impl Segment {
    /// Endpoints inside the unit cell.
    fn endpoints(self) -> (Point, Point) {
        let p = Point::new;
        match self {
            Segment::A => (p(0.0, 0.0), p(1.0, 0.0)),
            Segment::B => (p(1.0, 0.0), p(1.0, 0.5)),
            Segment::C => (p(1.0, 0.5), p(1.0, 1.0)),
            Segment::D => (p(0.0, 1.0), p(1.0, 1.0)),
            Segment::E => (p(0.0, 0.5), p(0.0, 1.0)),
            Segment::F => (p(0.0, 0.0), p(0.0, 0.5)),
            Segment::G1 => (p(0.0, 0.5), p(0.5, 0.5)),
            Segment::G2 => (p(0.5, 0.5), p(1.0, 0.5)),
            Segment::H => (p(0.0, 0.0), p(0.5, 0.5)),
            Segment::I => (p(0.5, 0.0), p(0.5, 0.5)),
            Segment::J => (p(1.0, 0.0), p(0.5, 0.5)),
            Segment::K => (p(0.5, 0.5), p(0.0, 1.0)),
            Segment::L => (p(0.5, 0.5), p(0.5, 1.0)),
            Segment::M => (p(0.5, 0.5), p(1.0, 1.0)),
        }
    }
}

fn segments(c: char) -> &'static [Segment] {
    use Segment::*;
    match c.to_ascii_uppercase() {
        'A' => &[A, B, C, E, F, G1, G2],
        'B' => &[A, B, C, D, G2, I, L],
        'C' => &[A, D, E, F],
        'D' => &[A, B, C, D, I, L],
        'E' => &[A, D, E, F, G1, G2],
        'F' => &[A, E, F, G1],
        'G' => &[A, C, D, E, F, G2],
        'H' => &[B, C, E, F, G1, G2],
        'I' => &[A, D, I, L],
        'J' => &[B, C, D, E],
        'K' => &[E, F, G1, J, M],
        'L' => &[D, E, F],
        'M' => &[B, C, E, F, H, J],
        'N' => &[B, C, E, F, H, M],
        'O' => &[A, B, C, D, E, F],
        'P' => &[A, B, E, F, G1, G2],
        'Q' => &[A, B, C, D, E, F, M],
        'R' => &[A, B, E, F, G1, G2, M],
        'S' => &[A, C, D, F, G1, G2],
        'T' => &[A, I, L],
        'U' => &[B, C, D, E, F],
        'V' => &[E, F, K, J],
        'W' => &[B, C, E, F, K, M],
        'X' => &[H, J, K, M],
        'Y' => &[H, J, L],
        'Z' => &[A, D, J, K],
        '0' => &[A, B, C, D, E, F, J, K],
        '1' => &[B, C, J],
        '2' => &[A, B, D, E, G1, G2],
        '3' => &[A, B, C, D, G2],
        '4' => &[B, C, F, G1, G2],
        '5' => &[A, C, D, F, G1, G2],
        '6' => &[A, C, D, E, F, G1, G2],
        '7' => &[A, B, C],
        '8' => &[A, B, C, D, E, F, G1, G2],
        '9' => &[A, B, C, D, F, G1, G2],
        '-' => &[G1, G2],
        _ => &[],
    }
}

//=== Layout ==============================================================

/// Glyph width relative to its height.
pub const GLYPH_ASPECT: f64 = 0.6;

/// Gap between glyphs relative to the glyph height.
pub const GLYPH_SPACING: f64 = 0.25;

/// Total advance of `len` glyphs at unit height.
pub fn text_width(len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    len as f64 * GLYPH_ASPECT + (len - 1) as f64 * GLYPH_SPACING
}

/// Line segments spelling `text` at unit height, left edge at `x = 0`,
/// vertically centered on `y = 0`.
pub fn layout(text: &str) -> Vec<(Point, Point)> {
    let advance = GLYPH_ASPECT + GLYPH_SPACING;
    text.chars()
        .enumerate()
        .flat_map(|(i, c)| {
            let left = i as f64 * advance;
            segments(c).iter().map(move |segment| {
                let (a, b) = segment.endpoints();
                (
                    Point::new(left + a.x * GLYPH_ASPECT, a.y - 0.5),
                    Point::new(left + b.x * GLYPH_ASPECT, b.y - 0.5),
                )
            })
        })
        .collect()
}

//=========================================================================
// Unit Tests
//=========================================================================
