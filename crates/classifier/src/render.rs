//! SVG heatmap of a confusion matrix

use std::fmt::Write as _;

use crate::metrics::ConfusionMatrix;

/// Anchor colours of the sequential "Blues" map, light to dark
const BLUES: [(u8, u8, u8); 9] = [
    (0xf7, 0xfb, 0xff),
    (0xde, 0xeb, 0xf7),
    (0xc6, 0xdb, 0xef),
    (0x9e, 0xca, 0xe1),
    (0x6b, 0xae, 0xd6),
    (0x42, 0x92, 0xc6),
    (0x21, 0x71, 0xb5),
    (0x08, 0x51, 0x9c),
    (0x08, 0x30, 0x6b),
];

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 100.0;
const MARGIN_TOP: f64 = 70.0;
const MARGIN_BOTTOM: f64 = 70.0;
const COLORBAR_GAP: f64 = 30.0;
const COLORBAR_WIDTH: f64 = 25.0;

/// Interpolated Blues colour for `t` in [0, 1]
pub fn blues(t: f64) -> (u8, u8, u8) {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let position = t * (BLUES.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(BLUES.len() - 1);
    let fraction = position - lower as f64;

    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * fraction).round() as u8;
    let (a, b) = (BLUES[lower], BLUES[upper]);
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render `confusion` with annotated counts, class tick labels and a colour bar
///
/// Colours are scaled between the smallest and largest cell.
pub fn confusion_matrix_svg(confusion: &ConfusionMatrix, title: &str) -> String {
    let n = confusion.n_classes().max(1);
    let (min, max) = (confusion.min_count() as f64, confusion.max_count() as f64);
    let span = if max > min { max - min } else { 1.0 };

    let grid_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let cell = grid_height / n as f64;
    let grid_right = MARGIN_LEFT + cell * n as f64;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" font-size="20" text-anchor="middle">{}</text>"#,
        MARGIN_LEFT + cell * n as f64 / 2.0,
        MARGIN_TOP / 2.0,
        escape(title)
    );

    for (actual, row) in confusion.rows().iter().enumerate() {
        for (predicted, &count) in row.iter().enumerate() {
            let t = (count as f64 - min) / span;
            let x = MARGIN_LEFT + predicted as f64 * cell;
            let y = MARGIN_TOP + actual as f64 * cell;
            let text_colour = if t > 0.5 { "white" } else { "black" };
            let _ = writeln!(
                svg,
                r#"<rect x="{x:.1}" y="{y:.1}" width="{cell:.1}" height="{cell:.1}" fill="{}"/>"#,
                hex(blues(t))
            );
            let _ = writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-size="18" text-anchor="middle" dominant-baseline="central" fill="{text_colour}">{count}</text>"#,
                x + cell / 2.0,
                y + cell / 2.0
            );
        }
    }

    for class in 0..n {
        let centre = class as f64 * cell + cell / 2.0;
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="14" text-anchor="middle">{class}</text>"#,
            MARGIN_LEFT + centre,
            MARGIN_TOP + grid_height + 20.0
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="14" text-anchor="end" dominant-baseline="central">{class}</text>"#,
            MARGIN_LEFT - 10.0,
            MARGIN_TOP + centre
        );
    }
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" font-size="14" text-anchor="middle">Predicted label</text>"#,
        MARGIN_LEFT + cell * n as f64 / 2.0,
        HEIGHT - 20.0
    );
    let _ = writeln!(
        svg,
        r#"<text x="30" y="{:.1}" font-size="14" text-anchor="middle" transform="rotate(-90 30 {:.1})">True label</text>"#,
        MARGIN_TOP + grid_height / 2.0,
        MARGIN_TOP + grid_height / 2.0
    );

    let bar_x = grid_right + COLORBAR_GAP;
    let _ = writeln!(
        svg,
        r#"<defs><linearGradient id="blues" x1="0" y1="1" x2="0" y2="0">"#
    );
    for (i, colour) in BLUES.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"<stop offset="{:.3}" stop-color="{}"/>"#,
            i as f64 / (BLUES.len() - 1) as f64,
            hex(*colour)
        );
    }
    let _ = writeln!(svg, "</linearGradient></defs>");
    let _ = writeln!(
        svg,
        r#"<rect x="{bar_x:.1}" y="{MARGIN_TOP:.1}" width="{COLORBAR_WIDTH}" height="{grid_height:.1}" fill="url(#blues)"/>"#
    );
    for (value, y) in [(max, MARGIN_TOP), (min, MARGIN_TOP + grid_height)] {
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{y:.1}" font-size="12" dominant-baseline="central">{value}</text>"#,
            bar_x + COLORBAR_WIDTH + 6.0
        );
    }

    svg.push_str("</svg>\n");
    svg
}
