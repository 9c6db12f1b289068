//! SVG renderer for scene shapes
//! Builds SVG markup with `format!`; no DOM is involved.
//! - Cut geometry: red hairline strokes, no fill
//! - Labels: centered blue text, one `tspan` per line
//! - Hit areas: transparent, only drawn in the canvas preview

use std::fmt::Write as _;

use wallkit_camtools::scene::LABEL_LINE_SPACING_EM;
use wallkit_camtools::{DrawableScene, Geometry, Label, Point, Rect, SceneShape, ToggleKey};

use crate::error::{ExportError, ExportResult};

pub const XML_PROLOG: &str = "<?xml version=\"1.0\" standalone=\"no\"?>\n";
const SVG_NS: &str = "http://www.w3.org/2000/svg";
const CUT_STROKE: &str = "rgb(255,0,0)";
const LABEL_FILL: &str = "rgb(0,0,255)";
const TRANSPARENT: &str = "rgba(0,0,0,0)";
const LABEL_FONT_FAMILY: &str = "Arial, sans-serif";

/// Format a coordinate with at most four decimals and no trailing zeros.
pub fn fmt_num(value: f64) -> String {
    let mut s = format!("{:.4}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// SVG path data for a closed polygon: `M x y L x y ... Z`.
///
/// A trailing point equal to the first is folded into the `Z`.
pub fn path_data(points: &[Point]) -> String {
    let mut pts = points;
    if pts.len() > 1 && pts.first() == pts.last() {
        pts = &pts[..pts.len() - 1];
    }
    let mut d = String::new();
    for (i, p) in pts.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { "L" };
        if i > 0 {
            d.push(' ');
        }
        let _ = write!(d, "{} {} {}", cmd, fmt_num(p.x), fmt_num(p.y));
    }
    if !pts.is_empty() {
        d.push_str(" Z");
    }
    d
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn toggle_attr(toggle: &Option<ToggleKey>) -> String {
    match toggle {
        Some(ToggleKey::Wall(key)) => format!(" data-wall-id=\"{}\"", escape_xml(key.as_str())),
        Some(ToggleKey::Floor(id)) => format!(" data-floor-id=\"{}\"", escape_xml(id)),
        None => String::new(),
    }
}

fn render_rect(rect: &Rect, fill: &str, stroke: &str, stroke_width: f64, extra: &str) -> String {
    format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"{}/>",
        fmt_num(rect.x),
        fmt_num(rect.y),
        fmt_num(rect.width),
        fmt_num(rect.height),
        fill,
        stroke,
        fmt_num(stroke_width),
        extra
    )
}

fn render_label(label: &Label, extra: &str) -> String {
    let x = fmt_num(label.anchor.x);
    let mut svg = format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"{}px\" font-family=\"{}\" fill=\"{}\"{}>",
        x,
        fmt_num(label.anchor.y),
        fmt_num(label.font_size),
        LABEL_FONT_FAMILY,
        LABEL_FILL,
        extra
    );
    for (i, line) in label.lines.iter().enumerate() {
        let dy = if i == 0 {
            label.first_line_dy_em
        } else {
            LABEL_LINE_SPACING_EM
        };
        let _ = write!(
            svg,
            "<tspan x=\"{}\" dy=\"{}em\">{}</tspan>",
            x,
            fmt_num(dy),
            escape_xml(line)
        );
    }
    svg.push_str("</text>");
    svg
}

/// Render one shape as an SVG element.
pub fn render_shape(shape: &SceneShape) -> String {
    let extra = toggle_attr(&shape.toggle);
    match (&shape.geometry, shape.kind.is_helper()) {
        (Geometry::Path { points }, true) => format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" pointer-events=\"stroke\"{}/>",
            path_data(points),
            TRANSPARENT,
            fmt_num(shape.stroke_width),
            extra
        ),
        (Geometry::Path { points }, false) => format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"{}/>",
            path_data(points),
            CUT_STROKE,
            fmt_num(shape.stroke_width),
            extra
        ),
        (Geometry::Rect { rect }, true) => render_rect(rect, TRANSPARENT, "none", 0.0, &extra),
        (Geometry::Rect { rect }, false) => {
            render_rect(rect, "none", CUT_STROKE, shape.stroke_width, &extra)
        }
        (Geometry::Text { label }, _) => render_label(label, &extra),
    }
}

fn svg_open(width: f64, height: f64) -> String {
    format!(
        "<svg xmlns=\"{}\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n",
        SVG_NS,
        fmt_num(width),
        fmt_num(height),
        fmt_num(width),
        fmt_num(height)
    )
}

/// Standalone document for one sheet.
///
/// Only exportable shapes overlapping the sheet's band are written; the
/// group transform shifts the band to the top of the page.
pub fn render_sheet_svg(scene: &DrawableScene, index: usize) -> ExportResult<String> {
    if index >= scene.sheet_count {
        return Err(ExportError::SheetOutOfRange {
            index,
            count: scene.sheet_count,
        });
    }
    let top = index as f64 * scene.sheet_height;

    let mut svg = String::from(XML_PROLOG);
    svg.push_str(&svg_open(scene.sheet_width, scene.sheet_height));
    let _ = writeln!(svg, "<g transform=\"translate(0, -{})\">", fmt_num(top));
    for shape in crate::sheet_export::select_sheet_shapes(scene, index) {
        svg.push_str(&render_shape(shape));
        svg.push('\n');
    }
    svg.push_str("</g>\n</svg>\n");
    Ok(svg)
}

/// The whole canvas in one document, helper shapes included.
pub fn render_canvas_svg(scene: &DrawableScene) -> String {
    let mut svg = String::from(XML_PROLOG);
    svg.push_str(&svg_open(scene.sheet_width, scene.total_height()));
    for index in 1..scene.sheet_count {
        // sheet boundaries
        let y = fmt_num(index as f64 * scene.sheet_height);
        let _ = writeln!(
            svg,
            "<line x1=\"0\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"rgb(200,200,200)\" stroke-dasharray=\"4 4\"/>",
            y,
            fmt_num(scene.sheet_width),
            y
        );
    }
    for shape in &scene.shapes {
        if !shape.exportable && !shape.kind.is_helper() {
            svg.push_str(&render_disabled(shape));
        } else {
            svg.push_str(&render_shape(shape));
        }
        svg.push('\n');
    }
    svg.push_str("</svg>\n");
    svg
}

/// Disabled pieces are shown faded in the preview.
fn render_disabled(shape: &SceneShape) -> String {
    format!("<g opacity=\"0.3\">{}</g>", render_shape(shape))
}
