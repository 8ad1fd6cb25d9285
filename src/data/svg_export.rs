//! SVG outline export
//!
//! Writes a glyph outline back out as a standalone SVG: one `<path>` with the
//! nonzero fill rule, in a viewBox covering the advance width and the full em.
//! Glyph space is y-up, so every y coordinate becomes `ascender - y`.

use crate::data::conversions::contours_to_bezpaths;
use crate::data::metrics::FontMetrics;
use kurbo::{BezPath, PathEl, Point};
use std::fmt::Write as _;
use xmlwriter::XmlWriter;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Serialize a glyph's contours as an SVG document
pub fn glyph_to_svg(glyph: &norad::Glyph, metrics: &FontMetrics) -> String {
    let paths = contours_to_bezpaths(&glyph.contours);
    outline_to_svg(&paths, glyph.width, metrics)
}

/// Serialize closed contours (in font units) as an SVG document
pub fn outline_to_svg(contours: &[BezPath], advance_width: f64, metrics: &FontMetrics) -> String {
    let mut xml = XmlWriter::new(xmlwriter::Options::default());

    xml.start_element("svg");
    xml.write_attribute("xmlns", SVG_NS);
    let view_box = format!(
        "0 0 {} {}",
        format_num(advance_width),
        format_num(metrics.units_per_em)
    );
    xml.write_attribute("viewBox", &view_box);

    let d = path_data(contours, metrics.ascender);
    if !d.is_empty() {
        xml.start_element("path");
        xml.write_attribute("fill-rule", "nonzero");
        xml.write_attribute("d", &d);
        xml.end_element();
    }

    xml.end_document()
}

/// Build SVG path data with y flipped around the ascender
pub fn path_data(contours: &[BezPath], ascender: f64) -> String {
    let flip = |p: Point| Point::new(p.x, ascender - p.y);
    let mut d = String::new();

    for contour in contours {
        for el in contour.elements() {
            match *el {
                PathEl::MoveTo(p) => push_command(&mut d, 'M', &[flip(p)]),
                PathEl::LineTo(p) => push_command(&mut d, 'L', &[flip(p)]),
                PathEl::QuadTo(p1, p2) => push_command(&mut d, 'Q', &[flip(p1), flip(p2)]),
                PathEl::CurveTo(p1, p2, p3) => {
                    push_command(&mut d, 'C', &[flip(p1), flip(p2), flip(p3)])
                }
                PathEl::ClosePath => push_command(&mut d, 'Z', &[]),
            }
        }
    }

    d
}

fn push_command(d: &mut String, command: char, points: &[Point]) {
    if !d.is_empty() {
        d.push(' ');
    }
    d.push(command);
    for p in points {
        let _ = write!(d, " {} {}", format_num(p.x), format_num(p.y));
    }
}

/// Format a number without a fraction when it is integral
fn format_num(num: f64) -> String {
    if num.fract() == 0.0 && num.abs() < i64::MAX as f64 {
        // Going through i64 also turns `-0` into `0`
        (num as i64).to_string()
    } else {
        // Round to keep float noise like 29.999999999999996 out of the file
        ((num * 1e4).round() / 1e4).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((0.0, size));
        path.line_to((size, size));
        path.line_to((size, 0.0));
        path.close_path();
        path
    }

    #[test]
    fn test_path_data_flips_y() {
        let d = path_data(&[square(100.0)], 800.0);
        assert_eq!(d, "M 0 800 L 0 700 L 100 700 L 100 800 Z");
    }

    #[test]
    fn test_document_shape() {
        let svg = outline_to_svg(&[square(100.0)], 600.0, &FontMetrics::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 600 1000""#));
        assert!(svg.contains(r#"fill-rule="nonzero""#));
        assert_eq!(svg.matches("<path").count(), 1);
    }

    #[test]
    fn test_fractional_numbers() {
        assert_eq!(format_num(12.3456789), "12.3457");
        assert_eq!(format_num(-0.0), "0");
        assert_eq!(format_num(-250.0), "-250");
    }

    #[test]
    fn test_exported_svg_parses_back() {
        let svg = outline_to_svg(&[square(100.0)], 1000.0, &FontMetrics::default());
        let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
        assert_eq!(tree.view_box().rect.height(), 1000.0);
    }
}
