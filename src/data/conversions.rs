//! Glyph outline conversion utilities
//!
//! Conversion logic between norad UFO contours and kurbo Bézier paths. The
//! glyph stores its outline as UFO contours; the geometry passes work on
//! `BezPath`s, one closed subpath per contour.

use kurbo::{BezPath, ParamCurve, PathEl, PathSeg, Point};
use norad::{Contour, ContourPoint, PointType};

/// Convert a UFO contour into a closed `BezPath`
///
/// UFO contours wrap around: the first point's type says how the last
/// segment reaches it, and trailing off-curve points belong to that segment.
pub fn contour_to_bezpath(contour: &Contour) -> BezPath {
    let mut path = BezPath::new();
    let points = &contour.points;
    if points.is_empty() {
        return path;
    }

    // Start from the first on-curve point so that the trailing off-curves are
    // handled by the same loop as every other segment.
    let start = points
        .iter()
        .position(|p| p.typ != PointType::OffCurve)
        .unwrap_or(0);
    let count = points.len();
    let first = &points[start];
    path.move_to(Point::new(first.x, first.y));

    let mut pending_offcurves: Vec<Point> = Vec::new();
    for step in 1..=count {
        let point = &points[(start + step) % count];
        let pt = Point::new(point.x, point.y);

        match point.typ {
            PointType::OffCurve => pending_offcurves.push(pt),
            PointType::Move | PointType::Line => path.line_to(pt),
            PointType::Curve => {
                match pending_offcurves.len() {
                    0 => path.line_to(pt),
                    1 => path.quad_to(pending_offcurves[0], pt),
                    n => path.curve_to(pending_offcurves[n - 2], pending_offcurves[n - 1], pt),
                }
                pending_offcurves.clear();
            }
            PointType::QCurve => {
                push_qcurve(&mut path, &pending_offcurves, pt);
                pending_offcurves.clear();
            }
        }
    }

    path.close_path();
    path
}

/// Quadratic B-spline with implied on-curve points between off-curves
fn push_qcurve(path: &mut BezPath, offcurves: &[Point], end: Point) {
    if offcurves.is_empty() {
        path.line_to(end);
        return;
    }
    for (i, cp) in offcurves.iter().enumerate() {
        let seg_end = match offcurves.get(i + 1) {
            Some(next) => cp.midpoint(*next),
            None => end,
        };
        path.quad_to(*cp, seg_end);
    }
}

/// Convert a closed `BezPath` (one subpath) into a UFO contour
///
/// Quadratic segments are written as `qcurve` points, cubics as `curve`
/// points. The closing segment's end point is emitted first, carrying the
/// closing segment's type.
pub fn bezpath_to_contour(path: &BezPath) -> Contour {
    let mut points: Vec<ContourPoint> = Vec::new();
    let segments: Vec<PathSeg> = path.segments().collect();

    for seg in &segments {
        match seg {
            PathSeg::Line(line) => points.push(on_curve(line.p1, PointType::Line)),
            PathSeg::Quad(quad) => {
                points.push(off_curve(quad.p1));
                points.push(on_curve(quad.p2, PointType::QCurve));
            }
            PathSeg::Cubic(cubic) => {
                points.push(off_curve(cubic.p1));
                points.push(off_curve(cubic.p2));
                points.push(on_curve(cubic.p3, PointType::Curve));
            }
        }
    }

    // The last segment ends where the contour starts; move that on-curve to
    // the front so the contour wraps the way UFO expects.
    if let Some(last) = points.pop() {
        points.insert(0, last);
    }

    Contour::new(points, None)
}

fn on_curve(pt: Point, typ: PointType) -> ContourPoint {
    ContourPoint::new(pt.x, pt.y, typ, false, None, None)
}

fn off_curve(pt: Point) -> ContourPoint {
    ContourPoint::new(pt.x, pt.y, PointType::OffCurve, false, None, None)
}

/// Convert every contour of a glyph
pub fn contours_to_bezpaths(contours: &[Contour]) -> Vec<BezPath> {
    contours
        .iter()
        .map(contour_to_bezpath)
        .filter(|path| path.elements().len() > 1)
        .collect()
}

/// Convert closed paths back into glyph contours
pub fn bezpaths_to_contours(paths: &[BezPath]) -> Vec<Contour> {
    paths.iter().map(bezpath_to_contour).collect()
}

/// Split a path with several subpaths into one closed `BezPath` per subpath
///
/// Open subpaths are closed, since filled outlines close implicitly. Subpaths
/// that never draw anything are dropped.
pub fn split_subpaths(path: &BezPath) -> Vec<BezPath> {
    let mut result = Vec::new();
    let mut current = BezPath::new();

    let mut flush = |current: &mut BezPath| {
        let drawn = current.elements().len() > 1;
        let mut done = std::mem::take(current);
        if drawn {
            if !matches!(done.elements().last(), Some(PathEl::ClosePath)) {
                done.close_path();
            }
            result.push(done);
        }
    };

    for el in path.elements() {
        match el {
            PathEl::MoveTo(p) => {
                flush(&mut current);
                current.move_to(*p);
            }
            PathEl::ClosePath => {
                current.close_path();
                flush(&mut current);
            }
            other => {
                if current.elements().is_empty() {
                    // Drawing without a MoveTo continues from the origin.
                    current.move_to(Point::ORIGIN);
                }
                current.push(*other);
            }
        }
    }
    flush(&mut current);

    result
}

/// Build a closed `BezPath` from a chain of segments
///
/// A final line back to the start point is left implicit in the close.
pub fn bezpath_from_segments(segments: &[PathSeg]) -> BezPath {
    let mut path = BezPath::new();
    let Some(first) = segments.first() else {
        return path;
    };
    path.move_to(first.start());

    let start = first.start();
    let last_index = segments.len() - 1;
    for (i, seg) in segments.iter().enumerate() {
        match seg {
            PathSeg::Line(line) => {
                if i == last_index && line.p1 == start && i > 0 {
                    continue;
                }
                path.line_to(line.p1);
            }
            PathSeg::Quad(quad) => path.quad_to(quad.p1, quad.p2),
            PathSeg::Cubic(cubic) => path.curve_to(cubic.p1, cubic.p2, cubic.p3),
        }
    }
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));
        path.line_to((100.0, 100.0));
        path.line_to((0.0, 100.0));
        path.close_path();
        path
    }

    #[test]
    fn test_square_contour_points() {
        let contour = bezpath_to_contour(&square());
        // Three explicit lines plus the implicit closing line
        assert_eq!(contour.points.len(), 4);
        assert!(contour.points.iter().all(|p| p.typ == PointType::Line));
        assert_eq!((contour.points[0].x, contour.points[0].y), (0.0, 0.0));
    }

    #[test]
    fn test_curve_wraps_to_first_point() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));
        path.curve_to((100.0, 50.0), (50.0, 100.0), (0.0, 0.0));
        path.close_path();

        let contour = bezpath_to_contour(&path);
        assert_eq!(contour.points[0].typ, PointType::Curve);
        assert_eq!(contour.points.last().map(|p| p.typ), Some(PointType::OffCurve));

        let back = contour_to_bezpath(&contour);
        let segs: Vec<PathSeg> = back.segments().collect();
        assert_eq!(segs.len(), 2);
        assert!(matches!(segs[1], PathSeg::Cubic(_)));
    }

    #[test]
    fn test_qcurve_implied_points() {
        let points = vec![
            on_curve(Point::new(0.0, 0.0), PointType::Line),
            off_curve(Point::new(0.0, 100.0)),
            off_curve(Point::new(100.0, 100.0)),
            on_curve(Point::new(100.0, 0.0), PointType::QCurve),
        ];
        let path = contour_to_bezpath(&Contour::new(points, None));
        let segs: Vec<PathSeg> = path.segments().collect();
        // Two quads joined at the implied midpoint, then the closing line
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].end(), Point::new(50.0, 100.0));
    }

    #[test]
    fn test_split_subpaths_closes_open_ones() {
        let mut path = square();
        path.move_to((10.0, 10.0));
        path.line_to((20.0, 10.0));
        path.line_to((20.0, 20.0));
        path.move_to((50.0, 50.0));

        let parts = split_subpaths(&path);
        assert_eq!(parts.len(), 2);
        assert!(matches!(parts[1].elements().last(), Some(PathEl::ClosePath)));
    }

    #[test]
    fn test_segments_round_trip() {
        let segs: Vec<PathSeg> = square().segments().collect();
        let rebuilt = bezpath_from_segments(&segs);
        assert_eq!(rebuilt.elements(), square().elements());
    }
}
