//! Contour direction correction
//!
//! Font compilers fill outlines with the nonzero rule, while icon artwork is
//! often drawn with evenodd in mind. Giving every contour a direction that
//! depends on how deeply it is nested makes both rules agree: outermost
//! contours run clockwise (in y-up glyph space), the contours directly inside
//! them counter-clockwise, and so on.

use crate::data::conversions::bezpath_from_segments;
use kurbo::{BezPath, ParamCurve, PathSeg, Point, Shape};
use tracing::trace;

/// Reorient every contour by nesting depth
///
/// Returns how many contours were reversed.
pub fn correct_direction(contours: &mut [BezPath]) -> usize {
    let depths: Vec<usize> = (0..contours.len())
        .map(|index| nesting_depth(contours, index))
        .collect();

    let mut reversed = 0;
    for (contour, depth) in contours.iter_mut().zip(depths) {
        if contour.area() == 0.0 {
            continue;
        }
        let want_clockwise = depth % 2 == 0;
        if is_clockwise(contour) != want_clockwise {
            trace!("Reversing contour at depth {depth}");
            *contour = reverse_contour(contour);
            reversed += 1;
        }
    }
    reversed
}

/// Number of other contours that fully enclose `contours[index]`
///
/// Contours that only overlap are not nested: they are drawn in the same
/// direction and fill as a union.
pub fn nesting_depth(contours: &[BezPath], index: usize) -> usize {
    let samples = midpoints(&contours[index]);
    if samples.is_empty() {
        return 0;
    }
    let area = contours[index].area().abs();
    contours
        .iter()
        .enumerate()
        .filter(|(other, _)| *other != index)
        .filter(|(_, contour)| contour.area().abs() > area)
        .filter(|(_, contour)| samples.iter().all(|pt| contour.winding(*pt) != 0))
        .count()
}

/// Points on the contour used for containment tests
///
/// Segment midpoints are less likely than corners to coincide with a
/// neighboring contour.
fn midpoints(contour: &BezPath) -> Vec<Point> {
    contour.segments().map(|seg| seg.eval(0.5)).collect()
}

/// Reverse the direction of a closed contour, keeping its start point
pub fn reverse_contour(contour: &BezPath) -> BezPath {
    let segments: Vec<PathSeg> = contour.segments().collect();
    let reversed: Vec<PathSeg> = segments.iter().rev().map(PathSeg::reverse).collect();
    bezpath_from_segments(&reversed)
}

/// Whether a contour runs clockwise in y-up glyph space
pub fn is_clockwise(contour: &BezPath) -> bool {
    contour.area() < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64, clockwise: bool) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((x0, y0));
        if clockwise {
            path.line_to((x0, y1));
            path.line_to((x1, y1));
            path.line_to((x1, y0));
        } else {
            path.line_to((x1, y0));
            path.line_to((x1, y1));
            path.line_to((x0, y1));
        }
        path.close_path();
        path
    }

    fn total_winding(contours: &[BezPath], pt: Point) -> i32 {
        contours.iter().map(|c| c.winding(pt)).sum()
    }

    #[test]
    fn test_outer_contour_becomes_clockwise() {
        let mut contours = vec![rect(0.0, 0.0, 100.0, 100.0, false)];
        assert_eq!(correct_direction(&mut contours), 1);
        assert!(is_clockwise(&contours[0]));
        // Already correct: nothing to do
        assert_eq!(correct_direction(&mut contours), 0);
    }

    #[test]
    fn test_evenodd_hole_survives_nonzero() {
        // Both contours drawn the same way: a hole only under evenodd
        let mut contours = vec![
            rect(0.0, 0.0, 100.0, 100.0, true),
            rect(25.0, 25.0, 75.0, 75.0, true),
        ];
        assert_ne!(total_winding(&contours, Point::new(50.0, 50.0)), 0);

        correct_direction(&mut contours);
        assert!(is_clockwise(&contours[0]));
        assert!(!is_clockwise(&contours[1]));
        assert_eq!(total_winding(&contours, Point::new(50.0, 50.0)), 0);
        assert_ne!(total_winding(&contours, Point::new(10.0, 10.0)), 0);
    }

    #[test]
    fn test_island_inside_hole_is_clockwise() {
        let mut contours = vec![
            rect(40.0, 40.0, 60.0, 60.0, false),
            rect(0.0, 0.0, 100.0, 100.0, false),
            rect(20.0, 20.0, 80.0, 80.0, false),
        ];
        correct_direction(&mut contours);
        assert_eq!(nesting_depth(&contours, 0), 2);
        assert!(is_clockwise(&contours[0]));
        assert!(is_clockwise(&contours[1]));
        assert!(!is_clockwise(&contours[2]));
        assert_ne!(total_winding(&contours, Point::new(50.0, 50.0)), 0);
        assert_eq!(total_winding(&contours, Point::new(30.0, 30.0)), 0);
    }

    #[test]
    fn test_overlapping_contours_fill_as_union() {
        // The bar's first segment midpoint (20, 60) lies inside the block,
        // but the bar sticks out above it
        let mut contours = vec![
            rect(0.0, 0.0, 100.0, 70.0, true),
            rect(20.0, 30.0, 80.0, 90.0, true),
        ];
        assert_ne!(contours[0].winding(Point::new(20.0, 60.0)), 0);

        assert_eq!(correct_direction(&mut contours), 0);
        assert_eq!(nesting_depth(&contours, 1), 0);
        assert_ne!(total_winding(&contours, Point::new(50.0, 50.0)), 0);
        assert_ne!(total_winding(&contours, Point::new(50.0, 80.0)), 0);
    }

    #[test]
    fn test_reverse_keeps_shape() {
        let contour = rect(0.0, 0.0, 10.0, 20.0, false);
        let reversed = reverse_contour(&contour);
        assert_eq!(reversed.area(), -contour.area());
        assert_eq!(reversed.segments().count(), contour.segments().count());
    }
}
