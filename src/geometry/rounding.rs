//! Snap glyph outlines to the integer grid

use kurbo::Point;
use norad::Contour;

/// Round every point of every contour to the nearest integer
pub fn round_contours(contours: &mut [Contour]) {
    for contour in contours.iter_mut() {
        for point in contour.points.iter_mut() {
            point.x = point.x.round();
            point.y = point.y.round();
        }
    }
}

/// Whether a point already sits on the integer grid
pub fn is_on_grid(pt: Point) -> bool {
    pt.x.fract() == 0.0 && pt.y.fract() == 0.0
}
