//! Outline simplification
//!
//! Reduces the number of points in a glyph outline without moving it by more
//! than a tolerance (in font units). Each pass:
//!
//! - raises quadratic segments to cubics
//! - turns cubics whose handles hug the chord into lines
//! - drops zero-length segments
//! - merges consecutive collinear lines
//! - merges consecutive cubics meeting at a smooth point when a single cubic
//!   reproduces both
//!
//! Merges are greedy. A merged segment is only kept if it stays within the
//! tolerance of every input segment it replaces, so one pass never moves the
//! outline by more than the tolerance. A second pass measures against the
//! output of the first and can still find work the first one left behind. When the input sits on the integer grid, the control
//! points of merged cubics are snapped back onto it.

use crate::data::conversions::bezpath_from_segments;
use crate::geometry::rounding::is_on_grid;
use kurbo::{BezPath, CubicBez, Line, ParamCurve, ParamCurveNearest, PathSeg, Point, Shape};

/// Default simplification tolerance in font units
pub const DEFAULT_TOLERANCE: f64 = 1.0;

const EPSILON: f64 = 1e-9;
const NEAREST_ACCURACY: f64 = 1e-6;
/// Points compared per replaced segment when validating a cubic merge
const MERGE_SAMPLES: usize = 8;
/// Largest sine of the angle between tangents that still counts as smooth
const SMOOTH_SIN: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplifyOptions {
    pub tolerance: f64,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Simplify every contour, dropping the ones that collapse
pub fn simplify_contours(contours: &[BezPath], options: &SimplifyOptions) -> Vec<BezPath> {
    contours
        .iter()
        .filter_map(|contour| simplify_contour(contour, options))
        .collect()
}

/// Simplify one closed contour
///
/// Returns `None` when nothing with an area is left.
pub fn simplify_contour(path: &BezPath, options: &SimplifyOptions) -> Option<BezPath> {
    let tolerance = options.tolerance;
    let segments: Vec<PathSeg> = path
        .segments()
        .map(raise_quad)
        .map(|seg| flatten_if_straight(seg, tolerance))
        .filter(|seg| !is_degenerate(seg))
        .collect();

    let merged = merge_segments(segments, tolerance);
    if merged.is_empty() {
        return None;
    }

    let result = bezpath_from_segments(&merged);
    let only_lines = merged.iter().all(|seg| matches!(seg, PathSeg::Line(_)));
    if only_lines && result.area().abs() < EPSILON {
        return None;
    }
    Some(result)
}

fn raise_quad(seg: PathSeg) -> PathSeg {
    match seg {
        PathSeg::Quad(quad) => PathSeg::Cubic(quad.raise()),
        other => other,
    }
}

/// Replace a cubic by its chord when both handles lie within `tolerance`
fn flatten_if_straight(seg: PathSeg, tolerance: f64) -> PathSeg {
    match seg {
        PathSeg::Cubic(cubic) => {
            let chord = Line::new(cubic.p0, cubic.p3);
            if distance_to(chord, cubic.p1) <= tolerance && distance_to(chord, cubic.p2) <= tolerance
            {
                PathSeg::Line(chord)
            } else {
                seg
            }
        }
        other => other,
    }
}

fn is_degenerate(seg: &PathSeg) -> bool {
    match seg {
        PathSeg::Line(line) => line.p0.distance(line.p1) < EPSILON,
        PathSeg::Quad(quad) => {
            quad.p0.distance(quad.p1) < EPSILON && quad.p0.distance(quad.p2) < EPSILON
        }
        PathSeg::Cubic(cubic) => {
            cubic.p0.distance(cubic.p1) < EPSILON
                && cubic.p0.distance(cubic.p2) < EPSILON
                && cubic.p0.distance(cubic.p3) < EPSILON
        }
    }
}

fn distance_to(line: Line, pt: Point) -> f64 {
    line.nearest(pt, EPSILON).distance_sq.sqrt()
}

/// A merged segment and the input segments it replaces
struct Run {
    seg: PathSeg,
    covers: Vec<PathSeg>,
}

impl Run {
    fn new(seg: PathSeg) -> Self {
        Self {
            seg,
            covers: vec![seg],
        }
    }
}

/// One greedy merge pass over a closed chain of segments
///
/// Every merged segment is checked against all the input segments it
/// replaces, so the pass never drifts more than `tolerance` from its input.
fn merge_segments(segments: Vec<PathSeg>, tolerance: f64) -> Vec<PathSeg> {
    let mut runs: Vec<Run> = Vec::with_capacity(segments.len());
    for seg in segments {
        if let Some(last) = runs.last_mut() {
            if let Some(merged) = merge_pair(last.seg, seg) {
                last.covers.push(seg);
                if fits(merged, &last.covers, tolerance) {
                    last.seg = merged;
                    continue;
                }
                last.covers.pop();
            }
        }
        runs.push(Run::new(seg));
    }

    // The join between the last and the first segment
    if runs.len() > 2 {
        let last = &runs[runs.len() - 1];
        if let Some(merged) = merge_pair(last.seg, runs[0].seg) {
            let covers: Vec<PathSeg> = last
                .covers
                .iter()
                .chain(&runs[0].covers)
                .copied()
                .collect();
            if fits(merged, &covers, tolerance) {
                runs[0] = Run {
                    seg: merged,
                    covers,
                };
                runs.pop();
            }
        }
    }
    runs.into_iter().map(|run| run.seg).collect()
}

/// Candidate replacing two consecutive segments, before validation
fn merge_pair(a: PathSeg, b: PathSeg) -> Option<PathSeg> {
    match (a, b) {
        (PathSeg::Line(a), PathSeg::Line(b)) => merge_lines(a, b).map(PathSeg::Line),
        (PathSeg::Cubic(a), PathSeg::Cubic(b)) => merge_cubics(a, b).map(PathSeg::Cubic),
        _ => None,
    }
}

/// Whether `candidate` stays within `tolerance` of the chain `covers`
fn fits(candidate: PathSeg, covers: &[PathSeg], tolerance: f64) -> bool {
    match candidate {
        // A polyline is farthest from its chord at a vertex
        PathSeg::Line(chord) => covers
            .iter()
            .all(|seg| distance_to(chord, seg.end()) <= tolerance),
        _ => curve_fits(candidate, covers, tolerance),
    }
}

/// Two-way sampled distance check between a curve and the chain it replaces
fn curve_fits(candidate: PathSeg, covers: &[PathSeg], tolerance: f64) -> bool {
    let tolerance_sq = tolerance * tolerance;
    let near = |seg: &PathSeg, pt: Point| {
        seg.nearest(pt, NEAREST_ACCURACY).distance_sq <= tolerance_sq
    };

    let covers_near_candidate = covers.iter().all(|seg| {
        (0..=MERGE_SAMPLES).all(|i| {
            let pt = seg.eval(i as f64 / MERGE_SAMPLES as f64);
            near(&candidate, pt)
        })
    });
    if !covers_near_candidate {
        return false;
    }

    let total = MERGE_SAMPLES * covers.len();
    (1..total).all(|i| {
        let pt = candidate.eval(i as f64 / total as f64);
        covers.iter().any(|seg| near(seg, pt))
    })
}

/// The combined chord, when the shared point lies between the two ends
fn merge_lines(a: Line, b: Line) -> Option<Line> {
    let chord = b.p1 - a.p0;
    let len_sq = chord.hypot2();
    if len_sq < EPSILON {
        return None;
    }
    let t = (a.p1 - a.p0).dot(chord) / len_sq;
    if t <= 0.0 || t >= 1.0 {
        return None;
    }
    Some(Line::new(a.p0, b.p1))
}

/// The cubic `a` and `b` would be the halves of, if they meet smoothly
///
/// If `a` and `b` came from splitting one cubic at `t`, then `t` is the ratio
/// of the incoming handle length to both handle lengths, and the original
/// handles can be recovered by scaling the outer handles by `1/t` and
/// `1/(1-t)`.
fn merge_cubics(a: CubicBez, b: CubicBez) -> Option<CubicBez> {
    let incoming = a.p3 - a.p2;
    let outgoing = b.p1 - b.p0;
    let len_in = incoming.hypot();
    let len_out = outgoing.hypot();
    if len_in < EPSILON || len_out < EPSILON {
        return None;
    }
    if incoming.dot(outgoing) <= 0.0
        || incoming.cross(outgoing).abs() > SMOOTH_SIN * len_in * len_out
    {
        return None;
    }

    let t = len_in / (len_in + len_out);
    let mut p1 = a.p0 + (a.p1 - a.p0) / t;
    let mut p2 = b.p3 + (b.p2 - b.p3) / (1.0 - t);

    let on_grid = [a.p0, a.p1, a.p2, a.p3, b.p1, b.p2, b.p3]
        .into_iter()
        .all(is_on_grid);
    if on_grid {
        p1 = p1.round();
        p2 = p2.round();
    }

    Some(CubicBez::new(a.p0, p1, p2, b.p3))
}
