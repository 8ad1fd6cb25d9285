//! SVG outline import
//!
//! Parses an SVG document with usvg (which resolves shapes, `use` elements,
//! styles and transforms into plain paths) and turns its filled geometry into
//! glyph contours. The viewBox is mapped onto the em square: its height
//! becomes `units_per_em`, its top edge lands on the ascender and the y axis
//! is flipped so the outline is in y-up font space.

use crate::data::conversions::split_subpaths;
use crate::data::metrics::FontMetrics;
use kurbo::{Affine, BezPath};
use tracing::{debug, trace};
use usvg::tiny_skia_path::{self, PathSegment};

/// Import behavior switches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportOptions {
    /// Expand stroked paths into filled outlines; skipped otherwise
    pub outline_strokes: bool,
    /// Accuracy of the stroke expansion, in SVG user units
    pub stroke_tolerance: f64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            outline_strokes: true,
            stroke_tolerance: 0.01,
        }
    }
}

/// Outline data ready to go into a glyph
#[derive(Debug, Clone, Default)]
pub struct ImportedOutline {
    /// One closed path per contour, in font units
    pub contours: Vec<BezPath>,
    /// Advance width: the viewBox width in font units
    pub advance_width: f64,
    /// Painted paths that produced no contours (strokes left unexpanded)
    pub skipped_paths: usize,
}

/// Parse SVG bytes and convert them into glyph contours
pub fn import_svg(
    data: &[u8],
    metrics: &FontMetrics,
    options: &ImportOptions,
) -> Result<ImportedOutline, usvg::Error> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default())?;

    let view_box = tree.view_box().rect;
    let scale = metrics.units_per_em / f64::from(view_box.height());
    let to_glyph = Affine::new([
        scale,
        0.0,
        0.0,
        -scale,
        -f64::from(view_box.x()) * scale,
        metrics.ascender + f64::from(view_box.y()) * scale,
    ]);

    let mut contours = Vec::new();
    let skipped_paths = collect_group(tree.root(), options, &mut |mut path: BezPath| {
        path.apply_affine(to_glyph);
        contours.extend(split_subpaths(&path));
    });

    debug!(
        "Imported {} contours from a {}x{} viewBox ({} paths skipped)",
        contours.len(),
        view_box.width(),
        view_box.height(),
        skipped_paths
    );

    Ok(ImportedOutline {
        contours,
        advance_width: f64::from(view_box.width()) * scale,
        skipped_paths,
    })
}

/// Walk a group and hand every path (in viewBox space) to `sink`
///
/// Returns the number of painted paths that were skipped.
fn collect_group(
    group: &usvg::Group,
    options: &ImportOptions,
    sink: &mut dyn FnMut(BezPath),
) -> usize {
    let mut skipped = 0;
    for node in group.children() {
        match node {
            usvg::Node::Group(child) => skipped += collect_group(child, options, sink),
            usvg::Node::Path(path) => skipped += collect_path(path, options, sink),
            usvg::Node::Image(_) => trace!("Skipping image node '{}'", node.id()),
            usvg::Node::Text(_) => trace!("Skipping text node '{}'", node.id()),
        }
    }
    skipped
}

fn collect_path(
    path: &usvg::Path,
    options: &ImportOptions,
    sink: &mut dyn FnMut(BezPath),
) -> usize {
    if path.visibility() != usvg::Visibility::Visible {
        trace!("Skipping hidden path '{}'", path.id());
        return 0;
    }

    let transform = affine_from_transform(path.abs_transform());
    let local = bezpath_from_skia(path.data());

    if path.fill().is_some() {
        let mut filled = local.clone();
        filled.apply_affine(transform);
        sink(filled);
    }

    match path.stroke() {
        Some(stroke) if options.outline_strokes => {
            let mut outlined = outline_stroke(&local, stroke, options.stroke_tolerance);
            outlined.apply_affine(transform);
            sink(outlined);
            0
        }
        Some(_) if path.fill().is_none() => {
            debug!("Skipping stroke-only path '{}'", path.id());
            1
        }
        _ => 0,
    }
}

/// Expand a stroke into the outline it paints
fn outline_stroke(path: &BezPath, stroke: &usvg::Stroke, tolerance: f64) -> BezPath {
    let join = match stroke.linejoin() {
        usvg::LineJoin::Miter | usvg::LineJoin::MiterClip => kurbo::Join::Miter,
        usvg::LineJoin::Round => kurbo::Join::Round,
        usvg::LineJoin::Bevel => kurbo::Join::Bevel,
    };
    let cap = match stroke.linecap() {
        usvg::LineCap::Butt => kurbo::Cap::Butt,
        usvg::LineCap::Round => kurbo::Cap::Round,
        usvg::LineCap::Square => kurbo::Cap::Square,
    };
    let style = kurbo::Stroke::new(f64::from(stroke.width().get()))
        .with_join(join)
        .with_caps(cap)
        .with_miter_limit(f64::from(stroke.miterlimit().get()));

    kurbo::stroke(
        path.elements().iter().copied(),
        &style,
        &kurbo::StrokeOpts::default(),
        tolerance,
    )
}

fn affine_from_transform(ts: tiny_skia_path::Transform) -> Affine {
    Affine::new([
        f64::from(ts.sx),
        f64::from(ts.ky),
        f64::from(ts.kx),
        f64::from(ts.sy),
        f64::from(ts.tx),
        f64::from(ts.ty),
    ])
}

fn bezpath_from_skia(data: &tiny_skia_path::Path) -> BezPath {
    let pt = |p: tiny_skia_path::Point| kurbo::Point::new(f64::from(p.x), f64::from(p.y));

    let mut path = BezPath::new();
    for seg in data.segments() {
        match seg {
            PathSegment::MoveTo(p) => path.move_to(pt(p)),
            PathSegment::LineTo(p) => path.line_to(pt(p)),
            PathSegment::QuadTo(p1, p) => path.quad_to(pt(p1), pt(p)),
            PathSegment::CubicTo(p1, p2, p) => path.curve_to(pt(p1), pt(p2), pt(p)),
            PathSegment::Close => path.close_path(),
        }
    }
    path
}
