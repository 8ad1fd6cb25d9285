//! Glyph data: metrics, norad/kurbo conversions and SVG import and export

pub mod conversions;
pub mod metrics;
pub mod svg_export;
pub mod svg_import;
pub mod workspace;

pub use metrics::FontMetrics;
pub use workspace::{FontWorkspace, GlyphSlot};
