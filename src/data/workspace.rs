//! Scratch font workspace
//!
//! A [`FontWorkspace`] owns a norad `Font` that carries the em metrics and
//! hosts one glyph at a time. [`GlyphSlot`] is that glyph: it mutably borrows
//! the workspace for as long as it lives, so two slots can never be live at
//! the same time.

use crate::core::errors::OutlineError;
use crate::data::conversions::{bezpaths_to_contours, contours_to_bezpaths};
use crate::data::metrics::FontMetrics;
use crate::data::svg_export::glyph_to_svg;
use crate::data::svg_import::{import_svg, ImportOptions};
use crate::geometry::direction::correct_direction;
use crate::geometry::rounding::round_contours;
use crate::geometry::simplify::{simplify_contours, SimplifyOptions};
use norad::Font;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, trace};

/// In-memory font used as a workspace for glyph outlines
pub struct FontWorkspace {
    font: Font,
    import_options: ImportOptions,
}

impl FontWorkspace {
    pub fn new(metrics: FontMetrics, import_options: ImportOptions) -> Self {
        let mut font = Font::new();
        font.font_info = metrics.to_norad_font_info();
        Self {
            font,
            import_options,
        }
    }

    pub fn metrics(&self) -> FontMetrics {
        FontMetrics::from_norad_font(&self.font)
    }

    pub fn import_options(&self) -> &ImportOptions {
        &self.import_options
    }

    /// Create the glyph slot for one icon
    pub fn create_glyph(
        &mut self,
        codepoint: char,
        name: &str,
    ) -> Result<GlyphSlot<'_>, OutlineError> {
        // Glyph::new panics on names a UFO can't hold
        name.parse::<norad::Name>()
            .map_err(|_| OutlineError::GlyphName {
                name: name.to_string(),
            })?;

        let mut glyph = norad::Glyph::new(name);
        glyph.codepoints.insert(codepoint);
        trace!("Created glyph '{}' (U+{:04X})", name, codepoint as u32);

        Ok(GlyphSlot {
            workspace: self,
            glyph,
        })
    }
}

/// The single live glyph of a [`FontWorkspace`]
pub struct GlyphSlot<'a> {
    workspace: &'a mut FontWorkspace,
    glyph: norad::Glyph,
}

impl GlyphSlot<'_> {
    pub fn name(&self) -> &str {
        self.glyph.name()
    }

    pub fn glyph(&self) -> &norad::Glyph {
        &self.glyph
    }

    /// Replace the glyph outline with the contents of an SVG file
    pub fn import_outlines(&mut self, path: &Path) -> Result<(), OutlineError> {
        let data = fs::read(path).map_err(|source| OutlineError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let metrics = self.workspace.metrics();
        let outline = import_svg(&data, &metrics, self.workspace.import_options()).map_err(
            |source| OutlineError::Parse {
                path: path.to_path_buf(),
                source,
            },
        )?;

        // Exporting nothing would erase the artwork
        if outline.contours.is_empty() && outline.skipped_paths > 0 {
            return Err(OutlineError::NothingImported {
                path: path.to_path_buf(),
                skipped: outline.skipped_paths,
            });
        }

        self.glyph.contours = bezpaths_to_contours(&outline.contours);
        self.glyph.width = outline.advance_width;
        debug!(
            "Glyph '{}': imported {} contours",
            self.name(),
            self.glyph.contours.len()
        );
        Ok(())
    }

    /// Round every point to the integer grid
    pub fn round(&mut self) {
        round_contours(&mut self.glyph.contours);
        self.glyph.width = self.glyph.width.round();
    }

    /// Run one simplification pass
    pub fn simplify(&mut self, options: &SimplifyOptions) {
        let before = self.point_count();
        let paths = contours_to_bezpaths(&self.glyph.contours);
        self.glyph.contours = bezpaths_to_contours(&simplify_contours(&paths, options));
        trace!(
            "Glyph '{}': simplified {} → {} points",
            self.name(),
            before,
            self.point_count()
        );
    }

    /// Orient contours for the nonzero fill rule
    ///
    /// Returns the number of contours that were reversed.
    pub fn correct_direction(&mut self) -> usize {
        let mut paths = contours_to_bezpaths(&self.glyph.contours);
        let reversed = correct_direction(&mut paths);
        self.glyph.contours = bezpaths_to_contours(&paths);
        reversed
    }

    /// Write the glyph outline as SVG to `path`
    ///
    /// The document is written to a temporary file next to `path` and then
    /// renamed over it, so `path` is never left half written.
    pub fn export(&self, path: &Path) -> Result<(), OutlineError> {
        let svg = glyph_to_svg(&self.glyph, &self.workspace.metrics());
        let write_error = |source| OutlineError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
        file.write_all(svg.as_bytes()).map_err(write_error)?;
        file.persist(path).map_err(|e| write_error(e.error))?;
        Ok(())
    }

    pub fn contour_count(&self) -> usize {
        self.glyph.contours.len()
    }

    pub fn point_count(&self) -> usize {
        self.glyph.contours.iter().map(|c| c.points.len()).sum()
    }

    /// Discard the glyph, freeing the workspace for the next one
    pub fn clear(self) {
        trace!("Cleared glyph '{}'", self.glyph.name());
    }
}
