//! Batch processing of an icons folder
//!
//! Every regular file directly inside the folder goes through the same fixed
//! sequence: create glyph, import, round, simplify twice, correct direction,
//! export over the original, clear.

pub mod report;

use crate::core::cli::validate_icons_dir;
use crate::core::errors::{BatchError, OutlineError};
use crate::data::workspace::FontWorkspace;
use crate::geometry::simplify::SimplifyOptions;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

pub use report::{BatchReport, FileOutcome, FileStatus};

/// Order in which the files of a folder are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileOrder {
    /// Whatever order the filesystem lists them in
    #[default]
    Listing,
    /// Sorted by file name
    Sorted,
}

/// What to do when a single file fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the run at the first failing file
    #[default]
    Abort,
    /// Record the failure and carry on with the next file
    Continue,
}

/// Per-file processing settings
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOptions {
    pub codepoint: char,
    pub simplify: SimplifyOptions,
    /// Normalize but skip the export
    pub dry_run: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            codepoint: '{',
            simplify: SimplifyOptions::default(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchOptions {
    pub order: FileOrder,
    pub policy: FailurePolicy,
    pub process: ProcessOptions,
}

/// List the regular files directly inside `dir`
///
/// Subdirectories are skipped, and so are symlinks that don't resolve to a
/// regular file.
pub fn list_icon_files(dir: &Path, order: FileOrder) -> Result<Vec<PathBuf>, BatchError> {
    let list_error = |source| BatchError::ListDirectory {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!("Skipping {:?}: not a regular file", path);
        }
    }

    if order == FileOrder::Sorted {
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }
    Ok(files)
}

/// Run the full normalization sequence on one file
pub fn process_file(
    workspace: &mut FontWorkspace,
    path: &Path,
    options: &ProcessOptions,
) -> Result<FileOutcome, OutlineError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut glyph = workspace.create_glyph(options.codepoint, &name)?;
    glyph.import_outlines(path)?;
    glyph.round();
    glyph.simplify(&options.simplify);
    glyph.simplify(&options.simplify);
    let reversed = glyph.correct_direction();

    if options.dry_run {
        debug!("Dry run: not writing {:?}", path);
    } else {
        glyph.export(path)?;
    }

    let outcome = FileOutcome {
        path: path.to_path_buf(),
        contours: glyph.contour_count(),
        points: glyph.point_count(),
        reversed,
        status: if options.dry_run {
            FileStatus::Checked
        } else {
            FileStatus::Written
        },
        error: None,
    };
    glyph.clear();

    Ok(outcome)
}

/// Normalize every icon in `dir`
///
/// The folder is validated before anything is read. With
/// [`FailurePolicy::Abort`] the first failing file ends the run with
/// [`BatchError::File`]; files already written stay written.
pub fn process_directory(
    workspace: &mut FontWorkspace,
    dir: &Path,
    options: &BatchOptions,
) -> Result<BatchReport, BatchError> {
    validate_icons_dir(dir)?;

    let files = list_icon_files(dir, options.order)?;
    info!("Processing {} files in {:?}", files.len(), dir);

    let mut report = BatchReport::new(dir);
    for path in files {
        match process_file(workspace, &path, &options.process) {
            Ok(outcome) => {
                debug!(
                    "{:?}: {} contours, {} reversed",
                    path, outcome.contours, outcome.reversed
                );
                report.push(outcome);
            }
            Err(source) => match options.policy {
                FailurePolicy::Abort => {
                    error!("Aborting: {}", source);
                    report.push(FileOutcome::failed(path.clone(), &source));
                    return Err(BatchError::File {
                        path,
                        source,
                        report: Box::new(report),
                    });
                }
                FailurePolicy::Continue => {
                    warn!("Skipping: {}", source);
                    report.push(FileOutcome::failed(path, &source));
                }
            },
        }
    }

    info!(
        "Done: {} written, {} checked, {} failed",
        report.written, report.checked, report.failed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::metrics::FontMetrics;
    use crate::data::svg_import::ImportOptions;
    use tempfile::TempDir;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M2 2 H22 V22 H2 Z"/></svg>"#;

    fn workspace() -> FontWorkspace {
        FontWorkspace::new(FontMetrics::default(), ImportOptions::default())
    }

    #[test]
    fn test_list_skips_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.svg"), SQUARE).unwrap();
        fs::write(dir.path().join("a.svg"), SQUARE).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.svg"), SQUARE).unwrap();

        let files = list_icon_files(dir.path(), FileOrder::Sorted).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.svg", "b.svg"]);
    }

    #[test]
    fn test_process_file_reports_reversals() {
        let dir = TempDir::new().unwrap();
        let icon = dir.path().join("square.svg");
        fs::write(&icon, SQUARE).unwrap();

        let mut ws = workspace();
        let outcome = process_file(&mut ws, &icon, &ProcessOptions::default()).unwrap();
        assert_eq!(outcome.contours, 1);
        // Flipping the y axis keeps the picture, so clockwise on screen is
        // already clockwise in glyph space
        assert_eq!(outcome.reversed, 0);
        assert_eq!(outcome.status, FileStatus::Written);

        let ccw = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M2 2 V22 H22 V2 Z"/></svg>"#;
        fs::write(&icon, ccw).unwrap();
        let outcome = process_file(&mut ws, &icon, &ProcessOptions::default()).unwrap();
        assert_eq!(outcome.reversed, 1);
    }

    #[test]
    fn test_abort_stops_at_first_failure() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.svg"), "not svg").unwrap();
        fs::write(dir.path().join("b.svg"), SQUARE).unwrap();

        let options = BatchOptions {
            order: FileOrder::Sorted,
            ..Default::default()
        };
        let result = process_directory(&mut workspace(), dir.path(), &options);
        assert!(matches!(
            result,
            Err(BatchError::File {
                source: OutlineError::Parse { .. },
                ..
            })
        ));
        // b.svg was never reached
        assert_eq!(fs::read_to_string(dir.path().join("b.svg")).unwrap(), SQUARE);
    }

    #[test]
    fn test_abort_keeps_partial_report() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.svg"), SQUARE).unwrap();
        fs::write(dir.path().join("b.svg"), "not svg").unwrap();
        fs::write(dir.path().join("c.svg"), SQUARE).unwrap();

        let options = BatchOptions {
            order: FileOrder::Sorted,
            ..Default::default()
        };
        let err = process_directory(&mut workspace(), dir.path(), &options).unwrap_err();
        let report = err.partial_report().unwrap();
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.written, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.files[1].status, FileStatus::Failed);
    }

    #[test]
    fn test_listing_order_follows_read_dir() {
        let dir = TempDir::new().unwrap();
        for name in ["m.svg", "z.svg", "a.svg", "k.svg"] {
            fs::write(dir.path().join(name), SQUARE).unwrap();
        }
        fs::create_dir(dir.path().join("sub")).unwrap();

        let listed: Vec<PathBuf> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.is_file())
            .collect();
        assert_eq!(list_icon_files(dir.path(), FileOrder::Listing).unwrap(), listed);

        let report =
            process_directory(&mut workspace(), dir.path(), &BatchOptions::default()).unwrap();
        let visited: Vec<PathBuf> = report.files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(visited, listed);
    }

    #[test]
    fn test_continue_records_failures() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.svg"), "not svg").unwrap();
        fs::write(dir.path().join("b.svg"), SQUARE).unwrap();

        let options = BatchOptions {
            order: FileOrder::Sorted,
            policy: FailurePolicy::Continue,
            ..Default::default()
        };
        let report = process_directory(&mut workspace(), dir.path(), &options).unwrap();
        assert_eq!(report.failed, 1);
        assert_eq!(report.written, 1);
        assert!(report.has_failures());
        assert_eq!(report.files[0].status, FileStatus::Failed);
        assert!(report.files[0].error.is_some());
    }

    #[test]
    fn test_missing_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = process_directory(
            &mut workspace(),
            &dir.path().join("missing"),
            &BatchOptions::default(),
        );
        assert!(matches!(result, Err(BatchError::InputPath(_))));
    }
}
