//! Command line interface for outlinefix
//!
//! Handles parsing command line arguments and validating the icons folder
//! before anything on disk is touched.

use crate::core::errors::InputPathError;
use clap::Parser;
use std::path::PathBuf;

/// outlinefix CLI arguments
///
/// Examples:
///   outlinefix icons/                    # Normalize every file in icons/
///   outlinefix icons/ --sort             # Process files in name order
///   outlinefix icons/ --keep-going       # Skip broken icons instead of aborting
///   outlinefix icons/ --dry-run -v       # Normalize without writing anything
///   outlinefix icons/ --report run.json  # Write a JSON summary of the run
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "outlinefix",
    version,
    about = "Normalize SVG icon outlines for font compilation",
    long_about = "outlinefix imports every SVG in a folder as a glyph outline, rounds it to the integer grid, simplifies it twice, corrects contour direction for the nonzero fill rule and writes the result back over the original file."
)]
pub struct CliArgs {
    /// Path to the icons folder
    #[clap(help = "path to the icons folder", required_unless_present = "new_config")]
    pub icons: Option<PathBuf>,

    /// Sort files by name before processing
    ///
    /// By default files are processed in directory listing order, which
    /// depends on the filesystem.
    #[clap(long = "sort", help = "Process files in file name order")]
    pub sort: bool,

    /// Keep processing after a file fails
    #[clap(
        long = "keep-going",
        help = "Record failing files and continue with the rest",
        long_help = "Record failing files and continue with the rest of the folder. The run still exits with a non-zero status if any file failed."
    )]
    pub keep_going: bool,

    /// Normalize outlines without writing them back
    #[clap(long = "dry-run", help = "Normalize outlines but do not overwrite any file")]
    pub dry_run: bool,

    /// Skip SVG strokes instead of expanding them into filled outlines
    #[clap(
        long = "no-outline-strokes",
        help = "Do not convert stroked paths into filled outlines",
        long_help = "By default stroked paths are converted into filled outlines during import, using the stroke width, line joins, line caps and miter limit from the SVG. With this flag strokes are skipped, and a file that only draws strokes fails instead of being overwritten with an empty outline."
    )]
    pub no_outline_strokes: bool,

    /// Write a JSON report of the run
    #[clap(long = "report", value_name = "PATH", help = "Write a JSON summary of the run")]
    pub report: Option<PathBuf>,

    /// Use a specific settings file
    #[clap(
        long = "config",
        value_name = "PATH",
        help = "Settings file to use instead of the user settings"
    )]
    pub config: Option<PathBuf>,

    /// Write a settings file with the default values and exit
    #[clap(
        long = "new-config",
        help = "Create the user settings file with default values",
        long_help = "Create ~/.config/outlinefix/settings.json populated with the default values, plus the logs directory, then exit."
    )]
    pub new_config: bool,

    /// Also log to a daily rolling file
    #[clap(long = "log-file", help = "Also write logs to ~/.config/outlinefix/logs")]
    pub log_file: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[clap(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CliArgs {
    /// Validate the icons path after parsing
    ///
    /// Both checks happen before any file is read, so an invalid path never
    /// leads to a partial run.
    pub fn validate(&self) -> Result<(), InputPathError> {
        match &self.icons {
            Some(path) => validate_icons_dir(path),
            None => Ok(()),
        }
    }

    /// Log level requested through -v and -q
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::WARN;
        }
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// Check that `path` exists and is a directory
pub fn validate_icons_dir(path: &std::path::Path) -> Result<(), InputPathError> {
    if !path.exists() {
        return Err(InputPathError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(InputPathError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_positional_icons() {
        let args = CliArgs::try_parse_from(["outlinefix", "icons", "--sort"]).unwrap();
        assert_eq!(args.icons, Some(PathBuf::from("icons")));
        assert!(args.sort);
        assert!(!args.keep_going);
        assert!(!args.no_outline_strokes);

        let args = CliArgs::try_parse_from(["outlinefix", "icons", "--no-outline-strokes"]).unwrap();
        assert!(args.no_outline_strokes);
    }

    #[test]
    fn test_icons_required_without_new_config() {
        assert!(CliArgs::try_parse_from(["outlinefix"]).is_err());
        assert!(CliArgs::try_parse_from(["outlinefix", "--new-config"]).is_ok());
    }

    #[test]
    fn test_validate_missing_path() {
        let dir = TempDir::new().unwrap();
        let args = CliArgs {
            icons: Some(dir.path().join("nope")),
            ..Default::default()
        };
        assert!(matches!(args.validate(), Err(InputPathError::NotFound(_))));
    }

    #[test]
    fn test_validate_file_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.svg");
        std::fs::write(&file, "<svg/>").unwrap();
        let args = CliArgs {
            icons: Some(file),
            ..Default::default()
        };
        assert!(matches!(args.validate(), Err(InputPathError::NotADirectory(_))));
    }

    #[test]
    fn test_log_level_from_flags() {
        let args = CliArgs::try_parse_from(["outlinefix", "icons", "-vv"]).unwrap();
        assert_eq!(args.log_level(), tracing::Level::TRACE);
        let args = CliArgs::try_parse_from(["outlinefix", "icons", "-q"]).unwrap();
        assert_eq!(args.log_level(), tracing::Level::WARN);
    }
}
