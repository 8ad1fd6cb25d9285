//! Application runner logic
//!
//! Turns parsed CLI arguments into a batch run: settings, logging, workspace,
//! processing and the optional report.

use crate::batch::{self, BatchOptions, FailurePolicy, FileOrder, ProcessOptions};
use crate::core::cli::CliArgs;
use crate::core::config_file::{ConfigFile, Settings};
use crate::data::svg_import::ImportOptions;
use crate::data::workspace::FontWorkspace;
use crate::geometry::simplify::SimplifyOptions;
use crate::logging;
use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};

/// Run outlinefix with the given CLI arguments
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    // Bad paths are reported before logging, config or any file access
    cli_args.validate()?;
    let Some(icons) = cli_args.icons.as_deref() else {
        bail!("No icons folder given");
    };

    // Settings problems are logged once logging is up
    let (config, config_error) = match ConfigFile::load(cli_args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (None, Some(e)),
    };
    let settings = Settings::resolve(&cli_args, config);

    let logs_dir = settings.log_to_file.then(ConfigFile::logs_dir);
    let _log_guard = logging::init_logging(cli_args.log_level(), logs_dir.as_deref());
    match config_error {
        Some(e) => warn!("Using default settings: {:#}", e),
        None => debug!("Settings: {:?}", settings),
    }

    let mut workspace = FontWorkspace::new(
        settings.metrics,
        ImportOptions {
            outline_strokes: settings.outline_strokes,
            ..Default::default()
        },
    );

    let result = batch::process_directory(&mut workspace, icons, &batch_options(&settings));

    // An aborted run still leaves a report of what it did
    if let Some(path) = &cli_args.report {
        let report = match &result {
            Ok(report) => Some(report),
            Err(e) => e.partial_report(),
        };
        if let Some(report) = report {
            report
                .write_to(path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to {:?}", path);
        }
    }

    let report = result?;
    if report.has_failures() {
        bail!("{} of {} files failed", report.failed, report.files.len());
    }
    Ok(())
}

/// Batch settings for a run
pub fn batch_options(settings: &Settings) -> BatchOptions {
    BatchOptions {
        order: if settings.sort_files {
            FileOrder::Sorted
        } else {
            FileOrder::Listing
        },
        policy: if settings.keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        },
        process: ProcessOptions {
            codepoint: settings.glyph_codepoint,
            simplify: SimplifyOptions {
                tolerance: settings.simplify_tolerance,
            },
            dry_run: settings.dry_run,
        },
    }
}
