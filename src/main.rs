//! Normalize a folder of SVG icons so they compile cleanly into a font.
//!
//! Each icon is rounded to the grid, simplified, and its contours turned to
//! agree with the nonzero fill rule, then written back over the original.

use outlinefix::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = core::run_app(cli_args) {
        core::platform::handle_error(error);
    }
}
