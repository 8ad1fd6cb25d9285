//! Outline clean-up operations

pub mod direction;
pub mod rounding;
pub mod simplify;

// Re-export commonly used items
pub use direction::correct_direction;
pub use rounding::round_contours;
pub use simplify::{simplify_contours, SimplifyOptions};
