//! outlinefix
pub mod batch;
pub mod core;
pub mod data;
pub mod geometry;
pub mod logging;
