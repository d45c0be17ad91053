//! Core module - shared model, rendering, and file utilities

pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
pub mod util;
