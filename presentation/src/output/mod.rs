//! Rendering of engine results for the terminal

pub mod console;
pub mod formatter;
