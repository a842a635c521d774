//! Reusable UI components for the main window.

pub mod path_row;

pub use path_row::PathRow;
