//! UI module for the main window.
//!
//! The window only collects paths and forwards button clicks as
//! [`WindowAction`](crate::app::WindowAction)s; all work happens in
//! [`AppState`](crate::app::AppState).

pub mod components;
pub mod main_window;
pub mod theme;

pub use main_window::MainWindow;
pub use theme::Theme;
