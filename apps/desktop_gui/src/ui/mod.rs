//! UI layer for the desktop app: app shell and the course card grid.

pub mod app;
pub mod cards;

pub use app::{CourseFinderApp, StartupConfig};
