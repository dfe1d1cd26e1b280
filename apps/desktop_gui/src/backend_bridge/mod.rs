//! Tokio side of the desktop app: the runtime the course directory view runs on.

pub mod runtime;
