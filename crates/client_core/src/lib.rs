//! Course directory component: loads the course collection once, filters it
//! as the user types and publishes snapshots for a front end to render.

pub mod config;
pub mod debounce;
pub mod loader;
pub mod render;
pub mod search;
pub mod source;
pub mod view;

pub use config::{load_settings, Settings, DEFAULT_COURSES_URL};
pub use loader::LoadOutcome;
pub use render::{CourseCard, MissingTierDisplay, RenderState};
pub use source::{CourseSource, HttpCourseSource};
pub use view::{ViewHandle, ViewOptions, ViewSnapshot};
