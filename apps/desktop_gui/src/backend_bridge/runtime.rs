//! Runtime bridge between the egui frame loop and the course directory view.

use std::sync::Arc;

use anyhow::Context;
use client_core::{config::parse_source_url, HttpCourseSource, Settings, ViewHandle, ViewOptions};
use tokio::runtime::Runtime;

/// Owns the worker thread the view actor, the fetch and the debounce timers
/// run on. Dropping it stops them.
pub struct BackendRuntime {
    runtime: Runtime,
}

impl BackendRuntime {
    pub fn launch() -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("course-finder-backend")
            .enable_all()
            .build()
            .context("failed to build backend runtime")?;
        Ok(Self { runtime })
    }

    pub fn mount_directory(&self, settings: &Settings) -> anyhow::Result<ViewHandle> {
        let url = parse_source_url(&settings.source_url)?;
        tracing::info!(source = %url, "mounting course directory");
        Ok(ViewHandle::mount_on(
            self.runtime.handle(),
            Arc::new(HttpCourseSource::new(url)),
            ViewOptions::from(settings),
        ))
    }
}
