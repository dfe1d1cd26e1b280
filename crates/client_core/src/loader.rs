use std::sync::Arc;

use shared::{domain::Course, error::CollectionFetchError};
use tracing::{error, info, warn};

use crate::source::CourseSource;

/// Result of the one fetch a view performs when it mounts.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub courses: Arc<[Course]>,
    pub quarantined: usize,
    pub failure: Option<CollectionFetchError>,
}

impl LoadOutcome {
    pub fn failed(err: CollectionFetchError) -> Self {
        Self {
            courses: Arc::from(Vec::new()),
            quarantined: 0,
            failure: Some(err),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Fetches the collection once. Failures are logged and turned into an
/// empty outcome; they never propagate to the caller.
pub async fn load_collection(source: &dyn CourseSource) -> LoadOutcome {
    match source.fetch_collection().await {
        Ok(report) => {
            for record in &report.quarantined {
                warn!(
                    index = record.index,
                    "quarantined course entry: {}", record.reason
                );
            }
            info!(
                courses = report.courses.len(),
                quarantined = report.quarantined.len(),
                "course collection loaded"
            );
            LoadOutcome {
                quarantined: report.quarantined.len(),
                courses: Arc::from(report.courses),
                failure: None,
            }
        }
        Err(err) => {
            error!("error fetching courses: {err}");
            LoadOutcome::failed(err)
        }
    }
}
