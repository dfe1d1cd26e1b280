//! Where the course collection comes from.

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::CollectionFetchError,
    protocol::{ingest_collection, IngestReport},
};
use url::Url;

#[async_trait]
pub trait CourseSource: Send + Sync {
    async fn fetch_collection(&self) -> Result<IngestReport, CollectionFetchError>;
}

/// Reads the collection with one unauthenticated GET.
#[derive(Debug, Clone)]
pub struct HttpCourseSource {
    http: Client,
    url: Url,
}

impl HttpCourseSource {
    pub fn new(url: Url) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(http: Client, url: Url) -> Self {
        Self { http, url }
    }
}

#[async_trait]
impl CourseSource for HttpCourseSource {
    async fn fetch_collection(&self) -> Result<IngestReport, CollectionFetchError> {
        let res = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(|err| CollectionFetchError::transport(err.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(CollectionFetchError::status(status.as_u16()));
        }

        let body = res
            .bytes()
            .await
            .map_err(|err| CollectionFetchError::transport(err.to_string()))?;
        ingest_collection(&body)
    }
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
