use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_newtype!(CourseId);

/// One entry of the course directory, exactly as accepted at ingestion.
///
/// Records are never mutated after load; the view shares them behind an
/// `Arc<[Course]>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub university: String,
    pub category: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_level: Option<String>,
}

impl Course {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        university: impl Into<String>,
        category: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            id: CourseId(id),
            title: title.into(),
            university: university.into(),
            category: category.into(),
            duration: duration.into(),
            recommendation_level: None,
        }
    }

    pub fn with_recommendation_level(mut self, level: impl Into<String>) -> Self {
        self.recommendation_level = Some(level.into());
        self
    }
}
