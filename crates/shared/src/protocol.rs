use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    domain::{Course, CourseId},
    error::CollectionFetchError,
};

const FIELD_ID: &str = "id";
const FIELD_TITLE: &str = "title";
const FIELD_UNIVERSITY: &str = "university";
const FIELD_CATEGORY: &str = "category";
const FIELD_DURATION: &str = "duration";
const FIELD_RECOMMENDATION_LEVEL: &str = "recommendationLevel";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum QuarantineReason {
    NotAnObject,
    MissingField { field: String },
    WrongType { field: String, expected: String },
    DuplicateId { id: CourseId },
}

impl std::fmt::Display for QuarantineReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "entry is not a JSON object"),
            Self::MissingField { field } => write!(f, "missing field `{field}`"),
            Self::WrongType { field, expected } => {
                write!(f, "field `{field}` is not {expected}")
            }
            Self::DuplicateId { id } => write!(f, "duplicate id {id}"),
        }
    }
}

/// A wire entry that was rejected during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarantinedRecord {
    /// Position of the entry in the response array.
    pub index: usize,
    pub reason: QuarantineReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub courses: Vec<Course>,
    pub quarantined: Vec<QuarantinedRecord>,
}

impl IngestReport {
    pub fn accepted(courses: Vec<Course>) -> Self {
        Self {
            courses,
            quarantined: Vec::new(),
        }
    }
}

/// Parses a response body into validated course records.
///
/// A top level that is not a JSON array fails the whole fetch. Individual
/// entries that do not fit the course shape are quarantined; the rest keep
/// their original order.
pub fn ingest_collection(body: &[u8]) -> Result<IngestReport, CollectionFetchError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| CollectionFetchError::malformed_body(format!("invalid JSON: {err}")))?;
    let Value::Array(entries) = value else {
        return Err(CollectionFetchError::malformed_body(
            "expected a JSON array of course records",
        ));
    };

    let mut report = IngestReport::default();
    let mut seen = HashSet::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match coerce_course(entry) {
            Ok(course) if !seen.insert(course.id) => {
                report.quarantined.push(QuarantinedRecord {
                    index,
                    reason: QuarantineReason::DuplicateId { id: course.id },
                });
            }
            Ok(course) => report.courses.push(course),
            Err(reason) => report.quarantined.push(QuarantinedRecord { index, reason }),
        }
    }
    Ok(report)
}

fn coerce_course(entry: Value) -> Result<Course, QuarantineReason> {
    let Value::Object(fields) = entry else {
        return Err(QuarantineReason::NotAnObject);
    };

    Ok(Course {
        id: coerce_id(&fields)?,
        title: required_string(&fields, FIELD_TITLE)?,
        university: required_string(&fields, FIELD_UNIVERSITY)?,
        category: required_string(&fields, FIELD_CATEGORY)?,
        duration: required_string(&fields, FIELD_DURATION)?,
        recommendation_level: optional_string(&fields, FIELD_RECOMMENDATION_LEVEL)?,
    })
}

fn coerce_id(fields: &Map<String, Value>) -> Result<CourseId, QuarantineReason> {
    let wrong_type = || QuarantineReason::WrongType {
        field: FIELD_ID.to_string(),
        expected: "an integer".to_string(),
    };
    match fields.get(FIELD_ID) {
        None | Some(Value::Null) => Err(QuarantineReason::MissingField {
            field: FIELD_ID.to_string(),
        }),
        Some(Value::Number(n)) => n.as_i64().map(CourseId).ok_or_else(wrong_type),
        Some(Value::String(s)) => s.trim().parse::<i64>().map(CourseId).map_err(|_| wrong_type()),
        Some(_) => Err(wrong_type()),
    }
}

fn required_string(fields: &Map<String, Value>, field: &str) -> Result<String, QuarantineReason> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(QuarantineReason::MissingField {
            field: field.to_string(),
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(QuarantineReason::WrongType {
            field: field.to_string(),
            expected: "a string".to_string(),
        }),
    }
}

fn optional_string(
    fields: &Map<String, Value>,
    field: &str,
) -> Result<Option<String>, QuarantineReason> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(_) => Err(QuarantineReason::WrongType {
            field: field.to_string(),
            expected: "a string".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchFailureKind;

    #[test]
    fn accepts_earlier_variant_without_recommendation_level() {
        let body = br#"[
            {"id": 1, "title": "Data Science", "university": "MIT", "category": "Tech", "duration": "4 years"},
            {"id": 2, "title": "Law", "university": "Oxford", "category": "Humanities", "duration": "3 years"}
        ]"#;
        let report = ingest_collection(body).expect("ingest");
        assert!(report.quarantined.is_empty());
        assert_eq!(report.courses.len(), 2);
        assert_eq!(report.courses[0].title, "Data Science");
        assert_eq!(report.courses[1].id, CourseId(2));
        assert_eq!(report.courses[1].recommendation_level, None);
    }

    #[test]
    fn keeps_recommendation_level_from_later_variant() {
        let body = br#"[{"id": 7, "title": "Nursing", "university": "UCL", "category": "Health",
            "duration": "3 years", "recommendationLevel": " Highly Recommended "}]"#;
        let report = ingest_collection(body).expect("ingest");
        assert_eq!(
            report.courses[0].recommendation_level.as_deref(),
            Some("Highly Recommended")
        );
    }

    #[test]
    fn blank_or_null_recommendation_level_is_absent() {
        let body = br#"[
            {"id": 1, "title": "A", "university": "U", "category": "C", "duration": "D", "recommendationLevel": null},
            {"id": 2, "title": "B", "university": "U", "category": "C", "duration": "D", "recommendationLevel": "   "}
        ]"#;
        let report = ingest_collection(body).expect("ingest");
        assert!(report
            .courses
            .iter()
            .all(|course| course.recommendation_level.is_none()));
    }

    #[test]
    fn coerces_string_ids() {
        let body = br#"[{"id": "42", "title": "A", "university": "U", "category": "C", "duration": "D"}]"#;
        let report = ingest_collection(body).expect("ingest");
        assert_eq!(report.courses[0].id, CourseId(42));
    }

    #[test]
    fn quarantines_malformed_entries_and_keeps_the_rest_in_order() {
        let body = br#"[
            {"id": 1, "title": "First", "university": "U", "category": "C", "duration": "D"},
            "not a record",
            {"id": 3, "university": "U", "category": "C", "duration": "D"},
            {"id": 4, "title": 12, "university": "U", "category": "C", "duration": "D"},
            {"id": 5.5, "title": "Float", "university": "U", "category": "C", "duration": "D"},
            {"id": 1, "title": "Dup", "university": "U", "category": "C", "duration": "D"},
            {"id": 6, "title": "Last", "university": "U", "category": "C", "duration": "D", "recommendationLevel": 3}
        ]"#;
        let report = ingest_collection(body).expect("ingest");

        let titles: Vec<_> = report.courses.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["First"]);

        let reasons: Vec<_> = report
            .quarantined
            .iter()
            .map(|q| (q.index, q.reason.clone()))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (1, QuarantineReason::NotAnObject),
                (
                    2,
                    QuarantineReason::MissingField {
                        field: "title".into()
                    }
                ),
                (
                    3,
                    QuarantineReason::WrongType {
                        field: "title".into(),
                        expected: "a string".into()
                    }
                ),
                (
                    4,
                    QuarantineReason::WrongType {
                        field: "id".into(),
                        expected: "an integer".into()
                    }
                ),
                (5, QuarantineReason::DuplicateId { id: CourseId(1) }),
                (
                    6,
                    QuarantineReason::WrongType {
                        field: "recommendationLevel".into(),
                        expected: "a string".into()
                    }
                ),
            ]
        );
    }

    #[test]
    fn non_array_body_fails_the_fetch() {
        let err = ingest_collection(br#"{"courses": []}"#).expect_err("must fail");
        assert_eq!(err.kind, FetchFailureKind::MalformedBody);

        let err = ingest_collection(b"<html>").expect_err("must fail");
        assert_eq!(err.kind, FetchFailureKind::MalformedBody);
    }

    #[test]
    fn course_serializes_with_wire_field_names() {
        let course = Course::new(9, "T", "U", "C", "D").with_recommendation_level("Top");
        let json = serde_json::to_value(&course).expect("serialize");
        assert_eq!(json["id"], 9);
        assert_eq!(json["recommendationLevel"], "Top");
    }
}
