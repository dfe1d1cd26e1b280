//! Projection of a view snapshot into what a front end draws.

use std::{fmt::Write as _, str::FromStr};

use shared::domain::{Course, CourseId};
use thiserror::Error;

use crate::view::ViewSnapshot;

pub const LOADING_MESSAGE: &str = "Loading courses...";
pub const EMPTY_RESULT_MESSAGE: &str = "No courses found.";
pub const RECOMMENDATION_LABEL: &str = "Recommendation";

/// How a card shows a course that carries no recommendation tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingTierDisplay {
    /// Leave the recommendation line out.
    #[default]
    Hide,
    /// Keep the label with an empty value.
    Blank,
    /// Show "N/A".
    NotAvailable,
}

#[derive(Debug, Error)]
#[error("unknown missing tier display {0:?} (expected hide, blank or not_available)")]
pub struct ParseMissingTierDisplayError(String);

impl FromStr for MissingTierDisplay {
    type Err = ParseMissingTierDisplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "hide" | "hidden" => Ok(Self::Hide),
            "blank" | "empty" => Ok(Self::Blank),
            "not_available" | "n/a" | "na" => Ok(Self::NotAvailable),
            _ => Err(ParseMissingTierDisplayError(s.to_string())),
        }
    }
}

/// Mutually exclusive render states, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState<'a> {
    Loading,
    EmptyResult,
    Populated(&'a [Course]),
}

impl<'a> RenderState<'a> {
    pub fn from_snapshot(snapshot: &'a ViewSnapshot) -> Self {
        if snapshot.loading {
            Self::Loading
        } else if snapshot.visible.is_empty() {
            Self::EmptyResult
        } else {
            Self::Populated(&snapshot.visible)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCard {
    pub key: CourseId,
    pub title: String,
    pub lines: Vec<CardLine>,
}

impl CourseCard {
    pub fn from_course(course: &Course, missing_tier: MissingTierDisplay) -> Self {
        let mut lines = vec![
            CardLine {
                label: "University",
                value: course.university.clone(),
            },
            CardLine {
                label: "Category",
                value: course.category.clone(),
            },
            CardLine {
                label: "Duration",
                value: course.duration.clone(),
            },
        ];

        let tier = match (&course.recommendation_level, missing_tier) {
            (Some(level), _) => Some(level.clone()),
            (None, MissingTierDisplay::Hide) => None,
            (None, MissingTierDisplay::Blank) => Some(String::new()),
            (None, MissingTierDisplay::NotAvailable) => Some("N/A".to_string()),
        };
        if let Some(value) = tier {
            lines.push(CardLine {
                label: RECOMMENDATION_LABEL,
                value,
            });
        }

        Self {
            key: course.id,
            title: course.title.clone(),
            lines,
        }
    }
}

/// Plain-text rendering used by the terminal front end.
pub fn render_text(snapshot: &ViewSnapshot, missing_tier: MissingTierDisplay) -> String {
    let cards = match RenderState::from_snapshot(snapshot) {
        RenderState::Loading => return format!("{LOADING_MESSAGE}\n"),
        RenderState::EmptyResult => return format!("{EMPTY_RESULT_MESSAGE}\n"),
        RenderState::Populated(courses) => courses,
    };

    let mut out = String::new();
    for (i, course) in cards.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let card = CourseCard::from_course(course, missing_tier);
        let _ = writeln!(out, "{}", card.title);
        for line in &card.lines {
            let _ = writeln!(out, "  {}: {}", line.label, line.value);
        }
    }
    out
}
