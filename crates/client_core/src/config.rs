use std::{collections::HashMap, fs, time::Duration};

use anyhow::Context;
use tracing::warn;
use url::Url;

use crate::render::MissingTierDisplay;

pub const DEFAULT_COURSES_URL: &str =
    "https://raw.githubusercontent.com/Ritahchanger/university-courses/main/courses.json";
pub const DEFAULT_QUIET_PERIOD_MS: u64 = 300;
pub const SETTINGS_FILE_NAME: &str = "course_finder.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source_url: String,
    pub quiet_period_ms: u64,
    pub missing_tier_display: MissingTierDisplay,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_COURSES_URL.into(),
            quiet_period_ms: DEFAULT_QUIET_PERIOD_MS,
            missing_tier_display: MissingTierDisplay::default(),
        }
    }
}

impl Settings {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    pub fn source_url(&self) -> anyhow::Result<Url> {
        parse_source_url(&self.source_url)
    }
}

/// Defaults, then `course_finder.toml` in the working directory, then the
/// environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE_NAME) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());

    settings
}

pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!("ignoring unreadable {SETTINGS_FILE_NAME}: {err}");
            return;
        }
    };
    if let Some(v) = file_cfg.get("source_url") {
        settings.source_url = v.clone();
    }
    if let Some(v) = file_cfg.get("quiet_period_ms") {
        set_quiet_period(settings, v);
    }
    if let Some(v) = file_cfg.get("missing_tier_display") {
        set_missing_tier_display(settings, v);
    }
}

pub(crate) fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("COURSE_FINDER_SOURCE_URL") {
        settings.source_url = v;
    }
    if let Some(v) = lookup("APP__SOURCE_URL") {
        settings.source_url = v;
    }

    if let Some(v) = lookup("APP__QUIET_PERIOD_MS") {
        set_quiet_period(settings, &v);
    }

    if let Some(v) = lookup("APP__MISSING_TIER_DISPLAY") {
        set_missing_tier_display(settings, &v);
    }
}

fn set_quiet_period(settings: &mut Settings, raw: &str) {
    match raw.trim().parse::<u64>() {
        Ok(parsed) => settings.quiet_period_ms = parsed,
        Err(err) => warn!("ignoring quiet period override {raw:?}: {err}"),
    }
}

fn set_missing_tier_display(settings: &mut Settings, raw: &str) {
    match raw.parse::<MissingTierDisplay>() {
        Ok(parsed) => settings.missing_tier_display = parsed,
        Err(err) => warn!("ignoring missing tier display override: {err}"),
    }
}

pub fn parse_source_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid source url {raw:?}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => anyhow::bail!("unsupported source url scheme {other:?}"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
