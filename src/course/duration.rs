//! Typed lesson duration.
//!
//! Durations arrive as free text ("5s", "10 min", "1 hora") from the user or
//! from the generative-text service. The text is parsed once when the value is
//! built; the raw string is kept for display and serialization.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Longest clip, in seconds, that is rendered from a single visual prompt
/// instead of a full script.
pub const SHORT_CLIP_MAX_SECONDS: u32 = 8;

static DURATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*(\p{L}+)?").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
}

impl DurationUnit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_lowercase().as_str() {
            "s" | "sec" | "secs" | "seg" | "segs" | "segundo" | "segundos" | "second"
            | "seconds" => Some(DurationUnit::Seconds),
            "m" | "min" | "mins" | "minuto" | "minutos" | "minute" | "minutes" => {
                Some(DurationUnit::Minutes)
            }
            "h" | "hr" | "hrs" | "hora" | "horas" | "hour" | "hours" => Some(DurationUnit::Hours),
            _ => None,
        }
    }

    fn seconds(&self) -> u64 {
        match self {
            DurationUnit::Seconds => 1,
            DurationUnit::Minutes => 60,
            DurationUnit::Hours => 3600,
        }
    }
}

/// Magnitude plus unit, present when the raw text could be understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSpan {
    pub magnitude: u32,
    pub unit: DurationUnit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LessonDuration {
    raw: String,
    span: Option<DurationSpan>,
}

impl LessonDuration {
    pub fn parse(raw: &str) -> Self {
        let span = DURATION_REGEX.captures(raw).and_then(|caps| {
            let magnitude = caps.get(1)?.as_str().parse::<u32>().ok()?;
            let unit = DurationUnit::from_suffix(caps.get(2)?.as_str())?;
            Some(DurationSpan { magnitude, unit })
        });

        Self {
            raw: raw.to_string(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn span(&self) -> Option<DurationSpan> {
        self.span
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    pub fn total_seconds(&self) -> Option<u64> {
        self.span
            .map(|span| u64::from(span.magnitude) * span.unit.seconds())
    }

    /// A clip measured in seconds and no longer than [`SHORT_CLIP_MAX_SECONDS`].
    pub fn is_short_clip(&self) -> bool {
        matches!(
            self.span,
            Some(DurationSpan { magnitude, unit: DurationUnit::Seconds })
                if magnitude <= SHORT_CLIP_MAX_SECONDS
        )
    }
}

impl From<String> for LessonDuration {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<LessonDuration> for String {
    fn from(duration: LessonDuration) -> Self {
        duration.raw
    }
}

impl std::fmt::Display for LessonDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
