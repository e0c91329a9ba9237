//! Post-publish summary of a course.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

use crate::course::{CourseData, LessonType, language_label};

pub const SHARE_BASE_URL: &str = "https://face.courses/c/";

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Lowercase the topic and replace each whitespace run with a dash.
pub fn slugify(topic: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&topic.to_lowercase(), "-")
        .into_owned()
}

/// A published course, frozen.
#[derive(Debug, Clone)]
pub struct Dashboard {
    course: CourseData,
    published_at: DateTime<Utc>,
}

impl Dashboard {
    pub fn new(course: CourseData) -> Self {
        Self::published_at(course, Utc::now())
    }

    pub fn published_at(course: CourseData, published_at: DateTime<Utc>) -> Self {
        Self {
            course,
            published_at,
        }
    }

    pub fn course(&self) -> &CourseData {
        &self.course
    }

    pub fn publication_time(&self) -> DateTime<Utc> {
        self.published_at
    }

    pub fn slug(&self) -> String {
        slugify(&self.course.onboarding.topic)
    }

    pub fn shareable_link(&self) -> String {
        format!("{}{}", SHARE_BASE_URL, self.slug())
    }

    pub fn module_count(&self) -> usize {
        self.course.modules.len()
    }

    pub fn lesson_count(&self) -> usize {
        self.course.lesson_count()
    }

    /// Lesson count per type, in declaration order, skipping absent types.
    pub fn type_breakdown(&self) -> Vec<(LessonType, usize)> {
        LessonType::ALL
            .iter()
            .map(|t| (*t, self.course.lessons().filter(|l| l.lesson_type == *t).count()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Sum of every parseable lesson duration.
    pub fn total_seconds(&self) -> u64 {
        self.course
            .lessons()
            .filter_map(|l| l.duration.as_ref()?.total_seconds())
            .sum()
    }

    pub fn outputs_ready(&self) -> usize {
        self.course
            .lessons()
            .filter(|l| l.final_outputs.as_ref().is_some_and(|o| !o.is_empty()))
            .count()
    }

    /// Plain-text summary printed after publishing.
    pub fn render(&self) -> String {
        let onboarding = &self.course.onboarding;
        let mut out = String::new();
        out.push_str(&format!("Curso publicado: {}\n", onboarding.topic));
        out.push_str(&format!(
            "Publicado em: {}\n",
            self.publication_time().format("%Y-%m-%d %H:%M UTC")
        ));
        out.push_str(&format!("Link: {}\n", self.shareable_link()));
        out.push_str(&format!(
            "Público: {} | Formato: {} | Idioma: {}\n",
            onboarding.audience.label(),
            onboarding.format.label(),
            language_label(&onboarding.language).unwrap_or(onboarding.language.as_str())
        ));
        out.push_str(&format!(
            "{} módulos, {} aulas, duração estimada {}\n",
            self.module_count(),
            self.lesson_count(),
            format_total(self.total_seconds())
        ));
        for (lesson_type, count) in self.type_breakdown() {
            out.push_str(&format!("  - {}: {}\n", lesson_type.label(), count));
        }
        out.push_str(&format!(
            "Saídas finais geradas: {}/{}\n",
            self.outputs_ready(),
            self.lesson_count()
        ));
        out
    }
}

fn format_total(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    match (hours, minutes, secs) {
        (0, 0, s) => format!("{}s", s),
        (0, m, 0) => format!("{} min", m),
        (0, m, s) => format!("{} min {}s", m, s),
        (h, m, _) => format!("{}h {} min", h, m),
    }
}
