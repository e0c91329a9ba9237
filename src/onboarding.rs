//! Onboarding form: validation, AI suggestions and seeding the first tree.

use serde::{Deserialize, Serialize};

use crate::ai::Collaborator;
use crate::course::{
    CourseData, DEFAULT_LANGUAGE, DesignSettings, IdGenerator, Lesson, Module, OnboardingData,
    TemplateSuggestion,
};
use crate::errors::OnboardingError;

/// Title of the single module created from a lesson list.
pub const FIRST_MODULE_TITLE: &str = "Módulo 1";

/// What the collaborator is asked for after the form is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionMode {
    /// Whole course skeletons to choose from.
    #[default]
    Templates,
    /// A flat list of starter lessons.
    Lessons,
}

impl std::fmt::Display for SuggestionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionMode::Templates => write!(f, "templates"),
            SuggestionMode::Lessons => write!(f, "lessons"),
        }
    }
}

impl std::str::FromStr for SuggestionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "templates" | "template" | "modelos" => Ok(SuggestionMode::Templates),
            "lessons" | "lesson" | "aulas" => Ok(SuggestionMode::Lessons),
            _ => anyhow::bail!("Invalid mode '{}'. Valid values: templates, lessons", s),
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum Suggestions {
    Templates(Vec<TemplateSuggestion>),
    Lessons(Vec<Lesson>),
}

/// Trim the topic and fill in a missing language.
pub fn validate(mut data: OnboardingData) -> Result<OnboardingData, OnboardingError> {
    let topic = data.topic.trim();
    if topic.is_empty() {
        return Err(OnboardingError::EmptyTopic);
    }
    data.topic = topic.to_string();
    if data.language.trim().is_empty() {
        data.language = DEFAULT_LANGUAGE.to_string();
    }
    Ok(data)
}

/// Validate the form and ask the collaborator for suggestions.
///
/// Only validation can fail; collaborator failures are replaced by fallbacks.
pub async fn submit(
    data: OnboardingData,
    mode: SuggestionMode,
    collaborator: &Collaborator,
) -> Result<(OnboardingData, Suggestions), OnboardingError> {
    let data = validate(data)?;
    tracing::info!(topic = %data.topic, %mode, "Requesting onboarding suggestions");

    let suggestions = match mode {
        SuggestionMode::Templates => Suggestions::Templates(collaborator.suggest_templates(&data).await),
        SuggestionMode::Lessons => Suggestions::Lessons(collaborator.suggest_lessons(&data).await),
    };
    Ok((data, suggestions))
}

fn seed(course: &mut CourseData, ids: &IdGenerator) {
    let replaced = course.ensure_unique_ids(ids);
    if replaced > 0 {
        tracing::debug!(replaced, "Re-keyed suggested ids");
    }
}

/// Build the first tree from a chosen template.
pub fn seed_from_template(
    onboarding: OnboardingData,
    template: TemplateSuggestion,
    design: DesignSettings,
    ids: &IdGenerator,
) -> CourseData {
    let mut course = CourseData::new(onboarding, design);
    course.modules = template.structure;
    seed(&mut course, ids);
    course
}

/// Build the first tree from a lesson list: one module holding every lesson.
pub fn seed_from_lessons(
    onboarding: OnboardingData,
    lessons: Vec<Lesson>,
    design: DesignSettings,
    ids: &IdGenerator,
) -> CourseData {
    let mut course = CourseData::new(onboarding, design);
    course.modules = vec![Module::new(ids.module_id(), FIRST_MODULE_TITLE).with_lessons(lessons)];
    seed(&mut course, ids);
    course
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{Audience, CourseFormat};
    use std::collections::HashSet;

    fn form(topic: &str) -> OnboardingData {
        OnboardingData::new(topic, Audience::Beginner, CourseFormat::Text)
    }

    #[test]
    fn test_validate_rejects_blank_topic() {
        assert_eq!(validate(form("   ")), Err(OnboardingError::EmptyTopic));
        assert_eq!(validate(form("")), Err(OnboardingError::EmptyTopic));
    }

    #[test]
    fn test_validate_trims_and_defaults_language() {
        let data = validate(form("  Excel Básico ").with_language("")).unwrap();
        assert_eq!(data.topic, "Excel Básico");
        assert_eq!(data.language, "pt-BR");
    }

    #[tokio::test]
    async fn test_submit_failure_yields_fallback_lessons() {
        let data = form("Excel Básico").with_language("pt-BR");
        let (_, suggestions) = submit(data, SuggestionMode::Lessons, &Collaborator::offline())
            .await
            .unwrap();
        let Suggestions::Lessons(lessons) = suggestions else {
            panic!("Expected lessons");
        };
        let titles: Vec<&str> = lessons.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Aula 1: Bem-vindo ao Curso",
                "Aula 2: Conceitos Fundamentais",
                "Aula 3: Tópico Avançado"
            ]
        );
        assert!(lessons.iter().all(|l| l.content.is_empty()));
    }

    #[tokio::test]
    async fn test_submit_failure_yields_fallback_template() {
        let (_, suggestions) = submit(form("Excel"), SuggestionMode::Templates, &Collaborator::offline())
            .await
            .unwrap();
        let Suggestions::Templates(templates) = suggestions else {
            panic!("Expected templates");
        };
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "Exemplo: Curso Rápido");
    }

    #[tokio::test]
    async fn test_submit_blank_topic_never_calls_out() {
        let err = submit(form(" "), SuggestionMode::Lessons, &Collaborator::offline())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Por favor, preencha o tema do curso.");
    }

    #[test]
    fn test_seed_from_lessons_single_module() {
        let ids = IdGenerator::starting_at(500);
        let course = seed_from_lessons(
            form("Excel"),
            crate::ai::fallback_lessons(),
            DesignSettings::default(),
            &ids,
        );
        assert_eq!(course.modules.len(), 1);
        assert_eq!(course.modules[0].title, "Módulo 1");
        assert_eq!(course.modules[0].id, "m500");
        assert_eq!(course.lesson_count(), 3);
    }

    #[test]
    fn test_seed_from_template_rekeys_colliding_ids() {
        let mut template = crate::ai::fallback_templates().remove(0);
        // Model replies often restart lesson numbering in every module
        template.structure[1].lessons[0].id = "l1".into();
        let ids = IdGenerator::starting_at(900);
        let course = seed_from_template(form("Excel"), template, DesignSettings::default(), &ids);

        let lesson_ids: Vec<&str> = course.lessons().map(|l| l.id.as_str()).collect();
        let unique: HashSet<&str> = lesson_ids.iter().copied().collect();
        assert_eq!(lesson_ids.len(), unique.len());
        assert_eq!(course.modules[0].lessons[0].id, "l1");
    }

    #[test]
    fn test_suggestion_mode_parsing() {
        assert_eq!("Lessons".parse::<SuggestionMode>().unwrap(), SuggestionMode::Lessons);
        assert_eq!("modelos".parse::<SuggestionMode>().unwrap(), SuggestionMode::Templates);
        assert!("both".parse::<SuggestionMode>().is_err());
        assert_eq!(SuggestionMode::default(), SuggestionMode::Templates);
    }
}
