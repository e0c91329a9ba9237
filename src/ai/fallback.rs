//! Deterministic payloads used when the generative-text service fails.

use crate::course::{Lesson, LessonType, Module, TemplateSuggestion};

/// Shown in place of generated content when a plain completion fails.
pub const FALLBACK_TEXT: &str = "Desculpe, não foi possível gerar o conteúdo. Tente novamente.";

/// The three starter lessons, with empty content.
pub fn fallback_lessons() -> Vec<Lesson> {
    vec![
        Lesson::new("l1", "Aula 1: Bem-vindo ao Curso", LessonType::Video).with_duration("5 min"),
        Lesson::new("l2", "Aula 2: Conceitos Fundamentais", LessonType::Text)
            .with_duration("15 min"),
        Lesson::new("l3", "Aula 3: Tópico Avançado", LessonType::Video).with_duration("20 min"),
    ]
}

/// A single compact template built from [`fallback_lessons`].
pub fn fallback_templates() -> Vec<TemplateSuggestion> {
    let mut lessons = fallback_lessons().into_iter();
    let intro: Vec<Lesson> = lessons.by_ref().take(2).collect();
    let deep: Vec<Lesson> = lessons.collect();

    vec![TemplateSuggestion {
        name: "Exemplo: Curso Rápido".to_string(),
        description: "Um curso compacto com 3 módulos para aprendizado rápido.".to_string(),
        structure: vec![
            Module::new("m1", "Módulo 1: Introdução").with_lessons(intro),
            Module::new("m2", "Módulo 2: Aprofundamento").with_lessons(deep),
        ],
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_lessons_are_the_three_starters() {
        let lessons = fallback_lessons();
        let titles: Vec<&str> = lessons.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles.len(), 3);
        assert!(titles[0].starts_with("Aula 1"));
        assert!(titles[1].starts_with("Aula 2"));
        assert!(titles[2].starts_with("Aula 3"));
        assert!(lessons.iter().all(|l| l.content.is_empty()));
    }

    #[test]
    fn test_fallback_template_holds_the_same_lessons() {
        let templates = fallback_templates();
        assert_eq!(templates.len(), 1);
        let structure = &templates[0].structure;
        assert_eq!(structure.len(), 2);
        assert_eq!(structure[0].lessons.len(), 2);
        assert_eq!(structure[1].lessons.len(), 1);
        let flattened: Vec<Lesson> = structure.iter().flat_map(|m| m.lessons.clone()).collect();
        assert_eq!(flattened, fallback_lessons());
    }
}
