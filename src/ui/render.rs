//! Text rendering of the course tree and lesson details.

use console::style;

use crate::builder::BuilderStep;
use crate::course::{CourseData, DesignSettings, Lesson, TemplateSuggestion};
use crate::ui::icons::{MODULE, lesson_icon};

/// Width used when wrapping content previews.
pub const WRAP_WIDTH: usize = 76;

const PREVIEW_CHARS: usize = 160;

/// First `PREVIEW_CHARS` characters of the content, wrapped and indented.
pub fn content_preview(content: &str, indent: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut preview: String = flat.chars().take(PREVIEW_CHARS).collect();
    if flat.chars().count() > PREVIEW_CHARS {
        preview.push('…');
    }
    let options = textwrap::Options::new(WRAP_WIDTH)
        .initial_indent(indent)
        .subsequent_indent(indent);
    textwrap::fill(&preview, options)
}

fn lesson_line(index: usize, lesson: &Lesson) -> String {
    let mut line = format!(
        "    {}. {}{} {}",
        index + 1,
        lesson_icon(lesson.lesson_type),
        lesson.title,
        style(format!("[{}]", lesson.id)).dim()
    );
    let duration = lesson.duration_label();
    if !duration.is_empty() {
        line.push_str(&format!(" {}", style(format!("({})", duration)).cyan()));
    }
    if lesson.final_outputs.as_ref().is_some_and(|o| !o.is_empty()) {
        line.push_str(&format!(" {}", style("✓ saídas").green()));
    }
    line
}

/// Module and lesson outline with ids, as shown in the builder.
pub fn render_tree(course: &CourseData) -> String {
    let mut out = String::new();
    if course.modules.is_empty() {
        out.push_str("  (nenhum módulo: use add-module)\n");
        return out;
    }
    for module in &course.modules {
        out.push_str(&format!(
            "  {}{} {}\n",
            MODULE,
            style(&module.title).bold(),
            style(format!("[{}]", module.id)).dim()
        ));
        if module.lessons.is_empty() {
            out.push_str(&format!("    {}\n", style("(sem aulas)").dim()));
        }
        for (index, lesson) in module.lessons.iter().enumerate() {
            out.push_str(&lesson_line(index, lesson));
            out.push('\n');
        }
    }
    out
}

/// Step header, e.g. "Passo 2 de 3: Design".
pub fn render_step(step: BuilderStep) -> String {
    let trail: Vec<String> = BuilderStep::ALL
        .iter()
        .map(|s| {
            if *s == step {
                style(s.label()).bold().underlined().to_string()
            } else {
                style(s.label()).dim().to_string()
            }
        })
        .collect();
    format!(
        "Passo {} de {}: {}\n{}",
        step.number(),
        BuilderStep::ALL.len(),
        step.label(),
        trail.join(" › ")
    )
}

pub fn render_design(design: &DesignSettings) -> String {
    let logo = if design.logo_url.is_empty() {
        "(sem logo)"
    } else {
        design.logo_url.as_str()
    };
    format!(
        "  Cor principal: {}\n  Fonte: {}\n  Logo: {}\n",
        design.primary_color, design.font, logo
    )
}

/// Full view of one lesson in the content editor.
pub fn render_lesson(lesson: &Lesson) -> String {
    let mut out = format!(
        "{}{} {}\n  Tipo: {}",
        lesson_icon(lesson.lesson_type),
        style(&lesson.title).bold(),
        style(format!("[{}]", lesson.id)).dim(),
        lesson.lesson_type.label()
    );
    let duration = lesson.duration_label();
    if !duration.is_empty() {
        out.push_str(&format!(" | Duração: {}", duration));
    }
    if lesson.is_dialogue() {
        out.push_str(" | Diálogo");
    }
    if let Some(speakers) = lesson.effective_podcast_speakers() {
        out.push_str(&format!(" | Podcast: {}", speakers.label()));
    }
    out.push('\n');

    if lesson.content.is_empty() {
        out.push_str(&format!("  {}\n", style("(sem conteúdo)").dim()));
    } else {
        out.push_str(&content_preview(&lesson.content, "  "));
        out.push('\n');
    }

    if let Some(outputs) = lesson.final_outputs.as_ref().filter(|o| !o.is_empty()) {
        out.push_str(&format!("  {}\n", style("Saídas finais:").underlined()));
        for (label, value) in [
            ("Prompt", &outputs.prompt),
            ("Roteiro", &outputs.script),
            ("Prompt de imagem", &outputs.image_prompt),
            ("HTML", &outputs.html_content),
        ] {
            if let Some(value) = value {
                out.push_str(&format!("  {}:\n", style(label).cyan()));
                out.push_str(&content_preview(value, "    "));
                out.push('\n');
            }
        }
    }
    out
}

/// Numbered list of templates for selection.
pub fn render_templates(templates: &[TemplateSuggestion]) -> String {
    let mut out = String::new();
    for (index, template) in templates.iter().enumerate() {
        let lessons: usize = template.structure.iter().map(|m| m.lessons.len()).sum();
        out.push_str(&format!(
            "{}. {} {}\n",
            index + 1,
            style(&template.name).bold(),
            style(format!("({} módulos, {} aulas)", template.structure.len(), lessons)).dim()
        ));
        if !template.description.is_empty() {
            out.push_str(&content_preview(&template.description, "   "));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{fallback_lessons, fallback_templates};
    use crate::course::{Audience, CourseFormat, FinalOutputs, LessonType, Module, OnboardingData};

    fn course() -> CourseData {
        let mut course = CourseData::new(
            OnboardingData::new("Excel", Audience::Beginner, CourseFormat::Video),
            DesignSettings::default(),
        );
        course.modules = vec![
            Module::new("m1", "Módulo 1").with_lessons(fallback_lessons()),
            Module::new("m2", "Vazio"),
        ];
        course
    }

    #[test]
    fn test_render_tree_lists_ids_and_durations() {
        let text = render_tree(&course());
        assert!(text.contains("Módulo 1"));
        assert!(text.contains("[m1]"));
        assert!(text.contains("1. "));
        assert!(text.contains("Aula 2: Conceitos Fundamentais"));
        assert!(text.contains("(15 min)"));
        assert!(text.contains("(sem aulas)"));
    }

    #[test]
    fn test_render_tree_empty() {
        let mut empty = course();
        empty.modules.clear();
        assert!(render_tree(&empty).contains("nenhum módulo"));
    }

    #[test]
    fn test_content_preview_truncates_and_wraps() {
        let long = "palavra ".repeat(60);
        let preview = content_preview(&long, "  ");
        assert!(preview.ends_with('…'));
        assert!(preview.lines().all(|l| l.chars().count() <= WRAP_WIDTH));
        assert!(preview.lines().all(|l| l.starts_with("  ")));
    }

    #[test]
    fn test_render_lesson_shows_outputs() {
        let mut lesson = Lesson::new("l1", "Artigo", LessonType::Text).with_content("corpo");
        lesson.final_outputs = Some(FinalOutputs {
            image_prompt: Some("uma planilha".into()),
            html_content: Some("<p>corpo</p>".into()),
            ..Default::default()
        });
        let text = render_lesson(&lesson);
        assert!(text.contains("Texto/Artigo"));
        assert!(text.contains("Prompt de imagem"));
        assert!(text.contains("<p>corpo</p>"));
        assert!(!text.contains("Roteiro"));
    }

    #[test]
    fn test_render_step_and_templates() {
        assert!(render_step(BuilderStep::Design).starts_with("Passo 2 de 3: Design"));
        let text = render_templates(&fallback_templates());
        assert!(text.contains("1. "));
        assert!(text.contains("Exemplo: Curso Rápido"));
        assert!(text.contains("2 módulos, 3 aulas"));
    }
}
