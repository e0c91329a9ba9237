//! Final deliverables derived from a lesson.
//!
//! | Lesson type | Outputs                                             |
//! |-------------|-----------------------------------------------------|
//! | video ≤ 8 s | `prompt` (short visual prompt, generated)           |
//! | video       | `script` (the content itself)                       |
//! | animation   | `prompt` (directorial prompt, generated)            |
//! | text        | `image_prompt` (generated) + `html_content`         |
//! | audio       | none                                                |

use crate::ai::Collaborator;
use crate::course::{FinalOutputs, Lesson, LessonType};
use crate::prompts;

pub async fn generate_outputs(lesson: &Lesson, collaborator: &Collaborator) -> FinalOutputs {
    let mut outputs = FinalOutputs::default();

    match lesson.lesson_type {
        LessonType::Video if lesson.is_short_clip() => {
            let prompt = prompts::short_video_prompt(&lesson.content);
            outputs.prompt = Some(collaborator.generate_text(&prompt).await);
        }
        LessonType::Video => {
            outputs.script = Some(lesson.content.clone());
        }
        LessonType::Animation => {
            let prompt = prompts::animation_prompt(&lesson.content);
            outputs.prompt = Some(collaborator.generate_text(&prompt).await);
        }
        LessonType::Text => {
            let prompt = prompts::image_prompt(&lesson.content);
            outputs.image_prompt = Some(collaborator.generate_text(&prompt).await);
            outputs.html_content = Some(render_html(&lesson.content));
        }
        LessonType::Audio => {}
    }

    outputs
}

/// Escape the content and lay it out as paragraphs: a blank line starts a new
/// `<p>`, a single newline becomes `<br>`.
pub fn render_html(content: &str) -> String {
    let body = escape_html(content)
        .replace("\n\n", "</p><p>")
        .replace('\n', "<br>");
    format!("<p>{}</p>", body)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{FALLBACK_TEXT, TextGenerator};
    use crate::errors::AiError;
    use async_trait::async_trait;
    use serde_json::Value;

    struct Echo;

    #[async_trait]
    impl TextGenerator for Echo {
        async fn complete(&self, prompt: &str) -> Result<String, AiError> {
            Ok(format!("gerado: {}", prompt.len()))
        }

        async fn complete_structured(&self, _prompt: &str, _schema: &Value) -> Result<Value, AiError> {
            Ok(Value::Null)
        }
    }

    fn video(duration: &str) -> Lesson {
        Lesson::new("l1", "Clipe", LessonType::Video)
            .with_duration(duration)
            .with_content("Mostre a fórmula SOMA")
    }

    // =========================================
    // html rendering
    // =========================================

    #[test]
    fn test_render_html_paragraphs_and_breaks() {
        assert_eq!(
            render_html("Primeiro\nlinha dois\n\nSegundo"),
            "<p>Primeiro<br>linha dois</p><p>Segundo</p>"
        );
    }

    #[test]
    fn test_render_html_escapes_markup() {
        assert_eq!(
            render_html("<b>A & B</b> \"x\" 'y'"),
            "<p>&lt;b&gt;A &amp; B&lt;/b&gt; &quot;x&quot; &#39;y&#39;</p>"
        );
    }

    #[test]
    fn test_render_html_single_paragraph() {
        assert_eq!(render_html("só texto"), "<p>só texto</p>");
    }

    // =========================================
    // per-type branching
    // =========================================

    #[tokio::test]
    async fn test_short_video_produces_prompt_only() {
        let outputs = generate_outputs(&video("5s"), &Collaborator::new(Echo)).await;
        assert!(outputs.prompt.unwrap().starts_with("gerado"));
        assert!(outputs.script.is_none());
        assert!(outputs.image_prompt.is_none());
        assert!(outputs.html_content.is_none());
    }

    #[tokio::test]
    async fn test_long_video_produces_script_only() {
        let lesson = video("10 min");
        let outputs = generate_outputs(&lesson, &Collaborator::new(Echo)).await;
        assert_eq!(outputs.script.as_deref(), Some(lesson.content.as_str()));
        assert!(outputs.prompt.is_none());
    }

    #[tokio::test]
    async fn test_video_without_duration_is_scripted() {
        let mut lesson = video("");
        lesson.duration = None;
        let outputs = generate_outputs(&lesson, &Collaborator::new(Echo)).await;
        assert!(outputs.script.is_some());
        assert!(outputs.prompt.is_none());
    }

    #[tokio::test]
    async fn test_animation_always_prompt() {
        let lesson = Lesson::new("l1", "Anim", LessonType::Animation)
            .with_duration("5s")
            .with_content("cena");
        let outputs = generate_outputs(&lesson, &Collaborator::new(Echo)).await;
        assert!(outputs.prompt.is_some());
        assert!(outputs.script.is_none());
    }

    #[tokio::test]
    async fn test_text_produces_image_prompt_and_html() {
        let lesson = Lesson::new("l1", "Artigo", LessonType::Text).with_content("a\n\nb");
        let outputs = generate_outputs(&lesson, &Collaborator::offline()).await;
        assert_eq!(outputs.image_prompt.as_deref(), Some(FALLBACK_TEXT));
        assert_eq!(outputs.html_content.as_deref(), Some("<p>a</p><p>b</p>"));
        assert!(outputs.prompt.is_none());
        assert!(outputs.script.is_none());
    }

    #[tokio::test]
    async fn test_audio_has_no_outputs() {
        let lesson = Lesson::new("l1", "Podcast", LessonType::Audio).with_content("roteiro");
        let outputs = generate_outputs(&lesson, &Collaborator::new(Echo)).await;
        assert!(outputs.is_empty());
    }
}
