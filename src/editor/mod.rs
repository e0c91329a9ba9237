//! Per-lesson content editor.
//!
//! The editor works on its own copy of a lesson. Nothing reaches the course
//! tree until [`ContentEditor::save`] hands the lesson back to the builder,
//! which applies it as an `UpdateLesson` command. Closing without saving
//! simply drops the copy.

pub mod outputs;

use crate::ai::Collaborator;
use crate::course::{FinalOutputs, Lesson, LessonDuration, LessonType, PodcastSpeakers, VideoType};
use crate::errors::EditorError;
use crate::prompts;

/// AI rewrite applied to the current content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteAction {
    Expand,
    Condense,
    Revise,
}

impl RewriteAction {
    pub const ALL: [RewriteAction; 3] = [Self::Expand, Self::Condense, Self::Revise];

    pub fn label(&self) -> &'static str {
        match self {
            RewriteAction::Expand => "expandir",
            RewriteAction::Condense => "condensar",
            RewriteAction::Revise => "alterar",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            RewriteAction::Expand => {
                "expanda o conteúdo a seguir, adicionando mais detalhes, exemplos e profundidade."
            }
            RewriteAction::Condense => {
                "condense (resuma) o conteúdo a seguir, focando nos pontos-chave."
            }
            RewriteAction::Revise => {
                "altere (revise) o conteúdo a seguir para melhorar a clareza, o tom e o engajamento."
            }
        }
    }
}

impl std::str::FromStr for RewriteAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expandir" | "expand" => Ok(RewriteAction::Expand),
            "condensar" | "condense" => Ok(RewriteAction::Condense),
            "alterar" | "revise" => Ok(RewriteAction::Revise),
            _ => anyhow::bail!(
                "Invalid rewrite action '{}'. Valid values: expandir, condensar, alterar",
                s
            ),
        }
    }
}

/// Local copy of one lesson while it is being edited.
///
/// Generation methods take `&mut self`, so one editor never has two requests
/// in flight. Dropping a pending request leaves the lesson as it was.
pub struct ContentEditor {
    lesson: Lesson,
    course_topic: String,
}

impl ContentEditor {
    pub fn new(lesson: Lesson, course_topic: impl Into<String>) -> Self {
        Self {
            lesson,
            course_topic: course_topic.into(),
        }
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.lesson.title = title.into();
    }

    pub fn set_type(&mut self, lesson_type: LessonType) {
        self.lesson.set_type(lesson_type);
    }

    pub fn set_duration(&mut self, raw: &str) {
        self.lesson.duration = Some(LessonDuration::parse(raw));
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.lesson.content = content.into();
    }

    pub fn set_video_type(&mut self, video_type: VideoType) {
        self.lesson.set_video_type(video_type);
    }

    pub fn enable_podcast(&mut self, speakers: PodcastSpeakers) {
        self.lesson.enable_podcast(speakers);
    }

    pub fn disable_podcast(&mut self) {
        self.lesson.disable_podcast();
    }

    /// Expand, condense or revise the content. On service failure the
    /// content is replaced by the fallback message.
    pub async fn rewrite(&mut self, collaborator: &Collaborator, action: RewriteAction) -> &str {
        let prompt = prompts::rewrite_prompt(&self.course_topic, &self.lesson, action);
        self.lesson.content = collaborator.generate_text(&prompt).await;
        &self.lesson.content
    }

    /// Generate starting content from the title, type and presentation.
    pub async fn generate_draft(&mut self, collaborator: &Collaborator) -> &str {
        let prompt = prompts::draft_prompt(&self.course_topic, &self.lesson);
        self.lesson.content = collaborator.generate_text(&prompt).await;
        &self.lesson.content
    }

    /// Derive final outputs from the content. Requires non-empty content.
    pub async fn generate_outputs(
        &mut self,
        collaborator: &Collaborator,
    ) -> Result<&FinalOutputs, EditorError> {
        if self.lesson.content.is_empty() {
            return Err(EditorError::EmptyContent);
        }

        let generated = outputs::generate_outputs(&self.lesson, collaborator).await;
        Ok(self.lesson.final_outputs.insert(generated))
    }

    /// Finish editing and hand the lesson back for `UpdateLesson`.
    pub fn save(self) -> Lesson {
        self.lesson
    }
}
