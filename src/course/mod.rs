//! Course data model.
//!
//! This module holds the aggregate edited during a session:
//!
//! ```text
//! CourseData
//! ├── onboarding   # answers given before the builder opens
//! ├── design       # colour, font, logo
//! └── modules[]
//!     └── lessons[]
//!         └── final_outputs   # prompt / script / image prompt / html
//! ```
//!
//! Wire values follow the JSON exchanged with the generative-text service
//! (`iniciantes`, `texto`, `animacao`, camelCase keys), with English aliases
//! accepted on input.

pub mod duration;
pub mod ids;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub use duration::{DurationUnit, LessonDuration};
pub use ids::IdGenerator;

/// Languages offered by the onboarding form, as `(code, label)` pairs.
pub const LANGUAGE_OPTIONS: &[(&str, &str)] = &[
    ("pt-BR", "Português (Brasil)"),
    ("en-US", "Inglês (EUA)"),
    ("es-ES", "Espanhol (Espanha)"),
];

/// Default course language.
pub const DEFAULT_LANGUAGE: &str = "pt-BR";

/// Fonts offered by the design step.
pub const FONT_OPTIONS: &[&str] = &["Inter", "Roboto", "Lato"];

/// Human-readable label for a language code, if it is one of [`LANGUAGE_OPTIONS`].
pub fn language_label(code: &str) -> Option<&'static str> {
    LANGUAGE_OPTIONS
        .iter()
        .find(|(value, _)| *value == code)
        .map(|(_, label)| *label)
}

/// Target audience of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Audience {
    #[default]
    #[serde(rename = "iniciantes", alias = "beginner")]
    Beginner,
    #[serde(rename = "intermediarios", alias = "intermediate")]
    Intermediate,
    #[serde(rename = "avancados", alias = "advanced")]
    Advanced,
}

impl Audience {
    pub const ALL: [Audience; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn label(&self) -> &'static str {
        match self {
            Audience::Beginner => "Iniciantes",
            Audience::Intermediate => "Intermediários",
            Audience::Advanced => "Avançados",
        }
    }
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Audience::Beginner => write!(f, "iniciantes"),
            Audience::Intermediate => write!(f, "intermediarios"),
            Audience::Advanced => write!(f, "avancados"),
        }
    }
}

impl std::str::FromStr for Audience {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iniciantes" | "beginner" => Ok(Audience::Beginner),
            "intermediarios" | "intermediate" => Ok(Audience::Intermediate),
            "avancados" | "advanced" => Ok(Audience::Advanced),
            _ => anyhow::bail!(
                "Invalid audience '{}'. Valid values: iniciantes, intermediarios, avancados",
                s
            ),
        }
    }
}

/// Preferred delivery format chosen at onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CourseFormat {
    #[default]
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "texto", alias = "text")]
    Text,
    #[serde(rename = "animacao", alias = "animation")]
    Animation,
    #[serde(rename = "misto", alias = "mixed")]
    Mixed,
}

impl CourseFormat {
    pub const ALL: [CourseFormat; 4] = [Self::Video, Self::Text, Self::Animation, Self::Mixed];

    pub fn label(&self) -> &'static str {
        match self {
            CourseFormat::Video => "Vídeo",
            CourseFormat::Text => "Texto",
            CourseFormat::Animation => "Animação",
            CourseFormat::Mixed => "Misto",
        }
    }
}

impl std::fmt::Display for CourseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseFormat::Video => write!(f, "video"),
            CourseFormat::Text => write!(f, "texto"),
            CourseFormat::Animation => write!(f, "animacao"),
            CourseFormat::Mixed => write!(f, "misto"),
        }
    }
}

impl std::str::FromStr for CourseFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(CourseFormat::Video),
            "texto" | "text" => Ok(CourseFormat::Text),
            "animacao" | "animation" => Ok(CourseFormat::Animation),
            "misto" | "mixed" => Ok(CourseFormat::Mixed),
            _ => anyhow::bail!(
                "Invalid format '{}'. Valid values: video, texto, animacao, misto",
                s
            ),
        }
    }
}

/// Kind of a single lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LessonType {
    #[default]
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "texto", alias = "text")]
    Text,
    #[serde(rename = "animacao", alias = "animation")]
    Animation,
    #[serde(rename = "audio")]
    Audio,
}

impl LessonType {
    pub const ALL: [LessonType; 4] = [Self::Video, Self::Text, Self::Animation, Self::Audio];

    pub fn label(&self) -> &'static str {
        match self {
            LessonType::Video => "Vídeo",
            LessonType::Text => "Texto/Artigo",
            LessonType::Animation => "Animação/Infográfico",
            LessonType::Audio => "Podcast/Áudio",
        }
    }
}

impl std::fmt::Display for LessonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LessonType::Video => write!(f, "video"),
            LessonType::Text => write!(f, "texto"),
            LessonType::Animation => write!(f, "animacao"),
            LessonType::Audio => write!(f, "audio"),
        }
    }
}

impl std::str::FromStr for LessonType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(LessonType::Video),
            "texto" | "text" => Ok(LessonType::Text),
            "animacao" | "animation" => Ok(LessonType::Animation),
            "audio" => Ok(LessonType::Audio),
            _ => anyhow::bail!(
                "Invalid lesson type '{}'. Valid values: video, texto, animacao, audio",
                s
            ),
        }
    }
}

/// How a video or audio lesson is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoType {
    /// Single presenter.
    #[default]
    Narrative,
    /// Two people talking.
    Dialogue,
}

/// Voice pairing for a dialogue podcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PodcastSpeakers {
    TwoMen,
    TwoWomen,
    #[default]
    ManWoman,
}

impl PodcastSpeakers {
    pub const ALL: [PodcastSpeakers; 3] = [Self::ManWoman, Self::TwoMen, Self::TwoWomen];

    pub fn label(&self) -> &'static str {
        match self {
            PodcastSpeakers::ManWoman => "Um homem e uma mulher",
            PodcastSpeakers::TwoMen => "Dois homens",
            PodcastSpeakers::TwoWomen => "Duas mulheres",
        }
    }

    /// Lowercase phrase used inside generation prompts.
    pub fn describe(&self) -> &'static str {
        match self {
            PodcastSpeakers::ManWoman => "um homem e uma mulher",
            PodcastSpeakers::TwoMen => "dois homens",
            PodcastSpeakers::TwoWomen => "duas mulheres",
        }
    }
}

/// Deliverables derived from a lesson's content.
///
/// Which fields are set depends on the lesson type; see
/// [`crate::editor::outputs::generate_outputs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalOutputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
}

impl FinalOutputs {
    pub fn is_empty(&self) -> bool {
        self.prompt.is_none()
            && self.script.is_none()
            && self.image_prompt.is_none()
            && self.html_content.is_none()
    }
}

/// A single lesson inside a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub lesson_type: LessonType,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<LessonDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_type: Option<VideoType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_podcast: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub podcast_speakers: Option<PodcastSpeakers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_outputs: Option<FinalOutputs>,
}

impl Lesson {
    pub fn new(id: impl Into<String>, title: impl Into<String>, lesson_type: LessonType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            lesson_type,
            content: String::new(),
            duration: None,
            video_type: None,
            is_podcast: None,
            podcast_speakers: None,
            final_outputs: None,
        }
    }

    /// The lesson appended by the builder's "add lesson" action.
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            duration: Some(LessonDuration::default()),
            video_type: Some(VideoType::Narrative),
            ..Self::new(id, "Nova Aula", LessonType::Video)
        }
    }

    pub fn with_duration(mut self, duration: &str) -> Self {
        self.duration = Some(LessonDuration::parse(duration));
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Change the lesson type. Outputs generated for the previous type are dropped.
    pub fn set_type(&mut self, lesson_type: LessonType) {
        if self.lesson_type != lesson_type {
            self.lesson_type = lesson_type;
            self.final_outputs = None;
        }
    }

    /// Switching to narrative clears the podcast settings, which only apply to dialogue.
    pub fn set_video_type(&mut self, video_type: VideoType) {
        self.video_type = Some(video_type);
        if video_type == VideoType::Narrative {
            self.is_podcast = None;
            self.podcast_speakers = None;
        }
    }

    /// Turn the lesson into a dialogue podcast with the given voices.
    pub fn enable_podcast(&mut self, speakers: PodcastSpeakers) {
        self.video_type = Some(VideoType::Dialogue);
        self.is_podcast = Some(true);
        self.podcast_speakers = Some(speakers);
    }

    pub fn disable_podcast(&mut self) {
        self.is_podcast = Some(false);
        self.podcast_speakers = None;
    }

    pub fn is_dialogue(&self) -> bool {
        self.video_type == Some(VideoType::Dialogue)
    }

    /// Speakers that actually apply: only for a dialogue flagged as podcast.
    pub fn effective_podcast_speakers(&self) -> Option<PodcastSpeakers> {
        if self.is_dialogue() && self.is_podcast == Some(true) {
            Some(self.podcast_speakers.unwrap_or_default())
        } else {
            None
        }
    }

    /// Whether this is a video short enough to be rendered from a single prompt.
    pub fn is_short_clip(&self) -> bool {
        self.lesson_type == LessonType::Video
            && self.duration.as_ref().is_some_and(LessonDuration::is_short_clip)
    }

    pub fn duration_label(&self) -> &str {
        self.duration.as_ref().map(LessonDuration::as_str).unwrap_or("")
    }
}

/// An ordered group of lessons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl Module {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            lessons: Vec::new(),
        }
    }

    pub fn with_lessons(mut self, lessons: Vec<Lesson>) -> Self {
        self.lessons = lessons;
        self
    }

    pub fn lesson_ids(&self) -> Vec<&str> {
        self.lessons.iter().map(|l| l.id.as_str()).collect()
    }
}

/// Visual identity of the published course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSettings {
    pub primary_color: String,
    pub font: String,
    #[serde(default)]
    pub logo_url: String,
}

impl Default for DesignSettings {
    fn default() -> Self {
        Self {
            primary_color: "#4F46E5".to_string(),
            font: "Inter".to_string(),
            logo_url: String::new(),
        }
    }
}

/// `#RRGGBB` check used by the design step.
pub fn is_valid_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Answers collected by the onboarding form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingData {
    pub topic: String,
    #[serde(default)]
    pub audience: Audience,
    #[serde(default)]
    pub format: CourseFormat,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl OnboardingData {
    pub fn new(topic: impl Into<String>, audience: Audience, format: CourseFormat) -> Self {
        Self {
            topic: topic.into(),
            audience,
            format,
            language: default_language(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// A course skeleton proposed by the generative-text service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSuggestion {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub structure: Vec<Module>,
}

/// Root aggregate edited by the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseData {
    pub onboarding: OnboardingData,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub design: DesignSettings,
}

impl CourseData {
    pub fn new(onboarding: OnboardingData, design: DesignSettings) -> Self {
        Self {
            onboarding,
            modules: Vec::new(),
            design,
        }
    }

    pub fn module(&self, module_id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == module_id)
    }

    /// Locate a lesson anywhere in the tree, with the module that owns it.
    pub fn find_lesson(&self, lesson_id: &str) -> Option<(&Module, &Lesson)> {
        self.modules.iter().find_map(|m| {
            m.lessons
                .iter()
                .find(|l| l.id == lesson_id)
                .map(|lesson| (m, lesson))
        })
    }

    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.modules.iter().flat_map(|m| m.lessons.iter())
    }

    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.modules
            .iter()
            .any(|m| m.id == id || m.lessons.iter().any(|l| l.id == id))
    }

    /// Re-key blank or repeated ids so every module and lesson id is unique
    /// across the whole tree. The first occurrence of an id keeps it.
    ///
    /// Returns the number of ids that were replaced.
    pub fn ensure_unique_ids(&mut self, ids: &IdGenerator) -> usize {
        let mut seen: HashSet<String> = HashSet::new();
        let mut replaced = 0;

        for module in &mut self.modules {
            if module.id.is_empty() || !seen.insert(module.id.clone()) {
                module.id = ids.module_id();
                seen.insert(module.id.clone());
                replaced += 1;
            }
            for lesson in &mut module.lessons {
                if lesson.id.is_empty() || !seen.insert(lesson.id.clone()) {
                    lesson.id = ids.lesson_id();
                    seen.insert(lesson.id.clone());
                    replaced += 1;
                }
            }
        }

        replaced
    }
}
