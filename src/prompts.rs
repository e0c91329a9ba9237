//! Prompt assembly for the generative-text service.
//!
//! Every prompt is written in Portuguese; the course language chosen at
//! onboarding is passed along so generated material follows it.

use crate::course::{Lesson, LessonType, OnboardingData, language_label};
use crate::editor::RewriteAction;

const CONTENT_EXPERT: &str = "Você é um especialista em criação de conteúdo para cursos.";
const DESIGN_EXPERT: &str = "Você é um especialista em design instrucional.";

fn language_sentence(data: &OnboardingData) -> String {
    let language = language_label(&data.language).unwrap_or(data.language.as_str());
    format!(" O curso será produzido no idioma \"{}\".", language)
}

/// Ask for three course templates (name, description, modules and lessons).
pub fn templates_prompt(data: &OnboardingData) -> String {
    format!(
        "{DESIGN_EXPERT} Baseado no tema \"{}\", para um público de \"{}\" que prefere o formato \"{}\", sugira 3 templates de estrutura de curso. Para cada template, forneça um nome (ex: \"Mini Curso em 5 Lições\"), uma breve descrição, e uma estrutura inicial com módulos e aulas (incluindo uma duração estimada para cada aula, ex: \"10 min\").{} Retorne a resposta como um JSON.",
        data.topic,
        data.audience,
        data.format,
        language_sentence(data)
    )
}

/// Ask for a flat list of starter lessons.
pub fn lessons_prompt(data: &OnboardingData) -> String {
    format!(
        "{DESIGN_EXPERT} Baseado no tema \"{}\", para um público de \"{}\" que prefere o formato \"{}\", sugira uma lista de aulas iniciais para o curso. Para cada aula, forneça um título, o tipo (video, texto, animacao ou audio), um conteúdo inicial vazio e uma duração estimada (ex: \"10 min\").{} Retorne a resposta como um JSON.",
        data.topic,
        data.audience,
        data.format,
        language_sentence(data)
    )
}

/// Expand, condense or revise existing lesson content.
pub fn rewrite_prompt(topic: &str, lesson: &Lesson, action: RewriteAction) -> String {
    format!(
        "{CONTENT_EXPERT} Para um curso sobre \"{}\", na aula \"{}\". Por favor, {}\n\nTexto original:\n\"{}\"",
        topic,
        lesson.title,
        action.instruction(),
        lesson.content
    )
}

/// Initial content for a lesson, shaped by its type and presentation.
pub fn draft_prompt(topic: &str, lesson: &Lesson) -> String {
    let mut prompt = format!(
        "{CONTENT_EXPERT} Para um curso sobre \"{}\", gere um conteúdo inicial para a aula intitulada \"{}\".",
        topic, lesson.title
    );

    match lesson.lesson_type {
        LessonType::Text => {
            prompt.push_str(
                " O conteúdo deve ser um texto base que o criador do curso possa expandir e refinar.",
            );
        }
        LessonType::Video | LessonType::Audio => {
            let medium = if lesson.lesson_type == LessonType::Video {
                "vídeo"
            } else {
                "áudio"
            };
            prompt.push_str(&format!(" O conteúdo deve ser um roteiro para um {}.", medium));

            if lesson.is_dialogue() {
                match lesson.effective_podcast_speakers() {
                    Some(speakers) => prompt.push_str(&format!(
                        " O formato é um podcast de diálogo entre {}. O roteiro deve indicar claramente as falas de cada apresentador (ex: Apresentador 1:, Apresentador 2:).",
                        speakers.describe()
                    )),
                    None => prompt.push_str(
                        " O formato é um diálogo entre duas pessoas. O roteiro deve indicar as falas de cada pessoa.",
                    ),
                }
            } else {
                prompt.push_str(" O formato é narrativo, com um único apresentador.");
            }
        }
        LessonType::Animation => {}
    }

    prompt
}

pub fn short_video_prompt(content: &str) -> String {
    format!(
        "Crie um prompt curto e visualmente impactante para um vídeo de até 8 segundos (estilo Reels/Shorts) com base no seguinte roteiro: \"{}\"",
        content
    )
}

pub fn animation_prompt(content: &str) -> String {
    format!(
        "Você é um diretor de arte para animações. Crie um prompt detalhado para uma animação com base no seguinte conteúdo. O prompt deve descrever claramente as cenas, elementos visuais (como personagens e cenários), transições e qualquer texto que deva aparecer na tela. O objetivo é que um animador possa usar este prompt para criar a animação. Conteúdo base: \"{}\"",
        content
    )
}

pub fn image_prompt(content: &str) -> String {
    format!(
        "Crie um prompt para uma imagem de alta qualidade (foto ou ilustração) que acompanhe o seguinte texto: \"{}\"",
        content
    )
}

/// Short title for a module or lesson.
///
/// `kind` is the Portuguese noun with its article ("o módulo", "a aula").
pub fn title_prompt(topic: &str, kind: &str, current_title: &str, context: Option<&str>) -> String {
    let mut prompt = format!(
        "{DESIGN_EXPERT} Para um curso sobre \"{}\", sugira um título curto e atrativo para {} atualmente chamado \"{}\".",
        topic, kind, current_title
    );
    if let Some(context) = context.map(str::trim).filter(|c| !c.is_empty()) {
        prompt.push_str(&format!(" Contexto adicional: {}.", context));
    }
    prompt.push_str(" Responda apenas com o título, sem aspas e sem explicações.");
    prompt
}
