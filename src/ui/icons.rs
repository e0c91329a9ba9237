//! Shared UI icons and emojis.

use console::Emoji;

use crate::course::LessonType;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "*");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!]");

// Course tree
pub static MODULE: Emoji<'_, '_> = Emoji("📁 ", "#");
pub static VIDEO: Emoji<'_, '_> = Emoji("🎬 ", "[V]");
pub static TEXT: Emoji<'_, '_> = Emoji("📄 ", "[T]");
pub static ANIMATION: Emoji<'_, '_> = Emoji("🎞️  ", "[A]");
pub static AUDIO: Emoji<'_, '_> = Emoji("🎙️  ", "[P]");

// Dashboard
pub static LINK: Emoji<'_, '_> = Emoji("🔗 ", "->");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">>");

pub fn lesson_icon(lesson_type: LessonType) -> &'static Emoji<'static, 'static> {
    match lesson_type {
        LessonType::Video => &VIDEO,
        LessonType::Text => &TEXT,
        LessonType::Animation => &ANIMATION,
        LessonType::Audio => &AUDIO,
    }
}
