pub mod icons;
pub mod render;
pub mod spinner;

pub use render::{render_lesson, render_tree};
pub use spinner::with_spinner;
