//! `facecourses outline`: onboarding suggestions without the wizard.

use anyhow::{Context, Result};

use facecourses::config::Config;
use facecourses::course::{Audience, CourseFormat, OnboardingData};
use facecourses::onboarding::{self, SuggestionMode};
use facecourses::ui::with_spinner;

pub async fn cmd_outline(
    config: &Config,
    topic: &str,
    audience: Audience,
    format: CourseFormat,
    language: Option<String>,
    mode: Option<SuggestionMode>,
) -> Result<()> {
    let collaborator = config.build_collaborator()?;
    let mode = mode.unwrap_or(config.toml().onboarding.mode);
    let language = language.unwrap_or_else(|| config.default_language().to_string());
    let data = OnboardingData::new(topic, audience, format).with_language(language);

    let (_, suggestions) = with_spinner(
        "Gerando sugestões...",
        onboarding::submit(data, mode, &collaborator),
    )
    .await?;

    let json = serde_json::to_string_pretty(&suggestions)
        .context("Failed to serialize suggestions")?;
    println!("{}", json);
    Ok(())
}
