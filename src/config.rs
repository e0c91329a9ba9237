//! Configuration for FaceCourses.
//!
//! Settings are layered file → environment → CLI. The file is
//! `facecourses.toml` in the working directory unless `--config` names
//! another path.
//!
//! # Configuration File Format
//!
//! ```toml
//! [ai]
//! model = "gemini-2.5-flash"
//! base_url = "https://generativelanguage.googleapis.com"
//! api_key_env = "GEMINI_API_KEY"
//! timeout_secs = 60
//!
//! [onboarding]
//! mode = "templates"
//! language = "pt-BR"
//!
//! [design]
//! primary_color = "#4F46E5"
//! font = "Inter"
//! ```
//!
//! Environment: the variable named by `api_key_env` holds the key, with
//! `API_KEY` as a fallback; `FACECOURSES_MODEL` overrides the model.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ai::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient};
use crate::ai::{Collaborator, OfflineGenerator};
use crate::course::{
    DEFAULT_LANGUAGE, DesignSettings, FONT_OPTIONS, is_valid_color, language_label,
};
use crate::onboarding::SuggestionMode;
use crate::session::SessionSettings;

pub const CONFIG_FILE_NAME: &str = "facecourses.toml";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";
pub const MODEL_ENV: &str = "FACECOURSES_MODEL";

/// Generative-text service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Model name; `FACECOURSES_MODEL` and `--model` take precedence
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: None,
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Onboarding defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingConfig {
    #[serde(default)]
    pub mode: SuggestionMode,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            mode: SuggestionMode::default(),
            language: default_language(),
        }
    }
}

/// Design defaults for new courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignConfig {
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_font")]
    pub font: String,
}

fn default_primary_color() -> String {
    DesignSettings::default().primary_color
}

fn default_font() -> String {
    DesignSettings::default().font
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            primary_color: default_primary_color(),
            font: default_font(),
        }
    }
}

/// Contents of `facecourses.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceCoursesToml {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub onboarding: OnboardingConfig,
    #[serde(default)]
    pub design: DesignConfig,
}

impl FaceCoursesToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse facecourses.toml")
    }

    /// Returns default configuration if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize facecourses.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.ai.timeout_secs == 0 {
            warnings.push("ai.timeout_secs is 0: every request would time out".to_string());
        }
        if self.ai.api_key_env.trim().is_empty() {
            warnings.push("ai.api_key_env is empty".to_string());
        }
        if language_label(&self.onboarding.language).is_none() {
            warnings.push(format!(
                "Unknown onboarding.language '{}': expected one of pt-BR, en-US, es-ES",
                self.onboarding.language
            ));
        }
        if !is_valid_color(&self.design.primary_color) {
            warnings.push(format!(
                "Invalid design.primary_color '{}': expected #RRGGBB",
                self.design.primary_color
            ));
        }
        if !FONT_OPTIONS.contains(&self.design.font.as_str()) {
            warnings.push(format!(
                "Unknown design.font '{}': expected one of {}",
                self.design.font,
                FONT_OPTIONS.join(", ")
            ));
        }

        warnings
    }

    /// API key from the configured variable, falling back to `API_KEY`.
    /// Empty values count as missing.
    pub fn resolve_api_key(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        [self.ai.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| lookup(name))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }

    /// Model name (env → file → default).
    pub fn resolve_model(&self, lookup: impl Fn(&str) -> Option<String>) -> String {
        lookup(MODEL_ENV)
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.ai.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Effective configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    toml: FaceCoursesToml,
    cli_model: Option<String>,
    offline: bool,
}

impl Config {
    /// Load the file (if present) and record CLI overrides.
    pub fn load(path: Option<PathBuf>, cli_model: Option<String>, offline: bool) -> Result<Self> {
        let path = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        let toml = FaceCoursesToml::load_or_default(&path)?;
        Ok(Self {
            path,
            toml,
            cli_model,
            offline,
        })
    }

    /// Build directly from parsed settings.
    pub fn from_toml(toml: FaceCoursesToml) -> Self {
        Self {
            path: PathBuf::from(CONFIG_FILE_NAME),
            toml,
            cli_model: None,
            offline: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn toml(&self) -> &FaceCoursesToml {
        &self.toml
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Model name (CLI → env → file → default).
    pub fn model(&self) -> String {
        self.cli_model
            .clone()
            .unwrap_or_else(|| self.toml.resolve_model(env_lookup))
    }

    pub fn api_key(&self) -> Option<String> {
        self.toml.resolve_api_key(env_lookup)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.toml.ai.timeout_secs)
    }

    pub fn default_language(&self) -> &str {
        &self.toml.onboarding.language
    }

    pub fn design_defaults(&self) -> DesignSettings {
        DesignSettings {
            primary_color: self.toml.design.primary_color.clone(),
            font: self.toml.design.font.clone(),
            ..Default::default()
        }
    }

    /// Session settings, with `mode` overriding the configured suggestion mode.
    pub fn session_settings(&self, mode: Option<SuggestionMode>) -> SessionSettings {
        SessionSettings {
            mode: mode.unwrap_or(self.toml.onboarding.mode),
            design: self.design_defaults(),
        }
    }

    /// Offline when `--offline` was passed or no API key is set.
    pub fn build_collaborator(&self) -> Result<Collaborator> {
        if self.offline {
            tracing::info!("Offline mode: generated content will use fallbacks");
            return Ok(Collaborator::new(OfflineGenerator::new("offline mode")));
        }

        let Some(api_key) = self.api_key() else {
            tracing::warn!(
                env = %self.toml.ai.api_key_env,
                "No API key configured, generated content will use fallbacks"
            );
            return Ok(Collaborator::new(OfflineGenerator::new("no API key configured")));
        };

        let client = GeminiClient::new(
            api_key,
            self.model(),
            self.toml.ai.base_url.clone(),
            self.timeout(),
        )
        .context("Failed to build HTTP client")?;
        tracing::info!(model = %client.model(), "Using generative-text service");
        Ok(Collaborator::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let toml = FaceCoursesToml::default();
        assert_eq!(toml.ai.api_key_env, "GEMINI_API_KEY");
        assert_eq!(toml.ai.timeout_secs, 60);
        assert_eq!(toml.onboarding.mode, SuggestionMode::Templates);
        assert_eq!(toml.onboarding.language, "pt-BR");
        assert_eq!(toml.design.primary_color, "#4F46E5");
        assert!(toml.validate().is_empty());
    }

    #[test]
    fn test_parse_partial_file() {
        let toml = FaceCoursesToml::parse(
            r#"
            [onboarding]
            mode = "lessons"

            [design]
            font = "Lato"
            "#,
        )
        .unwrap();
        assert_eq!(toml.onboarding.mode, SuggestionMode::Lessons);
        assert_eq!(toml.onboarding.language, "pt-BR");
        assert_eq!(toml.design.font, "Lato");
        assert_eq!(toml.design.primary_color, "#4F46E5");
        assert_eq!(toml.ai, AiConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        assert!(FaceCoursesToml::parse("[onboarding]\nmode = \"both\"\n").is_err());
    }

    #[test]
    fn test_validate_reports_bad_values() {
        let mut toml = FaceCoursesToml::default();
        toml.design.primary_color = "blue".into();
        toml.design.font = "Comic Sans".into();
        toml.onboarding.language = "fr-FR".into();
        toml.ai.timeout_secs = 0;
        let warnings = toml.validate();
        assert_eq!(warnings.len(), 4);
        assert!(warnings.iter().any(|w| w.contains("blue")));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut toml = FaceCoursesToml::default();
        toml.ai.model = Some("gemini-2.5-pro".into());
        toml.save(&path).unwrap();

        assert_eq!(FaceCoursesToml::load(&path).unwrap(), toml);
        assert_eq!(
            FaceCoursesToml::load_or_default(&dir.path().join("missing.toml")).unwrap(),
            FaceCoursesToml::default()
        );
    }

    #[test]
    fn test_api_key_falls_back_to_api_key_var() {
        let toml = FaceCoursesToml::default();
        assert_eq!(
            toml.resolve_api_key(env(&[("API_KEY", "fallback")])),
            Some("fallback".into())
        );
        assert_eq!(
            toml.resolve_api_key(env(&[("GEMINI_API_KEY", "primary"), ("API_KEY", "fallback")])),
            Some("primary".into())
        );
        assert_eq!(
            toml.resolve_api_key(env(&[("GEMINI_API_KEY", "  "), ("API_KEY", "fallback")])),
            Some("fallback".into())
        );
        assert_eq!(toml.resolve_api_key(env(&[])), None);
    }

    #[test]
    fn test_api_key_env_name_configurable() {
        let mut toml = FaceCoursesToml::default();
        toml.ai.api_key_env = "MY_KEY".into();
        assert_eq!(
            toml.resolve_api_key(env(&[("MY_KEY", "k"), ("GEMINI_API_KEY", "ignored")])),
            Some("k".into())
        );
    }

    #[test]
    fn test_model_precedence() {
        let mut toml = FaceCoursesToml::default();
        assert_eq!(toml.resolve_model(env(&[])), DEFAULT_MODEL);
        toml.ai.model = Some("from-file".into());
        assert_eq!(toml.resolve_model(env(&[])), "from-file");
        assert_eq!(
            toml.resolve_model(env(&[("FACECOURSES_MODEL", "from-env")])),
            "from-env"
        );

        let mut config = Config::from_toml(toml);
        config.cli_model = Some("from-cli".into());
        assert_eq!(config.model(), "from-cli");
    }

    #[test]
    fn test_session_settings_from_file() {
        let mut toml = FaceCoursesToml::default();
        toml.onboarding.mode = SuggestionMode::Lessons;
        toml.design.primary_color = "#112233".into();
        let config = Config::from_toml(toml);

        let settings = config.session_settings(None);
        assert_eq!(settings.mode, SuggestionMode::Lessons);
        assert_eq!(settings.design.primary_color, "#112233");
        assert_eq!(settings.design.logo_url, "");
        assert_eq!(
            config.session_settings(Some(SuggestionMode::Templates)).mode,
            SuggestionMode::Templates
        );
    }

    #[test]
    fn test_offline_collaborator_needs_no_key() {
        let config = Config {
            offline: true,
            ..Config::from_toml(FaceCoursesToml::default())
        };
        assert!(config.build_collaborator().is_ok());
        assert!(config.is_offline());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("none.toml")), None, false).unwrap();
        assert_eq!(config.toml(), &FaceCoursesToml::default());
        assert_eq!(config.default_language(), "pt-BR");
    }
}
