//! Typed error hierarchy for the course wizard.
//!
//! One enum per subsystem:
//! - `AuthError` - login form
//! - `OnboardingError` - onboarding form validation
//! - `EditorError` - course tree and lesson editing
//! - `AiError` - generative-text service calls
//! - `SessionError` - wizard state transitions, wrapping the others
//!
//! User-facing messages are in Portuguese, like the rest of the interface.

use thiserror::Error;

use crate::session::Phase;

/// Errors from the login form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Por favor, preencha todos os campos.")]
    MissingFields,

    #[error("Email ou senha inválidos. (Use teste@email.com e senha123)")]
    InvalidCredentials,
}

/// Errors from the onboarding form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OnboardingError {
    #[error("Por favor, preencha o tema do curso.")]
    EmptyTopic,
}

/// Errors from course tree and content editing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("Module {id} not found")]
    ModuleNotFound { id: String },

    #[error("Lesson {id} not found")]
    LessonNotFound { id: String },

    #[error("Id {id} is already used in this course")]
    DuplicateId { id: String },

    #[error("Index {index} is out of range for module {module_id} ({len} lessons)")]
    IndexOutOfRange {
        module_id: String,
        index: usize,
        len: usize,
    },

    #[error("Invalid colour '{value}': expected #RRGGBB")]
    InvalidColor { value: String },

    #[error("Por favor, gere ou escreva um conteúdo principal primeiro.")]
    EmptyContent,
}

/// Errors from the generative-text service.
#[derive(Debug, Error)]
pub enum AiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Generative API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Generative API returned no text")]
    EmptyResponse,

    #[error("Generative API returned invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Generative API unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the session state machine.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot {action} while in the {phase} phase")]
    InvalidTransition { phase: Phase, action: &'static str },

    #[error("Template {index} does not exist ({available} available)")]
    TemplateOutOfRange { index: usize, available: usize },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Onboarding(#[from] OnboardingError),

    #[error(transparent)]
    Editor(#[from] EditorError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_carry_fixed_messages() {
        assert_eq!(
            AuthError::MissingFields.to_string(),
            "Por favor, preencha todos os campos."
        );
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Email ou senha inválidos. (Use teste@email.com e senha123)"
        );
    }

    #[test]
    fn editor_error_index_out_of_range_carries_context() {
        let err = EditorError::IndexOutOfRange {
            module_id: "m1".into(),
            index: 7,
            len: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("m1"));
        assert!(msg.contains('7'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn session_error_converts_from_editor_error() {
        let inner = EditorError::LessonNotFound { id: "l1".into() };
        let err: SessionError = inner.into();
        match &err {
            SessionError::Editor(EditorError::LessonNotFound { id }) => assert_eq!(id, "l1"),
            _ => panic!("Expected SessionError::Editor(LessonNotFound)"),
        }
    }

    #[test]
    fn session_error_transparent_keeps_user_message() {
        let err: SessionError = OnboardingError::EmptyTopic.into();
        assert_eq!(err.to_string(), "Por favor, preencha o tema do curso.");
    }

    #[test]
    fn invalid_transition_names_phase_and_action() {
        let err = SessionError::InvalidTransition {
            phase: Phase::Login,
            action: "publish",
        };
        assert_eq!(err.to_string(), "Cannot publish while in the login phase");
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&AuthError::MissingFields);
        assert_std_error(&OnboardingError::EmptyTopic);
        assert_std_error(&EditorError::EmptyContent);
        assert_std_error(&AiError::EmptyResponse);
        assert_std_error(&SessionError::TemplateOutOfRange {
            index: 3,
            available: 1,
        });
    }
}
