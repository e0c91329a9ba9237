//! Wizard state machine.
//!
//! ```text
//! Login ──login──▶ Onboarding ──submit──▶ Building ──publish──▶ Published
//!   ▲                 │  ▲ form ⇄ template selection               │
//!   └─────logout──────┴──┴──────────────── start_over ◀────────────┘
//! ```
//!
//! The [`Session`] owns the whole state; the course tree only exists inside
//! the `Building` and `Published` states, so logging out drops it.

use std::sync::Arc;

use crate::ai::Collaborator;
use crate::auth::{self, Credentials};
use crate::builder::CourseBuilder;
use crate::course::{DesignSettings, IdGenerator, OnboardingData, TemplateSuggestion};
use crate::dashboard::Dashboard;
use crate::errors::SessionError;
use crate::onboarding::{self, SuggestionMode, Suggestions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Login,
    Onboarding,
    Building,
    Published,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Login => write!(f, "login"),
            Phase::Onboarding => write!(f, "onboarding"),
            Phase::Building => write!(f, "building"),
            Phase::Published => write!(f, "published"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OnboardingStage {
    Form,
    TemplateSelection {
        onboarding: OnboardingData,
        templates: Vec<TemplateSuggestion>,
    },
}

#[derive(Debug)]
pub enum SessionState {
    Login,
    Onboarding(OnboardingStage),
    Building(CourseBuilder),
    Published(Dashboard),
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::Login => Phase::Login,
            SessionState::Onboarding(_) => Phase::Onboarding,
            SessionState::Building(_) => Phase::Building,
            SessionState::Published(_) => Phase::Published,
        }
    }
}

/// Defaults applied to every course started in the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSettings {
    pub mode: SuggestionMode,
    pub design: DesignSettings,
}

#[derive(Debug)]
pub struct Session {
    state: SessionState,
    collaborator: Collaborator,
    settings: SessionSettings,
    ids: Arc<IdGenerator>,
}

impl Session {
    pub fn new(collaborator: Collaborator, settings: SessionSettings) -> Self {
        Self::with_ids(collaborator, settings, Arc::new(IdGenerator::new()))
    }

    pub fn with_ids(
        collaborator: Collaborator,
        settings: SessionSettings,
        ids: Arc<IdGenerator>,
    ) -> Self {
        Self {
            state: SessionState::Login,
            collaborator,
            settings,
            ids,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn collaborator(&self) -> &Collaborator {
        &self.collaborator
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            phase: self.phase(),
            action,
        }
    }

    fn transition(&mut self, next: SessionState) {
        let from = self.phase();
        self.state = next;
        tracing::info!(from = %from, to = %self.phase(), "Session transition");
    }

    pub fn login(&mut self, credentials: &Credentials) -> Result<(), SessionError> {
        if self.phase() != Phase::Login {
            return Err(self.invalid("log in"));
        }
        auth::authenticate(credentials)?;
        self.transition(SessionState::Onboarding(OnboardingStage::Form));
        Ok(())
    }

    /// Submit the onboarding form.
    ///
    /// In lessons mode the builder opens straight away; in templates mode the
    /// session moves to template selection. Returns the resulting phase.
    pub async fn submit_onboarding(&mut self, data: OnboardingData) -> Result<Phase, SessionError> {
        if self.phase() != Phase::Onboarding {
            return Err(self.invalid("submit onboarding"));
        }

        let (onboarding, suggestions) =
            onboarding::submit(data, self.settings.mode, &self.collaborator).await?;

        let next = match suggestions {
            Suggestions::Lessons(lessons) => {
                let course = onboarding::seed_from_lessons(
                    onboarding,
                    lessons,
                    self.settings.design.clone(),
                    &self.ids,
                );
                SessionState::Building(CourseBuilder::new(course, Arc::clone(&self.ids)))
            }
            Suggestions::Templates(templates) => {
                SessionState::Onboarding(OnboardingStage::TemplateSelection {
                    onboarding,
                    templates,
                })
            }
        };
        self.transition(next);
        Ok(self.phase())
    }

    /// Templates awaiting a choice, if the session is at template selection.
    pub fn templates(&self) -> Option<&[TemplateSuggestion]> {
        match &self.state {
            SessionState::Onboarding(OnboardingStage::TemplateSelection { templates, .. }) => {
                Some(templates)
            }
            _ => None,
        }
    }

    /// Seed the builder from the template at `index`.
    pub fn select_template(&mut self, index: usize) -> Result<(), SessionError> {
        let available = match self.templates() {
            Some(templates) => templates.len(),
            None => return Err(self.invalid("select a template")),
        };
        if index >= available {
            return Err(SessionError::TemplateOutOfRange { index, available });
        }

        let (onboarding, mut templates) =
            match std::mem::replace(&mut self.state, SessionState::Login) {
                SessionState::Onboarding(OnboardingStage::TemplateSelection {
                    onboarding,
                    templates,
                }) => (onboarding, templates),
                other => {
                    self.state = other;
                    return Err(self.invalid("select a template"));
                }
            };

        let template = templates.swap_remove(index);
        tracing::info!(template = %template.name, "Template selected");
        let course = onboarding::seed_from_template(
            onboarding,
            template,
            self.settings.design.clone(),
            &self.ids,
        );
        self.transition(SessionState::Building(CourseBuilder::new(
            course,
            Arc::clone(&self.ids),
        )));
        Ok(())
    }

    /// Leave template selection and return to the form.
    pub fn back_to_form(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Onboarding(_) => {
                self.state = SessionState::Onboarding(OnboardingStage::Form);
                Ok(())
            }
            _ => Err(self.invalid("return to the onboarding form")),
        }
    }

    pub fn builder(&self) -> Option<&CourseBuilder> {
        match &self.state {
            SessionState::Building(builder) => Some(builder),
            _ => None,
        }
    }

    pub fn builder_mut(&mut self) -> Option<&mut CourseBuilder> {
        match &mut self.state {
            SessionState::Building(builder) => Some(builder),
            _ => None,
        }
    }

    /// Freeze the course and open the dashboard.
    pub fn publish(&mut self) -> Result<&Dashboard, SessionError> {
        let builder = match std::mem::replace(&mut self.state, SessionState::Login) {
            SessionState::Building(builder) => builder,
            other => {
                self.state = other;
                return Err(self.invalid("publish"));
            }
        };
        let dashboard = Dashboard::new(builder.into_course());
        tracing::info!(slug = %dashboard.slug(), "Course published");
        self.transition(SessionState::Published(dashboard));

        match &self.state {
            SessionState::Published(dashboard) => Ok(dashboard),
            _ => Err(self.invalid("publish")),
        }
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.state {
            SessionState::Published(dashboard) => Some(dashboard),
            _ => None,
        }
    }

    /// Discard everything and return to the login screen.
    pub fn logout(&mut self) {
        self.transition(SessionState::Login);
    }

    /// Drop the current course and go back to an empty onboarding form.
    pub fn start_over(&mut self) -> Result<(), SessionError> {
        match self.phase() {
            Phase::Login => Err(self.invalid("start a new course")),
            _ => {
                self.transition(SessionState::Onboarding(OnboardingStage::Form));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::TextGenerator;
    use crate::course::{Audience, CourseFormat};
    use crate::errors::{AiError, AuthError};
    use async_trait::async_trait;
    use serde_json::{Value, json};

    fn session(mode: SuggestionMode) -> Session {
        Session::with_ids(
            Collaborator::offline(),
            SessionSettings {
                mode,
                ..Default::default()
            },
            Arc::new(IdGenerator::starting_at(1)),
        )
    }

    fn demo() -> Credentials {
        Credentials::new(auth::DEMO_EMAIL, auth::DEMO_PASSWORD)
    }

    fn excel() -> OnboardingData {
        OnboardingData::new("Excel Básico", Audience::Beginner, CourseFormat::Text)
    }

    struct TwoTemplates;

    #[async_trait]
    impl TextGenerator for TwoTemplates {
        async fn complete(&self, _prompt: &str) -> Result<String, AiError> {
            Err(AiError::EmptyResponse)
        }

        async fn complete_structured(&self, _prompt: &str, _schema: &Value) -> Result<Value, AiError> {
            Ok(json!([
                { "name": "Rápido", "description": "", "structure": [
                    { "id": "m1", "title": "Intro", "lessons": [ { "id": "l1", "title": "Olá", "type": "video" } ] }
                ]},
                { "name": "Completo", "description": "", "structure": [
                    { "id": "m1", "title": "Base", "lessons": [ { "id": "l1", "title": "A", "type": "texto" } ] },
                    { "id": "m2", "title": "Mais", "lessons": [ { "id": "l1", "title": "B", "type": "texto" } ] }
                ]}
            ]))
        }
    }

    #[test]
    fn test_login_moves_to_onboarding() {
        let mut s = session(SuggestionMode::Lessons);
        assert_eq!(s.phase(), Phase::Login);
        s.login(&demo()).unwrap();
        assert_eq!(s.phase(), Phase::Onboarding);
        assert_eq!(s.state().phase(), Phase::Onboarding);
    }

    #[test]
    fn test_bad_login_stays_put() {
        let mut s = session(SuggestionMode::Lessons);
        let err = s.login(&Credentials::new("a@b.c", "x")).unwrap_err();
        assert!(matches!(err, SessionError::Auth(AuthError::InvalidCredentials)));
        assert_eq!(s.phase(), Phase::Login);
    }

    #[tokio::test]
    async fn test_lessons_mode_opens_builder() {
        let mut s = session(SuggestionMode::Lessons);
        s.login(&demo()).unwrap();
        let phase = s.submit_onboarding(excel()).await.unwrap();
        assert_eq!(phase, Phase::Building);

        let builder = s.builder().unwrap();
        assert_eq!(builder.course().lesson_count(), 3);
        assert_eq!(builder.course().onboarding.topic, "Excel Básico");
    }

    #[tokio::test]
    async fn test_empty_topic_keeps_form() {
        let mut s = session(SuggestionMode::Lessons);
        s.login(&demo()).unwrap();
        let err = s.submit_onboarding(OnboardingData::new(" ", Audience::Beginner, CourseFormat::Video)).await;
        assert!(err.is_err());
        assert_eq!(s.phase(), Phase::Onboarding);
    }

    #[tokio::test]
    async fn test_template_selection() {
        let mut s = Session::with_ids(
            Collaborator::new(TwoTemplates),
            SessionSettings::default(),
            Arc::new(IdGenerator::starting_at(10)),
        );
        s.login(&demo()).unwrap();
        assert_eq!(s.submit_onboarding(excel()).await.unwrap(), Phase::Onboarding);
        assert_eq!(s.templates().unwrap().len(), 2);

        let err = s.select_template(5).unwrap_err();
        assert!(matches!(
            err,
            SessionError::TemplateOutOfRange {
                index: 5,
                available: 2
            }
        ));
        assert!(s.templates().is_some());

        s.select_template(1).unwrap();
        let course = s.builder().unwrap().course();
        assert_eq!(course.modules.len(), 2);
        assert_ne!(course.modules[0].lessons[0].id, course.modules[1].lessons[0].id);
    }

    #[tokio::test]
    async fn test_back_to_form_from_selection() {
        let mut s = session(SuggestionMode::Templates);
        s.login(&demo()).unwrap();
        s.submit_onboarding(excel()).await.unwrap();
        s.back_to_form().unwrap();
        assert!(s.templates().is_none());
        assert_eq!(s.phase(), Phase::Onboarding);
    }

    #[tokio::test]
    async fn test_publish_then_logout_discards_course() {
        let mut s = session(SuggestionMode::Lessons);
        s.login(&demo()).unwrap();
        s.submit_onboarding(excel()).await.unwrap();

        let link = s.publish().unwrap().shareable_link();
        assert_eq!(link, "https://face.courses/c/excel-básico");
        assert_eq!(s.phase(), Phase::Published);
        assert!(s.builder().is_none());

        s.logout();
        assert_eq!(s.phase(), Phase::Login);
        assert!(s.dashboard().is_none());
    }

    #[tokio::test]
    async fn test_start_over_from_dashboard() {
        let mut s = session(SuggestionMode::Lessons);
        s.login(&demo()).unwrap();
        s.submit_onboarding(excel()).await.unwrap();
        s.publish().unwrap();
        s.start_over().unwrap();
        assert_eq!(s.phase(), Phase::Onboarding);
    }

    #[test]
    fn test_out_of_order_operations_rejected() {
        let mut s = session(SuggestionMode::Lessons);
        let err = s.publish().unwrap_err();
        assert_eq!(err.to_string(), "Cannot publish while in the login phase");
        assert!(s.select_template(0).is_err());
        assert!(s.start_over().is_err());

        s.login(&demo()).unwrap();
        assert!(s.login(&demo()).is_err());
    }
}
