//! Course tree editor.
//!
//! Every edit is a [`Command`] applied by the pure function [`apply`], which
//! takes the current [`CourseData`] and returns the next one. [`CourseBuilder`]
//! is the stateful front used by the wizard: it mints ids, tracks the builder
//! step, hands out per-lesson editors and keeps the title-suggestion tickets.

pub mod actions;
pub mod suggest;

use std::sync::Arc;

use crate::ai::Collaborator;
use crate::course::{CourseData, DesignSettings, IdGenerator, Lesson, Module, is_valid_color};
use crate::editor::ContentEditor;
use crate::errors::EditorError;
use crate::prompts;

pub use suggest::{SuggestionOutcome, SuggestionTarget, SuggestionTicket, TicketBook, TitleRequest};

/// Title given to a freshly added module.
pub const NEW_MODULE_TITLE: &str = "Novo Módulo";

/// A single edit to the course tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddModule { id: String },
    RemoveModule { module_id: String },
    AddLesson { module_id: String, lesson_id: String },
    RemoveLesson { module_id: String, lesson_id: String },
    UpdateLesson(Lesson),
    ReorderLessons { module_id: String, from: usize, to: usize },
    RenameModule { module_id: String, title: String },
    UpdateDesign(DesignSettings),
}

/// Apply one command to the tree.
///
/// Removing something that is not there, or adding a lesson to a module that
/// is not there, leaves the tree unchanged. New ids must not already be in use.
pub fn apply(mut course: CourseData, command: Command) -> Result<CourseData, EditorError> {
    match command {
        Command::AddModule { id } => {
            if course.contains_id(&id) {
                return Err(EditorError::DuplicateId { id });
            }
            course.modules.push(Module::new(id, NEW_MODULE_TITLE));
        }
        Command::RemoveModule { module_id } => {
            course.modules.retain(|m| m.id != module_id);
        }
        Command::AddLesson {
            module_id,
            lesson_id,
        } => {
            if course.contains_id(&lesson_id) {
                return Err(EditorError::DuplicateId { id: lesson_id });
            }
            if let Some(module) = course.modules.iter_mut().find(|m| m.id == module_id) {
                module.lessons.push(Lesson::blank(lesson_id));
            }
        }
        Command::RemoveLesson {
            module_id,
            lesson_id,
        } => {
            if let Some(module) = course.modules.iter_mut().find(|m| m.id == module_id) {
                module.lessons.retain(|l| l.id != lesson_id);
            }
        }
        Command::UpdateLesson(updated) => {
            for lesson in course.modules.iter_mut().flat_map(|m| m.lessons.iter_mut()) {
                if lesson.id == updated.id {
                    *lesson = updated.clone();
                }
            }
        }
        Command::ReorderLessons {
            module_id,
            from,
            to,
        } => {
            let module = course
                .modules
                .iter_mut()
                .find(|m| m.id == module_id)
                .ok_or_else(|| EditorError::ModuleNotFound {
                    id: module_id.clone(),
                })?;
            let len = module.lessons.len();
            for index in [from, to] {
                if index >= len {
                    return Err(EditorError::IndexOutOfRange {
                        module_id,
                        index,
                        len,
                    });
                }
            }
            let lesson = module.lessons.remove(from);
            module.lessons.insert(to, lesson);
        }
        Command::RenameModule { module_id, title } => {
            let module = course
                .modules
                .iter_mut()
                .find(|m| m.id == module_id)
                .ok_or(EditorError::ModuleNotFound { id: module_id })?;
            module.title = title;
        }
        Command::UpdateDesign(design) => {
            if !is_valid_color(&design.primary_color) {
                return Err(EditorError::InvalidColor {
                    value: design.primary_color,
                });
            }
            course.design = design;
        }
    }
    Ok(course)
}

/// Steps of the builder screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuilderStep {
    #[default]
    Structure,
    Design,
    Publish,
}

impl BuilderStep {
    pub const ALL: [BuilderStep; 3] = [Self::Structure, Self::Design, Self::Publish];

    pub fn label(&self) -> &'static str {
        match self {
            BuilderStep::Structure => "Estrutura",
            BuilderStep::Design => "Design",
            BuilderStep::Publish => "Publicar",
        }
    }

    /// 1-based position, for "Passo 2 de 3".
    pub fn number(&self) -> usize {
        match self {
            BuilderStep::Structure => 1,
            BuilderStep::Design => 2,
            BuilderStep::Publish => 3,
        }
    }

    pub fn next(self) -> Self {
        match self {
            BuilderStep::Structure => BuilderStep::Design,
            BuilderStep::Design | BuilderStep::Publish => BuilderStep::Publish,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            BuilderStep::Publish => BuilderStep::Design,
            BuilderStep::Design | BuilderStep::Structure => BuilderStep::Structure,
        }
    }
}

/// Stateful front over [`apply`] for one course.
#[derive(Debug)]
pub struct CourseBuilder {
    course: CourseData,
    ids: Arc<IdGenerator>,
    step: BuilderStep,
    tickets: TicketBook,
}

impl CourseBuilder {
    pub fn new(course: CourseData, ids: Arc<IdGenerator>) -> Self {
        Self {
            course,
            ids,
            step: BuilderStep::default(),
            tickets: TicketBook::new(),
        }
    }

    pub fn course(&self) -> &CourseData {
        &self.course
    }

    pub fn into_course(self) -> CourseData {
        self.course
    }

    pub fn step(&self) -> BuilderStep {
        self.step
    }

    pub fn next_step(&mut self) -> BuilderStep {
        self.step = self.step.next();
        self.step
    }

    pub fn previous_step(&mut self) -> BuilderStep {
        self.step = self.step.previous();
        self.step
    }

    pub fn pending_suggestions(&self) -> usize {
        self.tickets.pending()
    }

    fn execute(&mut self, command: Command) -> Result<(), EditorError> {
        tracing::debug!(?command, "Applying builder command");
        self.course = apply(self.course.clone(), command)?;
        Ok(())
    }

    fn fresh_id(&self, mint: impl Fn(&IdGenerator) -> String) -> String {
        loop {
            let id = mint(self.ids.as_ref());
            if !self.course.contains_id(&id) {
                return id;
            }
        }
    }

    /// Append a "Novo Módulo" and return its id.
    pub fn add_module(&mut self) -> Result<String, EditorError> {
        let id = self.fresh_id(IdGenerator::module_id);
        self.execute(Command::AddModule { id: id.clone() })?;
        Ok(id)
    }

    /// Remove a module. Pending suggestions for it or its lessons are dropped.
    pub fn remove_module(&mut self, module_id: &str) -> Result<(), EditorError> {
        if let Some(module) = self.course.module(module_id) {
            for lesson in &module.lessons {
                self.tickets
                    .invalidate(&SuggestionTarget::Lesson(lesson.id.clone()));
            }
            self.tickets
                .invalidate(&SuggestionTarget::Module(module_id.to_string()));
        }
        self.execute(Command::RemoveModule {
            module_id: module_id.to_string(),
        })
    }

    /// Append a "Nova Aula" to a module and return its id.
    pub fn add_lesson(&mut self, module_id: &str) -> Result<String, EditorError> {
        if self.course.module(module_id).is_none() {
            return Err(EditorError::ModuleNotFound {
                id: module_id.to_string(),
            });
        }
        let id = self.fresh_id(IdGenerator::lesson_id);
        self.execute(Command::AddLesson {
            module_id: module_id.to_string(),
            lesson_id: id.clone(),
        })?;
        Ok(id)
    }

    /// Remove a lesson from a module. A pending suggestion for the lesson is
    /// dropped only when the lesson was actually in that module.
    pub fn remove_lesson(&mut self, module_id: &str, lesson_id: &str) -> Result<(), EditorError> {
        let owned = self
            .course
            .module(module_id)
            .is_some_and(|m| m.lessons.iter().any(|l| l.id == lesson_id));
        if owned {
            self.tickets
                .invalidate(&SuggestionTarget::Lesson(lesson_id.to_string()));
        }
        self.execute(Command::RemoveLesson {
            module_id: module_id.to_string(),
            lesson_id: lesson_id.to_string(),
        })
    }

    pub fn update_lesson(&mut self, lesson: Lesson) -> Result<(), EditorError> {
        self.execute(Command::UpdateLesson(lesson))
    }

    pub fn reorder_lessons(
        &mut self,
        module_id: &str,
        from: usize,
        to: usize,
    ) -> Result<(), EditorError> {
        self.execute(Command::ReorderLessons {
            module_id: module_id.to_string(),
            from,
            to,
        })
    }

    pub fn rename_module(&mut self, module_id: &str, title: &str) -> Result<(), EditorError> {
        self.execute(Command::RenameModule {
            module_id: module_id.to_string(),
            title: title.to_string(),
        })
    }

    pub fn update_design(&mut self, design: DesignSettings) -> Result<(), EditorError> {
        self.execute(Command::UpdateDesign(design))
    }

    /// Open a content editor on a copy of the lesson.
    pub fn open_editor(&self, lesson_id: &str) -> Result<ContentEditor, EditorError> {
        let (_, lesson) =
            self.course
                .find_lesson(lesson_id)
                .ok_or_else(|| EditorError::LessonNotFound {
                    id: lesson_id.to_string(),
                })?;
        Ok(ContentEditor::new(
            lesson.clone(),
            self.course.onboarding.topic.clone(),
        ))
    }

    /// Write the editor's lesson back into the tree.
    pub fn save_editor(&mut self, editor: ContentEditor) -> Result<(), EditorError> {
        self.update_lesson(editor.save())
    }

    fn current_title(&self, target: &SuggestionTarget) -> Result<&str, EditorError> {
        match target {
            SuggestionTarget::Module(id) => self
                .course
                .module(id)
                .map(|m| m.title.as_str())
                .ok_or_else(|| EditorError::ModuleNotFound { id: id.clone() }),
            SuggestionTarget::Lesson(id) => self
                .course
                .find_lesson(id)
                .map(|(_, l)| l.title.as_str())
                .ok_or_else(|| EditorError::LessonNotFound { id: id.clone() }),
        }
    }

    /// Issue a ticket and build the prompt for a title suggestion.
    pub fn request_title(
        &mut self,
        target: SuggestionTarget,
        context: Option<&str>,
    ) -> Result<TitleRequest, EditorError> {
        let prompt = prompts::title_prompt(
            &self.course.onboarding.topic,
            target.kind_phrase(),
            self.current_title(&target)?,
            context,
        );
        let ticket = self.tickets.issue(target);
        Ok(TitleRequest { ticket, prompt })
    }

    /// Apply a suggestion reply if its ticket is still current.
    ///
    /// `reply` is `None` when the collaborator failed; the title is then left
    /// as it was.
    pub fn resolve_title(
        &mut self,
        ticket: &SuggestionTicket,
        reply: Option<String>,
    ) -> SuggestionOutcome {
        if !self.tickets.settle(ticket) {
            tracing::debug!(target = %ticket.target, "Discarding stale title suggestion");
            return SuggestionOutcome::Discarded;
        }
        let Some(title) = reply.as_deref().and_then(suggest::clean_title) else {
            return SuggestionOutcome::Discarded;
        };

        let applied = match &ticket.target {
            SuggestionTarget::Module(id) => self.rename_module(id, &title),
            SuggestionTarget::Lesson(id) => match self.course.find_lesson(id) {
                Some((_, lesson)) => {
                    let mut lesson = lesson.clone();
                    lesson.title = title.clone();
                    self.update_lesson(lesson)
                }
                None => Err(EditorError::LessonNotFound { id: id.clone() }),
            },
        };

        match applied {
            Ok(()) => SuggestionOutcome::Applied { title },
            Err(e) => {
                tracing::debug!(error = %e, "Title suggestion target disappeared");
                SuggestionOutcome::Discarded
            }
        }
    }

    /// Request, await and resolve a title suggestion in one go.
    pub async fn suggest_title(
        &mut self,
        collaborator: &Collaborator,
        target: SuggestionTarget,
        context: Option<&str>,
    ) -> Result<SuggestionOutcome, EditorError> {
        let request = self.request_title(target, context)?;
        let reply = match collaborator.try_generate_text(&request.prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(error = %e, "Title suggestion failed, keeping current title");
                None
            }
        };
        Ok(self.resolve_title(&request.ticket, reply))
    }
}
