//! `facecourses start`: the interactive wizard.
//!
//! Drives a [`Session`] through login, onboarding, the builder prompt and the
//! dashboard. All state lives in the session; this module only reads input
//! and prints.

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};
use std::path::Path;

use facecourses::ai::Collaborator;
use facecourses::auth::Credentials;
use facecourses::builder::actions::{BuilderAction, HELP, parse_builder_action};
use facecourses::builder::{BuilderStep, CourseBuilder, SuggestionOutcome, SuggestionTarget};
use facecourses::config::Config;
use facecourses::course::{
    Audience, CourseFormat, DesignSettings, FONT_OPTIONS, LANGUAGE_OPTIONS, LessonType,
    OnboardingData, PodcastSpeakers, VideoType, is_valid_color,
};
use facecourses::editor::{ContentEditor, RewriteAction};
use facecourses::onboarding::SuggestionMode;
use facecourses::session::{Phase, Session};
use facecourses::ui::icons::{CHECK, CROSS, LINK, ROCKET, SPARKLE, WARN};
use facecourses::ui::render::{render_design, render_step, render_templates};
use facecourses::ui::{render_lesson, render_tree, with_spinner};

fn error_line(message: impl std::fmt::Display) {
    println!("{}{}", CROSS, style(message).red());
}

fn ok_line(message: impl std::fmt::Display) {
    println!("{}{}", CHECK, message);
}

pub async fn cmd_start(
    config: &Config,
    mode: Option<SuggestionMode>,
    export: Option<&Path>,
) -> Result<()> {
    let collaborator = config.build_collaborator()?;
    if config.is_offline() || config.api_key().is_none() {
        println!(
            "{}{}",
            WARN,
            style("Modo offline: o conteúdo gerado usará respostas padrão.").yellow()
        );
    }

    let mut session = Session::new(collaborator, config.session_settings(mode));
    let theme = ColorfulTheme::default();

    loop {
        match session.phase() {
            Phase::Login => login_screen(&mut session, &theme)?,
            Phase::Onboarding => {
                onboarding_screen(&mut session, &theme, config.default_language()).await?
            }
            Phase::Building => {
                if !builder_screen(&mut session, &theme).await? {
                    println!("Até logo!");
                    return Ok(());
                }
            }
            Phase::Published => {
                if !dashboard_screen(&mut session, &theme, export)? {
                    return Ok(());
                }
            }
        }
    }
}

fn login_screen(session: &mut Session, theme: &ColorfulTheme) -> Result<()> {
    println!();
    println!("{}", style("FaceCourses: entre na sua conta").bold());

    loop {
        let email: String = Input::with_theme(theme)
            .with_prompt("Email")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read email")?;
        let password = Password::with_theme(theme)
            .with_prompt("Senha")
            .allow_empty_password(true)
            .interact()
            .context("Failed to read password")?;

        match session.login(&Credentials::new(email.trim(), password)) {
            Ok(()) => {
                ok_line("Login realizado.");
                return Ok(());
            }
            Err(e) => error_line(e),
        }
    }
}

fn select_index(theme: &ColorfulTheme, prompt: &str, items: &[String], default: usize) -> Result<usize> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .context("Failed to read selection")
}

async fn onboarding_screen(
    session: &mut Session,
    theme: &ColorfulTheme,
    default_language: &str,
) -> Result<()> {
    if let Some(templates) = session.templates() {
        println!();
        println!("{}", style("Escolha um modelo para o seu curso").bold());
        print!("{}", render_templates(templates));

        let mut items: Vec<String> = templates.iter().map(|t| t.name.clone()).collect();
        let back = items.len();
        items.push("Voltar ao formulário".to_string());

        let choice = select_index(theme, "Modelo", &items, 0)?;
        if choice == back {
            session.back_to_form()?;
        } else if let Err(e) = session.select_template(choice) {
            error_line(e);
        }
        return Ok(());
    }

    println!();
    println!("{}", style("Vamos criar o seu curso").bold());

    let topic: String = Input::with_theme(theme)
        .with_prompt("Tema do curso")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read topic")?;

    let audiences: Vec<String> = Audience::ALL.iter().map(|a| a.label().to_string()).collect();
    let audience = Audience::ALL[select_index(theme, "Público-alvo", &audiences, 0)?];

    let formats: Vec<String> = CourseFormat::ALL
        .iter()
        .map(|f| f.label().to_string())
        .collect();
    let format = CourseFormat::ALL[select_index(theme, "Formato preferido", &formats, 0)?];

    let languages: Vec<String> = LANGUAGE_OPTIONS
        .iter()
        .map(|(_, label)| label.to_string())
        .collect();
    let default_index = LANGUAGE_OPTIONS
        .iter()
        .position(|(code, _)| *code == default_language)
        .unwrap_or(0);
    let language = LANGUAGE_OPTIONS[select_index(theme, "Idioma", &languages, default_index)?].0;

    let data = OnboardingData::new(topic, audience, format).with_language(language);
    let submitted = with_spinner(
        "Gerando sugestões com IA...",
        session.submit_onboarding(data),
    )
    .await;

    match submitted {
        Ok(Phase::Building) => ok_line("Estrutura inicial criada."),
        Ok(_) => {}
        Err(e) => error_line(e),
    }
    Ok(())
}

fn print_builder(builder: &CourseBuilder) {
    println!();
    println!("{}", render_step(builder.step()));
    match builder.step() {
        BuilderStep::Structure => print!("{}", render_tree(builder.course())),
        BuilderStep::Design => {
            print!("{}", render_design(&builder.course().design));
            println!("  Use 'design' para editar.");
        }
        BuilderStep::Publish => {
            let course = builder.course();
            println!(
                "  {} módulos, {} aulas. Use 'publish' para publicar.",
                course.modules.len(),
                course.lesson_count()
            );
        }
    }
}

/// Returns `false` when the user quits.
async fn builder_screen(session: &mut Session, theme: &ColorfulTheme) -> Result<bool> {
    let collaborator = session.collaborator().clone();
    {
        let Some(builder) = session.builder_mut() else {
            return Ok(true);
        };
        print_builder(builder);
        println!("{}", style("Digite 'help' para ver os comandos.").dim());

        loop {
            let line: String = Input::with_theme(theme)
                .with_prompt("builder")
                .allow_empty(true)
                .interact_text()
                .context("Failed to read command")?;
            if line.trim().is_empty() {
                continue;
            }

            let action = match parse_builder_action(&line) {
                Ok(action) => action,
                Err(e) => {
                    error_line(e);
                    continue;
                }
            };

            match action {
                BuilderAction::Publish => break,
                BuilderAction::Quit => {
                    let discard = Confirm::with_theme(theme)
                        .with_prompt("Sair sem publicar? O curso será descartado.")
                        .default(false)
                        .interact()
                        .context("Failed to read confirmation")?;
                    if discard {
                        return Ok(false);
                    }
                }
                BuilderAction::Help => println!("{}", HELP),
                other => {
                    if let Err(e) = run_builder_action(builder, other, &collaborator, theme).await {
                        error_line(e);
                    }
                    print_builder(builder);
                }
            }
        }
    }

    let dashboard = session.publish()?;
    println!();
    println!("{}{}", ROCKET, style("Curso publicado!").green().bold());
    println!("{}{}", LINK, dashboard.shareable_link());
    Ok(true)
}

async fn run_builder_action(
    builder: &mut CourseBuilder,
    action: BuilderAction,
    collaborator: &Collaborator,
    theme: &ColorfulTheme,
) -> Result<()> {
    match action {
        BuilderAction::AddModule => {
            let id = builder.add_module()?;
            ok_line(format!("Módulo {} adicionado.", id));
        }
        BuilderAction::RemoveModule(module_id) => builder.remove_module(&module_id)?,
        BuilderAction::AddLesson(module_id) => {
            let id = builder.add_lesson(&module_id)?;
            ok_line(format!("Aula {} adicionada.", id));
        }
        BuilderAction::RemoveLesson {
            module_id,
            lesson_id,
        } => builder.remove_lesson(&module_id, &lesson_id)?,
        BuilderAction::Move {
            module_id,
            from,
            to,
        } => builder.reorder_lessons(&module_id, from - 1, to - 1)?,
        BuilderAction::Rename { module_id, title } => builder.rename_module(&module_id, &title)?,
        BuilderAction::Edit(lesson_id) => {
            let editor = builder.open_editor(&lesson_id)?;
            if let Some(editor) = editor_screen(editor, collaborator, theme).await? {
                builder.save_editor(editor)?;
                ok_line("Aula salva.");
            }
        }
        BuilderAction::SuggestModule(id) => {
            suggest(builder, SuggestionTarget::Module(id), collaborator, theme).await?
        }
        BuilderAction::SuggestLesson(id) => {
            suggest(builder, SuggestionTarget::Lesson(id), collaborator, theme).await?
        }
        BuilderAction::Design => design_screen(builder, theme)?,
        BuilderAction::Next => {
            builder.next_step();
        }
        BuilderAction::Previous => {
            builder.previous_step();
        }
        BuilderAction::Publish | BuilderAction::Help | BuilderAction::Quit => {}
    }
    Ok(())
}

async fn suggest(
    builder: &mut CourseBuilder,
    target: SuggestionTarget,
    collaborator: &Collaborator,
    theme: &ColorfulTheme,
) -> Result<()> {
    let context: String = Input::with_theme(theme)
        .with_prompt("Contexto adicional (opcional)")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read context")?;
    let context = Some(context.trim()).filter(|c| !c.is_empty());

    let outcome = with_spinner(
        "Sugerindo título...",
        builder.suggest_title(collaborator, target, context),
    )
    .await?;

    match outcome {
        SuggestionOutcome::Applied { title } => println!("{}Novo título: {}", SPARKLE, title),
        SuggestionOutcome::Discarded => {
            println!("{}Não foi possível sugerir um título agora.", WARN)
        }
    }
    Ok(())
}

fn design_screen(builder: &mut CourseBuilder, theme: &ColorfulTheme) -> Result<()> {
    let current = builder.course().design.clone();

    let primary_color: String = Input::with_theme(theme)
        .with_prompt("Cor principal (#RRGGBB)")
        .with_initial_text(current.primary_color.clone())
        .validate_with(|value: &String| -> Result<(), &str> {
            if is_valid_color(value.trim()) {
                Ok(())
            } else {
                Err("Use o formato #RRGGBB")
            }
        })
        .interact_text()
        .context("Failed to read colour")?;

    let fonts: Vec<String> = FONT_OPTIONS.iter().map(|f| f.to_string()).collect();
    let font_index = FONT_OPTIONS
        .iter()
        .position(|f| *f == current.font)
        .unwrap_or(0);
    let font = FONT_OPTIONS[select_index(theme, "Fonte", &fonts, font_index)?].to_string();

    let logo_url: String = Input::with_theme(theme)
        .with_prompt("URL do logo (opcional)")
        .with_initial_text(current.logo_url.clone())
        .allow_empty(true)
        .interact_text()
        .context("Failed to read logo URL")?;

    builder.update_design(DesignSettings {
        primary_color: primary_color.trim().to_string(),
        font,
        logo_url: logo_url.trim().to_string(),
    })?;
    ok_line("Design atualizado.");
    Ok(())
}

const EDITOR_ACTIONS: &[&str] = &[
    "Salvar e fechar",
    "Editar título",
    "Alterar tipo",
    "Alterar duração",
    "Apresentação (narrativa / diálogo)",
    "Escrever conteúdo",
    "Gerar rascunho com IA",
    "Reescrever com IA (expandir / condensar / alterar)",
    "Gerar saídas finais",
    "Descartar alterações",
];

/// Returns the editor to save, or `None` when changes are discarded.
async fn editor_screen(
    mut editor: ContentEditor,
    collaborator: &Collaborator,
    theme: &ColorfulTheme,
) -> Result<Option<ContentEditor>> {
    loop {
        println!();
        print!("{}", render_lesson(editor.lesson()));
        let items: Vec<String> = EDITOR_ACTIONS.iter().map(|a| a.to_string()).collect();

        match select_index(theme, "Editor", &items, 0)? {
            0 => return Ok(Some(editor)),
            1 => {
                let title: String = Input::with_theme(theme)
                    .with_prompt("Título")
                    .with_initial_text(editor.lesson().title.clone())
                    .interact_text()
                    .context("Failed to read title")?;
                editor.set_title(title.trim());
            }
            2 => {
                let labels: Vec<String> = LessonType::ALL
                    .iter()
                    .map(|t| t.label().to_string())
                    .collect();
                let current = LessonType::ALL
                    .iter()
                    .position(|t| *t == editor.lesson().lesson_type)
                    .unwrap_or(0);
                editor.set_type(LessonType::ALL[select_index(theme, "Tipo", &labels, current)?]);
            }
            3 => {
                let duration: String = Input::with_theme(theme)
                    .with_prompt("Duração (ex.: 5s, 10 min)")
                    .with_initial_text(editor.lesson().duration_label().to_string())
                    .allow_empty(true)
                    .interact_text()
                    .context("Failed to read duration")?;
                editor.set_duration(duration.trim());
            }
            4 => presentation_screen(&mut editor, theme)?,
            5 => {
                let content: String = Input::with_theme(theme)
                    .with_prompt("Conteúdo (use \\n para quebrar linha)")
                    .allow_empty(true)
                    .interact_text()
                    .context("Failed to read content")?;
                editor.set_content(content.replace("\\n", "\n"));
            }
            6 => {
                with_spinner("Gerando rascunho...", editor.generate_draft(collaborator)).await;
            }
            7 => {
                let labels: Vec<String> = RewriteAction::ALL
                    .iter()
                    .map(|a| a.label().to_string())
                    .collect();
                let action = RewriteAction::ALL[select_index(theme, "Ação", &labels, 0)?];
                if editor.lesson().content.is_empty() {
                    error_line("Escreva ou gere um conteúdo antes de reescrever.");
                } else {
                    with_spinner("Reescrevendo...", editor.rewrite(collaborator, action)).await;
                }
            }
            8 => {
                let generated =
                    with_spinner("Gerando saídas finais...", editor.generate_outputs(collaborator))
                        .await;
                match generated {
                    Ok(outputs) if outputs.is_empty() => {
                        println!("{}Aulas de áudio não têm saídas finais.", WARN)
                    }
                    Ok(_) => ok_line("Saídas finais geradas."),
                    Err(e) => error_line(e),
                }
            }
            _ => {
                let discard = Confirm::with_theme(theme)
                    .with_prompt("Descartar as alterações desta aula?")
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
                if discard {
                    return Ok(None);
                }
            }
        }
    }
}

fn presentation_screen(editor: &mut ContentEditor, theme: &ColorfulTheme) -> Result<()> {
    let kinds = vec!["Narrativa".to_string(), "Diálogo".to_string()];
    let current = usize::from(editor.lesson().is_dialogue());
    if select_index(theme, "Apresentação", &kinds, current)? == 0 {
        editor.set_video_type(VideoType::Narrative);
        return Ok(());
    }
    editor.set_video_type(VideoType::Dialogue);

    let as_podcast = Confirm::with_theme(theme)
        .with_prompt("Transformar em podcast?")
        .default(editor.lesson().effective_podcast_speakers().is_some())
        .interact()
        .context("Failed to read confirmation")?;
    if !as_podcast {
        editor.disable_podcast();
        return Ok(());
    }

    let labels: Vec<String> = PodcastSpeakers::ALL
        .iter()
        .map(|s| s.label().to_string())
        .collect();
    let speakers = PodcastSpeakers::ALL[select_index(theme, "Vozes", &labels, 0)?];
    editor.enable_podcast(speakers);
    Ok(())
}

/// Returns `false` when the user exits.
fn dashboard_screen(
    session: &mut Session,
    theme: &ColorfulTheme,
    export: Option<&Path>,
) -> Result<bool> {
    let Some(dashboard) = session.dashboard() else {
        return Ok(true);
    };
    println!();
    print!("{}", dashboard.render());

    if let Some(path) = export {
        let json = serde_json::to_string_pretty(dashboard.course())
            .context("Failed to serialize course")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write export: {}", path.display()))?;
        ok_line(format!("Curso exportado para {}", path.display()));
    }

    let items = vec![
        "Criar novo curso".to_string(),
        "Sair da conta".to_string(),
        "Encerrar".to_string(),
    ];
    match select_index(theme, "E agora?", &items, 0)? {
        0 => session.start_over()?,
        1 => session.logout(),
        _ => return Ok(false),
    }
    Ok(true)
}
