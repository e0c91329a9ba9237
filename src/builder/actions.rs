//! Textual commands accepted by the builder prompt.

use anyhow::{Result, bail};

/// One line typed at the builder prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderAction {
    AddModule,
    RemoveModule(String),
    AddLesson(String),
    RemoveLesson { module_id: String, lesson_id: String },
    /// Positions are 1-based as typed; converted to indices by the caller.
    Move { module_id: String, from: usize, to: usize },
    Rename { module_id: String, title: String },
    Edit(String),
    SuggestModule(String),
    SuggestLesson(String),
    Design,
    Next,
    Previous,
    Publish,
    Help,
    Quit,
}

pub const HELP: &str = "\
Comandos:
  add-module                  adicionar módulo
  rm-module <m>               remover módulo
  add-lesson <m>              adicionar aula ao módulo
  rm-lesson <m> <l>           remover aula
  move <m> <de> <para>        mover aula (posições a partir de 1)
  rename <m> <título...>      renomear módulo
  edit <l>                    abrir editor de conteúdo
  suggest module|lesson <id>  sugerir título com IA
  design                      editar cor, fonte e logo
  next / prev                 avançar ou voltar etapa
  publish                     publicar o curso
  help                        mostrar esta ajuda
  quit                        sair";

fn position(value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => bail!("Invalid position '{}': expected a number starting at 1", value),
    }
}

/// Parse a builder command line.
pub fn parse_builder_action(input: &str) -> Result<BuilderAction> {
    let input = input.trim();
    let mut words = input.split_whitespace();
    let Some(verb) = words.next() else {
        bail!("Empty command. Type 'help' for the list of commands");
    };
    let args: Vec<&str> = words.collect();

    let action = match (verb.to_lowercase().as_str(), args.as_slice()) {
        ("add-module", []) => BuilderAction::AddModule,
        ("rm-module", [m]) => BuilderAction::RemoveModule(m.to_string()),
        ("add-lesson", [m]) => BuilderAction::AddLesson(m.to_string()),
        ("rm-lesson", [m, l]) => BuilderAction::RemoveLesson {
            module_id: m.to_string(),
            lesson_id: l.to_string(),
        },
        ("move", [m, from, to]) => BuilderAction::Move {
            module_id: m.to_string(),
            from: position(from)?,
            to: position(to)?,
        },
        ("rename", [m, rest @ ..]) if !rest.is_empty() => BuilderAction::Rename {
            module_id: m.to_string(),
            title: rest.join(" "),
        },
        ("edit", [l]) => BuilderAction::Edit(l.to_string()),
        ("suggest", [kind, id]) => match kind.to_lowercase().as_str() {
            "module" | "modulo" => BuilderAction::SuggestModule(id.to_string()),
            "lesson" | "aula" => BuilderAction::SuggestLesson(id.to_string()),
            _ => bail!("Usage: suggest module|lesson <id>"),
        },
        ("design", []) => BuilderAction::Design,
        ("next" | "n", []) => BuilderAction::Next,
        ("prev" | "p", []) => BuilderAction::Previous,
        ("publish", []) => BuilderAction::Publish,
        ("help" | "h" | "?", []) => BuilderAction::Help,
        ("quit" | "q", []) => BuilderAction::Quit,
        ("rm-module" | "add-lesson" | "edit", _) => bail!("Usage: {} <id>", verb),
        ("rm-lesson", _) => bail!("Usage: rm-lesson <module> <lesson>"),
        ("move", _) => bail!("Usage: move <module> <from> <to>"),
        ("rename", _) => bail!("Usage: rename <module> <title...>"),
        ("suggest", _) => bail!("Usage: suggest module|lesson <id>"),
        _ => bail!("Unknown command '{}'. Type 'help' for the list of commands", input),
    };
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_verbs() {
        assert_eq!(parse_builder_action("add-module").unwrap(), BuilderAction::AddModule);
        assert_eq!(parse_builder_action("  NEXT ").unwrap(), BuilderAction::Next);
        assert_eq!(parse_builder_action("p").unwrap(), BuilderAction::Previous);
        assert_eq!(parse_builder_action("q").unwrap(), BuilderAction::Quit);
        assert_eq!(parse_builder_action("?").unwrap(), BuilderAction::Help);
    }

    #[test]
    fn test_parse_with_ids() {
        assert_eq!(
            parse_builder_action("rm-lesson m1 l2").unwrap(),
            BuilderAction::RemoveLesson {
                module_id: "m1".into(),
                lesson_id: "l2".into()
            }
        );
        assert_eq!(
            parse_builder_action("edit l3").unwrap(),
            BuilderAction::Edit("l3".into())
        );
        assert_eq!(
            parse_builder_action("suggest aula l3").unwrap(),
            BuilderAction::SuggestLesson("l3".into())
        );
    }

    #[test]
    fn test_parse_rename_keeps_full_title() {
        assert_eq!(
            parse_builder_action("rename m1 Fórmulas e   Funções").unwrap(),
            BuilderAction::Rename {
                module_id: "m1".into(),
                title: "Fórmulas e Funções".into()
            }
        );
        assert!(parse_builder_action("rename m1").is_err());
    }

    #[test]
    fn test_parse_move_positions() {
        assert_eq!(
            parse_builder_action("move m1 1 3").unwrap(),
            BuilderAction::Move {
                module_id: "m1".into(),
                from: 1,
                to: 3
            }
        );
        assert!(parse_builder_action("move m1 0 3").is_err());
        assert!(parse_builder_action("move m1 x 3").is_err());
    }

    #[test]
    fn test_parse_usage_errors() {
        let err = parse_builder_action("edit").unwrap_err().to_string();
        assert!(err.contains("Usage: edit <id>"));
        assert!(parse_builder_action("").is_err());
        assert!(parse_builder_action("suggest course m1").is_err());
        let err = parse_builder_action("fly").unwrap_err().to_string();
        assert!(err.contains("Unknown command"));
    }
}
