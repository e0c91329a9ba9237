//! Title suggestions and their tickets.
//!
//! Every request for a title is issued a ticket carrying a generation number
//! for its target. Asking again for the same target, deleting the target, or
//! deleting the module that owns it moves the generation on, so a reply that
//! arrives for an older ticket is discarded instead of overwriting the tree.

use std::collections::HashMap;

/// The tree node a title is being suggested for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SuggestionTarget {
    Module(String),
    Lesson(String),
}

impl SuggestionTarget {
    pub fn id(&self) -> &str {
        match self {
            SuggestionTarget::Module(id) | SuggestionTarget::Lesson(id) => id,
        }
    }

    /// Noun with article, as it appears in the prompt.
    pub fn kind_phrase(&self) -> &'static str {
        match self {
            SuggestionTarget::Module(_) => "o módulo",
            SuggestionTarget::Lesson(_) => "a aula",
        }
    }
}

impl std::fmt::Display for SuggestionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            SuggestionTarget::Module(_) => "module",
            SuggestionTarget::Lesson(_) => "lesson",
        };
        write!(f, "{} {}", kind, self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionTicket {
    pub target: SuggestionTarget,
    pub generation: u64,
}

/// Outstanding tickets, at most one live ticket per target.
#[derive(Debug, Default)]
pub struct TicketBook {
    counter: u64,
    live: HashMap<SuggestionTarget, u64>,
}

impl TicketBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for `target`, superseding any earlier one.
    pub fn issue(&mut self, target: SuggestionTarget) -> SuggestionTicket {
        self.counter += 1;
        self.live.insert(target.clone(), self.counter);
        SuggestionTicket {
            target,
            generation: self.counter,
        }
    }

    pub fn is_current(&self, ticket: &SuggestionTicket) -> bool {
        self.live.get(&ticket.target) == Some(&ticket.generation)
    }

    /// Drop the live ticket for `target`, if any.
    pub fn invalidate(&mut self, target: &SuggestionTarget) {
        self.live.remove(target);
    }

    /// Consume a ticket. Returns whether it was still current.
    pub fn settle(&mut self, ticket: &SuggestionTicket) -> bool {
        if self.is_current(ticket) {
            self.live.remove(&ticket.target);
            true
        } else {
            false
        }
    }

    pub fn pending(&self) -> usize {
        self.live.len()
    }
}

/// A title request ready to be sent to the collaborator.
#[derive(Debug, Clone)]
pub struct TitleRequest {
    pub ticket: SuggestionTicket,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    Applied { title: String },
    Discarded,
}

/// Reduce a model reply to a single clean title.
///
/// Keeps the first non-empty line and strips surrounding quotes and
/// whitespace. Returns `None` when nothing usable is left.
pub fn clean_title(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let title = line
        .trim_matches(|c| matches!(c, '"' | '\'' | '“' | '”' | '*'))
        .trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: &str) -> SuggestionTarget {
        SuggestionTarget::Lesson(id.to_string())
    }

    #[test]
    fn test_ticket_current_until_settled() {
        let mut book = TicketBook::new();
        let ticket = book.issue(lesson("l1"));
        assert!(book.is_current(&ticket));
        assert!(book.settle(&ticket));
        assert!(!book.settle(&ticket));
        assert_eq!(book.pending(), 0);
    }

    #[test]
    fn test_newer_request_supersedes_older() {
        let mut book = TicketBook::new();
        let first = book.issue(lesson("l1"));
        let second = book.issue(lesson("l1"));
        assert!(!book.is_current(&first));
        assert!(book.is_current(&second));
    }

    #[test]
    fn test_invalidate_discards_ticket() {
        let mut book = TicketBook::new();
        let ticket = book.issue(lesson("l1"));
        let other = book.issue(SuggestionTarget::Module("l1".into()));
        book.invalidate(&lesson("l1"));
        assert!(!book.settle(&ticket));
        // Same id under a different kind is a different target
        assert!(book.is_current(&other));
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("  \"Fórmulas Essenciais\"  "), Some("Fórmulas Essenciais".into()));
        assert_eq!(clean_title("\n\nTítulo\nexplicação extra"), Some("Título".into()));
        assert_eq!(clean_title("**Negrito**"), Some("Negrito".into()));
        assert_eq!(clean_title("   \n \"\" "), None);
    }

    #[test]
    fn test_kind_phrase() {
        assert_eq!(SuggestionTarget::Module("m1".into()).kind_phrase(), "o módulo");
        assert_eq!(lesson("l1").kind_phrase(), "a aula");
    }

    #[test]
    fn test_target_id_and_display() {
        let module = SuggestionTarget::Module("m7".into());
        assert_eq!(module.id(), "m7");
        assert_eq!(module.to_string(), "module m7");
        assert_eq!(lesson("l3").to_string(), "lesson l3");
    }
}
