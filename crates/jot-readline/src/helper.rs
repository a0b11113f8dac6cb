use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use jot_core::slash_command::builtin_commands;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// Completion, highlighting and hints for slash commands.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    /// Every builtin command name and alias, with its leading `/`.
    pub fn new() -> Self {
        let mut commands: Vec<String> = builtin_commands()
            .iter()
            .flat_map(|cmd| std::iter::once(cmd.name).chain(cmd.aliases.iter().copied()))
            .map(|name| format!("/{}", name))
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    fn candidates(&self, line: &str) -> Vec<&str> {
        if !line.starts_with('/') || line.contains(' ') {
            return Vec::new();
        }
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(String::as_str)
            .collect()
    }

    fn hint_for(&self, line: &str) -> Option<String> {
        self.candidates(line)
            .into_iter()
            .find(|cmd| cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .candidates(&line[..pos])
            .into_iter()
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        self.hint_for(&line[..pos])
    }
}

impl Validator for CliHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_include_aliases() {
        let helper = CliHelper::new();
        let found = helper.candidates("/find");
        assert!(found.contains(&"/find"));
        assert!(found.contains(&"/findnote"));
        assert!(helper.candidates("/createnote groceries").is_empty());
        assert!(helper.candidates("hello").is_empty());
    }

    #[test]
    fn test_hint_completes_the_command() {
        let helper = CliHelper::new();
        assert_eq!(helper.hint_for("/showpar").as_deref(), Some("ents"));
        assert_eq!(helper.hint_for("/nosuch"), None);
    }
}
