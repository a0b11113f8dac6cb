//! Context-dependent command listing.

use serde::Serialize;

use super::builtin::{builtin_commands, CommandContext};
use crate::session::Language;

/// One entry of the command palette offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableCommand {
    pub action: String,
    pub command: String,
    pub category: String,
    pub description: String,
    pub examples: Vec<String>,
    pub requires_param: bool,
}

/// Commands usable in `context`, in table order.
///
/// While a yes/no answer is awaited the palette also offers the two answers.
pub fn available_commands(context: CommandContext, language: Language) -> Vec<AvailableCommand> {
    let mut commands: Vec<AvailableCommand> = builtin_commands()
        .iter()
        .filter(|cmd| cmd.is_available_in(context))
        .map(|cmd| AvailableCommand {
            action: cmd.action.to_string(),
            command: format!("/{}", cmd.name),
            category: cmd.category.to_string(),
            description: language.pick(cmd.description, cmd.description_he).to_string(),
            examples: cmd.examples.iter().map(|e| e.to_string()).collect(),
            requires_param: cmd.requires_param,
        })
        .collect();

    if context == CommandContext::PendingConfirmation {
        commands.push(confirmation_entry(
            "yes_response",
            language.pick("yes", "כן"),
            "✅ Confirm",
            language.pick("Confirm the action", "אישור הפעולה"),
            language.pick("yes|yeah|sure|ok", "כן|כן בבקשה|כן תודה"),
        ));
        commands.push(confirmation_entry(
            "no_response",
            language.pick("no", "לא"),
            "❌ Decline",
            language.pick("Decline the action", "דחיית הפעולה"),
            language.pick("no|nope|cancel", "לא|לא תודה|ביטול"),
        ));
    }

    commands
}

fn confirmation_entry(
    action: &str,
    command: &str,
    category: &str,
    description: &str,
    examples: &str,
) -> AvailableCommand {
    AvailableCommand {
        action: action.to_string(),
        command: command.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        examples: examples.split('|').map(str::to_string).collect(),
        requires_param: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(context: CommandContext) -> Vec<String> {
        available_commands(context, Language::En)
            .into_iter()
            .map(|c| c.command)
            .collect()
    }

    #[test]
    fn test_main_context_offers_search_not_note_actions() {
        let cmds = names(CommandContext::Main);
        assert!(cmds.contains(&"/createnote".to_string()));
        assert!(cmds.contains(&"/findnote".to_string()));
        assert!(!cmds.contains(&"/delete".to_string()));
        assert!(!cmds.contains(&"/back".to_string()));
    }

    #[test]
    fn test_editing_context_is_narrow() {
        assert_eq!(
            names(CommandContext::StoryEditing),
            vec!["/help", "/stopediting", "/back", "/cancel"]
        );
    }

    #[test]
    fn test_pending_context_offers_answers_in_language() {
        let cmds = available_commands(CommandContext::PendingConfirmation, Language::He);
        let last_two: Vec<&str> = cmds.iter().rev().take(2).map(|c| c.command.as_str()).collect();
        assert_eq!(last_two, vec!["לא", "כן"]);
    }
}
