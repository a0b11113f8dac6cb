//! Builtin slash commands provided by the system.
//!
//! One table drives command matching, alias resolution, `/help` output and
//! the context-dependent command listing. It is built once and cached for the
//! lifetime of the process.

use serde::Serialize;
use std::sync::OnceLock;

use crate::intent::ActionTag;
use crate::session::{Mode, SessionState};

/// Where the user currently is in the conversation, for command listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandContext {
    Main,
    FindContext,
    StoryEditing,
    AiConversation,
    PendingConfirmation,
}

impl CommandContext {
    /// Derives the listing context from session state.
    ///
    /// Story editing wins over AI conversation, which wins over anything
    /// awaiting a yes/no, which wins over an active find context.
    pub fn of(state: &SessionState) -> Self {
        match state.mode() {
            Mode::StoryEditing { .. } => Self::StoryEditing,
            Mode::AiConversation { .. } => Self::AiConversation,
            Mode::AwaitingSubNoteName { .. } => Self::PendingConfirmation,
            _ if state.pending().is_some() => Self::PendingConfirmation,
            _ if state.find_context().is_some() => Self::FindContext,
            _ => Self::Main,
        }
    }
}

/// A builtin slash command provided by the system.
#[derive(Debug, Clone, Serialize)]
pub struct BuiltinSlashCommand {
    /// Canonical command name (without the leading /)
    pub name: &'static str,
    /// Action the command classifies to
    pub action: ActionTag,
    /// Extra accepted names besides the canonical one
    pub aliases: &'static [&'static str],
    /// Usage format (e.g., "/findnote [query]")
    pub usage: &'static str,
    /// Listing category with its glyph
    pub category: &'static str,
    pub description: &'static str,
    pub description_he: &'static str,
    pub examples: &'static [&'static str],
    pub requires_param: bool,
    /// Contexts in which the command is offered
    pub contexts: &'static [CommandContext],
}

impl BuiltinSlashCommand {
    /// True when an already normalized token names this command.
    pub fn is_named(&self, normalized: &str) -> bool {
        self.name == normalized || self.aliases.iter().any(|alias| *alias == normalized)
    }

    pub fn is_available_in(&self, context: CommandContext) -> bool {
        self.contexts.contains(&context)
    }
}

use CommandContext::{
    AiConversation as Ai, FindContext as Found, Main, PendingConfirmation as Pending,
    StoryEditing as Editing,
};

/// Static storage for builtin commands (initialized once).
static BUILTIN_COMMANDS: OnceLock<Vec<BuiltinSlashCommand>> = OnceLock::new();

/// Returns a reference to all builtin slash commands.
pub fn builtin_commands() -> &'static [BuiltinSlashCommand] {
    BUILTIN_COMMANDS.get_or_init(|| {
        vec![
            BuiltinSlashCommand {
                name: "createnote",
                action: ActionTag::SlashCreateNote,
                aliases: &["create"],
                usage: "/createnote [title]",
                category: "📝 Create",
                description: "Create a new note",
                description_he: "יצירת פתק חדש",
                examples: &["/createnote groceries", "/createnote my task"],
                requires_param: true,
                contexts: &[Main],
            },
            BuiltinSlashCommand {
                name: "findnote",
                action: ActionTag::SlashFindNote,
                aliases: &["find"],
                usage: "/findnote [query]",
                category: "🔍 Find",
                description: "Search notes by title",
                description_he: "חיפוש פתקים לפי כותרת",
                examples: &["/findnote shopping", "/findnote my tasks"],
                requires_param: true,
                contexts: &[Main],
            },
            BuiltinSlashCommand {
                name: "findbyid",
                action: ActionTag::SlashFindById,
                aliases: &["id"],
                usage: "/findbyid [id]",
                category: "🔍 Find",
                description: "Find a note by its ID number",
                description_he: "חיפוש פתק לפי מספר מזהה",
                examples: &["/findbyid 5", "/findbyid 12"],
                requires_param: true,
                contexts: &[Main],
            },
            BuiltinSlashCommand {
                name: "showparents",
                action: ActionTag::SlashShowParents,
                aliases: &["parents"],
                usage: "/showparents",
                category: "📋 Show",
                description: "Show all parent notes",
                description_he: "הצגת כל הפתקים הראשיים",
                examples: &["/showparents"],
                requires_param: false,
                contexts: &[Main, Found],
            },
            BuiltinSlashCommand {
                name: "help",
                action: ActionTag::SlashHelp,
                aliases: &[],
                usage: "/help",
                category: "❓ Help",
                description: "Show available commands",
                description_he: "הצגת הפקודות הזמינות",
                examples: &["/help"],
                requires_param: false,
                contexts: &[Main, Found, Editing, Ai, Pending],
            },
            BuiltinSlashCommand {
                name: "editdescription",
                action: ActionTag::SlashEditdescription,
                aliases: &["editdesc"],
                usage: "/editdescription",
                category: "✏️ Edit",
                description: "Edit the description of the current note",
                description_he: "עריכת התיאור של הפתק הנוכחי",
                examples: &["/editdescription"],
                requires_param: false,
                contexts: &[Found],
            },
            BuiltinSlashCommand {
                name: "markdone",
                action: ActionTag::SlashMarkdone,
                aliases: &[],
                usage: "/markdone",
                category: "✅ Mark",
                description: "Mark the current note as done",
                description_he: "סימון הפתק הנוכחי כהושלם",
                examples: &["/markdone"],
                requires_param: false,
                contexts: &[Found],
            },
            BuiltinSlashCommand {
                name: "delete",
                action: ActionTag::SlashDelete,
                aliases: &[],
                usage: "/delete",
                category: "🗑️ Delete",
                description: "Delete the current note",
                description_he: "מחיקת הפתק הנוכחי",
                examples: &["/delete"],
                requires_param: false,
                contexts: &[Found],
            },
            BuiltinSlashCommand {
                name: "createsub",
                action: ActionTag::SlashCreatesub,
                aliases: &[],
                usage: "/createsub",
                category: "📝 Create",
                description: "Create a sub-note under the current note",
                description_he: "יצירת תת-פתק תחת הפתק הנוכחי",
                examples: &["/createsub"],
                requires_param: false,
                contexts: &[Found],
            },
            BuiltinSlashCommand {
                name: "talkai",
                action: ActionTag::SlashTalkai,
                aliases: &[],
                usage: "/talkai",
                category: "🤖 AI",
                description: "Start an AI conversation about the current note",
                description_he: "התחלת שיחה עם AI על הפתק הנוכחי",
                examples: &["/talkai"],
                requires_param: false,
                contexts: &[Found],
            },
            BuiltinSlashCommand {
                name: "selectsubnote",
                action: ActionTag::SlashSelectsubnote,
                aliases: &["selectsub", "sub"],
                usage: "/selectsubnote [number]",
                category: "🔍 Navigate",
                description: "Select a sub-note by number",
                description_he: "בחירת תת-פתק לפי מספר",
                examples: &["/selectsubnote 2", "/selectsub 3", "/sub 4"],
                requires_param: true,
                contexts: &[Found],
            },
            BuiltinSlashCommand {
                name: "stopediting",
                action: ActionTag::SlashStopediting,
                aliases: &[],
                usage: "/stopediting",
                category: "📝 Edit",
                description: "Stop description editing",
                description_he: "סיום עריכת התיאור",
                examples: &["/stopediting"],
                requires_param: false,
                contexts: &[Editing],
            },
            BuiltinSlashCommand {
                name: "savelastmessage",
                action: ActionTag::SlashSavelastmessage,
                aliases: &[],
                usage: "/savelastmessage",
                category: "💾 Save",
                description: "Save the last AI answer into the note description",
                description_he: "שמירת תשובת ה-AI האחרונה בתיאור הפתק",
                examples: &["/savelastmessage"],
                requires_param: false,
                contexts: &[Main, Found],
            },
            BuiltinSlashCommand {
                name: "back",
                action: ActionTag::SlashBack,
                aliases: &[],
                usage: "/back",
                category: "🔙 Back",
                description: "Go back to normal mode",
                description_he: "חזרה למצב רגיל",
                examples: &["/back"],
                requires_param: false,
                contexts: &[Found, Editing, Ai, Pending],
            },
            BuiltinSlashCommand {
                name: "cancel",
                action: ActionTag::SlashCancel,
                aliases: &[],
                usage: "/cancel",
                category: "🔙 Back",
                description: "Cancel whatever is in progress",
                description_he: "ביטול הפעולה הנוכחית",
                examples: &["/cancel"],
                requires_param: false,
                contexts: &[Found, Editing, Ai, Pending],
            },
        ]
    })
}

/// Lowercases a command token and strips the leading `/` together with any
/// `_`/`-` separators, so `/Find_By-Id` and `/findbyid` coincide.
pub fn normalize_command_token(token: &str) -> String {
    token
        .trim()
        .trim_start_matches('/')
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Find a builtin command by name or alias, in any supported spelling.
pub fn find_builtin_command(token: &str) -> Option<&'static BuiltinSlashCommand> {
    let normalized = normalize_command_token(token);
    if normalized.is_empty() {
        return None;
    }
    builtin_commands()
        .iter()
        .find(|cmd| cmd.is_named(&normalized))
}

/// Find the builtin command that produces `action`.
pub fn command_for_action(action: ActionTag) -> Option<&'static BuiltinSlashCommand> {
    builtin_commands().iter().find(|cmd| cmd.action == action)
}
