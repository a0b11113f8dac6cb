//! Bilingual reply texts.
//!
//! Every user-facing sentence lives here so the formatter and the
//! confirmation protocol only decide *which* reply to give.

use jot_core::note::Note;
use jot_core::session::Language;
use jot_core::slash_command::builtin_commands;

/// Reply texts for one language.
#[derive(Debug, Clone, Copy)]
pub struct Texts {
    language: Language,
}

impl Texts {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn pick(&self, en: String, he: String) -> String {
        match self.language {
            Language::En => en,
            Language::He => he,
        }
    }

    fn fixed(&self, en: &str, he: &str) -> String {
        self.language.pick(en, he).to_string()
    }

    // ============================================================================
    // Menus and shared fragments
    // ============================================================================

    pub fn action_menu(&self) -> String {
        self.fixed(
            "What would you like to do? (/editdescription /delete /createsub /markdone /talkai /selectsubnote)",
            "מה תרצה לעשות? (/editdescription /delete /createsub /markdone /talkai /selectsubnote)",
        )
    }

    /// `'title' (ID: n).` followed by the tree and the action menu.
    fn note_with_tree(&self, lead: &str, note: &Note, tree: &str) -> String {
        format!(
            "{} '{}' (ID: {}).\n\n{}\n\n{}",
            lead,
            note.title,
            note.id,
            tree,
            self.action_menu()
        )
    }

    /// `i. glyph 'title' (ID: n)` list entry.
    pub fn list_entry(&self, position: usize, note: &Note) -> String {
        format!(
            "{}. {} '{}' (ID: {})",
            position,
            note.status_glyph(),
            note.title,
            note.id
        )
    }

    pub fn apology(&self) -> String {
        self.fixed(
            "Sorry, something went wrong. Please try again.",
            "מצטער, משהו השתבש. נסה שוב.",
        )
    }

    pub fn note_missing(&self) -> String {
        self.fixed(
            "That note no longer exists.",
            "הפתק הזה כבר לא קיים.",
        )
    }

    // ============================================================================
    // Create / find
    // ============================================================================

    pub fn ask_create_note(&self, title: &str) -> String {
        self.pick(
            format!("Do you want to create a note with title '{}'? (yes/no)", title),
            format!("האם תרצה ליצור פתק בשם '{}'? (כן/לא)", title),
        )
    }

    pub fn ask_note_title(&self) -> String {
        self.fixed(
            "What should be the title of the new note?",
            "מה תהיה הכותרת של הפתק החדש?",
        )
    }

    pub fn ask_find_query(&self) -> String {
        self.fixed(
            "What is the name of the note you're looking for?",
            "מה השם של הפתק שאתה מחפש?",
        )
    }

    pub fn ask_find_id(&self) -> String {
        self.fixed(
            "What is the ID of the note you're looking for?",
            "מה המזהה של הפתק שאתה מחפש?",
        )
    }

    pub fn no_notes_found(&self, query: &str) -> String {
        self.pick(
            format!("No notes found for '{}'", query),
            format!("לא נמצאו פתקים עבור '{}'", query),
        )
    }

    pub fn no_note_with_id(&self, id: &str) -> String {
        self.pick(
            format!("No note found with ID '{}'", id),
            format!("לא נמצא פתק עם מזהה '{}'", id),
        )
    }

    pub fn found_one(&self, note: &Note, tree: &str) -> String {
        self.note_with_tree(self.language.pick("Found 1 note:", "נמצא פתק 1:"), note, tree)
    }

    pub fn found_by_id(&self, note: &Note, tree: &str) -> String {
        self.note_with_tree(self.language.pick("Found note:", "נמצא פתק:"), note, tree)
    }

    /// `entries` are already numbered lines.
    pub fn found_many(&self, count: usize, entries: &[String]) -> String {
        let list: String = entries.iter().map(|e| format!("{}\n", e)).collect();
        self.pick(
            format!(
                "Found {} notes:\n{}\nWhich note would you like to select? (say the number or name)",
                count, list
            ),
            format!(
                "נמצאו {} פתקים:\n{}\nאיזה פתק תרצה לבחור? (אמור את המספר או השם)",
                count, list
            ),
        )
    }

    pub fn sub_note_count(&self, count: usize) -> String {
        match (self.language, count) {
            (Language::En, 1) => " [1 sub-note]".to_string(),
            (Language::En, n) => format!(" [{} sub-notes]", n),
            (Language::He, 1) => " [תת-פתק 1]".to_string(),
            (Language::He, n) => format!(" [{} תת-פתקים]", n),
        }
    }

    pub fn parents_list(&self, count: usize, entries: &[String]) -> String {
        let list: String = entries.iter().map(|e| format!("{}\n", e)).collect();
        self.pick(
            format!(
                "Found {} parent notes:\n\n{}\nTo work with a specific note, use `/findnote [name]` or `/findbyid [number]`.",
                count, list
            ),
            format!(
                "נמצאו {} פתקי אב:\n\n{}\nכדי לעבוד עם פתק מסוים, השתמש ב-`/findnote [שם]` או `/findbyid [מספר]`.",
                count, list
            ),
        )
    }

    pub fn no_parents(&self) -> String {
        self.fixed("No parent notes found.", "לא נמצאו פתקי אב.")
    }

    // ============================================================================
    // Selection
    // ============================================================================

    pub fn nothing_to_select(&self) -> String {
        self.fixed(
            "No notes found to select. Try searching first.",
            "לא נמצאו פתקים לבחירה. נסה לחפש קודם.",
        )
    }

    pub fn no_matching_note(&self) -> String {
        self.fixed(
            "No matching note found. Try again with ID or exact title.",
            "לא נמצא פתק תואם. נסה שוב עם מזהה או כותרת מדויקת.",
        )
    }

    pub fn selected_note(&self, note: &Note, tree: &str) -> String {
        self.note_with_tree(self.language.pick("Selected note:", "נבחר פתק:"), note, tree)
    }

    pub fn selected_sub_note(&self, note: &Note, tree: &str) -> String {
        self.note_with_tree(
            self.language.pick("Selected sub-note:", "נבחר תת-פתק:"),
            note,
            tree,
        )
    }

    pub fn select_sub_usage(&self) -> String {
        self.fixed(
            "Please specify the sub-note ID. For example: /selectsubnote 2",
            "אנא ציין את מזהה התת-פתק. לדוגמה: /selectsubnote 2",
        )
    }

    pub fn no_sub_note(&self, id: &str, parent_title: &str) -> String {
        self.pick(
            format!("No sub-note found with ID {} under '{}'", id, parent_title),
            format!("לא נמצא תת-פתק עם מזהה {} תחת '{}'", id, parent_title),
        )
    }

    // ============================================================================
    // Focus-note actions
    // ============================================================================

    /// "Search first" reply for a focus-note action without a find context.
    pub fn search_first(&self, topic: SearchFirst) -> String {
        let (en, he) = match topic {
            SearchFirst::WorkWith => ("No notes found to work with.", "לא נמצאו פתקים לעבודה."),
            SearchFirst::Edit => ("No notes found to edit.", "לא נמצאו פתקים לעריכה."),
            SearchFirst::Delete => ("No notes found to delete.", "לא נמצאו פתקים למחיקה."),
            SearchFirst::Mark => ("No notes found to mark.", "לא נמצאו פתקים לסימון."),
            SearchFirst::Discuss => ("No notes found to discuss.", "לא נמצאו פתקים לשיחה."),
            SearchFirst::Converse => (
                "No notes found for AI conversation.",
                "לא נמצאו פתקים לשיחה עם AI.",
            ),
            SearchFirst::SelectFrom => (
                "No notes found to select from.",
                "לא נמצאו פתקים לבחירה מתוכם.",
            ),
        };
        self.pick(
            format!("{} Try searching first.", en),
            format!("{} נסה לחפש קודם.", he),
        )
    }

    pub fn ask_sub_note_name(&self, parent_title: &str) -> String {
        self.pick(
            format!(
                "I'll create a sub-note under '{}'. What should be the name of the sub-note?",
                parent_title
            ),
            format!(
                "אצור תת-פתק תחת '{}'. מה יהיה השם של התת-פתק?",
                parent_title
            ),
        )
    }

    pub fn editing_started(&self, title: &str) -> String {
        self.pick(
            format!(
                "I'll start description editing mode for '{}'. Type or record the new content. To finish, say 'stop editing description'.",
                title
            ),
            format!(
                "אתחיל מצב עריכת תיאור עבור '{}'. הקלד או הקלט את התוכן החדש. לסיום, אמור 'עצור עריכת תיאור'.",
                title
            ),
        )
    }

    pub fn ask_delete(&self, title: &str) -> String {
        self.pick(
            format!("Do you want to delete the note '{}'? (yes/no)", title),
            format!("האם תרצה למחוק את הפתק '{}'? (כן/לא)", title),
        )
    }

    pub fn ask_mark_done(&self, title: &str) -> String {
        self.pick(
            format!("Do you want to mark the note '{}' as done? (yes/no)", title),
            format!("האם תרצה לסמן את הפתק '{}' כבוצע? (כן/לא)", title),
        )
    }

    pub fn incomplete_children(&self, title: &str, children: &[Note]) -> String {
        let list: String = children
            .iter()
            .enumerate()
            .map(|(i, child)| format!("{}. {} (ID: {})\n", i + 1, child.title, child.id))
            .collect();
        self.pick(
            format!(
                "Cannot mark note '{}' as done because it has incomplete sub-notes:\n{}\nPlease complete the sub-notes first.",
                title, list
            ),
            format!(
                "לא ניתן לסמן את הפתק '{}' כבוצע כי יש לו תת-פתקים שלא הושלמו:\n{}\nאנא השלם את התת-פתקים קודם.",
                title, list
            ),
        )
    }

    pub fn ai_started(&self, title: &str) -> String {
        self.pick(
            format!(
                "🤖 Started AI conversation about note '{}'. Say 'cancel' to end the conversation.",
                title
            ),
            format!(
                "🤖 התחלתי שיחה עם AI על הפתק '{}'. אמור 'בטל' כדי לסיים את השיחה.",
                title
            ),
        )
    }

    // ============================================================================
    // Story editing
    // ============================================================================

    pub fn story_added(&self) -> String {
        self.fixed(
            "✅ Added to story description. Continue writing or say 'stop editing description' to finish.",
            "✅ נוסף לתיאור. המשך לכתוב או אמור 'עצור עריכת תיאור' לסיום.",
        )
    }

    pub fn ask_update_description(&self, title: &str, text: &str) -> String {
        self.pick(
            format!(
                "Do you want to update the description for '{}' with: '{}'? (yes/no)",
                title, text
            ),
            format!("האם תרצה לעדכן את התיאור של '{}' עם: '{}'? (כן/לא)", title, text),
        )
    }

    pub fn no_story_content(&self) -> String {
        self.fixed(
            "No content was added to the story description.",
            "לא נוסף תוכן לתיאור.",
        )
    }

    pub fn not_editing(&self) -> String {
        self.fixed(
            "Not in description editing mode.",
            "לא במצב עריכת תיאור.",
        )
    }

    pub fn no_last_answer(&self) -> String {
        self.fixed(
            "There is no AI answer to save yet.",
            "עדיין אין תשובת AI לשמירה.",
        )
    }

    // ============================================================================
    // AI conversation
    // ============================================================================

    pub fn thinking(&self, title: &str) -> String {
        self.pick(
            format!("🤖 Thinking about '{}'...", title),
            format!("🤖 חושב על '{}'...", title),
        )
    }

    pub fn empty_message(&self) -> String {
        self.fixed(
            "I didn't understand your message.",
            "לא הבנתי את ההודעה שלך.",
        )
    }

    pub fn ai_cancelled(&self) -> String {
        self.fixed(
            "AI conversation cancelled. Back to main mode.",
            "שיחה עם AI בוטלה. חזרת למצב הראשי.",
        )
    }

    pub fn ai_only_in_conversation(&self) -> String {
        self.fixed(
            "🤖 AI is only available when talking with a specific note. Use '/talkai' to start an AI conversation about a note.",
            "🤖 AI זמין רק בשיחה על פתק מסוים. השתמש ב-'/talkai' כדי להתחיל שיחה עם AI על פתק.",
        )
    }

    // ============================================================================
    // Sub-notes, cancelling, fallbacks
    // ============================================================================

    pub fn ask_create_sub_note(&self, name: &str) -> String {
        self.pick(
            format!("Do you want to create a sub-note with title '{}'? (yes/no)", name),
            format!("האם תרצה ליצור תת-פתק בשם '{}'? (כן/לא)", name),
        )
    }

    pub fn no_pending_sub_note(&self) -> String {
        self.fixed(
            "No pending sub-note creation found.",
            "לא נמצאה יצירת תת-פתק ממתינה.",
        )
    }

    pub fn type_sub_note_name(&self) -> String {
        self.fixed(
            "Please type the name of the sub-note.",
            "אנא הקלד את שם התת-פתק.",
        )
    }

    pub fn settings_saved(&self) -> String {
        self.fixed("⚙️ Settings saved.", "⚙️ ההגדרות נשמרו.")
    }

    pub fn action_cancelled(&self) -> String {
        self.fixed("Action cancelled.", "פעולה בוטלה.")
    }

    pub fn back_to_normal(&self) -> String {
        self.fixed(
            "✅ Cancelled. Back to normal mode.",
            "✅ בוטל. חזרתי למצב רגיל.",
        )
    }

    pub fn unknown(&self) -> String {
        self.fixed(
            "I didn't understand that. Try '/createnote groceries' or '/findnote groceries', or type /help for all commands.",
            "לא הבנתי. נסה '/createnote קניות' או '/findnote קניות', או הקלד /help לכל הפקודות.",
        )
    }

    pub fn unknown_command(&self, command: &str) -> String {
        self.pick(
            format!("Unknown command: {}. Try /help for available commands.", command),
            format!("לא ידוע פקודה: {}. נסה /help לרשימת פקודות זמינות.", command),
        )
    }

    // ============================================================================
    // Confirmation outcomes
    // ============================================================================

    pub fn note_created(&self, note: &Note) -> String {
        self.pick(
            format!(
                "Note created successfully! ID: {}, Title: '{}'",
                note.id, note.title
            ),
            format!("פתק נוצר בהצלחה! ID: {}, כותרת: '{}'", note.id, note.title),
        )
    }

    pub fn sub_note_created(&self, note: &Note, parent: &Note) -> String {
        self.pick(
            format!(
                "Sub-note created successfully! ID: {}, Title: '{}'\n\nReturned to parent note '{}' context. {}",
                note.id,
                note.title,
                parent.title,
                self.action_menu()
            ),
            format!(
                "תת-פתק נוצר בהצלחה! ID: {}, כותרת: '{}'\n\nחזרתי להקשר של פתק האב '{}'. {}",
                note.id,
                note.title,
                parent.title,
                self.action_menu()
            ),
        )
    }

    pub fn description_updated(&self, title: &str) -> String {
        self.pick(
            format!("Story description for '{}' updated successfully!", title),
            format!("התיאור של '{}' עודכן בהצלחה!", title),
        )
    }

    pub fn note_deleted(&self, title: &str) -> String {
        self.pick(
            format!("Note '{}' deleted successfully!", title),
            format!("הפתק '{}' נמחק בהצלחה!", title),
        )
    }

    pub fn note_marked_done(&self, title: &str) -> String {
        self.pick(
            format!("Note '{}' marked as done successfully!", title),
            format!("הפתק '{}' סומן כבוצע בהצלחה!", title),
        )
    }

    pub fn creation_cancelled(&self) -> String {
        self.fixed("Note creation cancelled.", "יצירת הפתק בוטלה.")
    }

    pub fn deletion_cancelled(&self) -> String {
        self.fixed("Note deletion cancelled.", "מחיקת הפתק בוטלה.")
    }

    pub fn mark_done_cancelled(&self) -> String {
        self.fixed("Note mark done cancelled.", "סימון הפתק כבוצע בוטל.")
    }

    pub fn sub_note_cancelled(&self) -> String {
        self.fixed("Sub-note creation cancelled.", "יצירת התת-פתק בוטלה.")
    }

    pub fn update_cancelled(&self) -> String {
        self.fixed(
            "Story description update cancelled.",
            "עדכון התיאור בוטל.",
        )
    }

    // ============================================================================
    // Help
    // ============================================================================

    /// Command reference built from the builtin command table.
    pub fn help(&self) -> String {
        let mut out = self.fixed("📋 Available commands:\n", "📋 פקודות זמינות:\n");
        let mut categories: Vec<&str> = Vec::new();
        for cmd in builtin_commands() {
            if !categories.contains(&cmd.category) {
                categories.push(cmd.category);
            }
        }
        for category in categories {
            out.push_str(&format!("\n{}\n", category));
            for cmd in builtin_commands().iter().filter(|c| c.category == category) {
                let description = self.language.pick(cmd.description, cmd.description_he);
                out.push_str(&format!("• `{}` - {}\n", cmd.usage, description));
            }
        }
        out.push_str(&self.fixed(
            "\n💡 Every command also works as snake_case (/create_note), kebab-case (/create-note), camelCase (/createNote) or in its shortest form (/create, /find, /id, /parents).",
            "\n💡 כל פקודה עובדת גם בכתיב snake_case (/create_note), kebab-case (/create-note), camelCase (/createNote) או בצורה הקצרה (/create, /find, /id, /parents).",
        ));
        out
    }
}

/// Which "search first" reply a focus-note action gives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFirst {
    WorkWith,
    Edit,
    Delete,
    Mark,
    Discuss,
    Converse,
    SelectFrom,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, title: &str) -> Note {
        Note {
            id: id.into(),
            title: title.into(),
            ..Note::default()
        }
    }

    #[test]
    fn test_found_many_layout() {
        let texts = Texts::new(Language::En);
        let entries = vec![
            texts.list_entry(1, &note("1", "groceries")),
            texts.list_entry(2, &note("2", "grocery")),
        ];
        assert_eq!(
            texts.found_many(2, &entries),
            "Found 2 notes:\n1. ➡️ 'groceries' (ID: 1)\n2. ➡️ 'grocery' (ID: 2)\n\nWhich note would you like to select? (say the number or name)"
        );
    }

    #[test]
    fn test_language_switches_replies() {
        assert_eq!(
            Texts::new(Language::En).ask_create_note("groceries"),
            "Do you want to create a note with title 'groceries'? (yes/no)"
        );
        assert_eq!(
            Texts::new(Language::He).back_to_normal(),
            "✅ בוטל. חזרתי למצב רגיל."
        );
    }

    #[test]
    fn test_help_lists_every_command_and_alias_forms() {
        let help = Texts::new(Language::En).help();
        for cmd in builtin_commands() {
            assert!(help.contains(cmd.usage), "{}", cmd.usage);
        }
        assert!(help.contains("/create-note"));
    }

    #[test]
    fn test_search_first_suffix() {
        assert_eq!(
            Texts::new(Language::En).search_first(SearchFirst::Delete),
            "No notes found to delete. Try searching first."
        );
    }
}
