//! Prompt construction for note conversations.

use jot_core::error::Result;
use jot_core::note::{Note, NoteRepository};
use jot_core::session::AiTurn;

use super::AnswerRequest;

/// What a note is about, guessed from keywords in its title and description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextType {
    Scheduling,
    Shopping,
    Project,
    Learning,
    Goals,
    General,
}

const KEYWORDS: [(ContextType, &[&str]); 5] = [
    (
        ContextType::Scheduling,
        &["meeting", "schedule", "appointment", "remind", "call", "email"],
    ),
    (
        ContextType::Shopping,
        &["shopping", "buy", "grocery", "store", "purchase", "list"],
    ),
    (
        ContextType::Project,
        &[
            "project", "task", "build", "fix", "develop", "implement", "create", "design",
        ],
    ),
    (
        ContextType::Learning,
        &[
            "study", "learn", "research", "read", "book", "course", "tutorial", "practice",
        ],
    ),
    (
        ContextType::Goals,
        &["goal", "target", "objective", "fitness", "career", "personal"],
    ),
];

impl ContextType {
    /// First category with a keyword occurring anywhere in the note text.
    pub fn of(note: &Note) -> Self {
        let text = format!("{} {}", note.title, note.description).to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| text.contains(w)))
            .map(|(kind, _)| *kind)
            .unwrap_or(ContextType::General)
    }

    fn system(self) -> &'static str {
        match self {
            Self::Scheduling => "a scheduling and reminder assistant. Help users manage their time, appointments, and commitments.",
            Self::Shopping => "a shopping and list management assistant. Help users organize purchases, compare options, and manage shopping lists.",
            Self::Project => "a project management assistant. Help users break down tasks, estimate timelines, and track progress.",
            Self::Learning => "a learning and research assistant. Help users study effectively, organize knowledge, and track learning progress.",
            Self::Goals => "a goal-setting and achievement assistant. Help users define, track, and achieve their objectives.",
            Self::General => "a helpful note-taking assistant. Help users organize, understand, and make progress with their notes.",
        }
    }

    fn focus(self) -> &'static str {
        match self {
            Self::Scheduling => "Focus on time management, scheduling conflicts, reminder strategies, and calendar optimization.",
            Self::Shopping => "Focus on product recommendations, price comparisons, shopping efficiency, and list organization.",
            Self::Project => "Focus on task decomposition, resource planning, timeline estimation, and progress tracking.",
            Self::Learning => "Focus on study strategies, knowledge organization, research methods, and learning optimization.",
            Self::Goals => "Focus on goal clarity, progress tracking, motivation strategies, and achievement planning.",
            Self::General => "Focus on note organization, information synthesis, and actionable next steps.",
        }
    }

    fn examples(self) -> &'static str {
        match self {
            Self::Scheduling => "Help with meeting preparation, deadline management, and time blocking strategies.",
            Self::Shopping => "Help with meal planning, budget management, and shopping route optimization.",
            Self::Project => "Help with project planning, risk assessment, and milestone management.",
            Self::Learning => "Help with study planning, research organization, and knowledge retention strategies.",
            Self::Goals => "Help with goal breakdown, progress measurement, and motivation techniques.",
            Self::General => "Help with note categorization, information extraction, and task identification.",
        }
    }
}

/// Builds the prompt for one question: role line, note context (two levels
/// of sub-notes), the question, and earlier turns of the conversation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub async fn build(&self, request: &AnswerRequest, notes: &dyn NoteRepository) -> Result<String> {
        let kind = ContextType::of(&request.note);
        let context = Self::note_context(&request.note, notes).await?;

        let mut prompt = format!(
            "You are {}\n\nContext: {}\n\nUser Question: {}\n\nInstructions:\n- {}\n- Provide specific, actionable advice\n- Consider the user's note context\n- Suggest concrete next steps\n- Be encouraging and practical\n\n{}",
            kind.system(),
            context,
            request.question,
            kind.focus(),
            kind.examples()
        );
        prompt.push_str(&Self::history(&request.history));
        Ok(prompt)
    }

    async fn note_context(note: &Note, notes: &dyn NoteRepository) -> Result<String> {
        let mut context = format!("📝 **Note: {}**\n", note.title);
        if !note.description.is_empty() {
            context.push_str(&format!("Description: {}\n\n", note.description));
        }

        let children = notes.find_children(&note.id).await?;
        if !children.is_empty() {
            context.push_str("📋 **Sub-tasks:**\n");
            for child in &children {
                context.push_str(&Self::task_line("• ", child));
                for grandchild in notes.find_children(&child.id).await? {
                    context.push_str(&Self::task_line("  - ", &grandchild));
                }
            }
        }
        Ok(context)
    }

    fn task_line(bullet: &str, note: &Note) -> String {
        let mut line = format!("{}{}", bullet, note.title);
        if !note.description.is_empty() {
            line.push_str(&format!(" - {}", note.description));
        }
        line.push_str(if note.done {
            " ✅ (Completed)"
        } else {
            " ⏳ (Pending)"
        });
        line.push('\n');
        line
    }

    fn history(turns: &[AiTurn]) -> String {
        if turns.is_empty() {
            return String::new();
        }
        let mut out = String::from("\n\n**Previous Conversation:**\n");
        for turn in turns {
            out.push_str(&format!("User: {}\nAI: {}\n\n", turn.user, turn.ai));
        }
        out
    }
}
