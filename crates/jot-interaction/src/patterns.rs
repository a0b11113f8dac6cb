//! Language-keyed recognition tables.
//!
//! Every table is a list of [`Rule`]s. A rule matches when its pattern
//! matches and its optional `unless` pattern does not match immediately
//! after that occurrence, which stands in for a negative look-ahead.

use jot_core::session::Language;
use once_cell::sync::Lazy;
use regex::Regex;

/// A single recognition rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    unless: Option<Regex>,
}

impl Rule {
    /// Compiles a rule from a built-in pattern literal.
    fn builtin(pattern: &str) -> Self {
        Self {
            pattern: compile(pattern),
            unless: None,
        }
    }

    /// Adds an exclusion tested against the text right after each match.
    fn unless_followed_by(mut self, pattern: &str) -> Self {
        self.unless = Some(compile(&format!("^(?:{})", pattern)));
        self
    }

    pub fn new(pattern: Regex, unless: Option<Regex>) -> Self {
        Self { pattern, unless }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match &self.unless {
            None => self.pattern.is_match(text),
            Some(unless) => self
                .pattern
                .find_iter(text)
                .any(|m| !unless.is_match(&text[m.end()..])),
        }
    }

    /// First capture group of the first match, if any.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// An ordered list of rules; any matching rule matches the set.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    rules: Vec<Rule>,
}

impl PatternSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    fn builtin(patterns: &[&str]) -> Self {
        Self::new(patterns.iter().map(|p| Rule::builtin(p)).collect())
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(text))
    }

    /// First capture group of the first rule that captures.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.rules.iter().find_map(|rule| rule.capture(text))
    }
}

/// Note selection rules, split by what their capture refers to.
#[derive(Debug, Clone, Default)]
pub struct SelectionPatterns {
    /// Captures a note id (`id 3`, `3`).
    pub by_id: PatternSet,
    /// Captures a note title (`'Groceries'`).
    pub by_title: PatternSet,
}

impl SelectionPatterns {
    pub fn is_match(&self, text: &str) -> bool {
        self.by_id.is_match(text) || self.by_title.is_match(text)
    }
}

/// All recognition tables for one language.
#[derive(Debug, Clone)]
pub struct PatternTable {
    /// Ends an AI conversation.
    pub cancel_ai: PatternSet,
    /// Ends description editing ("stop editing description" and variants).
    pub stop_editing: PatternSet,
    /// Abandons the current search results.
    pub cancel_action: PatternSet,
    /// Picks a note from the search results (`id 3`, `3`, `'title'`).
    pub note_selection: SelectionPatterns,
    pub yes: PatternSet,
    pub no: PatternSet,
}

/// Source of recognition tables, so languages can be added or tables
/// replaced without touching the classifier.
pub trait PatternProvider: Send + Sync {
    fn table(&self, language: Language) -> &PatternTable;
}

/// The built-in English and Hebrew tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPatterns;

impl PatternProvider for BuiltinPatterns {
    fn table(&self, language: Language) -> &PatternTable {
        match language {
            Language::En => &ENGLISH,
            Language::He => &HEBREW,
        }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid builtin pattern")
}

const QUOTED_TITLE: &str = r#"^['"]([^'"]+)['"]$"#;

static ENGLISH: Lazy<PatternTable> = Lazy::new(|| PatternTable {
    cancel_ai: PatternSet::builtin(&[r"(?i)\b(cancel|stop|exit|back|return|done|finish)\b"]),
    stop_editing: PatternSet::builtin(&[
        r"(?i)\b(stop|end|finish|done|complete)\s+(?:editing|writing|recording|dictating)\s+(?:description|story|note|content)\b",
        r"(?i)\b(stop|end|finish|done|complete)\s+(?:description|story|note|content)\s+(?:editing|writing|recording|dictating)\b",
        r"(?i)\b(stop|end|finish|done|complete)\s+(?:editing|writing|recording|dictating)\b",
    ]),
    cancel_action: PatternSet::builtin(&[r"(?i)\b(cancel|abort|stop|quit|exit|back|return)\b"]),
    note_selection: SelectionPatterns {
        by_id: PatternSet::builtin(&[r"(?i)^(?:note\s+)?id\s+(\d+)$", r"(?i)^(?:note\s+)?(\d+)$"]),
        by_title: PatternSet::builtin(&[QUOTED_TITLE]),
    },
    yes: PatternSet::builtin(&[r"(?i)\b(yes|yeah|yep|yup|sure|ok|okay|please|do it)\b"]),
    no: PatternSet::new(vec![
        Rule::builtin(r"(?i)\b(no|nope|nah|cancel|don't|don't want)\b"),
        Rule::builtin(r"(?i)\bstop\b").unless_followed_by(r"(?i)\s+(editing|recording|writing)"),
    ]),
});

static HEBREW: Lazy<PatternTable> = Lazy::new(|| PatternTable {
    cancel_ai: PatternSet::builtin(&[r"\b(בטל|עצור|יציאה|חזור|סיים|גמר)\b"]),
    stop_editing: PatternSet::builtin(&[
        r"\b(עצור|סיים|סיימי|סיימתי|גמר|גמרתי)\s+(?:עריכה|כתיבה|הקלטה|דיקטציה|עריכת|כתיבת)\s+(?:תיאור|סיפור|פתק|תוכן)\b",
        r"\b(עצור|סיים|סיימי|סיימתי|גמר|גמרתי)\s+(?:תיאור|סיפור|פתק|תוכן)\s+(?:עריכה|כתיבה|הקלטה|דיקטציה)\b",
        r"\b(עצור|סיים|סיימי|סיימתי|גמר|גמרתי)\s+(?:עריכה|כתיבה|הקלטה|דיקטציה|עריכת|כתיבת)\b",
    ]),
    cancel_action: PatternSet::builtin(&[r"\b(בטל|ביטול|עצור|חזור|יציאה|סגור|חזרה)\b"]),
    note_selection: SelectionPatterns {
        by_id: PatternSet::builtin(&[r"^(?:פתק\s+)?מזהה\s+(\d+)$", r"^(?:פתק\s+)?(\d+)$"]),
        by_title: PatternSet::builtin(&[QUOTED_TITLE]),
    },
    yes: PatternSet::builtin(&[r"\b(כן|כן כן|כן בבקשה|כן אני רוצה|כן תודה)\b"]),
    no: PatternSet::builtin(&[r"\b(לא|לא תודה|לא רוצה|לא עכשיו|בטל|ביטול)\b"]),
});

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> &'static PatternTable {
        &ENGLISH
    }

    fn he() -> &'static PatternTable {
        &HEBREW
    }

    #[test]
    fn test_provider_picks_table_by_language() {
        // Forces both lazies; a bad literal panics here.
        let provider = BuiltinPatterns;
        assert!(std::ptr::eq(provider.table(Language::En), en()));
        assert!(std::ptr::eq(provider.table(Language::He), he()));
    }

    #[test]
    fn test_stop_counts_as_no_unless_followed_by_editing() {
        assert!(en().no.is_match("stop"));
        assert!(en().no.is_match("please stop now"));
        assert!(!en().no.is_match("stop editing"));
        assert!(!en().no.is_match("STOP   recording"));
        // A later bare "stop" still counts.
        assert!(en().no.is_match("stop writing, no wait, stop"));
    }

    #[test]
    fn test_yes_no_are_case_insensitive_words() {
        assert!(en().yes.is_match("Yes please"));
        assert!(en().yes.is_match("OK"));
        assert!(!en().yes.is_match("yesterday"));
        assert!(en().no.is_match("No"));
        assert!(!en().no.is_match("notes"));
    }

    #[test]
    fn test_hebrew_words_respect_boundaries() {
        assert!(he().yes.is_match("כן"));
        assert!(he().no.is_match("לא תודה"));
        assert!(!he().no.is_match("לאט"));
    }

    #[test]
    fn test_stop_editing_variants() {
        for text in [
            "stop editing description",
            "Finish writing story",
            "done recording",
            "end note editing",
        ] {
            assert!(en().stop_editing.is_match(text), "{}", text);
        }
        assert!(!en().stop_editing.is_match("buy milk"));
        assert!(he().stop_editing.is_match("עצור עריכת תיאור"));
        assert!(he().stop_editing.is_match("סיימתי כתיבה"));
    }

    #[test]
    fn test_note_selection_captures() {
        assert_eq!(en().note_selection.by_id.capture("note id 12"), Some("12"));
        assert_eq!(en().note_selection.by_id.capture("3"), Some("3"));
        assert_eq!(en().note_selection.by_title.capture("'Groceries'"), Some("Groceries"));
        assert!(en().note_selection.by_id.capture("'Groceries'").is_none());
        assert_eq!(he().note_selection.by_id.capture("פתק מזהה 4"), Some("4"));
        assert!(!en().note_selection.is_match("buy 3 apples"));
    }
}
