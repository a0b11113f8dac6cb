//! Text rendering of a note with its direct children.

use super::model::Note;

const MAX_PREVIEW_LINES: usize = 2;
const MAX_PREVIEW_CHARS: usize = 100;
const ELLIPSIS: &str = "...";

/// Renders `note` and its `children` as a small box-drawing tree.
///
/// ```
/// use jot_core::note::{render_tree, Note};
///
/// let note = Note {
///     id: "1".into(),
///     title: "groceries".into(),
///     description: String::new(),
///     parent_id: None,
///     done: false,
///     done_date: None,
///     creation_date: String::new(),
///     last_updated: String::new(),
///     tags: vec![],
///     images: vec![],
///     deleted: false,
/// };
/// assert_eq!(render_tree(&note, &[]), "➡️ 📝 groceries (ID: 1)\n└── (no sub-notes)");
/// ```
pub fn render_tree(note: &Note, children: &[Note]) -> String {
    let mut tree = format!("{} 📝 {} (ID: {})", note.status_glyph(), note.title, note.id);

    if children.is_empty() {
        tree.push_str("\n└── (no sub-notes)");
        return tree;
    }

    let last = children.len() - 1;
    for (i, child) in children.iter().enumerate() {
        let is_last = i == last;
        let (branch, indent) = if is_last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        tree.push('\n');
        tree.push_str(&format!(
            "{}{} 📄 {} (ID: {})",
            branch,
            child.status_glyph(),
            child.title,
            child.id
        ));
        if let Some(preview) = description_preview(&child.description) {
            tree.push_str(&format!("\n{}   💬 {}", indent, preview));
        }
    }

    tree
}

/// Short preview of a description: date prefix removed, at most two lines
/// or a hundred characters.
pub fn description_preview(description: &str) -> Option<String> {
    let desc = strip_date_prefix(description.trim());
    if desc.is_empty() {
        return None;
    }

    let lines: Vec<&str> = desc.split('\n').collect();
    if lines.len() > MAX_PREVIEW_LINES {
        return Some(format!("{}{}", lines[..MAX_PREVIEW_LINES].join("\n"), ELLIPSIS));
    }
    if desc.chars().count() > MAX_PREVIEW_CHARS {
        let head: String = desc.chars().take(MAX_PREVIEW_CHARS - ELLIPSIS.len()).collect();
        return Some(format!("{}{}", head, ELLIPSIS));
    }
    Some(desc.to_string())
}

fn strip_date_prefix(desc: &str) -> &str {
    if !desc.starts_with('[') {
        return desc;
    }
    match desc.find(']') {
        Some(end) => {
            let rest = desc[end + 1..].trim_start();
            if rest.is_empty() { desc } else { rest }
        }
        None => desc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, title: &str, done: bool, description: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            parent_id: None,
            done,
            done_date: None,
            creation_date: "2025-01-01T00:00:00Z".to_string(),
            last_updated: "2025-01-01T00:00:00Z".to_string(),
            tags: vec![],
            images: vec![],
            deleted: false,
        }
    }

    #[test]
    fn test_tree_with_children_uses_branches() {
        let parent = note("1", "trip", false, "");
        let children = vec![
            note("2", "tickets", true, ""),
            note("3", "hotel", false, "[Mon Jan 1 2025] book near the station"),
        ];

        let tree = render_tree(&parent, &children);

        let expected = [
            "➡️ 📝 trip (ID: 1)",
            "├── ✅ 📄 tickets (ID: 2)",
            "└── ➡️ 📄 hotel (ID: 3)",
            "       💬 book near the station",
        ]
        .join("\n");
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_preview_truncates_long_lines() {
        let long = "x".repeat(150);
        let preview = description_preview(&long).unwrap();
        assert_eq!(preview.chars().count(), 100);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_preview_keeps_two_lines() {
        let preview = description_preview("a\nb\nc").unwrap();
        assert_eq!(preview, "a\nb...");
        assert_eq!(description_preview("  ").as_deref(), None);
    }
}
