use std::path::Path;

use similar::{ChangeTag, TextDiff};

/// Unified diff from the template on disk to a freshly rendered one.
///
/// Returns `None` when the rendered template matches what is already written.
pub fn unified_diff(existing: &str, rendered: &str, path: &Path) -> Option<String> {
    let diff = TextDiff::from_lines(existing, rendered);
    if diff.iter_all_changes().all(|c| c.tag() == ChangeTag::Equal) {
        return None;
    }

    let path = path.display();
    let mut output = format!("--- a/{path}\n+++ b/{path}\n");
    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        output.push_str(&hunk.to_string());
    }
    Some(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_marks_changed_lines() {
        let diff = unified_diff("a\nb\n", "a\nc\n", Path::new("template.json")).unwrap();
        assert!(diff.starts_with("--- a/template.json\n+++ b/template.json\n"));
        assert!(diff.contains("-b"));
        assert!(diff.contains("+c"));
    }

    #[test]
    fn unchanged_template_has_no_diff() {
        assert_eq!(unified_diff("same\n", "same\n", Path::new("t.json")), None);
    }

    #[test]
    fn trailing_newline_change_is_reported() {
        assert!(unified_diff("{}", "{}\n", Path::new("t.json")).is_some());
    }
}
