//! Unified diff rendering for the "view diff" choice.

use colored::Colorize;
use similar::TextDiff;

/// Unified diff from `old` (the target) to `new` (the source).
pub fn unified(old: &[u8], new: &[u8], old_label: &str, new_label: &str) -> String {
    let old = String::from_utf8_lossy(old);
    let new = String::from_utf8_lossy(new);
    let old_header = format!("a/{old_label}");
    let new_header = format!("b/{new_label}");
    TextDiff::from_lines(old.as_ref(), new.as_ref())
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string()
}

/// Color a unified diff line by line.
pub fn colorize(diff: &str) -> String {
    let mut out = String::with_capacity(diff.len() + diff.len() / 4);
    for line in diff.split_inclusive('\n') {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        let painted = if body.starts_with("+++") || body.starts_with("---") {
            body.bold().to_string()
        } else if body.starts_with("@@") {
            body.cyan().to_string()
        } else if body.starts_with('+') {
            body.green().to_string()
        } else if body.starts_with('-') {
            body.red().to_string()
        } else {
            body.to_string()
        };
        out.push_str(&painted);
        out.push_str(newline);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_is_target_to_source() {
        let diff = unified(b"x = 1\n", b"x = 2\n", "init.lua", "init.lua");
        assert!(diff.contains("--- a/init.lua"));
        assert!(diff.contains("+++ b/init.lua"));
        assert!(diff.contains("-x = 1"));
        assert!(diff.contains("+x = 2"));
        assert!(diff.contains("@@"));
    }

    #[test]
    fn identical_inputs_have_empty_diff() {
        assert!(unified(b"same\n", b"same\n", "a", "b").is_empty());
    }

    #[test]
    fn invalid_utf8_is_rendered_lossily() {
        let diff = unified(b"\xff\xfe\n", b"ok\n", "a", "b");
        assert!(diff.contains("+ok"));
    }

    #[test]
    fn colorize_keeps_line_structure() {
        colored::control::set_override(true);
        let diff = unified(b"a\n", b"b\n", "f", "f");
        let painted = colorize(&diff);
        assert_eq!(painted.lines().count(), diff.lines().count());
        assert!(painted.contains("\u{1b}["));
        colored::control::unset_override();
    }
}
