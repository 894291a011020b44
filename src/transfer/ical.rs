use std::sync::LazyLock;

use regex::Regex;

/// Longest escaped SUMMARY/DESCRIPTION value, in characters.
pub const MAX_FIELD_CHARS: usize = 1_000;

static DUE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2})$").unwrap());

/// `YYYY-MM-DD` -> `YYYYMMDD`. Only the shape is checked, so `2024-02-30` passes.
pub fn compact_date(due: &str) -> Option<String> {
    let caps = DUE_DATE_RE.captures(due)?;
    Some(format!("{}{}{}", &caps["y"], &caps["m"], &caps["d"]))
}

/// Escape a text value for embedding in a content line, then cap it at
/// [`MAX_FIELD_CHARS`].
pub fn escape_text(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
        .replace('\r', "");

    let mut out: String = escaped.chars().take(MAX_FIELD_CHARS).collect();

    // An odd run of trailing backslashes means the cut split an escape pair.
    let trailing = out.chars().rev().take_while(|c| *c == '\\').count();
    if trailing % 2 == 1 {
        out.pop();
    }
    out
}

/// Fold long lines at 75 octets (RFC 5545 requirement).
pub fn fold_line(s: &str) -> String {
    if s.len() <= 75 {
        return s.to_string();
    }
    let mut result = String::new();
    let mut pos = 0;
    while pos < s.len() {
        // Continuation lines carry a leading space, so they get one octet less.
        let width = if pos == 0 { 75 } else { 74 };
        let mut end = (pos + width).min(s.len());
        // Don't split in the middle of a multi-byte UTF-8 character
        while end < s.len() && !s.is_char_boundary(end) {
            end -= 1;
        }
        if pos > 0 {
            result.push_str("\r\n ");
        }
        result.push_str(&s[pos..end]);
        pos = end;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_date_is_shape_only() {
        assert_eq!(compact_date("2024-01-05").as_deref(), Some("20240105"));
        assert_eq!(compact_date("2024-02-30").as_deref(), Some("20240230"));
        assert_eq!(compact_date("2024-1-5"), None);
        assert_eq!(compact_date("next week"), None);
        assert_eq!(compact_date("2024-01-05 "), None);
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape_text("a;b,c\\d"), "a\\;b\\,c\\\\d");
        assert_eq!(escape_text("line1\r\nline2\nline3"), "line1\\nline2\\nline3");
    }

    #[test]
    fn truncates_to_field_limit() {
        let long = "x".repeat(1_500);
        assert_eq!(escape_text(&long).chars().count(), MAX_FIELD_CHARS);
    }

    #[test]
    fn truncation_never_leaves_half_an_escape() {
        let s = format!("{};", "x".repeat(MAX_FIELD_CHARS - 1));
        let escaped = escape_text(&s);
        assert!(!escaped.ends_with('\\'));
        assert_eq!(escaped.chars().count(), MAX_FIELD_CHARS - 1);
    }

    #[test]
    fn short_lines_are_not_folded() {
        assert_eq!(fold_line("SUMMARY:Run"), "SUMMARY:Run");
    }

    #[test]
    fn long_lines_fold_within_75_octets() {
        let line = format!("DESCRIPTION:{}", "é".repeat(100));
        let folded = fold_line(&line);
        for part in folded.split("\r\n") {
            assert!(part.len() <= 75, "{} octets", part.len());
        }
        let unfolded: String = folded.replace("\r\n ", "");
        assert_eq!(unfolded, line);
    }
}
