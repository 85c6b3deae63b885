/// Canonicalize a display name into the `"Last, First"` form used as the
/// employee lookup key.
///
/// Input that already contains a comma is taken as canonical and returned
/// trimmed but otherwise unchanged. A single token cannot be split and is
/// returned as-is. Returns `None` when no usable name remains after
/// trimming; callers treat that as a resolution failure.
pub fn format_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains(',') {
        return Some(trimmed.to_string());
    }

    let mut tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.len() == 1 {
        return Some(tokens[0].to_string());
    }

    let last = tokens.pop().expect("at least two tokens");
    Some(format!("{last}, {}", tokens.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::format_name;

    #[test]
    fn swaps_first_and_last_name() {
        assert_eq!(format_name("Bartender A").as_deref(), Some("A, Bartender"));
        assert_eq!(format_name("John Doe").as_deref(), Some("Doe, John"));
    }

    #[test]
    fn keeps_already_canonical_names() {
        assert_eq!(format_name("Doe, John").as_deref(), Some("Doe, John"));
        assert_eq!(format_name("A, Bartender").as_deref(), Some("A, Bartender"));
    }

    #[test]
    fn joins_multiple_first_names() {
        assert_eq!(
            format_name("John James Doe").as_deref(),
            Some("Doe, John James")
        );
        assert_eq!(
            format_name("Mary Jane Smith").as_deref(),
            Some("Smith, Mary Jane")
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(format_name(""), None);
        assert_eq!(format_name("   "), None);
    }

    #[test]
    fn keeps_single_token_unchanged() {
        assert_eq!(format_name("SingleName").as_deref(), Some("SingleName"));
    }

    #[test]
    fn trims_and_collapses_interior_whitespace() {
        assert_eq!(format_name("  John   Doe  ").as_deref(), Some("Doe, John"));
        assert_eq!(format_name("John    Doe").as_deref(), Some("Doe, John"));
        assert_eq!(
            format_name("Mary   Jane   Smith").as_deref(),
            Some("Smith, Mary Jane")
        );
    }

    #[test]
    fn canonical_input_is_trimmed_but_not_collapsed() {
        assert_eq!(
            format_name("  Doe,   John  ").as_deref(),
            Some("Doe,   John")
        );
    }
}
