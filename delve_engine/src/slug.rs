/// Normalize a user-provided save name into a filesystem-safe slug.
///
/// Letters and digits are kept (lowercased), runs of anything else become a single `-`, and
/// `-`/`_` are trimmed from both ends. Empty results become `save`.
pub fn sanitize_slug(raw: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else if ch == '-' || ch == '_' {
            if !slug.is_empty() {
                slug.push(ch);
            }
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    let trimmed = slug.trim_matches(&['-', '_'][..]).to_string();
    if trimmed.is_empty() { "save".to_string() } else { trimmed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_tricks_are_flattened() {
        assert_eq!(sanitize_slug("../../etc/passwd"), "etc-passwd");
        assert_eq!(sanitize_slug("My Save 1"), "my-save-1");
    }

    #[test]
    fn empty_names_get_a_default() {
        assert_eq!(sanitize_slug("  "), "save");
        assert_eq!(sanitize_slug("///"), "save");
    }

    #[test]
    fn dashes_and_underscores_survive_inside() {
        assert_eq!(sanitize_slug("_quick_save-"), "quick_save");
    }
}
