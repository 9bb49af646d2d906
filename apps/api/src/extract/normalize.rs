//! Whitespace normalization shared by every format parser.

/// Normalizes one page or section of extracted text.
///
/// Line endings become `\n`, trailing whitespace is dropped from every line,
/// and blank lines at the start and end of the section are removed.
/// Interior blank lines and leading indentation are kept.
pub fn normalize_section(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = unified.split('\n').map(str::trim_end).collect();

    let Some(start) = lines.iter().position(|line| !line.is_empty()) else {
        return String::new();
    };
    let end = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .unwrap_or(start);

    lines[start..=end].join("\n")
}

/// Normalizes each page and joins them with a single newline.
///
/// A page without text still contributes its (empty) segment so the page
/// boundaries survive in the output.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pages
        .into_iter()
        .map(|page| normalize_section(page.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_unifies_line_endings() {
        assert_eq!(normalize_section("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_normalize_strips_trailing_whitespace_and_edge_blank_lines() {
        let raw = "\n\n   \nJohn Doe   \n  Engineer\t\n\n";
        assert_eq!(normalize_section(raw), "John Doe\n  Engineer");
    }

    #[test]
    fn test_normalize_keeps_interior_blank_lines() {
        assert_eq!(normalize_section("a\n\n\nb"), "a\n\n\nb");
    }

    #[test]
    fn test_normalize_whitespace_only_is_empty() {
        assert_eq!(normalize_section(" \n\t\r\n "), "");
    }

    #[test]
    fn test_join_pages_uses_single_newline() {
        assert_eq!(join_pages(["page one\n", "\npage two"]), "page one\npage two");
    }

    #[test]
    fn test_join_pages_keeps_empty_page_segment() {
        assert_eq!(join_pages(["first", "   ", "third"]), "first\n\nthird");
    }

    #[test]
    fn test_join_zero_pages_is_empty() {
        assert_eq!(join_pages(Vec::<String>::new()), "");
    }
}
