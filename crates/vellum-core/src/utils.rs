/// Remove the whitespace margin shared by every non-blank line.
///
/// Template instructions are usually extracted from an indented document
/// context; the fragment grammar is indentation-sensitive, so the common
/// margin must go before parsing. Lines holding only whitespace are
/// normalized to empty lines and do not participate in the margin.
///
/// # Examples
/// ```
/// use vellum_core::utils::dedent;
/// assert_eq!(dedent("    for x in xs:\n        x\n"), "for x in xs:\n    x\n");
/// assert_eq!(dedent("a.b"), "a.b");
/// ```
pub fn dedent(text: &str) -> String {
    let mut margin: Option<&str> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let indent = &line[..line.len() - line.trim_start_matches([' ', '\t']).len()];
        margin = Some(match margin {
            None => indent,
            Some(current) => common_prefix(current, indent),
        });
    }

    let margin = margin.unwrap_or("");
    let mut out = String::with_capacity(text.len());
    for segment in text.split_inclusive('\n') {
        let (line, newline) = match segment.strip_suffix('\n') {
            Some(line) => (line, "\n"),
            None => (segment, ""),
        };
        if line.trim().is_empty() {
            out.push_str(newline);
            continue;
        }
        out.push_str(line.strip_prefix(margin).unwrap_or(line));
        out.push_str(newline);
    }
    out
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}

/// Whether `s` is a valid variable name in the fragment language.
///
/// # Examples
/// ```
/// use vellum_core::utils::is_identifier;
/// assert!(is_identifier("line_2"));
/// assert!(!is_identifier("2line"));
/// ```
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
