//! Allowed-markup filtering for stored field values.

/// Tags that may survive in stored assessment text.
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "div", "h1", "h2", "h3", "ul", "ol", "li", "p", "a", "strong", "em",
];

/// Render a tag list in `<div><h1>...` form.
pub fn allowable_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|t| format!("<{}>", t.as_ref().to_lowercase()))
        .collect()
}

/// Remove every markup tag whose name is not in `allowed`, keeping the text
/// between tags. Comments are always removed. A `<` that does not open a tag
/// (`a < b`), is never closed, or is followed by another `<` before its `>`
/// is kept as text. A `>` inside a quoted attribute value does not close the
/// tag.
pub fn strip_tags<S: AsRef<str>>(input: &str, allowed: &[S]) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open..];

        if let Some(body) = candidate.strip_prefix("<!--") {
            rest = match body.find("-->") {
                Some(end) => &body[end + 3..],
                None => "",
            };
            continue;
        }

        let tag = tag_name(candidate).and_then(|name| Some((name, tag_end(candidate)?)));
        let Some((name, close)) = tag else {
            out.push('<');
            rest = &candidate[1..];
            continue;
        };

        if allowed.iter().any(|t| t.as_ref().eq_ignore_ascii_case(&name)) {
            out.push_str(&candidate[..=close]);
        }
        rest = &candidate[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Byte offset of the `>` closing the tag that opens at the start of `s`.
///
/// `None` if the tag is never closed or another `<` appears outside quotes
/// first.
fn tag_end(s: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in s.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, '<') => return None,
            _ => {}
        }
    }
    None
}

/// Name of the tag opening at the start of `s`, if `s` starts a tag.
fn tag_name(s: &str) -> Option<String> {
    let after = s.strip_prefix('<')?;
    let after = after.strip_prefix('/').unwrap_or(after);
    let name: String = after
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    let starts_with_letter = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_with_letter.then(|| name.to_ascii_lowercase())
}
