//! Path template joining and normalization.

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// Join two optional path fragments with exactly one separator between them.
///
/// If `a` ends with a separator and `b` starts with one, they merge into a
/// single separator. If neither does, one is inserted. Otherwise the two
/// are concatenated as-is. A missing side yields the other side, and two
/// missing sides yield an empty string.
pub fn join(a: Option<&str>, b: Option<&str>) -> String {
    match (a, b) {
        (Some(a), Some(b)) => join_paths(a, b),
        (Some(a), None) => a.to_string(),
        (None, Some(b)) => b.to_string(),
        (None, None) => String::new(),
    }
}

/// [`join`] for two present fragments.
pub fn join_paths(a: &str, b: &str) -> String {
    let a_ends = a.ends_with(SEPARATOR);
    let b_starts = b.starts_with(SEPARATOR);
    match (a_ends, b_starts) {
        (true, true) => format!("{a}{}", &b[1..]),
        (false, false) => format!("{a}{SEPARATOR}{b}"),
        _ => format!("{a}{b}"),
    }
}

/// Combine a class-level template with a method-level template.
///
/// An empty method path maps the method onto the class template itself.
pub fn combine(class_path: &str, method_path: &str) -> String {
    if method_path.is_empty() {
        class_path.to_string()
    } else {
        join_paths(class_path, method_path)
    }
}

/// Normalize a template for use in a route key.
///
/// Ensures a leading separator and collapses separator runs. A trailing
/// separator is kept.
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    out.push(SEPARATOR);
    for c in path.chars() {
        if c == SEPARATOR && out.ends_with(SEPARATOR) {
            continue;
        }
        out.push(c);
    }
    out
}
