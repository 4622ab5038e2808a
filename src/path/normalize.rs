//! Path string normalization
//!
//! These functions work on strings, not [`std::path::Path`], so results are
//! identical on every platform for a given separator.

/// Normalize a file/directory path
///
/// - Convert every `/` and `\` into `separator` (`"\a/b\c"` becomes `"/a/b/c"`)
/// - Remove trailing separators (`"/a/b/c/"` becomes `"/a/b/c"`)
/// - Collapse consecutive separators (`"/a///b/c"` becomes `"/a/b/c"`)
/// - Resolve `.` and `..` segments (`"/a/./b/../c"` becomes `"/a/c"`)
///
/// A leading separator survives. `..` segments that cannot be resolved are
/// kept, and an empty result becomes `"."`.
pub fn normalize_path(path: &str, separator: char) -> String {
    let path: String = path
        .chars()
        .map(|c| if c == '/' || c == '\\' { separator } else { c })
        .collect();
    let path = path.trim_end_matches(separator);

    if is_normalized(path, separator) {
        return path.to_string();
    }

    let mut parts: Vec<&str> = Vec::new();
    for part in path.split(separator) {
        if part == ".." && parts.last().is_some_and(|last| *last != "..") {
            parts.pop();
        } else if part == "." || (part.is_empty() && !parts.is_empty()) {
            continue;
        } else {
            parts.push(part);
        }
    }

    let sep = separator.to_string();
    let joined = parts.join(sep.as_str());
    if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// No `.`-prefixed segment (including a leading one) and no doubled separator
fn is_normalized(path: &str, separator: char) -> bool {
    if path.is_empty() {
        return false;
    }

    let mut prev = separator;
    for c in path.chars() {
        if prev == separator && (c == '.' || c == separator) {
            return false;
        }
        prev = c;
    }
    true
}

/// Everything before the final `separator`
///
/// `"."` when there is none; the separator itself when only a leading one exists.
pub fn dirname(path: &str, separator: char) -> String {
    match path.rfind(separator) {
        None => ".".to_string(),
        Some(0) => separator.to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

/// The final `separator`-delimited segment
pub fn basename(path: &str, separator: char) -> String {
    match path.rfind(separator) {
        None => path.to_string(),
        Some(idx) => path[idx + separator.len_utf8()..].to_string(),
    }
}
