use chrono::Utc;
use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9._\-]").expect("valid filename regex"));

/// Replace every character outside `[a-zA-Z0-9._-]` with `_`, keeping only the final path component.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(base, "_");
    if cleaned.trim_matches(['.', '_']).is_empty() {
        "file".to_string()
    } else {
        cleaned.into_owned()
    }
}

/// Current UTC time rendered with a strftime `format`; errors on an invalid specifier.
pub fn timestamp(format: &str) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write!(out, "{}", Utc::now().format(format))?;
    Ok(out)
}

/// Format: YYYY-MM-DD_HH-MM-SS
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("my photo (1).JPG"), "my_photo__1_.JPG");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\notes.txt"), "notes.txt");
        assert_eq!(sanitize_filename("résumé.pdf"), "r_sum_.pdf");
    }

    #[test]
    fn sanitize_falls_back_when_nothing_is_left() {
        assert_eq!(sanitize_filename(".."), "file");
        assert_eq!(sanitize_filename("***"), "file");
        assert_eq!(sanitize_filename(""), "file");
    }

    #[test]
    fn timestamp_uses_format() {
        let ts = timestamp(DEFAULT_TIMESTAMP_FORMAT).unwrap();
        assert_eq!(ts.len(), "2024-01-01_00-00-00".len());
        assert_eq!(timestamp("literal").unwrap(), "literal");
        assert!(timestamp("%Q").is_err());
    }
}
