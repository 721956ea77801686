//! Path utilities: expand ~, validate operator path segments.

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static OPERATOR_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{N} _.,'()&+-]+$").expect("operator segment pattern is valid")
});

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// True when `name` can be used as a single directory name under `operators/`.
pub fn is_safe_segment(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty()
        && trimmed == name
        && name != "."
        && name != ".."
        && OPERATOR_SEGMENT.is_match(name)
}
