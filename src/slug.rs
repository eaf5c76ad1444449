use regex::Regex;
use std::sync::OnceLock;

static NON_WORD_REGEX: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
static HYPHENS_REGEX: OnceLock<Regex> = OnceLock::new();

/// Derive a URL slug from a post title.
///
/// Lowercases, strips everything except ASCII word characters, whitespace and
/// hyphens, turns whitespace runs into one hyphen, collapses hyphen runs and
/// trims hyphens from both ends. Pure: the same title always gives the same slug.
///
/// `"Hello, World!  Test"` becomes `"hello-world-test"`.
pub fn slugify(title: &str) -> String {
    let non_word = NON_WORD_REGEX
        .get_or_init(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("valid slug regex"));
    let whitespace =
        WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("valid slug regex"));
    let hyphens = HYPHENS_REGEX.get_or_init(|| Regex::new(r"-+").expect("valid slug regex"));

    let lowered = title.trim().to_lowercase();
    let stripped = non_word.replace_all(&lowered, "");
    let hyphenated = whitespace.replace_all(&stripped, "-");
    let collapsed = hyphens.replace_all(&hyphenated, "-");

    collapsed.trim_matches('-').to_string()
}
