use std::{collections::HashMap, path::Path, sync::LazyLock};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, warn};
use regex::Regex;

pub(crate) type FrontMatter = HashMap<String, String>;

const DELIMITER: &str = "---";

static HEADING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#[ \t]+(.+)$").unwrap());
static HOUR_ONLY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2}[T ]\d{2})([Zz+-].*)?$").unwrap());
static FILENAME_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2})").unwrap());

/// Parses the `---` delimited key:value block at the top of a document.
///
/// This is not YAML: every line holding a `:` is split once, the key lowercased and the value
/// unquoted. An unterminated block counts as no block at all. When no `title` is given the first
/// `# heading` of the document is used instead.
pub(crate) fn parse_front_matter(content: &str) -> FrontMatter {
    let mut fm = FrontMatter::new();

    let body = content.trim_start();
    if body.starts_with(DELIMITER) {
        let lines: Vec<&str> = body.split('\n').collect();
        if let Some(end) = lines
            .iter()
            .skip(1)
            .position(|line| line.trim() == DELIMITER)
        {
            for line in &lines[1..=end] {
                if let Some((key, value)) = line.split_once(':') {
                    fm.insert(key.trim().to_lowercase(), unquote(value.trim()).to_string());
                }
            }
        }
    }

    if fm.get("title").map_or(true, |t| t.is_empty()) {
        if let Some(caps) = HEADING_PATTERN.captures(content) {
            fm.insert("title".to_string(), caps[1].trim().to_string());
        }
    }

    fm
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parses an ISO date or date-time, keeping only the calendar date.
///
/// Date-times with an offset keep the date as written, not the UTC date.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    for fmt in ["%Y-%m-%d", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    // `2024-02-10T23` carries no minutes
    let value = HOUR_ONLY_PATTERN.replace(value, "${1}:00${2}");
    [
        "%Y-%m-%dT%H:%M:%S%.f%#z",
        "%Y-%m-%d %H:%M:%S%.f%#z",
        "%Y-%m-%dT%H:%M%#z",
        "%Y-%m-%d %H:%M%#z",
    ]
    .iter()
    .find_map(|fmt| DateTime::parse_from_str(&value, fmt).ok())
    .map(|dt| dt.date_naive())
    .or_else(|| {
        [
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M",
        ]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&value, fmt).ok())
        .map(|dt| dt.date())
    })
}

/// Best-effort date of a document: the `date` field first, then a `YYYY-MM-DD` in the file
/// name. `None` means unknown.
pub(crate) fn resolve_date(fm: &FrontMatter, path: &Path) -> Option<NaiveDate> {
    if let Some(value) = fm.get("date") {
        match parse_date(value) {
            Some(date) => {
                debug!("{path:?}: date from front matter");
                return Some(date);
            }
            None => warn!("{path:?}: unparsable date {value:?}, falling back to file name"),
        }
    }

    let name = path.file_name()?.to_string_lossy();
    let caps = FILENAME_DATE_PATTERN.captures(&name)?;
    let date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok();
    if date.is_some() {
        debug!("{path:?}: date from file name");
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_front_matter() {
        let md = "---\ntitle: \"Migrating the Cache\"\nDate: 2024-02-10\ntags: []\n---\n\n# Other\n";
        let fm = parse_front_matter(md);
        assert_eq!(fm["title"], "Migrating the Cache");
        assert_eq!(fm["date"], "2024-02-10");
        assert_eq!(fm["tags"], "[]");
    }

    #[test]
    fn test_value_split_on_first_colon_only() {
        let fm = parse_front_matter("---\nlink: https://example.com:8080/x\n---\n");
        assert_eq!(fm["link"], "https://example.com:8080/x");
    }

    #[test]
    fn test_single_quotes_and_leading_whitespace() {
        let fm = parse_front_matter("\n\n  ---\ntitle: 'It works'\n---\nbody");
        assert_eq!(fm["title"], "It works");
    }

    #[test]
    fn test_unterminated_block_is_ignored() {
        let fm = parse_front_matter("---\ntitle: Lost\ndate: 2024-01-01\n");
        assert!(fm.is_empty());
    }

    #[test]
    fn test_title_falls_back_to_heading() {
        let fm = parse_front_matter("---\ndate: 2024-01-01\n---\n\nintro\n# The Heading  \n## sub\n");
        assert_eq!(fm["title"], "The Heading");
        assert_eq!(fm["date"], "2024-01-01");
    }

    #[test]
    fn test_no_front_matter_no_heading() {
        let fm = parse_front_matter("just text\n##not a heading\n");
        assert!(fm.is_empty());
    }

    #[test]
    fn test_parse_date_variants() {
        assert_eq!(parse_date("2024-02-10"), Some(ymd(2024, 2, 10)));
        assert_eq!(parse_date("2024-02-10T23:15:00"), Some(ymd(2024, 2, 10)));
        assert_eq!(parse_date("2024-02-10 08:30"), Some(ymd(2024, 2, 10)));
        assert_eq!(parse_date("2024-02-10T23:15:00+09:00"), Some(ymd(2024, 2, 10)));
        assert_eq!(parse_date("2024-02-10T23"), Some(ymd(2024, 2, 10)));
        assert_eq!(parse_date("2024-02-10 23"), Some(ymd(2024, 2, 10)));
        assert_eq!(parse_date("2024-02-10T23:15Z"), Some(ymd(2024, 2, 10)));
        assert_eq!(parse_date("2024-02-10T23:15+09:00"), Some(ymd(2024, 2, 10)));
        assert_eq!(parse_date("2024-02-10 23:15:30.5-05:00"), Some(ymd(2024, 2, 10)));
        assert_eq!(parse_date("2024-02-10T23+09:00"), Some(ymd(2024, 2, 10)));
        assert_eq!(parse_date("20240210"), Some(ymd(2024, 2, 10)));
        assert_eq!(parse_date("2024-02-10T25"), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn test_front_matter_date_wins_over_file_name() {
        let mut fm = FrontMatter::new();
        fm.insert("date".to_string(), "2023-05-06".to_string());
        let path = PathBuf::from("til/2024-01-01-x.md");
        assert_eq!(resolve_date(&fm, &path), Some(ymd(2023, 5, 6)));
    }

    #[test]
    fn test_date_from_file_name() {
        let path = PathBuf::from("til/2024/03/2024-03-15-rust-tip.md");
        assert_eq!(resolve_date(&FrontMatter::new(), &path), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_bad_front_matter_date_falls_through() {
        let mut fm = FrontMatter::new();
        fm.insert("date".to_string(), "soon".to_string());
        let path = PathBuf::from("2024-03-15-x.md");
        assert_eq!(resolve_date(&fm, &path), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_unknown_date() {
        assert_eq!(resolve_date(&FrontMatter::new(), &PathBuf::from("notes.md")), None);
        assert_eq!(resolve_date(&FrontMatter::new(), &PathBuf::from("2024-13-45.md")), None);
    }
}
