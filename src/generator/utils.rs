use std::{borrow::Borrow, cmp::Ordering, sync::LazyLock};

use regex::Regex;

use super::data::Entry;

static SLUG_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static SLUG_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SLUG_DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Newest first. Undated entries compare lowest, so they end up last.
pub(crate) fn sort_entry<T: Borrow<Entry>>(a: &T, b: &T) -> Ordering {
    b.borrow().date.cmp(&a.borrow().date)
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
pub(crate) fn title_case(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                res.extend(c.to_lowercase());
            } else {
                res.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            res.push(c);
            in_word = false;
        }
    }
    res
}

/// Display title derived from a file stem, e.g. `cache-migration` -> `Cache Migration`.
pub(crate) fn stem_title(stem: &str) -> String {
    title_case(&stem.replace(['-', '_'], " "))
}

pub(crate) fn slugify(s: &str) -> String {
    let s = s.trim().to_lowercase();
    let s = SLUG_DISALLOWED.replace_all(&s, "");
    let s = SLUG_WHITESPACE.replace_all(&s, "-");
    let s = SLUG_DASHES.replace_all(&s, "-");
    if s.is_empty() {
        "til".to_string()
    } else {
        s.into_owned()
    }
}
