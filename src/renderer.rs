use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use handlebars::Handlebars;
use serde::Serialize;

use crate::generator::data::Entry;

/// Shown for entries whose date could not be determined.
pub(crate) const UNKNOWN_DATE_LABEL: &str = "0001-01-01";

const TIL_TEMPLATE: &str = r#"---
title: "{{title}}"
date: {{date}}
tags: []
---

<Write a few bullet points about what you learned today. Keep it brief.>
"#;

fn push_entry(res: &mut String, entry: &Entry) {
    let date = entry
        .date
        .map_or_else(|| UNKNOWN_DATE_LABEL.to_string(), |d| d.to_string());
    let _ = write!(res, "\n- {} — [{}]({})", date, entry.title, entry.path);
}

/// Renders the generated README region.
///
/// Both slices are expected newest first. Only the first `til_limit` TILs are listed. The
/// trailing timestamp means two renders at different minutes never compare equal, so the
/// README is rewritten on practically every run.
pub(crate) fn render_index(
    cases: &[Entry],
    tils: &[Entry],
    til_limit: usize,
    now: DateTime<Utc>,
) -> String {
    let mut res = String::from("### 📚 Case studies");
    if cases.is_empty() {
        res.push_str("\n- _(none yet)_");
    }
    for entry in cases {
        push_entry(&mut res, entry);
    }

    let _ = write!(res, "\n\n### 📝 TILs (latest {til_limit})");
    for entry in tils.iter().take(til_limit) {
        push_entry(&mut res, entry);
    }

    let _ = write!(
        res,
        "\n\n_Last updated: {}_",
        now.format("%Y-%m-%d %H:%M UTC")
    );
    res
}

#[derive(Serialize, Debug)]
struct TilPageData<'a> {
    title: &'a str,
    date: NaiveDate,
}

/// Template engine for new TIL notes. `template_file` replaces the built-in note skeleton.
pub(crate) fn generate_renderer(
    template_file: Option<&Path>,
) -> anyhow::Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);
    match template_file {
        Some(file) => handlebars
            .register_template_file("til", file)
            .with_context(|| format!("{file:?}"))?,
        None => handlebars
            .register_template_string("til", TIL_TEMPLATE)
            .context("built-in TIL template")?,
    }

    Ok(handlebars)
}

pub(crate) fn render_til(
    handlebars: &Handlebars<'_>,
    title: &str,
    date: NaiveDate,
) -> anyhow::Result<String> {
    handlebars
        .render("til", &TilPageData { title, date })
        .with_context(|| format!("while rendering TIL {title:?}"))
}
