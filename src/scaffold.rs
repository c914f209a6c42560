use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{Datelike, NaiveDate};
use handlebars::Handlebars;
use log::debug;

use crate::{context::Context, generator::utils::slugify, renderer::render_til};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Scaffolded {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

/// Creates `til/<year>/<month>/<date>-<slug>.md` under the project root.
///
/// An existing note is never overwritten.
pub(crate) fn new_til(
    ctx: &Context,
    handlebars: &Handlebars<'_>,
    title: &str,
    date: NaiveDate,
) -> anyhow::Result<Scaffolded> {
    let dir = ctx
        .til_dir
        .join(format!("{}", date.year()))
        .join(format!("{:02}", date.month()));
    let path = dir.join(format!("{date}-{}.md", slugify(title)));
    if path.exists() {
        return Ok(Scaffolded::AlreadyExists(path));
    }

    if !dir.exists() {
        debug!("Creating {dir:?}");
        fs_extra::dir::create_all(&dir, false).with_context(|| format!("{dir:?}"))?;
    }
    let content = render_til(handlebars, title, date)?;
    std::fs::write(&path, content).with_context(|| format!("while writing {path:?}"))?;

    Ok(Scaffolded::Created(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{parse_front_matter, resolve_date},
        renderer::generate_renderer,
    };

    #[test]
    fn test_new_til_round_trips() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = Context::new(temp.path().to_path_buf(), None, 12);
        let handlebars = generate_renderer(None).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let res = new_til(&ctx, &handlebars, "Rust's Borrow Checker", date).unwrap();
        let expected = temp
            .path()
            .join("til/2024/03/2024-03-05-rusts-borrow-checker.md");
        assert_eq!(res, Scaffolded::Created(expected.clone()));

        let content = std::fs::read_to_string(&expected).unwrap();
        let fm = parse_front_matter(&content);
        assert_eq!(fm["title"], "Rust's Borrow Checker");
        assert_eq!(resolve_date(&fm, &expected), Some(date));
    }

    #[test]
    fn test_new_til_refuses_overwrite() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = Context::new(temp.path().to_path_buf(), None, 12);
        let handlebars = generate_renderer(None).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let Scaffolded::Created(path) = new_til(&ctx, &handlebars, "once", date).unwrap() else {
            panic!("expected a new note");
        };
        std::fs::write(&path, "mine").unwrap();

        assert_eq!(
            new_til(&ctx, &handlebars, "once", date).unwrap(),
            Scaffolded::AlreadyExists(path.clone())
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "mine");
    }
}
