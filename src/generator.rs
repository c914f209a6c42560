use std::path::Path;

use anyhow::Context as _;
use chrono::Utc;
use log::{debug, info};
use walkdir::WalkDir;

use crate::{
    context::Context,
    metadata::{parse_front_matter, resolve_date},
    renderer::render_index,
    updater::update_readme,
};

pub(crate) mod data;
pub(crate) mod utils;

use data::{CollectedEntries, Entry};
use utils::{sort_entry, stem_title};

fn preprocess_file(ctx: &Context, path: &Path) -> anyhow::Result<Entry> {
    debug!("Reading {path:?}");
    let bytes = std::fs::read(path).with_context(|| format!("while reading {path:?}"))?;
    let content = String::from_utf8_lossy(&bytes);

    let mut fm = parse_front_matter(&content);
    let date = resolve_date(&fm, path);
    let title = fm
        .remove("title")
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| {
            stem_title(
                &path
                    .file_stem()
                    .map(|s| s.to_string_lossy())
                    .unwrap_or_default(),
            )
        });

    Ok(Entry {
        title,
        date,
        path: ctx.relative_link(path),
    })
}

/// Markdown files under `dir`, in file-name order. `max_depth` of `None` walks the whole tree.
fn markdown_files(dir: &Path, max_depth: Option<usize>) -> anyhow::Result<Vec<std::path::PathBuf>> {
    if !dir.is_dir() {
        info!("{dir:?} does not exist. ignoring...");
        return Ok(vec![]);
    }

    let mut walker = WalkDir::new(dir).min_depth(1).sort_by_file_name();
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    let mut files = vec![];
    for entry in walker {
        let entry = entry.with_context(|| format!("while walking {dir:?}"))?;
        let path = entry.path();
        // symlinked notes count, symlinked directories are not descended into
        let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && path.is_file());
        if is_file && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

fn collect_dir(ctx: &Context, dir: &Path, max_depth: Option<usize>) -> anyhow::Result<Vec<Entry>> {
    let mut entries = markdown_files(dir, max_depth)?
        .iter()
        .map(|path| preprocess_file(ctx, path))
        .collect::<anyhow::Result<Vec<_>>>()?;
    entries.sort_by(sort_entry);
    Ok(entries)
}

/// Case studies sit directly in their directory; TILs are nested by year and month.
pub(crate) fn collect_entries(ctx: &Context) -> anyhow::Result<CollectedEntries> {
    let case_studies = collect_dir(ctx, &ctx.case_dir, Some(1))?;
    let tils = collect_dir(ctx, &ctx.til_dir, None)?;
    info!(
        "Collected {} case studies and {} TILs",
        case_studies.len(),
        tils.len()
    );

    Ok(CollectedEntries { case_studies, tils })
}

/// Collects, renders and writes the README index. Returns whether the README changed.
pub(crate) fn generate(ctx: &Context) -> anyhow::Result<bool> {
    let collected = collect_entries(ctx)?;
    let block = render_index(
        &collected.case_studies,
        &collected.tils,
        ctx.til_limit,
        Utc::now(),
    );
    update_readme(&ctx.readme_path, &block)
}
