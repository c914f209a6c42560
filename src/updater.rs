use std::path::Path;

use anyhow::Context;
use log::info;
use regex::{NoExpand, RegexBuilder};

pub(crate) const START_MARK: &str = "<!-- START:INDEX -->";
pub(crate) const END_MARK: &str = "<!-- END:INDEX -->";

fn wrap_block(block: &str) -> String {
    format!("{START_MARK}\n{block}\n{END_MARK}")
}

/// Puts `block` between the index markers of `content`.
///
/// The first start marker and the first end marker after it are replaced along with whatever
/// lies between them, newlines included. Without such a pair a new region is appended.
pub(crate) fn replace_region(content: &str, block: &str) -> anyhow::Result<String> {
    let region = RegexBuilder::new(&format!(
        "{}.*?{}",
        regex::escape(START_MARK),
        regex::escape(END_MARK)
    ))
    .dot_matches_new_line(true)
    .build()?;

    let wrapped = wrap_block(block);
    if region.is_match(content) {
        Ok(region.replacen(content, 1, NoExpand(wrapped.as_str())).into_owned())
    } else {
        Ok(format!("{}\n\n{wrapped}\n", content.trim_end()))
    }
}

/// Writes the index block into the README, creating it when missing.
///
/// Returns `true` when the file was written, `false` when it already held exactly this content.
pub(crate) fn update_readme(readme_path: &Path, block: &str) -> anyhow::Result<bool> {
    if !readme_path.exists() {
        let content = format!("# TIL & Notes\n\n{}\n", wrap_block(block));
        std::fs::write(readme_path, content)
            .with_context(|| format!("while creating {readme_path:?}"))?;
        info!("Created {readme_path:?}");
        return Ok(true);
    }

    let content = std::fs::read_to_string(readme_path)
        .with_context(|| format!("while reading {readme_path:?}"))?;
    let new_content = replace_region(&content, block)?;

    let changed = new_content != content;
    if changed {
        std::fs::write(readme_path, &new_content)
            .with_context(|| format!("while writing {readme_path:?}"))?;
        info!("Rewrote index region of {readme_path:?}");
    }
    Ok(changed)
}
