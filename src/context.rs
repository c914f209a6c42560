use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_TIL_LIMIT: usize = 12;

/// Where things live inside a notes project.
#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub root: PathBuf,
    pub case_dir: PathBuf,
    pub til_dir: PathBuf,
    pub readme_path: PathBuf,

    pub til_limit: usize,
}

impl Context {
    pub fn new(root: PathBuf, readme_path: Option<PathBuf>, til_limit: usize) -> Self {
        let readme_path = readme_path.unwrap_or_else(|| root.join("README.md"));
        Self {
            case_dir: root.join("notes").join("case-studies"),
            til_dir: root.join("til"),
            readme_path,
            root,
            til_limit,
        }
    }

    /// Path of `path` relative to the project root, always with `/` separators.
    pub fn relative_link(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
