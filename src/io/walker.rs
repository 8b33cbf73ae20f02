use crate::inspector::Dialect;
use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Finds C and C++ headers below a root directory.
pub struct HeaderWalker {
    root: PathBuf,
    dialect: Option<Dialect>,
    ignore_patterns: Vec<String>,
}

impl HeaderWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            dialect: None,
            ignore_patterns: vec![],
        }
    }

    /// Only keep headers whose extension implies `dialect`.
    pub fn with_dialect(mut self, dialect: Option<Dialect>) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Matching headers, sorted so batch output is stable across runs.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        if !Dialect::is_header_path(path) {
            return false;
        }

        if let Some(dialect) = self.dialect {
            if Dialect::from_path(path) != dialect {
                return false;
            }
        }

        // Patterns are relative to the walk root, like `.gitignore` entries.
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        !self.ignore_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches_path(relative))
                .unwrap_or(false)
        })
    }
}

pub fn find_headers(root: &Path, ignore_patterns: Vec<String>) -> Result<Vec<PathBuf>> {
    HeaderWalker::new(root.to_path_buf())
        .with_ignore_patterns(ignore_patterns)
        .walk()
}
