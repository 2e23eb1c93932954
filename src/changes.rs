use std::path::{Path, PathBuf};

/// how a path differs between two tree-like states
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
}

/// a single classified path change
///
/// for non-renames both paths are equal
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChangeRecord {
    pub path_before: PathBuf,
    pub path_after: PathBuf,
    pub kind: ChangeKind,
}

impl ChangeRecord {
    pub fn new(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            path_before: path.clone(),
            path_after: path,
            kind,
        }
    }

    pub fn renamed(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            path_before: from.into(),
            path_after: to.into(),
            kind: ChangeKind::Renamed,
        }
    }

    /// the path this record is reported under: deletions keep their
    /// pre-image path, everything else reports the post-image path
    pub fn path(&self) -> &Path {
        match self.kind {
            ChangeKind::Deleted => &self.path_before,
            _ => &self.path_after,
        }
    }

    pub fn pair(&self) -> (PathBuf, PathBuf) {
        (self.path_before.clone(), self.path_after.clone())
    }
}
