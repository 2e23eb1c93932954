use crate::changes::ChangeKind;
use crate::classifier::ChangeClassifier;
use crate::error::Result;
use crate::info;
use crate::repo::RepoQuery;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// the four mutually exclusive result sets of one classification run
#[derive(Debug, Serialize)]
pub struct ChangeReport {
    pub added: BTreeSet<PathBuf>,
    pub modified: BTreeSet<PathBuf>,
    pub deleted: BTreeSet<PathBuf>,
    pub renamed: BTreeSet<(PathBuf, PathBuf)>,
}

impl ChangeReport {
    /// run all four classifier operations with one flag configuration
    pub fn collect<R: RepoQuery>(
        classifier: &ChangeClassifier<R>,
        reference: &str,
        committed_only: bool,
        staged_only: bool,
    ) -> Result<Self> {
        Ok(Self {
            added: classifier.added(reference, committed_only, staged_only)?,
            modified: classifier.modified(reference, committed_only, staged_only)?,
            deleted: classifier.deleted(reference, committed_only, staged_only)?,
            renamed: classifier.renamed(reference, committed_only, staged_only)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.modified.is_empty()
            && self.deleted.is_empty()
            && self.renamed.is_empty()
    }

    /// print one status letter per path, renames as "old → new"
    pub fn print(&self) {
        for path in &self.added {
            info!("{} {}", letter(ChangeKind::Added), path.display());
        }
        for path in &self.modified {
            info!("{} {}", letter(ChangeKind::Modified), path.display());
        }
        for (from, to) in &self.renamed {
            info!(
                "{} {} → {}",
                letter(ChangeKind::Renamed),
                from.display(),
                to.display()
            );
        }
        for path in &self.deleted {
            info!("{} {}", letter(ChangeKind::Deleted), path.display());
        }
    }
}

fn letter(kind: ChangeKind) -> ColoredString {
    match kind {
        ChangeKind::Added => "A".green(),
        ChangeKind::Modified => "M".yellow(),
        ChangeKind::Deleted => "D".red(),
        ChangeKind::Renamed => "R".cyan(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn report_serializes_grouped_by_kind() {
        let report = ChangeReport {
            added: BTreeSet::from([PathBuf::from("a.txt")]),
            modified: BTreeSet::new(),
            deleted: BTreeSet::from([PathBuf::from("d.txt")]),
            renamed: BTreeSet::from([(PathBuf::from("x.txt"), PathBuf::from("y.txt"))]),
        };

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "added": ["a.txt"],
                "modified": [],
                "deleted": ["d.txt"],
                "renamed": [["x.txt", "y.txt"]],
            })
        );
    }

    #[test]
    fn empty_report_is_empty() {
        let report = ChangeReport {
            added: BTreeSet::new(),
            modified: BTreeSet::new(),
            deleted: BTreeSet::new(),
            renamed: BTreeSet::new(),
        };
        assert!(report.is_empty());
    }
}
