use crate::changes::{ChangeKind, ChangeRecord};
use crate::error::Result;
use crate::refs::BranchRef;
use crate::repo::RepoQuery;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// classifies every path in the checkout by how it differs from a
/// reference branch, reconciling the committed, staged and untracked
/// change sets into four mutually exclusive categories
///
/// each operation recomputes everything from the repository's current
/// state, so a result is a snapshot: if the working tree changes between
/// the few collaborator queries one call makes, the sets may straddle
/// both states
pub struct ChangeClassifier<R> {
    repo: R,
}

impl<R: RepoQuery> ChangeClassifier<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// paths modified relative to `reference`
    pub fn modified(
        &self,
        reference: &str,
        committed_only: bool,
        staged_only: bool,
    ) -> Result<BTreeSet<PathBuf>> {
        let reference = self.repo.resolve_remote_ref(reference)?;

        // renames and deletions win over a modified report, so both are
        // computed first and subtracted from every result below
        let renamed_targets: BTreeSet<PathBuf> = self
            .renamed(reference.local(), committed_only, staged_only)?
            .into_iter()
            .map(|(_, to)| to)
            .collect();
        let deleted = self.deleted(reference.local(), committed_only, staged_only)?;

        // the committed diff can include drift from the reference branch
        // itself; keep only paths this branch actually touched
        let committed = self.committed_paths(&reference, ChangeKind::Modified)?;
        let touched = self.repo.name_only_diff(&reference)?;
        let committed = &committed & &touched;

        if committed_only {
            return Ok(&(&committed - &renamed_targets) - &deleted);
        }

        let staged =
            &self.index_paths(ChangeKind::Modified)? | &self.untracked_paths(ChangeKind::Modified)?;

        // a path added on this branch and then edited again shows up in
        // the index as modified, but against the reference it is still an
        // addition; added() reports it, so it is dropped here
        let committed_added = self.committed_paths(&reference, ChangeKind::Added)?;
        let staged = &staged - &committed_added;

        if staged_only {
            return Ok(&(&staged - &renamed_targets) - &deleted);
        }

        Ok(&(&(&staged | &committed) - &renamed_targets) - &deleted)
    }

    /// paths added relative to `reference`; untracked files count as added
    pub fn added(
        &self,
        reference: &str,
        committed_only: bool,
        staged_only: bool,
    ) -> Result<BTreeSet<PathBuf>> {
        let reference = self.repo.resolve_remote_ref(reference)?;
        let deleted = self.deleted(reference.local(), committed_only, staged_only)?;

        let committed = self.committed_paths(&reference, ChangeKind::Added)?;
        let touched = self.repo.name_only_diff(&reference)?;
        let committed = &committed & &touched;

        if committed_only {
            return Ok(&committed - &deleted);
        }

        let staged =
            &self.index_paths(ChangeKind::Added)? | &self.untracked_paths(ChangeKind::Added)?;

        // the counterpart of the exclusion in modified(): a committed
        // addition that was edited again locally still reports as added
        let edited_after_commit = &self.index_paths(ChangeKind::Modified)? & &committed;
        let staged = &staged | &edited_after_commit;

        if staged_only {
            return Ok(&staged - &deleted);
        }

        Ok(&(&staged | &committed) - &deleted)
    }

    /// paths deleted relative to `reference`
    pub fn deleted(
        &self,
        reference: &str,
        committed_only: bool,
        staged_only: bool,
    ) -> Result<BTreeSet<PathBuf>> {
        let reference = self.repo.resolve_remote_ref(reference)?;

        let committed = self.committed_paths(&reference, ChangeKind::Deleted)?;
        let touched = self.repo.name_only_diff(&reference)?;
        let committed = &committed & &touched;

        if committed_only {
            return Ok(committed);
        }

        let staged =
            &self.index_paths(ChangeKind::Deleted)? | &self.untracked_paths(ChangeKind::Deleted)?;

        if staged_only {
            return Ok(staged);
        }

        Ok(&staged | &committed)
    }

    /// old/new path pairs renamed relative to `reference`
    pub fn renamed(
        &self,
        reference: &str,
        committed_only: bool,
        staged_only: bool,
    ) -> Result<BTreeSet<(PathBuf, PathBuf)>> {
        let reference = self.repo.resolve_remote_ref(reference)?;
        let deleted = self.deleted(reference.local(), committed_only, staged_only)?;
        let touched = self.repo.name_only_diff(&reference)?;

        // a committed rename only counts if its target is part of this
        // branch's history and has not since been deleted
        let committed: BTreeSet<(PathBuf, PathBuf)> = self
            .repo
            .commits_diff(&reference, ChangeKind::Renamed)?
            .iter()
            .map(ChangeRecord::pair)
            .filter(|(_, to)| touched.contains(to) && !deleted.contains(to))
            .collect();

        if committed_only {
            return Ok(committed);
        }

        let index_renames: BTreeSet<(PathBuf, PathBuf)> = self
            .repo
            .index_diff(ChangeKind::Renamed)?
            .iter()
            .map(ChangeRecord::pair)
            .collect();
        let staged = &index_renames | &self.untracked_pairs()?;

        if staged_only {
            return Ok(staged);
        }

        Ok(&staged | &committed)
    }

    fn committed_paths(
        &self,
        reference: &BranchRef,
        kind: ChangeKind,
    ) -> Result<BTreeSet<PathBuf>> {
        Ok(self
            .repo
            .commits_diff(reference, kind)?
            .iter()
            .map(|record| record.path().to_path_buf())
            .collect())
    }

    fn index_paths(&self, kind: ChangeKind) -> Result<BTreeSet<PathBuf>> {
        Ok(self
            .repo
            .index_diff(kind)?
            .iter()
            .map(|record| record.path().to_path_buf())
            .collect())
    }

    fn untracked_paths(&self, kind: ChangeKind) -> Result<BTreeSet<PathBuf>> {
        Ok(self
            .repo
            .working_tree_status()?
            .iter()
            .filter(|record| record.kind == kind)
            .map(|record| record.path().to_path_buf())
            .collect())
    }

    fn untracked_pairs(&self) -> Result<BTreeSet<(PathBuf, PathBuf)>> {
        Ok(self
            .repo
            .working_tree_status()?
            .iter()
            .filter(|record| record.kind == ChangeKind::Renamed)
            .map(ChangeRecord::pair)
            .collect())
    }
}
