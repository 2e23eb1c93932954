use crate::changes::{ChangeKind, ChangeRecord};
use crate::error::{Error, Result};
use crate::refs::BranchRef;
use crate::status::parse_status_line;
use git2::{BranchType, Delta, Diff, DiffFindOptions, Repository, Tree};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;

/// similarity required before a delete/add pair collapses into a rename
/// (git's own default)
const RENAME_THRESHOLD: u16 = 50;

/// read-only queries the classifier needs from the version-control layer
pub trait RepoQuery {
    /// validate that `name` resolves to a remote tracking branch
    fn resolve_remote_ref(&self, name: &str) -> Result<BranchRef>;

    /// structural diff from the reference commit to the branch tip,
    /// filtered to one change kind
    fn commits_diff(
        &self,
        reference: &BranchRef,
        kind: ChangeKind,
    ) -> Result<BTreeSet<ChangeRecord>>;

    /// structural diff from the last commit to the index, filtered to one
    /// change kind
    fn index_diff(&self, kind: ChangeKind) -> Result<BTreeSet<ChangeRecord>>;

    /// every path touched between the reference and the branch tip, with
    /// no status distinction
    fn name_only_diff(&self, reference: &BranchRef) -> Result<BTreeSet<PathBuf>>;

    /// working tree status including untracked files, as typed records
    fn working_tree_status(&self) -> Result<Vec<ChangeRecord>>;

    fn active_branch_name(&self) -> Result<String>;
}

/// collaborator backed by an on-disk repository
///
/// diffs go through libgit2; working-tree status shells out to the git
/// binary and feeds each line through the typed status parser
pub struct GitRepo {
    repo: Repository,
}

impl std::fmt::Debug for GitRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepo").finish_non_exhaustive()
    }
}

impl GitRepo {
    /// discover the repository containing `path`, failing loudly when
    /// there is none
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .map_err(|_| Error::RepositoryUnavailable(path.to_path_buf()))?;
        Ok(Self { repo })
    }

    /// tree of the branch tip; None while the branch is unborn
    fn head_tree(&self) -> Result<Option<Tree<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_tree()?)),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remote_branch(&self, reference: &BranchRef) -> Result<git2::Branch<'_>> {
        self.repo
            .find_branch(&reference.remote(), BranchType::Remote)
            .map_err(|_| Error::UnknownReference(reference.local().to_string()))
    }

    /// collect the deltas of one kind after rename detection
    fn records_by_kind(diff: &mut Diff<'_>, kind: ChangeKind) -> Result<BTreeSet<ChangeRecord>> {
        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        find_opts.rename_threshold(RENAME_THRESHOLD);
        find_opts.copy_threshold(RENAME_THRESHOLD);
        diff.find_similar(Some(&mut find_opts))?;

        let mut records = BTreeSet::new();
        for delta in diff.deltas() {
            let Some(delta_kind) = change_kind(delta.status()) else {
                continue;
            };
            if delta_kind != kind {
                continue;
            }
            if let Some(record) = to_record(&delta, delta_kind) {
                records.insert(record);
            }
        }
        Ok(records)
    }
}

impl RepoQuery for GitRepo {
    fn resolve_remote_ref(&self, name: &str) -> Result<BranchRef> {
        let reference = BranchRef::new(name);
        self.remote_branch(&reference)?;
        Ok(reference)
    }

    fn commits_diff(
        &self,
        reference: &BranchRef,
        kind: ChangeKind,
    ) -> Result<BTreeSet<ChangeRecord>> {
        let from = self.remote_branch(reference)?.get().peel_to_tree()?;
        let to = self.head_tree()?;
        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(&from), to.as_ref(), None)?;
        Self::records_by_kind(&mut diff, kind)
    }

    fn index_diff(&self, kind: ChangeKind) -> Result<BTreeSet<ChangeRecord>> {
        // unborn branch (no commits yet): everything in the index is new
        let tree = self.head_tree()?;
        let mut diff = self.repo.diff_tree_to_index(tree.as_ref(), None, None)?;
        Self::records_by_kind(&mut diff, kind)
    }

    fn name_only_diff(&self, reference: &BranchRef) -> Result<BTreeSet<PathBuf>> {
        // three-dot semantics: diff the branch tip against its merge base
        // with the explicitly re-qualified remote ref, so drift on the
        // reference branch does not count as this branch's changes
        let remote_commit = self
            .repo
            .revparse_single(&reference.remote())
            .map_err(|_| Error::UnknownReference(reference.local().to_string()))?
            .peel_to_commit()?;
        let head_commit = self.repo.head()?.peel_to_commit()?;
        let base = self.repo.merge_base(remote_commit.id(), head_commit.id())?;
        let base_tree = self.repo.find_commit(base)?.tree()?;
        let diff =
            self.repo
                .diff_tree_to_tree(Some(&base_tree), Some(&head_commit.tree()?), None)?;

        // no rename detection here: a renamed file contributes both its
        // old and new path to the touched set
        let mut paths = BTreeSet::new();
        for delta in diff.deltas() {
            for file in [delta.old_file(), delta.new_file()] {
                if let Some(path) = file.path() {
                    paths.insert(path.to_path_buf());
                }
            }
        }
        Ok(paths)
    }

    fn working_tree_status(&self) -> Result<Vec<ChangeRecord>> {
        let Some(workdir) = self.repo.workdir() else {
            return Err(Error::StatusCommand(
                "repository has no working tree".to_string(),
            ));
        };

        let output = Command::new("git")
            .args(["status", "--short", "-u"])
            .current_dir(workdir)
            .output()?;
        if !output.status.success() {
            return Err(Error::StatusCommand(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let mut records = Vec::new();
        for line in String::from_utf8_lossy(&output.stdout).lines() {
            if let Some(record) = parse_status_line(line)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn active_branch_name(&self) -> Result<String> {
        let head = self.repo.head()?;
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }
}

/// map a libgit2 delta status onto the classified kinds; unmodified,
/// ignored and conflicted entries carry no change
fn change_kind(status: Delta) -> Option<ChangeKind> {
    match status {
        Delta::Added | Delta::Copied | Delta::Untracked => Some(ChangeKind::Added),
        Delta::Modified | Delta::Typechange => Some(ChangeKind::Modified),
        Delta::Deleted => Some(ChangeKind::Deleted),
        Delta::Renamed => Some(ChangeKind::Renamed),
        _ => None,
    }
}

fn to_record(delta: &git2::DiffDelta<'_>, kind: ChangeKind) -> Option<ChangeRecord> {
    match kind {
        ChangeKind::Renamed => Some(ChangeRecord::renamed(
            delta.old_file().path()?,
            delta.new_file().path()?,
        )),
        ChangeKind::Deleted => Some(ChangeRecord::new(kind, delta.old_file().path()?)),
        _ => Some(ChangeRecord::new(kind, delta.new_file().path()?)),
    }
}

#[cfg(test)]
mod tests;
