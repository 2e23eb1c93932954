use super::*;
use crate::classifier::ChangeClassifier;
use git2::Oid;
use std::fs;
use tempfile::TempDir;

/// helper to initialise a test git repository
fn setup_test_repo() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::init(temp_dir.path()).unwrap();

    // configure git user for commits
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    (temp_dir, repo)
}

/// helper to create a file with content
fn create_file(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

/// helper to stage everything (additions and removals) and commit
fn commit_all(repo: &Repository, message: &str) -> Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.update_all(["*"].iter(), None).unwrap();
    index.write().unwrap();

    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let signature = repo.signature().unwrap();

    let parent_commit = repo.head().ok().and_then(|h| h.peel_to_commit().ok());

    if let Some(parent) = parent_commit {
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )
        .unwrap()
    } else {
        // first commit
        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[])
            .unwrap()
    }
}

/// mark `commit` as the remote tracking state of master
fn set_origin_master(repo: &Repository, commit: Oid) {
    repo.reference("refs/remotes/origin/master", commit, true, "test")
        .unwrap();
}

fn reported_paths(records: &BTreeSet<ChangeRecord>) -> Vec<String> {
    records
        .iter()
        .map(|record| record.path().display().to_string())
        .collect()
}

#[test]
fn discovery_fails_outside_a_repository() {
    let temp_dir = TempDir::new().unwrap();

    let err = GitRepo::discover(temp_dir.path()).unwrap_err();
    assert!(matches!(err, Error::RepositoryUnavailable(_)));
}

#[test]
fn unknown_reference_is_rejected() {
    let (temp_dir, repo) = setup_test_repo();
    create_file(&temp_dir.path().join("a.txt"), "a");
    commit_all(&repo, "initial commit");

    let git_repo = GitRepo::discover(temp_dir.path()).unwrap();
    let err = git_repo.resolve_remote_ref("master").unwrap_err();
    assert!(matches!(err, Error::UnknownReference(name) if name == "master"));
}

#[test]
fn reference_resolves_with_or_without_prefix() {
    let (temp_dir, repo) = setup_test_repo();
    create_file(&temp_dir.path().join("a.txt"), "a");
    let base = commit_all(&repo, "initial commit");
    set_origin_master(&repo, base);

    let git_repo = GitRepo::discover(temp_dir.path()).unwrap();
    assert_eq!(
        git_repo.resolve_remote_ref("master").unwrap(),
        git_repo.resolve_remote_ref("origin/master").unwrap()
    );
}

#[test]
fn commits_diff_classifies_changes_by_kind() {
    let (temp_dir, repo) = setup_test_repo();
    let repo_path = temp_dir.path();

    create_file(&repo_path.join("keep.txt"), "keep");
    create_file(&repo_path.join("edit.txt"), "original");
    create_file(&repo_path.join("drop.txt"), "drop");
    let base = commit_all(&repo, "initial commit");
    set_origin_master(&repo, base);

    create_file(&repo_path.join("edit.txt"), "changed");
    create_file(&repo_path.join("new.txt"), "new");
    fs::remove_file(repo_path.join("drop.txt")).unwrap();
    commit_all(&repo, "branch work");

    let git_repo = GitRepo::discover(repo_path).unwrap();
    let reference = git_repo.resolve_remote_ref("master").unwrap();

    let added = git_repo.commits_diff(&reference, ChangeKind::Added).unwrap();
    assert_eq!(reported_paths(&added), vec!["new.txt"]);

    let modified = git_repo
        .commits_diff(&reference, ChangeKind::Modified)
        .unwrap();
    assert_eq!(reported_paths(&modified), vec!["edit.txt"]);

    let deleted = git_repo
        .commits_diff(&reference, ChangeKind::Deleted)
        .unwrap();
    assert_eq!(reported_paths(&deleted), vec!["drop.txt"]);
}

#[test]
fn commits_diff_detects_renames() {
    let (temp_dir, repo) = setup_test_repo();
    let repo_path = temp_dir.path();

    create_file(
        &repo_path.join("old_name.txt"),
        "enough content\nfor the similarity check\nto see these as one file\n",
    );
    let base = commit_all(&repo, "initial commit");
    set_origin_master(&repo, base);

    fs::rename(
        repo_path.join("old_name.txt"),
        repo_path.join("new_name.txt"),
    )
    .unwrap();
    commit_all(&repo, "rename file");

    let git_repo = GitRepo::discover(repo_path).unwrap();
    let reference = git_repo.resolve_remote_ref("master").unwrap();

    let renamed = git_repo
        .commits_diff(&reference, ChangeKind::Renamed)
        .unwrap();
    assert_eq!(renamed.len(), 1, "rename detected as single operation");
    let record = renamed.iter().next().unwrap();
    assert_eq!(record.path_before, Path::new("old_name.txt"));
    assert_eq!(record.path_after, Path::new("new_name.txt"));

    // the delete/add pair must not leak into the other kinds
    assert!(git_repo
        .commits_diff(&reference, ChangeKind::Added)
        .unwrap()
        .is_empty());
    assert!(git_repo
        .commits_diff(&reference, ChangeKind::Deleted)
        .unwrap()
        .is_empty());
}

#[test]
fn index_diff_sees_staged_but_not_committed_changes() {
    let (temp_dir, repo) = setup_test_repo();
    let repo_path = temp_dir.path();

    create_file(&repo_path.join("a.txt"), "original");
    let base = commit_all(&repo, "initial commit");
    set_origin_master(&repo, base);

    create_file(&repo_path.join("a.txt"), "staged edit");
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("a.txt")).unwrap();
    index.write().unwrap();

    let git_repo = GitRepo::discover(repo_path).unwrap();
    let reference = git_repo.resolve_remote_ref("master").unwrap();

    let staged = git_repo.index_diff(ChangeKind::Modified).unwrap();
    assert_eq!(reported_paths(&staged), vec!["a.txt"]);

    // nothing was committed, so the commits diff stays empty
    assert!(git_repo
        .commits_diff(&reference, ChangeKind::Modified)
        .unwrap()
        .is_empty());
}

#[test]
fn name_only_diff_ignores_reference_drift() {
    let (temp_dir, repo) = setup_test_repo();
    let repo_path = temp_dir.path();

    create_file(&repo_path.join("a.txt"), "a");
    let base = commit_all(&repo, "initial commit");

    // advance the branch tip
    create_file(&repo_path.join("b.txt"), "b");
    commit_all(&repo, "branch work");

    // advance origin/master independently with a commit this branch has
    // never seen
    let blob = repo.blob(b"drift").unwrap();
    let base_commit = repo.find_commit(base).unwrap();
    let mut builder = repo.treebuilder(Some(&base_commit.tree().unwrap())).unwrap();
    builder.insert("c.txt", blob, 0o100_644).unwrap();
    let drift_tree = repo.find_tree(builder.write().unwrap()).unwrap();
    let signature = repo.signature().unwrap();
    let drift = repo
        .commit(None, &signature, &signature, "drift", &drift_tree, &[&base_commit])
        .unwrap();
    set_origin_master(&repo, drift);

    let git_repo = GitRepo::discover(repo_path).unwrap();
    let reference = git_repo.resolve_remote_ref("master").unwrap();

    // two-dot diff against the drifted origin sees c.txt as deleted...
    let two_dot = git_repo
        .commits_diff(&reference, ChangeKind::Deleted)
        .unwrap();
    assert_eq!(reported_paths(&two_dot), vec!["c.txt"]);

    // ...but the touched set diffs from the merge base, so only this
    // branch's own work appears
    let touched = git_repo.name_only_diff(&reference).unwrap();
    assert_eq!(touched, BTreeSet::from([PathBuf::from("b.txt")]));

    // end to end, the classifier discards the drift entirely
    let classifier = ChangeClassifier::new(git_repo);
    assert!(classifier.deleted("master", true, false).unwrap().is_empty());
    assert_eq!(
        classifier.added("master", true, false).unwrap(),
        BTreeSet::from([PathBuf::from("b.txt")])
    );
}

#[test]
fn working_tree_status_reports_untracked_and_unstaged_files() {
    let (temp_dir, repo) = setup_test_repo();
    let repo_path = temp_dir.path();

    create_file(&repo_path.join("tracked.txt"), "original");
    commit_all(&repo, "initial commit");

    create_file(&repo_path.join("tracked.txt"), "edited");
    create_file(&repo_path.join("untracked.txt"), "new");

    let git_repo = GitRepo::discover(repo_path).unwrap();
    let records = git_repo.working_tree_status().unwrap();

    assert!(records
        .iter()
        .any(|r| r.kind == ChangeKind::Added && r.path() == Path::new("untracked.txt")));
    assert!(records
        .iter()
        .any(|r| r.kind == ChangeKind::Modified && r.path() == Path::new("tracked.txt")));
}

#[test]
fn active_branch_name_is_head_shorthand() {
    let (temp_dir, repo) = setup_test_repo();
    create_file(&temp_dir.path().join("a.txt"), "a");
    commit_all(&repo, "initial commit");

    let git_repo = GitRepo::discover(temp_dir.path()).unwrap();
    let name = git_repo.active_branch_name().unwrap();
    assert!(!name.is_empty());
    assert!(!name.starts_with("refs/"));
}
