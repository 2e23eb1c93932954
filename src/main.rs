mod changes;
mod classifier;
mod cli;
mod error;
mod refs;
mod repo;
mod report;
mod status;
mod ui;

use crate::classifier::ChangeClassifier;
use crate::cli::Cli;
use crate::refs::BranchRef;
use crate::repo::{GitRepo, RepoQuery};
use crate::report::ChangeReport;
use anyhow::Result;
use std::path::Path;

fn main() {
    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let repo = GitRepo::discover(Path::new("."))?;
    let branch = repo.active_branch_name()?;
    let classifier = ChangeClassifier::new(repo);

    let report = ChangeReport::collect(
        &classifier,
        &cli.reference,
        cli.committed_only,
        cli.staged_only,
    )?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let reference = BranchRef::new(&cli.reference);
    if report.is_empty() {
        status!("no changes on {} relative to {}", branch, reference.remote());
        return Ok(());
    }

    status!("changes on {} relative to {}:", branch, reference.remote());
    report.print();

    Ok(())
}
