use clap::Parser;

/// git-changes: classify files changed on this branch against a reference branch
#[derive(Parser, Debug)]
#[command(
    name = "git-changes",
    about,
    long_about = None,
    disable_version_flag = true
)]
pub struct Cli {
    /// reference branch to compare against, with or without `origin/`
    #[arg(default_value = "master")]
    pub reference: String,

    /// only report changes already committed on this branch
    #[arg(long, conflicts_with = "staged_only")]
    pub committed_only: bool,

    /// only report staged and working-tree changes
    #[arg(long, conflicts_with = "committed_only")]
    pub staged_only: bool,

    /// emit the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
