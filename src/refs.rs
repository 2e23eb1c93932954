const REMOTE_PREFIX: &str = "origin/";

/// a reference branch, held as the bare local name
///
/// callers may spell the reference either way (`master` or
/// `origin/master`); the prefix is stripped on construction and
/// re-added explicitly wherever a query needs the remote tracking name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef(String);

impl BranchRef {
    pub fn new(name: &str) -> Self {
        Self(to_local(name).to_string())
    }

    /// the bare branch name
    pub fn local(&self) -> &str {
        &self.0
    }

    /// the remote tracking name, always `origin/`-qualified
    pub fn remote(&self) -> String {
        format!("{REMOTE_PREFIX}{}", self.0)
    }
}

/// strip a leading `origin/` so both spellings name the same reference
pub fn to_local(name: &str) -> &str {
    name.strip_prefix(REMOTE_PREFIX).unwrap_or(name)
}
