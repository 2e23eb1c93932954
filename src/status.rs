use crate::changes::{ChangeKind, ChangeRecord};
use crate::error::{Error, Result};

const UNTRACKED_MARKER: char = '?';
const RENAME_SEPARATOR: &str = " -> ";

/// parse one `git status --short -u` line into a typed record
///
/// untracked entries report as additions; blank lines and compound
/// two-column codes (e.g. `MM`, partially staged) carry no single change
/// kind and are skipped. a recognized code with a missing or truncated
/// path is rejected rather than silently tolerated
pub fn parse_status_line(line: &str) -> Result<Option<ChangeRecord>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some((code, rest)) = line.split_once(' ') else {
        return Err(Error::MalformedStatus(line.to_string()));
    };
    let rest = rest.trim_start();

    if code.starts_with(UNTRACKED_MARKER) {
        if rest.is_empty() {
            return Err(Error::MalformedStatus(line.to_string()));
        }
        return Ok(Some(ChangeRecord::new(ChangeKind::Added, unquote(rest))));
    }

    let kind = match code.to_ascii_uppercase().as_str() {
        "A" => ChangeKind::Added,
        "M" => ChangeKind::Modified,
        "D" => ChangeKind::Deleted,
        "R" => ChangeKind::Renamed,
        _ => return Ok(None),
    };

    if kind == ChangeKind::Renamed {
        let Some((from, to)) = rest.split_once(RENAME_SEPARATOR) else {
            return Err(Error::MalformedStatus(line.to_string()));
        };
        if from.is_empty() || to.is_empty() {
            return Err(Error::MalformedStatus(line.to_string()));
        }
        return Ok(Some(ChangeRecord::renamed(unquote(from), unquote(to))));
    }

    if rest.is_empty() {
        return Err(Error::MalformedStatus(line.to_string()));
    }
    Ok(Some(ChangeRecord::new(kind, unquote(rest))))
}

/// git quotes paths containing unusual characters
fn unquote(path: &str) -> &str {
    path.strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .unwrap_or(path)
}
