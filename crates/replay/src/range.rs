use tracing::debug;

use crate::error::{Error, Result};
use crate::vcs::{Commit, Vcs, VcsError};

/// Resolve `start..=end` into an oldest-first commit sequence.
///
/// The range is requested as `start^..end`. A root `start` has no parent, so
/// in that one case the range is requested as `start..end` and `start` is
/// prepended. Any other backend failure propagates.
pub fn resolve(vcs: &dyn Vcs, start: &str, end: &str) -> Result<Vec<Commit>> {
    let parent = format!("{}^", start);
    let commits = match vcs.revisions_in_range(&parent, end) {
        Ok(commits) => commits,
        Err(VcsError::RootRevision(root)) => {
            debug!(%root, "start is a root commit, including it explicitly");
            let mut commits = vec![vcs.revision(start)?];
            commits.extend(vcs.revisions_in_range(start, end)?);
            commits
        }
        Err(e) => return Err(e.into()),
    };

    if commits.is_empty() {
        return Err(Error::EmptyRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(commits)
}
