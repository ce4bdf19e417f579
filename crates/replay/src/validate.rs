use crate::error::{Error, Result};
use crate::picker::DEFAULT_PAGE_SIZE;
use crate::vcs::{Vcs, VcsError};

/// How many recent commits the picker offers by default.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 50;

const TIP: &str = "HEAD";

/// What to replay and how to present the picker.
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    /// First commit of the range; `None` opens the picker.
    pub start: Option<String>,
    /// Last commit of the range; `None` means the current tip.
    pub end: Option<String>,
    pub page_size: usize,
    /// Number of recent commits offered by the picker.
    pub candidate_limit: usize,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        ReplayOptions {
            start: None,
            end: None,
            page_size: DEFAULT_PAGE_SIZE,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }
}

impl ReplayOptions {
    pub fn range(start: impl Into<String>, end: Option<String>) -> Self {
        ReplayOptions {
            start: Some(start.into()),
            end,
            ..Default::default()
        }
    }

    pub fn end_ref(&self) -> &str {
        self.end.as_deref().unwrap_or(TIP)
    }
}

/// Check every precondition before the terminal or working tree is touched.
pub fn validate(vcs: &dyn Vcs, opts: &ReplayOptions) -> Result<()> {
    if !vcs.is_repository()? {
        return Err(Error::NotARepository);
    }
    if !vcs.is_working_tree_clean()? {
        return Err(Error::DirtyWorkingTree);
    }

    let Some(start) = opts.start.as_deref() else {
        return Ok(());
    };
    check_revision(vcs, "start", start)?;
    if let Some(end) = opts.end.as_deref() {
        check_revision(vcs, "end", end)?;
    }

    let end = opts.end_ref();
    if !vcs.is_ancestor(start, end)? {
        return Err(Error::NotAncestor {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

fn check_revision(vcs: &dyn Vcs, role: &'static str, revision: &str) -> Result<()> {
    match vcs.validate_revision(revision) {
        Ok(()) => Ok(()),
        Err(VcsError::InvalidRevision(_)) => Err(Error::InvalidRevision {
            role,
            revision: revision.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}
