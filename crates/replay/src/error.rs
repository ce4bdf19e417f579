use crate::vcs::VcsError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the session engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not a git repository")]
    NotARepository,

    #[error("working tree is dirty, please commit or stash your changes")]
    DirtyWorkingTree,

    #[error("invalid {role} commit: {revision}")]
    InvalidRevision { role: &'static str, revision: String },

    #[error("commit {start} is not an ancestor of {end}")]
    NotAncestor { start: String, end: String },

    #[error("no commits in range {start}..{end}")]
    EmptyRange { start: String, end: String },

    #[error("commits list is empty")]
    EmptyCommits,

    #[error("terminal error: {0}")]
    Terminal(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Vcs(#[from] VcsError),

    #[error(transparent)]
    Restore(#[from] RestoreError),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Preconditions failed; nothing was touched.
    Validation,
    /// The requested range produced no commits.
    Range,
    /// Terminal, input or repository I/O failed mid-session.
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotARepository
            | Error::DirtyWorkingTree
            | Error::InvalidRevision { .. }
            | Error::NotAncestor { .. } => ErrorKind::Validation,
            Error::EmptyRange { .. } | Error::EmptyCommits => ErrorKind::Range,
            Error::Terminal(_) | Error::Io(_) | Error::Vcs(_) | Error::Restore(_) => ErrorKind::Io,
        }
    }
}

/// Which parts of the restoration action failed.
#[derive(Debug, Default, thiserror::Error)]
pub struct RestoreError {
    pub checkout: Option<VcsError>,
    pub terminal: Option<std::io::Error>,
}

impl RestoreError {
    pub fn is_empty(&self) -> bool {
        self.checkout.is_none() && self.terminal.is_none()
    }
}

impl std::fmt::Display for RestoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if let Some(e) = &self.checkout {
            parts.push(format!("could not restore original reference: {}", e));
        }
        if let Some(e) = &self.terminal {
            parts.push(format!("could not restore terminal mode: {}", e));
        }
        write!(f, "{}", parts.join("; "))
    }
}
