use serde::Serialize;

// ── Commit ───────────────────────────────────────────────────────────

/// A single revision: a short, stable hash plus its subject line.
///
/// Two commits are equal when their hashes are equal; the message is
/// descriptive only.
#[derive(Debug, Clone, Eq, Serialize)]
pub struct Commit {
    pub hash: String,
    pub message: String,
}

impl Commit {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Commit {
            hash: hash.into(),
            message: message.into(),
        }
    }
}

impl PartialEq for Commit {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl std::hash::Hash for Commit {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl std::fmt::Display for Commit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.hash, self.message)
    }
}

// ── Error ────────────────────────────────────────────────────────────

/// Errors reported by a version-control backend.
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    #[error("invalid revision: {0}")]
    InvalidRevision(String),

    /// The range lower bound was `X^` and `X` has no parent.
    #[error("revision {0} has no parent")]
    RootRevision(String),

    #[error("checkout of {reference} failed: {message}")]
    CheckoutFailed { reference: String, message: String },

    #[error("{0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

// ── Capability ───────────────────────────────────────────────────────

/// Everything the session engine needs from a version-control system.
///
/// Implementations are shared between the input loop and the interrupt
/// handler thread, hence `Send + Sync`.
pub trait Vcs: Send + Sync {
    fn is_repository(&self) -> Result<bool, VcsError>;

    /// True when there are no staged, unstaged or untracked changes.
    fn is_working_tree_clean(&self) -> Result<bool, VcsError>;

    /// Fails with [`VcsError::InvalidRevision`] unless `id` names a commit.
    fn validate_revision(&self, id: &str) -> Result<(), VcsError>;

    /// True when `ancestor` is reachable from `descendant` (or equal to it).
    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool, VcsError>;

    /// Up to `n` commits reachable from the current tip, most recent first.
    fn recent_revisions(&self, n: usize) -> Result<Vec<Commit>, VcsError>;

    /// Commits reachable from `to` but not from `from`, oldest first.
    ///
    /// When `from` has the form `X^` and `X` is a root commit this fails
    /// with [`VcsError::RootRevision`].
    fn revisions_in_range(&self, from: &str, to: &str) -> Result<Vec<Commit>, VcsError>;

    /// Look up a single commit.
    fn revision(&self, id: &str) -> Result<Commit, VcsError>;

    /// The branch name when on a branch, otherwise the detached commit id.
    fn current_reference(&self) -> Result<String, VcsError>;

    /// Materialize `reference` (branch name or commit id) in the working tree.
    fn checkout(&self, reference: &str) -> Result<(), VcsError>;
}
