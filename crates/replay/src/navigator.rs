use crate::error::{Error, Result};
use crate::vcs::Commit;

/// A navigation step that would leave the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Boundary {
    #[error("already at last commit")]
    AtEnd,
    #[error("already at first commit")]
    AtStart,
}

/// Bounded cursor over an immutable, non-empty commit sequence.
#[derive(Debug, Clone)]
pub struct Navigator {
    commits: Vec<Commit>,
    cursor: usize,
}

impl Navigator {
    /// Fails with [`Error::EmptyCommits`] when `commits` is empty.
    pub fn new(commits: Vec<Commit>) -> Result<Self> {
        if commits.is_empty() {
            return Err(Error::EmptyCommits);
        }
        Ok(Navigator { commits, cursor: 0 })
    }

    pub fn current(&self) -> &Commit {
        &self.commits[self.cursor]
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> std::result::Result<(), Boundary> {
        if self.cursor + 1 >= self.commits.len() {
            return Err(Boundary::AtEnd);
        }
        self.cursor += 1;
        Ok(())
    }

    pub fn prev(&mut self) -> std::result::Result<(), Boundary> {
        if self.cursor == 0 {
            return Err(Boundary::AtStart);
        }
        self.cursor -= 1;
        Ok(())
    }

    /// One-based position of the cursor and the sequence length.
    pub fn position(&self) -> (usize, usize) {
        (self.cursor + 1, self.commits.len())
    }
}
