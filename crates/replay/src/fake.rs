//! In-memory collaborators for unit tests.

use std::collections::HashSet;
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::terminal::Terminal;
use crate::vcs::{Commit, Vcs, VcsError};

pub const BRANCH: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Head {
    Branch,
    Detached(usize),
}

/// Linear history on a single branch, oldest commit first.
pub struct FakeVcs {
    commits: Vec<Commit>,
    head: Mutex<Head>,
    checkouts: Mutex<Vec<String>>,
    failing: Mutex<HashSet<String>>,
    pub repository: AtomicBool,
    pub clean: AtomicBool,
}

impl FakeVcs {
    pub fn linear(hashes: &[&str]) -> Self {
        FakeVcs {
            commits: hashes
                .iter()
                .map(|h| Commit::new(*h, format!("message {}", h)))
                .collect(),
            head: Mutex::new(Head::Branch),
            checkouts: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            repository: AtomicBool::new(true),
            clean: AtomicBool::new(true),
        }
    }

    /// Every reference passed to `checkout`, in call order.
    pub fn checkouts(&self) -> Vec<String> {
        self.checkouts.lock().unwrap().clone()
    }

    pub fn checkouts_of(&self, reference: &str) -> usize {
        self.checkouts().iter().filter(|r| *r == reference).count()
    }

    pub fn fail_checkout_of(&self, reference: &str) {
        self.failing.lock().unwrap().insert(reference.to_string());
    }

    fn index_of(&self, id: &str) -> Result<usize, VcsError> {
        if id == "HEAD" {
            return Ok(match *self.head.lock().unwrap() {
                Head::Branch => self.commits.len() - 1,
                Head::Detached(i) => i,
            });
        }
        if id == BRANCH {
            return Ok(self.commits.len() - 1);
        }
        self.commits
            .iter()
            .position(|c| c.hash == id)
            .ok_or_else(|| VcsError::InvalidRevision(id.to_string()))
    }

    /// Index of the newest commit excluded by `from`, or `None` when `from`
    /// excludes nothing.
    fn exclusion_bound(&self, from: &str) -> Result<Option<usize>, VcsError> {
        match from.strip_suffix('^') {
            Some(base) => match self.index_of(base)? {
                0 => Err(VcsError::RootRevision(base.to_string())),
                i => Ok(Some(i - 1)),
            },
            None => self.index_of(from).map(Some),
        }
    }
}

impl Vcs for FakeVcs {
    fn is_repository(&self) -> Result<bool, VcsError> {
        Ok(self.repository.load(Ordering::SeqCst))
    }

    fn is_working_tree_clean(&self) -> Result<bool, VcsError> {
        Ok(self.clean.load(Ordering::SeqCst))
    }

    fn validate_revision(&self, id: &str) -> Result<(), VcsError> {
        self.index_of(id).map(|_| ())
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool, VcsError> {
        Ok(self.index_of(ancestor)? <= self.index_of(descendant)?)
    }

    fn recent_revisions(&self, n: usize) -> Result<Vec<Commit>, VcsError> {
        let tip = self.index_of("HEAD")?;
        Ok(self.commits[..=tip].iter().rev().take(n).cloned().collect())
    }

    fn revisions_in_range(&self, from: &str, to: &str) -> Result<Vec<Commit>, VcsError> {
        let hidden = self.exclusion_bound(from)?;
        let to = self.index_of(to)?;
        let first = hidden.map_or(0, |i| i + 1);
        if first > to {
            return Ok(Vec::new());
        }
        Ok(self.commits[first..=to].to_vec())
    }

    fn revision(&self, id: &str) -> Result<Commit, VcsError> {
        Ok(self.commits[self.index_of(id)?].clone())
    }

    fn current_reference(&self) -> Result<String, VcsError> {
        Ok(match *self.head.lock().unwrap() {
            Head::Branch => BRANCH.to_string(),
            Head::Detached(i) => self.commits[i].hash.clone(),
        })
    }

    fn checkout(&self, reference: &str) -> Result<(), VcsError> {
        self.checkouts.lock().unwrap().push(reference.to_string());
        if self.failing.lock().unwrap().contains(reference) {
            return Err(VcsError::CheckoutFailed {
                reference: reference.to_string(),
                message: "simulated failure".to_string(),
            });
        }
        let head = if reference == BRANCH {
            Head::Branch
        } else {
            Head::Detached(self.index_of(reference)?)
        };
        *self.head.lock().unwrap() = head;
        Ok(())
    }
}

/// Terminal double that counts mode switches.
#[derive(Default)]
pub struct FakeTerminal {
    pub entered: AtomicUsize,
    pub restored: AtomicUsize,
    pub fail_enter: AtomicBool,
}

impl FakeTerminal {
    pub fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }

    pub fn restored(&self) -> usize {
        self.restored.load(Ordering::SeqCst)
    }
}

impl Terminal for FakeTerminal {
    fn enter_raw_mode(&self) -> io::Result<()> {
        if self.fail_enter.load(Ordering::SeqCst) {
            return Err(io::Error::other("not a terminal"));
        }
        self.entered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn restore_mode(&self) -> io::Result<()> {
        self.restored.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
