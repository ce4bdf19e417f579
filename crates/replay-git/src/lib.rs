#![doc = include_str!("../README.md")]

use std::path::PathBuf;

use git2::{BranchType, Oid, Repository, Sort, Status, StatusOptions, build::CheckoutBuilder};
use replay::{Commit, Vcs, VcsError};
use tracing::debug;

/// Length of the abbreviated hashes handed out as [`Commit::hash`].
pub const SHORT_HASH_LEN: usize = 8;

// ============================================================================
// Client
// ============================================================================

/// [`Vcs`] implementation over libgit2.
///
/// The repository is discovered from `dir` on every call, so the client
/// holds no open handle and can be shared with the interrupt handler thread.
#[derive(Debug, Clone)]
pub struct GitClient {
    dir: PathBuf,
}

impl GitClient {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        GitClient { dir: dir.into() }
    }

    fn open(&self) -> Result<Repository, VcsError> {
        Repository::discover(&self.dir).map_err(backend)
    }
}

impl Vcs for GitClient {
    fn is_repository(&self) -> Result<bool, VcsError> {
        Ok(Repository::discover(&self.dir).is_ok())
    }

    fn is_working_tree_clean(&self) -> Result<bool, VcsError> {
        let repo = self.open()?;
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);
        let statuses = repo.statuses(Some(&mut opts)).map_err(backend)?;
        Ok(statuses
            .iter()
            .all(|entry| entry.status() == Status::CURRENT))
    }

    fn validate_revision(&self, id: &str) -> Result<(), VcsError> {
        let repo = self.open()?;
        resolve_commit(&repo, id).map(|_| ())
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool, VcsError> {
        let repo = self.open()?;
        let ancestor = resolve_commit(&repo, ancestor)?;
        let descendant = resolve_commit(&repo, descendant)?;
        if ancestor == descendant {
            return Ok(true);
        }
        repo.graph_descendant_of(descendant, ancestor)
            .map_err(backend)
    }

    fn recent_revisions(&self, n: usize) -> Result<Vec<Commit>, VcsError> {
        let repo = self.open()?;
        let mut walker = repo.revwalk().map_err(backend)?;
        walker.push_head().map_err(backend)?;
        walker
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .map_err(backend)?;

        let mut commits = Vec::new();
        for oid in walker.take(n) {
            let oid = oid.map_err(backend)?;
            commits.push(to_commit(&repo, oid)?);
        }
        Ok(commits)
    }

    fn revisions_in_range(&self, from: &str, to: &str) -> Result<Vec<Commit>, VcsError> {
        let repo = self.open()?;
        let hidden = match resolve_commit(&repo, from) {
            Ok(oid) => oid,
            Err(e) => return Err(root_or(&repo, from, e)),
        };
        let head = resolve_commit(&repo, to)?;

        let mut walker = repo.revwalk().map_err(backend)?;
        walker.push(head).map_err(backend)?;
        walker.hide(hidden).map_err(backend)?;
        walker
            .set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)
            .map_err(backend)?;

        let mut commits = Vec::new();
        for oid in walker {
            let oid = oid.map_err(backend)?;
            commits.push(to_commit(&repo, oid)?);
        }
        debug!(from, to, count = commits.len(), "listed range");
        Ok(commits)
    }

    fn revision(&self, id: &str) -> Result<Commit, VcsError> {
        let repo = self.open()?;
        let oid = resolve_commit(&repo, id)?;
        to_commit(&repo, oid)
    }

    fn current_reference(&self) -> Result<String, VcsError> {
        let repo = self.open()?;
        let head = repo.head().map_err(backend)?;
        if head.is_branch()
            && let Some(name) = head.shorthand()
        {
            return Ok(name.to_string());
        }
        let oid = head.peel_to_commit().map_err(backend)?.id();
        Ok(short_oid(oid))
    }

    fn checkout(&self, reference: &str) -> Result<(), VcsError> {
        let repo = self.open()?;
        checkout(&repo, reference).map_err(|e| VcsError::CheckoutFailed {
            reference: reference.to_string(),
            message: e.message().to_string(),
        })
    }
}

// ============================================================================
// Private helpers
// ============================================================================

fn backend(e: git2::Error) -> VcsError {
    VcsError::Backend(Box::new(e))
}

fn resolve_commit(repo: &Repository, id: &str) -> Result<Oid, VcsError> {
    repo.revparse_single(id)
        .and_then(|obj| obj.peel_to_commit())
        .map(|commit| commit.id())
        .map_err(|_| VcsError::InvalidRevision(id.to_string()))
}

/// Turn a failed `X^` lookup into [`VcsError::RootRevision`] when `X` exists
/// and has no parents; otherwise keep the original error.
fn root_or(repo: &Repository, from: &str, err: VcsError) -> VcsError {
    if let Some(base) = from.strip_suffix('^')
        && let Ok(oid) = resolve_commit(repo, base)
        && let Ok(commit) = repo.find_commit(oid)
        && commit.parent_count() == 0
    {
        return VcsError::RootRevision(base.to_string());
    }
    err
}

fn to_commit(repo: &Repository, oid: Oid) -> Result<Commit, VcsError> {
    let commit = repo.find_commit(oid).map_err(backend)?;
    let subject = commit
        .message()
        .unwrap_or("")
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .to_string();
    Ok(Commit::new(short_oid(oid), subject))
}

/// Check out a local branch by name, or anything else detached.
fn checkout(repo: &Repository, reference: &str) -> Result<(), git2::Error> {
    let mut opts = CheckoutBuilder::new();
    opts.safe();

    if let Ok(branch) = repo.find_branch(reference, BranchType::Local) {
        let target = branch.get().peel_to_commit()?;
        let refname = branch
            .get()
            .name()
            .ok_or_else(|| git2::Error::from_str("branch name is not valid UTF-8"))?
            .to_string();
        repo.checkout_tree(target.as_object(), Some(&mut opts))?;
        repo.set_head(&refname)?;
        return Ok(());
    }

    let target = repo.revparse_single(reference)?.peel_to_commit()?;
    repo.checkout_tree(target.as_object(), Some(&mut opts))?;
    repo.set_head_detached(target.id())?;
    Ok(())
}

fn short_oid(oid: Oid) -> String {
    safe_prefix(&oid.to_string(), SHORT_HASH_LEN)
}

/// Return the first `n` characters of a string, safe for any UTF-8 content.
fn safe_prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}
