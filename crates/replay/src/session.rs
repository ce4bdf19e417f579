//! Interactive session lifecycle.
//!
//! A [`Session`] is the scoped acquisition of raw terminal mode plus the
//! reference that was checked out when it began. Its [`Restorer`] puts both
//! back exactly once, whichever of the exit paths gets there first: normal
//! quit, an error unwinding out of the loop, the interrupt handler thread,
//! or the session being dropped.

use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, info, warn};

use crate::display::Display;
use crate::error::{Error, RestoreError, Result};
use crate::input::{Key, read_key};
use crate::navigator::Navigator;
use crate::picker::pick_start;
use crate::range::resolve;
use crate::terminal::Terminal;
use crate::validate::{ReplayOptions, validate};
use crate::vcs::{Commit, Vcs};

// ── Restoration ──────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct RestoreState {
    original_ref: Option<String>,
    restored: bool,
}

/// Single-shot restoration of the original reference and terminal mode.
///
/// The state lock is held for the whole restoration, so a concurrent caller
/// waits for the first one to finish and then returns without doing
/// anything.
pub struct Restorer {
    vcs: Arc<dyn Vcs>,
    terminal: Arc<dyn Terminal>,
    state: Mutex<RestoreState>,
}

impl Restorer {
    fn new(vcs: Arc<dyn Vcs>, terminal: Arc<dyn Terminal>) -> Self {
        Restorer {
            vcs,
            terminal,
            state: Mutex::new(RestoreState::default()),
        }
    }

    fn set_original_ref(&self, reference: String) {
        self.lock().original_ref = Some(reference);
    }

    pub fn original_ref(&self) -> Option<String> {
        self.lock().original_ref.clone()
    }

    pub fn is_restored(&self) -> bool {
        self.lock().restored
    }

    /// Check out the original reference and restore the terminal mode.
    ///
    /// Returns `Ok(true)` when this call performed the restoration and
    /// `Ok(false)` when an earlier call already did. Each step is attempted
    /// once; failures are collected rather than retried.
    pub fn restore(&self) -> std::result::Result<bool, RestoreError> {
        let mut state = self.lock();
        if state.restored {
            return Ok(false);
        }
        state.restored = true;

        let mut failure = RestoreError::default();
        if let Some(reference) = state.original_ref.as_deref() {
            info!(reference, "restoring original reference");
            if let Err(e) = self.vcs.checkout(reference) {
                failure.checkout = Some(e);
            }
        }
        if let Err(e) = self.terminal.restore_mode() {
            failure.terminal = Some(e);
        }

        if failure.is_empty() {
            Ok(true)
        } else {
            Err(failure)
        }
    }

    /// Check out `commit` unless restoration has already run.
    ///
    /// The checkout happens under the state lock, so it can never land after
    /// the original reference was put back. Returns `Ok(false)` when the
    /// checkout was skipped.
    pub fn checkout_unrestored(&self, commit: &Commit) -> Result<bool> {
        let state = self.lock();
        if state.restored {
            return Ok(false);
        }
        self.vcs.checkout(&commit.hash)?;
        debug!(commit = %commit.hash, "checked out");
        Ok(true)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RestoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Installs the asynchronous interrupt handler for a running session.
///
/// The handler owns a clone of the session's [`Restorer`] and is expected to
/// call [`Restorer::restore`] before terminating the process.
pub trait InterruptHook {
    fn install(&self, restorer: Arc<Restorer>) -> io::Result<()>;
}

impl<F> InterruptHook for F
where
    F: Fn(Arc<Restorer>) -> io::Result<()>,
{
    fn install(&self, restorer: Arc<Restorer>) -> io::Result<()> {
        self(restorer)
    }
}

// ── Session ──────────────────────────────────────────────────────────

/// Raw terminal mode plus the captured original reference.
///
/// Dropping a session restores both if nothing else has.
pub struct Session {
    restorer: Arc<Restorer>,
}

impl Session {
    /// Enter raw mode, then capture the current reference.
    ///
    /// If raw mode cannot be entered nothing has changed and the error is
    /// returned as [`Error::Terminal`]. If the reference cannot be read the
    /// terminal is restored before returning.
    pub fn begin(vcs: Arc<dyn Vcs>, terminal: Arc<dyn Terminal>) -> Result<Self> {
        terminal.enter_raw_mode().map_err(Error::Terminal)?;
        let session = Session {
            restorer: Arc::new(Restorer::new(vcs.clone(), terminal)),
        };
        let original = vcs.current_reference()?;
        debug!(reference = %original, "captured original reference");
        session.restorer.set_original_ref(original);
        Ok(session)
    }

    pub fn restorer(&self) -> Arc<Restorer> {
        Arc::clone(&self.restorer)
    }

    /// Run the restoration now; a no-op if it already ran.
    pub fn finish(self) -> std::result::Result<bool, RestoreError> {
        self.restorer.restore()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Err(e) = self.restorer.restore() {
            error!(error = %e, "restoration failed");
        }
    }
}

// ── Controller ───────────────────────────────────────────────────────

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user quit the replay loop; `last` was checked out at the time.
    Quit {
        last: Commit,
        position: (usize, usize),
    },
    /// The user left the picker without choosing a commit.
    Cancelled,
}

/// Drives a replay session against a version-control backend and terminal.
pub struct Controller {
    vcs: Arc<dyn Vcs>,
    terminal: Arc<dyn Terminal>,
    hook: Box<dyn InterruptHook>,
}

impl Controller {
    pub fn new(
        vcs: Arc<dyn Vcs>,
        terminal: Arc<dyn Terminal>,
        hook: impl InterruptHook + 'static,
    ) -> Self {
        Controller {
            vcs,
            terminal,
            hook: Box::new(hook),
        }
    }

    /// Validate, then run the session to completion.
    ///
    /// With an explicit start the range is resolved before the terminal is
    /// touched; without one the picker chooses the start. On every path
    /// that got past [`Session::begin`] the original reference and terminal
    /// mode are restored before this returns.
    pub fn run<R, W>(&self, opts: &ReplayOptions, input: &mut R, output: W) -> Result<Outcome>
    where
        R: Read + ?Sized,
        W: Write,
    {
        validate(self.vcs.as_ref(), opts)?;
        let navigator = match opts.start.as_deref() {
            Some(start) => Some(Navigator::new(resolve(
                self.vcs.as_ref(),
                start,
                opts.end_ref(),
            )?)?),
            None => None,
        };

        let session = Session::begin(Arc::clone(&self.vcs), Arc::clone(&self.terminal))?;
        let mut display = Display::new(output);
        let result = self.drive(&session, opts, navigator, input, &mut display);

        match result {
            Ok(outcome) => {
                session.finish()?;
                Ok(outcome)
            }
            Err(e) => {
                if let Err(restore) = session.finish() {
                    error!(error = %restore, "restoration failed after session error");
                }
                Err(e)
            }
        }
    }

    fn drive<R, W>(
        &self,
        session: &Session,
        opts: &ReplayOptions,
        navigator: Option<Navigator>,
        input: &mut R,
        display: &mut Display<W>,
    ) -> Result<Outcome>
    where
        R: Read + ?Sized,
        W: Write,
    {
        self.hook.install(session.restorer())?;

        let mut navigator = match navigator {
            Some(nav) => nav,
            None => {
                let candidates = self.vcs.recent_revisions(opts.candidate_limit)?;
                let picked =
                    pick_start(candidates, input, display.writer(), opts.page_size)?;
                let Some(start) = picked else {
                    info!("no start commit selected");
                    return Ok(Outcome::Cancelled);
                };
                Navigator::new(resolve(self.vcs.as_ref(), &start.hash, opts.end_ref())?)?
            }
        };

        self.replay(session.restorer.as_ref(), &mut navigator, input, display)
    }

    fn replay<R, W>(
        &self,
        restorer: &Restorer,
        nav: &mut Navigator,
        input: &mut R,
        display: &mut Display<W>,
    ) -> Result<Outcome>
    where
        R: Read + ?Sized,
        W: Write,
    {
        if !restorer.checkout_unrestored(nav.current())? {
            info!("session restored before replay started");
            return Ok(Outcome::Cancelled);
        }
        display.banner()?;
        display.commit(nav.current(), nav.position())?;

        loop {
            let last = nav.current().clone();
            let position = nav.position();
            let step = match read_key(input)? {
                Key::Char(b'n') => nav.next(),
                Key::Char(b'p') => nav.prev(),
                Key::Char(b'q') | Key::Interrupt => {
                    display.restoring()?;
                    return Ok(Outcome::Quit { last, position });
                }
                _ => continue,
            };
            if let Err(boundary) = step {
                warn!(%boundary, "navigation refused");
                display.error(&boundary.to_string())?;
                continue;
            }
            if !restorer.checkout_unrestored(nav.current())? {
                info!("session restored during replay, stopping");
                return Ok(Outcome::Quit { last, position });
            }
            display.commit(nav.current(), nav.position())?;
        }
    }
}
