#![doc = include_str!("../README.md")]

mod display;
mod error;
mod input;
mod navigator;
mod picker;
mod range;
mod session;
mod terminal;
mod validate;
mod vcs;

#[cfg(test)]
mod fake;

pub use display::Display;
pub use error::{Error, ErrorKind, RestoreError, Result};
pub use input::{Key, read_key};
pub use navigator::{Boundary, Navigator};
pub use picker::{DEFAULT_PAGE_SIZE, Picker, pick_start};
pub use range::resolve;
pub use session::{Controller, InterruptHook, Outcome, Restorer, Session};
pub use terminal::{CrosstermTerminal, Terminal};
pub use validate::{DEFAULT_CANDIDATE_LIMIT, ReplayOptions, validate};
pub use vcs::{Commit, Vcs, VcsError};
