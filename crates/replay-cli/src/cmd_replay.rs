use std::sync::Arc;

use anyhow::Result;
use replay::{Controller, CrosstermTerminal, Outcome, ReplayOptions};
use replay_git::GitClient;
use tracing::info;

use crate::signals::SignalHook;

pub fn run(client: GitClient, opts: &ReplayOptions) -> Result<()> {
    let controller = Controller::new(Arc::new(client), Arc::new(CrosstermTerminal), SignalHook);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let outcome = controller.run(opts, &mut input, std::io::stdout())?;

    match outcome {
        Outcome::Quit { last, position } => {
            info!(commit = %last.hash, current = position.0, total = position.1, "session ended");
        }
        Outcome::Cancelled => println!("No commit selected."),
    }
    Ok(())
}
