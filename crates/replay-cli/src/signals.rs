//! Process-signal handling for a running session.
//!
//! Raw mode turns Ctrl+C into an ordinary input byte, so the signals that
//! still reach the process come from outside (`kill`, a closing terminal).
//! They are awaited on a dedicated thread with its own current-thread tokio
//! runtime; on the first one the session is restored and the process exits.

use std::io;
use std::sync::Arc;

use replay::{InterruptHook, Restorer};
use tokio::runtime::Runtime;
use tracing::{error, info};

pub struct SignalHook;

impl InterruptHook for SignalHook {
    fn install(&self, restorer: Arc<Restorer>) -> io::Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()?;
        let signals = Signals::register(&runtime)?;

        std::thread::Builder::new()
            .name("replay-signals".into())
            .spawn(move || {
                let name = runtime.block_on(signals.recv());
                info!(signal = name, "received signal, restoring");
                std::process::exit(on_signal(&restorer));
            })?;
        Ok(())
    }
}

/// Run the restoration and pick the exit status.
fn on_signal(restorer: &Restorer) -> i32 {
    match restorer.restore() {
        Ok(performed) => {
            if performed {
                println!("\r\nRestoring original state...");
            }
            0
        }
        Err(e) => {
            error!(error = %e, "restoration failed after signal");
            eprintln!("Error: {}", e);
            1
        }
    }
}

#[cfg(unix)]
struct Signals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
    hangup: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Signals {
    /// Register the handlers up front so a failure surfaces before the
    /// session relies on them.
    fn register(runtime: &Runtime) -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        let _guard = runtime.enter();
        Ok(Signals {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            hangup: signal(SignalKind::hangup())?,
        })
    }

    async fn recv(mut self) -> &'static str {
        tokio::select! {
            _ = self.interrupt.recv() => "SIGINT",
            _ = self.terminate.recv() => "SIGTERM",
            _ = self.hangup.recv() => "SIGHUP",
        }
    }
}

#[cfg(not(unix))]
struct Signals;

#[cfg(not(unix))]
impl Signals {
    fn register(_runtime: &Runtime) -> io::Result<Self> {
        Ok(Signals)
    }

    async fn recv(self) -> &'static str {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "ctrl-c",
            Err(_) => std::future::pending().await,
        }
    }
}
