mod cmd_list;
mod cmd_replay;
mod logging;
mod signals;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "replay")]
#[command(about = "Step through a range of git history one commit at a time")]
#[command(
    after_help = "With no commits, pick a start commit from recent history.\n\
                  Keys: n next, p previous, q quit (j/k or arrows and Enter in the picker)."
)]
struct Cli {
    /// First commit of the range (omit to choose interactively)
    start: Option<String>,

    /// Last commit of the range
    #[arg(requires = "start")]
    end: Option<String>,

    /// Path to the git repository
    #[arg(short = 'C', long, default_value = ".")]
    repo: PathBuf,

    /// Rows shown at once in the picker
    #[arg(long, default_value_t = replay::DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Number of recent commits offered by the picker
    #[arg(long, default_value_t = replay::DEFAULT_CANDIDATE_LIMIT)]
    limit: usize,

    /// Print the resolved range and exit without checking anything out
    #[arg(long)]
    list: bool,

    /// Output the list as JSON (with --list)
    #[arg(long, requires = "list")]
    json: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Write debug logs to ~/.replay/logs
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn options(&self) -> replay::ReplayOptions {
        replay::ReplayOptions {
            start: self.start.clone(),
            end: self.end.clone(),
            page_size: self.page_size,
            candidate_limit: self.limit,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let log_guard = logging::init(&cli.log_level, cli.debug);

    let code = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    drop(log_guard);
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<()> {
    let repo = if cli.repo.is_absolute() {
        cli.repo.clone()
    } else {
        std::env::current_dir()?.join(&cli.repo)
    };
    let client = replay_git::GitClient::new(repo);
    let opts = cli.options();

    if cli.list {
        cmd_list::run(&client, &opts, cli.json)
    } else {
        cmd_replay::run(client, &opts)
    }
}
