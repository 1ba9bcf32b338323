mod app;
mod domain;
mod repo;
mod supervisor;
mod ui;
mod usecase;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use time::OffsetDateTime;

use app::App;
use repo::json::{JsonConfigStore, JsonSnapshotReader, default_data_dir};
use supervisor::launchd::{LaunchdSupervisor, PROCESS_NAME};
use usecase::watchlist::MatchMode;

#[derive(Parser, Debug)]
#[command(
    name = "prw",
    version,
    about = "prw — inspect and curate the PR watcher's data",
    long_about = None
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Directory holding config.json and prs.json (default: ~/.pr-watch)
    #[arg(long, global = true, env = "PRW_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// launchd agent plist of the background fetcher
    #[arg(long, global = true, env = "PRW_AGENT_PLIST", hide = true)]
    agent_plist: Option<PathBuf>,

    /// More diagnostics on stderr (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize open PRs from the last fetch (default)
    List,
    /// Print the raw PR data as JSON
    Json,
    /// Watch an extra PR by URL
    Add { url: String },
    /// Stop watching a PR by URL or number
    Remove {
        target: String,
        /// Match only the trailing PR number instead of any substring
        #[arg(long)]
        number: bool,
    },
    /// List watched PR URLs
    Watching,
    /// Restart the background fetcher so it refreshes now
    Refresh,
    /// Show fetcher, config and data status
    Status,
    /// Hide a PR from the fetcher's output
    Dismiss { target: String },
    /// Open a PR in the browser
    Open { target: String },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let supervisor = match args.agent_plist {
        Some(plist) => LaunchdSupervisor::new(plist, PROCESS_NAME),
        None => LaunchdSupervisor::open_default()?,
    };
    log::debug!("using data dir {}", data_dir.display());

    let mut app = App::new(
        JsonConfigStore::in_dir(&data_dir),
        JsonSnapshotReader::in_dir(&data_dir),
        supervisor,
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.command.unwrap_or(Command::List) {
        Command::List => app.show_summary(&mut out)?,
        Command::Json => app.dump_raw(&mut out)?,
        Command::Add { url } => app.add_watch(&url, &mut out)?,
        Command::Remove { target, number } => {
            let mode = if number {
                MatchMode::Number
            } else {
                MatchMode::Loose
            };
            app.remove_watch(&target, mode, &mut out)?
        }
        Command::Watching => app.list_watch_urls(&mut out)?,
        Command::Refresh => app.trigger_refresh(&mut out)?,
        Command::Status => app.show_status(OffsetDateTime::now_utc(), &mut out)?,
        Command::Dismiss { target } => app.dismiss(&target, &mut out)?,
        Command::Open { target } => app.open_pr(&target, &mut out, |url| open::that(url))?,
    }
    out.flush()?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
