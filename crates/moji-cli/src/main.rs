mod file_store;
mod render;
mod theme;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use file_store::FileStore;
use moji_core::{MojiConfig, PlayMode, RevealTimeline, Session, StatsEngine, SystemClock};
use std::io;
use std::path::PathBuf;
use theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "moji", version, about = "A daily emoji puzzle that solves itself")]
struct Cli {
    /// Allow unlimited practice plays; they are not recorded
    #[arg(long, global = true)]
    unlimited: bool,

    /// Directory holding the statistics file
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Skip the reveal animation
    #[arg(long, global = true)]
    instant: bool,

    /// Use the light color theme
    #[arg(long, global = true)]
    light: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Play today's puzzle, or show today's result again
    Play,
    /// Print today's share text
    Share,
    /// Show statistics and the score distribution
    Stats {
        /// Print the statistics panel as JSON
        #[arg(long)]
        json: bool,
    },
    /// Time until the next puzzle
    Next,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut config = MojiConfig::from_env();
    if cli.unlimited {
        config = config.with_unlimited_plays(true);
    }

    let store = match &cli.data_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::default(),
    };
    log::debug!("statistics stored under {}", store.dir().display());

    let theme = if cli.light { Theme::light() } else { Theme::dark() };
    let mut session = Session::new(StatsEngine::new(store, SystemClock, config));

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(&mut session, &theme, cli.instant),
        Command::Share => share(&mut session),
        Command::Stats { json } => stats(&session, &theme, json),
        Command::Next => {
            println!(
                "Moji #{} is live. Next puzzle in {}",
                session.puzzle_number(),
                session.next_puzzle_countdown()
            );
            Ok(())
        }
    }
}

fn play(session: &mut Session<FileStore, SystemClock>, theme: &Theme, instant: bool) -> Result<()> {
    let countdown = session.next_puzzle_countdown();
    let play = session
        .play_now()
        .context("could not record today's result")?;

    let timeline = if instant {
        RevealTimeline::instant(play.grid.len())
    } else {
        play.timeline()
    };
    render::render_play(&mut io::stdout(), play, &timeline, theme, &countdown)?;

    if play.mode != PlayMode::Practice {
        println!("Run `moji share` to copy your result.");
    }
    Ok(())
}

fn share(session: &mut Session<FileStore, SystemClock>) -> Result<()> {
    if session.current().is_none() && session.resume().is_none() {
        bail!("no result recorded today; run `moji play` first");
    }
    if let Some(text) = session.share_text() {
        println!("{}", text);
    }
    Ok(())
}

fn stats(session: &Session<FileStore, SystemClock>, theme: &Theme, json: bool) -> Result<()> {
    for issue in session.engine().load().check_invariants() {
        log::warn!("statistics record: {}", issue);
    }

    let view = session.stats_view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        render::render_stats(&mut io::stdout(), &view, theme)?;
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["moji"]);
        assert_eq!(cli.command, None);
        assert!(!cli.unlimited);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["moji", "stats", "--json", "--data-dir", "/tmp/moji", "--light"]);
        assert_eq!(cli.command, Some(Command::Stats { json: true }));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/moji")));
        assert!(cli.light);
    }

    #[test]
    fn test_cli_asserts() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
