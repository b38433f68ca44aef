pub mod app;
pub mod update;

use app::App;
use clap::{Args as ClapArgs, Parser, Subcommand};
use color_eyre::Result;
use mine_session::difficulty::Difficulty;
use mine_session::leaderboard::{JsonFileLeaderboard, Leaderboard, DEFAULT_TOP_LIMIT, TIMESTAMP_FORMAT};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::Level;

const DEFAULT_LEADERBOARD_FILE: &str = "leaderboard.json";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
    /// The file the leaderboard is kept in.
    #[arg(short, long, global = true, default_value = DEFAULT_LEADERBOARD_FILE)]
    leaderboard_file: PathBuf,
    /// More output per occurrence (warnings only by default).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game (the default).
    Play(PlayArgs),
    /// List the fastest won games.
    Leaderboard {
        #[arg(short, long, default_value_t = DEFAULT_TOP_LIMIT)]
        top: usize,
    },
}

#[derive(ClapArgs, Debug, Default)]
pub struct PlayArgs {
    /// The player's name. Asked for when omitted.
    #[arg(short, long)]
    pub player: Option<String>,
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    pub difficulty: Difficulty,
    /// Overrides the preset's amount of rows.
    #[arg(short = 'H', long)]
    pub rows: Option<u8>,
    /// Overrides the preset's amount of columns.
    #[arg(short = 'W', long)]
    pub columns: Option<u8>,
    /// Overrides the preset's amount of mines.
    #[arg(short, long)]
    pub mines: Option<u16>,
    /// Overrides the label the result is stored under.
    #[arg(long)]
    pub label: Option<String>,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn print_leaderboard(leaderboard: &dyn Leaderboard, top: usize) -> Result<()> {
    let records = leaderboard.top(Some(top))?;
    let mut stdout = io::stdout().lock();

    if records.is_empty() {
        writeln!(stdout, "No records yet. Be the first to play!")?;
        return Ok(());
    }

    writeln!(
        stdout,
        "{:<6}{:<20}{:>10}  {:<12}{}",
        "RANK", "PLAYER", "TIME", "DIFFICULTY", "DATE"
    )?;

    for (rank, record) in records.iter().enumerate() {
        writeln!(
            stdout,
            "{:<6}{:<20}{:>9.2}s  {:<12}{}",
            format!("#{}", rank + 1),
            record.player_name,
            record.elapsed_secs,
            record.difficulty,
            record.timestamp.format(TIMESTAMP_FORMAT)
        )?;
    }

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.verbose);

    let mut leaderboard = JsonFileLeaderboard::new(args.leaderboard_file);
    tracing::debug!(path = %leaderboard.path().display(), "using the leaderboard file");

    match args
        .command
        .unwrap_or_else(|| Command::Play(PlayArgs::default()))
    {
        Command::Play(play_args) => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout().lock();

            let Some(mut app) = App::new(play_args, &mut leaderboard, &mut input, &mut output)? else {
                return Ok(());
            };

            app.run(&mut input, &mut output)?;
        }
        Command::Leaderboard { top } => print_leaderboard(&leaderboard, top)?,
    }

    Ok(())
}
