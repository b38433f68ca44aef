//! The terminal application

use crate::update::{parse_command, PlayerCommand};
use crate::PlayArgs;
use mine_session::field::{MarkOutcome, RevealOutcome};
use mine_session::leaderboard::{submit_victory, Leaderboard};
use mine_session::{GameSession, GameStatus};
use std::io::{self, BufRead, Write};

const LEGEND_TEXT: [&str; 3] = [
    "[r <row>,<column>]: reveal the cell",
    "[m <row>,<column>]: flag / question / unmark the cell",
    "[q]: leave",
];

/// The terminal application
pub struct App<'a> {
    /// The game instance.
    pub session: GameSession,
    pub player_name: String,
    /// The won game's result goes here.
    leaderboard: &'a mut dyn Leaderboard,
    /// Indicates that the main application loop should be broken on the next iteration.
    pub should_quit: bool,
}

impl<'a> App<'a> {
    /// Sets up a new game from the command-line arguments, asking for the player's name if it hasn't been given.
    ///
    /// Returns `None` if the input ends before a name is entered.
    pub fn new(
        args: PlayArgs,
        leaderboard: &'a mut dyn Leaderboard,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> color_eyre::Result<Option<Self>> {
        let player_name = match args.player.as_deref().map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None => match prompt_player_name(input, output)? {
                Some(name) => name,
                None => return Ok(None),
            },
        };

        let (rows_amount, columns_amount) = args.difficulty.size();
        let session = GameSession::new(
            args.rows.unwrap_or(rows_amount),
            args.columns.unwrap_or(columns_amount),
            args.mines.unwrap_or(args.difficulty.mines_amount()),
            args.label.unwrap_or_else(|| args.difficulty.label().to_string()),
        )?;

        Ok(Some(App::with_session(session, player_name, leaderboard)))
    }

    pub fn with_session(session: GameSession, player_name: String, leaderboard: &'a mut dyn Leaderboard) -> Self {
        App {
            session,
            player_name,
            leaderboard,
            should_quit: false,
        }
    }

    /// The main loop: draws the field, reads a command, performs it, until the game ends or the player leaves.
    pub fn run(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<()> {
        writeln!(
            output,
            "Player: {} | Difficulty: {}",
            self.player_name,
            self.session.difficulty()
        )?;
        for line in LEGEND_TEXT {
            writeln!(output, "{}", line)?;
        }

        while !self.should_quit {
            self.print_field(output)?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            let Some(command) = parse_command(&line) else {
                writeln!(output, "Incorrect input! Please, try again.")?;
                continue;
            };

            self.perform(command, output)?;
        }

        Ok(())
    }

    fn perform(&mut self, command: PlayerCommand, output: &mut impl Write) -> io::Result<()> {
        match command {
            PlayerCommand::Quit => self.should_quit = true,
            PlayerCommand::Reveal(position) => match self.session.reveal_cell(position) {
                Ok(RevealOutcome::AlreadySettled) => {
                    writeln!(output, "The cell is either revealed or marked already.")?
                }
                Ok(_) => self.finish_if_ended(output)?,
                Err(error) => writeln!(output, "Can't reveal the cell: {}", error)?,
            },
            PlayerCommand::CycleMark(position) => match self.session.cycle_mark(position) {
                Ok(MarkOutcome::Applied(_)) => {}
                Ok(MarkOutcome::Rejected) => writeln!(output, "A revealed cell can't be marked.")?,
                Err(error) => writeln!(output, "Can't mark the cell: {}", error)?,
            },
        };

        Ok(())
    }

    fn finish_if_ended(&mut self, output: &mut impl Write) -> io::Result<()> {
        let elapsed_secs = self.session.elapsed_time().as_secs_f64();

        match self.session.status() {
            GameStatus::Won => {
                writeln!(output, "{}", self.session)?;
                writeln!(output, "You won! Congratulations! Time: {:.2}s", elapsed_secs)?;

                if !submit_victory(&mut *self.leaderboard, &self.session, &self.player_name) {
                    writeln!(output, "The result couldn't be saved to the leaderboard.")?;
                }
            }
            GameStatus::Lost => {
                writeln!(output, "{}", self.session)?;
                writeln!(output, "You hit a mine! Time: {:.2}s", elapsed_secs)?;
            }
            GameStatus::NotStarted | GameStatus::InProgress => return Ok(()),
        }

        self.should_quit = true;
        Ok(())
    }

    fn print_field(&self, output: &mut impl Write) -> io::Result<()> {
        writeln!(output, "{}", self.session)?;
        writeln!(
            output,
            "Time: {:.2}s | Mines left: {}",
            self.session.elapsed_time().as_secs_f64(),
            self.session.remaining_mines()
        )
    }
}

/// Asks for the player's name until a non-blank one is entered. Returns `None` if the input ends first.
fn prompt_player_name(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<Option<String>> {
    loop {
        write!(output, "Enter your name: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let name = line.trim();
        if !name.is_empty() {
            return Ok(Some(name.to_string()));
        }

        writeln!(output, "Please enter your name!")?;
    }
}
