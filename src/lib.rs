pub mod difficulty;
pub mod field;
pub mod leaderboard;
mod stopwatch;

use field::{cell::MarkState, Field, FieldError, MarkOutcome, RevealOutcome};
use leaderboard::GameRecord;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use stopwatch::Stopwatch;
use thiserror::Error;

/// The enum represents the variants of everything that can possibly go wrong during the game.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    /// This is used when something's wrong with the field. The [`From`] trait is implemented for the `GameError` to
    /// en-wrap with it [`FieldError`]s.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// The error indicates that the game has already ended, and therefore the requested action could not be performed.
    #[error("the game has already ended")]
    GameAlreadyEnded,
}

/// The status of a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameStatus {
    /// Before the first cell has been revealed.
    NotStarted,
    /// An ongoing game.
    InProgress,
    /// Every mine-free cell has been revealed.
    Won,
    /// A mine has been revealed.
    Lost,
}

impl GameStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// What the player is allowed to see of a single cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CellView {
    Hidden,
    Flagged,
    Questioned,
    /// A revealed mine-free cell with the amount of mines around it.
    Revealed(u8),
    /// A mine disclosed after the game has ended.
    Mine,
    /// The mine that has ended the game.
    Detonated,
}

impl Display for CellView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CellView::Hidden => write!(f, "#"),
            CellView::Flagged => write!(f, "F"),
            CellView::Questioned => write!(f, "?"),
            CellView::Revealed(0) => write!(f, "."),
            CellView::Revealed(n) => write!(f, "{}", n),
            CellView::Mine => write!(f, "*"),
            CellView::Detonated => write!(f, "X"),
        }
    }
}

/// The struct representing a single play-through.
///
/// A session is never reused: once it's won or lost, it accepts no more moves, and a new game needs a new session.
#[derive(Debug)]
pub struct GameSession {
    /// The field used in the game.
    field: Field,
    /// The game status.
    status: GameStatus,
    /// The in-game stopwatch. It's started as soon as the first cell gets revealed and is stopped when the game ends.
    stopwatch: Stopwatch,
    /// The caller's name for the game's settings, carried into the leaderboard as is.
    difficulty: String,
}

impl GameSession {
    /// Creates a new game on a freshly built field with randomly placed mines.
    pub fn new(
        rows_amount: u8,
        columns_amount: u8,
        mines_amount: u16,
        difficulty: impl Into<String>,
    ) -> Result<Self, GameError> {
        let field = Field::new(rows_amount, columns_amount, mines_amount)?;
        Ok(GameSession::from_field(field, difficulty))
    }

    /// Creates a new game on the given field. The field is expected to be untouched.
    pub fn from_field(field: Field, difficulty: impl Into<String>) -> Self {
        GameSession {
            field,
            status: GameStatus::NotStarted,
            stopwatch: Stopwatch::default(),
            difficulty: difficulty.into(),
        }
    }

    /// Reveals a cell and updates the status of the game.
    ///
    /// The first reveal that changes anything starts the stopwatch. Revealing a mine loses the game, revealing the last
    /// mine-free cell wins it.
    ///
    /// Fails with [`GameError::GameAlreadyEnded`] once the game is over, or with a [`FieldError`] for a position
    /// outside the field.
    pub fn reveal_cell(&mut self, position: (u8, u8)) -> Result<RevealOutcome, GameError> {
        self.check_not_finished()?;

        let outcome = self.field.reveal_cell(position)?;

        if outcome.is_settling() && self.status == GameStatus::NotStarted {
            self.status = GameStatus::InProgress;
            self.stopwatch.start();
        }

        match outcome {
            RevealOutcome::MineHit => self.end(false),
            RevealOutcome::Revealed if self.check_win() => self.end(true),
            _ => (),
        }

        Ok(outcome)
    }

    /// Cycles the mark of a hidden cell. Marking doesn't start the game.
    ///
    /// Fails with [`GameError::GameAlreadyEnded`] once the game is over, or with a [`FieldError`] for a position
    /// outside the field.
    pub fn cycle_mark(&mut self, position: (u8, u8)) -> Result<MarkOutcome, GameError> {
        self.check_not_finished()?;
        Ok(self.field.cycle_mark(position)?)
    }

    fn check_not_finished(&self) -> Result<(), GameError> {
        if self.status.is_finished() {
            Err(GameError::GameAlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn end(&mut self, victory: bool) {
        self.stopwatch.stop();
        self.status = if victory {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };

        tracing::info!(
            status = ?self.status,
            difficulty = %self.difficulty,
            elapsed = ?self.elapsed_time(),
            "the game has ended"
        );
    }

    /// Checks whether every mine-free cell has been revealed. The mines don't need to be flagged.
    pub fn check_win(&self) -> bool {
        self.field.check_all_non_mines_revealed()
    }

    /// Returns the time since the first reveal, or zero if there hasn't been one yet. Stops growing once the game has
    /// ended.
    pub fn elapsed_time(&self) -> Duration {
        self.stopwatch.get_elapsed_time()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    /// The amount of mines minus the amount of flags. Goes negative when there are more flags than mines.
    pub fn remaining_mines(&self) -> i32 {
        self.field.get_mines_amount() as i32 - self.field.marked_amount(MarkState::Flagged) as i32
    }

    /// Returns what the player may see of a cell. Once the game has ended, every hidden mine is disclosed whatever its
    /// mark.
    pub fn cell_view(&self, position: (u8, u8)) -> Result<CellView, GameError> {
        let cell = self.field.cell_at(position)?;

        Ok(match (cell.is_revealed(), cell.get_mines_around_amount()) {
            (true, Some(mines_around_amount)) => CellView::Revealed(mines_around_amount),
            (true, None) => CellView::Detonated,
            (false, None) if self.status.is_finished() => CellView::Mine,
            (false, _) => match cell.mark_state() {
                MarkState::Unmarked => CellView::Hidden,
                MarkState::Flagged => CellView::Flagged,
                MarkState::Questioned => CellView::Questioned,
            },
        })
    }

    /// Produces the record of a won game for the leaderboard, or `None` if the game hasn't been won.
    pub fn finished_record(&self, player_name: &str) -> Option<GameRecord> {
        (self.status == GameStatus::Won)
            .then(|| GameRecord::new(player_name, self.elapsed_time(), true, self.difficulty.as_str()))
    }
}

/// The `Display` implementation draws the field the way the player is allowed to see it.
impl Display for GameSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let grid = self.field.grid();

        write!(f, "   ")?;
        for column_index in 0..grid.columns_amount() {
            write!(f, "{:^3}", column_index)?;
        }
        writeln!(f)?;

        for row_index in 0..grid.rows_amount() {
            write!(f, "{:^3}", row_index)?;

            for column_index in 0..grid.columns_amount() {
                let view = self
                    .cell_view((row_index, column_index))
                    .map_err(|_| std::fmt::Error)?;
                write!(f, "{:^3}", view.to_string())?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{CellView, GameError, GameSession, GameStatus};
    use crate::field::{cell::MarkState, Field, FieldError, MarkOutcome, RevealOutcome};
    use std::time::Duration;

    /// ```text
    /// 1 1 1
    /// 1 * 1
    /// 1 1 1
    /// ```
    fn centered_mine_session() -> GameSession {
        GameSession::from_field(Field::with_mines(3, 3, &[(1, 1)]).unwrap(), "Custom")
    }

    #[test]
    fn create_session_fails_on_bad_parameters() {
        assert_eq!(
            GameSession::new(0, 10, 5, "Easy").unwrap_err(),
            GameError::Field(FieldError::InvalidDimensions)
        );
        assert_eq!(
            GameSession::new(2, 2, 4, "Easy").unwrap_err(),
            GameError::Field(FieldError::InvalidMineCount { max: 3 })
        );
    }

    #[test]
    fn a_single_cell_without_mines_is_won_with_one_reveal() {
        let mut session = GameSession::new(1, 1, 0, "Trivial").unwrap();
        assert_eq!(session.status(), GameStatus::NotStarted);

        assert_eq!(session.reveal_cell((0, 0)), Ok(RevealOutcome::Revealed));
        assert_eq!(session.status(), GameStatus::Won);
        assert!(session.check_win());
    }

    #[test]
    fn revealing_every_safe_cell_one_by_one_wins_the_game() {
        let mut session = centered_mine_session();

        assert_eq!(session.reveal_cell((0, 0)), Ok(RevealOutcome::Revealed));
        assert_eq!(session.field().revealed_amount(), 1);
        assert!(!session.check_win());
        assert_eq!(session.status(), GameStatus::InProgress);

        let safe_positions = [(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)];
        for (i, &position) in safe_positions.iter().enumerate() {
            assert_eq!(session.reveal_cell(position), Ok(RevealOutcome::Revealed));
            assert_eq!(session.check_win(), i == safe_positions.len() - 1);
        }

        assert_eq!(session.status(), GameStatus::Won);
    }

    #[test]
    fn the_win_check_matches_the_revealed_cells_amount() {
        let mut session = GameSession::new(6, 6, 7, "Custom").unwrap();
        let safe_cells_amount = session.field().safe_cells_amount();

        for position in session.field().grid().positions().collect::<Vec<_>>() {
            let cell = session.field().cell_at(position).unwrap();
            if cell.is_mined() || cell.is_revealed() {
                continue;
            }

            session.reveal_cell(position).unwrap();
            assert_eq!(
                session.check_win(),
                session.field().revealed_amount() == safe_cells_amount
            );
        }

        assert_eq!(session.status(), GameStatus::Won);
    }

    #[test]
    fn a_mine_free_field_is_won_by_revealing_a_corner() {
        let mut session = GameSession::new(5, 5, 0, "Empty").unwrap();

        assert_eq!(session.reveal_cell((0, 4)), Ok(RevealOutcome::Revealed));
        assert_eq!(session.field().revealed_amount(), 25);
        assert_eq!(session.status(), GameStatus::Won);
    }

    #[test]
    fn revealing_a_mine_loses_the_game() {
        let mut session = centered_mine_session();

        assert_eq!(session.reveal_cell((1, 1)), Ok(RevealOutcome::MineHit));
        assert_eq!(session.status(), GameStatus::Lost);
        assert_eq!(session.field().revealed_amount(), 0);
        assert!(session.finished_record("player").is_none());
    }

    #[test]
    fn no_moves_are_accepted_after_the_game_has_ended() {
        let mut session = centered_mine_session();
        session.reveal_cell((1, 1)).unwrap();

        assert_eq!(session.reveal_cell((0, 0)), Err(GameError::GameAlreadyEnded));
        assert_eq!(session.cycle_mark((0, 0)), Err(GameError::GameAlreadyEnded));
        assert!(!session.field().cell_at((0, 0)).unwrap().is_revealed());
    }

    #[test]
    fn a_flagged_cell_cannot_be_revealed() {
        let mut session = centered_mine_session();

        assert_eq!(
            session.cycle_mark((0, 0)),
            Ok(MarkOutcome::Applied(MarkState::Flagged))
        );
        assert_eq!(session.reveal_cell((0, 0)), Ok(RevealOutcome::AlreadySettled));
        assert!(!session.field().cell_at((0, 0)).unwrap().is_revealed());

        // Nothing has settled, so the game hasn't started.
        assert_eq!(session.status(), GameStatus::NotStarted);
        assert_eq!(session.elapsed_time(), Duration::ZERO);
    }

    #[test]
    fn out_of_bounds_moves_are_reported() {
        let mut session = centered_mine_session();

        assert_eq!(
            session.reveal_cell((3, 3)),
            Err(GameError::Field(FieldError::OutOfBounds((3, 3))))
        );
        assert_eq!(
            session.cycle_mark((0, 9)),
            Err(GameError::Field(FieldError::OutOfBounds((0, 9))))
        );
        assert_eq!(session.status(), GameStatus::NotStarted);
    }

    #[test]
    fn the_stopwatch_starts_with_the_first_settling_reveal() {
        let mut session = centered_mine_session();

        session.cycle_mark((2, 2)).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(session.elapsed_time(), Duration::ZERO);

        session.reveal_cell((0, 0)).unwrap();
        let first = session.elapsed_time();
        std::thread::sleep(Duration::from_millis(5));
        let second = session.elapsed_time();

        assert!(second > first);
    }

    #[test]
    fn the_elapsed_time_is_frozen_once_the_game_has_ended() {
        let mut session = centered_mine_session();
        session.reveal_cell((0, 0)).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        session.reveal_cell((1, 1)).unwrap();

        let frozen = session.elapsed_time();
        assert!(frozen >= Duration::from_millis(5));

        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(session.elapsed_time(), frozen);
    }

    #[test]
    fn a_won_session_produces_a_record() {
        let mut session = GameSession::new(1, 1, 0, "Easy").unwrap();
        assert!(session.finished_record("player").is_none());

        session.reveal_cell((0, 0)).unwrap();

        let record = session.finished_record("player").unwrap();
        assert_eq!(record.player_name, "player");
        assert_eq!(record.difficulty, "Easy");
        assert!(record.won);
        assert!(record.elapsed_secs >= 0.0);
    }

    #[test]
    fn remaining_mines_count_the_flags_only() {
        let mut session = centered_mine_session();

        session.cycle_mark((0, 0)).unwrap();
        session.cycle_mark((0, 1)).unwrap();
        session.cycle_mark((0, 2)).unwrap();
        session.cycle_mark((0, 2)).unwrap();

        assert_eq!(session.remaining_mines(), -1);
    }

    #[test]
    fn mines_are_disclosed_only_after_the_game_has_ended() {
        let mut session =
            GameSession::from_field(Field::with_mines(2, 2, &[(0, 0), (1, 1)]).unwrap(), "Custom");
        session.cycle_mark((1, 1)).unwrap();

        assert_eq!(session.cell_view((0, 0)), Ok(CellView::Hidden));
        assert_eq!(session.cell_view((1, 1)), Ok(CellView::Flagged));

        session.reveal_cell((0, 1)).unwrap();
        assert_eq!(session.cell_view((0, 1)), Ok(CellView::Revealed(2)));
        assert_eq!(session.to_string(), "    0  1 \n 0  #  2 \n 1  #  F \n");

        session.reveal_cell((0, 0)).unwrap();
        assert_eq!(session.cell_view((0, 0)), Ok(CellView::Detonated));
        assert_eq!(session.cell_view((1, 0)), Ok(CellView::Hidden));
        assert_eq!(session.cell_view((1, 1)), Ok(CellView::Mine));
        assert_eq!(session.to_string(), "    0  1 \n 0  X  2 \n 1  #  * \n");
    }

    #[test]
    fn questioned_and_flagged_mines_are_disclosed_after_a_loss() {
        let mut session =
            GameSession::from_field(Field::with_mines(1, 4, &[(0, 0), (0, 2), (0, 3)]).unwrap(), "Custom");
        session.cycle_mark((0, 2)).unwrap();
        session.cycle_mark((0, 2)).unwrap();
        session.cycle_mark((0, 3)).unwrap();
        session.cycle_mark((0, 1)).unwrap();
        assert_eq!(session.cell_view((0, 2)), Ok(CellView::Questioned));

        session.reveal_cell((0, 0)).unwrap();
        assert_eq!(session.status(), GameStatus::Lost);

        assert_eq!(session.cell_view((0, 2)), Ok(CellView::Mine));
        assert_eq!(session.cell_view((0, 3)), Ok(CellView::Mine));
        // A wrongly flagged safe cell keeps its flag.
        assert_eq!(session.cell_view((0, 1)), Ok(CellView::Flagged));
    }

    #[test]
    fn unflagged_mines_are_disclosed_after_the_game_has_ended() {
        let mut session = centered_mine_session();
        session.reveal_cell((0, 0)).unwrap();
        for position in [(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)] {
            session.reveal_cell(position).unwrap();
        }

        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.cell_view((1, 1)), Ok(CellView::Mine));
    }
}
