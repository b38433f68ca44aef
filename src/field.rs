pub mod cell;
pub mod grid;
mod mark;
mod reveal;

use cell::{Cell, MarkState};
use grid::Grid;
use rand::{prelude::SliceRandom, thread_rng, Rng};
use std::fmt::{Debug, Formatter};
use thiserror::Error;

pub use mark::MarkOutcome;
pub use reveal::RevealOutcome;

/// The enum represents all the variants of what can possibly go wrong when working with fields.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Used when the user tries to create a field with zero rows or zero columns.
    #[error("a field must have at least one row and one column")]
    InvalidDimensions,
    /// Used when the required number of mines is not less than the total number of cells (there should always be at
    /// least one cell without a mine).
    ///
    /// The value represents the maximum allowed number of mines for the field with the given dimensions.
    #[error("invalid amount of mines, at most {max} mines fit into this field")]
    InvalidMineCount { max: u16 },
    /// Used when a position is beyond the field's bounds. This is always a bug on the caller's side.
    ///
    /// The value represents the requested row and column indices respectively.
    #[error("the position {0:?} is out of the field's bounds")]
    OutOfBounds((u8, u8)),
    /// Used when an explicit mine layout lists the same position twice.
    #[error("the position {0:?} is listed as a mine more than once")]
    DuplicateMine((u8, u8)),
}

/// The field representation.
///
/// The field owns every cell of the grid. The mines and the numbers around them are placed once, when the field is
/// built, and never change afterwards. Only the reveal and mark states of the cells evolve, and only through
/// [`Field::reveal_cell`] and [`Field::cycle_mark`].
#[derive(PartialEq, Eq)]
pub struct Field {
    grid: Grid,
    /// The cells in row-major order, addressed by the grid's linear indices.
    cells: Vec<Cell>,
    /// The positions of all the mined cells in row-major order. Mirrors the cells' own variants.
    mine_positions: Vec<(u8, u8)>,
    /// The number of revealed cells that are not mined.
    revealed_amount: u16,
}

impl Field {
    /// Creates a new [`Field`] with the provided dimensions and a number of randomly placed mines.
    ///
    /// The method might fail with [`FieldError::InvalidDimensions`] in case any of the dimensions is zero or with
    /// [`FieldError::InvalidMineCount`] in case there would be no mine-free cell left.
    pub fn new(rows_amount: u8, columns_amount: u8, mines_amount: u16) -> Result<Self, FieldError> {
        Field::with_rng(rows_amount, columns_amount, mines_amount, &mut thread_rng())
    }

    /// Same as [`Field::new`], but draws the mines' positions from the provided random number generator.
    ///
    /// Every combination of `mines_amount` distinct cells is equally likely to be chosen.
    pub fn with_rng<R: Rng + ?Sized>(
        rows_amount: u8,
        columns_amount: u8,
        mines_amount: u16,
        rng: &mut R,
    ) -> Result<Self, FieldError> {
        let grid = Field::validate(rows_amount, columns_amount, mines_amount)?;

        // Shuffle the first `mines_amount` indices into place: they are a uniform sample without repetitions.
        let mut indices = (0..grid.cells_amount() as usize).collect::<Vec<usize>>();
        let (mine_indices, _) = indices.partial_shuffle(rng, mines_amount as usize);

        Ok(Field::build(grid, mine_indices))
    }

    /// Creates a field with mines at exactly the given positions.
    ///
    /// Apart from the dimensions' and the mines amount's checks of [`Field::new`], the method fails with
    /// [`FieldError::OutOfBounds`] if any of the positions is outside the field and with
    /// [`FieldError::DuplicateMine`] if any position is listed twice.
    pub fn with_mines(
        rows_amount: u8,
        columns_amount: u8,
        mine_positions: &[(u8, u8)],
    ) -> Result<Self, FieldError> {
        let mines_amount = u16::try_from(mine_positions.len()).unwrap_or(u16::MAX);
        let grid = Field::validate(rows_amount, columns_amount, mines_amount)?;

        let mut mine_indices = Vec::with_capacity(mine_positions.len());
        for &position in mine_positions {
            let index = grid
                .index_of(position)
                .ok_or(FieldError::OutOfBounds(position))?;

            if mine_indices.contains(&index) {
                return Err(FieldError::DuplicateMine(position));
            }

            mine_indices.push(index);
        }

        Ok(Field::build(grid, &mine_indices))
    }

    fn validate(rows_amount: u8, columns_amount: u8, mines_amount: u16) -> Result<Grid, FieldError> {
        let grid = Grid::new(rows_amount, columns_amount).ok_or(FieldError::InvalidDimensions)?;

        if mines_amount >= grid.cells_amount() {
            // Return an error if the requested number of mines is incorrect, specifying the maximum possible number
            // of mines that would be correct for a field with the same dimensions.
            return Err(FieldError::InvalidMineCount {
                max: grid.cells_amount() - 1,
            });
        }

        Ok(grid)
    }

    /// Lays the mines out at the given (distinct, in-bounds) linear indices and computes the numbers of all the other
    /// cells.
    fn build(grid: Grid, mine_indices: &[usize]) -> Self {
        let mut is_mined = vec![false; grid.cells_amount() as usize];
        mine_indices.iter().for_each(|&index| is_mined[index] = true);

        let cells = grid
            .positions()
            .zip(is_mined.iter())
            .map(|(position, &mined)| {
                if mined {
                    Cell::mine()
                } else {
                    let mines_around_amount = grid
                        .neighbors_of(position)
                        .into_iter()
                        .filter_map(|neighbor| grid.index_of(neighbor))
                        .filter(|&index| is_mined[index])
                        .count() as u8;

                    Cell::empty(mines_around_amount)
                }
            })
            .collect::<Vec<Cell>>();

        let mine_positions = grid
            .positions()
            .zip(is_mined.iter())
            .filter(|(_, mined)| **mined)
            .map(|(position, _)| position)
            .collect::<Vec<(u8, u8)>>();

        tracing::debug!(
            rows = grid.rows_amount(),
            columns = grid.columns_amount(),
            mines = mine_positions.len(),
            "built a new field"
        );

        Field {
            grid,
            cells,
            mine_positions,
            revealed_amount: 0,
        }
    }

    /// Returns the field's height (the number of rows), width (the number of columns) and the two values multiplied,
    /// which is effectively the total number of cells.
    pub fn get_size(&self) -> (u8, u8, u16) {
        (
            self.grid.rows_amount(),
            self.grid.columns_amount(),
            self.grid.cells_amount(),
        )
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn get_mines_amount(&self) -> u16 {
        self.mine_positions.len() as u16
    }

    /// The positions of the mined cells, row by row.
    pub fn mine_positions(&self) -> &[(u8, u8)] {
        &self.mine_positions
    }

    /// The number of cells that have to be revealed to clear the field.
    pub fn safe_cells_amount(&self) -> u16 {
        self.grid.cells_amount() - self.get_mines_amount()
    }

    /// The number of revealed cells without a mine.
    pub fn revealed_amount(&self) -> u16 {
        self.revealed_amount
    }

    /// Returns the positions of the cells surrounding the given one, clamped to the field's bounds.
    pub fn neighbors_of(&self, position: (u8, u8)) -> Result<Vec<(u8, u8)>, FieldError> {
        self.check_position(position)?;
        Ok(self.grid.neighbors_of(position))
    }

    /// Returns a read-only cell reference by its position.
    ///
    /// Fails with [`FieldError::OutOfBounds`] if there's no cell at the given position.
    pub fn cell_at(&self, position: (u8, u8)) -> Result<&Cell, FieldError> {
        self.grid
            .index_of(position)
            .map(|index| &self.cells[index])
            .ok_or(FieldError::OutOfBounds(position))
    }

    fn cell_at_mut(&mut self, position: (u8, u8)) -> Result<&mut Cell, FieldError> {
        self.grid
            .index_of(position)
            .map(|index| &mut self.cells[index])
            .ok_or(FieldError::OutOfBounds(position))
    }

    fn check_position(&self, position: (u8, u8)) -> Result<(), FieldError> {
        if self.grid.contains(position) {
            Ok(())
        } else {
            Err(FieldError::OutOfBounds(position))
        }
    }

    /// The number of hidden cells carrying the given mark.
    pub fn marked_amount(&self, mark_state: MarkState) -> u16 {
        self.cells
            .iter()
            .filter(|cell| !cell.is_revealed() && cell.mark_state() == mark_state)
            .count() as u16
    }

    /// Checks that all the empty cells are revealed.
    ///
    /// This is effectively the win-condition for the game. Whether the mines are flagged doesn't matter.
    pub fn check_all_non_mines_revealed(&self) -> bool {
        self.revealed_amount == self.safe_cells_amount()
    }
}

impl Debug for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.grid.columns_amount() as usize) {
            for cell in row {
                write!(f, "{:?} ", cell)?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
