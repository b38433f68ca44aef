use super::{Field, FieldError};

/// What revealing a cell resulted in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell is either revealed already or marked, so nothing has changed.
    AlreadySettled,
    /// A mine-free cell (and possibly the empty area around it) got revealed.
    Revealed,
    /// The revealed cell holds a mine.
    MineHit,
}

impl RevealOutcome {
    /// Whether the field has changed because of the reveal.
    pub fn is_settling(self) -> bool {
        !matches!(self, RevealOutcome::AlreadySettled)
    }
}

impl Field {
    /// Reveals a cell by its position.
    ///
    /// Marked and already revealed cells are left as they are, which is reported with
    /// [`RevealOutcome::AlreadySettled`]. A mined cell gets revealed and reported with [`RevealOutcome::MineHit`].
    ///
    /// As a side effect, when the target cell has no mines around it, all of its hidden unmarked neighbors get
    /// revealed as well, and the same repeats for every neighbor that has no mines around it either. Mines are never
    /// revealed this way.
    ///
    /// Fails with [`FieldError::OutOfBounds`] if there's no cell at the given position.
    pub fn reveal_cell(&mut self, position: (u8, u8)) -> Result<RevealOutcome, FieldError> {
        let cell = self.cell_at_mut(position)?;

        if cell.is_revealed() || cell.is_marked() {
            return Ok(RevealOutcome::AlreadySettled);
        }

        cell.reveal();

        let Some(mines_around_amount) = cell.get_mines_around_amount() else {
            tracing::debug!(?position, "a mine has been revealed");
            return Ok(RevealOutcome::MineHit);
        };

        self.revealed_amount += 1;

        if mines_around_amount == 0 {
            let cascaded_amount = self.reveal_empty_area(position);
            tracing::debug!(?position, cascaded_amount, "revealed an empty area");
        }

        Ok(RevealOutcome::Revealed)
    }

    /// Reveals everything reachable from an already revealed empty cell through other empty cells, and returns the
    /// amount of the newly revealed cells.
    ///
    /// A cell is pushed to the stack only after it's been revealed, so no cell is ever visited twice.
    fn reveal_empty_area(&mut self, origin: (u8, u8)) -> u16 {
        let mut stack = vec![origin];
        let mut revealed_amount = 0;

        while let Some(position) = stack.pop() {
            for neighbor in self.grid.neighbors_of(position) {
                let Ok(cell) = self.cell_at_mut(neighbor) else {
                    continue;
                };

                if cell.is_revealed() || cell.is_marked() || cell.is_mined() {
                    continue;
                }

                cell.reveal();
                revealed_amount += 1;

                if let Some(0) = cell.get_mines_around_amount() {
                    stack.push(neighbor);
                }
            }
        }

        self.revealed_amount += revealed_amount;
        revealed_amount
    }
}
