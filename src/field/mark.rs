use super::{cell::MarkState, Field, FieldError};

/// What cycling a cell's mark resulted in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The cell now carries the given mark.
    Applied(MarkState),
    /// The cell is revealed and can't be marked.
    Rejected,
}

impl Field {
    /// Moves the mark of a hidden cell to the next one in the `Unmarked -> Flagged -> Questioned -> Unmarked` cycle.
    ///
    /// Revealed cells are left untouched and reported with [`MarkOutcome::Rejected`]. Fails with
    /// [`FieldError::OutOfBounds`] if there's no cell at the given position.
    pub fn cycle_mark(&mut self, position: (u8, u8)) -> Result<MarkOutcome, FieldError> {
        let cell = self.cell_at_mut(position)?;

        Ok(match cell.cycle_mark() {
            Some(mark_state) => {
                tracing::trace!(?position, ?mark_state, "cell mark cycled");
                MarkOutcome::Applied(mark_state)
            }
            None => MarkOutcome::Rejected,
        })
    }
}
