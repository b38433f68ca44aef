use std::fmt::{Debug, Formatter};

/// The cell variant.
///
/// A cell can either be empty or contain a mine. The variant is decided once, when the field is built.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum CellVariant {
    /// Represents an empty cell. The empty cell is one that doesn't contain a mine.
    ///
    /// The parameter represents the amount of mines around the cell.
    Empty(u8),
    /// Represents a mined cell.
    Mine,
}

/// Whether the cell's content has been revealed. Once revealed, a cell never gets hidden again.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Revealed,
}

/// The player's mark on a hidden cell.
///
/// The marks are cycled in the `Unmarked -> Flagged -> Questioned -> Unmarked` order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkState {
    Unmarked,
    /// The player believes there's a mine under the cell.
    Flagged,
    /// The player is unsure about the cell.
    Questioned,
}

impl MarkState {
    /// The mark that follows this one in the cycle.
    pub fn next(self) -> Self {
        match self {
            MarkState::Unmarked => MarkState::Flagged,
            MarkState::Flagged => MarkState::Questioned,
            MarkState::Questioned => MarkState::Unmarked,
        }
    }
}

/// The representation of a cell.
///
/// A revealed cell is never marked: revealing a cell drops its mark.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    variant: CellVariant,
    reveal_state: RevealState,
    mark_state: MarkState,
}

impl Cell {
    /// Creates a hidden unmarked empty cell with the given amount of mines around it.
    pub(crate) fn empty(mines_around_amount: u8) -> Self {
        Cell {
            variant: CellVariant::Empty(mines_around_amount),
            reveal_state: RevealState::Hidden,
            mark_state: MarkState::Unmarked,
        }
    }

    /// Creates a hidden unmarked mined cell.
    pub(crate) fn mine() -> Self {
        Cell {
            variant: CellVariant::Mine,
            reveal_state: RevealState::Hidden,
            mark_state: MarkState::Unmarked,
        }
    }

    /// Checks whether the cell is mined.
    pub fn is_mined(&self) -> bool {
        self.variant == CellVariant::Mine
    }

    /// Returns the amount of mines around the cell or `None` if the cell itself is mined.
    pub fn get_mines_around_amount(&self) -> Option<u8> {
        if let CellVariant::Empty(adjacent_mines_amount) = self.variant {
            Some(adjacent_mines_amount)
        } else {
            None
        }
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal_state
    }

    pub fn mark_state(&self) -> MarkState {
        self.mark_state
    }

    /// Checks whether the cell is revealed.
    pub fn is_revealed(&self) -> bool {
        self.reveal_state == RevealState::Revealed
    }

    /// Checks whether the cell carries any mark.
    pub fn is_marked(&self) -> bool {
        self.mark_state != MarkState::Unmarked
    }

    /// Reveals the cell, dropping its mark.
    pub(crate) fn reveal(&mut self) {
        self.reveal_state = RevealState::Revealed;
        self.mark_state = MarkState::Unmarked;
    }

    /// Moves the cell's mark to the next one in the cycle and returns it.
    ///
    /// Returns `None` (and leaves the cell untouched) if the cell is revealed.
    pub(crate) fn cycle_mark(&mut self) -> Option<MarkState> {
        if self.is_revealed() {
            return None;
        }

        self.mark_state = self.mark_state.next();
        Some(self.mark_state)
    }
}

/// The `Debug` implementation shows the cell's content regardless of its state.
impl Debug for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.variant {
            CellVariant::Empty(0) => write!(f, "."),
            CellVariant::Empty(n) => write!(f, "{}", n),
            CellVariant::Mine => write!(f, "*"),
        }
    }
}
