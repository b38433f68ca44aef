/// The offsets of the 8 cells surrounding a cell, in row-major order.
const NEIGHBOR_OFFSETS: [(i16, i16); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    /* current */
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The fixed-size 2D address space of a field.
///
/// A position is a `(row_index, column_index)` pair. Every position inside the grid also has a linear index
/// (`row_index * columns_amount + column_index`), which is how the cells are stored and how the mines are sampled.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Grid {
    rows_amount: u8,
    columns_amount: u8,
}

impl Grid {
    /// Creates a grid with the given dimensions. Returns [`None`] if either of them is zero.
    pub fn new(rows_amount: u8, columns_amount: u8) -> Option<Self> {
        if rows_amount == 0 || columns_amount == 0 {
            None
        } else {
            Some(Grid {
                rows_amount,
                columns_amount,
            })
        }
    }

    pub fn rows_amount(&self) -> u8 {
        self.rows_amount
    }

    pub fn columns_amount(&self) -> u8 {
        self.columns_amount
    }

    /// The total number of cells.
    pub fn cells_amount(&self) -> u16 {
        self.rows_amount as u16 * self.columns_amount as u16
    }

    /// Checks whether the position lies within `[0, rows) × [0, columns)`.
    pub fn contains(&self, (row_index, column_index): (u8, u8)) -> bool {
        row_index < self.rows_amount && column_index < self.columns_amount
    }

    /// Converts a position into its linear index, or [`None`] if the position is out of bounds.
    pub fn index_of(&self, position: (u8, u8)) -> Option<usize> {
        self.contains(position)
            .then(|| position.0 as usize * self.columns_amount as usize + position.1 as usize)
    }

    /// Lists the in-bounds positions among the 8 surrounding ones, row by row. An out-of-bounds position has none.
    pub fn neighbors_of(&self, position: (u8, u8)) -> Vec<(u8, u8)> {
        if !self.contains(position) {
            return Vec::new();
        }

        // Widen the coordinates to be able to go below zero without an overflow.
        let (row_index, column_index) = (position.0 as i16, position.1 as i16);

        NEIGHBOR_OFFSETS
            .iter()
            .map(|(row_offset, column_offset)| (row_index + row_offset, column_index + column_offset))
            .filter(|(row_index, column_index)| {
                (0..self.rows_amount as i16).contains(row_index)
                    && (0..self.columns_amount as i16).contains(column_index)
            })
            .map(|(row_index, column_index)| (row_index as u8, column_index as u8))
            .collect()
    }

    /// Iterates over all the positions of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (u8, u8)> {
        let columns_amount = self.columns_amount;
        (0..self.rows_amount)
            .flat_map(move |row_index| (0..columns_amount).map(move |column_index| (row_index, column_index)))
    }
}
