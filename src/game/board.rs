use std::fmt;

use strum::IntoEnumIterator;

use super::{MoveError, Piece, Player, Size};

pub const BOARD_SIZE: usize = 3;
const MAX_PIECES: u8 = 3;
const CELL_WIDTH: usize = 8;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Slot {
    owner: Player,
    depth: u8,
}

/// A stack of at most one piece per size.
///
/// Each size has its own slot, so a second piece of the same size cannot be
/// represented. `depth` records the order pieces arrived in; the slot with
/// the greatest depth holds the top of the stack.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Cell {
    slots: [Option<Slot>; 3],
    len: u8,
}

impl Cell {
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len >= MAX_PIECES
    }

    pub fn contains(&self, size: Size) -> bool {
        self.slots[size.index()].is_some()
    }

    pub fn owner_of(&self, size: Size) -> Option<Player> {
        self.slots[size.index()].map(|slot| slot.owner)
    }

    pub fn accepts(&self, size: Size) -> bool {
        !self.contains(size) && !self.is_full()
    }

    /// Last placed piece, the only one visible to line checks.
    pub fn top(&self) -> Option<Piece> {
        self.occupied()
            .max_by_key(|(_, slot)| slot.depth)
            .map(|(size, slot)| Piece::new(size, slot.owner))
    }

    /// Pieces from the bottom of the stack to the top.
    pub fn pieces(&self) -> Vec<Piece> {
        let mut stack: Vec<(Size, Slot)> = self.occupied().collect();
        stack.sort_by_key(|(_, slot)| slot.depth);
        stack
            .into_iter()
            .map(|(size, slot)| Piece::new(size, slot.owner))
            .collect()
    }

    pub(crate) fn push(&mut self, piece: Piece) -> Result<(), MoveError> {
        if !self.accepts(piece.size) {
            return Err(MoveError::CellRejectsPiece);
        }
        self.slots[piece.size.index()] = Some(Slot {
            owner: piece.owner,
            depth: self.len,
        });
        self.len += 1;
        Ok(())
    }

    fn occupied(&self) -> impl Iterator<Item = (Size, Slot)> + '_ {
        Size::iter()
            .zip(self.slots.iter())
            .filter_map(|(size, slot)| slot.map(|slot| (size, slot)))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let content = self
            .pieces()
            .iter()
            .map(Piece::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "[{content:^width$}]", width = CELL_WIDTH)
    }
}

/// 3x3 grid of cells, indexed `(row, col)`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row)?.get(col)
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(row)?.get_mut(col)
    }

    /// Every cell with its coordinates, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (row, col, cell))
        })
    }

    pub fn piece_count(&self) -> usize {
        self.cells().map(|(_, _, cell)| cell.len()).sum()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Column numbers, centered over each cell
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{col:^width$} ", width = CELL_WIDTH + 2)?;
        }
        writeln!(f)?;

        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{row} ")?;
            for cell in cells {
                write!(f, "{cell} ")?;
            }
            if row < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
