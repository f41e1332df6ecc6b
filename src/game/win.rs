use std::fmt;

use strum::IntoEnumIterator;

use super::{BOARD_SIZE, Board, Cell, Piece, Player, Size};

/// One of the eight rows, columns and diagonals checked for line wins.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Line {
    Row(usize),
    Column(usize),
    MainDiagonal,
    AntiDiagonal,
}

impl Line {
    pub const ALL: [Line; 8] = [
        Line::Row(0),
        Line::Row(1),
        Line::Row(2),
        Line::Column(0),
        Line::Column(1),
        Line::Column(2),
        Line::MainDiagonal,
        Line::AntiDiagonal,
    ];

    /// Cells of the line in reading order: left to right, top to bottom,
    /// and from the top row down for both diagonals.
    pub fn cells(self) -> [(usize, usize); BOARD_SIZE] {
        std::array::from_fn(|i| match self {
            Line::Row(row) => (row, i),
            Line::Column(col) => (i, col),
            Line::MainDiagonal => (i, i),
            Line::AntiDiagonal => (i, BOARD_SIZE - 1 - i),
        })
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(row) => write!(f, "row {row}"),
            Line::Column(col) => write!(f, "column {col}"),
            Line::MainDiagonal => write!(f, "the main diagonal"),
            Line::AntiDiagonal => write!(f, "the anti-diagonal"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Pattern {
    /// Three top pieces of one size.
    SameSize { line: Line, size: Size },
    /// Three top pieces growing or shrinking along the line.
    Sequence { line: Line },
    /// Small, Medium and Large stacked in one cell.
    Concentric { row: usize, col: usize },
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::SameSize { line, size } => write!(f, "three {size} pieces along {line}"),
            Pattern::Sequence { line } => write!(f, "a size sequence along {line}"),
            Pattern::Concentric { row, col } => write!(f, "a full stack at ({row}, {col})"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Win {
    pub owner: Player,
    pub pattern: Pattern,
}

pub fn has_win(board: &Board) -> bool {
    find_win(board).is_some()
}

/// First winning line or stack on the board, lines before cells.
pub fn find_win(board: &Board) -> Option<Win> {
    for line in Line::ALL {
        let Some(tops) = line_tops(board, line) else {
            continue;
        };
        let owner = tops[0].owner;
        if tops.iter().any(|piece| piece.owner != owner) {
            continue;
        }
        if is_same_size(&tops) {
            return Some(Win {
                owner,
                pattern: Pattern::SameSize {
                    line,
                    size: tops[0].size,
                },
            });
        }
        if is_sequence(&tops) {
            return Some(Win {
                owner,
                pattern: Pattern::Sequence { line },
            });
        }
    }

    board.cells().find_map(|(row, col, cell)| {
        concentric_owner(cell).map(|owner| Win {
            owner,
            pattern: Pattern::Concentric { row, col },
        })
    })
}

/// Top pieces along the line, or `None` if any cell is empty.
fn line_tops(board: &Board, line: Line) -> Option<[Piece; BOARD_SIZE]> {
    let [a, b, c] = line.cells().map(|(row, col)| board.cell(row, col).and_then(Cell::top));
    Some([a?, b?, c?])
}

fn is_same_size(tops: &[Piece; BOARD_SIZE]) -> bool {
    tops.iter().all(|piece| piece.size == tops[0].size)
}

fn is_sequence(tops: &[Piece; BOARD_SIZE]) -> bool {
    let ordinals = tops.map(|piece| piece.size.ordinal());
    ordinals == [1, 2, 3] || ordinals == [3, 2, 1]
}

fn concentric_owner(cell: &Cell) -> Option<Player> {
    if !cell.is_full() {
        return None;
    }
    let owner = cell.owner_of(Size::Small)?;
    Size::iter()
        .all(|size| cell.owner_of(size) == Some(owner))
        .then_some(owner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(pieces: &[(usize, usize, Size, Player)]) -> Board {
        let mut board = Board::new();
        for &(row, col, size, owner) in pieces {
            board
                .cell_mut(row, col)
                .unwrap()
                .push(Piece::new(size, owner))
                .unwrap();
        }
        board
    }

    use Player::{One, Two};
    use Size::{Large, Medium, Small};

    #[test]
    fn empty_board_has_no_win() {
        assert_eq!(find_win(&Board::new()), None);
    }

    #[test]
    fn lines_cover_rows_columns_and_diagonals() {
        assert_eq!(Line::Row(1).cells(), [(1, 0), (1, 1), (1, 2)]);
        assert_eq!(Line::Column(2).cells(), [(0, 2), (1, 2), (2, 2)]);
        assert_eq!(Line::MainDiagonal.cells(), [(0, 0), (1, 1), (2, 2)]);
        assert_eq!(Line::AntiDiagonal.cells(), [(0, 2), (1, 1), (2, 0)]);
    }

    #[test]
    fn same_size_row_wins() {
        let board = board_with(&[(0, 0, Large, One), (0, 1, Large, One), (0, 2, Large, One)]);
        assert_eq!(
            find_win(&board),
            Some(Win {
                owner: One,
                pattern: Pattern::SameSize {
                    line: Line::Row(0),
                    size: Large
                },
            })
        );
    }

    #[test]
    fn same_size_needs_one_owner() {
        let board = board_with(&[(0, 0, Small, One), (1, 0, Small, Two), (2, 0, Small, One)]);
        assert!(!has_win(&board));
    }

    #[test]
    fn ascending_sequence_wins() {
        let board = board_with(&[(0, 0, Small, One), (0, 1, Medium, One), (0, 2, Large, One)]);
        assert_eq!(
            find_win(&board).map(|win| win.pattern),
            Some(Pattern::Sequence { line: Line::Row(0) })
        );
    }

    #[test]
    fn descending_diagonal_sequence_wins() {
        let board = board_with(&[(0, 2, Large, Two), (1, 1, Medium, Two), (2, 0, Small, Two)]);
        assert_eq!(
            find_win(&board),
            Some(Win {
                owner: Two,
                pattern: Pattern::Sequence {
                    line: Line::AntiDiagonal
                },
            })
        );
    }

    #[test]
    fn unsorted_distinct_sizes_do_not_win() {
        let board = board_with(&[(0, 0, Medium, One), (0, 1, Small, One), (0, 2, Large, One)]);
        assert!(!has_win(&board));
    }

    #[test]
    fn sequence_needs_one_owner() {
        let board = board_with(&[(0, 1, Small, One), (1, 1, Medium, Two), (2, 1, Large, One)]);
        assert!(!has_win(&board));
    }

    #[test]
    fn covered_pieces_do_not_count_for_lines() {
        // Row 0 holds three Small pieces of player one, but (0, 1) is topped by a Large.
        let board = board_with(&[
            (0, 0, Small, One),
            (0, 1, Small, One),
            (0, 1, Large, Two),
            (0, 2, Small, One),
        ]);
        assert!(!has_win(&board));
    }

    #[test]
    fn concentric_stack_wins() {
        let board = board_with(&[(1, 1, Large, Two), (1, 1, Small, Two), (1, 1, Medium, Two)]);
        assert_eq!(
            find_win(&board),
            Some(Win {
                owner: Two,
                pattern: Pattern::Concentric { row: 1, col: 1 },
            })
        );
    }

    #[test]
    fn mixed_owner_stack_does_not_win() {
        let board = board_with(&[(2, 2, Small, One), (2, 2, Medium, Two), (2, 2, Large, One)]);
        assert!(!has_win(&board));
    }
}
