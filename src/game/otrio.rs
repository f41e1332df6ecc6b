use std::fmt;

use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use super::{
    BOARD_SIZE, Board, Cell, GameResult, MoveError, Outcome, Piece, Player, Size, find_win,
};

/// Pieces of each size a player starts with.
pub const PIECES_PER_SIZE: u8 = 3;

/// Remaining pieces of one player, per size.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Inventory {
    counts: [u8; 3],
}

impl Inventory {
    fn full() -> Self {
        Inventory {
            counts: [PIECES_PER_SIZE; 3],
        }
    }

    pub fn remaining(&self, size: Size) -> u8 {
        self.counts[size.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&count| usize::from(count)).sum()
    }

    fn take(&mut self, size: Size) -> Result<(), MoveError> {
        let count = &mut self.counts[size.index()];
        *count = count.checked_sub(1).ok_or(MoveError::NoPiecesRemaining)?;
        Ok(())
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sizes = Size::iter().peekable();
        while let Some(size) = sizes.next() {
            write!(f, "{}={}", size.letter(), self.remaining(size))?;
            if sizes.peek().is_some() {
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}

/// Complete state of one game of Otrio.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Otrio {
    board: Board,
    inventories: [Inventory; 2],
    current_player: Player,
    result: Option<GameResult>,
}

impl Otrio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
        info!("game reset");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.board.cell(row, col)
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn inventory(&self, player: Player) -> &Inventory {
        &self.inventories[player.index()]
    }

    pub fn remaining(&self, player: Player, size: Size) -> u8 {
        self.inventory(player).remaining(size)
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn winner(&self) -> Option<Player> {
        match self.result {
            Some(GameResult::Win(player)) => Some(player),
            _ => None,
        }
    }

    pub fn is_valid_coordinate(row: usize, col: usize) -> bool {
        row < BOARD_SIZE && col < BOARD_SIZE
    }

    pub fn pieces_on_board(&self) -> usize {
        self.board.piece_count()
    }

    /// Every `(size, row, col)` the current player could play right now.
    pub fn legal_moves(&self) -> Vec<(Size, usize, usize)> {
        if self.is_game_over() {
            return Vec::new();
        }
        let inventory = self.inventory(self.current_player);
        Size::iter()
            .filter(|&size| inventory.remaining(size) > 0)
            .flat_map(move |size| {
                self.board
                    .cells()
                    .filter(move |(_, _, cell)| cell.accepts(size))
                    .map(move |(row, col, _)| (size, row, col))
            })
            .collect()
    }

    /// Plays a move given the size as typed by a player (`S`, `M` or `L`).
    pub fn apply_move(&mut self, size: &str, row: usize, col: usize) -> Result<Outcome, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameAlreadyOver);
        }
        let size = size.parse::<Size>().inspect_err(|err| {
            debug!(%err, "move rejected");
        })?;
        self.place(size, row, col)
    }

    /// Places a piece of `size` for the current player at `(row, col)`.
    ///
    /// Either the whole move is applied or, on error, nothing changes.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn place(&mut self, size: Size, row: usize, col: usize) -> Result<Outcome, MoveError> {
        self.check_placement(size, row, col).inspect_err(|err| {
            debug!(%err, "move rejected");
        })?;

        let player = self.current_player;
        let cell = self
            .board
            .cell_mut(row, col)
            .ok_or(MoveError::InvalidCoordinate)?;
        cell.push(Piece::new(size, player))?;
        self.inventories[player.index()].take(size)?;
        debug!("piece placed");

        if let Some(win) = find_win(&self.board) {
            debug_assert_eq!(win.owner, player);
            info!(winner = %player, pattern = %win.pattern, "game won");
            self.result = Some(GameResult::Win(player));
            return Ok(Outcome::Win(player));
        }

        self.current_player = player.opponent();
        if self.legal_moves().is_empty() {
            info!(stuck = %self.current_player, "no legal placement left, game drawn");
            self.result = Some(GameResult::Draw);
            return Ok(Outcome::Draw);
        }
        Ok(Outcome::Continue)
    }

    fn check_placement(&self, size: Size, row: usize, col: usize) -> Result<(), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameAlreadyOver);
        }
        if !Self::is_valid_coordinate(row, col) {
            return Err(MoveError::InvalidCoordinate);
        }
        if self.remaining(self.current_player, size) == 0 {
            return Err(MoveError::NoPiecesRemaining);
        }
        let cell = self
            .board
            .cell(row, col)
            .ok_or(MoveError::InvalidCoordinate)?;
        if !cell.accepts(size) {
            return Err(MoveError::CellRejectsPiece);
        }
        Ok(())
    }
}

impl Default for Otrio {
    fn default() -> Self {
        Otrio {
            board: Board::new(),
            inventories: [Inventory::full(); 2],
            current_player: Player::One,
            result: None,
        }
    }
}

impl fmt::Display for Otrio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}
