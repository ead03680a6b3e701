use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;
use thiserror::Error;

pub const BOARD_SIZE: usize = 8;
pub const PIECES_PER_SIDE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Row delta of one step forward.
    #[must_use]
    pub const fn forward_direction(self) -> i8 {
        match self {
            Self::Black => 1,
            Self::White => -1,
        }
    }

    /// Row the player's men start from.
    #[must_use]
    pub const fn home_row(self) -> usize {
        match self {
            Self::Black => 0,
            Self::White => BOARD_SIZE - 1,
        }
    }

    /// A man of this player landing here becomes a king.
    #[must_use]
    pub const fn promotion_row(self) -> usize {
        self.opponent().home_row()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Unplayable,
    Empty,
    Man(Player),
    King(Player),
}

impl Cell {
    #[must_use]
    pub const fn owner(self) -> Option<Player> {
        match self {
            Self::Man(p) | Self::King(p) => Some(p),
            Self::Unplayable | Self::Empty => None,
        }
    }

    #[must_use]
    pub fn is_owned_by(self, player: Player) -> bool {
        self.owner() == Some(player)
    }

    #[must_use]
    pub const fn is_king(self) -> bool {
        matches!(self, Self::King(_))
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The same piece after reaching its promotion row. Kings stay kings.
    #[must_use]
    pub const fn promoted(self) -> Self {
        match self {
            Self::Man(p) => Self::King(p),
            other => other,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Unplayable => 'X',
            Self::Empty => 'O',
            Self::Man(Player::Black) => 'b',
            Self::Man(Player::White) => 'w',
            Self::King(Player::Black) => 'B',
            Self::King(Player::White) => 'W',
        }
    }

    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            'X' => Some(Self::Unplayable),
            'O' => Some(Self::Empty),
            'b' => Some(Self::Man(Player::Black)),
            'w' => Some(Self::Man(Player::White)),
            'B' => Some(Self::King(Player::Black)),
            'W' => Some(Self::King(Player::White)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KindFilter {
    MenOnly,
    KingsOnly,
    Either,
}

impl KindFilter {
    const fn matches(self, cell: Cell) -> bool {
        match self {
            Self::MenOnly => matches!(cell, Cell::Man(_)),
            Self::KingsOnly => matches!(cell, Cell::King(_)),
            Self::Either => matches!(cell, Cell::Man(_) | Cell::King(_)),
        }
    }
}

/// A square on the board. `x` is the column, `y` the row (0 at the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardCoordinate {
    pub x: usize,
    pub y: usize,
}

impl BoardCoordinate {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Option<Self> {
        if x < BOARD_SIZE && y < BOARD_SIZE {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// Signed variant used for user-supplied coordinates.
    #[must_use]
    pub fn from_signed(x: i32, y: i32) -> Option<Self> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        Self::new(x, y)
    }

    /// The square `(dx, dy)` away, or `None` when it falls off the board.
    #[must_use]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = self.x.checked_add_signed(isize::from(dx))?;
        let y = self.y.checked_add_signed(isize::from(dy))?;
        Self::new(x, y)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.y * BOARD_SIZE + self.x
    }

    #[must_use]
    pub const fn is_playable(self) -> bool {
        (self.x + self.y) % 2 == 1
    }

    /// Squares on the rim, where no piece can be jumped.
    #[must_use]
    pub const fn is_edge(self) -> bool {
        self.x == 0 || self.y == 0 || self.x == BOARD_SIZE - 1 || self.y == BOARD_SIZE - 1
    }

    /// Every square in scan order: row by row, then column.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Self { x, y }))
    }
}

impl fmt::Display for BoardCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected 8 rows, found {0}")]
    WrongRowCount(usize),
    #[error("row {row} has {len} cells, expected 8")]
    WrongRowLength { row: usize, len: usize },
    #[error("unknown cell symbol {symbol:?} at {at}")]
    UnknownSymbol { symbol: char, at: BoardCoordinate },
    #[error("square {0} breaks the alternating pattern")]
    PatternMismatch(BoardCoordinate),
    #[error("square {0} is not playable")]
    UnplayableSquare(BoardCoordinate),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    pub grid: [Cell; BOARD_SIZE * BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    /// Correct square pattern, no pieces.
    #[must_use]
    pub fn empty() -> Self {
        let mut grid = [Cell::Unplayable; BOARD_SIZE * BOARD_SIZE];
        for pos in BoardCoordinate::all() {
            if pos.is_playable() {
                if let Some(cell) = grid.get_mut(pos.index()) {
                    *cell = Cell::Empty;
                }
            }
        }
        Self { grid }
    }

    fn setup_initial_position(&mut self) {
        self.setup_men(Player::Black, 0..3);
        self.setup_men(Player::White, 5..BOARD_SIZE);
    }

    fn setup_men(&mut self, player: Player, rows: std::ops::Range<usize>) {
        for pos in BoardCoordinate::all() {
            if rows.contains(&pos.y) && pos.is_playable() {
                self.set(pos, Cell::Man(player));
            }
        }
    }

    /// Parses eight rows of `X`/`O`/`b`/`w`/`B`/`W`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::WrongRowCount(rows.len()));
        }
        let mut board = Self::empty();
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != BOARD_SIZE {
                return Err(BoardError::WrongRowLength { row: y, len });
            }
            for (x, symbol) in row.chars().enumerate() {
                let at = BoardCoordinate { x, y };
                let cell =
                    Cell::from_symbol(symbol).ok_or(BoardError::UnknownSymbol { symbol, at })?;
                board.set(at, cell);
            }
        }
        board.validate()?;
        Ok(board)
    }

    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        (0..BOARD_SIZE)
            .map(|y| {
                (0..BOARD_SIZE)
                    .map(|x| self.get(BoardCoordinate { x, y }).symbol())
                    .collect()
            })
            .collect()
    }

    /// Checks the alternating pattern and that pieces sit on playable squares.
    pub fn validate(&self) -> Result<(), BoardError> {
        for pos in BoardCoordinate::all() {
            let cell = self.get(pos);
            if pos.is_playable() == matches!(cell, Cell::Unplayable) {
                return Err(BoardError::PatternMismatch(pos));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, pos: BoardCoordinate) -> Cell {
        self.grid
            .get(pos.index())
            .copied()
            .unwrap_or(Cell::Unplayable)
    }

    /// Bounds-checked read from raw coordinates.
    #[must_use]
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        BoardCoordinate::from_signed(x, y).map(|pos| self.get(pos))
    }

    pub(crate) fn set(&mut self, pos: BoardCoordinate, cell: Cell) {
        if let Some(slot) = self.grid.get_mut(pos.index()) {
            *slot = cell;
        }
    }

    /// Writes a playable square. Unplayable squares cannot be changed.
    pub fn place(&mut self, pos: BoardCoordinate, cell: Cell) -> Result<(), BoardError> {
        if !pos.is_playable() || cell == Cell::Unplayable {
            return Err(BoardError::UnplayableSquare(pos));
        }
        self.set(pos, cell);
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    #[must_use]
    pub fn count_pieces(&self, player: Player, filter: KindFilter) -> usize {
        self.grid
            .iter()
            .filter(|&&cell| cell.is_owned_by(player) && filter.matches(cell))
            .count()
    }

    #[must_use]
    pub fn total_pieces(&self) -> usize {
        self.count_pieces(Player::Black, KindFilter::Either)
            + self.count_pieces(Player::White, KindFilter::Either)
    }

    /// Squares holding a piece of `player`, in scan order.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (BoardCoordinate, Cell)> + '_ {
        BoardCoordinate::all()
            .map(|pos| (pos, self.get(pos)))
            .filter(move |(_, cell)| cell.is_owned_by(player))
    }

    /// Colour-swapped board rotated by 180 degrees.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let mut out = Self::empty();
        for pos in BoardCoordinate::all() {
            let cell = match self.get(pos) {
                Cell::Man(p) => Cell::Man(p.opponent()),
                Cell::King(p) => Cell::King(p.opponent()),
                other => other,
            };
            let target = BoardCoordinate {
                x: BOARD_SIZE - 1 - pos.x,
                y: BOARD_SIZE - 1 - pos.y,
            };
            out.set(target, cell);
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
