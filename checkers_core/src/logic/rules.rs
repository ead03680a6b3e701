use crate::logic::board::{Board, BoardCoordinate, Cell, KindFilter, Player};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("coordinates are off the board")]
    OutOfBounds,
    #[error("there is no piece on the origin square")]
    NoPieceAtSource,
    #[error("the piece does not belong to the side to move")]
    NotYourTurn,
    #[error("pieces move diagonally by one square or jump by two")]
    InvalidMovePattern,
    #[error("the destination square is not empty")]
    DestinationOccupied,
    #[error("a capture is available and must be played")]
    CaptureRequired,
    #[error("the chain must continue with the piece that just captured")]
    MustContinueWithPiece,
    #[error("the move is not legal in this position")]
    IllegalMove,
    #[error("the game is over")]
    GameOver,
}

/// Builds the state reached by moving the piece on `from` to `to`.
///
/// Only the geometry is checked here: the result still has to be compared
/// against the legal successors to know whether the move is allowed. A two
/// square diagonal clears the square in between.
pub fn apply_move(
    board: &Board,
    from: BoardCoordinate,
    to: BoardCoordinate,
) -> Result<Board, MoveError> {
    let piece = board.get(from);
    let owner = piece.owner().ok_or(MoveError::NoPieceAtSource)?;

    let dx = to.x.abs_diff(from.x);
    let dy = to.y.abs_diff(from.y);
    if dx != dy || !(1..=2).contains(&dx) {
        return Err(MoveError::InvalidMovePattern);
    }
    if !board.get(to).is_empty() {
        return Err(MoveError::DestinationOccupied);
    }

    let mut next = board.clone();
    next.set(from, Cell::Empty);
    let landed = if to.y == owner.promotion_row() {
        piece.promoted()
    } else {
        piece
    };
    next.set(to, landed);

    if dx == 2 {
        let over = BoardCoordinate {
            x: usize::midpoint(from.x, to.x),
            y: usize::midpoint(from.y, to.y),
        };
        next.set(over, Cell::Empty);
    }

    Ok(next)
}

/// Raw-coordinate variant of [`apply_move`].
pub fn apply_move_xy(
    board: &Board,
    from_x: i32,
    from_y: i32,
    to_x: i32,
    to_y: i32,
) -> Result<Board, MoveError> {
    let from = BoardCoordinate::from_signed(from_x, from_y).ok_or(MoveError::OutOfBounds)?;
    let to = BoardCoordinate::from_signed(to_x, to_y).ok_or(MoveError::OutOfBounds)?;
    apply_move(board, from, to)
}

/// `true` when the opponent of `player` lost a piece between the two states.
#[must_use]
pub fn is_capture(before: &Board, after: &Board, player: Player) -> bool {
    let opponent = player.opponent();
    after.count_pieces(opponent, KindFilter::Either) < before.count_pieces(opponent, KindFilter::Either)
}

/// The square the moved piece of `player` ended up on: the first square, in
/// scan order, whose content changed to a piece of `player`.
#[must_use]
pub fn landing_square(before: &Board, after: &Board, player: Player) -> Option<BoardCoordinate> {
    BoardCoordinate::all().find(|&pos| {
        let cell = after.get(pos);
        cell != before.get(pos) && cell.is_owned_by(player)
    })
}

/// Landing squares of a list of successors, for hint overlays.
#[must_use]
pub fn landing_squares(
    before: &Board,
    successors: &[Board],
    player: Player,
) -> Vec<BoardCoordinate> {
    successors
        .iter()
        .filter_map(|after| landing_square(before, after, player))
        .collect()
}
