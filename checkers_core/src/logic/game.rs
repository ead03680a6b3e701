use crate::engine::forced::CaptureConstraint;
use crate::engine::search::AlphaBetaEngine;
use crate::logic::board::{Board, BoardCoordinate, KindFilter, Player};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{apply_move, is_capture, landing_square, MoveError};
use serde::{Deserialize, Serialize};

/// The side that has won, if any. White running out of pieces or moves is
/// checked first.
#[must_use]
pub fn winner(board: &Board) -> Option<Player> {
    let generator = MoveGenerator::new();
    if !generator.has_any_move(board, Player::White) {
        Some(Player::Black)
    } else if !generator.has_any_move(board, Player::Black) {
        Some(Player::White)
    } else {
        None
    }
}

#[must_use]
pub fn is_game_over(board: &Board) -> bool {
    winner(board).is_some()
}

/// Where the side to move stands within its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingMove,
    /// A capture is available somewhere and must be played.
    MustCapture,
    /// The piece on `piece` has just captured and can capture again.
    ChainCapture { piece: BoardCoordinate, is_king: bool },
    TurnOver,
}

impl TurnPhase {
    #[must_use]
    pub fn begin(board: &Board, side: Player) -> Self {
        if MoveGenerator::new().has_any_capture(board, side) {
            Self::MustCapture
        } else {
            Self::AwaitingMove
        }
    }

    #[must_use]
    pub const fn constraint(self) -> Option<CaptureConstraint> {
        match self {
            Self::MustCapture => Some(CaptureConstraint::AnyPiece),
            Self::ChainCapture { piece, is_king } => Some(CaptureConstraint::Piece {
                at: piece,
                is_king,
            }),
            Self::AwaitingMove | Self::TurnOver => None,
        }
    }

    /// Successor states legal for `side` in this phase.
    #[must_use]
    pub fn allowed_moves(self, board: &Board, side: Player) -> Vec<Board> {
        let generator = MoveGenerator::new();
        match self {
            Self::AwaitingMove => generator.generate(board, side, false),
            Self::TurnOver => Vec::new(),
            Self::MustCapture | Self::ChainCapture { .. } => self
                .constraint()
                .map(|c| c.allowed_captures(&generator, board, side))
                .unwrap_or_default(),
        }
    }

    /// Phase after `side` went from `before` to `after`. Simple moves and
    /// promoting captures end the turn.
    #[must_use]
    pub fn after_move(before: &Board, after: &Board, side: Player) -> Self {
        if !is_capture(before, after, side) {
            return Self::TurnOver;
        }
        let crowned = after.count_pieces(side, KindFilter::KingsOnly)
            > before.count_pieces(side, KindFilter::KingsOnly);
        if crowned {
            return Self::TurnOver;
        }
        let Some(piece) = landing_square(before, after, side) else {
            return Self::TurnOver;
        };
        let is_king = after.get(piece).is_king();
        if MoveGenerator::new().has_capture_from(after, side, is_king, piece) {
            Self::ChainCapture { piece, is_king }
        } else {
            Self::TurnOver
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Player),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Player,
    pub phase: TurnPhase,
    pub status: GameStatus,
    pub last_move: Option<(BoardCoordinate, BoardCoordinate)>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard opening, Black to move.
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Board::new(), Player::Black)
    }

    #[must_use]
    pub fn from_position(board: Board, turn: Player) -> Self {
        let mut state = Self {
            phase: TurnPhase::begin(&board, turn),
            board,
            turn,
            status: GameStatus::Playing,
            last_move: None,
        };
        state.update_status();
        state
    }

    pub fn make_move(
        &mut self,
        from: BoardCoordinate,
        to: BoardCoordinate,
    ) -> Result<(), MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }

        let owner = self
            .board
            .get(from)
            .owner()
            .ok_or(MoveError::NoPieceAtSource)?;
        if owner != self.turn {
            return Err(MoveError::NotYourTurn);
        }
        if let TurnPhase::ChainCapture { piece, .. } = self.phase {
            if piece != from {
                return Err(MoveError::MustContinueWithPiece);
            }
        }

        let next = apply_move(&self.board, from, to)?;
        if !self.phase.allowed_moves(&self.board, self.turn).contains(&next) {
            if self.phase == TurnPhase::MustCapture && !is_capture(&self.board, &next, self.turn) {
                return Err(MoveError::CaptureRequired);
            }
            return Err(MoveError::IllegalMove);
        }

        self.last_move = Some((from, to));
        self.commit(next);
        Ok(())
    }

    /// Gives up an optional chain continuation and passes the turn.
    pub fn forfeit_chain(&mut self) -> Result<(), MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }
        if !matches!(self.phase, TurnPhase::ChainCapture { .. }) {
            return Err(MoveError::IllegalMove);
        }
        self.end_turn();
        Ok(())
    }

    /// Lets `engine` play the whole turn for the side to move, following
    /// every chain to its end. Returns the intermediate states in order.
    pub fn play_engine_turn(&mut self, engine: &mut AlphaBetaEngine) -> Vec<Board> {
        let side = self.turn;
        let mut played = Vec::new();

        while self.status == GameStatus::Playing && self.turn == side {
            let choice = match self.phase.constraint() {
                Some(constraint) => engine.best_forced_move(&self.board, side, constraint),
                None => engine.best_move(&self.board, side),
            };
            let Some(next) = choice else {
                log::warn!("engine found no move for {side:?}");
                break;
            };
            played.push(next.clone());
            self.commit(next);
        }

        played
    }

    fn commit(&mut self, next: Board) {
        let phase = TurnPhase::after_move(&self.board, &next, self.turn);
        self.board = next;
        if phase == TurnPhase::TurnOver {
            self.end_turn();
        } else {
            self.phase = phase;
            self.update_status();
        }
    }

    fn end_turn(&mut self) {
        self.turn = self.turn.opponent();
        self.phase = TurnPhase::begin(&self.board, self.turn);
        self.update_status();
    }

    fn update_status(&mut self) {
        if let Some(side) = winner(&self.board) {
            log::info!("game over: {side:?} wins");
            self.status = GameStatus::Won(side);
            self.phase = TurnPhase::TurnOver;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::logic::board::Cell;
    use std::sync::Arc;

    fn at(x: usize, y: usize) -> BoardCoordinate {
        BoardCoordinate::new(x, y).unwrap()
    }

    fn board_with(pieces: &[(usize, usize, Cell)]) -> Board {
        let mut board = Board::empty();
        for &(x, y, cell) in pieces {
            board.place(at(x, y), cell).unwrap();
        }
        board
    }

    /// Black (1,2) can jump (2,3) then (4,5). Black (7,0) is a bystander.
    fn double_jump() -> Board {
        board_with(&[
            (1, 2, Cell::Man(Player::Black)),
            (7, 0, Cell::Man(Player::Black)),
            (2, 3, Cell::Man(Player::White)),
            (4, 5, Cell::Man(Player::White)),
            (7, 6, Cell::Man(Player::White)),
        ])
    }

    #[test]
    fn test_new_game() {
        let game = GameState::new();
        assert_eq!(game.turn, Player::Black);
        assert_eq!(game.phase, TurnPhase::AwaitingMove);
        assert_eq!(game.status, GameStatus::Playing);
        assert_eq!(winner(&game.board), None);
        assert!(!is_game_over(&game.board));
    }

    #[test]
    fn test_simple_move_passes_turn() {
        let mut game = GameState::new();
        game.make_move(at(1, 2), at(2, 3)).unwrap();
        assert_eq!(game.turn, Player::White);
        assert_eq!(game.last_move, Some((at(1, 2), at(2, 3))));
        assert_eq!(game.make_move(at(3, 2), at(4, 3)), Err(MoveError::NotYourTurn));
    }

    #[test]
    fn test_invalid_human_moves() {
        let mut game = GameState::new();
        assert_eq!(game.make_move(at(0, 3), at(1, 4)), Err(MoveError::NoPieceAtSource));
        assert_eq!(game.make_move(at(1, 2), at(1, 3)), Err(MoveError::InvalidMovePattern));
        assert_eq!(game.make_move(at(0, 1), at(1, 2)), Err(MoveError::DestinationOccupied));
        // Men do not move backwards.
        let mut game = GameState::from_position(
            board_with(&[
                (3, 4, Cell::Man(Player::Black)),
                (6, 7, Cell::Man(Player::White)),
            ]),
            Player::Black,
        );
        assert_eq!(game.make_move(at(3, 4), at(2, 3)), Err(MoveError::IllegalMove));
    }

    #[test]
    fn test_capture_is_mandatory() {
        let mut game = GameState::from_position(double_jump(), Player::Black);
        assert_eq!(game.phase, TurnPhase::MustCapture);
        assert_eq!(game.make_move(at(7, 0), at(6, 1)), Err(MoveError::CaptureRequired));
    }

    #[test]
    fn test_chain_capture() {
        let mut game = GameState::from_position(double_jump(), Player::Black);
        game.make_move(at(1, 2), at(3, 4)).unwrap();
        assert_eq!(
            game.phase,
            TurnPhase::ChainCapture {
                piece: at(3, 4),
                is_king: false
            }
        );
        assert_eq!(game.turn, Player::Black);
        assert_eq!(
            game.make_move(at(7, 0), at(6, 1)),
            Err(MoveError::MustContinueWithPiece)
        );

        game.make_move(at(3, 4), at(5, 6)).unwrap();
        assert_eq!(game.turn, Player::White);
        assert_eq!(game.board.count_pieces(Player::White, KindFilter::Either), 1);
        assert_eq!(game.status, GameStatus::Playing);
    }

    #[test]
    fn test_forfeit_chain() {
        let mut game = GameState::from_position(double_jump(), Player::Black);
        assert_eq!(game.forfeit_chain(), Err(MoveError::IllegalMove));
        game.make_move(at(1, 2), at(3, 4)).unwrap();
        game.forfeit_chain().unwrap();
        assert_eq!(game.turn, Player::White);
        assert_eq!(game.board.get(at(3, 4)), Cell::Man(Player::Black));
        // White's (4,5) can now take the black man.
        assert_eq!(game.phase, TurnPhase::MustCapture);
    }

    #[test]
    fn test_promotion_ends_the_turn() {
        let mut game = GameState::from_position(
            board_with(&[
                (2, 5, Cell::Man(Player::Black)),
                (3, 6, Cell::Man(Player::White)),
                (5, 6, Cell::Man(Player::White)),
            ]),
            Player::Black,
        );
        game.make_move(at(2, 5), at(4, 7)).unwrap();
        assert_eq!(game.board.get(at(4, 7)), Cell::King(Player::Black));
        // The new king could jump (5,6) but the turn is already over.
        assert!(MoveGenerator::new().has_capture_from(&game.board, Player::Black, true, at(4, 7)));
        assert_eq!(game.turn, Player::White);
    }

    #[test]
    fn test_game_over_after_last_capture() {
        let mut game = GameState::from_position(
            board_with(&[
                (2, 3, Cell::Man(Player::Black)),
                (3, 4, Cell::Man(Player::White)),
            ]),
            Player::Black,
        );
        game.make_move(at(2, 3), at(4, 5)).unwrap();
        assert_eq!(game.status, GameStatus::Won(Player::Black));
        assert_eq!(winner(&game.board), Some(Player::Black));
        assert_eq!(game.make_move(at(4, 5), at(5, 6)), Err(MoveError::GameOver));
    }

    #[test]
    fn test_engine_completes_the_chain() {
        let mut engine = AlphaBetaEngine::new(Arc::new(EngineConfig::with_depth(2)));
        let mut game = GameState::from_position(double_jump(), Player::Black);
        let played = game.play_engine_turn(&mut engine);

        assert_eq!(played.len(), 2);
        assert_eq!(game.turn, Player::White);
        assert_eq!(game.board.get(at(5, 6)), Cell::Man(Player::Black));
        assert_eq!(game.board.count_pieces(Player::White, KindFilter::Either), 1);
    }

    #[test]
    fn test_engine_with_depth_zero_does_not_move() {
        let mut engine = AlphaBetaEngine::new(Arc::new(EngineConfig::with_depth(0)));
        let mut game = GameState::new();
        assert!(game.play_engine_turn(&mut engine).is_empty());
        assert_eq!(game.turn, Player::Black);
    }
}
