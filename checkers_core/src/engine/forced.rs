use crate::engine::ScoredMove;
use crate::logic::board::{Board, BoardCoordinate, Player};
use crate::logic::generator::MoveGenerator;
use serde::{Deserialize, Serialize};

/// Which captures the side to move is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureConstraint {
    /// Some capture must be played, by any piece.
    AnyPiece,
    /// The piece that just captured and landed on `at` must capture again.
    Piece { at: BoardCoordinate, is_king: bool },
}

impl CaptureConstraint {
    /// The successor states that satisfy the constraint.
    pub fn allowed_captures(
        self,
        generator: &MoveGenerator,
        board: &Board,
        side: Player,
    ) -> Vec<Board> {
        match self {
            Self::AnyPiece => generator.generate(board, side, true),
            Self::Piece { at, is_king } => generator.captures_from(board, side, is_king, at),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ForcedCaptureFilter {
    generator: MoveGenerator,
}

impl ForcedCaptureFilter {
    pub const fn new() -> Self {
        Self {
            generator: MoveGenerator::new(),
        }
    }

    /// Keeps only the candidates whose state is one of the constrained
    /// captures from `board`.
    pub fn filter(
        &self,
        board: &Board,
        side: Player,
        constraint: CaptureConstraint,
        candidates: Vec<ScoredMove>,
    ) -> Vec<ScoredMove> {
        let allowed = constraint.allowed_captures(&self.generator, board, side);
        candidates
            .into_iter()
            .filter(|candidate| allowed.contains(&candidate.state))
            .collect()
    }
}
