//! Stateless entry points for callers that only hold a board.
//!
//! `difficulty` is the search depth in plies. `Difficulty::depth` maps the
//! named levels (1, 4 and 8).

use crate::engine::analysis::CandidateReport;
use crate::engine::config::EngineConfig;
use crate::engine::forced::CaptureConstraint;
use crate::engine::search::AlphaBetaEngine;
use crate::logic::board::{Board, BoardCoordinate, KindFilter, Player};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{self, MoveError};
use std::sync::Arc;

fn engine_for(difficulty: u8) -> AlphaBetaEngine {
    AlphaBetaEngine::new(Arc::new(EngineConfig::with_depth(difficulty)))
}

/// The engine's choice for `side`, ignoring mandatory capture. `None` when
/// there is nothing to choose from.
#[must_use]
pub fn best_move(board: &Board, difficulty: u8, side: Player) -> Option<Board> {
    engine_for(difficulty).best_move(board, side)
}

#[must_use]
pub fn best_move_with_config(
    board: &Board,
    config: Arc<EngineConfig>,
    side: Player,
) -> Option<Board> {
    AlphaBetaEngine::new(config).best_move(board, side)
}

/// The engine's choice among the captures allowed by `constraint`.
#[must_use]
pub fn best_forced_move(
    board: &Board,
    difficulty: u8,
    side: Player,
    constraint: CaptureConstraint,
) -> Option<Board> {
    engine_for(difficulty).best_forced_move(board, side, constraint)
}

#[must_use]
pub fn best_forced_move_with_config(
    board: &Board,
    config: Arc<EngineConfig>,
    side: Player,
    constraint: CaptureConstraint,
) -> Option<Board> {
    AlphaBetaEngine::new(config).best_forced_move(board, side, constraint)
}

#[must_use]
pub fn legal_moves(board: &Board, player: Player, attack_only: bool) -> Vec<Board> {
    MoveGenerator::new().generate(board, player, attack_only)
}

#[must_use]
pub fn capture_available(board: &Board, player: Player) -> bool {
    MoveGenerator::new().has_any_capture(board, player)
}

/// Out-of-range coordinates simply have no capture.
#[must_use]
pub fn capture_available_from(board: &Board, player: Player, is_king: bool, x: i32, y: i32) -> bool {
    BoardCoordinate::from_signed(x, y)
        .is_some_and(|from| MoveGenerator::new().has_capture_from(board, player, is_king, from))
}

#[must_use]
pub fn is_game_over(board: &Board) -> bool {
    crate::logic::game::is_game_over(board)
}

#[must_use]
pub fn winner(board: &Board) -> Option<Player> {
    crate::logic::game::winner(board)
}

#[must_use]
pub fn piece_count(board: &Board, player: Player, filter: KindFilter) -> usize {
    board.count_pieces(player, filter)
}

pub fn apply_move(
    board: &Board,
    from_x: i32,
    from_y: i32,
    to_x: i32,
    to_y: i32,
) -> Result<Board, MoveError> {
    rules::apply_move_xy(board, from_x, from_y, to_x, to_y)
}

/// Every root candidate with its score and evaluation features.
#[must_use]
pub fn analyse(board: &Board, difficulty: u8, side: Player) -> Vec<CandidateReport> {
    engine_for(difficulty).analyse(board, side, None)
}

#[must_use]
pub fn analyse_with_config(
    board: &Board,
    config: Arc<EngineConfig>,
    side: Player,
    constraint: Option<CaptureConstraint>,
) -> Vec<CandidateReport> {
    AlphaBetaEngine::new(config).analyse(board, side, constraint)
}
