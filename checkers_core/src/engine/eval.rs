use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, BoardCoordinate, KindFilter, Player, PIECES_PER_SIDE};
use crate::logic::generator::MoveGenerator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Feature counts behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvalBreakdown {
    pub vulnerable_black: i32,
    pub vulnerable_white: i32,
    pub kings_black: i32,
    pub kings_white: i32,
    /// Black pieces no longer on the board.
    pub lost_black: i32,
    /// White pieces no longer on the board.
    pub lost_white: i32,
    /// Pieces on edge squares. Reported only, not scored.
    pub safe_black: i32,
    pub safe_white: i32,
    pub score: i32,
}

pub struct SimpleEvaluator {
    config: Arc<EngineConfig>,
    generator: MoveGenerator,
}

impl SimpleEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            config,
            generator: MoveGenerator::new(),
        }
    }

    /// A piece is vulnerable when some capture of the opponent removes it.
    pub fn is_vulnerable(&self, board: &Board, pos: BoardCoordinate) -> bool {
        board.get(pos).owner().is_some_and(|owner| {
            self.generator
                .capture_targets(board, owner.opponent())
                .contains(&pos)
        })
    }

    /// Number of `player`'s pieces the opponent could capture next move.
    pub fn vulnerable_count(&self, board: &Board, player: Player) -> i32 {
        let targets = self.generator.capture_targets(board, player.opponent());
        count_as_score(targets.len())
    }

    pub fn safe_count(board: &Board, player: Player) -> i32 {
        count_as_score(board.pieces(player).filter(|(pos, _)| pos.is_edge()).count())
    }

    pub fn breakdown(&self, board: &Board) -> EvalBreakdown {
        let cfg = &self.config;

        let vulnerable_black = self.vulnerable_count(board, Player::Black);
        let vulnerable_white = self.vulnerable_count(board, Player::White);
        let kings_black = count_as_score(board.count_pieces(Player::Black, KindFilter::KingsOnly));
        let kings_white = count_as_score(board.count_pieces(Player::White, KindFilter::KingsOnly));
        let lost_black = count_as_score(
            PIECES_PER_SIDE.abs_diff(board.count_pieces(Player::Black, KindFilter::Either)),
        );
        let lost_white = count_as_score(
            PIECES_PER_SIDE.abs_diff(board.count_pieces(Player::White, KindFilter::Either)),
        );

        let mut score = 0;

        // Threats: opponent pieces we could take next move
        score += vulnerable_white * cfg.weight_threat;
        score -= vulnerable_black * cfg.weight_threat;

        // Kings
        score += kings_black * cfg.weight_king;
        score -= kings_white * cfg.weight_king;

        // Material already taken
        score += lost_white * cfg.weight_captured;
        score -= lost_black * cfg.weight_captured;

        // Exposure of our own pieces
        score -= vulnerable_black * cfg.weight_exposed;
        score += vulnerable_white * cfg.weight_exposed;

        EvalBreakdown {
            vulnerable_black,
            vulnerable_white,
            kings_black,
            kings_white,
            lost_black,
            lost_white,
            safe_black: Self::safe_count(board, Player::Black),
            safe_white: Self::safe_count(board, Player::White),
            score,
        }
    }
}

impl Evaluator for SimpleEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        self.breakdown(board).score
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn count_as_score(count: usize) -> i32 {
    // Board counts never exceed 64.
    count as i32
}
