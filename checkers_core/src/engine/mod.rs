use crate::engine::forced::CaptureConstraint;
use crate::logic::board::{Board, Player};
use serde::{Deserialize, Serialize};

pub mod analysis;
pub mod config;
pub mod eval;
pub mod forced;
pub mod search;
pub mod select;


/// A root candidate: the state after one move of the searching side and the
/// score the search gave it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    pub state: Board,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u32,
    pub time_ms: u64,
}

/// Everything one search produces. Candidates are in generation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub score: i32,
    pub candidates: Vec<ScoredMove>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// The selected move for `side`, if any candidate exists.
    #[must_use]
    pub fn best(&self, side: Player) -> Option<&ScoredMove> {
        select::select_best(&self.candidates, side)
    }
}

pub trait Evaluator {
    fn evaluate(&self, board: &Board) -> i32;
}

pub trait Searcher {
    fn search(
        &mut self,
        board: &Board,
        side: Player,
        constraint: Option<CaptureConstraint>,
    ) -> SearchOutcome;
}
