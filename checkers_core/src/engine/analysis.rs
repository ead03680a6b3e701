use crate::engine::forced::CaptureConstraint;
use crate::engine::eval::EvalBreakdown;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::select::select_best;
use crate::engine::Searcher;
use crate::logic::board::{Board, BoardCoordinate, Player};
use crate::logic::rules::landing_square;
use serde::{Deserialize, Serialize};

/// One root candidate with the features its static evaluation saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub state: Board,
    /// Search score. Only the selected candidate's score is exact.
    pub score: i32,
    pub features: EvalBreakdown,
    pub landing: Option<BoardCoordinate>,
    pub selected: bool,
}

impl AlphaBetaEngine {
    /// Searches `board` and reports every root candidate in generation order.
    pub fn analyse(
        &mut self,
        board: &Board,
        side: Player,
        constraint: Option<CaptureConstraint>,
    ) -> Vec<CandidateReport> {
        let outcome = self.search(board, side, constraint);
        let selected = select_best(&outcome.candidates, side).map(|best| best.state.clone());

        outcome
            .candidates
            .into_iter()
            .map(|candidate| {
                let features = self.evaluator().breakdown(&candidate.state);
                let landing = landing_square(board, &candidate.state, side);
                log::debug!(
                    "candidate landing={} score={} features={:?}",
                    landing.map_or_else(|| "-".to_string(), |pos| pos.to_string()),
                    candidate.score,
                    features
                );
                CandidateReport {
                    selected: selected.as_ref() == Some(&candidate.state),
                    state: candidate.state,
                    score: candidate.score,
                    features,
                    landing,
                }
            })
            .collect()
    }
}
