use crate::engine::ScoredMove;
use crate::logic::board::Player;

/// Highest score for Black, lowest for White. The first of equal scores wins.
pub fn select_best(candidates: &[ScoredMove], side: Player) -> Option<&ScoredMove> {
    let mut best: Option<&ScoredMove> = None;
    for candidate in candidates {
        let better = best.is_none_or(|current| match side {
            Player::Black => candidate.score > current.score,
            Player::White => candidate.score < current.score,
        });
        if better {
            best = Some(candidate);
        }
    }
    best
}
