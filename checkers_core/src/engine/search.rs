use crate::engine::config::{EngineConfig, ForcedCaptureMode};
use crate::engine::eval::SimpleEvaluator;
use crate::engine::forced::{CaptureConstraint, ForcedCaptureFilter};
use crate::engine::select::select_best;
use crate::engine::{Evaluator, ScoredMove, SearchOutcome, SearchStats, Searcher};
use crate::logic::board::{Board, Player};
use crate::logic::generator::MoveGenerator;
use std::sync::Arc;

pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: SimpleEvaluator,
    generator: MoveGenerator,
    filter: ForcedCaptureFilter,
    nodes_searched: u32,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: SimpleEvaluator::new(config.clone()),
            config,
            generator: MoveGenerator::new(),
            filter: ForcedCaptureFilter::new(),
            nodes_searched: 0,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.evaluator = SimpleEvaluator::new(config.clone());
        self.config = config;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub const fn evaluator(&self) -> &SimpleEvaluator {
        &self.evaluator
    }

    /// Milliseconds from an arbitrary origin. Inside a browser worker the
    /// performance clock is used since `std::time` is unavailable there.
    fn now() -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            if let Some(window) = web_sys::window() {
                return window.performance().map_or(0.0, |p| p.now());
            }
            let global = js_sys::global();
            if let Ok(worker) = global.dyn_into::<web_sys::WorkerGlobalScope>() {
                return worker.performance().map_or(0.0, |p| p.now());
            }
            0.0
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::time::{SystemTime, UNIX_EPOCH};
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            #[allow(clippy::cast_precision_loss)]
            let time_ms = (since_the_epoch.as_secs() as f64).mul_add(
                1000.0,
                f64::from(since_the_epoch.subsec_nanos()) / 1_000_000.0,
            );
            time_ms
        }
    }

    /// `+win_score` once White is out of pieces or moves, `-win_score` once
    /// Black is. White is checked first.
    pub fn terminal_score(&self, board: &Board) -> Option<i32> {
        if !self.generator.has_any_move(board, Player::White) {
            Some(self.config.win_score)
        } else if !self.generator.has_any_move(board, Player::Black) {
            Some(-self.config.win_score)
        } else {
            None
        }
    }

    /// Minimax value of `board` with `player` to move, `depth` plies below
    /// the root. Black maximizes.
    pub(crate) fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        player: Player,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes_searched = self.nodes_searched.saturating_add(1);

        if let Some(score) = self.terminal_score(board) {
            return score;
        }
        if depth >= self.config.max_depth {
            return self.evaluator.evaluate(board);
        }

        let children = self.generator.generate(board, player, false);
        let next = player.opponent();

        match player {
            Player::Black => {
                let mut best = i32::MIN;
                for child in &children {
                    let score = self.alpha_beta(child, depth + 1, next, alpha, beta);
                    best = best.max(score);
                    alpha = alpha.max(best);
                    if alpha >= beta {
                        break;
                    }
                }
                best
            }
            Player::White => {
                let mut best = i32::MAX;
                for child in &children {
                    let score = self.alpha_beta(child, depth + 1, next, alpha, beta);
                    best = best.min(score);
                    beta = beta.min(best);
                    if alpha >= beta {
                        break;
                    }
                }
                best
            }
        }
    }

    /// Scores every root child. Unless `full_window` is set the window
    /// narrows as children are searched, so only the best score is exact and
    /// the others are bounds.
    fn search_root(
        &mut self,
        side: Player,
        children: Vec<Board>,
        full_window: bool,
    ) -> (Option<i32>, Vec<ScoredMove>) {
        let mut alpha = i32::MIN;
        let mut beta = i32::MAX;
        let mut best: Option<i32> = None;
        let mut candidates = Vec::with_capacity(children.len());

        for state in children {
            let score = self.alpha_beta(&state, 1, side.opponent(), alpha, beta);
            match side {
                Player::Black => {
                    best = Some(best.map_or(score, |b| b.max(score)));
                    if !full_window {
                        alpha = alpha.max(score);
                    }
                }
                Player::White => {
                    best = Some(best.map_or(score, |b| b.min(score)));
                    if !full_window {
                        beta = beta.min(score);
                    }
                }
            }
            log::trace!("candidate {} -> {}", candidates.len(), score);
            candidates.push(ScoredMove { state, score });
        }

        (best, candidates)
    }

    fn root_children(
        &self,
        board: &Board,
        side: Player,
        constraint: Option<CaptureConstraint>,
    ) -> Vec<Board> {
        match (constraint, self.config.forced_capture) {
            (Some(constraint), ForcedCaptureMode::ConstrainedRoot) => {
                constraint.allowed_captures(&self.generator, board, side)
            }
            _ => self.generator.generate(board, side, false),
        }
    }

    /// The unconstrained choice for `side`. Mandatory capture is not applied.
    pub fn best_move(&mut self, board: &Board, side: Player) -> Option<Board> {
        self.search(board, side, None)
            .best(side)
            .map(|chosen| chosen.state.clone())
    }

    /// The best move that satisfies `constraint`.
    pub fn best_forced_move(
        &mut self,
        board: &Board,
        side: Player,
        constraint: CaptureConstraint,
    ) -> Option<Board> {
        self.search(board, side, Some(constraint))
            .best(side)
            .map(|chosen| chosen.state.clone())
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(
        &mut self,
        board: &Board,
        side: Player,
        constraint: Option<CaptureConstraint>,
    ) -> SearchOutcome {
        self.nodes_searched = 0;
        let start = Self::now();

        let (score, candidates) = if let Some(score) = self.terminal_score(board) {
            (score, Vec::new())
        } else if self.config.max_depth == 0 {
            (self.evaluator.evaluate(board), Vec::new())
        } else {
            let children = self.root_children(board, side, constraint);
            // The filter may drop the best child, so every kept score must be exact.
            let filtering = constraint.is_some()
                && self.config.forced_capture == ForcedCaptureMode::RootFilter;
            let (best, mut candidates) = self.search_root(side, children, filtering);

            if let (Some(constraint), true) = (constraint, filtering) {
                candidates = self.filter.filter(board, side, constraint, candidates);
            }

            let score = select_best(&candidates, side)
                .map(|chosen| chosen.score)
                .or(best)
                .unwrap_or_else(|| self.evaluator.evaluate(board));
            (score, candidates)
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let time_ms = (Self::now() - start).max(0.0) as u64;
        log::debug!(
            "search {:?} depth={} nodes={} candidates={} score={} time={}ms",
            side,
            self.config.max_depth,
            self.nodes_searched,
            candidates.len(),
            score,
            time_ms
        );

        SearchOutcome {
            score,
            candidates,
            stats: SearchStats {
                depth: self.config.max_depth,
                nodes: self.nodes_searched,
                time_ms,
            },
        }
    }
}
