use crate::engine::config::EngineConfig;
use crate::engine::forced::CaptureConstraint;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::{SearchStats, Searcher};
use crate::logic::board::{Board, Player};
use gloo_worker::{HandlerId, Worker, WorkerScope};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize, Deserialize)]
pub enum Input {
    /// Search `board` for `side`, restricted to `constraint` when a capture
    /// is pending.
    ComputeMove(Board, Player, Option<CaptureConstraint>, EngineConfig),
}

#[derive(Debug, Serialize, Deserialize)]
pub enum Output {
    MoveFound(Board, SearchStats),
    NoMove(SearchStats),
}

/// Runs the engine off the UI thread. The engine is kept between requests
/// and only its config is swapped.
#[derive(Default)]
pub struct EngineWorker {
    engine: Option<AlphaBetaEngine>,
}

impl EngineWorker {
    pub fn handle(&mut self, input: Input) -> Output {
        match input {
            Input::ComputeMove(board, side, constraint, config) => {
                let config = Arc::new(config);
                if let Some(engine) = &mut self.engine {
                    engine.update_config(config.clone());
                }
                let engine = self
                    .engine
                    .get_or_insert_with(|| AlphaBetaEngine::new(config));

                let outcome = engine.search(&board, side, constraint);
                match outcome.best(side) {
                    Some(chosen) => Output::MoveFound(chosen.state.clone(), outcome.stats),
                    None => Output::NoMove(outcome.stats),
                }
            }
        }
    }
}

impl Worker for EngineWorker {
    type Input = Input;
    type Message = ();
    type Output = Output;

    fn create(_scope: &WorkerScope<Self>) -> Self {
        Self::default()
    }

    fn update(&mut self, _scope: &WorkerScope<Self>, _msg: Self::Message) {}

    fn received(&mut self, scope: &WorkerScope<Self>, msg: Self::Input, id: HandlerId) {
        scope.respond(id, self.handle(msg));
    }
}
