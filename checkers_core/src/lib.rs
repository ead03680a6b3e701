pub mod api;
pub mod engine;
pub mod logic;
pub mod worker;

pub use engine::config::{Difficulty, EngineConfig, ForcedCaptureMode};
pub use engine::forced::CaptureConstraint;
pub use engine::search::AlphaBetaEngine;
pub use logic::board::{Board, BoardCoordinate, BoardError, Cell, KindFilter, Player};
pub use logic::game::{GameState, GameStatus, TurnPhase};
pub use logic::rules::MoveError;
