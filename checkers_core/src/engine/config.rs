use crate::logic::eval_constants::{
    DEFAULT_DEPTH, WEIGHT_CAPTURED, WEIGHT_EXPOSED, WEIGHT_KING, WEIGHT_THREAT, WIN_SCORE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Maximum search depth in plies.
    #[must_use]
    pub const fn depth(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 4,
            Self::Hard => 8,
        }
    }
}

/// How a mandatory capture restricts the machine player's choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForcedCaptureMode {
    /// Search every root move, then drop candidates that do not satisfy the
    /// constraint.
    RootFilter,
    /// Only the constrained captures are searched at the root.
    #[default]
    ConstrainedRoot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Search Parameters
    pub max_depth: u8,
    pub win_score: i32,
    pub forced_capture: ForcedCaptureMode,

    // Evaluation Parameters
    pub weight_threat: i32,  // per opponent piece we could capture next move
    pub weight_exposed: i32, // per own piece the opponent could capture
    pub weight_king: i32,
    pub weight_captured: i32, // per opponent piece already taken
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_DEPTH,
            win_score: WIN_SCORE,
            forced_capture: ForcedCaptureMode::default(),

            weight_threat: WEIGHT_THREAT,
            weight_exposed: WEIGHT_EXPOSED,
            weight_king: WEIGHT_KING,
            weight_captured: WEIGHT_CAPTURED,
        }
    }
}

#[derive(Deserialize)]
struct EngineConfigJson {
    max_depth: Option<u8>,
    difficulty: Option<Difficulty>,
    win_score: Option<i32>,
    forced_capture: Option<ForcedCaptureMode>,

    weight_threat: Option<f32>,
    weight_exposed: Option<f32>,
    weight_king: Option<f32>,
    weight_captured: Option<f32>,
}

impl EngineConfig {
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self::with_depth(difficulty.depth())
    }

    #[must_use]
    pub fn with_depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Reads a tuning file. Weights are multipliers applied to the defaults;
    /// depth, difficulty, win score and capture mode are taken as-is. An
    /// explicit `max_depth` wins over `difficulty`.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        let max_depth = json_config
            .max_depth
            .or_else(|| json_config.difficulty.map(Difficulty::depth))
            .unwrap_or(default.max_depth);

        let config = Self {
            max_depth,
            win_score: json_config.win_score.unwrap_or(default.win_score),
            forced_capture: json_config
                .forced_capture
                .unwrap_or(default.forced_capture),

            weight_threat: apply_scale(default.weight_threat, json_config.weight_threat),
            weight_exposed: apply_scale(default.weight_exposed, json_config.weight_exposed),
            weight_king: apply_scale(default.weight_king, json_config.weight_king),
            weight_captured: apply_scale(default.weight_captured, json_config.weight_captured),
        };

        if config.max_depth == 0 {
            log::warn!("engine configured with depth 0: the search will never propose a move");
        }
        Ok(config)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale.map_or(default_val, |s| (default_val as f32 * s) as i32)
}
