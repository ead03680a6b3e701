// Terminal scores. Black maximizes, so a Black win is +WIN_SCORE.
pub const WIN_SCORE: i32 = 1000;

// Default search depth (medium difficulty)
pub const DEFAULT_DEPTH: u8 = 4;

// Evaluation weights
pub const WEIGHT_THREAT: i32 = 3;
pub const WEIGHT_EXPOSED: i32 = 1;
pub const WEIGHT_KING: i32 = 5;
pub const WEIGHT_CAPTURED: i32 = 3;
