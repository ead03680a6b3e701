use crate::logic::board::{Board, BoardCoordinate, Cell, Player};

/// The four diagonals, relative to the moving player's forward direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    ForwardRight,
    BackwardRight,
    ForwardLeft,
    BackwardLeft,
}

impl Diagonal {
    /// Order in which directions are tried for each piece.
    pub const ALL: [Self; 4] = [
        Self::ForwardRight,
        Self::BackwardRight,
        Self::ForwardLeft,
        Self::BackwardLeft,
    ];

    pub const fn is_backward(self) -> bool {
        matches!(self, Self::BackwardRight | Self::BackwardLeft)
    }

    pub const fn delta(self, player: Player) -> (i8, i8) {
        let forward = player.forward_direction();
        match self {
            Self::ForwardRight => (1, forward),
            Self::BackwardRight => (1, -forward),
            Self::ForwardLeft => (-1, forward),
            Self::BackwardLeft => (-1, -forward),
        }
    }

    const fn allowed(self, is_king: bool) -> bool {
        is_king || !self.is_backward()
    }
}

/// A single jump: where the piece starts, what it jumps and where it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub from: BoardCoordinate,
    pub over: BoardCoordinate,
    pub to: BoardCoordinate,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub const fn new() -> Self {
        Self
    }

    /// Successor states for `player`. With `attack_only` only captures are
    /// produced; otherwise simple moves and captures are both included and it
    /// is up to the caller to enforce mandatory capture.
    pub fn generate(&self, board: &Board, player: Player, attack_only: bool) -> Vec<Board> {
        let mut states = Vec::with_capacity(32);

        for (from, piece) in board.pieces(player) {
            if !attack_only {
                for dir in Diagonal::ALL {
                    if let Some(to) = self.step_target(board, player, piece.is_king(), from, dir) {
                        states.push(Self::play_step(board, player, from, to));
                    }
                }
            }
            self.push_captures(board, player, piece.is_king(), from, &mut states);
        }

        states
    }

    /// Captures available to the piece of `player` on `from`. `is_king` decides
    /// whether backward jumps are tried. An empty or foreign origin yields none.
    pub fn captures_from(
        &self,
        board: &Board,
        player: Player,
        is_king: bool,
        from: BoardCoordinate,
    ) -> Vec<Board> {
        let mut states = Vec::new();
        if board.get(from).is_owned_by(player) {
            self.push_captures(board, player, is_king, from, &mut states);
        }
        states
    }

    /// Checks the four capture directions from `from` without building states.
    pub fn has_capture_from(
        &self,
        board: &Board,
        player: Player,
        is_king: bool,
        from: BoardCoordinate,
    ) -> bool {
        board.get(from).is_owned_by(player)
            && Diagonal::ALL
                .iter()
                .any(|&dir| self.jump(board, player, is_king, from, dir).is_some())
    }

    /// Mandatory-capture predicate: can any piece of `player` capture?
    pub fn has_any_capture(&self, board: &Board, player: Player) -> bool {
        board
            .pieces(player)
            .any(|(from, piece)| self.has_capture_from(board, player, piece.is_king(), from))
    }

    /// `true` as soon as one legal move of either kind is found.
    pub fn has_any_move(&self, board: &Board, player: Player) -> bool {
        board.pieces(player).any(|(from, piece)| {
            Diagonal::ALL.iter().any(|&dir| {
                self.step_target(board, player, piece.is_king(), from, dir)
                    .is_some()
                    || self.jump(board, player, piece.is_king(), from, dir).is_some()
            })
        })
    }

    /// Every jump `player` could make right now, in generation order.
    pub fn jumps(&self, board: &Board, player: Player) -> Vec<Jump> {
        board
            .pieces(player)
            .flat_map(|(from, piece)| {
                Diagonal::ALL
                    .into_iter()
                    .filter_map(move |dir| self.jump(board, player, piece.is_king(), from, dir))
            })
            .collect()
    }

    /// Squares that some capture of `player` would clear.
    pub fn capture_targets(&self, board: &Board, player: Player) -> Vec<BoardCoordinate> {
        let mut targets: Vec<BoardCoordinate> = Vec::new();
        for jump in self.jumps(board, player) {
            if !targets.contains(&jump.over) {
                targets.push(jump.over);
            }
        }
        targets
    }

    fn push_captures(
        &self,
        board: &Board,
        player: Player,
        is_king: bool,
        from: BoardCoordinate,
        states: &mut Vec<Board>,
    ) {
        for dir in Diagonal::ALL {
            if let Some(jump) = self.jump(board, player, is_king, from, dir) {
                states.push(Self::play_jump(board, player, jump));
            }
        }
    }

    fn step_target(
        &self,
        board: &Board,
        player: Player,
        is_king: bool,
        from: BoardCoordinate,
        dir: Diagonal,
    ) -> Option<BoardCoordinate> {
        if !dir.allowed(is_king) {
            return None;
        }
        let (dx, dy) = dir.delta(player);
        let to = from.offset(dx, dy)?;
        board.get(to).is_empty().then_some(to)
    }

    fn jump(
        &self,
        board: &Board,
        player: Player,
        is_king: bool,
        from: BoardCoordinate,
        dir: Diagonal,
    ) -> Option<Jump> {
        if !dir.allowed(is_king) {
            return None;
        }
        let (dx, dy) = dir.delta(player);
        let over = from.offset(dx, dy)?;
        let to = over.offset(dx, dy)?;
        let jumped_is_opponent = board.get(over).is_owned_by(player.opponent());
        (jumped_is_opponent && board.get(to).is_empty()).then_some(Jump { from, over, to })
    }

    fn landed(board: &Board, player: Player, from: BoardCoordinate, to: BoardCoordinate) -> Cell {
        let piece = board.get(from);
        if to.y == player.promotion_row() {
            piece.promoted()
        } else {
            piece
        }
    }

    fn play_step(board: &Board, player: Player, from: BoardCoordinate, to: BoardCoordinate) -> Board {
        let mut next = board.clone();
        next.set(to, Self::landed(board, player, from, to));
        next.set(from, Cell::Empty);
        next
    }

    fn play_jump(board: &Board, player: Player, jump: Jump) -> Board {
        let mut next = board.clone();
        next.set(jump.to, Self::landed(board, player, jump.from, jump.to));
        next.set(jump.over, Cell::Empty);
        next.set(jump.from, Cell::Empty);
        next
    }
}
