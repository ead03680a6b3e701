#[cfg(test)]
mod tests {
    use checkers_core::engine::config::{EngineConfig, ForcedCaptureMode};
    use checkers_core::engine::eval::SimpleEvaluator;
    use checkers_core::engine::{Evaluator, Searcher};
    use checkers_core::logic::board::{Board, BoardCoordinate, Cell, KindFilter, Player};
    use checkers_core::logic::game::{winner, GameState, GameStatus, TurnPhase};
    use checkers_core::logic::generator::MoveGenerator;
    use checkers_core::logic::rules::landing_square;
    use checkers_core::{AlphaBetaEngine, CaptureConstraint};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use std::sync::Arc;

    /// Positions reached by random legal play from the opening, with the
    /// side to move at each of them. Final positions of finished games are
    /// included.
    fn random_positions(seed: u64, games: usize, max_plies: usize) -> Vec<(Board, Player)> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut positions = Vec::new();

        for _ in 0..games {
            let mut game = GameState::new();
            for _ in 0..max_plies {
                positions.push((game.board.clone(), game.turn));
                if game.status != GameStatus::Playing {
                    break;
                }
                let moves = game.phase.allowed_moves(&game.board, game.turn);
                let Some(next) = moves.choose(&mut rng) else {
                    break;
                };
                let (from, to) = endpoints(&game.board, next, game.turn);
                game.make_move(from, to).unwrap();
            }
        }
        positions
    }

    /// Origin and destination of the move that turned `before` into `after`.
    fn endpoints(before: &Board, after: &Board, side: Player) -> (BoardCoordinate, BoardCoordinate) {
        let from = BoardCoordinate::all()
            .find(|&pos| before.get(pos).is_owned_by(side) && after.get(pos).is_empty())
            .unwrap();
        let to = landing_square(before, after, side).unwrap();
        (from, to)
    }

    #[test]
    fn test_piece_conservation() {
        let generator = MoveGenerator::new();
        for (board, side) in random_positions(1, 20, 60) {
            let own = board.count_pieces(side, KindFilter::Either);
            let theirs = board.count_pieces(side.opponent(), KindFilter::Either);
            for next in generator.generate(&board, side, false) {
                assert_eq!(next.count_pieces(side, KindFilter::Either), own);
                let after = next.count_pieces(side.opponent(), KindFilter::Either);
                assert!(after == theirs || after + 1 == theirs, "\n{board}\n{next}");
                assert!(next.validate().is_ok());
            }
        }
    }

    #[test]
    fn test_promotion_closure() {
        let generator = MoveGenerator::new();
        for (board, side) in random_positions(2, 20, 80) {
            let row = side.promotion_row();
            let kings = board.count_pieces(side, KindFilter::KingsOnly);
            for next in generator.generate(&board, side, false) {
                for x in 0..8 {
                    let cell = next.cell_at(x, i32::try_from(row).unwrap()).unwrap();
                    assert_ne!(cell, Cell::Man(side), "\n{next}");
                }
                assert!(next.count_pieces(side, KindFilter::KingsOnly) >= kings, "\n{board}\n{next}");
            }
        }
    }

    #[test]
    fn test_mandatory_capture_predicates_agree() {
        let generator = MoveGenerator::new();
        let mut seen_capture = false;
        for (board, side) in random_positions(3, 20, 60) {
            let captures = generator.generate(&board, side, true);
            assert_eq!(generator.has_any_capture(&board, side), !captures.is_empty());
            seen_capture |= !captures.is_empty();

            for (from, piece) in board.pieces(side) {
                let from_here = generator.captures_from(&board, side, piece.is_king(), from);
                assert_eq!(
                    generator.has_capture_from(&board, side, piece.is_king(), from),
                    !from_here.is_empty()
                );
                for state in &from_here {
                    assert!(captures.contains(state));
                }
            }

            let expected = if captures.is_empty() {
                TurnPhase::AwaitingMove
            } else {
                TurnPhase::MustCapture
            };
            assert_eq!(TurnPhase::begin(&board, side), expected);
        }
        assert!(seen_capture);
    }

    #[test]
    fn test_terminal_positions() {
        let generator = MoveGenerator::new();
        let mut engine = AlphaBetaEngine::new(Arc::new(EngineConfig::with_depth(2)));

        let mut finished = 0;
        for (board, side) in random_positions(4, 30, 200) {
            let white_stuck = !generator.has_any_move(&board, Player::White);
            let black_stuck = !generator.has_any_move(&board, Player::Black);
            let outcome = engine.search(&board, side, None);

            match winner(&board) {
                Some(Player::Black) => {
                    assert!(white_stuck);
                    assert_eq!(outcome.score, 1000);
                    assert!(outcome.candidates.is_empty());
                    finished += 1;
                }
                Some(Player::White) => {
                    assert!(black_stuck && !white_stuck);
                    assert_eq!(outcome.score, -1000);
                    assert!(outcome.candidates.is_empty());
                    finished += 1;
                }
                None => {
                    assert!(!white_stuck && !black_stuck);
                    assert!(!outcome.candidates.is_empty());
                }
            }
        }
        assert!(finished > 0);
    }

    #[test]
    fn test_random_games_end_with_a_winner() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut winners = 0;
        for _ in 0..10 {
            let mut game = GameState::new();
            for _ in 0..400 {
                if game.status != GameStatus::Playing {
                    break;
                }
                let moves = game.phase.allowed_moves(&game.board, game.turn);
                let next = moves.choose(&mut rng).unwrap().clone();
                let (from, to) = endpoints(&game.board, &next, game.turn);
                game.make_move(from, to).unwrap();
            }
            if let GameStatus::Won(side) = game.status {
                assert_eq!(winner(&game.board), Some(side));
                winners += 1;
            }
        }
        assert!(winners > 0);
    }

    #[test]
    fn test_evaluation_antisymmetry() {
        let evaluator = SimpleEvaluator::new(Arc::new(EngineConfig::default()));
        for (board, _) in random_positions(6, 10, 60) {
            assert_eq!(
                evaluator.evaluate(&board.mirrored()),
                -evaluator.evaluate(&board),
                "\n{board}"
            );
        }
    }

    #[test]
    fn test_search_determinism() {
        let config = Arc::new(EngineConfig::with_depth(3));
        for (board, side) in random_positions(7, 3, 30) {
            let mut first = AlphaBetaEngine::new(config.clone());
            let mut second = AlphaBetaEngine::new(config.clone());
            let a = first.search(&board, side, None);
            let b = second.search(&board, side, None);
            assert_eq!(a.candidates, b.candidates);
            assert_eq!(a.best(side), b.best(side));
        }
    }

    #[test]
    fn test_forced_move_is_optimal_in_both_modes() {
        let generator = MoveGenerator::new();
        let constrained = Arc::new(EngineConfig::with_depth(3));
        let filtered = Arc::new(EngineConfig {
            forced_capture: ForcedCaptureMode::RootFilter,
            ..EngineConfig::with_depth(3)
        });
        // A child's exact value at depth 3 is a depth 2 search from it.
        let mut reference = AlphaBetaEngine::new(Arc::new(EngineConfig::with_depth(2)));

        let mut checked = 0;
        for (board, side) in random_positions(11, 20, 60) {
            if winner(&board).is_some() || !generator.has_any_capture(&board, side) {
                continue;
            }
            let values: Vec<i32> = generator
                .generate(&board, side, true)
                .iter()
                .map(|child| reference.search(child, side.opponent(), None).score)
                .collect();
            let optimum = match side {
                Player::Black => values.iter().max(),
                Player::White => values.iter().min(),
            }
            .copied()
            .unwrap();

            for config in [&constrained, &filtered] {
                let mut engine = AlphaBetaEngine::new(config.clone());
                let outcome = engine.search(&board, side, Some(CaptureConstraint::AnyPiece));
                assert_eq!(outcome.score, optimum, "\n{board}");
                let chosen = outcome.best(side).unwrap();
                assert_eq!(
                    reference.search(&chosen.state, side.opponent(), None).score,
                    optimum,
                    "\n{board}"
                );
            }
            checked += 1;
        }
        assert!(checked > 0);
    }
}
