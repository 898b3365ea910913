#[cfg(test)]
mod tests {
    use checkers_core::engine::config::EngineConfig;
    use checkers_core::engine::eval::HeuristicEvaluator;
    use checkers_core::engine::search::MinimaxEngine;
    use checkers_core::logic::board::{Board, Cell, Player, Position};
    use checkers_core::logic::game::{GameState, GameStatus};
    use checkers_core::logic::generator::{MoveEntry, MoveGenerator};
    use checkers_core::logic::state_counter::StateCounter;
    use std::sync::Arc;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn scenario_a_opening_moves() {
        let board = Board::new(8).unwrap();
        let moves = MoveGenerator::new().moves_for(&board, Player::Black);

        let expected = vec![
            MoveEntry::new(p(5, 0), vec![p(4, 1)]),
            MoveEntry::new(p(5, 2), vec![p(4, 1), p(4, 3)]),
            MoveEntry::new(p(5, 4), vec![p(4, 3), p(4, 5)]),
            MoveEntry::new(p(5, 6), vec![p(4, 5), p(4, 7)]),
        ];
        assert_eq!(moves, expected);

        let white = MoveGenerator::new().moves_for(&board, Player::White);
        assert_eq!(white.len(), 4);
        assert!(white.iter().all(|entry| entry.origin.row == 2));
    }

    #[test]
    fn scenario_b_single_forced_capture() {
        let mut board = Board::empty(8).unwrap();
        board.set(p(3, 4), Cell::WhiteNormal);
        board.set(p(4, 5), Cell::BlackNormal);

        let moves = MoveGenerator::new().moves_for(&board, Player::Black);
        assert_eq!(moves, vec![MoveEntry::new(p(4, 5), vec![p(2, 3)])]);
    }

    #[test]
    fn scenario_c_promotion() {
        let mut board = Board::empty(8).unwrap();
        board.set(p(1, 2), Cell::BlackNormal);

        let outcome = board.apply(p(1, 2), p(0, 1)).unwrap();
        assert!(outcome.promoted);
        assert!(!outcome.can_chain);
        assert_eq!(board.cell(p(0, 1)), Cell::BlackKing);

        // A capture that promotes also ends the chain.
        let mut board = Board::empty(8).unwrap();
        board.set(p(2, 3), Cell::BlackNormal);
        board.set(p(1, 4), Cell::WhiteNormal);
        board.set(p(1, 6), Cell::WhiteKing);
        let outcome = board.apply(p(2, 3), p(0, 5)).unwrap();
        assert!(outcome.promoted);
        assert!(outcome.is_capture());
        assert!(!outcome.can_chain);
        assert_eq!(board.cell(p(0, 5)), Cell::BlackKing);
    }

    #[test]
    fn scenario_d_quiet_moves_never_reset_draw_counter() {
        // Synthetic setup: (0,0) is a light square normal play never reaches.
        // With the kings on opposite square colours no capture is possible.
        let mut board = Board::empty(8).unwrap();
        board.set(p(0, 0), Cell::BlackKing);
        board.set(p(7, 0), Cell::WhiteKing);

        let mut engine = MinimaxEngine::new(Arc::new(EngineConfig::default()));
        let evaluator = HeuristicEvaluator::default();
        let mut counter = StateCounter::new();
        let mut player = Player::Black;

        for _ in 0..40 {
            let outcome = engine
                .play_best_move(&mut board, &mut counter, player, 4, &evaluator)
                .unwrap();
            assert!(outcome.has_further_play);
            assert!(!outcome.reset_draw_counter);
            assert_eq!(outcome.moves_played.len(), 1);
            player = player.opposite();
        }
        assert_eq!(board.count(Player::Black), 1);
        assert_eq!(board.count(Player::White), 1);
    }

    #[test]
    fn session_declares_draw_after_limit() {
        // Same synthetic off-colour kings as scenario D.
        let mut board = Board::empty(8).unwrap();
        board.set(p(0, 0), Cell::BlackKing);
        board.set(p(7, 0), Cell::WhiteKing);

        let config = Arc::new(EngineConfig {
            depth_limit: 2,
            ..EngineConfig::default()
        });
        let mut engine = MinimaxEngine::new(Arc::clone(&config));
        let evaluator = config.build_evaluator();
        let mut game = GameState::with_board(board, Player::Black);

        let mut turns = 0;
        while game.status == GameStatus::Playing {
            game.play_engine_turn(&mut engine, evaluator.as_ref())
                .unwrap();
            turns += 1;
        }
        assert_eq!(turns, 40);
        assert_eq!(game.status, GameStatus::Draw);
        assert_eq!(game.history.len(), 40);
    }

    #[test]
    fn session_engine_vs_engine_terminates() {
        let config = Arc::new(EngineConfig {
            depth_limit: 2,
            ..EngineConfig::default()
        });
        let mut game = GameState::from_config(&config).unwrap();
        let mut engine = MinimaxEngine::new(Arc::clone(&config));
        let evaluator = config.build_evaluator();

        for _ in 0..1200 {
            if game.status != GameStatus::Playing {
                break;
            }
            let before = game.turn;
            game.play_engine_turn(&mut engine, evaluator.as_ref())
                .unwrap();
            assert!(game.pending_chain.is_none());
            if game.status == GameStatus::Playing {
                assert_eq!(game.turn, before.opposite());
            }
        }
        assert_ne!(game.status, GameStatus::Playing);
    }

    #[test]
    fn session_human_chain_keeps_turn() {
        let mut board = Board::empty(8).unwrap();
        board.set(p(2, 1), Cell::WhiteNormal);
        board.set(p(3, 2), Cell::BlackNormal);
        board.set(p(5, 4), Cell::BlackNormal);
        board.set(p(7, 0), Cell::BlackNormal);
        let mut game = GameState::with_board(board, Player::White);

        game.make_move(p(2, 1), p(4, 3)).unwrap();
        assert_eq!(game.turn, Player::White);
        assert_eq!(game.pending_chain, Some(p(4, 3)));
        assert_eq!(
            game.legal_moves(),
            vec![MoveEntry::new(p(4, 3), vec![p(6, 5)])]
        );

        game.make_move(p(4, 3), p(6, 5)).unwrap();
        assert_eq!(game.turn, Player::Black);
        assert_eq!(game.pending_chain, None);
        assert_eq!(game.board.count(Player::Black), 1);
        assert!(game.state_counter.is_empty());
    }
}
