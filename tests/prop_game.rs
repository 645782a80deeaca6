//! Property-based tests for the game rules.

use proptest::prelude::*;

use snake::{Direction, Game, MoveResult, RandomApples};

#[derive(Debug, Clone, Copy)]
enum Input {
    Tick,
    Turn(Direction),
    NewGame,
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        6 => Just(Input::Tick),
        3 => direction().prop_map(Input::Turn),
        1 => Just(Input::NewGame),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// A step moves the head one cell along the active direction and keeps the
    /// length, except right after an apple, where the length grows by one.
    #[test]
    fn prop_step_is_unit_move(seed in any::<u64>(), inputs in prop::collection::vec(input(), 1..300)) {
        let mut game = Game::new(RandomApples::seeded(seed));

        for inp in inputs {
            game.spawn_apple();
            match inp {
                Input::Tick => {
                    let len = game.snake().body().len();
                    let head = game.snake().head();
                    let dir = game.direction();
                    let score = game.score();

                    match game.advance() {
                        MoveResult::Moved { new_head, ate } => {
                            prop_assert_eq!(new_head, head.step(dir));
                            prop_assert_eq!(game.snake().head(), new_head);
                            let dx = (new_head.x - head.x).abs();
                            let dy = (new_head.y - head.y).abs();
                            prop_assert_eq!(dx + dy, 1);
                            if !ate {
                                prop_assert_eq!(game.snake().body().len(), len);
                                prop_assert_eq!(game.score(), score);
                            } else {
                                prop_assert_eq!(game.snake().body().len(), len + 1);
                                prop_assert_eq!(game.score(), score + 1);
                            }
                        }
                        MoveResult::Crashed => {
                            prop_assert!(game.is_over());
                            prop_assert_eq!(game.snake().body().len(), len);
                        }
                        MoveResult::Halted => prop_assert!(game.is_paused()),
                    }
                }
                Input::Turn(d) => game.set_direction(d),
                Input::NewGame => game.new_game(),
            }
        }
    }

    /// Asking for the opposite direction never changes anything.
    #[test]
    fn prop_reversal_rejected(seed in any::<u64>(), ticks in 0usize..20, turns in prop::collection::vec(direction(), 0..4)) {
        let mut game = Game::new(RandomApples::seeded(seed));
        for d in turns {
            game.set_direction(d);
            game.spawn_apple();
            for _ in 0..ticks {
                game.advance();
            }
        }

        let status = game.status();
        let dir = game.direction();
        let body = game.snake().clone();

        game.set_direction(dir.opposite());

        prop_assert_eq!(game.direction(), dir);
        prop_assert_eq!(game.status(), status);
        prop_assert_eq!(game.snake(), &body);
    }

    /// The high score never goes down and always covers the last finished game.
    #[test]
    fn prop_highscore_monotonic(seed in any::<u64>(), inputs in prop::collection::vec(input(), 1..400)) {
        let mut game = Game::new(RandomApples::seeded(seed));
        let mut best = 0;

        for inp in inputs {
            game.spawn_apple();
            match inp {
                Input::Tick => { game.advance(); }
                Input::Turn(d) => game.set_direction(d),
                Input::NewGame => game.new_game(),
            }

            prop_assert!(game.highscore() >= best);
            if game.is_over() {
                prop_assert!(game.highscore() >= game.score());
            }
            best = game.highscore();
        }
    }

    /// Without collisions, the body stays connected and free of repeats.
    #[test]
    fn prop_body_stays_contiguous(seed in any::<u64>(), inputs in prop::collection::vec(input(), 1..300)) {
        let mut game = Game::new(RandomApples::seeded(seed));

        for inp in inputs {
            game.spawn_apple();
            match inp {
                Input::Tick => { game.advance(); }
                Input::Turn(d) => game.set_direction(d),
                Input::NewGame => game.new_game(),
            }

            let body = game.snake().body();
            for pair in body.windows(2) {
                let dist = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
                prop_assert_eq!(dist, 1);
            }
            for (i, c) in body.iter().enumerate() {
                prop_assert!(!body[i + 1..].contains(c));
            }
        }
    }
}
