//! The game core: snake, apple, score and the Running/Paused/GameOver state machine.
//!
//! Nothing here touches the terminal. The shell drives the core through
//! [`Game::advance`], [`Game::set_direction`] and the lifecycle calls, and reads
//! it back through [`Game::snapshot`]. Illegal requests are ignored, never raised.

use std::cmp::max;

use tracing::{debug, info};

use crate::consts::{MAX_X, MAX_Y, MIN_X, MIN_Y, START_BODY, START_DIRECTION};
use crate::rng::{AppleSource, RandomApples};
use crate::snake::{Cell, Direction, MoveResult::{self, *}, Snake};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Running,
    /// Manually paused; `resume` continues from the same state.
    Paused,
    /// A collision ended the game. Only `new_game` leaves this state.
    GameOver,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AppleState {
    Present(Cell),
    /// Eaten (or never placed) and waiting for `spawn_apple`.
    Pending,
}

/// Read-only view handed to the shell for drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<'a> {
    /// Body cells, tail first and head last.
    pub cells: &'a [Cell],
    pub direction: Direction,
    pub apple: Option<Cell>,
    pub score: u32,
    pub highscore: u32,
    pub paused: bool,
    pub over: bool,
}

#[derive(Debug)]
pub struct Game<A = RandomApples> {
    snake: Snake,
    apple: AppleState,
    status: Status,
    score: u32,
    highscore: u32,
    apples: A,
}

impl<A: AppleSource> Game<A> {
    pub fn new(apples: A) -> Self {
        Game {
            snake: Snake::new(&START_BODY, START_DIRECTION),
            apple: AppleState::Pending,
            status: Status::Running,
            score: 0,
            highscore: 0,
            apples,
        }
    }

    /// Starts over from the initial snake. Only the high score survives.
    pub fn new_game(&mut self) {
        self.snake = Snake::new(&START_BODY, START_DIRECTION);
        self.apple = AppleState::Pending;
        self.status = Status::Running;
        self.score = 0;
        info!(highscore = self.highscore, "new game");
    }

    /// Runs one simulation step.
    pub fn advance(&mut self) -> MoveResult {
        if self.status != Status::Running {
            return Halted;
        }

        let new_head = self.snake.next_head();
        if self.is_collision(new_head) {
            self.game_over(new_head);
            return Crashed;
        }

        let ate = self.apple == AppleState::Present(new_head);
        let res = self.snake.move_to(new_head, ate);

        if ate {
            self.score += 1;
            self.apple = AppleState::Pending;
            debug!(score = self.score, "apple eaten at ({}, {})", new_head.x, new_head.y);
        }

        res
    }

    /// Requests a turn. The snake keeps its position until the next `advance`.
    ///
    /// Reversals are ignored. A turn whose first cell is a collision ends the
    /// game on the spot, the same way `advance` would.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.status != Status::Running {
            debug!(?direction, status = ?self.status, "turn ignored");
            return;
        }

        if direction == self.snake.get_direction().opposite() {
            debug!(?direction, "reversal ignored");
            return;
        }

        let probe = self.snake.head().step(direction);
        if self.is_collision(probe) {
            self.game_over(probe);
            return;
        }

        self.snake.set_direction(direction);
    }

    /// Places a new apple if one is due and returns the current apple.
    pub fn spawn_apple(&mut self) -> Cell {
        match self.apple {
            AppleState::Present(cell) => cell,
            AppleState::Pending => {
                let cell = self.apples.next_apple();
                info!("spawn apple ({}, {})", cell.x, cell.y);
                self.apple = AppleState::Present(cell);
                cell
            }
        }
    }

    pub fn pause(&mut self) {
        if self.status != Status::Running {
            debug!(status = ?self.status, "pause ignored");
            return;
        }
        self.status = Status::Paused;
        info!(score = self.score, "paused");
    }

    pub fn resume(&mut self) {
        if self.status != Status::Paused {
            debug!(status = ?self.status, "resume ignored");
            return;
        }
        self.status = Status::Running;
        info!("resumed");
    }

    /// Out of the playable area, or already part of the body.
    pub fn is_collision(&self, cell: Cell) -> bool {
        cell.x < MIN_X || cell.x > MAX_X || cell.y < MIN_Y || cell.y > MAX_Y || self.snake.contains(cell)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            cells: self.snake.body(),
            direction: self.snake.get_direction(),
            apple: self.apple(),
            score: self.score,
            highscore: self.highscore,
            paused: self.status != Status::Running,
            over: self.status == Status::GameOver,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.status != Status::Running
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn highscore(&self) -> u32 {
        self.highscore
    }

    pub fn direction(&self) -> Direction {
        self.snake.get_direction()
    }

    pub fn apple(&self) -> Option<Cell> {
        match self.apple {
            AppleState::Present(cell) => Some(cell),
            AppleState::Pending => None,
        }
    }

    pub fn apple_state(&self) -> AppleState {
        self.apple
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    fn game_over(&mut self, at: Cell) {
        self.status = Status::GameOver;
        self.highscore = max(self.highscore, self.score);
        info!(score = self.score, highscore = self.highscore, "collision ({}, {})", at.x, at.y);
    }
}
