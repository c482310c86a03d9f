use log::{debug, info, trace, warn};
use std::time::Duration;

use super::{
    action::Command,
    config::GameConfig,
    direction::{Direction, DirectionController},
    events::GameEvent,
    food::{FoodItem, FoodPlacer},
    grid::Grid,
    speed::SpeedLevel,
    state::{GameOverReason, GameStatus, Snake},
};
use crate::storage::HighScoreStore;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is not running; nothing changed
    Skipped,
    /// The snake advanced one cell
    Moved,
    /// The snake advanced onto food and grew
    Ate,
    /// The run ended on this tick
    Over(GameOverReason),
}

/// Owns every piece of session state and drives the tick.
///
/// One instance lives for the whole program; [`GameEngine::reset`] starts a
/// fresh session by reinitializing every field.
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    direction: DirectionController,
    food: Option<FoodItem>,
    score: u32,
    high_score: u32,
    speed: SpeedLevel,
    status: GameStatus,
    over_reason: Option<GameOverReason>,
    new_high_score: bool,
    ticks: u64,
    placer: FoodPlacer,
    store: Box<dyn HighScoreStore>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Create an idle engine with a randomly seeded food placer
    pub fn new(config: GameConfig, store: Box<dyn HighScoreStore>) -> Self {
        Self::with_placer(config, store, FoodPlacer::new())
    }

    pub fn with_placer(
        config: GameConfig,
        store: Box<dyn HighScoreStore>,
        placer: FoodPlacer,
    ) -> Self {
        let grid = Grid::new(config.grid_size);
        let high_score = match store.get() {
            Ok(score) => score,
            Err(e) => {
                warn!("could not read high score, starting from 0: {}", e);
                0
            }
        };

        let mut engine = Self {
            config,
            grid,
            snake: Snake::new(grid.center()),
            direction: DirectionController::new(),
            food: None,
            score: 0,
            high_score,
            speed: SpeedLevel::MIN,
            status: GameStatus::Idle,
            over_reason: None,
            new_high_score: false,
            ticks: 0,
            placer,
            store,
            events: Vec::new(),
        };
        engine.reinitialize();
        engine
    }

    /// Dispatch a command from an input source
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Turn(direction) => {
                self.request_direction(direction);
            }
            Command::Start => self.start(),
            Command::TogglePause => self.toggle_pause(),
            Command::StartOrPause => self.start_or_pause(),
            Command::Reset => self.reset(),
            Command::SetSpeed(level) => self.set_speed(level),
        }
    }

    /// Start a run. A finished run is reset first; a paused run resumes.
    pub fn start(&mut self) {
        match self.status {
            GameStatus::Running => return,
            GameStatus::Paused => {
                self.toggle_pause();
                return;
            }
            GameStatus::Over => self.reset(),
            GameStatus::Idle => {}
        }

        if self.direction.current().is_none() {
            self.direction.force(Direction::Right);
        }

        self.status = GameStatus::Running;
        info!(
            "game started on a {}x{} grid at speed level {}",
            self.grid.size(),
            self.grid.size(),
            self.speed.get()
        );
        self.events.push(GameEvent::Started);
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            GameStatus::Running => {
                self.status = GameStatus::Paused;
                debug!("game paused at score {}", self.score);
                self.events.push(GameEvent::Paused);
            }
            GameStatus::Paused => {
                self.status = GameStatus::Running;
                debug!("game resumed");
                self.events.push(GameEvent::Resumed);
            }
            GameStatus::Idle | GameStatus::Over => {}
        }
    }

    /// Start when idle or over, otherwise toggle pause
    pub fn start_or_pause(&mut self) {
        match self.status {
            GameStatus::Idle | GameStatus::Over => self.start(),
            GameStatus::Running | GameStatus::Paused => self.toggle_pause(),
        }
    }

    /// Return to idle with a fresh session
    pub fn reset(&mut self) {
        self.reinitialize();
        info!("game reset");
        self.events.push(GameEvent::Reset);
    }

    fn reinitialize(&mut self) {
        self.snake = Snake::new(self.grid.center());
        self.direction.reset();
        self.score = 0;
        self.speed = SpeedLevel::clamped(u32::from(self.config.start_level), &self.config);
        self.status = GameStatus::Idle;
        self.over_reason = None;
        self.new_high_score = false;
        self.ticks = 0;
        self.food = self.placer.place(&self.grid, &self.snake);
    }

    /// Request a direction change, returning whether it was accepted.
    ///
    /// Only honoured while idle or running; paused and finished games ignore it.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !matches!(self.status, GameStatus::Idle | GameStatus::Running) {
            return false;
        }

        let accepted = self.direction.request(direction);
        if accepted {
            trace!("direction changed to {:?}", direction);
            self.events.push(GameEvent::DirectionChanged(direction));
        }
        accepted
    }

    /// Select a speed level manually, clamped to `[1, max_level]`
    pub fn set_speed(&mut self, level: u8) {
        let level = SpeedLevel::clamped(u32::from(level), &self.config);
        if level != self.speed {
            self.speed = level;
            self.announce_speed();
        }
    }

    /// Advance the game by one cell
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running || self.direction.current().is_none() {
            return TickOutcome::Skipped;
        }
        self.ticks += 1;

        let candidate = self.snake.head().moved_in_direction(self.direction.current());
        trace!("tick {}: head -> ({}, {})", self.ticks, candidate.x, candidate.y);

        if !self.grid.contains(candidate) {
            return self.finish(GameOverReason::Wall);
        }

        let eats = self.food.is_some_and(|food| food.cell == candidate);
        let hits_body = if self.config.tail_follow && !eats {
            self.snake.contains_except_tail(candidate)
        } else {
            self.snake.contains(candidate)
        };
        if hits_body {
            return self.finish(GameOverReason::SelfCollision);
        }

        self.snake.push_head(candidate);
        if !eats {
            self.snake.pop_tail();
            return TickOutcome::Moved;
        }

        self.score = self.score.saturating_add(self.config.food_reward);
        self.events.push(GameEvent::FoodEaten {
            cell: candidate,
            pixel: candidate.pixel_center(self.config.cell_pixel_size),
            score: self.score,
        });

        self.food = self.placer.place(&self.grid, &self.snake);

        let earned = SpeedLevel::for_score(self.score, &self.config);
        if earned > self.speed {
            self.speed = earned;
            self.announce_speed();
        }

        match self.food {
            Some(food) => {
                debug!(
                    "score {}, next food at ({}, {})",
                    self.score, food.cell.x, food.cell.y
                );
                TickOutcome::Ate
            }
            None => self.finish(GameOverReason::BoardFilled),
        }
    }

    fn announce_speed(&mut self) {
        let interval = self.tick_interval();
        debug!(
            "speed level {} ({} ms per tick)",
            self.speed.get(),
            interval.as_millis()
        );
        self.events.push(GameEvent::SpeedChanged {
            level: self.speed.get(),
            interval,
        });
    }

    fn finish(&mut self, reason: GameOverReason) -> TickOutcome {
        self.status = GameStatus::Over;
        self.over_reason = Some(reason);

        let new_high_score = self.score > self.high_score;
        self.new_high_score = new_high_score;
        if new_high_score {
            self.high_score = self.score;
            if let Err(e) = self.store.set(self.score) {
                warn!("could not save high score {}: {}", self.score, e);
            }
        }

        info!(
            "game over ({:?}) with score {}{}",
            reason,
            self.score,
            if new_high_score { ", new high score" } else { "" }
        );
        self.events.push(GameEvent::GameOver {
            reason,
            final_score: self.score,
            new_high_score,
        });
        TickOutcome::Over(reason)
    }

    /// Drain queued notifications
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<FoodItem> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction.current()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Why the last run ended, while the game is over
    pub fn over_reason(&self) -> Option<GameOverReason> {
        self.over_reason
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Whether the finished run beat the stored record; a tie does not count
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn speed_level(&self) -> u8 {
        self.speed.get()
    }

    pub fn tick_interval(&self) -> Duration {
        self.speed.interval(&self.config)
    }

    #[cfg(test)]
    pub(crate) fn place_snake(&mut self, cells: &[super::grid::Cell], direction: Direction) {
        self.snake = Snake::from_cells(cells).expect("non-empty snake");
        self.direction.force(direction);
    }

    #[cfg(test)]
    pub(crate) fn place_food(&mut self, cell: super::grid::Cell) {
        self.food = Some(FoodItem::new(cell, super::food::FoodVariant::Apple));
    }
}
