//! Game controller - turns discrete input events into board operations
//!
//! One [`InputEvent`] in, one [`Response`] out. The response carries
//! everything a presentation layer reacts to: the piece view, the settled
//! grid when it changed, cleared rows, level-up and game-over signals.
//!
//! The controller never sleeps or schedules anything. Auto-fall is an
//! external timer sending [`EventType::Tick`]; `Response::fall_interval`
//! tells that timer how fast to run.

use std::fmt;
use std::time::Duration;

use blockfall_core::{drop_points, Board, ClearRow, EngineError, GameStats, Grid, ViewData};
use blockfall_types::{EventSource, EventType, InputEvent, INITIAL_LEVEL};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::EngineConfig;
use crate::speed::fall_interval;

/// Everything the host needs after one event
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Response {
    /// Active piece after the event
    pub view: ViewData,
    /// Row-clear outcome; only set when a piece landed
    pub clear_row: Option<ClearRow>,
    /// Settled grid; only set when it changed (landing or new game)
    pub background: Option<Grid>,
    /// The spawn after a landing ended the game
    pub game_over: bool,
    /// New level when this event crossed a level boundary
    pub level_up: Option<u32>,
    /// Line-clear bonus earned by a hard drop, for a score popup
    pub score_notification: Option<i64>,
    pub stats: GameStats,
    /// Auto-fall interval for the current level
    pub fall_interval: Duration,
}

/// Landing bookkeeping shared by soft drop, tick and hard drop
struct Landing {
    clear_row: ClearRow,
    game_over: bool,
    level_up: Option<u32>,
}

pub struct GameController<R: Rng = ChaCha8Rng> {
    board: Board<R>,
    config: EngineConfig,
    previous_level: u32,
}

impl GameController<ChaCha8Rng> {
    /// Build the board described by `config`
    pub fn from_config(config: EngineConfig) -> Result<Self, EngineError> {
        let board = match config.seed {
            Some(seed) => Board::with_seed(config.rows, config.cols, seed)?,
            None => Board::new(config.rows, config.cols)?,
        };
        Ok(Self::with_board(board, config))
    }

    /// Standard 25x10 board with a fixed seed
    pub fn with_seed(seed: u64) -> Result<Self, EngineError> {
        Self::from_config(EngineConfig {
            seed: Some(seed),
            ..EngineConfig::default()
        })
    }
}

impl<R: Rng> GameController<R> {
    pub fn with_board(board: Board<R>, config: EngineConfig) -> Self {
        let controller = Self {
            previous_level: board.level(),
            board,
            config,
        };
        controller.log(format_args!(
            "New session {}x{}, seed {}",
            controller.board.rows(),
            controller.board.cols(),
            controller
                .config
                .seed
                .map_or_else(|| "random".to_string(), |s| s.to_string())
        ));
        controller
    }

    pub fn board(&self) -> &Board<R> {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current piece view without handling an event
    pub fn view(&self) -> ViewData {
        self.board.view_data()
    }

    pub fn stats(&self) -> GameStats {
        self.board.stats()
    }

    pub fn fall_interval(&self) -> Duration {
        fall_interval(self.board.level())
    }

    pub fn handle(&mut self, event: InputEvent) -> Response {
        match event.kind {
            EventType::SoftDrop | EventType::Tick => self.on_down(event.source),
            EventType::MoveLeft => {
                self.board.move_brick_left();
                self.respond()
            }
            EventType::MoveRight => {
                self.board.move_brick_right();
                self.respond()
            }
            EventType::Rotate => {
                self.board.rotate_left_brick();
                self.respond()
            }
            EventType::HardDrop => self.on_hard_drop(),
            EventType::NewGame => self.on_new_game(),
        }
    }

    fn on_down(&mut self, source: EventSource) -> Response {
        if self.board.move_brick_down() {
            if source == EventSource::User {
                self.board.score_mut().add(drop_points(1, false));
            }
            return self.respond();
        }

        let landing = self.land();
        self.respond_landed(landing, None)
    }

    fn on_hard_drop(&mut self) -> Response {
        let mut distance = 0u32;
        while self.board.move_brick_down() {
            distance += 1;
        }
        self.board.score_mut().add(drop_points(distance, true));

        let landing = self.land();
        let notification = if landing.clear_row.lines_removed() > 0 {
            Some(landing.clear_row.score_bonus())
        } else {
            None
        };
        self.respond_landed(landing, notification)
    }

    fn on_new_game(&mut self) -> Response {
        self.board.new_game();
        self.previous_level = INITIAL_LEVEL;
        self.log(format_args!("New game"));

        let mut response = self.respond();
        response.background = Some(self.board.grid_snapshot());
        response
    }

    /// Merge, clear, score, check the level, then spawn the next piece
    fn land(&mut self) -> Landing {
        self.board.merge_brick_to_background();
        let clear_row = self.board.clear_rows();

        let mut level_up = None;
        if clear_row.lines_removed() > 0 {
            self.board.score_mut().add(clear_row.score_bonus());
            level_up = self.check_level_up();
        }

        let game_over = self.board.create_new_brick();
        if game_over {
            self.log(format_args!(
                "Game over: score {}, level {}, lines {}",
                self.board.score().value(),
                self.board.level(),
                self.board.total_lines_cleared()
            ));
        }

        Landing {
            clear_row,
            game_over,
            level_up,
        }
    }

    fn check_level_up(&mut self) -> Option<u32> {
        let level = self.board.level();
        if level == self.previous_level {
            return None;
        }
        self.previous_level = level;
        self.log(format_args!(
            "Level {} (fall interval {}ms)",
            level,
            fall_interval(level).as_millis()
        ));
        Some(level)
    }

    fn respond(&self) -> Response {
        Response {
            view: self.board.view_data(),
            clear_row: None,
            background: None,
            game_over: false,
            level_up: None,
            score_notification: None,
            stats: self.board.stats(),
            fall_interval: self.fall_interval(),
        }
    }

    fn respond_landed(&self, landing: Landing, score_notification: Option<i64>) -> Response {
        Response {
            clear_row: Some(landing.clear_row),
            background: Some(self.board.grid_snapshot()),
            game_over: landing.game_over,
            level_up: landing.level_up,
            score_notification,
            ..self.respond()
        }
    }

    fn log(&self, args: fmt::Arguments<'_>) {
        if self.config.log_events {
            println!("[Engine] {}", args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_types::{BOARD_COLS, BOARD_ROWS};

    fn controller() -> GameController {
        GameController::with_seed(2024).unwrap()
    }

    fn fill_row_except(grid: &mut Grid, row: i32, gaps: &[i32]) {
        for col in 0..grid.cols() as i32 {
            if !gaps.contains(&col) {
                grid.set(row, col, 1);
            }
        }
    }

    #[test]
    fn test_user_soft_drop_scores_one() {
        let mut c = controller();
        let r = c.handle(InputEvent::user(EventType::SoftDrop));
        assert_eq!(r.stats.score, 1);
        assert!(r.clear_row.is_none());
        assert!(r.background.is_none());
    }

    #[test]
    fn test_timer_tick_scores_nothing() {
        let mut c = controller();
        let r = c.handle(InputEvent::tick());
        assert_eq!(r.stats.score, 0);
        assert_eq!(r.view.y, 1);
    }

    #[test]
    fn test_hard_drop_scores_distance() {
        let mut c = controller();
        let ghost = c.view().ghost_y;
        let r = c.handle(InputEvent::user(EventType::HardDrop));
        assert_eq!(r.stats.score, i64::from(ghost) * 2);
        assert!(r.clear_row.is_some());
        assert!(r.background.is_some());
        assert!(r.score_notification.is_none());
        assert!(!r.game_over);
    }

    #[test]
    fn test_landing_spawns_next_piece() {
        let mut c = controller();
        let next = c.board().next_piece().map(|p| p.kind());
        c.handle(InputEvent::user(EventType::HardDrop));
        assert_eq!(Some(c.board().current_piece().kind()), next);
        assert_eq!(c.view().y, 0);
    }

    #[test]
    fn test_hard_drop_line_clear_bonus_counted_once() {
        let mut c = controller();
        let mut grid = Grid::new(BOARD_ROWS, BOARD_COLS).unwrap();
        // A full bottom row goes on the next landing wherever the piece stops
        fill_row_except(&mut grid, 24, &[]);
        c.board.replace_grid(grid).unwrap();

        let before = c.stats().score;
        let r = c.handle(InputEvent::user(EventType::HardDrop));
        let cleared = r.clear_row.unwrap();
        assert_eq!(cleared.lines_removed(), 1);
        assert_eq!(r.score_notification, Some(100));
        let ghost_distance = r.stats.score - before - 100;
        assert!(ghost_distance >= 0 && ghost_distance % 2 == 0);
    }

    #[test]
    fn test_new_game_resets() {
        let mut c = controller();
        c.handle(InputEvent::user(EventType::SoftDrop));
        c.handle(InputEvent::user(EventType::HardDrop));
        let r = c.handle(InputEvent::user(EventType::NewGame));
        assert_eq!(r.stats.score, 0);
        assert_eq!(r.stats.level, 1);
        assert!(r.background.as_ref().is_some_and(Grid::is_empty));
        assert_eq!(r.fall_interval, Duration::from_millis(400));
    }

    #[test]
    fn test_moves_return_fresh_view() {
        let mut c = controller();
        let start = c.view().x;
        let r = c.handle(InputEvent::user(EventType::MoveLeft));
        assert_eq!(r.view.x, start - 1);
        let r = c.handle(InputEvent::user(EventType::MoveRight));
        assert_eq!(r.view.x, start);
        let r = c.handle(InputEvent::user(EventType::Rotate));
        assert_eq!(r.view, c.view());
    }
}
