use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stdout, stdout};
use std::time::Duration;
use tokio::time::interval;

use crate::audio::{AudioCue, Cue};
use crate::game::{GameClock, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Interactive play in the terminal.
///
/// Everything runs on one task: key events, the tick deadline and the
/// render timer are multiplexed with `select!`, so input is always handled
/// between ticks.
pub struct HumanMode {
    engine: GameEngine,
    clock: GameClock,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: Box<dyn AudioCue>,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(engine: GameEngine, audio: Box<dyn AudioCue>) -> Self {
        Self {
            engine,
            clock: GameClock::new(),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            audio,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal; stderr stays free for log output
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "leaving after {} games, high score {}",
            self.metrics.games_played,
            self.engine.high_score()
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Redraw the clock display at 30 FPS even when nothing moves
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = self.clock.wait() => {
                    self.on_tick();
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            terminal
                .draw(|frame| {
                    self.renderer.render(frame, &self.engine, &self.metrics);
                })
                .context("Failed to draw frame")?;
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Game(command) => {
                    self.engine.handle(command);
                    self.clock.sync(self.engine.is_running());
                    self.dispatch_events();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn on_tick(&mut self) {
        self.engine.tick();
        self.clock
            .after_tick(self.engine.is_running(), self.engine.tick_interval());
        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        for event in self.engine.take_events() {
            self.metrics.observe(&event);
            if let Some(cue) = Cue::for_event(&event) {
                self.audio.play(cue);
            }
        }
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, FoodPlacer, GameConfig, GameStatus};
    use crate::storage::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingAudio {
        cues: Arc<Mutex<Vec<Cue>>>,
    }

    impl AudioCue for RecordingAudio {
        fn play(&mut self, cue: Cue) {
            self.cues.lock().unwrap().push(cue);
        }
    }

    fn mode() -> (HumanMode, RecordingAudio) {
        let engine = GameEngine::with_placer(
            GameConfig::default(),
            Box::new(MemoryStore::default()),
            FoodPlacer::seeded(8),
        );
        let audio = RecordingAudio::default();
        (HumanMode::new(engine, Box::new(audio.clone())), audio)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_initialization() {
        let (mode, _) = mode();
        assert_eq!(mode.engine.status(), GameStatus::Idle);
        assert_eq!(mode.engine.score(), 0);
        assert!(!mode.clock.is_scheduled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_space_starts_and_schedules_tick() {
        let (mut mode, audio) = mode();
        mode.handle_event(key(KeyCode::Char(' ')));

        assert_eq!(mode.engine.status(), GameStatus::Running);
        assert!(mode.clock.is_scheduled());
        assert_eq!(*audio.cues.lock().unwrap(), vec![Cue::Start]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_cancels_pending_tick() {
        let (mut mode, _) = mode();
        mode.handle_event(key(KeyCode::Char(' ')));
        mode.handle_event(key(KeyCode::Char(' ')));

        assert_eq!(mode.engine.status(), GameStatus::Paused);
        assert!(!mode.clock.is_scheduled());

        mode.handle_event(key(KeyCode::Char('p')));
        assert_eq!(mode.engine.status(), GameStatus::Running);
        assert!(mode.clock.is_scheduled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_moves_and_reschedules() {
        let (mut mode, audio) = mode();
        mode.handle_event(key(KeyCode::Enter));
        let head = mode.engine.snake().head();

        mode.clock.wait().await;
        mode.on_tick();

        assert_ne!(mode.engine.snake().head(), head);
        assert!(mode.clock.is_scheduled());
        let before = tokio::time::Instant::now();
        mode.clock.wait().await;
        assert_eq!(before.elapsed(), mode.engine.tick_interval());

        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.engine.direction(), Direction::Up);
        let cues = audio.cues.lock().unwrap();
        assert_eq!(cues.first(), Some(&Cue::Start));
        assert_eq!(cues.last(), Some(&Cue::Move));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_returns_to_idle() {
        let (mut mode, _) = mode();
        mode.handle_event(key(KeyCode::Char(' ')));
        mode.on_tick();
        mode.handle_event(key(KeyCode::Char('r')));

        assert_eq!(mode.engine.status(), GameStatus::Idle);
        assert_eq!(mode.engine.score(), 0);
        assert!(!mode.clock.is_scheduled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_key_release_ignored() {
        let (mut mode, _) = mode();
        let release =
            KeyEvent::new_with_kind(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Release);
        mode.handle_event(Event::Key(release));
        assert_eq!(mode.engine.status(), GameStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_key() {
        let (mut mode, _) = mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
