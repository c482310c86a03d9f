use std::time::{Duration, Instant};

use crate::game::GameEvent;

/// Per-session play statistics shown alongside the board
pub struct GameMetrics {
    /// Start of the current unpaused stretch of play
    running_since: Option<Instant>,
    /// Play time banked from earlier stretches of this run
    banked: Duration,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            running_since: None,
            banked: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
        }
    }

    /// Refresh `elapsed_time`
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    fn update_at(&mut self, now: Instant) {
        self.elapsed_time = self.banked
            + self
                .running_since
                .map(|since| now.saturating_duration_since(since))
                .unwrap_or_default();
    }

    pub fn observe(&mut self, event: &GameEvent) {
        self.observe_at(event, Instant::now());
    }

    fn observe_at(&mut self, event: &GameEvent, now: Instant) {
        match event {
            GameEvent::Started => {
                self.banked = Duration::ZERO;
                self.running_since = Some(now);
            }
            GameEvent::Resumed => {
                self.running_since = Some(now);
            }
            GameEvent::Paused => self.bank(now),
            GameEvent::GameOver { final_score, .. } => {
                self.bank(now);
                self.games_played += 1;
                self.best_score = self.best_score.max(*final_score);
            }
            GameEvent::Reset => {
                self.running_since = None;
                self.banked = Duration::ZERO;
            }
            GameEvent::DirectionChanged(_)
            | GameEvent::FoodEaten { .. }
            | GameEvent::SpeedChanged { .. } => {}
        }
        self.update_at(now);
    }

    fn bank(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.banked += now.saturating_duration_since(since);
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameOverReason;

    fn game_over(score: u32) -> GameEvent {
        GameEvent::GameOver {
            reason: GameOverReason::Wall,
            final_score: score,
            new_high_score: false,
        }
    }

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_paused_time_not_counted() {
        let mut metrics = GameMetrics::new();
        let t0 = Instant::now();

        metrics.observe_at(&GameEvent::Started, t0);
        metrics.observe_at(&GameEvent::Paused, t0 + Duration::from_secs(10));
        metrics.update_at(t0 + Duration::from_secs(100));
        assert_eq!(metrics.elapsed_time, Duration::from_secs(10));

        metrics.observe_at(&GameEvent::Resumed, t0 + Duration::from_secs(100));
        metrics.update_at(t0 + Duration::from_secs(105));
        assert_eq!(metrics.elapsed_time, Duration::from_secs(15));

        metrics.observe_at(&game_over(30), t0 + Duration::from_secs(107));
        metrics.update_at(t0 + Duration::from_secs(200));
        assert_eq!(metrics.elapsed_time, Duration::from_secs(17));
    }

    #[test]
    fn test_best_score_tracking() {
        let mut metrics = GameMetrics::new();
        let t0 = Instant::now();

        metrics.observe_at(&game_over(10), t0);
        assert_eq!(metrics.best_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.observe_at(&game_over(5), t0);
        assert_eq!(metrics.best_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.observe_at(&game_over(15), t0);
        assert_eq!(metrics.best_score, 15); // Should update
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_reset_clears_time() {
        let mut metrics = GameMetrics::new();
        let t0 = Instant::now();

        metrics.observe_at(&GameEvent::Started, t0);
        metrics.update_at(t0 + Duration::from_secs(4));
        assert_eq!(metrics.elapsed_time, Duration::from_secs(4));

        metrics.observe_at(&GameEvent::Reset, t0 + Duration::from_secs(5));
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
    }
}
