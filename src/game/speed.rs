use std::time::Duration;

use super::config::GameConfig;

/// Speed level, always within `[1, max_level]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    pub const MIN: SpeedLevel = SpeedLevel(1);

    /// Clamp a raw level into `[1, max_level]`
    pub fn clamped(level: u32, config: &GameConfig) -> Self {
        let max = u32::from(config.max_level.max(1));
        SpeedLevel(level.clamp(1, max) as u8)
    }

    /// Level earned by a score: `clamp(score / score_per_level + 1, 1, max_level)`
    pub fn for_score(score: u32, config: &GameConfig) -> Self {
        let step = config.score_per_level.max(1);
        Self::clamped((score / step).saturating_add(1), config)
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// `max(min_interval, base_interval - (level - 1) * step)`
    pub fn interval(&self, config: &GameConfig) -> Duration {
        let reduction = u64::from(self.0 - 1) * config.interval_step_ms;
        let ms = config
            .base_interval_ms
            .saturating_sub(reduction)
            .max(config.min_interval_ms);
        Duration::from_millis(ms)
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        Self::MIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_score() {
        let config = GameConfig::default();
        assert_eq!(SpeedLevel::for_score(0, &config).get(), 1);
        assert_eq!(SpeedLevel::for_score(40, &config).get(), 1);
        assert_eq!(SpeedLevel::for_score(50, &config).get(), 2);
        assert_eq!(SpeedLevel::for_score(130, &config).get(), 3);
        assert_eq!(SpeedLevel::for_score(450, &config).get(), 10);
        assert_eq!(SpeedLevel::for_score(10_000, &config).get(), 10);
        assert_eq!(SpeedLevel::for_score(u32::MAX, &config).get(), 10);
    }

    #[test]
    fn test_level_is_monotonic_in_score() {
        let config = GameConfig::default();
        let mut previous = SpeedLevel::MIN;
        for score in (0..1000).step_by(10) {
            let level = SpeedLevel::for_score(score, &config);
            let expected = (score / 50 + 1).clamp(1, 10) as u8;
            assert_eq!(level.get(), expected);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_interval_formula() {
        let config = GameConfig::default();
        let ms = |level: u32| SpeedLevel::clamped(level, &config).interval(&config).as_millis();

        assert_eq!(ms(1), 150);
        assert_eq!(ms(2), 135);
        assert_eq!(ms(5), 90);
        assert_eq!(ms(7), 60);
        // 150 - 7 * 15 = 45, floored
        assert_eq!(ms(8), 50);
        assert_eq!(ms(10), 50);
    }

    #[test]
    fn test_clamping() {
        let config = GameConfig::default();
        assert_eq!(SpeedLevel::clamped(0, &config).get(), 1);
        assert_eq!(SpeedLevel::clamped(42, &config).get(), 10);
    }
}
