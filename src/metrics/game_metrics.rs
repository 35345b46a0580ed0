use std::time::Duration;

/// Session statistics shown in the header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameMetrics {
    /// Play time of the current game, pauses excluded
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub longest_snake: usize,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame of active play
    pub fn on_frame(&mut self, frame: Duration) {
        self.elapsed_time += frame;
    }

    pub fn on_game_start(&mut self) {
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32, final_length: usize) {
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
        self.longest_snake = self.longest_snake.max(final_length);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10, 14);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5, 20);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.longest_snake, 20);
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15, 3);
        assert_eq!(metrics.high_score, 15); // Should update
        assert_eq!(metrics.longest_snake, 20);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_frames_accumulate_until_restart() {
        let mut metrics = GameMetrics::new();
        for _ in 0..90 {
            metrics.on_frame(Duration::from_millis(33));
        }
        assert_eq!(metrics.format_time(), "00:02");

        metrics.on_game_start();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
    }
}
