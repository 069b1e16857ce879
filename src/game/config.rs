use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed gameplay rules for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,

    /// Tick interval at game start
    pub base_interval: Duration,
    /// Hard floor for the tick interval
    pub min_interval: Duration,
    /// Permanent interval reduction applied every escalation period
    pub escalation_step: Duration,
    /// Elapsed-time period between permanent escalations
    pub escalation_period_secs: u64,

    /// Elapsed-time period between special-food spawns
    pub special_spawn_period_secs: u64,
    /// How long a special food stays on the board before expiring
    pub special_dwell: Duration,
    /// Temporary interval reduction on special-food pickup
    pub boost_step: Duration,
    /// How long the boost lasts before reverting
    pub boost_duration: Duration,

    /// Points for regular food, before the multiplier
    pub regular_points: u32,
    /// Points for special food, before the multiplier
    pub special_points: u32,
    /// Combo count at which the multiplier kicks in
    pub combo_threshold: u32,
    /// Multiplier applied once the combo threshold is reached
    pub combo_multiplier: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 15,
            base_interval: Duration::from_millis(200),
            min_interval: Duration::from_millis(80),
            escalation_step: Duration::from_millis(20),
            escalation_period_secs: 30,
            special_spawn_period_secs: 10,
            special_dwell: Duration::from_secs(5),
            boost_step: Duration::from_millis(40),
            boost_duration: Duration::from_secs(5),
            regular_points: 10,
            special_points: 50,
            combo_threshold: 3,
            combo_multiplier: 2,
        }
    }
}

impl GameConfig {
    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            grid_width: 10,
            grid_height: 10,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.base_interval, Duration::from_millis(200));
        assert_eq!(config.min_interval, Duration::from_millis(80));
    }

    #[test]
    fn test_small_config() {
        let config = GameConfig::small();
        assert_eq!(config.grid_width, 10);
        assert_eq!(config.grid_height, 10);
    }
}
