//! Level tunables and screen configuration
//!
//! Durations are given in milliseconds and converted to frames with
//! [`frames_from_millis`](crate::cooldown::frames_from_millis) against the
//! configured frame rate.

use crate::cooldown::frames_from_millis;

/// Per-level tunables, immutable for the lifetime of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    /// Columns in the enemy formation
    pub formation_width: usize,
    /// Rows in the enemy formation
    pub formation_height: usize,
    /// Frames between formation steps when the formation is intact
    pub base_speed: u32,
    /// Average time between enemy shots
    pub shooting_interval_ms: u32,
}

impl GameSettings {
    pub const fn new(
        formation_width: usize,
        formation_height: usize,
        base_speed: u32,
        shooting_interval_ms: u32,
    ) -> Self {
        Self {
            formation_width,
            formation_height,
            base_speed,
            shooting_interval_ms,
        }
    }

    pub fn ship_count(&self) -> usize {
        self.formation_width * self.formation_height
    }
}

const LEVELS: [GameSettings; 7] = [
    GameSettings::new(5, 4, 60, 2000),
    GameSettings::new(5, 5, 50, 2500),
    GameSettings::new(6, 5, 40, 1500),
    GameSettings::new(6, 6, 30, 1500),
    GameSettings::new(6, 7, 20, 1000),
    GameSettings::new(7, 7, 10, 1000),
    GameSettings::new(8, 7, 2, 500),
];

/// Settings for every level of a standard game, first level first
pub fn level_table() -> Vec<GameSettings> {
    LEVELS.to_vec()
}

/// Playfield geometry and timing shared by every level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    pub width: i32,
    pub height: i32,
    pub fps: u32,
    pub max_lives: u32,
    /// Nothing moves for this long after a level starts
    pub start_delay_ms: u32,
    /// How long the player ship stays wrecked (and immune) after a hit
    pub ship_destruction_ms: u32,
    /// Time between the level finishing and the screen closing
    pub finish_delay_ms: u32,
    pub enemy_explosion_ms: u32,
    pub special_ship_interval_ms: u32,
    pub special_ship_variance_ms: u32,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 448,
            height: 520,
            fps: 60,
            max_lives: 3,
            start_delay_ms: 6000,
            ship_destruction_ms: 1000,
            finish_delay_ms: 1500,
            enemy_explosion_ms: 500,
            special_ship_interval_ms: 20000,
            special_ship_variance_ms: 10000,
            seed: None,
        }
    }
}

impl ScreenConfig {
    pub fn frames(&self, ms: u32) -> u32 {
        frames_from_millis(ms, self.fps)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
