use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the game
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of one grid tile, in world units
    pub tile_size: f32,
    /// Width of the board, in tiles
    pub board_width: u32,
    /// Height of the board, in tiles
    pub board_height: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Motion
    /// Distance the snake covers per tick at the start of a game
    pub initial_speed: f32,
    /// Speed gained every time the snake grows
    pub speed_increment: f32,

    // Collision and level generation
    /// Fraction of the head box trimmed away for fatal collision tests
    pub collision_shrink_factor: f32,
    /// Rocks placed when the board is built
    pub rock_count: usize,
    /// Random samples tried before falling back to scanning for a free tile
    pub max_placement_attempts: usize,

    /// Simulation and render frames per second
    pub frame_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: 20.0,
            board_width: 40,
            board_height: 30,
            initial_snake_length: 4,
            initial_speed: 2.0,
            speed_increment: 0.1,
            collision_shrink_factor: 0.4,
            rock_count: 10,
            max_placement_attempts: 1000,
            frame_rate: 30,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            board_width: width,
            board_height: height,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Board extent in world units
    pub fn world_width(&self) -> f32 {
        self.board_width as f32 * self.tile_size
    }

    pub fn world_height(&self) -> f32 {
        self.board_height as f32 * self.tile_size
    }

    /// Tile the snake head starts on: the board center
    pub fn start_tile(&self) -> (u32, u32) {
        (self.board_width / 2, self.board_height / 2)
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.tile_size > 0.0) {
            return Err(format!("tile_size must be positive, got {}", self.tile_size));
        }

        if self.board_width == 0 || self.board_height == 0 {
            return Err(format!(
                "board must be at least 1x1 tiles, got {}x{}",
                self.board_width, self.board_height
            ));
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        // The body is laid out downward from the start tile.
        let (_, start_row) = self.start_tile();
        let rows_available = (self.board_height - start_row) as usize;
        if self.initial_snake_length > rows_available {
            return Err(format!(
                "initial_snake_length {} does not fit below the start row ({} rows available)",
                self.initial_snake_length, rows_available
            ));
        }

        if !(self.initial_speed > 0.0 && self.initial_speed < self.tile_size) {
            return Err(format!(
                "initial_speed must be in (0, tile_size), got {}",
                self.initial_speed
            ));
        }

        if !(self.speed_increment >= 0.0) {
            return Err(format!(
                "speed_increment must be non-negative, got {}",
                self.speed_increment
            ));
        }

        if !(0.0..1.0).contains(&self.collision_shrink_factor) {
            return Err(format!(
                "collision_shrink_factor must be in [0, 1), got {}",
                self.collision_shrink_factor
            ));
        }

        if self.max_placement_attempts == 0 {
            return Err("max_placement_attempts must be at least 1".to_string());
        }

        if self.frame_rate == 0 {
            return Err("frame_rate must be at least 1".to_string());
        }

        Ok(())
    }
}
