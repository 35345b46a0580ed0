use anyhow::{anyhow, bail, Context, Result};
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{
    action::InputAction,
    config::GameConfig,
    entity::{Entity, TextureHandle},
    geometry::{check_collision, Rect, Vec2},
    snake::Snake,
};
use crate::assets::{TextureCache, FRUIT_SHEET, ROCK_SHEET, SNAKE_SHEET};

/// Lifecycle of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardState {
    Playing,
    Paused,
    GameOver,
}

/// What ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head ran into its own body
    SelfCollision,
    /// Head ran into a rock
    Rock,
    /// Head left the board
    Border,
}

/// Information about an update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate a fruit this tick
    pub ate_fruit: bool,
    /// Fatal collision, if one occurred
    pub collision: Option<CollisionType>,
    /// No free tile was left for the replacement fruit
    pub board_full: bool,
}

/// The playing field: one snake, its fruit and the rocks
pub struct Board {
    config: GameConfig,
    state: BoardState,
    snake: Snake,
    fruits: Vec<Entity>,
    rocks: Vec<Entity>,
    fruit_texture: Option<TextureHandle>,
    rng: StdRng,
    score: u32,
    ticks: u32,
}

impl Board {
    /// Build a board with a randomly seeded generator
    pub fn new(config: GameConfig, textures: &mut TextureCache) -> Result<Self> {
        Self::with_rng(config, textures, StdRng::from_entropy())
    }

    /// Build a board whose fruit and rock placement is reproducible
    pub fn with_seed(config: GameConfig, textures: &mut TextureCache, seed: u64) -> Result<Self> {
        Self::with_rng(config, textures, StdRng::seed_from_u64(seed))
    }

    /// Lay out the snake, spawn the first fruit, then place the rocks around
    /// both.
    pub fn with_rng(config: GameConfig, textures: &mut TextureCache, rng: StdRng) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow!(e))
            .context("Invalid game configuration")?;

        let (start_col, start_row) = config.start_tile();
        let start = tile_origin(&config, start_col, start_row);
        let snake = Snake::new(&config, start, textures.get(SNAKE_SHEET));
        let rock_texture = textures.get(ROCK_SHEET);

        let mut board = Self {
            fruit_texture: textures.get(FRUIT_SHEET),
            state: BoardState::Playing,
            snake,
            fruits: Vec::new(),
            rocks: Vec::new(),
            rng,
            score: 0,
            ticks: 0,
            config,
        };

        board
            .spawn_fruit()
            .context("Failed to place the initial fruit")?;
        board.place_rocks(rock_texture)?;

        info!(
            "New board {}x{} with {} rocks",
            board.config.board_width,
            board.config.board_height,
            board.rocks.len()
        );

        Ok(board)
    }

    /// Run one simulation tick: steer, move, then resolve collisions.
    ///
    /// Does nothing unless the board is `Playing`.
    pub fn update(&mut self, action: InputAction) -> StepInfo {
        if self.state != BoardState::Playing {
            return StepInfo::default();
        }

        match action {
            InputAction::TurnLeft => {
                self.snake.turn_left();
            }
            InputAction::TurnRight => {
                self.snake.turn_right();
            }
            InputAction::Forward
            | InputAction::Backward
            | InputAction::Exit
            | InputAction::None => {}
        }

        self.snake.advance();
        self.ticks += 1;

        self.handle_collisions()
    }

    /// Fruit first, so a fruit lying on a fatal spot is still eaten; then
    /// self, rocks and the border.
    fn handle_collisions(&mut self) -> StepInfo {
        let mut step = StepInfo::default();

        let Some(head) = self.snake.head().map(Entity::bounds) else {
            return step;
        };

        let eaten: Vec<usize> = self
            .fruits
            .iter()
            .enumerate()
            .filter(|(_, fruit)| check_collision(&head, &fruit.bounds()))
            .map(|(index, _)| index)
            .collect();

        for index in eaten.into_iter().rev() {
            self.snake.grow();
            self.fruits.remove(index);
            self.score += 1;
            step.ate_fruit = true;
            debug!("Fruit eaten, length {}", self.snake.len());

            if let Err(err) = self.spawn_fruit() {
                error!("{err:#}");
                self.state = BoardState::GameOver;
                step.board_full = true;
                return step;
            }
        }

        let shrunk = head.shrunk(self.config.collision_shrink_factor);

        // head and neck always touch the head box while turning
        let bit_itself = self
            .snake
            .entities()
            .iter()
            .skip(2)
            .any(|segment| check_collision(&shrunk, &segment.bounds()));
        if bit_itself {
            return self.game_over(step, CollisionType::SelfCollision);
        }

        let tile = self.config.tile_size;
        let hit_rock = self
            .rocks
            .iter()
            .filter(|rock| {
                (rock.position.x - head.position.x).abs() <= tile
                    && (rock.position.y - head.position.y).abs() <= tile
            })
            .any(|rock| check_collision(&shrunk, &rock.bounds()));
        if hit_rock {
            return self.game_over(step, CollisionType::Rock);
        }

        let position = head.position;
        if position.x < 0.0
            || position.y < 0.0
            || position.x > self.config.world_width()
            || position.y > self.config.world_height()
        {
            return self.game_over(step, CollisionType::Border);
        }

        step
    }

    fn game_over(&mut self, mut step: StepInfo, cause: CollisionType) -> StepInfo {
        self.state = BoardState::GameOver;
        step.collision = Some(cause);
        info!(
            "Game over after {} ticks: {:?}, score {}",
            self.ticks, cause, self.score
        );
        step
    }

    /// Put a fruit on a random tile that no entity overlaps
    fn spawn_fruit(&mut self) -> Result<()> {
        let Some(index) = self.sample_tile("fruit", |board, index| board.tile_is_free(index))
        else {
            bail!("No free tile left for a fruit");
        };

        let fruit = Entity::tile(
            self.tile_position(index),
            self.config.tile_size,
            self.fruit_texture,
        );
        self.fruits.push(fruit);

        Ok(())
    }

    /// Place `rock_count` rocks so that no two 3x3 blocks around them
    /// overlap, starting from the tiles covered by the snake and fruit.
    fn place_rocks(&mut self, texture: Option<TextureHandle>) -> Result<()> {
        let width = self.config.board_width as usize;
        let height = self.config.board_height as usize;
        let mut occupied = vec![false; width * height];

        for entity in self.entities() {
            for index in self.covered_tiles(&entity.bounds()) {
                occupied[index] = true;
            }
        }

        let count = self.config.rock_count;
        for placed in 0..count {
            let index = self
                .sample_tile("rock", |_, index| {
                    block_around(index, width, height).all(|cell| !occupied[cell])
                })
                .ok_or_else(|| {
                    anyhow!(
                        "Could not place rock {} of {}: board too dense",
                        placed + 1,
                        count
                    )
                })?;

            for cell in block_around(index, width, height) {
                occupied[cell] = true;
            }

            let rock = Entity::tile(self.tile_position(index), self.config.tile_size, texture);
            self.rocks.push(rock);
        }

        Ok(())
    }

    /// Rejection-sample a tile index accepted by `is_free`. Falls back to
    /// scanning every tile once the attempt budget is spent.
    fn sample_tile<F>(&mut self, what: &str, is_free: F) -> Option<usize>
    where
        F: Fn(&Self, usize) -> bool,
    {
        let tile_count = self.tile_count();

        for _ in 0..self.config.max_placement_attempts {
            let index = self.rng.gen_range(0..tile_count);
            if is_free(self, index) {
                return Some(index);
            }
        }

        warn!(
            "No free tile for a {} after {} samples, scanning the board",
            what, self.config.max_placement_attempts
        );

        let candidates: Vec<usize> = (0..tile_count).filter(|&i| is_free(self, i)).collect();
        candidates.choose(&mut self.rng).copied()
    }

    fn tile_is_free(&self, index: usize) -> bool {
        let tile = Rect::new(self.tile_position(index), Vec2::splat(self.config.tile_size));

        !self
            .entities()
            .iter()
            .any(|entity| check_collision(&tile, &entity.bounds()))
    }

    /// Indices of the tiles whose interior `rect` overlaps
    fn covered_tiles(&self, rect: &Rect) -> Vec<usize> {
        let tile = self.config.tile_size;
        let width = self.config.board_width as i64;
        let height = self.config.board_height as i64;

        let first_col = ((rect.position.x / tile).floor() as i64).max(0);
        let last_col = (((rect.position.x + rect.size.x) / tile).ceil() as i64 - 1).min(width - 1);
        let first_row = ((rect.position.y / tile).floor() as i64).max(0);
        let last_row = (((rect.position.y + rect.size.y) / tile).ceil() as i64 - 1).min(height - 1);

        let mut tiles = Vec::new();
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                tiles.push((row * width + col) as usize);
            }
        }
        tiles
    }

    fn tile_count(&self) -> usize {
        self.config.board_width as usize * self.config.board_height as usize
    }

    fn tile_position(&self, index: usize) -> Vec2 {
        let width = self.config.board_width as usize;
        tile_origin(&self.config, (index % width) as u32, (index / width) as u32)
    }

    pub fn pause(&mut self) -> bool {
        if self.state == BoardState::Playing {
            self.state = BoardState::Paused;
            true
        } else {
            false
        }
    }

    pub fn resume(&mut self) -> bool {
        if self.state == BoardState::Paused {
            self.state = BoardState::Playing;
            true
        } else {
            false
        }
    }

    pub fn toggle_pause(&mut self) {
        if !self.pause() {
            self.resume();
        }
    }

    /// Everything to draw: snake (head first), then fruits, then rocks
    pub fn entities(&self) -> Vec<&Entity> {
        let mut entities = self.snake.entities();
        entities.reserve(self.fruits.len() + self.rocks.len());
        entities.extend(self.fruits.iter());
        entities.extend(self.rocks.iter());
        entities
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruits(&self) -> &[Entity] {
        &self.fruits
    }

    pub fn rocks(&self) -> &[Entity] {
        &self.rocks
    }

    /// Fruits eaten so far
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn width(&self) -> u32 {
        self.config.board_width
    }

    pub fn height(&self) -> u32 {
        self.config.board_height
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

/// World position of the top-left corner of tile (`col`, `row`)
pub fn tile_origin(config: &GameConfig, col: u32, row: u32) -> Vec2 {
    Vec2::new(col as f32 * config.tile_size, row as f32 * config.tile_size)
}

/// The 3x3 block centered on `index`, clipped to the board
fn block_around(index: usize, width: usize, height: usize) -> impl Iterator<Item = usize> {
    let col = index % width;
    let row = index / width;

    let cols = col.saturating_sub(1)..=(col + 1).min(width - 1);
    let rows = row.saturating_sub(1)..=(row + 1).min(height - 1);

    rows.flat_map(move |r| cols.clone().map(move |c| r * width + c))
}
