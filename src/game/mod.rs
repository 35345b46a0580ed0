//! Core simulation for the snake game
//!
//! This module contains the board, snake and collision logic without any I/O
//! or rendering dependencies. The frame loop feeds it one [`InputAction`] per
//! frame and reads back [`Board::entities`] for drawing.

pub mod action;
pub mod board;
pub mod config;
pub mod entity;
pub mod geometry;
pub mod pivot;
pub mod snake;

// Re-export commonly used types
pub use action::{Direction, InputAction};
pub use board::{Board, BoardState, CollisionType, StepInfo};
pub use config::GameConfig;
pub use entity::{Entity, TextureHandle};
pub use geometry::{check_collision, Rect, Vec2};
pub use snake::Snake;
