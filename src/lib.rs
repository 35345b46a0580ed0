//! snek - terminal snake with continuous motion
//!
//! - `game`: board simulation (snake, pivots, fruit, rocks, collisions)
//! - `assets`: sprite sheets and the texture cache
//! - `screen`: menu and board layers
//! - `input`, `render`, `metrics`: terminal front end
//! - `modes`: the interactive frame loop

pub mod assets;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod screen;
