pub mod textures;

pub use textures::{Sprite, SpriteSheet, TextureCache, FRUIT_SHEET, ROCK_SHEET, SNAKE_SHEET};
