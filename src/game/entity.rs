use super::action::Direction;
use super::geometry::{Rect, Vec2};

/// Opaque reference to a loaded texture.
///
/// Handed out by [`crate::assets::TextureCache`]; the simulation only stores
/// and copies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) usize);

/// Sprite index of the snake head in the snake sheet
pub const SPRITE_HEAD: u32 = 0;
/// Sprite index of a body segment in the snake sheet
pub const SPRITE_BODY: u32 = 1;

/// Anything drawn on the board: snake segments, fruits and rocks
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Top-left corner, in world units
    pub position: Vec2,
    pub size: Vec2,
    pub direction: Direction,
    pub sprite_index: u32,
    /// Added to the facing when picking how to rotate the sprite
    pub rotation_offset_degrees: f32,
    pub texture: Option<TextureHandle>,
}

impl Entity {
    /// A one-tile entity facing up
    pub fn tile(position: Vec2, tile_size: f32, texture: Option<TextureHandle>) -> Self {
        Self {
            position,
            size: Vec2::splat(tile_size),
            direction: Direction::Up,
            sprite_index: 0,
            rotation_offset_degrees: 0.0,
            texture,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Final sprite rotation, normalized to `[0, 360)`
    pub fn rotation_degrees(&self) -> f32 {
        (self.direction.degrees() + self.rotation_offset_degrees).rem_euclid(360.0)
    }

    /// Translate along the current facing
    pub fn advance(&mut self, distance: f32) {
        self.position += self.direction.unit() * distance;
    }
}
