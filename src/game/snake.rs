//! Continuous-motion snake.
//!
//! Segments move every tick by `speed` along their own facing. A turn drops a
//! pivot at the head's position; trailing segments keep moving straight until
//! they reach it, snap onto it, and carry the leftover distance into the new
//! facing. That keeps every segment on the exact path the head took.

use log::debug;

use super::action::Direction;
use super::config::GameConfig;
use super::entity::{Entity, TextureHandle, SPRITE_BODY, SPRITE_HEAD};
use super::geometry::Vec2;
use super::pivot::{PivotArena, PivotId};

/// Rotation applied to the head sprite, whose art faces right
const HEAD_ROTATION_OFFSET: f32 = -90.0;

#[derive(Debug, Clone)]
struct Segment {
    entity: Entity,
    next_pivot: Option<PivotId>,
}

/// The snake in the game
#[derive(Debug, Clone)]
pub struct Snake {
    /// Body segments, with head at index 0
    segments: Vec<Segment>,
    pivots: PivotArena,
    speed: f32,
    distance_since_last_turn: f32,
    tile_size: f32,
    speed_increment: f32,
}

impl Snake {
    /// Lay out `config.initial_snake_length` contiguous tiles facing up, head
    /// at `start` and the body extending downward.
    pub fn new(config: &GameConfig, start: Vec2, texture: Option<TextureHandle>) -> Self {
        let tile_size = config.tile_size;

        let segments = (0..config.initial_snake_length)
            .map(|i| {
                let mut entity = Entity::tile(
                    Vec2::new(start.x, start.y + i as f32 * tile_size),
                    tile_size,
                    texture,
                );

                if i == 0 {
                    entity.sprite_index = SPRITE_HEAD;
                    entity.rotation_offset_degrees = HEAD_ROTATION_OFFSET;
                } else {
                    entity.sprite_index = SPRITE_BODY;
                }

                Segment {
                    entity,
                    next_pivot: None,
                }
            })
            .collect();

        Self {
            segments,
            pivots: PivotArena::new(),
            speed: config.initial_speed,
            distance_since_last_turn: 0.0,
            tile_size,
            speed_increment: config.speed_increment,
        }
    }

    pub fn turn_left(&mut self) -> bool {
        match self.head() {
            Some(head) => self.turn(head.direction.turned_left()),
            None => false,
        }
    }

    pub fn turn_right(&mut self) -> bool {
        match self.head() {
            Some(head) => self.turn(head.direction.turned_right()),
            None => false,
        }
    }

    /// Point the head in `direction` and record a pivot for the body.
    ///
    /// Rejected (returns false) while the head is still within one tile of
    /// the previous turn, or when it already faces `direction`.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.distance_since_last_turn < self.tile_size {
            return false;
        }

        let Some(head) = self.segments.first_mut() else {
            return false;
        };

        if head.entity.direction == direction {
            return false;
        }

        self.distance_since_last_turn = 0.0;
        head.entity.direction = direction;
        let position = head.entity.position;

        let pivot = self.pivots.insert(position, direction);

        for segment in self.segments.iter_mut().skip(1) {
            match segment.next_pivot {
                None => {
                    segment.next_pivot = Some(pivot);
                    self.pivots.retain(pivot);
                }
                Some(pending) => {
                    self.pivots.append(pending, pivot);
                    break;
                }
            }
        }

        // drop the creation reference; frees it again for a lone head
        self.pivots.release(pivot);

        debug!("Snake turned {:?} at ({}, {})", direction, position.x, position.y);
        true
    }

    /// Append a segment one tile behind the tail and speed up.
    pub fn grow(&mut self) {
        let Some(tail) = self.segments.last() else {
            return;
        };

        let mut entity = tail.entity.clone();
        entity.position = tail.entity.position - tail.entity.direction.unit() * self.tile_size;
        entity.sprite_index = SPRITE_BODY;
        entity.rotation_offset_degrees = 0.0;

        let next_pivot = tail.next_pivot;
        if let Some(pivot) = next_pivot {
            self.pivots.retain(pivot);
        }

        self.segments.push(Segment { entity, next_pivot });
        self.speed += self.speed_increment;
    }

    /// Move every segment `speed` units along the path.
    pub fn advance(&mut self) {
        let speed = self.speed;
        self.distance_since_last_turn += speed;

        for segment in &mut self.segments {
            let Some(pivot_id) = segment.next_pivot else {
                segment.entity.advance(speed);
                continue;
            };

            let Some(pivot) = self.pivots.get(pivot_id).cloned() else {
                segment.next_pivot = None;
                segment.entity.advance(speed);
                continue;
            };

            let distance = distance_to(&segment.entity, pivot.position);

            if distance > speed {
                segment.entity.advance(speed);
            } else {
                segment.entity.position = pivot.position;
                segment.entity.direction = pivot.direction;
                segment.entity.advance(speed - distance);

                if let Some(next) = pivot.next {
                    self.pivots.retain(next);
                }
                self.pivots.release(pivot_id);
                segment.next_pivot = pivot.next;
            }
        }
    }

    /// Read-only views of the segments, head first
    pub fn entities(&self) -> Vec<&Entity> {
        self.segments.iter().map(|segment| &segment.entity).collect()
    }

    pub fn head(&self) -> Option<&Entity> {
        self.segments.first().map(|segment| &segment.entity)
    }

    pub fn tail(&self) -> Option<&Entity> {
        self.segments.last().map(|segment| &segment.entity)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn distance_since_last_turn(&self) -> f32 {
        self.distance_since_last_turn
    }

    /// Pivots some segment has not passed yet
    pub fn live_pivots(&self) -> usize {
        self.pivots.live()
    }
}

/// Signed distance from `entity` to `target` along the entity's facing;
/// positive while approaching.
fn distance_to(entity: &Entity, target: Vec2) -> f32 {
    let position = entity.position;

    match entity.direction {
        Direction::Up => position.y - target.y,
        Direction::Right => target.x - position.x,
        Direction::Down => target.y - position.y,
        Direction::Left => position.x - target.x,
    }
}
