use serde::{Deserialize, Serialize};

use super::geometry::Vec2;

/// Facing of an entity, in clockwise order.
///
/// The discriminants are the ordinals used for turning: consecutive values are
/// 90 degree rotations, so a left turn is `-1 mod 4` and a right turn `+1 mod 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Wraps any ordinal into `0..4`.
    pub fn from_ordinal(ordinal: u8) -> Self {
        Self::ALL[(ordinal % 4) as usize]
    }

    pub fn turned_left(self) -> Self {
        Self::from_ordinal(self.ordinal() + 3)
    }

    pub fn turned_right(self) -> Self {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Unit step in world coordinates (y grows downward)
    pub fn unit(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    /// Clockwise rotation from `Up`, in degrees
    pub fn degrees(&self) -> f32 {
        f32::from(self.ordinal()) * 90.0
    }
}

/// Action delivered to the active layer once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputAction {
    TurnLeft,
    TurnRight,
    Forward,
    Backward,
    Exit,
    #[default]
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turning_wraps_around() {
        assert_eq!(Direction::Up.turned_left(), Direction::Left);
        assert_eq!(Direction::Left.turned_right(), Direction::Up);
        assert_eq!(Direction::Right.turned_right(), Direction::Down);
        assert_eq!(Direction::Down.turned_left(), Direction::Right);

        for direction in Direction::ALL {
            assert_eq!(direction.turned_left().turned_right(), direction);
            assert_eq!(
                direction.turned_right().turned_right().turned_right().turned_right(),
                direction
            );
        }
    }

    #[test]
    fn test_direction_unit() {
        assert_eq!(Direction::Up.unit(), Vec2::new(0.0, -1.0));
        assert_eq!(Direction::Down.unit(), Vec2::new(0.0, 1.0));
        assert_eq!(Direction::Left.unit(), Vec2::new(-1.0, 0.0));
        assert_eq!(Direction::Right.unit(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_degrees() {
        assert_eq!(Direction::Up.degrees(), 0.0);
        assert_eq!(Direction::Left.degrees(), 270.0);
    }
}
