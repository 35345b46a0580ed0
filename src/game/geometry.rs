use std::ops::{Add, AddAssign, Mul, Sub};

/// A point or extent in world units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(value: f32) -> Self {
        Self { x: value, y: value }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Shrinks the box by `size * factor`, keeping it centered.
    pub fn shrunk(&self, factor: f32) -> Rect {
        Rect {
            position: self.position + self.size * (factor / 2.0),
            size: self.size * (1.0 - factor),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }
}

/// True iff the interiors of `a` and `b` overlap. Shared edges don't count.
pub fn check_collision(a: &Rect, b: &Rect) -> bool {
    !(a.position.x + a.size.x <= b.position.x
        || a.position.x >= b.position.x + b.size.x
        || a.position.y + a.size.y <= b.position.y
        || a.position.y >= b.position.y + b.size.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlapping_rects_collide() {
        let a = rect(0.0, 0.0, 20.0, 20.0);
        let b = rect(10.0, 10.0, 20.0, 20.0);
        assert!(check_collision(&a, &b));
        assert!(check_collision(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = rect(0.0, 0.0, 20.0, 20.0);

        assert!(!check_collision(&a, &rect(20.0, 0.0, 20.0, 20.0)));
        assert!(!check_collision(&a, &rect(-20.0, 0.0, 20.0, 20.0)));
        assert!(!check_collision(&a, &rect(0.0, 20.0, 20.0, 20.0)));
        assert!(!check_collision(&a, &rect(0.0, -20.0, 20.0, 20.0)));
        // corner contact only
        assert!(!check_collision(&a, &rect(20.0, 20.0, 5.0, 5.0)));
    }

    #[test]
    fn test_containment_collides() {
        let outer = rect(0.0, 0.0, 40.0, 40.0);
        let inner = rect(10.0, 10.0, 5.0, 5.0);
        assert!(check_collision(&outer, &inner));
        assert!(check_collision(&inner, &outer));
    }

    #[test]
    fn test_collision_is_symmetric() {
        let rects = [
            rect(0.0, 0.0, 20.0, 20.0),
            rect(19.5, 0.0, 20.0, 20.0),
            rect(20.0, 20.0, 20.0, 20.0),
            rect(-5.0, 7.0, 3.0, 40.0),
            rect(4.0, 4.0, 12.0, 12.0),
            rect(100.0, 100.0, 1.0, 1.0),
        ];

        for a in &rects {
            for b in &rects {
                assert_eq!(check_collision(a, b), check_collision(b, a));
            }
        }
    }

    #[test]
    fn test_shrunk_is_centered() {
        let shrunk = rect(100.0, 40.0, 20.0, 20.0).shrunk(0.4);
        let close = |a: f32, b: f32| (a - b).abs() < 1e-4;

        assert!(close(shrunk.position.x, 104.0));
        assert!(close(shrunk.position.y, 44.0));
        assert!(close(shrunk.size.x, 12.0));
        assert!(close(shrunk.size.y, 12.0));
        assert!(close(shrunk.center().x, 110.0));
        assert!(close(shrunk.center().y, 50.0));
    }
}
