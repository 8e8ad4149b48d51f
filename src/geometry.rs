//! Vector math, shape constructors and overlap predicates.
//!
//! Coordinates are pixels with the origin at the top-left of the window and
//! `y` growing downward.

use std::ops::{Add, AddAssign, Mul, Sub};

/// Lengths at or below this are treated as zero by [`Vector2::normalize`].
const NORMALIZE_EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction. The zero vector stays zero.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len <= NORMALIZE_EPSILON {
            return Self::ZERO;
        }
        Self::new(self.x / len, self.y / len)
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Self) -> Self::Output {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Self::Output {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

/// Restrict `value` to `[min, max]`. Unlike `f64::clamp`, never panics.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        return min;
    }
    if value > max {
        return max;
    }
    value
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

// ── Shapes ────────────────────────────────────────────────────────────────────

/// Axis-aligned bounds. `left <= right`, `top <= bottom`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vector2,
    pub radius: f64,
}

/// Rectangle whose top-left corner is `position`.
pub fn create_rect(position: Vector2, width: f64, height: f64) -> Rect {
    Rect {
        left: position.x,
        right: position.x + width,
        top: position.y,
        bottom: position.y + height,
    }
}

pub fn create_circle(center: Vector2, radius: f64) -> Circle {
    Circle { center, radius }
}

// ── Overlap predicates ───────────────────────────────────────────────────────

/// Closed-interval AABB test: touching edges count as overlap.
pub fn is_rect_rect_collision(a: Rect, b: Rect) -> bool {
    if a.right < b.left || a.left > b.right {
        return false;
    }
    if a.bottom < b.top || a.top > b.bottom {
        return false;
    }
    true
}

/// Closest-point test: clamp the center into the rect and compare the squared
/// distance against the squared radius.
pub fn is_rect_circle_collision(rect: Rect, circle: Circle) -> bool {
    let closest_x = clamp(circle.center.x, rect.left, rect.right);
    let closest_y = clamp(circle.center.y, rect.top, rect.bottom);
    let dx = circle.center.x - closest_x;
    let dy = circle.center.y - closest_y;
    dx * dx + dy * dy <= circle.radius * circle.radius
}

pub fn is_circle_circle_collision(a: Circle, b: Circle) -> bool {
    let dx = a.center.x - b.center.x;
    let dy = a.center.y - b.center.y;
    let r = a.radius + b.radius;
    dx * dx + dy * dy <= r * r
}

pub fn is_point_in_rect(p: Vector2, r: Rect) -> bool {
    p.x >= r.left && p.x <= r.right && p.y >= r.top && p.y <= r.bottom
}

pub fn is_point_in_circle(p: Vector2, c: Circle) -> bool {
    let dx = p.x - c.center.x;
    let dy = p.y - c.center.y;
    dx * dx + dy * dy <= c.radius * c.radius
}
