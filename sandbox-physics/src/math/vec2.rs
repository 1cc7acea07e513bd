// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Two-dimensional vector math
//!
//! Screen-space convention: +X points right and +Y points down, so a
//! positive gravity Y component pulls bodies toward the bottom of the screen.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D vector with single-precision components
///
/// # Examples
///
/// ```
/// use sandbox_physics::math::Vec2;
///
/// let v = Vec2::new(3.0, 4.0);
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(v.dot(Vec2::new(1.0, 0.0)), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// Horizontal component
    pub x: f32,
    /// Vertical component (grows downward)
    pub y: f32,
}

impl Vec2 {
    /// The zero vector
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// The (1, 1) vector, used as the identity scale
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    /// Unit vector along +X
    pub const X: Vec2 = Vec2 { x: 1.0, y: 0.0 };

    /// Unit vector along +Y
    pub const Y: Vec2 = Vec2 { x: 0.0, y: 1.0 };

    /// Create a new vector
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    /// Create a vector with both components set to `value`
    pub const fn splat(value: f32) -> Self {
        Vec2 { x: value, y: value }
    }

    /// Dot product
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Squared Euclidean length
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Euclidean length
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction
    ///
    /// The zero vector normalizes to itself rather than to NaN.
    pub fn normalized(self) -> Vec2 {
        if self.x == 0.0 && self.y == 0.0 {
            return Vec2::ZERO;
        }
        self / self.length()
    }

    /// Component-wise product
    pub fn mul_components(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x * other.x, self.y * other.y)
    }

    /// Component-wise minimum
    pub fn min(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum
    pub fn max(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Rotate counter-clockwise (in a Y-up frame) by `radians`
    pub fn rotated(self, radians: f32) -> Vec2 {
        let (sin, cos) = radians.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, scalar: f32) -> Vec2 {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;

    fn mul(self, v: Vec2) -> Vec2 {
        v * self
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, scalar: f32) -> Vec2 {
        Vec2::new(self.x / scalar, self.y / scalar)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
    }
}
