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
//! Axis-aligned bounding boxes

use crate::error::{PhysicsError, Result};
use crate::math::Vec2;

/// Axis-aligned box given by its top-left and bottom-right corners
///
/// Colliders store their box in the owner's local space; collision code
/// derives a world-space copy each tick with [`Aabb::to_world_space`].
///
/// # Examples
///
/// ```
/// use sandbox_physics::math::{Aabb, Vec2};
///
/// let local = Aabb::from_half_extents(Vec2::new(4.0, 4.0));
/// let world = local.to_world_space(Vec2::new(10.0, 20.0));
/// assert_eq!(world.top_left, Vec2::new(6.0, 16.0));
/// assert_eq!(world.bottom_right, Vec2::new(14.0, 24.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (smallest x and y)
    pub top_left: Vec2,
    /// Maximum corner (largest x and y)
    pub bottom_right: Vec2,
}

impl Aabb {
    /// Create a box from its corners without validation
    pub const fn new(top_left: Vec2, bottom_right: Vec2) -> Self {
        Aabb {
            top_left,
            bottom_right,
        }
    }

    /// Create a box from its corners, rejecting inverted or non-finite corners
    pub fn try_new(top_left: Vec2, bottom_right: Vec2) -> Result<Self> {
        let ordered = top_left.x <= bottom_right.x && top_left.y <= bottom_right.y;
        if !ordered || !top_left.is_finite() || !bottom_right.is_finite() {
            return Err(PhysicsError::InvalidAabb {
                top_left,
                bottom_right,
            });
        }
        Ok(Aabb::new(top_left, bottom_right))
    }

    /// Create a box centered on the local origin
    pub fn from_half_extents(half_extents: Vec2) -> Self {
        Aabb::new(-half_extents, half_extents)
    }

    /// Create a box from a center point and half extents
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Aabb::new(center - half_extents, center + half_extents)
    }

    /// Translate the box by the owner's world position
    pub fn to_world_space(&self, position: Vec2) -> Aabb {
        Aabb::new(position + self.top_left, position + self.bottom_right)
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        self.bottom_right - self.top_left
    }

    /// Half of [`Aabb::size`]
    pub fn half_extents(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// Midpoint of the two corners
    pub fn center(&self) -> Vec2 {
        (self.top_left + self.bottom_right) * 0.5
    }

    /// Strict overlap test; boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.top_left.x < other.bottom_right.x
            && other.top_left.x < self.bottom_right.x
            && self.top_left.y < other.bottom_right.y
            && other.top_left.y < self.bottom_right.y
    }

    /// Check whether a point lies inside or on the boundary
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.top_left.x
            && point.x <= self.bottom_right.x
            && point.y >= self.top_left.y
            && point.y <= self.bottom_right.y
    }
}

impl Default for Aabb {
    /// The default collider: an 8x8 box centered on the owner
    fn default() -> Self {
        Aabb::from_half_extents(Vec2::splat(4.0))
    }
}
