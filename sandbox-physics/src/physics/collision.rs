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
//! Narrow-phase AABB contact detection
//!
//! Boxes are compared in world space. The contact normal is chosen along the
//! axis of least overlap and always points from the first box toward the
//! second one.
//!
//! Broad phase is brute force in [`PhysicsSystem`](super::PhysicsSystem);
//! a spatial partition would sit in front of [`detect`].

use crate::math::{Aabb, Vec2};

/// Overlap between two world-space boxes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit axis pointing from the first box toward the second
    pub normal: Vec2,
    /// Overlap along `normal`
    pub penetration: f32,
    /// Overlap along X
    pub x_overlap: f32,
    /// Overlap along Y
    pub y_overlap: f32,
}

/// Test two world-space boxes for overlap
///
/// Returns `None` when the boxes are separated or only share an edge.
/// When both axes overlap by the same amount the contact is resolved
/// along Y.
///
/// # Examples
///
/// ```
/// use sandbox_physics::math::{Aabb, Vec2};
/// use sandbox_physics::physics::collision::detect;
///
/// let a = Aabb::from_center(Vec2::new(0.0, 0.0), Vec2::splat(4.0));
/// let b = Aabb::from_center(Vec2::new(7.0, 0.0), Vec2::splat(4.0));
///
/// let contact = detect(&a, &b).unwrap();
/// assert_eq!(contact.normal, Vec2::X);
/// assert_eq!(contact.penetration, 1.0);
/// ```
pub fn detect(a: &Aabb, b: &Aabb) -> Option<Contact> {
    let left = b.bottom_right.x - a.top_left.x;
    let right = a.bottom_right.x - b.top_left.x;
    let top = b.bottom_right.y - a.top_left.y;
    let bottom = a.bottom_right.y - b.top_left.y;

    // NaN fails every comparison, so non-finite boxes never collide
    if !(left > 0.0 && right > 0.0 && top > 0.0 && bottom > 0.0) {
        return None;
    }

    let x_overlap = left.min(right);
    let y_overlap = top.min(bottom);

    let (normal, penetration) = if x_overlap < y_overlap {
        let normal = if right < left { Vec2::X } else { -Vec2::X };
        (normal, x_overlap)
    } else {
        let normal = if bottom < top { Vec2::Y } else { -Vec2::Y };
        (normal, y_overlap)
    };

    Some(Contact {
        normal,
        penetration,
        x_overlap,
        y_overlap,
    })
}
