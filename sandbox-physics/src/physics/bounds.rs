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
//! Play-field boundaries built from static walls

use crate::ecs::components::StaticBody;
use crate::ecs::{Entity, World};
use crate::math::{Aabb, Vec2};

/// The four walls enclosing the play field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldBounds {
    /// Wall along x = 0
    pub left: Entity,
    /// Wall along x = width
    pub right: Entity,
    /// Wall along y = 0
    pub top: Entity,
    /// Wall along y = height (the floor, since +Y points down)
    pub bottom: Entity,
}

impl WorldBounds {
    /// All four wall entities
    pub fn entities(&self) -> [Entity; 4] {
        [self.left, self.right, self.top, self.bottom]
    }
}

/// Enclose `[0, width] x [0, height]` with four static walls
///
/// Each wall is `thickness` deep and sits just outside the field, so its
/// inner face lies exactly on the boundary. The side walls extend past the
/// corners to keep them closed.
///
/// # Panics
///
/// Panics if any dimension is not positive and finite.
///
/// # Examples
///
/// ```
/// use sandbox_physics::ecs::World;
/// use sandbox_physics::physics::bounds::spawn_world_bounds;
///
/// let mut world = World::new();
/// let walls = spawn_world_bounds(&mut world, 320.0, 180.0, 16.0);
/// assert_eq!(world.entity_count(), 4);
/// assert!(world.is_entity_alive(walls.bottom));
/// ```
pub fn spawn_world_bounds(world: &mut World, width: f32, height: f32, thickness: f32) -> WorldBounds {
    for (name, value) in [("width", width), ("height", height), ("thickness", thickness)] {
        assert!(
            value > 0.0 && value.is_finite(),
            "World bounds {} must be positive and finite, got {}",
            name,
            value
        );
    }

    let mut wall = |top_left: Vec2, bottom_right: Vec2| {
        let aabb = Aabb::new(top_left, bottom_right);
        world.spawn_static(aabb.center(), StaticBody::new().with_half_extents(aabb.half_extents()))
    };

    let left = wall(
        Vec2::new(-thickness, -thickness),
        Vec2::new(0.0, height + thickness),
    );
    let right = wall(
        Vec2::new(width, -thickness),
        Vec2::new(width + thickness, height + thickness),
    );
    let top = wall(Vec2::new(0.0, -thickness), Vec2::new(width, 0.0));
    let bottom = wall(Vec2::new(0.0, height), Vec2::new(width, height + thickness));

    log::debug!(
        "spawned world bounds {}x{} (wall thickness {})",
        width,
        height,
        thickness
    );

    WorldBounds {
        left,
        right,
        top,
        bottom,
    }
}
