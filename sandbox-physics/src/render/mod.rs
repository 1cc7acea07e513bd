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
//! Sprite bounds and culling
//!
//! Drawing is left to an external renderer. This module keeps each sprite's
//! world-space bounds in sync with its transform and answers which sprites
//! fall inside a view rectangle.

use crate::ecs::components::{Sprite, Transform};
use crate::ecs::{ComponentStorage, Entity, System, World};
use crate::math::{Aabb, Vec2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sprite count at which the bounds refresh goes parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// World-space box enclosing a sprite of `size` drawn at `transform`
///
/// The rectangle is centered on the transform position, scaled, then
/// rotated about its center. The result encloses all four rotated corners.
///
/// # Examples
///
/// ```
/// use sandbox_physics::ecs::components::Transform;
/// use sandbox_physics::math::Vec2;
/// use sandbox_physics::render::sprite_bounds;
///
/// let transform = Transform::from_position(Vec2::new(10.0, 10.0));
/// let bounds = sprite_bounds(&transform, Vec2::new(4.0, 2.0));
/// assert_eq!(bounds.top_left, Vec2::new(8.0, 9.0));
/// assert_eq!(bounds.bottom_right, Vec2::new(12.0, 11.0));
/// ```
pub fn sprite_bounds(transform: &Transform, size: Vec2) -> Aabb {
    let half = size.mul_components(transform.scale()) * 0.5;
    let position = transform.position();

    if transform.rotation() == 0.0 {
        return Aabb::new(position - half, position + half);
    }

    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ];

    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    for corner in corners {
        let world = position + corner.rotated(transform.rotation());
        min = min.min(world);
        max = max.max(world);
    }
    Aabb::new(min, max)
}

/// Recomputes [`Sprite`] bounds after physics has moved things
#[derive(Debug, Clone)]
pub struct SpriteBoundsSystem {
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel_threshold: usize,
    warn_on_missing_components: bool,
}

impl SpriteBoundsSystem {
    /// Create the system with default settings
    pub fn new() -> Self {
        SpriteBoundsSystem {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            warn_on_missing_components: false,
        }
    }

    /// Set the sprite count at which the refresh runs on rayon
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Log a warning for each sprite without a transform
    pub fn with_warnings(mut self) -> Self {
        self.warn_on_missing_components = true;
        self
    }

    /// Refresh every sprite that has a transform
    ///
    /// Returns the number of sprites updated.
    pub fn refresh(&self, world: &mut World) -> usize {
        let transforms = &world.transforms;

        #[cfg(feature = "parallel")]
        {
            if world.sprites.len() >= self.parallel_threshold {
                return world
                    .sprites
                    .par_iter_mut()
                    .map(|(entity, sprite)| refresh_one(transforms, entity, sprite, self.warn_on_missing_components))
                    .filter(|&updated| updated)
                    .count();
            }
        }

        world
            .sprites
            .iter_mut()
            .map(|(entity, sprite)| refresh_one(transforms, entity, sprite, self.warn_on_missing_components))
            .filter(|&updated| updated)
            .count()
    }
}

impl Default for SpriteBoundsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for SpriteBoundsSystem {
    fn run(&mut self, world: &mut World) {
        let updated = self.refresh(world);
        log::trace!("refreshed bounds for {} sprites", updated);
    }

    fn name(&self) -> &str {
        "SpriteBoundsSystem"
    }
}

fn refresh_one<S>(transforms: &S, entity: Entity, sprite: &mut Sprite, warn: bool) -> bool
where
    S: ComponentStorage<Component = Transform>,
{
    match transforms.get(entity) {
        Some(transform) => {
            sprite.set_bounds(sprite_bounds(transform, sprite.size()));
            true
        }
        None => {
            if warn {
                log::warn!("{} has a Sprite but no Transform, skipping", entity);
            }
            false
        }
    }
}

/// Sprites whose bounds overlap `view`, in storage order
///
/// Uses the bounds stored on each sprite, so run [`SpriteBoundsSystem`]
/// first. Sprites that only touch the edge of the view are excluded.
pub fn sprites_in_view(world: &World, view: &Aabb) -> Vec<Entity> {
    world
        .storage::<Sprite>()
        .iter()
        .filter(|(_, sprite)| sprite.bounds().intersects(view))
        .map(|(entity, _)| entity)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::TextureId;
    use std::f32::consts::FRAC_PI_2;

    fn spawn_sprite(world: &mut World, position: Vec2, size: Vec2) -> Entity {
        let entity = world.create_entity();
        world.insert(entity, Transform::from_position(position)).unwrap();
        world.insert(entity, Sprite::new(TextureId(0), size)).unwrap();
        entity
    }

    #[test]
    fn test_scaled_bounds() {
        let transform = Transform::new(Vec2::new(0.0, 0.0), 0.0, Vec2::new(2.0, 3.0));
        let bounds = sprite_bounds(&transform, Vec2::new(4.0, 4.0));
        assert_eq!(bounds.top_left, Vec2::new(-4.0, -6.0));
        assert_eq!(bounds.bottom_right, Vec2::new(4.0, 6.0));
    }

    #[test]
    fn test_rotated_bounds_swap_extents() {
        let transform = Transform::new(Vec2::new(5.0, 5.0), FRAC_PI_2, Vec2::ONE);
        let bounds = sprite_bounds(&transform, Vec2::new(8.0, 2.0));
        let size = bounds.size();
        assert!((size.x - 2.0).abs() < 1e-4);
        assert!((size.y - 8.0).abs() < 1e-4);
        assert!((bounds.center() - Vec2::new(5.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_rotated_bounds_grow_at_45_degrees() {
        let transform = Transform::new(Vec2::ZERO, std::f32::consts::FRAC_PI_4, Vec2::ONE);
        let bounds = sprite_bounds(&transform, Vec2::splat(2.0));
        let expected = std::f32::consts::SQRT_2;
        assert!((bounds.bottom_right.x - expected).abs() < 1e-5);
        assert!((bounds.top_left.y + expected).abs() < 1e-5);
    }

    #[test]
    fn test_system_follows_transform() {
        let mut world = World::new();
        let entity = spawn_sprite(&mut world, Vec2::new(10.0, 10.0), Vec2::splat(4.0));
        world
            .get_mut::<Transform>(entity)
            .unwrap()
            .set_position(Vec2::new(50.0, 20.0));

        let mut system = SpriteBoundsSystem::new();
        system.run(&mut world);

        let bounds = world.get::<Sprite>(entity).unwrap().bounds();
        assert_eq!(bounds.top_left, Vec2::new(48.0, 18.0));
        assert_eq!(bounds.bottom_right, Vec2::new(52.0, 22.0));
    }

    #[test]
    fn test_sprite_without_transform_is_skipped() {
        let mut world = World::new();
        spawn_sprite(&mut world, Vec2::ZERO, Vec2::ONE);
        let loose = world.create_entity();
        let sprite = Sprite::new(TextureId(7), Vec2::ONE);
        world.insert(loose, sprite).unwrap();

        let updated = SpriteBoundsSystem::new().refresh(&mut world);
        assert_eq!(updated, 1);
        assert_eq!(*world.get::<Sprite>(loose).unwrap(), sprite);
    }

    #[test]
    fn test_sprites_in_view() {
        let mut world = World::new();
        let inside = spawn_sprite(&mut world, Vec2::new(10.0, 10.0), Vec2::splat(4.0));
        let straddling = spawn_sprite(&mut world, Vec2::new(100.0, 50.0), Vec2::splat(4.0));
        spawn_sprite(&mut world, Vec2::new(500.0, 10.0), Vec2::splat(4.0));
        // Touches the right edge only
        spawn_sprite(&mut world, Vec2::new(102.0, 10.0), Vec2::splat(4.0));
        SpriteBoundsSystem::new().refresh(&mut world);

        let view = Aabb::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        assert_eq!(sprites_in_view(&world, &view), vec![inside, straddling]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_refresh_matches_sequential() {
        let mut sequential = World::new();
        let mut parallel = World::new();
        for i in 0..200 {
            let position = Vec2::new(i as f32, (i * 3) as f32);
            for world in [&mut sequential, &mut parallel] {
                let entity = spawn_sprite(world, position, Vec2::new(3.0, 5.0));
                world.get_mut::<Transform>(entity).unwrap().set_rotation(i as f32 * 0.1);
            }
        }

        let a = SpriteBoundsSystem::new().with_parallel_threshold(usize::MAX).refresh(&mut sequential);
        let b = SpriteBoundsSystem::new().with_parallel_threshold(0).refresh(&mut parallel);
        assert_eq!(a, b);

        for (entity, sprite) in sequential.storage::<Sprite>().iter() {
            assert_eq!(parallel.get::<Sprite>(entity), Some(sprite));
        }
    }
}
