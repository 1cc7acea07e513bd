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
//! Per-body motion integration
//!
//! Performs semi-implicit (symplectic) Euler integration:
//! - v' = v + (g + F/m)*dt
//! - p' = p + v'*dt
//!
//! Accumulated forces are consumed by the step. There are no substeps and
//! no velocity clamp.
//!
//! With the `parallel` feature, velocity updates for large body counts run
//! on rayon and positions are written back sequentially afterwards. Each
//! body is independent, so both paths produce identical results.

use crate::ecs::components::{RigidBody, Transform};
use crate::ecs::{ComponentStorage, Entity, World};
use crate::math::Vec2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of one integration pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegrationCounts {
    /// Bodies whose velocity and position were advanced
    pub integrated: usize,
    /// Bodies left untouched because they have no transform
    pub skipped: usize,
}

/// Advance a body's velocity by one step and return its displacement
///
/// Clears the force accumulator.
///
/// # Examples
///
/// ```
/// use sandbox_physics::ecs::components::RigidBody;
/// use sandbox_physics::physics::integration::advance_velocity;
///
/// let mut body = RigidBody::new();
/// let displacement = advance_velocity(&mut body, 1.0 / 60.0);
/// assert!((body.velocity().y - 4.267).abs() < 1e-3);
/// assert!((displacement.y - 0.0711).abs() < 1e-4);
/// ```
pub fn advance_velocity(body: &mut RigidBody, dt: f32) -> Vec2 {
    let acceleration = body.gravity() + body.forces() / body.mass();
    let velocity = body.velocity() + acceleration * dt;
    body.set_velocity(velocity);
    body.clear_forces();
    velocity * dt
}

/// Integrate every rigid body in the world
///
/// Bodies without a transform are skipped and keep their velocity and
/// pending forces. When `warn_on_missing` is set a warning is logged for
/// each skipped body and for any body whose state becomes non-finite.
pub fn integrate(
    world: &mut World,
    dt: f32,
    parallel_threshold: usize,
    warn_on_missing: bool,
) -> IntegrationCounts {
    #[cfg(feature = "parallel")]
    {
        if world.rigid_bodies.len() >= parallel_threshold {
            return integrate_parallel(world, dt, warn_on_missing);
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel_threshold;

    let mut counts = IntegrationCounts::default();

    for (entity, body) in world.rigid_bodies.iter_mut() {
        match world.transforms.get_mut(entity) {
            Some(transform) => {
                let displacement = advance_velocity(body, dt);
                apply_displacement(entity, body, transform, displacement, warn_on_missing);
                counts.integrated += 1;
            }
            None => {
                report_missing_transform(entity, warn_on_missing);
                counts.skipped += 1;
            }
        }
    }

    counts
}

#[cfg(feature = "parallel")]
fn integrate_parallel(world: &mut World, dt: f32, warn_on_missing: bool) -> IntegrationCounts {
    let transforms = &world.transforms;
    let steps: Vec<(Entity, Option<Vec2>)> = world
        .rigid_bodies
        .par_iter_mut()
        .map(|(entity, body)| {
            if transforms.contains(entity) {
                (entity, Some(advance_velocity(body, dt)))
            } else {
                (entity, None)
            }
        })
        .collect();

    let mut counts = IntegrationCounts::default();

    for (entity, step) in steps {
        let (Some(displacement), Some(transform), Some(body)) = (
            step,
            world.transforms.get_mut(entity),
            world.rigid_bodies.get(entity),
        ) else {
            report_missing_transform(entity, warn_on_missing);
            counts.skipped += 1;
            continue;
        };
        apply_displacement(entity, body, transform, displacement, warn_on_missing);
        counts.integrated += 1;
    }

    counts
}

fn apply_displacement(
    entity: Entity,
    body: &RigidBody,
    transform: &mut Transform,
    displacement: Vec2,
    warn_on_missing: bool,
) {
    transform.translate(displacement);

    if warn_on_missing && (!transform.is_valid() || !body.is_valid()) {
        log::warn!("integration produced non-finite state for {}", entity);
    }
}

fn report_missing_transform(entity: Entity, warn_on_missing: bool) {
    if warn_on_missing {
        log::warn!("{} has a RigidBody but no Transform, skipping", entity);
    }
}
