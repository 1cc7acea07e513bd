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
//! Physics system
//!
//! One call to [`PhysicsSystem::update`] advances the world by one tick:
//!
//! 1. Every rigid body with a transform is integrated (semi-implicit Euler).
//! 2. Every unordered pair of rigid bodies is tested in storage order and
//!    overlapping pairs are resolved with an impulse, friction and
//!    positional correction.
//! 3. Every rigid body is tested against every static body; only the rigid
//!    body is moved.
//!
//! Pair resolution is sequential, so each pair sees the effects of earlier
//! pairs in the same tick and the result is fully deterministic.
//!
//! # Coordinate system
//!
//! Screen space: +X points right and +Y points down, so the default gravity
//! `(0, 256)` pulls bodies toward larger `y`.

pub mod bounds;
pub mod collision;
pub mod integration;
mod material;
pub mod response;

pub use material::CombineRule;

use crate::ecs::components::{RigidBody, StaticBody, Transform};
use crate::ecs::{ComponentStorage, Entity, System, World};
use crate::error::{PhysicsError, Result};
use crate::math::Aabb;
use collision::detect;
use response::{resolve_rigid_pair, resolve_static_contact, BodyMut, ContactMaterial};

/// Default fixed timestep in seconds
pub const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;

/// Body count at which integration switches to the rayon path
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 512;

/// Tunables for [`PhysicsSystem`]
///
/// # Examples
///
/// ```
/// use sandbox_physics::physics::{CombineRule, PhysicsConfig};
///
/// let config = PhysicsConfig::default()
///     .with_timestep(1.0 / 120.0)
///     .with_restitution_rule(CombineRule::Fixed(0.5));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    /// Step used when the system runs from a scheduler
    pub timestep: f32,
    /// How two bodies' restitution coefficients are merged
    pub restitution_rule: CombineRule,
    /// How two bodies' friction coefficients are merged
    pub friction_rule: CombineRule,
    /// Minimum rigid body count for parallel integration
    pub parallel_threshold: usize,
    /// Whether to log warnings for skipped entities and non-finite state
    pub warn_on_missing_components: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            timestep: DEFAULT_TIMESTEP,
            restitution_rule: CombineRule::Min,
            friction_rule: CombineRule::Average,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            warn_on_missing_components: true,
        }
    }
}

impl PhysicsConfig {
    /// Set the scheduler timestep
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set the restitution combine rule
    pub fn with_restitution_rule(mut self, rule: CombineRule) -> Self {
        self.restitution_rule = rule;
        self
    }

    /// Set the friction combine rule
    pub fn with_friction_rule(mut self, rule: CombineRule) -> Self {
        self.friction_rule = rule;
        self
    }

    /// Set the body count at which integration goes parallel
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Silence warnings about skipped entities
    pub fn without_warnings(mut self) -> Self {
        self.warn_on_missing_components = false;
        self
    }

    /// Check every field
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidTimestep`] for a non-positive or
    /// non-finite timestep and [`PhysicsError::InvalidConfig`] when a
    /// `Fixed` combine rule holds an out-of-range coefficient.
    pub fn validate(&self) -> Result<()> {
        if !(self.timestep > 0.0 && self.timestep.is_finite()) {
            return Err(PhysicsError::InvalidTimestep(self.timestep));
        }
        if let CombineRule::Fixed(value) = self.restitution_rule {
            if !(0.0..=1.0).contains(&value) {
                return Err(PhysicsError::InvalidConfig(format!(
                    "fixed restitution {} is outside [0, 1]",
                    value
                )));
            }
        }
        if let CombineRule::Fixed(value) = self.friction_rule {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(PhysicsError::InvalidConfig(format!(
                    "fixed friction {} must be non-negative and finite",
                    value
                )));
            }
        }
        Ok(())
    }
}

/// Counters from a single [`PhysicsSystem::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Rigid bodies advanced by integration
    pub integrated: usize,
    /// Bodies skipped because they have no transform
    pub skipped: usize,
    /// Rigid-rigid and rigid-static pairs run through narrow phase
    pub pairs_tested: usize,
    /// Rigid-rigid overlaps resolved
    pub rigid_contacts: usize,
    /// Rigid-static overlaps resolved
    pub static_contacts: usize,
}

impl StepStats {
    /// Total overlaps resolved
    pub fn contacts(&self) -> usize {
        self.rigid_contacts + self.static_contacts
    }
}

/// Kinetic energy of a single body
///
/// KE = 0.5 * m * v²
pub fn kinetic_energy(body: &RigidBody) -> f32 {
    0.5 * body.mass() * body.velocity().length_squared()
}

/// Total kinetic energy of every rigid body in the world
pub fn total_kinetic_energy(world: &World) -> f32 {
    world
        .storage::<RigidBody>()
        .components()
        .iter()
        .map(kinetic_energy)
        .sum()
}

/// Integrates rigid bodies and resolves their collisions
///
/// # Examples
///
/// ```
/// use sandbox_physics::ecs::World;
/// use sandbox_physics::ecs::components::{RigidBody, Transform};
/// use sandbox_physics::math::Vec2;
/// use sandbox_physics::physics::PhysicsSystem;
///
/// let mut world = World::new();
/// let body = world.spawn_dynamic(Vec2::ZERO, RigidBody::new());
///
/// let mut physics = PhysicsSystem::default();
/// let stats = physics.update(&mut world, 1.0 / 60.0);
///
/// assert_eq!(stats.integrated, 1);
/// assert!(world.get::<Transform>(body).unwrap().position().y > 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PhysicsSystem {
    config: PhysicsConfig,
    last_stats: StepStats,
}

impl PhysicsSystem {
    /// Create a physics system
    ///
    /// # Panics
    ///
    /// Panics if the configuration does not pass [`PhysicsConfig::validate`].
    pub fn new(config: PhysicsConfig) -> Self {
        match Self::try_new(config) {
            Ok(system) => system,
            Err(err) => panic!("{}", err),
        }
    }

    /// Create a physics system, rejecting an invalid configuration
    pub fn try_new(config: PhysicsConfig) -> Result<Self> {
        config.validate()?;
        Ok(PhysicsSystem {
            config,
            last_stats: StepStats::default(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Counters from the most recent step
    pub fn last_stats(&self) -> StepStats {
        self.last_stats
    }

    /// Advance the world by `delta_time` seconds
    ///
    /// A zero `delta_time` leaves velocities and positions alone but still
    /// resolves any existing overlaps.
    ///
    /// # Panics
    ///
    /// Panics if `delta_time` is negative, NaN or infinite.
    pub fn update(&mut self, world: &mut World, delta_time: f32) -> StepStats {
        assert!(
            delta_time >= 0.0 && delta_time.is_finite(),
            "Delta time must be non-negative and finite, got {}",
            delta_time
        );

        let warn = self.config.warn_on_missing_components;
        let counts = integration::integrate(world, delta_time, self.config.parallel_threshold, warn);

        let mut stats = StepStats {
            integrated: counts.integrated,
            skipped: counts.skipped,
            ..StepStats::default()
        };

        let dynamic: Vec<Entity> = world
            .rigid_bodies
            .entities()
            .filter(|&entity| world.transforms.contains(entity))
            .collect();

        self.resolve_rigid_pairs(world, &dynamic, &mut stats);
        self.resolve_static_contacts(world, &dynamic, &mut stats);

        log::debug!(
            "physics step dt={:.5}: {} integrated, {} skipped, {} pairs, {} rigid / {} static contacts",
            delta_time,
            stats.integrated,
            stats.skipped,
            stats.pairs_tested,
            stats.rigid_contacts,
            stats.static_contacts
        );

        self.last_stats = stats;
        stats
    }

    fn resolve_rigid_pairs(&self, world: &mut World, dynamic: &[Entity], stats: &mut StepStats) {
        for (i, &first) in dynamic.iter().enumerate() {
            for &second in &dynamic[i + 1..] {
                stats.pairs_tested += 1;

                let (Some((mut t1, mut b1)), Some((mut t2, mut b2))) =
                    (load_dynamic(world, first), load_dynamic(world, second))
                else {
                    continue;
                };

                let Some(contact) = detect(&dynamic_box(&t1, &b1), &dynamic_box(&t2, &b2)) else {
                    continue;
                };

                let material = ContactMaterial {
                    restitution: self
                        .config
                        .restitution_rule
                        .combine(b1.restitution(), b2.restitution()),
                    friction: self.config.friction_rule.combine(b1.friction(), b2.friction()),
                };
                let impulse = resolve_rigid_pair(
                    &contact,
                    material,
                    BodyMut { transform: &mut t1, body: &mut b1 },
                    BodyMut { transform: &mut t2, body: &mut b2 },
                );
                log::trace!(
                    "contact {} -> {}: normal {} depth {} impulse {:?}",
                    first,
                    second,
                    contact.normal,
                    contact.penetration,
                    impulse
                );

                store_dynamic(world, first, t1, b1);
                store_dynamic(world, second, t2, b2);
                stats.rigid_contacts += 1;
            }
        }
    }

    fn resolve_static_contacts(&self, world: &mut World, dynamic: &[Entity], stats: &mut StepStats) {
        let mut colliders: Vec<(Entity, Aabb, StaticBody)> = Vec::with_capacity(world.static_bodies.len());
        for (entity, body) in world.static_bodies.iter() {
            match world.transforms.get(entity) {
                Some(transform) => {
                    colliders.push((entity, body.collision_aabb().to_world_space(transform.position()), *body));
                }
                None => {
                    if self.config.warn_on_missing_components {
                        log::warn!("{} has a StaticBody but no Transform, skipping", entity);
                    }
                    stats.skipped += 1;
                }
            }
        }

        for &entity in dynamic {
            for (wall, wall_box, wall_body) in &colliders {
                stats.pairs_tested += 1;

                let Some((mut transform, mut body)) = load_dynamic(world, entity) else {
                    continue;
                };
                let Some(contact) = detect(&dynamic_box(&transform, &body), wall_box) else {
                    continue;
                };

                let material = ContactMaterial {
                    restitution: self
                        .config
                        .restitution_rule
                        .combine(body.restitution(), wall_body.restitution()),
                    friction: self
                        .config
                        .friction_rule
                        .combine(body.friction(), wall_body.friction()),
                };
                let responded = resolve_static_contact(
                    &contact,
                    material,
                    BodyMut { transform: &mut transform, body: &mut body },
                );
                log::trace!(
                    "static contact {} -> {}: normal {} depth {} responded {}",
                    entity,
                    wall,
                    contact.normal,
                    contact.penetration,
                    responded
                );

                store_dynamic(world, entity, transform, body);
                stats.static_contacts += 1;
            }
        }
    }
}

impl System for PhysicsSystem {
    fn run(&mut self, world: &mut World) {
        let timestep = self.config.timestep;
        self.update(world, timestep);
    }

    fn name(&self) -> &str {
        "PhysicsSystem"
    }
}

fn dynamic_box(transform: &Transform, body: &RigidBody) -> Aabb {
    body.collision_aabb().to_world_space(transform.position())
}

fn load_dynamic(world: &World, entity: Entity) -> Option<(Transform, RigidBody)> {
    Some((*world.get::<Transform>(entity)?, *world.get::<RigidBody>(entity)?))
}

fn store_dynamic(world: &mut World, entity: Entity, transform: Transform, body: RigidBody) {
    if let Some(slot) = world.get_mut::<Transform>(entity) {
        *slot = transform;
    }
    if let Some(slot) = world.get_mut::<RigidBody>(entity) {
        *slot = body;
    }
}
