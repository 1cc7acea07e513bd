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
//! Collision response tests through the full physics step
//!
//! Tests overlap detection, momentum and energy behavior, and positional
//! correction for rigid-rigid and rigid-static contacts.

use sandbox_physics::ecs::components::{RigidBody, StaticBody, Transform};
use sandbox_physics::ecs::{Entity, World};
use sandbox_physics::math::{Aabb, Vec2};
use sandbox_physics::physics::collision::detect;
use sandbox_physics::physics::{total_kinetic_energy, CombineRule, PhysicsConfig, PhysicsSystem};

const DT: f32 = 1.0 / 60.0;

fn weightless(velocity: Vec2) -> RigidBody {
    RigidBody::new()
        .with_half_extents(Vec2::splat(4.0))
        .with_gravity(Vec2::ZERO)
        .with_friction(0.0)
        .with_velocity(velocity)
}

fn world_box(world: &World, entity: Entity) -> Aabb {
    let position = world.get::<Transform>(entity).unwrap().position();
    if let Some(body) = world.get::<RigidBody>(entity) {
        return body.collision_aabb().to_world_space(position);
    }
    world
        .get::<StaticBody>(entity)
        .unwrap()
        .collision_aabb()
        .to_world_space(position)
}

#[test]
fn test_overlap_threshold_for_half_extent_four() {
    let unit = Aabb::from_half_extents(Vec2::splat(4.0));

    let near = detect(
        &unit.to_world_space(Vec2::ZERO),
        &unit.to_world_space(Vec2::new(7.0, 0.0)),
    );
    assert!(near.is_some(), "boxes 7 apart should overlap");

    let far = detect(
        &unit.to_world_space(Vec2::ZERO),
        &unit.to_world_space(Vec2::new(9.0, 0.0)),
    );
    assert!(far.is_none(), "boxes 9 apart should not overlap");
}

#[test]
fn test_elastic_collision_conserves_energy() {
    let mut world = World::new();
    let a = world.spawn_dynamic(Vec2::new(0.0, 0.0), weightless(Vec2::new(30.0, 0.0)));
    let b = world.spawn_dynamic(Vec2::new(7.5, 0.0), weightless(Vec2::new(-30.0, 0.0)));
    for entity in [a, b] {
        let body = world.get_mut::<RigidBody>(entity).unwrap();
        *body = body.with_restitution(1.0);
    }

    let before = total_kinetic_energy(&world);
    let mut physics = PhysicsSystem::default();
    let stats = physics.update(&mut world, DT);
    let after = total_kinetic_energy(&world);

    assert_eq!(stats.rigid_contacts, 1);
    let relative = ((after - before) / before).abs();
    assert!(relative < 1e-3, "energy drifted by {}", relative);
    assert!(world.get::<RigidBody>(a).unwrap().velocity().x < 0.0);
    assert!(world.get::<RigidBody>(b).unwrap().velocity().x > 0.0);
}

#[test]
fn test_separating_pair_keeps_velocities() {
    let mut world = World::new();
    let a = world.spawn_dynamic(Vec2::new(0.0, 0.0), weightless(Vec2::new(-5.0, 1.0)));
    let b = world.spawn_dynamic(Vec2::new(6.0, 0.0), weightless(Vec2::new(5.0, 0.0)));

    let mut physics = PhysicsSystem::default();
    physics.update(&mut world, 0.0);

    assert_eq!(world.get::<RigidBody>(a).unwrap().velocity(), Vec2::new(-5.0, 1.0));
    assert_eq!(world.get::<RigidBody>(b).unwrap().velocity(), Vec2::new(5.0, 0.0));
}

#[test]
fn test_no_residual_overlap_after_correction() {
    let mut world = World::new();
    let a = world.spawn_dynamic(Vec2::new(0.0, 0.0), weightless(Vec2::ZERO));
    let b = world.spawn_dynamic(Vec2::new(3.0, 1.0), weightless(Vec2::ZERO));
    let c = world.spawn_dynamic(Vec2::new(-25.0, 0.0), weightless(Vec2::ZERO));
    let wall = world.spawn_static(
        Vec2::new(-30.0, 0.0),
        StaticBody::new().with_half_extents(Vec2::new(2.0, 20.0)),
    );
    assert!(detect(&world_box(&world, c), &world_box(&world, wall)).is_some());

    let mut physics = PhysicsSystem::default();
    let stats = physics.update(&mut world, 0.0);

    assert_eq!(stats.rigid_contacts, 1);
    assert_eq!(stats.static_contacts, 1);
    assert!(detect(&world_box(&world, a), &world_box(&world, b)).is_none());
    assert!(detect(&world_box(&world, c), &world_box(&world, wall)).is_none());
}

#[test]
fn test_static_body_is_immovable() {
    let mut world = World::new();
    let wall = world.spawn_static(
        Vec2::new(20.0, 0.0),
        StaticBody::new().with_half_extents(Vec2::new(4.0, 40.0)),
    );
    let ball = world.spawn_dynamic(Vec2::new(0.0, 0.0), weightless(Vec2::new(300.0, 0.0)));
    let wall_before = (
        *world.get::<Transform>(wall).unwrap(),
        *world.get::<StaticBody>(wall).unwrap(),
    );

    let mut physics = PhysicsSystem::default();
    let mut hits = 0;
    for _ in 0..30 {
        hits += physics.update(&mut world, DT).static_contacts;
    }

    assert!(hits > 0);
    assert_eq!(*world.get::<Transform>(wall).unwrap(), wall_before.0);
    assert_eq!(*world.get::<StaticBody>(wall).unwrap(), wall_before.1);
    // Bounced back off the wall
    assert!(world.get::<RigidBody>(ball).unwrap().velocity().x < 0.0);
}

#[test]
fn test_inelastic_pair_moves_together() {
    let mut world = World::new();
    let a = world.spawn_dynamic(Vec2::new(0.0, 0.0), weightless(Vec2::new(10.0, 0.0)));
    let b = world.spawn_dynamic(Vec2::new(7.0, 0.0), weightless(Vec2::ZERO));

    let config = PhysicsConfig::default().with_restitution_rule(CombineRule::Fixed(0.0));
    let mut physics = PhysicsSystem::new(config);
    physics.update(&mut world, 0.0);

    let va = world.get::<RigidBody>(a).unwrap().velocity();
    let vb = world.get::<RigidBody>(b).unwrap().velocity();
    assert!((va.x - 5.0).abs() < 1e-5);
    assert!((vb.x - 5.0).abs() < 1e-5);
}

#[test]
fn test_momentum_conserved_for_unequal_masses() {
    let mut world = World::new();
    let light = world.spawn_dynamic(Vec2::new(0.0, 0.0), weightless(Vec2::new(12.0, 0.0)));
    let heavy = world.spawn_dynamic(
        Vec2::new(7.0, 0.0),
        weightless(Vec2::new(-2.0, 0.0)).with_mass(5.0),
    );

    let momentum = |world: &World| -> Vec2 {
        [light, heavy]
            .iter()
            .map(|&e| {
                let body = world.get::<RigidBody>(e).unwrap();
                body.velocity() * body.mass()
            })
            .fold(Vec2::ZERO, |acc, p| acc + p)
    };

    let before = momentum(&world);
    PhysicsSystem::default().update(&mut world, 0.0);
    let after = momentum(&world);

    assert!((before - after).length() < 1e-4);
}
