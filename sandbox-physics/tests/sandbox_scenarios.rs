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
//! Long-running sandbox scenarios
//!
//! Drops bodies into a walled play field and checks that they come to rest
//! on the floor without sinking into it.

use sandbox_physics::ecs::components::{RigidBody, Transform};
use sandbox_physics::ecs::World;
use sandbox_physics::math::Vec2;
use sandbox_physics::physics::bounds::spawn_world_bounds;
use sandbox_physics::physics::{total_kinetic_energy, PhysicsSystem};

const DT: f32 = 1.0 / 60.0;
const WIDTH: f32 = 320.0;
const HEIGHT: f32 = 180.0;
const EPSILON: f32 = 1e-3;

#[test]
fn test_box_settles_on_floor() {
    let mut world = World::new();
    spawn_world_bounds(&mut world, WIDTH, HEIGHT, 16.0);
    let body = world.spawn_dynamic(
        Vec2::new(160.0, 90.0),
        RigidBody::new().with_half_extents(Vec2::splat(8.0)),
    );

    let mut physics = PhysicsSystem::default();
    for tick in 0..600 {
        physics.update(&mut world, DT);

        let y = world.get::<Transform>(body).unwrap().position().y;
        assert!(
            y + 8.0 <= HEIGHT + EPSILON,
            "tick {}: bottom edge {} sank below the floor",
            tick,
            y + 8.0
        );
    }

    let position = world.get::<Transform>(body).unwrap().position();
    assert!((position.y - 172.0).abs() < 0.1, "rested at {}", position.y);
    assert!((position.x - 160.0).abs() < EPSILON);
}

#[test]
fn test_bounce_heights_decay() {
    let mut world = World::new();
    spawn_world_bounds(&mut world, WIDTH, HEIGHT, 16.0);
    let body = world.spawn_dynamic(
        Vec2::new(160.0, 20.0),
        RigidBody::new().with_half_extents(Vec2::splat(8.0)),
    );

    let mut physics = PhysicsSystem::default();
    let mut apexes = Vec::new();
    let mut previous_vy = 0.0_f32;
    for _ in 0..600 {
        physics.update(&mut world, DT);
        let vy = world.get::<RigidBody>(body).unwrap().velocity().y;
        if previous_vy < 0.0 && vy >= 0.0 {
            apexes.push(world.get::<Transform>(body).unwrap().position().y);
        }
        previous_vy = vy;
    }

    assert!(apexes.len() >= 2, "expected several bounces, saw {:?}", apexes);
    // Larger y is lower on screen, so each apex sits below the last
    assert!(
        apexes.windows(2).all(|pair| pair[1] > pair[0] - EPSILON),
        "{:?}",
        apexes
    );
}

#[test]
fn test_walls_contain_fast_bodies() {
    let launches = [
        Vec2::new(240.0, -120.0),
        Vec2::new(-240.0, -120.0),
        Vec2::new(180.0, 200.0),
        Vec2::new(-60.0, -240.0),
    ];

    for velocity in launches {
        let mut world = World::new();
        spawn_world_bounds(&mut world, WIDTH, HEIGHT, 32.0);
        let body = world.spawn_dynamic(
            Vec2::new(160.0, 60.0),
            RigidBody::new()
                .with_half_extents(Vec2::splat(6.0))
                .with_velocity(velocity),
        );

        let mut physics = PhysicsSystem::default();
        for _ in 0..900 {
            physics.update(&mut world, DT);
            let position = world.get::<Transform>(body).unwrap().position();
            assert!(
                position.x >= 0.0 && position.x <= WIDTH,
                "launch {} escaped at {}",
                velocity,
                position
            );
            assert!(
                position.y >= 0.0 && position.y <= HEIGHT,
                "launch {} escaped at {}",
                velocity,
                position
            );
        }
    }
}

#[test]
fn test_stack_loses_energy_and_stays_finite() {
    let mut world = World::new();
    spawn_world_bounds(&mut world, WIDTH, HEIGHT, 16.0);
    for i in 0..5 {
        world.spawn_dynamic(
            Vec2::new(160.0 + (i % 2) as f32 * 3.0, 40.0 + i as f32 * 18.0),
            RigidBody::new().with_half_extents(Vec2::splat(8.0)),
        );
    }

    let mut physics = PhysicsSystem::default();
    let mut peak = 0.0_f32;
    for _ in 0..1200 {
        physics.update(&mut world, DT);
        peak = peak.max(total_kinetic_energy(&world));
    }

    for (_, body) in world.storage::<RigidBody>().iter() {
        assert!(body.is_valid());
    }
    for (_, transform) in world.storage::<Transform>().iter() {
        assert!(transform.is_valid());
    }
    assert!(total_kinetic_energy(&world) < peak);
}
