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
//! Falling boxes example
//!
//! Drops a handful of boxes into a 320x180 play field and steps the
//! simulation with a fixed timestep until they settle. Run with
//! `RUST_LOG=debug` to see per-step statistics.

use sandbox_physics::ecs::components::{RigidBody, Sprite, TextureId, Transform};
use sandbox_physics::ecs::scheduler::{stages, Scheduler};
use sandbox_physics::ecs::World;
use sandbox_physics::math::{Aabb, Vec2};
use sandbox_physics::physics::bounds::spawn_world_bounds;
use sandbox_physics::physics::{total_kinetic_energy, PhysicsSystem};
use sandbox_physics::render::{sprites_in_view, SpriteBoundsSystem};
use sandbox_physics::timestep::FixedTimestep;

const WIDTH: f32 = 320.0;
const HEIGHT: f32 = 180.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Sandbox Physics - Falling Boxes");
    println!("===============================\n");

    let mut world = World::new();
    let walls = spawn_world_bounds(&mut world, WIDTH, HEIGHT, 16.0);
    log::info!("play field {}x{} enclosed by {:?}", WIDTH, HEIGHT, walls);

    let mut boxes = Vec::new();
    for i in 0..6 {
        let position = Vec2::new(60.0 + i as f32 * 40.0, 20.0 + (i % 3) as f32 * 25.0);
        let body = RigidBody::new()
            .with_half_extents(Vec2::splat(8.0))
            .with_velocity(Vec2::new(if i % 2 == 0 { 40.0 } else { -40.0 }, 0.0))
            .with_restitution(0.3 + 0.1 * (i % 3) as f32);
        let entity = world.spawn_dynamic(position, body);
        world
            .insert(entity, Sprite::new(TextureId(i), Vec2::splat(16.0)))
            .expect("entity was just spawned");
        boxes.push(entity);
    }
    println!("Spawned {} boxes\n", boxes.len());

    let mut scheduler = Scheduler::new();
    scheduler.add_system(PhysicsSystem::default(), stages::PHYSICS);
    scheduler.add_system(SpriteBoundsSystem::new(), stages::POST_PHYSICS);

    // Simulate five seconds of uneven 30-70 fps frames
    let mut clock = FixedTimestep::default();
    let frame_times = [1.0 / 30.0, 1.0 / 70.0, 1.0 / 45.0, 1.0 / 60.0];
    let mut elapsed = 0.0;
    let mut frame = 0;
    while elapsed < 5.0 {
        let frame_time = frame_times[frame % frame_times.len()];
        clock.advance(frame_time, |_dt| scheduler.run(&mut world));
        elapsed += frame_time;
        frame += 1;

        if frame % 60 == 0 {
            println!(
                "t = {:>5.2}s  kinetic energy = {:>10.2}",
                elapsed,
                total_kinetic_energy(&world)
            );
        }
    }

    println!("\nFinal positions:");
    for entity in &boxes {
        let transform = world.get::<Transform>(*entity).expect("box has a transform");
        println!("  {} at {}", entity, transform.position());
    }

    let view = Aabb::new(Vec2::ZERO, Vec2::new(WIDTH, HEIGHT));
    println!(
        "\n{} of {} sprites visible in the {}x{} view",
        sprites_in_view(&world, &view).len(),
        boxes.len(),
        WIDTH,
        HEIGHT
    );
}
