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
//! # Sandbox Physics
//!
//! An ECS (Entity Component System) based 2D physics core for sprite
//! sandboxes: axis-aligned boxes, gravity, bouncing and sliding.
//!
//! ## Features
//!
//! - **ECS Architecture**: Dense component storage owned by a `World`
//! - **Rigid Bodies**: Semi-implicit Euler integration with per-body gravity and forces
//! - **Collisions**: AABB contacts with impulse response, friction and positional correction
//! - **Static Colliders**: Immovable walls, including a ready-made play-field boundary
//! - **Parallelization**: Optional Rayon integration for per-body work
//!
//! ## Example
//!
//! ```rust
//! use sandbox_physics::ecs::World;
//! use sandbox_physics::ecs::components::{RigidBody, Transform};
//! use sandbox_physics::math::Vec2;
//! use sandbox_physics::physics::{bounds::spawn_world_bounds, PhysicsSystem};
//!
//! let mut world = World::new();
//! spawn_world_bounds(&mut world, 320.0, 180.0, 16.0);
//! let crate_box = world.spawn_dynamic(
//!     Vec2::new(160.0, 90.0),
//!     RigidBody::new().with_half_extents(Vec2::splat(8.0)),
//! );
//!
//! let mut physics = PhysicsSystem::default();
//! for _ in 0..600 {
//!     physics.update(&mut world, 1.0 / 60.0);
//! }
//!
//! let y = world.get::<Transform>(crate_box).unwrap().position().y;
//! assert!((y - 172.0).abs() < 0.1);
//! ```

#![warn(missing_docs)]

/// Entity Component System implementation
pub mod ecs;

/// Error types for fallible construction and world operations
pub mod error;

/// 2D vector and box primitives
pub mod math;

/// Integration, collision detection and response
pub mod physics;

/// Sprite bounds and view culling
pub mod render;

/// Fixed-timestep accumulator
pub mod timestep;

pub use ecs::{Entity, World};
pub use error::{PhysicsError, Result};
pub use math::{Aabb, Vec2};
pub use physics::{PhysicsConfig, PhysicsSystem, StepStats};
