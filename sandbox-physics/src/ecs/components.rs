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
//! Sandbox components
//!
//! Transform, rigid body, static body and sprite data. All components are
//! `Copy` plain data; behavior lives in the physics and render systems.
//!
//! Material coefficients are validated the same way throughout: the plain
//! builder methods panic on out-of-range values (a programming error) and
//! each has a `try_` twin returning [`PhysicsError`].

use crate::ecs::Component;
use crate::error::{PhysicsError, Result};
use crate::math::{Aabb, Vec2};

/// Default gravity in pixels per second squared (pulls toward +Y, screen down)
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, 256.0);

/// Default coefficient of restitution for new bodies
pub const DEFAULT_RESTITUTION: f32 = 0.5;

/// Default coefficient of friction for new bodies
pub const DEFAULT_FRICTION: f32 = 0.5;

fn check_mass(mass: f32) -> Result<f32> {
    // Subnormal masses pass the sign check but have an infinite inverse
    if mass > 0.0 && mass.is_finite() && mass.recip().is_finite() {
        Ok(mass)
    } else {
        Err(PhysicsError::InvalidMass(mass))
    }
}

fn check_restitution(restitution: f32) -> Result<f32> {
    if (0.0..=1.0).contains(&restitution) {
        Ok(restitution)
    } else {
        Err(PhysicsError::InvalidRestitution(restitution))
    }
}

fn check_friction(friction: f32) -> Result<f32> {
    if friction >= 0.0 && friction.is_finite() {
        Ok(friction)
    } else {
        Err(PhysicsError::InvalidFriction(friction))
    }
}

fn unwrap_or_panic<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}

/// World-space placement of an entity
///
/// # Examples
///
/// ```
/// use sandbox_physics::ecs::components::Transform;
/// use sandbox_physics::math::Vec2;
///
/// let t = Transform::from_position(Vec2::new(160.0, 90.0));
/// assert_eq!(t.scale(), Vec2::ONE);
/// assert_eq!(t.rotation(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    position: Vec2,
    rotation: f32,
    scale: Vec2,
}

impl Transform {
    /// Create a transform from all three parts
    pub fn new(position: Vec2, rotation: f32, scale: Vec2) -> Self {
        Transform {
            position,
            rotation,
            scale,
        }
    }

    /// Create an unrotated, unscaled transform at `position`
    pub fn from_position(position: Vec2) -> Self {
        Transform::new(position, 0.0, Vec2::ONE)
    }

    /// World-space position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Set the world-space position
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Move by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Rotation in radians
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Set the rotation in radians
    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    /// Multiplicative scale
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Set the multiplicative scale
    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    /// Check if every field is finite
    pub fn is_valid(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::from_position(Vec2::ZERO)
    }
}

impl Component for Transform {
    const NAME: &'static str = "Transform";
}

/// Dynamic body moved by gravity, forces and collisions
///
/// # Examples
///
/// ```
/// use sandbox_physics::ecs::components::RigidBody;
/// use sandbox_physics::math::Vec2;
///
/// let body = RigidBody::new()
///     .with_half_extents(Vec2::splat(8.0))
///     .with_mass(2.0)
///     .with_restitution(0.8);
/// assert_eq!(body.inverse_mass(), 0.5);
/// assert!(RigidBody::new().try_with_mass(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    collision_aabb: Aabb,
    velocity: Vec2,
    gravity: Vec2,
    mass: f32,
    restitution: f32,
    friction: f32,
    forces: Vec2,
}

impl RigidBody {
    /// Create a body with the default 8x8 collider, unit mass and screen gravity
    pub fn new() -> Self {
        RigidBody {
            collision_aabb: Aabb::default(),
            velocity: Vec2::ZERO,
            gravity: DEFAULT_GRAVITY,
            mass: 1.0,
            restitution: DEFAULT_RESTITUTION,
            friction: DEFAULT_FRICTION,
            forces: Vec2::ZERO,
        }
    }

    /// Replace the local-space collider
    pub fn with_aabb(mut self, aabb: Aabb) -> Self {
        self.collision_aabb = aabb;
        self
    }

    /// Use a collider centered on the body with the given half extents
    pub fn with_half_extents(self, half_extents: Vec2) -> Self {
        self.with_aabb(Aabb::from_half_extents(half_extents))
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the per-body gravity acceleration
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the mass
    ///
    /// # Panics
    ///
    /// Panics if the mass is zero, negative, NaN or infinite. Use
    /// [`RigidBody::try_with_mass`] for fallible construction.
    pub fn with_mass(self, mass: f32) -> Self {
        unwrap_or_panic(self.try_with_mass(mass))
    }

    /// Set the mass, rejecting values that are non-positive, non-finite or
    /// too small to invert
    pub fn try_with_mass(mut self, mass: f32) -> Result<Self> {
        self.mass = check_mass(mass)?;
        Ok(self)
    }

    /// Set the coefficient of restitution
    ///
    /// # Panics
    ///
    /// Panics if the value lies outside [0, 1].
    pub fn with_restitution(self, restitution: f32) -> Self {
        unwrap_or_panic(self.try_with_restitution(restitution))
    }

    /// Set the coefficient of restitution, rejecting values outside [0, 1]
    pub fn try_with_restitution(mut self, restitution: f32) -> Result<Self> {
        self.restitution = check_restitution(restitution)?;
        Ok(self)
    }

    /// Set the coefficient of friction
    ///
    /// # Panics
    ///
    /// Panics if the value is negative or not finite.
    pub fn with_friction(self, friction: f32) -> Self {
        unwrap_or_panic(self.try_with_friction(friction))
    }

    /// Set the coefficient of friction, rejecting negative or non-finite values
    pub fn try_with_friction(mut self, friction: f32) -> Result<Self> {
        self.friction = check_friction(friction)?;
        Ok(self)
    }

    /// Local-space collider
    pub fn collision_aabb(&self) -> Aabb {
        self.collision_aabb
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Overwrite the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Gravity acceleration applied every tick
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Overwrite the gravity acceleration
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    /// Mass (always positive and finite)
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Inverse mass, `1 / mass`
    pub fn inverse_mass(&self) -> f32 {
        1.0 / self.mass
    }

    /// Set the mass
    ///
    /// # Panics
    ///
    /// Panics if the mass is zero, negative, NaN or infinite.
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = unwrap_or_panic(check_mass(mass));
    }

    /// Coefficient of restitution in [0, 1]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Coefficient of friction
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Forces accumulated since the last tick
    pub fn forces(&self) -> Vec2 {
        self.forces
    }

    /// Add a force for the next tick; it is applied once and then cleared
    pub fn apply_force(&mut self, force: Vec2) {
        self.forces += force;
    }

    /// Drop any accumulated force
    pub fn clear_forces(&mut self) {
        self.forces = Vec2::ZERO;
    }

    /// Check if the dynamic state is finite
    pub fn is_valid(&self) -> bool {
        self.velocity.is_finite() && self.forces.is_finite()
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        RigidBody::new()
    }
}

impl Component for RigidBody {
    const NAME: &'static str = "RigidBody";
}

/// Immovable collider such as a wall or floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBody {
    collision_aabb: Aabb,
    restitution: f32,
    friction: f32,
}

impl StaticBody {
    /// Create a static body with the default 8x8 collider
    pub fn new() -> Self {
        StaticBody {
            collision_aabb: Aabb::default(),
            restitution: DEFAULT_RESTITUTION,
            friction: DEFAULT_FRICTION,
        }
    }

    /// Replace the local-space collider
    pub fn with_aabb(mut self, aabb: Aabb) -> Self {
        self.collision_aabb = aabb;
        self
    }

    /// Use a collider centered on the body with the given half extents
    pub fn with_half_extents(self, half_extents: Vec2) -> Self {
        self.with_aabb(Aabb::from_half_extents(half_extents))
    }

    /// Set the coefficient of restitution
    ///
    /// # Panics
    ///
    /// Panics if the value lies outside [0, 1].
    pub fn with_restitution(self, restitution: f32) -> Self {
        unwrap_or_panic(self.try_with_restitution(restitution))
    }

    /// Set the coefficient of restitution, rejecting values outside [0, 1]
    pub fn try_with_restitution(mut self, restitution: f32) -> Result<Self> {
        self.restitution = check_restitution(restitution)?;
        Ok(self)
    }

    /// Set the coefficient of friction
    ///
    /// # Panics
    ///
    /// Panics if the value is negative or not finite.
    pub fn with_friction(self, friction: f32) -> Self {
        unwrap_or_panic(self.try_with_friction(friction))
    }

    /// Set the coefficient of friction, rejecting negative or non-finite values
    pub fn try_with_friction(mut self, friction: f32) -> Result<Self> {
        self.friction = check_friction(friction)?;
        Ok(self)
    }

    /// Local-space collider
    pub fn collision_aabb(&self) -> Aabb {
        self.collision_aabb
    }

    /// Coefficient of restitution in [0, 1]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Coefficient of friction
    pub fn friction(&self) -> f32 {
        self.friction
    }
}

impl Default for StaticBody {
    fn default() -> Self {
        StaticBody::new()
    }
}

impl Component for StaticBody {
    const NAME: &'static str = "StaticBody";
}

/// Opaque handle to a texture owned by an external renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u32);

/// Sprite drawn centered on its entity's transform
///
/// `bounds` is derived data, refreshed by
/// [`SpriteBoundsSystem`](crate::render::SpriteBoundsSystem) after physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    texture: TextureId,
    size: Vec2,
    bounds: Aabb,
}

impl Sprite {
    /// Create a sprite of `size` pixels; bounds start as an unplaced box
    pub fn new(texture: TextureId, size: Vec2) -> Self {
        Sprite {
            texture,
            size,
            bounds: Aabb::from_half_extents(size * 0.5),
        }
    }

    /// Texture handle
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// Unscaled size in pixels
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// World-space render bounds as of the last bounds refresh
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub(crate) fn set_bounds(&mut self, bounds: Aabb) {
        self.bounds = bounds;
    }
}

impl Component for Sprite {
    const NAME: &'static str = "Sprite";
}
