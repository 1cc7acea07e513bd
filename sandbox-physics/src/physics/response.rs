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
//! Collision response
//!
//! Impulse-based velocity response with Coulomb-style friction, followed by
//! positional correction that removes the whole penetration in one step.
//! Every function here expects a [`Contact`] whose normal points from the
//! first body toward the second.

use crate::ecs::components::{RigidBody, Transform};
use crate::math::Vec2;
use crate::physics::collision::Contact;

/// Coefficients for a single contact, already combined from both bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactMaterial {
    /// Coefficient of restitution in [0, 1]
    pub restitution: f32,
    /// Coefficient of friction
    pub friction: f32,
}

/// A dynamic body together with its placement
pub struct BodyMut<'a> {
    /// Placement written by positional correction
    pub transform: &'a mut Transform,
    /// Velocity written by the impulse
    pub body: &'a mut RigidBody,
}

/// Resolve an overlap between two rigid bodies
///
/// Applies an impulse along the normal when the bodies approach each other,
/// then friction on each body's tangential velocity, then splits the
/// penetration evenly between both bodies. Returns the impulse magnitude,
/// or `None` when the bodies were already separating.
///
/// Friction is an impulse too: each body's tangential speed drops by at
/// most `friction * j / mass`, so it only equals `friction * j` for a body
/// of unit mass.
pub fn resolve_rigid_pair(
    contact: &Contact,
    material: ContactMaterial,
    first: BodyMut<'_>,
    second: BodyMut<'_>,
) -> Option<f32> {
    let n = contact.normal;
    let v1 = first.body.velocity();
    let v2 = second.body.velocity();
    let inv_m1 = first.body.inverse_mass();
    let inv_m2 = second.body.inverse_mass();

    let v_n = (v1 - v2).dot(n);
    let impulse = if v_n > 0.0 {
        let j = (1.0 + material.restitution) * v_n / (inv_m1 + inv_m2);

        let v1 = v1 - n * (j * inv_m1);
        let v2 = v2 + n * (j * inv_m2);
        first
            .body
            .set_velocity(apply_friction(v1, n, material.friction * j * inv_m1));
        second
            .body
            .set_velocity(apply_friction(v2, n, material.friction * j * inv_m2));
        Some(j)
    } else {
        None
    };

    let half = n * (contact.penetration * 0.5);
    first.transform.translate(-half);
    second.transform.translate(half);

    impulse
}

/// Resolve an overlap between a rigid body and an immovable collider
///
/// The contact normal points from the dynamic body toward the static one.
/// Only the dynamic body is written. Returns true when a velocity response
/// was applied.
pub fn resolve_static_contact(
    contact: &Contact,
    material: ContactMaterial,
    dynamic: BodyMut<'_>,
) -> bool {
    let n = contact.normal.normalized();
    dynamic.transform.translate(-(n * contact.penetration));

    let velocity = dynamic.body.velocity();
    let v_n = velocity.dot(n);
    if v_n <= 0.0 {
        return false;
    }

    let bounce = v_n * (1.0 + material.restitution);
    let velocity = velocity - n * bounce;
    dynamic
        .body
        .set_velocity(apply_friction(velocity, n, material.friction * bounce));
    true
}

/// Shrink the tangential part of `velocity` by up to `max_reduction`
///
/// The tangential speed is clamped at zero, so friction never reverses it.
fn apply_friction(velocity: Vec2, normal: Vec2, max_reduction: f32) -> Vec2 {
    let tangent = velocity - normal * velocity.dot(normal);
    let speed = tangent.length();
    if speed <= 0.0 || max_reduction <= 0.0 {
        return velocity;
    }

    let reduction = max_reduction.min(speed);
    velocity - tangent * (reduction / speed)
}
