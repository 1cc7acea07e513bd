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
//! Error types
//!
//! The simulation step itself never fails; these errors come from fallible
//! construction (`try_*` constructors, configuration validation) and from
//! registry operations on entities that are no longer alive.

use crate::ecs::Entity;
use crate::math::Vec2;
use thiserror::Error;

/// Errors reported by fallible constructors and world operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// A component was attached to an entity that was never created or was destroyed
    #[error("{0} is not alive")]
    DeadEntity(Entity),

    /// Mass must be strictly positive and finite
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f32),

    /// Restitution must lie in [0, 1]
    #[error("coefficient of restitution must be within [0, 1], got {0}")]
    InvalidRestitution(f32),

    /// Friction must be non-negative and finite
    #[error("coefficient of friction must be non-negative and finite, got {0}")]
    InvalidFriction(f32),

    /// Timesteps must be strictly positive and finite
    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),

    /// Box corners are inverted or non-finite
    #[error("invalid AABB: top-left {top_left} must not exceed bottom-right {bottom_right}")]
    InvalidAabb {
        /// Offending minimum corner
        top_left: Vec2,
        /// Offending maximum corner
        bottom_right: Vec2,
    },

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PhysicsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PhysicsError::InvalidMass(0.0);
        assert_eq!(err.to_string(), "mass must be positive and finite, got 0");

        let err = PhysicsError::DeadEntity(Entity::new(7));
        assert_eq!(err.to_string(), "Entity(7) is not alive");

        let err = PhysicsError::InvalidAabb {
            top_left: Vec2::new(1.0, 1.0),
            bottom_right: Vec2::new(0.0, 0.0),
        };
        assert!(err.to_string().contains("(1, 1)"));
    }
}
