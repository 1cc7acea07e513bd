//! Entity Component System (ECS) core implementation
//!
//! This module provides the foundational ECS architecture including:
//! - Entity allocation and liveness tracking
//! - Dense, insertion-ordered component storage
//! - The `World` registry that owns every storage
//! - Systems and a staged scheduler

mod component;
pub mod components;
mod entity;
pub mod scheduler;
mod system;
mod world;

pub use component::{Component, ComponentStorage, DenseStorage};
pub use entity::{Entity, EntityManager};
pub use system::System;
pub use world::{StoredComponent, World};
