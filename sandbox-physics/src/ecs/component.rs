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
//! Component storage
//!
//! Components are plain data attached to entities. Storage is dense and
//! keeps a stable iteration order, which the physics system relies on for
//! reproducible pair ordering.

use crate::ecs::Entity;
use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Trait that all components must implement
///
/// Components should be plain data structures without behavior.
pub trait Component: 'static + Send + Sync {
    /// Human-readable component name used in log messages
    const NAME: &'static str;
}

/// Storage interface for components
pub trait ComponentStorage: Send + Sync {
    /// The component type this storage manages
    type Component: Component;

    /// Insert a component, returning the one it replaced
    fn insert(&mut self, entity: Entity, component: Self::Component) -> Option<Self::Component>;

    /// Remove a component for the given entity
    fn remove(&mut self, entity: Entity) -> Option<Self::Component>;

    /// Get a reference to a component for the given entity
    fn get(&self, entity: Entity) -> Option<&Self::Component>;

    /// Get a mutable reference to a component for the given entity
    fn get_mut(&mut self, entity: Entity) -> Option<&mut Self::Component>;

    /// Check if an entity has this component
    fn contains(&self, entity: Entity) -> bool;

    /// Number of stored components
    fn len(&self) -> usize;

    /// Check if the storage is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all components
    fn clear(&mut self);
}

/// Dense, insertion-ordered component storage
///
/// Components live in one contiguous array with a sparse entity-to-index
/// map beside it. Iteration follows insertion order; removing an entity
/// moves the last component into the vacated slot.
///
/// # Example
///
/// ```
/// use sandbox_physics::ecs::{ComponentStorage, DenseStorage, Entity};
/// use sandbox_physics::ecs::components::Transform;
/// use sandbox_physics::math::Vec2;
///
/// let mut storage = DenseStorage::<Transform>::new();
/// let entity = Entity::new(1);
///
/// storage.insert(entity, Transform::from_position(Vec2::new(1.0, 2.0)));
/// assert!(storage.contains(entity));
/// assert_eq!(storage.get(entity).unwrap().position().x, 1.0);
/// ```
pub struct DenseStorage<T: Component> {
    /// Mapping from Entity to dense array index
    entity_to_index: HashMap<Entity, usize>,
    /// Mapping from dense array index back to Entity (for swap_remove)
    index_to_entity: Vec<Entity>,
    components: Vec<T>,
}

impl<T: Component> DenseStorage<T> {
    /// Create a new empty storage
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new storage with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        DenseStorage {
            entity_to_index: HashMap::with_capacity(capacity),
            index_to_entity: Vec::with_capacity(capacity),
            components: Vec::with_capacity(capacity),
        }
    }

    /// Entities that have a component here, in storage order
    pub fn entities(&self) -> impl ExactSizeIterator<Item = Entity> + '_ {
        self.index_to_entity.iter().copied()
    }

    /// Dense component slice in storage order
    pub fn components(&self) -> &[T] {
        &self.components
    }

    /// Iterate over `(entity, component)` pairs in storage order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
        self.index_to_entity.iter().copied().zip(self.components.iter())
    }

    /// Mutably iterate over `(entity, component)` pairs in storage order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_ {
        self.index_to_entity
            .iter()
            .copied()
            .zip(self.components.iter_mut())
    }

    /// Parallel mutable iteration over `(entity, component)` pairs
    ///
    /// The iterator is indexed, so `collect` preserves storage order.
    #[cfg(feature = "parallel")]
    pub fn par_iter_mut(&mut self) -> impl IndexedParallelIterator<Item = (Entity, &mut T)> + '_ {
        self.index_to_entity
            .par_iter()
            .copied()
            .zip(self.components.par_iter_mut())
    }

    /// Get the dense index for an entity, if it exists
    pub fn get_index(&self, entity: Entity) -> Option<usize> {
        self.entity_to_index.get(&entity).copied()
    }
}

impl<T: Component> Default for DenseStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> ComponentStorage for DenseStorage<T> {
    type Component = T;

    fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        if let Some(&index) = self.entity_to_index.get(&entity) {
            return Some(std::mem::replace(&mut self.components[index], component));
        }

        let new_index = self.components.len();
        self.components.push(component);
        self.entity_to_index.insert(entity, new_index);
        self.index_to_entity.push(entity);

        debug_assert_eq!(self.entity_to_index.len(), self.index_to_entity.len());
        debug_assert_eq!(self.entity_to_index.len(), self.components.len());
        None
    }

    fn remove(&mut self, entity: Entity) -> Option<T> {
        let index = self.entity_to_index.remove(&entity)?;

        let component = self.components.swap_remove(index);
        self.index_to_entity.swap_remove(index);
        if let Some(&moved) = self.index_to_entity.get(index) {
            self.entity_to_index.insert(moved, index);
        }

        debug_assert_eq!(self.entity_to_index.len(), self.index_to_entity.len());
        debug_assert_eq!(self.entity_to_index.len(), self.components.len());
        Some(component)
    }

    fn get(&self, entity: Entity) -> Option<&T> {
        let index = self.entity_to_index.get(&entity)?;
        Some(&self.components[*index])
    }

    fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let index = self.entity_to_index.get(&entity)?;
        Some(&mut self.components[*index])
    }

    fn contains(&self, entity: Entity) -> bool {
        self.entity_to_index.contains_key(&entity)
    }

    fn len(&self) -> usize {
        self.components.len()
    }

    fn clear(&mut self) {
        self.entity_to_index.clear();
        self.index_to_entity.clear();
        self.components.clear();
    }
}
