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
//! Entity management
//!
//! Entities are opaque identifiers that tie components together. They own
//! no data themselves and are only ever used as lookup keys.

use std::collections::HashSet;
use std::fmt;

/// Unique identifier for an entity
///
/// Identifiers are allocated by [`EntityManager`] starting at 1 and are
/// never reused, so a stale handle can never alias a newer entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    /// Create an entity handle from a raw identifier
    pub const fn new(id: u32) -> Self {
        Entity(id)
    }

    /// Get the raw identifier
    pub const fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Allocates entity identifiers and tracks which ones are alive
///
/// Destroying an entity here only drops it from the live set. Component
/// cleanup is the job of [`World::destroy_entity`](crate::ecs::World::destroy_entity).
#[derive(Debug)]
pub struct EntityManager {
    next_id: u32,
    active: HashSet<Entity>,
}

impl EntityManager {
    /// Create a manager whose first entity will be `Entity(1)`
    pub fn new() -> Self {
        EntityManager {
            next_id: 1,
            active: HashSet::new(),
        }
    }

    /// Allocate a fresh entity and mark it alive
    ///
    /// # Panics
    ///
    /// Panics if the 32-bit identifier space is exhausted.
    pub fn create(&mut self) -> Entity {
        assert!(self.next_id < u32::MAX, "Entity identifier space exhausted");
        let entity = Entity(self.next_id);
        self.next_id += 1;
        self.active.insert(entity);
        entity
    }

    /// Remove an entity from the live set
    ///
    /// Returns false if the entity was not alive.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        self.active.remove(&entity)
    }

    /// Check if an entity is alive
    pub fn is_active(&self, entity: Entity) -> bool {
        self.active.contains(&entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Check if no entities are alive
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Iterate over live entities in no particular order
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.active.iter().copied()
    }

    /// Forget every live entity
    ///
    /// The identifier counter is not rewound, so handles issued before the
    /// clear stay invalid forever.
    pub fn clear(&mut self) {
        self.active.clear();
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_entity_is_one() {
        let mut manager = EntityManager::new();
        let entity = manager.create();
        assert_eq!(entity.raw(), 1);
        assert!(manager.is_active(entity));
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut manager = EntityManager::new();
        let ids: Vec<u32> = (0..5).map(|_| manager.create().raw()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_destroy_removes_liveness() {
        let mut manager = EntityManager::new();
        let e1 = manager.create();
        let e2 = manager.create();

        assert!(manager.destroy(e1));
        assert!(!manager.is_active(e1));
        assert!(manager.is_active(e2));
        assert_eq!(manager.len(), 1);

        // Second destroy is a no-op
        assert!(!manager.destroy(e1));
    }

    #[test]
    fn test_ids_never_reused() {
        let mut manager = EntityManager::new();
        let e1 = manager.create();
        manager.destroy(e1);
        let e2 = manager.create();
        assert_ne!(e1, e2);
        assert!(e2.raw() > e1.raw());

        manager.clear();
        let e3 = manager.create();
        assert!(e3.raw() > e2.raw());
        assert!(manager.is_active(e3));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(Entity::new(42).to_string(), "Entity(42)");
    }
}
