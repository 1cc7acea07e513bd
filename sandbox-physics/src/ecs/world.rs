//! World management
//!
//! The World is the central container for all ECS data. It owns the entity
//! manager and one dense storage per component type, so tests and hosts can
//! build fully isolated simulations.

use crate::ecs::components::{RigidBody, Sprite, StaticBody, Transform};
use crate::ecs::{Component, ComponentStorage, DenseStorage, Entity, EntityManager};
use crate::error::{PhysicsError, Result};
use crate::math::Vec2;

/// Component types the [`World`] knows how to store
///
/// Implemented for the four sandbox components; it maps a type to its
/// storage so that `world.get::<RigidBody>(e)` needs no runtime lookup.
pub trait StoredComponent: Component + Copy {
    /// Shared access to this type's storage
    fn storage(world: &World) -> &DenseStorage<Self>;

    /// Exclusive access to this type's storage
    fn storage_mut(world: &mut World) -> &mut DenseStorage<Self>;
}

/// The main ECS world container
pub struct World {
    entities: EntityManager,
    pub(crate) transforms: DenseStorage<Transform>,
    pub(crate) rigid_bodies: DenseStorage<RigidBody>,
    pub(crate) static_bodies: DenseStorage<StaticBody>,
    pub(crate) sprites: DenseStorage<Sprite>,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        World {
            entities: EntityManager::new(),
            transforms: DenseStorage::new(),
            rigid_bodies: DenseStorage::new(),
            static_bodies: DenseStorage::new(),
            sprites: DenseStorage::new(),
        }
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        self.entities.create()
    }

    /// Destroy an entity and every component attached to it
    ///
    /// Returns false if the entity was not alive; its components (if any
    /// were somehow left behind) are still removed.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        self.transforms.remove(entity);
        self.rigid_bodies.remove(entity);
        self.static_bodies.remove(entity);
        self.sprites.remove(entity);
        self.entities.destroy(entity)
    }

    /// Check if an entity is alive
    pub fn is_entity_alive(&self, entity: Entity) -> bool {
        self.entities.is_active(entity)
    }

    /// Get the number of alive entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get an iterator over all alive entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter()
    }

    /// Clear all entities and components
    ///
    /// Entity identifiers keep counting up afterwards.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.transforms.clear();
        self.rigid_bodies.clear();
        self.static_bodies.clear();
        self.sprites.clear();
    }

    /// Attach a component, returning the one it replaced
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::DeadEntity`] if the entity is not alive.
    pub fn insert<C: StoredComponent>(&mut self, entity: Entity, component: C) -> Result<Option<C>> {
        if !self.entities.is_active(entity) {
            return Err(PhysicsError::DeadEntity(entity));
        }
        Ok(C::storage_mut(self).insert(entity, component))
    }

    /// Detach a component
    pub fn remove<C: StoredComponent>(&mut self, entity: Entity) -> Option<C> {
        C::storage_mut(self).remove(entity)
    }

    /// Get a component
    pub fn get<C: StoredComponent>(&self, entity: Entity) -> Option<&C> {
        C::storage(self).get(entity)
    }

    /// Get a component mutably
    pub fn get_mut<C: StoredComponent>(&mut self, entity: Entity) -> Option<&mut C> {
        C::storage_mut(self).get_mut(entity)
    }

    /// Check if an entity has a component
    pub fn has<C: StoredComponent>(&self, entity: Entity) -> bool {
        C::storage(self).contains(entity)
    }

    /// Shared access to a whole component storage
    pub fn storage<C: StoredComponent>(&self) -> &DenseStorage<C> {
        C::storage(self)
    }

    /// Create an entity with a transform at `position` and a rigid body
    pub fn spawn_dynamic(&mut self, position: Vec2, body: RigidBody) -> Entity {
        let entity = self.create_entity();
        self.transforms.insert(entity, Transform::from_position(position));
        self.rigid_bodies.insert(entity, body);
        entity
    }

    /// Create an entity with a transform at `position` and a static body
    pub fn spawn_static(&mut self, position: Vec2, body: StaticBody) -> Entity {
        let entity = self.create_entity();
        self.transforms.insert(entity, Transform::from_position(position));
        self.static_bodies.insert(entity, body);
        entity
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl StoredComponent for Transform {
    fn storage(world: &World) -> &DenseStorage<Self> {
        &world.transforms
    }

    fn storage_mut(world: &mut World) -> &mut DenseStorage<Self> {
        &mut world.transforms
    }
}

impl StoredComponent for RigidBody {
    fn storage(world: &World) -> &DenseStorage<Self> {
        &world.rigid_bodies
    }

    fn storage_mut(world: &mut World) -> &mut DenseStorage<Self> {
        &mut world.rigid_bodies
    }
}

impl StoredComponent for StaticBody {
    fn storage(world: &World) -> &DenseStorage<Self> {
        &world.static_bodies
    }

    fn storage_mut(world: &mut World) -> &mut DenseStorage<Self> {
        &mut world.static_bodies
    }
}

impl StoredComponent for Sprite {
    fn storage(world: &World) -> &DenseStorage<Self> {
        &world.sprites
    }

    fn storage_mut(world: &mut World) -> &mut DenseStorage<Self> {
        &mut world.sprites
    }
}
