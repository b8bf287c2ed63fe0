//! # Entity Store
//!
//! The in-memory collection owned by a [`ResourceActor`](crate::ResourceActor). Per-entity
//! requests (Get, Update, Action) reach one entry; collection commands receive the whole store
//! so that a selection and the writes that follow it happen inside a single actor message.

use crate::entity::ActorEntity;
use std::collections::HashMap;

/// Entities of one type plus the id sequence used to name new ones.
pub struct EntityStore<T: ActorEntity> {
    items: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> EntityStore<T> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            next_id: 1,
        }
    }

    /// Reserves the next id. Ids are handed out in ascending order starting at 1.
    pub fn allocate_id(&mut self) -> T::Id {
        let id = T::Id::from(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, id: T::Id, item: T) -> Option<T> {
        self.items.insert(id, item)
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.get(id)
    }

    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.items.get_mut(id)
    }

    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        self.items.remove(id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates entries in arbitrary order. Commands that need FIFO order sort explicitly.
    pub fn iter(&self) -> impl Iterator<Item = (&T::Id, &T)> {
        self.items.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.values_mut()
    }
}

impl<T: ActorEntity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
