//! Component Storage
//!
//! `ComponentStorage<T>` is a sparse array indexed by entity slot. Each
//! filled slot remembers the generation it was inserted for, so lookups with
//! a stale handle miss and iteration yields real handles that can be fed
//! straight back into `World::despawn`.

use super::entity::Entity;

/// Sparse storage for a single component type.
pub struct ComponentStorage<T> {
    data: Vec<Option<(u32, T)>>,
}

impl<T> ComponentStorage<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn ensure_capacity(&mut self, index: usize) {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
    }

    /// Insert a component for an entity, replacing any existing one.
    pub fn insert(&mut self, entity: Entity, component: T) {
        let idx = entity.index() as usize;
        self.ensure_capacity(idx);
        self.data[idx] = Some((entity.generation(), component));
    }

    /// Remove an entity's component, returning it if the handle matched.
    #[cfg(test)]
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        if !self.contains(entity) {
            return None;
        }
        self.data[entity.index() as usize].take().map(|(_, c)| c)
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        match self.data.get(entity.index() as usize) {
            Some(Some((gen, c))) if *gen == entity.generation() => Some(c),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        match self.data.get_mut(entity.index() as usize) {
            Some(Some((gen, c))) if *gen == entity.generation() => Some(c),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn contains(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    /// Iterate over all (entity, component) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.data.iter().enumerate().filter_map(|(idx, slot)| {
            slot.as_ref().map(|(gen, c)| (Entity::new(idx as u32, *gen), c))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.data.iter_mut().enumerate().filter_map(|(idx, slot)| {
            slot.as_mut().map(|(gen, c)| (Entity::new(idx as u32, *gen), c))
        })
    }

    /// Empty a slot regardless of generation (used on despawn).
    pub fn clear_slot(&mut self, index: u32) {
        if let Some(slot) = self.data.get_mut(index as usize) {
            *slot = None;
        }
    }

    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.data.iter().filter(|slot| slot.is_some()).count()
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut storage: ComponentStorage<i32> = ComponentStorage::new();
        let entity = Entity::new(5, 0);

        storage.insert(entity, 42);
        assert_eq!(storage.get(entity), Some(&42));
        assert!(storage.contains(entity));
        assert_eq!(storage.count(), 1);
    }

    #[test]
    fn test_stale_generation_misses() {
        let mut storage: ComponentStorage<&str> = ComponentStorage::new();
        storage.insert(Entity::new(2, 1), "bullet");

        assert_eq!(storage.get(Entity::new(2, 0)), None);
        assert_eq!(storage.remove(Entity::new(2, 0)), None);
        assert_eq!(storage.remove(Entity::new(2, 1)), Some("bullet"));
        assert_eq!(storage.count(), 0);
    }

    #[test]
    fn test_iteration_yields_live_handles() {
        let mut storage: ComponentStorage<&str> = ComponentStorage::new();
        storage.insert(Entity::new(0, 3), "coin");
        storage.insert(Entity::new(4, 1), "enemy");

        let items: Vec<_> = storage.iter().collect();
        assert_eq!(items, vec![(Entity::new(0, 3), &"coin"), (Entity::new(4, 1), &"enemy")]);
    }

    #[test]
    fn test_iter_mut_and_clear_slot() {
        let mut storage: ComponentStorage<f32> = ComponentStorage::new();
        storage.insert(Entity::new(1, 0), 1.0);
        for (_, v) in storage.iter_mut() {
            *v *= 3.0;
        }
        assert_eq!(storage.get(Entity::new(1, 0)), Some(&3.0));

        storage.clear_slot(1);
        assert!(!storage.contains(Entity::new(1, 0)));
    }
}
