//! Entity Handles with Generational Indices
//!
//! Everything on screen besides the runner is an entity: a slot index plus
//! a generation. Slots are recycled constantly (a run spawns hundreds of
//! coins, bullets and buildings), so the generation makes sure a handle to
//! an entity that scrolled away never matches whatever reused its slot.
//! The shield bubble is held this way across frames.

/// A handle to a world entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index (for component access)
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Hands out entity slots and tracks which handles are still live.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    /// Current generation for each slot
    generations: Vec<u32>,
    /// Free slots, reused LIFO
    free_indices: Vec<u32>,
    alive_count: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity, reusing a freed slot when possible.
    pub fn allocate(&mut self) -> Entity {
        self.alive_count += 1;

        if let Some(index) = self.free_indices.pop() {
            // Generation was already bumped when the slot was freed
            Entity::new(index, self.generations[index as usize])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            Entity::new(index, 0)
        }
    }

    /// Free an entity. Returns false if the handle was already stale.
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }

        self.generations[entity.index as usize] += 1;
        self.free_indices.push(entity.index);
        self.alive_count -= 1;
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.generations
            .get(entity.index as usize)
            .map_or(false, |&gen| gen == entity.generation)
    }

    pub fn alive_count(&self) -> u32 {
        self.alive_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_free() {
        let mut alloc = EntityAllocator::new();

        let e1 = alloc.allocate();
        let e2 = alloc.allocate();
        assert_eq!(alloc.alive_count(), 2);

        assert!(alloc.free(e1));
        assert_eq!(alloc.alive_count(), 1);
        assert!(!alloc.is_alive(e1));
        assert!(alloc.is_alive(e2));
    }

    #[test]
    fn test_stale_handle_does_not_match_reused_slot() {
        let mut alloc = EntityAllocator::new();

        let coin = alloc.allocate();
        alloc.free(coin);
        let bullet = alloc.allocate();

        assert_eq!(bullet.index(), coin.index());
        assert_ne!(bullet.generation(), coin.generation());
        assert!(!alloc.is_alive(coin));
        assert!(alloc.is_alive(bullet));
    }

    #[test]
    fn test_double_free_is_ignored() {
        let mut alloc = EntityAllocator::new();
        let e = alloc.allocate();
        assert!(alloc.free(e));
        assert!(!alloc.free(e));
        assert_eq!(alloc.alive_count(), 0);
    }
}
