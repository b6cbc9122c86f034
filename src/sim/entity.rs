//! Entity arena
//!
//! Spawned obstacles and targets live in a single arena owned by the run. IDs come from a
//! per-run counter, so they are strictly increasing and the backing `Vec` stays sorted by ID
//! with plain pushes. Lookups use binary search.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable entity identity, unique within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// A spawned obstacle (runner) or target (tap game)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Top-left for targets, left edge at ground level for obstacles
    pub pos: Vec2,
    pub size: Vec2,
    /// Run clock (ms) at spawn
    pub created_at_ms: u64,
    /// Run clock (ms) at which the entity expires, if it has a lifetime
    pub deadline_ms: Option<u64>,
}

impl Entity {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.deadline_ms.is_some_and(|deadline| now_ms >= deadline)
    }

    /// Right edge has crossed the left side of the field
    pub fn is_off_field(&self) -> bool {
        self.pos.x + self.size.x <= 0.0
    }
}

/// Ordered store of live entities for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityArena {
    entities: Vec<Entity>,
    next_id: u32,
}

impl EntityArena {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate the next ID without spawning
    fn next_entity_id(&mut self) -> EntityId {
        // Default-constructed arenas start at 0; skip it so IDs are always >= 1
        if self.next_id == 0 {
            self.next_id = 1;
        }
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a new entity and return its ID
    pub fn spawn(
        &mut self,
        pos: Vec2,
        size: Vec2,
        created_at_ms: u64,
        deadline_ms: Option<u64>,
    ) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(Entity {
            id,
            pos,
            size,
            created_at_ms,
            deadline_ms,
        });
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    /// Remove by ID. Removing an absent ID is a no-op returning `None`.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.index_of(id).map(|i| self.entities.remove(i))
    }

    /// Remove every entity matching `pred`, returning the removed IDs in order
    pub fn drain_where(&mut self, mut pred: impl FnMut(&Entity) -> bool) -> Vec<EntityId> {
        let mut removed = Vec::new();
        self.entities.retain(|e| {
            if pred(e) {
                removed.push(e.id);
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_at(arena: &mut EntityArena, x: f32) -> EntityId {
        arena.spawn(Vec2::new(x, 0.0), Vec2::splat(10.0), 0, None)
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut arena = EntityArena::new();
        let ids: Vec<_> = (0..5).map(|i| spawn_at(&mut arena, i as f32)).collect();
        assert_eq!(ids[0], EntityId(1));
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_default_arena_never_hands_out_zero() {
        let mut arena = EntityArena::default();
        assert_eq!(spawn_at(&mut arena, 0.0), EntityId(1));
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut arena = EntityArena::new();
        let a = spawn_at(&mut arena, 0.0);
        arena.remove(a);
        let b = spawn_at(&mut arena, 0.0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut arena = EntityArena::new();
        let a = spawn_at(&mut arena, 0.0);
        let b = spawn_at(&mut arena, 5.0);
        assert!(arena.remove(a).is_some());
        assert!(arena.remove(a).is_none());
        assert_eq!(arena.len(), 1);
        assert!(arena.contains(b));
    }

    #[test]
    fn test_drain_where_keeps_order() {
        let mut arena = EntityArena::new();
        for x in [-20.0, 30.0, -15.0, 40.0] {
            spawn_at(&mut arena, x);
        }
        let removed = arena.drain_where(Entity::is_off_field);
        assert_eq!(removed, vec![EntityId(1), EntityId(3)]);
        let left: Vec<_> = arena.iter().map(|e| e.id).collect();
        assert_eq!(left, vec![EntityId(2), EntityId(4)]);
        // Lookups still work after drain
        assert_eq!(arena.get(EntityId(4)).map(|e| e.pos.x), Some(40.0));
    }

    #[test]
    fn test_off_field_edge() {
        let mut arena = EntityArena::new();
        let id = spawn_at(&mut arena, -10.0);
        // x + width == 0 counts as off-field
        assert!(arena.get(id).unwrap().is_off_field());
        let id = spawn_at(&mut arena, -9.9);
        assert!(!arena.get(id).unwrap().is_off_field());
    }

    #[test]
    fn test_expiry() {
        let mut arena = EntityArena::new();
        let id = arena.spawn(Vec2::ZERO, Vec2::splat(50.0), 100, Some(1600));
        let e = arena.get(id).unwrap();
        assert_eq!(e.created_at_ms, 100);
        assert!(!e.is_expired(1599));
        assert!(e.is_expired(1600));
        let id = spawn_at(&mut arena, 0.0);
        assert!(!arena.get(id).unwrap().is_expired(u64::MAX));
    }
}
