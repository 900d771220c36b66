//! Identity-keyed child storage with an independent display order.
//!
//! Children live in a generational arena. `by_id` maps identities to arena
//! slots and `order` lists the same slots in display order; every mutation
//! keeps the two in lock-step.

use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::capabilities::Identity;
use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone)]
pub struct OrderedChildren<T> {
    arena: Arena<T>,
    by_id: HashMap<String, Index>,
    order: Vec<Index>,
}

impl<T> Default for OrderedChildren<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedChildren<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            by_id: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Store `child` under `id`.
    ///
    /// An existing child with the same identity is replaced in its slot and
    /// keeps its display position; the replaced child is returned.
    #[instrument(level = "trace", skip(self, child))]
    pub fn insert(&mut self, id: String, child: T) -> Option<T> {
        if let Some(&idx) = self.by_id.get(&id) {
            if let Some(slot) = self.arena.get_mut(idx) {
                debug!("identity collision, replacing child in place: {}", id);
                return Some(std::mem::replace(slot, child));
            }
        }
        let idx = self.arena.insert(child);
        self.by_id.insert(id, idx);
        self.order.push(idx);
        None
    }

    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let idx = self.by_id.remove(id)?;
        self.order.retain(|&i| i != idx);
        self.arena.remove(idx)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.by_id.get(id).and_then(|&idx| self.arena.get(idx))
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        let idx = *self.by_id.get(id)?;
        self.arena.get_mut(idx)
    }

    /// Storage order (arena slot order).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.arena.iter().map(|(_, child)| child)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.arena.iter_mut().map(|(_, child)| child)
    }

    /// Display order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|&idx| self.arena.get(idx))
    }

    /// Display order, mutable.
    pub fn iter_ordered_mut(&mut self) -> impl Iterator<Item = &mut T> {
        let mut slots: HashMap<Index, &mut T> = self.arena.iter_mut().collect();
        self.order.iter().filter_map(move |idx| slots.remove(idx))
    }

    fn position(&self, idx: Index) -> Option<usize> {
        self.order.iter().position(|&i| i == idx)
    }

    /// Move `this_id` to immediately precede `before_id`.
    ///
    /// Returns false and leaves the order untouched when either identity is
    /// unknown or both are the same.
    #[instrument(level = "trace", skip(self))]
    pub fn move_before(&mut self, this_id: &str, before_id: &str) -> bool {
        if this_id == before_id {
            return false;
        }
        let (Some(&this_idx), Some(&before_idx)) = (self.by_id.get(this_id), self.by_id.get(before_id))
        else {
            debug!("reorder ignored, unknown child: {} before {}", this_id, before_id);
            return false;
        };
        let Some(from) = self.position(this_idx) else {
            return false;
        };
        self.order.remove(from);
        let Some(to) = self.position(before_idx) else {
            // unreachable while the invariants hold; restore the entry
            self.order.insert(from, this_idx);
            return false;
        };
        self.order.insert(to, this_idx);
        true
    }
}

impl<T: Identity> OrderedChildren<T> {
    /// Identities in display order.
    pub fn order(&self) -> Vec<&str> {
        self.iter_ordered().map(Identity::id).collect()
    }

    /// Verify that `order` is a permutation of the lookup keys and that every
    /// key matches the identity of the child it points to.
    pub fn check_invariants(&self) -> DomainResult<()> {
        if self.order.len() != self.by_id.len() || self.arena.len() != self.by_id.len() {
            return Err(invariant(format!(
                "size mismatch: order={} lookup={} arena={}",
                self.order.len(),
                self.by_id.len(),
                self.arena.len()
            )));
        }
        for (id, &idx) in &self.by_id {
            let child = self
                .arena
                .get(idx)
                .ok_or_else(|| invariant(format!("dangling lookup entry: {id}")))?;
            if child.id() != id {
                return Err(invariant(format!(
                    "lookup key {id} points to child {}",
                    child.id()
                )));
            }
            if self.order.iter().filter(|&&i| i == idx).count() != 1 {
                return Err(invariant(format!(
                    "child {id} is not listed exactly once in order"
                )));
            }
        }
        Ok(())
    }
}

fn invariant(message: String) -> DomainError {
    DomainError::Invariant { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Leaf {
        id: String,
        payload: u32,
    }

    impl Identity for Leaf {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
            self.id = id.into();
            self
        }
    }

    fn leaf(id: &str, payload: u32) -> Leaf {
        Leaf {
            id: id.to_string(),
            payload,
        }
    }

    fn filled(ids: &[&str]) -> OrderedChildren<Leaf> {
        let mut children = OrderedChildren::new();
        for (n, id) in ids.iter().enumerate() {
            children.insert(id.to_string(), leaf(id, n as u32));
        }
        children
    }

    #[test]
    fn given_inserts_when_listing_order_then_follows_insertion() {
        let children = filled(&["a", "b", "c"]);
        assert_eq!(children.order(), vec!["a", "b", "c"]);
        assert_eq!(children.len(), 3);
        assert!(children.check_invariants().is_ok());
    }

    #[test]
    fn given_colliding_identity_when_inserting_then_replaces_in_place() {
        let mut children = filled(&["a", "b", "c"]);

        let replaced = children.insert("a".to_string(), leaf("a", 99));

        assert_eq!(replaced, Some(leaf("a", 0)));
        assert_eq!(children.order(), vec!["a", "b", "c"]);
        assert_eq!(children.get("a").map(|l| l.payload), Some(99));
        assert!(children.check_invariants().is_ok());
    }

    #[test]
    fn given_known_ids_when_moving_before_then_reorders() {
        let mut children = filled(&["a", "b", "c"]);

        assert!(children.move_before("c", "a"));
        assert_eq!(children.order(), vec!["c", "a", "b"]);

        assert!(children.move_before("a", "b"));
        assert_eq!(children.order(), vec!["c", "a", "b"]);

        assert!(children.move_before("c", "b"));
        assert_eq!(children.order(), vec!["a", "c", "b"]);
        assert!(children.check_invariants().is_ok());
    }

    #[test]
    fn given_unknown_or_same_ids_when_moving_then_noop() {
        let mut children = filled(&["a", "b"]);

        assert!(!children.move_before("x", "a"));
        assert!(!children.move_before("a", "x"));
        assert!(!children.move_before("b", "b"));
        assert_eq!(children.order(), vec!["a", "b"]);
    }

    #[test]
    fn given_reordered_children_when_iterating_mutably_then_follows_display_order() {
        let mut children = filled(&["a", "b", "c"]);
        children.move_before("c", "a");

        for (n, child) in children.iter_ordered_mut().enumerate() {
            child.payload = n as u32 * 10;
        }

        assert_eq!(children.order(), vec!["c", "a", "b"]);
        let payloads: Vec<u32> = children.iter_ordered().map(|l| l.payload).collect();
        assert_eq!(payloads, vec![0, 10, 20]);
        assert_eq!(children.get("c").map(|l| l.payload), Some(0));
    }

    #[test]
    fn given_child_when_removing_then_both_views_shrink() {
        let mut children = filled(&["a", "b", "c"]);

        let removed = children.remove("b");

        assert_eq!(removed.map(|l| l.id), Some("b".to_string()));
        assert_eq!(children.order(), vec!["a", "c"]);
        assert!(children.remove("b").is_none());
        assert!(children.check_invariants().is_ok());
    }

    #[test]
    fn given_renamed_child_when_checking_invariants_then_reports_mismatch() {
        let mut children = filled(&["a"]);
        if let Some(child) = children.get_mut("a") {
            child.set_id("z");
        }
        assert!(matches!(
            children.check_invariants(),
            Err(DomainError::Invariant { message }) if message.contains("points to child z")
        ));
    }
}
