//! Deferred deletion
//!
//! Both ownership tiers (entity → components, manager → entities) use the
//! same pattern: anyone may raise a one-way flag, and only the owner removes
//! flagged items, after it has finished forwarding the frame's calls.

use std::cell::Cell;

/// One-way "should be removed" marker
///
/// Raising it only needs a shared reference, so holders of a component
/// handle can flag it without a mutable borrow. It cannot be cleared.
#[derive(Debug, Default)]
pub struct DeletionFlag(Cell<bool>);

impl DeletionFlag {
    /// A cleared flag
    pub const fn new() -> Self {
        Self(Cell::new(false))
    }

    /// Raise the flag. Idempotent.
    pub fn mark(&self) {
        self.0.set(true);
    }

    /// Whether the flag has been raised
    pub fn is_set(&self) -> bool {
        self.0.get()
    }
}

/// Anything an owner can sweep out of its collection
pub trait Reapable {
    /// Whether the owner should drop this item at its next reap point
    fn is_for_deletion(&self) -> bool;
}

/// Take every flagged item out of `items`, keeping the relative order of
/// the rest
///
/// The released items are handed back so the owner can log or unregister
/// them before dropping its share.
pub fn reap<T: Reapable>(items: &mut Vec<T>) -> Vec<T> {
    if !items.iter().any(Reapable::is_for_deletion) {
        return Vec::new();
    }

    let (released, kept): (Vec<T>, Vec<T>) = std::mem::take(items)
        .into_iter()
        .partition(Reapable::is_for_deletion);
    *items = kept;
    released
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static str, DeletionFlag);

    impl Item {
        fn new(name: &'static str, dead: bool) -> Self {
            let flag = DeletionFlag::new();
            if dead {
                flag.mark();
            }
            Self(name, flag)
        }
    }

    impl Reapable for Item {
        fn is_for_deletion(&self) -> bool {
            self.1.is_set()
        }
    }

    #[test]
    fn test_flag_is_one_way() {
        let flag = DeletionFlag::new();
        assert!(!flag.is_set());

        flag.mark();
        flag.mark();
        assert!(flag.is_set());
    }

    #[test]
    fn test_reap_preserves_order() {
        let mut items = vec![
            Item::new("a", false),
            Item::new("b", true),
            Item::new("c", false),
            Item::new("d", true),
        ];

        let released = reap(&mut items);

        let kept: Vec<_> = items.iter().map(|item| item.0).collect();
        let gone: Vec<_> = released.iter().map(|item| item.0).collect();
        assert_eq!(kept, ["a", "c"]);
        assert_eq!(gone, ["b", "d"]);
    }

    #[test]
    fn test_reap_without_flags_keeps_everything() {
        let mut items = vec![Item::new("a", false), Item::new("b", false)];
        assert!(reap(&mut items).is_empty());
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_reap_empty() {
        let mut items: Vec<Item> = Vec::new();
        assert!(reap(&mut items).is_empty());
    }
}
