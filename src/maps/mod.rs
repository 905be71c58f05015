//! This module provides the concurrent maps the harness can measure.

pub use self::lockfree::LockFreeMap;
pub use self::sharded::ShardedMap;

mod lockfree;
mod sharded;

/// Table size for `capacity` entries at `load_factor`; a non-positive load factor
/// falls back to `capacity`.
fn sized_for(capacity: usize, load_factor: f64) -> usize {
    if load_factor > 0.0 {
        (capacity as f64 / load_factor).ceil() as usize
    } else {
        capacity
    }
}

/// Trait for a concurrent map under test.
///
/// Keys are strings and values are the putter's loop index. All operations take
/// `&self`: one instance is shared by the putter and every getter of a trial, and
/// the implementation is responsible for its own synchronisation.
pub trait ConcurrentMap: Send + Sync {
    /// Short name used in logs and report file names.
    const NAME: &'static str;

    /// Creates an empty map.
    ///
    /// `capacity` is the expected number of entries and `load_factor` the fill ratio
    /// the map should aim for. Implementations that do not pre-size may ignore both.
    fn with_capacity(capacity: usize, load_factor: f64) -> Self
    where
        Self: Sized;

    /// Inserts a key, overwriting the value if the key already exists.
    fn put(&self, key: String, value: u64);

    /// Removes a key, returning whether it was present.
    fn remove(&self, key: &str) -> bool;

    /// Number of live entries.
    fn len(&self) -> usize;

    /// Whether the map is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls `visit` once for every live entry.
    ///
    /// Entries inserted or removed while the traversal runs may or may not be seen;
    /// every entry present for the whole traversal is.
    fn for_each(&self, visit: &mut dyn FnMut(&str, u64));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise<M: ConcurrentMap>() {
        let map = M::with_capacity(16, 0.5);
        assert!(map.is_empty());

        map.put("a".to_owned(), 0);
        map.put("b".to_owned(), 1);
        map.put("a".to_owned(), 2);
        assert_eq!(map.len(), 2);

        let mut seen = Vec::new();
        map.for_each(&mut |k, v| seen.push((k.to_owned(), v)));
        seen.sort();
        assert_eq!(seen, vec![("a".to_owned(), 2), ("b".to_owned(), 1)]);

        assert!(map.remove("a"));
        assert!(!map.remove("a"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn lockfree_map_behaves_as_a_map() {
        exercise::<LockFreeMap>();
    }

    #[test]
    fn sharded_map_behaves_as_a_map() {
        exercise::<ShardedMap>();
    }

    #[test]
    fn table_is_sized_by_load_factor() {
        assert_eq!(sized_for(1000, 0.5), 2000);
        assert_eq!(sized_for(3, 0.75), 4);
        assert_eq!(sized_for(10, 0.0), 10);
    }

    #[test]
    fn zero_capacity_is_accepted() {
        assert!(LockFreeMap::with_capacity(0, 0.5).is_empty());
        assert!(ShardedMap::with_capacity(0, 0.5).is_empty());
        assert!(ShardedMap::with_capacity(10, 0.0).is_empty());
    }
}
