use super::ConcurrentMap;
use dashmap::DashMap;

/// Lock-based hash map, a wrapper of `dashmap::DashMap`.
///
/// Each shard sits behind its own read-write lock, so a traversal holds one shard's
/// read lock at a time and a put blocks only on the shard it hashes to.
pub struct ShardedMap(DashMap<String, u64>);

impl ConcurrentMap for ShardedMap {
    const NAME: &'static str = "dashmap";

    fn with_capacity(capacity: usize, load_factor: f64) -> Self {
        ShardedMap(DashMap::with_capacity(super::sized_for(capacity, load_factor)))
    }

    fn put(&self, key: String, value: u64) {
        self.0.insert(key, value);
    }

    fn remove(&self, key: &str) -> bool {
        self.0.remove(key).is_some()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn for_each(&self, visit: &mut dyn FnMut(&str, u64)) {
        for entry in self.0.iter() {
            visit(entry.key(), *entry.value());
        }
    }
}
