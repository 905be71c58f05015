use super::ConcurrentMap;
use papaya::HashMap;

/// Lock-free hash map, a wrapper of `papaya::HashMap`.
///
/// Readers traverse without blocking the writer and the writer never takes a lock.
/// The table is pre-sized to `capacity / load_factor` entries.
pub struct LockFreeMap(HashMap<String, u64>);

impl ConcurrentMap for LockFreeMap {
    const NAME: &'static str = "papaya";

    fn with_capacity(capacity: usize, load_factor: f64) -> Self {
        LockFreeMap(HashMap::with_capacity(super::sized_for(capacity, load_factor)))
    }

    fn put(&self, key: String, value: u64) {
        self.0.pin().insert(key, value);
    }

    fn remove(&self, key: &str) -> bool {
        self.0.pin().remove(key).is_some()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn for_each(&self, visit: &mut dyn FnMut(&str, u64)) {
        let guard = self.0.pin();
        for (key, value) in guard.iter() {
            visit(key, *value);
        }
    }
}
