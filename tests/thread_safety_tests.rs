//! Integration tests for sharing and moving the collections across threads.

use redblack::{RbTreeMap, RbTreeSet};
use rstest::rstest;
use static_assertions::{assert_impl_all, assert_not_impl_any};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::thread;

assert_impl_all!(RbTreeMap<String, Vec<u8>>: Send, Sync, Clone, Default);
assert_impl_all!(RbTreeSet<u64>: Send, Sync, Clone, Default);
assert_impl_all!(redblack::map::Iter<'static, i32, i32>: Send, Sync);
assert_impl_all!(redblack::map::IntoIter<String, String>: Send, Sync);
assert_not_impl_any!(RbTreeMap<Rc<i32>, i32>: Send, Sync);
assert_not_impl_any!(RbTreeMap<i32, Cell<i32>>: Sync);
assert_not_impl_any!(RbTreeSet<Rc<i32>>: Send, Sync);

// =============================================================================
// Shared Read Tests
// =============================================================================

#[rstest]
fn test_map_shared_reads_across_threads() {
    let map: Arc<RbTreeMap<i32, i32>> = Arc::new((0..1000).map(|key| (key, key * 2)).collect());

    let handles: Vec<_> = (0..4)
        .map(|index| {
            let map_clone = Arc::clone(&map);
            thread::spawn(move || {
                let start = index * 250;
                map_clone
                    .range(start..start + 250)
                    .map(|(_, value)| i64::from(*value))
                    .sum::<i64>()
            })
        })
        .collect();

    let total: i64 = handles
        .into_iter()
        .map(|handle| handle.join().expect("Thread panicked"))
        .sum();
    assert_eq!(total, (0..1000).map(|key| i64::from(key) * 2).sum::<i64>());
}

// =============================================================================
// Exclusive Write Tests
// =============================================================================

#[rstest]
fn test_set_mutated_behind_mutex() {
    let set = Arc::new(Mutex::new(RbTreeSet::new()));

    let handles: Vec<_> = (0..4)
        .map(|index| {
            let set_clone = Arc::clone(&set);
            thread::spawn(move || {
                for value in (index..400).step_by(4) {
                    set_clone.lock().expect("Mutex poisoned").insert(value);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let set = set.lock().expect("Mutex poisoned");
    assert_eq!(set.len(), 400);
    assert_eq!(set.validate(), Ok(()));
    assert!(set.iter().copied().eq(0..400));
}

#[rstest]
fn test_map_moved_into_thread() {
    let map: RbTreeMap<String, usize> = ["a", "bb", "ccc"]
        .into_iter()
        .map(|word| (word.to_string(), word.len()))
        .collect();
    let handle = thread::spawn(move || map.into_values().sum::<usize>());
    assert_eq!(handle.join().expect("Thread panicked"), 6);
}
