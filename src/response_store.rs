//! Bounded, time-ordered store of `ProbeResult`s for one site.
//!
//! Grounded on `FixedSizeQueue` in the system this crate is modeled on: probe
//! results arrive already close to sorted order (one producer, monotonically
//! increasing `start`), so a tail-scan insert is amortized O(1) and keeps the
//! whole structure trivially query-able by range, which a heap would not.

use std::sync::Mutex;

use crate::models::ProbeResult;

/// A single site's bounded, ascending-by-`start` result buffer.
pub struct ResponseStore {
    capacity: usize,
    inner: Mutex<Vec<ProbeResult>>,
}

impl ResponseStore {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Vec::with_capacity(capacity.min(1024))),
        }
    }

    /// Inserts one result, keeping the buffer sorted ascending by `start`,
    /// then evicts from the head until size is back within capacity.
    pub fn add(&self, result: ProbeResult) {
        let mut guard = self.inner.lock().expect("response store mutex poisoned");

        match guard.last() {
            Some(last) if last.start <= result.start => guard.push(result),
            _ => {
                let mut insert_at = 0;
                for i in (0..guard.len()).rev() {
                    if guard[i].start <= result.start {
                        insert_at = i + 1;
                        break;
                    }
                }
                guard.insert(insert_at, result);
            }
        }

        if guard.len() > self.capacity {
            let overflow = guard.len() - self.capacity;
            guard.drain(0..overflow);
        }
    }

    /// All stored results with `min_t <= start <= max_t`, in ascending order.
    /// Empty if `min_t > max_t`.
    #[must_use]
    pub fn range(&self, min_t: f64, max_t: f64) -> Vec<ProbeResult> {
        if min_t > max_t {
            return Vec::new();
        }
        let guard = self.inner.lock().expect("response store mutex poisoned");

        let lo = guard.partition_point(|r| r.start < min_t);
        let hi = guard.partition_point(|r| r.start <= max_t);
        guard[lo..hi].to_vec()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("response store mutex poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: f64) -> ProbeResult {
        ProbeResult::new(start, 200, 0.0)
    }

    #[test]
    fn ring_ordering_with_out_of_order_inserts() {
        let store = ResponseStore::new(5);
        for start in [0.0, 1.0, 5.0, 2.0, 4.0, 3.0] {
            store.add(r(start));
        }
        let all = store.range(f64::MIN, f64::MAX);
        let starts: Vec<f64> = all.iter().map(|x| x.start).collect();
        assert_eq!(starts, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn range_slices_inclusive() {
        let store = ResponseStore::new(5);
        for start in [1.0, 2.0, 3.0, 4.0, 5.0] {
            store.add(r(start));
        }
        let starts = |lo, hi| -> Vec<f64> { store.range(lo, hi).iter().map(|x| x.start).collect() };
        assert_eq!(starts(3.0, 4.0), vec![3.0, 4.0]);
        assert_eq!(starts(2.0, 5.0), vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn range_empty_when_min_exceeds_max() {
        let store = ResponseStore::new(5);
        store.add(r(1.0));
        assert!(store.range(4.0, 3.0).is_empty());
    }

    #[test]
    fn evicts_from_head_over_capacity() {
        let store = ResponseStore::new(3);
        for start in [1.0, 2.0, 3.0, 4.0, 5.0] {
            store.add(r(start));
        }
        let starts: Vec<f64> = store.range(f64::MIN, f64::MAX).iter().map(|x| x.start).collect();
        assert_eq!(starts, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn expected_case_appends_in_order() {
        let store = ResponseStore::new(10);
        for start in [1.0, 2.0, 3.0] {
            store.add(r(start));
        }
        assert_eq!(store.len(), 3);
    }
}
