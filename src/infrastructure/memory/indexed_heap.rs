//! Max-heap of counters addressable by key.
//!
//! The heap array and the key → position map live in one structure so they
//! can only change together.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Entry<K> {
    key: K,
    count: u64,
}

impl<K: Ord> Entry<K> {
    /// Higher count wins; equal counts are ordered by ascending key.
    fn rank(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.key.cmp(&self.key))
    }
}

/// Counter heap supporting in-place increments and non-destructive top-K.
///
/// Counts never decrease, so an increment only ever moves an entry towards
/// the root.
#[derive(Debug, Clone)]
pub struct IndexedMaxHeap<K> {
    entries: Vec<Entry<K>>,
    positions: HashMap<K, usize>,
}

impl<K> Default for IndexedMaxHeap<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<K> IndexedMaxHeap<K>
where
    K: Hash + Eq + Ord + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current count of `key`, if tracked.
    pub fn get<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions
            .get(key)
            .map(|&index| self.entries[index].count)
    }

    /// Adds one to `key`, inserting it with a count of 1 if absent.
    ///
    /// Returns the count after the increment. Runs in `O(log n)`.
    pub fn increment<Q>(&mut self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let index = match self.positions.get(key) {
            Some(&index) => {
                let entry = &mut self.entries[index];
                entry.count = entry.count.saturating_add(1);
                index
            }
            None => {
                let owned = key.to_owned();
                let index = self.entries.len();
                self.positions.insert(owned.clone(), index);
                self.entries.push(Entry {
                    key: owned,
                    count: 1,
                });
                index
            }
        };

        let count = self.entries[index].count;
        self.sift_up(index);
        count
    }

    /// Returns the `k` highest ranked keys with their counts.
    ///
    /// Leaves the heap untouched. Walks it with an auxiliary candidate queue
    /// seeded with the root, so the cost is `O(k log k)` regardless of size.
    pub fn top_k(&self, k: usize) -> Vec<(K, u64)> {
        let mut result = Vec::with_capacity(k.min(self.entries.len()));
        let mut candidates = BinaryHeap::new();

        if k > 0 && !self.entries.is_empty() {
            candidates.push(Candidate {
                entry: &self.entries[0],
                index: 0,
            });
        }

        while result.len() < k {
            let Some(best) = candidates.pop() else {
                break;
            };
            result.push((best.entry.key.clone(), best.entry.count));

            for child in [2 * best.index + 1, 2 * best.index + 2] {
                if let Some(entry) = self.entries.get(child) {
                    candidates.push(Candidate {
                        entry,
                        index: child,
                    });
                }
            }
        }

        result
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entries[index].rank(&self.entries[parent]) != Ordering::Greater {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        if let Some(position) = self.positions.get_mut(&self.entries[a].key) {
            *position = a;
        }
        if let Some(position) = self.positions.get_mut(&self.entries[b].key) {
            *position = b;
        }
    }

    #[cfg(test)]
    fn assert_invariants(&self) {
        assert_eq!(self.entries.len(), self.positions.len());
        for (index, entry) in self.entries.iter().enumerate() {
            assert_eq!(self.positions[&entry.key], index);
            if index > 0 {
                let parent = &self.entries[(index - 1) / 2];
                assert_ne!(entry.rank(parent), Ordering::Greater);
            }
        }
    }
}

struct Candidate<'a, K> {
    entry: &'a Entry<K>,
    index: usize,
}

impl<K: Ord> PartialEq for Candidate<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> Eq for Candidate<'_, K> {}

impl<K: Ord> PartialOrd for Candidate<'_, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for Candidate<'_, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.entry.rank(other.entry)
    }
}
