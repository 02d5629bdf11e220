// Copyright 2026 Rowflow Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Hash table for the build phase of hash joins.
//!
//! Key properties:
//!
//! 1. **Pre-allocated**: Sized upfront from build side cardinality
//! 2. **Flat entries**: Chaining through a flat vector, one entry per row
//! 3. **Zero-allocation probe**: Iterator yields indices without allocation
//! 4. **Full hash stored**: Quick rejection without touching tuple data
//!
//! Duplicate keys are kept: probing a key under which several build tuples
//! were inserted yields every one of them.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::core::{Register, Tuple};

/// Sentinel value indicating end of chain.
const EMPTY: u32 = u32::MAX;

/// Minimum number of buckets (must be power of 2).
const MIN_BUCKETS: usize = 16;

/// A hash entry in the join hash table.
///
/// Each entry represents one tuple from the build side.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
struct HashEntry {
    /// Full 64-bit hash for quick rejection during probe.
    hash: u64,
    /// Index into the build tuples vector.
    row_idx: u32,
    /// Index of next entry in the chain (EMPTY = end of chain).
    next: u32,
}

/// Chained hash table mapping key hashes to build-tuple indices.
pub struct JoinHashTable {
    /// First entry index for each bucket (-1 if empty).
    /// Sized to power of 2 for fast modulo via bitwise AND.
    bucket_heads: Vec<i32>,

    /// Flat storage of all entries, one per build tuple.
    entries: Vec<HashEntry>,

    /// Mask for computing bucket index: bucket = hash & mask
    bucket_mask: u64,

    /// Number of entries inserted.
    len: usize,
}

impl JoinHashTable {
    /// Create a new hash table with capacity for the given number of tuples.
    ///
    /// Bucket count is sized to keep the load factor around 75%.
    pub fn with_capacity(row_count: usize) -> Self {
        let bucket_count = (row_count * 4 / 3).max(MIN_BUCKETS).next_power_of_two();

        Self {
            bucket_heads: vec![-1; bucket_count],
            entries: Vec::with_capacity(row_count),
            bucket_mask: (bucket_count - 1) as u64,
            len: 0,
        }
    }

    /// Build a hash table from tuples keyed on the register at `key_index`.
    ///
    /// Callers must bounds-check `key_index` against the tuples beforehand.
    pub fn build(tuples: &[Tuple], key_index: usize) -> Self {
        let mut table = Self::with_capacity(tuples.len());

        for (idx, tuple) in tuples.iter().enumerate() {
            let hash = hash_key(&tuple[key_index]);
            table.insert(hash, idx as u32);
        }

        table
    }

    /// Insert a tuple index with its pre-computed key hash.
    #[inline]
    pub fn insert(&mut self, hash: u64, row_idx: u32) {
        let bucket = (hash & self.bucket_mask) as usize;

        let old_head = self.bucket_heads[bucket];
        let entry_idx = self.len as u32;
        let next = if old_head >= 0 {
            old_head as u32
        } else {
            EMPTY
        };
        self.entries.push(HashEntry {
            hash,
            row_idx,
            next,
        });

        self.bucket_heads[bucket] = entry_idx as i32;
        self.len += 1;
    }

    /// Probe the hash table for matching tuple indices.
    ///
    /// Yields indices of entries with matching hashes; the caller must verify
    /// actual key equality for each returned index (hash collisions).
    #[inline]
    pub fn probe(&self, hash: u64) -> ProbeIter<'_> {
        let bucket = (hash & self.bucket_mask) as usize;
        ProbeIter {
            table: self,
            hash,
            current: self.bucket_heads[bucket],
        }
    }

    /// Get the number of entries in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Zero-allocation iterator over probe results.
pub struct ProbeIter<'a> {
    table: &'a JoinHashTable,
    hash: u64,
    current: i32,
}

impl Iterator for ProbeIter<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        while self.current >= 0 {
            let entry = &self.table.entries[self.current as usize];
            self.current = if entry.next == EMPTY {
                -1
            } else {
                entry.next as i32
            };

            if entry.hash == self.hash {
                return Some(entry.row_idx as usize);
            }
        }
        None
    }
}

// ============================================================================
// Hashing Utilities
// ============================================================================

/// Hash a join key register into a u64.
///
/// Uses FxHasher; the register's `Hash` impl folds in the variant tag, so an
/// integer key never aliases a string key with the same payload bytes.
#[inline]
pub fn hash_key(key: &Register) -> u64 {
    // Fast path for integer keys, the common case.
    if let Register::Int64(i) = key {
        return (*i as u64).wrapping_mul(0x517cc1b727220a95);
    }

    let mut hasher = FxHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple;

    #[test]
    fn test_build_and_probe() {
        let tuples = vec![tuple![1, 10], tuple![2, 20], tuple![3, 30]];
        let table = JoinHashTable::build(&tuples, 0);
        assert_eq!(table.len(), 3);

        let hash = hash_key(&Register::int(2));
        let matches: Vec<usize> = table.probe(hash).collect();
        assert_eq!(matches, vec![1]);
    }

    #[test]
    fn test_duplicate_keys_all_kept() {
        let tuples = vec![tuple![7, 1], tuple![7, 2], tuple![8, 3], tuple![7, 4]];
        let table = JoinHashTable::build(&tuples, 0);

        let hash = hash_key(&Register::int(7));
        let mut matches: Vec<usize> = table.probe(hash).collect();
        matches.sort_unstable();
        assert_eq!(matches, vec![0, 1, 3]);
    }

    #[test]
    fn test_probe_missing_key() {
        let tuples = vec![tuple![1], tuple![2]];
        let table = JoinHashTable::build(&tuples, 0);

        let hash = hash_key(&Register::int(99));
        assert_eq!(table.probe(hash).count(), 0);
    }

    #[test]
    fn test_string_keys() {
        let tuples = vec![tuple!["x", 1], tuple!["y", 2]];
        let table = JoinHashTable::build(&tuples, 0);

        let key = Register::string("y").unwrap();
        let matches: Vec<usize> = table.probe(hash_key(&key)).collect();
        assert_eq!(matches, vec![1]);
    }

    #[test]
    fn test_empty_table() {
        let table = JoinHashTable::build(&[], 0);
        assert!(table.is_empty());
        assert_eq!(table.probe(hash_key(&Register::int(1))).count(), 0);
    }
}
