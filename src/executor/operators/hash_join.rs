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

//! Hash join operator.
//!
//! Inner equi-join on one attribute per side. The join proceeds in two
//! phases:
//!
//! 1. **Build Phase** (in `open()`): drain the left child and build a hash
//!    table on its join key. Duplicate keys keep every build tuple, so
//!    one-to-many joins produce every match pair.
//! 2. **Probe Phase** (in `next()`): stream the right child one tuple at a
//!    time, look up matches and emit the concatenation `left ++ right`.

use crate::core::{Error, Register, Result, Tuple};
use crate::executor::hash_table::{hash_key, JoinHashTable};
use crate::executor::operator::Operator;

/// Streaming hash join, blocking on its left (build) input.
pub struct HashJoinOperator {
    left: Box<dyn Operator>,
    right: Box<dyn Operator>,
    left_key: usize,
    right_key: usize,

    // Build phase state (populated in open())
    build_tuples: Vec<Tuple>,
    table: Option<JoinHashTable>,

    // Probe phase state
    probe: Tuple,
    matches: Vec<usize>,
    match_idx: usize,

    out: Tuple,
}

impl HashJoinOperator {
    /// Create a hash join of `left.left_key = right.right_key`.
    pub fn new(
        left: Box<dyn Operator>,
        right: Box<dyn Operator>,
        left_key: usize,
        right_key: usize,
    ) -> Self {
        Self {
            left,
            right,
            left_key,
            right_key,
            build_tuples: Vec::new(),
            table: None,
            probe: Tuple::new(),
            matches: Vec::new(),
            match_idx: 0,
            out: Tuple::new(),
        }
    }
}

impl Operator for HashJoinOperator {
    fn open(&mut self) -> Result<()> {
        self.left.open()?;
        self.right.open()?;

        // Materialize the build side.
        let mut build_tuples = Vec::new();
        while self.left.next()? {
            let regs = self.left.output();
            if self.left_key >= regs.len() {
                return Err(Error::column_index_out_of_bounds(
                    self.left_key,
                    regs.len(),
                ));
            }
            build_tuples.push(Tuple::from_values(regs.to_vec()));
        }

        self.table = Some(JoinHashTable::build(&build_tuples, self.left_key));
        self.build_tuples = build_tuples;
        Ok(())
    }

    fn next(&mut self) -> Result<bool> {
        loop {
            // Emit pending matches for the current probe tuple.
            while self.match_idx < self.matches.len() {
                let idx = self.matches[self.match_idx];
                self.match_idx += 1;

                let build = &self.build_tuples[idx];
                // Verify actual key equality (hash collisions).
                if build[self.left_key] == self.probe[self.right_key] {
                    self.out.clear();
                    self.out.extend_from_slice(build);
                    self.out.extend_from_slice(&self.probe);
                    return Ok(true);
                }
            }

            // Pull the next probe tuple.
            if !self.right.next()? {
                self.out.clear();
                return Ok(false);
            }
            let regs = self.right.output();
            if self.right_key >= regs.len() {
                return Err(Error::column_index_out_of_bounds(
                    self.right_key,
                    regs.len(),
                ));
            }
            self.probe.clear();
            self.probe.extend_from_slice(regs);

            let table = match &self.table {
                Some(table) => table,
                None => {
                    return Err(Error::internal(
                        "HashJoinOperator::next called before open",
                    ));
                }
            };
            let hash = hash_key(&self.probe[self.right_key]);
            self.matches.clear();
            self.matches.extend(table.probe(hash));
            self.match_idx = 0;
        }
    }

    fn output(&self) -> &[Register] {
        self.out.as_slice()
    }

    fn close(&mut self) -> Result<()> {
        self.build_tuples.clear();
        self.left.close()?;
        self.right.close()
    }

    fn name(&self) -> &str {
        "HashJoin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::operator::test_support::collect_results;
    use crate::executor::operator::MaterializedOperator;
    use crate::tuple;

    fn make_source(tuples: Vec<Tuple>) -> Box<dyn Operator> {
        Box::new(MaterializedOperator::new(tuples))
    }

    #[test]
    fn test_inner_join() {
        let left = make_source(vec![tuple![1, "x"], tuple![2, "y"]]);
        let right = make_source(vec![tuple![2, "p"], tuple![3, "q"]]);

        let mut join = HashJoinOperator::new(left, right, 0, 0);
        let results = collect_results(&mut join).unwrap();

        assert_eq!(results, vec![tuple![2, "y", 2, "p"]]);
    }

    #[test]
    fn test_join_key_equality_holds() {
        let left = make_source(vec![tuple![1, 10], tuple![2, 20], tuple![3, 30]]);
        let right = make_source(vec![tuple![100, 1], tuple![200, 3], tuple![300, 9]]);

        let mut join = HashJoinOperator::new(left, right, 0, 1);
        let results = collect_results(&mut join).unwrap();

        assert_eq!(results.len(), 2);
        for row in &results {
            assert_eq!(row[0], row[3]);
        }
    }

    #[test]
    fn test_one_to_many_join() {
        // Two build tuples share key 7; each matching probe yields both.
        let left = make_source(vec![tuple![7, "a"], tuple![7, "b"], tuple![8, "c"]]);
        let right = make_source(vec![tuple![7, "p"], tuple![7, "q"]]);

        let mut join = HashJoinOperator::new(left, right, 0, 0);
        let mut results = collect_results(&mut join).unwrap();
        results.sort();

        assert_eq!(
            results,
            vec![
                tuple![7, "a", 7, "p"],
                tuple![7, "a", 7, "q"],
                tuple![7, "b", 7, "p"],
                tuple![7, "b", 7, "q"],
            ]
        );
    }

    #[test]
    fn test_join_string_keys() {
        let left = make_source(vec![tuple!["k1", 1], tuple!["k2", 2]]);
        let right = make_source(vec![tuple!["k2", 20]]);

        let mut join = HashJoinOperator::new(left, right, 0, 0);
        let results = collect_results(&mut join).unwrap();

        assert_eq!(results, vec![tuple!["k2", 2, "k2", 20]]);
    }

    #[test]
    fn test_empty_build_side() {
        let left = make_source(vec![]);
        let right = make_source(vec![tuple![1], tuple![2]]);

        let mut join = HashJoinOperator::new(left, right, 0, 0);
        let results = collect_results(&mut join).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_empty_probe_side() {
        let left = make_source(vec![tuple![1], tuple![2]]);
        let right = make_source(vec![]);

        let mut join = HashJoinOperator::new(left, right, 0, 0);
        let results = collect_results(&mut join).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_join_next_before_open() {
        let mut join = HashJoinOperator::new(
            make_source(vec![tuple![1]]),
            make_source(vec![tuple![1]]),
            0,
            0,
        );
        assert!(join.next().is_err());
    }
}
