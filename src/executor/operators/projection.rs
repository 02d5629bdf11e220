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

//! Projection operator.

use crate::core::{Error, Register, Result};
use crate::executor::operator::Operator;

/// Streaming column subset.
///
/// Configured with an ordered list of column indices; indices may repeat and
/// appear in any order. The k-th output column is a copy of the input's
/// `indices[k]`-th column. An out-of-range index is reported as an error.
pub struct ProjectionOperator {
    input: Box<dyn Operator>,
    indices: Vec<usize>,
    out: Vec<Register>,
}

impl ProjectionOperator {
    /// Create a projection over `input` keeping the given column indices.
    pub fn new(input: Box<dyn Operator>, indices: Vec<usize>) -> Self {
        let out = Vec::with_capacity(indices.len());
        Self {
            input,
            indices,
            out,
        }
    }
}

impl Operator for ProjectionOperator {
    fn open(&mut self) -> Result<()> {
        self.input.open()
    }

    fn next(&mut self) -> Result<bool> {
        self.out.clear();
        if !self.input.next()? {
            return Ok(false);
        }

        let regs = self.input.output();
        for &idx in &self.indices {
            match regs.get(idx) {
                Some(reg) => self.out.push(*reg),
                None => {
                    return Err(Error::column_index_out_of_bounds(idx, regs.len()));
                }
            }
        }
        Ok(true)
    }

    fn output(&self) -> &[Register] {
        &self.out
    }

    fn close(&mut self) -> Result<()> {
        self.input.close()
    }

    fn name(&self) -> &str {
        "Projection"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::operator::test_support::collect_results;
    use crate::executor::operator::MaterializedOperator;
    use crate::tuple;

    fn make_source(tuples: Vec<crate::core::Tuple>) -> Box<dyn Operator> {
        Box::new(MaterializedOperator::new(tuples))
    }

    #[test]
    fn test_projection_reorder() {
        let source = make_source(vec![tuple![1, "a"], tuple![2, "b"]]);
        let mut op = ProjectionOperator::new(source, vec![1, 0]);

        let results = collect_results(&mut op).unwrap();
        assert_eq!(results, vec![tuple!["a", 1], tuple!["b", 2]]);
    }

    #[test]
    fn test_projection_identity() {
        let tuples = vec![tuple![1, "a"], tuple![2, "b"]];
        let source = make_source(tuples.clone());
        let mut op = ProjectionOperator::new(source, vec![0, 1]);

        let results = collect_results(&mut op).unwrap();
        assert_eq!(results, tuples);
    }

    #[test]
    fn test_projection_duplicate_indices() {
        let source = make_source(vec![tuple![5, "x"]]);
        let mut op = ProjectionOperator::new(source, vec![0, 0, 1]);

        let results = collect_results(&mut op).unwrap();
        assert_eq!(results, vec![tuple![5, 5, "x"]]);
    }

    #[test]
    fn test_projection_composition() {
        // Projecting [2, 0] then [1, 0] equals projecting [0, 2] directly.
        let tuples = vec![tuple![1, "a", 10], tuple![2, "b", 20]];

        let inner = ProjectionOperator::new(make_source(tuples.clone()), vec![2, 0]);
        let mut composed = ProjectionOperator::new(Box::new(inner), vec![1, 0]);
        let composed_results = collect_results(&mut composed).unwrap();

        let mut direct = ProjectionOperator::new(make_source(tuples), vec![0, 2]);
        let direct_results = collect_results(&mut direct).unwrap();

        assert_eq!(composed_results, direct_results);
    }

    #[test]
    fn test_projection_out_of_range() {
        let source = make_source(vec![tuple![1, "a"]]);
        let mut op = ProjectionOperator::new(source, vec![0, 3]);

        op.open().unwrap();
        let err = op.next().unwrap_err();
        assert_eq!(err, Error::column_index_out_of_bounds(3, 2));
    }
}
