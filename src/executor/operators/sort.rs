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

//! Sort operator.
//!
//! Pipeline-breaker: drains its child during `open()`, sorts the
//! materialized relation, then emits one tuple per `next()` call.

use std::cmp::Ordering;

use crate::core::{Error, Register, Result, Tuple};
use crate::executor::operator::Operator;

/// One ordering criterion: a column index and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// Column to order by
    pub column: usize,
    /// Reverse the column's natural order?
    pub descending: bool,
}

impl SortKey {
    /// Ascending key on `column`
    pub fn asc(column: usize) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    /// Descending key on `column`
    pub fn desc(column: usize) -> Self {
        Self {
            column,
            descending: true,
        }
    }
}

/// Blocking multi-key sort.
///
/// Keys apply in list order, leftmost primary. Every key orders the output
/// regardless of direction; a descending key reverses that column's
/// comparator. The sort is stable: tuples tied on all keys keep the order the
/// child produced them in.
pub struct SortOperator {
    input: Box<dyn Operator>,
    keys: Vec<SortKey>,
    buffered: Vec<Tuple>,
    cursor: usize,
    out: Tuple,
    opened: bool,
}

impl SortOperator {
    /// Create a sort over `input` with the given criteria.
    pub fn new(input: Box<dyn Operator>, keys: Vec<SortKey>) -> Self {
        Self {
            input,
            keys,
            buffered: Vec::new(),
            cursor: 0,
            out: Tuple::new(),
            opened: false,
        }
    }

    fn compare_tuples(keys: &[SortKey], a: &Tuple, b: &Tuple) -> Ordering {
        for key in keys {
            let ord = a[key.column].cmp(&b[key.column]);
            let ord = if key.descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl Operator for SortOperator {
    fn open(&mut self) -> Result<()> {
        self.input.open()?;

        while self.input.next()? {
            let regs = self.input.output();
            for key in &self.keys {
                if key.column >= regs.len() {
                    return Err(Error::column_index_out_of_bounds(key.column, regs.len()));
                }
            }
            self.buffered.push(Tuple::from_values(regs.to_vec()));
        }

        let keys = std::mem::take(&mut self.keys);
        // Vec::sort_by is stable, so ties preserve input order.
        self.buffered
            .sort_by(|a, b| Self::compare_tuples(&keys, a, b));
        self.keys = keys;

        self.cursor = 0;
        self.opened = true;
        Ok(())
    }

    fn next(&mut self) -> Result<bool> {
        if !self.opened {
            return Err(Error::internal("SortOperator::next called before open"));
        }
        self.out.clear();
        if self.cursor >= self.buffered.len() {
            return Ok(false);
        }
        self.out.extend_from_slice(&self.buffered[self.cursor]);
        self.cursor += 1;
        Ok(true)
    }

    fn output(&self) -> &[Register] {
        self.out.as_slice()
    }

    fn close(&mut self) -> Result<()> {
        self.buffered.clear();
        self.input.close()
    }

    fn name(&self) -> &str {
        "Sort"
    }
}
