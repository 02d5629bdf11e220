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

//! Select (filter) operator.
//!
//! Filters tuples with a single predicate fixed at construction. `next()`
//! keeps pulling from the child until a tuple satisfies the predicate, so a
//! true return always has a matching tuple buffered; non-matching tuples are
//! skipped silently.

use std::cmp::Ordering;

use crate::core::{Error, Register, Result, Tuple};
use crate::executor::operator::Operator;

/// Comparison operator applied by a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

/// A filter predicate over one tuple.
///
/// Built from one of three shapes: column against an integer constant,
/// column against a string constant, or column against column.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// `tuple[column] op constant`
    ColumnConstant {
        column: usize,
        op: CompareOp,
        constant: Register,
    },
    /// `tuple[left] op tuple[right]`
    ColumnColumn {
        left: usize,
        op: CompareOp,
        right: usize,
    },
}

impl Predicate {
    /// Predicate comparing a column against an integer constant.
    pub fn column_matches_int(column: usize, op: CompareOp, constant: i64) -> Self {
        Predicate::ColumnConstant {
            column,
            op,
            constant: Register::int(constant),
        }
    }

    /// Predicate comparing a column against a string constant.
    ///
    /// Errors when the constant exceeds 16 bytes.
    pub fn column_matches_string(column: usize, op: CompareOp, constant: &str) -> Result<Self> {
        Ok(Predicate::ColumnConstant {
            column,
            op,
            constant: Register::string(constant)?,
        })
    }

    /// Predicate comparing two columns of the same tuple.
    pub fn column_matches_column(left: usize, op: CompareOp, right: usize) -> Self {
        Predicate::ColumnColumn { left, op, right }
    }

    /// Evaluate the predicate against a tuple.
    ///
    /// Bounds-checks column indices; ordering comparisons across register
    /// variants propagate [`Error::IncomparableTypes`].
    pub fn evaluate(&self, tuple: &[Register]) -> Result<bool> {
        match self {
            Predicate::ColumnConstant {
                column,
                op,
                constant,
            } => {
                let lhs = fetch(tuple, *column)?;
                compare(lhs, constant, *op)
            }
            Predicate::ColumnColumn { left, op, right } => {
                let lhs = fetch(tuple, *left)?;
                let rhs = fetch(tuple, *right)?;
                compare(lhs, rhs, *op)
            }
        }
    }
}

#[inline]
fn fetch(tuple: &[Register], index: usize) -> Result<&Register> {
    tuple
        .get(index)
        .ok_or(Error::ColumnIndexOutOfBounds {
            index,
            width: tuple.len(),
        })
}

fn compare(lhs: &Register, rhs: &Register, op: CompareOp) -> Result<bool> {
    match op {
        // Equality is defined across variants: differing variants are unequal.
        CompareOp::Eq => Ok(lhs == rhs),
        CompareOp::Ne => Ok(lhs != rhs),
        _ => {
            let ord = lhs.compare(rhs)?;
            Ok(match op {
                CompareOp::Lt => ord == Ordering::Less,
                CompareOp::Le => ord != Ordering::Greater,
                CompareOp::Gt => ord == Ordering::Greater,
                CompareOp::Ge => ord != Ordering::Less,
                CompareOp::Eq | CompareOp::Ne => unreachable!(),
            })
        }
    }
}

/// Row filter.
///
/// One `next()` call may consume several child tuples; it returns true once a
/// tuple passes the predicate and false when the child is exhausted.
pub struct SelectOperator {
    input: Box<dyn Operator>,
    predicate: Predicate,
    out: Tuple,
}

impl SelectOperator {
    /// Create a filter over `input` with the given predicate.
    pub fn new(input: Box<dyn Operator>, predicate: Predicate) -> Self {
        Self {
            input,
            predicate,
            out: Tuple::new(),
        }
    }
}

impl Operator for SelectOperator {
    fn open(&mut self) -> Result<()> {
        self.input.open()
    }

    fn next(&mut self) -> Result<bool> {
        loop {
            if !self.input.next()? {
                self.out.clear();
                return Ok(false);
            }
            if self.predicate.evaluate(self.input.output())? {
                let regs = self.input.output();
                self.out.clear();
                self.out.extend_from_slice(regs);
                return Ok(true);
            }
        }
    }

    fn output(&self) -> &[Register] {
        self.out.as_slice()
    }

    fn close(&mut self) -> Result<()> {
        self.input.close()
    }

    fn name(&self) -> &str {
        "Select"
    }
}
