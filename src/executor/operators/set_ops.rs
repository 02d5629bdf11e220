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

//! Set operations (UNION, INTERSECT, EXCEPT, each with set and bag variants).
//!
//! All six are binary pipeline-breakers: `open()` fully drains both children,
//! counts the multiplicity of each distinct tuple on each side, derives the
//! output multiplicity per operation, and sorts the result in ascending
//! tuple-lex order. `next()` then emits one tuple per call.
//!
//! With `l(t)` and `r(t)` the multiplicities of tuple `t` on the left and
//! right:
//!
//! | Operation      | Output multiplicity of `t`       |
//! |----------------|----------------------------------|
//! | `Union`        | 1 if `l(t) + r(t) > 0`           |
//! | `UnionAll`     | `l(t) + r(t)`                    |
//! | `Intersect`    | 1 if `l(t) > 0` and `r(t) > 0`   |
//! | `IntersectAll` | `min(l(t), r(t))`                |
//! | `Except`       | 1 if `l(t) > 0` and `r(t) == 0`  |
//! | `ExceptAll`    | `max(l(t) - r(t), 0)`            |

use rustc_hash::FxHashMap;

use crate::core::{Error, Register, Result, Tuple};
use crate::executor::operator::Operator;

/// The six set operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOpKind {
    /// Set union: distinct tuples from either side
    Union,
    /// Bag union: all tuples from both sides
    UnionAll,
    /// Set intersection: distinct tuples present on both sides
    Intersect,
    /// Bag intersection: tuples with their minimum multiplicity
    IntersectAll,
    /// Set difference: distinct left tuples absent from the right
    Except,
    /// Bag difference: left multiplicity minus right multiplicity
    ExceptAll,
}

impl SetOpKind {
    /// Output multiplicity of a tuple seen `left` times on the left side and
    /// `right` times on the right side.
    fn output_multiplicity(self, left: usize, right: usize) -> usize {
        match self {
            SetOpKind::Union => usize::from(left + right > 0),
            SetOpKind::UnionAll => left + right,
            SetOpKind::Intersect => usize::from(left > 0 && right > 0),
            SetOpKind::IntersectAll => left.min(right),
            SetOpKind::Except => usize::from(left > 0 && right == 0),
            SetOpKind::ExceptAll => left.saturating_sub(right),
        }
    }

    fn name(self) -> &'static str {
        match self {
            SetOpKind::Union => "Union",
            SetOpKind::UnionAll => "UnionAll",
            SetOpKind::Intersect => "Intersect",
            SetOpKind::IntersectAll => "IntersectAll",
            SetOpKind::Except => "Except",
            SetOpKind::ExceptAll => "ExceptAll",
        }
    }
}

/// Binary set-algebra operator.
///
/// Both inputs must produce tuples of the same arity; a mismatch is reported
/// when the inputs are drained. Output ordering is ascending tuple-lex order
/// and therefore deterministic for any input order.
pub struct SetOperator {
    left: Box<dyn Operator>,
    right: Box<dyn Operator>,
    kind: SetOpKind,
    results: Vec<Tuple>,
    cursor: usize,
    out: Tuple,
    opened: bool,
}

impl SetOperator {
    /// Create a set operator of the given kind.
    pub fn new(kind: SetOpKind, left: Box<dyn Operator>, right: Box<dyn Operator>) -> Self {
        Self {
            left,
            right,
            kind,
            results: Vec::new(),
            cursor: 0,
            out: Tuple::new(),
            opened: false,
        }
    }

    /// `left UNION right`
    pub fn union(left: Box<dyn Operator>, right: Box<dyn Operator>) -> Self {
        Self::new(SetOpKind::Union, left, right)
    }

    /// `left UNION ALL right`
    pub fn union_all(left: Box<dyn Operator>, right: Box<dyn Operator>) -> Self {
        Self::new(SetOpKind::UnionAll, left, right)
    }

    /// `left INTERSECT right`
    pub fn intersect(left: Box<dyn Operator>, right: Box<dyn Operator>) -> Self {
        Self::new(SetOpKind::Intersect, left, right)
    }

    /// `left INTERSECT ALL right`
    pub fn intersect_all(left: Box<dyn Operator>, right: Box<dyn Operator>) -> Self {
        Self::new(SetOpKind::IntersectAll, left, right)
    }

    /// `left EXCEPT right`
    pub fn except(left: Box<dyn Operator>, right: Box<dyn Operator>) -> Self {
        Self::new(SetOpKind::Except, left, right)
    }

    /// `left EXCEPT ALL right`
    pub fn except_all(left: Box<dyn Operator>, right: Box<dyn Operator>) -> Self {
        Self::new(SetOpKind::ExceptAll, left, right)
    }
}

/// Drain one input into the shared multiplicity map, bumping the left or
/// right count of each tuple. Returns the input's tuple width, if any tuple
/// was produced.
fn drain_side(
    input: &mut dyn Operator,
    counts: &mut FxHashMap<Tuple, (usize, usize)>,
    left_side: bool,
) -> Result<Option<usize>> {
    let mut width = None;
    while input.next()? {
        let tuple = Tuple::from_values(input.output().to_vec());
        width.get_or_insert(tuple.len());
        let entry = counts.entry(tuple).or_insert((0, 0));
        if left_side {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }
    Ok(width)
}

impl Operator for SetOperator {
    fn open(&mut self) -> Result<()> {
        self.left.open()?;
        self.right.open()?;

        let mut counts: FxHashMap<Tuple, (usize, usize)> = FxHashMap::default();
        let left_width = drain_side(&mut *self.left, &mut counts, true)?;
        let right_width = drain_side(&mut *self.right, &mut counts, false)?;

        if let (Some(left), Some(right)) = (left_width, right_width) {
            if left != right {
                return Err(Error::column_count_mismatch(left, right));
            }
        }

        for (tuple, (left, right)) in &counts {
            let multiplicity = self.kind.output_multiplicity(*left, *right);
            for _ in 0..multiplicity {
                self.results.push(tuple.clone());
            }
        }
        self.results.sort();

        self.cursor = 0;
        self.opened = true;
        Ok(())
    }

    fn next(&mut self) -> Result<bool> {
        if !self.opened {
            return Err(Error::internal(format!(
                "{}::next called before open",
                self.kind.name()
            )));
        }
        self.out.clear();
        if self.cursor >= self.results.len() {
            return Ok(false);
        }
        self.out.extend_from_slice(&self.results[self.cursor]);
        self.cursor += 1;
        Ok(true)
    }

    fn output(&self) -> &[Register] {
        self.out.as_slice()
    }

    fn close(&mut self) -> Result<()> {
        self.results.clear();
        self.left.close()?;
        self.right.close()
    }

    fn name(&self) -> &str {
        self.kind.name()
    }
}
