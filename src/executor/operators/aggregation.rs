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

//! Grouped aggregation operator.
//!
//! Pipeline-breaker: drains its child during `open()`, accumulating one row
//! of aggregate state per distinct group key, then emits one tuple per group
//! sorted by the group-key tuple order.
//!
//! With no group-by columns, the whole input forms a single implicit group
//! and the output is the aggregate row alone. An empty input then produces
//! no output row, since there is no register value that could stand for the
//! minimum or maximum of nothing.

use rustc_hash::FxHashMap;

use crate::core::{Error, Register, Result, Tuple};
use crate::executor::operator::Operator;

/// Aggregation function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunc {
    /// Running minimum (either register variant)
    Min,
    /// Running maximum (either register variant)
    Max,
    /// Running integer sum; the input column must be `Int64`
    Sum,
    /// Number of input tuples in the group
    Count,
}

/// One configured aggregate: a function applied to an input column.
#[derive(Debug, Clone, Copy)]
pub struct Aggregate {
    /// Function to compute
    pub func: AggregateFunc,
    /// Input column the function aggregates over
    pub column: usize,
}

impl Aggregate {
    /// `MIN(column)`
    pub fn min(column: usize) -> Self {
        Self {
            func: AggregateFunc::Min,
            column,
        }
    }

    /// `MAX(column)`
    pub fn max(column: usize) -> Self {
        Self {
            func: AggregateFunc::Max,
            column,
        }
    }

    /// `SUM(column)`
    pub fn sum(column: usize) -> Self {
        Self {
            func: AggregateFunc::Sum,
            column,
        }
    }

    /// `COUNT(column)`
    pub fn count(column: usize) -> Self {
        Self {
            func: AggregateFunc::Count,
            column,
        }
    }
}

/// Running state for one aggregate within one group.
enum Accumulator {
    Min(Option<Register>),
    Max(Option<Register>),
    Sum(i64),
    Count(i64),
}

impl Accumulator {
    fn for_func(func: AggregateFunc) -> Self {
        match func {
            AggregateFunc::Min => Accumulator::Min(None),
            AggregateFunc::Max => Accumulator::Max(None),
            AggregateFunc::Sum => Accumulator::Sum(0),
            AggregateFunc::Count => Accumulator::Count(0),
        }
    }

    fn update(&mut self, reg: &Register) -> Result<()> {
        match self {
            Accumulator::Min(best) => {
                let replace = match best {
                    None => true,
                    Some(b) => reg.compare(b)? == std::cmp::Ordering::Less,
                };
                if replace {
                    *best = Some(*reg);
                }
            }
            Accumulator::Max(best) => {
                let replace = match best {
                    None => true,
                    Some(b) => reg.compare(b)? == std::cmp::Ordering::Greater,
                };
                if replace {
                    *best = Some(*reg);
                }
            }
            Accumulator::Sum(total) => {
                let v = reg
                    .as_int()
                    .ok_or_else(|| Error::type_error("SUM requires an INT64 column"))?;
                // Wraps on overflow.
                *total = total.wrapping_add(v);
            }
            Accumulator::Count(count) => {
                *count += 1;
            }
        }
        Ok(())
    }

    fn finish(&self) -> Result<Register> {
        match self {
            Accumulator::Min(best) | Accumulator::Max(best) => {
                (*best).ok_or_else(|| Error::internal("aggregate finished over an empty group"))
            }
            Accumulator::Sum(total) => Ok(Register::int(*total)),
            Accumulator::Count(count) => Ok(Register::int(*count)),
        }
    }
}

/// Grouped MIN/MAX/SUM/COUNT.
///
/// Output column layout per group: the group-key columns in configuration
/// order, then one column per aggregate in configuration order. Groups are
/// emitted sorted by the group-key tuple.
pub struct HashAggregationOperator {
    input: Box<dyn Operator>,
    group_by: Vec<usize>,
    aggregates: Vec<Aggregate>,
    results: Vec<Tuple>,
    cursor: usize,
    out: Tuple,
    opened: bool,
}

impl HashAggregationOperator {
    /// Create an aggregation over `input` grouping by the given columns.
    pub fn new(
        input: Box<dyn Operator>,
        group_by: Vec<usize>,
        aggregates: Vec<Aggregate>,
    ) -> Self {
        Self {
            input,
            group_by,
            aggregates,
            results: Vec::new(),
            cursor: 0,
            out: Tuple::new(),
            opened: false,
        }
    }

    fn make_accumulators(aggregates: &[Aggregate]) -> Vec<Accumulator> {
        aggregates
            .iter()
            .map(|a| Accumulator::for_func(a.func))
            .collect()
    }

    fn update_accumulators(
        aggregates: &[Aggregate],
        accumulators: &mut [Accumulator],
        regs: &[Register],
    ) -> Result<()> {
        for (agg, acc) in aggregates.iter().zip(accumulators.iter_mut()) {
            let reg = regs.get(agg.column).ok_or(Error::ColumnIndexOutOfBounds {
                index: agg.column,
                width: regs.len(),
            })?;
            acc.update(reg)?;
        }
        Ok(())
    }

    /// Grouped path: one accumulator row per distinct group key.
    fn aggregate_grouped(&mut self) -> Result<()> {
        let mut groups: FxHashMap<Vec<Register>, Vec<Accumulator>> = FxHashMap::default();

        while self.input.next()? {
            let regs = self.input.output();

            let mut key = Vec::with_capacity(self.group_by.len());
            for &g in &self.group_by {
                let reg = regs.get(g).ok_or(Error::ColumnIndexOutOfBounds {
                    index: g,
                    width: regs.len(),
                })?;
                key.push(*reg);
            }

            let accumulators = groups
                .entry(key)
                .or_insert_with(|| Self::make_accumulators(&self.aggregates));
            Self::update_accumulators(&self.aggregates, accumulators, regs)?;
        }

        let mut entries: Vec<(Vec<Register>, Vec<Accumulator>)> = groups.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, accumulators) in entries {
            let mut row = Tuple::with_capacity(key.len() + accumulators.len());
            for reg in key {
                row.push(reg);
            }
            for acc in &accumulators {
                row.push(acc.finish()?);
            }
            self.results.push(row);
        }
        Ok(())
    }

    /// Group-less path: the whole input is one implicit group.
    fn aggregate_all(&mut self) -> Result<()> {
        let mut accumulators = Self::make_accumulators(&self.aggregates);
        let mut saw_input = false;

        while self.input.next()? {
            saw_input = true;
            let regs = self.input.output();
            Self::update_accumulators(&self.aggregates, &mut accumulators, regs)?;
        }

        if saw_input {
            let mut row = Tuple::with_capacity(accumulators.len());
            for acc in &accumulators {
                row.push(acc.finish()?);
            }
            self.results.push(row);
        }
        Ok(())
    }
}

impl Operator for HashAggregationOperator {
    fn open(&mut self) -> Result<()> {
        self.input.open()?;

        if self.group_by.is_empty() {
            self.aggregate_all()?;
        } else {
            self.aggregate_grouped()?;
        }

        self.cursor = 0;
        self.opened = true;
        Ok(())
    }

    fn next(&mut self) -> Result<bool> {
        if !self.opened {
            return Err(Error::internal(
                "HashAggregationOperator::next called before open",
            ));
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
        self.input.close()
    }

    fn name(&self) -> &str {
        "HashAggregation"
    }
}
