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

//! Volcano-style operator interface for pull-based query execution.
//!
//! This module provides the foundation for an execution model where operators
//! pull tuples on demand rather than materializing everything upfront.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ Consumer     │ ← Pulls tuples via next()
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │ HashJoin     │ ← Build side materialized, probe side streamed
//! └──────┬───────┘
//!        │
//! ┌──────┴──────┐
//! │             │
//! ▼             ▼
//! ┌─────┐   ┌─────┐
//! │Leaf │   │Leaf │ ← Caller-supplied tuple sources
//! └─────┘   └─────┘
//! ```
//!
//! Each operator owns the buffer its current output tuple lives in;
//! [`Operator::output`] borrows that buffer, so the registers of one tuple
//! stay addressable exactly until the next `next()` or `close()` call.

use crate::core::{Register, Result, Tuple};

/// Pull-based iterator interface for query operators.
///
/// Each operator implements this trait to participate in the execution
/// pipeline. Execution follows the open-next-close pattern:
///
/// 1. `open()` - Initialize the operator (called once)
/// 2. `next()` - Advance by one tuple (called repeatedly until `Ok(false)`)
/// 3. `output()` - Borrow the registers of the current tuple
/// 4. `close()` - Release resources (called once at end)
///
/// Pipeline-breaking operators (sort, aggregation, the build side of a hash
/// join, set operations) drain their children during `open()`; all work is
/// synchronous on the caller's thread.
///
/// # Thread Safety
///
/// Operators are `Send` to allow execution on different threads, but
/// individual operators are not `Sync` - they maintain mutable state.
pub trait Operator: Send {
    /// Initialize the operator.
    ///
    /// Called once before the first `next()` call. Child operators are opened
    /// here, and blocking operators consume their input here.
    fn open(&mut self) -> Result<()>;

    /// Advance to the next tuple.
    ///
    /// Returns:
    /// - `Ok(true)` - A tuple is available via `output()`
    /// - `Ok(false)` - No more tuples (exhausted)
    /// - `Err(e)` - An error occurred
    ///
    /// After returning `Ok(false)`, subsequent calls continue to return
    /// `Ok(false)`.
    fn next(&mut self) -> Result<bool>;

    /// Borrow the registers of the current tuple.
    ///
    /// Only meaningful immediately after a `next()` that returned `Ok(true)`.
    /// The slice stays valid until the next `next()` or `close()` call on
    /// this operator. Sinks with no output return an empty slice.
    fn output(&self) -> &[Register];

    /// Close the operator and release resources.
    ///
    /// Called once after all tuples have been consumed or when execution is
    /// terminated early. Child operators are closed as well.
    fn close(&mut self) -> Result<()>;

    /// Get a descriptive name for this operator (for diagnostics).
    fn name(&self) -> &str;
}

/// An operator that produces no tuples.
///
/// Useful as a placeholder or for empty inputs in tests.
#[derive(Default)]
pub struct EmptyOperator;

impl EmptyOperator {
    /// Create an empty operator.
    pub fn new() -> Self {
        Self
    }
}

impl Operator for EmptyOperator {
    fn open(&mut self) -> Result<()> {
        Ok(())
    }

    fn next(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn output(&self) -> &[Register] {
        &[]
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "Empty"
    }
}

/// An operator that yields tuples from a pre-materialized vector.
///
/// This is the library-provided leaf source: tests and callers without their
/// own source implementation feed relations through it.
pub struct MaterializedOperator {
    tuples: Vec<Tuple>,
    cursor: usize,
    out: Tuple,
}

impl MaterializedOperator {
    /// Create an operator from a vector of tuples.
    pub fn new(tuples: Vec<Tuple>) -> Self {
        Self {
            tuples,
            cursor: 0,
            out: Tuple::new(),
        }
    }
}

impl Operator for MaterializedOperator {
    fn open(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }

    fn next(&mut self) -> Result<bool> {
        self.out.clear();
        if self.cursor >= self.tuples.len() {
            return Ok(false);
        }
        self.out.extend_from_slice(&self.tuples[self.cursor]);
        self.cursor += 1;
        Ok(true)
    }

    fn output(&self) -> &[Register] {
        self.out.as_slice()
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "Materialized"
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Drain an operator through its full open/next/close lifecycle.
    pub fn collect_results(op: &mut dyn Operator) -> Result<Vec<Tuple>> {
        let mut results = Vec::new();
        op.open()?;
        while op.next()? {
            results.push(Tuple::from_values(op.output().to_vec()));
        }
        op.close()?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::collect_results;
    use super::*;
    use crate::tuple;

    #[test]
    fn test_empty_operator() {
        let mut op = EmptyOperator::new();
        op.open().unwrap();

        assert!(!op.next().unwrap());
        assert!(!op.next().unwrap());
        assert!(op.output().is_empty());

        op.close().unwrap();
    }

    #[test]
    fn test_materialized_operator() {
        let mut op = MaterializedOperator::new(vec![tuple![1], tuple![2], tuple![3]]);
        op.open().unwrap();

        assert!(op.next().unwrap());
        assert_eq!(op.output(), tuple![1].as_slice());

        assert!(op.next().unwrap());
        assert_eq!(op.output(), tuple![2].as_slice());

        assert!(op.next().unwrap());
        assert_eq!(op.output(), tuple![3].as_slice());

        assert!(!op.next().unwrap());
        assert!(op.output().is_empty());

        op.close().unwrap();
    }

    #[test]
    fn test_collect_results() {
        let mut op = MaterializedOperator::new(vec![tuple![1, "a"], tuple![2, "b"]]);
        let results = collect_results(&mut op).unwrap();
        assert_eq!(results, vec![tuple![1, "a"], tuple![2, "b"]]);
    }
}
