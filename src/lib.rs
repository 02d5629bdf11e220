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

//! # Rowflow - pull-based relational operator pipeline
//!
//! Rowflow is a library of physical relational operators that compose into a
//! pull-based dataflow pipeline over in-memory tuples. A consumer drives the
//! root operator one tuple at a time; each internal operator pulls from its
//! input(s) and materializes its current output tuple into an addressable,
//! operator-owned buffer.
//!
//! ## Key Pieces
//!
//! - **[`Register`]** - tagged scalar: a 64-bit signed integer or a string of
//!   at most 16 bytes, stored inline
//! - **[`Tuple`]** - ordered sequence of registers, the unit of flow
//! - **[`Operator`]** - the `open` / `next` / `output` / `close` protocol
//! - **Operators** - projection, selection, stable multi-key sort, hash
//!   join, grouped aggregation, the six set-algebra operations, and a
//!   printing sink
//!
//! Trees are single-threaded and demand-driven: pipeline-breakers drain
//! their children during `open()`, everything else streams.
//!
//! ## Quick Start
//!
//! ```rust
//! use rowflow::executor::operators::{CompareOp, Predicate, SelectOperator, SortOperator, SortKey};
//! use rowflow::executor::{MaterializedOperator, Operator};
//! use rowflow::tuple;
//!
//! // Keep rows with col0 >= 2, sorted descending by col1.
//! let source = Box::new(MaterializedOperator::new(vec![
//!     tuple![1, "a"],
//!     tuple![2, "b"],
//!     tuple![3, "c"],
//! ]));
//! let select = Box::new(SelectOperator::new(
//!     source,
//!     Predicate::column_matches_int(0, CompareOp::Ge, 2),
//! ));
//! let mut root = SortOperator::new(select, vec![SortKey::desc(1)]);
//!
//! root.open().unwrap();
//! let mut rows = Vec::new();
//! while root.next().unwrap() {
//!     rows.push(rowflow::core::Tuple::from_values(root.output().to_vec()));
//! }
//! root.close().unwrap();
//!
//! assert_eq!(rows, vec![tuple![3, "c"], tuple![2, "b"]]);
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Core types ([`Register`], [`Tuple`], [`Error`])
//! - [`executor`] - The operator protocol and all physical operators

pub mod core;
pub mod executor;

// Re-export main types for convenience
pub use crate::core::{Char16, Error, Register, RegisterType, Result, Tuple, MAX_STRING_LEN};
pub use executor::{EmptyOperator, MaterializedOperator, Operator};
