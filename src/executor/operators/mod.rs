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

//! Query operators for pull-based execution.
//!
//! Each operator implements the [`Operator`](crate::executor::Operator)
//! trait with the `open()`, `next()`, `output()`, `close()` lifecycle.
//!
//! # Available Operators
//!
//! Streaming:
//!
//! - [`ProjectionOperator`] - column subset / reorder / duplicate
//! - [`SelectOperator`] - row filter with a single predicate
//! - [`PrintOperator`] - sink rendering tuples into a byte sink
//!
//! Pipeline-breakers (consume their input before producing output):
//!
//! - [`SortOperator`] - stable multi-key sort
//! - [`HashJoinOperator`] - inner equi-join, build side materialized
//! - [`HashAggregationOperator`] - grouped MIN/MAX/SUM/COUNT
//! - [`SetOperator`] - UNION / INTERSECT / EXCEPT, set and bag variants

pub mod aggregation;
pub mod hash_join;
pub mod print;
pub mod projection;
pub mod select;
pub mod set_ops;
pub mod sort;

// Re-export all operators and their configuration types
pub use aggregation::{Aggregate, AggregateFunc, HashAggregationOperator};
pub use hash_join::HashJoinOperator;
pub use print::PrintOperator;
pub use projection::ProjectionOperator;
pub use select::{CompareOp, Predicate, SelectOperator};
pub use set_ops::{SetOpKind, SetOperator};
pub use sort::{SortKey, SortOperator};
