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

//! End-to-end tests driving composed operator trees through the public API.

use rowflow::executor::operators::{
    Aggregate, CompareOp, HashAggregationOperator, HashJoinOperator, Predicate, PrintOperator,
    ProjectionOperator, SelectOperator, SortKey, SortOperator,
};
use rowflow::executor::{MaterializedOperator, Operator};
use rowflow::{tuple, Tuple};

fn source(tuples: Vec<Tuple>) -> Box<dyn Operator> {
    Box::new(MaterializedOperator::new(tuples))
}

fn collect(op: &mut dyn Operator) -> Vec<Tuple> {
    let mut results = Vec::new();
    op.open().unwrap();
    while op.next().unwrap() {
        results.push(Tuple::from_values(op.output().to_vec()));
    }
    op.close().unwrap();
    results
}

#[test]
fn select_project_sort_pipeline() {
    let scan = source(vec![
        tuple![3, "carol", 31],
        tuple![1, "alice", 29],
        tuple![4, "dave", 31],
        tuple![2, "bob", 17],
    ]);

    // age >= 18, project (name, age), order by age asc then name desc
    let adults = Box::new(SelectOperator::new(
        scan,
        Predicate::column_matches_int(2, CompareOp::Ge, 18),
    ));
    let named = Box::new(ProjectionOperator::new(adults, vec![1, 2]));
    let mut root = SortOperator::new(named, vec![SortKey::asc(1), SortKey::desc(0)]);

    assert_eq!(
        collect(&mut root),
        vec![
            tuple!["alice", 29],
            tuple!["dave", 31],
            tuple!["carol", 31],
        ]
    );
}

#[test]
fn join_then_aggregate() {
    let orders = source(vec![
        tuple![1, 100],
        tuple![1, 50],
        tuple![2, 70],
        tuple![3, 10],
    ]);
    let customers = source(vec![tuple![1, "ann"], tuple![2, "ben"]]);

    // customers join orders on customer id, then sum order totals per name
    let join = Box::new(HashJoinOperator::new(customers, orders, 0, 0));
    let mut agg = HashAggregationOperator::new(
        join,
        vec![1],
        vec![Aggregate::sum(3), Aggregate::count(3)],
    );

    assert_eq!(
        collect(&mut agg),
        vec![tuple!["ann", 150, 2], tuple!["ben", 70, 1]]
    );
}

#[test]
fn print_sink_renders_pipeline_output() {
    let scan = source(vec![tuple![2, "b"], tuple![1, "a"], tuple![-3, "c"]]);
    let sorted = Box::new(SortOperator::new(scan, vec![SortKey::asc(0)]));
    let mut print = PrintOperator::new(sorted, Vec::new());

    print.open().unwrap();
    while print.next().unwrap() {}
    print.close().unwrap();

    let written = String::from_utf8(print.into_inner()).unwrap();
    assert_eq!(written, "-3,c\n1,a\n2,b\n");
}

#[test]
fn blocking_operators_are_deterministic() {
    let rows = vec![
        tuple![5, "e"],
        tuple![2, "b"],
        tuple![5, "a"],
        tuple![1, "z"],
    ];

    let run = || {
        let scan = source(rows.clone());
        let mut root = SortOperator::new(scan, vec![SortKey::asc(0), SortKey::asc(1)]);
        collect(&mut root)
    };

    assert_eq!(run(), run());
}

#[test]
fn early_close_releases_tree() {
    let scan = source(vec![tuple![1], tuple![2], tuple![3]]);
    let mut root = SortOperator::new(scan, vec![SortKey::asc(0)]);

    root.open().unwrap();
    assert!(root.next().unwrap());
    // Abandon iteration mid-stream.
    root.close().unwrap();
}

#[test]
fn projection_identity_preserves_stream() {
    let rows = vec![tuple![1, "a"], tuple![2, "b"], tuple![3, "c"]];
    let mut root = ProjectionOperator::new(source(rows.clone()), vec![0, 1]);
    assert_eq!(collect(&mut root), rows);
}
