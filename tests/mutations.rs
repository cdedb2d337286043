mod common;

use clause_assembler::assembler::{MutationAssembler, MutationItem};
use clause_assembler::ast::{DataRow, Mutation};
use clause_assembler::clause::{Clause, FilterOp, Operation};
use clause_assembler::transpiler::{Dialect, ToSql};
use common::col;
use pretty_assertions::assert_eq;

fn assembler() -> MutationAssembler {
    MutationAssembler::new("hardware")
}

fn row(id: i64, name: &str, revision: &str) -> DataRow {
    DataRow::new()
        .set("id", id)
        .set("name", name)
        .set("revision", revision)
}

fn by_id(id: i64) -> Clause {
    Clause::new(col("hardware", "id"), FilterOp::eq(id))
}

#[test]
fn test_insertion_single_row() {
    let mutation = assembler().assemble([row(1, "test", "1.0")]).unwrap().unwrap();
    assert_eq!(
        mutation.to_sql(),
        "INSERT INTO hardware (id, name, revision) VALUES (1, 'test', '1.0')"
    );
}

#[test]
fn test_insertion_multiple_rows() {
    let mutation = assembler()
        .assemble([row(1, "test", "1.0"), row(2, "test", "1.0")])
        .unwrap()
        .unwrap();
    let (sql, params) = mutation.to_sql_parameterized(Dialect::Postgres);
    assert_eq!(
        sql,
        "INSERT INTO hardware (id, name, revision) VALUES ($1, $2, $3), ($4, $5, $6)"
    );
    assert_eq!(params.len(), 6);
}

#[test]
fn test_updating() {
    let mutation = assembler()
        .assemble([
            MutationItem::from(DataRow::new().set("name", "test").set("revision", "1.0")),
            MutationItem::from(by_id(1)),
        ])
        .unwrap()
        .unwrap();
    assert!(matches!(mutation, Mutation::Update(_)));
    assert_eq!(
        mutation.to_sql(),
        "UPDATE hardware SET name = 'test', revision = '1.0' WHERE hardware.id = 1"
    );
}

#[test]
fn test_cannot_update_multiple_rows() {
    let err = assembler()
        .assemble([
            MutationItem::from(DataRow::new().set("name", "test").set("revision", "1.0")),
            MutationItem::from(DataRow::new().set("name", "test2").set("revision", "2.0")),
            MutationItem::from(by_id(1)),
        ])
        .unwrap_err();
    assert_eq!(err.to_string(), "Expected only one data item, got 2");
}

#[test]
fn test_deleting() {
    let mutation = assembler().assemble([by_id(1)]).unwrap().unwrap();
    assert_eq!(mutation.to_sql(), "DELETE FROM hardware WHERE hardware.id = 1");
}

#[test]
fn test_nothing_to_do() {
    let mutation = assembler().assemble(Vec::<MutationItem>::new()).unwrap();
    assert_eq!(mutation, None);
}

#[test]
fn test_filters_are_conjoined() {
    let name = Clause::new(col("hardware", "name"), FilterOp::eq("x"));
    let mutation = assembler().assemble([by_id(1), name]).unwrap().unwrap();
    assert_eq!(
        mutation.to_sql(),
        "DELETE FROM hardware WHERE hardware.id = 1 AND hardware.name = 'x'"
    );
}

#[test]
fn test_expression_filter() {
    let name = Clause::new(col("hardware", "name"), FilterOp::eq("x"));
    let expr = by_id(1).or(name).unwrap();
    let mutation = assembler().assemble([expr]).unwrap().unwrap();
    assert_eq!(
        mutation.to_sql(),
        "DELETE FROM hardware WHERE hardware.id = 1 OR hardware.name = 'x'"
    );
}

#[test]
fn test_non_filter_clause_rejected() {
    let order = Clause::new(col("hardware", "name"), Operation::desc());
    let err = assembler()
        .assemble([MutationItem::from(row(1, "a", "b")), MutationItem::from(order)])
        .unwrap_err();
    assert_eq!(err.to_string(), "Expected a filter clause, got DESC");

    let noop = Clause::new(col("hardware", "name"), Operation::Noop);
    let err = assembler().assemble([noop]).unwrap_err();
    assert_eq!(err.to_string(), "Expected a filter clause, got NOOP");
}

#[test]
fn test_uneven_rows_use_default() {
    let mutation = assembler()
        .assemble([
            DataRow::new().set("id", 1).set("name", "a"),
            DataRow::new().set("id", 2).set("revision", "2.0"),
        ])
        .unwrap()
        .unwrap();
    assert_eq!(
        mutation.to_sql(),
        "INSERT INTO hardware (id, name, revision) VALUES (1, 'a', DEFAULT), (2, DEFAULT, '2.0')"
    );
}
