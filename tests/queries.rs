mod common;

use clause_assembler::assembler::{QueryAssembler, QueryItem};
use clause_assembler::ast::builders::is_not;
use clause_assembler::ast::Value;
use clause_assembler::clause::{Clause, FilterOp, Operation, Slice};
use clause_assembler::error::AssemblyError;
use clause_assembler::transpiler::{Dialect, ToSql};
use common::{base_query, col, schema};
use pretty_assertions::assert_eq;
use uuid::Uuid;

#[test]
fn test_trivial() {
    let schema = schema();
    let assembler = QueryAssembler::new(&schema, base_query());
    let query = assembler.assemble(Vec::<QueryItem>::new()).unwrap();
    assert_eq!(
        query.to_sql(),
        "SELECT firmware.id, firmware.uri, firmware.version FROM firmware"
    );
}

#[test]
fn test_filters_and_order() {
    let schema = schema();
    let assembler = QueryAssembler::new(&schema, base_query());
    let query = assembler
        .assemble([
            Clause::new(col("firmware", "id"), FilterOp::ge(Uuid::nil())),
            Clause::new(col("firmware", "id"), Operation::desc()),
        ])
        .unwrap();
    assert!(query.to_sql().ends_with(
        "WHERE firmware.id >= '00000000-0000-0000-0000-000000000000' ORDER BY firmware.id DESC"
    ));
}

#[test]
fn test_joins() {
    let schema = schema();
    let assembler = QueryAssembler::new(&schema, base_query());
    let query = assembler
        .assemble([Clause::new(col("hardware", "revision"), FilterOp::eq("01"))
            .with_hint("hardware_firmware")])
        .unwrap();
    let sql = query.to_sql();
    assert!(sql.contains("hardware_firmware ON firmware.id = hardware_firmware.firmware_id"));
    assert!(sql.contains("hardware ON hardware.id = hardware_firmware.hardware_id"));
    assert!(sql.contains("WHERE hardware.revision = '01'"));
}

#[test]
fn test_complex() {
    let schema = schema();
    let assembler = QueryAssembler::new(&schema, base_query());
    let query = assembler
        .assemble([
            QueryItem::from(
                Clause::new(col("hardware", "revision"), FilterOp::eq("01"))
                    .with_hint("hardware_firmware"),
            ),
            QueryItem::from(Clause::new(col("hardware", "name"), Operation::desc())),
            QueryItem::from(Slice::Limit(100)),
            QueryItem::from(Slice::Offset(10)),
        ])
        .unwrap();

    assert_eq!(
        query.to_sql(),
        "SELECT firmware.id, firmware.uri, firmware.version FROM firmware \
         LEFT OUTER JOIN hardware_firmware ON firmware.id = hardware_firmware.firmware_id \
         LEFT OUTER JOIN hardware ON hardware.id = hardware_firmware.hardware_id \
         WHERE hardware.revision = '01' ORDER BY hardware.name DESC LIMIT 100 OFFSET 10"
    );

    let (sql, params) = query.to_sql_parameterized(Dialect::Postgres);
    assert!(sql.ends_with("WHERE hardware.revision = $1 ORDER BY hardware.name DESC LIMIT 100 OFFSET 10"));
    assert_eq!(params, vec![Value::from("01")]);
}

#[test]
fn test_invalid_clause_kind_leaves_base_untouched() {
    let schema = schema();
    let assembler = QueryAssembler::new(&schema, base_query());
    let err = assembler
        .assemble([
            Clause::new(col("tags", "name"), FilterOp::eq("common")),
            Clause::new(col("firmware", "id"), Operation::Noop),
        ])
        .unwrap_err();
    assert!(matches!(err, AssemblyError::InvalidClauseKind { .. }));
    assert_eq!(err.to_string(), "Expected a filter, order or slice clause, got NOOP");
    assert_eq!(assembler.query(), &base_query());
}

#[test]
fn test_filters_fold_with_and() {
    let schema = schema();
    let assembler = QueryAssembler::new(&schema, base_query());
    let query = assembler
        .assemble([
            Clause::new(col("firmware", "version"), FilterOp::eq("1.0")),
            Clause::new(col("tags", "name"), FilterOp::eq("beta")),
        ])
        .unwrap();
    assert_eq!(
        query.to_sql(),
        "SELECT firmware.id, firmware.uri, firmware.version FROM firmware \
         LEFT OUTER JOIN tags ON tags.id = firmware.tag_id \
         WHERE firmware.version = '1.0' AND tags.name = 'beta'"
    );
}

#[test]
fn test_expression_item() {
    let schema = schema();
    let assembler = QueryAssembler::new(&schema, base_query());
    let expr = Clause::new(col("firmware", "version"), FilterOp::eq("1.0"))
        .or(Clause::new(col("firmware", "version"), FilterOp::eq("2.0")))
        .unwrap();
    let query = assembler
        .assemble([
            QueryItem::from(expr),
            QueryItem::from(Clause::new(col("firmware", "uri"), FilterOp::like("cdn", false))),
        ])
        .unwrap();
    assert!(query.to_sql().ends_with(
        "WHERE (firmware.version = '1.0' OR firmware.version = '2.0') AND firmware.uri ILIKE '%cdn%'"
    ));
}

#[test]
fn test_existing_where_is_kept() {
    let schema = schema();
    let base = base_query().filter(is_not(&col("firmware", "tag_id"), Value::Null));
    let assembler = QueryAssembler::new(&schema, base);
    let query = assembler
        .assemble([Clause::new(col("firmware", "version"), FilterOp::eq("1.0"))])
        .unwrap();
    assert!(query
        .to_sql()
        .ends_with("WHERE firmware.tag_id IS NOT NULL AND firmware.version = '1.0'"));
}

#[test]
fn test_assembler_is_reusable() {
    let schema = schema();
    let assembler = QueryAssembler::new(&schema, base_query());
    let items = || [Clause::new(col("tags", "name"), FilterOp::eq("beta"))];
    let first = assembler.assemble(items()).unwrap();
    let second = assembler.assemble(items()).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.joins.len(), 1);
}

#[test]
fn test_slice_on_a_column_is_rejected() {
    let schema = schema();
    let assembler = QueryAssembler::new(&schema, base_query());
    let err = assembler
        .assemble([Clause::new(col("firmware", "id"), Operation::limit(5))])
        .unwrap_err();
    assert!(matches!(err, AssemblyError::InvalidClauseKind { .. }));
    assert_eq!(err.to_string(), "Expected a filter, order or slice clause, got LIMIT");

    let query = assembler.assemble([Slice::Limit(5)]).unwrap();
    assert_eq!(query.limit, Some(5));
}

#[test]
fn test_unbounded_range_adds_no_where() {
    let schema = schema();
    let assembler = QueryAssembler::new(&schema, base_query());
    let query = assembler
        .assemble([Clause::new(col("firmware", "version"), FilterOp::range(None, None))])
        .unwrap();
    assert_eq!(query.filter, None);
}

#[test]
fn test_sqlite_rendering() {
    let schema = schema();
    let assembler = QueryAssembler::new(&schema, base_query());
    let query = assembler
        .assemble([
            QueryItem::from(Clause::new(
                col("firmware", "version"),
                FilterOp::not(FilterOp::set(["1.0", "1.1"])),
            )),
            QueryItem::from(Slice::Offset(20)),
        ])
        .unwrap();
    let (sql, params) = query.to_sql_parameterized(Dialect::Sqlite);
    assert_eq!(
        sql,
        "SELECT firmware.id, firmware.uri, firmware.version FROM firmware \
         WHERE firmware.version NOT IN (?, ?) LIMIT -1 OFFSET 20"
    );
    assert_eq!(params.len(), 2);
}
