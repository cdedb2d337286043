mod common;

use clause_assembler::adapter::{FieldMapping, QueryAdapter};
use clause_assembler::assembler::QueryAssembler;
use clause_assembler::clause::{FilterOp, Operation};
use clause_assembler::config::Config;
use clause_assembler::error::AssemblyError;
use clause_assembler::transpiler::ToSql;
use common::{base_query, col, schema};
use pretty_assertions::assert_eq;

#[test]
fn test_adapted_query() {
    let schema = schema();
    let adapter = QueryAdapter::new(&schema)
        .with_default_table("firmware")
        .map_field("tag", FieldMapping::Column(col("tags", "name")));

    let items = adapter
        .adapt([
            ("tag", Operation::from(FilterOp::eq("beta"))),
            ("version", Operation::desc()),
            ("page_size", Operation::limit(5)),
        ])
        .unwrap();
    let query = QueryAssembler::new(&schema, base_query()).assemble(items).unwrap();

    assert_eq!(
        query.to_sql(),
        "SELECT firmware.id, firmware.uri, firmware.version FROM firmware \
         LEFT OUTER JOIN tags ON tags.id = firmware.tag_id \
         WHERE tags.name = 'beta' ORDER BY firmware.version DESC LIMIT 5"
    );
}

#[test]
fn test_configured_adapter() {
    let schema = schema();
    let config = Config::from_toml(
        r#"
        [adapter]
        default_table = "firmware"

        [adapter.fields]
        tag = "tags.name"
        link = "uri"
        internal = "-"
        "#,
    )
    .unwrap();
    let adapter = QueryAdapter::from_config(&schema, &config.adapter).unwrap();

    let items = adapter
        .adapt([
            ("link", Operation::from(FilterOp::like("cdn", true))),
            ("internal", Operation::from(FilterOp::eq(1))),
            ("unused", Operation::Noop),
        ])
        .unwrap();
    let query = QueryAssembler::new(&schema, base_query()).assemble(items).unwrap();
    assert!(query.to_sql().ends_with("WHERE firmware.uri LIKE '%cdn%'"));
}

#[test]
fn test_bad_directive_in_config() {
    let schema = schema();
    let config = Config::from_toml(
        r#"
        [adapter.fields]
        tag = "tags.name.extra"
        "#,
    )
    .unwrap();
    let err = QueryAdapter::from_config(&schema, &config.adapter).err().unwrap();
    assert!(matches!(err, AssemblyError::Parse { .. }));
}

#[test]
fn test_unknown_field_without_default_table() {
    let schema = schema();
    let adapter = QueryAdapter::new(&schema);
    let err = adapter
        .adapt([("serial", Operation::from(FilterOp::eq("abc")))])
        .unwrap_err();
    assert_eq!(err.to_string(), "Column serial not found");
}
