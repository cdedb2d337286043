#![allow(dead_code)]

use clause_assembler::ast::{ColumnRef, Select};
use clause_assembler::schema::{Schema, Table};

pub fn col(table: &str, name: &str) -> ColumnRef {
    ColumnRef::new(table, name)
}

/// Device inventory catalog: firmware, hardware, devices and their links.
pub fn schema() -> Schema {
    Schema::new()
        .with_table(
            Table::new("events")
                .column("id", "uuid")
                .column("name", "varchar")
                .column("payload", "jsonb"),
        )
        .with_table(
            Table::new("groups")
                .column("id", "uuid")
                .column("owner_id", "uuid")
                .column("name", "varchar")
                .column("kind", "varchar"),
        )
        .with_table(
            Table::new("hardware_platforms")
                .column("id", "uuid")
                .column("name", "varchar")
                .column("code", "varchar"),
        )
        .with_table(
            Table::new("hardware")
                .column("id", "uuid")
                .column("name", "varchar")
                .column("revision", "varchar")
                .column("platform_id", "uuid")
                .foreign_key("platform_id", col("hardware_platforms", "id")),
        )
        .with_table(
            Table::new("devices")
                .column("id", "uuid")
                .column("owner_id", "uuid")
                .column("name", "varchar")
                .column("description", "varchar")
                .column("serial", "varchar")
                .column("hardware_id", "uuid")
                .foreign_key("hardware_id", col("hardware", "id")),
        )
        .with_table(
            Table::new("groups_devices")
                .column("id", "uuid")
                .column("device_id", "uuid")
                .column("group_id", "uuid")
                .foreign_key("device_id", col("devices", "id"))
                .foreign_key("group_id", col("groups", "id")),
        )
        .with_table(Table::new("tags").column("id", "uuid").column("name", "varchar"))
        .with_table(
            Table::new("firmware")
                .column("id", "uuid")
                .column("uri", "varchar")
                .column("version", "varchar")
                .column("payload", "jsonb")
                .column("tag_id", "uuid")
                .column("created_at", "timestamptz")
                .foreign_key("tag_id", col("tags", "id")),
        )
        .with_table(
            Table::new("hardware_firmware")
                .column("id", "uuid")
                .column("hardware_id", "uuid")
                .column("firmware_id", "uuid")
                .foreign_key("hardware_id", col("hardware", "id"))
                .foreign_key("firmware_id", col("firmware", "id")),
        )
}

/// `SELECT firmware.id, firmware.uri, firmware.version FROM firmware`
pub fn base_query() -> Select {
    Select::columns([
        col("firmware", "id"),
        col("firmware", "uri"),
        col("firmware", "version"),
    ])
}

pub fn count_joins(sql: &str) -> usize {
    sql.matches("JOIN").count()
}
