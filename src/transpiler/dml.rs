//! SELECT / INSERT / UPDATE / DELETE generation.

use super::conditions::{ParamContext, column_sql, expr_sql, join_sql};
use super::traits::SqlGenerator;
use crate::ast::*;

pub fn build_select(select: &Select, generator: &dyn SqlGenerator, params: &mut ParamContext) -> String {
    let mut sql = String::from("SELECT ");

    if select.columns.is_empty() {
        sql.push('*');
    } else {
        let cols: Vec<String> = select
            .columns
            .iter()
            .map(|c| column_sql(c, generator))
            .collect();
        sql.push_str(&cols.join(", "));
    }

    let from: Vec<String> = select
        .from_tables()
        .into_iter()
        .map(|t| generator.quote_identifier(t))
        .collect();
    if !from.is_empty() {
        sql.push_str(" FROM ");
        sql.push_str(&from.join(", "));
    }

    for join in &select.joins {
        sql.push(' ');
        sql.push_str(&join_sql(join, generator, params));
    }

    if let Some(filter) = &select.filter {
        sql.push_str(" WHERE ");
        sql.push_str(&expr_sql(filter, generator, params));
    }

    if !select.order_by.is_empty() {
        let keys: Vec<String> = select
            .order_by
            .iter()
            .map(|o| format!("{} {}", column_sql(&o.column, generator), o.order))
            .collect();
        sql.push_str(" ORDER BY ");
        sql.push_str(&keys.join(", "));
    }

    sql.push_str(&generator.limit_offset(select.limit, select.offset));
    sql
}

pub fn build_insert(insert: &Insert, generator: &dyn SqlGenerator, params: &mut ParamContext) -> String {
    let mut sql = String::from("INSERT INTO ");
    sql.push_str(&generator.quote_identifier(&insert.table));

    let columns = insert.columns();
    let quoted: Vec<String> = columns.iter().map(|c| generator.quote_identifier(c)).collect();
    sql.push_str(" (");
    sql.push_str(&quoted.join(", "));
    sql.push_str(") VALUES ");

    let tuples: Vec<String> = insert
        .rows
        .iter()
        .map(|row| {
            let cells: Vec<String> = columns
                .iter()
                .map(|c| match row.get(c) {
                    Some(value) => params.add_param(value, generator),
                    None => "DEFAULT".to_string(),
                })
                .collect();
            format!("({})", cells.join(", "))
        })
        .collect();
    sql.push_str(&tuples.join(", "));
    sql
}

pub fn build_update(update: &Update, generator: &dyn SqlGenerator, params: &mut ParamContext) -> String {
    let mut sql = String::from("UPDATE ");
    sql.push_str(&generator.quote_identifier(&update.table));

    let set_clauses: Vec<String> = update
        .values
        .iter()
        .map(|(column, value)| {
            format!(
                "{} = {}",
                generator.quote_identifier(column),
                params.add_param(value, generator)
            )
        })
        .collect();
    sql.push_str(" SET ");
    sql.push_str(&set_clauses.join(", "));

    if let Some(filter) = &update.filter {
        sql.push_str(" WHERE ");
        sql.push_str(&expr_sql(filter, generator, params));
    }
    sql
}

pub fn build_delete(delete: &Delete, generator: &dyn SqlGenerator, params: &mut ParamContext) -> String {
    let mut sql = String::from("DELETE FROM ");
    sql.push_str(&generator.quote_identifier(&delete.table));

    if let Some(filter) = &delete.filter {
        sql.push_str(" WHERE ");
        sql.push_str(&expr_sql(filter, generator, params));
    }
    sql
}
