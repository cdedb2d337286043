use super::traits::SqlGenerator;
use crate::ast::*;

/// Context for parameterized query building.
///
/// In inline mode values are rendered as literals and nothing is collected.
#[derive(Debug, Default)]
pub struct ParamContext {
    /// Current parameter index (1-based for Postgres $1, $2, etc.)
    pub index: usize,
    /// Collected parameter values in order
    pub params: Vec<Value>,
    inline: bool,
}

impl ParamContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inline() -> Self {
        Self {
            inline: true,
            ..Default::default()
        }
    }

    /// Add a value and return the placeholder (or literal) for it.
    /// `NULL` is always inlined and never collected.
    pub fn add_param(&mut self, value: &Value, generator: &dyn SqlGenerator) -> String {
        if self.inline || matches!(value, Value::Null) {
            return generator.literal(value);
        }
        self.index += 1;
        self.params.push(value.clone());
        generator.placeholder(self.index)
    }
}

pub fn column_sql(column: &ColumnRef, generator: &dyn SqlGenerator) -> String {
    format!(
        "{}.{}",
        generator.quote_identifier(&column.table),
        generator.quote_identifier(&column.name)
    )
}

pub fn operand_sql(
    operand: &Operand,
    generator: &dyn SqlGenerator,
    params: &mut ParamContext,
) -> String {
    match operand {
        Operand::Column(col) => column_sql(col, generator),
        Operand::Literal(value) => params.add_param(value, generator),
    }
}

/// Render a predicate tree.
///
/// AND binds tighter than OR, so only an OR directly under an AND needs
/// parentheses.
pub fn expr_sql(expr: &Expr, generator: &dyn SqlGenerator, params: &mut ParamContext) -> String {
    match expr {
        Expr::Compare { column, op, value } => {
            let col = column_sql(column, generator);
            match (op, value) {
                (CompareOp::Eq, Value::Null) => format!("{} IS NULL", col),
                (CompareOp::Ne, Value::Null) => format!("{} IS NOT NULL", col),
                _ => format!(
                    "{} {} {}",
                    col,
                    op.sql_symbol(),
                    params.add_param(value, generator)
                ),
            }
        }
        Expr::Is {
            column,
            value,
            negated,
        } => {
            let op = if *negated { "IS NOT" } else { "IS" };
            format!(
                "{} {} {}",
                column_sql(column, generator),
                op,
                generator.literal(value)
            )
        }
        Expr::Like {
            column,
            pattern,
            case_sensitive,
            negated,
        } => {
            let col = column_sql(column, generator);
            let pattern = params.add_param(&Value::String(pattern.clone()), generator);
            if *case_sensitive {
                let op = if *negated { "NOT LIKE" } else { "LIKE" };
                format!("{} {} {}", col, op, pattern)
            } else {
                generator.case_insensitive_like(&col, &pattern, *negated)
            }
        }
        Expr::InList {
            column,
            values,
            negated,
        } => {
            if values.is_empty() {
                // Empty membership is never true; its negation always is
                return if *negated { "1 = 1".into() } else { "1 != 1".into() };
            }
            let rendered: Vec<String> = values
                .iter()
                .map(|v| params.add_param(v, generator))
                .collect();
            let op = if *negated { "NOT IN" } else { "IN" };
            format!(
                "{} {} ({})",
                column_sql(column, generator),
                op,
                rendered.join(", ")
            )
        }
        Expr::And(left, right) => {
            let l = and_operand_sql(left, generator, params);
            let r = and_operand_sql(right, generator, params);
            format!("{} AND {}", l, r)
        }
        Expr::Or(left, right) => {
            let l = expr_sql(left, generator, params);
            let r = expr_sql(right, generator, params);
            format!("{} OR {}", l, r)
        }
        Expr::Not(inner) => format!("NOT ({})", expr_sql(inner, generator, params)),
    }
}

fn and_operand_sql(expr: &Expr, generator: &dyn SqlGenerator, params: &mut ParamContext) -> String {
    match expr {
        Expr::Or(..) => format!("({})", expr_sql(expr, generator, params)),
        _ => expr_sql(expr, generator, params),
    }
}

pub fn join_sql(join: &Join, generator: &dyn SqlGenerator, params: &mut ParamContext) -> String {
    let kind = match join.kind {
        JoinKind::Inner => "JOIN",
        JoinKind::LeftOuter => "LEFT OUTER JOIN",
    };
    format!(
        "{} {} ON {} = {}",
        kind,
        generator.quote_identifier(&join.table),
        operand_sql(&join.on.left, generator, params),
        operand_sql(&join.on.right, generator, params)
    )
}
