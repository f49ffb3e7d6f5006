//! SQL text for the member⟕team join.
//!
//! Filters are rendered against table-qualified source columns; sorts are
//! rendered against projection aliases.

use super::page::Order;
use super::predicate::{Filter, Operand, Predicate};
use rusqlite::types::Value;

pub(crate) const MEMBER_TEAM_JOIN_SQL: &str =
    "FROM member m LEFT JOIN team t ON t.team_id = m.team_id";

pub(crate) const MEMBER_TEAM_PROJECTION_SQL: &str = "m.member_id AS member_id,
    m.username AS username,
    m.age AS age,
    t.team_id AS team_id,
    t.name AS team_name";

/// Appends ` WHERE 1 = 1 [AND fragment]...` and collects bind values in
/// placeholder order.
pub(crate) fn push_where(filter: &Filter, sql: &mut String, binds: &mut Vec<Value>) {
    sql.push_str(" WHERE 1 = 1");
    for predicate in filter.predicates() {
        sql.push_str(" AND ");
        push_predicate(predicate, sql, binds);
    }
}

fn push_predicate(predicate: &Predicate, sql: &mut String, binds: &mut Vec<Value>) {
    match predicate {
        Predicate::Eq(column, operand) => {
            sql.push_str(column.qualified());
            sql.push_str(" = ?");
            binds.push(match operand {
                Operand::Text(text) => Value::Text(text.clone()),
                Operand::Integer(value) => Value::Integer(*value),
            });
        }
        Predicate::Goe(column, bound) => {
            sql.push_str(column.qualified());
            sql.push_str(" >= ?");
            binds.push(Value::Integer(*bound));
        }
        Predicate::Loe(column, bound) => {
            sql.push_str(column.qualified());
            sql.push_str(" <= ?");
            binds.push(Value::Integer(*bound));
        }
        Predicate::And(parts) if parts.is_empty() => sql.push_str("1 = 1"),
        Predicate::And(parts) => {
            sql.push('(');
            for (idx, part) in parts.iter().enumerate() {
                if idx > 0 {
                    sql.push_str(" AND ");
                }
                push_predicate(part, sql, binds);
            }
            sql.push(')');
        }
    }
}

/// Renders `alias DIR, alias DIR` for an ORDER BY or OVER clause.
pub(crate) fn order_list(orders: &[Order]) -> String {
    orders
        .iter()
        .map(|order| format!("{} {}", order.column.alias(), order.direction.sql()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SQLite binds are signed; offsets beyond `i64::MAX` select nothing anyway.
pub(crate) fn to_sql_integer(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
