//! SQL text generation from named column lists.
//!
//! Every table-backed record describes itself through [`Record`]: its table, its
//! columns in SELECT order, how to read itself back from a row by column *name*,
//! and which (column, value) pairs an INSERT or UPDATE writes. Selected columns are
//! always aliased as `<table>__<column>` so that joined rows can be split back into
//! their records without relying on column position.

use bb8_postgres::tokio_postgres::types::{FromSql, ToSql};
use bb8_postgres::tokio_postgres::{Error, Row};

/// A single column/value pair written by an INSERT or UPDATE.
pub struct Binding<'a> {
    pub column: &'static str,
    pub value: &'a (dyn ToSql + Sync),
}

impl<'a> Binding<'a> {
    pub fn new(column: &'static str, value: &'a (dyn ToSql + Sync)) -> Self {
        Self { column, value }
    }
}

/// Anything that can be rebuilt from a selected row.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self, Error>;
}

/// A record persisted in its own table, keyed by an integer `id`.
pub trait Record: FromRow {
    const TABLE: &'static str;
    /// All columns, `id` first, in the order they are selected.
    const COLUMNS: &'static [&'static str];

    fn key(&self) -> &i32;

    /// Columns written on insert and update. Never includes `id`.
    fn bindings(&self) -> Vec<Binding<'_>>;
}

pub fn column_alias(table: &str, column: &str) -> String {
    format!("{}__{}", table, column)
}

/// Reads `table.column` out of a row produced by one of the builders below.
pub fn read<'r, T: FromSql<'r>>(row: &'r Row, table: &str, column: &str) -> Result<T, Error> {
    row.try_get(column_alias(table, column).as_str())
}

/// `location.id AS location__id, location.street AS location__street, ...`
pub fn select_list<R: Record>() -> String {
    R::COLUMNS
        .iter()
        .map(|column| {
            format!(
                "{table}.{column} AS {alias}",
                table = R::TABLE,
                column = column,
                alias = column_alias(R::TABLE, column)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn insert<R: Record>(bindings: &[Binding<'_>]) -> String {
    let columns = bindings
        .iter()
        .map(|binding| binding.column)
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=bindings.len())
        .map(|n| format!("${}", n))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
        R::TABLE,
        columns,
        placeholders
    )
}

/// The key is bound after every binding, as the last parameter.
pub fn update<R: Record>(bindings: &[Binding<'_>]) -> String {
    let assignments = bindings
        .iter()
        .enumerate()
        .map(|(i, binding)| format!("{} = ${}", binding.column, i + 1))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {} WHERE id = ${} RETURNING {}",
        R::TABLE,
        assignments,
        bindings.len() + 1,
        select_list::<R>()
    )
}

pub fn delete<R: Record>() -> String {
    format!(
        "DELETE FROM {} WHERE id = $1 RETURNING {}",
        R::TABLE,
        select_list::<R>()
    )
}

/// Escapes LIKE wildcards so user text only ever matches literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Incrementally built SELECT with numbered, owned parameters.
pub struct Select {
    from: &'static str,
    columns: Vec<String>,
    joins: Vec<String>,
    conditions: Vec<String>,
    order_by: Option<String>,
    params: Vec<Box<dyn ToSql + Sync + Send>>,
}

impl Select {
    /// Selects every column of `R` from its own table.
    pub fn from<R: Record>() -> Self {
        Self {
            from: R::TABLE,
            columns: vec![select_list::<R>()],
            joins: Vec::new(),
            conditions: Vec::new(),
            order_by: None,
            params: Vec::new(),
        }
    }

    /// Adds `INNER JOIN` on `J`'s table and selects all of its columns.
    pub fn inner_join<J: Record>(mut self, on: &str) -> Self {
        self.joins.push(format!("INNER JOIN {} ON {}", J::TABLE, on));
        self.columns.push(select_list::<J>());
        self
    }

    /// AND-s a condition onto the WHERE clause. Every `{}` in `condition` is
    /// replaced by the placeholder bound to `value`.
    pub fn and_where<T>(mut self, condition: &str, value: T) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.params.push(Box::new(value));
        let placeholder = format!("${}", self.params.len());
        self.conditions.push(condition.replace("{}", &placeholder));
        self
    }

    pub fn order_by(mut self, column: &str) -> Self {
        self.order_by = Some(column.to_string());
        self
    }

    pub fn to_sql(&self) -> String {
        let mut sql = format!("SELECT {} FROM {}", self.columns.join(", "), self.from);
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        if let Some(order_by) = &self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
        sql
    }

    pub fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param.as_ref() as &(dyn ToSql + Sync))
            .collect()
    }
}
