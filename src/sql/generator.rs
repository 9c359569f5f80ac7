//! DDL and INSERT statement rendering.
//!
//! Tables are emitted in foreign-key dependency order so inline REFERENCES
//! clauses are always valid at creation time. The generator translates the
//! schema model directly; it performs no validation or inference.

use super::{Dialect, sql_type};
use crate::model::{DataType, Schema, Table};
use crate::order;
use crate::testdata::TestData;

/// Generate `CREATE TABLE` DDL for the whole schema, referenced tables
/// first, followed by an index per foreign-key column.
pub fn generate(schema: &Schema, dialect: Dialect) -> String {
    let ordering = order::order(schema);
    let mut statements = Vec::new();

    for table in ordering.tables(schema) {
        statements.push(create_table(table, dialect));
    }

    for table in ordering.tables(schema) {
        for col in &table.columns {
            if col.is_foreign_key() && !col.primary_key {
                statements.push(format!(
                    "CREATE INDEX {} ON {}({});",
                    dialect.quote(&format!("idx_{}_{}", table.name, col.name)),
                    dialect.quote(&table.name),
                    dialect.quote(&col.name)
                ));
            }
        }
    }

    statements.join("\n\n")
}

/// Render generated test data as INSERT statements. Rows carry their column
/// order, so only quoting depends on the dialect.
pub fn insert_statements(data: &TestData, dialect: Dialect) -> String {
    let mut out = Vec::new();
    for (table, rows) in data.tables() {
        for row in rows {
            let cols: Vec<String> = row.iter().map(|(n, _)| dialect.quote(n)).collect();
            let vals: Vec<String> = row.iter().map(|(_, v)| v.to_string()).collect();
            out.push(format!(
                "INSERT INTO {} ({}) VALUES ({});",
                dialect.quote(table),
                cols.join(", "),
                vals.join(", ")
            ));
        }
    }
    out.join("\n")
}

fn create_table(table: &Table, dialect: Dialect) -> String {
    let mut lines = vec![format!(
        "CREATE TABLE IF NOT EXISTS {} (",
        dialect.quote(&table.name)
    )];
    let defs: Vec<String> = table
        .columns
        .iter()
        .map(|c| column_def(c, dialect))
        .collect();
    lines.push(defs.join(",\n"));
    lines.push(");".to_string());
    lines.join("\n")
}

fn column_def(col: &crate::model::Column, dialect: Dialect) -> String {
    let name = dialect.quote(&col.name);

    if col.primary_key {
        // Integer primary keys get the dialect's auto-increment form.
        if col.data_type == DataType::Integer {
            return match dialect {
                Dialect::PostgreSql => format!("  {} SERIAL PRIMARY KEY", name),
                Dialect::MySql => format!("  {} INTEGER PRIMARY KEY AUTO_INCREMENT", name),
                Dialect::Sqlite => format!("  {} INTEGER PRIMARY KEY", name),
            };
        }
        return format!("  {} {} PRIMARY KEY", name, sql_type(col, dialect));
    }

    let mut def = format!("  {} {}", name, sql_type(col, dialect));
    if !col.nullable {
        def.push_str(" NOT NULL");
    }
    if col.unique {
        def.push_str(" UNIQUE");
    }
    if let Some(default) = &col.default_value {
        def.push_str(&format!(" DEFAULT {}", default));
    }
    if let Some((ref_table, ref_column)) = &col.references {
        def.push_str(&format!(
            " REFERENCES {}({})",
            dialect.quote(ref_table),
            dialect.quote(ref_column)
        ));
    }
    def
}
