//! DBML serialization of a finished schema.
//!
//! Read-only formatting; no validation or inference happens here.

use crate::model::{Column, Schema, Table};

pub fn to_dbml(schema: &Schema) -> String {
    let mut output = String::new();
    output.push_str(&format!("// Database: {}\n\n", schema.name));

    for table in schema.tables() {
        serialize_table(&mut output, table);
        output.push('\n');
    }

    if !schema.relationships().is_empty() {
        output.push_str("// Relationships\n");
        for rel in schema.relationships() {
            let pk_name = schema
                .table(&rel.target)
                .and_then(|t| t.primary_key())
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "id".to_string());
            output.push_str(&format!(
                "Ref: {}.{} {} {}.{}\n",
                rel.source,
                rel.fk_column,
                rel.rel_type.notation(),
                rel.target,
                pk_name
            ));
        }
    }

    output
}

fn serialize_table(output: &mut String, table: &Table) {
    output.push_str(&format!("Table {} {{\n", table.name));
    for column in &table.columns {
        serialize_column(output, column);
    }
    output.push_str("}\n");
}

fn serialize_column(output: &mut String, column: &Column) {
    let type_str = match column.length {
        Some(len) => format!("{}({})", column.data_type.name(), len),
        None => column.data_type.name().to_string(),
    };
    output.push_str(&format!("  {} {}", column.name, type_str));

    let mut attrs = Vec::new();
    if column.primary_key {
        attrs.push("pk".to_string());
    }
    if !column.nullable {
        attrs.push("not null".to_string());
    }
    if column.unique && !column.primary_key {
        attrs.push("unique".to_string());
    }
    if let Some(default) = &column.default_value {
        attrs.push(format!("default: {}", default));
    }
    if let Some((table, col)) = &column.references {
        attrs.push(format!("ref: > {}.{}", table, col));
    }

    if !attrs.is_empty() {
        output.push_str(&format!(" [{}]", attrs.join(", ")));
    }
    output.push('\n');
}
