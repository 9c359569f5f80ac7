//! ERD rendering: Mermaid diagram code, plain ASCII boxes and HTML tables.
//!
//! All consume a finished schema read-only. ASCII box widths are computed
//! with display cell widths so tables with wide (e.g. CJK) identifiers
//! still line up.

use crate::model::{RelationType, Schema};
use unicode_width::UnicodeWidthStr;

/// Mermaid `erDiagram` source for the schema.
pub fn to_mermaid(schema: &Schema) -> String {
    let mut lines = vec!["erDiagram".to_string()];

    for table in schema.tables() {
        lines.push(format!("  {} {{", table.name));
        for col in &table.columns {
            let key = if col.primary_key {
                " PK"
            } else if col.is_foreign_key() {
                " FK"
            } else {
                ""
            };
            let type_str = match col.length {
                Some(len) => format!("{}({})", col.data_type.name(), len),
                None => col.data_type.name().to_string(),
            };
            lines.push(format!("    {} {}{}", type_str, col.name, key));
        }
        lines.push("  }".to_string());
    }

    for rel in schema.relationships() {
        let symbol = match rel.rel_type {
            RelationType::OneToOne => "||--||",
            RelationType::OneToMany => "||--o{",
            RelationType::ManyToOne => "}o--||",
            RelationType::ManyToMany => "}o--o{",
        };
        lines.push(format!("  {} {} {} : \"\"", rel.source, symbol, rel.target));
    }

    lines.join("\n")
}

/// Simple boxed ASCII rendering, one box per table in declaration order.
pub fn to_ascii(schema: &Schema) -> String {
    let mut output = String::new();

    for table in schema.tables() {
        let rows: Vec<String> = table
            .columns
            .iter()
            .map(|col| {
                let marker = if col.primary_key { "*" } else { " " };
                let target = col
                    .references
                    .as_ref()
                    .map(|(t, _)| format!(" -> {}", t))
                    .unwrap_or_default();
                format!("{} {}: {}{}", marker, col.name, col.data_type.name(), target)
            })
            .collect();

        let width = rows
            .iter()
            .map(|r| UnicodeWidthStr::width(r.as_str()))
            .chain(std::iter::once(UnicodeWidthStr::width(table.name.as_str()) + 1))
            .max()
            .unwrap_or(0);

        output.push_str(&format!(
            "+-{}{}+\n",
            table.name,
            "-".repeat(width - UnicodeWidthStr::width(table.name.as_str()) + 1)
        ));
        for row in &rows {
            let pad = width - UnicodeWidthStr::width(row.as_str());
            output.push_str(&format!("| {}{} |\n", row, " ".repeat(pad)));
        }
        output.push_str(&format!("+{}+\n\n", "-".repeat(width + 2)));
    }

    output
}

/// HTML table rendering, one `<table>` block per schema table.
pub fn to_html(schema: &Schema) -> String {
    let mut lines = vec!["<div class='schema-visualization'>".to_string()];

    for table in schema.tables() {
        lines.push(format!("<h3>{}</h3>", table.name));
        lines.push("<table border='1' cellpadding='5'>".to_string());
        lines.push("<tr><th>Column</th><th>Type</th><th>Constraints</th></tr>".to_string());

        for col in &table.columns {
            let mut constraints = Vec::new();
            if col.primary_key {
                constraints.push("PK".to_string());
            }
            if !col.nullable {
                constraints.push("NOT NULL".to_string());
            }
            if col.unique && !col.primary_key {
                constraints.push("UNIQUE".to_string());
            }
            if let Some((ref_table, _)) = &col.references {
                constraints.push(format!("FK &rarr; {}", ref_table));
            }

            let type_str = match col.length {
                Some(len) => format!("{}({})", col.data_type.name(), len),
                None => col.data_type.name().to_string(),
            };
            lines.push(format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                col.name,
                type_str,
                constraints.join(", ")
            ));
        }

        lines.push("</table><br>".to_string());
    }

    lines.push("</div>".to_string());
    lines.join("\n")
}
