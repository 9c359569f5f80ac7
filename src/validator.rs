//! Structural and referential schema validation.
//!
//! Read-only and idempotent. All findings are accumulated so a caller sees
//! the full defect list in one pass; nothing here raises.

use crate::model::{RelationType, Schema};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn validate(schema: &Schema) -> ValidationReport {
    let mut report = ValidationReport::default();

    // Duplicate table names. The schema index rejects duplicates on insert,
    // but a rename after construction can still collide.
    let tables = schema.tables();
    for (i, table) in tables.iter().enumerate() {
        if tables[..i]
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(&table.name))
        {
            report
                .errors
                .push(format!("Duplicate table name: '{}'", table.name));
        }
    }

    for table in tables {
        let pk_count = table.columns.iter().filter(|c| c.primary_key).count();
        match pk_count {
            0 => report
                .errors
                .push(format!("Table '{}' has no primary key", table.name)),
            1 => {}
            n => report.errors.push(format!(
                "Table '{}' has {} primary key columns; composite keys are not supported",
                table.name, n
            )),
        }

        for (i, col) in table.columns.iter().enumerate() {
            if table.columns[..i]
                .iter()
                .any(|c| c.name.eq_ignore_ascii_case(&col.name))
            {
                report.errors.push(format!(
                    "Table '{}' has duplicate column name: '{}'",
                    table.name, col.name
                ));
            }

            if let Some((ref_table, ref_column)) = &col.references {
                match schema.table(ref_table) {
                    None => report.errors.push(format!(
                        "Column '{}.{}' references non-existent table '{}'",
                        table.name, col.name, ref_table
                    )),
                    Some(target) => {
                        if target.column(ref_column).is_none() {
                            report.errors.push(format!(
                                "Column '{}.{}' references non-existent column '{}.{}'",
                                table.name, col.name, ref_table, ref_column
                            ));
                        }
                    }
                }
            }
        }
    }

    for rel in schema.relationships() {
        let source = schema.table(&rel.source);
        let target = schema.table(&rel.target);

        if source.is_none() {
            report.errors.push(format!(
                "Relationship references non-existent table '{}'",
                rel.source
            ));
        }
        if target.is_none() {
            report.errors.push(format!(
                "Relationship references non-existent table '{}'",
                rel.target
            ));
        }

        if let (Some(source), Some(target)) = (source, target) {
            match source.column(&rel.fk_column) {
                None => report.errors.push(format!(
                    "Table '{}' is missing foreign-key column '{}' implied by its relationship to '{}'",
                    rel.source, rel.fk_column, rel.target
                )),
                Some(fk) => {
                    if let Some(pk) = target.primary_key() {
                        if fk.data_type != pk.data_type {
                            report.errors.push(format!(
                                "Foreign key '{}.{}' has type {} but '{}.{}' is {}",
                                rel.source,
                                rel.fk_column,
                                fk.data_type.name(),
                                rel.target,
                                pk.name,
                                pk.data_type.name()
                            ));
                        }
                    }
                }
            }

            if rel.rel_type == RelationType::ManyToOne
                && rel.source.eq_ignore_ascii_case(&rel.target)
            {
                report.warnings.push(format!(
                    "Table '{}' has a self-referencing relationship",
                    rel.source
                ));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, DataType, RelationType, Relationship, Schema, Table};
    use crate::parser::Parser;

    fn users_table() -> Table {
        let mut t = Table::new("users");
        t.add_column(Column::pk("id", DataType::Integer)).unwrap();
        t.add_column(Column::new("name", DataType::Varchar).with_length(100))
            .unwrap();
        t
    }

    #[test]
    fn test_valid_parsed_schema() {
        let schema = Parser::new(
            "Create a users table with name. Create a posts table. Posts belongs to users.",
        )
        .parse()
        .unwrap();
        let report = validate(&schema);
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_missing_primary_key() {
        let mut schema = Schema::new("test");
        let mut t = Table::new("users");
        t.add_column(Column::new("name", DataType::Varchar)).unwrap();
        schema.add_table(t).unwrap();

        let report = validate(&schema);
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("no primary key"));
    }

    #[test]
    fn test_duplicate_table_name_after_rename() {
        let mut schema = Schema::new("test");
        schema.add_table(users_table()).unwrap();
        let mut other = users_table();
        other.name = "accounts".to_string();
        schema.add_table(other).unwrap();
        schema.tables_mut()[1].name = "Users".to_string();

        let report = validate(&schema);
        assert!(!report.is_valid());
        assert!(report.errors.iter().any(|e| e.contains("Duplicate table name")));

        // Fixing the name makes the schema valid again.
        schema.tables_mut()[1].name = "accounts".to_string();
        assert!(validate(&schema).is_valid());
    }

    #[test]
    fn test_dangling_reference() {
        let mut schema = Schema::new("test");
        let mut t = users_table();
        t.add_column(Column::new("team_id", DataType::Integer).references("teams", "id"))
            .unwrap();
        schema.add_table(t).unwrap();

        let report = validate(&schema);
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("non-existent table 'teams'"));
    }

    #[test]
    fn test_relationship_missing_table() {
        let mut schema = Schema::new("test");
        schema.add_table(users_table()).unwrap();
        schema.add_relationship(Relationship::new("posts", "users", RelationType::ManyToOne));

        let report = validate(&schema);
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("'posts'"));
    }

    #[test]
    fn test_fk_type_mismatch() {
        let mut schema = Schema::new("test");
        schema.add_table(users_table()).unwrap();
        let mut posts = Table::new("posts");
        posts.add_column(Column::pk("id", DataType::Integer)).unwrap();
        posts
            .add_column(Column::new("users_id", DataType::Uuid).references("users", "id"))
            .unwrap();
        schema.add_table(posts).unwrap();
        schema.add_relationship(Relationship::new("posts", "users", RelationType::ManyToOne));

        let report = validate(&schema);
        assert!(!report.is_valid());
        assert!(report.errors.iter().any(|e| e.contains("uuid")));
    }

    #[test]
    fn test_self_reference_is_warning_only() {
        let schema = Parser::new(
            "Create an employees table with name. Employees belongs to employees.",
        )
        .parse()
        .unwrap();
        let report = validate(&schema);
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("self-referencing"));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let schema = Parser::new("Create a users table with name.").parse().unwrap();
        assert_eq!(validate(&schema), validate(&schema));
    }
}
