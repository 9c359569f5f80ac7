use std::collections::HashMap;

/// Logical column types shared by the parser, generators and formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Integer,
    BigInt,
    Number,
    String,
    Varchar,
    Text,
    Boolean,
    Date,
    DateTime,
    Timestamp,
    Decimal,
    Json,
    Uuid,
}

impl DataType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::Number => "number",
            Self::String => "string",
            Self::Varchar => "varchar",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Decimal => "decimal",
            Self::Json => "json",
            Self::Uuid => "uuid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationType {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationType {
    /// Cardinality notation used by DBML `Ref:` lines.
    pub fn notation(&self) -> &'static str {
        match self {
            Self::OneToOne => "1:1",
            Self::OneToMany => "1:n",
            Self::ManyToOne => "n:1",
            Self::ManyToMany => "n:m",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Duplicate table name: {0}")]
    DuplicateTable(String),
    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },
    #[error("Unknown table: {0}")]
    UnknownTable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    /// Meaningful for VARCHAR (character count) and DECIMAL (precision).
    pub length: Option<u32>,
    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub default_value: Option<String>,
    /// Non-owning (table, column) name pair resolved at use time.
    pub references: Option<(String, String)>,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            length: None,
            nullable: true,
            primary_key: false,
            unique: false,
            default_value: None,
            references: None,
        }
    }

    /// A primary-key column is implicitly non-nullable and unique.
    pub fn pk(name: impl Into<String>, data_type: DataType) -> Self {
        let mut col = Self::new(name, data_type);
        col.primary_key = true;
        col.nullable = false;
        col.unique = true;
        col
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.references = Some((table.into(), column.into()));
        self
    }

    pub fn is_foreign_key(&self) -> bool {
        self.references.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    /// Insertion order is preserved; it determines DDL and rendering order.
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn add_column(&mut self, column: Column) -> Result<(), SchemaError> {
        if self.column(&column.name).is_some() {
            return Err(SchemaError::DuplicateColumn {
                table: self.name.clone(),
                column: column.name,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Case-insensitive column lookup.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.primary_key)
    }
}

/// Directed relationship edge. The source table is the dependent side and
/// holds (or receives) the foreign-key column; endpoints are stored by name
/// so declaration order in the source text does not matter.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub fk_column: String,
    pub rel_type: RelationType,
}

impl Relationship {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        rel_type: RelationType,
    ) -> Self {
        let target = target.into();
        let fk_column = format!("{}_id", target);
        Self {
            source: source.into(),
            target,
            fk_column,
            rel_type,
        }
    }
}

/// Root aggregate: owns tables (in declaration order) and relationships.
/// One Schema instance is the unit of compilation.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub name: String,
    tables: Vec<Table>,
    index: HashMap<String, usize>,
    relationships: Vec<Relationship>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
            index: HashMap::new(),
            relationships: Vec::new(),
        }
    }

    pub fn add_table(&mut self, table: Table) -> Result<(), SchemaError> {
        let key = table.name.to_lowercase();
        if self.index.contains_key(&key) {
            return Err(SchemaError::DuplicateTable(table.name));
        }
        self.index.insert(key, self.tables.len());
        self.tables.push(table);
        Ok(())
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Case-insensitive table lookup.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.table_index(name).map(|i| &self.tables[i])
    }

    pub fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.table_index(name).map(|i| &mut self.tables[i])
    }

    /// Mutable access for parsing and manual construction. Renaming a table
    /// here bypasses the duplicate check; the validator re-scans for that.
    pub fn tables_mut(&mut self) -> &mut [Table] {
        &mut self.tables
    }

    pub fn table_index(&self, name: &str) -> Option<usize> {
        self.index.get(&name.to_lowercase()).copied()
    }

    pub fn add_relationship(&mut self, rel: Relationship) {
        self.relationships.push(rel);
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pk_column_implies_not_null_unique() {
        let col = Column::pk("id", DataType::Integer);
        assert!(col.primary_key);
        assert!(!col.nullable);
        assert!(col.unique);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut table = Table::new("users");
        table.add_column(Column::new("email", DataType::Varchar)).unwrap();
        let err = table.add_column(Column::new("Email", DataType::Text));
        assert!(matches!(err, Err(SchemaError::DuplicateColumn { .. })));
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let mut schema = Schema::new("test");
        schema.add_table(Table::new("users")).unwrap();
        let err = schema.add_table(Table::new("Users"));
        assert!(matches!(err, Err(SchemaError::DuplicateTable(_))));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut schema = Schema::new("test");
        schema.add_table(Table::new("Users")).unwrap();
        assert!(schema.table("users").is_some());
        assert!(schema.table("USERS").is_some());
        assert!(schema.table("orders").is_none());
    }

    #[test]
    fn test_relationship_fk_column_name() {
        let rel = Relationship::new("posts", "users", RelationType::ManyToOne);
        assert_eq!(rel.fk_column, "users_id");
    }
}
