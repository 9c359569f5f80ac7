//! Compiler facade tying the pipeline together.
//!
//! One `SchemaCompiler` holds one schema; instances share no state, so
//! concurrent callers each holding their own compiler need no locking.

use crate::dbml;
use crate::model::{Schema, SchemaError};
use crate::parser::Parser;
use crate::render;
use crate::sql::{self, Dialect};
use crate::testdata::{DataError, DataGenerator, TestData};
use crate::validator::{self, ValidationReport};

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("No schema compiled; call compile() or load_schema() first")]
    NoSchema,
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Unsupported SQL dialect: {0}")]
    UnsupportedDialect(String),
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Derived schema statistics; counting only, no new computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub schema_name: String,
    pub num_tables: usize,
    pub num_relationships: usize,
    pub total_columns: usize,
    pub total_primary_keys: usize,
    pub total_foreign_keys: usize,
    pub tables: Vec<String>,
}

#[derive(Debug, Default)]
pub struct SchemaCompiler {
    schema: Option<Schema>,
}

impl SchemaCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a natural-language description into a fresh schema. Structural
    /// errors (duplicate names) fail the call; unrecognized sentences never
    /// do.
    pub fn compile(&mut self, text: &str, schema_name: &str) -> Result<&Schema, CompileError> {
        let mut schema = Parser::new(text).parse()?;
        schema.name = schema_name.to_string();
        Ok(self.schema.insert(schema))
    }

    /// Replace the current schema with a manually constructed one,
    /// bypassing the parser entirely.
    pub fn load_schema(&mut self, schema: Schema) {
        self.schema = Some(schema);
    }

    /// Read-only handle to the compiled schema.
    pub fn get_schema(&self) -> Result<&Schema, CompileError> {
        self.schema.as_ref().ok_or(CompileError::NoSchema)
    }

    pub fn validate(&self) -> Result<ValidationReport, CompileError> {
        Ok(validator::validate(self.get_schema()?))
    }

    pub fn generate_migration(&self, dialect: &str) -> Result<String, CompileError> {
        let schema = self.get_schema()?;
        let dialect = Dialect::from_str(dialect)
            .ok_or_else(|| CompileError::UnsupportedDialect(dialect.to_string()))?;
        Ok(sql::generate(schema, dialect))
    }

    pub fn generate_test_data(&self, num_rows: usize) -> Result<TestData, CompileError> {
        Ok(DataGenerator::new().generate(self.get_schema()?, num_rows)?)
    }

    pub fn to_dbml(&self) -> Result<String, CompileError> {
        Ok(dbml::to_dbml(self.get_schema()?))
    }

    pub fn to_mermaid(&self) -> Result<String, CompileError> {
        Ok(render::to_mermaid(self.get_schema()?))
    }

    pub fn to_ascii(&self) -> Result<String, CompileError> {
        Ok(render::to_ascii(self.get_schema()?))
    }

    pub fn to_html(&self) -> Result<String, CompileError> {
        Ok(render::to_html(self.get_schema()?))
    }

    pub fn summary(&self) -> Result<Summary, CompileError> {
        let schema = self.get_schema()?;
        let tables = schema.tables();
        Ok(Summary {
            schema_name: schema.name.clone(),
            num_tables: tables.len(),
            num_relationships: schema.relationships().len(),
            total_columns: tables.iter().map(|t| t.columns.len()).sum(),
            total_primary_keys: tables
                .iter()
                .flat_map(|t| &t.columns)
                .filter(|c| c.primary_key)
                .count(),
            total_foreign_keys: tables
                .iter()
                .flat_map(|t| &t.columns)
                .filter(|c| c.is_foreign_key())
                .count(),
            tables: tables.iter().map(|t| t.name.clone()).collect(),
        })
    }
}
