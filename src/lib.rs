pub mod compiler;
pub mod dbml;
pub mod model;
pub mod order;
pub mod parser;
pub mod render;
pub mod sql;
pub mod testdata;
pub mod types;
pub mod validator;

use wasm_bindgen::prelude::*;

use compiler::SchemaCompiler;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Compile a natural-language schema description to SQL DDL
#[wasm_bindgen(js_name = "compileToSql")]
pub fn compile_to_sql(
    source: &str,
    schema_name: Option<String>,
    dialect: Option<String>,
) -> Result<String, String> {
    let mut compiler = SchemaCompiler::new();
    compiler
        .compile(source, schema_name.as_deref().unwrap_or("database"))
        .map_err(|e| e.to_string())?;
    compiler
        .generate_migration(dialect.as_deref().unwrap_or("postgresql"))
        .map_err(|e| e.to_string())
}

/// Compile a natural-language schema description to DBML
#[wasm_bindgen(js_name = "compileToDbml")]
pub fn compile_to_dbml(source: &str, schema_name: Option<String>) -> Result<String, String> {
    let mut compiler = SchemaCompiler::new();
    compiler
        .compile(source, schema_name.as_deref().unwrap_or("database"))
        .map_err(|e| e.to_string())?;
    compiler.to_dbml().map_err(|e| e.to_string())
}
