//! Multi-dialect SQL DDL generation.

mod dialect;
mod generator;
mod types;

pub use dialect::Dialect;
pub use generator::{generate, insert_statements};
pub use types::sql_type;
