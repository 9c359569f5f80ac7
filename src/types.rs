//! Natural-language type word resolution.

use crate::model::DataType;

/// Map a type word from prose to a logical data type.
///
/// Total and case-insensitive: unknown words fall back to VARCHAR so that a
/// declaration never fails compilation because of an unrecognized type word.
pub fn resolve(word: &str) -> DataType {
    match word.to_lowercase().as_str() {
        "integer" | "int" => DataType::Integer,
        "bigint" => DataType::BigInt,
        "number" => DataType::Number,
        "string" | "varchar" | "email" => DataType::Varchar,
        "text" => DataType::Text,
        "bool" | "boolean" | "flag" => DataType::Boolean,
        "date" => DataType::Date,
        "datetime" => DataType::DateTime,
        "timestamp" => DataType::Timestamp,
        "decimal" | "money" | "price" | "float" | "double" => DataType::Decimal,
        "json" => DataType::Json,
        "uuid" => DataType::Uuid,
        _ => DataType::Varchar,
    }
}

/// Whether a word is a recognized type keyword (used by the column parser to
/// tell type words apart from name words).
pub fn is_type_word(word: &str) -> bool {
    matches!(
        word.to_lowercase().as_str(),
        "integer"
            | "int"
            | "bigint"
            | "number"
            | "string"
            | "varchar"
            | "email"
            | "text"
            | "bool"
            | "boolean"
            | "flag"
            | "date"
            | "datetime"
            | "timestamp"
            | "decimal"
            | "money"
            | "price"
            | "float"
            | "double"
            | "json"
            | "uuid"
    )
}
