//! Logical type to native SQL type mapping.

use super::Dialect;
use crate::model::{Column, DataType};

/// Render a column's native type for the target dialect. Length applies to
/// VARCHAR (character count) and DECIMAL (precision); everything else is a
/// straight translation with no inference.
pub fn sql_type(column: &Column, dialect: Dialect) -> String {
    match column.data_type {
        DataType::Integer => "INTEGER".to_string(),
        DataType::BigInt => "BIGINT".to_string(),
        DataType::Number => match dialect {
            Dialect::PostgreSql => "NUMERIC".to_string(),
            Dialect::MySql => "DOUBLE".to_string(),
            Dialect::Sqlite => "REAL".to_string(),
        },
        DataType::String | DataType::Varchar => {
            format!("VARCHAR({})", column.length.unwrap_or(255))
        }
        DataType::Text => "TEXT".to_string(),
        DataType::Boolean => match dialect {
            Dialect::PostgreSql => "BOOLEAN".to_string(),
            Dialect::MySql => "TINYINT(1)".to_string(),
            Dialect::Sqlite => "INTEGER".to_string(),
        },
        DataType::Date => "DATE".to_string(),
        DataType::DateTime => match dialect {
            Dialect::MySql => "DATETIME".to_string(),
            _ => "TIMESTAMP".to_string(),
        },
        DataType::Timestamp => "TIMESTAMP".to_string(),
        DataType::Decimal => format!("DECIMAL({},2)", column.length.unwrap_or(10)),
        DataType::Json => match dialect {
            Dialect::Sqlite => "TEXT".to_string(),
            _ => "JSON".to_string(),
        },
        DataType::Uuid => match dialect {
            Dialect::PostgreSql => "UUID".to_string(),
            _ => "CHAR(36)".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varchar_length() {
        let col = Column::new("name", DataType::Varchar).with_length(100);
        assert_eq!(sql_type(&col, Dialect::PostgreSql), "VARCHAR(100)");
        let bare = Column::new("name", DataType::Varchar);
        assert_eq!(sql_type(&bare, Dialect::MySql), "VARCHAR(255)");
    }

    #[test]
    fn test_boolean_per_dialect() {
        let col = Column::new("active", DataType::Boolean);
        assert_eq!(sql_type(&col, Dialect::PostgreSql), "BOOLEAN");
        assert_eq!(sql_type(&col, Dialect::MySql), "TINYINT(1)");
        assert_eq!(sql_type(&col, Dialect::Sqlite), "INTEGER");
    }

    #[test]
    fn test_json_and_uuid_fallbacks() {
        let json = Column::new("meta", DataType::Json);
        assert_eq!(sql_type(&json, Dialect::Sqlite), "TEXT");
        assert_eq!(sql_type(&json, Dialect::PostgreSql), "JSON");

        let uuid = Column::new("token", DataType::Uuid);
        assert_eq!(sql_type(&uuid, Dialect::PostgreSql), "UUID");
        assert_eq!(sql_type(&uuid, Dialect::Sqlite), "CHAR(36)");
    }

    #[test]
    fn test_decimal_precision() {
        let col = Column::new("price", DataType::Decimal);
        assert_eq!(sql_type(&col, Dialect::PostgreSql), "DECIMAL(10,2)");
        let sized = Column::new("price", DataType::Decimal).with_length(12);
        assert_eq!(sql_type(&sized, Dialect::MySql), "DECIMAL(12,2)");
    }
}
