//! SQL dialect selection and quoting conventions.

/// Supported SQL dialect variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    PostgreSql,
    MySql,
    Sqlite,
}

impl Dialect {
    /// Parse dialect from string. Unknown names yield `None`; callers must
    /// surface that as an explicit error rather than assuming a default.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Self::PostgreSql),
            "mysql" => Some(Self::MySql),
            "sqlite" | "sqlite3" => Some(Self::Sqlite),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PostgreSql => "postgresql",
            Self::MySql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }

    /// Dialect identifier quoting.
    pub fn quote(&self, ident: &str) -> String {
        match self {
            Self::MySql => format!("`{}`", ident),
            _ => format!("\"{}\"", ident),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Dialect::from_str("postgresql"), Some(Dialect::PostgreSql));
        assert_eq!(Dialect::from_str("Postgres"), Some(Dialect::PostgreSql));
        assert_eq!(Dialect::from_str("MYSQL"), Some(Dialect::MySql));
        assert_eq!(Dialect::from_str("sqlite3"), Some(Dialect::Sqlite));
        assert_eq!(Dialect::from_str("oracle"), None);
    }

    #[test]
    fn test_quoting() {
        assert_eq!(Dialect::PostgreSql.quote("users"), "\"users\"");
        assert_eq!(Dialect::MySql.quote("users"), "`users`");
        assert_eq!(Dialect::Sqlite.quote("users"), "\"users\"");
    }
}
