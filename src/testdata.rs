//! Constraint-aware synthetic test data.
//!
//! Rows are generated per table in foreign-key dependency order: a table's
//! primary-key values are pooled as they are produced, and dependent tables
//! draw their foreign-key values only from those pools. Primary keys and
//! `unique` columns are collision-checked; exhausting a type's value space
//! is a capacity error, never an endless retry loop.
//!
//! Generation is deterministic for a given seed (default 42) so repeated
//! runs over the same schema produce identical data sets.

use crate::model::{Column, DataType, Schema, Table};
use crate::order;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};
use std::fmt;

const DEFAULT_SEED: u64 = 42;
const DEFAULT_NULL_RATE: f64 = 0.1;
/// Retry budget per collision-checked value before giving up.
const MAX_UNIQUE_ATTEMPTS: usize = 200;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Charlie", "Diana", "Eve", "Frank", "Grace", "Henry",
];
const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller",
];

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error(
        "Cannot generate {requested} unique {data_type} values for column '{table}.{column}'"
    )]
    CapacityExceeded {
        table: String,
        column: String,
        data_type: &'static str,
        requested: usize,
    },
}

/// A generated literal, displayed in SQL form.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", if *v { "TRUE" } else { "FALSE" }),
            Self::Str(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

/// One row: column name/value pairs in column declaration order.
pub type Row = Vec<(String, Value)>;

/// Generated rows per table, in generation (dependency) order.
#[derive(Debug, Clone, Default)]
pub struct TestData {
    tables: Vec<(String, Vec<Row>)>,
}

impl TestData {
    pub fn tables(&self) -> &[(String, Vec<Row>)] {
        &self.tables
    }

    pub fn rows(&self, table: &str) -> Option<&[Row]> {
        self.tables
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(table))
            .map(|(_, rows)| rows.as_slice())
    }
}

pub struct DataGenerator {
    rng: ChaCha8Rng,
    null_rate: f64,
}

impl Default for DataGenerator {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl DataGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            null_rate: DEFAULT_NULL_RATE,
        }
    }

    /// Probability that a nullable non-key column receives NULL.
    pub fn null_rate(mut self, rate: f64) -> Self {
        self.null_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn generate(
        &mut self,
        schema: &Schema,
        rows_per_table: usize,
    ) -> Result<TestData, DataError> {
        let ordering = order::order(schema);
        let mut pk_pools: HashMap<String, Vec<Value>> = HashMap::new();
        let mut data = TestData::default();

        for table in ordering.tables(schema) {
            let rows = self.generate_table(table, rows_per_table, &pk_pools)?;
            let pool = rows
                .iter()
                .filter_map(|row| {
                    table.primary_key().and_then(|pk| {
                        row.iter()
                            .find(|(name, _)| name == &pk.name)
                            .map(|(_, v)| v.clone())
                    })
                })
                .collect();
            pk_pools.insert(table.name.to_lowercase(), pool);
            data.tables.push((table.name.clone(), rows));
        }

        Ok(data)
    }

    fn generate_table(
        &mut self,
        table: &Table,
        rows_per_table: usize,
        pk_pools: &HashMap<String, Vec<Value>>,
    ) -> Result<Vec<Row>, DataError> {
        // Boolean value space is two; fail up front instead of retrying.
        for col in &table.columns {
            if (col.unique || col.primary_key)
                && col.data_type == DataType::Boolean
                && rows_per_table > 2
            {
                return Err(DataError::CapacityExceeded {
                    table: table.name.clone(),
                    column: col.name.clone(),
                    data_type: col.data_type.name(),
                    requested: rows_per_table,
                });
            }
        }

        let mut seen: HashMap<String, HashSet<String>> = HashMap::new();
        let mut rows = Vec::with_capacity(rows_per_table);

        for i in 0..rows_per_table {
            let mut row = Row::with_capacity(table.columns.len());
            for col in &table.columns {
                let value = if col.primary_key {
                    self.primary_key_value(table, col, i, rows_per_table, &mut seen)?
                } else if let Some((ref_table, _)) = &col.references {
                    // Draw only from the referenced table's primary-key
                    // pool. A missing pool means the caller skipped
                    // validation; emit NULL rather than invent a value.
                    match pk_pools.get(&ref_table.to_lowercase()) {
                        Some(pool) if !pool.is_empty() => {
                            if col.unique {
                                // One-to-one: each pool value at most once.
                                self.draw_unique_fk(table, col, pool, rows_per_table, &mut seen)?
                            } else {
                                pool[self.rng.gen_range(0..pool.len())].clone()
                            }
                        }
                        _ => Value::Null,
                    }
                } else if col.unique {
                    self.unique_value(table, col, i, rows_per_table, &mut seen)?
                } else if col.nullable && self.rng.gen_bool(self.null_rate) {
                    Value::Null
                } else {
                    self.plain_value(col, i)
                };
                row.push((col.name.clone(), value));
            }
            rows.push(row);
        }

        Ok(rows)
    }

    fn primary_key_value(
        &mut self,
        table: &Table,
        col: &Column,
        index: usize,
        rows_per_table: usize,
        seen: &mut HashMap<String, HashSet<String>>,
    ) -> Result<Value, DataError> {
        match col.data_type {
            // Monotonic assignment: unique by construction.
            DataType::Integer | DataType::BigInt | DataType::Number => {
                Ok(Value::Int(index as i64 + 1))
            }
            _ => self.unique_value(table, col, index, rows_per_table, seen),
        }
    }

    fn unique_value(
        &mut self,
        table: &Table,
        col: &Column,
        index: usize,
        rows_per_table: usize,
        seen: &mut HashMap<String, HashSet<String>>,
    ) -> Result<Value, DataError> {
        for attempt in 0..MAX_UNIQUE_ATTEMPTS {
            let mut candidate = self.plain_value(col, index);
            // Name-heuristic strings draw from small template pools, so
            // repeats are common; disambiguate with a row-scoped suffix
            // instead of retrying the same pool forever.
            if attempt > 0 {
                if let Value::Str(s) = &mut candidate {
                    s.push_str(&format!("-{}", index + 1));
                    if let Some(len) = col.length {
                        *s = s.chars().take(len as usize).collect();
                    }
                }
            }
            let key = candidate.to_string();
            if seen.entry(col.name.clone()).or_default().insert(key) {
                return Ok(candidate);
            }
        }
        Err(DataError::CapacityExceeded {
            table: table.name.clone(),
            column: col.name.clone(),
            data_type: col.data_type.name(),
            requested: rows_per_table,
        })
    }

    /// Draw a not-yet-used value from a referenced primary-key pool.
    fn draw_unique_fk(
        &mut self,
        table: &Table,
        col: &Column,
        pool: &[Value],
        rows_per_table: usize,
        seen: &mut HashMap<String, HashSet<String>>,
    ) -> Result<Value, DataError> {
        let drawn = seen.entry(col.name.clone()).or_default();
        let remaining: Vec<&Value> = pool
            .iter()
            .filter(|v| !drawn.contains(&v.to_string()))
            .collect();
        if remaining.is_empty() {
            return Err(DataError::CapacityExceeded {
                table: table.name.clone(),
                column: col.name.clone(),
                data_type: col.data_type.name(),
                requested: rows_per_table,
            });
        }
        let value = remaining[self.rng.gen_range(0..remaining.len())].clone();
        drawn.insert(value.to_string());
        Ok(value)
    }

    /// Type- and name-aware value synthesis.
    fn plain_value(&mut self, col: &Column, index: usize) -> Value {
        match col.data_type {
            DataType::Integer => Value::Int(self.rng.gen_range(1..=1000)),
            DataType::BigInt => Value::Int(self.rng.gen_range(1_000_000..=9_999_999_999)),
            DataType::Number => Value::Float(round2(self.rng.gen_range(1.0..10_000.0))),
            DataType::String | DataType::Varchar => self.string_value(col, index),
            DataType::Text => Value::Str(format!(
                "Sample text content for row {}. Lorem ipsum dolor sit amet.",
                index
            )),
            DataType::Boolean => Value::Bool(self.rng.r#gen()),
            DataType::Date => Value::Str(self.random_date()),
            DataType::DateTime | DataType::Timestamp => {
                let date = self.random_date();
                Value::Str(format!(
                    "{} {:02}:{:02}:{:02}",
                    date,
                    self.rng.gen_range(0..24),
                    self.rng.gen_range(0..60),
                    self.rng.gen_range(0..60)
                ))
            }
            DataType::Decimal => Value::Float(round2(self.rng.gen_range(10.0..1000.0))),
            DataType::Json => Value::Str("{}".to_string()),
            DataType::Uuid => Value::Str(self.random_uuid()),
        }
    }

    fn string_value(&mut self, col: &Column, index: usize) -> Value {
        let name = col.name.to_lowercase();
        let text = if name.contains("email") {
            format!("user{}@example.com", index)
        } else if name.contains("first") && name.contains("name") {
            self.pick(FIRST_NAMES).to_string()
        } else if name.contains("last") && name.contains("name") {
            self.pick(LAST_NAMES).to_string()
        } else if name.contains("name") {
            format!("{} {}", self.pick(FIRST_NAMES), self.pick(LAST_NAMES))
        } else if name.contains("phone") {
            format!(
                "+1-555-{:03}-{:04}",
                self.rng.gen_range(100..1000),
                self.rng.gen_range(1000..10000)
            )
        } else if name.contains("title") {
            format!("Title {}", index + 1)
        } else {
            format!("{}_{}", name, index)
        };

        let sized = match col.length {
            Some(len) => text.chars().take(len as usize).collect(),
            None => text,
        };
        Value::Str(sized)
    }

    fn pick<'a>(&mut self, pool: &[&'a str]) -> &'a str {
        pool[self.rng.gen_range(0..pool.len())]
    }

    /// Random day within a bounded recent window.
    fn random_date(&mut self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.rng.gen_range(2023..2026),
            self.rng.gen_range(1..13),
            self.rng.gen_range(1..29)
        )
    }

    fn random_uuid(&mut self) -> String {
        format!(
            "{:08x}-{:04x}-4{:03x}-{:x}{:03x}-{:012x}",
            self.rng.r#gen::<u32>(),
            self.rng.r#gen::<u16>(),
            self.rng.gen_range(0u16..0x1000),
            self.rng.gen_range(8u8..12),
            self.rng.gen_range(0u16..0x1000),
            self.rng.r#gen::<u64>() & 0xffff_ffff_ffff
        )
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
