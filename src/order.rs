//! Foreign-key dependency ordering.
//!
//! Topological sort over the graph whose edges run from a dependent table to
//! the table it references. Referenced tables come first, so `CREATE TABLE`
//! statements and test-data generation can rely on every target existing
//! before its dependents. Shared by the SQL and test-data generators.

use crate::model::{RelationType, Schema, Table};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct Ordering {
    indices: Vec<usize>,
    pub warnings: Vec<String>,
}

impl Ordering {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn tables<'a>(&'a self, schema: &'a Schema) -> impl Iterator<Item = &'a Table> + 'a {
        self.indices.iter().map(move |&i| &schema.tables()[i])
    }
}

/// Compute a deterministic dependency order.
///
/// Ties between unconstrained tables break by declaration order. Cycles are
/// broken at the lowest-declared remaining table by dropping its unsatisfied
/// edges, with a warning per dropped edge; ordering never fails.
pub fn order(schema: &Schema) -> Ordering {
    let tables = schema.tables();
    let n = tables.len();
    let mut warnings = Vec::new();

    // deps[i] = set of table indices that table i references.
    let mut deps: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
    for (i, table) in tables.iter().enumerate() {
        for col in &table.columns {
            if let Some((ref_table, _)) = &col.references {
                if let Some(j) = schema.table_index(ref_table) {
                    if j != i {
                        deps[i].insert(j);
                    }
                }
            }
        }
    }
    for rel in schema.relationships() {
        if rel.rel_type == RelationType::ManyToMany {
            continue;
        }
        if let (Some(i), Some(j)) = (schema.table_index(&rel.source), schema.table_index(&rel.target))
        {
            if i != j {
                deps[i].insert(j);
            }
        }
    }

    let mut emitted = vec![false; n];
    let mut indices = Vec::with_capacity(n);

    while indices.len() < n {
        let next = (0..n)
            .find(|&i| !emitted[i] && deps[i].iter().all(|&j| emitted[j]));

        match next {
            Some(i) => {
                emitted[i] = true;
                indices.push(i);
            }
            None => {
                // Cycle: force the lowest-declared remaining table out,
                // dropping whatever edges still hold it back.
                let i = (0..n).find(|&i| !emitted[i]).unwrap_or(0);
                for &j in deps[i].iter().filter(|&&j| !emitted[j]) {
                    warnings.push(format!(
                        "Cyclic dependency: dropped edge '{}' -> '{}' to order tables",
                        tables[i].name, tables[j].name
                    ));
                }
                emitted[i] = true;
                indices.push(i);
            }
        }
    }

    Ordering { indices, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn names(schema: &Schema, ordering: &Ordering) -> Vec<String> {
        ordering.tables(schema).map(|t| t.name.clone()).collect()
    }

    #[test]
    fn test_referenced_table_comes_first() {
        let schema = Parser::new(
            "Create a posts table with title. Create a users table with name. \
             Posts belongs to users.",
        )
        .parse()
        .unwrap();
        let ordering = order(&schema);
        assert_eq!(names(&schema, &ordering), vec!["users", "posts"]);
        assert!(ordering.warnings.is_empty());
    }

    #[test]
    fn test_unconstrained_tables_keep_declaration_order() {
        let schema = Parser::new(
            "Create a cats table. Create a dogs table. Create a birds table.",
        )
        .parse()
        .unwrap();
        let ordering = order(&schema);
        assert_eq!(names(&schema, &ordering), vec!["cats", "dogs", "birds"]);
    }

    #[test]
    fn test_chain_ordering() {
        let schema = Parser::new(
            "Create a comments table. Create a posts table. Create a users table. \
             Comments belongs to posts. Posts belongs to users. Comments belongs to users.",
        )
        .parse()
        .unwrap();
        let ordering = order(&schema);
        assert_eq!(names(&schema, &ordering), vec!["users", "posts", "comments"]);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let text = "Create a comments table. Create a posts table. Create a users table. \
                    Comments belongs to posts. Posts belongs to users.";
        let schema = Parser::new(text).parse().unwrap();
        let a = order(&schema);
        let b = order(&schema);
        assert_eq!(a.indices(), b.indices());
    }

    #[test]
    fn test_topological_validity() {
        let schema = Parser::new(
            "Create a orders table. Create a users table. Create a products table. \
             Orders belongs to users. Orders belongs to products.",
        )
        .parse()
        .unwrap();
        let ordering = order(&schema);
        let ordered = names(&schema, &ordering);
        let idx = |n: &str| ordered.iter().position(|p| p == n).unwrap();
        assert!(idx("users") < idx("orders"));
        assert!(idx("products") < idx("orders"));
    }

    #[test]
    fn test_cycle_breaks_with_warning() {
        let schema = Parser::new(
            "Create a chickens table. Create a eggs table. \
             Chickens belongs to eggs. Eggs belongs to chickens.",
        )
        .parse()
        .unwrap();
        let ordering = order(&schema);
        assert_eq!(ordering.indices().len(), 2);
        assert_eq!(ordering.warnings.len(), 1);
        assert!(ordering.warnings[0].contains("Cyclic dependency"));
        // Lowest-declared table is forced out first.
        assert_eq!(names(&schema, &ordering)[0], "chickens");
    }

    #[test]
    fn test_self_reference_does_not_cycle() {
        let schema = Parser::new(
            "Create a employees table with name. Employees belongs to employees.",
        )
        .parse()
        .unwrap();
        let ordering = order(&schema);
        assert_eq!(ordering.indices().len(), 1);
        assert!(ordering.warnings.is_empty());
    }
}
