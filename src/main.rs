use nlschema::compiler::SchemaCompiler;
use nlschema::sql::{self, Dialect};
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <input.txt> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  -o, --output <file>    Output file (default: stdout)");
        eprintln!("  -e, --emit <kind>      sql, dbml, mermaid, ascii, html, data, summary (default: sql)");
        eprintln!("  -d, --dialect <name>   postgresql, mysql, sqlite (default: postgresql)");
        eprintln!("  -n, --rows <count>     Rows per table for data emission (default: 10)");
        eprintln!("      --name <name>      Schema name (default: database)");
        process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut emit = "sql".to_string();
    let mut dialect = "postgresql".to_string();
    let mut rows: usize = 10;
    let mut schema_name = "database".to_string();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            "-e" | "--emit" => {
                i += 1;
                if i < args.len() {
                    emit = args[i].clone();
                }
            }
            "-d" | "--dialect" => {
                i += 1;
                if i < args.len() {
                    dialect = args[i].clone();
                }
            }
            "-n" | "--rows" => {
                i += 1;
                if i < args.len() {
                    rows = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid row count: {}", args[i]);
                        process::exit(1);
                    });
                }
            }
            "--name" => {
                i += 1;
                if i < args.len() {
                    schema_name = args[i].clone();
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let mut compiler = SchemaCompiler::new();
    if let Err(e) = compiler.compile(&input, &schema_name) {
        eprintln!("Compile error: {}", e);
        process::exit(1);
    }

    let report = match compiler.validate() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Validation error: {}", e);
            process::exit(1);
        }
    };
    for warning in &report.warnings {
        eprintln!("warning: {}", warning);
    }
    if !report.is_valid() {
        for error in &report.errors {
            eprintln!("error: {}", error);
        }
        process::exit(1);
    }

    let output = match emit.as_str() {
        "sql" => compiler.generate_migration(&dialect),
        "dbml" => compiler.to_dbml(),
        "mermaid" => compiler.to_mermaid(),
        "ascii" => compiler.to_ascii(),
        "html" => compiler.to_html(),
        "data" => compiler.generate_test_data(rows).and_then(|data| {
            let dialect = Dialect::from_str(&dialect).ok_or_else(|| {
                nlschema::compiler::CompileError::UnsupportedDialect(dialect.clone())
            })?;
            Ok(sql::insert_statements(&data, dialect))
        }),
        "summary" => compiler.summary().map(|s| {
            format!(
                "schema: {}\ntables: {} ({})\ncolumns: {}\nrelationships: {}\nprimary keys: {}\nforeign keys: {}\n",
                s.schema_name,
                s.num_tables,
                s.tables.join(", "),
                s.total_columns,
                s.num_relationships,
                s.total_primary_keys,
                s.total_foreign_keys
            )
        }),
        other => {
            eprintln!("Unknown emit kind: {}", other);
            process::exit(1);
        }
    };

    let output = match output {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Generation error: {}", e);
            process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => println!("{}", output),
    }
}
