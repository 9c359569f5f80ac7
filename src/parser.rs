//! Natural-language schema parser.
//!
//! Works sentence by sentence: each sentence is classified as a table
//! declaration, a relationship declaration, or noise. Noise is ignored
//! without failing the compile; natural-language input is inherently messy
//! and the parser is deliberately best-effort.
//!
//! Two passes: table declarations are collected first, then relationship
//! sentences are resolved against them, so prose order does not matter for
//! relationships. Column order within a table is exactly the order written.

use crate::model::{Column, DataType, RelationType, Relationship, Schema, SchemaError, Table};
use crate::types;

const TABLE_VERBS: &[&str] = &["create", "add", "define"];
const COLUMN_CUES: &[&str] = &["with", "has", "containing", "contains"];
const NAME_STOPWORDS: &[&str] = &[
    "a", "an", "the", "new", "called", "named", "create", "add", "define",
];
const FRAGMENT_STOPWORDS: &[&str] = &["a", "an", "the", "table", "entity", "and", "also"];
const MODIFIER_WORDS: &[&str] = &["required", "mandatory", "unique", "primary", "not", "null", "key"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum RelCue {
    BelongsTo,
    HasMany,
    HasOne,
    ManyToMany,
}

pub struct Parser {
    sentences: Vec<String>,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        let sentences = input
            .split(['.', '!', ';', '\n'])
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { sentences }
    }

    pub fn parse(&self) -> Result<Schema, SchemaError> {
        let mut schema = Schema::new("database");
        let mut consumed = vec![false; self.sentences.len()];

        // Pass 1: table declarations.
        for (i, sentence) in self.sentences.iter().enumerate() {
            if let Some(table) = parse_table_decl(sentence)? {
                schema.add_table(table)?;
                consumed[i] = true;
            }
        }

        // Pass 2: relationship declarations against the collected tables.
        let mut rels = Vec::new();
        for (i, sentence) in self.sentences.iter().enumerate() {
            if consumed[i] {
                continue;
            }
            if let Some(rel) = parse_relationship(sentence, &schema) {
                rels.push(rel);
            }
        }

        finalize(&mut schema, rels)?;
        Ok(schema)
    }
}

/// Insert missing primary keys, expand many-to-many edges into junction
/// tables, and synthesize foreign-key columns for every relationship.
fn finalize(schema: &mut Schema, rels: Vec<Relationship>) -> Result<(), SchemaError> {
    for table in schema.tables_mut() {
        if table.primary_key().is_none() {
            table.columns.insert(0, Column::pk("id", DataType::Integer));
        }
    }

    // A many-to-many edge becomes a `<a>_<b>` junction table carrying one
    // foreign key to each endpoint.
    let mut resolved = Vec::new();
    for rel in rels {
        if rel.rel_type == RelationType::ManyToMany {
            let junction = format!("{}_{}", rel.source, rel.target);
            if schema.table(&junction).is_none() {
                let mut table = Table::new(junction.clone());
                table.add_column(Column::pk("id", DataType::Integer))?;
                schema.add_table(table)?;
            }
            resolved.push(Relationship::new(
                junction.clone(),
                rel.source,
                RelationType::ManyToOne,
            ));
            resolved.push(Relationship::new(junction, rel.target, RelationType::ManyToOne));
        } else {
            resolved.push(rel);
        }
    }

    for rel in resolved {
        let (pk_name, pk_type) = schema
            .table(&rel.target)
            .and_then(|t| t.primary_key())
            .map(|c| (c.name.clone(), c.data_type))
            .ok_or_else(|| SchemaError::UnknownTable(rel.target.clone()))?;

        let source = schema
            .table_mut(&rel.source)
            .ok_or_else(|| SchemaError::UnknownTable(rel.source.clone()))?;

        match source
            .columns
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(&rel.fk_column))
        {
            Some(existing) => {
                if existing.references.is_none() {
                    existing.references = Some((rel.target.clone(), pk_name));
                }
            }
            None => {
                source.add_column(
                    Column::new(rel.fk_column.clone(), pk_type)
                        .not_null()
                        .references(rel.target.clone(), pk_name),
                )?;
            }
        }
        schema.add_relationship(rel);
    }

    Ok(())
}

/// Recognize `create/add/define ... <name> table [with <columns>]`.
fn parse_table_decl(sentence: &str) -> Result<Option<Table>, SchemaError> {
    if !TABLE_VERBS.iter().any(|v| find_word(sentence, v).is_some()) {
        return Ok(None);
    }
    let Some(table_pos) = find_word(sentence, "table") else {
        return Ok(None);
    };

    let head = &sentence[..table_pos];
    let Some(name) = head
        .split_whitespace()
        .map(strip_punct)
        .filter(|w| !w.is_empty() && !NAME_STOPWORDS.contains(w))
        .last()
    else {
        return Ok(None);
    };

    let mut table = Table::new(name);

    let tail = &sentence[table_pos + "table".len()..];
    let clause = COLUMN_CUES
        .iter()
        .filter_map(|cue| find_word(tail, cue).map(|pos| (pos, *cue)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(pos, cue)| &tail[pos + cue.len()..]);

    if let Some(clause) = clause {
        for fragment in clause.split(',').flat_map(|p| p.split(" and ")) {
            if let Some(column) = parse_column_fragment(fragment) {
                table.add_column(column)?;
            }
        }
    }

    Ok(Some(table))
}

/// Parse one column fragment: leading name words up to the first type or
/// modifier keyword, then an optional type word and modifiers.
fn parse_column_fragment(fragment: &str) -> Option<Column> {
    let fragment = fragment.trim();
    if fragment.len() < 2 {
        return None;
    }

    let words: Vec<&str> = fragment
        .split_whitespace()
        .map(strip_punct)
        .filter(|w| !w.is_empty())
        .collect();
    let first = words.first()?;
    if FRAGMENT_STOPWORDS.contains(first) {
        return None;
    }

    // Multi-word names ("first name string") collapse to underscores.
    let mut name_parts = vec![*first];
    let mut data_type = None;
    for word in &words[1..] {
        if types::is_type_word(word) {
            data_type = Some(types::resolve(word));
            break;
        }
        if MODIFIER_WORDS.contains(word) {
            break;
        }
        name_parts.push(word);
    }
    let name = name_parts.join("_");

    let data_type = data_type.unwrap_or(DataType::Varchar);
    let primary_key = fragment.contains("primary key");
    let not_null = fragment.contains("required")
        || fragment.contains("not null")
        || fragment.contains("mandatory");
    let unique = words.contains(&"unique");

    let mut column = if primary_key {
        Column::pk(name, data_type)
    } else {
        let mut col = Column::new(name, data_type);
        col.nullable = !not_null;
        col.unique = unique;
        col
    };

    if column.data_type == DataType::Varchar && column.length.is_none() {
        column.length = Some(if column.name.contains("phone") { 20 } else { 255 });
    }

    Some(column)
}

/// Recognize relationship sentences against the known table set. Sentences
/// whose table names do not resolve are ignored.
fn parse_relationship(sentence: &str, schema: &Schema) -> Option<Relationship> {
    let cue = if find_phrase(sentence, "many to many").is_some() {
        RelCue::ManyToMany
    } else if find_phrase(sentence, "belongs to").is_some()
        || find_word(sentence, "references").is_some()
        || find_phrase(sentence, "links to").is_some()
    {
        RelCue::BelongsTo
    } else if find_phrase(sentence, "has many").is_some() {
        RelCue::HasMany
    } else if find_phrase(sentence, "has one").is_some() {
        RelCue::HasOne
    } else {
        return None;
    };

    let mentioned: Vec<&str> = sentence
        .split_whitespace()
        .map(strip_punct)
        .filter_map(|w| schema.table(w).map(|t| t.name.as_str()))
        .collect();
    if mentioned.len() < 2 {
        return None;
    }
    let (a, b) = (mentioned[0], mentioned[1]);

    // Edges always run from the dependent (foreign-key holding) side.
    let rel = match cue {
        RelCue::BelongsTo => Relationship::new(a, b, RelationType::ManyToOne),
        RelCue::HasMany => Relationship::new(b, a, RelationType::ManyToOne),
        RelCue::HasOne => Relationship::new(b, a, RelationType::OneToOne),
        RelCue::ManyToMany => Relationship::new(a, b, RelationType::ManyToMany),
    };
    Some(rel)
}

fn strip_punct(word: &str) -> &str {
    word.trim_matches(|c: char| ",:;'\"()".contains(c))
}

fn find_word(s: &str, word: &str) -> Option<usize> {
    find_bounded(s, word)
}

fn find_phrase(s: &str, phrase: &str) -> Option<usize> {
    find_bounded(s, phrase)
}

/// Position of `needle` in `s` at word boundaries.
fn find_bounded(s: &str, needle: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut start = 0;
    while let Some(i) = s[start..].find(needle) {
        let at = start + i;
        let end = at + needle.len();
        let before_ok = at == 0 || !is_word_byte(bytes[at - 1]);
        let after_ok = end >= s.len() || !is_word_byte(bytes[end]);
        if before_ok && after_ok {
            return Some(at);
        }
        start = end;
    }
    None
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_with_columns() {
        let schema = Parser::new("Create a users table with username, email.")
            .parse()
            .unwrap();
        let users = schema.table("users").unwrap();
        let names: Vec<&str> = users.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "username", "email"]);
        assert!(users.columns[0].primary_key);
        assert_eq!(users.columns[1].data_type, DataType::Varchar);
        assert_eq!(users.columns[1].length, Some(255));
    }

    #[test]
    fn test_parse_canonical_blog_schema() {
        let text = "Create a users table with username, email. \
                    Create a posts table with title, content text. \
                    Posts belongs to users.";
        let schema = Parser::new(text).parse().unwrap();

        let users = schema.table("users").unwrap();
        assert!(users.columns[0].primary_key);
        assert_eq!(users.columns[1].name, "username");
        assert_eq!(users.columns[2].name, "email");

        let posts = schema.table("posts").unwrap();
        let names: Vec<&str> = posts.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "title", "content", "users_id"]);
        assert_eq!(posts.column("content").unwrap().data_type, DataType::Text);
        let fk = posts.column("users_id").unwrap();
        assert_eq!(fk.data_type, DataType::Integer);
        assert!(!fk.nullable);
        assert_eq!(fk.references, Some(("users".to_string(), "id".to_string())));

        assert_eq!(schema.relationships().len(), 1);
        let rel = &schema.relationships()[0];
        assert_eq!(rel.source, "posts");
        assert_eq!(rel.target, "users");
        assert_eq!(rel.rel_type, RelationType::ManyToOne);
    }

    #[test]
    fn test_relationship_before_declaration() {
        let text = "Posts belongs to users. \
                    Create a posts table with title. \
                    Create a users table with name.";
        let schema = Parser::new(text).parse().unwrap();
        assert_eq!(schema.relationships().len(), 1);
        assert!(schema.table("posts").unwrap().column("users_id").is_some());
    }

    #[test]
    fn test_column_modifiers() {
        let text = "Create a users table with username string required, \
                    email string unique, and token uuid primary key.";
        let schema = Parser::new(text).parse().unwrap();
        let users = schema.table("users").unwrap();
        assert!(!users.column("username").unwrap().nullable);
        assert!(users.column("email").unwrap().unique);
        let token = users.column("token").unwrap();
        assert!(token.primary_key);
        assert_eq!(token.data_type, DataType::Uuid);
        // Explicit primary key means no synthesized id column.
        assert!(users.column("id").is_none());
    }

    #[test]
    fn test_multi_word_column_name() {
        let schema = Parser::new("Create a users table with first name string, last name.")
            .parse()
            .unwrap();
        let users = schema.table("users").unwrap();
        assert!(users.column("first_name").is_some());
        assert!(users.column("last_name").is_some());
    }

    #[test]
    fn test_unknown_type_word_defaults_to_varchar() {
        let schema = Parser::new("Create a gadgets table with widget sprocket.")
            .parse()
            .unwrap();
        let col = schema.table("gadgets").unwrap().column("widget").unwrap();
        assert_eq!(col.data_type, DataType::Varchar);
    }

    #[test]
    fn test_unrecognized_sentences_ignored() {
        let text = "This is just prose. Create a users table with name. \
                    The weather is nice today.";
        let schema = Parser::new(text).parse().unwrap();
        assert_eq!(schema.tables().len(), 1);
    }

    #[test]
    fn test_has_many_puts_fk_on_many_side() {
        let text = "Create a users table. Create a posts table. Users has many posts.";
        let schema = Parser::new(text).parse().unwrap();
        let rel = &schema.relationships()[0];
        assert_eq!(rel.source, "posts");
        assert_eq!(rel.target, "users");
        assert!(schema.table("posts").unwrap().column("users_id").is_some());
        assert!(schema.table("users").unwrap().column("posts_id").is_none());
    }

    #[test]
    fn test_many_to_many_synthesizes_junction() {
        let text = "Create a posts table. Create a tags table. Posts many to many tags.";
        let schema = Parser::new(text).parse().unwrap();
        let junction = schema.table("posts_tags").unwrap();
        assert!(junction.column("posts_id").is_some());
        assert!(junction.column("tags_id").is_some());
        assert_eq!(schema.relationships().len(), 2);
        assert!(schema
            .relationships()
            .iter()
            .all(|r| r.rel_type == RelationType::ManyToOne && r.source == "posts_tags"));
    }

    #[test]
    fn test_duplicate_table_declaration_errors() {
        let text = "Create a users table. Create a users table.";
        assert!(matches!(
            Parser::new(text).parse(),
            Err(SchemaError::DuplicateTable(_))
        ));
    }

    #[test]
    fn test_reparse_is_structurally_identical() {
        let text = "Create a users table with name. Create a posts table. Posts belongs to users.";
        let a = Parser::new(text).parse().unwrap();
        let b = Parser::new(text).parse().unwrap();
        assert_eq!(a.tables(), b.tables());
        assert_eq!(a.relationships(), b.relationships());
    }

    #[test]
    fn test_phone_column_gets_short_length() {
        let schema = Parser::new("Create a contacts table with phone, email.")
            .parse()
            .unwrap();
        let contacts = schema.table("contacts").unwrap();
        assert_eq!(contacts.column("phone").unwrap().length, Some(20));
        assert_eq!(contacts.column("email").unwrap().length, Some(255));
    }
}
