use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constraints::ForeignKeyConstraint;
use crate::types::{ColumnKind, DefaultExpr, EnumType};

/// Envelope for the `schema.json` artifact produced by the external parser.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SchemaDocument {
    /// Contract version for this schema format.
    pub schema_version: String,
    /// Statements in declaration order.
    pub statements: Vec<Statement>,
}

impl SchemaDocument {
    pub fn into_schema(self) -> Schema {
        Schema {
            statements: self.statements,
        }
    }
}

/// One parsed schema statement.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    CreateTable(Table),
    CreateEnum(EnumType),
    AddForeignKey(ForeignKeyConstraint),
}

/// Ordered statement sequence as received from the parser.
///
/// Statement order is preserved end-to-end: emitted field order and generated
/// identifiers must be deterministic across runs. The schema is constructed
/// once and never mutated; everything derived from it is recomputed per
/// compile pass.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub statements: Vec<Statement>,
}

impl Schema {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Look up a table by name, in declaration order.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.statements.iter().find_map(|statement| match statement {
            Statement::CreateTable(table) if table.name == name => Some(table),
            _ => None,
        })
    }

    /// Look up an enum type by name.
    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        self.statements.iter().find_map(|statement| match statement {
            Statement::CreateEnum(en) if en.name == name => Some(en),
            _ => None,
        })
    }

    /// All foreign key constraints, in declaration order.
    pub fn foreign_keys(&self) -> impl Iterator<Item = &ForeignKeyConstraint> {
        self.statements.iter().filter_map(|statement| match statement {
            Statement::AddForeignKey(fk) => Some(fk),
            _ => None,
        })
    }

    /// The foreign key constraining `table.column`, if one is declared.
    pub fn foreign_key_for_column(&self, table: &str, column: &str) -> Option<&ForeignKeyConstraint> {
        self.foreign_keys()
            .find(|fk| fk.table == table && fk.column == column)
    }
}

/// A table definition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    /// The single column flagged as primary key, if any.
    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|column| column.primary_key)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// Column metadata for a table.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultExpr>,
    #[serde(default)]
    pub primary_key: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, kind: ColumnKind) -> Column {
        Column {
            name: name.to_string(),
            kind,
            nullable: false,
            default: None,
            primary_key: false,
        }
    }

    fn users() -> Table {
        Table {
            name: "users".to_string(),
            columns: vec![
                Column {
                    primary_key: true,
                    ..column("id", ColumnKind::Uuid)
                },
                column("email", ColumnKind::Text),
            ],
        }
    }

    #[test]
    fn table_lookup_follows_declaration_order() {
        let schema = Schema::new(vec![
            Statement::CreateTable(users()),
            Statement::AddForeignKey(ForeignKeyConstraint {
                table: "posts".to_string(),
                column: "user_id".to_string(),
                referenced_table: "users".to_string(),
                referenced_column: "id".to_string(),
            }),
        ]);

        assert!(schema.table("users").is_some());
        assert!(schema.table("posts").is_none());
        assert_eq!(
            schema
                .foreign_key_for_column("posts", "user_id")
                .map(|fk| fk.referenced_table.as_str()),
            Some("users")
        );
        assert!(schema.foreign_key_for_column("posts", "author_id").is_none());
    }

    #[test]
    fn primary_key_lookup() {
        let table = users();
        assert_eq!(table.primary_key().map(|c| c.name.as_str()), Some("id"));
        assert!(table.column("email").is_some());
        assert!(table.column("missing").is_none());
    }
}
