use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::schema::{Schema, Statement};

/// Validate the structural invariants generation depends on.
///
/// This checks:
/// - duplicate table and column names
/// - every foreign key's owning column exists on its owning table
///
/// Referential integrity beyond that (referenced-table existence and the
/// like) is checked lazily by the compiler where it actually matters, so the
/// first fatal diagnostic names the emission site.
pub fn validate_schema(schema: &Schema) -> Result<()> {
    let mut catalog: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for statement in &schema.statements {
        if let Statement::CreateTable(table) = statement {
            if catalog.contains_key(table.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate table name: {}",
                    table.name
                )));
            }

            let mut columns = BTreeSet::new();
            for column in &table.columns {
                if !columns.insert(column.name.as_str()) {
                    return Err(Error::InvalidSchema(format!(
                        "duplicate column name: {}.{}",
                        table.name, column.name
                    )));
                }
            }
            catalog.insert(table.name.as_str(), columns);
        }
    }

    for fk in schema.foreign_keys() {
        let columns = catalog.get(fk.table.as_str()).ok_or_else(|| {
            Error::InvalidSchema(format!("foreign key on unknown table: {}", fk.table))
        })?;
        if !columns.contains(fk.column.as_str()) {
            return Err(Error::InvalidSchema(format!(
                "foreign key column not found: {}.{}",
                fk.table, fk.column
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ForeignKeyConstraint;
    use crate::schema::{Column, Table};
    use crate::types::ColumnKind;

    fn table(name: &str, columns: &[&str]) -> Statement {
        Statement::CreateTable(Table {
            name: name.to_string(),
            columns: columns
                .iter()
                .map(|column| Column {
                    name: column.to_string(),
                    kind: ColumnKind::Uuid,
                    nullable: false,
                    default: None,
                    primary_key: *column == "id",
                })
                .collect(),
        })
    }

    fn fk(table: &str, column: &str, referenced: &str) -> Statement {
        Statement::AddForeignKey(ForeignKeyConstraint {
            table: table.to_string(),
            column: column.to_string(),
            referenced_table: referenced.to_string(),
            referenced_column: "id".to_string(),
        })
    }

    #[test]
    fn accepts_well_formed_schema() {
        let schema = Schema::new(vec![
            table("users", &["id", "email"]),
            table("posts", &["id", "user_id"]),
            fk("posts", "user_id", "users"),
        ]);
        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn rejects_duplicate_tables() {
        let schema = Schema::new(vec![table("users", &["id"]), table("users", &["id"])]);
        let err = validate_schema(&schema).unwrap_err();
        assert!(err.to_string().contains("duplicate table name: users"));
    }

    #[test]
    fn rejects_missing_fk_column() {
        let schema = Schema::new(vec![
            table("users", &["id"]),
            table("posts", &["id"]),
            fk("posts", "user_id", "users"),
        ]);
        let err = validate_schema(&schema).unwrap_err();
        assert!(
            err.to_string()
                .contains("foreign key column not found: posts.user_id")
        );
    }
}
