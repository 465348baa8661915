//! Row decoder emission.
//!
//! Emits `from_row`: the primary key is read and bound once, plain fields
//! consume storage values in column order, and relation fields consume
//! nothing — they become unevaluated scoped queries keyed by this entity's
//! id. No fetching happens until a caller runs the scope.

use crate::shape::EntityShape;

pub fn emit_from_row(shape: &EntityShape) -> String {
    let pk_index = shape
        .columns
        .iter()
        .position(|column| column.primary_key)
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str("    /// Rebuild a record from a storage row. Relation scopes are\n");
    out.push_str("    /// constructed lazily; nothing is fetched here.\n");
    out.push_str(&format!(
        "    pub fn from_row(row: &Row) -> Result<{}, RowError> {{\n",
        shape.entity
    ));
    out.push_str(&format!(
        "        let pk = {}::from_sql(row.get({})?)?;\n",
        shape.id_type, pk_index
    ));
    out.push_str(&format!("        Ok({} {{\n", shape.entity));
    for (index, column) in shape.columns.iter().enumerate() {
        if column.primary_key {
            out.push_str(&format!("            {}: pk,\n", column.field));
        } else {
            out.push_str(&format!(
                "            {}: FromSqlValue::from_sql(row.get({})?)?,\n",
                column.field, index
            ));
        }
    }
    for relation in &shape.relations {
        let key = if relation.source_nullable {
            "Some(pk)"
        } else {
            "pk"
        };
        out.push_str(&format!(
            "            {}: ScopedQuery::new(\"{}\", \"{}\", {}),\n",
            relation.field, relation.source_table, relation.source_column, key
        ));
    }
    out.push_str("            meta: MetaBag::default(),\n");
    out.push_str("        })\n");
    out.push_str("    }\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::entity_shape;
    use relgen_core::{Column, ColumnKind, ForeignKeyConstraint, Schema, Statement, Table};

    fn column(name: &str, kind: ColumnKind, nullable: bool) -> Column {
        Column {
            name: name.to_string(),
            kind,
            nullable,
            default: None,
            primary_key: name == "id",
        }
    }

    fn fk(table: &str, column: &str, referenced: &str) -> Statement {
        Statement::AddForeignKey(ForeignKeyConstraint {
            table: table.to_string(),
            column: column.to_string(),
            referenced_table: referenced.to_string(),
            referenced_column: "id".to_string(),
        })
    }

    fn schema() -> Schema {
        Schema::new(vec![
            Statement::CreateTable(Table {
                name: "users".to_string(),
                columns: vec![
                    column("id", ColumnKind::Uuid, false),
                    column("email", ColumnKind::Text, false),
                ],
            }),
            Statement::CreateTable(Table {
                name: "posts".to_string(),
                columns: vec![
                    column("id", ColumnKind::Uuid, false),
                    column("user_id", ColumnKind::Uuid, false),
                ],
            }),
            Statement::CreateTable(Table {
                name: "drafts".to_string(),
                columns: vec![
                    column("id", ColumnKind::Uuid, false),
                    column("owner_id", ColumnKind::Uuid, true),
                ],
            }),
            fk("posts", "user_id", "users"),
            fk("drafts", "owner_id", "users"),
        ])
    }

    #[test]
    fn reads_primary_key_first_and_fields_in_column_order() {
        let schema = schema();
        let shape = entity_shape(&schema, schema.table("users").unwrap()).unwrap();
        let out = emit_from_row(&shape);

        assert!(out.contains("let pk = UserId::from_sql(row.get(0)?)?;"));
        assert!(out.contains("id: pk,"));
        assert!(out.contains("email: FromSqlValue::from_sql(row.get(1)?)?,"));
        assert!(out.contains("meta: MetaBag::default(),"));
    }

    #[test]
    fn relation_scopes_wrap_key_only_for_nullable_foreign_columns() {
        let schema = schema();
        let shape = entity_shape(&schema, schema.table("users").unwrap()).unwrap();
        let out = emit_from_row(&shape);

        assert!(out.contains("posts: ScopedQuery::new(\"posts\", \"user_id\", pk),"));
        assert!(out.contains("drafts: ScopedQuery::new(\"drafts\", \"owner_id\", Some(pk)),"));
    }

    #[test]
    fn off_zero_primary_key_position_is_respected() {
        let schema = Schema::new(vec![Statement::CreateTable(Table {
            name: "events".to_string(),
            columns: vec![
                column("name", ColumnKind::Text, false),
                column("id", ColumnKind::BigSerial, false),
            ],
        })]);
        let shape = entity_shape(&schema, schema.table("events").unwrap()).unwrap();
        let out = emit_from_row(&shape);
        assert!(out.contains("let pk = EventId::from_sql(row.get(1)?)?;"));
        assert!(out.contains("name: FromSqlValue::from_sql(row.get(0)?)?,"));
    }
}
