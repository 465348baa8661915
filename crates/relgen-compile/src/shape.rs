//! Entity shape calculation.
//!
//! Derives, per table, the generated record's ordered field list and type
//! parameters: one field per column (foreign-key columns become placeholder
//! parameters), one relation field per foreign key elsewhere in the schema
//! targeting this table, and one trailing change-tracking field. Relation
//! name collisions are resolved here, not in the resolver.

use relgen_core::{Schema, Table};

use crate::defaults::{fresh_value, has_insert_default};
use crate::errors::CompileError;
use crate::names::{
    entity_name, escape_keyword, id_type_name, pluralize, strip_id_suffix, type_param_name,
};
use crate::pk::primary_key_column;
use crate::relations::referencing_columns;
use crate::typemap::rust_type;

/// A generated field backed by a storage column.
#[derive(Debug, Clone)]
pub struct ColumnField {
    /// Storage column name.
    pub column: String,
    /// Emitted field name (keyword-escaped).
    pub field: String,
    /// Placeholder type parameter when the column carries a foreign key.
    pub type_param: Option<String>,
    /// Default of that placeholder: the referenced table's raw identifier.
    pub param_default_type: Option<String>,
    /// Rendered field type as declared on the struct, including any
    /// `Option` wrapper.
    pub field_type: String,
    /// Fresh-value expression for `new()`.
    pub fresh_value: String,
    /// Excluded from explicit insert bindings while untouched.
    pub has_insert_default: bool,
    pub primary_key: bool,
    pub nullable: bool,
}

/// A generated one-to-many relation field.
#[derive(Debug, Clone)]
pub struct RelationField {
    pub field: String,
    pub type_param: String,
    /// Default instantiation of the placeholder, a `ScopedQuery` keyed by
    /// this entity's id (optional when the foreign column is nullable).
    pub default_type: String,
    pub source_table: String,
    pub source_column: String,
    pub source_nullable: bool,
}

/// Everything the emitters need to know about one table's generated entity.
#[derive(Debug, Clone)]
pub struct EntityShape {
    pub table_name: String,
    pub entity: String,
    pub id_type: String,
    pub pk_column: String,
    pub columns: Vec<ColumnField>,
    pub relations: Vec<RelationField>,
}

impl EntityShape {
    /// Ordered type-parameter declarations with their defaults,
    /// foreign-key column parameters first, then relation parameters.
    pub fn type_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        for column in &self.columns {
            if let (Some(param), Some(default)) = (&column.type_param, &column.param_default_type) {
                params.push((param.clone(), default.clone()));
            }
        }
        for relation in &self.relations {
            params.push((relation.type_param.clone(), relation.default_type.clone()));
        }
        params
    }
}

/// Calculate the generated shape of a table's entity.
pub fn entity_shape(schema: &Schema, table: &Table) -> Result<EntityShape, CompileError> {
    let pk = primary_key_column(table)?;
    let id_type = id_type_name(&table.name);

    let mut columns = Vec::with_capacity(table.columns.len());
    for column in &table.columns {
        let field = escape_keyword(&column.name);
        if column.primary_key {
            columns.push(ColumnField {
                column: column.name.clone(),
                field,
                type_param: None,
                param_default_type: None,
                field_type: id_type.clone(),
                fresh_value: "Default::default()".to_string(),
                has_insert_default: has_insert_default(column),
                primary_key: true,
                nullable: column.nullable,
            });
            continue;
        }

        if let Some(fk) = schema.foreign_key_for_column(&table.name, &column.name) {
            if schema.table(&fk.referenced_table).is_none() {
                return Err(CompileError::ReferencedTableNotFound {
                    table: fk.referenced_table.clone(),
                });
            }
            let param = type_param_name(&column.name);
            let referenced_id = id_type_name(&fk.referenced_table);
            let field_type = if column.nullable {
                format!("Option<{param}>")
            } else {
                param.clone()
            };
            columns.push(ColumnField {
                column: column.name.clone(),
                field,
                type_param: Some(param),
                param_default_type: Some(referenced_id),
                field_type,
                fresh_value: if column.nullable {
                    "None".to_string()
                } else {
                    "Default::default()".to_string()
                },
                has_insert_default: has_insert_default(column),
                primary_key: false,
                nullable: column.nullable,
            });
            continue;
        }

        let base = rust_type(&column.kind);
        let field_type = if column.nullable {
            format!("Option<{base}>")
        } else {
            base
        };
        columns.push(ColumnField {
            column: column.name.clone(),
            field,
            type_param: None,
            param_default_type: None,
            field_type,
            fresh_value: fresh_value(&table.name, column)?,
            has_insert_default: has_insert_default(column),
            primary_key: false,
            nullable: column.nullable,
        });
    }

    let relations = relation_fields(schema, table, &id_type)?;

    Ok(EntityShape {
        table_name: table.name.clone(),
        entity: entity_name(&table.name),
        id_type,
        pk_column: pk.name.clone(),
        columns,
        relations,
    })
}

/// Relation fields for every foreign key targeting `table`, with colliding
/// names disambiguated through the source column.
fn relation_fields(
    schema: &Schema,
    table: &Table,
    id_type: &str,
) -> Result<Vec<RelationField>, CompileError> {
    let entries = referencing_columns(schema, &table.name);

    let default_names: Vec<String> = entries
        .iter()
        .map(|(source_table, _)| pluralize(source_table))
        .collect();

    let mut relations = Vec::with_capacity(entries.len());
    for (index, (source_table, source_column)) in entries.iter().enumerate() {
        let collides = default_names
            .iter()
            .enumerate()
            .any(|(other, name)| other != index && *name == default_names[index]);
        let field = if collides {
            pluralize(&format!(
                "{source_table}_{}",
                strip_id_suffix(source_column)
            ))
        } else {
            default_names[index].clone()
        };

        let source = schema.table(source_table).ok_or_else(|| {
            CompileError::ReferencedTableNotFound {
                table: source_table.to_string(),
            }
        })?;
        let column = source.column(source_column).ok_or_else(|| {
            CompileError::ForeignKeyColumnNotFound {
                table: source_table.to_string(),
                column: source_column.to_string(),
            }
        })?;

        let key_type = if column.nullable {
            format!("Option<{id_type}>")
        } else {
            id_type.to_string()
        };

        relations.push(RelationField {
            type_param: type_param_name(&field),
            default_type: format!("ScopedQuery<{key_type}>"),
            field,
            source_table: source_table.to_string(),
            source_column: source_column.to_string(),
            source_nullable: column.nullable,
        });
    }

    Ok(relations)
}

/// Emit the entity struct declaration plus its `new`/`Default`
/// constructors on the default instantiation.
pub fn emit_entity(shape: &EntityShape) -> String {
    let mut out = String::new();

    let params = shape.type_params();
    let header = if params.is_empty() {
        format!("pub struct {}", shape.entity)
    } else {
        let rendered: Vec<String> = params
            .iter()
            .map(|(name, default)| format!("{name} = {default}"))
            .collect();
        format!("pub struct {}<{}>", shape.entity, rendered.join(", "))
    };

    out.push_str(&format!(
        "/// One `{}` row, with relation placeholders left open for\n\
         /// substitution.\n\
         #[derive(Debug, Clone, PartialEq)]\n\
         {header} {{\n",
        shape.table_name
    ));
    for column in &shape.columns {
        out.push_str(&format!("    pub {}: {},\n", column.field, column.field_type));
    }
    for relation in &shape.relations {
        out.push_str(&format!(
            "    pub {}: {},\n",
            relation.field, relation.type_param
        ));
    }
    out.push_str("    pub meta: MetaBag,\n}\n\n");

    out.push_str(&format!(
        "impl {} {{\n    /// A fresh, not-yet-persisted record with declared defaults applied.\n    pub fn new() -> {} {{\n        {} {{\n",
        shape.entity, shape.entity, shape.entity
    ));
    for column in &shape.columns {
        out.push_str(&format!(
            "            {}: {},\n",
            column.field, column.fresh_value
        ));
    }
    for relation in &shape.relations {
        out.push_str(&format!(
            "            {}: ScopedQuery::new(\"{}\", \"{}\", Default::default()),\n",
            relation.field, relation.source_table, relation.source_column
        ));
    }
    out.push_str("            meta: MetaBag::default(),\n        }\n    }\n}\n\n");

    out.push_str(&format!(
        "impl Default for {} {{\n    fn default() -> Self {{\n        {}::new()\n    }}\n}}\n\n",
        shape.entity, shape.entity
    ));

    out
}
