//! Primary key resolution and identifier newtype emission.

use relgen_core::{Column, ColumnKind, Table};

use crate::errors::CompileError;
use crate::names::id_type_name;

/// Storage shape of a table's identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Uuid,
    Serial,
    BigSerial,
}

impl IdKind {
    /// Inner Rust type of the emitted id newtype.
    pub fn inner_type(self) -> &'static str {
        match self {
            IdKind::Uuid => "Uuid",
            IdKind::Serial => "i32",
            IdKind::BigSerial => "i64",
        }
    }

    fn sql_variant(self) -> &'static str {
        match self {
            IdKind::Uuid => "Uuid",
            IdKind::Serial => "Int",
            IdKind::BigSerial => "BigInt",
        }
    }
}

/// The table's primary key column. Exactly one column must carry the flag.
pub fn primary_key_column<'a>(table: &'a Table) -> Result<&'a Column, CompileError> {
    table
        .primary_key()
        .ok_or_else(|| CompileError::MissingPrimaryKey {
            table: table.name.clone(),
        })
}

/// Resolve the identifier shape for a table.
///
/// Identifiers are emitted as one newtype per table so ids of different
/// tables never unify; only uuid, serial, and bigserial storage is accepted.
pub fn id_kind(table: &Table) -> Result<IdKind, CompileError> {
    let pk = primary_key_column(table)?;
    match pk.kind {
        ColumnKind::Uuid => Ok(IdKind::Uuid),
        ColumnKind::Serial => Ok(IdKind::Serial),
        ColumnKind::BigSerial => Ok(IdKind::BigSerial),
        _ => Err(CompileError::UnexpectedPrimaryKeyType {
            table: table.name.clone(),
            column: pk.name.clone(),
        }),
    }
}

/// Emit the identifier newtype and its storage codec impls.
pub fn emit_id_type(table: &Table) -> Result<String, CompileError> {
    let kind = id_kind(table)?;
    let name = id_type_name(&table.name);
    let inner = kind.inner_type();
    let variant = kind.sql_variant();

    let mut out = String::new();
    out.push_str(&format!(
        "/// Typed identifier for `{}` rows.\n\
         #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]\n\
         pub struct {name}(pub {inner});\n\n",
        table.name
    ));
    out.push_str(&format!(
        "impl ToSqlValue for {name} {{\n    fn to_sql(&self) -> SqlValue {{\n        SqlValue::{variant}(self.0)\n    }}\n}}\n\n"
    ));
    out.push_str(&format!(
        "impl FromSqlValue for {name} {{\n    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {{\n        Ok({name}(FromSqlValue::from_sql(value)?))\n    }}\n}}\n\n"
    ));
    Ok(out)
}
