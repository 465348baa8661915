//! Support header for the generated artifact.
//!
//! Everything entities lean on at runtime — storage values, rows, statement
//! handles, change tracking, lazy scopes — is emitted once, ahead of the
//! per-statement sections. The header is fixed apart from the `chrono` and
//! `uuid` pieces, which only appear when some column kind needs them so the
//! artifact's dependency footprint tracks the schema.

use relgen_core::{Schema, Statement};

use crate::typemap::{uses_chrono, uses_uuid};

pub fn support_header(schema: &Schema) -> String {
    let mut needs_chrono = false;
    let mut needs_uuid = false;
    for statement in &schema.statements {
        if let Statement::CreateTable(table) = statement {
            for column in &table.columns {
                needs_chrono |= uses_chrono(&column.kind);
                needs_uuid |= uses_uuid(&column.kind);
            }
        }
    }

    let mut out = String::new();
    out.push_str("// Generated by relgen. Do not edit by hand.\n");
    out.push_str("#![allow(dead_code)]\n\n");
    if needs_chrono {
        out.push_str("use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};\n");
    }
    out.push_str("use thiserror::Error;\n");
    if needs_uuid {
        out.push_str("use uuid::Uuid;\n");
    }
    out.push_str("\n");

    out.push_str("/// A storage value bound to or read from a statement.\n");
    out.push_str("#[derive(Debug, Clone, PartialEq)]\n");
    out.push_str("pub enum SqlValue {\n");
    out.push_str("    Null,\n");
    out.push_str("    Bool(bool),\n");
    out.push_str("    Int(i32),\n");
    out.push_str("    BigInt(i64),\n");
    out.push_str("    Real(f32),\n");
    out.push_str("    Double(f64),\n");
    out.push_str("    Text(String),\n");
    out.push_str("    Bytes(Vec<u8>),\n");
    if needs_uuid {
        out.push_str("    Uuid(Uuid),\n");
    }
    if needs_chrono {
        out.push_str("    Timestamp(NaiveDateTime),\n");
        out.push_str("    TimestampTz(DateTime<Utc>),\n");
        out.push_str("    Date(NaiveDate),\n");
        out.push_str("    Time(NaiveTime),\n");
    }
    out.push_str("}\n\n");

    out.push_str(DECODE_SUPPORT);

    out.push_str("macro_rules! sql_primitive {\n");
    out.push_str("    ($ty:ty, $variant:ident, $expected:literal) => {\n");
    out.push_str("        impl ToSqlValue for $ty {\n");
    out.push_str("            fn to_sql(&self) -> SqlValue {\n");
    out.push_str("                SqlValue::$variant(self.clone())\n");
    out.push_str("            }\n");
    out.push_str("        }\n");
    out.push_str("        impl FromSqlValue for $ty {\n");
    out.push_str("            fn from_sql(value: &SqlValue) -> Result<Self, RowError> {\n");
    out.push_str("                match value {\n");
    out.push_str("                    SqlValue::$variant(inner) => Ok(inner.clone()),\n");
    out.push_str("                    other => Err(RowError::UnexpectedType {\n");
    out.push_str("                        expected: $expected,\n");
    out.push_str("                        found: format!(\"{other:?}\"),\n");
    out.push_str("                    }),\n");
    out.push_str("                }\n");
    out.push_str("            }\n");
    out.push_str("        }\n");
    out.push_str("    };\n");
    out.push_str("}\n\n");
    out.push_str("sql_primitive!(bool, Bool, \"bool\");\n");
    out.push_str("sql_primitive!(i32, Int, \"i32\");\n");
    out.push_str("sql_primitive!(i64, BigInt, \"i64\");\n");
    out.push_str("sql_primitive!(f32, Real, \"f32\");\n");
    out.push_str("sql_primitive!(f64, Double, \"f64\");\n");
    out.push_str("sql_primitive!(String, Text, \"text\");\n");
    out.push_str("sql_primitive!(Vec<u8>, Bytes, \"bytes\");\n");
    if needs_uuid {
        out.push_str("sql_primitive!(Uuid, Uuid, \"uuid\");\n");
    }
    if needs_chrono {
        out.push_str("sql_primitive!(NaiveDateTime, Timestamp, \"timestamp\");\n");
        out.push_str("sql_primitive!(DateTime<Utc>, TimestampTz, \"timestamptz\");\n");
        out.push_str("sql_primitive!(NaiveDate, Date, \"date\");\n");
        out.push_str("sql_primitive!(NaiveTime, Time, \"time\");\n");
    }
    out.push_str("\n");

    out.push_str(OPTION_AND_RUNTIME_SUPPORT);

    out
}

/// Error and trait declarations for the decode path.
const DECODE_SUPPORT: &str = r#"/// Failures while rebuilding an entity from a storage row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("missing column at index {0}")]
    MissingColumn(usize),
    #[error("unexpected storage value: expected {expected}, got {found}")]
    UnexpectedType { expected: &'static str, found: String },
    #[error("unexpected value \"{value}\" for enum {enum_name}")]
    UnexpectedEnumValue { enum_name: &'static str, value: String },
    #[error("unexpected null for enum {enum_name}")]
    UnexpectedEnumNull { enum_name: &'static str },
}

/// Conversion into a bound storage value.
pub trait ToSqlValue {
    fn to_sql(&self) -> SqlValue;
}

/// Conversion from a storage value into a field value.
pub trait FromSqlValue: Sized {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError>;
}

"#;

const OPTION_AND_RUNTIME_SUPPORT: &str = r#"impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql(&self) -> SqlValue {
        match self {
            Some(value) => value.to_sql(),
            None => SqlValue::Null,
        }
    }
}

impl<T: FromSqlValue> FromSqlValue for Option<T> {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::Null => Ok(None),
            other => Ok(Some(T::from_sql(other)?)),
        }
    }
}

/// One fetched storage row: values in declared column order.
#[derive(Debug, Clone, Default)]
pub struct Row {
    values: Vec<SqlValue>,
}

impl Row {
    pub fn new(values: Vec<SqlValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Result<&SqlValue, RowError> {
        self.values.get(index).ok_or(RowError::MissingColumn(index))
    }
}

/// A parameterized statement ready for a driver to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Change-tracking record present on every entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaBag {
    /// Field names explicitly set since construction, in set order.
    pub touched_fields: Vec<&'static str>,
}

impl MetaBag {
    pub fn touch(&mut self, field: &'static str) {
        self.touched_fields.push(field);
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched_fields.iter().any(|touched| *touched == field)
    }
}

/// Unevaluated one-to-many scope: all rows of `table` where `column` equals
/// `key`. Nothing is fetched until a driver runs the statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopedQuery<K> {
    pub table: &'static str,
    pub column: &'static str,
    pub key: K,
}

impl<K> ScopedQuery<K> {
    pub fn new(table: &'static str, column: &'static str, key: K) -> Self {
        Self { table, column, key }
    }
}

impl<K: ToSqlValue> ScopedQuery<K> {
    pub fn statement(&self) -> Statement {
        Statement {
            sql: format!("SELECT * FROM {} WHERE {} = $1", self.table, self.column),
            params: vec![self.key.to_sql()],
        }
    }
}

"#;
