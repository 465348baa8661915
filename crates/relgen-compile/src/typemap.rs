//! Storage-type to Rust-type mapping for emitted fields.

use relgen_core::ColumnKind;

use crate::names::pascal_case;

/// Rust type emitted for a column's storage kind, before any `Option`
/// wrapping or identifier substitution.
pub fn rust_type(kind: &ColumnKind) -> String {
    match kind {
        ColumnKind::Integer | ColumnKind::Serial => "i32".to_string(),
        ColumnKind::BigInt | ColumnKind::BigSerial => "i64".to_string(),
        ColumnKind::Real => "f32".to_string(),
        ColumnKind::Double => "f64".to_string(),
        ColumnKind::Text | ColumnKind::Char { .. } | ColumnKind::Varchar { .. } => {
            "String".to_string()
        }
        ColumnKind::Boolean => "bool".to_string(),
        ColumnKind::Timestamp => "NaiveDateTime".to_string(),
        ColumnKind::TimestampTz => "DateTime<Utc>".to_string(),
        ColumnKind::Date => "NaiveDate".to_string(),
        ColumnKind::Time => "NaiveTime".to_string(),
        ColumnKind::Uuid => "Uuid".to_string(),
        ColumnKind::Bytea => "Vec<u8>".to_string(),
        ColumnKind::Custom { name } => pascal_case(name),
    }
}

/// Whether emitting this kind pulls `chrono` types into the artifact header.
pub fn uses_chrono(kind: &ColumnKind) -> bool {
    matches!(
        kind,
        ColumnKind::Timestamp | ColumnKind::TimestampTz | ColumnKind::Date | ColumnKind::Time
    )
}

/// Whether emitting this kind pulls `uuid::Uuid` into the artifact header.
pub fn uses_uuid(kind: &ColumnKind) -> bool {
    matches!(kind, ColumnKind::Uuid)
}
