use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Storage type of a column as declared in the schema source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKind {
    Integer,
    BigInt,
    Real,
    Double,
    Text,
    Char { length: Option<u32> },
    Varchar { length: Option<u32> },
    Boolean,
    Timestamp,
    TimestampTz,
    Date,
    Time,
    Uuid,
    Bytea,
    Serial,
    BigSerial,
    /// Reference to a declared enum type (or other user-defined type).
    Custom { name: String },
}

impl ColumnKind {
    /// Whether this kind stores text and therefore expects text-literal
    /// defaults.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            ColumnKind::Text | ColumnKind::Char { .. } | ColumnKind::Varchar { .. }
        )
    }

    /// Serial kinds carry an implicit database-side default.
    pub fn is_serial(&self) -> bool {
        matches!(self, ColumnKind::Serial | ColumnKind::BigSerial)
    }
}

/// Default-value expression attached to a column declaration.
///
/// The external parser hands these over pre-tokenized: either an unquoted
/// reference (`NULL`, `true`, `now()`) or a quoted text literal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DefaultExpr {
    Var { name: String },
    TextLit { value: String },
}

impl DefaultExpr {
    /// Human-readable rendering used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            DefaultExpr::Var { name } => format!("variable expression `{name}`"),
            DefaultExpr::TextLit { value } => format!("text literal '{value}'"),
        }
    }
}

/// Declared enum type.
///
/// Label order is semantically meaningful: the first label is the generated
/// default value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<String>,
}
