use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Foreign key constraint attached to the schema via an `AddForeignKey`
/// statement, separate from the owning table's definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ForeignKeyConstraint {
    /// Table owning the constrained column.
    pub table: String,
    /// Constrained column on the owning table.
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
}
