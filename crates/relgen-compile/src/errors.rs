use thiserror::Error;

/// Errors emitted by the compiler.
///
/// Every variant is fatal: the first error aborts the whole pass and no
/// partial artifact is produced.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Schema(#[from] relgen_core::Error),
    #[error("table `{table}` has no primary key column")]
    MissingPrimaryKey { table: String },
    #[error("unexpected primary key storage type on `{table}.{column}`: expected uuid, serial, or bigserial")]
    UnexpectedPrimaryKeyType { table: String, column: String },
    #[error("foreign key column not found: {table}.{column}")]
    ForeignKeyColumnNotFound { table: String, column: String },
    #[error("referenced table not found: {table}")]
    ReferencedTableNotFound { table: String },
    #[error("default for text column `{table}.{column}` must be a text literal, got {expression}")]
    InvalidTextDefault {
        table: String,
        column: String,
        expression: String,
    },
    #[error("default for boolean column `{table}.{column}` must be TRUE or FALSE, got {expression}")]
    InvalidBooleanDefault {
        table: String,
        column: String,
        expression: String,
    },
    #[error("enum `{name}` declares no values")]
    EmptyEnum { name: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
