//! Core contracts for Relgen.
//!
//! This crate defines the canonical schema statement types consumed by the
//! compiler, the shared error type, and the structural checks generation
//! depends on.

pub mod constraints;
pub mod error;
pub mod schema;
pub mod types;
pub mod validation;

pub use constraints::ForeignKeyConstraint;
pub use error::{Error, Result};
pub use schema::{Column, Schema, SchemaDocument, Statement, Table};
pub use types::{ColumnKind, DefaultExpr, EnumType};
pub use validation::validate_schema;

/// Current contract version for `schema.json` artifacts.
pub const SCHEMA_VERSION: &str = "0.1";
