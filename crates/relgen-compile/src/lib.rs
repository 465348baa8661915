//! Schema-to-typed-layer compiler for Relgen.
//!
//! This crate consumes a `relgen_core::Schema` and emits one Rust source
//! artifact: a typed entity per table with CRUD statement builders, lazy
//! relation scopes, enum codecs, and change-tracking mutators. Everything in
//! here is a pure function of the schema except the driver's final
//! diff-and-write step.

pub mod decoder;
pub mod defaults;
pub mod driver;
pub mod enums;
pub mod errors;
pub mod header;
pub mod mutators;
pub mod names;
pub mod pk;
pub mod relations;
pub mod shape;
pub mod statements;
pub mod typemap;

pub use driver::{compile_schema, compile_to_path, CompileOptions, WriteOutcome};
pub use errors::CompileError;
pub use shape::{entity_shape, EntityShape};
