//! Compilation driver.
//!
//! Sequences the analysis and emitters over the statement list in
//! declaration order and concatenates their output behind the support
//! header. The only side effect in the whole crate lives here: the final
//! diff-and-write, which skips the filesystem entirely when the regenerated
//! artifact is byte-identical to what is already on disk.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use relgen_core::{validate_schema, Schema, Statement, Table};

use crate::decoder::emit_from_row;
use crate::enums::emit_enum;
use crate::errors::CompileError;
use crate::header::support_header;
use crate::mutators::emit_mutators;
use crate::pk::emit_id_type;
use crate::shape::{emit_entity, entity_shape};
use crate::statements::{emit_create, emit_create_many, emit_update};

/// Driver options.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Emit per-field setters. Disabled for lightweight preview output.
    pub include_mutators: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            include_mutators: true,
        }
    }
}

/// Result of the diff-and-write step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Compile the whole schema into one artifact.
///
/// Fails fast: the first error aborts the pass and nothing is produced.
pub fn compile_schema(schema: &Schema, options: &CompileOptions) -> Result<String, CompileError> {
    validate_schema(schema)?;

    let mut out = support_header(schema);
    for statement in &schema.statements {
        match statement {
            Statement::CreateTable(table) => {
                out.push_str(&compile_table(schema, table, options)?);
            }
            Statement::CreateEnum(en) => {
                out.push_str(&emit_enum(en)?);
            }
            // Constraints shape the entities they touch; they emit nothing
            // of their own.
            Statement::AddForeignKey(_) => {}
        }
    }

    debug!(
        statements = schema.statements.len(),
        bytes = out.len(),
        "schema compiled"
    );
    Ok(out)
}

fn compile_table(
    schema: &Schema,
    table: &Table,
    options: &CompileOptions,
) -> Result<String, CompileError> {
    let shape = entity_shape(schema, table)?;

    let mut out = String::new();
    out.push_str(&format!("// ---- table: {} ----\n\n", table.name));
    out.push_str(&emit_id_type(table)?);
    out.push_str(&emit_entity(&shape));

    let mut operations = String::new();
    operations.push_str(&emit_create(&shape));
    operations.push_str(&emit_create_many(&shape));
    operations.push_str(&emit_update(&shape));
    operations.push_str(&emit_from_row(&shape));
    out.push_str(&format!("impl {} {{\n", shape.entity));
    out.push_str(operations.trim_end());
    out.push_str("\n}\n\n");

    if options.include_mutators {
        out.push_str(&emit_mutators(&shape));
    }

    Ok(out)
}

/// Compile and write the artifact, skipping the write when the content is
/// unchanged.
pub fn compile_to_path(
    schema: &Schema,
    options: &CompileOptions,
    path: &Path,
) -> Result<WriteOutcome, CompileError> {
    let content = compile_schema(schema, options)?;
    let fingerprint = hex::encode(Sha256::digest(content.as_bytes()));

    if let Ok(existing) = fs::read(path) {
        if existing == content.as_bytes() {
            info!(path = %path.display(), %fingerprint, "artifact unchanged, skipping write");
            return Ok(WriteOutcome::Unchanged);
        }
    }

    write_bytes_atomic(path, content.as_bytes())?;
    info!(
        path = %path.display(),
        bytes = content.len(),
        %fingerprint,
        "artifact written"
    );
    Ok(WriteOutcome::Written)
}

fn write_bytes_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other("invalid artifact path"))?;
    let tmp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}
