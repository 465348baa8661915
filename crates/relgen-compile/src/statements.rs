//! CRUD statement emission: create, batch create, update.
//!
//! Each emitted method builds a `Statement { sql, params }` at runtime so
//! that columns with an untouched declared (or serial-implied) default can
//! take the SQL `DEFAULT` keyword in their VALUES slot instead of a bound
//! parameter. Per-row column-bind order always follows declaration order.

use crate::shape::EntityShape;

/// Emit the `create` method: an INSERT naming all declared columns in
/// schema order, returning the inserted row.
pub fn emit_create(shape: &EntityShape) -> String {
    let mut out = String::new();
    out.push_str("    /// INSERT for this record. Untouched columns with a declared or\n");
    out.push_str("    /// serial-implied default take the `DEFAULT` keyword instead of a\n");
    out.push_str("    /// binding.\n");
    out.push_str("    pub fn create(&self) -> Statement {\n");
    out.push_str("        let mut params: Vec<SqlValue> = Vec::new();\n");
    out.push_str("        let mut slots: Vec<String> = Vec::new();\n");
    push_column_slots(&mut out, shape, "self", "        ");
    out.push_str("        Statement {\n");
    out.push_str(&format!(
        "            sql: format!(\"INSERT INTO {} ({}) VALUES ({{}}) RETURNING *\", slots.join(\", \")),\n",
        shape.table_name,
        column_list(shape)
    ));
    out.push_str("            params,\n");
    out.push_str("        }\n");
    out.push_str("    }\n\n");
    out
}

/// Emit the `create_many` method: one INSERT with one value tuple per input
/// record and all bindings flattened in per-row column order. Zero records
/// produce an empty statement, never invalid SQL.
pub fn emit_create_many(shape: &EntityShape) -> String {
    let mut out = String::new();
    out.push_str("    /// Batch INSERT; bindings are flattened across rows in column order.\n");
    out.push_str(&format!(
        "    pub fn create_many(records: &[{}]) -> Statement {{\n",
        shape.entity
    ));
    out.push_str("        if records.is_empty() {\n");
    out.push_str("            return Statement { sql: String::new(), params: Vec::new() };\n");
    out.push_str("        }\n");
    out.push_str("        let mut params: Vec<SqlValue> = Vec::new();\n");
    out.push_str("        let mut tuples: Vec<String> = Vec::new();\n");
    out.push_str("        for record in records {\n");
    out.push_str("            let mut slots: Vec<String> = Vec::new();\n");
    push_column_slots(&mut out, shape, "record", "            ");
    out.push_str("            tuples.push(format!(\"({})\", slots.join(\", \")));\n");
    out.push_str("        }\n");
    out.push_str("        Statement {\n");
    out.push_str(&format!(
        "            sql: format!(\"INSERT INTO {} ({}) VALUES {{}} RETURNING *\", tuples.join(\", \")),\n",
        shape.table_name,
        column_list(shape)
    ));
    out.push_str("            params,\n");
    out.push_str("        }\n");
    out.push_str("    }\n\n");
    out
}

/// Emit the `update` method: set every column to a positional parameter,
/// keyed by primary key. Fields hold the most recently set value, so binding
/// the current field covers touched and untouched columns alike.
pub fn emit_update(shape: &EntityShape) -> String {
    let mut out = String::new();
    out.push_str("    /// UPDATE by primary key, returning the updated row.\n");
    out.push_str("    pub fn update(&self) -> Statement {\n");
    out.push_str("        let mut params: Vec<SqlValue> = Vec::new();\n");
    out.push_str("        let mut sets: Vec<String> = Vec::new();\n");
    for column in &shape.columns {
        out.push_str(&format!(
            "        params.push(self.{}.to_sql());\n",
            column.field
        ));
        out.push_str(&format!(
            "        sets.push(format!(\"{} = ${{}}\", params.len()));\n",
            column.column
        ));
    }
    let pk_field = shape
        .columns
        .iter()
        .find(|column| column.primary_key)
        .map(|column| column.field.clone())
        .unwrap_or_else(|| shape.pk_column.clone());
    out.push_str(&format!("        params.push(self.{pk_field}.to_sql());\n"));
    out.push_str("        Statement {\n");
    out.push_str(&format!(
        "            sql: format!(\"UPDATE {} SET {{}} WHERE {} = ${{}} RETURNING *\", sets.join(\", \"), params.len()),\n",
        shape.table_name, shape.pk_column
    ));
    out.push_str("            params,\n");
    out.push_str("        }\n");
    out.push_str("    }\n\n");
    out
}

fn column_list(shape: &EntityShape) -> String {
    shape
        .columns
        .iter()
        .map(|column| column.column.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Per-column VALUES slot logic shared by create and create_many.
fn push_column_slots(out: &mut String, shape: &EntityShape, receiver: &str, indent: &str) {
    for column in &shape.columns {
        if column.has_insert_default {
            out.push_str(&format!(
                "{indent}if {receiver}.meta.is_touched(\"{}\") {{\n",
                column.column
            ));
            out.push_str(&format!(
                "{indent}    params.push({receiver}.{}.to_sql());\n",
                column.field
            ));
            out.push_str(&format!(
                "{indent}    slots.push(format!(\"${{}}\", params.len()));\n"
            ));
            out.push_str(&format!("{indent}}} else {{\n"));
            out.push_str(&format!(
                "{indent}    slots.push(\"DEFAULT\".to_string());\n"
            ));
            out.push_str(&format!("{indent}}}\n"));
        } else {
            out.push_str(&format!(
                "{indent}params.push({receiver}.{}.to_sql());\n",
                column.field
            ));
            out.push_str(&format!(
                "{indent}slots.push(format!(\"${{}}\", params.len()));\n"
            ));
        }
    }
}
