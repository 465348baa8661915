//! Reverse foreign-key lookup.

use relgen_core::Schema;

/// Every `(source_table, source_column)` pair whose foreign key targets
/// `target_table`, in schema declaration order.
///
/// Self-references and multiple constraints from the same source table are
/// all retained; disambiguating the resulting relation names is the shape
/// calculator's job. This is a pure filter over the statement sequence, not
/// a graph traversal.
pub fn referencing_columns<'a>(schema: &'a Schema, target_table: &str) -> Vec<(&'a str, &'a str)> {
    schema
        .foreign_keys()
        .filter(|fk| fk.referenced_table == target_table)
        .map(|fk| (fk.table.as_str(), fk.column.as_str()))
        .collect()
}
