//! Mutator emission: per-field consuming setters with change tracking.
//!
//! Setters live on the fully generic impl so relation placeholders and
//! substituted foreign-key parameters stay settable after substitution.
//! Every setter except `set_meta` records the field in the entity's
//! touched-fields collection; insert and update binding consult that record.

use crate::names::strip_raw_prefix;
use crate::shape::EntityShape;

pub fn emit_mutators(shape: &EntityShape) -> String {
    let params = shape.type_params();
    let mut out = String::new();

    let header = if params.is_empty() {
        format!("impl {} {{\n", shape.entity)
    } else {
        let names: Vec<&str> = params.iter().map(|(name, _)| name.as_str()).collect();
        format!(
            "impl<{}> {}<{}> {{\n",
            names.join(", "),
            shape.entity,
            names.join(", ")
        )
    };
    out.push_str(&header);

    for column in &shape.columns {
        out.push_str(&format!(
            "    pub fn set_{name}(mut self, value: {ty}) -> Self {{\n",
            name = strip_raw_prefix(&column.field),
            ty = column.field_type
        ));
        out.push_str(&format!("        self.{} = value;\n", column.field));
        out.push_str(&format!(
            "        self.meta.touch(\"{}\");\n",
            column.column
        ));
        out.push_str("        self\n");
        out.push_str("    }\n\n");
    }

    for relation in &shape.relations {
        out.push_str(&format!(
            "    pub fn set_{name}(mut self, value: {ty}) -> Self {{\n",
            name = relation.field,
            ty = relation.type_param
        ));
        out.push_str(&format!("        self.{} = value;\n", relation.field));
        out.push_str(&format!(
            "        self.meta.touch(\"{}\");\n",
            relation.field
        ));
        out.push_str("        self\n");
        out.push_str("    }\n\n");
    }

    out.push_str("    /// Replace the change-tracking record itself; not recorded as touched.\n");
    out.push_str("    pub fn set_meta(mut self, value: MetaBag) -> Self {\n");
    out.push_str("        self.meta = value;\n");
    out.push_str("        self\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");

    out
}
