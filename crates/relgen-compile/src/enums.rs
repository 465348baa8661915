//! Enum type and codec emission.
//!
//! Declared value order is meaningful: the first value is the default. The
//! codec is spelled out rather than derived — a total decode over the
//! declared values, an encode that preserves the original spelling, and a
//! parameter-parsing adapter for untyped external input.

use relgen_core::EnumType;

use crate::errors::CompileError;
use crate::names::pascal_case;

pub fn emit_enum(en: &EnumType) -> Result<String, CompileError> {
    if en.values.is_empty() {
        return Err(CompileError::EmptyEnum {
            name: en.name.clone(),
        });
    }

    let type_name = pascal_case(&en.name);
    let variants: Vec<String> = en.values.iter().map(|value| pascal_case(value)).collect();

    let mut out = String::new();
    out.push_str(&format!("// ---- enum: {} ----\n\n", en.name));
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq)]\n");
    out.push_str(&format!("pub enum {type_name} {{\n"));
    for variant in &variants {
        out.push_str(&format!("    {variant},\n"));
    }
    out.push_str("}\n\n");

    out.push_str(&format!("impl {type_name} {{\n"));
    out.push_str("    /// Decode a storage value; unknown or null input is an error.\n");
    out.push_str(&format!(
        "    pub fn decode(value: Option<&str>) -> Result<{type_name}, RowError> {{\n"
    ));
    out.push_str("        match value {\n");
    out.push_str(&format!(
        "            None => Err(RowError::UnexpectedEnumNull {{ enum_name: \"{}\" }}),\n",
        en.name
    ));
    for (value, variant) in en.values.iter().zip(&variants) {
        out.push_str(&format!(
            "            Some({value:?}) => Ok({type_name}::{variant}),\n"
        ));
    }
    out.push_str("            Some(other) => Err(RowError::UnexpectedEnumValue {\n");
    out.push_str(&format!(
        "                enum_name: \"{}\",\n                value: other.to_string(),\n",
        en.name
    ));
    out.push_str("            }),\n");
    out.push_str("        }\n");
    out.push_str("    }\n\n");

    out.push_str("    /// The original schema spelling of this variant.\n");
    out.push_str("    pub fn encode(&self) -> &'static str {\n");
    out.push_str("        match self {\n");
    for (value, variant) in en.values.iter().zip(&variants) {
        out.push_str(&format!(
            "            {type_name}::{variant} => {value:?},\n"
        ));
    }
    out.push_str("        }\n");
    out.push_str("    }\n\n");

    out.push_str("    /// Parse untyped external input (form or query parameters).\n");
    out.push_str(&format!(
        "    pub fn from_param(raw: &str) -> Result<{type_name}, RowError> {{\n"
    ));
    out.push_str(&format!("        {type_name}::decode(Some(raw))\n"));
    out.push_str("    }\n");
    out.push_str("}\n\n");

    out.push_str(&format!(
        "impl Default for {type_name} {{\n    fn default() -> Self {{\n        {type_name}::{}\n    }}\n}}\n\n",
        variants[0]
    ));

    out.push_str(&format!("impl ToSqlValue for {type_name} {{\n"));
    out.push_str("    fn to_sql(&self) -> SqlValue {\n");
    out.push_str("        SqlValue::Text(self.encode().to_string())\n");
    out.push_str("    }\n}\n\n");

    out.push_str(&format!("impl FromSqlValue for {type_name} {{\n"));
    out.push_str("    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {\n");
    out.push_str("        match value {\n");
    out.push_str(&format!(
        "            SqlValue::Null => {type_name}::decode(None),\n"
    ));
    out.push_str(&format!(
        "            SqlValue::Text(text) => {type_name}::decode(Some(text)),\n"
    ));
    out.push_str("            other => Err(RowError::UnexpectedType {\n");
    out.push_str(&format!(
        "                expected: \"{} enum\",\n",
        en.name
    ));
    out.push_str("                found: format!(\"{other:?}\"),\n");
    out.push_str("            }),\n");
    out.push_str("        }\n");
    out.push_str("    }\n}\n\n");

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> EnumType {
        EnumType {
            name: "status".to_string(),
            values: vec!["open".to_string(), "closed".to_string()],
        }
    }

    #[test]
    fn first_value_is_the_default() {
        let out = emit_enum(&status()).unwrap();
        assert!(out.contains("pub enum Status {\n    Open,\n    Closed,\n}"));
        assert!(out.contains("impl Default for Status"));
        assert!(out.contains("Status::Open\n    }\n}"));
    }

    #[test]
    fn decode_covers_declared_values_and_fails_closed() {
        let out = emit_enum(&status()).unwrap();
        assert!(out.contains("Some(\"open\") => Ok(Status::Open),"));
        assert!(out.contains("Some(\"closed\") => Ok(Status::Closed),"));
        assert!(out.contains("RowError::UnexpectedEnumValue"));
        assert!(out.contains("None => Err(RowError::UnexpectedEnumNull { enum_name: \"status\" }),"));
    }

    #[test]
    fn encode_preserves_original_spelling() {
        let en = EnumType {
            name: "priority".to_string(),
            values: vec!["LOW".to_string(), "very_high".to_string()],
        };
        let out = emit_enum(&en).unwrap();
        assert!(out.contains("Priority::LOW => \"LOW\","));
        assert!(out.contains("Priority::VeryHigh => \"very_high\","));
    }

    #[test]
    fn param_adapter_reuses_decode() {
        let out = emit_enum(&status()).unwrap();
        assert!(out.contains("pub fn from_param(raw: &str) -> Result<Status, RowError>"));
        assert!(out.contains("Status::decode(Some(raw))"));
    }

    #[test]
    fn empty_enum_is_fatal() {
        let en = EnumType {
            name: "empty".to_string(),
            values: Vec::new(),
        };
        let err = emit_enum(&en).unwrap_err();
        assert!(err.to_string().contains("enum `empty` declares no values"));
    }
}
