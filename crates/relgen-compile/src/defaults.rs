//! Default-value compilation.
//!
//! Maps a column's declared default expression to the Rust expression a
//! freshly constructed (not-yet-persisted) entity holds for that field.

use relgen_core::{Column, DefaultExpr};

use crate::errors::CompileError;

/// The fresh-value expression for a column.
///
/// `NULL` defaults beat everything else; text and boolean columns only accept
/// the matching literal shape and fail the pass otherwise. Every other
/// storage type defers to the generated field type's own `Default`.
pub fn fresh_value(table: &str, column: &Column) -> Result<String, CompileError> {
    let Some(default) = &column.default else {
        if column.nullable {
            return Ok("None".to_string());
        }
        return Ok("Default::default()".to_string());
    };

    if let DefaultExpr::Var { name } = default {
        if name.eq_ignore_ascii_case("null") {
            return Ok("None".to_string());
        }
    }

    if column.kind.is_textual() {
        let DefaultExpr::TextLit { value } = default else {
            return Err(CompileError::InvalidTextDefault {
                table: table.to_string(),
                column: column.name.clone(),
                expression: default.describe(),
            });
        };
        let literal = format!("{:?}.to_string()", value);
        return Ok(wrap_if_nullable(column, literal));
    }

    if column.kind == relgen_core::ColumnKind::Boolean {
        let spelled = match default {
            DefaultExpr::Var { name } if name.eq_ignore_ascii_case("true") => "true",
            DefaultExpr::Var { name } if name.eq_ignore_ascii_case("false") => "false",
            other => {
                return Err(CompileError::InvalidBooleanDefault {
                    table: table.to_string(),
                    column: column.name.clone(),
                    expression: other.describe(),
                });
            }
        };
        return Ok(wrap_if_nullable(column, spelled.to_string()));
    }

    // Any other declared expression (now(), uuid_generate_v4(), numeric
    // literals) is evaluated database-side; the in-memory fresh value defers
    // to the field type's Default.
    if column.nullable {
        return Ok("None".to_string());
    }
    Ok("Default::default()".to_string())
}

/// Whether the column is excluded from explicit insert bindings while the
/// caller has not overridden it: a declared default, or the serial kinds'
/// implicit database-side default.
pub fn has_insert_default(column: &Column) -> bool {
    column.default.is_some() || column.kind.is_serial()
}

fn wrap_if_nullable(column: &Column, expression: String) -> String {
    if column.nullable {
        format!("Some({expression})")
    } else {
        expression
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relgen_core::ColumnKind;

    fn column(kind: ColumnKind, nullable: bool, default: Option<DefaultExpr>) -> Column {
        Column {
            name: "field".to_string(),
            kind,
            nullable,
            default,
            primary_key: false,
        }
    }

    fn var(name: &str) -> DefaultExpr {
        DefaultExpr::Var {
            name: name.to_string(),
        }
    }

    #[test]
    fn null_default_wins_regardless_of_kind() {
        for kind in [ColumnKind::Text, ColumnKind::Boolean, ColumnKind::Integer] {
            let col = column(kind, true, Some(var("NULL")));
            assert_eq!(fresh_value("t", &col).unwrap(), "None");
        }
        let col = column(ColumnKind::Text, false, Some(var("null")));
        assert_eq!(fresh_value("t", &col).unwrap(), "None");
    }

    #[test]
    fn text_literal_defaults() {
        let col = column(
            ColumnKind::Text,
            false,
            Some(DefaultExpr::TextLit {
                value: "untitled".to_string(),
            }),
        );
        assert_eq!(fresh_value("t", &col).unwrap(), "\"untitled\".to_string()");

        let nullable = column(
            ColumnKind::Varchar { length: Some(80) },
            true,
            Some(DefaultExpr::TextLit {
                value: "draft".to_string(),
            }),
        );
        assert_eq!(
            fresh_value("t", &nullable).unwrap(),
            "Some(\"draft\".to_string())"
        );
    }

    #[test]
    fn text_default_must_be_literal() {
        let col = column(ColumnKind::Text, false, Some(var("now()")));
        let err = fresh_value("posts", &col).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("text column `posts.field`"));
        assert!(message.contains("variable expression `now()`"));
    }

    #[test]
    fn boolean_defaults_accept_case_insensitive_literals() {
        let col = column(ColumnKind::Boolean, false, Some(var("TRUE")));
        assert_eq!(fresh_value("t", &col).unwrap(), "true");

        let nullable = column(ColumnKind::Boolean, true, Some(var("false")));
        assert_eq!(fresh_value("t", &nullable).unwrap(), "Some(false)");
    }

    #[test]
    fn boolean_default_rejects_other_shapes() {
        let col = column(
            ColumnKind::Boolean,
            false,
            Some(DefaultExpr::TextLit {
                value: "yes".to_string(),
            }),
        );
        let err = fresh_value("posts", &col).unwrap_err();
        assert!(err.to_string().contains("text literal 'yes'"));
    }

    #[test]
    fn other_kinds_defer_to_default() {
        let col = column(ColumnKind::Timestamp, false, Some(var("now()")));
        assert_eq!(fresh_value("t", &col).unwrap(), "Default::default()");

        let undeclared = column(ColumnKind::Integer, false, None);
        assert_eq!(fresh_value("t", &undeclared).unwrap(), "Default::default()");

        let nullable = column(ColumnKind::Integer, true, None);
        assert_eq!(fresh_value("t", &nullable).unwrap(), "None");
    }

    #[test]
    fn serial_columns_have_implicit_insert_defaults() {
        assert!(has_insert_default(&column(ColumnKind::Serial, false, None)));
        assert!(has_insert_default(&column(ColumnKind::BigSerial, false, None)));
        assert!(has_insert_default(&column(
            ColumnKind::Boolean,
            false,
            Some(var("true"))
        )));
        assert!(!has_insert_default(&column(ColumnKind::Uuid, false, None)));
    }
}
