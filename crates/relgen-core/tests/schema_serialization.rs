use relgen_core::{
    Column, ColumnKind, DefaultExpr, ForeignKeyConstraint, SchemaDocument, Statement, Table,
    SCHEMA_VERSION,
};

#[test]
fn statement_round_trip_preserves_order_and_shape() {
    let document = SchemaDocument {
        schema_version: SCHEMA_VERSION.to_string(),
        statements: vec![
            Statement::CreateTable(Table {
                name: "users".to_string(),
                columns: vec![
                    Column {
                        name: "id".to_string(),
                        kind: ColumnKind::Uuid,
                        nullable: false,
                        default: None,
                        primary_key: true,
                    },
                    Column {
                        name: "active".to_string(),
                        kind: ColumnKind::Boolean,
                        nullable: false,
                        default: Some(DefaultExpr::Var {
                            name: "true".to_string(),
                        }),
                        primary_key: false,
                    },
                ],
            }),
            Statement::AddForeignKey(ForeignKeyConstraint {
                table: "posts".to_string(),
                column: "user_id".to_string(),
                referenced_table: "users".to_string(),
                referenced_column: "id".to_string(),
            }),
        ],
    };

    let json = serde_json::to_string_pretty(&document).expect("serialize document");
    let parsed: SchemaDocument = serde_json::from_str(&json).expect("parse document");

    assert_eq!(parsed.schema_version, SCHEMA_VERSION);
    assert_eq!(parsed.statements.len(), 2);
    match &parsed.statements[0] {
        Statement::CreateTable(table) => {
            assert_eq!(table.name, "users");
            assert_eq!(
                table.columns[1].default,
                Some(DefaultExpr::Var {
                    name: "true".to_string()
                })
            );
        }
        other => panic!("unexpected first statement: {other:?}"),
    }
    match &parsed.statements[1] {
        Statement::AddForeignKey(fk) => assert_eq!(fk.referenced_table, "users"),
        other => panic!("unexpected second statement: {other:?}"),
    }
}

#[test]
fn parses_external_parser_payload() {
    let payload = r#"{
  "schema_version": "0.1",
  "statements": [
    {
      "kind": "create_enum",
      "name": "status",
      "values": ["open", "closed"]
    },
    {
      "kind": "create_table",
      "name": "tickets",
      "columns": [
        { "name": "id", "type": { "kind": "serial" }, "nullable": false, "primary_key": true },
        { "name": "state", "type": { "kind": "custom", "name": "status" }, "nullable": false }
      ]
    }
  ]
}"#;

    let parsed: SchemaDocument = serde_json::from_str(payload).expect("parse payload");
    let schema = parsed.into_schema();
    assert_eq!(
        schema.enum_type("status").map(|en| en.values.clone()),
        Some(vec!["open".to_string(), "closed".to_string()])
    );
    let tickets = schema.table("tickets").expect("tickets table");
    assert_eq!(tickets.primary_key().map(|c| c.name.as_str()), Some("id"));
    assert!(tickets.column("state").expect("state column").kind
        == ColumnKind::Custom {
            name: "status".to_string()
        });
}
