use transcoder::{
    decode, decode_with_limits, encode, encode_with_limits, ErrorKind, Limits, TranscodeError,
    TypeDescription, TypeTable, Value,
};

fn table_from_json(json: &str) -> TypeTable {
    serde_json::from_str(json).expect("type table json")
}

#[test]
fn references_resolve_through_the_table() {
    let table = table_from_json(
        r#"{
            "Id": "uuid",
            "Status": ["active", "blocked"],
            "Customer": { "id": "Id", "status": "Status", "friends": "Id[]?" }
        }"#,
    );
    let value = Value::object([
        ("id", Value::from("A1B2C3D4-0000-0000-0000-000000000000")),
        ("status", Value::from("active")),
        (
            "friends",
            Value::from(vec!["B1B2C3D4-0000-0000-0000-000000000000"]),
        ),
    ]);

    let decoded = decode(&table, "root", &TypeDescription::named("Customer"), &value)
        .expect("decode");
    assert_eq!(
        decoded,
        Value::object([
            ("id", Value::from("a1b2c3d4-0000-0000-0000-000000000000")),
            ("status", Value::from("active")),
            (
                "friends",
                Value::from(vec!["b1b2c3d4-0000-0000-0000-000000000000"]),
            ),
        ])
    );
}

#[test]
fn reference_errors_keep_the_callers_path() {
    let table = table_from_json(r#"{ "Point": { "x": "int", "y": "int" } }"#);
    let ty = TypeDescription::object([("points", "Point[]")]);
    let value = Value::object([(
        "points",
        Value::from(vec![Value::object([("x", 1), ("y", 2)]), Value::object([("x", 1)])]),
    )]);
    let err = encode(&table, "shape", &ty, &value).expect_err("y missing");
    assert_eq!(
        err,
        TranscodeError::NullNotAllowed {
            path: "shape.points[1].y".to_string()
        }
    );
}

#[test]
fn builtin_names_shadow_table_entries() {
    let mut table = TypeTable::new();
    table.insert("int", "string");
    let err = decode(&table, "root", &TypeDescription::named("int"), &Value::from("7"))
        .expect_err("int stays int");
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn nullable_table_entry_does_not_make_reference_nullable() {
    let table = table_from_json(r#"{ "MaybeName": "string?" }"#);
    // The outer name is not nullable, so the null check fires before lookup.
    let err = decode(&table, "root", &TypeDescription::named("MaybeName"), &Value::Null)
        .expect_err("outer name is not nullable");
    assert_eq!(err.kind(), ErrorKind::NullNotAllowed);
    assert_eq!(
        decode(&table, "root", &TypeDescription::named("MaybeName?"), &Value::Null),
        Ok(Value::Null)
    );
}

#[test]
fn unknown_reference_inside_table() {
    let table = table_from_json(r#"{ "Order": { "lines": "Line[]" } }"#);
    let value = Value::object([("lines", Value::from(vec![Value::object([("sku", "A")])]))]);
    let err = decode(&table, "root", &TypeDescription::named("Order"), &value)
        .expect_err("Line is not defined");
    assert_eq!(err.kind(), ErrorKind::UnknownType);
    assert_eq!(err.to_string(), "Unknown type 'Line' at 'root.lines[0]'");
}

#[test]
fn empty_array_never_resolves_element_type() {
    let ty = TypeDescription::named("Missing[]");
    assert_eq!(
        decode(&TypeTable::new(), "root", &ty, &Value::from(Vec::<Value>::new())),
        Ok(Value::Array(Vec::new()))
    );
}

#[test]
fn self_referencing_alias_hits_depth_limit() {
    let table = table_from_json(r#"{ "A": "A" }"#);
    let err = encode(&table, "root", &TypeDescription::named("A"), &Value::from(1))
        .expect_err("cyclic alias");
    assert_eq!(err.kind(), ErrorKind::DepthExceeded);
    assert_eq!(err.path(), "root");
}

#[test]
fn recursive_shapes_work_within_the_limit() {
    let table = table_from_json(r#"{ "Node": { "value": "int", "next": "Node?" } }"#);
    let list = Value::object([
        ("value", Value::from(1)),
        (
            "next",
            Value::object([
                ("value", Value::from(2)),
                ("next", Value::object([("value", Value::from(3)), ("next", Value::Null)])),
            ]),
        ),
    ]);
    let ty = TypeDescription::named("Node");
    assert_eq!(decode(&table, "root", &ty, &list), Ok(list.clone()));

    let tight = Limits {
        max_depth: 2,
        ..Limits::default()
    };
    let err = decode_with_limits(&table, "root", &ty, &list, Some(&tight))
        .expect_err("third node is nested two levels down");
    assert_eq!(err.kind(), ErrorKind::DepthExceeded);
    assert_eq!(err.path(), "root.next.next");
    assert_eq!(
        err.to_string(),
        "Nesting at 'root.next.next' exceeds the limit of 2 levels"
    );
}

fn linked_list(len: usize) -> Value {
    let mut node = Value::Null;
    for value in (0..len).rev() {
        node = Value::object([("value", Value::from(value as u32)), ("next", node)]);
    }
    node
}

#[test]
fn long_recursive_list_fits_default_limits() {
    let table = table_from_json(r#"{ "Node": { "value": "int", "next": "Node?" } }"#);
    let ty = TypeDescription::named("Node");
    let list = linked_list(300);

    let decoded = decode(&table, "root", &ty, &list).expect("300 nodes");
    assert_eq!(decoded, list);
    let encoded = encode(&table, "root", &ty, &decoded).expect("300 nodes");
    assert_eq!(encoded, list);
}

#[test]
fn alias_hops_reset_at_each_field() {
    let table = table_from_json(
        r#"{
            "Node": "NodeAlias",
            "NodeAlias": "NodeShape",
            "NodeShape": { "value": "int", "next": "Node?" }
        }"#,
    );
    let ty = TypeDescription::named("Node");
    let list = linked_list(20);
    let limits = Limits {
        max_alias_hops: 3,
        ..Limits::default()
    };
    assert_eq!(
        decode_with_limits(&table, "root", &ty, &list, Some(&limits)),
        Ok(list.clone())
    );

    let limits = Limits {
        max_alias_hops: 2,
        ..Limits::default()
    };
    let err = decode_with_limits(&table, "root", &ty, &list, Some(&limits))
        .expect_err("three hops before the first shape");
    assert_eq!(err.kind(), ErrorKind::DepthExceeded);
    assert_eq!(err.path(), "root");
}

#[test]
fn default_limits_match_explicit_none() {
    let table = TypeTable::new();
    let ty = TypeDescription::named("int[][]");
    let value = Value::from(vec![vec![1, 2], vec![3]]);
    assert_eq!(
        encode_with_limits(&table, "root", &ty, &value, None),
        encode_with_limits(&table, "root", &ty, &value, Some(&Limits::default()))
    );
}

#[test]
fn table_json_keeps_field_order() {
    let table = table_from_json(r#"{ "Row": { "z": "int", "a": "int", "m": "int" } }"#);
    let Some(TypeDescription::Object(fields)) = table.get("Row") else {
        panic!("Row should be an object shape");
    };
    let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["z", "a", "m"]);
}
