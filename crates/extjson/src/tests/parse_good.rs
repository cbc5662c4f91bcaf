use rstest::rstest;

use crate::{
    Binary, DbPointer, DbRef, DecodeOptions, Number, ObjectId, Regex, Timestamp, Value, from_str,
    from_str_with_options, is_valid,
};

fn obj(entries: &[(&str, Value)]) -> Value {
    Value::Object(
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect(),
    )
}

fn int(i: i64) -> Value {
    Value::Number(Number::Int64(i))
}

fn float(f: f64) -> Value {
    Value::Number(Number::Float64(f))
}

fn oid() -> ObjectId {
    ObjectId::parse("507f1f77bcf86cd799439011").unwrap()
}

#[rstest]
#[case::hex(r#"{"k":0x123}"#, obj(&[("k", int(0x123))]))]
#[case::hex_plus(r#"{"k":+0x106}"#, obj(&[("k", int(0x106))]))]
#[case::hex_minus(r#"{"k":-0x106}"#, obj(&[("k", int(-0x106))]))]
#[case::hex_upper_prefix(r#"{"k":0X106}"#, obj(&[("k", int(0x106))]))]
#[case::hex_digits_mixed_case("0xFfA", int(0xffa))]
#[case::leading_dot(".5", float(0.5))]
#[case::signed_leading_dot("-.25", float(-0.25))]
#[case::exponent("1E+2", float(100.0))]
#[case::plus_sign("+7", int(7))]
#[case::infinity("-Infinity", float(f64::NEG_INFINITY))]
#[case::big_integer("18446744073709551616", Value::Number(Number::Text("18446744073709551616".into())))]
#[case::single_quotes(r"'it\'s'", Value::from("it's"))]
#[case::double_quote_in_single(r#"'say "hi"'"#, Value::from("say \"hi\""))]
#[case::unicode_escape(r#""\u00e9\ud83d\ude00""#, Value::from("é😀"))]
#[case::raw_utf8("'é😀'", Value::from("é😀"))]
#[case::lone_surrogate(r#""\ud800x""#, Value::from("\u{fffd}x"))]
#[case::escapes(r#""\b\f\n\r\t\\\/""#, Value::from("\u{8}\u{c}\n\r\t\\/"))]
#[case::whitespace(" \t\r\n null \r\n", Value::Null)]
#[case::bare_word("hello_world$2", Value::from("hello_world$2"))]
#[case::unquoted_keys("{$oid: 1, _x9: 'y'}", obj(&[("$oid", int(1)), ("_x9", Value::from("y"))]))]
#[case::duplicate_keys("{a: 1, a: 2}", obj(&[("a", int(1)), ("a", int(2))]))]
#[case::date("Date(123)", Value::Date(123))]
#[case::date_hex("Date(0x5f)", Value::Date(95))]
#[case::date_negative("Date(-1)", Value::Date(-1))]
#[case::new_date("new Date(5)", Value::Date(5))]
#[case::new_with_tabs("new\t\tNumberInt(3)", Value::NumberInt(3))]
#[case::nested_dates(
    r#"{"a":[Date(1),Date(1),Date(1)]}"#,
    obj(&[("a", Value::Array(vec![Value::Date(1); 3]))])
)]
#[case::iso_date_utc(r#"ISODate("2020-01-02T03:04:05Z")"#, Value::Date(1_577_934_245_000))]
#[case::iso_date_offset(r#"ISODate("2020-01-02T04:04:05.5+01:00")"#, Value::Date(1_577_934_245_500))]
#[case::iso_date_day(r#"ISODate("1970-01-02")"#, Value::Date(86_400_000))]
#[case::number_long(r#"NumberLong("9999999999")"#, Value::NumberLong(9_999_999_999))]
#[case::number_long_number("NumberLong(-3)", Value::NumberLong(-3))]
#[case::number_int("NumberInt(-5)", Value::NumberInt(-5))]
#[case::number_int_string("NumberInt(' 12 ')", Value::NumberInt(12))]
#[case::object_id_upper("ObjectId('507F1F77BCF86CD799439011')", Value::ObjectId(oid()))]
#[case::bin_data(
    r#"BinData(0, "aGVsbG8=")"#,
    Value::Binary(Binary { subtype: 0, payload: b"hello".to_vec() })
)]
#[case::bin_data_hex_subtype(
    r#"BinData("80", "")"#,
    Value::Binary(Binary { subtype: 0x80, payload: Vec::new() })
)]
#[case::timestamp("Timestamp(1, 2)", Value::Timestamp(Timestamp { seconds: 1, increment: 2 }))]
#[case::db_ref(
    r#"DBRef("users", 5)"#,
    Value::DbRef(DbRef { collection: "users".into(), id: Box::new(int(5)), database: None })
)]
#[case::db_ref_database(
    r#"DBRef("users", ObjectId("507f1f77bcf86cd799439011"), "app")"#,
    Value::DbRef(DbRef {
        collection: "users".into(),
        id: Box::new(Value::ObjectId(oid())),
        database: Some("app".into()),
    })
)]
#[case::db_pointer(
    r#"DBPointer("db.users", ObjectId("507f1f77bcf86cd799439011"))"#,
    Value::DbPointer(DbPointer { namespace: "db.users".into(), id: oid() })
)]
#[case::sentinels(
    "[MinKey, MaxKey(), undefined, MinKey ( )]",
    Value::Array(vec![Value::MinKey, Value::MaxKey, Value::Undefined, Value::MinKey])
)]
#[case::regex_literal(
    r"/a\/b\d/gi",
    Value::Regex(Regex { pattern: r"a/b\d".into(), options: "gi".into() })
)]
#[case::regex_in_object(
    r"{re: /x/}",
    obj(&[("re", Value::Regex(Regex { pattern: "x".into(), options: String::new() }))])
)]
fn decodes(#[case] input: &str, #[case] expected: Value) {
    assert!(is_valid(input.as_bytes()), "{input}");
    assert_eq!(from_str(input), Ok(expected), "{input}");
}

#[test]
fn nan_literals() {
    for input in ["NaN", "+NaN", "-NaN"] {
        let value = from_str(input).unwrap();
        assert!(value.as_f64().is_some_and(f64::is_nan), "{input}");
    }
}

#[test]
fn use_number_keeps_text() {
    let options = DecodeOptions::new().with_use_number(true);
    assert_eq!(
        from_str_with_options("[1.50, 0x10, -0, NaN]", &options).map(|v| {
            v.as_array()
                .unwrap()
                .iter()
                .map(|n| match n {
                    Value::Number(Number::Text(t)) => t.clone(),
                    other => format!("{other:?}"),
                })
                .collect::<Vec<_>>()
        }),
        Ok(vec![
            "1.50".to_owned(),
            "0x10".into(),
            "-0".into(),
            "Number(Float64(NaN))".into(),
        ])
    );
}

#[test]
fn deep_nesting_within_limit() {
    let depth = 200;
    let input = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let mut value = from_str(&input).unwrap();
    for _ in 1..depth {
        let Value::Array(mut items) = value else {
            panic!("expected array");
        };
        value = items.pop().unwrap();
    }
    assert_eq!(value, Value::Array(Vec::new()));
}
