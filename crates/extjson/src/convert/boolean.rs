use crate::value::Value;

/// JavaScript truthiness.
pub(super) fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Null | Value::Undefined => false,
        _ => true,
    }
}

/// `Boolean()` is `false`; otherwise only the first argument counts.
pub(super) fn boolean(first: Option<Value>) -> bool {
    first.as_ref().is_some_and(truthy)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::value::{Number, ObjectId};

    #[rstest]
    #[case::true_(Value::Bool(true), true)]
    #[case::false_(Value::Bool(false), false)]
    #[case::one(Value::from(1i64), true)]
    #[case::zero(Value::from(0i64), false)]
    #[case::negative_zero(Value::from(-0.0), false)]
    #[case::fraction(Value::from(0.1), true)]
    #[case::nan(Value::from(f64::NAN), false)]
    #[case::infinity(Value::from(f64::INFINITY), true)]
    #[case::text_zero(Value::Number(Number::Text("0x0".into())), false)]
    #[case::text_big(Value::Number(Number::Text("99999999999999999999".into())), true)]
    #[case::empty_string(Value::from(""), false)]
    #[case::string(Value::from("false"), true)]
    #[case::null(Value::Null, false)]
    #[case::undefined(Value::Undefined, false)]
    #[case::empty_array(Value::Array(Vec::new()), true)]
    #[case::empty_object(Value::Object(Vec::new()), true)]
    #[case::number_int_zero(Value::NumberInt(0), true)]
    #[case::date_zero(Value::Date(0), true)]
    #[case::min_key(Value::MinKey, true)]
    #[case::object_id(Value::ObjectId(ObjectId::parse("507f1f77bcf86cd799439011").unwrap()), true)]
    fn truthiness(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(truthy(&value), expected);
    }

    #[test]
    fn absent_argument_is_false() {
        assert!(!boolean(None));
        assert!(boolean(Some(Value::from("x"))));
    }
}
