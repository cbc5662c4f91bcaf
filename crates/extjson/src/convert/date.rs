use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::{number::integral, type_error};
use crate::{error::ParseError, value::Value};

/// `Date(ms)`: one integral number of milliseconds since the epoch.
pub(super) fn date(value: &Value) -> Result<Value, ParseError> {
    integral("Date", value).map(Value::Date)
}

/// `ISODate("…")`: an ISO-8601 string; forms without a zone are UTC.
pub(super) fn iso_date(value: Value) -> Result<Value, ParseError> {
    let Value::String(text) = value else {
        return Err(type_error("ISODate", "a string", &value));
    };
    parse_iso8601(&text).map(Value::Date).ok_or_else(|| {
        ParseError::validation("ISODate", format!("{text:?} is not an ISO-8601 date"))
    })
}

const ZONED: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];
const NAIVE: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

fn parse_iso8601(text: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    if let Some(dt) = ZONED
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt.timestamp_millis());
    }
    if let Some(naive) = NAIVE
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(naive.and_utc().timestamp_millis());
    }
    let day = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(day.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[test]
    fn date_accepts_integral_numbers() {
        assert_eq!(date(&Value::from(123i64)), Ok(Value::Date(123)));
        assert_eq!(date(&Value::from(-5.0)), Ok(Value::Date(-5)));
        assert_eq!(date(&Value::NumberLong(7)), Ok(Value::Date(7)));
        assert_eq!(
            date(&Value::Number(Number::Text("0x5f".into()))),
            Ok(Value::Date(0x5f))
        );
    }

    #[test]
    fn date_rejects_strings_and_fractions() {
        assert_eq!(
            date(&Value::from("123")),
            Err(ParseError::Type {
                context: "Date",
                expected: "a number",
                found: "string",
            })
        );
        insta::assert_snapshot!(
            date(&Value::from(1.5)).unwrap_err().to_string(),
            @"invalid Date: 1.5 is not an integer in range"
        );
    }

    #[test]
    fn iso_date_forms() {
        let cases = [
            ("1970-01-01T00:00:00Z", 0),
            ("1970-01-01T00:00:01.250Z", 1250),
            ("1970-01-01T01:00:00+01:00", 0),
            ("1970-01-01T01:00:00+0100", 0),
            ("1970-01-01T00:00:02", 2000),
            ("1970-01-01 00:00:03.5", 3500),
            ("1970-01-02", 86_400_000),
            ("2012-12-19T06:01:17.171Z", 1_355_896_877_171),
        ];
        for (text, millis) in cases {
            assert_eq!(iso_date(Value::from(text)), Ok(Value::Date(millis)), "{text}");
        }
    }

    #[test]
    fn iso_date_errors() {
        assert_eq!(
            iso_date(Value::from(5i64)).map_err(|e| e.kind()),
            Err(crate::ErrorKind::Type)
        );
        assert_eq!(
            iso_date(Value::from("yesterday")).map_err(|e| e.kind()),
            Err(crate::ErrorKind::Validation)
        );
    }
}
