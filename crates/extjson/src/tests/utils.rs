use std::fmt::Write as _;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{Number, Value};

fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap()
}

fn write_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("NaN");
    } else if f.is_infinite() {
        out.push_str(if f < 0.0 { "-Infinity" } else { "Infinity" });
    } else {
        write!(out, "{f:?}").unwrap();
    }
}

/// Renders `value` as canonical extended JSON: every extended type is
/// written as its constructor call.
pub fn render(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => write!(out, "{b}").unwrap(),
        Value::Number(Number::Int64(i)) => write!(out, "{i}").unwrap(),
        Value::Number(Number::Float64(f)) => write_float(out, *f),
        Value::Number(Number::Text(text)) => out.push_str(text),
        Value::String(s) => out.push_str(&quote(s)),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(entries) => {
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&quote(key));
                out.push(':');
                write_value(out, item);
            }
            out.push('}');
        }
        Value::Binary(bin) => write!(
            out,
            "BinData({}, {})",
            bin.subtype,
            quote(&STANDARD.encode(&bin.payload))
        )
        .unwrap(),
        Value::Date(ms) => write!(out, "Date({ms})").unwrap(),
        Value::ObjectId(id) => write!(out, "ObjectId({})", quote(id.as_str())).unwrap(),
        Value::DbRef(r) => {
            write!(out, "DBRef({}, ", quote(&r.collection)).unwrap();
            write_value(out, &r.id);
            if let Some(db) = &r.database {
                write!(out, ", {}", quote(db)).unwrap();
            }
            out.push(')');
        }
        Value::DbPointer(p) => write!(
            out,
            "DBPointer({}, ObjectId({}))",
            quote(&p.namespace),
            quote(p.id.as_str())
        )
        .unwrap(),
        Value::NumberInt(i) => write!(out, "NumberInt({i})").unwrap(),
        Value::NumberLong(i) => write!(out, "NumberLong(\"{i}\")").unwrap(),
        Value::Regex(r) => write!(
            out,
            "RegExp({}, {})",
            quote(&r.pattern),
            quote(&r.options)
        )
        .unwrap(),
        Value::Timestamp(ts) => write!(out, "Timestamp({}, {})", ts.seconds, ts.increment).unwrap(),
        Value::MinKey => out.push_str("MinKey"),
        Value::MaxKey => out.push_str("MaxKey"),
        Value::Undefined => out.push_str("undefined"),
    }
}

/// Whether a decoded value carries the same data as `serde_json`'s reading
/// of the same document, including object key order.
pub fn agrees_with_json(value: &Value, json: &serde_json::Value) -> bool {
    use serde_json::Value as J;

    match (value, json) {
        (Value::Null, J::Null) => true,
        (Value::Bool(a), J::Bool(b)) => a == b,
        (Value::Number(n), J::Number(m)) => {
            if let Some(i) = m.as_i64() {
                *n == Number::Int64(i)
            } else if m.is_u64() {
                *n == Number::Text(m.to_string())
            } else {
                n.as_f64() == m.as_f64()
            }
        }
        (Value::String(a), J::String(b)) => a == b,
        (Value::Array(a), J::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| agrees_with_json(x, y))
        }
        (Value::Object(a), J::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|((ka, va), (kb, vb))| ka == kb && agrees_with_json(va, vb))
        }
        _ => false,
    }
}
