//! Extended literal converters.
//!
//! Each constructor keyword maps to one converter that turns the already
//! decoded argument values into a typed [`Value`]. Argument counts are
//! checked against [`arg_spec`] before any converter runs, and any converter
//! failure aborts the whole top-level decode.
use crate::{
    error::{ArgSpec, ParseError},
    literal_buffer::Keyword,
    value::Value,
};

mod binary;
mod boolean;
mod date;
pub(crate) mod number;
mod object_id;
pub(crate) mod regexp;
mod timestamp;

/// Number of arguments each constructor accepts.
pub(crate) fn arg_spec(keyword: Keyword) -> ArgSpec {
    match keyword {
        Keyword::Boolean => ArgSpec::FreeForm,
        Keyword::MinKey | Keyword::MaxKey | Keyword::Undefined => ArgSpec::Exact(0),
        Keyword::BinData | Keyword::DbPointer | Keyword::Timestamp => ArgSpec::Exact(2),
        Keyword::DbRef => ArgSpec::Between(2, 3),
        Keyword::RegExp => ArgSpec::Between(1, 2),
        _ => ArgSpec::Exact(1),
    }
}

pub(crate) fn check_arity(keyword: Keyword, got: usize) -> Result<(), ParseError> {
    let expected = arg_spec(keyword);
    if expected.accepts(got) {
        Ok(())
    } else {
        Err(ParseError::Arity {
            ctor: keyword.text(),
            expected,
            got,
        })
    }
}

pub(super) fn type_error(ctor: &'static str, expected: &'static str, found: &Value) -> ParseError {
    ParseError::Type {
        context: ctor,
        expected,
        found: found.type_name(),
    }
}

fn take(args: &mut impl Iterator<Item = Value>) -> Value {
    args.next().unwrap_or_default()
}

/// Builds the value for a constructor call.
///
/// `args` must already satisfy [`check_arity`]; missing arguments read as
/// `null`.
pub(crate) fn construct(keyword: Keyword, args: Vec<Value>) -> Result<Value, ParseError> {
    crate::trace!(ctor = keyword.text(), args = args.len(), "converting constructor");
    let mut args = args.into_iter();
    let args = &mut args;
    match keyword {
        Keyword::BinData => binary::bin_data(take(args), take(args)),
        Keyword::Boolean => Ok(Value::Bool(boolean::boolean(args.next()))),
        Keyword::Date => date::date(&take(args)),
        Keyword::IsoDate => date::iso_date(take(args)),
        Keyword::DbRef => object_id::db_ref(take(args), take(args), args.next()),
        Keyword::DbPointer => object_id::db_pointer(take(args), take(args)),
        Keyword::MinKey => Ok(Value::MinKey),
        Keyword::MaxKey => Ok(Value::MaxKey),
        Keyword::Undefined => Ok(Value::Undefined),
        Keyword::NumberInt => number::number_int(&take(args)),
        Keyword::NumberLong => number::number_long(&take(args)),
        Keyword::ObjectId => object_id::object_id(take(args)),
        Keyword::RegExp => regexp::from_ctor(take(args), args.next()),
        Keyword::Timestamp => timestamp::timestamp(&take(args), &take(args)),
        Keyword::Null
        | Keyword::New
        | Keyword::True
        | Keyword::False
        | Keyword::NaN
        | Keyword::Infinity => Err(ParseError::Type {
            context: "new",
            expected: "a constructor name",
            found: keyword.text(),
        }),
    }
}
