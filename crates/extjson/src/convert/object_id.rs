use super::type_error;
use crate::{
    error::ParseError,
    value::{DbPointer, DbRef, ObjectId, Value},
};

pub(super) fn object_id(value: Value) -> Result<Value, ParseError> {
    match value {
        Value::String(hex) => ObjectId::parse(&hex).map(Value::ObjectId),
        other => Err(type_error("ObjectId", "a string", &other)),
    }
}

/// `DBRef(collection, id[, database])`; `id` may be any value.
pub(super) fn db_ref(
    collection: Value,
    id: Value,
    database: Option<Value>,
) -> Result<Value, ParseError> {
    let Value::String(collection) = collection else {
        return Err(type_error("DBRef", "a collection name string", &collection));
    };
    let database = match database {
        None => None,
        Some(Value::String(db)) => Some(db),
        Some(other) => return Err(type_error("DBRef", "a database name string", &other)),
    };
    Ok(Value::DbRef(DbRef {
        collection,
        id: Box::new(id),
        database,
    }))
}

pub(super) fn db_pointer(namespace: Value, id: Value) -> Result<Value, ParseError> {
    let Value::String(namespace) = namespace else {
        return Err(type_error("DBPointer", "a namespace string", &namespace));
    };
    let Value::ObjectId(id) = id else {
        return Err(type_error("DBPointer", "an ObjectId", &id));
    };
    Ok(Value::DbPointer(DbPointer { namespace, id }))
}
