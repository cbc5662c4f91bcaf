#![allow(missing_docs, dead_code)]
#![allow(clippy::needless_raw_string_hashes)]

/// A small export in the shape the dump tools write: one document per line,
/// mixing relaxed and canonical forms.
pub const EXPORT: &str = r#"{ "_id" : ObjectId("507f1f77bcf86cd799439011"), "name" : "ada", "age" : NumberInt(36) }
{ "_id" : ObjectId("507f1f77bcf86cd799439012"), "joined" : Date(1234567890123), "tags" : [ "a", 'b' ] }
{ _id: ObjectId("507f1f77bcf86cd799439013"), avatar: BinData(0, "aGk="), ts: Timestamp(7, 1) }
{ _id: ObjectId("nope"), note: "bad id" }
{ _id: ObjectId("507f1f77bcf86cd799439014"), re: /^a.*z$/i, big: NumberLong("9007199254740993"), lo: MinKey }
"#;
