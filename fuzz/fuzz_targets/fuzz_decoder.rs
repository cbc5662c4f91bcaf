#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use extjson::{Decoder, Value, chunk_utils::ChunkedReader};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::Map;

const HEADER: usize = 2; // chunk size byte + flag byte

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r"];

/// Extended literals spliced between generated JSON values.
static EXTENDED: &[&[u8]] = &[
    b"Date(1)",
    b"new Date(0x5f)",
    b"ObjectId(\"507f1f77bcf86cd799439011\")",
    b"NumberLong(\"9007199254740993\")",
    b"NumberInt(-1)",
    b"BinData(0, \"aGVsbG8=\")",
    b"Timestamp(1, 2)",
    b"/a\\/b/gi",
    b"RegExp(\"x\", \"m\")",
    b"DBRef('c', 1, 'db')",
    b"MinKey",
    b"MaxKey()",
    b"undefined",
    b"Boolean(Boolean(0))",
    b"ISODate(\"2020-01-02T03:04:05Z\")",
    b"{a: [NaN, -Infinity, +0x10, .5]}",
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);
        data[1] = with_rng(|rng| rng.next_u32() as u8);

        let mut prefix = HEADER;
        while prefix < size.max(HEADER + 1) && prefix < max_size {
            let limit = max_size - prefix;
            prefix += append_whitespace(&mut data[prefix..], limit);
            let limit = max_size - prefix;
            prefix += append_value(&mut data[prefix..], size, limit);
            let limit = max_size - prefix;
            prefix += append_whitespace(&mut data[prefix..], limit);
        }
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append 1‒N whitespace bytes, never exceeding `limit`.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        let n = rng.random_range(1..=limit.min(4));
        for slot in &mut buf[..n] {
            *slot = WS_TABLE[rng.random_range(0..WS_TABLE.len())][0];
        }
        n
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let serialized = if with_rng(|rng| rng.random_bool(0.5)) {
        EXTENDED[with_rng(|rng| rng.random_range(0..EXTENDED.len()))].to_vec()
    } else {
        let value = loop {
            let s = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
            let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
            if let Ok(value) = ArbitraryJson::arbitrary(&mut Unstructured::new(&bytes)) {
                break value;
            }
        };
        serde_json::to_vec(&value.0).expect("serializing an arbitrary value")
    };

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryJson(serde_json::Value);

impl<'a> Arbitrary<'a> for ArbitraryJson {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        use serde_json::Value as J;
        let value = match u.choose_index(21)? {
            0 => J::Null,
            1 => J::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                J::Number(serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?)
            }
            3..=10 => J::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryJson> = u.arbitrary()?;
                J::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryJson)> = u.arbitrary()?;
                J::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryJson(value))
    }
}

/// Decodes every value the stream yields, stopping at the first sticky
/// error.
fn decode_stream(reader: impl std::io::Read) -> Vec<Result<Value, extjson::ParseError>> {
    Decoder::new(reader).collect()
}

fn decoder(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let chunk = usize::from(data[0]) + 1;
    let whole_buffer = data[1] & 1 != 0;
    let data = &data[HEADER..];

    let unchunked = decode_stream(data);
    let chunked = decode_stream(ChunkedReader::new(data, chunk));
    assert_eq!(
        format!("{unchunked:?}"),
        format!("{chunked:?}"),
        "chunk size {chunk} changed the decoded stream"
    );

    // A buffer holding exactly one value decodes the same way on its own.
    if whole_buffer && unchunked.len() == 1 {
        if let (Ok(value), true) = (&unchunked[0], extjson::is_valid(data)) {
            assert_eq!(
                format!("{:?}", extjson::from_slice(data)),
                format!("{:?}", Ok::<_, extjson::ParseError>(value.clone()))
            );
        }
    }
}

fuzz_target!(|data: &[u8]| decoder(data));
