//! Decodes an extended JSON stream from stdin and prints every value.
//!
//! Documents that fail conversion (a malformed `ObjectId`, a `BinData`
//! payload that is not base64) are reported and skipped; a syntax error or
//! a truncated stream ends the run.
//!
//! ```bash
//! printf '{a: Date(1)} {b: ObjectId("x")} [MinKey]' \
//!     | cargo run -p extjson --example dump_stream
//! ```

use std::{
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use extjson::{Decoder, ErrorKind};

fn main() -> ExitCode {
    let stdin = io::stdin().lock();
    let mut out = BufWriter::new(io::stdout().lock());
    let mut skipped = 0usize;

    for (index, item) in Decoder::new(stdin).enumerate() {
        match item {
            Ok(value) => {
                if writeln!(out, "{index}: {value:#?}").is_err() {
                    return ExitCode::FAILURE;
                }
            }
            Err(err) if matches!(err.kind(), ErrorKind::Arity | ErrorKind::Type | ErrorKind::Validation) => {
                eprintln!("{index}: skipped: {err}");
                skipped += 1;
            }
            Err(err) => {
                let _ = out.flush();
                eprintln!("{index}: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    let _ = out.flush();
    if skipped > 0 {
        eprintln!("skipped {skipped} document(s)");
    }
    ExitCode::SUCCESS
}
