//! Constructor argument resolution.
use super::DecodeState;
use crate::{
    convert,
    error::ParseError,
    literal_buffer::{Follow, Keyword},
    scanner::ScanAction,
    value::Value,
};

impl DecodeState<'_> {
    /// Reads the argument list following a constructor name.
    ///
    /// Each argument is a full value, so constructors nest. For names whose
    /// parentheses are optional a missing list reads as no arguments.
    pub(super) fn ctor_args(&mut self, keyword: Keyword) -> Result<Vec<Value>, ParseError> {
        let op = self.scan_while(ScanAction::SkipSpace);
        if op != ScanAction::BeginCtor {
            if keyword.follow() == Follow::OptionalCtor {
                self.back_up(op);
                return Ok(Vec::new());
            }
            return Err(self.unexpected());
        }

        let mut args = Vec::new();
        loop {
            let op = self.scan_while(ScanAction::SkipSpace);
            if op == ScanAction::EndCtor {
                break;
            }
            self.back_up(op);
            args.push(self.value()?);

            match self.scan_while(ScanAction::SkipSpace) {
                ScanAction::EndCtor => break,
                ScanAction::CtorArg => {}
                _ => return Err(self.unexpected()),
            }
        }

        crate::debug!(ctor = keyword.text(), args = args.len(), "resolved arguments");
        convert::check_arity(keyword, args.len())?;
        Ok(args)
    }
}
