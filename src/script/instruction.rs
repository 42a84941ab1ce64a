//! Forward-only tokenizer over script bytecode.
//!
//! The iterator never reads past the end of the buffer. A push whose length prefix or
//! payload runs off the end is reported once as [`Malformed`], after which the iterator
//! is exhausted.

use crate::script::op_codes::{OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4};
use std::fmt;

/// One opcode with its push payload, borrowed from the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction<'a> {
    /// The opcode byte.
    pub opcode: u8,
    /// Payload for push opcodes `0x00..=0x4e`, empty for `OP_0`. `None` otherwise.
    pub data: Option<&'a [u8]>,
}

impl Instruction<'_> {
    /// Whether this is a data push (including the empty push).
    #[must_use]
    #[inline]
    pub fn is_push(&self) -> bool {
        self.data.is_some()
    }
}

/// A push that does not fit in the remaining bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Malformed<'a> {
    /// Offset of the failing opcode.
    pub offset: usize,
    /// Every byte from the failing opcode to the end of the script.
    pub remainder: &'a [u8],
}

impl fmt::Display for Malformed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Truncated push at offset {}: {}", self.offset, hex::encode(self.remainder))
    }
}

/// Iterator over the instructions of a script.
///
/// # Examples
/// ```
/// use ccscript::script::Instructions;
/// let ops: Vec<_> = Instructions::new(&[0x51, 0x02, 0xab, 0xcd]).collect();
/// assert_eq!(ops.len(), 2);
/// assert_eq!(ops[1].unwrap().data, Some(&[0xab, 0xcd][..]));
/// ```
#[derive(Debug, Clone)]
pub struct Instructions<'a> {
    script: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> Instructions<'a> {
    /// Starts tokenizing at the first byte of `script`.
    #[must_use]
    pub fn new(script: &'a [u8]) -> Self {
        Instructions { script, pos: 0, done: false }
    }

    /// Offset of the next unread byte.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn malformed(&mut self, offset: usize) -> Malformed<'a> {
        self.done = true;
        self.pos = self.script.len();
        Malformed { offset, remainder: &self.script[offset..] }
    }

    /// Reads a little-endian length of `width` bytes at `at`.
    fn read_len(&self, at: usize, width: usize) -> Option<usize> {
        let bytes = self.script.get(at..at.checked_add(width)?)?;
        let mut len: usize = 0;
        for (i, &b) in bytes.iter().enumerate() {
            len |= usize::from(b) << (8 * i);
        }
        Some(len)
    }
}

impl<'a> Iterator for Instructions<'a> {
    type Item = Result<Instruction<'a>, Malformed<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.script.len() {
            self.done = true;
            return None;
        }
        let start = self.pos;
        let opcode = self.script[start];
        let (prefix, len) = match opcode {
            len @ 0..=75 => (0, usize::from(len)),
            OP_PUSHDATA1 => match self.read_len(start + 1, 1) {
                Some(len) => (1, len),
                None => return Some(Err(self.malformed(start))),
            },
            OP_PUSHDATA2 => match self.read_len(start + 1, 2) {
                Some(len) => (2, len),
                None => return Some(Err(self.malformed(start))),
            },
            OP_PUSHDATA4 => match self.read_len(start + 1, 4) {
                Some(len) => (4, len),
                None => return Some(Err(self.malformed(start))),
            },
            _ => {
                self.pos = start + 1;
                return Some(Ok(Instruction { opcode, data: None }));
            }
        };
        let data_start = start + 1 + prefix;
        let data = match data_start.checked_add(len).and_then(|end| self.script.get(data_start..end)) {
            Some(data) => data,
            None => return Some(Err(self.malformed(start))),
        };
        self.pos = data_start + len;
        Some(Ok(Instruction { opcode, data: Some(data) }))
    }
}

impl std::iter::FusedIterator for Instructions<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::op_codes::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tokenize_mixed() {
        let script = [OP_0, OP_1NEGATE, 0x02, 0xaa, 0xbb, OP_PUSHDATA1, 0x01, 0xcc, OP_DUP, OP_CHECKCRYPTOCONDITION];
        let ops: Vec<_> = Instructions::new(&script).collect::<Result<_, _>>().unwrap();
        assert_eq!(
            ops,
            vec![
                Instruction { opcode: OP_0, data: Some(&[][..]) },
                Instruction { opcode: OP_1NEGATE, data: None },
                Instruction { opcode: 0x02, data: Some(&[0xaa, 0xbb][..]) },
                Instruction { opcode: OP_PUSHDATA1, data: Some(&[0xcc][..]) },
                Instruction { opcode: OP_DUP, data: None },
                Instruction { opcode: OP_CHECKCRYPTOCONDITION, data: None },
            ]
        );
    }

    #[test]
    fn pushdata_widths() {
        let mut script = vec![OP_PUSHDATA2, 0x00, 0x01];
        script.extend_from_slice(&[7; 256]);
        script.extend_from_slice(&[OP_PUSHDATA4, 0x02, 0, 0, 0, 8, 9]);
        let ops: Vec<_> = Instructions::new(&script).map(|r| r.unwrap()).collect();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].data.unwrap().len(), 256);
        assert_eq!(ops[1].data, Some(&[8, 9][..]));
    }

    #[test]
    fn truncated_payload() {
        let script = [OP_1, 0x05, 0x01, 0x02];
        let mut it = Instructions::new(&script);
        assert_eq!(it.next(), Some(Ok(Instruction { opcode: OP_1, data: None })));
        assert_eq!(it.next(), Some(Err(Malformed { offset: 1, remainder: &[0x05, 0x01, 0x02] })));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn truncated_prefix() {
        for script in [&[OP_PUSHDATA1][..], &[OP_PUSHDATA2, 0x01][..], &[OP_PUSHDATA4, 1, 0, 0][..]] {
            let mut it = Instructions::new(script);
            let err = it.next().unwrap().unwrap_err();
            assert_eq!(err.offset, 0);
            assert_eq!(err.remainder, script);
            assert!(it.next().is_none());
        }
        let huge = [OP_PUSHDATA4, 0xff, 0xff, 0xff, 0xff, 0x00];
        assert!(Instructions::new(&huge).next().unwrap().is_err());
    }

    #[test]
    fn malformed_display() {
        let m = Malformed { offset: 3, remainder: &[0x4c] };
        assert_eq!(m.to_string(), "Truncated push at offset 3: 4c");
    }
}
