//! Script bytecode: building, tokenizing and rendering.
//!
//! Scripts are treated as opaque bytes. Nothing in this module executes or validates
//! them; it only splits them into instructions and turns them into text.
//!
//! # Examples
//!
//! Build a pay-to-public-key-hash output and print it:
//!
//! ```rust
//! use ccscript::script::{op_codes::*, Script};
//!
//! let mut script = Script::new();
//! script.append(OP_DUP);
//! script.append(OP_HASH160);
//! script.append_data(&[0; 20]).unwrap();
//! script.append(OP_EQUALVERIFY);
//! script.append(OP_CHECKSIG);
//! assert_eq!(
//!     script.to_asm(false),
//!     "DUP HASH160 0000000000000000000000000000000000000000 EQUALVERIFY CHECKSIG"
//! );
//! ```
use crate::util::{Error, Result};
use std::fmt;

mod asm;
mod instruction;
pub mod op_codes;
mod signature;
mod stack;
pub mod standard;

pub use self::asm::{format_script, to_asm_string, ERROR_MARKER};
pub use self::instruction::{Instruction, Instructions, Malformed};
pub use self::signature::{
    check_signature_encoding, decode_sighash, is_valid_signature_encoding, parse_der_signature, sighash_label,
    SCRIPT_VERIFY_DERSIG,
    SCRIPT_VERIFY_LOW_S, SCRIPT_VERIFY_STRICTENC, SIGHASH_ALL, SIGHASH_ANYONECANPAY, SIGHASH_NONE, SIGHASH_SINGLE,
};
pub use self::stack::{decode_script_num, encode_num, MAX_NUM_SIZE};
pub use self::standard::{classify, extract_destinations, TxOutType};

use self::op_codes::{OP_0, OP_1, OP_1NEGATE, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4, OP_RETURN};

/// Scripts longer than this can never be spent.
pub const MAX_SCRIPT_SIZE: usize = 10_000;

/// Transaction script
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct Script(pub Vec<u8>);

impl Script {
    /// Creates a new empty script
    #[must_use]
    pub fn new() -> Script {
        Script(vec![])
    }

    /// Appends a single opcode or data byte
    pub fn append(&mut self, byte: u8) {
        self.0.push(byte);
    }

    /// Appends a slice of data
    pub fn append_slice(&mut self, slice: &[u8]) {
        self.0.extend_from_slice(slice);
    }

    /// Appends the opcodes and provided data that push it onto the stack
    ///
    /// # Errors
    /// `Error::BadArgument` if the data is longer than a 4-byte length prefix allows.
    pub fn append_data(&mut self, data: &[u8]) -> Result<()> {
        let len = data.len();
        match len {
            0 => self.0.push(OP_0),
            1..=75 => self.0.push(len as u8),
            76..=255 => {
                self.0.push(OP_PUSHDATA1);
                self.0.push(len as u8);
            }
            256..=65535 => {
                self.0.push(OP_PUSHDATA2);
                self.0.extend_from_slice(&(len as u16).to_le_bytes());
            }
            _ => {
                let len = u32::try_from(len)
                    .map_err(|_| Error::BadArgument(format!("Push of {} bytes", data.len())))?;
                self.0.push(OP_PUSHDATA4);
                self.0.extend_from_slice(&len.to_le_bytes());
            }
        }
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Appends the opcodes to push a number to the stack
    ///
    /// The number must be in the range [-2^31 + 1, 2^31 - 1].
    ///
    /// # Errors
    /// `Error::ScriptError` when out of range.
    pub fn append_num(&mut self, n: i32) -> Result<()> {
        match n {
            -1 => self.append(OP_1NEGATE),
            0 => self.append(OP_0),
            1..=16 => self.append(OP_1 + (n as u8) - 1),
            _ => self.append_data(&encode_num(i64::from(n))?)?,
        }
        Ok(())
    }

    /// Iterates over the instructions of the script.
    #[must_use]
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions::new(&self.0)
    }

    /// Whether the script can never be spent: it starts with `OP_RETURN` or is
    /// longer than [`MAX_SCRIPT_SIZE`].
    #[must_use]
    pub fn is_unspendable(&self) -> bool {
        Script::is_unspendable_bytes(&self.0)
    }

    pub(crate) fn is_unspendable_bytes(script: &[u8]) -> bool {
        script.first() == Some(&OP_RETURN) || script.len() > MAX_SCRIPT_SIZE
    }

    /// Asm rendering, see [`to_asm_string`].
    #[must_use]
    pub fn to_asm(&self, attempt_sighash_decode: bool) -> String {
        to_asm_string(&self.0, attempt_sighash_decode)
    }

    /// Hex of the raw script bytes.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_asm(false))
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Script({})", format_script(&self.0))
    }
}
