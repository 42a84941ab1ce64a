//! Text renderings of a script: the asm string and the compact format string.

use crate::script::instruction::Instructions;
use crate::script::op_codes::{is_named_op, is_small_int, op_name, small_int_value, OP_0};
use crate::script::signature::decode_sighash;
use crate::script::stack::{decode_script_num, MAX_NUM_SIZE};
use crate::script::Script;

/// Marker appended to the undecodable tail of a script.
pub const ERROR_MARKER: &str = "[error]";

/// Renders a script as space separated asm.
///
/// Pushes of up to 4 bytes print as numbers and longer pushes as hex. With
/// `attempt_sighash_decode`, a long push that is a strictly encoded signature on a
/// spendable script prints its DER hex followed by the sighash label, e.g. `[ALL]`.
///
/// A truncated push ends the output with the hex of the remaining bytes and `[error]`.
///
/// # Examples
/// ```
/// use ccscript::script::to_asm_string;
/// assert_eq!(to_asm_string(&[0x76, 0x01, 0x05, 0x4f, 0x60], false), "DUP 5 -1 16");
/// assert_eq!(to_asm_string(&[0x02, 0x01], false), "0201[error]");
/// ```
#[must_use]
pub fn to_asm_string(script: &[u8], attempt_sighash_decode: bool) -> String {
    let decode_sigs = attempt_sighash_decode && !Script::is_unspendable_bytes(script);
    let mut out = String::with_capacity(script.len() * 2);
    for item in Instructions::new(script) {
        if !out.is_empty() {
            out.push(' ');
        }
        let ins = match item {
            Ok(ins) => ins,
            Err(malformed) => {
                out.push_str(&hex::encode(malformed.remainder));
                out.push_str(ERROR_MARKER);
                break;
            }
        };
        match ins.data {
            Some(data) if data.len() <= MAX_NUM_SIZE => {
                let n = decode_script_num(data).unwrap_or_default();
                out.push_str(&n.to_string());
            }
            Some(data) => match decode_sigs.then(|| decode_sighash(data)).flatten() {
                Some((der, label)) => {
                    out.push_str(&hex::encode(der));
                    out.push_str(&format!("[{}]", label));
                }
                None => out.push_str(&hex::encode(data)),
            },
            None if is_small_int(ins.opcode) => {
                out.push_str(&small_int_value(ins.opcode).to_string());
            }
            None => out.push_str(display_name(ins.opcode)),
        }
    }
    out
}

/// Name shown for a non-push opcode: bare for the named range, canonical otherwise.
fn display_name(op: u8) -> &'static str {
    match op_name(op) {
        Some(name) if is_named_op(op) => name.strip_prefix("OP_").unwrap_or(name),
        Some(name) => name,
        None => "OP_UNKNOWN",
    }
}

/// Renders a script in the compact format used for script templates.
///
/// `OP_0` prints `0`, small integers print their value and the named range prints bare
/// names. Every other opcode prints as `0x` hex; a push prints its opcode and length
/// prefix and then its payload as two `0x` words. A truncated push prints the rest of
/// the script as one `0x` word and stops.
///
/// # Examples
/// ```
/// use ccscript::script::format_script;
/// assert_eq!(format_script(&[0x00, 0x52, 0x87, 0x02, 0xab, 0xcd]), "0 2 EQUAL 0x02 0xabcd");
/// ```
#[must_use]
pub fn format_script(script: &[u8]) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut it = Instructions::new(script);
    loop {
        let start = it.position();
        let ins = match it.next() {
            Some(Ok(ins)) => ins,
            Some(Err(malformed)) => {
                words.push(format!("0x{}", hex::encode(malformed.remainder)));
                break;
            }
            None => break,
        };
        let end = it.position();
        if ins.opcode == OP_0 {
            words.push("0".to_string());
        } else if is_small_int(ins.opcode) {
            words.push(small_int_value(ins.opcode).to_string());
        } else if is_named_op(ins.opcode) {
            words.push(display_name(ins.opcode).to_string());
        } else {
            match ins.data {
                Some(data) if !data.is_empty() => {
                    let data_start = end - data.len();
                    words.push(format!("0x{}", hex::encode(&script[start..data_start])));
                    words.push(format!("0x{}", hex::encode(data)));
                }
                _ => words.push(format!("0x{}", hex::encode(&script[start..end]))),
            }
        }
    }
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::op_codes::*;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;

    const SIG_ALL: [u8; 9] = hex!("300602010102010101");

    #[test]
    fn small_ints() {
        let mut script = vec![OP_1NEGATE];
        script.extend(OP_1..=OP_16);
        assert_eq!(to_asm_string(&script, false), "-1 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16");
    }

    #[test]
    fn short_pushes_are_numbers() {
        assert_eq!(to_asm_string(&[OP_0], false), "0");
        assert_eq!(to_asm_string(&hex!("0401000000"), false), "1");
        assert_eq!(to_asm_string(&hex!("0400000080"), false), "0");
        assert_eq!(to_asm_string(&hex!("02ff80"), false), "-255");
        assert_eq!(to_asm_string(&hex!("050102030405"), false), "0102030405");
    }

    #[test]
    fn names() {
        let script = [OP_DUP, OP_HASH160, OP_EQUALVERIFY, OP_CHECKSIG, OP_CHECKLOCKTIMEVERIFY, OP_CHECKCRYPTOCONDITION, 0xba, OP_RESERVED, OP_PUSHDATA1, 0x00];
        assert_eq!(
            to_asm_string(&script, false),
            "DUP HASH160 EQUALVERIFY CHECKSIG OP_CHECKLOCKTIMEVERIFY OP_CHECKCRYPTOCONDITION OP_UNKNOWN OP_RESERVED 0"
        );
        assert_eq!(to_asm_string(&[], false), "");
    }

    #[test]
    fn sighash_decode() {
        let mut script = vec![SIG_ALL.len() as u8];
        script.extend_from_slice(&SIG_ALL);
        assert_eq!(to_asm_string(&script, true), "3006020101020101[ALL]");
        assert_eq!(to_asm_string(&script, false), "300602010102010101");

        let mut unspendable = vec![OP_RETURN, SIG_ALL.len() as u8];
        unspendable.extend_from_slice(&SIG_ALL);
        assert_eq!(to_asm_string(&unspendable, true), "RETURN 300602010102010101");

        let mut unknown_type = SIG_ALL;
        unknown_type[8] = 0x41;
        let mut script = vec![9];
        script.extend_from_slice(&unknown_type);
        assert_eq!(to_asm_string(&script, true), "300602010102010141");
    }

    #[test]
    fn truncated() {
        assert_eq!(to_asm_string(&[OP_1, OP_PUSHDATA2, 0x05], false), "1 4d05[error]");
        assert_eq!(to_asm_string(&[0x4b], false), "4b[error]");
    }

    #[test]
    fn format() {
        let script = hex!("76a914000102030405060708090a0b0c0d0e0f1011121388ac");
        assert_eq!(
            format_script(&script),
            "DUP HASH160 0x14 0x000102030405060708090a0b0c0d0e0f10111213 EQUALVERIFY CHECKSIG"
        );
        assert_eq!(format_script(&[OP_1NEGATE, OP_CHECKCRYPTOCONDITION, OP_PUSHDATA1, 0x00]), "-1 0xcc 0x4c00");
        assert_eq!(format_script(&[OP_PUSHDATA1, 0x01, 0xaa]), "0x4c01 0xaa");
        assert_eq!(format_script(&[OP_DROP, 0x03, 0x01]), "DROP 0x0301");
        assert_eq!(format_script(&[]), "");
    }
}
