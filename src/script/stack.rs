//! Script numbers: the sign-magnitude little-endian integers carried by short pushes.
use crate::util::{Error, Result};

/// Longest push that the disassembler prints as a number.
pub const MAX_NUM_SIZE: usize = 4;

/// Decodes a script number without enforcing minimal encoding.
///
/// Bytes are little endian; the top bit of the last byte is the sign. An empty
/// slice is zero, and so is a "negative zero" such as `[0x80]`.
///
/// # Errors
/// - More than [`MAX_NUM_SIZE`] bytes.
///
/// # Examples
/// ```
/// use ccscript::script::decode_script_num;
/// assert_eq!(decode_script_num(&[1, 0, 0, 0]).unwrap(), 1);
/// assert_eq!(decode_script_num(&[0x81]).unwrap(), -1);
/// ```
#[inline]
pub fn decode_script_num(s: &[u8]) -> Result<i64> {
    if s.len() > MAX_NUM_SIZE {
        return Err(Error::ScriptError(format!("Num too long: {} bytes", s.len())));
    }
    let Some((&last, _)) = s.split_last() else {
        return Ok(0);
    };
    let mut magnitude: i64 = 0;
    for (i, &byte) in s.iter().enumerate() {
        magnitude |= i64::from(byte) << (8 * i);
    }
    let sign_bit = 0x80_i64 << (8 * (s.len() - 1));
    if last & 0x80 != 0 {
        Ok(-(magnitude & !sign_bit))
    } else {
        Ok(magnitude)
    }
}

/// Encodes i64 to minimal stack item (1-4 bytes, sign in MSB).
///
/// # Errors
/// - Out of range [-2^31 + 1, 2^31 - 1].
///
/// # Examples
/// ```
/// use ccscript::script::encode_num;
/// assert_eq!(encode_num(1).unwrap(), vec![1]);
/// assert_eq!(encode_num(-1).unwrap(), vec![129]);
/// ```
#[inline]
pub fn encode_num(val: i64) -> Result<Vec<u8>> {
    if val.unsigned_abs() > 2_147_483_647 {
        return Err(Error::ScriptError("Number out of range".to_string()));
    }
    let mut pos_val = val.unsigned_abs();
    let mut bytes = Vec::with_capacity(MAX_NUM_SIZE);
    while pos_val > 0 {
        bytes.push((pos_val & 0xff) as u8);
        pos_val >>= 8;
    }
    // A set top bit would read as the sign, so spill into one more byte.
    if let Some(last) = bytes.last_mut() {
        if *last & 0x80 != 0 {
            bytes.push(if val < 0 { 0x80 } else { 0 });
        } else if val < 0 {
            *last |= 0x80;
        }
    }
    Ok(bytes)
}
