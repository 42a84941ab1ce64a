//! Recognizing pushes that look like signatures.
//!
//! Nothing here verifies a signature. The checks only decide whether a push is
//! strictly encoded so the disassembler can label its sighash byte.

use crate::util::{Error, Result};
use secp256k1::ecdsa::Signature;

/// Require strict DER (BIP-66).
pub const SCRIPT_VERIFY_DERSIG: u32 = 1 << 2;
/// Require a low S value.
pub const SCRIPT_VERIFY_LOW_S: u32 = 1 << 3;
/// Require DER plus a defined hash type.
pub const SCRIPT_VERIFY_STRICTENC: u32 = 1 << 1;

/// Sign all inputs and outputs.
pub const SIGHASH_ALL: u8 = 0x01;
/// Sign all inputs and no outputs.
pub const SIGHASH_NONE: u8 = 0x02;
/// Sign all inputs and the output with the same index.
pub const SIGHASH_SINGLE: u8 = 0x03;
/// Flag to sign only this input.
pub const SIGHASH_ANYONECANPAY: u8 = 0x80;

/// Display label for a trailing sighash byte.
#[must_use]
pub fn sighash_label(sighash: u8) -> Option<&'static str> {
    match sighash {
        0x01 => Some("ALL"),
        0x81 => Some("ALL|ANYONECANPAY"),
        0x02 => Some("NONE"),
        0x82 => Some("NONE|ANYONECANPAY"),
        0x03 => Some("SINGLE"),
        0x83 => Some("SINGLE|ANYONECANPAY"),
        _ => None,
    }
}

/// Splits a strictly encoded signature into its DER part and sighash label.
///
/// Declines (returns `None`) when the encoding check fails or the trailing byte has no
/// label.
///
/// # Examples
/// ```
/// use ccscript::script::decode_sighash;
/// let sig = [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01, 0x81];
/// let (der, label) = decode_sighash(&sig).unwrap();
/// assert_eq!(der, &sig[..8]);
/// assert_eq!(label, "ALL|ANYONECANPAY");
/// ```
#[must_use]
pub fn decode_sighash(data: &[u8]) -> Option<(&[u8], &'static str)> {
    if !check_signature_encoding(data, SCRIPT_VERIFY_STRICTENC) {
        return None;
    }
    let (&sighash, der) = data.split_last()?;
    sighash_label(sighash).map(|label| (der, label))
}

/// Checks a signature (with trailing sighash byte) against the encoding rules in `flags`.
///
/// An empty signature always passes.
#[must_use]
pub fn check_signature_encoding(sig: &[u8], flags: u32) -> bool {
    if sig.is_empty() {
        return true;
    }
    if flags & (SCRIPT_VERIFY_DERSIG | SCRIPT_VERIFY_LOW_S | SCRIPT_VERIFY_STRICTENC) != 0
        && !is_valid_signature_encoding(sig)
    {
        return false;
    }
    if flags & SCRIPT_VERIFY_LOW_S != 0 && !is_low_der_signature(sig) {
        return false;
    }
    if flags & SCRIPT_VERIFY_STRICTENC != 0 && !is_defined_hashtype_signature(sig) {
        return false;
    }
    true
}

/// BIP-66 structure: `0x30 len 0x02 len_r R 0x02 len_s S sighash`.
#[must_use]
pub fn is_valid_signature_encoding(sig: &[u8]) -> bool {
    if sig.len() < 9 || sig.len() > 73 {
        return false;
    }
    if sig[0] != 0x30 {
        return false;
    }
    if sig[1] as usize != sig.len() - 3 {
        return false;
    }

    let len_r = sig[3] as usize;
    if 5 + len_r >= sig.len() {
        return false;
    }
    let len_s = sig[5 + len_r] as usize;
    if len_r + len_s + 7 != sig.len() {
        return false;
    }

    if sig[2] != 0x02 {
        return false;
    }
    if len_r == 0 {
        return false;
    }
    if sig[4] & 0x80 != 0 {
        return false;
    }
    if len_r > 1 && sig[4] == 0x00 && (sig[5] & 0x80) == 0 {
        return false;
    }

    if sig[len_r + 4] != 0x02 {
        return false;
    }
    if len_s == 0 {
        return false;
    }
    if sig[len_r + 6] & 0x80 != 0 {
        return false;
    }
    if len_s > 1 && sig[len_r + 6] == 0x00 && (sig[len_r + 7] & 0x80) == 0 {
        return false;
    }
    true
}

fn is_defined_hashtype_signature(sig: &[u8]) -> bool {
    match sig.last() {
        Some(last) => matches!(last & !SIGHASH_ANYONECANPAY, SIGHASH_ALL..=SIGHASH_SINGLE),
        None => false,
    }
}

/// Parses the DER part of a signature that still carries its sighash byte.
///
/// # Errors
/// `Error::BadData` for an empty input, `Error::Secp256k1Error` when secp256k1 rejects the DER.
pub fn parse_der_signature(sig: &[u8]) -> Result<Signature> {
    let (_, der) = sig.split_last().ok_or_else(|| Error::BadData("Empty signature".to_string()))?;
    Ok(Signature::from_der(der)?)
}

fn is_low_der_signature(sig: &[u8]) -> bool {
    if !is_valid_signature_encoding(sig) {
        return false;
    }
    let Ok(signature) = parse_der_signature(sig) else {
        return false;
    };
    let mut normalized = signature;
    normalized.normalize_s();
    normalized == signature
}
