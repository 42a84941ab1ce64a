//! Standard output script templates and the addresses they pay to.
use crate::address::Destination;
use crate::cc::{is_crypto_condition, OptCcParams};
use crate::script::op_codes::{
    is_small_int, small_int_value, OP_CHECKMULTISIG, OP_CHECKSIG, OP_DUP, OP_EQUAL, OP_EQUALVERIFY, OP_HASH160,
    OP_PUSH, OP_RETURN,
};
use crate::script::Instructions;
use crate::util::{hash160, Hash160};
use std::fmt;

/// Output script template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxOutType {
    /// `<pubkey> OP_CHECKSIG`.
    PubKey,
    /// `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`.
    PubKeyHash,
    /// `OP_HASH160 <20 bytes> OP_EQUAL`.
    ScriptHash,
    /// `m <pubkeys> n OP_CHECKMULTISIG`.
    MultiSig,
    /// `OP_RETURN` followed only by pushes.
    NullData,
    /// `<condition> OP_CHECKCRYPTOCONDITION`, with or without an envelope.
    CryptoCondition,
    /// Anything else.
    NonStandard,
}

impl TxOutType {
    /// Lower case name used in reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TxOutType::PubKey => "pubkey",
            TxOutType::PubKeyHash => "pubkeyhash",
            TxOutType::ScriptHash => "scripthash",
            TxOutType::MultiSig => "multisig",
            TxOutType::NullData => "nulldata",
            TxOutType::CryptoCondition => "cryptocondition",
            TxOutType::NonStandard => "nonstandard",
        }
    }
}

impl fmt::Display for TxOutType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// DUP HASH160 <20 bytes> EQUALVERIFY CHECKSIG
#[must_use]
#[inline]
pub fn check_p2pkh(script: &[u8]) -> bool {
    script.len() == 25
        && script[0] == OP_DUP
        && script[1] == OP_HASH160
        && script[2] == OP_PUSH + 20
        && script[23] == OP_EQUALVERIFY
        && script[24] == OP_CHECKSIG
}

/// HASH160 <20 bytes> EQUAL
#[must_use]
#[inline]
pub fn check_p2sh(script: &[u8]) -> bool {
    script.len() == 23 && script[0] == OP_HASH160 && script[1] == OP_PUSH + 20 && script[22] == OP_EQUAL
}

fn is_public_key(data: &[u8]) -> bool {
    matches!(data.len(), 33 | 65)
}

/// <public key> CHECKSIG
fn p2pk_key(script: &[u8]) -> Option<&[u8]> {
    let (&last, body) = script.split_last()?;
    if last != OP_CHECKSIG {
        return None;
    }
    let mut it = Instructions::new(body);
    let key = it.next()?.ok()?.data.filter(|d| is_public_key(d))?;
    match it.next() {
        None => Some(key),
        Some(_) => None,
    }
}

/// m <keys..> n CHECKMULTISIG, with 1 <= m <= n <= 16.
fn multisig_keys(script: &[u8]) -> Option<(usize, Vec<&[u8]>)> {
    let (&last, body) = script.split_last()?;
    if last != OP_CHECKMULTISIG {
        return None;
    }
    let ops = Instructions::new(body).collect::<Result<Vec<_>, _>>().ok()?;
    let (first, rest) = ops.split_first()?;
    let (count, keys) = rest.split_last()?;
    if !is_small_int(first.opcode) || !is_small_int(count.opcode) {
        return None;
    }
    let m = small_int_value(first.opcode);
    let n = small_int_value(count.opcode);
    let keys: Vec<&[u8]> = keys.iter().map(|k| k.data.filter(|d| is_public_key(d))).collect::<Option<_>>()?;
    if m < 1 || m > n || keys.len() != n as usize {
        return None;
    }
    Some((m as usize, keys))
}

/// RETURN followed only by pushes.
fn is_null_data(script: &[u8]) -> bool {
    script.first() == Some(&OP_RETURN)
        && Instructions::new(&script[1..]).all(|i| i.is_ok_and(|i| i.is_push() || is_small_int(i.opcode)))
}

/// Matches the script against the standard templates.
#[must_use]
pub fn classify(script: &[u8]) -> TxOutType {
    if is_crypto_condition(script) {
        TxOutType::CryptoCondition
    } else if check_p2pkh(script) {
        TxOutType::PubKeyHash
    } else if check_p2sh(script) {
        TxOutType::ScriptHash
    } else if is_null_data(script) {
        TxOutType::NullData
    } else if p2pk_key(script).is_some() {
        TxOutType::PubKey
    } else if multisig_keys(script).is_some() {
        TxOutType::MultiSig
    } else {
        TxOutType::NonStandard
    }
}

/// Destinations an output pays to and how many signatures it needs.
///
/// Public keys are reported by their key hash. A crypto-condition output reports its
/// envelope's addresses and `m`. `None` for data carriers, non-standard scripts and
/// envelopes without addresses.
#[must_use]
pub fn extract_destinations(script: &[u8]) -> Option<(Vec<Destination>, usize)> {
    match classify(script) {
        TxOutType::PubKeyHash => Some((vec![Destination::KeyId(Hash160::from_slice(&script[3..23]).ok()?)], 1)),
        TxOutType::ScriptHash => Some((vec![Destination::ScriptId(Hash160::from_slice(&script[2..22]).ok()?)], 1)),
        TxOutType::PubKey => Some((vec![Destination::KeyId(hash160(p2pk_key(script)?))], 1)),
        TxOutType::MultiSig => {
            let (m, keys) = multisig_keys(script)?;
            Some((keys.into_iter().map(|k| Destination::KeyId(hash160(k))).collect(), m))
        }
        TxOutType::CryptoCondition => {
            let params = OptCcParams::from_script(script)?;
            if params.addresses.is_empty() {
                return None;
            }
            Some((params.addresses, params.m as usize))
        }
        TxOutType::NullData | TxOutType::NonStandard => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::op_codes::*;
    use crate::script::Script;
    use pretty_assertions::assert_eq;

    fn p2pkh(hash: &[u8; 20]) -> Script {
        let mut s = Script::new();
        s.append(OP_DUP);
        s.append(OP_HASH160);
        s.append(OP_PUSH + 20);
        s.append_slice(hash);
        s.append(OP_EQUALVERIFY);
        s.append(OP_CHECKSIG);
        s
    }

    #[test]
    fn p2pkh_template() {
        let mut s = p2pkh(&[7; 20]);
        assert!(check_p2pkh(&s.0));
        assert_eq!(classify(&s.0), TxOutType::PubKeyHash);
        assert_eq!(extract_destinations(&s.0), Some((vec![Destination::KeyId(Hash160([7; 20]))], 1)));
        s.append(OP_1);
        assert!(!check_p2pkh(&s.0));
        assert_eq!(classify(&s.0), TxOutType::NonStandard);
        assert_eq!(extract_destinations(&s.0), None);
    }

    #[test]
    fn p2sh_template() {
        let mut s = Script::new();
        s.append(OP_HASH160);
        s.append_data(&[9; 20]).unwrap();
        s.append(OP_EQUAL);
        assert_eq!(classify(&s.0), TxOutType::ScriptHash);
        assert_eq!(extract_destinations(&s.0), Some((vec![Destination::ScriptId(Hash160([9; 20]))], 1)));
    }

    #[test]
    fn p2pk_template() {
        let mut s = Script::new();
        s.append_data(&[2; 33]).unwrap();
        s.append(OP_CHECKSIG);
        assert_eq!(classify(&s.0), TxOutType::PubKey);
        assert_eq!(extract_destinations(&s.0), Some((vec![Destination::KeyId(hash160(&[2; 33]))], 1)));

        let mut short = Script::new();
        short.append_data(&[2; 32]).unwrap();
        short.append(OP_CHECKSIG);
        assert_eq!(classify(&short.0), TxOutType::NonStandard);
    }

    #[test]
    fn multisig_template() {
        let mut s = Script::new();
        s.append(OP_1);
        s.append_data(&[2; 33]).unwrap();
        s.append_data(&[3; 65]).unwrap();
        s.append(OP_2);
        s.append(OP_CHECKMULTISIG);
        assert_eq!(classify(&s.0), TxOutType::MultiSig);
        let (dests, m) = extract_destinations(&s.0).unwrap();
        assert_eq!(m, 1);
        assert_eq!(dests, vec![Destination::KeyId(hash160(&[2; 33])), Destination::KeyId(hash160(&[3; 65]))]);

        let mut bad = Script::new();
        bad.append(OP_3);
        bad.append_data(&[2; 33]).unwrap();
        bad.append(OP_1);
        bad.append(OP_CHECKMULTISIG);
        assert_eq!(classify(&bad.0), TxOutType::NonStandard);

        let mut zero = Script::new();
        zero.append(OP_0);
        zero.append_data(&[2; 33]).unwrap();
        zero.append(OP_1);
        zero.append(OP_CHECKMULTISIG);
        assert_eq!(classify(&zero.0), TxOutType::NonStandard);
    }

    #[test]
    fn null_data() {
        assert_eq!(classify(&[OP_RETURN]), TxOutType::NullData);
        assert_eq!(classify(&[OP_RETURN, 2, 0xab, 0xcd, OP_16]), TxOutType::NullData);
        assert_eq!(classify(&[OP_RETURN, OP_DUP]), TxOutType::NonStandard);
        assert_eq!(classify(&[OP_RETURN, 5, 1]), TxOutType::NonStandard);
        assert_eq!(extract_destinations(&[OP_RETURN, 1, 1]), None);
    }

    #[test]
    fn crypto_condition() {
        let params = OptCcParams {
            version: 2,
            eval_code: 0x0e,
            m: 1,
            n: 2,
            addresses: vec![Destination::KeyId(Hash160([1; 20])), Destination::IdentityId(Hash160([2; 20]))],
            data_blocks: vec![],
        };
        let s = params.to_script(&[0xa4; 8]).unwrap();
        assert_eq!(classify(&s.0), TxOutType::CryptoCondition);
        assert_eq!(extract_destinations(&s.0), Some((params.addresses.clone(), 1)));

        let bare = [1, 0xa4, OP_CHECKCRYPTOCONDITION];
        assert_eq!(classify(&bare), TxOutType::CryptoCondition);
        assert_eq!(extract_destinations(&bare), None);
    }

    #[test]
    fn names() {
        assert_eq!(TxOutType::CryptoCondition.to_string(), "cryptocondition");
        assert_eq!(TxOutType::PubKeyHash.name(), "pubkeyhash");
    }
}
