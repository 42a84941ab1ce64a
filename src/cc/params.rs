//! The crypto-condition output envelope.
//!
//! A crypto-condition output looks like
//! `<condition> OP_CHECKCRYPTOCONDITION <params> OP_DROP`, where `<params>` is itself a
//! small script of pushes:
//!
//! ```text
//! [version, eval_code, m, n]  address_1 .. address_n  data_block ..
//! ```

use crate::address::Destination;
use crate::script::op_codes::{is_small_int, OP_0, OP_1, OP_1NEGATE, OP_CHECKCRYPTOCONDITION, OP_DROP};
use crate::script::{Instructions, Script};
use crate::util::{hash160, Hash160, Result};

/// Envelope version with only addresses.
pub const VERSION_V1: u8 = 1;
/// First envelope version whose data blocks carry a typed record.
pub const VERSION_V2: u8 = 2;
/// Newest envelope version.
pub const VERSION_V3: u8 = 3;

/// Tag of a key hash in a 21-byte address element.
pub const ADDRESS_TYPE_PKH: u8 = 2;
/// Script hash.
pub const ADDRESS_TYPE_SH: u8 = 3;
/// Identity id.
pub const ADDRESS_TYPE_ID: u8 = 4;
/// Quantum-safe key id.
pub const ADDRESS_TYPE_QUANTUM: u8 = 6;

/// Parameters carried after `OP_CHECKCRYPTOCONDITION`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptCcParams {
    /// Envelope version, 1 to 3.
    pub version: u8,
    /// Eval code selecting the record type.
    pub eval_code: u8,
    /// Signatures required.
    pub m: u8,
    /// Number of address elements.
    pub n: u8,
    /// The `n` address elements, in order.
    pub addresses: Vec<Destination>,
    /// Pushes after the addresses; the first carries the record.
    pub data_blocks: Vec<Vec<u8>>,
}

/// Splits a crypto-condition script into its condition and optional params push.
///
/// Returns `None` unless the script opens with a non-empty push followed by
/// `OP_CHECKCRYPTOCONDITION`. The params are `Some` only for an exact
/// `<push> OP_DROP` tail.
pub(crate) fn split_condition(script: &[u8]) -> Option<(&[u8], Option<&[u8]>)> {
    let mut it = Instructions::new(script);
    let condition = it.next()?.ok()?.data.filter(|d| !d.is_empty())?;
    let check = it.next()?.ok()?;
    if check.opcode != OP_CHECKCRYPTOCONDITION {
        return None;
    }
    let params = match (it.next(), it.next(), it.next()) {
        (Some(Ok(push)), Some(Ok(drop)), None) if drop.opcode == OP_DROP => push.data,
        _ => None,
    };
    Some((condition, params))
}

/// Whether the script has the crypto-condition output shape.
#[must_use]
pub fn is_crypto_condition(script: &[u8]) -> bool {
    split_condition(script).is_some()
}

impl OptCcParams {
    /// Extracts the envelope from an output script.
    ///
    /// `None` when the script is not a crypto-condition output, has no params, or the
    /// params are malformed.
    #[must_use]
    pub fn from_script(script: &[u8]) -> Option<OptCcParams> {
        let (_, params) = split_condition(script)?;
        OptCcParams::from_params(params?)
    }

    /// Parses the params push on its own.
    #[must_use]
    pub fn from_params(params: &[u8]) -> Option<OptCcParams> {
        let mut elements = Vec::new();
        for item in Instructions::new(params) {
            let ins = item.ok()?;
            let element = match ins.data {
                Some(_) if ins.opcode == OP_0 => vec![0],
                Some(data) if !data.is_empty() => data.to_vec(),
                None if is_small_int(ins.opcode) && ins.opcode != OP_1NEGATE => vec![ins.opcode - OP_1 + 1],
                _ => return None,
            };
            elements.push(element);
        }

        let mut elements = elements.into_iter();
        let header = elements.next()?;
        let [version, eval_code, m, n] = <[u8; 4]>::try_from(header.as_slice()).ok()?;
        if !(VERSION_V1..=VERSION_V3).contains(&version) || m == 0 || m > n {
            return None;
        }
        let rest: Vec<Vec<u8>> = elements.collect();
        if rest.len() < n as usize {
            return None;
        }
        let mut rest = rest.into_iter();
        let addresses = rest.by_ref().take(n as usize).map(|a| parse_address(&a)).collect();
        let data_blocks = rest.collect();
        Some(OptCcParams { version, eval_code, m, n, addresses, data_blocks })
    }

    /// Serializes the params back into a push script.
    ///
    /// # Errors
    /// A data block too long for any push.
    pub fn as_vector(&self) -> Result<Vec<u8>> {
        let mut s = Script::new();
        push_element(&mut s, &[self.version, self.eval_code, self.m, self.n])?;
        for address in &self.addresses {
            push_element(&mut s, &address_bytes(address))?;
        }
        for block in &self.data_blocks {
            push_element(&mut s, block)?;
        }
        Ok(s.0)
    }

    /// Builds the full output script around `condition`.
    ///
    /// # Errors
    /// Oversized pushes.
    pub fn to_script(&self, condition: &[u8]) -> Result<Script> {
        let mut s = Script::new();
        s.append_data(condition)?;
        s.append(OP_CHECKCRYPTOCONDITION);
        s.append_data(&self.as_vector()?)?;
        s.append(OP_DROP);
        Ok(s)
    }
}

fn push_element(s: &mut Script, element: &[u8]) -> Result<()> {
    match element {
        [0] => s.append(OP_0),
        [k @ 1..=16] => s.append(OP_1 + k - 1),
        _ => s.append_data(element)?,
    }
    Ok(())
}

fn parse_address(bytes: &[u8]) -> Destination {
    match bytes.len() {
        20 => Destination::KeyId(to_id(bytes)),
        33 | 65 => Destination::KeyId(hash160(bytes)),
        21 => {
            let id = to_id(&bytes[1..]);
            match bytes[0] {
                ADDRESS_TYPE_PKH => Destination::KeyId(id),
                ADDRESS_TYPE_SH => Destination::ScriptId(id),
                ADDRESS_TYPE_ID => Destination::IdentityId(id),
                ADDRESS_TYPE_QUANTUM => Destination::QuantumId(id),
                _ => Destination::Other(bytes.to_vec()),
            }
        }
        _ => Destination::Other(bytes.to_vec()),
    }
}

fn to_id(bytes: &[u8]) -> Hash160 {
    let mut id = Hash160::default();
    id.0.copy_from_slice(bytes);
    id
}

fn address_bytes(address: &Destination) -> Vec<u8> {
    let typed = |t: u8, id: &Hash160| {
        let mut v = Vec::with_capacity(21);
        v.push(t);
        v.extend_from_slice(&id.0);
        v
    };
    match address {
        Destination::KeyId(id) => id.0.to_vec(),
        Destination::ScriptId(id) => typed(ADDRESS_TYPE_SH, id),
        Destination::IdentityId(id) => typed(ADDRESS_TYPE_ID, id),
        Destination::QuantumId(id) => typed(ADDRESS_TYPE_QUANTUM, id),
        Destination::Other(raw) => raw.clone(),
    }
}
