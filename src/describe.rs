//! JSON reports for output and input scripts.
//!
//! An output report lists, in order: the template `type`, the envelope record (V2 and
//! later envelopes only), `reqSigs` and `addresses` when the script pays to any,
//! then `asm` and `hex` when asked for.

use crate::address::encode_destination;
use crate::cc::params::VERSION_V2;
use crate::cc::{decode, OptCcParams};
use crate::network::Network;
use crate::script::{classify, extract_destinations, to_asm_string, Instructions};
use log::{debug, trace};
use serde_json::{json, Map, Value};

/// Describes an output script.
///
/// # Examples
/// ```
/// use ccscript::{describe_output_script, Network};
/// let script = hex::decode("76a914000000000000000000000000000000000000000088ac").unwrap();
/// let json = describe_output_script(&script, Network::Mainnet, false, false);
/// assert_eq!(json["type"], "pubkeyhash");
/// assert_eq!(json["addresses"][0], "R9HC5WtHbpoa51NCUAz86XLCmGTbkf45NT");
/// ```
#[must_use]
pub fn describe_output_script(script: &[u8], network: Network, include_hex: bool, include_asm: bool) -> Value {
    if let Some(Err(malformed)) = Instructions::new(script).find(Result::is_err) {
        debug!("Describing malformed script: {malformed}");
    }

    let mut out = Map::new();
    out.insert("type".to_string(), json!(classify(script).name()));

    if let Some(params) = OptCcParams::from_script(script) {
        if params.version >= VERSION_V2 {
            let record = decode(params.eval_code, &params.data_blocks);
            trace!("Envelope eval code {:#04x} decoded as {}", params.eval_code, record.key());
            out.insert(record.key().to_string(), record.to_json(network));
        } else {
            debug!("Envelope version {} carries no record", params.version);
        }
    }

    if let Some((destinations, required)) = extract_destinations(script) {
        let addresses: Vec<Value> = destinations.iter().map(|d| json!(encode_destination(network, d))).collect();
        out.insert("reqSigs".to_string(), json!(required));
        out.insert("addresses".to_string(), Value::Array(addresses));
    }

    if include_asm {
        out.insert("asm".to_string(), json!(to_asm_string(script, false)));
    }
    if include_hex {
        out.insert("hex".to_string(), json!(hex::encode(script)));
    }
    Value::Object(out)
}

/// Describes an input script, labelling signature hash types in the asm.
#[must_use]
pub fn describe_input_script(script: &[u8]) -> Value {
    json!({
        "asm": to_asm_string(script, true),
        "hex": hex::encode(script),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Destination;
    use crate::cc::records::{Payload, TokenOutput};
    use crate::script::op_codes::*;
    use crate::util::Hash160;
    use pretty_assertions::assert_eq;

    fn keys(json: &Value) -> Vec<String> {
        json.as_object().unwrap().keys().cloned().collect()
    }

    fn envelope(version: u8, eval_code: u8, data_blocks: Vec<Vec<u8>>) -> Vec<u8> {
        OptCcParams {
            version,
            eval_code,
            m: 1,
            n: 1,
            addresses: vec![Destination::KeyId(Hash160([0; 20]))],
            data_blocks,
        }
        .to_script(&[0xa4, 0x01, 0x00])
        .unwrap()
        .0
    }

    #[test]
    fn field_order() {
        let token = TokenOutput::new(Hash160([1; 20]), 100_000_000);
        let script = envelope(2, 0x09, vec![token.to_bytes().unwrap()]);
        let json = describe_output_script(&script, Network::Mainnet, true, true);
        assert_eq!(keys(&json), ["type", "reserveoutput", "reqSigs", "addresses", "asm", "hex"]);
        assert_eq!(json["type"], "cryptocondition");
        assert_eq!(json["reserveoutput"]["value"].to_string(), "1.00000000");
        assert_eq!(json["reqSigs"], 1);
        assert_eq!(json["addresses"][0], "R9HC5WtHbpoa51NCUAz86XLCmGTbkf45NT");
        assert_eq!(json["hex"], hex::encode(&script));
    }

    #[test]
    fn records() {
        let json = describe_output_script(&envelope(2, 0x09, vec![]), Network::Mainnet, false, false);
        assert_eq!(json["reserveoutput"], "invalid");
        let json = describe_output_script(&envelope(3, 0x13, vec![]), Network::Mainnet, false, false);
        assert_eq!(json["unknown"], "");
        let json = describe_output_script(&envelope(2, 0x0f, vec![]), Network::Mainnet, false, false);
        assert_eq!(json["identityrevoke"], "");
    }

    #[test]
    fn v1_envelope_has_no_record() {
        let token = TokenOutput::new(Hash160([1; 20]), 1);
        let json = describe_output_script(&envelope(1, 0x09, vec![token.to_bytes().unwrap()]), Network::Mainnet, false, false);
        assert_eq!(keys(&json), ["type", "reqSigs", "addresses"]);
    }

    #[test]
    fn no_addresses() {
        let json = describe_output_script(&[OP_RETURN, 1, 7], Network::Mainnet, false, true);
        assert_eq!(keys(&json), ["type", "asm"]);
        assert_eq!(json["type"], "nulldata");
        assert_eq!(json["asm"], "RETURN 7");

        let json = describe_output_script(&[OP_1, 5, 1], Network::Testnet, true, true);
        assert_eq!(json["type"], "nonstandard");
        assert_eq!(json["asm"], "1 0501[error]");
        assert_eq!(json["hex"], "510501");
    }

    #[test]
    fn input_script() {
        let sig = hex::decode("300602010102010101").unwrap();
        let mut script = vec![sig.len() as u8];
        script.extend_from_slice(&sig);
        let json = describe_input_script(&script);
        assert_eq!(json["asm"], "3006020101020101[ALL]");
        assert_eq!(json["hex"], hex::encode(&script));
    }
}
