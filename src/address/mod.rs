//! Address handling: base58check encodings of key hashes, script hashes and
//! identities, plus bech32 sapling payment addresses.
//!
//! Every base58 payload is exactly 20 bytes (Hash160) prefixed by a network version byte.

use crate::network::Network;
use crate::util::{sha256d, Error, Hash160, Result};
use base58::{FromBase58, ToBase58};
use bech32::{Bech32, Hrp};

/// Size of a serialized sapling payment address (diversifier + transmission key).
pub const SAPLING_ADDRESS_LEN: usize = 43;

/// Where an output can be spent from, as recognized by the script decoder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Hash160 of a public key.
    KeyId(Hash160),
    /// Hash160 of a redeem script.
    ScriptId(Hash160),
    /// Identity (or currency) id.
    IdentityId(Hash160),
    /// Quantum-safe key id.
    QuantumId(Hash160),
    /// Destination kind this library does not know, kept as raw bytes.
    Other(Vec<u8>),
}

/// Encodes a base58check address from version byte and 20-byte payload.
///
/// # Errors
/// Returns `Error::BadArgument` if payload is not exactly 20 bytes.
///
/// # Examples
/// ```
/// use ccscript::address::encode_address;
/// let addr = encode_address(60, &[0u8; 20]).unwrap();
/// assert_eq!(addr, "R9HC5WtHbpoa51NCUAz86XLCmGTbkf45NT");
/// ```
pub fn encode_address(version: u8, payload: &[u8]) -> Result<String> {
    let id = Hash160::from_slice(payload)
        .map_err(|_| Error::BadArgument("Payload must be 20 bytes".to_string()))?;
    Ok(encode_id(version, &id))
}

fn encode_id(version: u8, id: &Hash160) -> String {
    let mut v = [0u8; 25];
    v[0] = version;
    v[1..21].copy_from_slice(&id.0);
    let checksum = sha256d(&v[..21]);
    v[21..25].copy_from_slice(&checksum.0[..4]);
    v.to_base58()
}

/// Decodes a base58check address into version and payload.
///
/// # Errors
/// Returns `Error::FromBase58Error` on decode failure, `Error::BadData` on invalid length/checksum.
pub fn decode_address(input: &str) -> Result<(u8, Vec<u8>)> {
    let bytes = input.from_base58().map_err(|e| Error::FromBase58Error(e))?;
    if bytes.len() != 25 {
        return Err(Error::BadData("Invalid address length".to_string()));
    }
    let checksum = sha256d(&bytes[..21]);
    if checksum.0[..4] != bytes[21..] {
        return Err(Error::BadData("Invalid checksum".to_string()));
    }
    let version = bytes[0];
    let payload = bytes[1..21].to_vec();
    Ok((version, payload))
}

/// Encodes a destination for display on `network`.
///
/// Unknown destination kinds are rendered as hex.
#[must_use]
pub fn encode_destination(network: Network, dest: &Destination) -> String {
    match dest {
        Destination::KeyId(id) => encode_id(network.pubkey_hash_version(), id),
        Destination::ScriptId(id) => encode_id(network.script_hash_version(), id),
        Destination::IdentityId(id) => encode_id(network.identity_version(), id),
        Destination::QuantumId(id) => encode_id(network.quantum_version(), id),
        Destination::Other(bytes) => hex::encode(bytes),
    }
}

/// Shorthand for rendering an identity or currency id.
#[must_use]
pub fn encode_identity(network: Network, id: &Hash160) -> String {
    encode_id(network.identity_version(), id)
}

/// Parses a base58check address of `network` back into a destination.
///
/// # Errors
/// Bad base58, bad checksum, or a version byte that `network` does not use.
pub fn decode_destination(network: Network, input: &str) -> Result<Destination> {
    let (version, payload) = decode_address(input)?;
    let id = Hash160::from_slice(&payload)?;
    if version == network.pubkey_hash_version() {
        Ok(Destination::KeyId(id))
    } else if version == network.script_hash_version() {
        Ok(Destination::ScriptId(id))
    } else if version == network.identity_version() {
        Ok(Destination::IdentityId(id))
    } else if version == network.quantum_version() {
        Ok(Destination::QuantumId(id))
    } else {
        Err(Error::BadData("Invalid address version for network".to_string()))
    }
}

/// Encodes a 43-byte sapling payment address as bech32.
///
/// # Errors
/// `Error::BadData` if the bech32 encoder rejects the input.
pub fn encode_sapling_address(network: Network, address: &[u8; SAPLING_ADDRESS_LEN]) -> Result<String> {
    let hrp = Hrp::parse(network.sapling_hrp()).map_err(|e| Error::BadData(e.to_string()))?;
    bech32::encode::<Bech32>(hrp, address).map_err(|e| Error::BadData(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_decode_pubkey_hash() -> Result<()> {
        let pubkey_hash: [u8; 20] = hex::decode("1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b")?
            .try_into()
            .map_err(|_| Error::BadData("Invalid pubkey hash".to_string()))?;
        let dest = Destination::KeyId(Hash160(pubkey_hash));
        let address = encode_destination(Network::Mainnet, &dest);
        assert_eq!(address, "RBfZSZbEfmkrFLd8oYN4rrHQrkYKy3QYUo");
        assert_eq!(decode_destination(Network::Mainnet, &address)?, dest);
        Ok(())
    }

    #[test]
    fn test_encode_kinds() {
        let zero = Hash160([0; 20]);
        assert_eq!(
            encode_destination(Network::Mainnet, &Destination::ScriptId(zero)),
            "bCjGhELVMLPUWqrN5fK6Df8sVsuBWTKAVN"
        );
        assert_eq!(encode_identity(Network::Mainnet, &zero), "i3UXS5QPRQGNRDDqVnyWTnmFCTHDbzmsYk");
        assert_eq!(
            encode_destination(Network::Mainnet, &Destination::QuantumId(zero)),
            "QLbz7JHiBTspS962RLKV8GndWFwiJNvEPz"
        );
        assert_eq!(
            encode_destination(Network::Testnet, &Destination::KeyId(zero)),
            "mfWxJ45yp2SFn7UciZyNpvDKrzbhyfKrY8"
        );
        assert_eq!(encode_destination(Network::Mainnet, &Destination::Other(vec![0xde, 0xad])), "dead");
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            decode_destination(Network::Testnet, "R9HC5WtHbpoa51NCUAz86XLCmGTbkf45NT")
                .unwrap_err()
                .to_string(),
            "Bad data: Invalid address version for network"
        );
        assert_eq!(
            decode_address("R9HC5WtHbpoa51NCUAz86XLCmGTbkf45NU").unwrap_err().to_string(),
            "Bad data: Invalid checksum"
        );
        assert!(decode_address("0OIl").is_err());
        assert_eq!(
            encode_address(60, &[0u8; 19]).unwrap_err().to_string(),
            "Bad argument: Payload must be 20 bytes"
        );
    }

    #[test]
    fn test_sapling() -> Result<()> {
        assert_eq!(
            encode_sapling_address(Network::Mainnet, &[0u8; SAPLING_ADDRESS_LEN])?,
            "zs1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqpq6d8g"
        );
        Ok(())
    }
}
