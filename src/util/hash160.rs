//! 160-bit identifiers: key hashes, script hashes, identity and currency ids.

use crate::util::{Error, Result, Serializable};
use bitcoin_hashes::{hash160 as bh_hash160, Hash as BHHash};
use std::fmt;
use std::io;
use std::io::{Read, Write};

/// A 20-byte identifier, usually RIPEMD160(SHA256(data)).
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash160(pub [u8; 20]);

/// Computes Hash160 (RIPEMD160(SHA256(data))).
#[must_use]
#[inline]
pub fn hash160(data: &[u8]) -> Hash160 {
    let h = bh_hash160::Hash::hash(data).to_byte_array();
    Hash160(h)
}

impl Hash160 {
    /// Whether every byte is zero.
    #[must_use]
    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Converts the id into a hex string, interpreted as a little-endian number.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut r = self.0;
        r.reverse();
        hex::encode(r)
    }

    /// Builds an id from exactly 20 bytes.
    ///
    /// # Errors
    /// `Error::BadArgument` for any other length.
    pub fn from_slice(bytes: &[u8]) -> Result<Hash160> {
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| Error::BadArgument(format!("Length {} of id bytes", bytes.len())))?;
        Ok(Hash160(arr))
    }
}

impl From<[u8; 20]> for Hash160 {
    fn from(bytes: [u8; 20]) -> Self {
        Hash160(bytes)
    }
}

impl Serializable<Hash160> for Hash160 {
    fn read(reader: &mut dyn Read) -> Result<Hash160> {
        let mut bytes = [0; 20];
        reader.read_exact(&mut bytes).map_err(|e| Error::IOError(e))?;
        Ok(Hash160(bytes))
    }
    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_all(&self.0)
    }
}

impl fmt::Debug for Hash160 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;

    #[test]
    fn tohash160() {
        let pubkey = hex!("126999eabe3f84a3a9f5c09e87faab27484818a0ec1d67b94c9a02e40268499d98538cf770198550adfb9d1d473e5e926bb00e4c58baec1fb42ffa6069781003e4");
        let expected = hex!("3c231b5e624a42e99a87160c6e4231718a6d77c0");
        assert_eq!(hash160(&pubkey).0, expected);
    }

    #[test]
    fn encode_reversed() {
        let mut bytes = [0u8; 20];
        bytes[0] = 0x01;
        bytes[19] = 0xab;
        assert_eq!(Hash160(bytes).encode(), "ab00000000000000000000000000000000000001");
    }

    #[test]
    fn null_and_slice() {
        assert!(Hash160::default().is_null());
        assert!(!Hash160([1; 20]).is_null());
        assert_eq!(Hash160::from_slice(&[7; 20]).unwrap(), Hash160([7; 20]));
        assert_eq!(
            Hash160::from_slice(&[7; 19]).unwrap_err().to_string(),
            "Bad argument: Length 19 of id bytes"
        );
    }
}
