//! 256-bit hashes for roots, notarization links and packed power values.
//!
//! Bytes are kept in serialization order and displayed reversed.

use crate::util::{Error, Result, Serializable};
use bitcoin_hashes::{sha256d as bh_sha256d, Hash as BHHash};
use std::fmt;
use std::io;
use std::io::{Read, Write};
/// 256-bit hash.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash256(pub [u8; 32]);
impl Hash256 {
    /// Converts the hash into a hex string.
    #[must_use]
    #[inline]
    pub fn encode(&self) -> String {
        let mut r = self.0;
        r.reverse();
        hex::encode(r)
    }
    /// Converts a string of 64 hex characters into a hash.
    ///
    /// # Errors
    /// Bad hex or a length other than 32 bytes.
    pub fn decode(s: &str) -> Result<Hash256> {
        let decoded_bytes = hex::decode(s)?;
        if decoded_bytes.len() != 32 {
            return Err(Error::BadArgument(format!("Length {} of decoded bytes", decoded_bytes.len())));
        }
        let mut hash_bytes = [0; 32];
        hash_bytes.copy_from_slice(&decoded_bytes);
        hash_bytes.reverse();
        Ok(Hash256(hash_bytes))
    }
    /// Whether every byte is zero.
    #[must_use]
    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
    /// Lower 128 bits of the little-endian number.
    #[must_use]
    pub fn low_u128(&self) -> u128 {
        let mut low = [0u8; 16];
        low.copy_from_slice(&self.0[..16]);
        u128::from_le_bytes(low)
    }
    /// Upper 128 bits of the little-endian number.
    #[must_use]
    pub fn high_u128(&self) -> u128 {
        let mut high = [0u8; 16];
        high.copy_from_slice(&self.0[16..]);
        u128::from_le_bytes(high)
    }
}
impl Serializable<Hash256> for Hash256 {
    fn read(reader: &mut dyn Read) -> Result<Hash256> {
        let mut bytes = [0; 32];
        reader.read_exact(&mut bytes).map_err(|e| Error::IOError(e))?;
        Ok(Hash256(bytes))
    }
    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_all(&self.0)
    }
}
/// Hashes a data array twice using SHA256.
#[must_use]
#[inline]
pub fn sha256d(data: &[u8]) -> Hash256 {
    let h = bh_sha256d::Hash::hash(data).to_byte_array();
    Hash256(h)
}
impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    #[test]
    fn sha256d_test() {
        let x = hex::decode("0123456789abcdef").unwrap();
        let e = hex::encode(sha256d(&x).0);
        assert_eq!(e, "137ad663f79da06e282ed0abbec4d70523ced5ff8e39d5c2e5641d978c5925aa");
    }
    #[test]
    fn hash_decode_write_read() {
        let s1 = "00000000000000000d94f2d5c6e9e4b8e9ac3a04fd2ec5e38e3f7dfcf6c13c77";
        let h1 = Hash256::decode(s1).unwrap();
        assert_eq!(h1.encode(), s1);
        let mut v = Vec::new();
        h1.write(&mut v).unwrap();
        assert_eq!(Hash256::read(&mut Cursor::new(&v)).unwrap(), h1);
        assert!(Hash256::decode("0000").is_err());
    }
    #[test]
    fn halves() {
        let mut bytes = [0u8; 32];
        bytes[0] = 5;
        bytes[16] = 7;
        let h = Hash256(bytes);
        assert_eq!(h.low_u128(), 5);
        assert_eq!(h.high_u128(), 7);
        assert!(!h.is_null());
        assert!(Hash256::default().is_null());
    }
}
