//! Typed destinations carried inside records.
use crate::address::{encode_destination, Destination};
use crate::network::Network;
use crate::util::serdes::{read_bytes, write_bytes, MAX_VEC_LEN};
use crate::util::{hash160, Error, Hash160, Result, Serializable};
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

/// A destination tagged with its kind, as serialized in transfers and principals.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransferDestination {
    /// One of the `DEST_*` kinds.
    pub dest_type: u8,
    /// Raw destination bytes, interpreted by kind.
    pub destination: Vec<u8>,
}

impl TransferDestination {
    /// No destination.
    pub const DEST_INVALID: u8 = 0;
    /// Public key.
    pub const DEST_PK: u8 = 1;
    /// Public key hash.
    pub const DEST_PKH: u8 = 2;
    /// Script hash.
    pub const DEST_SH: u8 = 3;
    /// Identity id.
    pub const DEST_ID: u8 = 4;
    /// Serialized identity.
    pub const DEST_FULLID: u8 = 5;
    /// Quantum-safe key id.
    pub const DEST_QUANTUM: u8 = 6;
    /// Unstructured bytes.
    pub const DEST_RAW: u8 = 7;

    /// Destination of kind `dest_type`.
    #[must_use]
    pub fn new(dest_type: u8, destination: Vec<u8>) -> Self {
        TransferDestination { dest_type, destination }
    }

    /// Key, script, identity or quantum id of the given kind.
    #[must_use]
    pub fn from_id(dest_type: u8, id: &Hash160) -> Self {
        TransferDestination::new(dest_type, id.0.to_vec())
    }

    /// The address this destination pays to, when it has one.
    ///
    /// Anything that is not a well formed key, hash or id comes back as
    /// [`Destination::Other`] with the raw bytes.
    #[must_use]
    pub fn to_destination(&self) -> Destination {
        let id = Hash160::from_slice(&self.destination);
        match (self.dest_type, id) {
            (Self::DEST_PK, _) if matches!(self.destination.len(), 33 | 65) => {
                Destination::KeyId(hash160(&self.destination))
            }
            (Self::DEST_PKH, Ok(id)) => Destination::KeyId(id),
            (Self::DEST_SH, Ok(id)) => Destination::ScriptId(id),
            (Self::DEST_ID, Ok(id)) => Destination::IdentityId(id),
            (Self::DEST_QUANTUM, Ok(id)) => Destination::QuantumId(id),
            _ => Destination::Other(self.destination.clone()),
        }
    }

    /// Address text for hash kinds, hex of the raw bytes for everything else.
    #[must_use]
    pub fn encode(&self, network: Network) -> String {
        match self.dest_type {
            Self::DEST_PKH | Self::DEST_SH | Self::DEST_ID | Self::DEST_QUANTUM => {
                encode_destination(network, &self.to_destination())
            }
            _ => hex::encode(&self.destination),
        }
    }
}

impl Serializable<TransferDestination> for TransferDestination {
    fn read(reader: &mut dyn Read) -> Result<TransferDestination> {
        let dest_type = reader.read_u8().map_err(|e| Error::IOError(e))?;
        let destination = read_bytes(reader, MAX_VEC_LEN)?;
        Ok(TransferDestination { dest_type, destination })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_u8(self.dest_type)?;
        write_bytes(&self.destination, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn read_write() -> Result<()> {
        let dest = TransferDestination::from_id(TransferDestination::DEST_ID, &Hash160([4; 20]));
        let mut v = Vec::new();
        dest.write(&mut v)?;
        assert_eq!(v[..2], [4, 20]);
        assert_eq!(TransferDestination::read(&mut Cursor::new(&v))?, dest);
        assert!(TransferDestination::read(&mut Cursor::new(&v[..10])).is_err());
        Ok(())
    }

    #[test]
    fn encode() {
        let pkh = TransferDestination::from_id(TransferDestination::DEST_PKH, &Hash160([0; 20]));
        assert_eq!(pkh.encode(Network::Mainnet), "R9HC5WtHbpoa51NCUAz86XLCmGTbkf45NT");
        let id = TransferDestination::from_id(TransferDestination::DEST_ID, &Hash160([2; 20]));
        assert_eq!(id.encode(Network::Mainnet), "i3f9By5sXdzfCATmu1DmAVm9Bq7nLEWphh");
        let raw = TransferDestination::new(TransferDestination::DEST_RAW, vec![0xbe, 0xef]);
        assert_eq!(raw.encode(Network::Mainnet), "beef");
        let short = TransferDestination::new(TransferDestination::DEST_PKH, vec![1, 2, 3]);
        assert_eq!(short.encode(Network::Mainnet), "010203");
    }

    #[test]
    fn public_key_hashes() {
        let pk = TransferDestination::new(TransferDestination::DEST_PK, vec![2; 33]);
        assert_eq!(pk.to_destination(), Destination::KeyId(hash160(&[2; 33])));
        let bad_pk = TransferDestination::new(TransferDestination::DEST_PK, vec![2; 20]);
        assert_eq!(bad_pk.to_destination(), Destination::Other(vec![2; 20]));
    }
}
