//! Cross-chain notarizations and their finalization markers.
use crate::address::{encode_destination, encode_identity};
use crate::cc::records::currency::MAX_NAME_LEN;
use crate::cc::records::{CoinbaseCurrencyState, Payload, TransferDestination};
use crate::network::Network;
use crate::util::serdes::{read_string, read_vec, write_string, write_vec};
use crate::util::{Hash160, Hash256, Result, Serializable};
use serde_json::{json, Value};
use std::io;
use std::io::{Read, Write};

/// A notary node's network address and identity.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Host and port.
    pub network_address: String,
    /// Identity the node runs as.
    pub node_identity: Hash160,
}

impl NodeData {
    /// `{networkaddress, nodeidentity}`.
    #[must_use]
    pub fn to_json(&self, network: Network) -> Value {
        json!({
            "networkaddress": self.network_address,
            "nodeidentity": encode_identity(network, &self.node_identity),
        })
    }
}

impl Serializable<NodeData> for NodeData {
    fn read(reader: &mut dyn Read) -> Result<NodeData> {
        Ok(NodeData { network_address: read_string(reader, MAX_NAME_LEN)?, node_identity: Hash160::read(reader)? })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        write_string(&self.network_address, writer)?;
        self.node_identity.write(writer)
    }
}

/// A statement about another chain's state at some height.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Notarization {
    /// Record version.
    pub version: u32,
    /// System being notarized.
    pub system_id: Hash160,
    /// Who is paid for the notarization.
    pub notary_dest: TransferDestination,
    /// Height of the notarized block.
    pub notarization_height: u32,
    /// Merkle mountain range root at that height.
    pub mmr_root: Hash256,
    /// Hash of the notarized block header.
    pub notarization_prehash: Hash256,
    /// Accumulated work in the low 128 bits, stake in the high 128 bits.
    pub compact_power: Hash256,
    /// Currency state at that height.
    pub currency_state: CoinbaseCurrencyState,
    /// Previous notarization on this chain.
    pub prev_notarization: Hash256,
    /// Height of the previous notarization.
    pub prev_height: i32,
    /// Matching notarization on the other chain.
    pub cross_notarization: Hash256,
    /// Height of the cross notarization.
    pub cross_height: i32,
    /// Nodes offered for the other chain to connect to.
    pub nodes: Vec<NodeData>,
}

impl Notarization {
    /// Only version accepted as valid.
    pub const VERSION_CURRENT: u32 = 1;
}

impl Serializable<Notarization> for Notarization {
    fn read(reader: &mut dyn Read) -> Result<Notarization> {
        Ok(Notarization {
            version: u32::read(reader)?,
            system_id: Hash160::read(reader)?,
            notary_dest: TransferDestination::read(reader)?,
            notarization_height: u32::read(reader)?,
            mmr_root: Hash256::read(reader)?,
            notarization_prehash: Hash256::read(reader)?,
            compact_power: Hash256::read(reader)?,
            currency_state: CoinbaseCurrencyState::read(reader)?,
            prev_notarization: Hash256::read(reader)?,
            prev_height: i32::read(reader)?,
            cross_notarization: Hash256::read(reader)?,
            cross_height: i32::read(reader)?,
            nodes: read_vec(reader)?,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.version.write(writer)?;
        self.system_id.write(writer)?;
        self.notary_dest.write(writer)?;
        self.notarization_height.write(writer)?;
        self.mmr_root.write(writer)?;
        self.notarization_prehash.write(writer)?;
        self.compact_power.write(writer)?;
        self.currency_state.write(writer)?;
        self.prev_notarization.write(writer)?;
        self.prev_height.write(writer)?;
        self.cross_notarization.write(writer)?;
        self.cross_height.write(writer)?;
        write_vec(&self.nodes, writer)
    }
}

impl Payload for Notarization {
    fn is_valid(&self) -> bool {
        self.version == Notarization::VERSION_CURRENT && !self.system_id.is_null()
    }

    fn to_json(&self, network: Network) -> Value {
        let nodes: Vec<Value> = self.nodes.iter().map(|n| n.to_json(network)).collect();
        json!({
            "version": self.version as i32,
            "chainid": self.system_id.encode(),
            "notaryaddress": encode_destination(network, &self.notary_dest.to_destination()),
            "notarizationheight": self.notarization_height as i32,
            "mmrroot": self.mmr_root.encode(),
            "notarizationprehash": self.notarization_prehash.encode(),
            "work": format!("{:064x}", self.compact_power.low_u128()),
            "stake": format!("{:064x}", self.compact_power.high_u128()),
            "currencystate": self.currency_state.to_json(network),
            "prevnotarization": self.prev_notarization.encode(),
            "prevheight": self.prev_height,
            "crossnotarization": self.cross_notarization.encode(),
            "crossheight": self.cross_height,
            "nodes": nodes,
        })
    }
}

/// Marks a notarization as confirmed by spending it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NotarizationFinalization {
    /// Input that spends the confirmed notarization.
    pub confirmed_input: i32,
}

impl Serializable<NotarizationFinalization> for NotarizationFinalization {
    fn read(reader: &mut dyn Read) -> Result<NotarizationFinalization> {
        Ok(NotarizationFinalization { confirmed_input: i32::read(reader)? })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.confirmed_input.write(writer)
    }
}

impl Payload for NotarizationFinalization {
    fn is_valid(&self) -> bool {
        true
    }

    fn to_json(&self, _network: Network) -> Value {
        json!({ "confirmedinput": self.confirmed_input })
    }
}
