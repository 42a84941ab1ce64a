//! Batches of value leaving one system and arriving at another.
use crate::address::encode_identity;
use crate::cc::records::{CurrencyValueMap, Payload};
use crate::network::Network;
use crate::util::{Hash160, Result, Serializable};
use serde_json::{json, Value};
use std::io;
use std::io::{Read, Write};

/// Aggregate of the reserve transfers exported to `system_id`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrossChainExport {
    /// Record version.
    pub version: u32,
    /// Destination system.
    pub system_id: Hash160,
    /// Number of transfers aggregated.
    pub num_inputs: i32,
    /// Total moved per currency.
    pub total_amounts: CurrencyValueMap,
    /// Total fees per currency.
    pub total_fees: CurrencyValueMap,
}

impl CrossChainExport {
    /// Only version accepted as valid.
    pub const VERSION_CURRENT: u32 = 1;
}

impl Serializable<CrossChainExport> for CrossChainExport {
    fn read(reader: &mut dyn Read) -> Result<CrossChainExport> {
        Ok(CrossChainExport {
            version: u32::read(reader)?,
            system_id: Hash160::read(reader)?,
            num_inputs: i32::read(reader)?,
            total_amounts: CurrencyValueMap::read(reader)?,
            total_fees: CurrencyValueMap::read(reader)?,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.version.write(writer)?;
        self.system_id.write(writer)?;
        self.num_inputs.write(writer)?;
        self.total_amounts.write(writer)?;
        self.total_fees.write(writer)
    }
}

impl Payload for CrossChainExport {
    fn is_valid(&self) -> bool {
        self.version == CrossChainExport::VERSION_CURRENT && !self.system_id.is_null()
    }

    fn to_json(&self, network: Network) -> Value {
        json!({
            "version": self.version as i32,
            "systemid": encode_identity(network, &self.system_id),
            "numinputs": self.num_inputs,
            "totalamounts": self.total_amounts.to_json(network),
            "totalfees": self.total_fees.to_json(network),
        })
    }
}

/// Value imported from `system_id` and the tokens it pays out.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrossChainImport {
    /// Record version.
    pub version: u32,
    /// Source system.
    pub system_id: Hash160,
    /// Value arriving per currency.
    pub import_value: CurrencyValueMap,
    /// Value paid out per currency.
    pub total_reserve_out: CurrencyValueMap,
}

impl CrossChainImport {
    /// Only version accepted as valid.
    pub const VERSION_CURRENT: u32 = 1;
}

impl Serializable<CrossChainImport> for CrossChainImport {
    fn read(reader: &mut dyn Read) -> Result<CrossChainImport> {
        Ok(CrossChainImport {
            version: u32::read(reader)?,
            system_id: Hash160::read(reader)?,
            import_value: CurrencyValueMap::read(reader)?,
            total_reserve_out: CurrencyValueMap::read(reader)?,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.version.write(writer)?;
        self.system_id.write(writer)?;
        self.import_value.write(writer)?;
        self.total_reserve_out.write(writer)
    }
}

impl Payload for CrossChainImport {
    fn is_valid(&self) -> bool {
        self.version == CrossChainImport::VERSION_CURRENT && !self.system_id.is_null()
    }

    fn to_json(&self, network: Network) -> Value {
        json!({
            "version": self.version as i32,
            "systemid": encode_identity(network, &self.system_id),
            "valuein": self.import_value.to_json(network),
            "tokensout": self.total_reserve_out.to_json(network),
        })
    }
}
