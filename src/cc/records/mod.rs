//! Typed payloads carried in an envelope's first data block.
//!
//! Every record reads itself with [`Serializable`], checks itself with
//! [`Payload::is_valid`] and renders itself as JSON for a given network.

use crate::network::Network;
use crate::util::{Result, Serializable};
use serde_json::Value;
use std::io::Cursor;

mod crosschain;
mod currency;
mod destination;
mod identity;
mod notarization;
mod service;
mod token;
mod value_map;

pub use self::crosschain::{CrossChainExport, CrossChainImport};
pub use self::currency::{CoinbaseCurrencyState, CurrencyDefinition, CurrencyState};
pub use self::destination::TransferDestination;
pub use self::identity::{identity_id, Identity, IdentityExport, Principal};
pub use self::notarization::{NodeData, Notarization, NotarizationFinalization};
pub use self::service::ServiceReward;
pub use self::token::{ReserveExchange, ReserveTransfer, TokenOutput};
pub use self::value_map::CurrencyValueMap;

/// A record that can be pulled out of a data block.
pub trait Payload: Serializable<Self> + Sized {
    /// Whether the decoded fields describe a usable record.
    fn is_valid(&self) -> bool;

    /// JSON rendering with addresses encoded for `network`.
    fn to_json(&self, network: Network) -> Value;

    /// Reads the record from the start of `bytes`; trailing bytes are ignored.
    ///
    /// # Errors
    /// Truncated or out-of-bounds data.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read(&mut Cursor::new(bytes))
    }

    /// Serialized form.
    ///
    /// # Errors
    /// Whatever the record's writer reports.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut v = Vec::new();
        self.write(&mut v)?;
        Ok(v)
    }
}
