//! Token outputs and the reserve transfer/exchange records built on them.
use crate::address::encode_identity;
use crate::cc::records::{Payload, TransferDestination};
use crate::network::Network;
use crate::util::{amount_to_json, Hash160, Result, Serializable};
use serde_json::{json, Value};
use std::io;
use std::io::{Read, Write};

/// An amount of one currency.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenOutput {
    /// Record version.
    pub version: u32,
    /// Currency of the amount; null means the native currency.
    pub currency_id: Hash160,
    /// Amount in base units.
    pub value: i64,
}

impl TokenOutput {
    /// Only version accepted as valid.
    pub const VERSION_CURRENT: u32 = 1;

    /// Current-version output of `value` in `currency_id`.
    #[must_use]
    pub fn new(currency_id: Hash160, value: i64) -> Self {
        TokenOutput { version: TokenOutput::VERSION_CURRENT, currency_id, value }
    }

    fn json_object(&self, network: Network) -> serde_json::Map<String, Value> {
        let currency = if self.currency_id.is_null() {
            "NULL".to_string()
        } else {
            encode_identity(network, &self.currency_id)
        };
        let mut obj = serde_json::Map::new();
        obj.insert("version".to_string(), json!(self.version));
        obj.insert("currencyid".to_string(), json!(currency));
        obj.insert("value".to_string(), amount_to_json(self.value));
        obj
    }
}

impl Serializable<TokenOutput> for TokenOutput {
    fn read(reader: &mut dyn Read) -> Result<TokenOutput> {
        let version = u32::read(reader)?;
        let currency_id = Hash160::read(reader)?;
        let value = i64::read(reader)?;
        Ok(TokenOutput { version, currency_id, value })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.version.write(writer)?;
        self.currency_id.write(writer)?;
        self.value.write(writer)
    }
}

impl Payload for TokenOutput {
    fn is_valid(&self) -> bool {
        self.version == TokenOutput::VERSION_CURRENT && !self.currency_id.is_null()
    }

    fn to_json(&self, network: Network) -> Value {
        Value::Object(self.json_object(network))
    }
}

/// A request to move (and optionally convert) a token to another currency or chain.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReserveTransfer {
    /// Currency and amount moved.
    pub token: TokenOutput,
    /// `ReserveTransfer::VALID` and friends.
    pub flags: u32,
    /// Fee paid for the transfer.
    pub fees: i64,
    /// Currency or system the transfer goes to.
    pub dest_currency_id: Hash160,
    /// Who receives the transfer.
    pub destination: TransferDestination,
}

impl ReserveTransfer {
    /// Set on every valid transfer.
    pub const VALID: u32 = 1;
    /// Convert to the destination currency.
    pub const CONVERT: u32 = 2;
    /// Convert before the currency launches.
    pub const PRECONVERT: u32 = 4;
    /// Pays fees rather than moving value.
    pub const FEE_OUTPUT: u32 = 8;
    /// Return to the source system.
    pub const SEND_BACK: u32 = 0x10;
    /// Mints new currency.
    pub const MINT_CURRENCY: u32 = 0x20;
    /// Pays out a preallocation.
    pub const PREALLOCATE: u32 = 0x40;
}

impl Serializable<ReserveTransfer> for ReserveTransfer {
    fn read(reader: &mut dyn Read) -> Result<ReserveTransfer> {
        let token = TokenOutput::read(reader)?;
        let flags = u32::read(reader)?;
        let fees = i64::read(reader)?;
        let dest_currency_id = Hash160::read(reader)?;
        let destination = TransferDestination::read(reader)?;
        Ok(ReserveTransfer { token, flags, fees, dest_currency_id, destination })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.token.write(writer)?;
        self.flags.write(writer)?;
        self.fees.write(writer)?;
        self.dest_currency_id.write(writer)?;
        self.destination.write(writer)
    }
}

impl Payload for ReserveTransfer {
    fn is_valid(&self) -> bool {
        self.token.is_valid()
            && self.flags & ReserveTransfer::VALID != 0
            && self.destination.dest_type != TransferDestination::DEST_INVALID
    }

    fn to_json(&self, network: Network) -> Value {
        let mut obj = self.token.json_object(network);
        let flag = |f: u32| Value::Bool(self.flags & f != 0);
        if self.flags & ReserveTransfer::PREALLOCATE != 0 {
            obj.insert("preallocation".to_string(), Value::Bool(true));
        } else if self.flags & ReserveTransfer::MINT_CURRENCY != 0 {
            obj.insert("mintedcurrency".to_string(), Value::Bool(true));
        } else {
            obj.insert("convert".to_string(), flag(ReserveTransfer::CONVERT));
            obj.insert("preconvert".to_string(), flag(ReserveTransfer::PRECONVERT));
            obj.insert("feeoutput".to_string(), flag(ReserveTransfer::FEE_OUTPUT));
            obj.insert("sendback".to_string(), flag(ReserveTransfer::SEND_BACK));
        }
        obj.insert("fees".to_string(), amount_to_json(self.fees));
        obj.insert(
            "destinationcurrencyid".to_string(),
            json!(encode_identity(network, &self.dest_currency_id)),
        );
        obj.insert("destination".to_string(), json!(self.destination.encode(network)));
        Value::Object(obj)
    }
}

/// A conversion order between a reserve currency and the native currency.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReserveExchange {
    /// Currency and amount offered.
    pub token: TokenOutput,
    /// `ReserveExchange::VALID` and friends.
    pub flags: u32,
    /// Price limit, used with `LIMIT`.
    pub limit: i64,
    /// Block height after which the order expires.
    pub valid_before: u32,
}

impl ReserveExchange {
    /// Set on every valid order.
    pub const VALID: u32 = 1;
    /// Convert native currency to the reserve.
    pub const TO_RESERVE: u32 = 2;
    /// Honor the price limit.
    pub const LIMIT: u32 = 4;
    /// Cancel if not filled in the next block.
    pub const FILL_OR_KILL: u32 = 8;
    /// Fill completely or not at all.
    pub const ALL_OR_NONE: u32 = 0x10;
    /// Send the proceeds to an output instead of back to the owner.
    pub const SEND_OUTPUT: u32 = 0x20;
}

impl Serializable<ReserveExchange> for ReserveExchange {
    fn read(reader: &mut dyn Read) -> Result<ReserveExchange> {
        let token = TokenOutput::read(reader)?;
        let flags = u32::read(reader)?;
        let limit = i64::read(reader)?;
        let valid_before = u32::read(reader)?;
        Ok(ReserveExchange { token, flags, limit, valid_before })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.token.write(writer)?;
        self.flags.write(writer)?;
        self.limit.write(writer)?;
        self.valid_before.write(writer)
    }
}

impl Payload for ReserveExchange {
    fn is_valid(&self) -> bool {
        self.token.is_valid() && self.flags & ReserveExchange::VALID != 0
    }

    fn to_json(&self, network: Network) -> Value {
        let mut obj = self.token.json_object(network);
        let has = |f: u32| self.flags & f != 0;
        obj.insert("toreserve".to_string(), Value::Bool(has(ReserveExchange::TO_RESERVE)));
        obj.insert("tonative".to_string(), Value::Bool(!has(ReserveExchange::TO_RESERVE)));
        obj.insert("limitorder".to_string(), Value::Bool(has(ReserveExchange::LIMIT)));
        if has(ReserveExchange::LIMIT) {
            obj.insert("limitprice".to_string(), amount_to_json(self.limit));
        }
        obj.insert("fillorkill".to_string(), Value::Bool(has(ReserveExchange::FILL_OR_KILL)));
        if has(ReserveExchange::FILL_OR_KILL) {
            obj.insert("validbeforeblock".to_string(), json!(self.valid_before as i32));
        }
        obj.insert("sendoutput".to_string(), Value::Bool(has(ReserveExchange::SEND_OUTPUT)));
        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VRSC: Hash160 = Hash160([1; 20]);

    #[test]
    fn token_output() -> Result<()> {
        let token = TokenOutput::new(VRSC, 250_000_000);
        let bytes = token.to_bytes().unwrap();
        assert_eq!(bytes.len(), 4 + 20 + 8);
        let back = TokenOutput::from_bytes(&bytes)?;
        assert_eq!(back, token);
        assert!(back.is_valid());
        assert_eq!(
            back.to_json(Network::Mainnet).to_string(),
            r#"{"version":1,"currencyid":"i3ZqK2F8UX8WogqohQ6dp9GCC9CVvasbyH","value":2.50000000}"#
        );
        assert!(TokenOutput::from_bytes(&bytes[..31]).is_err());

        let null = TokenOutput::new(Hash160::default(), 0);
        assert!(!null.is_valid());
        assert_eq!(null.to_json(Network::Mainnet)["currencyid"], "NULL");
        Ok(())
    }

    #[test]
    fn reserve_transfer() -> Result<()> {
        let rt = ReserveTransfer {
            token: TokenOutput::new(VRSC, 100_000_000),
            flags: ReserveTransfer::VALID | ReserveTransfer::CONVERT,
            fees: 20_000,
            dest_currency_id: Hash160([2; 20]),
            destination: TransferDestination::from_id(TransferDestination::DEST_PKH, &Hash160([0; 20])),
        };
        let back = ReserveTransfer::from_bytes(&rt.to_bytes().unwrap())?;
        assert_eq!(back, rt);
        assert!(back.is_valid());
        assert_eq!(
            back.to_json(Network::Mainnet).to_string(),
            concat!(
                r#"{"version":1,"currencyid":"i3ZqK2F8UX8WogqohQ6dp9GCC9CVvasbyH","value":1.00000000,"#,
                r#""convert":true,"preconvert":false,"feeoutput":false,"sendback":false,"fees":0.00020000,"#,
                r#""destinationcurrencyid":"i3f9By5sXdzfCATmu1DmAVm9Bq7nLEWphh","#,
                r#""destination":"R9HC5WtHbpoa51NCUAz86XLCmGTbkf45NT"}"#
            )
        );

        let mut minted = rt.clone();
        minted.flags |= ReserveTransfer::MINT_CURRENCY;
        let json = minted.to_json(Network::Mainnet);
        assert_eq!(json["mintedcurrency"], true);
        assert!(json.get("convert").is_none());

        minted.flags |= ReserveTransfer::PREALLOCATE;
        let json = minted.to_json(Network::Mainnet);
        assert_eq!(json["preallocation"], true);
        assert!(json.get("mintedcurrency").is_none());

        let mut no_flag = rt.clone();
        no_flag.flags = ReserveTransfer::CONVERT;
        assert!(!no_flag.is_valid());
        let mut no_dest = rt;
        no_dest.destination = TransferDestination::default();
        assert!(!no_dest.is_valid());
        Ok(())
    }

    #[test]
    fn reserve_exchange() -> Result<()> {
        let rex = ReserveExchange {
            token: TokenOutput::new(VRSC, 5),
            flags: ReserveExchange::VALID | ReserveExchange::TO_RESERVE | ReserveExchange::LIMIT,
            limit: 300_000_000,
            valid_before: 1000,
        };
        let back = ReserveExchange::from_bytes(&rex.to_bytes().unwrap())?;
        assert_eq!(back, rex);
        let json = back.to_json(Network::Mainnet);
        assert_eq!(json["toreserve"], true);
        assert_eq!(json["tonative"], false);
        assert_eq!(json["limitprice"].to_string(), "3.00000000");
        assert!(json.get("validbeforeblock").is_none());
        assert_eq!(json["sendoutput"], false);

        let fok = ReserveExchange { flags: ReserveExchange::VALID | ReserveExchange::FILL_OR_KILL, ..rex };
        let json = fok.to_json(Network::Mainnet);
        assert_eq!(json["validbeforeblock"], 1000);
        assert!(json.get("limitprice").is_none());
        Ok(())
    }
}
