//! Currency to amount maps.
use crate::address::{decode_destination, encode_identity, Destination};
use crate::network::Network;
use crate::util::serdes::{read_len, MAX_VEC_LEN};
use crate::util::{amount_from_json, amount_to_json, var_int, Error, Hash160, Result, Serializable};
use log::debug;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io;
use std::io::{Read, Write};

/// Amounts keyed by currency id, sorted by id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CurrencyValueMap(pub BTreeMap<Hash160, i64>);

impl CurrencyValueMap {
    /// `{currency address: amount}` in id order.
    #[must_use]
    pub fn to_json(&self, network: Network) -> Value {
        let mut map = Map::new();
        for (currency, amount) in &self.0 {
            map.insert(encode_identity(network, currency), amount_to_json(*amount));
        }
        Value::Object(map)
    }

    /// Parses `{address: amount}`, where any base58 destination names the currency by its id.
    ///
    /// # Errors
    /// A non-object, an address that does not decode to a non-null id, two addresses with
    /// the same id, or an amount that does not parse.
    pub fn try_from_json(network: Network, value: &Value) -> Result<CurrencyValueMap> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::BadArgument("Currency value map must be an object".to_string()))?;
        let mut map = BTreeMap::new();
        for (address, amount) in object {
            let currency = match decode_destination(network, address)? {
                Destination::KeyId(id)
                | Destination::ScriptId(id)
                | Destination::IdentityId(id)
                | Destination::QuantumId(id) => id,
                Destination::Other(_) => Hash160::default(),
            };
            if currency.is_null() {
                return Err(Error::BadData(format!("Null currency id {}", address)));
            }
            if map.contains_key(&currency) {
                return Err(Error::BadData(format!("Duplicate currency {}", address)));
            }
            map.insert(currency, amount_from_json(amount)?);
        }
        Ok(CurrencyValueMap(map))
    }

    /// Like [`CurrencyValueMap::try_from_json`], but any rejected input gives an empty map.
    #[must_use]
    pub fn from_json(network: Network, value: &Value) -> CurrencyValueMap {
        CurrencyValueMap::try_from_json(network, value).unwrap_or_else(|e| {
            debug!("Invalid currency value map: {}", e);
            CurrencyValueMap::default()
        })
    }

    /// Whether no currency has an amount.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[(Hash160, i64); N]> for CurrencyValueMap {
    fn from(entries: [(Hash160, i64); N]) -> Self {
        CurrencyValueMap(BTreeMap::from(entries))
    }
}

impl Serializable<CurrencyValueMap> for CurrencyValueMap {
    /// The first amount read for a currency is kept; later repeats are skipped.
    fn read(reader: &mut dyn Read) -> Result<CurrencyValueMap> {
        let n = read_len(reader, MAX_VEC_LEN)?;
        let mut map = BTreeMap::new();
        for _ in 0..n {
            let currency = Hash160::read(reader)?;
            let amount = i64::read(reader)?;
            map.entry(currency).or_insert(amount);
        }
        Ok(CurrencyValueMap(map))
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        var_int::write(self.0.len() as u64, writer)?;
        for (currency, amount) in &self.0 {
            currency.write(writer)?;
            amount.write(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::COIN;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn read_write() -> Result<()> {
        let map = CurrencyValueMap::from([(Hash160([1; 20]), 5), (Hash160([2; 20]), -7)]);
        let mut v = Vec::new();
        map.write(&mut v)?;
        assert_eq!(v.len(), 1 + 2 * 28);
        assert_eq!(CurrencyValueMap::read(&mut Cursor::new(&v))?, map);
        assert!(CurrencyValueMap::read(&mut Cursor::new(&v[..30])).is_err());
        Ok(())
    }

    #[test]
    fn unsorted_and_repeated() -> Result<()> {
        let mut v = vec![3];
        for (id, amount) in [([2u8; 20], 5i64), ([1; 20], 7), ([2; 20], 9)] {
            v.extend_from_slice(&id);
            v.extend_from_slice(&amount.to_le_bytes());
        }
        let map = CurrencyValueMap::read(&mut Cursor::new(&v))?;
        assert_eq!(map, CurrencyValueMap::from([(Hash160([1; 20]), 7), (Hash160([2; 20]), 5)]));
        assert_eq!(
            map.to_json(Network::Mainnet).to_string(),
            r#"{"i3ZqK2F8UX8WogqohQ6dp9GCC9CVvasbyH":0.00000007,"i3f9By5sXdzfCATmu1DmAVm9Bq7nLEWphh":0.00000005}"#
        );
        Ok(())
    }

    #[test]
    fn json() {
        let map = CurrencyValueMap::from([(Hash160([1; 20]), 150_000_000)]);
        assert_eq!(
            map.to_json(Network::Mainnet),
            json!({"i3ZqK2F8UX8WogqohQ6dp9GCC9CVvasbyH": amount_to_json(150_000_000)})
        );
        assert_eq!(map.to_json(Network::Mainnet).to_string(), r#"{"i3ZqK2F8UX8WogqohQ6dp9GCC9CVvasbyH":1.50000000}"#);
    }

    #[test]
    fn parse_json() -> Result<()> {
        let value = json!({
            "i3f9By5sXdzfCATmu1DmAVm9Bq7nLEWphh": "2.5",
            "i3ZqK2F8UX8WogqohQ6dp9GCC9CVvasbyH": amount_to_json(1),
        });
        let map = CurrencyValueMap::try_from_json(Network::Mainnet, &value)?;
        assert_eq!(map, CurrencyValueMap::from([(Hash160([1; 20]), 1), (Hash160([2; 20]), 5 * COIN / 2)]));
        assert_eq!(CurrencyValueMap::from_json(Network::Mainnet, &map.to_json(Network::Mainnet)), map);
        Ok(())
    }

    #[test]
    fn parse_json_rejects() {
        let null_id = json!({"i3UXS5QPRQGNRDDqVnyWTnmFCTHDbzmsYk": 1});
        assert!(CurrencyValueMap::try_from_json(Network::Mainnet, &null_id).is_err());
        assert!(CurrencyValueMap::from_json(Network::Mainnet, &null_id).is_empty());

        let id = Hash160([1; 20]);
        let mut same_id = Map::new();
        same_id.insert(encode_identity(Network::Mainnet, &id), json!(1));
        same_id.insert(crate::address::encode_destination(Network::Mainnet, &Destination::KeyId(id)), json!(2));
        let same_id = Value::Object(same_id);
        assert_eq!(
            CurrencyValueMap::try_from_json(Network::Mainnet, &same_id).unwrap_err().to_string(),
            format!("Bad data: Duplicate currency {}", crate::address::encode_destination(Network::Mainnet, &Destination::KeyId(id)))
        );
        assert!(CurrencyValueMap::from_json(Network::Mainnet, &same_id).is_empty());

        assert!(CurrencyValueMap::from_json(Network::Mainnet, &json!({"i3ZqK2F8UX8WogqohQ6dp9GCC9CVvasbyH": "x"})).is_empty());
        assert!(CurrencyValueMap::from_json(Network::Mainnet, &json!({"not an address": 1})).is_empty());
        assert!(CurrencyValueMap::from_json(Network::Mainnet, &json!([1])).is_empty());
    }
}
