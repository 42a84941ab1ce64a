//! Currency definitions and the running state of a (reserve) currency.
use crate::address::encode_identity;
use crate::cc::records::{identity_id, Payload};
use crate::network::Network;
use crate::util::serdes::{read_string, read_vec, write_string, write_vec};
use crate::util::{amount_to_json, Hash160, Result, Serializable, COIN};
use serde_json::{json, Map, Value};
use std::io;
use std::io::{Read, Write};

/// Longest name read from a record.
pub(crate) const MAX_NAME_LEN: u64 = 255;

/// Supply and reserves of a currency at some height.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CurrencyState {
    /// `FLAG_VALID` and `FLAG_RESERVE`.
    pub flags: u32,
    /// Reserve currencies.
    pub currencies: Vec<Hash160>,
    /// Reserve weights, parallel to `currencies`.
    pub weights: Vec<i32>,
    /// Reserve held, parallel to `currencies`.
    pub reserves: Vec<i64>,
    /// Supply at launch.
    pub initial_supply: i64,
    /// Newly emitted in this block.
    pub emitted: i64,
    /// Current supply.
    pub supply: i64,
}

impl CurrencyState {
    /// Set on every valid state.
    pub const FLAG_VALID: u32 = 1;
    /// The currency is backed by reserves.
    pub const FLAG_RESERVE: u32 = 2;

    /// Whether `FLAG_RESERVE` is set.
    #[must_use]
    pub fn is_reserve(&self) -> bool {
        self.flags & CurrencyState::FLAG_RESERVE != 0
    }

    /// Price of one unit of this currency in reserve `index`, in base units.
    ///
    /// An empty reserve prices as if it held one coin. With no supply or no weight the
    /// weight itself is returned.
    #[must_use]
    pub fn price_in_reserve(&self, index: usize) -> i64 {
        let Some(&reserve) = self.reserves.get(index) else {
            return 0;
        };
        let weight = self.weights.get(index).copied().unwrap_or(0);
        if self.supply == 0 || weight == 0 {
            return i64::from(weight);
        }
        let reserve = if reserve == 0 { COIN } else { reserve };
        let coin = i128::from(COIN);
        let price = i128::from(reserve) * coin * coin / (i128::from(self.supply) * i128::from(weight));
        i64::try_from(price).unwrap_or(i64::MAX)
    }

    fn json_object(&self, network: Network) -> Map<String, Value> {
        let mut obj = Map::new();
        obj.insert("flags".to_string(), json!(self.flags as i32));
        if self.is_valid() && self.is_reserve() {
            let reserve_currencies: Vec<Value> = self
                .currencies
                .iter()
                .enumerate()
                .map(|(i, currency)| {
                    json!({
                        "currencyid": encode_identity(network, currency),
                        "weight": amount_to_json(self.weights.get(i).copied().map_or(0, i64::from)),
                        "reserves": amount_to_json(self.reserves.get(i).copied().unwrap_or(0)),
                        "priceinreserve": amount_to_json(self.price_in_reserve(i)),
                    })
                })
                .collect();
            obj.insert("reservecurrencies".to_string(), Value::Array(reserve_currencies));
        }
        obj.insert("initialsupply".to_string(), amount_to_json(self.initial_supply));
        obj.insert("emitted".to_string(), amount_to_json(self.emitted));
        obj.insert("supply".to_string(), amount_to_json(self.supply));
        obj
    }
}

impl Serializable<CurrencyState> for CurrencyState {
    fn read(reader: &mut dyn Read) -> Result<CurrencyState> {
        Ok(CurrencyState {
            flags: u32::read(reader)?,
            currencies: read_vec(reader)?,
            weights: read_vec(reader)?,
            reserves: read_vec(reader)?,
            initial_supply: i64::read(reader)?,
            emitted: i64::read(reader)?,
            supply: i64::read(reader)?,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.flags.write(writer)?;
        write_vec(&self.currencies, writer)?;
        write_vec(&self.weights, writer)?;
        write_vec(&self.reserves, writer)?;
        self.initial_supply.write(writer)?;
        self.emitted.write(writer)?;
        self.supply.write(writer)
    }
}

impl Payload for CurrencyState {
    fn is_valid(&self) -> bool {
        self.flags & CurrencyState::FLAG_VALID != 0
    }

    fn to_json(&self, network: Network) -> Value {
        Value::Object(self.json_object(network))
    }
}

/// Currency state as published in a block, with that block's conversion totals.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoinbaseCurrencyState {
    /// The running state.
    pub state: CurrencyState,
    /// Reserve converted in, per reserve.
    pub reserve_in: Vec<i64>,
    /// Native currency converted in, per reserve.
    pub native_in: Vec<i64>,
    /// Reserve paid out, per reserve.
    pub reserve_out: Vec<i64>,
    /// Price used for conversions in this block, per reserve.
    pub conversion_price: Vec<i64>,
    /// Fees collected, per reserve.
    pub fees: Vec<i64>,
    /// Conversion fees collected, per reserve.
    pub conversion_fees: Vec<i64>,
    /// Fees collected in the native currency.
    pub native_fees: i64,
    /// Conversion fees collected in the native currency.
    pub native_conversion_fees: i64,
}

impl Serializable<CoinbaseCurrencyState> for CoinbaseCurrencyState {
    fn read(reader: &mut dyn Read) -> Result<CoinbaseCurrencyState> {
        Ok(CoinbaseCurrencyState {
            state: CurrencyState::read(reader)?,
            reserve_in: read_vec(reader)?,
            native_in: read_vec(reader)?,
            reserve_out: read_vec(reader)?,
            conversion_price: read_vec(reader)?,
            fees: read_vec(reader)?,
            conversion_fees: read_vec(reader)?,
            native_fees: i64::read(reader)?,
            native_conversion_fees: i64::read(reader)?,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.state.write(writer)?;
        write_vec(&self.reserve_in, writer)?;
        write_vec(&self.native_in, writer)?;
        write_vec(&self.reserve_out, writer)?;
        write_vec(&self.conversion_price, writer)?;
        write_vec(&self.fees, writer)?;
        write_vec(&self.conversion_fees, writer)?;
        self.native_fees.write(writer)?;
        self.native_conversion_fees.write(writer)
    }
}

impl Payload for CoinbaseCurrencyState {
    fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    fn to_json(&self, network: Network) -> Value {
        let mut obj = self.state.json_object(network);
        let columns: [(&str, &Vec<i64>); 6] = [
            ("reservein", &self.reserve_in),
            ("nativein", &self.native_in),
            ("reserveout", &self.reserve_out),
            ("lastconversionprice", &self.conversion_price),
            ("fees", &self.fees),
            ("conversionfees", &self.conversion_fees),
        ];
        let mut rows = Map::new();
        for (i, currency) in self.state.currencies.iter().enumerate() {
            let mut row = Map::new();
            for (name, column) in &columns {
                row.insert(name.to_string(), amount_to_json(column.get(i).copied().unwrap_or(0)));
            }
            rows.insert(encode_identity(network, currency), Value::Object(row));
        }
        obj.insert("currencies".to_string(), Value::Object(rows));
        obj.insert("nativefees".to_string(), json!(self.native_fees));
        obj.insert("nativeconversionfees".to_string(), json!(self.native_conversion_fees));
        Value::Object(obj)
    }
}

/// Everything needed to launch and run a currency.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CurrencyDefinition {
    /// Record version.
    pub version: u32,
    /// Currency option flags.
    pub options: u32,
    /// Parent currency; null for a root name.
    pub parent: Hash160,
    /// Name under `parent`.
    pub name: String,
    /// System the currency runs on.
    pub system_id: Hash160,
    /// How the currency is notarized.
    pub notarization_protocol: i32,
    /// How supply changes are proven.
    pub proof_protocol: i32,
    /// Cost of registering an identity.
    pub id_registration_amount: i64,
    /// Referral levels paid on identity registration.
    pub id_referral_levels: i32,
    /// Notary identities.
    pub notaries: Vec<Hash160>,
    /// Notaries required to confirm.
    pub min_notaries_confirm: i32,
    /// Blocks per notarization billing period.
    pub billing_period: i32,
    /// Reward per notarization.
    pub notarization_reward: i64,
    /// First block of the currency.
    pub start_block: u32,
    /// Last block, or 0 for no end.
    pub end_block: u32,
    /// Reserve currencies.
    pub currencies: Vec<Hash160>,
    /// Reserve weights.
    pub weights: Vec<i64>,
    /// Launch conversion prices.
    pub conversions: Vec<i64>,
    /// Minimum preconversion per reserve.
    pub min_preconvert: Vec<i64>,
    /// Maximum preconversion per reserve.
    pub max_preconvert: Vec<i64>,
    /// Share of supply preallocated.
    pub preallocation_ratio: i64,
    /// Preallocated amounts, in order; a null id pays the first block miner.
    pub preallocation: Vec<(Hash160, i64)>,
    /// Initial contributions per reserve.
    pub contributions: Vec<i64>,
    /// Amounts preconverted per reserve.
    pub preconverted: Vec<i64>,
    /// Block reward per era.
    pub rewards: Vec<i64>,
    /// Reward decay per era.
    pub rewards_decay: Vec<i64>,
    /// Halving interval per era.
    pub halving: Vec<i32>,
    /// Last block of each era.
    pub era_end: Vec<i32>,
}

impl CurrencyDefinition {
    /// Only version accepted as valid.
    pub const VERSION_CURRENT: u32 = 1;

    /// Id of this currency, derived from its name and parent.
    #[must_use]
    pub fn currency_id(&self) -> Hash160 {
        identity_id(&self.name, &self.parent)
    }
}

impl Serializable<CurrencyDefinition> for CurrencyDefinition {
    fn read(reader: &mut dyn Read) -> Result<CurrencyDefinition> {
        Ok(CurrencyDefinition {
            version: u32::read(reader)?,
            options: u32::read(reader)?,
            parent: Hash160::read(reader)?,
            name: read_string(reader, MAX_NAME_LEN)?,
            system_id: Hash160::read(reader)?,
            notarization_protocol: i32::read(reader)?,
            proof_protocol: i32::read(reader)?,
            id_registration_amount: i64::read(reader)?,
            id_referral_levels: i32::read(reader)?,
            notaries: read_vec(reader)?,
            min_notaries_confirm: i32::read(reader)?,
            billing_period: i32::read(reader)?,
            notarization_reward: i64::read(reader)?,
            start_block: u32::read(reader)?,
            end_block: u32::read(reader)?,
            currencies: read_vec(reader)?,
            weights: read_vec(reader)?,
            conversions: read_vec(reader)?,
            min_preconvert: read_vec(reader)?,
            max_preconvert: read_vec(reader)?,
            preallocation_ratio: i64::read(reader)?,
            preallocation: read_vec(reader)?,
            contributions: read_vec(reader)?,
            preconverted: read_vec(reader)?,
            rewards: read_vec(reader)?,
            rewards_decay: read_vec(reader)?,
            halving: read_vec(reader)?,
            era_end: read_vec(reader)?,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.version.write(writer)?;
        self.options.write(writer)?;
        self.parent.write(writer)?;
        write_string(&self.name, writer)?;
        self.system_id.write(writer)?;
        self.notarization_protocol.write(writer)?;
        self.proof_protocol.write(writer)?;
        self.id_registration_amount.write(writer)?;
        self.id_referral_levels.write(writer)?;
        write_vec(&self.notaries, writer)?;
        self.min_notaries_confirm.write(writer)?;
        self.billing_period.write(writer)?;
        self.notarization_reward.write(writer)?;
        self.start_block.write(writer)?;
        self.end_block.write(writer)?;
        write_vec(&self.currencies, writer)?;
        write_vec(&self.weights, writer)?;
        write_vec(&self.conversions, writer)?;
        write_vec(&self.min_preconvert, writer)?;
        write_vec(&self.max_preconvert, writer)?;
        self.preallocation_ratio.write(writer)?;
        write_vec(&self.preallocation, writer)?;
        write_vec(&self.contributions, writer)?;
        write_vec(&self.preconverted, writer)?;
        write_vec(&self.rewards, writer)?;
        write_vec(&self.rewards_decay, writer)?;
        write_vec(&self.halving, writer)?;
        write_vec(&self.era_end, writer)
    }
}

fn amounts(values: &[i64]) -> Value {
    Value::Array(values.iter().map(|v| amount_to_json(*v)).collect())
}

impl Payload for CurrencyDefinition {
    fn is_valid(&self) -> bool {
        self.version == CurrencyDefinition::VERSION_CURRENT && !self.name.is_empty()
    }

    fn to_json(&self, network: Network) -> Value {
        let ids = |list: &[Hash160]| -> Value {
            Value::Array(list.iter().map(|id| json!(encode_identity(network, id))).collect())
        };
        let mut obj = Map::new();
        obj.insert("name".to_string(), json!(self.name));
        obj.insert("version".to_string(), json!(self.version));
        obj.insert("options".to_string(), json!(self.options));
        obj.insert("parent".to_string(), json!(encode_identity(network, &self.parent)));
        obj.insert("systemid".to_string(), json!(encode_identity(network, &self.system_id)));
        obj.insert("currencyid".to_string(), json!(encode_identity(network, &self.currency_id())));
        obj.insert("notarizationprotocol".to_string(), json!(self.notarization_protocol));
        obj.insert("proofprotocol".to_string(), json!(self.proof_protocol));
        obj.insert("idregistrationprice".to_string(), json!(self.id_registration_amount));
        obj.insert("idreferrallevels".to_string(), json!(self.id_referral_levels));
        if !self.notaries.is_empty() {
            obj.insert("notaries".to_string(), ids(&self.notaries));
        }
        obj.insert("minnotariesconfirm".to_string(), json!(self.min_notaries_confirm));
        obj.insert("billingperiod".to_string(), json!(self.billing_period));
        obj.insert("notarizationreward".to_string(), json!(self.notarization_reward));
        obj.insert("startblock".to_string(), json!(self.start_block as i32));
        obj.insert("endblock".to_string(), json!(self.end_block as i32));
        if !self.currencies.is_empty() {
            obj.insert("currencies".to_string(), ids(&self.currencies));
        }
        for (key, values) in [
            ("weights", &self.weights),
            ("conversions", &self.conversions),
            ("minpreconversion", &self.min_preconvert),
            ("maxpreconversion", &self.max_preconvert),
        ] {
            if !values.is_empty() {
                obj.insert(key.to_string(), amounts(values));
            }
        }
        if self.preallocation_ratio != 0 {
            obj.insert("preallocationratio".to_string(), amount_to_json(self.preallocation_ratio));
        }
        if !self.preallocation.is_empty() {
            let entries = self
                .preallocation
                .iter()
                .map(|(id, amount)| {
                    let key = if id.is_null() {
                        "blockoneminer".to_string()
                    } else {
                        encode_identity(network, id)
                    };
                    let mut entry = Map::new();
                    entry.insert(key, amount_to_json(*amount));
                    Value::Object(entry)
                })
                .collect();
            obj.insert("preallocation".to_string(), Value::Array(entries));
        }
        if !self.contributions.is_empty() {
            obj.insert("initialcontributions".to_string(), amounts(&self.contributions));
        }
        if !self.preconverted.is_empty() {
            obj.insert("preconversions".to_string(), amounts(&self.preconverted));
        }
        let eras = (0..self.rewards.len())
            .map(|i| {
                json!({
                    "reward": self.rewards[i],
                    "decay": self.rewards_decay.get(i).copied().unwrap_or(0),
                    "halving": self.halving.get(i).copied().unwrap_or(0),
                    "eraend": self.era_end.get(i).copied().unwrap_or(0),
                })
            })
            .collect();
        obj.insert("eras".to_string(), Value::Array(eras));
        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reserve_state() -> CurrencyState {
        CurrencyState {
            flags: CurrencyState::FLAG_VALID | CurrencyState::FLAG_RESERVE,
            currencies: vec![Hash160([1; 20])],
            weights: vec![50_000_000],
            reserves: vec![100 * COIN],
            initial_supply: 200 * COIN,
            emitted: 0,
            supply: 200 * COIN,
        }
    }

    #[test]
    fn price() {
        let state = reserve_state();
        // 100 reserve / (200 supply * 0.5 weight) = 1.0
        assert_eq!(state.price_in_reserve(0), COIN);
        assert_eq!(state.price_in_reserve(1), 0);
        let empty = CurrencyState { reserves: vec![0], ..reserve_state() };
        assert_eq!(empty.price_in_reserve(0), COIN / 100);
        let no_supply = CurrencyState { supply: 0, ..reserve_state() };
        assert_eq!(no_supply.price_in_reserve(0), 50_000_000);
    }

    #[test]
    fn currency_state_json() -> Result<()> {
        let state = reserve_state();
        let back = CurrencyState::from_bytes(&state.to_bytes().unwrap())?;
        assert_eq!(back, state);
        assert_eq!(
            back.to_json(Network::Mainnet).to_string(),
            concat!(
                r#"{"flags":3,"reservecurrencies":[{"currencyid":"i3ZqK2F8UX8WogqohQ6dp9GCC9CVvasbyH","#,
                r#""weight":0.50000000,"reserves":100.00000000,"priceinreserve":1.00000000}],"#,
                r#""initialsupply":200.00000000,"emitted":0.00000000,"supply":200.00000000}"#
            )
        );
        let plain = CurrencyState { flags: CurrencyState::FLAG_VALID, ..state };
        assert!(plain.to_json(Network::Mainnet).get("reservecurrencies").is_none());
        assert!(!CurrencyState::default().is_valid());
        Ok(())
    }

    #[test]
    fn coinbase_state_json() -> Result<()> {
        let cbs = CoinbaseCurrencyState {
            state: reserve_state(),
            reserve_in: vec![COIN],
            native_in: vec![],
            reserve_out: vec![2],
            conversion_price: vec![COIN],
            fees: vec![3],
            conversion_fees: vec![4],
            native_fees: 10,
            native_conversion_fees: 11,
        };
        let back = CoinbaseCurrencyState::from_bytes(&cbs.to_bytes().unwrap())?;
        assert_eq!(back, cbs);
        let json = back.to_json(Network::Mainnet);
        assert_eq!(
            json["currencies"].to_string(),
            concat!(
                r#"{"i3ZqK2F8UX8WogqohQ6dp9GCC9CVvasbyH":{"reservein":1.00000000,"nativein":0.00000000,"#,
                r#""reserveout":0.00000002,"lastconversionprice":1.00000000,"fees":0.00000003,"conversionfees":0.00000004}}"#
            )
        );
        assert_eq!(json["nativefees"], 10);
        assert_eq!(json["nativeconversionfees"], 11);
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            ["flags", "reservecurrencies", "initialsupply", "emitted", "supply", "currencies", "nativefees", "nativeconversionfees"]
        );
        Ok(())
    }

    #[test]
    fn definition() -> Result<()> {
        let def = CurrencyDefinition {
            version: 1,
            name: "Test".to_string(),
            system_id: Hash160([1; 20]),
            rewards: vec![600_000_000],
            rewards_decay: vec![0],
            halving: vec![1000],
            era_end: vec![0],
            preallocation: vec![(Hash160([2; 20]), 2 * COIN), (Hash160::default(), COIN), (Hash160([2; 20]), COIN)],
            ..CurrencyDefinition::default()
        };
        let back = CurrencyDefinition::from_bytes(&def.to_bytes().unwrap())?;
        assert_eq!(back, def);
        assert!(back.is_valid());
        let json = back.to_json(Network::Mainnet);
        assert_eq!(json["name"], "Test");
        assert_eq!(json["currencyid"], crate::address::encode_identity(Network::Mainnet, &identity_id("test", &Hash160::default())));
        assert!(json.get("notaries").is_none());
        assert!(json.get("weights").is_none());
        assert!(json.get("preallocationratio").is_none());
        assert_eq!(
            json["preallocation"].to_string(),
            r#"[{"i3f9By5sXdzfCATmu1DmAVm9Bq7nLEWphh":2.00000000},{"blockoneminer":1.00000000},{"i3f9By5sXdzfCATmu1DmAVm9Bq7nLEWphh":1.00000000}]"#
        );
        assert_eq!(json["eras"].to_string(), r#"[{"reward":600000000,"decay":0,"halving":1000,"eraend":0}]"#);
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys.first(), Some(&"name"));
        assert_eq!(keys.last(), Some(&"eras"));

        assert!(!CurrencyDefinition { name: String::new(), ..def.clone() }.is_valid());
        assert!(!CurrencyDefinition { version: 2, ..def }.is_valid());
        Ok(())
    }
}
