//! Identities: named, revocable controllers of funds.
use crate::address::{encode_destination, encode_identity, encode_sapling_address, SAPLING_ADDRESS_LEN};
use crate::cc::records::currency::MAX_NAME_LEN;
use crate::cc::records::{Payload, TransferDestination};
use crate::network::Network;
use crate::util::serdes::{read_len, read_string, read_vec, write_string, write_vec, MAX_VEC_LEN};
use crate::util::{hash160, sha256d, var_int, Hash160, Hash256, Result, Serializable};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::io;
use std::io::{Read, Write};

/// Longest valid identity name, in bytes.
pub const MAX_IDENTITY_NAME_LEN: usize = 64;

/// Id of a name under `parent`; a null parent means a root name.
///
/// The name is lower-cased first, so ids are case insensitive.
///
/// # Examples
/// ```
/// use ccscript::cc::records::identity_id;
/// use ccscript::util::Hash160;
/// assert_eq!(identity_id("VRSC", &Hash160::default()), identity_id("vrsc", &Hash160::default()));
/// ```
#[must_use]
pub fn identity_id(name: &str, parent: &Hash160) -> Hash160 {
    let name_hash = sha256d(name.to_lowercase().as_bytes());
    if parent.is_null() {
        return hash160(&name_hash.0);
    }
    let mut preimage = Vec::with_capacity(20 + 32);
    preimage.extend_from_slice(&parent.0);
    preimage.extend_from_slice(&name_hash.0);
    hash160(&sha256d(&preimage).0)
}

/// The spending rules shared by identities.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Principal version.
    pub version: u32,
    /// Identity flags.
    pub flags: u32,
    /// Addresses that may sign for the identity.
    pub primary_addresses: Vec<TransferDestination>,
    /// Signatures required from `primary_addresses`.
    pub min_sigs: i32,
}

impl Principal {
    /// First principal version.
    pub const VERSION_V1: u32 = 1;
    /// Newest principal version.
    pub const VERSION_V2: u32 = 2;

    fn json_object(&self, network: Network) -> Map<String, Value> {
        let addresses: Vec<Value> = self
            .primary_addresses
            .iter()
            .map(|a| json!(encode_destination(network, &a.to_destination())))
            .collect();
        let mut obj = Map::new();
        obj.insert("version".to_string(), json!(self.version as i32));
        obj.insert("flags".to_string(), json!(self.flags as i32));
        obj.insert("primaryaddresses".to_string(), Value::Array(addresses));
        obj.insert("minimumsignatures".to_string(), json!(self.min_sigs));
        obj
    }
}

impl Serializable<Principal> for Principal {
    fn read(reader: &mut dyn Read) -> Result<Principal> {
        Ok(Principal {
            version: u32::read(reader)?,
            flags: u32::read(reader)?,
            primary_addresses: read_vec(reader)?,
            min_sigs: i32::read(reader)?,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.version.write(writer)?;
        self.flags.write(writer)?;
        write_vec(&self.primary_addresses, writer)?;
        self.min_sigs.write(writer)
    }
}

impl Payload for Principal {
    fn is_valid(&self) -> bool {
        (Principal::VERSION_V1..=Principal::VERSION_V2).contains(&self.version)
            && self.min_sigs >= 1
            && self.min_sigs as usize <= self.primary_addresses.len()
    }

    fn to_json(&self, network: Network) -> Value {
        Value::Object(self.json_object(network))
    }
}

/// A registered identity.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Spending rules.
    pub principal: Principal,
    /// Parent identity or currency; null for a root name.
    pub parent: Hash160,
    /// Name under `parent`.
    pub name: String,
    /// Arbitrary key to hash attestations, sorted by key.
    pub content_map: BTreeMap<Hash160, Hash256>,
    /// Identity that may revoke this one.
    pub revocation_authority: Hash160,
    /// Identity that may recover this one.
    pub recovery_authority: Hash160,
    /// Sapling payment addresses; only the first is reported.
    pub private_addresses: Vec<[u8; SAPLING_ADDRESS_LEN]>,
}

impl Identity {
    /// This identity's own id.
    #[must_use]
    pub fn id(&self) -> Hash160 {
        identity_id(&self.name, &self.parent)
    }
}

impl Serializable<Identity> for Identity {
    fn read(reader: &mut dyn Read) -> Result<Identity> {
        let principal = Principal::read(reader)?;
        let parent = Hash160::read(reader)?;
        let name = read_string(reader, MAX_NAME_LEN)?;
        let n = read_len(reader, MAX_VEC_LEN)?;
        let mut content_map = BTreeMap::new();
        for _ in 0..n {
            let key = Hash160::read(reader)?;
            let value = Hash256::read(reader)?;
            content_map.entry(key).or_insert(value);
        }
        Ok(Identity {
            principal,
            parent,
            name,
            content_map,
            revocation_authority: Hash160::read(reader)?,
            recovery_authority: Hash160::read(reader)?,
            private_addresses: read_vec(reader)?,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.principal.write(writer)?;
        self.parent.write(writer)?;
        write_string(&self.name, writer)?;
        var_int::write(self.content_map.len() as u64, writer)?;
        for (key, value) in &self.content_map {
            key.write(writer)?;
            value.write(writer)?;
        }
        self.revocation_authority.write(writer)?;
        self.recovery_authority.write(writer)?;
        write_vec(&self.private_addresses, writer)
    }
}

impl Payload for Identity {
    fn is_valid(&self) -> bool {
        self.principal.is_valid()
            && (1..=MAX_IDENTITY_NAME_LEN).contains(&self.name.len())
            && self.id() != self.parent
    }

    fn to_json(&self, network: Network) -> Value {
        let mut obj = self.principal.json_object(network);
        obj.insert("identityaddress".to_string(), json!(encode_identity(network, &self.id())));
        obj.insert("parent".to_string(), json!(encode_identity(network, &self.parent)));
        obj.insert("name".to_string(), json!(self.name));
        let mut content = Map::new();
        for (key, value) in &self.content_map {
            content.insert(key.encode(), json!(value.encode()));
        }
        obj.insert("contentmap".to_string(), Value::Object(content));
        obj.insert(
            "revocationauthority".to_string(),
            json!(encode_identity(network, &self.revocation_authority)),
        );
        obj.insert("recoveryauthority".to_string(), json!(encode_identity(network, &self.recovery_authority)));
        if let Some(Ok(address)) = self.private_addresses.first().map(|a| encode_sapling_address(network, a)) {
            obj.insert("privateaddress".to_string(), json!(address));
        }
        Value::Object(obj)
    }
}

/// An identity exported to another system.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IdentityExport {
    /// Record version.
    pub version: u32,
    /// System the identity is exported to.
    pub dest_system_id: Hash160,
    /// The exported identity.
    pub identity: Identity,
}

impl IdentityExport {
    /// Only version accepted as valid.
    pub const VERSION_CURRENT: u32 = 1;
}

impl Serializable<IdentityExport> for IdentityExport {
    fn read(reader: &mut dyn Read) -> Result<IdentityExport> {
        Ok(IdentityExport {
            version: u32::read(reader)?,
            dest_system_id: Hash160::read(reader)?,
            identity: Identity::read(reader)?,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.version.write(writer)?;
        self.dest_system_id.write(writer)?;
        self.identity.write(writer)
    }
}

impl Payload for IdentityExport {
    fn is_valid(&self) -> bool {
        self.version == IdentityExport::VERSION_CURRENT && !self.dest_system_id.is_null() && self.identity.is_valid()
    }

    fn to_json(&self, network: Network) -> Value {
        json!({
            "version": self.version,
            "destsystemid": encode_identity(network, &self.dest_system_id),
            "identity": self.identity.to_json(network),
        })
    }
}
