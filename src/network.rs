//! Network selection for address encoding.
//!
//! The decoder itself is network agnostic; only the human-readable encodings of
//! destinations depend on these prefixes.

/// Chain the rendered addresses belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    /// Production chain.
    #[default]
    Mainnet,
    /// Public test chain.
    Testnet,
}

impl Network {
    /// Base58 version byte for public key hash addresses.
    #[must_use]
    pub fn pubkey_hash_version(&self) -> u8 {
        match self {
            Network::Mainnet => 60,
            Network::Testnet => 0x6f,
        }
    }

    /// Base58 version byte for script hash addresses.
    #[must_use]
    pub fn script_hash_version(&self) -> u8 {
        match self {
            Network::Mainnet => 85,
            Network::Testnet => 0xc4,
        }
    }

    /// Base58 version byte for identity and currency ids.
    #[must_use]
    pub fn identity_version(&self) -> u8 {
        102
    }

    /// Base58 version byte for quantum-safe key ids.
    #[must_use]
    pub fn quantum_version(&self) -> u8 {
        58
    }

    /// Bech32 human-readable part for sapling payment addresses.
    #[must_use]
    pub fn sapling_hrp(&self) -> &'static str {
        match self {
            Network::Mainnet => "zs",
            Network::Testnet => "ztestsapling",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prefixes_are_distinct() {
        for network in [Network::Mainnet, Network::Testnet] {
            let versions = [
                network.pubkey_hash_version(),
                network.script_hash_version(),
                network.identity_version(),
                network.quantum_version(),
            ];
            for (i, a) in versions.iter().enumerate() {
                for b in &versions[i + 1..] {
                    assert!(a != b);
                }
            }
        }
        assert_eq!(Network::default(), Network::Mainnet);
    }
}
