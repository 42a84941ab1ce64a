use crate::cc::records::Payload;
use crate::network::Network;
use crate::util::{Result, Serializable};
use serde_json::{json, Value};
use std::io;
use std::io::{Read, Write};

/// Reward paid to a service provider once per billing period.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ServiceReward {
    /// Kind of service rewarded.
    pub service_type: u16,
    /// Blocks per billing period.
    pub billing_period: i32,
}

impl Serializable<ServiceReward> for ServiceReward {
    fn read(reader: &mut dyn Read) -> Result<ServiceReward> {
        Ok(ServiceReward { service_type: u16::read(reader)?, billing_period: i32::read(reader)? })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.service_type.write(writer)?;
        self.billing_period.write(writer)
    }
}

impl Payload for ServiceReward {
    fn is_valid(&self) -> bool {
        self.service_type != 0
    }

    fn to_json(&self, _network: Network) -> Value {
        json!({
            "servicetype": self.service_type,
            "billingperiod": self.billing_period,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn read_and_json() -> Result<()> {
        let reward = ServiceReward::from_bytes(&[1, 0, 0xa0, 0x05, 0, 0])?;
        assert_eq!(reward, ServiceReward { service_type: 1, billing_period: 1440 });
        assert!(reward.is_valid());
        assert_eq!(reward.to_json(Network::Testnet).to_string(), r#"{"servicetype":1,"billingperiod":1440}"#);
        assert!(!ServiceReward::default().is_valid());
        assert!(ServiceReward::from_bytes(&[1, 0, 0]).is_err());
        Ok(())
    }
}
