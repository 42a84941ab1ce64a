//! Selects and runs the record decoder for an eval code.

use crate::cc::eval::EvalCode;
use crate::cc::records::{
    CoinbaseCurrencyState, CrossChainExport, CrossChainImport, CurrencyDefinition, Identity, IdentityExport,
    Notarization, NotarizationFinalization, Payload, ReserveExchange, ReserveTransfer, ServiceReward, TokenOutput,
};
use crate::network::Network;
use serde_json::Value;

/// The decoded payload of an envelope.
///
/// The variant always matches the eval code it came from, except for the
/// [`Record::Invalid`] and [`Record::Unrecognized`] markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// A currency definition.
    CurrencyDefinition(CurrencyDefinition),
    /// A service reward.
    ServiceReward(ServiceReward),
    /// A notarization earned on this chain.
    EarnedNotarization(Notarization),
    /// A notarization accepted from another chain.
    AcceptedNotarization(Notarization),
    /// A notarization finalization.
    Finalization(NotarizationFinalization),
    /// Currency state with the per-block conversion totals.
    CurrencyState(CoinbaseCurrencyState),
    /// A reserve transfer.
    ReserveTransfer(ReserveTransfer),
    /// A plain currency amount.
    ReserveOutput(TokenOutput),
    /// A conversion order.
    ReserveExchange(ReserveExchange),
    /// A reserve deposit.
    ReserveDeposit(TokenOutput),
    /// An export to another system.
    CrossChainExport(CrossChainExport),
    /// An import from another system.
    CrossChainImport(CrossChainImport),
    /// A full identity.
    IdentityPrimary(Identity),
    /// Revocation marker; the data block is not read.
    IdentityRevoke,
    /// Recovery marker.
    IdentityRecover,
    /// Name commitment marker.
    IdentityCommitment,
    /// Name reservation marker.
    IdentityReservation,
    /// Stake guard marker.
    StakeGuard,
    /// An identity export.
    IdentityExport(IdentityExport),
    /// A known eval code whose payload was missing, truncated or failed validation.
    Invalid(EvalCode),
    /// An eval code outside the known set.
    Unrecognized(u8),
}

/// Decodes the record an envelope with `eval_code` carries in its first data block.
///
/// Never fails: unknown codes give [`Record::Unrecognized`] and bad payloads give
/// [`Record::Invalid`]. Blocks after the first are not looked at.
#[must_use]
pub fn decode(eval_code: u8, data_blocks: &[Vec<u8>]) -> Record {
    let Some(code) = EvalCode::from_u8(eval_code) else {
        return Record::Unrecognized(eval_code);
    };
    let block = data_blocks.first().map(Vec::as_slice);
    let record = match code {
        EvalCode::CurrencyDefinition => read(block).map(Record::CurrencyDefinition),
        EvalCode::ServiceReward => read(block).map(Record::ServiceReward),
        EvalCode::EarnedNotarization => read(block).map(Record::EarnedNotarization),
        EvalCode::AcceptedNotarization => read(block).map(Record::AcceptedNotarization),
        EvalCode::FinalizeNotarization => read(block).map(Record::Finalization),
        EvalCode::CurrencyState => read(block).map(Record::CurrencyState),
        EvalCode::ReserveTransfer => read(block).map(Record::ReserveTransfer),
        EvalCode::ReserveOutput => read(block).map(Record::ReserveOutput),
        EvalCode::ReserveExchange => read(block).map(Record::ReserveExchange),
        EvalCode::ReserveDeposit => read(block).map(Record::ReserveDeposit),
        EvalCode::CrossChainExport => read(block).map(Record::CrossChainExport),
        EvalCode::CrossChainImport => read(block).map(Record::CrossChainImport),
        EvalCode::IdentityPrimary => read(block).map(Record::IdentityPrimary),
        EvalCode::IdentityExport => read(block).map(Record::IdentityExport),
        EvalCode::IdentityRevoke => Some(Record::IdentityRevoke),
        EvalCode::IdentityRecover => Some(Record::IdentityRecover),
        EvalCode::IdentityCommitment => Some(Record::IdentityCommitment),
        EvalCode::IdentityReservation => Some(Record::IdentityReservation),
        EvalCode::StakeGuard => Some(Record::StakeGuard),
    };
    record.unwrap_or(Record::Invalid(code))
}

fn read<T: Payload>(block: Option<&[u8]>) -> Option<T> {
    T::from_bytes(block?).ok().filter(|r| r.is_valid())
}

/// JSON key a record is reported under.
#[must_use]
pub fn record_key(code: EvalCode) -> &'static str {
    match code {
        EvalCode::CurrencyDefinition => "currencydefinition",
        EvalCode::ServiceReward => "pbaasServiceReward",
        EvalCode::EarnedNotarization | EvalCode::AcceptedNotarization => "pbaasNotarization",
        EvalCode::FinalizeNotarization => "pbaasFinalization",
        EvalCode::CurrencyState => "currencystate",
        EvalCode::ReserveTransfer => "reservetransfer",
        EvalCode::ReserveOutput => "reserveoutput",
        EvalCode::ReserveExchange => "reserveexchange",
        EvalCode::ReserveDeposit => "reservedeposit",
        EvalCode::CrossChainExport => "crosschainexport",
        EvalCode::CrossChainImport => "crosschainimport",
        EvalCode::IdentityPrimary => "identityprimary",
        EvalCode::IdentityRevoke => "identityrevoke",
        EvalCode::IdentityRecover => "identityrecover",
        EvalCode::IdentityCommitment => "identitycommitment",
        EvalCode::IdentityReservation => "identityreservation",
        EvalCode::StakeGuard => "stakeguard",
        EvalCode::IdentityExport => "identityexport",
    }
}

impl Record {
    /// The eval code that produced this record, `None` when unrecognized.
    #[must_use]
    pub fn eval_code(&self) -> Option<EvalCode> {
        Some(match self {
            Record::CurrencyDefinition(_) => EvalCode::CurrencyDefinition,
            Record::ServiceReward(_) => EvalCode::ServiceReward,
            Record::EarnedNotarization(_) => EvalCode::EarnedNotarization,
            Record::AcceptedNotarization(_) => EvalCode::AcceptedNotarization,
            Record::Finalization(_) => EvalCode::FinalizeNotarization,
            Record::CurrencyState(_) => EvalCode::CurrencyState,
            Record::ReserveTransfer(_) => EvalCode::ReserveTransfer,
            Record::ReserveOutput(_) => EvalCode::ReserveOutput,
            Record::ReserveExchange(_) => EvalCode::ReserveExchange,
            Record::ReserveDeposit(_) => EvalCode::ReserveDeposit,
            Record::CrossChainExport(_) => EvalCode::CrossChainExport,
            Record::CrossChainImport(_) => EvalCode::CrossChainImport,
            Record::IdentityPrimary(_) => EvalCode::IdentityPrimary,
            Record::IdentityRevoke => EvalCode::IdentityRevoke,
            Record::IdentityRecover => EvalCode::IdentityRecover,
            Record::IdentityCommitment => EvalCode::IdentityCommitment,
            Record::IdentityReservation => EvalCode::IdentityReservation,
            Record::StakeGuard => EvalCode::StakeGuard,
            Record::IdentityExport(_) => EvalCode::IdentityExport,
            Record::Invalid(code) => *code,
            Record::Unrecognized(_) => return None,
        })
    }

    /// Whether decoding failed for a known eval code.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Record::Invalid(_))
    }

    /// Key under which [`Record::to_json`] is reported; `unknown` when unrecognized.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.eval_code().map_or("unknown", record_key)
    }

    /// The reported value: the record's JSON, `"invalid"`, or `""` for markers.
    #[must_use]
    pub fn to_json(&self, network: Network) -> Value {
        match self {
            Record::CurrencyDefinition(r) => r.to_json(network),
            Record::ServiceReward(r) => r.to_json(network),
            Record::EarnedNotarization(r) | Record::AcceptedNotarization(r) => r.to_json(network),
            Record::Finalization(r) => r.to_json(network),
            Record::CurrencyState(r) => r.to_json(network),
            Record::ReserveTransfer(r) => r.to_json(network),
            Record::ReserveOutput(r) | Record::ReserveDeposit(r) => r.to_json(network),
            Record::ReserveExchange(r) => r.to_json(network),
            Record::CrossChainExport(r) => r.to_json(network),
            Record::CrossChainImport(r) => r.to_json(network),
            Record::IdentityPrimary(r) => r.to_json(network),
            Record::IdentityExport(r) => r.to_json(network),
            Record::Invalid(_) => Value::String("invalid".to_string()),
            Record::IdentityRevoke
            | Record::IdentityRecover
            | Record::IdentityCommitment
            | Record::IdentityReservation
            | Record::StakeGuard
            | Record::Unrecognized(_) => Value::String(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Hash160;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_blocks() {
        for code in EvalCode::ALL {
            let record = decode(code.code(), &[]);
            match code {
                EvalCode::IdentityRevoke
                | EvalCode::IdentityRecover
                | EvalCode::IdentityCommitment
                | EvalCode::IdentityReservation
                | EvalCode::StakeGuard => assert!(!record.is_invalid(), "{code}"),
                _ => assert_eq!(record, Record::Invalid(code)),
            }
            assert_eq!(record.eval_code(), Some(code));
        }
    }

    #[test]
    fn unrecognized() {
        for code in [0u8, 3, 0x13, 0x14, 0x17, 0xff] {
            assert_eq!(decode(code, &[]), Record::Unrecognized(code));
            assert_eq!(decode(code, &[vec![1, 2, 3]]), Record::Unrecognized(code));
        }
        let record = decode(0x13, &[]);
        assert_eq!(record.key(), "unknown");
        assert_eq!(record.to_json(Network::Mainnet), "");
    }

    #[test]
    fn token_records() {
        let token = TokenOutput::new(Hash160([1; 20]), 5);
        let blocks = vec![token.to_bytes().unwrap()];
        assert_eq!(decode(0x09, &blocks), Record::ReserveOutput(token.clone()));
        assert_eq!(decode(0x0b, &blocks), Record::ReserveDeposit(token.clone()));
        assert_eq!(decode(0x0b, &blocks).key(), "reservedeposit");

        let mut extra = token.to_bytes().unwrap();
        extra.extend_from_slice(&[0xde, 0xad]);
        assert_eq!(decode(0x09, &[extra]), Record::ReserveOutput(token.clone()));

        let truncated = vec![token.to_bytes().unwrap()[..10].to_vec()];
        assert_eq!(decode(0x09, &truncated), Record::Invalid(EvalCode::ReserveOutput));

        let null = vec![TokenOutput::new(Hash160::default(), 5).to_bytes().unwrap()];
        let record = decode(0x09, &null);
        assert_eq!(record, Record::Invalid(EvalCode::ReserveOutput));
        assert_eq!(record.key(), "reserveoutput");
        assert_eq!(record.to_json(Network::Mainnet), "invalid");
    }

    #[test]
    fn notarizations_share_a_key() {
        assert_eq!(Record::Invalid(EvalCode::EarnedNotarization).key(), "pbaasNotarization");
        assert_eq!(Record::Invalid(EvalCode::AcceptedNotarization).key(), "pbaasNotarization");
        assert_eq!(decode(0x06, &[vec![0, 0, 0, 0]]), Record::Finalization(NotarizationFinalization::default()));
    }

    #[test]
    fn markers() {
        let record = decode(0x0f, &[vec![0xff]]);
        assert_eq!(record, Record::IdentityRevoke);
        assert_eq!(record.key(), "identityrevoke");
        assert_eq!(record.to_json(Network::Mainnet), "");
        assert_eq!(decode(0x01, &[]).key(), "stakeguard");
    }
}
