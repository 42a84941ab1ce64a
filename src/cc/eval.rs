//! Eval codes: the tag selecting how an envelope's payload is read.

use std::fmt;

/// Eval codes this library can decode.
///
/// Any other byte value is carried as a plain `u8` and reported as unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum EvalCode {
    /// Stake guard output protecting staked coins.
    StakeGuard = 0x01,
    /// Definition of a new currency or chain.
    CurrencyDefinition = 0x02,
    /// Notarization earned on this chain.
    EarnedNotarization = 0x04,
    /// Notarization accepted from another chain.
    AcceptedNotarization = 0x05,
    /// Finalization of an earlier notarization.
    FinalizeNotarization = 0x06,
    /// Running state of a currency.
    CurrencyState = 0x07,
    /// Transfer of reserve currency, possibly converting.
    ReserveTransfer = 0x08,
    /// Plain amount of some currency.
    ReserveOutput = 0x09,
    /// Conversion order.
    ReserveExchange = 0x0a,
    /// Reserve held on behalf of a currency.
    ReserveDeposit = 0x0b,
    /// Batch of transfers leaving for another system.
    CrossChainExport = 0x0c,
    /// Batch of transfers arriving from another system.
    CrossChainImport = 0x0d,
    /// Full identity definition.
    IdentityPrimary = 0x0e,
    /// Revocation authority marker.
    IdentityRevoke = 0x0f,
    /// Recovery authority marker.
    IdentityRecover = 0x10,
    /// Name commitment marker.
    IdentityCommitment = 0x11,
    /// Name reservation marker.
    IdentityReservation = 0x12,
    /// Reward for a network service.
    ServiceReward = 0x15,
    /// Identity exported to another system.
    IdentityExport = 0x16,
}

impl EvalCode {
    /// Every known code, in ascending order.
    pub const ALL: [EvalCode; 19] = [
        EvalCode::StakeGuard,
        EvalCode::CurrencyDefinition,
        EvalCode::EarnedNotarization,
        EvalCode::AcceptedNotarization,
        EvalCode::FinalizeNotarization,
        EvalCode::CurrencyState,
        EvalCode::ReserveTransfer,
        EvalCode::ReserveOutput,
        EvalCode::ReserveExchange,
        EvalCode::ReserveDeposit,
        EvalCode::CrossChainExport,
        EvalCode::CrossChainImport,
        EvalCode::IdentityPrimary,
        EvalCode::IdentityRevoke,
        EvalCode::IdentityRecover,
        EvalCode::IdentityCommitment,
        EvalCode::IdentityReservation,
        EvalCode::ServiceReward,
        EvalCode::IdentityExport,
    ];

    /// Looks up a known code.
    #[must_use]
    pub fn from_u8(code: u8) -> Option<EvalCode> {
        EvalCode::ALL.iter().copied().find(|e| *e as u8 == code)
    }

    /// The wire value.
    #[must_use]
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Upper case constant name, e.g. `EVAL_RESERVE_TRANSFER`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            EvalCode::StakeGuard => "EVAL_STAKEGUARD",
            EvalCode::CurrencyDefinition => "EVAL_CURRENCY_DEFINITION",
            EvalCode::EarnedNotarization => "EVAL_EARNEDNOTARIZATION",
            EvalCode::AcceptedNotarization => "EVAL_ACCEPTEDNOTARIZATION",
            EvalCode::FinalizeNotarization => "EVAL_FINALIZENOTARIZATION",
            EvalCode::CurrencyState => "EVAL_CURRENCYSTATE",
            EvalCode::ReserveTransfer => "EVAL_RESERVE_TRANSFER",
            EvalCode::ReserveOutput => "EVAL_RESERVE_OUTPUT",
            EvalCode::ReserveExchange => "EVAL_RESERVE_EXCHANGE",
            EvalCode::ReserveDeposit => "EVAL_RESERVE_DEPOSIT",
            EvalCode::CrossChainExport => "EVAL_CROSSCHAIN_EXPORT",
            EvalCode::CrossChainImport => "EVAL_CROSSCHAIN_IMPORT",
            EvalCode::IdentityPrimary => "EVAL_IDENTITY_PRIMARY",
            EvalCode::IdentityRevoke => "EVAL_IDENTITY_REVOKE",
            EvalCode::IdentityRecover => "EVAL_IDENTITY_RECOVER",
            EvalCode::IdentityCommitment => "EVAL_IDENTITY_COMMITMENT",
            EvalCode::IdentityReservation => "EVAL_IDENTITY_RESERVATION",
            EvalCode::ServiceReward => "EVAL_SERVICEREWARD",
            EvalCode::IdentityExport => "EVAL_IDENTITY_EXPORT",
        }
    }
}

impl TryFrom<u8> for EvalCode {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        EvalCode::from_u8(code).ok_or(code)
    }
}

impl fmt::Display for EvalCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
