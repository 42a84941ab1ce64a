//! Crypto-condition envelopes and the records they carry.

mod dispatch;
pub mod eval;
pub mod params;
pub mod records;

pub use self::dispatch::{decode, record_key, Record};
pub use self::eval::EvalCode;
pub use self::params::{is_crypto_condition, OptCcParams};
