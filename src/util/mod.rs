//! Miscellaneous helpers: hashes, errors, binary ser/des and amount formatting.

mod amount;
pub mod hash160;
mod hash256;
mod result;
pub mod serdes;
pub mod var_int;

pub use self::amount::{amount_from_json, amount_to_json, parse_amount, value_from_amount, COIN, MAX_MONEY};
pub use self::hash160::{hash160, Hash160};
pub use self::hash256::{sha256d, Hash256};
pub use self::result::{Error, Result};
pub use self::serdes::Serializable;
