//! Error and result types shared by the decoders.
use base58::FromBase58Error;
use hex::FromHexError;
use secp256k1::Error as Secp256k1Error;
use std::io;
use std::string::FromUtf8Error;

/// Everything that can go wrong while decoding scripts, records or addresses.
#[derive(Debug)]
pub enum Error {
    /// A caller supplied value is out of range
    BadArgument(String),
    /// Decoded bytes do not form a valid value
    BadData(String),
    /// Base58 text could not be decoded
    FromBase58Error(FromBase58Error),
    /// Hex text could not be decoded
    FromHexError(FromHexError),
    /// A record string is not UTF-8
    FromUtf8Error(FromUtf8Error),
    /// Reading a record ran out of bytes or hit a malformed length
    IOError(io::Error),
    /// A script number or push could not be interpreted
    ScriptError(String),
    /// Error in the Secp256k1 library
    Secp256k1Error(Secp256k1Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::BadArgument(s) => write!(f, "Bad argument: {}", s),
            Error::BadData(s) => write!(f, "Bad data: {}", s),
            Error::FromBase58Error(e) => write!(f, "Base58 decoding error: {:?}", e),
            Error::FromHexError(e) => write!(f, "Hex decoding error: {}", e),
            Error::FromUtf8Error(e) => write!(f, "Invalid UTF-8 in record string: {}", e),
            Error::IOError(e) => write!(f, "IO error: {}", e),
            Error::ScriptError(s) => write!(f, "Script error: {}", s),
            Error::Secp256k1Error(e) => write!(f, "Secp256k1 error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FromHexError(e) => Some(e),
            Error::FromUtf8Error(e) => Some(e),
            Error::IOError(e) => Some(e),
            Error::Secp256k1Error(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FromBase58Error> for Error {
    fn from(e: FromBase58Error) -> Self {
        Error::FromBase58Error(e)
    }
}

impl From<FromHexError> for Error {
    fn from(e: FromHexError) -> Self {
        Error::FromHexError(e)
    }
}

impl From<FromUtf8Error> for Error {
    fn from(e: FromUtf8Error) -> Self {
        Error::FromUtf8Error(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IOError(e)
    }
}

impl From<Secp256k1Error> for Error {
    fn from(e: Secp256k1Error) -> Self {
        Error::Secp256k1Error(e)
    }
}

/// Result of any fallible decode in this crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as _;

    #[test]
    fn display() {
        assert_eq!(Error::BadData("short".to_string()).to_string(), "Bad data: short");
        assert_eq!(
            Error::ScriptError("Num too long: 5 bytes".to_string()).to_string(),
            "Script error: Num too long: 5 bytes"
        );
    }

    #[test]
    fn sources() {
        let e: Error = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(e.source().is_some());
        let e: Error = String::from_utf8(vec![0xff]).unwrap_err().into();
        assert!(e.to_string().starts_with("Invalid UTF-8"));
        assert!(Error::BadArgument("x".to_string()).source().is_none());
        let e: Error = secp256k1::Error::InvalidSignature.into();
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("Secp256k1 error"));
    }
}
