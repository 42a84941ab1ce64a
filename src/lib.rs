#![deny(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*! # ccscript

Decoding and rendering of output and input scripts for chains that carry
crypto-condition envelopes.

Scripts are tokenized without ever reading past the end of the buffer, disassembled
to asm, matched against the standard templates, and, for crypto-condition outputs,
the envelope's typed record is decoded and rendered as JSON. Malformed input never
panics: truncated pushes end the asm with `[error]` and bad records render as
`"invalid"`.

## Usage
```rust
use ccscript::{describe_output_script, to_asm_string, Network};

let script = hex::decode("76a914000000000000000000000000000000000000000088ac").unwrap();
assert_eq!(
    to_asm_string(&script, false),
    "DUP HASH160 0000000000000000000000000000000000000000 EQUALVERIFY CHECKSIG"
);
let json = describe_output_script(&script, Network::Mainnet, true, false);
assert_eq!(json["type"], "pubkeyhash");
```

## Security
- Not a consensus implementation; nothing here executes or validates scripts.
*/

pub mod address;
pub mod cc;
pub mod describe;
pub mod network;
pub mod script;
pub mod util;

pub use crate::describe::{describe_input_script, describe_output_script};
pub use crate::network::Network;
pub use crate::script::{format_script, to_asm_string, Script};
