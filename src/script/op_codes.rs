//! Script opcodes and their canonical names.
//!
//! Opcodes `OP_NOP` through `OP_CHECKMULTISIGVERIFY` form the named range that the
//! disassembler prints without the `OP_` prefix. Everything above it prints the full
//! canonical name, or `OP_UNKNOWN`.
//!
//! # Examples
//! ```
//! use ccscript::script::op_codes::*;
//! assert_eq!(OP_CHECKCRYPTOCONDITION, 0xcc);
//! assert_eq!(op_name(OP_DUP), Some("OP_DUP"));
//! ```

// Push value
/// Pushes an empty array.
pub const OP_0: u8 = 0;
/// Same as `OP_0`.
pub const OP_FALSE: u8 = 0;
/// Offset for immediate pushes of 1..=75 bytes (`OP_PUSH + n`).
pub const OP_PUSH: u8 = 0;
/// Largest immediate push length.
pub const MAX_IMMEDIATE_PUSH: u8 = 75;
/// Next byte is the push length.
pub const OP_PUSHDATA1: u8 = 76;
/// Next two bytes (little endian) are the push length.
pub const OP_PUSHDATA2: u8 = 77;
/// Next four bytes (little endian) are the push length.
pub const OP_PUSHDATA4: u8 = 78;
/// Pushes -1.
pub const OP_1NEGATE: u8 = 79;
/// Reserved; fails when executed.
pub const OP_RESERVED: u8 = 80;
/// Pushes 1.
pub const OP_1: u8 = 81;
/// Same as `OP_1`.
pub const OP_TRUE: u8 = 81;
/// Pushes 2.
pub const OP_2: u8 = 82;
/// Pushes 3.
pub const OP_3: u8 = 83;
/// Pushes 4.
pub const OP_4: u8 = 84;
/// Pushes 5.
pub const OP_5: u8 = 85;
/// Pushes 6.
pub const OP_6: u8 = 86;
/// Pushes 7.
pub const OP_7: u8 = 87;
/// Pushes 8.
pub const OP_8: u8 = 88;
/// Pushes 9.
pub const OP_9: u8 = 89;
/// Pushes 10.
pub const OP_10: u8 = 90;
/// Pushes 11.
pub const OP_11: u8 = 91;
/// Pushes 12.
pub const OP_12: u8 = 92;
/// Pushes 13.
pub const OP_13: u8 = 93;
/// Pushes 14.
pub const OP_14: u8 = 94;
/// Pushes 15.
pub const OP_15: u8 = 95;
/// Pushes 16.
pub const OP_16: u8 = 96;

// Control
/// First opcode of the named range.
pub const OP_NOP: u8 = 97;
/// Pushes the interpreter version; disabled.
pub const OP_VER: u8 = 98;
/// Runs the following block if the top item is true.
pub const OP_IF: u8 = 99;
/// Runs the following block if the top item is false.
pub const OP_NOTIF: u8 = 100;
/// Disabled conditional.
pub const OP_VERIF: u8 = 101;
/// Disabled conditional.
pub const OP_VERNOTIF: u8 = 102;
/// Switches to the other branch of an `OP_IF`.
pub const OP_ELSE: u8 = 103;
/// Ends a conditional block.
pub const OP_ENDIF: u8 = 104;
/// Fails unless the top item is true.
pub const OP_VERIFY: u8 = 105;
/// Marks an output as provably unspendable when it leads the script.
pub const OP_RETURN: u8 = 106;

// Stack
/// Moves the top item to the alt stack.
pub const OP_TOALTSTACK: u8 = 107;
/// Moves the top alt stack item back.
pub const OP_FROMALTSTACK: u8 = 108;
/// Drops the top two items.
pub const OP_2DROP: u8 = 109;
/// Duplicates the top two items.
pub const OP_2DUP: u8 = 110;
/// Duplicates the top three items.
pub const OP_3DUP: u8 = 111;
/// Copies the third and fourth items to the top.
pub const OP_2OVER: u8 = 112;
/// Moves the fifth and sixth items to the top.
pub const OP_2ROT: u8 = 113;
/// Swaps the top two pairs.
pub const OP_2SWAP: u8 = 114;
/// Duplicates the top item if it is non-zero.
pub const OP_IFDUP: u8 = 115;
/// Pushes the stack size.
pub const OP_DEPTH: u8 = 116;
/// Drops the top item; closes the envelope of a crypto-condition output.
pub const OP_DROP: u8 = 117;
/// Duplicates the top item.
pub const OP_DUP: u8 = 118;
/// Removes the second item.
pub const OP_NIP: u8 = 119;
/// Copies the second item to the top.
pub const OP_OVER: u8 = 120;
/// Copies the nth item to the top.
pub const OP_PICK: u8 = 121;
/// Moves the nth item to the top.
pub const OP_ROLL: u8 = 122;
/// Rotates the top three items.
pub const OP_ROT: u8 = 123;
/// Swaps the top two items.
pub const OP_SWAP: u8 = 124;
/// Copies the top item below the second.
pub const OP_TUCK: u8 = 125;

// Splice
/// Concatenates two items; disabled.
pub const OP_CAT: u8 = 126;
/// Substring; disabled.
pub const OP_SUBSTR: u8 = 127;
/// Left part of an item; disabled.
pub const OP_LEFT: u8 = 128;
/// Right part of an item; disabled.
pub const OP_RIGHT: u8 = 129;
/// Pushes the length of the top item.
pub const OP_SIZE: u8 = 130;

// Bit logic
/// Bitwise not; disabled.
pub const OP_INVERT: u8 = 131;
/// Bitwise and; disabled.
pub const OP_AND: u8 = 132;
/// Bitwise or; disabled.
pub const OP_OR: u8 = 133;
/// Bitwise xor; disabled.
pub const OP_XOR: u8 = 134;
/// Pushes whether the top two items are equal.
pub const OP_EQUAL: u8 = 135;
/// `OP_EQUAL` then `OP_VERIFY`.
pub const OP_EQUALVERIFY: u8 = 136;
/// Reserved; fails when executed.
pub const OP_RESERVED1: u8 = 137;
/// Reserved; fails when executed.
pub const OP_RESERVED2: u8 = 138;

// Arithmetic
/// Adds 1.
pub const OP_1ADD: u8 = 139;
/// Subtracts 1.
pub const OP_1SUB: u8 = 140;
/// Doubles; disabled.
pub const OP_2MUL: u8 = 141;
/// Halves; disabled.
pub const OP_2DIV: u8 = 142;
/// Flips the sign.
pub const OP_NEGATE: u8 = 143;
/// Absolute value.
pub const OP_ABS: u8 = 144;
/// Pushes 1 for 0, otherwise 0.
pub const OP_NOT: u8 = 145;
/// Pushes 0 for 0, otherwise 1.
pub const OP_0NOTEQUAL: u8 = 146;
/// a + b.
pub const OP_ADD: u8 = 147;
/// a - b.
pub const OP_SUB: u8 = 148;
/// a * b; disabled.
pub const OP_MUL: u8 = 149;
/// a / b; disabled.
pub const OP_DIV: u8 = 150;
/// a % b; disabled.
pub const OP_MOD: u8 = 151;
/// Left shift; disabled.
pub const OP_LSHIFT: u8 = 152;
/// Right shift; disabled.
pub const OP_RSHIFT: u8 = 153;
/// Logical and of two numbers.
pub const OP_BOOLAND: u8 = 154;
/// Logical or of two numbers.
pub const OP_BOOLOR: u8 = 155;
/// Numeric equality.
pub const OP_NUMEQUAL: u8 = 156;
/// `OP_NUMEQUAL` then `OP_VERIFY`.
pub const OP_NUMEQUALVERIFY: u8 = 157;
/// Numeric inequality.
pub const OP_NUMNOTEQUAL: u8 = 158;
/// a < b.
pub const OP_LESSTHAN: u8 = 159;
/// a > b.
pub const OP_GREATERTHAN: u8 = 160;
/// a <= b.
pub const OP_LESSTHANOREQUAL: u8 = 161;
/// a >= b.
pub const OP_GREATERTHANOREQUAL: u8 = 162;
/// Smaller of two numbers.
pub const OP_MIN: u8 = 163;
/// Larger of two numbers.
pub const OP_MAX: u8 = 164;
/// Whether x is in `[min, max)`.
pub const OP_WITHIN: u8 = 165;

// Crypto
/// RIPEMD-160 of the top item.
pub const OP_RIPEMD160: u8 = 166;
/// SHA-1 of the top item.
pub const OP_SHA1: u8 = 167;
/// SHA-256 of the top item.
pub const OP_SHA256: u8 = 168;
/// RIPEMD-160 of SHA-256 of the top item.
pub const OP_HASH160: u8 = 169;
/// Double SHA-256 of the top item.
pub const OP_HASH256: u8 = 170;
/// Marks where signature checking starts.
pub const OP_CODESEPARATOR: u8 = 171;
/// Checks a signature against a public key.
pub const OP_CHECKSIG: u8 = 172;
/// `OP_CHECKSIG` then `OP_VERIFY`.
pub const OP_CHECKSIGVERIFY: u8 = 173;
/// Checks m of n signatures.
pub const OP_CHECKMULTISIG: u8 = 174;
/// Last opcode of the named range.
pub const OP_CHECKMULTISIGVERIFY: u8 = 175;

// Expansion
/// No operation.
pub const OP_NOP1: u8 = 176;
/// BIP-65 absolute lock time.
pub const OP_CHECKLOCKTIMEVERIFY: u8 = 177;
/// No operation, reserved for upgrades.
pub const OP_NOP3: u8 = 178;
/// No operation, reserved for upgrades.
pub const OP_NOP4: u8 = 179;
/// No operation, reserved for upgrades.
pub const OP_NOP5: u8 = 180;
/// No operation, reserved for upgrades.
pub const OP_NOP6: u8 = 181;
/// No operation, reserved for upgrades.
pub const OP_NOP7: u8 = 182;
/// No operation, reserved for upgrades.
pub const OP_NOP8: u8 = 183;
/// No operation, reserved for upgrades.
pub const OP_NOP9: u8 = 184;
/// No operation, reserved for upgrades.
pub const OP_NOP10: u8 = 185;

/// Evaluates a crypto-condition fulfillment against the preceding condition.
pub const OP_CHECKCRYPTOCONDITION: u8 = 204;

/// Matches no valid opcode.
pub const OP_INVALIDOPCODE: u8 = 255;

/// Canonical name of an opcode, with the `OP_` prefix, if it has one.
///
/// Small integers are named by value (`0`, `-1`, `1`..`16`). Pushes of 1 to 75 bytes
/// have no name.
#[must_use]
pub fn op_name(op: u8) -> Option<&'static str> {
    let name = match op {
        OP_0 => "0",
        OP_PUSHDATA1 => "OP_PUSHDATA1",
        OP_PUSHDATA2 => "OP_PUSHDATA2",
        OP_PUSHDATA4 => "OP_PUSHDATA4",
        OP_1NEGATE => "-1",
        OP_RESERVED => "OP_RESERVED",
        OP_1..=OP_16 => SMALL_INTS[(op - OP_1) as usize],
        OP_NOP..=OP_CHECKMULTISIGVERIFY => NAMED[(op - OP_NOP) as usize],
        OP_NOP1 => "OP_NOP1",
        OP_CHECKLOCKTIMEVERIFY => "OP_CHECKLOCKTIMEVERIFY",
        OP_NOP3 => "OP_NOP3",
        OP_NOP4 => "OP_NOP4",
        OP_NOP5 => "OP_NOP5",
        OP_NOP6 => "OP_NOP6",
        OP_NOP7 => "OP_NOP7",
        OP_NOP8 => "OP_NOP8",
        OP_NOP9 => "OP_NOP9",
        OP_NOP10 => "OP_NOP10",
        OP_CHECKCRYPTOCONDITION => "OP_CHECKCRYPTOCONDITION",
        OP_INVALIDOPCODE => "OP_INVALIDOPCODE",
        _ => return None,
    };
    Some(name)
}

const SMALL_INTS: [&str; 16] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16",
];

// Indexed by `op - OP_NOP`.
const NAMED: [&str; (OP_CHECKMULTISIGVERIFY - OP_NOP + 1) as usize] = [
    "OP_NOP",
    "OP_VER",
    "OP_IF",
    "OP_NOTIF",
    "OP_VERIF",
    "OP_VERNOTIF",
    "OP_ELSE",
    "OP_ENDIF",
    "OP_VERIFY",
    "OP_RETURN",
    "OP_TOALTSTACK",
    "OP_FROMALTSTACK",
    "OP_2DROP",
    "OP_2DUP",
    "OP_3DUP",
    "OP_2OVER",
    "OP_2ROT",
    "OP_2SWAP",
    "OP_IFDUP",
    "OP_DEPTH",
    "OP_DROP",
    "OP_DUP",
    "OP_NIP",
    "OP_OVER",
    "OP_PICK",
    "OP_ROLL",
    "OP_ROT",
    "OP_SWAP",
    "OP_TUCK",
    "OP_CAT",
    "OP_SUBSTR",
    "OP_LEFT",
    "OP_RIGHT",
    "OP_SIZE",
    "OP_INVERT",
    "OP_AND",
    "OP_OR",
    "OP_XOR",
    "OP_EQUAL",
    "OP_EQUALVERIFY",
    "OP_RESERVED1",
    "OP_RESERVED2",
    "OP_1ADD",
    "OP_1SUB",
    "OP_2MUL",
    "OP_2DIV",
    "OP_NEGATE",
    "OP_ABS",
    "OP_NOT",
    "OP_0NOTEQUAL",
    "OP_ADD",
    "OP_SUB",
    "OP_MUL",
    "OP_DIV",
    "OP_MOD",
    "OP_LSHIFT",
    "OP_RSHIFT",
    "OP_BOOLAND",
    "OP_BOOLOR",
    "OP_NUMEQUAL",
    "OP_NUMEQUALVERIFY",
    "OP_NUMNOTEQUAL",
    "OP_LESSTHAN",
    "OP_GREATERTHAN",
    "OP_LESSTHANOREQUAL",
    "OP_GREATERTHANOREQUAL",
    "OP_MIN",
    "OP_MAX",
    "OP_WITHIN",
    "OP_RIPEMD160",
    "OP_SHA1",
    "OP_SHA256",
    "OP_HASH160",
    "OP_HASH256",
    "OP_CODESEPARATOR",
    "OP_CHECKSIG",
    "OP_CHECKSIGVERIFY",
    "OP_CHECKMULTISIG",
    "OP_CHECKMULTISIGVERIFY",
];

/// Whether `op` lies in the named range printed without its prefix.
#[must_use]
#[inline]
pub fn is_named_op(op: u8) -> bool {
    (OP_NOP..=OP_CHECKMULTISIGVERIFY).contains(&op)
}

/// Whether `op` pushes a small integer: `OP_1NEGATE` or `OP_1`..`OP_16`.
#[must_use]
#[inline]
pub fn is_small_int(op: u8) -> bool {
    op == OP_1NEGATE || (OP_1..=OP_16).contains(&op)
}

/// Value pushed by a small-integer opcode.
#[must_use]
#[inline]
pub fn small_int_value(op: u8) -> i32 {
    i32::from(op) - i32::from(OP_1NEGATE) - 1
}
