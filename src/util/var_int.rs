//! Compact-size integers, the length prefix of every vector and string in a record.
//!
//! Values below `0xfd` take one byte; larger ones are a marker byte followed by a
//! little-endian `u16`, `u32` or `u64`. Reads reject encodings that use a wider form
//! than the value needs.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

const MARKER_U16: u8 = 0xfd;
const MARKER_U32: u8 = 0xfe;
const MARKER_U64: u8 = 0xff;

/// Encoded size of `n` in bytes.
#[must_use]
#[inline]
pub fn size(n: u64) -> usize {
    match n {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// Writes `n` in its shortest form.
pub fn write(n: u64, writer: &mut dyn Write) -> io::Result<()> {
    match size(n) {
        1 => writer.write_u8(n as u8),
        3 => {
            writer.write_u8(MARKER_U16)?;
            writer.write_u16::<LittleEndian>(n as u16)
        }
        5 => {
            writer.write_u8(MARKER_U32)?;
            writer.write_u32::<LittleEndian>(n as u32)
        }
        _ => {
            writer.write_u8(MARKER_U64)?;
            writer.write_u64::<LittleEndian>(n)
        }
    }
}

/// Reads a compact size.
///
/// # Errors
/// `UnexpectedEof` when truncated, `InvalidData` for a non-canonical encoding.
pub fn read(reader: &mut dyn Read) -> io::Result<u64> {
    let (n, width) = match reader.read_u8()? {
        MARKER_U16 => (u64::from(reader.read_u16::<LittleEndian>()?), 3),
        MARKER_U32 => (u64::from(reader.read_u32::<LittleEndian>()?), 5),
        MARKER_U64 => (reader.read_u64::<LittleEndian>()?, 9),
        small => return Ok(u64::from(small)),
    };
    if size(n) != width {
        return Err(io::Error::new(io::ErrorKind::InvalidData, format!("Non-canonical compact size {}", n)));
    }
    Ok(n)
}
