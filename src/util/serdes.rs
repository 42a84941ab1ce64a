//! Binary serialization/deserialization trait for script payload objects.
use crate::util::{var_int, Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

/// Maximum number of items accepted in a length-prefixed vector.
pub const MAX_VEC_LEN: u64 = 10_000;

/// An object that may be serialized and deserialized.
pub trait Serializable<T> {
    /// Reads the object from serialized form.
    ///
    /// # Errors
    /// Propagates IO errors or invalid data.
    fn read(reader: &mut dyn Read) -> Result<T>
    where
        Self: Sized;
    /// Writes the object to the object to serialized form.
    ///
    /// # Errors
    /// IO errors.
    fn write(&self, writer: &mut dyn Write) -> io::Result<()>;
}

impl Serializable<u16> for u16 {
    fn read(reader: &mut dyn Read) -> Result<u16> {
        reader.read_u16::<LittleEndian>().map_err(|e| Error::IOError(e))
    }
    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_u16::<LittleEndian>(*self)
    }
}

impl Serializable<u32> for u32 {
    fn read(reader: &mut dyn Read) -> Result<u32> {
        reader.read_u32::<LittleEndian>().map_err(|e| Error::IOError(e))
    }
    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(*self)
    }
}

impl Serializable<i32> for i32 {
    fn read(reader: &mut dyn Read) -> Result<i32> {
        reader.read_i32::<LittleEndian>().map_err(|e| Error::IOError(e))
    }
    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_i32::<LittleEndian>(*self)
    }
}

impl Serializable<i64> for i64 {
    fn read(reader: &mut dyn Read) -> Result<i64> {
        reader.read_i64::<LittleEndian>().map_err(|e| Error::IOError(e))
    }
    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_i64::<LittleEndian>(*self)
    }
}

impl Serializable<[u8; 32]> for [u8; 32] {
    fn read(reader: &mut dyn Read) -> Result<[u8; 32]> {
        let mut d = [0; 32];
        reader.read_exact(&mut d).map_err(|e| Error::IOError(e))?;
        Ok(d)
    }
    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_all(self)
    }
}

impl Serializable<[u8; 43]> for [u8; 43] {
    fn read(reader: &mut dyn Read) -> Result<[u8; 43]> {
        let mut d = [0; 43];
        reader.read_exact(&mut d).map_err(|e| Error::IOError(e))?;
        Ok(d)
    }
    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_all(self)
    }
}

impl<A: Serializable<A>, B: Serializable<B>> Serializable<(A, B)> for (A, B) {
    fn read(reader: &mut dyn Read) -> Result<(A, B)> {
        Ok((A::read(reader)?, B::read(reader)?))
    }
    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.0.write(writer)?;
        self.1.write(writer)
    }
}

/// Reads a compact-size count, rejecting anything above `max`.
pub fn read_len(reader: &mut dyn Read, max: u64) -> Result<usize> {
    let n = var_int::read(reader)?;
    if n > max {
        return Err(Error::BadData(format!("Length too large: {}", n)));
    }
    Ok(n as usize)
}

/// Reads a compact-size prefixed vector of objects.
pub fn read_vec<T: Serializable<T>>(reader: &mut dyn Read) -> Result<Vec<T>> {
    let n = read_len(reader, MAX_VEC_LEN)?;
    let mut items = Vec::with_capacity(n);
    for _ in 0..n {
        items.push(T::read(reader)?);
    }
    Ok(items)
}

/// Writes a compact-size prefixed vector of objects.
pub fn write_vec<T: Serializable<T>>(items: &[T], writer: &mut dyn Write) -> io::Result<()> {
    var_int::write(items.len() as u64, writer)?;
    for item in items {
        item.write(writer)?;
    }
    Ok(())
}

/// Reads compact-size prefixed raw bytes of at most `max_len` bytes.
pub fn read_bytes(reader: &mut dyn Read, max_len: u64) -> Result<Vec<u8>> {
    let len = read_len(reader, max_len)?;
    let mut bytes = vec![0; len];
    reader.read_exact(&mut bytes).map_err(|e| Error::IOError(e))?;
    Ok(bytes)
}

/// Writes compact-size prefixed raw bytes.
pub fn write_bytes(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    var_int::write(bytes.len() as u64, writer)?;
    writer.write_all(bytes)
}

/// Reads a compact-size prefixed UTF-8 string of at most `max_len` bytes.
pub fn read_string(reader: &mut dyn Read, max_len: u64) -> Result<String> {
    let bytes = read_bytes(reader, max_len)?;
    Ok(String::from_utf8(bytes)?)
}

/// Writes a compact-size prefixed UTF-8 string.
pub fn write_string(s: &str, writer: &mut dyn Write) -> io::Result<()> {
    write_bytes(s.as_bytes(), writer)
}
