//! Helper functions for reading binary data

use std::io::{Cursor, Read};

use karel_world::Quantity;

use crate::error::KbiError;
use crate::words::WordWidth;

/// Read exactly `N` bytes
fn read_bytes<const N: usize>(cursor: &mut Cursor<&[u8]>) -> Result<[u8; N], KbiError> {
    let mut buf = [0u8; N];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| KbiError::UnexpectedEof)?;
    Ok(buf)
}

pub(crate) fn read_u8(cursor: &mut Cursor<&[u8]>) -> Result<u8, KbiError> {
    read_bytes::<1>(cursor).map(|[byte]| byte)
}

pub(crate) fn read_u16(cursor: &mut Cursor<&[u8]>) -> Result<u16, KbiError> {
    read_bytes(cursor).map(u16::from_le_bytes)
}

pub(crate) fn read_u32(cursor: &mut Cursor<&[u8]>) -> Result<u32, KbiError> {
    read_bytes(cursor).map(u32::from_le_bytes)
}

/// Read an adaptive-width little-endian integer
pub(crate) fn read_word(cursor: &mut Cursor<&[u8]>, width: WordWidth) -> Result<u32, KbiError> {
    match width {
        WordWidth::U32 => read_u32(cursor),
        WordWidth::U16 => read_u16(cursor).map(u32::from),
        WordWidth::U8 => read_u8(cursor).map(u32::from),
    }
}

/// Read a buzzer count, mapping the width's sentinel to infinity
pub(crate) fn read_quantity(
    cursor: &mut Cursor<&[u8]>,
    width: WordWidth,
) -> Result<Quantity, KbiError> {
    let value = read_word(cursor, width)?;
    Ok(if value == width.sentinel() {
        Quantity::Infinite
    } else {
        Quantity::Finite(value)
    })
}

/// Read a NUL-terminated string
///
/// Hitting the end of the input before the terminator is an error.
pub(crate) fn read_string(cursor: &mut Cursor<&[u8]>) -> Result<String, KbiError> {
    let mut bytes = Vec::new();
    loop {
        match read_u8(cursor)? {
            0 => break,
            b => bytes.push(b),
        }
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Narrow a decoded coordinate; values past `u32` fall outside any grid
pub(crate) fn coord(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
