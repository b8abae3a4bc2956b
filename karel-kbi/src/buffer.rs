//! Growable byte buffer with back-patching
//!
//! Writes either append at the cursor or land at an explicit offset. An
//! explicit-offset write never moves the cursor backwards, but pushes it
//! forward when it touches bytes past it, so later appends cannot overwrite
//! a patch.

use crate::error::KbiError;

/// Initial capacity of a new buffer
const INITIAL_CAPACITY: usize = 16;

/// Little-endian output buffer used by the KBI writer
#[derive(Debug, Clone)]
pub struct DynamicBuffer {
    /// Backing storage; its length is the current capacity
    data: Vec<u8>,
    cursor: usize,
}

impl Default for DynamicBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicBuffer {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity.max(1)],
            cursor: 0,
        }
    }

    /// Current write position (also the length of the output)
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Grow so that `end` bytes fit, at least doubling the capacity
    fn ensure_capacity(&mut self, end: usize) {
        if end > self.data.len() {
            let new_capacity = (self.data.len() * 2).max(end);
            self.data.resize(new_capacity, 0);
        }
    }

    fn put(&mut self, offset: Option<usize>, bytes: &[u8]) {
        let start = offset.unwrap_or(self.cursor);
        let end = start + bytes.len();
        self.ensure_capacity(end);
        self.data[start..end].copy_from_slice(bytes);
        self.cursor = self.cursor.max(end);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.put(None, &[value]);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.put(None, &value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.put(None, &value.to_le_bytes());
    }

    pub fn write_u8_at(&mut self, offset: usize, value: u8) {
        self.put(Some(offset), &[value]);
    }

    pub fn write_u16_at(&mut self, offset: usize, value: u16) {
        self.put(Some(offset), &value.to_le_bytes());
    }

    pub fn write_u32_at(&mut self, offset: usize, value: u32) {
        self.put(Some(offset), &value.to_le_bytes());
    }

    /// Write a single character given as a string
    ///
    /// The string must hold exactly one character that fits in one byte.
    /// Nothing is written on error.
    pub fn write_char(&mut self, value: &str) -> Result<(), KbiError> {
        let byte = single_byte_char(value)?;
        self.write_u8(byte);
        Ok(())
    }

    /// Like [`write_char`](Self::write_char), at an explicit offset
    pub fn write_char_at(&mut self, offset: usize, value: &str) -> Result<(), KbiError> {
        let byte = single_byte_char(value)?;
        self.write_u8_at(offset, byte);
        Ok(())
    }

    /// Write a string's bytes followed by a NUL terminator
    ///
    /// The string is cut at its first NUL, which would otherwise end it early
    /// on the reading side.
    pub fn write_string(&mut self, value: &str) {
        let bytes = value.as_bytes();
        let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        self.put(None, &bytes[..len]);
        self.write_u8(0);
    }

    /// Reserve `size` zeroed bytes at the cursor and return their offset
    pub fn reserve(&mut self, size: usize) -> usize {
        let offset = self.cursor;
        self.ensure_capacity(offset + size);
        self.data[offset..offset + size].fill(0);
        self.cursor += size;
        offset
    }

    /// The written bytes, without unused capacity
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.cursor]
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.data.truncate(self.cursor);
        self.data
    }
}

fn single_byte_char(value: &str) -> Result<u8, KbiError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(KbiError::InvalidChar(value.to_string())),
    }
}
