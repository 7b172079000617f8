//! Bounds-checked big-endian reader over an immutable byte slice.

use crate::error::PsdError;

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn truncated(&self, needed: usize) -> PsdError {
        PsdError::TruncatedInput {
            offset: self.pos,
            needed,
        }
    }

    /// Borrow the next `n` bytes and advance past them.
    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8], PsdError> {
        let end = self.pos.checked_add(n).ok_or_else(|| self.truncated(n))?;
        let bytes = self.data.get(self.pos..end).ok_or_else(|| self.truncated(n))?;
        self.pos = end;
        Ok(bytes)
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), PsdError> {
        self.take(n).map(|_| ())
    }

    /// Move forward to an absolute offset.
    pub(crate) fn skip_to(&mut self, offset: usize) -> Result<(), PsdError> {
        if offset < self.pos {
            return Err(PsdError::InvalidData(alloc::format!(
                "cannot seek back from offset {} to {offset}",
                self.pos
            )));
        }
        self.skip(offset - self.pos)
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PsdError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, PsdError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16, PsdError> {
        self.read_array().map(u16::from_be_bytes)
    }

    pub(crate) fn read_i16(&mut self) -> Result<i16, PsdError> {
        self.read_array().map(i16::from_be_bytes)
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, PsdError> {
        self.read_array().map(u32::from_be_bytes)
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32, PsdError> {
        self.read_array().map(i32::from_be_bytes)
    }

    /// Read a u32 length field and skip that many bytes.
    pub(crate) fn skip_block(&mut self) -> Result<u32, PsdError> {
        let len = self.read_u32()?;
        self.skip(len as usize)?;
        Ok(len)
    }
}
